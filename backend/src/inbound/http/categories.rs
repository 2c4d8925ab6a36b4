//! Category HTTP handlers.
//!
//! ```text
//! GET /api/v1/categories
//! POST /api/v1/categories
//! PUT /api/v1/categories/{id}
//! ```
//!
//! Handlers never accept audit fields; the acting user comes from the
//! request's actor scope.

use actix_web::{HttpResponse, get, post, put, web};
use pagination::PageRequest;

use crate::domain::{CategoryDraft, CategoryId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// List one page of categories.
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    page: web::Query<PageRequest>,
) -> ApiResult<HttpResponse> {
    let page = state.categories.page(page.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Create a category attributed to the request's actor.
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    payload: web::Json<CategoryDraft>,
) -> ApiResult<HttpResponse> {
    let category = state.categories.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(category))
}

/// Replace a category's content, attributed to the request's actor.
#[put("/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CategoryDraft>,
) -> ApiResult<HttpResponse> {
    let id = CategoryId::new(path.into_inner());
    let category = state.categories.update(id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category))
}
