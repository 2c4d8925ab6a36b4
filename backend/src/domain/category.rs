//! Menu category entity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ActorId;

/// Identifier assigned by the repository on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(i64);

impl CategoryId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether the category is offered to customers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    /// Visible on the menu.
    #[default]
    Enabled,
    /// Hidden from the menu.
    Disabled,
}

/// Caller-supplied category content, without identity or audit metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    /// Display name.
    pub name: String,
    /// Position on the menu; lower sorts first.
    #[serde(default)]
    pub sort: i32,
    /// Menu visibility.
    #[serde(default)]
    pub status: CategoryStatus,
}

/// Persisted menu category with its audit metadata.
///
/// The audit fields are filled by the stamping interceptor on insert and
/// update; callers leave them empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Repository-assigned identifier; `None` before the first insert.
    pub id: Option<CategoryId>,
    /// Display name.
    pub name: String,
    /// Position on the menu.
    pub sort: i32,
    /// Menu visibility.
    pub status: CategoryStatus,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Creating actor.
    pub created_by: Option<ActorId>,
    /// Last modification time.
    pub updated_at: Option<DateTime<Utc>>,
    /// Last modifying actor.
    pub updated_by: Option<ActorId>,
}

crate::impl_auditable!(Category {
    created_at: created_at,
    created_by: created_by,
    updated_at: updated_at,
    updated_by: updated_by,
});

impl Category {
    /// New, not yet persisted category.
    pub fn from_draft(draft: CategoryDraft) -> Self {
        Self {
            id: None,
            name: draft.name,
            sort: draft.sort,
            status: draft.status,
            created_at: None,
            created_by: None,
            updated_at: None,
            updated_by: None,
        }
    }

    /// Replace the content fields, keeping identity and audit metadata.
    pub fn apply(&mut self, draft: CategoryDraft) {
        self.name = draft.name;
        self.sort = draft.sort;
        self.status = draft.status;
    }
}
