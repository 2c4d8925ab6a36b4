//! Domain ports and supporting types for the hexagonal boundary.

mod category_command;
mod category_repository;

pub use category_command::CategoryCommand;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError};
