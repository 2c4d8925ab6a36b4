//! Persistence adapters for the category repository port.

mod memory_category_repository;

pub use memory_category_repository::FixtureCategoryRepository;
