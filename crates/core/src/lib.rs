//! `content-admin-core` — shared building blocks for the content admin crates.
//!
//! Pure types only: identifiers, error model, and marker traits. No IO.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, FieldErrors};
pub use id::{CompanyId, ProductId};
pub use value_object::ValueObject;
