//! # Domain Layer
//!
//! The domain layer contains the core business types of the marketplace.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (User, Car, Role) and repository traits
//! - **value_objects**: Immutable value types (PageRequest, Page)

pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
