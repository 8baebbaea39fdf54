//! # Value Objects
//!
//! Immutable value types shared by entities and services.

mod page;

pub use page::{Page, PageRequest};
