//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **UserService**: Accounts, role assignment and single-field patches
//! - **CarService**: Car listings and ownership
//! - **RoleService**: Role reference data

pub mod car_service;
pub mod paging;
pub mod role_service;
pub mod user_service;

// Re-export user service types
pub use user_service::{UserError, UserService, UserServiceImpl};

// Re-export car service types
pub use car_service::{CarError, CarService, CarServiceImpl};

// Re-export role service types
pub use role_service::{RoleError, RoleService, RoleServiceImpl};

pub use paging::PageNotFound;
