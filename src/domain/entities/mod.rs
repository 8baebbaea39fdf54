//! # Domain Entities
//!
//! Core domain entities of the marketplace. All entities map directly to
//! their corresponding database tables.
//!
//! - **User**: account with credential, profile, roles and owned cars
//! - **Car**: a listed car, owned by exactly one user
//! - **Role**: shared reference data assigned to users
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod car;
mod role;
mod user;

pub use car::{Car, CarDraft, CarRepository};
pub use role::{Role, RoleRepository};
pub use user::{User, UserDraft, UserRepository};

#[cfg(test)]
pub use car::MockCarRepository;
#[cfg(test)]
pub use role::MockRoleRepository;
#[cfg(test)]
pub use user::MockUserRepository;
