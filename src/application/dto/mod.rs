//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{
    CarRequest, PageQuery, RoleCreateRequest, UserContactPatch, UserCreateRequest,
    UserDisplayNamePatch, UserPasswordPatch, UserRolesPatch,
};
pub use response::{
    CarResponse, PageResponse, RoleResponse, UserPrivateResponse, UserPublicResponse,
};
