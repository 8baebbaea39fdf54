//! Response DTOs
//!
//! Data structures for API response bodies. A user has two projections:
//! the public one for lookups and the private one returned to writers.

use serde::Serialize;

use crate::domain::{Car, Page, Role, User};

/// User as seen by anyone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublicResponse {
    pub user_id: i64,
    pub username: String,
    pub display_name: String,
    pub contact: String,
}

impl From<User> for UserPublicResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            display_name: user.display_name,
            contact: user.contact,
        }
    }
}

/// User as returned after a write, with credential hash and relations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPrivateResponse {
    pub user_id: i64,
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub contact: String,
    pub car_ids: Vec<i64>,
    pub role_ids: Vec<i32>,
}

impl From<User> for UserPrivateResponse {
    fn from(user: User) -> Self {
        Self {
            role_ids: user.role_ids(),
            user_id: user.id,
            username: user.username,
            password: user.password,
            display_name: user.display_name,
            contact: user.contact,
            car_ids: user.car_ids,
        }
    }
}

/// Car response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub car_id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub trim: String,
    pub color: String,
    pub transmission: String,
    pub fuel: String,
    pub user_id: i64,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            car_id: car.id,
            make: car.make,
            model: car.model,
            year: car.year,
            trim: car.trim,
            color: car.color,
            transmission: car.transmission,
            fuel: car.fuel,
            user_id: car.user_id,
        }
    }
}

/// Role response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub role_id: i32,
    pub name: String,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            role_id: role.id,
            name: role.name,
        }
    }
}

/// One page of a collection plus its position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
}

impl<T> PageResponse<T> {
    /// Project every entity of a page through `From`.
    pub fn from_page<E>(page: Page<E>) -> Self
    where
        T: From<E>,
    {
        let page = page.map(T::from);
        Self {
            total_pages: page.total_pages(),
            first: page.is_first(),
            last: page.is_last(),
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            content: page.content,
        }
    }
}
