//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::Deserialize;
use validator::Validate;

use crate::config::PaginationSettings;
use crate::domain::{CarDraft, PageRequest, UserDraft};
use crate::shared::error::AppError;

/// Create user request, also the body of a full user update
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 50, message = "Display name must be 1-50 characters"))]
    pub display_name: String,

    #[validate(length(min = 1, max = 100, message = "Contact must be 1-100 characters"))]
    pub contact: String,

    #[serde(default)]
    pub role_ids: Vec<i32>,
}

impl UserCreateRequest {
    pub fn into_parts(self) -> (UserDraft, Vec<i32>) {
        (
            UserDraft {
                username: self.username,
                password: self.password,
                display_name: self.display_name,
                contact: self.contact,
            },
            self.role_ids,
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UserPasswordPatch {
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserDisplayNamePatch {
    #[validate(length(min = 1, max = 50, message = "Display name must be 1-50 characters"))]
    pub display_name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UserContactPatch {
    #[validate(length(min = 1, max = 100, message = "Contact must be 1-100 characters"))]
    pub contact: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserRolesPatch {
    pub role_ids: Vec<i32>,
}

/// Create or replace a car. The owner comes from the path.
#[derive(Debug, Deserialize, Validate)]
pub struct CarRequest {
    #[validate(length(min = 1, max = 50, message = "Make must be 1-50 characters"))]
    pub make: String,

    #[validate(length(min = 1, max = 50, message = "Model must be 1-50 characters"))]
    pub model: String,

    #[validate(range(min = 1886, max = 2100, message = "Year must be between 1886 and 2100"))]
    pub year: i32,

    #[validate(length(min = 1, max = 50, message = "Trim must be 1-50 characters"))]
    pub trim: String,

    #[validate(length(min = 1, max = 30, message = "Color must be 1-30 characters"))]
    pub color: String,

    #[validate(length(min = 1, max = 30, message = "Transmission must be 1-30 characters"))]
    pub transmission: String,

    #[validate(length(min = 1, max = 30, message = "Fuel must be 1-30 characters"))]
    pub fuel: String,
}

impl From<CarRequest> for CarDraft {
    fn from(req: CarRequest) -> Self {
        Self {
            make: req.make,
            model: req.model,
            year: req.year,
            trim: req.trim,
            color: req.color,
            transmission: req.transmission,
            fuel: req.fuel,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RoleCreateRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,
}

/// Page query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl PageQuery {
    /// Apply defaults and bounds from the pagination settings.
    pub fn resolve(&self, settings: &PaginationSettings) -> Result<PageRequest, AppError> {
        let page = self.page.unwrap_or(0);
        if page < 0 {
            return Err(AppError::invalid(
                "page",
                "Page number must be greater than or equal to 0",
            ));
        }
        let page = u32::try_from(page)
            .map_err(|_| AppError::invalid("page", "Page number is too large"))?;

        let size = self.size.unwrap_or(i64::from(settings.default_size));
        if size < 1 {
            return Err(AppError::invalid(
                "size",
                "Page size must be greater than or equal to 1",
            ));
        }
        if size > i64::from(settings.max_size) {
            return Err(AppError::invalid(
                "size",
                format!(
                    "Page size must be less than or equal to {}",
                    settings.max_size
                ),
            ));
        }

        // Bounded by max_size above
        Ok(PageRequest::new(page, size as u32))
    }
}
