//! Page range validation shared by every paged service call.

use crate::domain::value_objects::Page;
use crate::shared::error::AppError;

/// The requested page index lies past the end of the collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Page not found! Page: {page}, total pages: {total_pages}")]
pub struct PageNotFound {
    pub page: u32,
    pub total_pages: u64,
}

/// Reject an empty page unless it is page 0.
///
/// An empty page 0 means the collection itself is empty, which is a valid
/// state the transport layer reports as "no content".
pub fn validate_page<T>(page: &Page<T>) -> Result<(), PageNotFound> {
    if page.is_empty() && !page.is_first() {
        return Err(PageNotFound {
            page: page.page,
            total_pages: page.total_pages(),
        });
    }
    Ok(())
}

impl From<PageNotFound> for AppError {
    fn from(err: PageNotFound) -> Self {
        AppError::PageNotFound(err.to_string())
    }
}
