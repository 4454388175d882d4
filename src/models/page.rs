use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

/// Offset pagination window shared by every list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Page {
    pub fn new(skip: i64, limit: i64) -> Result<Self, AppError> {
        let page = Self { skip, limit };
        page.validate()?;
        Ok(page)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.skip < 0 {
            return Err(AppError::validation("skip must be >= 0"));
        }
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(AppError::validation(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_hundred() {
        let page: Page = serde_json::from_str("{}").expect("page json");
        assert_eq!(page, Page::default());
        assert_eq!(page.limit, 100);
        assert!(page.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_windows() {
        assert!(matches!(Page::new(-1, 10), Err(AppError::Validation(_))));
        assert!(matches!(Page::new(0, 0), Err(AppError::Validation(_))));
        assert!(matches!(Page::new(0, 1001), Err(AppError::Validation(_))));
        assert!(Page::new(0, 1).is_ok());
        assert!(Page::new(5, 1000).is_ok());
    }
}
