//! Plan request parameters and validation

use thiserror::Error;
use tracing::debug;

use crate::options;

/// Collected form parameters for one plan generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    /// Brand the plan is for (required)
    pub brand_name: String,

    /// Target calendar year
    pub year: i32,

    /// Campaign budget in whole dollars
    pub budget: u64,

    /// Plan duration (one of options::TIMEFRAMES)
    pub timeframe: String,

    /// Selected success metrics (may be empty)
    pub kpis: Vec<String>,

    /// Selected channels (may be empty)
    pub channels: Vec<String>,

    /// Investment philosophy (one of options::ALLOCATIONS)
    pub allocation: String,
}

impl PlanRequest {
    /// Create a request with catalog defaults for the given brand
    pub fn new(brand_name: impl Into<String>, budget: u64) -> Self {
        let brand_name = brand_name.into();
        debug!(%brand_name, budget, "PlanRequest::new: called");
        Self {
            brand_name,
            year: options::default_year(),
            budget,
            timeframe: options::TIMEFRAMES[0].to_string(),
            kpis: Vec::new(),
            channels: Vec::new(),
            allocation: options::ALLOCATIONS[0].to_string(),
        }
    }

    /// Check the request before any network call
    ///
    /// Returns the first violation found. A request that passes here is
    /// safe to turn into a prompt.
    pub fn validate(&self) -> Result<(), ValidationError> {
        debug!(brand = %self.brand_name, year = self.year, budget = self.budget, "PlanRequest::validate: called");
        if self.brand_name.trim().is_empty() {
            debug!("PlanRequest::validate: brand name is empty");
            return Err(ValidationError::MissingBrand);
        }

        if !options::year_in_range(self.year) {
            debug!(year = self.year, "PlanRequest::validate: year out of range");
            return Err(ValidationError::YearOutOfRange { year: self.year });
        }

        if self.budget == 0 {
            debug!("PlanRequest::validate: budget is zero");
            return Err(ValidationError::ZeroBudget);
        }

        Ok(())
    }
}

/// Reasons a request is rejected before any network call
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Brand name is required")]
    MissingBrand,

    #[error("Year {year} is outside the selectable range")]
    YearOutOfRange { year: i32 },

    #[error("Budget must be greater than zero")]
    ZeroBudget,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> PlanRequest {
        let mut request = PlanRequest::new("Acme Coffee", 25_000);
        request.kpis = vec!["ROAS (Return on Ad Spend)".to_string()];
        request.channels = vec!["SEO (Organic Content)".to_string()];
        request
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_empty_brand_rejected() {
        let mut request = valid_request();
        request.brand_name = String::new();
        assert_eq!(request.validate(), Err(ValidationError::MissingBrand));
    }

    #[test]
    fn test_whitespace_brand_rejected() {
        let mut request = valid_request();
        request.brand_name = "   ".to_string();
        assert_eq!(request.validate(), Err(ValidationError::MissingBrand));
    }

    #[test]
    fn test_year_out_of_range_rejected() {
        let mut request = valid_request();
        request.year = crate::options::default_year() - 1;
        assert!(matches!(request.validate(), Err(ValidationError::YearOutOfRange { .. })));

        request.year = crate::options::default_year() + 10;
        assert!(matches!(request.validate(), Err(ValidationError::YearOutOfRange { .. })));
    }

    #[test]
    fn test_zero_budget_rejected() {
        let mut request = valid_request();
        request.budget = 0;
        assert_eq!(request.validate(), Err(ValidationError::ZeroBudget));
    }

    #[test]
    fn test_empty_selections_allowed() {
        let mut request = valid_request();
        request.kpis.clear();
        request.channels.clear();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_new_uses_catalog_defaults() {
        let request = PlanRequest::new("Acme", 1000);
        assert_eq!(request.timeframe, crate::options::TIMEFRAMES[0]);
        assert_eq!(request.allocation, crate::options::ALLOCATIONS[0]);
        assert_eq!(request.year, crate::options::default_year());
    }
}
