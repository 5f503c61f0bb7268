//! Parameter catalogs for the plan form
//!
//! Fixed option lists the form and CLI both draw from. Order matters:
//! the first entry of each single-choice catalog is the default.

use chrono::Datelike;
use tracing::debug;

/// Plan duration choices
pub const TIMEFRAMES: &[&str] = &[
    "1 Month (Micro-Campaign)",
    "90-Day Sprint (Quarterly)",
    "6 Months (Semi-Annual)",
    "12 Months (Full Fiscal Year)",
    "Product Launch (6-8 Weeks)",
    "Seasonal (Holiday/Black Friday)",
    "Evergreen (Ongoing)",
    "Multi-Year Roadshow",
];

/// Success metric choices
pub const KPIS: &[&str] = &[
    "ROAS (Return on Ad Spend)",
    "CAC (Customer Acquisition Cost)",
    "MQLs (Marketing Qualified Leads)",
    "SQLs (Sales Qualified Leads)",
    "CPA (Cost Per Action)",
    "LTV (Customer Lifetime Value)",
    "Brand Sentiment Score",
    "Share of Voice (SOV)",
    "Organic Keyword Ranking",
    "Viral Coefficient (K-Factor)",
    "Churn Rate Reduction",
    "NPS (Net Promoter Score)",
    "Conversion Rate (CR)",
    "Store Footprint/Traffic",
    "App Installs",
    "Average Order Value (AOV)",
];

/// Marketing channel choices
pub const CHANNELS: &[&str] = &[
    "Google Search (SEM)",
    "Meta Ads (FB/IG)",
    "LinkedIn Ads (B2B)",
    "TikTok Ads (Gen Z)",
    "YouTube Video Marketing",
    "SEO (Organic Content)",
    "Email Automation/CRMs",
    "Influencer/KOL Outreach",
    "Affiliate/Referral Programs",
    "Podcast Sponsorships",
    "Programmatic Display",
    "Reddit/Community Marketing",
    "Webinars & Virtual Events",
    "Physical Events/Trade Shows",
    "OOH (Billboards/Transit)",
    "SMS/WhatsApp Marketing",
    "Product-Led Growth (PLG)",
    "Public Relations (PR)",
];

/// Investment philosophy choices
pub const ALLOCATIONS: &[&str] = &[
    "70/20/10 Rule (Core / Growth / Experimental)",
    "Heavy Conversion (90% Sales / 10% Brand)",
    "Brand Equity (70% Awareness / 30% Sales)",
    "Digital First (100% Online Channels)",
    "Omnichannel (Balance of Physical & Digital)",
    "Aggressive Market Entry (High CAC Allowance)",
    "Profitability Focus (Low CAC / Organic Heavy)",
    "Community Focused (Heavy Influencer/Referral Spend)",
];

/// How many years forward a plan can target (inclusive of the current year)
pub const YEAR_SPAN: i32 = 6;

/// The current calendar year (default plan year)
pub fn default_year() -> i32 {
    let year = chrono::Utc::now().year();
    debug!(year, "default_year: called");
    year
}

/// Selectable plan years: current year through current + 5
pub fn year_choices() -> Vec<i32> {
    let start = default_year();
    debug!(start, "year_choices: called");
    (start..start + YEAR_SPAN).collect()
}

/// Check whether a year is within the selectable range
pub fn year_in_range(year: i32) -> bool {
    let start = default_year();
    let result = year >= start && year < start + YEAR_SPAN;
    debug!(year, result, "year_in_range: called");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(TIMEFRAMES.len(), 8);
        assert_eq!(KPIS.len(), 16);
        assert_eq!(CHANNELS.len(), 18);
        assert_eq!(ALLOCATIONS.len(), 8);
    }

    #[test]
    fn test_catalog_defaults() {
        assert_eq!(TIMEFRAMES[0], "1 Month (Micro-Campaign)");
        assert_eq!(ALLOCATIONS[0], "70/20/10 Rule (Core / Growth / Experimental)");
    }

    #[test]
    fn test_year_choices_span() {
        let years = year_choices();
        assert_eq!(years.len(), YEAR_SPAN as usize);
        assert_eq!(years[0], default_year());
        assert_eq!(years[years.len() - 1], default_year() + YEAR_SPAN - 1);
    }

    #[test]
    fn test_year_in_range() {
        assert!(year_in_range(default_year()));
        assert!(year_in_range(default_year() + 5));
        assert!(!year_in_range(default_year() - 1));
        assert!(!year_in_range(default_year() + 6));
    }

    #[test]
    fn test_catalogs_have_no_duplicates() {
        let mut kpis: Vec<&str> = KPIS.to_vec();
        kpis.sort_unstable();
        kpis.dedup();
        assert_eq!(kpis.len(), KPIS.len());

        let mut channels: Vec<&str> = CHANNELS.to_vec();
        channels.sort_unstable();
        channels.dedup();
        assert_eq!(channels.len(), CHANNELS.len());
    }
}
