//! Prompt construction
//!
//! Renders a validated PlanRequest into the strategy prompt sent to the
//! generation endpoint. The template is fixed; only the parameter lines
//! vary.

use tracing::debug;

use super::PlanRequest;

/// Build the generation prompt for a request
pub fn build_prompt(request: &PlanRequest) -> String {
    debug!(brand = %request.brand_name, year = request.year, "build_prompt: called");
    format!(
        "Act as a world-class CMO and Strategy Consultant. Create a {year} Marketing Master Plan for \"{brand}\".\n\
         \n\
         PARAMETERS:\n\
         - Budget: {budget}\n\
         - Plan Duration: {timeframe}\n\
         - Success Metrics (KPIs): {kpis}\n\
         - Chosen Channels: {channels}\n\
         - Investment Philosophy: {allocation}\n\
         \n\
         Please generate a high-level strategic document in Markdown:\n\
         1. Strategic Objectives (What are we winning?)\n\
         2. Market & SWOT Analysis (Contextual landscape)\n\
         3. Deep-Dive Channel Strategy (Tactical execution per channel)\n\
         4. Content & Creative Pillars (Messaging and themes)\n\
         5. Execution Timeline (Phased approach)\n",
        year = request.year,
        brand = request.brand_name,
        budget = format_currency(request.budget),
        timeframe = request.timeframe,
        kpis = request.kpis.join(", "),
        channels = request.channels.join(", "),
        allocation = request.allocation,
    )
}

/// Format a dollar amount with thousands separators ("$25,000")
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("${}", grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options;

    fn count_occurrences(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    fn sample_request() -> PlanRequest {
        PlanRequest {
            brand_name: "Acme Coffee".to_string(),
            year: options::default_year(),
            budget: 25_000,
            timeframe: "90-Day Sprint (Quarterly)".to_string(),
            kpis: vec![
                "ROAS (Return on Ad Spend)".to_string(),
                "NPS (Net Promoter Score)".to_string(),
            ],
            channels: vec!["SEO (Organic Content)".to_string(), "Email Automation/CRMs".to_string()],
            allocation: "Digital First (100% Online Channels)".to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_each_parameter_exactly_once() {
        let request = sample_request();
        let prompt = build_prompt(&request);

        assert_eq!(count_occurrences(&prompt, "\"Acme Coffee\""), 1);
        assert_eq!(count_occurrences(&prompt, "$25,000"), 1);
        assert_eq!(count_occurrences(&prompt, "90-Day Sprint (Quarterly)"), 1);
        for kpi in &request.kpis {
            assert_eq!(count_occurrences(&prompt, kpi), 1, "kpi: {}", kpi);
        }
        for channel in &request.channels {
            assert_eq!(count_occurrences(&prompt, channel), 1, "channel: {}", channel);
        }
        assert_eq!(count_occurrences(&prompt, "Digital First (100% Online Channels)"), 1);
    }

    #[test]
    fn test_prompt_lists_join_with_comma_space() {
        let prompt = build_prompt(&sample_request());
        assert!(prompt.contains("ROAS (Return on Ad Spend), NPS (Net Promoter Score)"));
        assert!(prompt.contains("SEO (Organic Content), Email Automation/CRMs"));
    }

    #[test]
    fn test_prompt_has_five_mandated_sections() {
        let prompt = build_prompt(&sample_request());
        assert!(prompt.contains("1. Strategic Objectives (What are we winning?)"));
        assert!(prompt.contains("2. Market & SWOT Analysis (Contextual landscape)"));
        assert!(prompt.contains("3. Deep-Dive Channel Strategy (Tactical execution per channel)"));
        assert!(prompt.contains("4. Content & Creative Pillars (Messaging and themes)"));
        assert!(prompt.contains("5. Execution Timeline (Phased approach)"));
    }

    #[test]
    fn test_prompt_with_empty_selections() {
        let mut request = sample_request();
        request.kpis.clear();
        request.channels.clear();

        let prompt = build_prompt(&request);
        assert!(prompt.contains("- Success Metrics (KPIs): \n"));
        assert!(prompt.contains("- Chosen Channels: \n"));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(1_000), "$1,000");
        assert_eq!(format_currency(25_000), "$25,000");
        assert_eq!(format_currency(1_234_567), "$1,234,567");
    }
}
