//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here.
//! Key handling (app.rs) mutates this state; views.rs only reads it.

use tracing::debug;

use crate::config::DefaultsConfig;
use crate::options;
use crate::plan::{PlanRequest, RequestStatus};

/// Shown in the plan pane until a plan has been generated
pub const PLAN_PLACEHOLDER: &str = "Your strategy will appear here";

/// Form fields in traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Brand,
    Year,
    Budget,
    Timeframe,
    Kpis,
    Channels,
    Allocation,
    Submit,
}

impl FormField {
    /// Get the next field in the cycle
    pub fn next(self) -> Self {
        debug!(?self, "FormField::next: called");
        match self {
            Self::Brand => Self::Year,
            Self::Year => Self::Budget,
            Self::Budget => Self::Timeframe,
            Self::Timeframe => Self::Kpis,
            Self::Kpis => Self::Channels,
            Self::Channels => Self::Allocation,
            Self::Allocation => Self::Submit,
            Self::Submit => Self::Brand,
        }
    }

    /// Get the previous field in the cycle
    pub fn prev(self) -> Self {
        debug!(?self, "FormField::prev: called");
        match self {
            Self::Brand => Self::Submit,
            Self::Year => Self::Brand,
            Self::Budget => Self::Year,
            Self::Timeframe => Self::Budget,
            Self::Kpis => Self::Timeframe,
            Self::Channels => Self::Kpis,
            Self::Allocation => Self::Channels,
            Self::Submit => Self::Allocation,
        }
    }

    /// Display label for the form pane
    pub fn label(self) -> &'static str {
        match self {
            Self::Brand => "Brand",
            Self::Year => "Year",
            Self::Budget => "Budget",
            Self::Timeframe => "Plan Duration",
            Self::Kpis => "Success Metrics (KPIs)",
            Self::Channels => "Chosen Channels",
            Self::Allocation => "Investment Philosophy",
            Self::Submit => "Generate Plan",
        }
    }

    /// Whether this field takes typed text
    pub fn is_text(self) -> bool {
        matches!(self, Self::Brand | Self::Budget)
    }

    /// Whether Left/Right cycles this field through a catalog
    pub fn is_cycling(self) -> bool {
        matches!(self, Self::Year | Self::Timeframe | Self::Allocation)
    }
}

/// Which multi-select catalog a picker overlay is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerTarget {
    Kpis,
    Channels,
}

impl PickerTarget {
    /// The catalog behind this picker
    pub fn catalog(self) -> &'static [&'static str] {
        match self {
            Self::Kpis => options::KPIS,
            Self::Channels => options::CHANNELS,
        }
    }

    /// Overlay title
    pub fn title(self) -> &'static str {
        match self {
            Self::Kpis => "Success Metrics (KPIs)",
            Self::Channels => "Chosen Channels",
        }
    }
}

/// Cursor state for an open picker overlay
#[derive(Debug, Clone)]
pub struct PickerState {
    pub target: PickerTarget,
    pub cursor: usize,
}

impl PickerState {
    pub fn new(target: PickerTarget) -> Self {
        Self { target, cursor: 0 }
    }
}

/// Interaction mode (modal)
#[derive(Debug, Clone, Default)]
pub enum InteractionMode {
    /// Normal form navigation
    #[default]
    Form,
    /// Multi-select picker overlay (Enter on KPIs/Channels)
    Picker(PickerState),
    /// Help overlay
    Help,
}

impl InteractionMode {
    /// Check if a picker overlay is open
    pub fn is_picker(&self) -> bool {
        matches!(self, Self::Picker(_))
    }
}

/// Complete TUI application state
pub struct AppState {
    /// Brand name text buffer
    pub brand_input: String,
    /// Budget text buffer (digits only)
    pub budget_input: String,
    /// Index into options::year_choices()
    pub year_index: usize,
    /// Index into options::TIMEFRAMES
    pub timeframe_index: usize,
    /// Index into options::ALLOCATIONS
    pub allocation_index: usize,
    /// Selection flags parallel to options::KPIS
    pub kpi_selected: Vec<bool>,
    /// Selection flags parallel to options::CHANNELS
    pub channel_selected: Vec<bool>,

    /// Currently focused form field
    pub focus: FormField,
    /// Current interaction mode
    pub interaction_mode: InteractionMode,

    /// Lifecycle of the current generation request
    pub request_status: RequestStatus,
    /// The generated plan, rendered in the right pane
    pub plan_markdown: Option<String>,
    /// Scroll offset for the plan pane
    pub plan_scroll: u16,

    /// Transient message (validation errors, in-flight rejections)
    pub notification: Option<String>,
    /// Submit queued by key handling, drained by the runner
    pub pending_submit: Option<PlanRequest>,
    /// Set when the user quits
    pub should_quit: bool,
}

impl AppState {
    pub fn new(defaults: &DefaultsConfig) -> Self {
        debug!(budget = defaults.budget, "AppState::new: called");
        Self {
            brand_input: String::new(),
            budget_input: defaults.budget.to_string(),
            year_index: 0,
            timeframe_index: 0,
            allocation_index: 0,
            kpi_selected: vec![false; options::KPIS.len()],
            channel_selected: vec![false; options::CHANNELS.len()],
            focus: FormField::default(),
            interaction_mode: InteractionMode::default(),
            request_status: RequestStatus::Idle,
            plan_markdown: None,
            plan_scroll: 0,
            notification: None,
            pending_submit: None,
            should_quit: false,
        }
    }

    /// The year currently selected in the form
    pub fn selected_year(&self) -> i32 {
        let years = options::year_choices();
        years[self.year_index.min(years.len() - 1)]
    }

    /// Parse the budget buffer (separators tolerated, 0 on garbage)
    ///
    /// An unparseable buffer becomes 0, which validation rejects.
    pub fn parsed_budget(&self) -> u64 {
        let cleaned: String = self
            .budget_input
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        cleaned.parse().unwrap_or(0)
    }

    /// Labels of the currently selected KPIs
    pub fn selected_kpis(&self) -> Vec<String> {
        selected_labels(options::KPIS, &self.kpi_selected)
    }

    /// Labels of the currently selected channels
    pub fn selected_channels(&self) -> Vec<String> {
        selected_labels(options::CHANNELS, &self.channel_selected)
    }

    /// Assemble a PlanRequest from the current form values
    pub fn build_request(&self) -> PlanRequest {
        debug!(brand = %self.brand_input, "AppState::build_request: called");
        PlanRequest {
            brand_name: self.brand_input.trim().to_string(),
            year: self.selected_year(),
            budget: self.parsed_budget(),
            timeframe: options::TIMEFRAMES[self.timeframe_index].to_string(),
            kpis: self.selected_kpis(),
            channels: self.selected_channels(),
            allocation: options::ALLOCATIONS[self.allocation_index].to_string(),
        }
    }

    /// Status line for the header
    pub fn status_message(&self) -> Option<&'static str> {
        match self.request_status {
            RequestStatus::Idle => None,
            RequestStatus::InFlight => Some("Generating..."),
            RequestStatus::Succeeded => Some("Strategy Crafted!"),
            RequestStatus::Failed => Some("The engine stalled. Please try again."),
        }
    }
}

fn selected_labels(catalog: &[&str], flags: &[bool]) -> Vec<String> {
    catalog
        .iter()
        .zip(flags)
        .filter(|(_, selected)| **selected)
        .map(|(label, _)| label.to_string())
        .collect()
}
