pub mod format_json;

pub use format_json::{
    format_report_json, list_rules_json, ApiError, ApiResponse, FormatOutcome, FormatRequest,
    FormatResponse, RuleSummary, RulesRequest, RulesResponse, API_VERSION,
};

#[cfg(feature = "catalog")]
pub use format_json::{format_report_catalog_json, list_rules_catalog_json};
