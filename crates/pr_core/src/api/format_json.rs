//! JSON API for report formatting
//!
//! String-in/string-out endpoints for host shells that consume the
//! engine across a language boundary, plus rule-listing support for
//! settings screens.

use crate::analyzer::Analyzer;
use crate::report::{AppMeta, Report};
use crate::rules::FormattedValue;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

/// Structured API error with codes and details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: None }
    }

    pub fn with_details(
        code: &str,
        message: &str,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: Some(details) }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Report formatting request
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FormatRequest {
    pub schema_version: Option<String>,
    /// Title id, hex (case-insensitive).
    pub app_id: String,
    /// Application name for formatters; falls back to the id.
    pub title: Option<String>,
    pub version: Option<String>,
    /// Report entries as a JSON object.
    pub report: serde_json::Value,
}

/// Formatting outcome, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormatOutcome {
    Text { text: String },
    ForceReset,
    Unhandled,
}

impl From<FormattedValue> for FormatOutcome {
    fn from(value: FormattedValue) -> Self {
        match value {
            FormattedValue::Text(text) => FormatOutcome::Text { text },
            FormattedValue::ForceReset => FormatOutcome::ForceReset,
            FormattedValue::Unhandled => FormatOutcome::Unhandled,
        }
    }
}

/// Report formatting response
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FormatResponse {
    pub app_id: String,
    pub outcome: FormatOutcome,
}

/// Rule listing request
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RulesRequest {
    pub schema_version: Option<String>,
    pub app_id: String,
}

/// One rule in a listing
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RuleSummary {
    pub priority: i32,
    pub keys: Vec<String>,
    pub kind: String,
}

/// Rule listing response, rules in descending priority
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RulesResponse {
    pub app_id: String,
    pub rules: Vec<RuleSummary>,
}

impl FormatRequest {
    /// Validate the formatting request
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref schema) = self.schema_version {
            if schema != API_VERSION {
                return Err(ApiError::new(
                    "UNSUPPORTED_SCHEMA",
                    &format!("Schema version {} is not supported (expected {})", schema, API_VERSION),
                ));
            }
        }
        if self.app_id.trim().is_empty() {
            return Err(ApiError::new("MISSING_APP_ID", "app_id must not be empty"));
        }
        Ok(())
    }
}

impl RulesRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref schema) = self.schema_version {
            if schema != API_VERSION {
                return Err(ApiError::new(
                    "UNSUPPORTED_SCHEMA",
                    &format!("Schema version {} is not supported (expected {})", schema, API_VERSION),
                ));
            }
        }
        if self.app_id.trim().is_empty() {
            return Err(ApiError::new("MISSING_APP_ID", "app_id must not be empty"));
        }
        Ok(())
    }
}

/// Parse failures carry the serde message in the details map.
fn invalid_json_error(e: &serde_json::Error) -> ApiError {
    let mut details = HashMap::new();
    details.insert("parse_error".to_string(), serde_json::Value::String(e.to_string()));
    ApiError::with_details("INVALID_JSON", "Invalid JSON format", details)
}

/// Format a play report from a JSON request string
///
/// # Arguments
/// * `analyzer` - Rule sets to run the report through
/// * `request_json` - JSON string containing FormatRequest
///
/// # Returns
/// JSON string containing ApiResponse<FormatResponse>
pub fn format_report_json(analyzer: &Analyzer, request_json: &str) -> String {
    info!("Processing report format request");

    // Parse the request
    let request: FormatRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse FormatRequest: {}", e);
            let response: ApiResponse<FormatResponse> =
                ApiResponse::error(invalid_json_error(&e));
            return serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string());
        }
    };

    // Validate the request
    if let Err(error) = request.validate() {
        warn!("Format request validation failed: {:?}", error);
        let response: ApiResponse<FormatResponse> = ApiResponse::error(error);
        return serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string());
    }

    // Build the report from the embedded JSON object
    let report = match Report::from_json_value(request.report) {
        Ok(report) => report,
        Err(e) => {
            warn!("Format request carried an unusable report: {}", e);
            let error = ApiError::new("INVALID_REPORT", &e.to_string());
            let response: ApiResponse<FormatResponse> = ApiResponse::error(error);
            return serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string());
        }
    };

    let title = request.title.unwrap_or_else(|| request.app_id.clone());
    let mut app = AppMeta::new(request.app_id, title);
    if let Some(version) = request.version {
        app = app.with_version(version);
    }

    let outcome = analyzer.format(&app, &report);
    debug!("Report for {} formatted as {:?}", app.app_id, outcome);

    let response = ApiResponse::success(FormatResponse { app_id: app.app_id, outcome: outcome.into() });
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}

/// List the rules registered for an application
///
/// # Arguments
/// * `analyzer` - Rule sets to inspect
/// * `request_json` - JSON string containing RulesRequest
///
/// # Returns
/// JSON string containing ApiResponse<RulesResponse>, rules ordered by
/// descending priority (ties keep registration order)
pub fn list_rules_json(analyzer: &Analyzer, request_json: &str) -> String {
    debug!("Processing rule listing request");

    let request: RulesRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse RulesRequest: {}", e);
            let response: ApiResponse<RulesResponse> =
                ApiResponse::error(invalid_json_error(&e));
            return serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string());
        }
    };

    if let Err(error) = request.validate() {
        warn!("Rule listing request validation failed: {:?}", error);
        let response: ApiResponse<RulesResponse> = ApiResponse::error(error);
        return serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string());
    }

    let set = match analyzer.rule_set_for(&request.app_id) {
        Some(set) => set,
        None => {
            let error = ApiError::new(
                "UNKNOWN_APP_ID",
                &format!("No rule set covers application {}", request.app_id),
            );
            let response: ApiResponse<RulesResponse> = ApiResponse::error(error);
            return serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string());
        }
    };

    let mut rules: Vec<RuleSummary> = set
        .rules()
        .iter()
        .map(|rule| RuleSummary {
            priority: rule.priority,
            keys: rule.keys().to_vec(),
            kind: rule.kind().label().to_string(),
        })
        .collect();
    rules.sort_by_key(|summary| Reverse(summary.priority));

    let response = ApiResponse::success(RulesResponse {
        app_id: request.app_id.to_lowercase(),
        rules,
    });
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}

/// Format a play report against the built-in catalog
#[cfg(feature = "catalog")]
pub fn format_report_catalog_json(request_json: &str) -> String {
    format_report_json(crate::catalog::analyzer(), request_json)
}

/// List built-in catalog rules for an application
#[cfg(feature = "catalog")]
pub fn list_rules_catalog_json(request_json: &str) -> String {
    list_rules_json(crate::catalog::analyzer(), request_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::SingleValue;
    use serde_json::json;
    use std::sync::Arc;

    fn test_analyzer() -> Analyzer {
        Analyzer::new().add_spec("01007ef00011e000", |spec| {
            spec.add_value_formatter(
                "location",
                Arc::new(|payload: SingleValue<'_>| format!("Exploring {}", payload.value).into()),
            )
            .add_value_formatter_at(
                20,
                "is_loading",
                Arc::new(|_payload: SingleValue<'_>| FormattedValue::ForceReset),
            )
        })
    }

    #[test]
    fn test_format_report_json_success() {
        let request = json!({
            "schema_version": "v1",
            "app_id": "01007EF00011E000",
            "title": "The Legend of Zelda: Breath of the Wild",
            "report": { "location": "Hyrule Field" }
        });

        let result = format_report_json(&test_analyzer(), &request.to_string());
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["success"], true);
        assert_eq!(parsed["schema_version"], "v1");
        assert_eq!(parsed["data"]["app_id"], "01007ef00011e000");
        assert_eq!(parsed["data"]["outcome"]["kind"], "text");
        assert_eq!(parsed["data"]["outcome"]["text"], "Exploring Hyrule Field");
    }

    #[test]
    fn test_format_report_json_reset_outcome() {
        let request = json!({
            "app_id": "01007ef00011e000",
            "report": { "is_loading": true }
        });

        let result = format_report_json(&test_analyzer(), &request.to_string());
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["data"]["outcome"]["kind"], "force_reset");
    }

    #[test]
    fn test_format_report_json_unknown_app_is_unhandled() {
        let request = json!({
            "app_id": "0100000000999999",
            "report": { "location": "Nowhere" }
        });

        let result = format_report_json(&test_analyzer(), &request.to_string());
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        // Unknown apps are not an error: the outcome is simply unhandled.
        assert_eq!(parsed["success"], true);
        assert_eq!(parsed["data"]["outcome"]["kind"], "unhandled");
    }

    #[test]
    fn test_format_report_json_rejects_malformed_json() {
        let result = format_report_json(&test_analyzer(), "not json");
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["error"]["code"], "INVALID_JSON");
        // The serde parse message rides along in the details map.
        assert!(parsed["error"]["details"]["parse_error"].is_string());
    }

    #[test]
    fn test_format_report_json_rejects_non_object_report() {
        let request = json!({
            "app_id": "01007ef00011e000",
            "report": [1, 2, 3]
        });

        let result = format_report_json(&test_analyzer(), &request.to_string());
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["error"]["code"], "INVALID_REPORT");
    }

    #[test]
    fn test_format_report_json_rejects_wrong_schema() {
        let request = json!({
            "schema_version": "v9",
            "app_id": "01007ef00011e000",
            "report": {}
        });

        let result = format_report_json(&test_analyzer(), &request.to_string());
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["error"]["code"], "UNSUPPORTED_SCHEMA");
    }

    #[test]
    fn test_list_rules_json_descending_priority() {
        let request = json!({ "app_id": "01007EF00011E000" });

        let result = list_rules_json(&test_analyzer(), &request.to_string());
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["success"], true);
        let rules = parsed["data"]["rules"].as_array().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0]["priority"], 20);
        assert_eq!(rules[0]["keys"][0], "is_loading");
        assert_eq!(rules[1]["priority"], 0);
        assert_eq!(rules[1]["kind"], "single");
    }

    #[test]
    fn test_list_rules_json_unknown_app() {
        let request = json!({ "app_id": "0100000000999999" });

        let result = list_rules_json(&test_analyzer(), &request.to_string());
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["error"]["code"], "UNKNOWN_APP_ID");
    }
}
