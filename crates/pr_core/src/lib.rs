//! # pr_core - Play Report Formatting Engine
//!
//! This library turns play report telemetry into display-ready presence
//! strings through per-application rule sets, with a JSON API for easy
//! integration with host shells.
//!
//! ## Features
//! - Three extraction disciplines: single key, all-required, sparse subset
//! - Priority arbitration with deterministic ordering
//! - Built-in rule catalog for known titles
//! - JSON API for easy integration

// Complex types are sometimes necessary for generic APIs
#![allow(clippy::type_complexity)]

pub mod analyzer;
pub mod api;
#[cfg(feature = "catalog")]
pub mod catalog;
pub mod error;
pub mod report;
pub mod rules;

// Re-export main API functions
pub use api::{format_report_json, list_rules_json, ApiError, ApiResponse, API_VERSION};
#[cfg(feature = "catalog")]
pub use api::{format_report_catalog_json, list_rules_catalog_json};
pub use error::{ReportError, ReportResult};

// Re-export the rule engine surface
pub use analyzer::Analyzer;
pub use report::{AppMeta, Report, Value, ValueKind};
pub use rules::{
    Extracted, FormattedValue, MultiValue, MultiValueFormatter, Rule, RuleKind, RuleSet,
    SingleValue, SparseMultiValue, SparseMultiValueFormatter, ValueFormatter,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
