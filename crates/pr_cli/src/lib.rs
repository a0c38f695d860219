//! Play Report CLI Library
//!
//! JSON 리포트 픽스처 로딩 → 카탈로그 규칙 실행 → 요약 생성

use anyhow::{Context, Result};
use pr_core::{Report, Value};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// 리포트 경로 환경 변수
pub const REPORT_PATH_ENV: &str = "PR_REPORT_PATH";

/// Entry previews longer than this are cut off.
const PREVIEW_MAX_CHARS: usize = 60;

/// 리포트 요약 메타데이터
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// 원본 파일 경로
    pub source: String,
    /// 항목 수
    pub entry_count: usize,
    /// 생성 시각 (RFC3339 형식)
    pub created_at: String,
    /// 항목별 요약
    pub entries: Vec<EntrySummary>,
}

/// 리포트 항목 요약
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySummary {
    /// 항목 키
    pub key: String,
    /// 값 타입 (nil, bool, int, ...)
    pub kind: String,
    /// 값 미리보기 (60자 제한)
    pub preview: String,
}

/// JSON 파일에서 리포트 로드
///
/// # Arguments
///
/// * `path` - 입력 JSON 파일 경로 (최상위가 object여야 함)
///
/// # Returns
///
/// 파싱된 리포트
pub fn load_report(path: &Path) -> Result<Report> {
    // 1. 파일 읽기
    let json_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report file: {}", path.display()))?;

    // 2. JSON → Report 파싱
    let report = Report::from_json_str(&json_str)
        .with_context(|| format!("Failed to parse report file: {}", path.display()))?;

    Ok(report)
}

/// 리포트 경로 결정: CLI 인자 → 환경 변수 순서
///
/// # Arguments
///
/// * `cli_path` - CLI로 전달된 경로 (있으면 우선)
///
/// # Returns
///
/// 사용할 리포트 파일 경로
pub fn resolve_report_path(cli_path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = cli_path {
        return Ok(path);
    }

    if let Ok(path) = env::var(REPORT_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    anyhow::bail!(
        "No report path given (pass --report or set {})",
        REPORT_PATH_ENV
    )
}

/// 리포트 요약 생성
///
/// # Arguments
///
/// * `source` - 원본 파일 경로 (표시용)
/// * `report` - 요약할 리포트
///
/// # Returns
///
/// 키 순서대로 정렬된 요약
pub fn summarize_report(source: &str, report: &Report) -> ReportSummary {
    let entries = report
        .iter()
        .map(|(key, value)| EntrySummary {
            key: key.to_string(),
            kind: value.kind().to_string(),
            preview: preview(value),
        })
        .collect();

    ReportSummary {
        source: source.to_string(),
        entry_count: report.len(),
        created_at: chrono::Utc::now().to_rfc3339(),
        entries,
    }
}

fn preview(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() <= PREVIEW_MAX_CHARS {
        return text;
    }

    let mut cut: String = text.chars().take(PREVIEW_MAX_CHARS).collect();
    cut.push('…');
    cut
}
