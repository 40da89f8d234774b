//! Analysis report shapes and defensive parsing.
//!
//! The backend's report text is itself JSON produced by an LLM, so every
//! field defaults and nothing is trusted: a report that fails to parse is
//! wrapped into a degraded view with the raw text as the summary and every
//! structured collection empty.

use serde::{Deserialize, Serialize};

/// Top-level analysis response from the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    /// Report text, usually JSON-encoded [`LlmReport`].
    pub report: String,
    pub repo_name: String,
    pub static_analysis: Option<StaticAnalysis>,
}

/// Static-analysis findings attached alongside the LLM report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticAnalysis {
    pub complexity: ComplexitySummary,
    pub security: SecuritySummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexitySummary {
    pub average_score: String,
    pub average_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySummary {
    pub score: f64,
    pub issues: Vec<SecurityIssue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityIssue {
    pub filename: String,
    pub issue_text: String,
    pub severity: String,
    pub line_number: u64,
    pub code: String,
}

/// The structured report produced by the LLM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmReport {
    pub executive_summary: String,
    pub key_strengths: Vec<String>,
    pub critical_issues: Vec<String>,
    pub quality_score: u32,
    pub code_smells: Vec<CodeSmell>,
    pub technical_debt: Vec<TechnicalDebtItem>,
    pub refactoring_suggestions: Vec<RefactoringSuggestion>,
    pub security_analysis: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeSmell {
    pub file: String,
    pub severity: String,
    pub description: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalDebtItem {
    pub category: String,
    pub impact: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefactoringSuggestion {
    pub title: String,
    pub description: String,
    pub code_before: Option<String>,
    pub code_after: Option<String>,
}

/// Parse report text, degrading to a raw-text-only report on failure.
pub fn parse_report(raw: &str) -> LlmReport {
    match serde_json::from_str(raw) {
        Ok(report) => report,
        Err(_) => LlmReport {
            executive_summary: raw.to_string(),
            ..LlmReport::default()
        },
    }
}
