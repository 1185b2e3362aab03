// src/core/models.rs

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::{Display, EnumIter, EnumString};

// --- Request Models ---

/// What gets sent to the analysis service. A file always wins over pasted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Text(String),
    File(SelectedFile),
}

/// An accepted `.eml` attachment, recorded at selection time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
}

impl SelectedFile {
    /// Size in kilobytes with two decimals, e.g. `"1.50 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.size_bytes as f64 / 1024.0)
    }
}

// JSON body of `POST /analyze`.
#[derive(Debug, Serialize)]
pub struct RawEmailBody<'a> {
    pub raw_email: &'a str,
}

// --- Response Models ---

/// The verdict returned by the analysis service.
///
/// Every field is optional on the wire. Numeric fields fall back to zero and
/// the severity label is resolved only when results are rendered, so the
/// payload is kept exactly as it was received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub triggered_categories: Vec<String>,
    #[serde(default)]
    pub indicators: Vec<Indicator>,
}

/// One signal behind the verdict, as reported by a detection module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub impact: Option<f64>,
}

impl Indicator {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled indicator")
    }

    /// Impact as a whole number of risk points, e.g. `"+25"`.
    pub fn impact_label(&self) -> String {
        format!("+{}", self.impact.unwrap_or(0.0).round() as i64)
    }
}

impl AnalysisResult {
    pub fn risk_score(&self) -> f64 {
        self.risk_score.unwrap_or(0.0)
    }

    pub fn confidence(&self) -> f64 {
        self.confidence.unwrap_or(0.0)
    }

    pub fn severity(&self) -> Severity {
        Severity::from_label(self.severity.as_deref())
    }
}

// Body of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    #[default]
    Unknown,
    Operational,
    Unreachable,
}

// --- Severity ---

/// The four severity tiers understood by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Exact, case-sensitive label match. Anything unrecognised is `Low`.
    pub fn from_label(label: Option<&str>) -> Self {
        label
            .and_then(|l| l.parse().ok())
            .unwrap_or(Severity::Low)
    }

    pub fn badge(self) -> SeverityBadge {
        match self {
            Severity::Critical => SeverityBadge { label: "Critical", color: Color::Red, icon: "●" },
            Severity::High => SeverityBadge { label: "High", color: Color::LightRed, icon: "●" },
            Severity::Medium => SeverityBadge { label: "Medium", color: Color::Yellow, icon: "●" },
            Severity::Low => SeverityBadge { label: "Low", color: Color::Green, icon: "●" },
        }
    }
}

/// Presentation descriptor for a severity tier, consumed by the results widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityBadge {
    pub label: &'static str,
    pub color: Color,
    pub icon: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn missing_fields_default_to_zero_and_low() {
        let result: AnalysisResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result.risk_score(), 0.0);
        assert_eq!(result.confidence(), 0.0);
        assert_eq!(result.severity(), Severity::Low);
    }

    #[test]
    fn null_numbers_default_to_zero() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"risk_score": null, "confidence": 12}"#).unwrap();
        assert_eq!(result.risk_score(), 0.0);
        assert_eq!(result.confidence(), 12.0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"risk_score": 73, "confidence": 91, "severity": "High", "engine": "v2"}"#,
        )
        .unwrap();
        assert_eq!(result.risk_score(), 73.0);
        assert_eq!(result.severity(), Severity::High);
    }

    #[test]
    fn indicators_and_categories_are_kept() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{
                "risk_score": 55,
                "triggered_categories": ["authentication", "content"],
                "indicators": [
                    {"title": "SPF failure", "description": "Sender not authorised", "category": "authentication", "impact": 25},
                    {"title": null, "category": "content", "impact": 10}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(result.triggered_categories, vec!["authentication", "content"]);
        assert_eq!(result.indicators.len(), 2);
        assert_eq!(result.indicators[0].title(), "SPF failure");
        assert_eq!(result.indicators[0].impact_label(), "+25");
        assert_eq!(result.indicators[1].title(), "Untitled indicator");
        assert!(result.indicators[1].description.is_none());
    }

    #[test]
    fn missing_indicator_arrays_are_empty() {
        let result: AnalysisResult = serde_json::from_str(r#"{"risk_score": 5}"#).unwrap();
        assert!(result.indicators.is_empty());
        assert!(result.triggered_categories.is_empty());

        let indicator: Indicator = serde_json::from_str("{}").unwrap();
        assert_eq!(indicator.impact_label(), "+0");
    }

    #[test]
    fn severity_labels_match_exactly() {
        assert_eq!(Severity::from_label(Some("Critical")), Severity::Critical);
        assert_eq!(Severity::from_label(Some("Medium")), Severity::Medium);
        assert_eq!(Severity::from_label(Some("critical")), Severity::Low);
        assert_eq!(Severity::from_label(Some("Unknown")), Severity::Low);
        assert_eq!(Severity::from_label(None), Severity::Low);
    }

    #[test]
    fn every_tier_has_a_distinct_badge() {
        let badges: Vec<SeverityBadge> = Severity::iter().map(Severity::badge).collect();
        for (severity, badge) in Severity::iter().zip(&badges) {
            assert_eq!(badge.label, severity.to_string());
        }
        for (i, a) in badges.iter().enumerate() {
            for b in &badges[i + 1..] {
                assert_ne!(a.color, b.color);
            }
        }
    }

    #[test]
    fn size_label_uses_kilobytes_with_two_decimals() {
        let file = SelectedFile { path: PathBuf::from("a.eml"), name: "a.eml".into(), size_bytes: 1536 };
        assert_eq!(file.size_label(), "1.50 KB");
    }
}
