//! Report shaping for external exporters.
//!
//! A report is serialized once to a JSON document and flattened into ordered
//! `key = value` rows. Keys are dotted paths (`values.roi`, `0.monthly.total_revenue`);
//! values are the plain string form of the underlying number with no rounding
//! or locale formatting.

use analyzer::ComparisonResult;
use metrics::{ChannelProjection, InvestorReport, MetricResult};
use scenarios::{ScenarioResult, SensitivityPoint};
use serde::Serialize;
use serde_json::Value;

/// A borrowed view of any result the toolkit can export.
#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    Metrics(&'a MetricResult),
    MetricsBatch(&'a [MetricResult]),
    Comparison(&'a ComparisonResult),
    Scenarios(&'a [ScenarioResult]),
    Sensitivity(&'a [SensitivityPoint]),
    Investor(&'a InvestorReport),
    Channel(&'a ChannelProjection),
}

impl Report<'_> {
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::Metrics(_) => ReportKind::Metrics,
            Report::MetricsBatch(_) => ReportKind::MetricsBatch,
            Report::Comparison(_) => ReportKind::Comparison,
            Report::Scenarios(_) => ReportKind::Scenarios,
            Report::Sensitivity(_) => ReportKind::Sensitivity,
            Report::Investor(_) => ReportKind::Investor,
            Report::Channel(_) => ReportKind::Channel,
        }
    }

    fn to_value(self) -> Result<Value, serde_json::Error> {
        match self {
            Report::Metrics(r) => serde_json::to_value(r),
            Report::MetricsBatch(r) => serde_json::to_value(r),
            Report::Comparison(r) => serde_json::to_value(r),
            Report::Scenarios(r) => serde_json::to_value(r),
            Report::Sensitivity(r) => serde_json::to_value(r),
            Report::Investor(r) => serde_json::to_value(r),
            Report::Channel(r) => serde_json::to_value(r),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Metrics,
    MetricsBatch,
    Comparison,
    Scenarios,
    Sensitivity,
    Investor,
    Channel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub key: String,
    pub value: String,
}

/// A report flattened for a tabular or key-value exporter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedReport {
    pub kind: ReportKind,
    pub rows: Vec<ReportRow>,
    document: Value,
}

impl ExportedReport {
    /// Looks up a row by its dotted key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.key == key)
            .map(|row| row.value.as_str())
    }

    /// The structured document the rows were flattened from.
    pub fn to_json(&self) -> &Value {
        &self.document
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.document)
    }
}

pub fn shape(report: Report<'_>) -> Result<ExportedReport, serde_json::Error> {
    let kind = report.kind();
    let document = report.to_value()?;

    let mut rows = Vec::new();
    flatten(&document, String::new(), &mut rows);
    tracing::debug!(?kind, rows = rows.len(), "Report shaped");

    Ok(ExportedReport {
        kind,
        rows,
        document,
    })
}

fn flatten(value: &Value, path: String, rows: &mut Vec<ReportRow>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten(child, join(&path, key), rows);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                flatten(child, join(&path, &index.to_string()), rows);
            }
        }
        // Empty containers still get a row so the column exists.
        Value::Object(_) | Value::Array(_) | Value::Null => rows.push(ReportRow {
            key: path,
            value: String::new(),
        }),
        Value::String(text) => rows.push(ReportRow {
            key: path,
            value: text.clone(),
        }),
        Value::Bool(flag) => rows.push(ReportRow {
            key: path,
            value: flag.to_string(),
        }),
        Value::Number(number) => rows.push(ReportRow {
            key: path,
            value: number.to_string(),
        }),
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
