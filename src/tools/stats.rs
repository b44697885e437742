//! Data-analyst tool: descriptive statistics
//!
//! Pure computation over a numeric array, no backend involved. Results are
//! rounded to two decimal places; the standard deviation is the population
//! form, and the quartiles are taken at index `n * 0.25` / `n * 0.75` of the
//! sorted data.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Result;
use crate::tools::{ToolExecutor, ToolResult};
use crate::validate::Rejection;

fn default_column_name() -> String {
    "value".to_string()
}

/// Parameters for the compute_stats tool
#[derive(Debug, Clone, Deserialize)]
struct ComputeStatsParams {
    /// Array of numeric values
    data: Vec<f64>,
    /// Column name for labeling
    #[serde(default = "default_column_name")]
    column_name: String,
}

/// Descriptive statistics for one numeric column
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatsSummary {
    /// Column label
    pub column: String,
    /// Number of values
    pub count: usize,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Arithmetic mean, rounded to 2 decimals
    pub mean: f64,
    /// Median (midpoint average for even counts), rounded to 2 decimals
    pub median: f64,
    /// Population standard deviation, rounded to 2 decimals
    pub std_dev: f64,
    /// 25th percentile
    pub p25: f64,
    /// 75th percentile
    pub p75: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes descriptive statistics for a numeric array
///
/// # Errors
///
/// Returns [`Rejection::EmptyData`] for an empty input.
pub fn compute_stats(values: &[f64], column: &str) -> std::result::Result<StatsSummary, Rejection> {
    if values.is_empty() {
        return Err(Rejection::EmptyData);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let total: f64 = sorted.iter().sum();
    let mean = total / n as f64;
    let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
    let mid = n / 2;
    let median = if n % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    Ok(StatsSummary {
        column: column.to_string(),
        count: n,
        min: sorted[0],
        max: sorted[n - 1],
        mean: round2(mean),
        median: round2(median),
        std_dev: round2(variance.sqrt()),
        p25: sorted[(n as f64 * 0.25) as usize],
        p75: sorted[(n as f64 * 0.75) as usize],
    })
}

/// Tool that computes descriptive statistics for a numeric array
pub struct ComputeStatsTool;

#[async_trait::async_trait]
impl ToolExecutor for ComputeStatsTool {
    fn tool_definition(&self) -> serde_json::Value {
        json!({
            "name": "compute_stats",
            "description": "Compute descriptive statistics for a numeric array",
            "parameters": {
                "type": "object",
                "properties": {
                    "data": {
                        "type": "array",
                        "items": {"type": "number"},
                        "description": "Array of numeric values"
                    },
                    "column_name": {
                        "type": "string",
                        "description": "Column name for labeling (default: value)"
                    }
                },
                "required": ["data"]
            }
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let params: ComputeStatsParams = match serde_json::from_value(args) {
            Ok(params) => params,
            Err(err) => return Ok(ToolResult::error(format!("Invalid arguments: {}", err))),
        };

        match compute_stats(&params.data, &params.column_name) {
            Ok(summary) => Ok(ToolResult::success(serde_json::to_string_pretty(&summary)?)),
            Err(rejection) => Ok(ToolResult::rejected(rejection)),
        }
    }
}
