//! Dashboard counts and the pie chart built from them.
//!
//! The dashboard endpoint returns a flat object mapping a position name to
//! the number of staff holding it. Key order is preserved end to end, so the
//! chart labels follow the order the server sent.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use staffdash_settings::ChartSettings;

use crate::errors::ClientError;
use crate::executor::ApiClient;

/// Fetch the label → count object from the dashboard endpoint.
#[tracing::instrument(skip_all)]
pub async fn fetch_counts(client: &ApiClient) -> Result<Map<String, Value>, ClientError> {
    let url = client.context().endpoints.dashboard.clone();
    let request = client.authorized(url)?;
    match client.execute(request).await? {
        Value::Object(counts) => {
            tracing::debug!(labels = counts.len(), "dashboard counts received");
            Ok(counts)
        }
        other => Err(ClientError::InvalidDashboard(format!(
            "expected an object, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Chart.js pie chart configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieChart {
    #[serde(rename = "type")]
    kind: &'static str,
    /// Labels and dataset.
    pub data: ChartData,
    /// Display options.
    pub options: ChartOptions,
}

/// Chart labels and datasets.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartData {
    /// Slice labels, in payload order.
    pub labels: Vec<String>,
    /// Always a single dataset.
    pub datasets: Vec<Dataset>,
}

/// One series of slice values.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Series name shown in tooltips.
    pub label: String,
    /// Slice values, aligned with [`ChartData::labels`].
    pub data: Vec<Number>,
    /// Slice fill colours, cycled by Chart.js.
    pub background_color: Vec<String>,
    /// Slice border colour.
    pub border_color: String,
    /// Slice border width in pixels.
    pub border_width: u32,
}

/// Chart display options.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartOptions {
    /// Resize with the container.
    pub responsive: bool,
    /// Plugin options.
    pub plugins: Plugins,
}

/// Chart plugin options.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plugins {
    /// Legend placement and font.
    pub legend: Legend,
}

/// Legend options.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    /// `top`, `bottom`, `left` or `right`.
    pub position: String,
    /// Label styling.
    pub labels: LegendLabels,
}

/// Legend label styling.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendLabels {
    /// Label font.
    pub font: Font,
}

/// Font options.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Font {
    /// Size in pixels.
    pub size: u32,
}

/// A slice of the chart as a text row.
#[derive(Clone, Debug, PartialEq)]
pub struct Share {
    /// Slice label.
    pub label: String,
    /// Slice value.
    pub value: f64,
    /// Percentage of the total, `0.0` when the total is zero.
    pub percent: f64,
}

impl PieChart {
    /// Build the chart from dashboard counts and the configured style.
    ///
    /// Every value must be a JSON number.
    pub fn from_counts(
        counts: &Map<String, Value>,
        style: &ChartSettings,
    ) -> Result<Self, ClientError> {
        let mut labels = Vec::with_capacity(counts.len());
        let mut data = Vec::with_capacity(counts.len());
        for (label, value) in counts {
            let Value::Number(n) = value else {
                return Err(ClientError::InvalidDashboard(format!(
                    "count for {label:?} is {}, expected a number",
                    kind(value)
                )));
            };
            labels.push(label.clone());
            data.push(n.clone());
        }

        Ok(Self {
            kind: "pie",
            data: ChartData {
                labels,
                datasets: vec![Dataset {
                    label: style.label.clone(),
                    data,
                    background_color: style.background_colors.clone(),
                    border_color: style.border_color.clone(),
                    border_width: style.border_width,
                }],
            },
            options: ChartOptions {
                responsive: true,
                plugins: Plugins {
                    legend: Legend {
                        position: style.legend_position.clone(),
                        labels: LegendLabels {
                            font: Font {
                                size: style.legend_font_size,
                            },
                        },
                    },
                },
            },
        })
    }

    /// Slice labels.
    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    /// Slice values.
    pub fn values(&self) -> &[Number] {
        self.data
            .datasets
            .first()
            .map(|dataset| dataset.data.as_slice())
            .unwrap_or_default()
    }

    /// Label, value and percentage of every slice.
    pub fn shares(&self) -> Vec<Share> {
        let values: Vec<f64> = self
            .values()
            .iter()
            .map(|n| n.as_f64().unwrap_or_default())
            .collect();
        let total: f64 = values.iter().sum();
        self.labels()
            .iter()
            .zip(values)
            .map(|(label, value)| Share {
                label: label.clone(),
                value,
                percent: if total > 0.0 { value / total * 100.0 } else { 0.0 },
            })
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
