//! Chart specification types
//!
//! A `ChartSpec` is a declarative, immutable description of one chart. It
//! carries everything the browser needs to draw it and nothing else; the
//! Plotly rendering lives in `figure.rs`.

use serde::Serialize;

use super::theme::{ColorScale, Template};

/// A declarative chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Choropleth(ChoroplethChart),
    Bar(BarChart),
    Pie(PieChart),
}

impl ChartSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            ChartSpec::Choropleth(_) => "choropleth",
            ChartSpec::Bar(_) => "bar",
            ChartSpec::Pie(_) => "pie",
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            ChartSpec::Choropleth(chart) => chart.title.as_deref(),
            ChartSpec::Bar(chart) => Some(&chart.title),
            ChartSpec::Pie(chart) => chart.title.as_deref(),
        }
    }

    /// True when the chart has no data points to draw
    pub fn is_empty(&self) -> bool {
        match self {
            ChartSpec::Choropleth(chart) => chart.values.is_empty(),
            ChartSpec::Bar(chart) => chart.values.is_empty(),
            ChartSpec::Pie(chart) => chart.values.is_empty(),
        }
    }
}

/// Regions coloured by a numeric value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethChart {
    pub title: Option<String>,
    /// ISO-3166-1 alpha-3 codes
    pub locations: Vec<String>,
    /// Shown on hover, parallel to `locations`
    pub hover_names: Vec<String>,
    pub values: Vec<u64>,
    /// Colour bar title
    pub color_label: String,
    pub color_scale: ColorScale,
    pub template: Template,
}

/// Horizontal bars: countries on the y axis, values on the x axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub categories: Vec<String>,
    pub values: Vec<u64>,
    pub category_label: String,
    pub value_label: String,
    pub template: Template,
    /// Message drawn instead of bars when `values` is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Category proportions, optionally as a donut
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    /// Slice colours, parallel to `labels`
    pub colors: Vec<String>,
    /// Inner radius as a fraction of the outer radius; 0 draws a full pie
    pub hole: f64,
    pub label_name: String,
    pub value_label: String,
    pub template: Template,
}
