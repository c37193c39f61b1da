//! Colours and templates shared by the chart builders

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Palette assigned to pie slices in category order
pub const CATEGORY_PALETTE: [&str; 6] = [
    "lightblue",
    "grey",
    "salmon",
    "pink",
    "lightgreen",
    "aqua",
];

/// Seaborn "deep" colourway
const SEABORN_COLORWAY: [&str; 10] = [
    "rgb(76,114,176)",
    "rgb(221,132,82)",
    "rgb(85,168,104)",
    "rgb(196,78,82)",
    "rgb(129,114,179)",
    "rgb(147,120,96)",
    "rgb(218,139,195)",
    "rgb(140,140,140)",
    "rgb(204,185,116)",
    "rgb(100,181,205)",
];

/// Continuous colour scales for choropleths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    /// CARTO "Fall": green through cream to rust
    Fall,
    Reds,
}

impl ColorScale {
    pub fn colors(self) -> &'static [&'static str] {
        match self {
            ColorScale::Fall => &[
                "rgb(61,89,65)",
                "rgb(119,136,104)",
                "rgb(181,185,145)",
                "rgb(246,237,189)",
                "rgb(237,187,138)",
                "rgb(222,138,90)",
                "rgb(202,86,44)",
            ],
            ColorScale::Reds => &[
                "rgb(255,245,240)",
                "rgb(252,187,161)",
                "rgb(251,106,74)",
                "rgb(203,24,29)",
                "rgb(103,0,13)",
            ],
        }
    }

    /// Evenly spaced `[position, colour]` stops
    pub fn stops(self) -> Value {
        let colors = self.colors();
        let last = (colors.len() - 1) as f64;
        Value::Array(
            colors
                .iter()
                .enumerate()
                .map(|(i, color)| json!([i as f64 / last, color]))
                .collect(),
        )
    }
}

/// Page-wide figure styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    Seaborn,
}

impl Template {
    /// Primary trace colour
    pub fn primary_color(self) -> &'static str {
        match self {
            Template::Seaborn => SEABORN_COLORWAY[0],
        }
    }

    /// Merge the template's layout keys into a figure layout
    pub fn apply(self, layout: &mut Map<String, Value>) {
        match self {
            Template::Seaborn => {
                layout.insert("paper_bgcolor".into(), json!("white"));
                layout.insert("plot_bgcolor".into(), json!("rgb(234,234,242)"));
                layout.insert("font".into(), json!({ "color": "rgb(36,36,36)" }));
                layout.insert("colorway".into(), json!(SEABORN_COLORWAY));
                for axis in ["xaxis", "yaxis"] {
                    let entry = layout
                        .entry(axis)
                        .or_insert_with(|| Value::Object(Map::new()));
                    if let Value::Object(axis) = entry {
                        axis.insert("gridcolor".into(), json!("white"));
                        axis.insert("zerolinecolor".into(), json!("white"));
                        axis.insert("showgrid".into(), json!(true));
                    }
                }
                if let Some(Value::Object(geo)) = layout.get_mut("geo") {
                    geo.insert("bgcolor".into(), json!("white"));
                    geo.insert("landcolor".into(), json!("rgb(234,234,242)"));
                    geo.insert("subunitcolor".into(), json!("white"));
                    geo.insert("showlakes".into(), json!(true));
                    geo.insert("lakecolor".into(), json!("white"));
                }
            }
        }
    }
}
