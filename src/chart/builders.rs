//! Chart builders
//!
//! Pure functions from an aggregate view plus display options to a
//! `ChartSpec`. Empty input always produces a chart, never an error.

use crate::aggregate::GroupTotal;
use crate::dataset::{CategoryColumn, CountryRecord, NumericColumn};

use super::theme::{ColorScale, Template, CATEGORY_PALETTE};
use super::types::{BarChart, ChartSpec, ChoroplethChart, PieChart};

/// Placeholder in title templates replaced by the filter value
pub const FILTER_PLACEHOLDER: &str = "{filter}";

/// Options for `choropleth`
#[derive(Debug, Clone)]
pub struct ChoroplethOptions {
    pub title: Option<String>,
    /// Position of the ISO code within `GroupTotal::keys`
    pub location_key: usize,
    /// Position of the hover name within `GroupTotal::keys`
    pub hover_key: Option<usize>,
    pub color_label: String,
    pub color_scale: ColorScale,
    pub template: Template,
}

impl ChoroplethOptions {
    /// Map over a `[Country, IsoCode]` cross-tab of deaths
    pub fn deaths_by_country() -> Self {
        Self {
            title: None,
            location_key: 1,
            hover_key: Some(0),
            color_label: "No of Deaths".to_string(),
            color_scale: ColorScale::Fall,
            template: Template::Seaborn,
        }
    }

    /// Grouping the view must be built with to match the key positions above
    pub const COUNTRY_GROUPING: [CategoryColumn; 2] =
        [CategoryColumn::Country, CategoryColumn::IsoCode];
}

/// Options for `ranking_bar`
#[derive(Debug, Clone)]
pub struct BarOptions {
    /// Title with an optional `{filter}` placeholder
    pub title_template: String,
    pub category_label: String,
    pub template: Template,
}

impl BarOptions {
    /// "Ranking of Total Cases in {filter}" style options
    pub fn ranking(metric: NumericColumn) -> Self {
        Self {
            title_template: format!("Ranking of {} in {}", metric.header(), FILTER_PLACEHOLDER),
            category_label: CategoryColumn::Country.header().to_string(),
            template: Template::Seaborn,
        }
    }

    pub fn title_for(&self, filter: &str) -> String {
        self.title_template.replace(FILTER_PLACEHOLDER, filter)
    }
}

/// Options for `pie`
#[derive(Debug, Clone)]
pub struct PieOptions {
    pub title: Option<String>,
    pub label_name: String,
    pub value_label: String,
    pub palette: Vec<String>,
    pub hole: f64,
    pub template: Template,
}

impl PieOptions {
    /// Donut of countries per continent
    pub fn countries_by_continent() -> Self {
        Self {
            title: None,
            label_name: CategoryColumn::Continent.header().to_string(),
            value_label: "Countries".to_string(),
            palette: CATEGORY_PALETTE.iter().map(|c| c.to_string()).collect(),
            hole: 0.4,
            template: Template::Seaborn,
        }
    }
}

/// Choropleth from a cross-tab view
///
/// Rows without a location key are skipped.
pub fn choropleth(view: &[GroupTotal], options: &ChoroplethOptions) -> ChartSpec {
    let mut locations = Vec::with_capacity(view.len());
    let mut hover_names = Vec::with_capacity(view.len());
    let mut values = Vec::with_capacity(view.len());

    for row in view {
        let Some(location) = row.key(options.location_key) else {
            continue;
        };
        let hover = options
            .hover_key
            .and_then(|position| row.key(position))
            .unwrap_or(location);

        locations.push(location.to_string());
        hover_names.push(hover.to_string());
        values.push(row.total);
    }

    ChartSpec::Choropleth(ChoroplethChart {
        title: options.title.clone(),
        locations,
        hover_names,
        values,
        color_label: options.color_label.clone(),
        color_scale: options.color_scale,
        template: options.template,
    })
}

/// Horizontal ranking bar: one bar per record, value from `metric`
///
/// Bars keep the order of `records`; `filter` fills the title template.
pub fn ranking_bar(
    records: &[&CountryRecord],
    metric: NumericColumn,
    filter: &str,
    options: &BarOptions,
) -> ChartSpec {
    let placeholder = records
        .is_empty()
        .then(|| format!("No data for {}", filter));

    ChartSpec::Bar(BarChart {
        title: options.title_for(filter),
        categories: records.iter().map(|r| r.country.clone()).collect(),
        values: records.iter().map(|r| metric.value(r)).collect(),
        category_label: options.category_label.clone(),
        value_label: metric.header().to_string(),
        template: options.template,
        placeholder,
    })
}

/// Pie from a single-key cross-tab view; colours cycle through the palette
pub fn pie(view: &[GroupTotal], options: &PieOptions) -> ChartSpec {
    let labels: Vec<String> = view
        .iter()
        .map(|row| row.key(0).unwrap_or_default().to_string())
        .collect();

    let colors = if options.palette.is_empty() {
        Vec::new()
    } else {
        (0..labels.len())
            .map(|i| options.palette[i % options.palette.len()].clone())
            .collect()
    };

    ChartSpec::Pie(PieChart {
        title: options.title.clone(),
        labels,
        values: view.iter().map(|row| row.total).collect(),
        colors,
        hole: options.hole,
        label_name: options.label_name.clone(),
        value_label: options.value_label.clone(),
        template: options.template,
    })
}
