//! Chart Builders
//!
//! Pure mapping from aggregate views to declarative chart specifications:
//!
//! - **types**: `ChartSpec` and its variants (choropleth, bar, pie)
//! - **builders**: view + options → `ChartSpec`
//! - **theme**: colour scales, palettes and templates
//! - **figure**: `ChartSpec` → Plotly figure JSON
//!
//! ```text
//! Dataset → aggregate view → builder → ChartSpec → to_figure() → browser
//! ```

pub mod builders;
pub mod figure;
pub mod theme;
pub mod types;

pub use builders::{
    choropleth, pie, ranking_bar, BarOptions, ChoroplethOptions, PieOptions, FILTER_PLACEHOLDER,
};
pub use theme::{ColorScale, Template, CATEGORY_PALETTE};
pub use types::{BarChart, ChartSpec, ChoroplethChart, PieChart};
