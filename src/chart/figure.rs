//! Plotly figure rendering
//!
//! Turns a `ChartSpec` into the `{ "data": [...], "layout": {...} }` object
//! that `Plotly.newPlot` / `Plotly.react` accept.

use serde_json::{json, Map, Value};

use super::types::{BarChart, ChartSpec, ChoroplethChart, PieChart};

impl ChartSpec {
    /// Render as a Plotly figure
    pub fn to_figure(&self) -> Value {
        let (data, mut layout, template) = match self {
            ChartSpec::Choropleth(chart) => (choropleth_traces(chart), choropleth_layout(chart), chart.template),
            ChartSpec::Bar(chart) => (bar_traces(chart), bar_layout(chart), chart.template),
            ChartSpec::Pie(chart) => (pie_traces(chart), pie_layout(chart), chart.template),
        };

        if let Some(title) = self.title() {
            layout.insert("title".into(), json!({ "text": title }));
        }
        template.apply(&mut layout);

        json!({ "data": data, "layout": Value::Object(layout) })
    }
}

fn choropleth_traces(chart: &ChoroplethChart) -> Value {
    json!([{
        "type": "choropleth",
        "locationmode": "ISO-3",
        "locations": chart.locations,
        "z": chart.values,
        "hovertext": chart.hover_names,
        "hovertemplate": format!(
            "<b>%{{hovertext}}</b><br>%{{location}}<br>{}=%{{z}}<extra></extra>",
            chart.color_label
        ),
        "colorscale": chart.color_scale.stops(),
        "colorbar": { "title": { "text": chart.color_label } },
    }])
}

fn choropleth_layout(_chart: &ChoroplethChart) -> Map<String, Value> {
    let mut layout = Map::new();
    layout.insert(
        "geo".into(),
        json!({ "showframe": false, "projection": { "type": "natural earth" } }),
    );
    layout.insert("margin".into(), json!({ "t": 40, "l": 0, "r": 0, "b": 0 }));
    layout
}

fn bar_traces(chart: &BarChart) -> Value {
    if chart.values.is_empty() {
        return json!([]);
    }

    json!([{
        "type": "bar",
        "orientation": "h",
        "x": chart.values,
        "y": chart.categories,
        "hovertemplate": format!(
            "{}=%{{x}}<br>{}=%{{y}}<extra></extra>",
            chart.value_label, chart.category_label
        ),
        "marker": { "color": chart.template.primary_color() },
    }])
}

fn bar_layout(chart: &BarChart) -> Map<String, Value> {
    let mut layout = Map::new();
    layout.insert("xaxis".into(), json!({ "title": { "text": chart.value_label } }));
    layout.insert("yaxis".into(), json!({ "title": { "text": chart.category_label } }));
    layout.insert("barmode".into(), json!("relative"));

    if let Some(message) = &chart.placeholder {
        layout.insert("xaxis".into(), json!({ "visible": false }));
        layout.insert("yaxis".into(), json!({ "visible": false }));
        layout.insert(
            "annotations".into(),
            json!([{
                "text": message,
                "xref": "paper",
                "yref": "paper",
                "x": 0.5,
                "y": 0.5,
                "showarrow": false,
                "font": { "size": 16 },
            }]),
        );
    }

    layout
}

fn pie_traces(chart: &PieChart) -> Value {
    let mut trace = json!({
        "type": "pie",
        "labels": chart.labels,
        "values": chart.values,
        "hole": chart.hole,
        "hovertemplate": format!(
            "{}=%{{label}}<br>{}=%{{value}}<extra></extra>",
            chart.label_name, chart.value_label
        ),
    });
    if !chart.colors.is_empty() {
        trace["marker"] = json!({ "colors": chart.colors });
    }
    json!([trace])
}

fn pie_layout(chart: &PieChart) -> Map<String, Value> {
    let mut layout = Map::new();
    layout.insert(
        "legend".into(),
        json!({ "title": { "text": chart.label_name }, "tracegroupgap": 0 }),
    );
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::builders::{pie, ranking_bar, BarOptions, PieOptions};
    use crate::aggregate::GroupTotal;
    use crate::dataset::{CountryRecord, NumericColumn};

    #[test]
    fn test_bar_figure() {
        let france = CountryRecord::new("France", "Europe", 100, 10, "FRA");
        let italy = CountryRecord::new("Italy", "Europe", 200, 20, "ITA");
        let spec = ranking_bar(
            &[&france, &italy],
            NumericColumn::TotalDeaths,
            "Europe",
            &BarOptions::ranking(NumericColumn::TotalDeaths),
        );

        let figure = spec.to_figure();
        let trace = &figure["data"][0];
        assert_eq!(trace["type"], "bar");
        assert_eq!(trace["orientation"], "h");
        assert_eq!(trace["x"], json!([10, 20]));
        assert_eq!(trace["y"], json!(["France", "Italy"]));
        assert_eq!(
            figure["layout"]["title"]["text"],
            "Ranking of Total Deaths in Europe"
        );
        assert_eq!(figure["layout"]["xaxis"]["title"]["text"], "Total Deaths");
    }

    #[test]
    fn test_empty_bar_figure_has_annotation() {
        let spec = ranking_bar(
            &[],
            NumericColumn::TotalCases,
            "Atlantis",
            &BarOptions::ranking(NumericColumn::TotalCases),
        );

        let figure = spec.to_figure();
        assert_eq!(figure["data"], json!([]));
        assert_eq!(
            figure["layout"]["annotations"][0]["text"],
            "No data for Atlantis"
        );
        assert_eq!(figure["layout"]["xaxis"]["visible"], false);
    }

    #[test]
    fn test_pie_figure() {
        let view = vec![
            GroupTotal { keys: vec!["Europe".into()], total: 2 },
            GroupTotal { keys: vec!["Asia".into()], total: 1 },
        ];
        let figure = pie(&view, &PieOptions::countries_by_continent()).to_figure();

        let trace = &figure["data"][0];
        assert_eq!(trace["hole"], 0.4);
        assert_eq!(trace["labels"], json!(["Europe", "Asia"]));
        assert_eq!(trace["marker"]["colors"], json!(["lightblue", "grey"]));
        assert!(figure["layout"].get("title").is_none());
    }
}
