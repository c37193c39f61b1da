//! Layout Assembler
//!
//! Composes the static dashboard page: banner, description, summary cards,
//! the deaths map, the continent selector with the pie chart, and the tabbed
//! ranking charts. The page is assembled once at start-up; only the two
//! ranking graphs change afterwards, through the callback registry.
//!
//! ```text
//! ┌──────────── banner ─────────────┐
//! │ about (4) │ cards (2) │ map (6) │
//! ├───────────┴───────────┴─────────┤
//! │ selector + pie (6) │ tabs (6)   │
//! └─────────────────────────────────┘
//! ```

mod html;
mod node;

pub use html::{escape, UPDATE_ENDPOINT};
pub use node::{Node, Page, Tab};

use std::collections::HashMap;

use crate::aggregate::{cross_tab_count, cross_tab_sum, distinct_values, DashboardSummary};
use crate::callbacks::{CallbackRegistry, CASES_OUTPUT, CONTINENT_INPUT, DEATHS_OUTPUT};
use crate::chart::{choropleth, pie, ChartSpec, ChoroplethOptions, PieOptions};
use crate::config::DashboardConfig;
use crate::dataset::{CategoryColumn, Dataset, NumericColumn};

/// Deaths choropleth
pub const MAP_GRAPH: &str = "plotmap";

/// Countries-per-continent pie
pub const PIE_GRAPH: &str = "plotpie";

const LEAD: &str = "Exploratory Data Analytics Coronavirus (COVID-19) Dashboard";

const ABOUT: [&str; 2] = [
    "Coronavirus disease 2019 (COVID-19) is a contagious disease caused by a virus, the severe \
     acute respiratory syndrome coronavirus 2 (SARS-CoV-2). The first known case was identified \
     in Wuhan, China, in December 2019. The disease spread worldwide, leading to the COVID-19 \
     pandemic.",
    "COVID-19 transmits when people breathe in air contaminated by droplets and small airborne \
     particles containing the virus. Several COVID-19 testing methods have been developed to \
     diagnose the disease. The standard diagnostic method is by detection of the virus's nucleic \
     acid by real-time reverse transcription polymerase chain reaction (rRT-PCR), \
     transcription-mediated amplification (TMA), or by reverse transcription loop-mediated \
     isothermal amplification (RT-LAMP) from a nasopharyngeal swab.",
];

/// Build the dashboard page for `dataset`
///
/// The ranking graphs get their initial charts by dispatching the default
/// continent through `registry`, the same path a selector change takes.
pub fn assemble(dataset: &Dataset, config: &DashboardConfig, registry: &CallbackRegistry) -> Page {
    let summary = DashboardSummary::compute(dataset);
    let continents = distinct_values(dataset, CategoryColumn::Continent);

    if !continents.contains(&config.default_continent) {
        tracing::warn!(
            continent = %config.default_continent,
            "Default continent not present in dataset, rankings start empty"
        );
    }

    let mut initial = initial_charts(dataset, config, registry);

    let root = Node::Container {
        children: vec![
            Node::Banner {
                title: config.title.clone(),
                lead: LEAD.to_string(),
            },
            Node::Break,
            Node::row(vec![
                Node::col(4, vec![about_card()]),
                Node::col(2, summary_cards(&summary)),
                Node::col(
                    6,
                    vec![Node::card(vec![
                        Node::heading(2, "Maps Covid-19"),
                        Node::graph(MAP_GRAPH, Some(deaths_map(dataset, config))),
                    ])],
                ),
            ]),
            Node::Rule,
            Node::row(vec![
                Node::col(
                    6,
                    vec![Node::Card {
                        header: Some("Select Continent".to_string()),
                        color: None,
                        children: vec![
                            Node::Dropdown {
                                id: CONTINENT_INPUT.to_string(),
                                options: continents,
                                value: config.default_continent.clone(),
                            },
                            Node::graph(PIE_GRAPH, Some(continent_pie(dataset))),
                        ],
                    }],
                ),
                Node::col(
                    6,
                    vec![Node::card(vec![
                        Node::heading(2, "Analysis by Continent"),
                        Node::Tabs {
                            tabs: vec![
                                Tab {
                                    label: "Cases".to_string(),
                                    content: Node::graph(CASES_OUTPUT, initial.remove(CASES_OUTPUT)),
                                },
                                Tab {
                                    label: "Deaths".to_string(),
                                    content: Node::graph(DEATHS_OUTPUT, initial.remove(DEATHS_OUTPUT)),
                                },
                            ],
                        },
                    ])],
                ),
            ]),
        ]
        .into_iter()
        .chain(footer(config))
        .collect(),
    };

    Page {
        title: config.title.clone(),
        root,
    }
}

fn initial_charts(
    dataset: &Dataset,
    config: &DashboardConfig,
    registry: &CallbackRegistry,
) -> HashMap<String, ChartSpec> {
    match registry.dispatch(dataset, CONTINENT_INPUT, &config.default_continent) {
        Ok(updates) => updates.into_iter().map(|u| (u.id, u.chart)).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "No initial rankings");
            HashMap::new()
        }
    }
}

fn about_card() -> Node {
    let mut children = vec![Node::heading(2, "Covid-19")];
    children.extend(ABOUT.iter().map(|text| Node::paragraph(*text)));
    Node::card(children)
}

/// Continents, cases and deaths; the country count is only served by the
/// summary endpoint
fn summary_cards(summary: &DashboardSummary) -> Vec<Node> {
    let cards = [
        ("Number of Continents", summary.continents.to_string(), "lightgreen"),
        ("Total Cases", summary.total_cases.to_string(), "secondary"),
        ("Total Deaths", summary.total_deaths.to_string(), "light"),
    ];

    let mut nodes = Vec::with_capacity(cards.len() * 2);
    for (i, (header, value, color)) in cards.into_iter().enumerate() {
        if i > 0 {
            nodes.push(Node::Break);
        }
        nodes.push(Node::Card {
            header: Some(header.to_string()),
            color: Some(color.to_string()),
            children: vec![Node::heading(1, value)],
        });
    }
    nodes
}

fn deaths_map(dataset: &Dataset, config: &DashboardConfig) -> ChartSpec {
    let view = cross_tab_sum(
        dataset,
        &ChoroplethOptions::COUNTRY_GROUPING,
        NumericColumn::TotalDeaths,
    );
    let options = ChoroplethOptions {
        color_scale: config.map_color_scale,
        ..ChoroplethOptions::deaths_by_country()
    };
    choropleth(&view, &options)
}

/// Slices in alphabetical continent order, so palette colours follow the name
fn continent_pie(dataset: &Dataset) -> ChartSpec {
    let mut view = cross_tab_count(dataset, &[CategoryColumn::Continent]);
    view.sort_by(|a, b| a.keys.cmp(&b.keys));
    pie(&view, &PieOptions::countries_by_continent())
}

fn footer(config: &DashboardConfig) -> Option<Node> {
    config.author.as_ref().map(|author| {
        Node::row(vec![Node::Col {
            width: None,
            children: vec![Node::card(vec![Node::heading(
                6,
                format!("Created by: {}", author),
            )])],
        }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CountryRecord;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            CountryRecord::new("France", "Europe", 100, 10, "FRA"),
            CountryRecord::new("Italy", "Europe", 200, 20, "ITA"),
            CountryRecord::new("Japan", "Asia", 300, 5, "JPN"),
        ])
    }

    fn page_with(config: &DashboardConfig) -> Page {
        assemble(&dataset(), config, &CallbackRegistry::dashboard(config.top_n).unwrap())
    }

    #[test]
    fn test_page_has_every_graph() {
        let page = page_with(&DashboardConfig::default());

        let ids: Vec<&str> = page.graphs().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![MAP_GRAPH, PIE_GRAPH, CASES_OUTPUT, DEATHS_OUTPUT]);
        assert_eq!(page.inputs(), vec![CONTINENT_INPUT]);
    }

    #[test]
    fn test_initial_rankings_use_default_continent() {
        let page = page_with(&DashboardConfig::default());

        let Some(ChartSpec::Bar(deaths)) = page.graph(DEATHS_OUTPUT) else {
            panic!("expected a deaths ranking");
        };
        assert_eq!(deaths.title, "Ranking of Total Deaths in Europe");
        assert_eq!(deaths.categories, vec!["France", "Italy"]);
    }

    #[test]
    fn test_initial_rankings_match_dispatch() {
        let dataset = dataset();
        let config = DashboardConfig::default();
        let registry = CallbackRegistry::dashboard(config.top_n).unwrap();

        let page = assemble(&dataset, &config, &registry);
        let updates = registry
            .dispatch(&dataset, CONTINENT_INPUT, &config.default_continent)
            .unwrap();

        for update in updates {
            assert_eq!(page.graph(&update.id), Some(&update.chart));
        }
    }

    #[test]
    fn test_dropdown_options_are_continents() {
        let page = page_with(&DashboardConfig::default());
        let dropdown = page
            .root
            .find(&|node: &Node| matches!(node, Node::Dropdown { .. }))
            .unwrap();

        let Node::Dropdown { options, value, .. } = dropdown else {
            unreachable!();
        };
        assert_eq!(options, &vec!["Europe".to_string(), "Asia".to_string()]);
        assert_eq!(value, "Europe");
    }

    #[test]
    fn test_unknown_default_continent_still_assembles() {
        let config = DashboardConfig {
            default_continent: "Antarctica".to_string(),
            ..DashboardConfig::default()
        };
        let page = page_with(&config);

        let cases = page.graph(CASES_OUTPUT).unwrap();
        assert!(cases.is_empty());
    }

    #[test]
    fn test_summary_cards() {
        let page = page_with(&DashboardConfig::default());
        let html = page.render_html();

        assert!(!html.contains("Number of Countries"));
        assert!(html.contains("Number of Continents"));
        assert!(html.contains("<h1>2</h1>"));
        assert!(html.contains("<h1>600</h1>"));
        assert!(html.contains("<h1>35</h1>"));
    }

    #[test]
    fn test_pie_slices_in_alphabetical_order() {
        let dataset = Dataset::from_records(vec![
            CountryRecord::new("France", "Europe", 100, 10, "FRA"),
            CountryRecord::new("Japan", "Asia", 300, 5, "JPN"),
            CountryRecord::new("Kenya", "Africa", 50, 2, "KEN"),
            CountryRecord::new("China", "Asia", 500, 8, "CHN"),
        ]);

        let ChartSpec::Pie(chart) = continent_pie(&dataset) else {
            panic!("expected a pie chart");
        };
        assert_eq!(chart.labels, vec!["Africa", "Asia", "Europe"]);
        assert_eq!(chart.values, vec![1, 2, 1]);
        assert_eq!(chart.colors, vec!["lightblue", "grey", "salmon"]);

        let figure = ChartSpec::Pie(chart).to_figure();
        assert!(figure["data"][0].get("sort").is_none());
    }

    #[test]
    fn test_footer_only_with_author() {
        let page = page_with(&DashboardConfig::default());
        assert!(!page.render_html().contains("Created by"));

        let config = DashboardConfig {
            author: Some("Data Team".to_string()),
            ..DashboardConfig::default()
        };
        assert!(page_with(&config).render_html().contains("Created by: Data Team"));
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let config = DashboardConfig::default();
        assert_eq!(page_with(&config), page_with(&config));
    }
}
