//! Callback registry
//!
//! Explicit `input id → handler → output id` bindings. Dispatching an input
//! change runs every handler bound to that input and collects one update per
//! output. Handlers share no state, so the order they run in does not matter.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use super::handler::{RankingHandler, UpdateHandler};
use super::{CASES_OUTPUT, CONTINENT_INPUT, DEATHS_OUTPUT};
use crate::chart::ChartSpec;
use crate::dataset::{Dataset, NumericColumn};

/// Callback wiring errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallbackError {
    /// No handler is bound to this input
    #[error("Unknown input: {0}")]
    UnknownInput(String),

    /// Each output may be owned by exactly one handler
    #[error("Output already bound: {0}")]
    DuplicateOutput(String),
}

/// Replacement chart for one output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputUpdate {
    pub id: String,
    pub chart: ChartSpec,
}

struct Binding {
    input_id: String,
    output_id: String,
    handler: Arc<dyn UpdateHandler>,
}

/// Registered callbacks, in registration order
#[derive(Default)]
pub struct CallbackRegistry {
    bindings: Vec<Binding>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's wiring: the continent selector drives both rankings
    pub fn dashboard(top_n: usize) -> Result<Self, CallbackError> {
        let mut registry = Self::new();
        registry
            .register(
                CONTINENT_INPUT,
                CASES_OUTPUT,
                RankingHandler::new(NumericColumn::TotalCases, top_n),
            )?
            .register(
                CONTINENT_INPUT,
                DEATHS_OUTPUT,
                RankingHandler::new(NumericColumn::TotalDeaths, top_n),
            )?;
        Ok(registry)
    }

    /// Bind `handler` so that changes to `input_id` replace `output_id`
    pub fn register<H>(
        &mut self,
        input_id: impl Into<String>,
        output_id: impl Into<String>,
        handler: H,
    ) -> Result<&mut Self, CallbackError>
    where
        H: UpdateHandler + 'static,
    {
        let output_id = output_id.into();
        if self.bindings.iter().any(|b| b.output_id == output_id) {
            return Err(CallbackError::DuplicateOutput(output_id));
        }

        self.bindings.push(Binding {
            input_id: input_id.into(),
            output_id,
            handler: Arc::new(handler),
        });
        Ok(self)
    }

    /// Distinct input ids, in registration order
    pub fn inputs(&self) -> Vec<&str> {
        let mut inputs: Vec<&str> = Vec::new();
        for binding in &self.bindings {
            if !inputs.contains(&binding.input_id.as_str()) {
                inputs.push(&binding.input_id);
            }
        }
        inputs
    }

    /// Output ids bound to `input_id`
    pub fn outputs_for(&self, input_id: &str) -> Vec<&str> {
        self.bindings
            .iter()
            .filter(|b| b.input_id == input_id)
            .map(|b| b.output_id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Run every handler bound to `input_id` for the new `value`
    pub fn dispatch(
        &self,
        dataset: &Dataset,
        input_id: &str,
        value: &str,
    ) -> Result<Vec<OutputUpdate>, CallbackError> {
        let updates: Vec<OutputUpdate> = self
            .bindings
            .iter()
            .filter(|b| b.input_id == input_id)
            .map(|b| OutputUpdate {
                id: b.output_id.clone(),
                chart: b.handler.handle(dataset, value),
            })
            .collect();

        if updates.is_empty() {
            return Err(CallbackError::UnknownInput(input_id.to_string()));
        }

        tracing::debug!(
            input = %input_id,
            value = %value,
            outputs = updates.len(),
            "Dispatched input change"
        );

        Ok(updates)
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(
                self.bindings
                    .iter()
                    .map(|b| format!("{} -> {}", b.input_id, b.output_id)),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CountryRecord;

    fn table() -> Dataset {
        Dataset::from_records(vec![
            CountryRecord::new("France", "Europe", 100, 10, "FRA"),
            CountryRecord::new("Italy", "Europe", 200, 20, "ITA"),
            CountryRecord::new("Spain", "Europe", 150, 30, "ESP"),
        ])
    }

    #[test]
    fn test_dashboard_wiring() {
        let registry = CallbackRegistry::dashboard(5).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.inputs(), vec![CONTINENT_INPUT]);
        assert_eq!(
            registry.outputs_for(CONTINENT_INPUT),
            vec![CASES_OUTPUT, DEATHS_OUTPUT]
        );
    }

    #[test]
    fn test_dashboard_matches_explicit_registration() {
        let mut manual = CallbackRegistry::new();
        manual
            .register(
                CONTINENT_INPUT,
                CASES_OUTPUT,
                RankingHandler::new(NumericColumn::TotalCases, 5),
            )
            .unwrap()
            .register(
                CONTINENT_INPUT,
                DEATHS_OUTPUT,
                RankingHandler::new(NumericColumn::TotalDeaths, 5),
            )
            .unwrap();

        let dashboard = CallbackRegistry::dashboard(5).unwrap();
        assert_eq!(
            dashboard.dispatch(&table(), CONTINENT_INPUT, "Europe"),
            manual.dispatch(&table(), CONTINENT_INPUT, "Europe")
        );
    }

    #[test]
    fn test_dispatch_updates_both_outputs() {
        let registry = CallbackRegistry::dashboard(5).unwrap();
        let updates = registry.dispatch(&table(), CONTINENT_INPUT, "Europe").unwrap();

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].id, CASES_OUTPUT);
        assert_eq!(updates[1].id, DEATHS_OUTPUT);

        let ChartSpec::Bar(cases) = &updates[0].chart else {
            panic!("expected a bar chart");
        };
        assert_eq!(cases.categories, vec!["France", "Spain", "Italy"]);

        let ChartSpec::Bar(deaths) = &updates[1].chart else {
            panic!("expected a bar chart");
        };
        assert_eq!(deaths.categories, vec!["France", "Italy", "Spain"]);
        assert_eq!(deaths.title, "Ranking of Total Deaths in Europe");
    }

    #[test]
    fn test_dispatch_is_repeatable() {
        let registry = CallbackRegistry::dashboard(5).unwrap();
        let dataset = table();

        let first = registry.dispatch(&dataset, CONTINENT_INPUT, "Europe").unwrap();
        let _ = registry.dispatch(&dataset, CONTINENT_INPUT, "Asia").unwrap();
        let again = registry.dispatch(&dataset, CONTINENT_INPUT, "Europe").unwrap();

        assert_eq!(first, again);
    }

    #[test]
    fn test_handlers_are_order_independent() {
        let dataset = table();
        let cases = RankingHandler::new(NumericColumn::TotalCases, 5);
        let deaths = RankingHandler::new(NumericColumn::TotalDeaths, 5);

        let forward = (cases.handle(&dataset, "Europe"), deaths.handle(&dataset, "Europe"));
        let reverse_deaths = deaths.handle(&dataset, "Europe");
        let reverse_cases = cases.handle(&dataset, "Europe");

        assert_eq!(forward, (reverse_cases, reverse_deaths));
    }

    #[test]
    fn test_unknown_input() {
        let registry = CallbackRegistry::dashboard(5).unwrap();
        let err = registry.dispatch(&table(), "choose_planet", "Mars").unwrap_err();
        assert_eq!(err, CallbackError::UnknownInput("choose_planet".to_string()));
    }

    #[test]
    fn test_duplicate_output_rejected() {
        let mut registry = CallbackRegistry::dashboard(5).unwrap();
        let err = registry
            .register(
                "other_input",
                CASES_OUTPUT,
                RankingHandler::new(NumericColumn::TotalCases, 3),
            )
            .err();
        assert_eq!(err, Some(CallbackError::DuplicateOutput(CASES_OUTPUT.to_string())));
    }

    #[test]
    fn test_register_custom_handler() {
        let mut registry = CallbackRegistry::new();
        registry
            .register(
                "choose_size",
                "plottop",
                |dataset: &Dataset, value: &str| {
                    let n = value.parse().unwrap_or(1);
                    RankingHandler::new(NumericColumn::TotalCases, n).handle(dataset, "Europe")
                },
            )
            .unwrap();

        let updates = registry.dispatch(&table(), "choose_size", "2").unwrap();
        let ChartSpec::Bar(bar) = &updates[0].chart else {
            panic!("expected a bar chart");
        };
        assert_eq!(bar.categories, vec!["Spain", "Italy"]);
    }
}
