//! Update handlers
//!
//! A handler turns the selected value of one input into a replacement chart.
//! Handlers are pure: they read the shared table and return a fresh spec.

use crate::aggregate::top_n_by_category;
use crate::chart::{ranking_bar, BarOptions, ChartSpec};
use crate::dataset::{CategoryColumn, Dataset, NumericColumn};

/// Recomputes one output from the base table for a newly selected value
pub trait UpdateHandler: Send + Sync {
    fn handle(&self, dataset: &Dataset, value: &str) -> ChartSpec;
}

impl<F> UpdateHandler for F
where
    F: Fn(&Dataset, &str) -> ChartSpec + Send + Sync,
{
    fn handle(&self, dataset: &Dataset, value: &str) -> ChartSpec {
        self(dataset, value)
    }
}

/// Top-N countries of the selected continent, ranked by one metric
#[derive(Debug, Clone)]
pub struct RankingHandler {
    metric: NumericColumn,
    n: usize,
    options: BarOptions,
}

impl RankingHandler {
    pub fn new(metric: NumericColumn, n: usize) -> Self {
        Self {
            metric,
            n,
            options: BarOptions::ranking(metric),
        }
    }
}

impl UpdateHandler for RankingHandler {
    fn handle(&self, dataset: &Dataset, continent: &str) -> ChartSpec {
        let top = top_n_by_category(
            dataset,
            CategoryColumn::Continent,
            continent,
            self.metric,
            self.n,
        );

        if top.is_empty() {
            tracing::debug!(
                continent = %continent,
                metric = self.metric.header(),
                "Selection matched no rows, rendering placeholder"
            );
        }

        ranking_bar(&top, self.metric, continent, &self.options)
    }
}
