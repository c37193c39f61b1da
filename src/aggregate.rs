//! Aggregation Functions
//!
//! Pure reductions over the record table: distinct counts, sums, cross-tabs
//! and top-N rankings. Every call builds a fresh view from the base table.
//!
//! # Ordering
//!
//! - `top_n_by_category` sorts stably, so rows sharing the boundary value are
//!   ranked by original row order and the later rows win the last slots.
//! - Cross-tab rows and distinct values come back in first-appearance order.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::dataset::{CategoryColumn, CountryRecord, Dataset, NumericColumn};

/// One row of a cross-tab: the group key tuple and its total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal {
    /// Key values, one per grouping column, in grouping order
    pub keys: Vec<String>,
    pub total: u64,
}

impl GroupTotal {
    pub fn key(&self, position: usize) -> Option<&str> {
        self.keys.get(position).map(String::as_str)
    }
}

/// Values shown on the summary cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub countries: usize,
    pub continents: usize,
    pub total_cases: u64,
    pub total_deaths: u64,
}

impl DashboardSummary {
    pub fn compute(table: &Dataset) -> Self {
        Self {
            countries: summary_count(table, CategoryColumn::Country),
            continents: summary_count(table, CategoryColumn::Continent),
            total_cases: summary_sum(table, NumericColumn::TotalCases),
            total_deaths: summary_sum(table, NumericColumn::TotalDeaths),
        }
    }
}

/// Number of distinct values in a column
pub fn summary_count(table: &Dataset, column: CategoryColumn) -> usize {
    table
        .iter()
        .map(|record| column.value(record))
        .collect::<HashSet<_>>()
        .len()
}

/// Sum of a numeric column
pub fn summary_sum(table: &Dataset, column: NumericColumn) -> u64 {
    table
        .iter()
        .fold(0u64, |acc, record| acc.saturating_add(column.value(record)))
}

/// Distinct values of a column in first-appearance order
pub fn distinct_values(table: &Dataset, column: CategoryColumn) -> Vec<String> {
    let mut seen = HashSet::new();
    table
        .iter()
        .map(|record| column.value(record))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// The `n` largest rows by `sort_column` among rows where
/// `category_column == category_value`, in ascending order.
///
/// No matches yields an empty vec; fewer than `n` matches yields all of them.
pub fn top_n_by_category<'a>(
    table: &'a Dataset,
    category_column: CategoryColumn,
    category_value: &str,
    sort_column: NumericColumn,
    n: usize,
) -> Vec<&'a CountryRecord> {
    let mut matching: Vec<&CountryRecord> = table
        .iter()
        .filter(|record| category_column.value(record) == category_value)
        .collect();

    // sort_by_key is stable
    matching.sort_by_key(|record| sort_column.value(record));

    let start = matching.len().saturating_sub(n);
    matching.split_off(start)
}

/// Group by one or more columns and sum `value_column`
pub fn cross_tab_sum(
    table: &Dataset,
    group_columns: &[CategoryColumn],
    value_column: NumericColumn,
) -> Vec<GroupTotal> {
    cross_tab(table, group_columns, |record| value_column.value(record))
}

/// Group by one or more columns and count rows
pub fn cross_tab_count(table: &Dataset, group_columns: &[CategoryColumn]) -> Vec<GroupTotal> {
    cross_tab(table, group_columns, |_| 1)
}

fn cross_tab<F>(table: &Dataset, group_columns: &[CategoryColumn], weight: F) -> Vec<GroupTotal>
where
    F: Fn(&CountryRecord) -> u64,
{
    let mut positions: HashMap<Vec<&str>, usize> = HashMap::new();
    let mut groups: Vec<GroupTotal> = Vec::new();

    for record in table {
        let key: Vec<&str> = group_columns.iter().map(|c| c.value(record)).collect();

        let position = *positions.entry(key).or_insert_with_key(|key| {
            groups.push(GroupTotal {
                keys: key.iter().map(|k| k.to_string()).collect(),
                total: 0,
            });
            groups.len() - 1
        });

        let group = &mut groups[position];
        group.total = group.total.saturating_add(weight(record));
    }

    groups
}
