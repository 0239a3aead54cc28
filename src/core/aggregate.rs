use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::dataset::{Dataset, Row};

/// Number of following rows a stacked layer sits on.
///
/// Stacking is a fixed-depth rule: row `i` is drawn on top of rows `i + 1` and
/// `i + 2` only, never on the full remainder of the table.
pub const STACK_LOOKAHEAD_ROWS: usize = 2;

#[must_use]
pub fn row_total(row: &Row) -> f64 {
    row.points().iter().sum()
}

#[must_use]
pub fn row_totals(dataset: &Dataset) -> Vec<f64> {
    dataset.rows().iter().map(row_total).collect()
}

#[must_use]
pub fn grand_total(dataset: &Dataset) -> f64 {
    dataset.rows().iter().map(row_total).sum()
}

/// Per-category sum across all rows.
#[must_use]
pub fn column_totals(dataset: &Dataset) -> Vec<f64> {
    let mut totals = vec![0.0; dataset.category_count()];
    for row in dataset.rows() {
        for (total, point) in totals.iter_mut().zip(row.points()) {
            *total += point;
        }
    }
    totals
}

/// Largest single point, or `0.0` for a dataset without points.
#[must_use]
pub fn max_point(dataset: &Dataset) -> f64 {
    dataset
        .rows()
        .iter()
        .flat_map(|row| row.points().iter().copied())
        .map(OrderedFloat)
        .max()
        .map_or(0.0, |max| max.0)
}

/// Largest per-category total, or `0.0` for a dataset without categories.
#[must_use]
pub fn max_column_total(dataset: &Dataset) -> f64 {
    max_of(&column_totals(dataset))
}

/// Value of row `row_index` drawn as a layer on its two following rows.
///
/// Rows or categories past the end of the table contribute nothing, so the
/// last rows degrade to fewer terms instead of failing.
#[must_use]
pub fn stacked_value(dataset: &Dataset, row_index: usize, category_index: usize) -> f64 {
    stack_terms(dataset, row_index, category_index)
        .iter()
        .sum()
}

pub(crate) fn stack_terms(
    dataset: &Dataset,
    row_index: usize,
    category_index: usize,
) -> SmallVec<[f64; STACK_LOOKAHEAD_ROWS + 1]> {
    (row_index..=row_index.saturating_add(STACK_LOOKAHEAD_ROWS))
        .filter_map(|index| dataset.row(index))
        .filter_map(|row| row.point(category_index))
        .collect()
}

fn max_of(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .map(OrderedFloat)
        .max()
        .map_or(0.0, |max| max.0)
}

/// Read-only aggregate view derived from exactly one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub grand_total: f64,
    pub row_totals: Vec<f64>,
    pub column_totals: Vec<f64>,
    pub max_point: f64,
    pub max_column_total: f64,
}

impl AggregateSnapshot {
    #[must_use]
    pub fn compute(dataset: &Dataset) -> Self {
        let row_totals = row_totals(dataset);
        let column_totals = column_totals(dataset);
        Self {
            grand_total: row_totals.iter().sum(),
            max_point: max_point(dataset),
            max_column_total: max_of(&column_totals),
            row_totals,
            column_totals,
        }
    }
}
