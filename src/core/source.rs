use std::cell::OnceCell;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::aggregate::AggregateSnapshot;
use crate::core::dataset::{Dataset, Row, RowOrder};
use crate::error::{ChartError, ChartResult};

/// What to do with a cell that is not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellParsePolicy {
    /// Reject the whole input with `ChartError::MalformedInput`.
    #[default]
    Strict,
    /// Replace the cell with `0.0` and keep going.
    CoerceToZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataSourceOptions {
    #[serde(default)]
    pub cell_policy: CellParsePolicy,
    #[serde(default)]
    pub row_order: RowOrder,
}

impl DataSourceOptions {
    #[must_use]
    pub fn with_cell_policy(mut self, policy: CellParsePolicy) -> Self {
        self.cell_policy = policy;
        self
    }

    #[must_use]
    pub fn with_row_order(mut self, order: RowOrder) -> Self {
        self.row_order = order;
        self
    }
}

/// Tabular input as extracted from a table: column headers, one header and a
/// list of cell texts per body row, and an optional caption.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableSource {
    #[serde(default)]
    pub caption: Option<String>,
    pub column_headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub header: Option<String>,
    pub cells: Vec<String>,
}

impl TableRow {
    #[must_use]
    pub fn new(header: Option<&str>, cells: &[&str]) -> Self {
        Self {
            header: header.map(str::to_owned),
            cells: cells.iter().map(|cell| (*cell).to_owned()).collect(),
        }
    }
}

/// JSON payload shape accepted by `DataSource::from_json_str`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonDataPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(alias = "columns", alias = "xLabels")]
    pub categories: Vec<String>,
    pub rows: Vec<JsonRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRow {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<usize>,
    pub points: Vec<JsonCell>,
}

/// A point may arrive as a JSON number or as numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonCell {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataSourceId(u64);

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

impl DataSourceId {
    fn next() -> Self {
        Self(NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A dataset plus the aggregates derived from it.
///
/// Aggregates are computed on first access and then frozen; there is no way to
/// change the dataset afterwards, so new data always means a new `DataSource`
/// with a fresh identity and an empty cache.
#[derive(Debug)]
pub struct DataSource {
    id: DataSourceId,
    dataset: Dataset,
    aggregates: OnceCell<AggregateSnapshot>,
}

impl DataSource {
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self {
            id: DataSourceId::next(),
            dataset,
            aggregates: OnceCell::new(),
        }
    }

    pub fn from_table(table: &TableSource, options: DataSourceOptions) -> ChartResult<Self> {
        let mut coerced = 0usize;
        let mut rows = Vec::with_capacity(table.rows.len());
        for (row_index, table_row) in table.rows.iter().enumerate() {
            let mut points = Vec::with_capacity(table_row.cells.len());
            for (column_index, cell) in table_row.cells.iter().enumerate() {
                points.push(parse_cell(
                    cell,
                    row_index,
                    column_index,
                    options.cell_policy,
                    &mut coerced,
                )?);
            }
            let mut row = Row::new(points);
            if let Some(header) = &table_row.header {
                row = row.with_label(header.clone());
            }
            rows.push(row);
        }

        let dataset = Dataset::with_order(
            rows,
            table.column_headers.clone(),
            table.caption.clone(),
            options.row_order,
        )?;
        Ok(Self::finish(dataset, coerced, "table"))
    }

    pub fn from_json_str(input: &str, options: DataSourceOptions) -> ChartResult<Self> {
        let payload: JsonDataPayload = serde_json::from_str(input).map_err(|e| {
            ChartError::MalformedInput(format!("failed to parse json data payload: {e}"))
        })?;
        Self::from_json_payload(payload, options)
    }

    pub fn from_json_payload(
        payload: JsonDataPayload,
        options: DataSourceOptions,
    ) -> ChartResult<Self> {
        let mut coerced = 0usize;
        let mut rows = Vec::with_capacity(payload.rows.len());
        for (row_index, json_row) in payload.rows.into_iter().enumerate() {
            let mut points = Vec::with_capacity(json_row.points.len());
            for (column_index, cell) in json_row.points.iter().enumerate() {
                let value = match cell {
                    JsonCell::Number(value) if value.is_finite() => *value,
                    JsonCell::Number(_) => reject_cell(
                        "non-finite number",
                        row_index,
                        column_index,
                        options.cell_policy,
                        &mut coerced,
                    )?,
                    JsonCell::Text(text) => parse_cell(
                        text,
                        row_index,
                        column_index,
                        options.cell_policy,
                        &mut coerced,
                    )?,
                };
                points.push(value);
            }
            let mut row = Row::new(points);
            if let Some(label) = json_row.label {
                row = row.with_label(label);
            }
            if let Some(color) = json_row.color {
                row = row.with_color(color);
            }
            rows.push(row);
        }

        let dataset =
            Dataset::with_order(rows, payload.categories, payload.title, options.row_order)?;
        Ok(Self::finish(dataset, coerced, "json"))
    }

    fn finish(dataset: Dataset, coerced: usize, origin: &'static str) -> Self {
        let source = Self::new(dataset);
        debug!(
            id = source.id.get(),
            origin,
            rows = source.dataset.row_count(),
            categories = source.dataset.category_count(),
            coerced,
            "built data source"
        );
        if coerced > 0 {
            warn!(coerced, origin, "non-numeric cells were coerced to zero");
        }
        source
    }

    #[must_use]
    pub fn id(&self) -> DataSourceId {
        self.id
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Aggregates for this source, computed once on first call.
    #[must_use]
    pub fn aggregates(&self) -> &AggregateSnapshot {
        self.aggregates
            .get_or_init(|| AggregateSnapshot::compute(&self.dataset))
    }

    #[must_use]
    pub fn aggregates_cached(&self) -> bool {
        self.aggregates.get().is_some()
    }
}

fn parse_cell(
    text: &str,
    row_index: usize,
    column_index: usize,
    policy: CellParsePolicy,
    coerced: &mut usize,
) -> ChartResult<f64> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => reject_cell(
            &format!("`{text}` is not a number"),
            row_index,
            column_index,
            policy,
            coerced,
        ),
    }
}

fn reject_cell(
    reason: &str,
    row_index: usize,
    column_index: usize,
    policy: CellParsePolicy,
    coerced: &mut usize,
) -> ChartResult<f64> {
    match policy {
        CellParsePolicy::Strict => Err(ChartError::MalformedInput(format!(
            "cell at row {row_index}, column {column_index}: {reason}"
        ))),
        CellParsePolicy::CoerceToZero => {
            *coerced += 1;
            Ok(0.0)
        }
    }
}
