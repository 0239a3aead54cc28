use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One series: a value per category plus optional label and palette slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    points: Vec<f64>,
    label: Option<String>,
    color: Option<usize>,
}

impl Row {
    #[must_use]
    pub fn new(points: Vec<f64>) -> Self {
        Self {
            points,
            label: None,
            color: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Pins this row to a palette slot instead of its position.
    #[must_use]
    pub fn with_color(mut self, palette_index: usize) -> Self {
        self.color = Some(palette_index);
        self
    }

    #[must_use]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn color(&self) -> Option<usize> {
        self.color
    }

    #[must_use]
    pub fn point(&self, category_index: usize) -> Option<f64> {
        self.points.get(category_index).copied()
    }
}

/// Order in which rows are kept once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowOrder {
    /// Keep the order rows appear in the source.
    #[default]
    Source,
    /// Largest row total first; ties keep source order.
    DescendingTotal,
}

/// Validated table of rows sharing one set of category labels.
///
/// Every row has exactly `categories.len()` points. Palette slots are resolved
/// at construction so each row carries its final color index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DatasetParts")]
pub struct Dataset {
    rows: Vec<Row>,
    categories: Vec<String>,
    title: Option<String>,
}

/// Unchecked wire form; deserialized datasets go through `Dataset::new`.
#[derive(Deserialize)]
struct DatasetParts {
    rows: Vec<Row>,
    categories: Vec<String>,
    title: Option<String>,
}

impl TryFrom<DatasetParts> for Dataset {
    type Error = ChartError;

    fn try_from(parts: DatasetParts) -> ChartResult<Self> {
        Self::new(parts.rows, parts.categories, parts.title)
    }
}

impl Dataset {
    pub fn new(
        rows: Vec<Row>,
        categories: Vec<String>,
        title: Option<String>,
    ) -> ChartResult<Self> {
        Self::with_order(rows, categories, title, RowOrder::Source)
    }

    pub fn with_order(
        mut rows: Vec<Row>,
        categories: Vec<String>,
        title: Option<String>,
        order: RowOrder,
    ) -> ChartResult<Self> {
        for (row_index, row) in rows.iter().enumerate() {
            if row.points.len() != categories.len() {
                return Err(ChartError::MalformedInput(format!(
                    "row {row_index} has {} points but there are {} categories",
                    row.points.len(),
                    categories.len()
                )));
            }
        }

        if order == RowOrder::DescendingTotal {
            // `sort_by` is stable, so equal totals keep their source order.
            rows.sort_by(|left, right| {
                let left_total: f64 = left.points.iter().sum();
                let right_total: f64 = right.points.iter().sum();
                right_total.total_cmp(&left_total)
            });
        }

        for (row_index, row) in rows.iter_mut().enumerate() {
            row.color.get_or_insert(row_index);
        }

        Ok(Self {
            rows,
            categories,
            title,
        })
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, row_index: usize) -> Option<&Row> {
        self.rows.get(row_index)
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// `true` when there is nothing to plot: no rows or no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Dataset, Row, RowOrder};
    use crate::error::ChartError;

    fn categories(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("C{i}")).collect()
    }

    #[test]
    fn rejects_row_with_wrong_point_count() {
        let err = Dataset::new(
            vec![Row::new(vec![1.0, 2.0]), Row::new(vec![3.0])],
            categories(2),
            None,
        )
        .expect_err("length mismatch");
        assert!(matches!(err, ChartError::MalformedInput(message) if message.contains("row 1")));
    }

    #[test]
    fn assigns_palette_slots_by_position_unless_pinned() {
        let dataset = Dataset::new(
            vec![
                Row::new(vec![1.0]),
                Row::new(vec![2.0]).with_color(7),
                Row::new(vec![3.0]),
            ],
            categories(1),
            None,
        )
        .expect("valid dataset");

        let colors: Vec<_> = dataset.rows().iter().map(Row::color).collect();
        assert_eq!(colors, vec![Some(0), Some(7), Some(2)]);
    }

    #[test]
    fn descending_total_order_is_stable_and_colors_follow_final_order() {
        let dataset = Dataset::with_order(
            vec![
                Row::new(vec![1.0, 1.0]).with_label("a"),
                Row::new(vec![5.0, 5.0]).with_label("b"),
                Row::new(vec![2.0, 0.0]).with_label("c"),
            ],
            categories(2),
            None,
            RowOrder::DescendingTotal,
        )
        .expect("valid dataset");

        let labels: Vec<_> = dataset.rows().iter().filter_map(Row::label).collect();
        assert_eq!(labels, vec!["b", "a", "c"]);
        assert_eq!(dataset.rows()[0].color(), Some(0));
    }

    #[test]
    fn deserialization_checks_row_lengths() {
        let err = serde_json::from_str::<Dataset>(
            r#"{"rows":[{"points":[1,2,3],"label":null,"color":null}],"categories":["a"],"title":null}"#,
        )
        .expect_err("length mismatch");
        assert!(err.to_string().contains("row 0 has 3 points"));
    }

    #[test]
    fn deserialized_dataset_gets_palette_slots() {
        let dataset: Dataset = serde_json::from_str(
            r#"{"rows":[{"points":[1],"label":"a","color":null},{"points":[2],"label":"b","color":4}],"categories":["x"],"title":"T"}"#,
        )
        .expect("valid dataset");
        let colors: Vec<_> = dataset.rows().iter().map(Row::color).collect();
        assert_eq!(colors, vec![Some(0), Some(4)]);
        assert_eq!(dataset.title(), Some("T"));
    }

    #[test]
    fn zero_categories_counts_as_empty() {
        let dataset =
            Dataset::new(vec![Row::new(Vec::new())], Vec::new(), None).expect("valid dataset");
        assert!(dataset.is_empty());
    }
}
