pub mod aggregate;
pub mod bar_series;
pub mod dataset;
pub mod geometry;
pub mod line_series;
pub mod pie_series;
pub mod scale;
pub mod source;
pub mod types;

pub use aggregate::{
    AggregateSnapshot, STACK_LOOKAHEAD_ROWS, column_totals, grand_total, max_column_total,
    max_point, row_total, row_totals, stacked_value,
};
pub use bar_series::{grouped_bar_width, project_grouped_bars, project_stacked_bars};
pub use dataset::{Dataset, Row, RowOrder};
pub use geometry::{ChartFamily, ChartGeometry, GeometryBuilder, GeometryOptions};
pub use line_series::{line_vertices, project_lines};
pub use pie_series::{PieSlice, pie_slices, project_pie};
pub use scale::{ScaleRequest, TickRounding, ValueScale, band_count_for};
pub use source::{
    CellParsePolicy, DataSource, DataSourceId, DataSourceOptions, JsonCell, JsonDataPayload,
    JsonRow, TableRow, TableSource,
};
pub use types::Viewport;
