use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("empty dataset: {0}")]
    EmptyDataset(String),

    #[error("drawing surface not ready after {attempts} attempts")]
    SurfaceNotReady { attempts: u32 },

    #[error("palette has {colors} colors but dataset has {rows} rows")]
    PaletteExhausted { rows: usize, colors: usize },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
