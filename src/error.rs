use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Text extents were requested before the surface completed a render pass.
    #[error("text layout not realized: {0}")]
    LayoutNotRealized(String),

    #[error("text measurement failed: {0}")]
    TextMeasurement(String),

    #[error("unknown configuration option `{0}`")]
    UnknownOption(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
