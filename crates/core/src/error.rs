use thiserror::Error;

pub type AdLensResult<T> = Result<T, AdLensError>;

#[derive(Error, Debug)]
pub enum AdLensError {
    /// A grouping column the pipeline cannot run without is absent from the
    /// source header row. Fatal: aggregation has nothing to key on.
    #[error("Schema error: required column '{field}' not found after normalization")]
    MissingColumn { field: String },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
