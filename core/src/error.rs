use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Table contains no records")]
    EmptyTable,

    #[error("Firm group has no firm ids")]
    EmptyFirmGroup,

    #[error("Sim index {max_sim} cannot be dense over {rows} rows")]
    SparseSimIndex { max_sim: u32, rows: usize },
}

pub type EvalResult<T> = Result<T, EvalError>;
