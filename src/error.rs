use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("failed to read config file")]
    ReadFile,
    #[display("failed to parse config: {reason}")]
    Parse { reason: String },
    #[display("invalid config: {field}")]
    Validation { field: String },
}

#[derive(Debug, Display, Error)]
pub enum SourceError {
    #[display("no observations available for {symbol}")]
    NotFound { symbol: String },
    #[display("failed to read observations for {symbol}")]
    Read { symbol: String },
    #[display("failed to parse observations for {symbol}")]
    Parse { symbol: String },
}

/// Raised when decoding a category from its integer wire value.
#[derive(Debug, Display, Error)]
#[display("{value} is not a valid {kind} value")]
pub struct CategoryError {
    pub kind: &'static str,
    pub value: i8,
}
