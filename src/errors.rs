/// Error type that can be returned by fallible operations in this crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backing file could not be created, opened, or appended to
    #[error("transaction store unavailable")]
    Storage(#[from] std::io::Error),
    /// Error reading or writing rows; could wrap IO or parsing errors
    #[error("error processing the transaction file")]
    Parse(#[from] csv::Error),
    /// A stored date did not match the store's configured date format
    #[error("date '{value}' does not match format '{format}'")]
    Date {
        /// The date text as it appears in the file
        value: String,
        /// The format the store expected
        format: String,
    },
}

/// Shorthand for results produced by this crate
pub type Result<T> = std::result::Result<T, Error>;
