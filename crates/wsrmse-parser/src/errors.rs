use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("{parser} format mismatch: {reason}")]
    FormatMismatch {
        parser: &'static str,
        reason: String,
    },

    #[error("{parser} document invalid: {message}")]
    InvalidDocument {
        parser: &'static str,
        message: String,
    },

    #[error("{parser} {collection}[{index}] invalid: {message}")]
    InvalidRecord {
        parser: &'static str,
        collection: &'static str,
        index: usize,
        message: String,
    },

    /// Every known format declined the file; one `format: reason` entry each.
    #[error("not a recognised batch document ({})", .mismatches.join("; "))]
    UnrecognisedFormat { mismatches: Vec<String> },
}
