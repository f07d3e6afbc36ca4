use crate::errors::ParserError;
use crate::formats::{JsonBatchParser, TomlBatchParser};
use crate::model::ParsedBatch;

pub trait BatchParser {
    fn name(&self) -> &'static str;
    fn parse(&self, content: &str) -> Result<ParsedBatch, ParserError>;
}

/// JSON first, since a JSON object is never valid TOML; TOML otherwise.
pub fn parse_batch_file(content: &str) -> Result<ParsedBatch, ParserError> {
    parse_with_parsers(content, &[&JsonBatchParser as &dyn BatchParser, &TomlBatchParser])
}

/// Returns the first parser's result that is not a format mismatch.
pub fn parse_with_parsers(
    content: &str,
    parsers: &[&dyn BatchParser],
) -> Result<ParsedBatch, ParserError> {
    let mut mismatches = Vec::with_capacity(parsers.len());

    for candidate in parsers {
        match candidate.parse(content) {
            Err(ParserError::FormatMismatch { parser, reason }) => {
                mismatches.push(format!("{parser}: {reason}"));
            }
            decided => return decided,
        }
    }

    Err(ParserError::UnrecognisedFormat { mismatches })
}
