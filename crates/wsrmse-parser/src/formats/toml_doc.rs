use crate::errors::ParserError;
use crate::formats::batch_from_document;
use crate::formats::schema::{BatchDocument, FORECASTS_KEY, OBSERVATIONS_KEY};
use crate::model::ParsedBatch;
use crate::registry::BatchParser;

const PARSER_NAME: &str = "toml_batch";

pub struct TomlBatchParser;

impl BatchParser for TomlBatchParser {
    fn name(&self) -> &'static str {
        PARSER_NAME
    }

    fn parse(&self, content: &str) -> Result<ParsedBatch, ParserError> {
        let table = content
            .parse::<toml::Table>()
            .map_err(|err| ParserError::FormatMismatch {
                parser: PARSER_NAME,
                reason: err.message().to_string(),
            })?;

        if !table.contains_key(OBSERVATIONS_KEY) && !table.contains_key(FORECASTS_KEY) {
            return Err(ParserError::FormatMismatch {
                parser: PARSER_NAME,
                reason: format!("no {OBSERVATIONS_KEY} or {FORECASTS_KEY} arrays"),
            });
        }

        let document: BatchDocument = toml::Value::Table(table).try_into().map_err(
            |err: toml::de::Error| ParserError::InvalidDocument {
                parser: PARSER_NAME,
                message: err.message().to_string(),
            },
        )?;

        batch_from_document(PARSER_NAME, document)
    }
}
