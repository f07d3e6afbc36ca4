use crate::errors::ParserError;
use crate::formats::batch_from_document;
use crate::formats::schema::BatchDocument;
use crate::model::ParsedBatch;
use crate::registry::BatchParser;

const PARSER_NAME: &str = "json_batch";

pub struct JsonBatchParser;

impl BatchParser for JsonBatchParser {
    fn name(&self) -> &'static str {
        PARSER_NAME
    }

    fn parse(&self, content: &str) -> Result<ParsedBatch, ParserError> {
        if !content.trim_start().starts_with('{') {
            return Err(ParserError::FormatMismatch {
                parser: PARSER_NAME,
                reason: "document does not start with a JSON object".to_string(),
            });
        }

        let document: BatchDocument =
            serde_json::from_str(content).map_err(|err| ParserError::InvalidDocument {
                parser: PARSER_NAME,
                message: err.to_string(),
            })?;

        batch_from_document(PARSER_NAME, document)
    }
}
