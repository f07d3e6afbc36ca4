pub(crate) mod common;
mod json;
pub(crate) mod schema;
mod toml_doc;

pub use json::JsonBatchParser;
pub use toml_doc::TomlBatchParser;

pub(crate) use common::batch_from_document;
