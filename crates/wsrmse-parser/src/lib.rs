pub mod errors;
pub mod formats;
pub mod model;
mod registry;

pub use errors::ParserError;
pub use model::{ForecastEntry, ObservationEntry, ParsedBatch};
pub use registry::{parse_batch_file, parse_with_parsers, BatchParser};
