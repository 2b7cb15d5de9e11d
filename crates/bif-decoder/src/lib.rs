#![warn(clippy::pedantic)]

pub mod cooperative;
pub mod decoder;
pub mod field_decoder;
pub mod process;

pub use bif_wire::DecodeError;
pub use cooperative::parse_cooperative;
pub use decoder::{BifDecoder, parse_complete};
pub use process::{ParseProcess, ParseResult, ParseState, Step};
