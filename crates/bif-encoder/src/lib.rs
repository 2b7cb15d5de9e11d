#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;
pub mod field_writer;

pub use encoder::BifEncoder;
pub use error::EncodeError;
