#![warn(clippy::pedantic)]

pub mod cursor;
pub mod error;
pub mod header;
pub mod number;

pub use cursor::{ByteCursor, Scan};
pub use error::{DecodeError, Token};
pub use header::FieldHeader;
