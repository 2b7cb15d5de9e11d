#![warn(clippy::pedantic)]

pub mod field;
pub mod record;

pub use field::{BlobField, Field, FieldType, IntField};
pub use record::Record;
