#![warn(clippy::pedantic)]

pub mod config;
pub mod driver;
pub mod error;
pub mod handle;
pub mod incremental;
pub mod render;
pub mod ticker;

pub use config::{DriverConfig, ParseMode};
pub use driver::run;
pub use error::DriverError;
pub use handle::{IncrementalHandle, create_incremental_parser};
pub use incremental::{DriverResult, IncrementalParser, ParseUpdate, TickOutcome};
pub use ticker::{ConfiguredTicks, IntervalTicks, TickSource, YieldTicks};
