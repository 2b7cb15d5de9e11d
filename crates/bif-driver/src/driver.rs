use bif_decoder::{parse_complete, parse_cooperative};
use bif_types::Record;
use bytes::Bytes;
use tracing::debug;

use crate::config::{DriverConfig, ParseMode};
use crate::error::DriverError;
use crate::handle::create_incremental_parser;
use crate::ticker::ConfiguredTicks;

/// Parse `buf` with the driver `config` selects and return the final record.
///
/// All three modes produce the same result for the same input; they only
/// differ in how the work is scheduled. In incremental mode the parse runs
/// on its own task, ticked by [`ConfiguredTicks::from_config`].
///
/// # Errors
///
/// [`DriverError::Decode`] for malformed input. [`DriverError::Cancelled`]
/// only if the incremental task stopped without producing a result.
pub async fn run(buf: impl Into<Bytes>, config: &DriverConfig) -> Result<Record, DriverError> {
    let buf = buf.into();
    debug!(mode = ?config.mode, len = buf.len(), "starting parse");

    match config.mode {
        ParseMode::Complete => Ok(parse_complete(buf)?),
        ParseMode::Cooperative => Ok(parse_cooperative(buf).await?),
        ParseMode::Incremental => {
            let handle = create_incremental_parser(buf, ConfiguredTicks::from_config(config));
            handle.wait().await.unwrap_or(Err(DriverError::Cancelled))
        }
    }
}
