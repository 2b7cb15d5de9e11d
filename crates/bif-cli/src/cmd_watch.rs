/// Implementation of `bif watch`.
///
/// Drives the incremental parser from a ticker and prints the status view
/// every time a step lands, the way an interactive viewer would redraw.
///
/// ```text
/// $ bif watch --text ':b name 6\nJohnny\n:i age 32'
/// No parsing started
/// ---
/// Parsing '<text>'...
/// name: Johnny
/// ---
/// Parsing '<text>'...
/// name: Johnny
/// age: 32
/// ---
/// Parsed '<text>'
/// name: Johnny
/// age: 32
/// ```
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use bif_driver::render::render_status;
use bif_driver::{
    ConfiguredTicks, DriverConfig, DriverError, IncrementalHandle, IncrementalParser, ParseMode,
};
use bytes::Bytes;
use tokio_util::sync::CancellationToken;

use crate::WatchArgs;

/// Run the `bif watch` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the buffer is
/// malformed. Cancelling with `--cancel-after` is not an error.
pub fn run(args: &WatchArgs) -> Result<()> {
    let buf = args.input.load()?;
    let name = args.input.name();
    let config = DriverConfig {
        mode: ParseMode::Incremental,
        tick_interval: Duration::from_millis(args.tick_ms),
    };
    crate::runtime()?
        .block_on(watch(buf, &config, args.cancel_after, &name))
        .with_context(|| format!("failed to decode {name}"))
}

async fn watch(
    buf: Bytes,
    config: &DriverConfig,
    cancel_after: Option<usize>,
    name: &str,
) -> Result<(), DriverError> {
    // Tripped by the listener once the parse ends or the step limit is hit.
    let stop = CancellationToken::new();

    let mut parser = IncrementalParser::new(buf);
    {
        let stop = stop.clone();
        let name = name.to_string();
        let steps = AtomicUsize::new(0);
        parser.on_change(move |update| {
            println!("---");
            println!("{}", render_status(&name, update.done, Some(&update.result)));
            let seen = steps.fetch_add(1, Ordering::SeqCst) + 1;
            if update.done || cancel_after.is_some_and(|limit| seen >= limit) {
                stop.cancel();
            }
        });
    }

    println!("{}", render_status(name, false, None));
    let handle = IncrementalHandle::spawn(parser, ConfiguredTicks::from_config(config));

    stop.cancelled().await;
    if !handle.is_done() {
        handle.cancel();
        println!("---");
        println!(
            "{}",
            render_status(name, false, handle.current_result().as_ref())
        );
    }

    match handle.wait().await {
        Some(Err(DriverError::Decode(error))) => Err(DriverError::Decode(error)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &[u8] = b":i a 1\n:i b 2\n:i c 3\n";

    #[tokio::test]
    async fn watches_to_completion() {
        let config = DriverConfig::default();
        assert_eq!(watch(Bytes::from_static(INPUT), &config, None, "in").await, Ok(()));
    }

    #[tokio::test]
    async fn step_limit_cancels_without_error() {
        let config = DriverConfig::default();
        assert_eq!(watch(Bytes::from_static(INPUT), &config, Some(1), "in").await, Ok(()));
    }

    #[tokio::test]
    async fn decode_failure_is_reported() {
        let config = DriverConfig::default();
        let result = watch(Bytes::from_static(b":i a 1\n:x bad 1\n"), &config, None, "in").await;
        assert!(matches!(result, Err(DriverError::Decode(_))));
    }
}
