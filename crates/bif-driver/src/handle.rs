use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::incremental::{DriverResult, IncrementalParser, ParseUpdate, TickOutcome};
use crate::ticker::TickSource;

/// An [`IncrementalParser`] that ticks itself on a tokio task.
///
/// The task awaits the [`TickSource`] before every step, advances the
/// parser by one field and copies out a [`ParseUpdate`] under the lock,
/// then releases the lock and only then calls the change listeners with
/// that update.
///
/// ```text
///   TickSource ──tick──▶ task: lock → advance → update → unlock ──▶ listeners(&update)
///                                    │
///   caller ◀── current_result() ─────┘  (any time, from any thread)
/// ```
///
/// Dropping the handle detaches the task; it keeps ticking until the
/// parse is terminal. Call [`cancel`](Self::cancel) to stop it early.
#[derive(Debug)]
pub struct IncrementalHandle {
    parser: Arc<Mutex<IncrementalParser>>,
    task: JoinHandle<()>,
}

impl IncrementalHandle {
    /// Move `parser` onto a new task driven by `ticks`.
    ///
    /// Listeners registered on `parser` beforehand see every tick,
    /// including the first one.
    ///
    /// # Panics
    ///
    /// If called outside a tokio runtime.
    pub fn spawn(parser: IncrementalParser, ticks: impl TickSource) -> Self {
        let parser = Arc::new(Mutex::new(parser));
        let task = tokio::spawn(drive(Arc::clone(&parser), ticks));
        Self { parser, task }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.lock().is_done()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.lock().is_cancelled()
    }

    /// See [`IncrementalParser::current_result`].
    #[must_use]
    pub fn current_result(&self) -> Option<DriverResult> {
        self.lock().current_result()
    }

    /// Number of steps taken so far.
    #[must_use]
    pub fn ticks(&self) -> usize {
        self.lock().ticks()
    }

    /// Register a change listener. It runs on the driving task, outside
    /// the parser lock, after every step that made progress.
    pub fn on_change(&self, listener: impl Fn(&ParseUpdate) + Send + Sync + 'static) {
        self.lock().on_change(listener);
    }

    /// Cancel the parse and stop the driving task.
    ///
    /// Every later [`current_result`](Self::current_result) reports
    /// [`DriverError::Cancelled`](crate::DriverError::Cancelled).
    pub fn cancel(&self) {
        self.lock().cancel();
        self.task.abort();
    }

    /// Wait for the driving task to stop and return the final result.
    ///
    /// # Panics
    ///
    /// Resumes the panic if a listener panicked on the driving task.
    pub async fn wait(self) -> Option<DriverResult> {
        if let Err(error) = self.task.await {
            if error.is_panic() {
                std::panic::resume_unwind(error.into_panic());
            }
        }
        lock(&self.parser).current_result()
    }

    fn lock(&self) -> MutexGuard<'_, IncrementalParser> {
        lock(&self.parser)
    }
}

/// Start an incremental parse of `buf` driven by `ticks`.
///
/// Shorthand for [`IncrementalHandle::spawn`] with a fresh parser. Nothing
/// is decoded before the first tick, so `current_result()` is `None` until
/// then.
///
/// # Panics
///
/// If called outside a tokio runtime.
pub fn create_incremental_parser(
    buf: impl Into<Bytes>,
    ticks: impl TickSource,
) -> IncrementalHandle {
    IncrementalHandle::spawn(IncrementalParser::new(buf), ticks)
}

async fn drive<T: TickSource>(parser: Arc<Mutex<IncrementalParser>>, mut ticks: T) {
    loop {
        ticks.next_tick().await;

        let (outcome, update, listeners) = {
            let mut guard = lock(&parser);
            let outcome = guard.advance();
            let update = if outcome == TickOutcome::Idle {
                None
            } else {
                guard.update()
            };
            (outcome, update, guard.listeners())
        };

        if let Some(update) = &update {
            for listener in &listeners {
                listener(update);
            }
        }
        if outcome.is_final() {
            debug!(?outcome, "incremental driver stopped");
            return;
        }
    }
}

// A listener panicking on the driving task must not wedge readers.
fn lock(parser: &Mutex<IncrementalParser>) -> MutexGuard<'_, IncrementalParser> {
    parser.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::time::Duration;

    use super::*;
    use crate::error::DriverError;
    use crate::ticker::{IntervalTicks, YieldTicks};
    use bif_decoder::parse_complete;
    use tokio::sync::mpsc;

    const INPUT: &str = ":b name 6\nJohnny\n:i age 32\n:i age 33";

    /// Ticks only when the test sends one.
    struct ManualTicks(mpsc::UnboundedReceiver<()>);

    impl TickSource for ManualTicks {
        fn next_tick(&mut self) -> impl Future<Output = ()> + Send {
            async move {
                if self.0.recv().await.is_none() {
                    std::future::pending::<()>().await;
                }
            }
        }
    }

    fn manual(
        input: &'static str,
    ) -> (
        IncrementalHandle,
        mpsc::UnboundedSender<()>,
        mpsc::UnboundedReceiver<ParseUpdate>,
    ) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let (change_tx, change_rx) = mpsc::unbounded_channel();
        let mut parser = IncrementalParser::new(input);
        parser.on_change(move |update| {
            let _ = change_tx.send(update.clone());
        });
        let handle = IncrementalHandle::spawn(parser, ManualTicks(tick_rx));
        (handle, tick_tx, change_rx)
    }

    #[tokio::test]
    async fn yield_ticks_run_to_completion() {
        let handle = create_incremental_parser(INPUT, YieldTicks);
        let expected = parse_complete(INPUT).map_err(DriverError::from);
        assert_eq!(handle.wait().await, Some(expected));
    }

    #[tokio::test]
    async fn partial_results_visible_between_ticks() {
        let (handle, ticks, mut changes) = manual(INPUT);
        assert!(handle.current_result().is_none());

        let mut seen = Vec::new();
        for _ in 0..3 {
            ticks.send(()).unwrap();
            let update = changes.recv().await.unwrap();
            assert!(!update.done);
            assert_eq!(handle.current_result(), Some(update.result.clone()));
            seen.push(update.result.unwrap());
        }
        assert_eq!(seen.iter().map(bif_types::Record::len).collect::<Vec<_>>(), [1, 2, 2]);
        assert_eq!(seen[2].get("age"), Some(&bif_types::Field::int("age", 33)));

        ticks.send(()).unwrap();
        let last = changes.recv().await.unwrap();
        assert!(last.done);
        assert!(handle.is_done());
        assert_eq!(handle.ticks(), 4);
        let expected = parse_complete(INPUT).map_err(DriverError::from);
        assert_eq!(last.result, expected);
        assert_eq!(handle.wait().await, Some(expected));
    }

    #[tokio::test]
    async fn cancel_mid_parse() {
        let (handle, ticks, mut changes) = manual(INPUT);
        ticks.send(()).unwrap();
        changes.recv().await.unwrap();
        assert!(matches!(handle.current_result(), Some(Ok(_))));

        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(!handle.is_done());
        assert_eq!(handle.current_result(), Some(Err(DriverError::Cancelled)));

        let _ = ticks.send(());
        assert_eq!(handle.wait().await, Some(Err(DriverError::Cancelled)));
    }

    #[tokio::test]
    async fn cancel_before_first_tick() {
        let (handle, _ticks, _changes) = manual(INPUT);
        handle.cancel();
        assert_eq!(handle.ticks(), 0);
        assert_eq!(handle.wait().await, Some(Err(DriverError::Cancelled)));
    }

    #[tokio::test]
    async fn late_listener_sees_remaining_ticks() {
        let (handle, ticks, mut early) = manual(":i a 1\n:i b 2\n");
        ticks.send(()).unwrap();
        early.recv().await.unwrap();

        let (late_tx, mut late) = mpsc::unbounded_channel();
        handle.on_change(move |_| {
            let _ = late_tx.send(());
        });
        ticks.send(()).unwrap();
        ticks.send(()).unwrap();
        let _ = handle.wait().await;

        let mut late_count = 0;
        while late.try_recv().is_ok() {
            late_count += 1;
        }
        assert_eq!(late_count, 2);
    }

    #[tokio::test]
    async fn decode_failure_surfaces_through_handle() {
        let handle = create_incremental_parser(":i a 1\n:i b \n", YieldTicks);
        assert!(matches!(
            handle.wait().await,
            Some(Err(DriverError::Decode(_)))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn interval_ticks_pace_the_parse() {
        let start = tokio::time::Instant::now();
        let handle = create_incremental_parser(":i a 1\n:i b 2", IntervalTicks::new(Duration::from_millis(10)));
        let result = handle.wait().await.unwrap().unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(start.elapsed(), Duration::from_millis(20));
    }
}
