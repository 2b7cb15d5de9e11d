use std::fmt;
use std::sync::Arc;

use bif_decoder::{ParseProcess, ParseResult};
use bif_types::Record;
use bytes::Bytes;
use tracing::{debug, trace};

use crate::error::DriverError;

/// What a polled driver exposes to observers: the record so far (or the
/// final record), a decode failure, or cancellation.
pub type DriverResult = Result<Record, DriverError>;

/// What a change listener is handed after a tick that made progress.
///
/// A copy taken when the tick landed, so a listener never needs to reach
/// back into the parser that is notifying it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseUpdate {
    /// `true` when this tick ended the parse.
    pub done: bool,
    /// The record so far, the final record, or the decode failure.
    pub result: DriverResult,
}

/// Change listener, called with the [`ParseUpdate`] of every tick that
/// made progress.
pub type Listener = Arc<dyn Fn(&ParseUpdate) + Send + Sync>;

/// What a single [`IncrementalParser::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// One field was decoded; more ticks are needed.
    Progressed,
    /// This tick moved the parse into a terminal state. No further ticks
    /// should be scheduled.
    Finished,
    /// Nothing happened: the parse was already terminal or cancelled.
    Idle,
}

impl TickOutcome {
    /// `true` when the tick source should stop.
    #[must_use]
    pub fn is_final(self) -> bool {
        !matches!(self, Self::Progressed)
    }
}

/// Polled, cancellable parse driver.
///
/// Designed for a consumer that steps the parse from an external clock
/// (a UI frame timer, a tokio interval, a test calling [`tick`](Self::tick)
/// by hand). Each tick resumes the underlying [`ParseProcess`] by exactly
/// one step and notifies the registered listeners. Between ticks, the most
/// recent result stays readable.
///
/// Observable states through [`current_result`](Self::current_result):
///
/// ```text
/// ┌──────────────────────────────┬─────────────────────────────────────┐
/// │ Return value                 │ Meaning                             │
/// ├──────────────────────────────┼─────────────────────────────────────┤
/// │ None                         │ Not ticked yet, no result           │
/// │ Some(Ok(record)), !is_done() │ Partial record, still parsing       │
/// │ Some(Ok(record)),  is_done() │ Final record                        │
/// │ Some(Err(Decode(e)))         │ Terminal decode failure             │
/// │ Some(Err(Cancelled))         │ cancel() was called; always wins    │
/// └──────────────────────────────┴─────────────────────────────────────┘
/// ```
///
/// This type does no scheduling of its own. See
/// [`IncrementalHandle`](crate::IncrementalHandle) for a version that
/// ticks itself from a [`TickSource`](crate::TickSource) on a tokio task.
pub struct IncrementalParser {
    process: ParseProcess,
    latest: Option<ParseResult>,
    listeners: Vec<Listener>,
    cancelled: bool,
    ticks: usize,
}

impl IncrementalParser {
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self {
            process: ParseProcess::new(buf),
            latest: None,
            listeners: Vec::new(),
            cancelled: false,
            ticks: 0,
        }
    }

    /// Resume the parse one step and notify listeners.
    ///
    /// Listeners run synchronously, before this returns, and get the new
    /// state as a [`ParseUpdate`]. Use [`advance`](Self::advance),
    /// [`update`](Self::update) and [`listeners`](Self::listeners) when
    /// notifications need to happen outside the borrow.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.advance();
        let update = if outcome == TickOutcome::Idle {
            None
        } else {
            self.update()
        };
        if let Some(update) = update {
            for listener in &self.listeners {
                listener(&update);
            }
        }
        outcome
    }

    /// Resume the parse one step without notifying anyone.
    pub fn advance(&mut self) -> TickOutcome {
        if self.cancelled || self.process.is_done() {
            return TickOutcome::Idle;
        }

        self.ticks += 1;
        let step = self.process.resume();
        trace!(tick = self.ticks, done = step.done, "incremental tick");
        self.latest = Some(step.snapshot);

        if step.done {
            debug!(ticks = self.ticks, ok = self.succeeded(), "incremental parse reached terminal state");
            TickOutcome::Finished
        } else {
            TickOutcome::Progressed
        }
    }

    /// `true` once the underlying parse is terminal.
    ///
    /// Cancellation does not make a parse "done": a cancelled parse that
    /// had not finished stays not-done, but will never tick again.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.process.is_done()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// `true` when no further ticks will do anything.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.cancelled || self.is_done()
    }

    /// The most recent result, or the cancellation error after
    /// [`cancel`](Self::cancel).
    #[must_use]
    pub fn current_result(&self) -> Option<DriverResult> {
        if self.cancelled {
            return Some(Err(DriverError::Cancelled));
        }
        self.latest
            .clone()
            .map(|result| result.map_err(DriverError::from))
    }

    /// The state a listener would be handed right now. `None` before the
    /// first tick and after [`cancel`](Self::cancel).
    #[must_use]
    pub fn update(&self) -> Option<ParseUpdate> {
        if self.cancelled {
            return None;
        }
        let result = self.latest.clone()?.map_err(DriverError::from);
        Some(ParseUpdate {
            done: self.is_done(),
            result,
        })
    }

    /// Register a listener to be called after every tick that made
    /// progress. Listeners registered late are not replayed past ticks.
    pub fn on_change(&mut self, listener: impl Fn(&ParseUpdate) + Send + Sync + 'static) {
        self.listeners.push(Arc::new(listener));
    }

    /// Shared handles to the registered listeners.
    #[must_use]
    pub fn listeners(&self) -> Vec<Listener> {
        self.listeners.clone()
    }

    /// Stop ticking and poison every later read.
    ///
    /// Idempotent. Listeners that already ran keep whatever they saw;
    /// nothing is notified about the cancellation itself.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            debug!(ticks = self.ticks, done = self.is_done(), "parse cancelled");
        }
        self.cancelled = true;
    }

    /// Number of ticks that made progress.
    #[must_use]
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    fn succeeded(&self) -> bool {
        matches!(self.latest, Some(Ok(_)))
    }
}

impl fmt::Debug for IncrementalParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncrementalParser")
            .field("process", &self.process)
            .field("latest", &self.latest)
            .field("listeners", &self.listeners.len())
            .field("cancelled", &self.cancelled)
            .field("ticks", &self.ticks)
            .finish()
    }
}
