use bif_types::{Field, Record};
use bif_wire::{ByteCursor, DecodeError};
use bytes::Bytes;
use tracing::{debug, trace};

use crate::field_decoder::decode_field;

/// Outcome of a parse: the decoded record, or the first decode error.
///
/// An `Err` never comes with partial data; fields decoded before the
/// failure are dropped along with the process.
pub type ParseResult = Result<Record, DecodeError>;

/// State of a [`ParseProcess`].
///
/// ```text
///             resume: field decoded
///              ┌──────────────┐
///              ▼              │
///   ┌─────────────────────────┴──┐  offset ≥ len   ┌────────────────────┐
///   │ Running { offset, record } ├────────────────▶│ Succeeded(record)  │
///   └─────────────┬──────────────┘                 └────────────────────┘
///                 │ decode error                   ┌────────────────────┐
///                 └───────────────────────────────▶│ Failed(error)      │
///                                                  └────────────────────┘
/// ```
///
/// `Succeeded` and `Failed` are terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseState {
    Running { offset: usize, record: Record },
    Succeeded(Record),
    Failed(DecodeError),
}

/// What a single [`ParseProcess::resume`] call hands back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// The record decoded so far (or the final record / error once
    /// `done` is set). Always an owned copy; mutating it does not touch
    /// the process.
    pub snapshot: ParseResult,
    /// `true` once the process has reached a terminal state.
    pub done: bool,
}

/// Resumable BI format parse, one field per step.
///
/// The process owns a cheap handle on the input buffer, the committed
/// cursor offset, and the record being built. Nothing happens until the
/// caller asks for it: each [`resume`](Self::resume) decodes exactly one
/// field (or notices the end of the buffer) and returns. That makes the
/// step boundary the only place a driver can pause, cancel, or interleave
/// other work, and bounds how long any single call can run.
///
/// ```text
///   buffer:  :b name 6\nJohnny\n:i age 32
///            └────── step 1 ──────┘└─ 2 ─┘  step 3: end of buffer → done
/// ```
///
/// Drivers built on top:
///
/// - [`BifDecoder::decode`](crate::BifDecoder::decode): resume until done.
/// - [`parse_cooperative`](crate::parse_cooperative): yield to the async
///   runtime between steps.
/// - `bif_driver::IncrementalParser`: one step per external tick, with
///   cancellation and observable partial results.
///
/// # Example
///
/// ```rust
/// use bif_decoder::ParseProcess;
///
/// let mut process = ParseProcess::new(":i a 1\n:i b 2");
///
/// let step = process.resume();
/// assert!(!step.done);
/// assert_eq!(step.snapshot.unwrap().len(), 1);
///
/// process.resume();
/// let last = process.resume();
/// assert!(last.done);
/// assert_eq!(last.snapshot.unwrap().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ParseProcess {
    buf: Bytes,
    state: ParseState,
    steps: usize,
    last_name: Option<String>,
}

impl ParseProcess {
    /// Create a process over `buf`, in `Running { offset: 0 }` with an empty
    /// record. No decoding happens until the first resume.
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self {
            buf: buf.into(),
            state: ParseState::Running {
                offset: 0,
                record: Record::new(),
            },
            steps: 0,
            last_name: None,
        }
    }

    /// Perform one transition and return a snapshot of the result.
    ///
    /// On a terminal process this does nothing and returns the same
    /// terminal snapshot every time.
    pub fn resume(&mut self) -> Step {
        self.step();
        self.current()
    }

    /// Perform one transition without building a snapshot.
    ///
    /// Returns `true` once the process is terminal. Drivers that never
    /// expose intermediate state use this to avoid copying the record
    /// after every field.
    pub fn step(&mut self) -> bool {
        let transition = match &mut self.state {
            ParseState::Running { offset, record } => {
                self.steps += 1;
                Self::advance(&self.buf, offset, record, self.steps, &mut self.last_name)
            }
            ParseState::Succeeded(_) | ParseState::Failed(_) => None,
        };

        if let Some(terminal) = transition {
            self.state = terminal;
        }
        self.is_done()
    }

    /// Decode one field at `offset` into `record`.
    ///
    /// Returns `Some` with the terminal state to move to, or `None` to
    /// stay running.
    fn advance(
        buf: &Bytes,
        offset: &mut usize,
        record: &mut Record,
        step: usize,
        last_name: &mut Option<String>,
    ) -> Option<ParseState> {
        if *offset >= buf.len() {
            debug!(step, fields = record.len(), "parse finished");
            return Some(ParseState::Succeeded(std::mem::take(record)));
        }

        let mut cursor = ByteCursor::at(buf, *offset);
        match decode_field(buf, &mut cursor) {
            Ok(field) => {
                trace!(
                    step,
                    offset = *offset,
                    name = field.name(),
                    kind = field.field_type().display_name(),
                    "decoded field"
                );
                *last_name = Some(field.name().to_string());
                record.insert(field);
                *offset = cursor.position();
                None
            }
            Err(error) => {
                debug!(step, offset = error.offset(), %error, "parse failed");
                Some(ParseState::Failed(error))
            }
        }
    }

    /// Snapshot of the current state without advancing.
    #[must_use]
    pub fn current(&self) -> Step {
        match &self.state {
            ParseState::Running { record, .. } => Step {
                snapshot: Ok(record.clone()),
                done: false,
            },
            ParseState::Succeeded(record) => Step {
                snapshot: Ok(record.clone()),
                done: true,
            },
            ParseState::Failed(error) => Step {
                snapshot: Err(error.clone()),
                done: true,
            },
        }
    }

    /// The field decoded by the most recent step, as it now stands in the
    /// record. `None` before the first field and after a failure.
    #[must_use]
    pub fn last_field(&self) -> Option<&Field> {
        let name = self.last_name.as_deref()?;
        match &self.state {
            ParseState::Running { record, .. } | ParseState::Succeeded(record) => record.get(name),
            ParseState::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ParseState {
        &self.state
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        !matches!(self.state, ParseState::Running { .. })
    }

    /// Committed cursor offset. Terminal processes report the buffer
    /// length on success and the failing offset on error.
    #[must_use]
    pub fn offset(&self) -> usize {
        match &self.state {
            ParseState::Running { offset, .. } => *offset,
            ParseState::Succeeded(_) => self.buf.len(),
            ParseState::Failed(error) => error.offset(),
        }
    }

    /// Number of transitions performed so far, terminal one included.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[must_use]
    pub fn buffer(&self) -> &Bytes {
        &self.buf
    }

    /// Drive the process to its terminal state and return the result,
    /// consuming the process.
    pub fn finish(mut self) -> ParseResult {
        while !self.step() {}
        match self.state {
            ParseState::Succeeded(record) => Ok(record),
            ParseState::Failed(error) => Err(error),
            ParseState::Running { .. } => unreachable!("step() returned true while running"),
        }
    }

    /// Iterate over the remaining steps, ending after the terminal one.
    pub fn steps_iter(&mut self) -> Steps<'_> {
        Steps {
            process: self,
            finished: false,
        }
    }
}

/// Iterator returned by [`ParseProcess::steps_iter`].
///
/// Yields one [`Step`] per resumption, the last one with `done == true`,
/// then stops.
#[derive(Debug)]
pub struct Steps<'a> {
    process: &'a mut ParseProcess,
    finished: bool,
}

impl Iterator for Steps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.finished {
            return None;
        }
        let step = self.process.resume();
        self.finished = step.done;
        Some(step)
    }
}
