//! Authored timeline: snapshot loading, the ready gate, and looped playback.
//!
//! A [`Project`] is built once from a serialized snapshot. Its sheets hand out
//! [`SheetSequence`]s that may only start playing after the project's
//! one-shot [`ReadySignal`] has fired. Playback runs on the sequence's own
//! [`Clock`]; the frame loop only queries the position.

use crate::error::TimelineError;
use fnv::FnvHashMap;
use futures::channel::oneshot;
use futures::future::{FutureExt, Shared};
use serde::Deserialize;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::num::NonZeroU32;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

// Sequence length used by sheets that carry no sequence block.
const DEFAULT_SEQUENCE_LENGTH: f64 = 10.0;

// ---------------- Snapshot ----------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSnapshot {
    pub definition_version: String,
    #[serde(default)]
    pub revision_history: Vec<String>,
    pub sheets_by_id: FnvHashMap<String, SheetState>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetState {
    #[serde(default)]
    pub static_overrides: serde_json::Value,
    #[serde(default)]
    pub sequence: Option<SequenceState>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceState {
    pub length: f64,
    #[serde(default)]
    pub sub_units_per_unit: Option<u32>,
    /// Keyframe data; kept opaque.
    #[serde(default)]
    pub tracks_by_object: serde_json::Value,
}

impl TimelineSnapshot {
    pub fn parse(json: &str) -> Result<Self, TimelineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Length in seconds of a sheet's sequence.
    pub fn sequence_length(&self, sheet: &str) -> Result<f64, TimelineError> {
        let state = self
            .sheets_by_id
            .get(sheet)
            .ok_or_else(|| TimelineError::MissingSheet(sheet.to_string()))?;
        Ok(state
            .sequence
            .as_ref()
            .map_or(DEFAULT_SEQUENCE_LENGTH, |s| s.length))
    }
}

// ---------------- Ready gate ----------------

/// Fires the paired [`ReadySignal`] once.
pub struct ReadyTrigger {
    tx: Option<oneshot::Sender<()>>,
    fired: Rc<Cell<bool>>,
}

impl ReadyTrigger {
    /// Returns `false` if the trigger had already fired.
    pub fn fire(&mut self) -> bool {
        match self.tx.take() {
            Some(tx) => {
                self.fired.set(true);
                _ = tx.send(());
                true
            }
            None => false,
        }
    }
}

/// One-shot readiness future. Clones resolve together.
#[derive(Clone)]
pub struct ReadySignal {
    rx: Shared<oneshot::Receiver<()>>,
    fired: Rc<Cell<bool>>,
}

impl ReadySignal {
    pub fn is_ready(&self) -> bool {
        self.fired.get()
    }
}

impl Future for ReadySignal {
    type Output = Result<(), TimelineError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.rx.poll_unpin(cx) {
            Poll::Ready(Ok(())) => Poll::Ready(Ok(())),
            Poll::Ready(Err(_)) => Poll::Ready(Err(TimelineError::SetupAbandoned)),
            Poll::Pending => Poll::Pending,
        }
    }
}

pub fn ready_gate() -> (ReadyTrigger, ReadySignal) {
    let (tx, rx) = oneshot::channel();
    let fired = Rc::new(Cell::new(false));
    (
        ReadyTrigger {
            tx: Some(tx),
            fired: fired.clone(),
        },
        ReadySignal {
            rx: rx.shared(),
            fired,
        },
    )
}

// ---------------- Playback ----------------

/// Time source for playback, in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Clock advanced by hand.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }

    pub fn set(&self, t: f64) {
        self.now.set(t);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayRange {
    from: f64,
    to: f64,
}

impl PlayRange {
    pub fn new(from: f64, to: f64) -> Result<Self, TimelineError> {
        if !(from.is_finite() && to.is_finite() && from >= 0.0 && to > from) {
            return Err(TimelineError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    #[inline]
    pub fn start(&self) -> f64 {
        self.from
    }

    #[inline]
    pub fn end(&self) -> f64 {
        self.to
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.to - self.from
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterationCount {
    Infinite,
    Finite(NonZeroU32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayOptions {
    pub range: PlayRange,
    pub iterations: IterationCount,
    pub rate: f64,
}

impl PlayOptions {
    /// Repeat `range` forever at normal speed.
    pub fn looping(range: PlayRange) -> Self {
        Self {
            range,
            iterations: IterationCount::Infinite,
            rate: 1.0,
        }
    }

    pub fn once(range: PlayRange) -> Self {
        Self {
            range,
            iterations: IterationCount::Finite(NonZeroU32::MIN),
            rate: 1.0,
        }
    }
}

/// Sequence position after `elapsed` seconds of playback.
///
/// Infinite playback wraps from `to` back to `from`; finite playback parks on
/// `to` once its iterations are used up. The result never leaves the range.
pub fn position_at(options: &PlayOptions, elapsed: f64) -> f64 {
    let range = options.range;
    let len = range.duration();
    let t = elapsed.max(0.0) * options.rate;
    if let IterationCount::Finite(n) = options.iterations {
        if t >= len * f64::from(n.get()) {
            return range.end();
        }
    }
    (range.start() + t.rem_euclid(len)).min(range.end())
}

/// An authored animation sequence that can be started once its project is
/// ready. No stop is exposed; playback ends with the owner.
pub trait Sequencer {
    fn ready(&self) -> ReadySignal;

    fn is_ready(&self) -> bool {
        self.ready().is_ready()
    }

    /// Start (or restart) playback. Fails with [`TimelineError::NotReady`]
    /// before readiness, leaving the sequence stopped.
    fn play(&mut self, options: PlayOptions) -> Result<(), TimelineError>;

    /// Current position in seconds, `None` until playback has started.
    fn position(&self) -> Option<f64>;
}

#[derive(Clone, Copy, Debug)]
struct Playback {
    options: PlayOptions,
    started_at: f64,
}

/// Playback head over one sheet of a [`Project`].
pub struct SheetSequence<C: Clock> {
    sheet: String,
    length: f64,
    ready: ReadySignal,
    clock: C,
    playback: Option<Playback>,
}

impl<C: Clock> SheetSequence<C> {
    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    pub fn length(&self) -> f64 {
        self.length
    }
}

impl<C: Clock> Sequencer for SheetSequence<C> {
    fn ready(&self) -> ReadySignal {
        self.ready.clone()
    }

    fn play(&mut self, options: PlayOptions) -> Result<(), TimelineError> {
        if !self.ready.is_ready() {
            log::warn!("[timeline] play on '{}' before ready; ignored", self.sheet);
            return Err(TimelineError::NotReady);
        }
        let range = options.range;
        if range.end() > self.length {
            return Err(TimelineError::InvalidRange {
                from: range.start(),
                to: range.end(),
            });
        }
        if !(options.rate.is_finite() && options.rate > 0.0) {
            return Err(TimelineError::InvalidRate(options.rate));
        }
        if self.playback.is_some() {
            log::debug!("[timeline] restarting '{}'", self.sheet);
        }
        self.playback = Some(Playback {
            options,
            started_at: self.clock.now(),
        });
        log::info!(
            "[timeline] '{}' playing [{:.2}, {:.2}] {:?}",
            self.sheet,
            range.start(),
            range.end(),
            options.iterations
        );
        Ok(())
    }

    fn position(&self) -> Option<f64> {
        self.playback
            .map(|p| position_at(&p.options, self.clock.now() - p.started_at))
    }
}

// ---------------- Project ----------------

/// A timeline project loaded from a snapshot.
pub struct Project {
    id: String,
    snapshot: TimelineSnapshot,
    trigger: RefCell<ReadyTrigger>,
    ready: ReadySignal,
}

impl Project {
    /// Decode the snapshot. Malformed data is a fatal error.
    pub fn from_snapshot(id: impl Into<String>, json: &str) -> Result<Self, TimelineError> {
        let snapshot = TimelineSnapshot::parse(json)?;
        let (trigger, ready) = ready_gate();
        let id = id.into();
        log::info!(
            "[timeline] project '{}' loaded: {} sheet(s), definition {}",
            id,
            snapshot.sheets_by_id.len(),
            snapshot.definition_version
        );
        Ok(Self {
            id,
            snapshot,
            trigger: RefCell::new(trigger),
            ready,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn snapshot(&self) -> &TimelineSnapshot {
        &self.snapshot
    }

    pub fn ready(&self) -> ReadySignal {
        self.ready.clone()
    }

    /// Validate every sheet and fire the ready signal. Calling it again after
    /// success is a no-op.
    ///
    /// Runs on the caller's executor; sequences waiting on [`Project::ready`]
    /// resume once it completes.
    pub async fn setup(&self) -> Result<(), TimelineError> {
        for (name, sheet) in &self.snapshot.sheets_by_id {
            if let Some(seq) = &sheet.sequence {
                if !(seq.length.is_finite() && seq.length > 0.0) {
                    return Err(TimelineError::InvalidRange {
                        from: 0.0,
                        to: seq.length,
                    });
                }
                log::debug!("[timeline] sheet '{}' length {:.2}s", name, seq.length);
            }
        }
        if self.trigger.borrow_mut().fire() {
            log::info!("[timeline] project '{}' ready", self.id);
        }
        Ok(())
    }

    pub fn sheet<C: Clock>(&self, name: &str, clock: C) -> Result<SheetSequence<C>, TimelineError> {
        let length = self.snapshot.sequence_length(name)?;
        Ok(SheetSequence {
            sheet: name.to_string(),
            length,
            ready: self.ready(),
            clock,
            playback: None,
        })
    }
}

/// Wait for the sequence's ready signal, then start playback.
///
/// This is the only sanctioned way to start a sequence: it never polls and
/// never blocks the caller's frame loop.
pub async fn start_when_ready<S: Sequencer>(
    seq: Rc<RefCell<S>>,
    options: PlayOptions,
) -> Result<(), TimelineError> {
    let ready = seq.borrow().ready();
    ready.await?;
    seq.borrow_mut().play(options)
}
