//! Authored timeline wiring for the browser.

use card_core::{
    start_when_ready, Clock, PlayOptions, PlayRange, Project, Sequencer, SheetSequence,
    TimelineError, TIMELINE_LOOP_FROM, TIMELINE_LOOP_TO, TIMELINE_PROJECT, TIMELINE_SHEET,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

static STATE_JSON: &str = include_str!("../assets/timeline/state.json");

/// Wall clock in seconds since the clock was created.
#[derive(Clone, Copy, Debug)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

pub type MainSequence = SheetSequence<InstantClock>;

/// Load the embedded project, queue looped playback behind its ready gate,
/// then run setup.
///
/// Playback only starts once setup has fired the ready signal; the frame loop
/// keeps running meanwhile.
pub fn start_authored_sequence() -> Result<Rc<RefCell<MainSequence>>, TimelineError> {
    let project = Rc::new(Project::from_snapshot(TIMELINE_PROJECT, STATE_JSON)?);
    let seq = Rc::new(RefCell::new(
        project.sheet(TIMELINE_SHEET, InstantClock::new())?,
    ));
    let options = PlayOptions::looping(PlayRange::new(TIMELINE_LOOP_FROM, TIMELINE_LOOP_TO)?);

    let seq_play = seq.clone();
    spawn_local(async move {
        if let Err(e) = start_when_ready(seq_play, options).await {
            log::error!("[timeline] playback not started: {}", e);
        }
    });

    let project_setup = project.clone();
    spawn_local(async move {
        if let Err(e) = project_setup.setup().await {
            log::error!("[timeline] setup failed: {}", e);
        }
    });

    log::info!(
        "[timeline] '{}' waiting for ready (ready now: {})",
        seq.borrow().sheet(),
        seq.borrow().is_ready()
    );
    Ok(seq)
}
