// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playback controller.
//!
//! Owns at most one live `Session`. Starting builds a fresh session and
//! arms one trigger per scheduled event; stopping, finishing, or starting
//! again always flushes every pending trigger of the previous session
//! first, so two sessions can never interleave.
//!
//! The controller is single-threaded and never sleeps. A host calls
//! `poll()` whenever `next_deadline()` has passed (see `driver` for a
//! tokio loop that does this).

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use super::scheduler::{
    schedule_with, ChordIntro, EventKind, Schedule, ScheduleTiming, ScheduledEvent,
};
use super::timer::TimerQueue;
use crate::display::{DisplayFrame, KeyboardView};
use crate::error::{ConfigurationError, Result};
use crate::exercise::{DisplayRange, ExerciseDefinition, VocalRange};
use crate::expansion::{expand, project, SequenceInstance};
use crate::instrument::Instrument;
use crate::music::Pitch;
use crate::timing::{Clock, SystemClock, Tempo};

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

/// Result of a `start()` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new session is playing
    Started,
    /// Ignored: a session is already playing
    AlreadyPlaying,
    /// Ignored: the instrument is still loading
    NotReady,
    /// Ignored: nothing has been requested yet
    NoRequest,
}

/// Parameters a session is built from.
///
/// Read fresh on every `start()`, so changes made during playback apply
/// from the next loop boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRequest {
    pub exercise: ExerciseDefinition,
    pub vocal_range: VocalRange,
    pub tempo: Tempo,
    pub override_rhythm: Option<Vec<f64>>,
    pub chord_intro: bool,
    pub looping: bool,
}

impl PlaybackRequest {
    /// Expand the exercise from the vocal root
    pub fn instances(&self) -> Result<Vec<SequenceInstance>> {
        expand(&self.exercise, self.vocal_range.root, self.override_rhythm.as_deref())
    }

    /// Keyboard window needed by this request
    pub fn display_range(&self) -> Result<DisplayRange> {
        project(&self.exercise, self.vocal_range.root, self.vocal_range.display)
    }

    fn chord(&self) -> Option<ChordIntro> {
        self.chord_intro.then(|| ChordIntro::new(self.exercise.chord))
    }
}

/// One playback run: the full event list plus its pending triggers
#[derive(Debug)]
pub struct Session {
    generation: u64,
    origin: Instant,
    looping: bool,
    instances: Vec<SequenceInstance>,
    schedule: Schedule,
    display_range: DisplayRange,
    timers: TimerQueue<usize>,
}

impl Session {
    /// Build a session and arm its triggers relative to `origin`
    pub fn build(
        request: &PlaybackRequest,
        timing: &ScheduleTiming,
        generation: u64,
        origin: Instant,
    ) -> Result<Self> {
        let instances = request.instances()?;
        let display_range = request.display_range()?;
        let schedule = schedule_with(timing, &instances, request.tempo.bpm(), request.chord())?;
        // A zero-length loop would restart at the instant it ends, forever
        if request.looping && schedule.total_duration_millis == 0 {
            return Err(ConfigurationError::EmptyLoop {
                exercise: request.exercise.id.clone(),
            });
        }

        let mut timers = TimerQueue::with_capacity(schedule.len());
        for (index, event) in schedule.events.iter().enumerate() {
            timers.arm(origin + Duration::from_millis(event.at_millis), index);
        }

        Ok(Self {
            generation,
            origin,
            looping: request.looping,
            instances,
            schedule,
            display_range,
            timers,
        })
    }

    /// Sequence number of this session, starting at 1
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Instant the schedule's offsets are measured from
    pub fn origin(&self) -> Instant {
        self.origin
    }

    /// Loop flag captured when the session was built
    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn instances(&self) -> &[SequenceInstance] {
        &self.instances
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn display_range(&self) -> DisplayRange {
        self.display_range
    }

    /// Triggers not yet fired
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Instant the `SessionEnd` trigger is due
    pub fn ends_at(&self) -> Instant {
        self.origin + Duration::from_millis(self.schedule.total_duration_millis)
    }
}

/// Default note loudness
pub const DEFAULT_VELOCITY: f32 = 0.8;

/// Idle/Playing state machine driving one instrument and one view
pub struct PlaybackController<I, V, C = SystemClock> {
    instrument: I,
    view: V,
    clock: C,
    timing: ScheduleTiming,
    velocity: f32,
    request: Option<PlaybackRequest>,
    state: PlaybackState,
    session: Option<Session>,
    generation: u64,
    active: BTreeSet<Pitch>,
    text: Option<String>,
    range: Option<DisplayRange>,
}

impl<I: Instrument, V: KeyboardView, C: Clock> PlaybackController<I, V, C> {
    pub fn new(instrument: I, view: V, clock: C) -> Self {
        Self {
            instrument,
            view,
            clock,
            timing: ScheduleTiming::default(),
            velocity: DEFAULT_VELOCITY,
            request: None,
            state: PlaybackState::Idle,
            session: None,
            generation: 0,
            active: BTreeSet::new(),
            text: None,
            range: None,
        }
    }

    /// Use custom scheduler timing for sessions built from now on
    pub fn with_timing(mut self, timing: ScheduleTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Set note velocity (0.0 - 1.0)
    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity.clamp(0.0, 1.0);
    }

    /// Replace the parameters the next session will be built from.
    ///
    /// The request is validated here so that `start()` cannot fail on it
    /// later. A playing session is left untouched.
    pub fn set_request(&mut self, request: PlaybackRequest) -> Result<()> {
        Session::build(&request, &self.timing, self.generation, self.clock.now())?;

        debug!(
            exercise = %request.exercise.id,
            tempo = request.tempo.bpm(),
            "playback request updated"
        );
        self.request = Some(request);
        Ok(())
    }

    pub fn request(&self) -> Option<&PlaybackRequest> {
        self.request.as_ref()
    }

    /// Start a new session from the current request.
    ///
    /// No-op while playing, while the instrument is not ready, or before
    /// any request was set.
    pub fn start(&mut self) -> Result<StartOutcome> {
        if self.state == PlaybackState::Playing {
            debug!("start ignored: already playing");
            return Ok(StartOutcome::AlreadyPlaying);
        }
        if !self.instrument.ready() {
            debug!("start ignored: instrument not ready");
            return Ok(StartOutcome::NotReady);
        }
        let Some(request) = self.request.as_ref() else {
            debug!("start ignored: no playback request");
            return Ok(StartOutcome::NoRequest);
        };

        let origin = self.clock.now();
        let session = Session::build(request, &self.timing, self.generation + 1, origin)?;
        info!(
            generation = session.generation,
            exercise = %request.exercise.id,
            instances = session.instances.len(),
            events = session.schedule.len(),
            duration_ms = session.schedule.total_duration_millis,
            looping = session.looping,
            "session started"
        );

        self.flush();
        self.generation = session.generation;
        self.range = Some(session.display_range);
        self.session = Some(session);
        self.state = PlaybackState::Playing;
        self.clear_display();
        Ok(StartOutcome::Started)
    }

    /// Cancel every pending trigger and return to idle.
    ///
    /// Calling `stop()` while idle changes nothing.
    pub fn stop(&mut self) {
        if self.state == PlaybackState::Idle && self.session.is_none() {
            return;
        }

        self.flush();
        self.instrument.release_all();
        self.state = PlaybackState::Idle;
        self.clear_display();
        info!(generation = self.generation, "playback stopped");
    }

    /// Fire every trigger that is due; returns how many fired.
    ///
    /// Triggers of a session restarted by looping during this call wait
    /// for the next `poll()`.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        let generation = self.generation;
        let mut fired = 0;

        loop {
            let Some(session) = self.session.as_mut() else {
                break;
            };
            if session.generation != generation {
                break;
            }
            let Some(trigger) = session.timers.pop_due(now) else {
                break;
            };
            let event = session.schedule.events[trigger.payload].clone();
            let looping = session.looping;

            fired += 1;
            self.apply(&event, looping);
        }

        fired
    }

    fn apply(&mut self, event: &ScheduledEvent, looping: bool) {
        trace!(
            at_ms = event.at_millis,
            kind = ?event.kind,
            pitches = ?event.pitches,
            "event fired"
        );

        match event.kind {
            EventKind::NoteOn | EventKind::ChordOn => {
                let seconds = event.duration_millis as f64 / 1000.0;
                for &pitch in &event.pitches {
                    self.active.insert(pitch);
                    self.instrument.trigger_note(pitch, self.velocity, seconds);
                }
                if event.kind == EventKind::NoteOn {
                    self.text = event.text.clone();
                }
            }
            EventKind::NoteOff | EventKind::ChordOff => {
                for &pitch in &event.pitches {
                    self.active.remove(&pitch);
                    self.instrument.release_note(pitch);
                }
            }
            EventKind::SyllableUpdate => {
                self.text = event.text.clone();
            }
            EventKind::SessionEnd => {
                self.finish(looping);
                return;
            }
        }

        self.render();
    }

    fn finish(&mut self, looping: bool) {
        self.flush();
        self.state = PlaybackState::Idle;
        self.clear_display();
        info!(generation = self.generation, looping, "session finished");

        if looping {
            match self.start() {
                Ok(StartOutcome::Started) => {}
                Ok(outcome) => info!(?outcome, "loop did not restart"),
                Err(e) => warn!(error = %e, "loop restart failed"),
            }
        }
    }

    /// Drop the live session and everything still armed in it
    fn flush(&mut self) {
        if let Some(mut session) = self.session.take() {
            let dropped = session.timers.clear();
            if dropped > 0 {
                debug!(generation = session.generation, dropped, "flushed pending triggers");
            }
        }
    }

    fn clear_display(&mut self) {
        self.active.clear();
        self.text = None;
        self.render();
    }

    fn render(&mut self) {
        let frame = self.frame();
        self.view.render(&frame);
    }

    /// Current display state
    pub fn frame(&self) -> DisplayFrame {
        DisplayFrame {
            active: self.active.clone(),
            text: self.text.clone(),
            range: self.range,
        }
    }

    /// Earliest pending trigger deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.as_ref().and_then(|s| s.timers.next_deadline())
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// The live session, if any
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Number of sessions started so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn instrument(&self) -> &I {
        &self.instrument
    }

    /// Mutable access for hosts that reload or swap sound sources
    pub fn instrument_mut(&mut self) -> &mut I {
        &mut self.instrument
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::{ExerciseKind, VocalPart};
    use crate::music::ChordQuality;
    use crate::timing::ManualClock;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Trigger(Pitch),
        Release(Pitch),
        ReleaseAll,
    }

    #[derive(Default)]
    struct MockInstrument {
        ready: bool,
        calls: Vec<Call>,
    }

    impl MockInstrument {
        fn loaded() -> Self {
            Self {
                ready: true,
                calls: Vec::new(),
            }
        }

        fn triggered(&self) -> Vec<Pitch> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Trigger(p) => Some(*p),
                    _ => None,
                })
                .collect()
        }
    }

    impl Instrument for MockInstrument {
        fn ready(&self) -> bool {
            self.ready
        }

        fn trigger_note(&mut self, pitch: Pitch, _velocity: f32, _duration_secs: f64) {
            self.calls.push(Call::Trigger(pitch));
        }

        fn release_note(&mut self, pitch: Pitch) {
            self.calls.push(Call::Release(pitch));
        }

        fn release_all(&mut self) {
            self.calls.push(Call::ReleaseAll);
        }
    }

    #[derive(Default)]
    struct FrameLog {
        frames: Vec<DisplayFrame>,
    }

    impl KeyboardView for FrameLog {
        fn render(&mut self, frame: &DisplayFrame) {
            self.frames.push(frame.clone());
        }
    }

    type TestController = PlaybackController<MockInstrument, FrameLog, ManualClock>;

    fn request(kind: ExerciseKind, looping: bool) -> PlaybackRequest {
        PlaybackRequest {
            exercise: ExerciseDefinition {
                id: "steps".to_string(),
                name: "Steps".to_string(),
                kind,
                pattern: vec![0, 2],
                rhythm: vec![1.0, 1.0],
                syllables: vec!["do".into(), "re".into()],
                chord: ChordQuality::Major,
            },
            vocal_range: VocalRange {
                part: VocalPart::Tenor,
                root: 48,
                display: DisplayRange { first: 45, last: 69 },
            },
            // 1 beat = 1000ms
            tempo: Tempo::new(60.0).unwrap(),
            override_rhythm: None,
            chord_intro: false,
            looping,
        }
    }

    fn controller(clock: &ManualClock) -> TestController {
        PlaybackController::new(MockInstrument::loaded(), FrameLog::default(), clock.clone())
    }

    #[test]
    fn test_start_builds_session() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        ctl.set_request(request(ExerciseKind::Static, false)).unwrap();

        assert_eq!(ctl.start().unwrap(), StartOutcome::Started);
        assert!(ctl.is_playing());

        let session = ctl.session().unwrap();
        assert_eq!(session.generation(), 1);
        // syllable + 2 * (on, off) + end
        assert_eq!(session.pending(), 6);
        assert_eq!(
            ctl.next_deadline(),
            Some(session.origin() + Duration::from_millis(100))
        );
    }

    #[test]
    fn test_start_without_request() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        assert_eq!(ctl.start().unwrap(), StartOutcome::NoRequest);
        assert_eq!(ctl.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_start_refused_when_not_ready() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        ctl.set_request(request(ExerciseKind::Static, false)).unwrap();
        ctl.instrument_mut().ready = false;

        assert_eq!(ctl.start().unwrap(), StartOutcome::NotReady);
        assert_eq!(ctl.state(), PlaybackState::Idle);
        assert!(ctl.session().is_none());

        // Readiness is re-checked on every call
        ctl.instrument_mut().ready = true;
        assert_eq!(ctl.start().unwrap(), StartOutcome::Started);
    }

    #[test]
    fn test_start_while_playing_is_noop() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        ctl.set_request(request(ExerciseKind::Static, false)).unwrap();
        ctl.start().unwrap();

        clock.advance_millis(100);
        ctl.poll();
        let pending = ctl.session().unwrap().pending();
        let frames = ctl.view().frames.len();

        assert_eq!(ctl.start().unwrap(), StartOutcome::AlreadyPlaying);
        assert_eq!(ctl.generation(), 1);
        assert_eq!(ctl.session().unwrap().pending(), pending);
        assert_eq!(ctl.view().frames.len(), frames);
    }

    #[test]
    fn test_events_fire_in_time() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        ctl.set_request(request(ExerciseKind::Static, false)).unwrap();
        ctl.start().unwrap();

        assert_eq!(ctl.poll(), 0);

        // Lead-in: syllable update + first NoteOn
        clock.advance_millis(100);
        assert_eq!(ctl.poll(), 2);
        let frame = ctl.frame();
        assert_eq!(frame.active, [48].into_iter().collect());
        assert_eq!(frame.text.as_deref(), Some("do"));
        assert_eq!(frame.range, Some(DisplayRange { first: 45, last: 69 }));

        // First NoteOff at 100 + 800
        clock.advance_millis(800);
        assert_eq!(ctl.poll(), 1);
        assert!(ctl.frame().active.is_empty());

        clock.advance_millis(200);
        assert_eq!(ctl.poll(), 1);
        assert_eq!(ctl.frame().active, [50].into_iter().collect());
        assert_eq!(ctl.frame().text.as_deref(), Some("re"));

        assert_eq!(
            ctl.instrument().calls,
            vec![Call::Trigger(48), Call::Release(48), Call::Trigger(50)]
        );
    }

    #[test]
    fn test_session_end_returns_to_idle() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        ctl.set_request(request(ExerciseKind::Static, false)).unwrap();
        ctl.start().unwrap();

        // 100 lead-in + 2000 notes + 500 pause
        clock.advance_millis(2600);
        assert_eq!(ctl.poll(), 6);
        assert_eq!(ctl.state(), PlaybackState::Idle);
        assert!(ctl.session().is_none());
        assert_eq!(ctl.next_deadline(), None);

        let last = ctl.view().frames.last().unwrap();
        assert!(last.active.is_empty());
        assert_eq!(last.text, None);
    }

    #[test]
    fn test_stop_cancels_pending() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        ctl.set_request(request(ExerciseKind::Ascending { step: 1, iterations: 3 }, false))
            .unwrap();
        ctl.start().unwrap();

        clock.advance_millis(100);
        ctl.poll();
        ctl.stop();

        assert_eq!(ctl.state(), PlaybackState::Idle);
        assert!(ctl.session().is_none());
        assert_eq!(ctl.frame().active, BTreeSet::new());
        assert_eq!(ctl.instrument().calls.last(), Some(&Call::ReleaseAll));

        clock.advance_millis(60_000);
        assert_eq!(ctl.poll(), 0);
    }

    #[test]
    fn test_stop_when_idle_changes_nothing() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        ctl.stop();
        assert!(ctl.view().frames.is_empty());
        assert!(ctl.instrument().calls.is_empty());

        ctl.set_request(request(ExerciseKind::Static, false)).unwrap();
        ctl.start().unwrap();
        ctl.stop();
        let frames = ctl.view().frames.len();
        let calls = ctl.instrument().calls.len();

        ctl.stop();
        assert_eq!(ctl.view().frames.len(), frames);
        assert_eq!(ctl.instrument().calls.len(), calls);
    }

    #[test]
    fn test_stop_then_start_leaks_nothing() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        ctl.set_request(request(ExerciseKind::Static, false)).unwrap();
        ctl.start().unwrap();
        clock.advance_millis(50);

        ctl.stop();
        // New session uses a different root so stale events would be visible
        let mut next = request(ExerciseKind::Static, false);
        next.vocal_range.root = 60;
        ctl.set_request(next).unwrap();
        ctl.start().unwrap();
        assert_eq!(ctl.generation(), 2);

        clock.advance_millis(10_000);
        ctl.poll();
        assert_eq!(ctl.instrument().triggered(), vec![60, 62]);
    }

    #[test]
    fn test_loop_restarts_with_fresh_request() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        ctl.set_request(request(ExerciseKind::Static, true)).unwrap();
        ctl.start().unwrap();

        // Change parameters mid-session; they apply at the loop boundary
        let mut faster = request(ExerciseKind::Static, true);
        faster.tempo = Tempo::new(120.0).unwrap();
        ctl.set_request(faster).unwrap();
        assert_eq!(ctl.session().unwrap().schedule().total_duration_millis, 2600);
        let ends = ctl.session().unwrap().ends_at();
        assert_eq!(ends, clock.now() + Duration::from_millis(2600));

        clock.advance_millis(2600);
        ctl.poll();

        assert!(ctl.is_playing());
        let session = ctl.session().unwrap();
        assert_eq!(session.generation(), 2);
        assert_eq!(session.origin(), ends);
        assert_eq!(session.origin(), clock.now());
        assert_eq!(session.schedule().total_duration_millis, 100 + 1000 + 250);
    }

    #[test]
    fn test_restarted_session_fires_on_next_poll() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock).with_timing(ScheduleTiming {
            lead_in_ms: 0,
            ..ScheduleTiming::default()
        });
        ctl.set_request(request(ExerciseKind::Static, true)).unwrap();
        ctl.start().unwrap();

        // Syllable and first NoteOn are due at the origin
        assert_eq!(ctl.poll(), 2);

        // Rest of the session; the restart's origin triggers stay armed
        clock.advance_millis(2500);
        assert_eq!(ctl.poll(), 4);
        assert_eq!(ctl.generation(), 2);
        assert_eq!(ctl.session().unwrap().pending(), 6);

        assert_eq!(ctl.poll(), 2);
        assert_eq!(ctl.generation(), 2);
    }

    #[test]
    fn test_zero_length_loop_rejected() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock).with_timing(ScheduleTiming {
            lead_in_ms: 0,
            pause_beats: 0.0,
            ..ScheduleTiming::default()
        });
        let mut req = request(ExerciseKind::Static, true);
        req.override_rhythm = Some(vec![0.0001, 0.0001]);

        assert_eq!(
            ctl.set_request(req.clone()).unwrap_err(),
            ConfigurationError::EmptyLoop {
                exercise: "steps".to_string()
            }
        );
        assert!(ctl.request().is_none());

        // Without the loop the same session plays out in one poll
        req.looping = false;
        ctl.set_request(req).unwrap();
        ctl.start().unwrap();
        assert_eq!(ctl.poll(), 6);
        assert_eq!(ctl.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_loop_flag_captured_at_build_time() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        ctl.set_request(request(ExerciseKind::Static, false)).unwrap();
        ctl.start().unwrap();

        // Enabling the loop mid-session does not affect the running session
        ctl.set_request(request(ExerciseKind::Static, true)).unwrap();
        clock.advance_millis(2600);
        ctl.poll();
        assert_eq!(ctl.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_loop_stops_when_instrument_unready() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        ctl.set_request(request(ExerciseKind::Static, true)).unwrap();
        ctl.start().unwrap();

        ctl.instrument_mut().ready = false;
        clock.advance_millis(2600);
        ctl.poll();
        assert_eq!(ctl.state(), PlaybackState::Idle);
        assert_eq!(ctl.generation(), 1);
    }

    #[test]
    fn test_chord_intro_highlights_chord() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        let mut req = request(ExerciseKind::Static, false);
        req.chord_intro = true;
        ctl.set_request(req).unwrap();
        ctl.start().unwrap();

        clock.advance_millis(100);
        ctl.poll();
        assert_eq!(ctl.frame().active, [48, 52, 55].into_iter().collect());
        assert_eq!(ctl.instrument().triggered(), vec![48, 52, 55]);

        // 2 beats minus the 50ms early release
        clock.advance_millis(1950);
        ctl.poll();
        assert!(ctl.frame().active.is_empty());
    }

    #[test]
    fn test_set_request_rejects_bad_rhythm() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        let mut req = request(ExerciseKind::Static, false);
        req.override_rhythm = Some(vec![1.0]);
        assert!(ctl.set_request(req).is_err());
        assert!(ctl.request().is_none());
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock).with_timing(ScheduleTiming {
            note_gate: 1.0,
            ..ScheduleTiming::default()
        });
        ctl.set_request(request(ExerciseKind::Static, false)).unwrap();
        ctl.start().unwrap();

        // NoteOff of the first note and NoteOn of the second share 1100ms
        clock.advance_millis(1100);
        ctl.poll();
        assert_eq!(
            ctl.instrument().calls,
            vec![Call::Trigger(48), Call::Release(48), Call::Trigger(50)]
        );
    }
}
