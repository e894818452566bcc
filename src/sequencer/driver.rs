// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Async driver for the playback controller.

use tracing::debug;

use super::controller::PlaybackController;
use crate::display::KeyboardView;
use crate::instrument::Instrument;
use crate::timing::Clock;

/// Sleep until each pending trigger is due and fire it, until the
/// controller has nothing armed. Returns the number of events fired.
///
/// A looping session re-arms itself on every pass, so this only returns
/// once looping is turned off or playback is stopped. Hosts that need to
/// stop early run it inside `tokio::select!`.
pub async fn run_until_idle<I, V, C>(controller: &mut PlaybackController<I, V, C>) -> usize
where
    I: Instrument,
    V: KeyboardView,
    C: Clock,
{
    let mut fired = 0;
    while let Some(deadline) = controller.next_deadline() {
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        fired += controller.poll();
    }
    debug!(fired, "controller idle");
    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::LatestFrame;
    use crate::exercise::{Catalog, VocalPart};
    use crate::instrument::{LogOutput, MidiInstrument};
    use crate::sequencer::{PlaybackRequest, PlaybackState};
    use crate::timing::{Tempo, TokioClock};

    fn request(looping: bool) -> PlaybackRequest {
        let catalog = Catalog::builtin().unwrap();
        PlaybackRequest {
            exercise: catalog.exercise("fiveNoteAscending").unwrap().clone(),
            vocal_range: *catalog.vocal_range(VocalPart::Soprano).unwrap(),
            tempo: Tempo::new(240.0).unwrap(),
            override_rhythm: None,
            chord_intro: true,
            looping,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_session_to_completion() {
        let mut controller = PlaybackController::new(
            MidiInstrument::new(LogOutput::new()),
            LatestFrame::default(),
            TokioClock,
        );
        controller.set_request(request(false)).unwrap();
        controller.start().unwrap();

        let events = controller.session().unwrap().schedule().len();
        let started = tokio::time::Instant::now();
        let fired = run_until_idle(&mut controller).await;

        assert_eq!(fired, events);
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(controller.instrument().held().is_empty());
        assert!(started.elapsed() > std::time::Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_controller_returns_immediately() {
        let mut controller = PlaybackController::new(
            MidiInstrument::new(LogOutput::new()),
            LatestFrame::default(),
            TokioClock,
        );
        assert_eq!(run_until_idle(&mut controller).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_looping_runs_until_cancelled() {
        let mut controller = PlaybackController::new(
            MidiInstrument::new(LogOutput::new()),
            LatestFrame::default(),
            TokioClock,
        );
        controller.set_request(request(true)).unwrap();
        controller.start().unwrap();

        let timeout = tokio::time::sleep(std::time::Duration::from_secs(120));
        tokio::select! {
            _ = run_until_idle(&mut controller) => panic!("looping session ended on its own"),
            _ = timeout => {}
        }

        assert!(controller.generation() > 1);
        controller.stop();
        assert_eq!(controller.next_deadline(), None);
    }
}
