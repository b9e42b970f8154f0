//! Platform abstraction layer
//!
//! A [`Presenter`] is whatever sits on the other side of the controller:
//! the DOM + Web Audio in the browser, stdout natively, a recorder in tests.
//! Hosts call [`pump`] after every input or clock advance.

use crate::session::{Effect, GameSession, Snapshot, SoundKind, Stage};
use crate::ui::copy;

/// Receives side-effect requests and renders snapshots
pub trait Presenter {
    /// Fire-and-forget; failures are the presenter's to log
    fn play_sound(&mut self, kind: SoundKind);
    fn show_notification(&mut self, text: &str, duration_ms: u32);
    fn render(&mut self, snapshot: &Snapshot);
}

/// Deliver pending effects in emission order, then render the current state
pub fn pump<P: Presenter + ?Sized>(session: &mut GameSession, presenter: &mut P) {
    for effect in session.drain_effects() {
        match effect {
            Effect::PlaySound(kind) => presenter.play_sound(kind),
            Effect::ShowNotification { text, duration_ms } => {
                presenter.show_notification(&text, duration_ms)
            }
        }
    }
    presenter.render(&session.snapshot());
}

/// Plain-text rendering of a snapshot
pub fn describe(snapshot: &Snapshot) -> String {
    let mut lines = vec![format!("[{}]", snapshot.stage.as_str())];
    match snapshot.stage {
        Stage::AwaitingStart => lines.push(copy::START_PROMPT.to_string()),
        Stage::Hearts | Stage::Gifts | Stage::Cake => {
            if let Some(heading) = copy::stage_heading(snapshot.stage) {
                lines.push(heading.to_string());
            }
            if snapshot.stage == Stage::Cake {
                lines.push(copy::candle_status(snapshot).to_string());
            }
            if let Some(progress) = copy::progress_line(snapshot) {
                lines.push(progress);
            }
        }
        Stage::Celebration => {
            lines.push(copy::CELEBRATION_TITLE.to_string());
            lines.push(copy::CELEBRATION_CLOSING.to_string());
        }
    }
    if let Some(text) = &snapshot.notification {
        lines.push(format!("> {text}"));
    }
    lines.join("\n")
}

/// Terminal presenter: sounds go to the log, state goes to stdout
#[derive(Debug, Default)]
pub struct ConsolePresenter {
    last: Option<Snapshot>,
}

impl Presenter for ConsolePresenter {
    fn play_sound(&mut self, kind: SoundKind) {
        log::info!("♪ {}", kind.as_str());
    }

    fn show_notification(&mut self, text: &str, duration_ms: u32) {
        log::debug!("Notification for {}ms: {}", duration_ms, text);
    }

    fn render(&mut self, snapshot: &Snapshot) {
        if self.last.as_ref() == Some(snapshot) {
            return;
        }
        println!("{}\n", describe(snapshot));
        self.last = Some(snapshot.clone());
    }
}

/// Everything a presenter was asked to do, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Sound(SoundKind),
    Notification { text: String, duration_ms: u32 },
    Render(Snapshot),
}

/// Presenter that keeps a log of calls
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub calls: Vec<Recorded>,
}

impl RecordingPresenter {
    pub fn sounds(&self) -> Vec<SoundKind> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Recorded::Sound(kind) => Some(*kind),
                _ => None,
            })
            .collect()
    }

    pub fn last_render(&self) -> Option<&Snapshot> {
        self.calls.iter().rev().find_map(|c| match c {
            Recorded::Render(snapshot) => Some(snapshot),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn play_sound(&mut self, kind: SoundKind) {
        self.calls.push(Recorded::Sound(kind));
    }

    fn show_notification(&mut self, text: &str, duration_ms: u32) {
        self.calls.push(Recorded::Notification {
            text: text.to_string(),
            duration_ms,
        });
    }

    fn render(&mut self, snapshot: &Snapshot) {
        self.calls.push(Recorded::Render(snapshot.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::NOTIFICATION_MS;

    #[test]
    fn test_pump_delivers_in_order_then_renders() {
        let mut session = GameSession::new();
        let mut presenter = RecordingPresenter::default();

        session.start();
        session.click_heart(3);
        pump(&mut session, &mut presenter);

        assert_eq!(
            presenter.calls,
            vec![
                Recorded::Sound(SoundKind::Primer),
                Recorded::Sound(SoundKind::HeartFound),
                Recorded::Notification {
                    text: "💖 Heart found! 1/3".to_string(),
                    duration_ms: NOTIFICATION_MS
                },
                Recorded::Render(session.snapshot()),
            ]
        );

        // Nothing left to deliver on the next pump
        pump(&mut session, &mut presenter);
        assert_eq!(presenter.calls.len(), 5);
        assert!(matches!(presenter.calls[4], Recorded::Render(_)));
    }

    #[test]
    fn test_full_playthrough_through_presenter() {
        let mut session = GameSession::new();
        let mut presenter = RecordingPresenter::default();

        session.start();
        for id in 1..=3 {
            session.click_heart(id);
        }
        session.advance(5_000);
        for id in 1..=4 {
            session.click_gift(id);
        }
        session.advance(5_000);
        for index in [0, 0, 1, 2, 3, 4, 5, 6, 7] {
            session.click_cake_slice(index);
        }
        session.advance(5_000);
        pump(&mut session, &mut presenter);

        assert_eq!(
            presenter.sounds(),
            vec![
                SoundKind::Primer,
                SoundKind::HeartFound,
                SoundKind::HeartFound,
                SoundKind::HeartFound,
                SoundKind::GiftOpened,
                SoundKind::GiftOpened,
                SoundKind::GiftOpened,
                SoundKind::GiftOpened,
                SoundKind::CandleBlow,
                SoundKind::CakeSlice,
                SoundKind::Celebration,
            ]
        );
        let last = presenter.last_render().map(|s| s.stage);
        assert_eq!(last, Some(Stage::Celebration));
    }

    #[test]
    fn test_describe_cake() {
        let snap = Snapshot {
            stage: Stage::Cake,
            candles_lit: false,
            removed_slices: vec![1],
            notification: Some("🍰 Slice 1/8 removed!".to_string()),
            ..Default::default()
        };
        let text = describe(&snap);
        assert!(text.starts_with("[Cake]"));
        assert!(text.contains("Candles Blown!"));
        assert!(text.contains("1/8 Slices Eaten!"));
        assert!(text.ends_with("> 🍰 Slice 1/8 removed!"));
    }
}
