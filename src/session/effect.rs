//! Side-effect requests emitted by the controller
//!
//! Effects are fire-and-forget: the controller never learns whether a sound
//! actually played or a notification was actually shown.

use serde::{Deserialize, Serialize};

/// Sound cues the controller can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundKind {
    /// Near-silent cue played on start to unlock audio output
    Primer,
    /// A hidden heart was found
    HeartFound,
    /// A gift was opened
    GiftOpened,
    /// Candles were blown out
    CandleBlow,
    /// First cake slice taken
    CakeSlice,
    /// Celebration screen entered
    Celebration,
}

impl SoundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKind::Primer => "primer",
            SoundKind::HeartFound => "heart-found",
            SoundKind::GiftOpened => "gift-opened",
            SoundKind::CandleBlow => "candle-blow",
            SoundKind::CakeSlice => "cake-slice",
            SoundKind::Celebration => "celebration",
        }
    }
}

/// A request for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    PlaySound(SoundKind),
    ShowNotification { text: String, duration_ms: u32 },
}
