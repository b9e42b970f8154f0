//! Birthday Hunt - a three-stage birthday treasure hunt
//!
//! Core modules:
//! - `session`: Game session controller (stages, targets, timers, side-effect requests)
//! - `ui`: Pure presentation helpers (copy, placement, cake geometry, HTML view)
//! - `platform`: Presenter seam between the controller and its host
//! - `settings`: Preferences and timing configuration
//! - `audio`: Web Audio synthesizer (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
pub mod session;
pub mod settings;
pub mod ui;

pub use platform::{ConsolePresenter, Presenter, RecordingPresenter, pump};
pub use session::{Effect, GameSession, IgnoreReason, Outcome, Snapshot, SoundKind, Stage};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Hearts hidden in the first stage (ids 1..=3)
    pub const HEART_COUNT: u8 = 3;
    /// Gifts in the second stage (ids 1..=4)
    pub const GIFT_COUNT: u8 = 4;
    /// Cake slices in the third stage (indices 0..=7)
    pub const SLICE_COUNT: u8 = 8;

    /// How long a notification stays up unless superseded or dismissed
    pub const NOTIFICATION_MS: u32 = 3000;
    /// Delay between the completing click and the "stage cleared" notification
    pub const CLEARED_DELAY_MS: u32 = 1000;
    /// Delay between the "stage cleared" notification and the stage change
    pub const TRANSITION_DELAY_MS: u32 = 2000;

    /// Surprise revealed by each gift, indexed by gift id - 1
    pub const GIFT_SURPRISES: [&str; GIFT_COUNT as usize] = ["🎂", "🎈", "🎊", "🎉"];
}

/// Surprise symbol for a gift id, if the id exists
pub fn gift_surprise(id: u8) -> Option<&'static str> {
    let index = usize::from(id).checked_sub(1)?;
    consts::GIFT_SURPRISES.get(index).copied()
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gift_surprise_lookup() {
        assert_eq!(gift_surprise(1), Some("🎂"));
        assert_eq!(gift_surprise(4), Some("🎉"));
        assert_eq!(gift_surprise(0), None);
        assert_eq!(gift_surprise(5), None);
    }

    #[test]
    fn test_polar_to_cartesian_axes() {
        let p = polar_to_cartesian(2.0, 0.0);
        assert!((p.x - 2.0).abs() < 1e-6 && p.y.abs() < 1e-6);

        let p = polar_to_cartesian(2.0, std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-6 && (p.y - 2.0).abs() < 1e-6);
    }
}
