//! Session state and core types
//!
//! Everything the presentation layer may observe is copied out through
//! [`Snapshot`]; the live types stay owned by the controller.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::error::IgnoreReason;
use crate::consts::*;

/// Current mini-game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Stage {
    /// Start screen, audio not yet unlocked
    #[default]
    AwaitingStart,
    /// Find the hidden hearts
    Hearts,
    /// Open the gifts
    Gifts,
    /// Blow out the candles and cut the cake
    Cake,
    /// Final screen (terminal)
    Celebration,
}

impl Stage {
    /// The stage that follows this one, if any
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::AwaitingStart => Some(Stage::Hearts),
            Stage::Hearts => Some(Stage::Gifts),
            Stage::Gifts => Some(Stage::Cake),
            Stage::Cake => Some(Stage::Celebration),
            Stage::Celebration => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::Celebration
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::AwaitingStart => "AwaitingStart",
            Stage::Hearts => "Hearts",
            Stage::Gifts => "Gifts",
            Stage::Cake => "Cake",
            Stage::Celebration => "Celebration",
        }
    }
}

/// A fixed domain of target ids with a monotonically growing resolved set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSet {
    first: u8,
    last: u8,
    resolved: BTreeSet<u8>,
}

impl TargetSet {
    pub fn new(ids: RangeInclusive<u8>) -> Self {
        Self {
            first: *ids.start(),
            last: *ids.end(),
            resolved: BTreeSet::new(),
        }
    }

    /// All ids in the domain
    pub fn ids(&self) -> RangeInclusive<u8> {
        self.first..=self.last
    }

    pub fn contains_id(&self, id: u8) -> bool {
        self.ids().contains(&id)
    }

    pub fn is_resolved(&self, id: u8) -> bool {
        self.resolved.contains(&id)
    }

    /// Mark `id` resolved, returning the new resolved count
    pub fn resolve(&mut self, id: u8) -> Result<usize, IgnoreReason> {
        if !self.contains_id(id) {
            return Err(IgnoreReason::UnknownTarget(id));
        }
        if !self.resolved.insert(id) {
            return Err(IgnoreReason::AlreadyResolved(id));
        }
        Ok(self.resolved.len())
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    pub fn total(&self) -> usize {
        self.ids().count()
    }

    pub fn is_complete(&self) -> bool {
        self.resolved_count() == self.total()
    }

    /// Resolved ids in ascending order
    pub fn resolved(&self) -> impl Iterator<Item = u8> + '_ {
        self.resolved.iter().copied()
    }
}

/// Cake stage state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CakeState {
    /// No slice can be taken while the candles burn
    pub candles_lit: bool,
    /// Removed slice indices
    pub slices: TargetSet,
    /// The slice sound fires once per session, on the first removal
    pub slice_sound_played: bool,
}

impl Default for CakeState {
    fn default() -> Self {
        Self {
            candles_lit: true,
            slices: TargetSet::new(0..=SLICE_COUNT - 1),
            slice_sound_played: false,
        }
    }
}

/// The single active notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Generation id, so a stale expiry timer cannot clear a newer message
    pub id: u64,
    pub text: String,
    pub duration_ms: u32,
}

/// Presentation timings (ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Notification display duration
    pub notification_ms: u32,
    /// Completing click to "stage cleared" notification
    pub cleared_delay_ms: u32,
    /// "Stage cleared" notification to stage change
    pub transition_delay_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            notification_ms: NOTIFICATION_MS,
            cleared_delay_ms: CLEARED_DELAY_MS,
            transition_delay_ms: TRANSITION_DELAY_MS,
        }
    }
}

/// Read-only copy of everything the presentation layer renders
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub stage: Stage,
    pub found_hearts: Vec<u8>,
    pub opened_gifts: Vec<u8>,
    pub candles_lit: bool,
    pub removed_slices: Vec<u8>,
    pub audio_active: bool,
    pub notification: Option<String>,
}

impl Snapshot {
    pub fn heart_found(&self, id: u8) -> bool {
        self.found_hearts.contains(&id)
    }

    pub fn gift_opened(&self, id: u8) -> bool {
        self.opened_gifts.contains(&id)
    }

    pub fn slice_removed(&self, index: u8) -> bool {
        self.removed_slices.contains(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_is_linear() {
        let mut stage = Stage::AwaitingStart;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            assert!(next > stage);
            stage = next;
            seen.push(stage);
        }
        assert_eq!(
            seen,
            vec![
                Stage::AwaitingStart,
                Stage::Hearts,
                Stage::Gifts,
                Stage::Cake,
                Stage::Celebration
            ]
        );
        assert!(stage.is_terminal());
    }

    #[test]
    fn test_target_set_resolve() {
        let mut set = TargetSet::new(1..=3);
        assert_eq!(set.total(), 3);
        assert_eq!(set.resolve(2), Ok(1));
        assert_eq!(set.resolve(2), Err(IgnoreReason::AlreadyResolved(2)));
        assert_eq!(set.resolve(0), Err(IgnoreReason::UnknownTarget(0)));
        assert_eq!(set.resolve(4), Err(IgnoreReason::UnknownTarget(4)));
        assert_eq!(set.resolve(1), Ok(2));
        assert!(!set.is_complete());
        assert_eq!(set.resolve(3), Ok(3));
        assert!(set.is_complete());
        assert_eq!(set.resolved().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_cake_defaults() {
        let cake = CakeState::default();
        assert!(cake.candles_lit);
        assert!(!cake.slice_sound_played);
        assert_eq!(cake.slices.ids(), 0..=7);
    }

    #[test]
    fn test_timings_partial_json() {
        let t: Timings = serde_json::from_str(r#"{"notification_ms": 500}"#).unwrap();
        assert_eq!(t.notification_ms, 500);
        assert_eq!(t.cleared_delay_ms, CLEARED_DELAY_MS);
        assert_eq!(t.transition_delay_ms, TRANSITION_DELAY_MS);
    }
}
