//! The game session controller
//!
//! Owns every piece of mutable session state. The host calls the input
//! handlers and [`GameSession::advance`], then reads [`GameSession::snapshot`]
//! and drains the requested side effects.

use super::effect::{Effect, SoundKind};
use super::error::IgnoreReason;
use super::state::{CakeState, Notification, Snapshot, Stage, TargetSet, Timings};
use super::timer::{TimedAction, TimerQueue};
use crate::consts::*;
use crate::gift_surprise;

/// Result of an input handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed and effects may have been requested
    Applied,
    /// Nothing changed
    Ignored(IgnoreReason),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// One play-through
#[derive(Debug, Clone)]
pub struct GameSession {
    stage: Stage,
    hearts: TargetSet,
    gifts: TargetSet,
    cake: CakeState,
    /// Set once by `start`, gates every sound request
    audio_active: bool,
    notification: Option<Notification>,
    next_notification_id: u64,
    timers: TimerQueue,
    /// Session clock (ms since creation)
    now_ms: u64,
    timings: Timings,
    effects: Vec<Effect>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_timings(Timings::default())
    }

    pub fn with_timings(timings: Timings) -> Self {
        Self {
            stage: Stage::AwaitingStart,
            hearts: TargetSet::new(1..=HEART_COUNT),
            gifts: TargetSet::new(1..=GIFT_COUNT),
            cake: CakeState::default(),
            audio_active: false,
            notification: None,
            next_notification_id: 1,
            timers: TimerQueue::default(),
            now_ms: 0,
            timings,
            effects: Vec::new(),
        }
    }

    // === Inputs ===

    /// Unlock audio and enter the first stage
    pub fn start(&mut self) -> Outcome {
        let result = self.try_start();
        self.finish("start", result)
    }

    pub fn click_heart(&mut self, id: u8) -> Outcome {
        let result = self.try_click_heart(id);
        self.finish("click_heart", result)
    }

    pub fn click_gift(&mut self, id: u8) -> Outcome {
        let result = self.try_click_gift(id);
        self.finish("click_gift", result)
    }

    pub fn click_cake_slice(&mut self, index: u8) -> Outcome {
        let result = self.try_click_cake_slice(index);
        self.finish("click_cake_slice", result)
    }

    /// Clear the active notification now. Idempotent.
    pub fn dismiss_notification(&mut self) {
        if self.notification.take().is_some() {
            log::debug!("Notification dismissed");
        }
    }

    /// Move the session clock forward, firing every timer that comes due
    pub fn advance(&mut self, elapsed_ms: u64) {
        let target = self.now_ms.saturating_add(elapsed_ms);
        while let Some((due_ms, action)) = self.timers.pop_due(target) {
            // Chained timers are scheduled relative to the timer that fired
            self.now_ms = self.now_ms.max(due_ms);
            self.fire(action);
        }
        self.now_ms = target;
    }

    // === Observation ===

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            stage: self.stage,
            found_hearts: self.hearts.resolved().collect(),
            opened_gifts: self.gifts.resolved().collect(),
            candles_lit: self.cake.candles_lit,
            removed_slices: self.cake.slices.resolved().collect(),
            audio_active: self.audio_active,
            notification: self.notification.as_ref().map(|n| n.text.clone()),
        }
    }

    /// Take the side-effect requests emitted since the last drain
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn hearts(&self) -> &TargetSet {
        &self.hearts
    }

    pub fn gifts(&self) -> &TargetSet {
        &self.gifts
    }

    pub fn cake(&self) -> &CakeState {
        &self.cake
    }

    pub fn audio_active(&self) -> bool {
        self.audio_active
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Clock time of the earliest pending timer
    pub fn next_due_ms(&self) -> Option<u64> {
        self.timers.next_due()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // === Handlers ===

    fn try_start(&mut self) -> Result<(), IgnoreReason> {
        if self.audio_active {
            return Err(IgnoreReason::AlreadyStarted);
        }
        self.audio_active = true;
        self.play(SoundKind::Primer);
        self.enter_stage(Stage::Hearts);
        Ok(())
    }

    fn try_click_heart(&mut self, id: u8) -> Result<(), IgnoreReason> {
        self.require_stage(Stage::Hearts)?;
        let found = self.hearts.resolve(id)?;

        self.play(SoundKind::HeartFound);
        self.notify(format!("💖 Heart found! {found}/{HEART_COUNT}"));
        if self.hearts.is_complete() {
            self.schedule_stage_cleared();
        }
        Ok(())
    }

    fn try_click_gift(&mut self, id: u8) -> Result<(), IgnoreReason> {
        self.require_stage(Stage::Gifts)?;
        let opened = self.gifts.resolve(id)?;
        let surprise = gift_surprise(id).unwrap_or("🎁");

        self.play(SoundKind::GiftOpened);
        self.notify(format!("{surprise} Surprise! {opened}/{GIFT_COUNT} gifts opened!"));
        if self.gifts.is_complete() {
            self.schedule_stage_cleared();
        }
        Ok(())
    }

    fn try_click_cake_slice(&mut self, index: u8) -> Result<(), IgnoreReason> {
        self.require_stage(Stage::Cake)?;
        if !self.cake.slices.contains_id(index) {
            return Err(IgnoreReason::UnknownTarget(index));
        }

        // First click only blows out the candles
        if self.cake.candles_lit {
            self.cake.candles_lit = false;
            self.play(SoundKind::CandleBlow);
            self.notify("🌬️ Make a wish! Candles blown out. Now, start cutting the cake!".to_string());
            return Ok(());
        }

        let removed = self.cake.slices.resolve(index)?;
        if !self.cake.slice_sound_played {
            self.play(SoundKind::CakeSlice);
            self.cake.slice_sound_played = true;
        }
        self.notify(format!("🍰 Slice {removed}/{SLICE_COUNT} removed!"));
        if self.cake.slices.is_complete() {
            self.schedule_stage_cleared();
        }
        Ok(())
    }

    // === Internals ===

    fn finish(&self, input: &str, result: Result<(), IgnoreReason>) -> Outcome {
        match result {
            Ok(()) => Outcome::Applied,
            Err(reason) => {
                log::debug!("Ignored {}: {}", input, reason);
                Outcome::Ignored(reason)
            }
        }
    }

    fn require_stage(&self, expected: Stage) -> Result<(), IgnoreReason> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(IgnoreReason::WrongStage {
                expected,
                actual: self.stage,
            })
        }
    }

    fn play(&mut self, kind: SoundKind) {
        if !self.audio_active {
            log::debug!("Sound {} suppressed (audio inactive)", kind.as_str());
            return;
        }
        self.effects.push(Effect::PlaySound(kind));
    }

    /// Show `text`, replacing whatever notification is up
    fn notify(&mut self, text: String) {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        let duration_ms = self.timings.notification_ms;

        self.notification = Some(Notification {
            id,
            text: text.clone(),
            duration_ms,
        });
        self.effects.push(Effect::ShowNotification { text, duration_ms });
        self.schedule_in(duration_ms, TimedAction::ExpireNotification(id));
    }

    fn schedule_in(&mut self, delay_ms: u32, action: TimedAction) {
        let due = self.now_ms.saturating_add(u64::from(delay_ms));
        self.timers.schedule(due, action);
    }

    fn schedule_stage_cleared(&mut self) {
        log::info!("{} stage complete", self.stage.as_str());
        let from = self.stage;
        self.schedule_in(self.timings.cleared_delay_ms, TimedAction::StageCleared { from });
    }

    fn fire(&mut self, action: TimedAction) {
        match action {
            TimedAction::ExpireNotification(id) => {
                if self.notification.as_ref().is_some_and(|n| n.id == id) {
                    self.notification = None;
                }
            }
            TimedAction::StageCleared { from } => {
                let (Some(to), Some(message)) = (from.next(), cleared_message(from)) else {
                    return;
                };
                if self.stage != from {
                    log::warn!("Stale stage-cleared timer for {}", from.as_str());
                    return;
                }
                self.notify(message.to_string());
                self.schedule_in(self.timings.transition_delay_ms, TimedAction::EnterStage { to });
            }
            TimedAction::EnterStage { to } => {
                if self.stage.next() == Some(to) {
                    self.enter_stage(to);
                } else {
                    log::warn!("Dropped transition {} -> {}", self.stage.as_str(), to.as_str());
                }
            }
        }
    }

    fn enter_stage(&mut self, stage: Stage) {
        log::info!("Stage {} -> {}", self.stage.as_str(), stage.as_str());
        self.stage = stage;
        match stage {
            Stage::Cake => self.cake.candles_lit = true,
            Stage::Celebration => self.play(SoundKind::Celebration),
            _ => {}
        }
    }
}

/// Announcement shown between a completed stage and the next one
fn cleared_message(stage: Stage) -> Option<&'static str> {
    match stage {
        Stage::Hearts => Some("🎉 All hearts found! Moving to next game..."),
        Stage::Gifts => Some("🎁 All surprises revealed! Time to cut the cake..."),
        Stage::Cake => Some("🎂 All cake eaten! Get ready for something special..."),
        Stage::AwaitingStart | Stage::Celebration => None,
    }
}
