//! Game session controller
//!
//! All game rules live here. This module must stay platform-free:
//! - No rendering, audio or DOM dependencies
//! - Time only moves through `GameSession::advance`
//! - Side effects are requested, never performed

pub mod controller;
pub mod effect;
pub mod error;
pub mod state;
mod timer;

pub use controller::{GameSession, Outcome};
pub use effect::{Effect, SoundKind};
pub use error::IgnoreReason;
pub use state::{CakeState, Notification, Snapshot, Stage, TargetSet, Timings};
