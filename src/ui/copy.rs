//! On-screen text for each stage

use crate::consts::*;
use crate::session::{Snapshot, Stage};

pub const START_TITLE: &str = "A Birthday Hunt!";
pub const START_PROMPT: &str = "Click 'Start' to enable sounds and begin your special game!";
pub const START_BUTTON: &str = "Click to Start Game!";
pub const START_NOTE: &str = "(Required to play all the fun sound effects!)";

pub const GAME_TITLE: &str = "A Birthday Hunt";
pub const GAME_SUBTITLE: &str = "Complete all 3 games! 🎯";

pub const CELEBRATION_TITLE: &str = "Happy Birthday, Beautiful! 🎂";
pub const CELEBRATION_BANNER: &str = "💖 HAPPY BIRTHDAY! 💋";
pub const WISH_TITLE: &str = "My Birthday Wish For You";
pub const WISH_BODY: &str = "May this special day bring you endless joy, boundless laughter, \
and all the happiness your heart can hold! 💝 You deserve every wonderful moment, every dream \
come true, and all the love in the world! May this year ahead be filled with amazing adventures, \
sweet surprises, and memories that make you smile. You're absolutely incredible, and today we \
celebrate YOU! 💋🎂💋";
pub const CELEBRATION_CLOSING: &str = "Here's to the most amazing year ahead! 🥳💕💋";
pub const CELEBRATION_EMOJI: [&str; 12] = [
    "🎂", "🎁", "🎉", "💋", "💖", "✨", "🌟", "💋", "👑", "🍰", "💋", "💝",
];

/// Card heading for a playable stage
pub fn stage_heading(stage: Stage) -> Option<&'static str> {
    match stage {
        Stage::Hearts => Some("Game 1: Find Hearts"),
        Stage::Gifts => Some("Game 2: Open Gifts"),
        Stage::Cake => Some("Game 3: Cut the Cake"),
        Stage::AwaitingStart | Stage::Celebration => None,
    }
}

/// Card instructions for a playable stage
pub fn stage_instructions(stage: Stage) -> Option<&'static str> {
    match stage {
        Stage::Hearts => Some("Look around and find all 3 hidden hearts! 💖"),
        Stage::Gifts => Some("Click all the gifts to reveal surprises! 🎁"),
        Stage::Cake => Some("First click to blow out the candles, then take all 8 slices! 🍰"),
        Stage::AwaitingStart | Stage::Celebration => None,
    }
}

fn done_marker(count: usize, total: u8) -> &'static str {
    if count == usize::from(total) { " 🎉" } else { "" }
}

/// Progress line for the current stage
pub fn progress_line(snapshot: &Snapshot) -> Option<String> {
    match snapshot.stage {
        Stage::Hearts => {
            let n = snapshot.found_hearts.len();
            Some(format!("{n}/{HEART_COUNT} Found!{}", done_marker(n, HEART_COUNT)))
        }
        Stage::Gifts => {
            let n = snapshot.opened_gifts.len();
            Some(format!("{n}/{GIFT_COUNT} Opened!{}", done_marker(n, GIFT_COUNT)))
        }
        Stage::Cake => {
            let n = snapshot.removed_slices.len();
            Some(format!("{n}/{SLICE_COUNT} Slices Eaten!{}", done_marker(n, SLICE_COUNT)))
        }
        Stage::AwaitingStart | Stage::Celebration => None,
    }
}

pub fn candle_status(snapshot: &Snapshot) -> &'static str {
    if snapshot.candles_lit {
        "Candles Lit! 🕯️"
    } else {
        "Candles Blown! 💨"
    }
}

/// Hint under the cake
pub fn cake_prompt(snapshot: &Snapshot) -> &'static str {
    if snapshot.candles_lit {
        "Click to blow out the candles!"
    } else if snapshot.removed_slices.len() >= usize::from(SLICE_COUNT) {
        "All done! 🎉"
    } else {
        "Click a slice to take it! 🍰"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_lines() {
        let mut snap = Snapshot {
            stage: Stage::Hearts,
            found_hearts: vec![1, 3],
            ..Default::default()
        };
        assert_eq!(progress_line(&snap).as_deref(), Some("2/3 Found!"));

        snap.found_hearts.push(2);
        assert_eq!(progress_line(&snap).as_deref(), Some("3/3 Found! 🎉"));

        snap.stage = Stage::Celebration;
        assert_eq!(progress_line(&snap), None);
    }

    #[test]
    fn test_cake_prompt_follows_candles_and_slices() {
        let mut snap = Snapshot {
            stage: Stage::Cake,
            candles_lit: true,
            ..Default::default()
        };
        assert_eq!(cake_prompt(&snap), "Click to blow out the candles!");
        assert_eq!(candle_status(&snap), "Candles Lit! 🕯️");

        snap.candles_lit = false;
        assert_eq!(cake_prompt(&snap), "Click a slice to take it! 🍰");

        snap.removed_slices = (0..8).collect();
        assert_eq!(cake_prompt(&snap), "All done! 🎉");
        assert_eq!(progress_line(&snap).as_deref(), Some("8/8 Slices Eaten! 🎉"));
    }
}
