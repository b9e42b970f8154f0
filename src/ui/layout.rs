//! Where things go on screen
//!
//! Target placements are fixed. Cake geometry lives in a 400x400 SVG
//! viewBox. Background decorations are scattered from a seed so the same
//! seed always produces the same layout.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::SLICE_COUNT;
use crate::polar_to_cartesian;

/// Absolute position of a clickable target, in percent of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub id: u8,
    pub top_pct: f32,
    pub left_pct: f32,
    pub rotation_deg: f32,
}

const fn place(id: u8, top_pct: f32, left_pct: f32, rotation_deg: f32) -> Placement {
    Placement {
        id,
        top_pct,
        left_pct,
        rotation_deg,
    }
}

pub const HEART_PLACEMENTS: [Placement; 3] = [
    place(1, 15.0, 10.0, 12.0),
    place(2, 25.0, 85.0, -12.0),
    place(3, 60.0, 18.0, 45.0),
];

pub const GIFT_PLACEMENTS: [Placement; 4] = [
    place(1, 20.0, 15.0, 0.0),
    place(2, 40.0, 75.0, 0.0),
    place(3, 65.0, 50.0, 0.0),
    place(4, 80.0, 20.0, 0.0),
];

// === Cake ===

pub const CAKE_VIEWBOX: f32 = 400.0;
pub const CAKE_CENTER: Vec2 = Vec2::new(200.0, 200.0);
pub const CAKE_RADIUS: f32 = 140.0;
/// Frosting drips around the rim
pub const DRIP_COUNT: u32 = 12;
/// Drip ring radius, in percent of the cake wrapper
pub const DRIP_RING_PCT: f32 = 45.0;

/// One wedge of the cake, clockwise from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceWedge {
    pub index: u8,
    pub start: Vec2,
    pub end: Vec2,
}

impl SliceWedge {
    /// Closed wedge outline
    pub fn svg_path(&self) -> String {
        format!(
            "M {} {} L {:.2} {:.2} A {r} {r} 0 0 1 {:.2} {:.2} Z",
            CAKE_CENTER.x,
            CAKE_CENTER.y,
            self.start.x,
            self.start.y,
            self.end.x,
            self.end.y,
            r = CAKE_RADIUS,
        )
    }

    /// Cut line along the leading edge
    pub fn edge_path(&self) -> String {
        format!(
            "M {} {} L {:.2} {:.2}",
            CAKE_CENTER.x, CAKE_CENTER.y, self.start.x, self.start.y
        )
    }
}

/// Screen angle of a rim point; 0 is 12 o'clock, growing clockwise (y points down)
fn rim_angle(step: u32, steps: u32) -> f32 {
    let deg = step as f32 * 360.0 / steps as f32 - 90.0;
    deg.to_radians()
}

pub fn slice_wedge(index: u8) -> SliceWedge {
    let steps = u32::from(SLICE_COUNT);
    let i = u32::from(index);
    SliceWedge {
        index,
        start: CAKE_CENTER + polar_to_cartesian(CAKE_RADIUS, rim_angle(i, steps)),
        end: CAKE_CENTER + polar_to_cartesian(CAKE_RADIUS, rim_angle(i + 1, steps)),
    }
}

pub fn slice_wedges() -> impl Iterator<Item = SliceWedge> {
    (0..SLICE_COUNT).map(slice_wedge)
}

/// Drip centres in percent of the cake wrapper (x = left, y = top)
pub fn frosting_drips() -> Vec<Vec2> {
    (0..DRIP_COUNT)
        .map(|i| Vec2::splat(50.0) + polar_to_cartesian(DRIP_RING_PCT, rim_angle(i, DRIP_COUNT)))
        .collect()
}

// === Background decorations ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorKind {
    Sparkle,
    Zap,
    Heart,
    Star,
    Crown,
}

impl DecorKind {
    pub fn glyph(&self) -> &'static str {
        match self {
            DecorKind::Sparkle => "✨",
            DecorKind::Zap => "⚡",
            DecorKind::Heart => "💗",
            DecorKind::Star => "⭐",
            DecorKind::Crown => "👑",
        }
    }
}

/// Which screen the decorations float behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorScene {
    Game,
    Celebration,
}

impl DecorScene {
    fn count(self) -> usize {
        match self {
            DecorScene::Game => 15,
            DecorScene::Celebration => 25,
        }
    }

    fn kind_for(self, i: usize) -> DecorKind {
        match self {
            DecorScene::Game => [DecorKind::Sparkle, DecorKind::Zap][i % 2],
            DecorScene::Celebration => {
                [DecorKind::Heart, DecorKind::Sparkle, DecorKind::Star, DecorKind::Crown][i % 4]
            }
        }
    }
}

/// A floating background decoration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub kind: DecorKind,
    pub left_pct: f32,
    pub top_pct: f32,
    /// Animation start delay (seconds)
    pub delay_s: f32,
    /// Float cycle length (seconds)
    pub duration_s: f32,
}

pub fn scatter(seed: u64, scene: DecorScene) -> Vec<Decoration> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..scene.count())
        .map(|i| Decoration {
            kind: scene.kind_for(i),
            left_pct: rng.random_range(0.0..100.0),
            top_pct: rng.random_range(0.0..100.0),
            delay_s: rng.random_range(0.0..5.0),
            duration_s: rng.random_range(5.0..15.0),
        })
        .collect()
}
