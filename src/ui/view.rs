//! Snapshot to HTML
//!
//! Clickable elements carry `data-action` and `data-id` attributes; the
//! browser driver delegates clicks from the container, so the markup can be
//! replaced wholesale on every change.

use super::copy;
use super::layout::{self, DecorScene, Placement};
use crate::consts::*;
use crate::gift_surprise;
use crate::session::{Snapshot, Stage};

/// Render-time knobs that are not part of the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewOptions {
    /// Seed for the background scatter
    pub decor_seed: u64,
    /// Skip floating decorations
    pub reduced_motion: bool,
}

/// Markup for the main container
pub fn render_app(snapshot: &Snapshot, options: &ViewOptions) -> String {
    match snapshot.stage {
        Stage::AwaitingStart => render_start(),
        Stage::Hearts | Stage::Gifts => {
            let mut html = decorations(DecorScene::Game, options);
            html.push_str(&targets(snapshot));
            html.push_str(&game_card(snapshot));
            html
        }
        Stage::Cake => render_cake(snapshot),
        Stage::Celebration => {
            let mut html = decorations(DecorScene::Celebration, options);
            html.push_str(&render_celebration());
            html
        }
    }
}

/// Markup for the notification slot (empty when nothing is showing)
pub fn render_toast(snapshot: &Snapshot) -> String {
    match &snapshot.notification {
        Some(text) => format!(
            r#"<div class="toast"><span class="toast-icon">✨</span><p>{text}</p><button class="toast-close" data-action="dismiss">✕</button></div>"#
        ),
        None => String::new(),
    }
}

fn render_start() -> String {
    format!(
        r#"<div class="card start"><h1>{}</h1><p>{}</p><button class="start-btn" data-action="start">🔊 {}</button><p class="note">{}</p></div>"#,
        copy::START_TITLE,
        copy::START_PROMPT,
        copy::START_BUTTON,
        copy::START_NOTE
    )
}

fn decorations(scene: DecorScene, options: &ViewOptions) -> String {
    if options.reduced_motion {
        return String::new();
    }
    let items: String = layout::scatter(options.decor_seed, scene)
        .iter()
        .map(|d| {
            format!(
                r#"<span class="float" style="left:{:.1}%;top:{:.1}%;animation-delay:{:.2}s;animation-duration:{:.2}s">{}</span>"#,
                d.left_pct,
                d.top_pct,
                d.delay_s,
                d.duration_s,
                d.kind.glyph()
            )
        })
        .collect();
    format!(r#"<div class="decor">{items}</div>"#)
}

fn positioned(p: &Placement) -> String {
    format!(
        "top:{}%;left:{}%;transform:rotate({}deg)",
        p.top_pct, p.left_pct, p.rotation_deg
    )
}

/// Scattered hearts or gifts; resolved ones stay in the DOM but inert
fn targets(snapshot: &Snapshot) -> String {
    match snapshot.stage {
        Stage::Hearts => layout::HEART_PLACEMENTS
            .iter()
            .map(|p| {
                if snapshot.heart_found(p.id) {
                    format!(r#"<span class="target heart found" style="{}">💖</span>"#, positioned(p))
                } else {
                    format!(
                        r#"<button class="target heart" data-action="heart" data-id="{}" style="{}">💖</button>"#,
                        p.id,
                        positioned(p)
                    )
                }
            })
            .collect(),
        Stage::Gifts => layout::GIFT_PLACEMENTS
            .iter()
            .map(|p| {
                if snapshot.gift_opened(p.id) {
                    format!(
                        r#"<span class="target gift opened" style="{}">{}</span>"#,
                        positioned(p),
                        gift_surprise(p.id).unwrap_or("🎁")
                    )
                } else {
                    format!(
                        r#"<button class="target gift" data-action="gift" data-id="{}" style="{}">🎁</button>"#,
                        p.id,
                        positioned(p)
                    )
                }
            })
            .collect(),
        _ => String::new(),
    }
}

/// Row of small icons showing what has been found so far
fn tracker(snapshot: &Snapshot) -> String {
    let icons: String = match snapshot.stage {
        Stage::Hearts => (1..=HEART_COUNT)
            .map(|id| {
                let class = if snapshot.heart_found(id) { "on" } else { "off" };
                format!(r#"<span class="{class}">💖</span>"#)
            })
            .collect(),
        Stage::Gifts => (1..=GIFT_COUNT)
            .map(|id| match (snapshot.gift_opened(id), gift_surprise(id)) {
                (true, Some(surprise)) => format!(r#"<span class="on">{surprise}</span>"#),
                _ => r#"<span class="off">🎁</span>"#.to_string(),
            })
            .collect(),
        _ => String::new(),
    };
    format!(r#"<div class="tracker">{icons}</div>"#)
}

fn stage_block(snapshot: &Snapshot) -> String {
    let heading = copy::stage_heading(snapshot.stage).unwrap_or_default();
    let instructions = copy::stage_instructions(snapshot.stage).unwrap_or_default();
    format!(r#"<div class="stage"><h2>{heading}</h2><p>{instructions}</p></div>"#)
}

fn game_card(snapshot: &Snapshot) -> String {
    format!(
        r#"<div class="card game"><h1>{}</h1><p class="subtitle">{}</p>{}{}<p class="progress">{}</p></div>"#,
        copy::GAME_TITLE,
        copy::GAME_SUBTITLE,
        stage_block(snapshot),
        tracker(snapshot),
        copy::progress_line(snapshot).unwrap_or_default()
    )
}

fn render_cake(snapshot: &Snapshot) -> String {
    let slices: String = layout::slice_wedges()
        .filter(|w| !snapshot.slice_removed(w.index))
        .map(|w| {
            format!(
                r#"<g><path class="slice" data-action="slice" data-id="{}" d="{}"/><path class="cut" d="{}"/></g>"#,
                w.index,
                w.svg_path(),
                w.edge_path()
            )
        })
        .collect();
    let drips: String = layout::frosting_drips()
        .iter()
        .map(|p| format!(r#"<span class="drip" style="left:{:.2}%;top:{:.2}%"></span>"#, p.x, p.y))
        .collect();
    let candles = if snapshot.candles_lit {
        r#"<div class="candles">"#.to_string()
            + &r#"<span class="candle"><span class="flame"></span></span>"#.repeat(5)
            + "</div>"
    } else {
        String::new()
    };
    let vb = layout::CAKE_VIEWBOX;

    format!(
        concat!(
            r#"<div class="cake-layout">"#,
            r#"<div class="card cake-info">{stage}<p class="progress">{status}<br>{progress}</p></div>"#,
            r#"<div class="cake-area"><div class="cake">{candles}"#,
            r#"<svg viewBox="0 0 {vb} {vb}">{slices}</svg>{drips}</div>"#,
            r#"<p class="cake-prompt">{prompt}</p></div></div>"#
        ),
        stage = stage_block(snapshot),
        status = copy::candle_status(snapshot),
        progress = copy::progress_line(snapshot).unwrap_or_default(),
        candles = candles,
        vb = vb,
        slices = slices,
        drips = drips,
        prompt = copy::cake_prompt(snapshot),
    )
}

fn render_celebration() -> String {
    let emoji: String = copy::CELEBRATION_EMOJI
        .iter()
        .enumerate()
        .map(|(i, e)| {
            format!(
                r#"<span class="bounce" style="animation-delay:{:.1}s">{e}</span>"#,
                i as f32 * 0.1
            )
        })
        .collect();
    format!(
        concat!(
            r#"<div class="card celebration"><div class="stars">{stars}</div>"#,
            r#"<p class="title">{title}</p><div class="banner"><p>{banner}</p>"#,
            r#"<div class="wish"><p class="wish-title">{wish_title}</p><p>{wish}</p></div>"#,
            r#"<p class="closing">{closing}</p></div><div class="emoji">{emoji}</div></div>"#
        ),
        stars = "⭐".repeat(5),
        title = copy::CELEBRATION_TITLE,
        banner = copy::CELEBRATION_BANNER,
        wish_title = copy::WISH_TITLE,
        wish = copy::WISH_BODY,
        closing = copy::CELEBRATION_CLOSING,
        emoji = emoji,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(html: &str, needle: &str) -> usize {
        html.matches(needle).count()
    }

    #[test]
    fn test_start_screen_has_start_action() {
        let html = render_app(&Snapshot::default(), &ViewOptions::default());
        assert_eq!(count(&html, r#"data-action="start""#), 1);
        assert!(html.contains(copy::START_BUTTON));
    }

    #[test]
    fn test_only_unfound_hearts_are_clickable() {
        let snap = Snapshot {
            stage: Stage::Hearts,
            found_hearts: vec![2],
            audio_active: true,
            ..Default::default()
        };
        let html = render_app(&snap, &ViewOptions::default());
        assert_eq!(count(&html, r#"data-action="heart""#), 2);
        assert!(html.contains(r#"data-action="heart" data-id="1""#));
        assert!(!html.contains(r#"data-action="heart" data-id="2""#));
        assert!(html.contains("1/3 Found!"));
        assert_eq!(count(&html, r#"data-action="gift""#), 0);
    }

    #[test]
    fn test_opened_gifts_show_surprise() {
        let snap = Snapshot {
            stage: Stage::Gifts,
            opened_gifts: vec![2],
            ..Default::default()
        };
        let html = render_app(&snap, &ViewOptions::default());
        assert_eq!(count(&html, r#"data-action="gift""#), 3);
        assert!(html.contains(r#"class="target gift opened""#));
        assert!(html.contains("🎈"));
    }

    #[test]
    fn test_cake_omits_removed_slices_and_candles() {
        let snap = Snapshot {
            stage: Stage::Cake,
            candles_lit: false,
            removed_slices: vec![0, 4],
            ..Default::default()
        };
        let html = render_app(&snap, &ViewOptions::default());
        assert_eq!(count(&html, r#"data-action="slice""#), 6);
        assert!(!html.contains(r#"data-id="4""#));
        assert!(!html.contains(r#"class="candles""#));
        assert!(html.contains("2/8 Slices Eaten!"));

        let lit = Snapshot {
            stage: Stage::Cake,
            candles_lit: true,
            ..Default::default()
        };
        let html = render_app(&lit, &ViewOptions::default());
        assert_eq!(count(&html, r#"class="candle""#), 5);
        assert_eq!(count(&html, r#"data-action="slice""#), 8);
    }

    #[test]
    fn test_reduced_motion_drops_decorations() {
        let snap = Snapshot {
            stage: Stage::Celebration,
            ..Default::default()
        };
        let full = render_app(&snap, &ViewOptions::default());
        assert_eq!(count(&full, r#"class="float""#), 25);

        let calm = render_app(
            &snap,
            &ViewOptions {
                reduced_motion: true,
                ..Default::default()
            },
        );
        assert_eq!(count(&calm, r#"class="float""#), 0);
        assert!(calm.contains(copy::WISH_TITLE));
        assert!(!calm.contains("data-action"));
    }

    #[test]
    fn test_toast_markup() {
        let mut snap = Snapshot::default();
        assert!(render_toast(&snap).is_empty());

        snap.notification = Some("💖 Heart found! 1/3".to_string());
        let html = render_toast(&snap);
        assert!(html.contains("💖 Heart found! 1/3"));
        assert!(html.contains(r#"data-action="dismiss""#));
    }
}
