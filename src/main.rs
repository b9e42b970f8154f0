//! Birthday Hunt entry point
//!
//! Browser: renders into the DOM and drives the session clock from
//! requestAnimationFrame. Native: a line-oriented terminal driver.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, KeyboardEvent, MouseEvent};

    use birthday_hunt::audio::AudioManager;
    use birthday_hunt::platform::{Presenter, pump};
    use birthday_hunt::session::{GameSession, Snapshot, SoundKind};
    use birthday_hunt::settings::Settings;
    use birthday_hunt::ui::{ViewOptions, render_app, render_toast};

    thread_local! {
        /// The one live session; every callback holds a `Weak` to it
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    /// Writes snapshots into the DOM and plays requested sounds
    struct DomPresenter {
        app: Element,
        toast: Element,
        audio: AudioManager,
        view: ViewOptions,
        last: Option<Snapshot>,
    }

    impl Presenter for DomPresenter {
        fn play_sound(&mut self, kind: SoundKind) {
            self.audio.play(kind);
        }

        fn show_notification(&mut self, text: &str, duration_ms: u32) {
            log::debug!("Toast ({}ms): {}", duration_ms, text);
        }

        fn render(&mut self, snapshot: &Snapshot) {
            let board = |s: &Snapshot| Snapshot {
                notification: None,
                ..s.clone()
            };
            let (board_changed, toast_changed) = match &self.last {
                Some(last) => (
                    board(last) != board(snapshot),
                    last.notification != snapshot.notification,
                ),
                None => (true, true),
            };

            // Rebuilding the board restarts CSS animations, so leave it alone
            // when only the toast changed
            if board_changed {
                self.app.set_inner_html(&render_app(snapshot, &self.view));
            }
            if toast_changed {
                self.toast.set_inner_html(&render_toast(snapshot));
            }
            self.last = Some(snapshot.clone());
        }
    }

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        presenter: DomPresenter,
        settings: Settings,
        last_time: f64,
        carry_ms: f64,
    }

    impl Game {
        /// Route a delegated click to the controller
        fn handle_action(&mut self, action: &str, id: Option<u8>) {
            let outcome = match (action, id) {
                ("start", _) => Some(self.session.start()),
                ("heart", Some(id)) => Some(self.session.click_heart(id)),
                ("gift", Some(id)) => Some(self.session.click_gift(id)),
                ("slice", Some(index)) => Some(self.session.click_cake_slice(index)),
                ("dismiss", _) => {
                    self.session.dismiss_notification();
                    None
                }
                _ => {
                    log::warn!("Unhandled action {:?} (id {:?})", action, id);
                    None
                }
            };
            if let Some(outcome) = outcome {
                log::debug!("{} {:?} -> {:?}", action, id, outcome);
            }
            pump(&mut self.session, &mut self.presenter);
        }

        /// Advance the session clock to `time` (ms, rAF timestamp)
        fn frame(&mut self, time: f64) {
            if self.last_time > 0.0 {
                self.carry_ms += (time - self.last_time).max(0.0);
            }
            self.last_time = time;
            // Keep the sub-millisecond remainder so timers don't drift late
            let elapsed = self.carry_ms.floor();
            self.carry_ms -= elapsed;
            self.session.advance(elapsed as u64);
            pump(&mut self.session, &mut self.presenter);
        }

        /// Flip the persistent mute preference
        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.presenter.audio.set_muted(self.settings.muted);
            self.settings.save();
            log::info!("Audio {}", if self.settings.muted { "muted" } else { "unmuted" });
        }

        fn set_focus_muted(&mut self, muted: bool) {
            if !self.settings.mute_on_blur {
                return;
            }
            let muted = muted || self.settings.muted;
            if self.presenter.audio.is_muted() != muted {
                self.presenter.audio.set_muted(muted);
                log::info!("Audio {}", if muted { "muted (focus lost)" } else { "unmuted" });
            }
        }
    }

    fn element(document: &web_sys::Document, id: &str) -> Result<Element, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }
        log::info!("Birthday Hunt starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let app = element(&document, "app")?;
        let toast = element(&document, "toast")?;

        let settings = Settings::load();
        let view = ViewOptions {
            decor_seed: js_sys::Date::now() as u64,
            reduced_motion: settings.reduced_motion,
        };
        let presenter = DomPresenter {
            app: app.clone(),
            toast: toast.clone(),
            audio: AudioManager::new(&settings),
            view,
            last: None,
        };
        let game = Rc::new(RefCell::new(Game {
            session: GameSession::with_timings(settings.timings),
            presenter,
            settings,
            last_time: 0.0,
            carry_ms: 0.0,
        }));
        {
            let mut g = game.borrow_mut();
            let g = &mut *g;
            pump(&mut g.session, &mut g.presenter);
        }

        let weak = Rc::downgrade(&game);
        GAME.with(|slot| *slot.borrow_mut() = Some(game));

        setup_click_delegation(&app, weak.clone())?;
        setup_click_delegation(&toast, weak.clone())?;
        setup_keyboard(&window, weak.clone())?;
        setup_focus_mute(&window, &document, weak.clone())?;

        request_animation_frame(weak);
        log::info!("Birthday Hunt running!");
        Ok(())
    }

    /// Read `data-action` / `data-id` from the clicked element or its ancestors
    fn action_of(event: &MouseEvent) -> Option<(String, Option<u8>)> {
        let target: Element = event.target()?.dyn_into().ok()?;
        let el = target.closest("[data-action]").ok()??;
        let action = el.get_attribute("data-action")?;
        let id = el.get_attribute("data-id").and_then(|v| v.parse().ok());
        Some((action, id))
    }

    fn setup_click_delegation(root: &Element, game: Weak<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some((action, id)) = action_of(&event) else {
                return;
            };
            let Some(game) = game.upgrade() else {
                return;
            };
            game.borrow_mut().handle_action(&action, id);
        });
        root.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Weak<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(game) = game.upgrade() else {
                return;
            };
            match event.key().as_str() {
                "Escape" => game.borrow_mut().handle_action("dismiss", None),
                "m" | "M" => game.borrow_mut().toggle_mute(),
                _ => {}
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_focus_mute(
        window: &web_sys::Window,
        document: &web_sys::Document,
        game: Weak<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                if let Some(game) = game.upgrade() {
                    game.borrow_mut().set_focus_muted(hidden);
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur / focus
        for (event, muted) in [("blur", true), ("focus", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                if let Some(game) = game.upgrade() {
                    game.borrow_mut().set_focus_muted(muted);
                }
            });
            window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(game: Weak<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::error!("requestAnimationFrame failed; timers stopped");
        }
        closure.forget();
    }

    fn game_loop(game: Weak<RefCell<Game>>, time: f64) {
        // Session gone: pending timers go with it
        let Some(rc) = game.upgrade() else {
            log::info!("Session dropped, stopping frame loop");
            return;
        };
        rc.borrow_mut().frame(time);
        drop(rc);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod terminal {
    use std::io::{self, BufRead};

    use thiserror::Error;

    use birthday_hunt::platform::{ConsolePresenter, describe, pump};
    use birthday_hunt::session::{GameSession, Outcome};
    use birthday_hunt::settings::Settings;

    pub const HELP: &str = "\
Commands:
  start            begin (unlocks sound)
  heart <1-3>      click a hidden heart
  gift <1-4>       open a gift
  slice <0-7>      click a cake slice
  dismiss          close the notification
  wait <ms>        let time pass
  status           show the current state
  help             show this list
  quit             leave";

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Command {
        Start,
        Heart(u8),
        Gift(u8),
        Slice(u8),
        Dismiss,
        Wait(u64),
        Status,
        Help,
        Quit,
    }

    #[derive(Error, Debug, PartialEq, Eq)]
    pub enum CommandError {
        #[error("unknown command '{0}' (try 'help')")]
        Unknown(String),
        #[error("'{0}' needs a number")]
        MissingArgument(&'static str),
        #[error("'{0}' is not a valid number")]
        BadNumber(String),
    }

    fn number<T: std::str::FromStr>(
        name: &'static str,
        arg: Option<&str>,
    ) -> Result<T, CommandError> {
        let arg = arg.ok_or(CommandError::MissingArgument(name))?;
        arg.parse()
            .map_err(|_| CommandError::BadNumber(arg.to_string()))
    }

    pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(None);
        };
        let arg = words.next();
        let command = match word.to_lowercase().as_str() {
            "start" => Command::Start,
            "heart" | "h" => Command::Heart(number("heart", arg)?),
            "gift" | "g" => Command::Gift(number("gift", arg)?),
            "slice" | "s" => Command::Slice(number("slice", arg)?),
            "dismiss" | "d" => Command::Dismiss,
            "wait" | "w" => Command::Wait(number("wait", arg)?),
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }

    fn report(outcome: Outcome) {
        if let Outcome::Ignored(reason) = outcome {
            println!("(nothing happens: {reason})");
        }
    }

    pub fn run() {
        let settings = Settings::load();
        let mut session = GameSession::with_timings(settings.timings);
        let mut presenter = ConsolePresenter::default();

        println!("{HELP}\n");
        pump(&mut session, &mut presenter);

        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::error!("Failed to read input: {}", e);
                    break;
                }
            };
            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            };
            match command {
                Command::Start => report(session.start()),
                Command::Heart(id) => report(session.click_heart(id)),
                Command::Gift(id) => report(session.click_gift(id)),
                Command::Slice(index) => report(session.click_cake_slice(index)),
                Command::Dismiss => session.dismiss_notification(),
                Command::Wait(ms) => session.advance(ms),
                Command::Status => println!("{}\n", describe(&session.snapshot())),
                Command::Help => println!("{HELP}\n"),
                Command::Quit => break,
            }
            pump(&mut session, &mut presenter);
        }
        log::info!("Bye!");
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Birthday Hunt (native) starting...");
    log::info!("Terminal mode - run with `trunk serve` for the web version");
    terminal::run();
}
