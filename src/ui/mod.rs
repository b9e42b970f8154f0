//! Presentation helpers
//!
//! Pure functions from a [`Snapshot`](crate::session::Snapshot) to text,
//! geometry and markup. Nothing here touches the DOM.

pub mod copy;
pub mod layout;
pub mod view;

pub use view::{ViewOptions, render_app, render_toast};
