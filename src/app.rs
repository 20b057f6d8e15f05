//! Application module: the window's state and the operations bound to its
//! controls.
//!
//! The `App` model lives in `app::model` and holds the playlist store, the
//! metadata cache, selection and popup state. Operations that play audio
//! live in `app::actions` and take the playback engine by reference.

mod actions;
mod model;
pub mod navigation;
mod popup;

pub use model::*;
pub use popup::{ConfirmAction, InputPurpose, Popup};

#[cfg(test)]
mod tests;
