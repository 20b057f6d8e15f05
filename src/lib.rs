//! A terminal music player with named, persistent playlists.
//!
//! [`store`] keeps the playlists and writes them through to disk,
//! [`audio`] plays one track at a time, and [`app`] binds the two to the
//! keyboard. [`runtime::run`] wires everything to a terminal.

pub mod app;
pub mod audio;
pub mod config;
pub mod library;
pub mod logging;
pub mod runtime;
pub mod store;
pub mod ui;
