//! Terminal renderer for the game.
//!
//! Rendering goes through a framebuffer instead of a widget toolkit:
//! [`GameView`] paints a snapshot into a [`FrameBuffer`] (pure, testable),
//! and [`TerminalRenderer`] writes only what changed since the last frame.
//! Board cells are two terminal columns wide to compensate for glyph
//! aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Hud, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
