//! Terminal front end for blockfall.
//!
//! Game state is rendered into a plain framebuffer first and flushed to the
//! terminal afterwards, so the view can be tested without a terminal and
//! each frame only writes the cells that changed.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
