//! Single-line status area at the bottom of the screen.

mod render;
mod state;

pub use render::render_status_line;
pub use state::{Notice, StatusLine, Tone};
