//! Scoreboard overlays burned into highlight frames.

mod frame;
mod palette;
mod renderer;
mod scoreboard;
mod text;

pub use frame::Frame;
pub use palette::{TeamColors, team_colors};
pub use renderer::draw_text_with_background;
pub use scoreboard::{Label, Scoreboard, ScoreboardOverlay, TeamCaption};
pub use text::{TextBitmap, TextPainter};
