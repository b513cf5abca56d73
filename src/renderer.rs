mod palette;
mod snippet;

pub use palette::render_palette;
pub use snippet::{canvas_size, render_snippet};
