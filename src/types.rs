/// Geometry of an ANSI snippet render
#[derive(Clone, Debug, PartialEq)]
pub struct SnippetLayout {
    /// The pixel size of terminal text
    pub text_size: f32,
    /// The pixel size of the title
    pub title_size: f32,
    /// The vertical distance between two text lines
    pub line_height: u32,
    /// The margin around the whole image
    pub padding: u32,
    /// The widest image that will be produced
    pub max_width: u32,
    /// The shortest image that will be produced
    pub min_height: u32,
    /// The vertical space reserved for the title when sizing the image
    pub title_band: u32,
    /// How far below the top padding the first text line starts
    pub text_offset: u32,
    /// The line length assumed when the input has no visible characters at all
    pub fallback_columns: usize,
}

impl Default for SnippetLayout {
    fn default() -> Self {
        SnippetLayout {
            text_size: 14.0,
            title_size: 18.0,
            line_height: 20,
            padding: 20,
            max_width: 1400,
            min_height: 300,
            title_band: 50,
            text_offset: 40,
            fallback_columns: 80,
        }
    }
}

/// Geometry of a palette preview
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewLayout {
    pub width: u32,
    pub height: u32,
    pub text_size: f32,
    pub title_size: f32,
    pub padding: u32,
    /// The side of one color swatch
    pub cell_size: u32,
    /// The horizontal gap between swatches
    pub cell_gap: u32,
    /// The vertical distance between a label and what follows it
    pub label_height: u32,
}

impl Default for PreviewLayout {
    fn default() -> Self {
        PreviewLayout {
            width: 800,
            height: 600,
            text_size: 16.0,
            title_size: 24.0,
            padding: 20,
            cell_size: 60,
            cell_gap: 5,
            label_height: 25,
        }
    }
}
