use gpui::*;

pub const DEFAULT_PALETTE_SIZE: usize = 50;

#[derive(Clone, Debug)]
pub struct HistTheme {
    pub background: Hsla,
    pub line: Hsla,
    pub fill: Hsla,
    pub selection_fill: Hsla,
    pub selection_border: Hsla,
    pub tooltip_background: Hsla,
    pub tooltip_text: Hsla,
    /// Colors assigned to contour levels, from low to high values.
    pub palette: Vec<Hsla>,
}

/// Rainbow palette running from violet (low) to red (high).
pub fn rainbow_palette(size: usize) -> Vec<Hsla> {
    let n = size.max(1);
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.0 } else { i as f32 / (n - 1) as f32 };
            hsla(0.75 * (1.0 - t), 0.9, 0.5, 1.0)
        })
        .collect()
}

impl Default for HistTheme {
    fn default() -> Self {
        Self {
            background: gpui::white(),
            line: gpui::blue(),
            fill: gpui::blue().alpha(0.3),
            selection_fill: gpui::blue().alpha(0.15),
            selection_border: gpui::blue().alpha(0.6),
            tooltip_background: gpui::black().alpha(0.8),
            tooltip_text: gpui::white(),
            palette: rainbow_palette(DEFAULT_PALETTE_SIZE),
        }
    }
}
