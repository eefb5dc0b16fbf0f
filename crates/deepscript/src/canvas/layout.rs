//! Greedy word wrapping and centered line placement for the text canvas.
//!
//! The canvas is a fixed-size surface. Text is broken into lines that fit
//! inside the surface width minus a margin, and the resulting block is
//! centered both horizontally and vertically.
//!
//! # Example
//!
//! ```
//! use deepscript::canvas::{CanvasLayout, CanvasOptions, GraphemeMeasure};
//!
//! let options = CanvasOptions::default().surface(200.0, 100.0);
//! let measure = GraphemeMeasure::new(10.0);
//! let layout = CanvasLayout::compute("the quick brown fox jumps", &options, &measure);
//!
//! assert!(layout.line_count() > 1);
//! for line in layout.lines() {
//!     assert!(line.width <= 160.0);
//! }
//! ```

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Measures the rendered width of a run of text.
pub trait TextMeasure {
    /// Width of `text` in surface units.
    fn width(&self, text: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f32,
{
    fn width(&self, text: &str) -> f32 {
        self(text)
    }
}

/// Charges a fixed advance per extended grapheme cluster.
///
/// No font metrics are consulted; the final rendering happens remotely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphemeMeasure {
    advance: f32,
}

impl GraphemeMeasure {
    /// Create a measure with the given per-grapheme advance.
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }

    /// Approximate advance for a font size (half an em per grapheme).
    pub fn for_font_size(font_size: f32) -> Self {
        Self::new(font_size * 0.5)
    }

    /// The per-grapheme advance.
    pub fn advance(&self) -> f32 {
        self.advance
    }
}

impl TextMeasure for GraphemeMeasure {
    fn width(&self, text: &str) -> f32 {
        text.graphemes(true).count() as f32 * self.advance
    }
}

/// Geometry of the canvas surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasOptions {
    /// Surface width.
    pub width: f32,
    /// Surface height.
    pub height: f32,
    /// Horizontal space subtracted from the width when wrapping.
    pub margin: f32,
    /// Vertical distance between consecutive baselines.
    pub line_height: f32,
    /// Font size the canvas is drawn with.
    pub font_size: f32,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 300.0,
            margin: 40.0,
            line_height: 30.0,
            font_size: 24.0,
        }
    }
}

impl CanvasOptions {
    /// Set the surface size.
    pub fn surface(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the wrapping margin.
    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the line height.
    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Maximum width a line may occupy.
    pub fn max_line_width(&self) -> f32 {
        (self.width - self.margin).max(0.0)
    }
}

/// Break `text` into lines no wider than `max_width`.
///
/// Paragraphs are separated by `\n`. Within a paragraph words are separated by
/// spaces and empty words are dropped. A word wider than `max_width` on its
/// own is placed alone on a line rather than split.
pub fn wrap_text(text: &str, max_width: f32, measure: &impl TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let mut current = String::new();

        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            let candidate = format!("{current} {word}");
            if measure.width(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// A single positioned line.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    /// The line's text.
    pub text: String,
    /// Horizontal center of the line.
    pub x: f32,
    /// Vertical center of the line.
    pub y: f32,
    /// Measured width.
    pub width: f32,
}

/// The laid-out content of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasLayout {
    lines: Vec<LayoutLine>,
    options: CanvasOptions,
}

impl CanvasLayout {
    /// Wrap and position `text` on the surface described by `options`.
    pub fn compute(text: &str, options: &CanvasOptions, measure: &impl TextMeasure) -> Self {
        let wrapped = wrap_text(text, options.max_line_width(), measure);
        let count = wrapped.len();
        let x = options.width / 2.0;
        let top = options.height / 2.0 - (count.saturating_sub(1) as f32 * options.line_height) / 2.0;

        let lines = wrapped
            .into_iter()
            .enumerate()
            .map(|(i, text)| LayoutLine {
                width: measure.width(&text),
                y: top + i as f32 * options.line_height,
                x,
                text,
            })
            .collect();

        Self {
            lines,
            options: *options,
        }
    }

    /// The positioned lines, top to bottom.
    pub fn lines(&self) -> &[LayoutLine] {
        &self.lines
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The options the layout was computed with.
    pub fn options(&self) -> &CanvasOptions {
        &self.options
    }
}
