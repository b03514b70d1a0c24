// Raster output for generated puzzles

pub mod color;
pub mod draw;
pub mod fonts;
pub mod layout;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::GeneratedPuzzle;

pub use color::ColorScheme;
pub use fonts::FontCatalog;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no fonts are loaded")]
    NoFonts,
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    /// Base letter size; cells and titles scale from it
    pub font_size: u32,
    /// Stroke width of solution lines
    pub line_width: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            font_size: 20,
            line_width: 3,
        }
    }
}

/// Look chosen for one puzzle
#[derive(Debug, Clone, Default)]
pub struct PuzzleStyle {
    pub colors: ColorScheme,
    /// Requested font name, `None` for the catalog default
    pub font: Option<String>,
}

/// Turns generated puzzles into PNG downloads
pub struct Renderer {
    fonts: FontCatalog,
    settings: RenderSettings,
}

impl Renderer {
    pub fn new(fonts: FontCatalog, settings: RenderSettings) -> Self {
        Self { fonts, settings }
    }

    pub fn fonts(&self) -> &FontCatalog {
        &self.fonts
    }

    /// PNG of the puzzle as handed to players
    pub fn puzzle_png(
        &self,
        puzzle: &GeneratedPuzzle,
        style: &PuzzleStyle,
        date: NaiveDate,
    ) -> Result<Vec<u8>, RenderError> {
        let font = self.fonts.resolve(style.font.as_deref())?;
        let rendered = draw::render_puzzle(&puzzle.grid, date, font, &style.colors, &self.settings);
        draw::encode_png(&rendered.image)
    }

    /// PNG of the puzzle with every placed word struck through
    pub fn solution_png(
        &self,
        puzzle: &GeneratedPuzzle,
        style: &PuzzleStyle,
        date: NaiveDate,
    ) -> Result<Vec<u8>, RenderError> {
        let font = self.fonts.resolve(style.font.as_deref())?;
        let rendered = draw::render_solution(
            &puzzle.grid,
            &puzzle.coordinates,
            date,
            font,
            &style.colors,
            &self.settings,
        );
        draw::encode_png(&rendered.image)
    }
}
