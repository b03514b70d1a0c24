use std::io::Cursor;

use ab_glyph::{FontArc, PxScale};
use chrono::NaiveDate;
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_text_mut, text_size};

use crate::models::{Grid, Position, WordCoordinates};

use super::{
    layout::{BannerLayout, GridLayout},
    ColorScheme, RenderError, RenderSettings,
};

pub const GAME_TITLE: &str = "Word Search Game";
pub const SOLUTION_TITLE: &str = "Solution for:";
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// A rendered image and the geometry used to draw its grid
pub struct RenderedPuzzle {
    pub image: RgbImage,
    pub layout: GridLayout,
}

struct TitleLine {
    text: String,
    scale: PxScale,
}

impl TitleLine {
    fn new(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            scale: PxScale::from(size),
        }
    }
}

/// Puzzle image: the game title and date above the letter grid
pub fn render_puzzle(
    grid: &Grid,
    date: NaiveDate,
    font: &FontArc,
    scheme: &ColorScheme,
    settings: &RenderSettings,
) -> RenderedPuzzle {
    let f = settings.font_size as f32;
    let title_size = f + 10.0;
    let lines = [
        TitleLine::new(GAME_TITLE, title_size),
        TitleLine::new(date.format(DATE_FORMAT).to_string(), title_size),
    ];
    let heights = line_heights(&lines, font);
    let banner = BannerLayout::stack(&heights, f, f, 3 * settings.font_size);

    compose(grid, &lines, &banner, font, scheme, settings)
}

/// Solution image: a "Solution for:" banner above the grid, with a line
/// drawn through every placed word
pub fn render_solution(
    grid: &Grid,
    coordinates: &WordCoordinates,
    date: NaiveDate,
    font: &FontArc,
    scheme: &ColorScheme,
    settings: &RenderSettings,
) -> RenderedPuzzle {
    let f = settings.font_size as f32;
    let lines = [
        TitleLine::new(SOLUTION_TITLE, (f * 1.3).floor()),
        TitleLine::new(GAME_TITLE, f + 10.0),
        TitleLine::new(date.format(DATE_FORMAT).to_string(), f),
    ];
    let heights = line_heights(&lines, font);
    let banner = BannerLayout::stack(&heights, f / 2.0, f / 2.0, 3 * settings.font_size);

    let mut rendered = compose(grid, &lines, &banner, font, scheme, settings);
    draw_highlights(
        &mut rendered.image,
        coordinates,
        &rendered.layout,
        scheme.highlight,
        settings.line_width,
    );
    rendered
}

/// Draw a line from the first to the last cell of every placed word
pub fn draw_highlights(
    canvas: &mut RgbImage,
    coordinates: &WordCoordinates,
    layout: &GridLayout,
    color: Rgb<u8>,
    line_width: u32,
) {
    let reach = (line_width.max(1) as i32 - 1) / 2;
    for placed in coordinates {
        let ((x0, y0), (x1, y1)) = layout.highlight_segment(placed);
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                let (dx, dy) = (dx as f32, dy as f32);
                draw_line_segment_mut(canvas, (x0 + dx, y0 + dy), (x1 + dx, y1 + dy), color);
            }
        }
    }
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn line_heights(lines: &[TitleLine], font: &FontArc) -> Vec<u32> {
    lines
        .iter()
        .map(|line| text_size(line.scale, font, &line.text).1)
        .collect()
}

fn compose(
    grid: &Grid,
    lines: &[TitleLine],
    banner: &BannerLayout,
    font: &FontArc,
    scheme: &ColorScheme,
    settings: &RenderSettings,
) -> RenderedPuzzle {
    let layout = GridLayout::new(grid.len(), settings.font_size, banner.height);
    let (width, height) = layout.image_dimensions();
    let mut image = RgbImage::from_pixel(width, height, scheme.background);

    for (line, top) in lines.iter().zip(&banner.offsets) {
        let (text_width, _) = text_size(line.scale, font, &line.text);
        let x = (width as f32 - text_width as f32) / 2.0;
        draw_text_mut(
            &mut image,
            scheme.text,
            x as i32,
            *top as i32,
            line.scale,
            font,
            &line.text,
        );
    }

    let scale = PxScale::from(settings.font_size as f32);
    let mut buf = [0u8; 4];
    for (row, letters) in grid.iter().enumerate() {
        for (col, letter) in letters.iter().enumerate() {
            let text = letter.encode_utf8(&mut buf);
            let (w, h) = text_size(scale, font, text);
            let (cx, cy) = layout.cell_center(Position::new(row, col));
            draw_text_mut(
                &mut image,
                scheme.text,
                (cx - w as f32 / 2.0) as i32,
                (cy - h as f32 / 2.0) as i32,
                scale,
                font,
                text,
            );
        }
    }

    RenderedPuzzle { image, layout }
}
