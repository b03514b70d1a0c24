use crate::models::{PlacedWord, Position};

/// Padding added around a letter to size a grid cell
pub const CELL_PADDING: u32 = 20;

/// Pixel geometry of a grid drawn below a title banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Cells per side
    pub size: usize,
    pub cell_size: u32,
    /// Height of the banner above the first grid row
    pub banner_height: u32,
}

impl GridLayout {
    pub fn new(size: usize, font_size: u32, banner_height: u32) -> Self {
        Self {
            size,
            cell_size: font_size + CELL_PADDING,
            banner_height,
        }
    }

    /// Width and height of the square grid area
    pub fn grid_pixels(&self) -> u32 {
        self.size as u32 * self.cell_size
    }

    /// Full image size, banner included
    pub fn image_dimensions(&self) -> (u32, u32) {
        let grid = self.grid_pixels();
        (grid, self.banner_height + grid)
    }

    /// Pixel center of a cell
    pub fn cell_center(&self, pos: Position) -> (f32, f32) {
        let half = self.cell_size as f32 / 2.0;
        (
            pos.col as f32 * self.cell_size as f32 + half,
            pos.row as f32 * self.cell_size as f32 + half + self.banner_height as f32,
        )
    }

    /// Segment joining the centers of a word's first and last cells
    pub fn highlight_segment(&self, placed: &PlacedWord) -> ((f32, f32), (f32, f32)) {
        (self.cell_center(placed.start), self.cell_center(placed.end))
    }
}

/// Vertical placement of stacked, centered title lines
#[derive(Debug, Clone, PartialEq)]
pub struct BannerLayout {
    /// Top edge of each line
    pub offsets: Vec<f32>,
    pub height: u32,
}

impl BannerLayout {
    /// Stack lines of the given heights starting at `top` with `gap` between
    /// them; the banner is their total height plus `padding`.
    pub fn stack(line_heights: &[u32], top: f32, gap: f32, padding: u32) -> Self {
        let mut offsets = Vec::with_capacity(line_heights.len());
        let mut y = top;
        for height in line_heights {
            offsets.push(y);
            y += *height as f32 + gap;
        }

        Self {
            offsets,
            height: line_heights.iter().sum::<u32>() + padding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;

    #[test]
    fn test_cell_size_from_font() {
        let layout = GridLayout::new(10, 20, 0);
        assert_eq!(layout.cell_size, 40);
        assert_eq!(layout.grid_pixels(), 400);
        assert_eq!(layout.image_dimensions(), (400, 400));
    }

    #[test]
    fn test_cell_center_includes_banner() {
        let layout = GridLayout::new(10, 20, 90);
        assert_eq!(layout.cell_center(Position::new(0, 0)), (20.0, 110.0));
        assert_eq!(layout.cell_center(Position::new(2, 3)), (140.0, 190.0));
        assert_eq!(layout.image_dimensions(), (400, 490));
    }

    #[test]
    fn test_highlight_segment_spans_word() {
        let layout = GridLayout::new(12, 20, 0);
        let placed = PlacedWord {
            word: "moon".to_string(),
            start: Position::new(1, 2),
            end: Position::new(4, 5),
            direction: Direction::Diagonal,
        };
        assert_eq!(
            layout.highlight_segment(&placed),
            ((100.0, 60.0), (220.0, 180.0))
        );
    }

    #[test]
    fn test_banner_stacks_lines() {
        // Puzzle banner: first line at F, second at 2F + h1
        let banner = BannerLayout::stack(&[30, 24], 20.0, 20.0, 60);
        assert_eq!(banner.offsets, vec![20.0, 70.0]);
        assert_eq!(banner.height, 114);
    }
}
