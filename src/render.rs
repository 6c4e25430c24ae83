use tracing::trace;

use crate::CellOffset;
use crate::PixelSize;
use crate::canvas::Rect;
use crate::canvas::Surface;
use crate::color::Rgba;
use crate::config::Config;
use crate::grid::Grid;

/// How many cells of `cell_size` pixels fit on a surface of the given size. Partial cells are
/// dropped.
pub fn grid_dimensions((w, h): (PixelSize, PixelSize), cell_size: PixelSize) -> (usize, usize) {
    assert!(cell_size > 0, "cell size must be positive");

    ((w / cell_size) as usize, (h / cell_size) as usize)
}

/// Top left pixel of the cell at `(x, y)`
pub fn board_coordinates(cell_size: PixelSize, (x, y): (usize, usize)) -> (PixelSize, PixelSize) {
    (x as PixelSize * cell_size, y as PixelSize * cell_size)
}

/// Draws a `size` by `size` square whose top left pixel is `(x, y)`
pub fn draw_square<S>(surface: &mut S, (x, y): (PixelSize, PixelSize), color: Rgba, size: PixelSize)
where
    S: Surface + ?Sized,
{
    surface.fill_rect(Rect::square(x, y, size), color);
}

/// Paints every cell of `grid`: live cells in the live color, dead ones in the dead color.
pub fn draw_grid<S>(surface: &mut S, grid: &Grid, config: &Config)
where
    S: Surface + ?Sized,
{
    let size = config.cell_size;

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let color = if grid.get(x as CellOffset, y as CellOffset) {
                config.live_color
            } else {
                config.dead_color
            };

            draw_square(surface, board_coordinates(size, (x, y)), color, size);
        }
    }

    trace!("drew {}x{} cells", grid.width(), grid.height());
}

#[cfg(test)]
mod test {
    use super::board_coordinates;
    use super::draw_grid;
    use super::grid_dimensions;
    use crate::canvas::Canvas;
    use crate::canvas::Rect;
    use crate::canvas::Surface;
    use crate::color::Rgba;
    use crate::config::Config;
    use crate::grid::Grid;

    #[test]
    fn dimensions_truncate() {
        assert_eq!(grid_dimensions((800, 600), 10), (80, 60));
        assert_eq!(grid_dimensions((805, 609), 10), (80, 60));
        assert_eq!(grid_dimensions((9, 30), 10), (0, 3));
    }

    #[test]
    fn coordinates_scale_with_cell_size() {
        assert_eq!(board_coordinates(10, (0, 0)), (0, 0));
        assert_eq!(board_coordinates(10, (3, 7)), (30, 70));
    }

    #[test]
    fn paints_live_and_dead_cells() {
        let config = Config {
            cell_size: 2,
            ..Config::default()
        };

        let grid = Grid::from_cells(3, 2, [(1, 0), (2, 1)]);
        let mut canvas = Canvas::new(6, 4, config.background);
        draw_grid(&mut canvas, &grid, &config);

        let live = config.live_color;
        let dead = config.dead_color.over(config.background);

        for py in 0..4 {
            for px in 0..6 {
                let alive = grid.get(px as i64 / 2, py as i64 / 2);
                let expected = if alive { live } else { dead };

                assert_eq!(canvas.pixel(px, py), expected, "pixel ({px}, {py})");
            }
        }
    }

    /// Records every draw call instead of painting
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(Rect, Rgba)>,
    }

    impl Surface for Recorder {
        fn size(&self) -> (u32, u32) {
            (100, 100)
        }

        fn fill_rect(&mut self, rect: Rect, color: Rgba) {
            self.calls.push((rect, color));
        }
    }

    #[test]
    fn one_square_per_cell() {
        let config = Config::default();
        let grid = Grid::from_cells(2, 2, [(0, 1)]);
        let mut recorder = Recorder::default();

        draw_grid(&mut recorder, &grid, &config);

        assert_eq!(
            recorder.calls,
            [
                (Rect::square(0, 0, 10), config.dead_color),
                (Rect::square(10, 0, 10), config.dead_color),
                (Rect::square(0, 10, 10), config.live_color),
                (Rect::square(10, 10, 10), config.dead_color),
            ]
        );
    }
}
