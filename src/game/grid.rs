use super::action::Direction;

/// A position on the game grid.
///
/// Coordinates are signed so that a candidate head one step past an edge is
/// representable before it is classified as a wall hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell offset by a raw delta.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbouring cell one unit step in `direction`.
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }
}

/// Pixel-space rectangle covered by one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Discrete cell addressing over a fixed-size pixel canvas.
///
/// Grid dimensions are the canvas dimensions divided by the cell size; a
/// canvas smaller than one cell still yields a 1x1 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub cell_size: u32,
}

impl Grid {
    pub fn from_canvas(canvas_width: u32, canvas_height: u32, cell_size: u32) -> Self {
        Self {
            width: ((canvas_width / cell_size) as i32).max(1),
            height: ((canvas_height / cell_size) as i32).max(1),
            cell_size,
        }
    }

    /// Whether `cell` lies inside the playable area.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// The fixed session start cell.
    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    /// Cell containing the given canvas pixel.
    pub fn to_cell(&self, px: u32, py: u32) -> Cell {
        Cell::new(
            (px / self.cell_size) as i32,
            (py / self.cell_size) as i32,
        )
    }

    /// Canvas rectangle covered by `cell`.
    pub fn to_pixel_rect(&self, cell: Cell) -> PixelRect {
        PixelRect {
            x: cell.x * self.cell_size as i32,
            y: cell.y * self.cell_size as i32,
            width: self.cell_size,
            height: self.cell_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_stepping() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.step(Direction::Right), Cell::new(6, 5));
        assert_eq!(cell.step(Direction::Left), Cell::new(4, 5));
        assert_eq!(cell.step(Direction::Down), Cell::new(5, 6));
        assert_eq!(cell.step(Direction::Up), Cell::new(5, 4));
    }

    #[test]
    fn grid_dimensions_from_canvas() {
        let grid = Grid::from_canvas(400, 400, 20);
        assert_eq!(grid.width, 20);
        assert_eq!(grid.height, 20);
        assert_eq!(grid.center(), Cell::new(10, 10));
    }

    #[test]
    fn bounds_checking() {
        let grid = Grid::from_canvas(200, 200, 10);
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(19, 19)));
        assert!(!grid.contains(Cell::new(-1, 0)));
        assert!(!grid.contains(Cell::new(20, 0)));
        assert!(!grid.contains(Cell::new(0, 20)));
    }

    #[test]
    fn pixel_conversions_round_down() {
        let grid = Grid::from_canvas(400, 400, 20);
        assert_eq!(grid.to_cell(0, 0), Cell::new(0, 0));
        assert_eq!(grid.to_cell(19, 39), Cell::new(0, 1));
        assert_eq!(grid.to_cell(20, 40), Cell::new(1, 2));

        let rect = grid.to_pixel_rect(Cell::new(3, 2));
        assert_eq!(rect, PixelRect { x: 60, y: 40, width: 20, height: 20 });
    }

    #[test]
    fn degenerate_canvas_still_has_one_cell() {
        let grid = Grid::from_canvas(4, 4, 5);
        assert_eq!((grid.width, grid.height), (1, 1));
    }
}
