use std::cmp::Ordering;

/// A cell coordinate on the vehicle grid. Unbounded in both directions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn min(self, other: Self) -> Self {
        Position::new(self.x.min(other.x), self.y.min(other.y))
    }

    pub fn max(self, other: Self) -> Self {
        Position::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// `None` when either coordinate leaves the `i32` range
    pub fn checked_add(self, offset: Self) -> Option<Self> {
        Some(Position::new(self.x.checked_add(offset.x)?, self.y.checked_add(offset.y)?))
    }

    /// The offset that moves this position onto the origin
    pub fn checked_neg(self) -> Option<Self> {
        Some(Position::new(self.x.checked_neg()?, self.y.checked_neg()?))
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}

/// Row-major order: rows first, then columns.
impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An inclusive cell rectangle. `start` is always the top left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub start: Position,
    pub end: Position,
}

impl Rectangle {
    /// Build a rectangle from two arbitrary corners (both inclusive)
    pub fn from_corners(p0: Position, p1: Position) -> Self {
        Self {
            start: p0.min(p1),
            end: p0.max(p1),
        }
    }

    pub fn width(&self) -> i32 {
        self.end.x.saturating_sub(self.start.x).saturating_add(1)
    }

    pub fn height(&self) -> i32 {
        self.end.y.saturating_sub(self.start.y).saturating_add(1)
    }

    /// Number of cells covered
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.start.x && pos.x <= self.end.x && pos.y >= self.start.y && pos.y <= self.end.y
    }

    /// Grow the rectangle so it includes `pos`
    pub fn include(&mut self, pos: Position) {
        self.start = self.start.min(pos);
        self.end = self.end.max(pos);
    }

    /// All covered cells in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (self.start.y..=self.end.y).flat_map(move |y| (self.start.x..=self.end.x).map(move |x| Position::new(x, y)))
    }
}

/// Cells on the straight line from `from` to `to`, both ends included.
///
/// Pointer moves arrive as samples; a stroke passes each pair of consecutive
/// samples through here so fast drags leave no gaps. Neighbouring cells in the
/// result touch by side or corner (Bresenham).
pub fn line_points(from: Position, to: Position) -> Vec<Position> {
    let run = (to.x - from.x).abs();
    let rise = (to.y - from.y).abs();
    let step_x = if from.x < to.x { 1 } else { -1 };
    let step_y = if from.y < to.y { 1 } else { -1 };

    let mut points = Vec::with_capacity(run.max(rise) as usize + 1);
    let mut cell = from;
    let mut err = run - rise;
    points.push(cell);

    while cell != to {
        let doubled = 2 * err;
        if doubled > -rise {
            err -= rise;
            cell.x += step_x;
        }
        if doubled < run {
            err += run;
            cell.y += step_y;
        }
        points.push(cell);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_order() {
        let mut cells = vec![Position::new(1, 1), Position::new(5, 0), Position::new(-3, 1)];
        cells.sort();
        assert_eq!(cells, vec![Position::new(5, 0), Position::new(-3, 1), Position::new(1, 1)]);
    }

    #[test]
    fn test_rectangle_from_any_corners() {
        let rect = Rectangle::from_corners(Position::new(2, -1), Position::new(-1, 3));
        assert_eq!(rect.start, Position::new(-1, -1));
        assert_eq!(rect.end, Position::new(2, 3));
        assert_eq!(rect.area(), 20);
        assert_eq!(rect.positions().count(), 20);
        assert!(rect.contains(Position::new(0, 0)));
        assert!(!rect.contains(Position::new(3, 0)));
    }

    #[test]
    fn test_line_points_are_connected() {
        let points = line_points(Position::new(0, 0), Position::new(5, 2));
        assert_eq!(points.first(), Some(&Position::new(0, 0)));
        assert_eq!(points.last(), Some(&Position::new(5, 2)));
        for pair in points.windows(2) {
            assert!((pair[1].x - pair[0].x).abs() <= 1 && (pair[1].y - pair[0].y).abs() <= 1);
        }
    }

    #[test]
    fn test_line_steep_and_backwards() {
        let points = line_points(Position::new(2, 3), Position::new(1, -1));
        assert_eq!(points.len(), 5);
        assert_eq!(points.last(), Some(&Position::new(1, -1)));
        let rows: Vec<i32> = points.iter().map(|p| p.y).collect();
        assert_eq!(rows, vec![3, 2, 1, 0, -1]);
    }

    #[test]
    fn test_checked_offsets() {
        assert_eq!(Position::new(2, -3).checked_add(Position::new(-2, 3)), Some(Position::new(0, 0)));
        assert_eq!(Position::new(i32::MAX, 0).checked_add(Position::new(1, 0)), None);
        assert_eq!(Position::new(-4, 7).checked_neg(), Some(Position::new(4, -7)));
        assert_eq!(Position::new(i32::MIN, 0).checked_neg(), None);
    }

    #[test]
    fn test_line_single_point() {
        assert_eq!(line_points(Position::new(4, 4), Position::new(4, 4)), vec![Position::new(4, 4)]);
    }
}
