//! Dense 2D grids addressed by signed points.

use anyhow::{bail, ensure};
use std::ops::{Add, Index, IndexMut};

/// A position on a grid (or on the infinite plane around one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub row: i64,
    pub col: i64,
}

impl Point {
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// The neighbouring point one step in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        self.offset(dir, 1)
    }

    /// The point `n` steps away in `dir`.
    pub fn offset(self, dir: Direction, n: i64) -> Self {
        let (dr, dc) = dir.delta();
        Self::new(self.row + dr * n, self.col + dc * n)
    }

    pub fn manhattan(self, other: Self) -> i64 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// Orthogonal neighbours in `Direction::ALL` order.
    pub fn neighbors4(self) -> [Self; 4] {
        Direction::ALL.map(|dir| self.step(dir))
    }

    /// All eight surrounding points.
    pub fn neighbors8(self) -> impl Iterator<Item = Self> {
        (-1..=1)
            .flat_map(|dr| (-1..=1).map(move |dc| (dr, dc)))
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .map(move |(dr, dc)| Self::new(self.row + dr, self.col + dc))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.row + rhs.row, self.col + rhs.col)
    }
}

/// Compass direction on a grid where rows grow downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Clockwise, starting from `Up`.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// (row, col) delta of one step.
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub const fn turn_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    pub const fn turn_left(self) -> Self {
        self.turn_right().opposite()
    }

    /// Stable index in `0..4`, matching `ALL`.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Row-major rectangular grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// A `width` x `height` grid filled with `fill`.
    pub fn new(width: usize, height: usize, fill: T) -> Self
    where
        T: Clone,
    {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Build from rows, which must all have the same non-zero length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> anyhow::Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        ensure!(height > 0 && width > 0, "grid is empty");
        let mut cells = Vec::with_capacity(width * height);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                bail!(
                    "row {} has {} cells, expected {}",
                    idx + 1,
                    row.len(),
                    width
                );
            }
            cells.extend(row);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse a character map, converting each cell with `f`.
    pub fn parse<F>(input: &str, mut f: F) -> anyhow::Result<Self>
    where
        F: FnMut(Point, char) -> anyhow::Result<T>,
    {
        let rows = input
            .trim()
            .lines()
            .enumerate()
            .map(|(row, line)| {
                line.trim_end()
                    .chars()
                    .enumerate()
                    .map(|(col, c)| f(Point::new(row as i64, col as i64), c))
                    .collect::<anyhow::Result<Vec<T>>>()
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.row >= 0 && p.col >= 0 && (p.row as usize) < self.height && (p.col as usize) < self.width
    }

    /// Flat index of `p`, if it lies on the grid.
    pub fn index_of(&self, p: Point) -> Option<usize> {
        self.contains(p)
            .then(|| p.row as usize * self.width + p.col as usize)
    }

    pub fn point_of(&self, index: usize) -> Point {
        Point::new((index / self.width) as i64, (index % self.width) as i64)
    }

    pub fn get(&self, p: Point) -> Option<&T> {
        self.index_of(p).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        self.index_of(p).map(move |i| &mut self.cells[i])
    }

    /// Lookup on the grid repeated infinitely in every direction.
    pub fn get_wrapped(&self, p: Point) -> &T {
        let row = p.row.rem_euclid(self.height as i64) as usize;
        let col = p.col.rem_euclid(self.width as i64) as usize;
        &self.cells[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width)
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + use<T> {
        let width = self.width;
        (0..self.width * self.height).map(move |i| Point::new((i / width) as i64, (i % width) as i64))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.points().zip(self.cells.iter())
    }

    /// First point whose cell satisfies `pred`.
    pub fn position<P>(&self, mut pred: P) -> Option<Point>
    where
        P: FnMut(&T) -> bool,
    {
        self.cells.iter().position(|c| pred(c)).map(|i| self.point_of(i))
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self
    where
        T: Clone,
    {
        let cells = (0..self.width)
            .flat_map(|col| (0..self.height).map(move |row| (row, col)))
            .map(|(row, col)| self.cells[row * self.width + col].clone())
            .collect();
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl<T> Index<Point> for Grid<T> {
    type Output = T;

    fn index(&self, p: Point) -> &T {
        match self.index_of(p) {
            Some(i) => &self.cells[i],
            None => panic!("{:?} outside {}x{} grid", p, self.width, self.height),
        }
    }
}

impl<T> IndexMut<Point> for Grid<T> {
    fn index_mut(&mut self, p: Point) -> &mut T {
        match self.index_of(p) {
            Some(i) => &mut self.cells[i],
            None => panic!("{:?} outside {}x{} grid", p, self.width, self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid<char> {
        Grid::parse("abc\ndef", |_, c| Ok(c)).unwrap()
    }

    #[test]
    fn test_parse_dimensions_and_lookup() {
        let grid = sample();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.get(Point::new(1, 2)), Some(&'f'));
        assert_eq!(grid.get(Point::new(2, 0)), None);
        assert_eq!(grid.get(Point::new(0, -1)), None);
        assert_eq!(grid[Point::new(0, 1)], 'b');
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert!(Grid::parse("abc\nde", |_, c| Ok(c)).is_err());
        assert!(Grid::<char>::from_rows(vec![]).is_err());
    }

    #[test]
    fn test_wrapped_lookup() {
        let grid = sample();
        assert_eq!(*grid.get_wrapped(Point::new(-1, -1)), 'f');
        assert_eq!(*grid.get_wrapped(Point::new(4, 7)), 'b');
    }

    #[test]
    fn test_transpose() {
        let t = sample().transpose();
        assert_eq!((t.width(), t.height()), (2, 3));
        assert_eq!(t.row(0), &['a', 'd']);
        assert_eq!(t.row(2), &['c', 'f']);
    }

    #[test]
    fn test_direction_turns() {
        for dir in Direction::ALL {
            assert_eq!(dir.turn_left().turn_right(), dir);
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(Direction::ALL[dir.index()], dir);
        }
        assert_eq!(Direction::Up.turn_left(), Direction::Left);
        assert_eq!(Point::new(2, 2).offset(Direction::Left, 3), Point::new(2, -1));
    }

    #[test]
    fn test_neighbors8_excludes_self() {
        let p = Point::new(5, 5);
        let around: Vec<Point> = p.neighbors8().collect();
        assert_eq!(around.len(), 8);
        assert!(!around.contains(&p));
    }
}
