use rand::Rng;
use rand::thread_rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fmt;
use itertools::Itertools;

use super::error::{self, Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    Mine,
    Empty
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnowledgeState {
    Unknown,
    Flag,
    Known
}

impl KnowledgeState {
    pub fn is_known(&self) -> bool{
        match *self {
            KnowledgeState::Known => true,
            _ => false
        }
    }

    pub fn is_flag(&self) -> bool{
        match *self {
            KnowledgeState::Flag => true,
            _ => false
        }
    }

    pub fn is_unknown(&self) -> bool{
        match *self {
            KnowledgeState::Unknown => true,
            _ => false
        }
    }
}

#[derive(Debug)]
pub struct Cell {
    pub content: Content,
    pub mined_neighbor_count: usize,
    pub knowledge: KnowledgeState
}

impl Cell {
    fn create_empty() -> Cell {
        Cell{content: Content::Empty, mined_neighbor_count: 0, knowledge: KnowledgeState::Unknown}
    }

    pub fn toggle_flag(&mut self){
        let new_state = match self.knowledge {
            KnowledgeState::Known => KnowledgeState::Known,
            KnowledgeState::Flag => KnowledgeState::Unknown,
            KnowledgeState::Unknown => KnowledgeState::Flag
        };
        self.knowledge = new_state;
    }

    fn to_str(&self) -> String {
        match (&self.knowledge, &self.content) {
            (KnowledgeState::Flag, _) => String::from("▶"),
            (KnowledgeState::Unknown, _) => String::from("□"),
            (_, Content::Mine) => String::from("X"),
            (_, Content::Empty) => {
                if self.mined_neighbor_count == 0{
                    String::from("_")
                }
                else{
                    self.mined_neighbor_count.to_string()
                }
            }
        }
    }
}

/// A cell coordinate, `Point(row, col)`. Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point(pub usize, pub usize);

impl Point {
    pub fn distance(&self, other: &Point) -> usize{
        //l-inf norm seems most appropriate for minesweeper
        (self.0 as i64 - other.0 as i64).abs().max((self.1 as i64 - other.1 as i64).abs()) as usize
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    height: usize,
    width: usize
}

impl BoardSize {
    pub fn new(height: usize, width: usize) -> BoardSize {
        BoardSize{height, width}
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Every point on the board, row-major.
    pub fn points(&self) -> Vec<Point> {
        (0..self.area()).filter_map(|x| self.point_from_integer(x)).collect()
    }

    pub fn point_from_integer(&self, x: usize) -> Option<Point> {
        if x >= self.area() {
            return None
        }
        Some(Point(x/self.width, x%self.width))
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.0 < self.height && point.1 < self.width
    }

    pub fn check(&self, point: &Point) -> error::Result<()> {
        if self.contains(point) {
            Ok(())
        } else {
            Err(Error::OutOfBounds{point: *point, height: self.height, width: self.width})
        }
    }

    /// Points within one row and one column of `point`, excluding `point`
    /// itself and clipped to the board. Empty if `point` is off the board.
    pub fn neighbor_points(&self, point: &Point) -> Vec<Point> {
        if !self.contains(point) {
            return vec![]
        }
        let rows = point.0.saturating_sub(1)..=(point.0 + 1).min(self.height - 1);
        let cols = point.1.saturating_sub(1)..=(point.1 + 1).min(self.width - 1);
        rows.cartesian_product(cols)
            .map(|(i, j)| Point(i, j))
            .filter(|neighbor| neighbor != point)
            .collect()
    }
}

fn sample_points<R: Rng + ?Sized>(size: &BoardSize, n: usize, rng: &mut R) -> Option<Vec<Point>>{
    if n > size.area() {
        return None
    }
    let mut possible: Vec<usize> = (0..size.area()).collect();
    possible.shuffle(rng);
    Some(possible.iter().take(n).filter_map(|&x| size.point_from_integer(x)).collect())
}

/// Ground truth for a game: where the mines are, what the player has
/// revealed and which cells the player has flagged.
pub struct Board {
    pub size: BoardSize,
    field: Vec<Vec<Cell>>,
    mines: HashSet<Point>,
    mines_found: HashSet<Point>
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

impl Board {
    pub fn new_from_ints(height: usize, width: usize, mine_count: usize) -> error::Result<Board>{
        Board::new_random(BoardSize::new(height, width), mine_count, &mut thread_rng())
    }

    pub fn new_random<R: Rng + ?Sized>(size: BoardSize, mine_count: usize, rng: &mut R) -> error::Result<Board> {
        let mines = sample_points(&size, mine_count, rng)
            .ok_or(Error::TooManyMines{mines: mine_count, area: size.area()})?;
        Board::with_mines(size, mines)
    }

    pub fn with_mines<I: IntoIterator<Item = Point>>(size: BoardSize, mines: I) -> error::Result<Board> {
        let mines: HashSet<Point> = mines.into_iter().collect();
        for mine in &mines {
            size.check(mine)?;
        }

        let mut field = Vec::with_capacity(size.height);
        for _ in 0..size.height {
            let mut row_vec = Vec::with_capacity(size.width);
            for _ in 0..size.width {
                row_vec.push(Cell::create_empty());
            }
            field.push(row_vec);
        }
        for mine in &mines {
            field[mine.0][mine.1].content = Content::Mine;
            for neighbor in size.neighbor_points(mine) {
                field[neighbor.0][neighbor.1].mined_neighbor_count += 1;
            }
        }

        Ok(Board {size, field, mines, mines_found: HashSet::new()})
    }

    pub fn retrieve_cell(&self, point: &Point) -> Option<&Cell>{
        self.field.get(point.0).and_then(|row| row.get(point.1))
    }

    fn retrieve_cell_mutable(&mut self, point: &Point) -> error::Result<&mut Cell>{
        self.size.check(point)?;
        Ok(&mut self.field[point.0][point.1])
    }

    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    pub fn is_mine(&self, point: &Point) -> bool {
        self.mines.contains(point)
    }

    /// Number of mines adjacent to `point`, not counting `point` itself.
    pub fn nearby_mines(&self, point: &Point) -> usize {
        self.retrieve_cell(point).map_or(0, |cell| cell.mined_neighbor_count)
    }

    pub fn mines_found(&self) -> &HashSet<Point> {
        &self.mines_found
    }

    pub fn toggle_flag(&mut self, point: &Point) -> error::Result<()> {
        let cell = self.retrieve_cell_mutable(point)?;
        cell.toggle_flag();
        let flagged = cell.knowledge.is_flag();
        if flagged {
            self.mines_found.insert(*point);
        } else {
            self.mines_found.remove(point);
        }
        Ok(())
    }

    /// Flags `point` unless it is already flagged or revealed.
    pub fn flag(&mut self, point: &Point) -> error::Result<()> {
        let unknown = self.retrieve_cell_mutable(point)?.knowledge.is_unknown();
        if unknown {
            self.toggle_flag(point)?;
        }
        Ok(())
    }

    pub fn probe(&mut self, point: &Point) -> error::Result<Content> {
        let cell = self.retrieve_cell_mutable(point)?;
        if cell.knowledge.is_unknown(){
            cell.knowledge = KnowledgeState::Known;
        }
        Ok(cell.content)
    }

    pub fn unknown_count(&self) -> usize{
        self.field.iter().flatten()
            .filter(|cell| !cell.knowledge.is_known())
            .count()
    }

    fn render<F: Fn(&Cell) -> String>(&self, draw: F) -> String {
        let mut result = "  ".to_owned();
        for i in 0..self.size.width(){
            result += &(i % 10).to_string()[..];
        }
        result += "\n";
        for (i, row) in self.field.iter().enumerate() {
            result += &(i % 10).to_string()[..];
            result += " ";
            for cell in row{
                result += &draw(cell)[..];
            }
            result += "\n";
        }
        result
    }

    fn to_string(&self) -> String {
        self.render(Cell::to_str)
    }

    /// Where the mines really are, regardless of what has been revealed.
    pub fn layout(&self) -> String {
        self.render(|cell| match cell.content {
            Content::Mine => String::from("X"),
            Content::Empty => String::from("·")
        })
    }

    /// Won once the flagged cells are exactly the mined cells.
    pub fn won(&self) -> bool {
        self.mines_found == self.mines
    }
}

#[cfg(test)]
use proptest::prelude::*;
