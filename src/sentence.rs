use std::collections::BTreeSet;
use std::fmt;
use itertools::Itertools;

use super::board::Point;
use super::error::{self, Error};

/// A claim that exactly `count` of `cells` are mines.
///
/// Cells are kept in a `BTreeSet` so two sentences compare and hash equal
/// whenever they hold the same cells and count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sentence {
    cells: BTreeSet<Point>,
    count: usize
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}} = {}", self.cells.iter().join(", "), self.count)
    }
}

fn contradiction(cells: &BTreeSet<Point>, count: i64) -> Error {
    Error::Contradiction{cells: cells.iter().copied().collect(), count}
}

impl Sentence {
    pub fn new<I: IntoIterator<Item = Point>>(cells: I, count: usize) -> error::Result<Sentence> {
        let cells: BTreeSet<Point> = cells.into_iter().collect();
        if count > cells.len() {
            return Err(contradiction(&cells, count as i64))
        }
        Ok(Sentence{cells, count})
    }

    pub fn cells(&self) -> &BTreeSet<Point> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells, if every one of them must be a mine.
    ///
    /// An empty sentence trivially answers with the empty set, which
    /// carries no new information.
    pub fn known_mines(&self) -> Option<&BTreeSet<Point>> {
        if self.cells.len() == self.count {
            Some(&self.cells)
        } else {
            None
        }
    }

    /// All cells, if none of them can be a mine.
    pub fn known_safes(&self) -> Option<&BTreeSet<Point>> {
        if self.count == 0 {
            Some(&self.cells)
        } else {
            None
        }
    }

    pub fn mark_mine(&mut self, point: &Point) -> error::Result<()> {
        if !self.cells.contains(point) {
            return Ok(())
        }
        if self.count == 0 {
            let mut remaining = self.cells.clone();
            remaining.remove(point);
            return Err(contradiction(&remaining, -1))
        }
        self.cells.remove(point);
        self.count -= 1;
        Ok(())
    }

    pub fn mark_safe(&mut self, point: &Point) -> error::Result<()> {
        if !self.cells.contains(point) {
            return Ok(())
        }
        if self.count == self.cells.len() {
            let mut remaining = self.cells.clone();
            remaining.remove(point);
            return Err(contradiction(&remaining, self.count as i64))
        }
        self.cells.remove(point);
        Ok(())
    }

    pub fn is_subset(&self, other: &Sentence) -> bool {
        self.cells.is_subset(&other.cells)
    }

    /// Removes `subset` from `self`: the cells `self` has that `subset`
    /// lacks must hold the mines `self` has beyond `subset`'s.
    pub fn subtract(&self, subset: &Sentence) -> error::Result<Sentence> {
        let cells: BTreeSet<Point> = self.cells.difference(&subset.cells).copied().collect();
        match self.count.checked_sub(subset.count) {
            Some(count) => Sentence::new(cells, count),
            None => Err(contradiction(&cells, self.count as i64 - subset.count as i64))
        }
    }
}
