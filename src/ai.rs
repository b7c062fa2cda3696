use std::collections::BTreeSet;
use std::collections::HashSet;
use itertools::Itertools;
use log::{debug, trace};
use rand::Rng;
use rand::thread_rng;
use rand::seq::SliceRandom;

use super::board::BoardSize;
use super::board::Point;
use super::error::{self, Error};
use super::sentence::Sentence;

/// Knowledge base of an automated player.
///
/// All changes to `mines` and `safes` go through [`mark_mine`] and
/// [`mark_safe`], which also simplify every held sentence.
///
/// [`mark_mine`]: MinesweeperAi::mark_mine
/// [`mark_safe`]: MinesweeperAi::mark_safe
#[derive(Debug, Clone)]
pub struct MinesweeperAi {
    size: BoardSize,
    moves_made: BTreeSet<Point>,
    mines: BTreeSet<Point>,
    safes: BTreeSet<Point>,
    knowledge: Vec<Sentence>
}

impl MinesweeperAi {
    pub fn new(size: BoardSize) -> MinesweeperAi {
        MinesweeperAi {
            size,
            moves_made: BTreeSet::new(),
            mines: BTreeSet::new(),
            safes: BTreeSet::new(),
            knowledge: Vec::new()
        }
    }

    pub fn moves_made(&self) -> &BTreeSet<Point> {
        &self.moves_made
    }

    pub fn mines(&self) -> &BTreeSet<Point> {
        &self.mines
    }

    pub fn safes(&self) -> &BTreeSet<Point> {
        &self.safes
    }

    pub fn knowledge(&self) -> &[Sentence] {
        &self.knowledge
    }

    /// Returns `Error::Contradiction` if a sentence can't hold another mine.
    /// `mines` and the sentences already visited keep the update; play should
    /// stop there.
    pub fn mark_mine(&mut self, point: Point) -> error::Result<()> {
        self.size.check(&point)?;
        if self.safes.contains(&point) {
            return Err(Error::ConflictingFacts(point))
        }
        if self.mines.insert(point) {
            debug!("proved mine at {}", point);
        }
        for sentence in self.knowledge.iter_mut() {
            sentence.mark_mine(&point)?;
        }
        Ok(())
    }

    /// Returns `Error::Contradiction` if a sentence needs `point` to be a mine,
    /// leaving `safes` and the sentences already visited updated.
    pub fn mark_safe(&mut self, point: Point) -> error::Result<()> {
        self.size.check(&point)?;
        if self.mines.contains(&point) {
            return Err(Error::ConflictingFacts(point))
        }
        if self.safes.insert(point) {
            debug!("proved safe at {}", point);
        }
        for sentence in self.knowledge.iter_mut() {
            sentence.mark_safe(&point)?;
        }
        Ok(())
    }

    /// Records that `point` was revealed as safe with `count` mines among
    /// its neighbors, then infers everything that follows.
    pub fn add_knowledge(&mut self, point: Point, count: usize) -> error::Result<()> {
        self.size.check(&point)?;
        self.moves_made.insert(point);
        self.mark_safe(point)?;

        let neighbors = self.size.neighbor_points(&point);
        let known_mines = neighbors.iter()
            .filter(|neighbor| self.mines.contains(*neighbor))
            .count();
        let undetermined: Vec<Point> = neighbors.into_iter()
            .filter(|neighbor| !self.mines.contains(neighbor) && !self.safes.contains(neighbor))
            .collect();
        let remaining = match count.checked_sub(known_mines) {
            Some(remaining) => remaining,
            None => return Err(Error::Contradiction{
                cells: undetermined,
                count: count as i64 - known_mines as i64
            })
        };
        self.add_sentence(Sentence::new(undetermined, remaining)?);

        self.infer()
    }

    fn add_sentence(&mut self, sentence: Sentence) -> bool {
        if sentence.is_empty() || self.knowledge.contains(&sentence) {
            return false
        }
        trace!("adding sentence {}", sentence);
        self.knowledge.push(sentence);
        true
    }

    /// Runs certainty extraction and subset elimination until neither
    /// produces anything new.
    fn infer(&mut self) -> error::Result<()> {
        loop {
            let resolved = self.resolve_certainties()?;
            self.prune();
            let derived = self.derive_subsets()?;
            if !resolved && !derived {
                return Ok(())
            }
        }
    }

    /// Drops exhausted sentences and duplicates left behind by marking.
    fn prune(&mut self) {
        let mut seen = HashSet::with_capacity(self.knowledge.len());
        self.knowledge.retain(|sentence| !sentence.is_empty() && seen.insert(sentence.clone()));
    }

    fn resolve_certainties(&mut self) -> error::Result<bool> {
        let mut mines = BTreeSet::new();
        let mut safes = BTreeSet::new();
        for sentence in &self.knowledge {
            if let Some(cells) = sentence.known_mines() {
                mines.extend(cells.iter().filter(|cell| !self.mines.contains(*cell)).copied());
            }
            if let Some(cells) = sentence.known_safes() {
                safes.extend(cells.iter().filter(|cell| !self.safes.contains(*cell)).copied());
            }
        }
        let changed = !mines.is_empty() || !safes.is_empty();
        for mine in mines {
            self.mark_mine(mine)?;
        }
        for safe in safes {
            self.mark_safe(safe)?;
        }
        Ok(changed)
    }

    fn derive_subsets(&mut self) -> error::Result<bool> {
        let mut derived: Vec<Sentence> = Vec::new();
        for (subset, superset) in self.knowledge.iter().cartesian_product(self.knowledge.iter()) {
            if subset.is_empty() || subset == superset || !subset.is_subset(superset) {
                continue
            }
            let inferred = superset.subtract(subset)?;
            if inferred.is_empty() || self.knowledge.contains(&inferred) || derived.contains(&inferred) {
                continue
            }
            debug!("derived {} from {} and {}", inferred, superset, subset);
            derived.push(inferred);
        }
        let changed = !derived.is_empty();
        for sentence in derived {
            self.add_sentence(sentence);
        }
        Ok(changed)
    }

    /// The first known safe cell, row-major, that hasn't been played yet.
    pub fn make_safe_move(&self) -> Option<Point> {
        self.safes.difference(&self.moves_made).next().copied()
    }

    pub fn make_random_move(&self) -> Option<Point> {
        self.make_random_move_with(&mut thread_rng())
    }

    /// A uniformly chosen cell that is neither played nor a known mine.
    pub fn make_random_move_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Point> {
        let candidates: Vec<Point> = self.size.points().into_iter()
            .filter(|point| !self.moves_made.contains(point) && !self.mines.contains(point))
            .collect();
        candidates.choose(rng).copied()
    }
}

#[cfg(test)]
use proptest::prelude::*;
