use super::board::Point;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("contradiction: {count} mines cannot be placed among {} undetermined cells", .cells.len())]
    Contradiction {
        cells: Vec<Point>,
        count: i64
    },
    #[error("cell {0} is known to be both a mine and safe")]
    ConflictingFacts(Point),
    #[error("cell {point} is outside a {height}x{width} board")]
    OutOfBounds {
        point: Point,
        height: usize,
        width: usize
    },
    #[error("cannot place {mines} mines on a board of {area} cells")]
    TooManyMines {
        mines: usize,
        area: usize
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("bad pattern: {0}")]
    Pattern(#[from] regex::Error)
}

pub type Result<T> = std::result::Result<T, Error>;
