use regex::Regex;
use std::time::Duration;

use super::error::{self, Error};

/// Settings for a single AI game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
    pub seed: Option<u64>,
    pub delay: Duration
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            height: 8,
            width: 8,
            mines: 8,
            seed: None,
            delay: Duration::from_millis(500)
        }
    }
}

fn parse_number<T: std::str::FromStr>(input: &str) -> error::Result<T> {
    input.parse().map_err(|_| Error::InvalidArgument(format!("{} is not a valid number", input)))
}

impl GameConfig {
    /// Parses arguments of the form `HEIGHTxWIDTH --mines=N --seed=N --delay=MS`.
    /// Anything not given keeps its default.
    pub fn from_args<I, S>(args: I) -> error::Result<GameConfig>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        let size_re = Regex::new(r"^(\d+)x(\d+)$")?;
        let option_re = Regex::new(r"^--(mines|seed|delay)=(\d+)$")?;
        let mut config = GameConfig::default();

        for arg in args {
            let arg = arg.as_ref();
            if let Some(cap) = size_re.captures(arg) {
                config.height = parse_number(&cap[1])?;
                config.width = parse_number(&cap[2])?;
            } else if let Some(cap) = option_re.captures(arg) {
                match &cap[1] {
                    "mines" => config.mines = parse_number(&cap[2])?,
                    "seed" => config.seed = Some(parse_number(&cap[2])?),
                    _ => config.delay = Duration::from_millis(parse_number(&cap[2])?)
                }
            } else {
                return Err(Error::InvalidArgument(format!("unrecognized argument {}", arg)))
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> error::Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(Error::InvalidArgument(format!("board must not be empty, got {}x{}", self.height, self.width)))
        }
        let area = self.height.checked_mul(self.width)
            .ok_or_else(|| Error::InvalidArgument(format!("{}x{} is too large", self.height, self.width)))?;
        if self.mines > area {
            return Err(Error::TooManyMines{mines: self.mines, area})
        }
        Ok(())
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GameConfig::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!((config.height, config.width, config.mines), (8, 8, 8));
    }

    #[test]
    fn parses_all_options() {
        let config = GameConfig::from_args(vec!["16x30", "--mines=99", "--seed=42", "--delay=0"]).unwrap();
        assert_eq!(config.height, 16);
        assert_eq!(config.width, 30);
        assert_eq!(config.mines, 99);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.delay, Duration::from_millis(0));
    }

    #[test]
    fn rejects_unknown_arguments() {
        match GameConfig::from_args(vec!["--mines=three"]) {
            Err(Error::InvalidArgument(_)) => {},
            other => panic!("expected invalid argument, got {:?}", other)
        }
        assert!(GameConfig::from_args(vec!["8by8"]).is_err());
    }

    #[test]
    fn rejects_impossible_boards() {
        assert!(GameConfig::from_args(vec!["0x5"]).is_err());
        match GameConfig::from_args(vec!["2x2", "--mines=5"]) {
            Err(Error::TooManyMines{mines: 5, area: 4}) => {},
            other => panic!("expected too many mines, got {:?}", other)
        }
        assert!(GameConfig::from_args(vec!["99999999999999999999x2"]).is_err());
    }
}
