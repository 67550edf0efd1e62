//! Level file loader
//!
//! Parses the level-description text format into playable levels. All
//! malformed input fails fast at load time; the game never starts from a
//! half-read file.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::world::{Level, LevelRowError, MazeError};

/// Keyword opening a level block
const HEADER_KEYWORD: &str = "Maze";

/// Fatal load-time errors. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read game file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: malformed level header, expected `Maze <rows> <columns>`")]
    BadHeader { line: usize },
    #[error("line {line}: grid row before any level header")]
    RowOutsideLevel { line: usize },
    #[error("line {line}: unknown symbol {symbol:?}")]
    UnknownSymbol { line: usize, symbol: char },
    #[error("line {line}: more than one player start in level")]
    DuplicatePlayerStart { line: usize },
    #[error("line {line}: row has {found} symbols, expected {expected}")]
    WrongRowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: level already has its declared {declared} rows")]
    TooManyRows { line: usize, declared: usize },
    #[error("level starting at line {header_line} has fewer rows than declared")]
    IncompleteLevel { header_line: usize },
    #[error("level starting at line {header_line} has no player start")]
    MissingPlayerStart { header_line: usize },
    #[error("game file contains no levels")]
    NoLevels,
}

/// Read and parse a game file into its ordered list of levels.
pub fn load_game(path: &Path) -> Result<Vec<Level>, LevelError> {
    let source = fs::read_to_string(path)?;
    let levels = parse_game(&source)?;
    log::info!("loaded {} level(s) from {}", levels.len(), path.display());
    Ok(levels)
}

/// Parse game source text. Level blocks open with a `Maze` header carrying
/// the dimensions (an optional `-`-separated label is tolerated); the block's
/// grid rows follow. Zero-length lines separate blocks.
pub fn parse_game(source: &str) -> Result<Vec<Level>, LevelError> {
    let mut levels: Vec<Level> = Vec::new();
    let mut current: Option<(Level, usize)> = None;

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end_matches('\r');

        if line.trim_start().starts_with(HEADER_KEYWORD) {
            if let Some((level, header_line)) = current.take() {
                levels.push(finish_level(level, header_line)?);
            }
            let (rows, cols) =
                parse_header(line).ok_or(LevelError::BadHeader { line: line_no })?;
            current = Some((Level::new(rows, cols), line_no));
            continue;
        }

        match current.as_mut() {
            None => {
                if !line.trim().is_empty() {
                    return Err(LevelError::RowOutsideLevel { line: line_no });
                }
            }
            Some((level, _)) => {
                if level.maze().is_complete() {
                    if !line.trim().is_empty() {
                        return Err(LevelError::TooManyRows {
                            line: line_no,
                            declared: level.maze().rows(),
                        });
                    }
                    continue;
                }
                // Mid-block, an all-space line is a real row of empty floor;
                // only zero-length lines are separators.
                if line.is_empty() {
                    continue;
                }
                level
                    .add_row(line)
                    .map_err(|e| row_error(e, line_no))?;
            }
        }
    }

    if let Some((level, header_line)) = current.take() {
        levels.push(finish_level(level, header_line)?);
    }
    if levels.is_empty() {
        return Err(LevelError::NoLevels);
    }
    Ok(levels)
}

fn finish_level(level: Level, header_line: usize) -> Result<Level, LevelError> {
    if !level.maze().is_complete() {
        return Err(LevelError::IncompleteLevel { header_line });
    }
    if level.player_start().is_none() {
        return Err(LevelError::MissingPlayerStart { header_line });
    }
    Ok(level)
}

fn row_error(error: LevelRowError, line: usize) -> LevelError {
    match error {
        LevelRowError::UnknownSymbol { symbol } => LevelError::UnknownSymbol { line, symbol },
        LevelRowError::DuplicatePlayerStart => LevelError::DuplicatePlayerStart { line },
        LevelRowError::Maze(MazeError::TooManyRows { declared }) => {
            LevelError::TooManyRows { line, declared }
        }
        LevelRowError::Maze(MazeError::WrongRowWidth { expected, found }) => {
            LevelError::WrongRowWidth {
                line,
                expected,
                found,
            }
        }
    }
}

/// Extract (rows, columns) from a header line. The dimensions follow the
/// last `-` when one is present (`Maze dimensions - 3 5`), or the keyword
/// directly (`Maze 3 5`).
fn parse_header(line: &str) -> Option<(usize, usize)> {
    let rest = line.trim_start().strip_prefix(HEADER_KEYWORD)?;
    let dims = match rest.rfind('-') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    let mut tokens = dims.split_whitespace();
    let rows: usize = tokens.next()?.parse().ok()?;
    let cols: usize = tokens.next()?.parse().ok()?;
    if tokens.next().is_some() || rows == 0 || cols == 0 {
        return None;
    }
    Some((rows, cols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemKind;
    use crate::world::Position;

    const TWO_LEVELS: &str = "\
Maze dimensions - 3 5
#####
#P C#
#####

Maze 3 4
####
#PD#
####
";

    #[test]
    fn test_parse_two_levels() {
        let levels = parse_game(TWO_LEVELS).unwrap();
        assert_eq!(levels.len(), 2);

        assert_eq!(levels[0].maze().rows(), 3);
        assert_eq!(levels[0].maze().cols(), 5);
        assert_eq!(levels[0].player_start(), Some(Position::new(1, 1)));
        assert_eq!(
            levels[0].item_at(Position::new(1, 3)).map(|i| i.kind),
            Some(ItemKind::Coin)
        );

        assert_eq!(levels[1].maze().cols(), 4);
        assert_eq!(levels[1].total_coins(), 0);
    }

    #[test]
    fn test_header_variants() {
        assert_eq!(parse_header("Maze 3 5"), Some((3, 5)));
        assert_eq!(parse_header("Maze dimensions - 3 5"), Some((3, 5)));
        assert_eq!(parse_header("Maze - 3 5"), Some((3, 5)));
        assert_eq!(parse_header("Maze"), None);
        assert_eq!(parse_header("Maze 3"), None);
        assert_eq!(parse_header("Maze 3 5 7"), None);
        assert_eq!(parse_header("Maze 0 5"), None);
    }

    #[test]
    fn test_bad_header_is_fatal() {
        let err = parse_game("Maze x y\n").unwrap_err();
        assert!(matches!(err, LevelError::BadHeader { line: 1 }));
    }

    #[test]
    fn test_row_before_header() {
        let err = parse_game("#####\n").unwrap_err();
        assert!(matches!(err, LevelError::RowOutsideLevel { line: 1 }));
    }

    #[test]
    fn test_unknown_symbol_reports_line() {
        let err = parse_game("Maze 1 3\n#z#\n").unwrap_err();
        assert!(matches!(
            err,
            LevelError::UnknownSymbol { line: 2, symbol: 'z' }
        ));
    }

    #[test]
    fn test_wrong_row_width() {
        let err = parse_game("Maze 1 4\n#P#\n").unwrap_err();
        assert!(matches!(
            err,
            LevelError::WrongRowWidth { line: 2, expected: 4, found: 3 }
        ));
    }

    #[test]
    fn test_too_many_rows() {
        let err = parse_game("Maze 1 3\n#P#\n###\n").unwrap_err();
        assert!(matches!(err, LevelError::TooManyRows { line: 3, declared: 1 }));
    }

    #[test]
    fn test_incomplete_level() {
        let err = parse_game("Maze 2 3\n#P#\n").unwrap_err();
        assert!(matches!(err, LevelError::IncompleteLevel { header_line: 1 }));
    }

    #[test]
    fn test_missing_player_start() {
        let err = parse_game("Maze 1 3\n# #\n").unwrap_err();
        assert!(matches!(err, LevelError::MissingPlayerStart { header_line: 1 }));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_game(""), Err(LevelError::NoLevels)));
        assert!(matches!(parse_game("\n\n"), Err(LevelError::NoLevels)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_game(Path::new("no/such/game.txt")).unwrap_err();
        assert!(matches!(err, LevelError::Io(_)));
    }
}
