//! Static premium-square layout and reconstruction of a full board from the
//! placed tiles the platform reports.
//!
//! Index convention: `rows[y][x]`, the row is the tile's y-coordinate and the
//! column its x-coordinate.

use serde::Serialize;

use crate::{
    constants::BOARD_SIZE,
    error::{AppError, Result},
    integrations::TilePlacement,
};

/// Premium codes: `0` plain, `1` double letter, `2` triple letter,
/// `3` double word, `4` triple word.
const PREMIUM_LAYOUT: [[u8; BOARD_SIZE]; BOARD_SIZE] = [
    *b"200040010040002",
    *b"010002000200010",
    *b"003000101000300",
    *b"000200030002000",
    *b"400030101030004",
    *b"020002000200020",
    *b"001010000010100",
    *b"100300000003001",
    *b"001010000010100",
    *b"020002000200020",
    *b"400030101030004",
    *b"000200030002000",
    *b"003000101000300",
    *b"010002000200010",
    *b"200040010040002",
];

/// The standard 15x15 Wordfeud premium layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardTemplate;

impl BoardTemplate {
    /// Premium code at column `x`, row `y`, or `None` off the board.
    pub fn value_at(&self, x: usize, y: usize) -> Option<char> {
        PREMIUM_LAYOUT
            .get(y)
            .and_then(|row| row.get(x))
            .map(|code| char::from(*code))
    }

    fn rows(&self) -> Vec<Vec<char>> {
        (0..BOARD_SIZE)
            .map(|y| (0..BOARD_SIZE).filter_map(|x| self.value_at(x, y)).collect())
            .collect()
    }
}

/// Renderable board, serialized as 15 rows of 15 one-character strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Board {
    rows: Vec<Vec<char>>,
}

#[cfg(test)]
impl Board {
    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }
}

/// Overlays `tiles` on a fresh copy of the template.
///
/// Wildcard tiles are rendered lower-case, drawn tiles upper-case. Tiles are
/// applied in the order given, so a later tile on the same square wins. Any
/// coordinate outside the board fails the whole reconstruction.
pub fn reconstruct_board(template: &BoardTemplate, tiles: &[TilePlacement]) -> Result<Board> {
    let mut positions = Vec::with_capacity(tiles.len());
    for tile in tiles {
        positions.push(board_position(tile)?);
    }

    let mut rows = template.rows();
    for (tile, (row, col)) in tiles.iter().zip(positions) {
        rows[row][col] = render_letter(tile);
    }

    Ok(Board { rows })
}

fn board_position(tile: &TilePlacement) -> Result<(usize, usize)> {
    let in_range = |v: i64| usize::try_from(v).ok().filter(|v| *v < BOARD_SIZE);
    match (in_range(tile.y), in_range(tile.x)) {
        (Some(row), Some(col)) => Ok((row, col)),
        _ => Err(AppError::InvalidTileCoordinate {
            x: tile.x,
            y: tile.y,
        }),
    }
}

fn render_letter(tile: &TilePlacement) -> char {
    // Case mapping of a single letter yields a single char for every
    // alphabet Wordfeud ships, including Æ, Ø and Å.
    if tile.is_wildcard {
        tile.character.to_lowercase().next().unwrap_or(tile.character)
    } else {
        tile.character.to_uppercase().next().unwrap_or(tile.character)
    }
}
