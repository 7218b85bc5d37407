use serde::{Deserialize, Serialize};

use crate::*;

/// One grid position.
///
/// Fields are only mutated by [`Board`]; collaborators read them through the accessors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    position: Coord2,
    is_mine: bool,
    is_exposed: bool,
    is_flagged: bool,
    adjacent_mines: Option<u8>,
}

impl Cell {
    pub(crate) const fn new(position: Coord2, is_mine: bool) -> Self {
        Self {
            position,
            is_mine,
            is_exposed: false,
            is_flagged: false,
            adjacent_mines: None,
        }
    }

    pub const fn position(&self) -> Coord2 {
        self.position
    }

    pub const fn is_exposed(&self) -> bool {
        self.is_exposed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Mines around this cell, known once a non-mine cell has been exposed.
    pub const fn adjacent_mine_count(&self) -> Option<u8> {
        self.adjacent_mines
    }

    pub(crate) const fn is_mine(&self) -> bool {
        self.is_mine
    }

    /// Marks the cell exposed, returning whether the flag had to be cleared.
    pub(crate) fn expose(&mut self, adjacent_mines: Option<u8>) -> bool {
        self.is_exposed = true;
        self.adjacent_mines = adjacent_mines;
        core::mem::replace(&mut self.is_flagged, false)
    }

    /// Lose-reveal path: exposure without touching flags or counts.
    pub(crate) fn force_expose(&mut self) {
        self.is_exposed = true;
    }

    /// Flips the flag and returns the new value.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        self.is_flagged = !self.is_flagged;
        self.is_flagged
    }
}

/// What a renderer should draw for a cell.
///
/// Mine information only shows up once the game is over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// A mine shown after the game ended
    Mine,
    /// The mine that ended the game
    Exploded,
    /// A flag placed on a safe cell, shown after the game ended
    IncorrectFlag,
}

impl CellView {
    // whether the cell is visually closed
    pub const fn is_closed(self) -> bool {
        use CellView::*;
        match self {
            Hidden => true,
            Flagged => true,
            Revealed(_) => false,
            Mine => false,
            Exploded => false,
            IncorrectFlag => true,
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
