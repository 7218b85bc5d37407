use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Moves are accepted
    #[default]
    Playing,
    /// Every safe cell has been exposed
    Won,
    /// A mine has been exposed
    Lost,
}

impl GameState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game, from mine placement to win or loss.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    grid: Array2<Cell>,
    size: Coord2,
    mine_count: CellCount,
    flags_placed: CellCount,
    spaces_exposed: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Randomly mined board, `config` is clamped the same way [`GameConfig::new`] clamps.
    pub fn new(config: GameConfig) -> Self {
        Self::generate(config, RandomMinefieldGenerator::from_entropy())
    }

    /// Reproducible variant of [`Board::new`].
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::generate(config, RandomMinefieldGenerator::new(seed))
    }

    pub fn generate(config: GameConfig, generator: impl MinefieldGenerator) -> Self {
        Self::from_layout(generator.generate(config))
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        let size = layout.size();
        let grid = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            Cell::new(coords, layout[coords])
        });
        log::debug!(
            "New {}x{} board with {} mines",
            size.0,
            size.1,
            layout.mine_count()
        );

        Self {
            grid,
            size,
            mine_count: layout.mine_count(),
            flags_placed: 0,
            spaces_exposed: 0,
            state: GameState::default(),
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_complete(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn width(&self) -> Coord {
        self.size.0
    }

    pub fn height(&self) -> Coord {
        self.size.1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    pub fn spaces_exposed(&self) -> CellCount {
        self.spaces_exposed
    }

    /// How many mines have not been flagged yet, never below zero
    pub fn mines_left(&self) -> CellCount {
        self.mine_count.saturating_sub(self.flags_placed)
    }

    /// The mine whose exposure lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size, self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.grid[coords.to_nd_index()])
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter()
    }

    /// Display state of a cell, mines stay hidden until the game is over.
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        use CellView::*;

        let cell = self.cell(coords)?;

        if cell.is_exposed() && !cell.is_mine() {
            return Ok(Revealed(cell.adjacent_mine_count().unwrap_or_default()));
        }

        if !self.state.is_finished() {
            return Ok(if cell.is_flagged() { Flagged } else { Hidden });
        }

        Ok(match (cell.is_mine(), cell.is_flagged()) {
            (true, _) if self.triggered_mine == Some(coords) => Exploded,
            (true, true) => Flagged,
            (true, false) => Mine,
            (false, true) => IncorrectFlag,
            (false, false) => Hidden,
        })
    }

    /// Mines within Chebyshev distance `radius` of `coords`, not counting `coords` itself.
    pub fn count_mines_in_area(&self, coords: Coord2, radius: Coord) -> Result<CellCount> {
        let coords = self.validate_coords(coords)?;
        Ok(self.count_mines_unchecked(coords, radius))
    }

    /// Expose a single cell without flood fill.
    pub fn expose_cell(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        Ok(self.expose_single_cell(coords))
    }

    /// Player reveal: expose the cell, then flood-fill the zero region around it.
    pub fn click_cell(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        let outcome = self.expose_single_cell(coords);
        if self.grid[coords.to_nd_index()].is_mine() {
            return Ok(outcome);
        }

        Ok(outcome | self.flood_fill(coords))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.grid[coords.to_nd_index()];
        if cell.is_exposed() {
            return Ok(MarkOutcome::NoChange);
        }

        if cell.toggle_flag() {
            self.flags_placed += 1;
        } else {
            self.flags_placed -= 1;
        }
        log::trace!("Toggled flag at {:?}, {} placed", coords, self.flags_placed);

        Ok(MarkOutcome::Changed)
    }

    fn count_mines_unchecked(&self, coords: Coord2, radius: Coord) -> CellCount {
        self.grid
            .iter_area(coords, radius)
            .filter(|&pos| self.grid[pos.to_nd_index()].is_mine())
            .count() as CellCount
    }

    fn expose_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.grid[coords.to_nd_index()];
        if cell.is_exposed() {
            return RevealOutcome::NoChange;
        }

        let adjacent_mines = (!cell.is_mine()).then(|| {
            // at most 8 with radius 1
            self.count_mines_unchecked(coords, 1) as u8
        });
        if self.grid[coords.to_nd_index()].expose(adjacent_mines) {
            self.flags_placed -= 1;
        }
        self.spaces_exposed += 1;
        log::debug!("Exposed cell at {:?}, mine count: {:?}", coords, adjacent_mines);

        self.evaluate_end_state(coords)
    }

    /// Worklist flood fill.
    ///
    /// Zero cells expand into their neighbors, numbered cells are exposed but not expanded. Each position enters the
    /// visited set once, so the whole fill is linear in the size of the opened region.
    fn flood_fill(&mut self, start: Coord2) -> RevealOutcome {
        let size = self.size;
        let mut outcome = RevealOutcome::NoChange;
        let mut visited: HashSet<usize> = HashSet::from_iter([flat_index(start, size)]);
        let mut to_visit = vec![start];

        while let Some(visit_coords) = to_visit.pop() {
            if self.state.is_finished() {
                break;
            }

            if self.grid[visit_coords.to_nd_index()].adjacent_mine_count() != Some(0) {
                continue;
            }

            for neighbor in self.grid.iter_neighbors(visit_coords) {
                if !visited.insert(flat_index(neighbor, size)) {
                    continue;
                }

                outcome = outcome | self.expose_single_cell(neighbor);
                to_visit.push(neighbor);
            }
        }

        log::trace!(
            "Flood fill from {:?} visited {} cells",
            start,
            visited.len()
        );
        outcome
    }

    fn evaluate_end_state(&mut self, coords: Coord2) -> RevealOutcome {
        if self.grid[coords.to_nd_index()].is_mine() {
            self.triggered_mine = Some(coords);
            self.end_game(false);
            RevealOutcome::HitMine
        } else if self.safe_cell_count() <= self.spaces_exposed {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!(
            "Game ended {:?}, {} of {} safe cells exposed",
            self.state,
            self.spaces_exposed,
            self.safe_cell_count()
        );

        if !won {
            self.reveal_mines();
        }
    }

    /// Direct exposure of every mine, bypassing counters and flood fill.
    fn reveal_mines(&mut self) {
        self.grid
            .iter_mut()
            .filter(|cell| cell.is_mine())
            .for_each(Cell::force_expose);
    }
}
