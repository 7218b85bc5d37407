use super::*;
use ndarray::Array2;

/// Uniform placement by rejection sampling: a position that already holds a mine is drawn again and does not count
/// against the quota.
///
/// Expected work is linear in the mine count for sparse boards and grows as the density approaches 1, a completely
/// full board skips sampling altogether.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::{Rng, SeedableRng, rngs::SmallRng};

        let requested = config;
        let config = GameConfig::new(requested.size, requested.mines);
        if config != requested {
            log::warn!(
                "Clamped minefield config, requested {:?} but using {:?}",
                requested,
                config
            );
        }

        let total_cells = config.total_cells();
        let (size_x, size_y) = config.size;

        // optimize for full boards
        if config.mines >= total_cells {
            log::warn!("Minefield is full, every one of the {} cells is a mine", total_cells);
            return MineLayout {
                mine_mask: Array2::from_elem(config.size.to_nd_index(), true),
                mine_count: total_cells,
            };
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed: CellCount = 0;
        let mut rejected: u64 = 0;

        while mines_placed < config.mines {
            let coords: Coord2 = (rng.random_range(0..size_x), rng.random_range(0..size_y));
            let cell = &mut mine_mask[coords.to_nd_index()];
            if *cell {
                rejected += 1;
                continue;
            }
            *cell = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines on {}x{} with seed {}, {} samples rejected",
            mines_placed,
            size_x,
            size_y,
            self.seed,
            rejected
        );

        MineLayout {
            mine_mask,
            mine_count: mines_placed,
        }
    }
}
