use super::evolution_engine::{GenerationStats, ProgressCallback};

/// Logs a line per generation; every `interval`-th generation and any
/// generation that improves the best-ever fitness at `info`, the rest at `debug`.
pub struct ConsoleProgressCallback {
    interval: usize,
    last_best: f64,
}

impl ConsoleProgressCallback {
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            last_best: f64::MIN,
        }
    }
}

impl Default for ConsoleProgressCallback {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::trace!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        let improved = stats.best_ever > self.last_best;
        self.last_best = stats.best_ever;

        let level = if improved || (stats.generation + 1) % self.interval == 0 {
            log::Level::Info
        } else {
            log::Level::Debug
        };
        log::log!(
            level,
            "Generation {} complete: best {:.4}, best ever {:.4}, valid {}, stagnant {}",
            stats.generation + 1,
            stats.best_fitness,
            stats.best_ever,
            stats.valid_count,
            stats.stagnation
        );
        if stats.regenerated {
            log::info!("Generation {}: population regenerated", stats.generation + 1);
        }
    }
}
