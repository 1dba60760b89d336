pub mod strategy;

pub use strategy::{LayoutStrategy, PatternLayout, RandomizedLayout};

use crate::config::GeneratorConfig;
use crate::error::{Result, TambolaError};
use crate::roster::{RosterEntry, RosterFile};
use crate::ticket::Ticket;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Produces independently valid tickets.
///
/// Randomized layouts are tried up to `max_attempts` times; after that the
/// pattern layout is used, which always balances for a validated pattern table.
pub struct TicketGenerator {
    config: GeneratorConfig,
    randomized: RandomizedLayout,
    fallback: PatternLayout,
    rng: StdRng,
}

impl TicketGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Reproducible generator, mainly for tests and replays
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GeneratorConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            randomized: RandomizedLayout::new(config.max_balance_passes),
            fallback: PatternLayout::new(config.fallback_patterns.clone()),
            config,
            rng,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate_ticket(&mut self) -> Result<Ticket> {
        for attempt in 1..=self.config.max_attempts {
            let Some(grid) = self.randomized.layout(&mut self.rng) else {
                continue;
            };

            match Ticket::from_grid(grid) {
                Ok(ticket) => {
                    tracing::debug!("Randomized layout accepted on attempt {}", attempt);
                    return Ok(ticket);
                }
                Err(e) => tracing::debug!("Randomized attempt {} rejected: {}", attempt, e),
            }
        }

        tracing::info!(
            "No balanced layout after {} randomized attempts, using {} fallback",
            self.config.max_attempts,
            self.fallback.name()
        );

        let grid = self
            .fallback
            .layout(&mut self.rng)
            .ok_or_else(|| TambolaError::invalid_ticket("no fallback pattern available"))?;

        Ticket::from_grid(grid)
    }

    pub fn generate(&mut self, count: usize) -> Result<Vec<Ticket>> {
        (0..count).map(|_| self.generate_ticket()).collect()
    }

    /// Builds a roster of `count` participants with ids starting at 1.
    ///
    /// Missing names default to `Participant {id}`.
    pub fn generate_roster(&mut self, count: usize, names: &[String]) -> Result<RosterFile> {
        let tickets = self.generate(count)?;

        let participants = tickets
            .into_iter()
            .enumerate()
            .map(|(idx, ticket)| {
                let id = idx as u32 + 1;
                let name = names
                    .get(idx)
                    .filter(|name| !name.trim().is_empty())
                    .cloned()
                    .unwrap_or_else(|| format!("Participant {}", id));
                RosterEntry { id, name, ticket }
            })
            .collect();

        tracing::info!("Generated roster with {} participants", count);
        Ok(RosterFile::new(participants))
    }
}
