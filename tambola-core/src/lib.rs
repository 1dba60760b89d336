//! Tambola core - ticket model, validation and generation
//!
//! A ticket is a 3x9 grid holding fifteen numbers from 1 to 90, five per row,
//! with each column restricted to its own decade. This crate builds and checks
//! such tickets and reads/writes the roster files that carry them.

pub mod config;
pub mod error;
pub mod generator;
pub mod roster;
pub mod ticket;

pub use config::{ColumnPattern, GeneratorConfig, DEFAULT_FALLBACK_PATTERNS};
pub use error::{Result, TambolaError};
pub use generator::{LayoutStrategy, PatternLayout, RandomizedLayout, TicketGenerator};
pub use roster::{sample_names, RosterEntry, RosterFile};
pub use ticket::{column_range, validate_grid, Grid, Ticket};

/// Generate `count` tickets with the default configuration
pub fn generate_tickets(count: usize) -> Result<Vec<Ticket>> {
    TicketGenerator::new(GeneratorConfig::default())?.generate(count)
}
