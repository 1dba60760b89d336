use crate::error::{Result, TambolaError};
use crate::ticket::{COLUMNS, MAX_COLUMN_COUNT, NUMBERS_PER_TICKET};
use serde::{Deserialize, Serialize};

/// How many numbers each column carries; must sum to 15 with entries in 1..=3
pub type ColumnPattern = [usize; COLUMNS];

/// Pre-vetted column distributions used by the fallback layout
pub const DEFAULT_FALLBACK_PATTERNS: [ColumnPattern; 5] = [
    [2, 2, 2, 2, 1, 2, 1, 2, 1],
    [1, 2, 2, 2, 2, 1, 2, 2, 1],
    [2, 1, 2, 1, 2, 2, 2, 1, 2],
    [1, 2, 1, 2, 2, 2, 2, 2, 1],
    [2, 2, 1, 2, 2, 1, 2, 1, 2],
];

pub const DEFAULT_MAX_ATTEMPTS: usize = 100;
pub const DEFAULT_MAX_BALANCE_PASSES: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Randomized layouts tried before falling back to a pattern
    pub max_attempts: usize,
    /// Row-balancing repair passes per randomized layout
    pub max_balance_passes: usize,
    pub fallback_patterns: Vec<ColumnPattern>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_balance_passes: DEFAULT_MAX_BALANCE_PASSES,
            fallback_patterns: DEFAULT_FALLBACK_PATTERNS.to_vec(),
        }
    }
}

impl GeneratorConfig {
    /// Config that skips the randomized tier entirely
    pub fn fallback_only() -> Self {
        Self {
            max_attempts: 0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.fallback_patterns.is_empty() {
            return Err(TambolaError::config(
                "At least one fallback pattern is required",
            ));
        }

        for (idx, pattern) in self.fallback_patterns.iter().enumerate() {
            validate_pattern(pattern)
                .map_err(|e| TambolaError::config(format!("Fallback pattern {}: {}", idx, e)))?;
        }

        Ok(())
    }
}

fn validate_pattern(pattern: &ColumnPattern) -> std::result::Result<(), String> {
    if let Some(count) = pattern
        .iter()
        .find(|&&count| count == 0 || count > MAX_COLUMN_COUNT)
    {
        return Err(format!(
            "column count {} outside 1..={}",
            count, MAX_COLUMN_COUNT
        ));
    }

    let total: usize = pattern.iter().sum();
    if total != NUMBERS_PER_TICKET {
        return Err(format!(
            "counts sum to {}, expected {}",
            total, NUMBERS_PER_TICKET
        ));
    }

    Ok(())
}
