use crate::error::{Result, TambolaError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

pub const ROWS: usize = 3;
pub const COLUMNS: usize = 9;
pub const NUMBERS_PER_ROW: usize = 5;
pub const NUMBERS_PER_TICKET: usize = ROWS * NUMBERS_PER_ROW;
pub const MAX_COLUMN_COUNT: usize = 3;
pub const MAX_NUMBER: u8 = 90;

/// Raw 3x9 layout, `None` for a blank cell. This is also the wire shape.
pub type Grid = [[Option<u8>; COLUMNS]; ROWS];

pub const EMPTY_GRID: Grid = [[None; COLUMNS]; ROWS];

/// Numbers allowed in a column: 1-9, 10-19, ..., 70-79, 80-90.
///
/// `col` must be below `COLUMNS`; debug builds panic otherwise.
pub fn column_range(col: usize) -> RangeInclusive<u8> {
    debug_assert!(col < COLUMNS, "column {} out of range", col);
    let col = col.min(COLUMNS - 1) as u8;
    let start = if col == 0 { 1 } else { col * 10 };
    let end = if col as usize == COLUMNS - 1 {
        MAX_NUMBER
    } else {
        col * 10 + 9
    };
    start..=end
}

/// Column a number belongs to, `None` outside 1..=90
pub fn column_for(number: u8) -> Option<usize> {
    if !(1..=MAX_NUMBER).contains(&number) {
        return None;
    }
    Some(((number / 10) as usize).min(COLUMNS - 1))
}

/// Checks every structural rule of a ticket layout.
///
/// Rows must hold exactly five numbers, each column between one and three,
/// every value inside its column range and strictly increasing downwards.
pub fn validate_grid(grid: &Grid) -> Result<()> {
    for (row, cells) in grid.iter().enumerate() {
        let count = cells.iter().flatten().count();
        if count != NUMBERS_PER_ROW {
            return Err(TambolaError::invalid_ticket(format!(
                "row {} holds {} numbers, expected {}",
                row, count, NUMBERS_PER_ROW
            )));
        }
    }

    for col in 0..COLUMNS {
        let values: Vec<u8> = grid.iter().filter_map(|cells| cells[col]).collect();

        if values.is_empty() || values.len() > MAX_COLUMN_COUNT {
            return Err(TambolaError::invalid_ticket(format!(
                "column {} holds {} numbers, expected 1 to {}",
                col,
                values.len(),
                MAX_COLUMN_COUNT
            )));
        }

        let range = column_range(col);
        if let Some(stray) = values.iter().find(|&&n| !range.contains(&n)) {
            return Err(TambolaError::invalid_ticket(format!(
                "{} is outside column {} range {}-{}",
                stray,
                col,
                range.start(),
                range.end()
            )));
        }

        if values.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(TambolaError::invalid_ticket(format!(
                "column {} is not strictly increasing: {:?}",
                col, values
            )));
        }
    }

    Ok(())
}

pub fn is_valid_grid(grid: &Grid) -> bool {
    validate_grid(grid).is_ok()
}

/// A validated Tambola ticket. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Grid", into = "Grid")]
pub struct Ticket {
    grid: Grid,
}

impl Ticket {
    pub fn from_grid(grid: Grid) -> Result<Self> {
        validate_grid(&grid)?;
        Ok(Self { grid })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        self.grid.get(row).and_then(|cells| cells.get(col)).copied().flatten()
    }

    /// Numbers of one row, left to right
    pub fn row(&self, row: usize) -> impl Iterator<Item = u8> + '_ {
        self.grid
            .get(row)
            .into_iter()
            .flat_map(|cells| cells.iter().flatten().copied())
    }

    /// All fifteen numbers in row-major order
    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.grid.iter().flat_map(|cells| cells.iter().flatten().copied())
    }

    pub fn position_of(&self, number: u8) -> Option<(usize, usize)> {
        let col = column_for(number)?;
        (0..ROWS)
            .find(|&row| self.grid[row][col] == Some(number))
            .map(|row| (row, col))
    }

    pub fn contains(&self, number: u8) -> bool {
        self.position_of(number).is_some()
    }

    pub fn first_in_row(&self, row: usize) -> Option<u8> {
        self.row(row).next()
    }

    pub fn last_in_row(&self, row: usize) -> Option<u8> {
        self.row(row).last()
    }

    /// First and last number of the top row, then of the bottom row.
    ///
    /// Outer columns may be blank in a given row, so corners are the outermost
    /// filled cells rather than columns 0 and 8.
    pub fn corners(&self) -> [u8; 4] {
        let bottom = ROWS - 1;
        [
            self.first_in_row(0),
            self.last_in_row(0),
            self.first_in_row(bottom),
            self.last_in_row(bottom),
        ]
        .map(|n| n.unwrap_or_default())
    }
}

impl TryFrom<Grid> for Ticket {
    type Error = TambolaError;

    fn try_from(grid: Grid) -> Result<Self> {
        Self::from_grid(grid)
    }
}

impl From<Ticket> for Grid {
    fn from(ticket: Ticket) -> Self {
        ticket.grid
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.grid.iter().enumerate() {
            let line = cells
                .iter()
                .map(|cell| match cell {
                    Some(n) => format!("{:>2}", n),
                    None => " .".to_string(),
                })
                .collect::<Vec<_>>()
                .join(" ");
            if row + 1 < ROWS {
                writeln!(f, "{}", line)?;
            } else {
                write!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}
