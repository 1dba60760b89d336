use serde::{Deserialize, Serialize};
use std::fmt;

/// Prize categories in evaluation order.
///
/// The derived ordering is the order wins are checked within one draw, which
/// is also the order same-draw winners are announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrizeCategory {
    EarlyFive,
    TopLine,
    MiddleLine,
    BottomLine,
    Corners,
    FullHouse,
}

impl PrizeCategory {
    pub const ALL: [PrizeCategory; 6] = [
        PrizeCategory::EarlyFive,
        PrizeCategory::TopLine,
        PrizeCategory::MiddleLine,
        PrizeCategory::BottomLine,
        PrizeCategory::Corners,
        PrizeCategory::FullHouse,
    ];

    pub const LINES: [PrizeCategory; 3] = [
        PrizeCategory::TopLine,
        PrizeCategory::MiddleLine,
        PrizeCategory::BottomLine,
    ];

    /// Most winners a category can have
    pub fn capacity(self) -> usize {
        match self {
            PrizeCategory::EarlyFive => 1,
            PrizeCategory::TopLine
            | PrizeCategory::MiddleLine
            | PrizeCategory::BottomLine
            | PrizeCategory::Corners => 2,
            PrizeCategory::FullHouse => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PrizeCategory::EarlyFive => "Early Five",
            PrizeCategory::TopLine => "Top Line",
            PrizeCategory::MiddleLine => "Middle Line",
            PrizeCategory::BottomLine => "Bottom Line",
            PrizeCategory::Corners => "Corners",
            PrizeCategory::FullHouse => "Full House",
        }
    }

    /// Line category for a ticket row
    pub fn for_row(row: usize) -> Option<Self> {
        Self::LINES.get(row).copied()
    }

    /// Heading shown for the `position`-th winner, e.g. "Top Line (2nd)".
    ///
    /// Single-winner categories carry no rank.
    pub fn display_name(self, position: usize) -> String {
        if self.capacity() == 1 {
            self.label().to_string()
        } else {
            format!("{} ({})", self.label(), ordinal(position))
        }
    }
}

impl fmt::Display for PrizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 1 -> "1st", 2 -> "2nd", 11 -> "11th", 23 -> "23rd"
pub fn ordinal(position: usize) -> String {
    let suffix = match (position % 10, position % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", position, suffix)
}
