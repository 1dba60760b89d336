use crate::prize::{ordinal, PrizeCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    pub participant_id: u32,
    pub name: String,
    /// 1-based rank within the category
    pub position: usize,
}

impl Winner {
    pub fn rank_label(&self) -> String {
        ordinal(self.position)
    }
}

/// Append-only winners per category, capped at each category's capacity
#[derive(Debug, Clone, Default)]
pub struct WinnerLedger {
    entries: BTreeMap<PrizeCategory, Vec<Winner>>,
}

impl WinnerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn winners(&self, category: PrizeCategory) -> &[Winner] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_full(&self, category: PrizeCategory) -> bool {
        self.winners(category).len() >= category.capacity()
    }

    pub fn has_won(&self, category: PrizeCategory, participant_id: u32) -> bool {
        self.winners(category)
            .iter()
            .any(|w| w.participant_id == participant_id)
    }

    /// Records a win unless the category is full or the participant already holds it
    pub fn award(
        &mut self,
        category: PrizeCategory,
        participant_id: u32,
        name: &str,
    ) -> Option<Winner> {
        if self.is_full(category) || self.has_won(category, participant_id) {
            return None;
        }

        let winners = self.entries.entry(category).or_default();
        let winner = Winner {
            participant_id,
            name: name.to_string(),
            position: winners.len() + 1,
        };
        winners.push(winner.clone());
        Some(winner)
    }

    pub fn categories_won(&self, participant_id: u32) -> Vec<PrizeCategory> {
        PrizeCategory::ALL
            .into_iter()
            .filter(|&category| self.has_won(category, participant_id))
            .collect()
    }

    /// Winner names per category, every category present
    pub fn names(&self) -> BTreeMap<PrizeCategory, Vec<String>> {
        PrizeCategory::ALL
            .into_iter()
            .map(|category| {
                let names = self
                    .winners(category)
                    .iter()
                    .map(|w| w.name.clone())
                    .collect();
                (category, names)
            })
            .collect()
    }

    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
