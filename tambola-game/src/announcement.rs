use crate::ledger::Winner;
use crate::prize::PrizeCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A win ready to be shown: `{ category, participantName, rankLabel, ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerEvent {
    pub category: PrizeCategory,
    pub participant_id: u32,
    pub participant_name: String,
    pub rank_label: String,
    pub display_name: String,
    pub timestamp: DateTime<Utc>,
}

impl WinnerEvent {
    pub fn new(category: PrizeCategory, winner: &Winner) -> Self {
        Self {
            category,
            participant_id: winner.participant_id,
            participant_name: winner.name.clone(),
            rank_label: winner.rank_label(),
            display_name: category.display_name(winner.position),
            timestamp: Utc::now(),
        }
    }
}

/// Wins held back in manual mode, released oldest first
#[derive(Debug, Clone, Default)]
pub struct AnnouncementQueue {
    pending: VecDeque<WinnerEvent>,
}

impl AnnouncementQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: WinnerEvent) {
        self.pending.push_back(event);
    }

    pub fn pop(&mut self) -> Option<WinnerEvent> {
        self.pending.pop_front()
    }

    pub fn peek(&self) -> Option<&WinnerEvent> {
        self.pending.front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Empties the queue in FIFO order
    pub fn drain(&mut self) -> Vec<WinnerEvent> {
        self.pending.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(category: PrizeCategory, id: u32) -> WinnerEvent {
        let winner = Winner {
            participant_id: id,
            name: format!("Player {}", id),
            position: 1,
        };
        WinnerEvent::new(category, &winner)
    }

    #[test]
    fn test_fifo_release() {
        let mut queue = AnnouncementQueue::new();
        queue.push(event(PrizeCategory::EarlyFive, 1));
        queue.push(event(PrizeCategory::TopLine, 2));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek().unwrap().participant_id, 1);
        assert_eq!(queue.pop().unwrap().category, PrizeCategory::EarlyFive);
        assert_eq!(queue.pop().unwrap().category, PrizeCategory::TopLine);
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_drain_keeps_order() {
        let mut queue = AnnouncementQueue::new();
        for id in 1..=3 {
            queue.push(event(PrizeCategory::FullHouse, id));
        }

        let ids: Vec<u32> = queue.drain().iter().map(|e| e.participant_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_payload() {
        let winner = Winner {
            participant_id: 4,
            name: "Meera Iyer".to_string(),
            position: 2,
        };
        let json = serde_json::to_value(WinnerEvent::new(PrizeCategory::TopLine, &winner)).unwrap();

        assert_eq!(json["category"], "topLine");
        assert_eq!(json["participantName"], "Meera Iyer");
        assert_eq!(json["rankLabel"], "2nd");
        assert_eq!(json["displayName"], "Top Line (2nd)");
    }
}
