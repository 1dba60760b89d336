use crate::announcement::WinnerEvent;
use crate::game::GameState;
use crate::prize::PrizeCategory;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tokio::sync::mpsc;

/// Everything a display needs to redraw after a call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub current_number: Option<u8>,
    pub draw_history: Vec<u8>,
    pub winners: BTreeMap<PrizeCategory, Vec<String>>,
    pub state: GameState,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    StateChanged(GameSnapshot),
    WinnerAnnounced(WinnerEvent),
}

/// Fan-out of game events to any number of listeners.
///
/// Closed receivers are pruned on the next publish.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<mpsc::UnboundedSender<GameEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, event: GameEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(current: Option<u8>) -> GameSnapshot {
        GameSnapshot {
            current_number: current,
            draw_history: current.into_iter().collect(),
            winners: BTreeMap::new(),
            state: GameState::InProgress,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_publish_reaches_every_subscriber() {
        let mut bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(GameEvent::StateChanged(snapshot(Some(12))));

        assert!(matches!(first.try_recv(), Ok(GameEvent::StateChanged(s)) if s.current_number == Some(12)));
        assert!(matches!(second.try_recv(), Ok(GameEvent::StateChanged(_))));
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());

        bus.publish(GameEvent::StateChanged(snapshot(None)));
        assert_eq!(bus.subscriber_count(), 1);
        drop(kept);
    }

    #[test]
    fn test_event_tagging() {
        let json = serde_json::to_value(GameEvent::StateChanged(snapshot(Some(5)))).unwrap();
        assert_eq!(json["type"], "stateChanged");
        assert_eq!(json["currentNumber"], 5);
        assert_eq!(json["state"], "inProgress");
    }
}
