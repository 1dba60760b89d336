use crate::error::GameError;
use crate::game::{GameEngine, GameState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;

pub type SharedEngine = Arc<Mutex<GameEngine>>;

/// Why an automatic calling run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoCallStop {
    Cancelled,
    Complete,
    Exhausted,
    Failed(String),
}

/// Calls `draw_next` on a fixed interval until stopped or the game ends.
///
/// Dropping the caller cancels the run.
pub struct AutoCaller {
    handle: JoinHandle<AutoCallStop>,
    cancel_tx: oneshot::Sender<()>,
}

impl AutoCaller {
    /// Calls at the engine's configured `auto_call_interval`. The first number
    /// is called one interval after start.
    pub async fn start(engine: SharedEngine) -> Self {
        let interval = engine.lock().await.config().auto_call_interval;
        Self::with_interval(engine, interval)
    }

    /// Overrides the configured interval. Must be called from within a tokio
    /// runtime.
    pub fn with_interval(engine: SharedEngine, interval: Duration) -> Self {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let handle = tokio::spawn(run(engine, interval, cancel_rx));

        Self { handle, cancel_tx }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn stop(self) -> AutoCallStop {
        let _ = self.cancel_tx.send(());
        join(self.handle).await
    }

    /// Waits for the game to end on its own
    pub async fn wait(self) -> AutoCallStop {
        let Self { handle, cancel_tx } = self;
        let stop = join(handle).await;
        drop(cancel_tx);
        stop
    }
}

async fn join(handle: JoinHandle<AutoCallStop>) -> AutoCallStop {
    match handle.await {
        Ok(stop) => stop,
        Err(e) => AutoCallStop::Failed(e.to_string()),
    }
}

async fn run(
    engine: SharedEngine,
    interval: Duration,
    mut cancel_rx: oneshot::Receiver<()>,
) -> AutoCallStop {
    let mut ticker = tokio::time::interval(interval);
    // first tick fires immediately
    ticker.tick().await;

    tracing::info!("Auto calling started every {:?}", interval);

    let stop = loop {
        tokio::select! {
            _ = &mut cancel_rx => break AutoCallStop::Cancelled,
            _ = ticker.tick() => {}
        }

        let result = engine.lock().await.draw_next();
        match result {
            Ok(outcome) => match outcome.state {
                GameState::Complete => break AutoCallStop::Complete,
                GameState::Exhausted => break AutoCallStop::Exhausted,
                _ => {}
            },
            Err(GameError::GameComplete) => break AutoCallStop::Complete,
            Err(GameError::PoolExhausted) => break AutoCallStop::Exhausted,
            Err(e) => {
                tracing::error!("Auto calling failed: {}", e);
                break AutoCallStop::Failed(e.to_string());
            }
        }
    };

    tracing::info!("Auto calling stopped: {:?}", stop);
    stop
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::prize::PrizeCategory;
    use crate::test_support::{entry, ticket_a};

    fn shared(roster: Vec<tambola_core::RosterEntry>, interval: Duration) -> SharedEngine {
        let config = GameConfig {
            auto_call_interval: interval,
            ..GameConfig::with_seed(21)
        };
        let engine = GameEngine::with_roster(config, roster).unwrap();
        Arc::new(Mutex::new(engine))
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_until_pool_exhausted() {
        let engine = shared(vec![entry(1, "Asha", ticket_a())], Duration::from_secs(3));
        let caller = AutoCaller::start(engine.clone()).await;

        assert_eq!(caller.wait().await, AutoCallStop::Exhausted);

        let game = engine.lock().await;
        assert_eq!(game.called_count(), 90);
        assert_eq!(game.state(), GameState::Exhausted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_further_draws() {
        let engine = shared(vec![entry(1, "Asha", ticket_a())], Duration::from_secs(1));
        let caller = AutoCaller::start(engine.clone()).await;

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert!(!caller.is_finished());
        assert_eq!(caller.stop().await, AutoCallStop::Cancelled);

        let called = engine.lock().await.called_count();
        assert_eq!(called, 3);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(engine.lock().await.called_count(), called);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_full_house_is_complete() {
        let engine = shared(
            vec![
                entry(1, "Amit", ticket_a()),
                entry(2, "Neha", ticket_a()),
                entry(3, "Karan", ticket_a()),
            ],
            Duration::from_millis(500),
        );
        let caller = AutoCaller::start(engine.clone()).await;

        assert_eq!(caller.wait().await, AutoCallStop::Complete);

        let game = engine.lock().await;
        assert_eq!(game.state(), GameState::Complete);
        assert_eq!(game.winners(PrizeCategory::FullHouse).len(), 3);
        let last = game.current_number().unwrap();
        assert!(ticket_a().contains(last));
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_game_stops_at_once() {
        let engine = shared(vec![entry(1, "Asha", ticket_a())], Duration::from_secs(1));
        {
            let mut game = engine.lock().await;
            while game.draw_next().is_ok() {}
        }

        let caller = AutoCaller::start(engine).await;
        assert_eq!(caller.wait().await, AutoCallStop::Exhausted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_interval_sets_cadence() {
        let engine = shared(vec![entry(1, "Asha", ticket_a())], Duration::from_secs(2));
        let caller = AutoCaller::start(engine.clone()).await;

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(engine.lock().await.called_count(), 0);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(engine.lock().await.called_count(), 1);

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(engine.lock().await.called_count(), 3);

        assert_eq!(caller.stop().await, AutoCallStop::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_interval_overrides_config() {
        let engine = shared(vec![entry(1, "Asha", ticket_a())], Duration::from_secs(10));
        let caller = AutoCaller::with_interval(engine.clone(), Duration::from_secs(1));

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(engine.lock().await.called_count(), 2);

        assert_eq!(caller.stop().await, AutoCallStop::Cancelled);
    }
}
