//! Tambola game engine
//!
//! Owns the number pool, the participants and their tickets, and the winner
//! ledger. Every draw marks tickets, evaluates the six prize categories and
//! either announces winners right away or queues them for manual release.

pub mod announcement;
pub mod auto_call;
pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod ledger;
pub mod participant;
pub mod pool;
pub mod prize;

pub use announcement::{AnnouncementQueue, WinnerEvent};
pub use auto_call::{AutoCallStop, AutoCaller, SharedEngine};
pub use config::{AnnouncementMode, GameConfig};
pub use error::{GameError, Result};
pub use event::{EventBus, GameEvent, GameSnapshot};
pub use game::{DrawOutcome, GameEngine, GameState};
pub use ledger::{Winner, WinnerLedger};
pub use participant::Participant;
pub use pool::NumberPool;
pub use prize::PrizeCategory;

use std::sync::Arc;
use tambola_core::RosterFile;
use tokio::sync::Mutex;

/// Engine for a roster file, ready to be shared with an [`AutoCaller`]
pub fn new_game(roster: RosterFile, config: GameConfig) -> Result<SharedEngine> {
    tracing::info!("Starting \"{}\"", roster.game_title);
    let engine = GameEngine::with_roster(config, roster.participants)?;
    Ok(Arc::new(Mutex::new(engine)))
}
