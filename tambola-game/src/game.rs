use crate::announcement::{AnnouncementQueue, WinnerEvent};
use crate::config::{AnnouncementMode, GameConfig};
use crate::error::{GameError, Result};
use crate::event::{EventBus, GameEvent, GameSnapshot};
use crate::ledger::{Winner, WinnerLedger};
use crate::participant::Participant;
use crate::pool::NumberPool;
use crate::prize::PrizeCategory;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tambola_core::ticket::ROWS;
use tambola_core::{RosterEntry, RosterFile};
use tokio::sync::mpsc;
use uuid::Uuid;

const EARLY_FIVE_MARKS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameState {
    NotStarted,
    InProgress,
    /// Every number has been called
    Exhausted,
    /// Full House has all its winners
    Complete,
}

impl GameState {
    pub fn is_finished(self) -> bool {
        matches!(self, GameState::Exhausted | GameState::Complete)
    }
}

/// Result of a successful draw
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawOutcome {
    pub number: u8,
    pub state: GameState,
    /// Every win detected on this call, in evaluation order
    pub detected: Vec<WinnerEvent>,
    /// Wins emitted right away; empty in manual mode
    pub announced: Vec<WinnerEvent>,
    pub snapshot: GameSnapshot,
}

pub struct GameEngine {
    id: Uuid,
    config: GameConfig,
    mode: AnnouncementMode,
    pool: NumberPool,
    participants: Vec<Participant>,
    ledger: WinnerLedger,
    pending: AnnouncementQueue,
    events: EventBus,
    rng: StdRng,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let pool = NumberPool::new(&mut rng);
        let id = Uuid::new_v4();

        tracing::info!("Created game {} in {:?} mode", id, config.announcement_mode);

        Ok(Self {
            id,
            mode: config.announcement_mode,
            config,
            pool,
            participants: Vec::new(),
            ledger: WinnerLedger::new(),
            pending: AnnouncementQueue::new(),
            events: EventBus::new(),
            rng,
        })
    }

    pub fn with_roster(config: GameConfig, roster: Vec<RosterEntry>) -> Result<Self> {
        let mut engine = Self::new(config)?;
        engine.load_roster(roster)?;
        Ok(engine)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn announcement_mode(&self) -> AnnouncementMode {
        self.mode
    }

    pub fn state(&self) -> GameState {
        if self.ledger.is_full(PrizeCategory::FullHouse) {
            GameState::Complete
        } else if self.pool.is_exhausted() {
            GameState::Exhausted
        } else if self.pool.drawn().is_empty() {
            GameState::NotStarted
        } else {
            GameState::InProgress
        }
    }

    /// Replaces the roster and starts a fresh game for it.
    ///
    /// Rejected as a whole if two entries share an id.
    pub fn load_roster(&mut self, roster: Vec<RosterEntry>) -> Result<()> {
        let mut seen = HashSet::new();
        if let Some(entry) = roster.iter().find(|entry| !seen.insert(entry.id)) {
            return Err(GameError::DuplicateParticipant(entry.id));
        }

        self.participants = roster.into_iter().map(Participant::from).collect();
        tracing::info!(
            "Game {} loaded {} participants",
            self.id,
            self.participants.len()
        );

        self.reset();
        Ok(())
    }

    /// Loads a roster file from disk, see [`GameEngine::load_roster`]
    pub fn load_roster_file(&mut self, path: &Path) -> Result<()> {
        let roster = RosterFile::load(path)?;
        self.load_roster(roster.participants)
    }

    pub fn draw_next(&mut self) -> Result<DrawOutcome> {
        self.ensure_not_complete()?;

        let number = self.pool.draw_next()?;
        Ok(self.mark_and_evaluate(number))
    }

    pub fn draw_specific(&mut self, number: u8) -> Result<DrawOutcome> {
        self.ensure_not_complete()?;

        let number = self.pool.draw_specific(number)?;
        Ok(self.mark_and_evaluate(number))
    }

    fn ensure_not_complete(&self) -> Result<()> {
        if self.state() == GameState::Complete {
            return Err(GameError::GameComplete);
        }
        Ok(())
    }

    fn mark_and_evaluate(&mut self, number: u8) -> DrawOutcome {
        tracing::debug!(
            "Game {} called {} ({} called)",
            self.id,
            number,
            self.pool.drawn().len()
        );

        let mut detected = Vec::new();

        for participant in self.participants.iter_mut() {
            if !participant.mark(number) {
                continue;
            }

            let mut claims = Vec::new();

            if participant.marked_count() >= EARLY_FIVE_MARKS {
                claims.push(PrizeCategory::EarlyFive);
            }
            for row in 0..ROWS {
                if participant.complete_row(row) {
                    claims.extend(PrizeCategory::for_row(row));
                }
            }
            if participant.complete_corners() {
                claims.push(PrizeCategory::Corners);
            }
            if participant.is_full_house() {
                claims.push(PrizeCategory::FullHouse);
            }

            for category in claims {
                if let Some(winner) =
                    self.ledger
                        .award(category, participant.id(), participant.name())
                {
                    tracing::info!(
                        "Game {}: {} wins {} on {}",
                        self.id,
                        winner.name,
                        category.display_name(winner.position),
                        number
                    );
                    detected.push(WinnerEvent::new(category, &winner));
                }
            }
        }

        let announced = match self.mode {
            AnnouncementMode::Auto => {
                for event in &detected {
                    self.events.publish(GameEvent::WinnerAnnounced(event.clone()));
                }
                detected.clone()
            }
            AnnouncementMode::Manual => {
                for event in &detected {
                    self.pending.push(event.clone());
                }
                Vec::new()
            }
        };

        let state = self.state();
        match state {
            GameState::Complete => tracing::info!(
                "Game {} complete after {} numbers",
                self.id,
                self.pool.drawn().len()
            ),
            GameState::Exhausted => tracing::warn!("Game {} ran out of numbers", self.id),
            _ => {}
        }

        let snapshot = self.publish_snapshot();

        DrawOutcome {
            number,
            state,
            detected,
            announced,
            snapshot,
        }
    }

    /// Emits the oldest queued win, if any
    pub fn release_next(&mut self) -> Option<WinnerEvent> {
        let event = self.pending.pop()?;
        tracing::info!(
            "Game {} released {} for {} ({} pending)",
            self.id,
            event.display_name,
            event.participant_name,
            self.pending.len()
        );
        self.events.publish(GameEvent::WinnerAnnounced(event.clone()));
        Some(event)
    }

    /// Switches mode; going to auto flushes every queued win, oldest first
    pub fn set_announcement_mode(&mut self, mode: AnnouncementMode) -> Vec<WinnerEvent> {
        if self.mode == mode {
            return Vec::new();
        }

        tracing::info!("Game {} announcement mode {:?} -> {:?}", self.id, self.mode, mode);
        self.mode = mode;

        if mode != AnnouncementMode::Auto {
            return Vec::new();
        }

        let flushed = self.pending.drain();
        for event in &flushed {
            self.events.publish(GameEvent::WinnerAnnounced(event.clone()));
        }
        flushed
    }

    /// Fresh game over the same tickets
    pub fn reset(&mut self) {
        self.pool.refill(&mut self.rng);
        for participant in self.participants.iter_mut() {
            participant.clear_marks();
        }
        self.ledger.clear();
        self.pending.clear();

        tracing::info!("Game {} reset", self.id);
        self.publish_snapshot();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            current_number: self.pool.current(),
            draw_history: self.pool.drawn().to_vec(),
            winners: self.ledger.names(),
            state: self.state(),
            timestamp: Utc::now(),
        }
    }

    fn publish_snapshot(&mut self) -> GameSnapshot {
        let snapshot = self.snapshot();
        self.events.publish(GameEvent::StateChanged(snapshot.clone()));
        snapshot
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        self.events.subscribe()
    }

    pub fn current_number(&self) -> Option<u8> {
        self.pool.current()
    }

    pub fn draw_history(&self) -> &[u8] {
        self.pool.drawn()
    }

    pub fn called_count(&self) -> usize {
        self.pool.drawn().len()
    }

    pub fn remaining_count(&self) -> usize {
        self.pool.remaining_count()
    }

    pub fn is_called(&self, number: u8) -> bool {
        self.pool.is_drawn(number)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: u32) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id() == id)
    }

    /// Case-insensitive substring match on names
    pub fn find_participants(&self, query: &str) -> Vec<&Participant> {
        let query = query.trim().to_lowercase();
        self.participants
            .iter()
            .filter(|p| p.name().to_lowercase().contains(&query))
            .collect()
    }

    pub fn winners(&self, category: PrizeCategory) -> &[Winner] {
        self.ledger.winners(category)
    }

    pub fn ledger(&self) -> &WinnerLedger {
        &self.ledger
    }

    pub fn categories_won(&self, participant_id: u32) -> Result<Vec<PrizeCategory>> {
        if self.participant(participant_id).is_none() {
            return Err(GameError::ParticipantNotFound(participant_id));
        }
        Ok(self.ledger.categories_won(participant_id))
    }

    pub fn is_winner(&self, participant_id: u32) -> bool {
        !self.ledger.categories_won(participant_id).is_empty()
    }

    pub fn peek_pending(&self) -> Option<&WinnerEvent> {
        self.pending.peek()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Participants in their transmitted form, marks included
    pub fn participants_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.participants)?)
    }
}
