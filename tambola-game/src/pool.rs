use crate::error::{GameError, Result};
use rand::seq::SliceRandom;
use rand::RngCore;
use tambola_core::ticket::MAX_NUMBER;

/// Numbers 1-90 split into a shuffled remainder and the ordered call history
#[derive(Debug, Clone)]
pub struct NumberPool {
    remaining: Vec<u8>,
    drawn: Vec<u8>,
}

impl NumberPool {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let mut pool = Self {
            remaining: Vec::with_capacity(MAX_NUMBER as usize),
            drawn: Vec::with_capacity(MAX_NUMBER as usize),
        };
        pool.refill(rng);
        pool
    }

    /// Puts every number back and reshuffles
    pub fn refill(&mut self, rng: &mut dyn RngCore) {
        self.drawn.clear();
        self.remaining = (1..=MAX_NUMBER).collect();
        self.remaining.shuffle(rng);
    }

    pub fn draw_next(&mut self) -> Result<u8> {
        let number = self.remaining.pop().ok_or(GameError::PoolExhausted)?;
        self.drawn.push(number);
        Ok(number)
    }

    pub fn draw_specific(&mut self, number: u8) -> Result<u8> {
        if !(1..=MAX_NUMBER).contains(&number) {
            return Err(GameError::NumberOutOfRange(number));
        }

        let idx = self
            .remaining
            .iter()
            .position(|&n| n == number)
            .ok_or(GameError::AlreadyDrawn(number))?;

        self.remaining.remove(idx);
        self.drawn.push(number);
        Ok(number)
    }

    pub fn drawn(&self) -> &[u8] {
        &self.drawn
    }

    pub fn remaining_count(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_drawn(&self, number: u8) -> bool {
        self.drawn.contains(&number)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Most recently called number
    pub fn current(&self) -> Option<u8> {
        self.drawn.last().copied()
    }
}
