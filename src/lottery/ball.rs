//! Lottery balls and the ordered draws a machine produces.

use super::combination::Combination;
use super::error::Result;
use crate::core::constants::MAX_BALL_COUNT;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numbered ball. Values start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ball(u8);

impl Ball {
    /// Creates a ball, or `None` if the number can never be loaded into a machine.
    pub fn new(value: u8) -> Option<Self> {
        (1..=MAX_BALL_COUNT).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// True if this ball belongs to a pool of `ball_count` balls.
    pub fn fits(self, ball_count: u8) -> bool {
        self.0 <= ball_count
    }
}

impl fmt::Display for Ball {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The full set of balls `1..=ball_count`, in ascending order.
pub fn ball_pool(ball_count: u8) -> Vec<Ball> {
    (1..=ball_count.min(MAX_BALL_COUNT)).map(Ball).collect()
}

/// Balls in the order they came out of the machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draw {
    balls: Vec<Ball>,
}

impl Draw {
    pub fn with_capacity(balls_to_draw: usize) -> Self {
        Self {
            balls: Vec::with_capacity(balls_to_draw),
        }
    }

    pub fn push(&mut self, ball: Ball) {
        self.balls.push(ball);
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// Collapses the draw to its order-independent form.
    pub fn combination(&self) -> Result<Combination> {
        Combination::from_balls(&self.balls)
    }
}

impl fmt::Display for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ball) in self.balls.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", ball)?;
        }
        Ok(())
    }
}
