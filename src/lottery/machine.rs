//! The ball machine.

use super::ball::{Ball, Draw};
use rand::Rng;

/// A pool of balls drawn without replacement.
///
/// The pool must be reloaded with [`Machine::load_balls`] before every draw
/// cycle. Drawing from an empty pool is a sequencing bug and panics.
#[derive(Debug, Clone, Default)]
pub struct Machine {
    pool: Vec<Ball>,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever is left in the machine with `balls`.
    pub fn load_balls(&mut self, balls: &[Ball]) {
        self.pool.clear();
        self.pool.extend_from_slice(balls);
    }

    /// Balls still in the machine.
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    /// Removes one ball, uniformly at random, from the balls still loaded.
    pub fn draw_ball(&mut self, rng: &mut impl Rng) -> Ball {
        assert!(
            !self.pool.is_empty(),
            "draw_ball called on an empty machine; load_balls must run first"
        );
        let index = rng.gen_range(0..self.pool.len());
        self.pool.swap_remove(index)
    }

    /// Runs one full cycle: reload with `balls`, then draw `count` of them.
    pub fn draw(&mut self, balls: &[Ball], count: usize, rng: &mut impl Rng) -> Draw {
        self.load_balls(balls);
        let mut draw = Draw::with_capacity(count);
        for _ in 0..count {
            draw.push(self.draw_ball(rng));
        }
        draw
    }
}
