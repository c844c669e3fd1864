//! Canonical ball combinations and their dense lexicographic index.
//!
//! A combination is stored as a bitmask (bit `b - 1` set for ball `b`), which
//! makes it sorted and duplicate-free by construction. The index of a
//! K-subset of `1..=N` is its position in lexicographic order:
//! `{1,2,3,4}` is 0, `{1,2,3,5}` is 1, ..., `{N-K+1..=N}` is `C(N,K) - 1`.

use super::ball::Ball;
use super::error::{LotteryError, Result};
use std::fmt;

/// Binomial coefficient `C(n, k)`, saturating at `u64::MAX`.
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * u128::from(n - i) / u128::from(i + 1);
        if result > u128::from(u64::MAX) {
            return u64::MAX;
        }
    }
    result as u64
}

/// An unordered, duplicate-free set of balls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Combination {
    mask: u64,
}

impl Combination {
    /// Builds the canonical form of `balls`. Repeated balls are rejected.
    pub fn from_balls(balls: &[Ball]) -> Result<Self> {
        let mut mask = 0u64;
        for ball in balls {
            let bit = 1u64 << (ball.value() - 1);
            if mask & bit != 0 {
                return Err(LotteryError::InvalidCombination {
                    message: format!("ball {} appears more than once", ball),
                });
            }
            mask |= bit;
        }
        Ok(Self { mask })
    }

    /// Builds a combination from raw ball numbers.
    pub fn from_values(values: &[u8]) -> Result<Self> {
        let balls = values
            .iter()
            .map(|&v| {
                Ball::new(v).ok_or_else(|| LotteryError::InvalidCombination {
                    message: format!("{} is not a valid ball number", v),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_balls(&balls)
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    pub fn contains(&self, ball: Ball) -> bool {
        self.mask & (1u64 << (ball.value() - 1)) != 0
    }

    /// Balls in ascending order.
    pub fn balls(&self) -> impl Iterator<Item = Ball> + '_ {
        (1..=64u8)
            .filter(move |v| self.mask & (1u64 << (v - 1)) != 0)
            .filter_map(Ball::new)
    }

    /// Highest ball in the combination, if any.
    fn highest(&self) -> u8 {
        64 - self.mask.leading_zeros() as u8
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ball) in self.balls().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", ball)?;
        }
        Ok(())
    }
}

/// Every K-subset of an N-ball pool, addressed by lexicographic index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinationSpace {
    ball_count: u8,
    balls_to_draw: u8,
    size: u64,
}

impl CombinationSpace {
    pub fn new(ball_count: u8, balls_to_draw: u8) -> Self {
        Self {
            ball_count,
            balls_to_draw,
            size: binomial(u64::from(ball_count), u64::from(balls_to_draw)),
        }
    }

    pub fn ball_count(&self) -> u8 {
        self.ball_count
    }

    pub fn balls_to_draw(&self) -> u8 {
        self.balls_to_draw
    }

    /// Number of distinct combinations, `C(N, K)`.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Lexicographic index of `combination`, or `None` if it does not belong
    /// to this space (wrong size or a ball outside the pool).
    ///
    /// Skipping candidate `s` at position `i` passes over `C(N - s, K - 1 - i)`
    /// combinations; summing a run of those is a hockey-stick identity, so
    /// each position costs two binomials.
    pub fn index_of(&self, combination: &Combination) -> Option<usize> {
        if combination.len() != usize::from(self.balls_to_draw)
            || combination.highest() > self.ball_count
        {
            return None;
        }

        let n = u64::from(self.ball_count);
        let k = u64::from(self.balls_to_draw);
        let mut index = 0u64;
        let mut previous = 0u64;

        for (i, ball) in combination.balls().enumerate() {
            let value = u64::from(ball.value());
            let remaining = k - i as u64;
            index += binomial(n - previous, remaining) - binomial(n - value + 1, remaining);
            previous = value;
        }

        usize::try_from(index).ok()
    }

    /// Iterates every combination in lexicographic order.
    pub fn iter(&self) -> Combinations {
        Combinations::new(self.ball_count, self.balls_to_draw)
    }
}

/// Lexicographic enumeration of the K-subsets of `1..=N`.
#[derive(Debug, Clone)]
pub struct Combinations {
    ball_count: u8,
    current: Option<Vec<u8>>,
}

impl Combinations {
    pub fn new(ball_count: u8, balls_to_draw: u8) -> Self {
        let current = (balls_to_draw > 0 && balls_to_draw <= ball_count)
            .then(|| (1..=balls_to_draw).collect());
        Self {
            ball_count,
            current,
        }
    }
}

impl Iterator for Combinations {
    type Item = Combination;

    fn next(&mut self) -> Option<Self::Item> {
        let values = self.current.as_mut()?;
        let combination = Combination {
            mask: values.iter().fold(0u64, |m, &v| m | (1u64 << (v - 1))),
        };

        // Advance: bump the rightmost value that still has room, then pack
        // everything after it tightly.
        let k = values.len();
        let n = self.ball_count as usize;
        match (0..k).rev().find(|&i| (values[i] as usize) < n - (k - 1 - i)) {
            Some(i) => {
                values[i] += 1;
                for j in i + 1..k {
                    values[j] = values[j - 1] + 1;
                }
            }
            None => self.current = None,
        }

        Some(combination)
    }
}
