use std::fmt;
use std::ops::Add;

use super::types::Weight;

/// Path length with an explicit "unreachable" sentinel.
///
/// Lengths are `i128` while weights are `i64`: a walk of fewer than 2^64
/// edges cannot leave the `i128` range, so relaxation never clamps a real
/// improvement away. Variant order matters: the derived `Ord` places every `Finite` value
/// below `Infinite`, so `min`/`<` behave like arithmetic over the extended
/// integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Finite(i128),
    Infinite,
}

impl Distance {
    pub const ZERO: Distance = Distance::Finite(0);

    pub fn is_finite(self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// The finite value, or `None` when unreachable.
    pub fn finite(self) -> Option<i128> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Infinite => None,
        }
    }

    /// `self + weight`. Infinity absorbs any weight.
    pub fn add_weight(self, weight: Weight) -> Distance {
        self.add_length(i128::from(weight))
    }

    /// Saturates at the `i128` bounds, reachable only by compounding negative
    /// cycles in an all-pairs table.
    fn add_length(self, length: i128) -> Distance {
        match self {
            Distance::Finite(d) => Distance::Finite(d.saturating_add(length)),
            Distance::Infinite => Distance::Infinite,
        }
    }

    /// Returns the candidate `self + weight` only when it strictly improves on `current`.
    ///
    /// This is the relaxation test shared by Bellman-Ford and Floyd-Warshall.
    pub fn relaxes(self, weight: Weight, current: Distance) -> Option<Distance> {
        let candidate = self.add_weight(weight);
        (candidate.is_finite() && candidate < current).then_some(candidate)
    }
}

impl Add<Weight> for Distance {
    type Output = Distance;

    fn add(self, weight: Weight) -> Distance {
        self.add_weight(weight)
    }
}

impl Add<Distance> for Distance {
    type Output = Distance;

    fn add(self, other: Distance) -> Distance {
        match other {
            Distance::Finite(d) => self.add_length(d),
            Distance::Infinite => Distance::Infinite,
        }
    }
}

impl From<Weight> for Distance {
    fn from(weight: Weight) -> Self {
        Distance::Finite(i128::from(weight))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Infinite => write!(f, "∞"),
        }
    }
}
