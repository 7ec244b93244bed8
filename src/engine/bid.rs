//! Bid value type.
//!
//! A bid claims that at least `count` dice across the table show `face` or
//! are wild. Ones are wild and can never be bid on directly, so legal faces
//! run from 2 to 6.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest face that may be bid.
pub const MIN_FACE: u8 = 2;

/// Highest face on a die.
pub const MAX_FACE: u8 = 6;

/// The wild face. Counts toward every bid.
pub const WILD_FACE: u8 = 1;

/// A claim of the form "at least `count` dice show `face` (or are wild)".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bid {
    /// Number of dice claimed.
    pub count: usize,
    /// Face value claimed (2..=6).
    pub face: u8,
}

impl Bid {
    /// Create a bid. No validation is done here; the round engine decides
    /// whether a bid is legal.
    pub fn new(count: usize, face: u8) -> Self {
        Self { count, face }
    }

    /// Check whether this bid strictly outranks `other`.
    ///
    /// A bid is higher if it claims more dice on the same or a higher face,
    /// or the same number of dice on a higher face. Every bid outranks an
    /// absent bid.
    pub fn is_higher_than(&self, other: Option<&Bid>) -> bool {
        match other {
            None => true,
            Some(other) => {
                (self.count > other.count && self.face >= other.face)
                    || (self.count == other.count && self.face > other.face)
            }
        }
    }

    /// Check that the bid names at least one die and a biddable face.
    pub fn is_well_formed(&self) -> bool {
        self.count >= 1 && (MIN_FACE..=MAX_FACE).contains(&self.face)
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} x {})", self.count, self.face)
    }
}
