use crate::color::Color;

use std::cell::Cell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Whether a railway is still up for grabs, and if not, who holds it.
///
/// `Claimed { owner: None }` marks a parallel railway that was removed from
/// play when another railway on the same city pair was claimed: nobody owns
/// it, but nobody can claim it either.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClaimState {
    Open,
    Claimed { owner: Option<usize> },
}

/// An edge between two cities: the number of cards needed to claim it, the
/// color those cards must have, and the claim state.
///
/// The claim state lives in a shared cell, so every clone of a railway (the
/// graph stores one under each endpoint, and the claiming player keeps one)
/// observes the same claim. Because of the shared cell, a `Railway` is not
/// thread-safe.
///
/// Equality and hashing cover length, color, and the *unordered* endpoint
/// pair; the claim state is excluded. Parallel railways between the same two
/// cities are distinct entries in the graph, but compare equal whenever their
/// color and length also match.
#[derive(Clone, Debug)]
pub struct Railway {
    length: u8,
    color: Color,
    endpoint_a: String,
    endpoint_b: String,
    state: Rc<Cell<ClaimState>>,
}

impl Railway {
    /// Creates an unclaimed railway.
    ///
    /// The endpoints must differ, the color must not be the wildcard, and
    /// the length must be positive; violating any of these is a programming
    /// error and panics.
    ///
    /// # Examples:
    /// ```
    /// use trunkline::color::Color;
    /// use trunkline::railway::Railway;
    ///
    /// let railway = Railway::new(2, Color::Gray, "Nashville", "Saint Louis");
    /// assert_eq!(railway.length(), 2);
    /// assert!(!railway.is_claimed());
    /// ```
    pub fn new(
        length: u8,
        color: Color,
        endpoint_a: impl Into<String>,
        endpoint_b: impl Into<String>,
    ) -> Self {
        let endpoint_a = endpoint_a.into();
        let endpoint_b = endpoint_b.into();

        assert!(length > 0, "a railway must have a positive length");
        assert!(
            color.is_not_wild(),
            "no railway edge can require the wildcard"
        );
        assert_ne!(
            endpoint_a, endpoint_b,
            "a railway must connect two distinct cities"
        );

        Self {
            length,
            color,
            endpoint_a,
            endpoint_b,
            state: Rc::new(Cell::new(ClaimState::Open)),
        }
    }

    /// The number of cards (and trains) needed to claim this railway.
    #[inline]
    pub fn length(&self) -> u8 {
        self.length
    }

    /// The color of cards this railway must be paid with.
    /// [`Color::Gray`] means any one concrete color.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// One endpoint of this railway.
    #[inline]
    pub fn endpoint_a(&self) -> &str {
        &self.endpoint_a
    }

    /// The other endpoint of this railway.
    #[inline]
    pub fn endpoint_b(&self) -> &str {
        &self.endpoint_b
    }

    /// Whether the given city is one of this railway's endpoints.
    pub fn is_endpoint(&self, city: &str) -> bool {
        self.endpoint_a == city || self.endpoint_b == city
    }

    /// Given one endpoint, returns the opposite one, or `None` if the given
    /// city is not an endpoint of this railway.
    pub fn other_endpoint(&self, city: &str) -> Option<&str> {
        if self.endpoint_a == city {
            Some(&self.endpoint_b)
        } else if self.endpoint_b == city {
            Some(&self.endpoint_a)
        } else {
            None
        }
    }

    /// Whether either endpoint is contained in the given set of cities.
    pub fn touches(&self, cities: &HashSet<String>) -> bool {
        cities.contains(&self.endpoint_a) || cities.contains(&self.endpoint_b)
    }

    /// The current claim state.
    #[inline]
    pub fn state(&self) -> ClaimState {
        self.state.get()
    }

    /// Whether this railway has been claimed (owned by a player, or removed
    /// from play as a parallel duplicate).
    #[inline]
    pub fn is_claimed(&self) -> bool {
        self.state.get() != ClaimState::Open
    }

    /// The index of the player owning this railway, if any.
    #[inline]
    pub fn owner(&self) -> Option<usize> {
        match self.state.get() {
            ClaimState::Open => None,
            ClaimState::Claimed { owner } => owner,
        }
    }

    /// Marks this railway claimed, for an owning player (`Some`) or as a
    /// removed parallel (`None`). Every clone sharing the cell observes it.
    #[inline]
    pub(crate) fn claim_for(&self, owner: Option<usize>) {
        self.state.set(ClaimState::Claimed { owner });
    }
}

impl PartialEq for Railway {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self.color == other.color
            && ((self.endpoint_a == other.endpoint_a && self.endpoint_b == other.endpoint_b)
                || (self.endpoint_a == other.endpoint_b && self.endpoint_b == other.endpoint_a))
    }
}

impl Eq for Railway {}

impl Hash for Railway {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        self.color.hash(state);

        // The endpoint pair is unordered, so hash it in a canonical order.
        let (first, second) = if self.endpoint_a <= self.endpoint_b {
            (&self.endpoint_a, &self.endpoint_b)
        } else {
            (&self.endpoint_b, &self.endpoint_a)
        };
        first.hash(state);
        second.hash(state);
    }
}

impl fmt::Display for Railway {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} railway of length {} between {} and {}",
            self.color, self.length, self.endpoint_a, self.endpoint_b
        )
    }
}
