/// Actor records for the keep-away simulation.
///
/// An actor owns an ordered queue of worry levels, a fixed arithmetic
/// transform, and a divisibility-based routing rule. Actors never share
/// state — every item movement goes through the engine's round loop.

use std::fmt;

// ── ActorId ───────────────────────────────────────────────────────────

/// A unique identifier for an actor in the troop.
///
/// Ids equal declaration position, so they double as indices into the
/// engine's actor list (stable `0..N-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(usize);

impl ActorId {
    #[inline]
    pub fn new(id: usize) -> Self {
        ActorId(id)
    }

    /// The actor's position in declaration order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.0)
    }
}

// ── Operation ─────────────────────────────────────────────────────────

/// The worry-level transform an actor applies on every inspection.
///
/// A closed tagged variant parsed once from the notes — never an
/// executable code fragment. `apply` is a pure function, which keeps
/// the whole round loop deterministic and trivially testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    /// `new = old + k`
    Add(u64),
    /// `new = old * k`
    Mul(u64),
    /// `new = old * old`
    Square,
}

impl Operation {
    /// Apply the transform to a worry level.
    #[inline]
    pub fn apply(self, old: u64) -> u64 {
        match self {
            Operation::Add(k) => old + k,
            Operation::Mul(k) => old * k,
            Operation::Square => old * old,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add(k) => write!(f, "new = old + {}", k),
            Operation::Mul(k) => write!(f, "new = old * {}", k),
            Operation::Square => write!(f, "new = old * old"),
        }
    }
}

// ── Actor ─────────────────────────────────────────────────────────────

/// One member of the troop.
///
/// Created once from the notes (or the builder) and alive for the whole
/// run; only the `items` queue mutates afterwards. Insertion order in
/// `items` is inspection order within a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: ActorId,
    /// Worry levels currently held, in arrival order.
    pub items: Vec<u64>,
    pub operation: Operation,
    /// Divisor for the routing test. Strictly positive.
    pub divisor: u64,
    /// Target when `worry % divisor == 0`.
    pub on_true: ActorId,
    /// Target otherwise.
    pub on_false: ActorId,
}

impl Actor {
    pub fn new(
        id: ActorId,
        items: Vec<u64>,
        operation: Operation,
        divisor: u64,
        on_true: ActorId,
        on_false: ActorId,
    ) -> Self {
        Actor {
            id,
            items,
            operation,
            divisor,
            on_true,
            on_false,
        }
    }

    /// Where a (bounded) worry level gets thrown.
    #[inline]
    pub fn route(&self, worry: u64) -> ActorId {
        if worry % self.divisor == 0 {
            self.on_true
        } else {
            self.on_false
        }
    }
}
