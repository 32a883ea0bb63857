//! Structured error types for the troop kernel.
//!
//! All fallible public APIs return `Result<T, TroopError>`. Every
//! variant is fatal: the kernel is a deterministic batch calculator
//! over trusted, self-authored input, and the correct behavior when
//! that trust is violated is to stop, not to guess.

use crate::actor::ActorId;

/// The top-level error type for the troop simulation kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum TroopError {
    // ── Notes errors ──────────────────────────────────────

    /// A line in the notes matches none of the recognized patterns,
    /// or matches one out of context (e.g. a field before any header).
    MalformedLine { line: usize, text: String },

    /// An actor header declares an id that does not equal its
    /// declaration position.
    ActorOutOfOrder {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// An actor block ended before declaring all five of its fields.
    IncompleteActor(ActorId),

    /// The notes declare no actors at all.
    NoActors,

    // ── Configuration errors ──────────────────────────────

    /// A routing target references an actor that was never declared.
    UnknownRoute { from: ActorId, target: ActorId },

    /// The product of all divisors does not fit in a u64, so the
    /// global modulus cannot be computed.
    ModulusOverflow,
}

impl std::fmt::Display for TroopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TroopError::MalformedLine { line, text } => {
                write!(f, "line {}: unrecognized note {:?}", line, text)
            }
            TroopError::ActorOutOfOrder {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {}: expected actor {} but notes declare actor {}",
                line, expected, found
            ),
            TroopError::IncompleteActor(id) => {
                write!(f, "actor {} is missing one or more declarations", id)
            }
            TroopError::NoActors => write!(f, "notes declare no actors"),
            TroopError::UnknownRoute { from, target } => {
                write!(f, "actor {} routes to undeclared actor {}", from, target)
            }
            TroopError::ModulusOverflow => {
                write!(f, "product of divisors overflows the global modulus")
            }
        }
    }
}

impl std::error::Error for TroopError {}

/// Convenience alias for `Result<T, TroopError>`.
pub type TroopResult<T> = Result<T, TroopError>;
