//! # Troop — Deterministic Keep-Away Simulation Kernel
//!
//! A simulation kernel for the monkey keep-away puzzle: a fixed troop of
//! actors passing integer "worry levels" between item queues, driven by
//! a fully deterministic round loop. No threads, no wall-clock time, no
//! randomness — two runs over the same notes always agree.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │       Engine          │ ← round loop over actors in id order
//! │  ┌────────────────┐  │
//! │  │     Actor       │  │ ← item queue + transform + routing test
//! │  └────────────────┘  │
//! │  ┌────────────────┐  │
//! │  │    Bounding     │  │ ← relief (÷3) or modulo reduction
//! │  └────────────────┘  │
//! │  ┌────────────────┐  │
//! │  │     Tally       │  │ ← inspection counts → monkey business
//! │  └────────────────┘  │
//! └──────────────────────┘
//!          ▲
//!          │ parse_notes / TroopBuilder
//! ```
//!
//! The notes parser turns block-structured text into `Actor` records,
//! the engine runs them for a configured number of rounds, and the
//! tally reduces the per-actor inspection counts to a single answer.

pub mod actor;
pub mod builder;
pub mod engine;
pub mod error;
pub mod notes;
pub mod tally;

// Re-exports for convenience.
pub use actor::{Actor, ActorId, Operation};
pub use builder::TroopBuilder;
pub use engine::{Bounding, Engine, ThrowRecord};
pub use error::{TroopError, TroopResult};
pub use notes::parse_notes;
