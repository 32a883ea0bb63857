/// Fluent builder for programmatic troop setup.
///
/// Hides the boilerplate of assembling `Actor` records by hand when
/// there are no notes to parse — unit tests and embedded callers
/// declare actors in order and get a validated `Engine` back.

use crate::actor::{Actor, ActorId, Operation};
use crate::engine::{Bounding, Engine};
use crate::error::TroopResult;

/// Fluent builder for constructing an `Engine`.
///
/// Actors receive ids in declaration order, exactly as the notes parser
/// assigns them.
///
/// # Example
/// ```rust
/// use troop::{Operation, TroopBuilder};
///
/// let engine = TroopBuilder::new()
///     .actor(&[79, 98], Operation::Mul(19), 23, 2, 3)
///     .actor(&[54, 65, 75, 74], Operation::Add(6), 19, 2, 0)
///     .actor(&[79, 60, 97], Operation::Square, 13, 1, 3)
///     .actor(&[74], Operation::Add(3), 17, 0, 1)
///     .run(20)
///     .unwrap();
///
/// assert_eq!(engine.monkey_business(), 10605);
/// ```
pub struct TroopBuilder {
    actors: Vec<Actor>,
    bounding: Bounding,
}

impl TroopBuilder {
    /// Create a new builder. The bounding mode defaults to `Relief`.
    pub fn new() -> Self {
        TroopBuilder {
            actors: Vec::new(),
            bounding: Bounding::default(),
        }
    }

    /// Declare the next actor. Its id is its declaration position.
    pub fn actor(
        mut self,
        items: &[u64],
        operation: Operation,
        divisor: u64,
        on_true: usize,
        on_false: usize,
    ) -> Self {
        let id = ActorId::new(self.actors.len());
        self.actors.push(Actor::new(
            id,
            items.to_vec(),
            operation,
            divisor,
            ActorId::new(on_true),
            ActorId::new(on_false),
        ));
        self
    }

    /// Select the worry bounding mode.
    pub fn bounding(mut self, bounding: Bounding) -> Self {
        self.bounding = bounding;
        self
    }

    /// Build the engine (validates routes, computes the modulus).
    pub fn build(self) -> TroopResult<Engine> {
        Engine::new(self.actors, self.bounding)
    }

    /// Build and run `rounds` rounds in one step.
    pub fn run(self, rounds: u64) -> TroopResult<Engine> {
        let mut engine = self.build()?;
        engine.run(rounds);
        Ok(engine)
    }
}

impl Default for TroopBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_declaration_order() {
        let engine = TroopBuilder::new()
            .actor(&[1], Operation::Add(1), 2, 1, 1)
            .actor(&[2], Operation::Mul(2), 3, 0, 0)
            .build()
            .unwrap();

        let actors = engine.actors();
        assert_eq!(actors[0].id, ActorId::new(0));
        assert_eq!(actors[1].id, ActorId::new(1));
        assert_eq!(actors[1].operation, Operation::Mul(2));
    }

    #[test]
    fn test_run_shorthand() {
        let engine = TroopBuilder::new()
            .actor(&[5, 5], Operation::Add(0), 1, 0, 0)
            .bounding(Bounding::Modulo)
            .run(3)
            .unwrap();

        assert_eq!(engine.rounds_played(), 3);
        assert_eq!(engine.inspections(), &[6]);
    }

    #[test]
    fn test_build_validates_routes() {
        let result = TroopBuilder::new()
            .actor(&[1], Operation::Add(1), 2, 7, 0)
            .build();
        assert!(result.is_err());
    }
}
