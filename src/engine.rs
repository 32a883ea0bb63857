/// Round execution loop.
///
/// Drives a troop of actors through keep-away rounds: each actor in
/// ascending id order drains the items present at the start of its
/// turn, transforms and bounds each worry level, and throws it to the
/// target chosen by the divisibility test. Purely synchronous and
/// single-threaded — determinism is trivial.

use tracing::{debug, trace};

use crate::actor::{Actor, ActorId};
use crate::error::{TroopError, TroopResult};
use crate::tally;

// ── Bounding ──────────────────────────────────────────────────────────

/// How worry levels are kept from growing without bound.
///
/// Exactly one mode is active per run. The two modes produce different
/// item values but identical divisibility outcomes within their own
/// mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Bounding {
    /// Relief after every inspection: `worry / 3`, rounding down.
    Relief,
    /// Reduce modulo the product of all divisors. Each divisor divides
    /// the modulus, so no routing test ever changes outcome.
    Modulo,
}

impl Default for Bounding {
    fn default() -> Self {
        Bounding::Relief
    }
}

// ── Throw trace ───────────────────────────────────────────────────────

/// A record of one inspected-and-thrown item — useful for test
/// assertions and debugging. Recorded only when tracing is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ThrowRecord {
    /// 1-based round in which the throw happened.
    pub round: u64,
    pub from: ActorId,
    pub to: ActorId,
    /// The bounded worry level that was thrown.
    pub worry: u64,
}

// ── Engine ────────────────────────────────────────────────────────────

/// Top-level simulation driver.
///
/// Owns the actor list and the per-actor inspection counters. Call
/// `run` to execute a number of rounds, or `round` to advance by
/// exactly one. Construction validates every routing target and
/// computes the global modulus exactly once.
#[derive(Debug, Clone)]
pub struct Engine {
    actors: Vec<Actor>,
    /// Inspection counters, indexed by actor id. Only ever incremented.
    inspections: Vec<u64>,
    bounding: Bounding,
    /// Product of all divisors. Fixed for the lifetime of the engine.
    modulus: u64,
    rounds_played: u64,
    /// Append-only throw trace, `None` unless enabled.
    trace: Option<Vec<ThrowRecord>>,
}

impl Engine {
    /// Build an engine over `actors`.
    ///
    /// Fails fast on a routing target that references an undeclared
    /// actor, and on a divisor product that overflows `u64`.
    pub fn new(actors: Vec<Actor>, bounding: Bounding) -> TroopResult<Self> {
        let count = actors.len();
        for actor in &actors {
            for target in [actor.on_true, actor.on_false] {
                if target.index() >= count {
                    return Err(TroopError::UnknownRoute {
                        from: actor.id,
                        target,
                    });
                }
            }
        }

        let mut modulus: u64 = 1;
        for actor in &actors {
            modulus = modulus
                .checked_mul(actor.divisor)
                .ok_or(TroopError::ModulusOverflow)?;
        }

        Ok(Engine {
            inspections: vec![0; count],
            actors,
            bounding,
            modulus,
            rounds_played: 0,
            trace: None,
        })
    }

    /// Start recording a `ThrowRecord` for every inspected item.
    /// Recording never affects simulation outcomes.
    pub fn enable_trace(&mut self) {
        if self.trace.is_none() {
            self.trace = Some(Vec::new());
        }
    }

    /// Execute one round: every actor, in ascending id order, drains
    /// the items present at the moment its turn starts.
    ///
    /// Items thrown forward by a lower-id actor earlier in the same
    /// round are in that snapshot and get inspected this round; items
    /// thrown backward (or to the inspecting actor itself) land after
    /// the owner's turn and wait for the next round.
    pub fn round(&mut self) {
        self.rounds_played += 1;
        for i in 0..self.actors.len() {
            let pending = std::mem::take(&mut self.actors[i].items);
            self.inspections[i] += pending.len() as u64;

            for old in pending {
                let worry = self.bound(self.actors[i].operation.apply(old));
                let target = self.actors[i].route(worry);
                if let Some(t) = self.trace.as_mut() {
                    t.push(ThrowRecord {
                        round: self.rounds_played,
                        from: ActorId::new(i),
                        to: target,
                        worry,
                    });
                }
                self.actors[target.index()].items.push(worry);
            }
        }
        trace!(round = self.rounds_played, "round complete");
    }

    /// Execute `rounds` rounds.
    pub fn run(&mut self, rounds: u64) {
        for _ in 0..rounds {
            self.round();
        }
        debug!(
            rounds,
            total = self.rounds_played,
            business = self.monkey_business(),
            "run complete"
        );
    }

    #[inline]
    fn bound(&self, worry: u64) -> u64 {
        match self.bounding {
            Bounding::Relief => worry / 3,
            Bounding::Modulo => worry % self.modulus,
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    /// The actors in id order.
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Per-actor inspection counts, indexed by actor id.
    pub fn inspections(&self) -> &[u64] {
        &self.inspections
    }

    /// The items an actor currently holds, in arrival order.
    pub fn holdings(&self, id: ActorId) -> Option<&[u64]> {
        self.actors.get(id.index()).map(|a| a.items.as_slice())
    }

    /// The global modulus (product of all divisors).
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Rounds executed so far.
    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    /// The active bounding mode.
    pub fn bounding(&self) -> Bounding {
        self.bounding
    }

    /// The recorded throws, if tracing was enabled.
    pub fn throws(&self) -> Option<&[ThrowRecord]> {
        self.trace.as_deref()
    }

    /// Product of the two highest inspection counts.
    pub fn monkey_business(&self) -> u64 {
        tally::monkey_business(&self.inspections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Operation;
    use crate::builder::TroopBuilder;

    /// The documented 4-actor example troop.
    fn canonical() -> TroopBuilder {
        TroopBuilder::new()
            .actor(&[79, 98], Operation::Mul(19), 23, 2, 3)
            .actor(&[54, 65, 75, 74], Operation::Add(6), 19, 2, 0)
            .actor(&[79, 60, 97], Operation::Square, 13, 1, 3)
            .actor(&[74], Operation::Add(3), 17, 0, 1)
    }

    #[test]
    fn test_relief_round_one_holdings() {
        let mut engine = canonical().build().unwrap();
        engine.round();

        assert_eq!(engine.holdings(ActorId::new(0)), Some(&[20, 23, 27, 26][..]));
        assert_eq!(
            engine.holdings(ActorId::new(1)),
            Some(&[2080, 25, 167, 207, 401, 1046][..])
        );
        assert_eq!(engine.holdings(ActorId::new(2)), Some(&[][..]));
        assert_eq!(engine.holdings(ActorId::new(3)), Some(&[][..]));
        assert_eq!(engine.inspections(), &[2, 4, 3, 5]);
    }

    #[test]
    fn test_relief_twenty_rounds() {
        let engine = canonical().run(20).unwrap();
        assert_eq!(engine.inspections(), &[101, 95, 7, 105]);
        assert_eq!(engine.monkey_business(), 10605);
    }

    #[test]
    fn test_modulo_ten_thousand_rounds() {
        let engine = canonical().bounding(Bounding::Modulo).run(10_000).unwrap();
        assert_eq!(engine.inspections(), &[52166, 47830, 1938, 52013]);
        assert_eq!(engine.monkey_business(), 2_713_310_158);
    }

    #[test]
    fn test_forward_throw_inspected_same_round() {
        // M0 throws to the higher-numbered M1, whose turn has not yet
        // started — the item must be inspected within the same round.
        let mut engine = TroopBuilder::new()
            .actor(&[5], Operation::Add(0), 1, 1, 1)
            .actor(&[], Operation::Add(0), 1, 0, 0)
            .bounding(Bounding::Modulo)
            .build()
            .unwrap();

        engine.round();
        assert_eq!(engine.inspections(), &[1, 1]);
        // M1 threw it back after its own turn, so M0 holds it again.
        assert_eq!(engine.holdings(ActorId::new(0)).unwrap().len(), 1);
    }

    #[test]
    fn test_backward_throw_waits_for_next_round() {
        // M1 throws to the lower-numbered M0, whose turn is already
        // over — the item must wait until the next round.
        let mut engine = TroopBuilder::new()
            .actor(&[], Operation::Add(0), 1, 1, 1)
            .actor(&[5], Operation::Add(0), 1, 0, 0)
            .bounding(Bounding::Modulo)
            .build()
            .unwrap();

        engine.round();
        assert_eq!(engine.inspections(), &[0, 1]);
        engine.round();
        assert_eq!(engine.inspections(), &[1, 2]);
    }

    #[test]
    fn test_self_route_waits_for_next_round() {
        // A route may point back at the throwing actor; the item still
        // lands after the turn's snapshot and is not re-inspected until
        // the next round.
        let mut engine = TroopBuilder::new()
            .actor(&[3], Operation::Add(0), 1, 0, 0)
            .bounding(Bounding::Modulo)
            .build()
            .unwrap();

        engine.round();
        assert_eq!(engine.inspections(), &[1]);
        assert_eq!(engine.holdings(ActorId::new(0)).unwrap().len(), 1);
        engine.round();
        assert_eq!(engine.inspections(), &[2]);
    }

    #[test]
    fn test_dangling_route_rejected_at_construction() {
        let err = TroopBuilder::new()
            .actor(&[1], Operation::Add(1), 2, 0, 5)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            TroopError::UnknownRoute {
                from: ActorId::new(0),
                target: ActorId::new(5),
            }
        );
    }

    #[test]
    fn test_modulus_overflow_rejected() {
        let err = TroopBuilder::new()
            .actor(&[], Operation::Add(1), u64::MAX, 1, 1)
            .actor(&[], Operation::Add(1), 3, 0, 0)
            .build()
            .unwrap_err();
        assert_eq!(err, TroopError::ModulusOverflow);
    }

    #[test]
    fn test_modulus_computed_once_from_divisors() {
        let engine = canonical().build().unwrap();
        assert_eq!(engine.modulus(), 23 * 19 * 13 * 17);
    }

    #[test]
    fn test_modulo_reduction_preserves_divisibility() {
        let modulus: u64 = 23 * 19 * 13 * 17;
        for v in [0u64, 1, 7, 1501, 96_576, 96_577, 9_999_999_999] {
            for d in [23u64, 19, 13, 17] {
                assert_eq!((v % modulus) % d, v % d, "v={}, d={}", v, d);
            }
        }
    }

    #[test]
    fn test_modulo_bound_keeps_worry_below_modulus() {
        let mut engine = canonical().bounding(Bounding::Modulo).build().unwrap();
        engine.enable_trace();
        engine.run(100);

        let modulus = engine.modulus();
        let throws = engine.throws().unwrap();
        assert!(!throws.is_empty());
        for t in throws {
            assert!(t.worry < modulus, "worry {} escaped the modulus", t.worry);
        }
    }

    #[test]
    fn test_trace_records_round_and_route() {
        let mut engine = TroopBuilder::new()
            .actor(&[5], Operation::Add(0), 1, 1, 1)
            .actor(&[], Operation::Add(0), 1, 0, 0)
            .bounding(Bounding::Modulo)
            .build()
            .unwrap();
        engine.enable_trace();
        engine.round();

        let throws = engine.throws().unwrap();
        assert_eq!(throws.len(), 2);
        assert_eq!(throws[0].round, 1);
        assert_eq!(throws[0].from, ActorId::new(0));
        assert_eq!(throws[0].to, ActorId::new(1));
        assert_eq!(throws[1].from, ActorId::new(1));
        assert_eq!(throws[1].to, ActorId::new(0));
    }

    #[test]
    fn test_trace_does_not_change_outcome() {
        let mut traced = canonical().build().unwrap();
        traced.enable_trace();
        traced.run(20);

        let plain = canonical().run(20).unwrap();
        assert_eq!(traced.inspections(), plain.inspections());
        assert_eq!(traced.monkey_business(), plain.monkey_business());
    }

    #[test]
    fn test_deterministic_replay() {
        fn run_once() -> (Vec<u64>, Vec<Vec<u64>>) {
            let engine = canonical().bounding(Bounding::Modulo).run(50).unwrap();
            let holdings = engine
                .actors()
                .iter()
                .map(|a| a.items.clone())
                .collect();
            (engine.inspections().to_vec(), holdings)
        }

        let run1 = run_once();
        let run2 = run_once();
        assert_eq!(run1, run2, "simulation is not deterministic!");
    }

    #[test]
    fn test_empty_round_counts_nothing() {
        let mut engine = TroopBuilder::new()
            .actor(&[], Operation::Add(1), 2, 0, 0)
            .build()
            .unwrap();
        engine.run(10);
        assert_eq!(engine.inspections(), &[0]);
        assert_eq!(engine.rounds_played(), 10);
    }
}
