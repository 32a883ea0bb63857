/// Parser for the block-structured notes describing a troop.
///
/// The notes are repeated blocks separated by blank lines, one block
/// per actor:
///
/// ```text
/// Monkey 0:
///   Starting items: 79, 98
///   Operation: new = old * 19
///   Test: divisible by 23
///     If true: throw to monkey 2
///     If false: throw to monkey 3
/// ```
///
/// Exactly six line shapes are recognized (plus the blank separator).
/// Anything else is a fatal error carrying the offending line — the
/// notes are trusted, self-authored input, and malformed notes are not
/// a recoverable condition for this tool.

use tracing::debug;

use crate::actor::{Actor, ActorId, Operation};
use crate::error::{TroopError, TroopResult};

/// Parse the full notes text into actors in declaration order.
///
/// Declared ids must equal declaration position. The returned actors
/// have not had their routes validated yet — that happens eagerly in
/// `Engine::new`, before any round runs.
pub fn parse_notes(input: &str) -> TroopResult<Vec<Actor>> {
    let mut actors: Vec<Actor> = Vec::new();
    let mut draft: Option<Draft> = None;

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() {
            if let Some(d) = draft.take() {
                actors.push(d.finish()?);
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("Monkey ") {
            let id_text = rest
                .strip_suffix(':')
                .ok_or_else(|| malformed(line_no, line))?;
            let found: usize = id_text
                .trim()
                .parse()
                .map_err(|_| malformed(line_no, line))?;

            // A new header also closes an unterminated previous block.
            if let Some(d) = draft.take() {
                actors.push(d.finish()?);
            }
            let expected = actors.len();
            if found != expected {
                return Err(TroopError::ActorOutOfOrder {
                    line: line_no,
                    expected,
                    found,
                });
            }
            draft = Some(Draft::new(ActorId::new(found)));
            continue;
        }

        // Every remaining shape is a field line and needs an open block.
        let d = draft
            .as_mut()
            .ok_or_else(|| malformed(line_no, line))?;

        if let Some(rest) = line.strip_prefix("Starting items:") {
            d.items = Some(parse_items(rest).ok_or_else(|| malformed(line_no, line))?);
        } else if let Some(rest) = line.strip_prefix("Operation: new = old ") {
            d.operation = Some(parse_operation(rest).ok_or_else(|| malformed(line_no, line))?);
        } else if let Some(rest) = line.strip_prefix("Test: divisible by ") {
            let divisor: u64 = rest
                .trim()
                .parse()
                .map_err(|_| malformed(line_no, line))?;
            // A zero divisor would make the routing test divide by zero.
            if divisor == 0 {
                return Err(malformed(line_no, line));
            }
            d.divisor = Some(divisor);
        } else if let Some(rest) = line.strip_prefix("If true: throw to monkey ") {
            let target: usize = rest
                .trim()
                .parse()
                .map_err(|_| malformed(line_no, line))?;
            d.on_true = Some(ActorId::new(target));
        } else if let Some(rest) = line.strip_prefix("If false: throw to monkey ") {
            let target: usize = rest
                .trim()
                .parse()
                .map_err(|_| malformed(line_no, line))?;
            d.on_false = Some(ActorId::new(target));
        } else {
            return Err(malformed(line_no, line));
        }
    }

    if let Some(d) = draft.take() {
        actors.push(d.finish()?);
    }
    if actors.is_empty() {
        return Err(TroopError::NoActors);
    }

    debug!(actors = actors.len(), "notes parsed");
    Ok(actors)
}

fn malformed(line: usize, text: &str) -> TroopError {
    TroopError::MalformedLine {
        line,
        text: text.to_string(),
    }
}

/// `"79, 98"` → `[79, 98]`. An empty list is allowed (an actor may
/// start a run holding nothing).
fn parse_items(rest: &str) -> Option<Vec<u64>> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Some(Vec::new());
    }
    rest.split(',').map(|t| t.trim().parse().ok()).collect()
}

/// The tail after `"new = old "` — `"+ 6"`, `"* 19"`, or `"* old"`.
fn parse_operation(rest: &str) -> Option<Operation> {
    let mut parts = rest.split_whitespace();
    let op = parts.next()?;
    let operand = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    match (op, operand) {
        ("*", "old") => Some(Operation::Square),
        ("*", k) => k.parse().ok().map(Operation::Mul),
        ("+", k) => k.parse().ok().map(Operation::Add),
        _ => None,
    }
}

// ── Draft ─────────────────────────────────────────────────────────────

/// A partially parsed actor block. `finish` fails unless all five
/// fields were declared.
struct Draft {
    id: ActorId,
    items: Option<Vec<u64>>,
    operation: Option<Operation>,
    divisor: Option<u64>,
    on_true: Option<ActorId>,
    on_false: Option<ActorId>,
}

impl Draft {
    fn new(id: ActorId) -> Self {
        Draft {
            id,
            items: None,
            operation: None,
            divisor: None,
            on_true: None,
            on_false: None,
        }
    }

    fn finish(self) -> TroopResult<Actor> {
        let incomplete = TroopError::IncompleteActor(self.id);
        Ok(Actor::new(
            self.id,
            self.items.ok_or_else(|| incomplete.clone())?,
            self.operation.ok_or_else(|| incomplete.clone())?,
            self.divisor.ok_or_else(|| incomplete.clone())?,
            self.on_true.ok_or_else(|| incomplete.clone())?,
            self.on_false.ok_or(incomplete)?,
        ))
    }
}
