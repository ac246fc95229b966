use crate::circuit::Circuit;
use crate::engines::validation::reachability::{mark_reachable, unvisited_units};
use crate::types::Stream;
use thiserror::Error;

/// The first structural rule an encoded circuit breaks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("value {missing} is missing from the unit numbering")]
    NumberingGap { missing: usize },

    #[error("unit {unit} cannot be reached from the feed")]
    Unreachable { unit: usize },

    #[error("{stream:?} stream of unit {unit} is routed to the wrong outlet")]
    MisroutedOutlet { unit: usize, stream: Stream },

    #[error("no unit sends its concentrate to the concentrate outlet")]
    MissingConcentrateOutlet,

    #[error("no unit sends its tailings to the tailings outlet")]
    MissingTailingsOutlet,

    #[error("unit {unit} recycles into itself")]
    SelfRecycle { unit: usize },

    #[error("all streams of unit {unit} go to the same destination")]
    SingleDestination { unit: usize },

    #[error("unit {unit} has an unassigned destination")]
    UnassignedDestination { unit: usize },

    #[error("{stream:?} destination {value} of unit {unit} is out of range")]
    DestinationOutOfRange { unit: usize, stream: Stream, value: usize },

    #[error("unit {unit} makes concentrate but {tailings} of its {total} inputs are tailings")]
    TailingsFedConcentrator { unit: usize, tailings: usize, total: usize },

    #[error("feed {feed} is not a unit of a {num_units}-unit circuit")]
    FeedOutOfRange { feed: usize, num_units: usize },
}

impl Violation {
    /// Position of the broken rule in the fixed check order, 1 through 9.
    pub fn rule(&self) -> u8 {
        match self {
            Violation::NumberingGap { .. } => 1,
            Violation::Unreachable { .. } => 2,
            Violation::MisroutedOutlet { .. }
            | Violation::MissingConcentrateOutlet
            | Violation::MissingTailingsOutlet => 3,
            Violation::SelfRecycle { .. } => 4,
            Violation::SingleDestination { .. } => 5,
            Violation::UnassignedDestination { .. } => 6,
            Violation::DestinationOutOfRange { .. } => 7,
            Violation::TailingsFedConcentrator { .. } => 8,
            Violation::FeedOutOfRange { .. } => 9,
        }
    }
}

/// Structural validity of encoded circuits.
///
/// Rules run in a fixed order and stop at the first failure. Each is
/// independently necessary, so the order only affects which `Violation` is
/// reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidityChecker;

impl ValidityChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn is_valid(&self, vector: &[usize]) -> bool {
        self.check(vector).is_ok()
    }

    pub fn check(&self, vector: &[usize]) -> Result<(), Violation> {
        let mut circuit = Circuit::from_vector(vector);

        check_numbering(vector)?;
        check_reachable(&mut circuit)?;
        check_outlets(&circuit)?;
        check_self_recycle(&circuit)?;
        check_distinct_destinations(&circuit)?;
        check_assigned(&circuit)?;
        check_bounds(&circuit)?;
        check_concentrator_inputs(&circuit)?;
        check_feed(&circuit)?;

        Ok(())
    }
}

/// Shorthand for `ValidityChecker::new().is_valid(vector)`.
pub fn is_valid(vector: &[usize]) -> bool {
    ValidityChecker.is_valid(vector)
}

fn check_numbering(vector: &[usize]) -> Result<(), Violation> {
    let max = vector.iter().copied().max().unwrap_or(0);
    if max > vector.len() {
        // `max` distinct values cannot fit in fewer elements; find the first hole.
        let missing = (0..max).find(|v| !vector.contains(v)).unwrap_or(0);
        return Err(Violation::NumberingGap { missing });
    }

    let mut seen = vec![false; max + 1];
    for &value in vector {
        seen[value] = true;
    }
    match seen.iter().position(|present| !present) {
        Some(missing) => Err(Violation::NumberingGap { missing }),
        None => Ok(()),
    }
}

fn check_reachable(circuit: &mut Circuit) -> Result<(), Violation> {
    // An out-of-range feed is reported by `check_feed`; traverse from unit 0
    // so the remaining rules still get a meaningful marking.
    let start = if circuit.feed < circuit.num_units() { circuit.feed } else { 0 };

    circuit.clear_visited();
    mark_reachable(circuit, start);

    match unvisited_units(circuit).first() {
        Some(&unit) => Err(Violation::Unreachable { unit }),
        None => Ok(()),
    }
}

fn check_outlets(circuit: &Circuit) -> Result<(), Violation> {
    let conc_outlet = Some(circuit.concentrate_outlet());
    let tails_outlet = Some(circuit.tailings_outlet());
    let mut has_concentrate = false;
    let mut has_tailings = false;

    for (unit, u) in circuit.units.iter().enumerate() {
        if u.inter_dest == conc_outlet || u.inter_dest == tails_outlet {
            return Err(Violation::MisroutedOutlet { unit, stream: Stream::Intermediate });
        }
        if u.tails_dest == conc_outlet {
            return Err(Violation::MisroutedOutlet { unit, stream: Stream::Tailings });
        }
        if u.conc_dest == tails_outlet {
            return Err(Violation::MisroutedOutlet { unit, stream: Stream::Concentrate });
        }
        has_concentrate |= u.conc_dest == conc_outlet;
        has_tailings |= u.tails_dest == tails_outlet;
    }

    if !has_concentrate {
        return Err(Violation::MissingConcentrateOutlet);
    }
    if !has_tailings {
        return Err(Violation::MissingTailingsOutlet);
    }
    Ok(())
}

fn check_self_recycle(circuit: &Circuit) -> Result<(), Violation> {
    for (unit, u) in circuit.units.iter().enumerate() {
        if u.destinations().contains(&Some(unit)) {
            return Err(Violation::SelfRecycle { unit });
        }
    }
    Ok(())
}

fn check_distinct_destinations(circuit: &Circuit) -> Result<(), Violation> {
    for (unit, u) in circuit.units.iter().enumerate() {
        if u.conc_dest == u.inter_dest && u.inter_dest == u.tails_dest {
            return Err(Violation::SingleDestination { unit });
        }
    }
    Ok(())
}

fn check_assigned(circuit: &Circuit) -> Result<(), Violation> {
    match circuit.units.iter().position(|u| !u.is_fully_assigned()) {
        Some(unit) => Err(Violation::UnassignedDestination { unit }),
        None => Ok(()),
    }
}

fn check_bounds(circuit: &Circuit) -> Result<(), Violation> {
    let n = circuit.num_units();
    for (unit, u) in circuit.units.iter().enumerate() {
        for stream in Stream::ALL {
            let limit = match stream {
                Stream::Concentrate => n,
                Stream::Intermediate => n.saturating_sub(1),
                Stream::Tailings => n + 1,
            };
            if let Some(value) = u.destination(stream) {
                if value > limit {
                    return Err(Violation::DestinationOutOfRange { unit, stream, value });
                }
            }
        }
    }
    Ok(())
}

fn check_concentrator_inputs(circuit: &Circuit) -> Result<(), Violation> {
    let conc_outlet = Some(circuit.concentrate_outlet());
    for (unit, u) in circuit.units.iter().enumerate() {
        if u.conc_dest != conc_outlet {
            continue;
        }
        let incoming = circuit.incoming_streams(unit);
        if incoming.tailings as f64 > incoming.total() as f64 * 0.5 {
            return Err(Violation::TailingsFedConcentrator {
                unit,
                tailings: incoming.tailings,
                total: incoming.total(),
            });
        }
    }
    Ok(())
}

fn check_feed(circuit: &Circuit) -> Result<(), Violation> {
    if circuit.feed >= circuit.num_units() {
        return Err(Violation::FeedOutOfRange {
            feed: circuit.feed,
            num_units: circuit.num_units(),
        });
    }
    Ok(())
}
