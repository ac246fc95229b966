pub mod unit;

pub use unit::Unit;

use crate::types::{CircuitVector, Stream};

/// Length of the encoded vector for a circuit of `num_units` units.
pub fn vector_len(num_units: usize) -> usize {
    3 * num_units + 1
}

/// Number of units an encoded vector of `len` elements describes.
///
/// A trailing partial triple still produces a unit; its missing fields stay
/// unassigned.
pub fn unit_count(len: usize) -> usize {
    len.saturating_sub(1).div_ceil(3)
}

/// Starting individual used when the caller has none: `v[i] = i` for every
/// `i <= N + 1`, zero elsewhere.
pub fn default_seed(num_units: usize) -> CircuitVector {
    let len = vector_len(num_units);
    (0..len)
        .map(|i| if i <= num_units + 1 { i } else { 0 })
        .collect()
}

/// A materialised circuit: `N` units plus the implicit outlets at `N`
/// (concentrate) and `N + 1` (tailings).
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    pub feed: usize,
    pub units: Vec<Unit>,
}

impl Circuit {
    pub fn from_vector(vector: &[usize]) -> Self {
        let num_units = unit_count(vector.len());
        let field =
            |unit: usize, stream: Stream| vector.get(3 * unit + 1 + stream.offset()).copied();

        let units = (0..num_units)
            .map(|i| Unit {
                conc_dest: field(i, Stream::Concentrate),
                inter_dest: field(i, Stream::Intermediate),
                tails_dest: field(i, Stream::Tailings),
                ..Default::default()
            })
            .collect();

        Self {
            feed: vector.first().copied().unwrap_or(0),
            units,
        }
    }

    /// Encode back to a vector. `None` if any destination is unassigned.
    pub fn to_vector(&self) -> Option<CircuitVector> {
        let mut vector = Vec::with_capacity(vector_len(self.units.len()));
        vector.push(self.feed);
        for unit in &self.units {
            for dest in unit.destinations() {
                vector.push(dest?);
            }
        }
        Some(vector)
    }

    pub fn num_units(&self) -> usize {
        self.units.len()
    }

    pub fn concentrate_outlet(&self) -> usize {
        self.units.len()
    }

    pub fn tailings_outlet(&self) -> usize {
        self.units.len() + 1
    }

    pub fn clear_visited(&mut self) {
        for unit in &mut self.units {
            unit.visited = false;
        }
    }

    /// Streams, counted by type, that feed `target` from other units.
    pub fn incoming_streams(&self, target: usize) -> IncomingStreams {
        let mut incoming = IncomingStreams::default();
        for unit in &self.units {
            if unit.tails_dest == Some(target) {
                incoming.tailings += 1;
            }
            if unit.conc_dest == Some(target) {
                incoming.concentrate += 1;
            }
            if unit.inter_dest == Some(target) {
                incoming.intermediate += 1;
            }
        }
        incoming
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncomingStreams {
    pub concentrate: usize,
    pub intermediate: usize,
    pub tailings: usize,
}

impl IncomingStreams {
    pub fn total(&self) -> usize {
        self.concentrate + self.intermediate + self.tailings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vector_assigns_destinations() {
        let vector = vec![0, 1, 1, 2, 2, 3, 3, 0, 4, 1, 0, 2, 6, 5, 0, 6];
        let circuit = Circuit::from_vector(&vector);

        assert_eq!(circuit.num_units(), 5);
        assert_eq!(circuit.units[0], Unit::new(1, 1, 2));
        assert_eq!(circuit.units[1], Unit::new(2, 3, 3));
        assert_eq!(circuit.units[2], Unit::new(0, 4, 1));
        assert_eq!(circuit.units[3], Unit::new(0, 2, 6));
        assert_eq!(circuit.units[4], Unit::new(5, 0, 6));
        assert_eq!(circuit.to_vector(), Some(vector));
    }

    #[test]
    fn test_short_vector_leaves_fields_unassigned() {
        let circuit = Circuit::from_vector(&[0, 1, 2, 4, 3, 0, 2, 0, 1]);

        assert_eq!(circuit.num_units(), 3);
        assert_eq!(circuit.units[2].conc_dest, Some(0));
        assert_eq!(circuit.units[2].inter_dest, Some(1));
        assert_eq!(circuit.units[2].tails_dest, None);
        assert!(!circuit.units[2].is_fully_assigned());
        assert_eq!(circuit.to_vector(), None);
    }

    #[test]
    fn test_default_seed_layout() {
        assert_eq!(default_seed(3), vec![0, 1, 2, 3, 4, 0, 0, 0, 0, 0]);
        assert_eq!(default_seed(1), vec![0, 1, 2, 0]);
        assert_eq!(unit_count(vector_len(42)), 42);
    }

    #[test]
    fn test_incoming_streams() {
        let circuit = Circuit::from_vector(&[0, 2, 2, 1, 3, 0, 4, 0, 0, 1]);
        let incoming = circuit.incoming_streams(1);

        assert_eq!(incoming.tailings, 2);
        assert_eq!(incoming.total(), 2);
    }
}
