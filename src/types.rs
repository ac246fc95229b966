/// Encoded circuit: `[feed, c0, i0, t0, c1, i1, t1, ...]`.
///
/// Element 0 is the feed unit. For unit `i`, elements `3i+1`, `3i+2` and
/// `3i+3` hold the destinations of its concentrate, intermediate and tailings
/// streams. A destination `< N` names a unit, `N` is the concentrate outlet and
/// `N+1` the tailings outlet.
pub type CircuitVector = Vec<usize>;

/// The three product streams leaving a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Concentrate,
    Intermediate,
    Tailings,
}

impl Stream {
    pub const ALL: [Stream; 3] = [Stream::Concentrate, Stream::Intermediate, Stream::Tailings];

    /// Offset of this stream's field inside a unit's triple.
    pub fn offset(self) -> usize {
        match self {
            Stream::Concentrate => 0,
            Stream::Intermediate => 1,
            Stream::Tailings => 2,
        }
    }
}

/// Where a raw destination value sends material in a circuit of `N` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Unit(usize),
    ConcentrateOutlet,
    TailingsOutlet,
    OutOfRange(usize),
}

impl Destination {
    pub fn resolve(raw: usize, num_units: usize) -> Self {
        if raw < num_units {
            Destination::Unit(raw)
        } else if raw == num_units {
            Destination::ConcentrateOutlet
        } else if raw == num_units + 1 {
            Destination::TailingsOutlet
        } else {
            Destination::OutOfRange(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_destinations() {
        assert_eq!(Destination::resolve(2, 3), Destination::Unit(2));
        assert_eq!(Destination::resolve(3, 3), Destination::ConcentrateOutlet);
        assert_eq!(Destination::resolve(4, 3), Destination::TailingsOutlet);
        assert_eq!(Destination::resolve(9, 3), Destination::OutOfRange(9));
    }
}
