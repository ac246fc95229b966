use crate::circuit::Circuit;
use crate::types::Stream;

/// Which outlet kinds a traversal ran into, recorded per stream type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutletsReached {
    pub concentrate: bool,
    pub intermediate: bool,
    pub tailings: bool,
}

impl OutletsReached {
    fn record(&mut self, stream: Stream) {
        match stream {
            Stream::Concentrate => self.concentrate = true,
            Stream::Intermediate => self.intermediate = true,
            Stream::Tailings => self.tailings = true,
        }
    }
}

/// Mark every unit reachable from `start` by following destination edges.
///
/// Uses an explicit stack; a unit is expanded at most once, so recycle loops
/// terminate. Any destination that is not a unit index (outlets, out-of-range
/// values) is recorded against the stream that pointed at it. Unassigned
/// destinations are skipped.
pub fn mark_reachable(circuit: &mut Circuit, start: usize) -> OutletsReached {
    let mut reached = OutletsReached::default();
    let num_units = circuit.num_units();
    if start >= num_units {
        return reached;
    }

    let mut stack = vec![start];
    while let Some(index) = stack.pop() {
        if circuit.units[index].visited {
            continue;
        }
        circuit.units[index].visited = true;

        for stream in Stream::ALL {
            match circuit.units[index].destination(stream) {
                Some(dest) if dest < num_units => {
                    if !circuit.units[dest].visited {
                        stack.push(dest);
                    }
                }
                Some(_) => reached.record(stream),
                None => {}
            }
        }
    }

    reached
}

/// Indices of the units left unmarked by the last traversal.
pub fn unvisited_units(circuit: &Circuit) -> Vec<usize> {
    circuit
        .units
        .iter()
        .enumerate()
        .filter(|(_, unit)| !unit.visited)
        .map(|(index, _)| index)
        .collect()
}
