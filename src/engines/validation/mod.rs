pub mod checker;
pub mod reachability;

pub use checker::{is_valid, ValidityChecker, Violation};
pub use reachability::{mark_reachable, unvisited_units, OutletsReached};
