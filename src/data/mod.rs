pub mod report;
pub mod snapshots;

pub use report::RunReport;
pub use snapshots::{read_vector, write_performance, write_vector, SnapshotFile};
