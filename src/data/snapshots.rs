use crate::engines::evaluation::SimulationOutcome;
use crate::error::{CircuitError, Result};
use crate::types::CircuitVector;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

fn persistence_error(path: &Path) -> impl FnOnce(std::io::Error) -> CircuitError + '_ {
    move |source| CircuitError::Persistence {
        path: path.to_path_buf(),
        source,
    }
}

/// Overwrite `path` with `contents`, creating missing parent directories.
pub(crate) fn overwrite(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(persistence_error(path))?;
    }
    fs::write(path, contents).map_err(persistence_error(path))
}

/// Performance, recovery and grade, one per line.
pub fn write_performance<P: AsRef<Path>>(path: P, outcome: &SimulationOutcome) -> Result<()> {
    let contents = format!(
        "{}\n{}\n{}\n",
        outcome.performance, outcome.recovery, outcome.grade
    );
    overwrite(path.as_ref(), &contents)
}

/// The circuit vector as space-separated integers.
pub fn write_vector<P: AsRef<Path>>(path: P, vector: &[usize]) -> Result<()> {
    let mut contents = vector
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    contents.push('\n');
    overwrite(path.as_ref(), &contents)
}

pub fn read_vector<P: AsRef<Path>>(path: P) -> Result<CircuitVector> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(persistence_error(path))?;
    contents
        .split_whitespace()
        .map(|token| {
            token.parse::<usize>().map_err(|e| {
                CircuitError::Configuration(format!(
                    "Invalid value {:?} in {}: {}",
                    token,
                    path.display(),
                    e
                ))
            })
        })
        .collect()
}

/// Last-write-wins sink shared by concurrent writers.
///
/// Writes are serialised so two evaluations finishing together cannot
/// interleave their lines in the same file.
#[derive(Debug)]
pub struct SnapshotFile {
    path: PathBuf,
    lock: Mutex<()>,
}

impl SnapshotFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_performance(&self, outcome: &SimulationOutcome) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        write_performance(&self.path, outcome)
    }

    pub fn write_vector(&self, vector: &[usize]) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        write_vector(&self.path, vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_snapshot_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("vector.dat");

        write_vector(&path, &[0, 1, 2, 4]).unwrap();
        write_vector(&path, &[0, 1, 3, 2, 4, 4, 3]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "0 1 3 2 4 4 3\n");
        assert_eq!(read_vector(&path).unwrap(), vec![0, 1, 3, 2, 4, 4, 3]);
    }

    #[test]
    fn test_performance_snapshot_has_three_lines() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SnapshotFile::new(dir.path().join("performance.dat"));
        let outcome = SimulationOutcome {
            performance: -650.0,
            recovery: 0.5,
            grade: 0.25,
            iterations: 3,
            converged: true,
        };

        sink.write_performance(&outcome).unwrap();

        let contents = fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<f64> = contents.lines().map(|l| l.parse().unwrap()).collect();
        assert_eq!(lines, vec![-650.0, 0.5, 0.25]);
    }

    #[test]
    fn test_unwritable_path_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        let err = write_vector(blocker.join("vector.dat"), &[0]).unwrap_err();
        assert!(matches!(err, CircuitError::Persistence { .. }));
    }
}
