use crate::error::{HfResult, HotForgeError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// The fixed, ordered action sequence traversed during an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rotation {
    actions: Vec<u32>,
}

impl Rotation {
    pub fn new(actions: Vec<u32>) -> Self {
        Rotation { actions }
    }

    pub fn actions(&self) -> &[u32] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Distinct action ids in order of first appearance.
    pub fn distinct(&self) -> Vec<u32> {
        let mut seen = Vec::new();
        for &a in &self.actions {
            if !seen.contains(&a) {
                seen.push(a);
            }
        }
        seen
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> HfResult<Self> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    /// One nonnegative integer per line. A blank or non-numeric record is
    /// a parse error carrying its 1-based line number.
    pub fn read_from<R: BufRead>(reader: R) -> HfResult<Self> {
        let mut actions = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let record = line.trim();
            let action: u32 = record.parse().map_err(|_| HotForgeError::Parse {
                line: i + 1,
                record: record.to_string(),
            })?;
            actions.push(action);
        }
        debug!(records = actions.len(), "rotation loaded");
        Ok(Rotation { actions })
    }
}
