use crate::geometry::Slot;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HotForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rotation Parse Error: line {line}: {record:?} is not a nonnegative integer")]
    Parse { line: usize, record: String },

    #[error("Duplicate Assignment: action {action} is bound at both {first} and {second}")]
    DuplicateAssignment { action: u32, first: Slot, second: Slot },

    #[error("Missing Assignment: action {action} has no slot")]
    MissingAssignment { action: u32 },

    #[error("Infeasible Input: rotation uses {actions} distinct actions but the geometry only has {slots} slots")]
    Infeasible { actions: usize, slots: usize },

    #[error("Layout Validation Error: {0}")]
    Validation(String),
}

pub type HfResult<T> = Result<T, HotForgeError>;
