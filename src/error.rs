//! Error types
//!
//! The frame loop itself never fails; errors only surface while building a
//! configuration or rebuilding the world on restart.

use thiserror::Error;

/// Errors raised while validating configuration or laying out a new game
#[derive(Debug, Error)]
pub enum GameError {
    /// The derived block grid has no blocks, so the win-opacity math would divide by zero
    #[error("block grid is empty ({columns} columns x {rows} rows)")]
    EmptyBlockGrid { columns: u32, rows: u32 },
    /// A layout value is out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Configuration JSON could not be parsed
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
