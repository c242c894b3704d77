//! Error types for the frame solver

use thiserror::Error;

/// Main error type for frame-analysis operations.
///
/// Variants map directly onto the error categories of the design: model
/// inconsistencies are caught before a solve starts, a singular system and a
/// serialization failure are fatal during/around a solve, and non-linear
/// divergence is reported as a warning alongside the last iterate rather than
/// through this type (see `analysis::NonlinearReport`).
#[derive(Error, Debug)]
pub enum FEAError {
    #[error("node '{0}' not found in model")]
    NodeNotFound(String),

    #[error("member '{0}' not found in model")]
    MemberNotFound(String),

    #[error("material '{0}' not found in model")]
    MaterialNotFound(String),

    #[error("section '{0}' not found in model")]
    SectionNotFound(String),

    #[error("load case '{0}' not found in model")]
    LoadCaseNotFound(String),

    #[error("load combination '{0}' not found in model")]
    LoadCombinationNotFound(String),

    #[error("duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("singular stiffness matrix - model may be unstable or have insufficient supports")]
    SingularMatrix,

    #[error("model not analyzed - run a solve first")]
    NotAnalyzed,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("malformed model file: {0}")]
    ParseError(String),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for frame-analysis operations
pub type FEAResult<T> = Result<T, FEAError>;
