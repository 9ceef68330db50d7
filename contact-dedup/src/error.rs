/// Rejected merge input. Raised at the boundary before any plan is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("At least one source contact is required")]
    NoSources,

    #[error("Contact {0} cannot be merged into itself")]
    TargetInSources(i64),

    #[error("Source contact {0} is listed more than once")]
    RepeatedSource(i64),

    #[error("Snapshot mismatch: expected contact {expected}, got {actual}")]
    SnapshotMismatch { expected: i64, actual: i64 },

    #[error("No snapshot supplied for contact {0}")]
    MissingSnapshot(i64),

    #[error("Snapshot for contact {0} is not part of the request")]
    UnexpectedSnapshot(i64),
}
