//! Error types for field loading and circuit planning.

use thiserror::Error;

use crate::field::SiteId;

/// Failures while loading field data (site geometry, extremity table).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid site geometry: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid extremity table: {0}")]
    Csv(#[from] csv::Error),

    #[error("feature {index} has no `{property}` property")]
    MissingProperty { index: usize, property: &'static str },

    #[error("feature {index} does not carry a point geometry")]
    NotAPoint { index: usize },

    #[error("site {0} appears more than once")]
    DuplicateSite(SiteId),

    #[error("extremity table has no entry for row {0}")]
    MissingRow(u32),

    #[error("extremity table lists row {0} more than once")]
    DuplicateRow(u32),

    #[error("row 0 is reserved for the synthetic lowest inter-row")]
    ReservedRowZero,

    #[error("extremity table is empty")]
    EmptyRowTable,
}

/// Failures while planning a circuit. Raised before any matrix work, so an
/// invalid request never reaches the solver.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("site {0} is not in the catalog")]
    UnknownSite(SiteId),

    #[error("no sites to visit")]
    NoSites,

    #[error("site {0} is requested more than once")]
    DuplicateSite(SiteId),

    #[error("depot {0} must not appear in the visit list")]
    DepotInSites(SiteId),

    #[error("no extremities known for inter-row index {0}")]
    MissingRow(i64),
}
