//! Field session: immutable field data plus the circuit planning pipeline.
//!
//! A `Field` is built once per field and is safe to share across planning
//! runs; all per-run state (site list, matrix, assignment) is threaded
//! through as values.

use std::io::Read;

use tracing::debug;

use crate::circuit::{BranchAndBound, CircuitBackend, CircuitModel, SolveOptions, SolveOutcome};
use crate::error::{LoadError, PlanError};
use crate::field::{RowExtremities, SiteCatalog, SiteId};
use crate::matrix::build_matrix;
use crate::route::{reconstruct, Solution};

/// Outcome of a planning run with valid inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// A proven-minimal circuit.
    Route(Solution),
    /// The model admits no circuit at all; with a complete matrix this
    /// points at an upstream data problem rather than a bad request.
    NoSolution,
    /// The solver ran out of its wall-clock budget before proving
    /// optimality.
    DeadlineExceeded,
}

/// One field's catalog and extremity table.
#[derive(Debug, Clone)]
pub struct Field {
    catalog: SiteCatalog,
    rows: RowExtremities,
}

impl Field {
    pub fn new(catalog: SiteCatalog, rows: RowExtremities) -> Self {
        Self { catalog, rows }
    }

    /// Loads a field from GeoJSON site geometry and a CSV extremity table.
    pub fn from_readers(
        site_geometry: impl Read,
        extremities: impl Read,
    ) -> Result<Self, LoadError> {
        Ok(Self::new(
            SiteCatalog::from_geojson(site_geometry)?,
            RowExtremities::from_csv(extremities)?,
        ))
    }

    pub fn catalog(&self) -> &SiteCatalog {
        &self.catalog
    }

    pub fn rows(&self) -> &RowExtremities {
        &self.rows
    }

    /// Plans a minimum-distance circuit from `depot` through `sites` with
    /// the built-in exact backend.
    pub fn plan_circuit(
        &self,
        depot: SiteId,
        sites: &[SiteId],
        options: &SolveOptions,
    ) -> Result<PlanOutcome, PlanError> {
        self.plan_circuit_with(&BranchAndBound, depot, sites, options)
    }

    /// Same pipeline with a caller-chosen solver backend.
    pub fn plan_circuit_with(
        &self,
        backend: &dyn CircuitBackend,
        depot: SiteId,
        sites: &[SiteId],
        options: &SolveOptions,
    ) -> Result<PlanOutcome, PlanError> {
        let matrix = build_matrix(&self.catalog, &self.rows, depot, sites)?;
        let model = CircuitModel::new(&matrix);
        debug!(depot, sites = sites.len(), "solving circuit model");
        match backend.solve(&model, options) {
            SolveOutcome::Solved(assignment) => {
                let solution = reconstruct(&self.catalog, &self.rows, depot, sites, &assignment)?;
                Ok(PlanOutcome::Route(solution))
            }
            SolveOutcome::Infeasible => Ok(PlanOutcome::NoSolution),
            SolveOutcome::DeadlineExceeded => Ok(PlanOutcome::DeadlineExceeded),
        }
    }
}
