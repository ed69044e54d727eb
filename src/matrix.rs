//! All-pairs travel distance matrix over site+side vertices.
//!
//! Vertex 0 is the depot (always entered and left on its Up side); each
//! visited site contributes a Down and an Up vertex. Entries are scaled to
//! integers because the circuit model works over integer domains.

use rayon::prelude::*;
use tracing::debug;

use crate::connector::{connector_path, Side};
use crate::error::PlanError;
use crate::field::{RowExtremities, SiteCatalog, SiteId};

/// Scale factor applied to meters before truncating to integers.
pub const PRECISION: i64 = 1000;

/// Square integer cost matrix of dimension `2 * site_count + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    entries: Vec<Vec<i64>>,
    site_count: usize,
}

impl DistanceMatrix {
    pub fn site_count(&self) -> usize {
        self.site_count
    }

    pub fn dim(&self) -> usize {
        2 * self.site_count + 1
    }

    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.entries[from][to]
    }

    /// Largest entry, used to bound cost variables.
    pub fn max_entry(&self) -> i64 {
        self.entries
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Vertex index of a stop+side pair.
///
/// Stop 0 is the depot, whose single vertex is 0; stop `s >= 1` maps to
/// `2s - 1` (Down) and `2s` (Up).
pub fn vertex_index(stop: usize, side: Side) -> usize {
    if stop == 0 {
        0
    } else {
        (2 * stop as i64 + side.offset()) as usize
    }
}

/// Builds the travel matrix for a depot and an ordered site list.
///
/// The request is validated against the catalog before any distance is
/// computed; an unknown site never degrades into a partial matrix. Every
/// ordered pair is evaluated directionally through the connector resolver.
pub fn build_matrix(
    catalog: &SiteCatalog,
    rows: &RowExtremities,
    depot: SiteId,
    sites: &[SiteId],
) -> Result<DistanceMatrix, PlanError> {
    validate_request(catalog, depot, sites)?;

    let mut vertices: Vec<(SiteId, Side)> = Vec::with_capacity(2 * sites.len() + 1);
    vertices.push((depot, Side::Up));
    for &site in sites {
        for side in Side::BOTH {
            vertices.push((site, side));
        }
    }

    let dim = vertices.len();
    let entries = (0..dim)
        .into_par_iter()
        .map(|i| {
            (0..dim)
                .map(|j| {
                    if i == j {
                        return Ok(0);
                    }
                    let (from, from_side) = vertices[i];
                    let (to, to_side) = vertices[j];
                    let (meters, _) =
                        connector_path(catalog, rows, from, from_side, to, to_side)?;
                    Ok((meters * PRECISION as f64).trunc() as i64)
                })
                .collect::<Result<Vec<i64>, PlanError>>()
        })
        .collect::<Result<Vec<_>, PlanError>>()?;

    debug!(dim, sites = sites.len(), "distance matrix built");
    Ok(DistanceMatrix {
        entries,
        site_count: sites.len(),
    })
}

fn validate_request(
    catalog: &SiteCatalog,
    depot: SiteId,
    sites: &[SiteId],
) -> Result<(), PlanError> {
    if sites.is_empty() {
        return Err(PlanError::NoSites);
    }
    catalog.require(depot)?;
    for (index, &site) in sites.iter().enumerate() {
        catalog.require(site)?;
        if site == depot {
            return Err(PlanError::DepotInSites(site));
        }
        if sites[..index].contains(&site) {
            return Err(PlanError::DuplicateSite(site));
        }
    }
    Ok(())
}
