//! Cheapest connector path between two site+side endpoints.
//!
//! Two sites on different inter-rows can only be joined by walking around
//! the extremities of every row in between, all on the left or all on the
//! right. Which side is cheaper depends on both endpoints, so the choice is
//! re-evaluated for every queried pair.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::field::{RowExtremities, Site, SiteCatalog, SiteId};
use crate::geo::{geodesic_m, Coord};

/// Which inter-row gap a site is entered or left through.
///
/// `Up` is the gap toward the next-higher row number, `Down` the gap toward
/// the next-lower one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Up,
    Down,
}

impl Side {
    /// Offset added to a row number to get the inter-row index of this side.
    pub fn offset(self) -> i64 {
        match self {
            Side::Up => 0,
            Side::Down => -1,
        }
    }

    /// Both sides, in matrix vertex order (Down first, then Up).
    pub const BOTH: [Side; 2] = [Side::Down, Side::Up];
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Up => f.write_str("up"),
            Side::Down => f.write_str("down"),
        }
    }
}

/// Minimal-distance connector between `(from, from_side)` and
/// `(to, to_side)`.
///
/// Returns the distance in meters and the intermediate extremity waypoints,
/// excluding both endpoints. The list is empty when both endpoints resolve
/// to the same inter-row gap. On an exact left/right cost tie the left chain
/// wins.
pub fn connector_path(
    catalog: &SiteCatalog,
    rows: &RowExtremities,
    from: SiteId,
    from_side: Side,
    to: SiteId,
    to_side: Side,
) -> Result<(f64, Vec<Coord>), PlanError> {
    if from == to && from_side == to_side {
        return Ok((0.0, Vec::new()));
    }

    let from_site = catalog.require(from)?;
    let to_site = catalog.require(to)?;
    let inter_from = inter_row(from_site, from_side);
    let inter_to = inter_row(to_site, to_side);

    if inter_from == inter_to {
        return Ok((geodesic_m(from_site.coord, to_site.coord), Vec::new()));
    }

    let indices: Vec<i64> = if inter_from < inter_to {
        (inter_from..=inter_to).collect()
    } else {
        (inter_to..=inter_from).rev().collect()
    };

    let mut left_chain = Vec::with_capacity(indices.len());
    let mut right_chain = Vec::with_capacity(indices.len());
    for index in indices {
        left_chain.push(rows.left(index).ok_or(PlanError::MissingRow(index))?);
        right_chain.push(rows.right(index).ok_or(PlanError::MissingRow(index))?);
    }

    let left_m = chained_length(from_site.coord, &left_chain, to_site.coord);
    let right_m = chained_length(from_site.coord, &right_chain, to_site.coord);

    if left_m <= right_m {
        Ok((left_m, left_chain))
    } else {
        Ok((right_m, right_chain))
    }
}

/// Inter-row index the endpoint is adjacent to.
fn inter_row(site: &Site, side: Side) -> i64 {
    i64::from(site.row) + side.offset()
}

fn chained_length(from: Coord, via: &[Coord], to: Coord) -> f64 {
    let mut total = 0.0;
    let mut prev = from;
    for &point in via {
        total += geodesic_m(prev, point);
        prev = point;
    }
    total + geodesic_m(prev, to)
}
