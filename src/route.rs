//! Expansion of a solved circuit into GPS legs and a full polyline.
//!
//! Matrix construction throws the connector waypoints away, so the
//! reconstructor re-resolves every chosen leg to recover them, and
//! re-accumulates the total independently of the solver objective.

use serde::Serialize;

use crate::circuit::CircuitAssignment;
use crate::connector::{connector_path, Side};
use crate::error::PlanError;
use crate::field::{RowExtremities, SiteCatalog, SiteId};
use crate::polyline::Polyline;

/// One visited stop: the site, the side it was approached on and the length
/// of the leg that reached it, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stop {
    pub site: SiteId,
    pub side: Side,
    pub leg_m: f64,
}

/// A complete planned circuit. Starts and ends at the depot; distances are
/// plain meters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub stops: Vec<Stop>,
    pub total_m: f64,
    pub polyline: Polyline,
}

/// Expands a solved assignment back into concrete geometry.
///
/// `sites` is the caller's visit list, in the order the matrix was built
/// over; `assignment.order` values index into depot (0) + that list.
pub fn reconstruct(
    catalog: &SiteCatalog,
    rows: &RowExtremities,
    depot: SiteId,
    sites: &[SiteId],
    assignment: &CircuitAssignment,
) -> Result<Solution, PlanError> {
    let site_of = |stop: usize| if stop == 0 { depot } else { sites[stop - 1] };

    let mut stops = vec![Stop {
        site: depot,
        side: Side::Up,
        leg_m: 0.0,
    }];
    let mut points = vec![catalog.require(depot)?.coord];
    let mut total_m = 0.0;
    let mut prev: (SiteId, Side) = (depot, Side::Up);

    for step in 1..assignment.order.len() {
        let site = site_of(assignment.order[step]);
        let side = assignment.sides[step];
        let (leg_m, waypoints) = connector_path(catalog, rows, prev.0, prev.1, site, side)?;
        total_m += leg_m;
        points.extend(waypoints);
        points.push(catalog.require(site)?.coord);
        stops.push(Stop { site, side, leg_m });
        prev = (site, side);
    }

    // Closing leg back to the depot's Up side.
    let (leg_m, waypoints) = connector_path(catalog, rows, prev.0, prev.1, depot, Side::Up)?;
    total_m += leg_m;
    points.extend(waypoints);
    points.push(catalog.require(depot)?.coord);
    stops.push(Stop {
        site: depot,
        side: Side::Up,
        leg_m,
    });

    Ok(Solution {
        stops,
        total_m,
        polyline: Polyline::new(points),
    })
}
