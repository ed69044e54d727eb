//! Test fixtures for rowpath-planner.
//!
//! Provides a synthetic straight-row field: six parallel rows running
//! east-west at 43.5N, ~8 m apart, with the left extremities at lon 3.84
//! and the right extremities at lon 3.85 (~810 m of row).

use rowpath_planner::field::{RowExtremities, Site, SiteCatalog, SiteId};
use rowpath_planner::geo::Coord;
use rowpath_planner::planner::Field;

pub const DEPOT: SiteId = 9;

pub const ROW_COUNT: u32 = 6;
pub const LEFT_LON: f64 = 3.84;
pub const RIGHT_LON: f64 = 3.85;

/// Latitude of a row line.
pub fn row_lat(row: u32) -> f64 {
    43.5 + f64::from(row) * 0.000_072
}

fn site(id: SiteId, row: u32, lon: f64) -> Site {
    Site {
        id,
        row,
        coord: Coord::new(row_lat(row), lon),
    }
}

pub fn extremities() -> RowExtremities {
    RowExtremities::new((1..=ROW_COUNT).map(|row| {
        (
            row,
            Coord::new(row_lat(row), LEFT_LON),
            Coord::new(row_lat(row), RIGHT_LON),
        )
    }))
    .unwrap()
}

pub fn catalog() -> SiteCatalog {
    SiteCatalog::new(vec![
        site(DEPOT, 1, 3.8405),
        site(116, 2, 3.8425),
        site(310, 5, 3.8445),
        site(528, 3, 3.8490),
        site(701, 6, 3.8410),
    ])
    .unwrap()
}

pub fn straight_field() -> Field {
    Field::new(catalog(), extremities())
}
