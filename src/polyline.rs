//! Polyline representation for circuit geometries.
//!
//! Stores the decoded coordinate sequence directly; any compact wire
//! encoding belongs to the transport boundary, not the planner core.

use serde::{Deserialize, Serialize};

use crate::geo::Coord;

/// An ordered sequence of GPS coordinates describing a walked path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coord>,
}

impl Polyline {
    pub fn new(points: Vec<Coord>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Coord] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coord> {
        self.points
    }
}
