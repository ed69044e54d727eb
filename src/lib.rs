//! rowpath-planner core
//!
//! Plans minimum-distance sampling circuits over fields whose sites sit on
//! parallel rows. Crossing between rows goes around the row extremities, so
//! every leg is a small shortest-chain problem before the circuit itself is
//! optimized.

pub mod circuit;
pub mod connector;
pub mod error;
pub mod field;
pub mod geo;
pub mod matrix;
pub mod planner;
pub mod polyline;
pub mod route;
