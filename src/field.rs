//! Field data: the site catalog and the row extremity table.
//!
//! Both structures are built once per field and never mutated afterwards, so
//! independent planning runs can share them freely.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;

use crate::error::{LoadError, PlanError};
use crate::geo::Coord;

/// Unique site key. Site identifiers are integers in the source data.
pub type SiteId = i64;

/// A sampling point on a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    pub id: SiteId,
    /// Row the site belongs to, numbered from 1.
    pub row: u32,
    pub coord: Coord,
}

/// Lookup from site id to site record.
#[derive(Debug, Clone, Default)]
pub struct SiteCatalog {
    sites: HashMap<SiteId, Site>,
}

impl SiteCatalog {
    pub fn new(sites: impl IntoIterator<Item = Site>) -> Result<Self, LoadError> {
        let mut map = HashMap::new();
        for site in sites {
            if map.insert(site.id, site).is_some() {
                return Err(LoadError::DuplicateSite(site.id));
            }
        }
        Ok(Self { sites: map })
    }

    /// Parses a GeoJSON FeatureCollection of point sites. Each feature must
    /// carry a `Site` identifier, a `rang` row number and a point geometry;
    /// anything else fails the whole load rather than being dropped.
    pub fn from_geojson(reader: impl Read) -> Result<Self, LoadError> {
        let collection: FeatureCollection = serde_json::from_reader(reader)?;
        let mut sites = Vec::with_capacity(collection.features.len());
        for (index, feature) in collection.features.into_iter().enumerate() {
            let id = feature
                .properties
                .get("Site")
                .and_then(serde_json::Value::as_i64)
                .ok_or(LoadError::MissingProperty {
                    index,
                    property: "Site",
                })?;
            let row = feature
                .properties
                .get("rang")
                .and_then(serde_json::Value::as_u64)
                .ok_or(LoadError::MissingProperty {
                    index,
                    property: "rang",
                })? as u32;
            if feature.geometry.kind != "Point" || feature.geometry.coordinates.len() != 2 {
                return Err(LoadError::NotAPoint { index });
            }
            // GeoJSON stores (longitude, latitude).
            let coord = Coord::new(
                feature.geometry.coordinates[1],
                feature.geometry.coordinates[0],
            );
            sites.push(Site { id, row, coord });
        }
        Self::new(sites)
    }

    pub fn get(&self, id: SiteId) -> Option<&Site> {
        self.sites.get(&id)
    }

    pub fn require(&self, id: SiteId) -> Result<&Site, PlanError> {
        self.get(id).ok_or(PlanError::UnknownSite(id))
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: serde_json::Map<String, serde_json::Value>,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<f64>,
}

/// Left/right extremity coordinates per row, directly indexed by row number.
///
/// Slot 0 is synthetic: it duplicates row 1 so a site on the lowest row can
/// still be approached from below.
#[derive(Debug, Clone)]
pub struct RowExtremities {
    rows: Vec<(Coord, Coord)>,
}

impl RowExtremities {
    /// Builds the table from `(row, left, right)` entries. Rows must cover
    /// the dense range `1..=max` exactly once each.
    pub fn new(entries: impl IntoIterator<Item = (u32, Coord, Coord)>) -> Result<Self, LoadError> {
        let entries: Vec<_> = entries.into_iter().collect();
        let max_row = entries
            .iter()
            .map(|(row, _, _)| *row)
            .max()
            .ok_or(LoadError::EmptyRowTable)?;

        let mut rows: Vec<Option<(Coord, Coord)>> = vec![None; max_row as usize + 1];
        for (row, left, right) in entries {
            if row == 0 {
                return Err(LoadError::ReservedRowZero);
            }
            let slot = &mut rows[row as usize];
            if slot.is_some() {
                return Err(LoadError::DuplicateRow(row));
            }
            *slot = Some((left, right));
        }
        if let Some(missing) = (1..rows.len()).find(|&row| rows[row].is_none()) {
            return Err(LoadError::MissingRow(missing as u32));
        }
        // Synthetic row 0 mirrors row 1.
        rows[0] = rows[1];

        let rows = rows.into_iter().flatten().collect();
        Ok(Self { rows })
    }

    /// Reads the extremity table from CSV with columns
    /// `rang,left_lat,left_lon,right_lat,right_lon`.
    pub fn from_csv(reader: impl Read) -> Result<Self, LoadError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut entries = Vec::new();
        for record in csv_reader.deserialize() {
            let record: RowRecord = record?;
            entries.push((
                record.rang,
                Coord::new(record.left_lat, record.left_lon),
                Coord::new(record.right_lat, record.right_lon),
            ));
        }
        Self::new(entries)
    }

    /// Highest real row number in the table.
    pub fn max_row(&self) -> u32 {
        (self.rows.len() - 1) as u32
    }

    pub fn left(&self, inter_row: i64) -> Option<Coord> {
        self.slot(inter_row).map(|(left, _)| left)
    }

    pub fn right(&self, inter_row: i64) -> Option<Coord> {
        self.slot(inter_row).map(|(_, right)| right)
    }

    fn slot(&self, inter_row: i64) -> Option<(Coord, Coord)> {
        usize::try_from(inter_row)
            .ok()
            .and_then(|index| self.rows.get(index))
            .copied()
    }
}

#[derive(Debug, Deserialize)]
struct RowRecord {
    rang: u32,
    left_lat: f64,
    left_lon: f64,
    right_lat: f64,
    right_lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coord {
        Coord::new(lat, lon)
    }

    #[test]
    fn test_row_zero_mirrors_row_one() {
        let rows = RowExtremities::new(vec![
            (1, coord(43.0, 3.0), coord(43.0, 3.01)),
            (2, coord(43.0001, 3.0), coord(43.0001, 3.01)),
        ])
        .unwrap();
        assert_eq!(rows.left(0), rows.left(1));
        assert_eq!(rows.right(0), rows.right(1));
        assert_eq!(rows.max_row(), 2);
    }

    #[test]
    fn test_gap_in_rows_rejected() {
        let err = RowExtremities::new(vec![
            (1, coord(43.0, 3.0), coord(43.0, 3.01)),
            (3, coord(43.0002, 3.0), coord(43.0002, 3.01)),
        ])
        .unwrap_err();
        assert!(matches!(err, LoadError::MissingRow(2)));
    }

    #[test]
    fn test_duplicate_row_rejected() {
        let err = RowExtremities::new(vec![
            (1, coord(43.0, 3.0), coord(43.0, 3.01)),
            (1, coord(43.0, 3.0), coord(43.0, 3.01)),
        ])
        .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateRow(1)));
    }

    #[test]
    fn test_out_of_table_lookup_is_none() {
        let rows =
            RowExtremities::new(vec![(1, coord(43.0, 3.0), coord(43.0, 3.01))]).unwrap();
        assert!(rows.left(-1).is_none());
        assert!(rows.left(2).is_none());
    }

    #[test]
    fn test_from_csv() {
        let data = "\
rang,left_lat,left_lon,right_lat,right_lon
1,43.5479,3.8401,43.5477,3.8406
2,43.5480,3.8401,43.5478,3.8406
";
        let rows = RowExtremities::from_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.max_row(), 2);
        assert_eq!(rows.left(2), Some(coord(43.5480, 3.8401)));
        assert_eq!(rows.right(1), Some(coord(43.5477, 3.8406)));
    }

    #[test]
    fn test_from_geojson() {
        let data = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"Site": 116, "rang": 3},
                    "geometry": {"type": "Point", "coordinates": [3.8402, 43.5480]}
                }
            ]
        }"#;
        let catalog = SiteCatalog::from_geojson(data.as_bytes()).unwrap();
        let site = catalog.get(116).unwrap();
        assert_eq!(site.row, 3);
        assert_eq!(site.coord, coord(43.5480, 3.8402));
    }

    #[test]
    fn test_geojson_missing_site_property() {
        let data = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"rang": 3},
                    "geometry": {"type": "Point", "coordinates": [3.84, 43.55]}
                }
            ]
        }"#;
        let err = SiteCatalog::from_geojson(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingProperty { index: 0, property: "Site" }
        ));
    }

    #[test]
    fn test_geojson_non_point_geometry() {
        let data = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"Site": 1, "rang": 1},
                    "geometry": {"type": "LineString", "coordinates": [3.84, 43.55]}
                }
            ]
        }"#;
        let err = SiteCatalog::from_geojson(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::NotAPoint { index: 0 }));
    }

    #[test]
    fn test_catalog_require_unknown_site() {
        let catalog = SiteCatalog::new(vec![]).unwrap();
        let err = catalog.require(42).unwrap_err();
        assert!(matches!(err, PlanError::UnknownSite(42)));
    }
}
