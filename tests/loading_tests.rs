//! Loading a field from GeoJSON sites and a CSV extremity table.

mod fixtures;

use rowpath_planner::circuit::SolveOptions;
use rowpath_planner::planner::{Field, PlanOutcome};

use fixtures::{row_lat, DEPOT, LEFT_LON, RIGHT_LON, ROW_COUNT};

fn site_geojson() -> String {
    let sites = [(DEPOT, 1u32, 3.8405), (116, 2, 3.8425), (310, 5, 3.8445)];
    let features: Vec<String> = sites
        .iter()
        .map(|(id, row, lon)| {
            format!(
                r#"{{"type": "Feature",
                     "properties": {{"Site": {id}, "rang": {row}}},
                     "geometry": {{"type": "Point", "coordinates": [{lon}, {lat}]}}}}"#,
                lat = row_lat(*row)
            )
        })
        .collect();
    format!(
        r#"{{"type": "FeatureCollection", "features": [{}]}}"#,
        features.join(",")
    )
}

fn extremity_csv() -> String {
    let mut csv = String::from("rang,left_lat,left_lon,right_lat,right_lon\n");
    for row in 1..=ROW_COUNT {
        let lat = row_lat(row);
        csv.push_str(&format!("{row},{lat},{LEFT_LON},{lat},{RIGHT_LON}\n"));
    }
    csv
}

#[test]
fn field_loads_and_plans_from_raw_inputs() {
    let field =
        Field::from_readers(site_geojson().as_bytes(), extremity_csv().as_bytes()).unwrap();
    assert_eq!(field.catalog().len(), 3);
    assert_eq!(field.rows().max_row(), ROW_COUNT);

    let outcome = field
        .plan_circuit(DEPOT, &[116, 310], &SolveOptions::default())
        .unwrap();
    let PlanOutcome::Route(solution) = outcome else {
        panic!("expected a route");
    };
    assert_eq!(solution.stops.len(), 4);
    assert!(solution.total_m > 0.0);
}

#[test]
fn loaded_field_matches_programmatic_fixture() {
    let loaded =
        Field::from_readers(site_geojson().as_bytes(), extremity_csv().as_bytes()).unwrap();
    let built = fixtures::straight_field();

    let from_loaded = loaded
        .plan_circuit(DEPOT, &[116, 310], &SolveOptions::default())
        .unwrap();
    let from_built = built
        .plan_circuit(DEPOT, &[116, 310], &SolveOptions::default())
        .unwrap();
    assert_eq!(from_loaded, from_built);
}
