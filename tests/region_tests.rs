// tests/region_tests.rs

use olap_mdx::{
    CacheFlushRequest, Region, RegionCoordinate, RegionError, resolve_full_name, resolve_segments,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn coordinate(hierarchy: &str, path: &[&str]) -> RegionCoordinate {
    resolve_segments(hierarchy, path.iter().copied())
}

// ============================================================================
// Coordinate Resolution
// ============================================================================

#[test]
fn test_full_name_and_segments_agree() {
    let by_name = resolve_full_name("[Time].[2010].[Q1]").unwrap();
    let by_segments = resolve_segments("Time", ["2010", "Q1"]);
    assert_eq!(by_name, by_segments);
    assert_eq!(by_name.hierarchy, "Time");
    assert_eq!(by_name.path, vec!["2010", "Q1"]);
}

#[test]
fn test_segments_are_used_verbatim() {
    let c = resolve_segments("Customers", ["USA", "San Francisco"]);
    assert_eq!(c.path, vec!["USA", "San Francisco"]);
    assert_eq!(c.to_string(), "[Customers].[USA].[San Francisco]");
}

#[test]
fn test_missing_closing_bracket_is_parse_error() {
    let err = resolve_full_name("[Time].[2010").unwrap_err();
    assert_eq!(err.input, "[Time].[2010");
    assert_eq!(err.position, 7);
}

#[test]
fn test_malformed_names_are_rejected() {
    for name in ["", "Time", "[Time]x", "[Time]..[2010]", "[Time].2010", "[]", "[Time].[2010]."] {
        assert!(resolve_full_name(name).is_err(), "accepted {:?}", name);
    }
}

#[test]
fn test_closing_bracket_in_segment_round_trips() {
    let c = resolve_segments("Product", ["Drinks [Hot]", "A]B"]);
    let name = c.to_string();
    assert_eq!(name, "[Product].[Drinks [Hot]]].[A]]B]");
    assert_eq!(resolve_full_name(&name).unwrap(), c);
}

#[test]
fn test_coordinate_from_tuple() {
    let c = RegionCoordinate::from_tuple(&["Time", "2010", "Q1"]).unwrap();
    assert_eq!(c, coordinate("Time", &["2010", "Q1"]));
}

// ============================================================================
// Region Assembly
// ============================================================================

#[test]
fn test_build_region_keeps_order() {
    let region = Region::build([
        coordinate("Time", &["2010", "Q1"]),
        coordinate("Customers", &["USA", "CA"]),
    ])
    .unwrap();
    let hierarchies: Vec<_> = region
        .coordinates()
        .iter()
        .map(|c| c.hierarchy.as_str())
        .collect();
    assert_eq!(hierarchies, vec!["Time", "Customers"]);
}

#[test]
fn test_duplicate_hierarchy_is_configuration_error() {
    let err = Region::build([
        coordinate("Time", &["2010", "Q1"]),
        coordinate("Time", &["2011"]),
    ])
    .unwrap_err();
    assert!(err.message.contains("[Time]"));
}

#[test]
fn test_empty_region_is_configuration_error() {
    assert!(Region::build(Vec::new()).is_err());
}

#[test]
fn test_region_from_segments_and_full_names_agree() {
    let by_segments =
        Region::from_segments(&[["Time", "2010", "Q1"], ["Customers", "USA", "CA"]]).unwrap();
    let by_names =
        Region::from_full_names(&["[Time].[2010].[Q1]", "[Customers].[USA].[CA]"]).unwrap();
    assert_eq!(by_segments, by_names);
}

#[test]
fn test_region_from_full_names_reports_parse_errors() {
    let err = Region::from_full_names(&["[Time].[2010].[Q1]", "[Customers].[USA"]).unwrap_err();
    assert!(matches!(err, RegionError::Parse(_)));
}

#[test]
fn test_region_from_full_names_reports_duplicates() {
    let err = Region::from_full_names(&["[Time].[2010]", "[Time].[2011]"]).unwrap_err();
    assert!(matches!(err, RegionError::Configuration(_)));
}

// ============================================================================
// Scoping
// ============================================================================

fn time_and_customers() -> Region {
    Region::from_full_names(&["[Time].[2010].[Q1]", "[Customers].[USA].[CA]"]).unwrap()
}

#[test]
fn test_segment_below_both_paths_is_covered() {
    let region = time_and_customers();
    assert!(region.covers(&[
        coordinate("Time", &["2010", "Q1", "1"]),
        coordinate("Customers", &["USA", "CA", "Berkeley"]),
        coordinate("Product", &["Food"]),
    ]));
}

#[test]
fn test_segment_at_same_level_is_covered() {
    let region = time_and_customers();
    assert!(region.covers(&[
        coordinate("Time", &["2010", "Q1"]),
        coordinate("Customers", &["USA", "CA"]),
    ]));
}

#[test]
fn test_segment_outside_one_path_is_not_covered() {
    let region = time_and_customers();
    assert!(!region.covers(&[
        coordinate("Time", &["2010", "Q2"]),
        coordinate("Customers", &["USA", "CA"]),
    ]));
    assert!(!region.covers(&[
        coordinate("Time", &["2010", "Q1"]),
        coordinate("Customers", &["USA", "OR"]),
    ]));
}

#[test]
fn test_segment_rolled_up_over_a_hierarchy_is_covered() {
    let region = time_and_customers();
    assert!(region.covers(&[coordinate("Customers", &["USA", "CA", "Berkeley"])]));
}

#[test]
fn test_all_level_aggregate_is_covered() {
    let region = time_and_customers();
    assert!(region.covers(&[
        coordinate("Time", &[]),
        coordinate("Customers", &["USA", "CA"]),
    ]));
}

#[test]
fn test_ancestor_aggregate_is_covered() {
    let region = time_and_customers();
    assert!(region.covers(&[
        coordinate("Time", &["2010"]),
        coordinate("Customers", &["USA"]),
    ]));
}

#[test]
fn test_missing_all_level_and_ancestor_agree() {
    let region = time_and_customers();
    let customers = coordinate("Customers", &["USA", "CA", "Berkeley"]);
    let missing = region.covers(&[customers.clone()]);
    let all_time = region.covers(&[coordinate("Time", &[]), customers.clone()]);
    let year = region.covers(&[coordinate("Time", &["2010"]), customers]);
    assert!(missing && all_time && year);
}

#[test]
fn test_ancestor_of_sibling_branch_is_not_covered() {
    let region = time_and_customers();
    assert!(!region.covers(&[
        coordinate("Time", &["2011"]),
        coordinate("Customers", &["USA"]),
    ]));
    assert!(!region.covers(&[
        coordinate("Time", &["2010"]),
        coordinate("Customers", &["Canada"]),
    ]));
}

#[test]
fn test_flush_request_json() {
    let request = CacheFlushRequest::new("Sales", time_and_customers());
    let json = request.to_json();
    assert_eq!(json["cube"], "Sales");
    assert_eq!(json["constraints"].as_array().unwrap().len(), 2);
    assert_eq!(json["constraints"][0]["hierarchy"], "Time");
    assert_eq!(json["constraints"][1]["full_name"], "[Customers].[USA].[CA]");
}

proptest! {
    #[test]
    fn prop_full_name_matches_segments(
        hierarchy in "[a-zA-Z0-9 .\\[\\]]{1,10}",
        path in prop::collection::vec("[a-zA-Z0-9 .\\[\\]]{1,10}", 0..5),
    ) {
        let by_segments = resolve_segments(hierarchy.clone(), path.clone());
        let by_name = resolve_full_name(&by_segments.to_string()).unwrap();
        prop_assert_eq!(by_name, by_segments);
    }
}
