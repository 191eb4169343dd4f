// Parsing the network data file.

mod common;

use netviz_core::dataset::*;

#[test]
fn sample_file_parses_with_overrides() {
    let file = common::sample_file();
    let stats = file.dataset.stats();
    assert_eq!(
        stats,
        DatasetStats {
            communities: 3,
            locations: 4,
            edges: 2
        }
    );
    let overrides = file.threejs_params.unwrap();
    assert_eq!(overrides["node_size"], 1.5);
}

#[test]
fn location_ids_accept_strings_and_numbers() {
    let file = common::sample_file();
    let ids: Vec<&str> = file
        .dataset
        .locations
        .iter()
        .map(|l| l.id.as_str())
        .collect();
    assert_eq!(ids, ["loc-a", "loc-b", "17", "loc-d"]);
}

#[test]
fn optional_fields_default() {
    let file = common::sample_file();
    let c1 = &file.dataset.communities[1];
    assert_eq!(c1.retweets, None);
    assert_eq!(c1.likes, None);
    assert_eq!(file.dataset.locations[3].reach, 0.0);
    assert_eq!(file.dataset.edges[1].weight, None);
    assert_eq!(file.dataset.edges[0].weight, Some(3.0));
}

#[test]
fn missing_threejs_params_is_fine() {
    let file =
        NetworkFile::from_json(r#"{"communities": [], "locations": [], "edges": []}"#).unwrap();
    assert!(file.threejs_params.is_none());
    assert_eq!(file.dataset.stats(), DatasetStats::default());
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = NetworkFile::from_json("{ not json").unwrap_err();
    assert!(matches!(err, DataError::Parse(_)));
    assert!(err.to_string().starts_with("invalid network data"));
}

#[test]
fn missing_required_array_is_a_parse_error() {
    assert!(NetworkFile::from_json(r#"{"communities": [], "locations": []}"#).is_err());
}

#[test]
fn community_index_keeps_first_duplicate() {
    let file = NetworkFile::from_json(
        r#"{
          "communities": [
            {"id": 4, "position": [0,0,0], "size": 1},
            {"id": 9, "position": [0,0,0], "size": 1},
            {"id": 4, "position": [1,1,1], "size": 2}
          ],
          "locations": [],
          "edges": []
        }"#,
    )
    .unwrap();
    let index = file.dataset.community_index();
    assert_eq!(index.len(), 2);
    assert_eq!(index[&4], 0);
    assert_eq!(index[&9], 1);
}
