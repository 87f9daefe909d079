use std::collections::HashMap;
use std::sync::Arc;

use frametrack_core::{update_tracks, ClassTrackingConfig, TrackMap, TrackingUpdateConfig};
use frametrack_distance::EuclideanCentroidDistance;
use frametrack_object::DefaultTrackableObjectFactory;
use frametrack_predict::ConstantVelocityFactory;
use frametrack_types::{BoundingBox, Detection};

fn detection(label: &str, x: f64, y: f64) -> Detection {
    Detection::new(label, 0.9, BoundingBox::axis_aligned(x, y, 2.0, 2.0).unwrap(), None)
}

fn config_for(classes: &[&str], delete_after: u64, threshold: f64) -> TrackingUpdateConfig {
    let mut class_map = HashMap::new();
    for class in classes {
        class_map.insert(
            class.to_string(),
            ClassTrackingConfig {
                delete_after,
                track_factory: Arc::new(DefaultTrackableObjectFactory),
                predictor_factory: Arc::new(ConstantVelocityFactory),
            },
        );
    }
    TrackingUpdateConfig {
        active_classes: classes.iter().map(|c| c.to_string()).collect(),
        classes: class_map,
        distance_algorithm: Arc::new(EuclideanCentroidDistance),
        threshold,
    }
}

#[test]
fn scenario_1_first_frame_one_detection_spawns_a_track() {
    let config = config_for(&["car"], 5, 50.0);
    let mut tracks: TrackMap = TrackMap::new();
    let outcome = update_tracks(&mut tracks, Some(&[detection("car", 10.0, 10.0)]), 0, &config).unwrap();

    assert_eq!(outcome.new.len(), 1);
    assert!(outcome.matched.is_empty());
    assert!(outcome.unmatched.is_empty());
    assert!(outcome.deleted.is_empty());
    let track = tracks.values().next().unwrap();
    assert_eq!(track.first_seen(), 0);
    assert_eq!(track.last_seen(), 0);
    assert_eq!(track.location_history(), &[(10.0, 10.0)]);
}

#[test]
fn scenario_2_stable_track_across_three_frames() {
    let config = config_for(&["car"], 5, 5.0);
    let mut tracks: TrackMap = TrackMap::new();

    let outcome0 = update_tracks(&mut tracks, Some(&[detection("car", 10.0, 10.0)]), 0, &config).unwrap();
    assert_eq!(outcome0.new.len(), 1);
    let key = outcome0.new[0].clone();

    let outcome1 = update_tracks(&mut tracks, Some(&[detection("car", 12.0, 10.0)]), 1, &config).unwrap();
    assert_eq!(outcome1.matched, vec![key.clone()]);

    let outcome2 = update_tracks(&mut tracks, Some(&[detection("car", 14.0, 10.0)]), 2, &config).unwrap();
    assert_eq!(outcome2.matched, vec![key.clone()]);

    let track = tracks.get(&key).unwrap();
    assert_eq!(track.location_history(), &[(10.0, 10.0), (12.0, 10.0), (14.0, 10.0)]);
}

#[test]
fn scenario_3_threshold_reject_then_delete() {
    let config = config_for(&["car"], 2, 50.0);
    let mut tracks: TrackMap = TrackMap::new();
    let outcome0 = update_tracks(&mut tracks, Some(&[detection("car", 10.0, 10.0)]), 0, &config).unwrap();
    let original_key = outcome0.new[0].clone();

    let outcome1 = update_tracks(&mut tracks, Some(&[detection("car", 1000.0, 1000.0)]), 1, &config).unwrap();
    assert_eq!(outcome1.new.len(), 1);
    assert_eq!(outcome1.unmatched, vec![original_key.clone()]);

    let outcome2 = update_tracks(&mut tracks, Some(&[detection("car", 1000.0, 1000.0)]), 2, &config).unwrap();
    assert_eq!(outcome2.unmatched, vec![original_key.clone()]);

    let outcome3 = update_tracks(&mut tracks, Some(&[detection("car", 1000.0, 1000.0)]), 3, &config).unwrap();
    assert_eq!(outcome3.deleted.len(), 1);
    assert_eq!(outcome3.deleted[0].0, original_key);
}

#[test]
fn scenario_4_two_vs_two_ambiguous_match() {
    let config = config_for(&["car"], 5, 50.0);
    let mut tracks: TrackMap = TrackMap::new();
    let spawn = update_tracks(&mut tracks, Some(&[detection("car", 0.0, 0.0), detection("car", 10.0, 0.0)]), 0, &config).unwrap();
    assert_eq!(spawn.new.len(), 2);

    let outcome = update_tracks(&mut tracks, Some(&[detection("car", 1.0, 0.0), detection("car", 11.0, 0.0)]), 1, &config).unwrap();
    assert_eq!(outcome.matched.len(), 2);
    assert!(outcome.new.is_empty());
}

#[test]
fn scenario_5_cross_over_tie_broken_row_major() {
    let config = config_for(&["car"], 5, 50.0);
    let mut tracks: TrackMap = TrackMap::new();
    let spawn = update_tracks(&mut tracks, Some(&[detection("car", 0.0, 0.0), detection("car", 10.0, 0.0)]), 0, &config).unwrap();
    let (track0_key, track1_key) = (spawn.new[0].clone(), spawn.new[1].clone());

    let outcome = update_tracks(&mut tracks, Some(&[detection("car", 5.0, 0.0), detection("car", 5.0, 0.0)]), 1, &config).unwrap();
    assert_eq!(outcome.matched.len(), 2);

    // Row-major tie-break: track 0 takes detection 0, track 1 takes detection 1.
    assert_eq!(tracks.get(&track0_key).unwrap().location_history().last(), Some(&(5.0, 0.0)));
    assert_eq!(tracks.get(&track1_key).unwrap().location_history().last(), Some(&(5.0, 0.0)));
    assert_eq!(tracks.get(&track0_key).unwrap().last_seen(), 1);
    assert_eq!(tracks.get(&track1_key).unwrap().last_seen(), 1);
}

#[test]
fn scenario_6_multi_class_independence() {
    let config = config_for(&["car", "bike"], 5, 50.0);
    let mut tracks: TrackMap = TrackMap::new();
    let spawn = update_tracks(
        &mut tracks,
        Some(&[detection("car", 0.0, 0.0), detection("bike", 100.0, 100.0)]),
        0,
        &config,
    )
    .unwrap();
    assert_eq!(spawn.new.len(), 2);

    let outcome = update_tracks(
        &mut tracks,
        Some(&[detection("car", 1.0, 0.0), detection("bike", 101.0, 100.0)]),
        1,
        &config,
    )
    .unwrap();
    assert_eq!(outcome.matched.len(), 2);
}

#[test]
fn missing_detections_is_a_contract_error() {
    let config = config_for(&["car"], 5, 50.0);
    let mut tracks: TrackMap = TrackMap::new();
    let result = update_tracks(&mut tracks, None, 0, &config);
    assert!(result.is_err());
}
