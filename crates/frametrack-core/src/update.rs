use frametrack_distance::sanitize_cost;
use frametrack_object::{TrackKey, TrackableObject};
use frametrack_types::Detection;
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::config::TrackingUpdateConfig;
use crate::error::CoreError;

/// The live track map. Iteration order is insertion order (the order tracks
/// were created), which is what gives the tracking update's cost-matrix row
/// order its required determinism — a plain `HashMap` cannot promise that.
pub type TrackMap = IndexMap<TrackKey, Box<dyn TrackableObject>>;

/// The four disjoint key-set outcomes of one tracking update, concatenated
/// across classes in the order `config.active_classes` declares.
///
/// `deleted` carries the removed track alongside its key (not the key
/// alone) since the track is no longer reachable through the map once
/// retired, and downstream pipeline steps (e.g. a "track ended" resolver)
/// need its final state.
#[derive(Default)]
pub struct TrackingOutcome {
    pub matched: Vec<TrackKey>,
    pub unmatched: Vec<TrackKey>,
    pub new: Vec<TrackKey>,
    pub deleted: Vec<(TrackKey, Box<dyn TrackableObject>)>,
}

/// Runs one tracking update over every active class, independently.
///
/// `detections` being `None` (as opposed to `Some(&[])`) means the
/// detection step has not run yet this frame; that is a contract error, not
/// an empty-input case.
pub fn update_tracks(
    tracks: &mut TrackMap,
    detections: Option<&[Detection]>,
    frame_number: u64,
    config: &TrackingUpdateConfig,
) -> Result<TrackingOutcome, CoreError> {
    let detections = detections.ok_or(CoreError::DetectionsNotPopulated)?;
    let mut outcome = TrackingOutcome::default();

    for class_name in &config.active_classes {
        let class_config = config
            .class_config(class_name)
            .ok_or_else(|| CoreError::MissingClassConfig(class_name.clone()))?;

        let class_detections: Vec<&Detection> = detections.iter().filter(|d| &d.label == class_name).collect();
        let class_track_keys: Vec<TrackKey> = tracks
            .iter()
            .filter(|(_, t)| t.class_name() == class_name)
            .map(|(k, _)| k.clone())
            .collect();

        if class_track_keys.is_empty() {
            trace!(class = %class_name, "no existing tracks, spawning for every detection");
            for detection in &class_detections {
                spawn_track(tracks, detection, class_config, frame_number, &mut outcome.new);
            }
            continue;
        }

        if class_detections.is_empty() {
            trace!(class = %class_name, "no detections this frame");
            for key in class_track_keys {
                retire_or_unmatch(tracks, key, frame_number, class_config, &mut outcome);
            }
            continue;
        }

        let rows = class_track_keys.len();
        let cols = class_detections.len();
        let mut entries: Vec<(usize, usize, f64)> = Vec::with_capacity(rows * cols);
        for (i, key) in class_track_keys.iter().enumerate() {
            let track = tracks.get(key).expect("key collected from this map moments ago");
            for (j, detection) in class_detections.iter().enumerate() {
                let cost = sanitize_cost(config.distance_algorithm.distance(track.as_scored_object(), detection));
                entries.push((i, j, cost));
            }
        }
        // `sort_by` is stable, and entries were pushed in row-major order,
        // so ties keep the row-major tie-break without extra bookkeeping.
        entries.sort_by(|a, b| a.2.partial_cmp(&b.2).expect("costs are sanitized to exclude NaN"));

        let mut row_used = vec![false; rows];
        let mut col_used = vec![false; cols];
        for (i, j, cost) in entries {
            if row_used[i] || col_used[j] {
                continue;
            }
            if cost > config.threshold {
                break;
            }
            row_used[i] = true;
            col_used[j] = true;
            let key = class_track_keys[i].clone();
            let track = tracks.get_mut(&key).expect("row came from this map");
            track.update(class_detections[j], frame_number);
            debug!(class = %class_name, %key, cost, "matched detection to track");
            outcome.matched.push(key);
        }

        for (i, key) in class_track_keys.into_iter().enumerate() {
            if !row_used[i] {
                retire_or_unmatch(tracks, key, frame_number, class_config, &mut outcome);
            }
        }
        for (j, detection) in class_detections.into_iter().enumerate() {
            if !col_used[j] {
                spawn_track(tracks, detection, class_config, frame_number, &mut outcome.new);
            }
        }
    }

    Ok(outcome)
}

fn spawn_track(
    tracks: &mut TrackMap,
    detection: &Detection,
    class_config: &crate::config::ClassTrackingConfig,
    frame_number: u64,
    new_keys: &mut Vec<TrackKey>,
) {
    let predictor = class_config.predictor_factory.create();
    let track = class_config.track_factory.from_detection(detection, predictor, frame_number);
    let key = TrackKey::new();
    tracks.insert(key.clone(), track);
    new_keys.push(key);
}

fn retire_or_unmatch(
    tracks: &mut TrackMap,
    key: TrackKey,
    frame_number: u64,
    class_config: &crate::config::ClassTrackingConfig,
    outcome: &mut TrackingOutcome,
) {
    let last_seen = tracks.get(&key).expect("key came from this map").last_seen();
    if frame_number.saturating_sub(last_seen) > class_config.delete_after {
        let track = tracks.shift_remove(&key).expect("key came from this map");
        outcome.deleted.push((key, track));
    } else {
        outcome.unmatched.push(key);
    }
}
