use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use frametrack_object::TrackKey;
use frametrack_types::{Detection, Image};

use crate::config::TrackingUpdateConfig;
use crate::error::CoreError;
use crate::update::{update_tracks, TrackMap};

/// Per-frame, shared mutable bundle a pipeline runs its steps against.
///
/// Constructed fresh each frame by the application harness, which moves the
/// persistent track map and tracking-attributes map into it via
/// [`std::mem::take`] and moves them back out once the pipeline finishes —
/// the host owns both across frames, the context only borrows them for the
/// duration of one.
pub struct ApplicationContext {
    pub frame_image: Image,
    pub frame_number: u64,

    /// `None` until the detection step runs. Distinct from `Some(vec![])`,
    /// which means "ran, found nothing this frame".
    pub object_detections: Option<Vec<Detection>>,

    pub trackable_objects: TrackMap,

    pub matched_keys: Vec<TrackKey>,
    pub unmatched_keys: Vec<TrackKey>,
    pub new_keys: Vec<TrackKey>,
    pub deleted: Vec<(TrackKey, Box<dyn frametrack_object::TrackableObject>)>,

    pub tracking_attributes: HashMap<String, serde_json::Value>,

    /// Named results of earlier pipeline steps in this frame, available to
    /// later steps and to the result formatter. Typed as `Any` rather than
    /// JSON so a step can hand a later step, say, a borrowed list of live
    /// tracks without round-tripping through serialization.
    pub pipeline_step_results: HashMap<String, Box<dyn Any + Send>>,

    pub tracking_config: Arc<TrackingUpdateConfig>,
}

impl ApplicationContext {
    #[must_use]
    pub fn new(
        frame_image: Image,
        frame_number: u64,
        trackable_objects: TrackMap,
        tracking_attributes: HashMap<String, serde_json::Value>,
        tracking_config: Arc<TrackingUpdateConfig>,
    ) -> Self {
        Self {
            frame_image,
            frame_number,
            object_detections: None,
            trackable_objects,
            matched_keys: Vec::new(),
            unmatched_keys: Vec::new(),
            new_keys: Vec::new(),
            deleted: Vec::new(),
            tracking_attributes,
            pipeline_step_results: HashMap::new(),
            tracking_config,
        }
    }

    /// Runs the core tracking update using this frame's detections and the
    /// configured distance algorithm/threshold, writing the four key sets
    /// back onto the context.
    pub fn run_tracking_update(&mut self) -> Result<(), CoreError> {
        let outcome = update_tracks(
            &mut self.trackable_objects,
            self.object_detections.as_deref(),
            self.frame_number,
            &self.tracking_config,
        )?;
        self.matched_keys = outcome.matched;
        self.unmatched_keys = outcome.unmatched;
        self.new_keys = outcome.new;
        self.deleted = outcome.deleted;
        Ok(())
    }
}
