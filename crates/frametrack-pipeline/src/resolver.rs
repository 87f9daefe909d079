use frametrack_core::ApplicationContext;
use frametrack_object::{TrackKey, TrackableObject};
use frametrack_types::{Detection, Image};

use crate::error::PipelineError;

/// The value a [`Resolver`] produces once evaluated against a frame's
/// context. Pipeline step functions receive these, already resolved, in
/// resolver-declaration order.
pub enum ResolvedArgument<'ctx> {
    Image(&'ctx Image),
    FrameNumber(u64),
    Detections(Vec<&'ctx Detection>),
    Tracks(Vec<&'ctx dyn TrackableObject>),
    TracksWithKeys(Vec<(&'ctx TrackKey, &'ctx dyn TrackableObject)>),
    Attribute(&'ctx serde_json::Value),
    StepResult(&'ctx (dyn std::any::Any + Send)),
}

/// A pure, declarative reference to a slice of per-frame context. Resolvers
/// are a closed, enumerable family; there is no reflection or dynamic
/// lookup beyond the `*OfClass`/attribute/step-result variants' own string
/// specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolver {
    CurrentImage,
    FrameNumber,
    AllDetections,
    DetectionsOfClass(String),
    AllTracks,
    AllTracksWithKeys,
    MatchedTracks,
    MatchedTracksWithKeys,
    UnmatchedTracks,
    UnmatchedTracksWithKeys,
    NewTracks,
    NewTracksWithKeys,
    DeletedTracks,
    DeletedTracksWithKeys,
    TracksOfClass(String),
    TracksOfClassWithKeys(String),
    MatchedTracksOfClass(String),
    MatchedTracksOfClassWithKeys(String),
    UnmatchedTracksOfClass(String),
    UnmatchedTracksOfClassWithKeys(String),
    NewTracksOfClass(String),
    NewTracksOfClassWithKeys(String),
    DeletedTracksOfClass(String),
    DeletedTracksOfClassWithKeys(String),
    TrackingAttribute(String),
    StepResult(String),
}

impl Resolver {
    pub fn evaluate<'ctx>(&self, context: &'ctx ApplicationContext) -> Result<ResolvedArgument<'ctx>, PipelineError> {
        use Resolver::*;

        let by_keys = |keys: &'ctx [TrackKey], with_keys: bool| {
            let pairs: Vec<(&'ctx TrackKey, &'ctx dyn TrackableObject)> = keys
                .iter()
                .filter_map(|k| context.trackable_objects.get(k).map(|t| (k, t.as_ref())))
                .collect();
            if with_keys {
                ResolvedArgument::TracksWithKeys(pairs)
            } else {
                ResolvedArgument::Tracks(pairs.into_iter().map(|(_, t)| t).collect())
            }
        };

        Ok(match self {
            CurrentImage => ResolvedArgument::Image(&context.frame_image),
            FrameNumber => ResolvedArgument::FrameNumber(context.frame_number),
            AllDetections => ResolvedArgument::Detections(
                context.object_detections.as_deref().unwrap_or(&[]).iter().collect(),
            ),
            DetectionsOfClass(class) => ResolvedArgument::Detections(
                context
                    .object_detections
                    .as_deref()
                    .unwrap_or(&[])
                    .iter()
                    .filter(|d| &d.label == class)
                    .collect(),
            ),
            AllTracks => ResolvedArgument::Tracks(context.trackable_objects.values().map(|t| t.as_ref()).collect()),
            AllTracksWithKeys => ResolvedArgument::TracksWithKeys(
                context.trackable_objects.iter().map(|(k, t)| (k, t.as_ref())).collect(),
            ),
            MatchedTracks => by_keys(&context.matched_keys, false),
            MatchedTracksWithKeys => by_keys(&context.matched_keys, true),
            UnmatchedTracks => by_keys(&context.unmatched_keys, false),
            UnmatchedTracksWithKeys => by_keys(&context.unmatched_keys, true),
            NewTracks => by_keys(&context.new_keys, false),
            NewTracksWithKeys => by_keys(&context.new_keys, true),
            DeletedTracks => {
                ResolvedArgument::Tracks(context.deleted.iter().map(|(_, t)| t.as_ref()).collect())
            }
            DeletedTracksWithKeys => {
                ResolvedArgument::TracksWithKeys(context.deleted.iter().map(|(k, t)| (k, t.as_ref())).collect())
            }
            TracksOfClass(class) => ResolvedArgument::Tracks(
                context
                    .trackable_objects
                    .values()
                    .map(|t| t.as_ref())
                    .filter(|t| t.class_name() == class)
                    .collect(),
            ),
            TracksOfClassWithKeys(class) => ResolvedArgument::TracksWithKeys(
                context
                    .trackable_objects
                    .iter()
                    .map(|(k, t)| (k, t.as_ref()))
                    .filter(|(_, t)| t.class_name() == class)
                    .collect(),
            ),
            MatchedTracksOfClass(class) => filter_class(by_keys(&context.matched_keys, false), class),
            MatchedTracksOfClassWithKeys(class) => filter_class_with_keys(by_keys(&context.matched_keys, true), class),
            UnmatchedTracksOfClass(class) => filter_class(by_keys(&context.unmatched_keys, false), class),
            UnmatchedTracksOfClassWithKeys(class) => {
                filter_class_with_keys(by_keys(&context.unmatched_keys, true), class)
            }
            NewTracksOfClass(class) => filter_class(by_keys(&context.new_keys, false), class),
            NewTracksOfClassWithKeys(class) => filter_class_with_keys(by_keys(&context.new_keys, true), class),
            DeletedTracksOfClass(class) => ResolvedArgument::Tracks(
                context
                    .deleted
                    .iter()
                    .map(|(_, t)| t.as_ref())
                    .filter(|t| t.class_name() == class)
                    .collect(),
            ),
            DeletedTracksOfClassWithKeys(class) => ResolvedArgument::TracksWithKeys(
                context
                    .deleted
                    .iter()
                    .map(|(k, t)| (k, t.as_ref()))
                    .filter(|(_, t)| t.class_name() == class)
                    .collect(),
            ),
            TrackingAttribute(name) => context
                .tracking_attributes
                .get(name)
                .map(ResolvedArgument::Attribute)
                .ok_or_else(|| PipelineError::UnknownTrackingAttribute(name.clone()))?,
            StepResult(name) => context
                .pipeline_step_results
                .get(name)
                .map(|v| ResolvedArgument::StepResult(v.as_ref()))
                .ok_or_else(|| PipelineError::UnknownStepResult(name.clone()))?,
        })
    }
}

fn filter_class<'ctx>(arg: ResolvedArgument<'ctx>, class: &str) -> ResolvedArgument<'ctx> {
    match arg {
        ResolvedArgument::Tracks(tracks) => {
            ResolvedArgument::Tracks(tracks.into_iter().filter(|t| t.class_name() == class).collect())
        }
        other => other,
    }
}

fn filter_class_with_keys<'ctx>(arg: ResolvedArgument<'ctx>, class: &str) -> ResolvedArgument<'ctx> {
    match arg {
        ResolvedArgument::TracksWithKeys(pairs) => ResolvedArgument::TracksWithKeys(
            pairs.into_iter().filter(|(_, t)| t.class_name() == class).collect(),
        ),
        other => other,
    }
}
