use chrono::Utc;
use frametrack_core::ApplicationContext;

/// Produces the per-frame value an [`crate::Application`] yields to its
/// caller. Swappable so a host can emit a shape other than the default one.
pub trait ResultFormatter: Send + Sync {
    fn format(&self, context: &ApplicationContext) -> serde_json::Value;
}

/// `{frame_number, frame_timestamp, pipeline_step_results, tracking_attributes}`.
/// `frame_timestamp` is wall-clock at emit time, not tied to the frame's
/// source timing.
///
/// Step results are serialized as a placeholder rather than their real JSON
/// form: results are typed as `Box<dyn Any>` precisely so a step can hand
/// along borrowed, non-serializable values, and this formatter has no way to
/// know which ones happen to be JSON-able. A host that needs real payloads
/// should implement its own [`ResultFormatter`] with knowledge of its
/// pipeline's concrete step result types.
#[derive(Default)]
pub struct DefaultResultFormatter;

impl ResultFormatter for DefaultResultFormatter {
    fn format(&self, context: &ApplicationContext) -> serde_json::Value {
        let step_results: serde_json::Map<String, serde_json::Value> = context
            .pipeline_step_results
            .iter()
            .map(|(name, _)| (name.clone(), serde_json::Value::String("<opaque step result>".to_string())))
            .collect();

        serde_json::json!({
            "frame_number": context.frame_number,
            "frame_timestamp": Utc::now().to_rfc3339(),
            "pipeline_step_results": step_results,
            "tracking_attributes": context.tracking_attributes,
        })
    }
}
