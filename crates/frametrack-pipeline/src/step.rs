use std::any::Any;

use frametrack_core::ApplicationContext;
use frametrack_types::{Detection, Image};
use tracing::trace;

use crate::error::PipelineError;
use crate::resolver::{ResolvedArgument, Resolver};

/// The detection step: the one step whose output is not just filed under
/// its name in `pipeline_step_results` but also copied into
/// `context.object_detections`, since every detection-of-class resolver and
/// the tracking update itself read that field directly rather than a named
/// step result.
struct DetectionStep {
    name: String,
    function: Box<dyn Fn(&Image) -> Vec<Detection> + Send + Sync>,
}

/// A single named unit of work in a [`Pipeline`].
///
/// A step declares the slots of context it needs as a list of [`Resolver`]s;
/// at run time those are evaluated against the current frame and handed to
/// `function` in order. The function's return value is boxed as `Any` and
/// stored under `name` in `context.pipeline_step_results`, where later steps
/// and the result formatter can reach it.
///
/// The function cannot return borrowed data tied to the context: `Box<dyn
/// Any>` requires `'static`, so it must build an owned value from whatever
/// the resolvers handed it before returning.
pub struct PipelineStep {
    name: String,
    resolvers: Vec<Resolver>,
    function: Box<dyn for<'ctx> Fn(Vec<ResolvedArgument<'ctx>>) -> Box<dyn Any + Send> + Send + Sync>,
}

impl PipelineStep {
    pub fn new(
        name: impl Into<String>,
        resolvers: Vec<Resolver>,
        function: impl for<'ctx> Fn(Vec<ResolvedArgument<'ctx>>) -> Box<dyn Any + Send> + Send + Sync + 'static,
    ) -> Self {
        Self { name: name.into(), resolvers, function: Box::new(function) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, context: &mut ApplicationContext) -> Result<(), PipelineError> {
        let result = {
            let args = self
                .resolvers
                .iter()
                .map(|resolver| resolver.evaluate(context))
                .collect::<Result<Vec<_>, _>>()?;
            (self.function)(args)
        };
        context.pipeline_step_results.insert(self.name.clone(), result);
        Ok(())
    }
}

/// An ordered sequence of [`PipelineStep`]s run once per frame, preceded by
/// an optional dedicated detection step.
#[derive(Default)]
pub struct Pipeline {
    name: String,
    detection_step: Option<DetectionStep>,
    steps: Vec<PipelineStep>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), detection_step: None, steps: Vec::new() }
    }

    /// Registers the detection step: given the current frame's image,
    /// produces this frame's detections. Its result is written to
    /// `context.object_detections` before any other step runs, and also
    /// filed under `name` in `pipeline_step_results` like any other step.
    pub fn set_detection_step(
        &mut self,
        name: impl Into<String>,
        function: impl Fn(&Image) -> Vec<Detection> + Send + Sync + 'static,
    ) -> &mut Self {
        self.detection_step = Some(DetectionStep { name: name.into(), function: Box::new(function) });
        self
    }

    pub fn add_step(&mut self, step: PipelineStep) -> &mut Self {
        self.steps.push(step);
        self
    }

    pub fn run(&self, context: &mut ApplicationContext) -> Result<(), PipelineError> {
        if let Some(detection_step) = &self.detection_step {
            trace!(pipeline = %self.name, step = %detection_step.name, "running detection step");
            let detections = (detection_step.function)(&context.frame_image);
            context.pipeline_step_results.insert(detection_step.name.clone(), Box::new(detections.clone()));
            context.object_detections = Some(detections);
        }

        for step in &self.steps {
            trace!(pipeline = %self.name, step = step.name(), "running pipeline step");
            step.run(context)?;
        }
        Ok(())
    }
}
