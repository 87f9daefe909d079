use std::collections::{HashMap, HashSet};
use std::mem;
use std::sync::Arc;

use frametrack_core::{ApplicationContext, ClassTrackingConfig, TrackMap, TrackingUpdateConfig};
use frametrack_distance::DistanceAlgorithm;
use frametrack_object::TrackableObjectFactory;
use frametrack_predict::MovementPredictorFactory;
use frametrack_types::Image;
use tracing::{error, info};

use crate::error::PipelineError;
use crate::formatter::{DefaultResultFormatter, ResultFormatter};
use crate::step::Pipeline;

/// How a per-class setting was supplied: one default for every active
/// class, a list positionally parallel to the active-class list, or an
/// explicit map (which must cover every active class).
enum PerClass<T> {
    Default(T),
    List(Vec<T>),
    Map(HashMap<String, T>),
}

impl<T: Clone> PerClass<T> {
    fn resolve(self, active_classes: &[String]) -> Result<HashMap<String, T>, PipelineError> {
        match self {
            PerClass::Default(value) => {
                Ok(active_classes.iter().map(|c| (c.clone(), value.clone())).collect())
            }
            PerClass::List(values) => Ok(active_classes.iter().cloned().zip(values).collect()),
            PerClass::Map(map) => {
                let mut resolved = HashMap::with_capacity(active_classes.len());
                for class in active_classes {
                    let value = map
                        .get(class)
                        .cloned()
                        .ok_or_else(|| PipelineError::MissingClassInConfigMap(class.clone()))?;
                    resolved.insert(class.clone(), value);
                }
                Ok(resolved)
            }
        }
    }
}

/// Builds an [`Application`], validating the class specifier, per-class
/// factory tables and `delete_after`, and the matching configuration.
pub struct ApplicationBuilder {
    tracked_class: Option<String>,
    tracked_classes: Option<Vec<String>>,
    track_factories: Option<PerClass<Arc<dyn TrackableObjectFactory>>>,
    predictor_factories: Option<PerClass<Arc<dyn MovementPredictorFactory>>>,
    delete_after: PerClass<u64>,
    distance_algorithm: Option<Arc<dyn DistanceAlgorithm>>,
    threshold: Option<f64>,
    pipeline: Option<Pipeline>,
    formatter: Box<dyn ResultFormatter>,
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self {
            tracked_class: None,
            tracked_classes: None,
            track_factories: None,
            predictor_factories: None,
            delete_after: PerClass::Default(0),
            distance_algorithm: None,
            threshold: None,
            pipeline: None,
            formatter: Box::new(DefaultResultFormatter),
        }
    }
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracked_class(mut self, class: impl Into<String>) -> Self {
        self.tracked_class = Some(class.into());
        self
    }

    pub fn tracked_classes(mut self, classes: Vec<String>) -> Self {
        self.tracked_classes = Some(classes);
        self
    }

    pub fn track_factory(mut self, factory: Arc<dyn TrackableObjectFactory>) -> Self {
        self.track_factories = Some(PerClass::Default(factory));
        self
    }

    pub fn track_factories(mut self, factories: Vec<Arc<dyn TrackableObjectFactory>>) -> Self {
        self.track_factories = Some(PerClass::List(factories));
        self
    }

    pub fn track_factory_map(mut self, factories: HashMap<String, Arc<dyn TrackableObjectFactory>>) -> Self {
        self.track_factories = Some(PerClass::Map(factories));
        self
    }

    pub fn predictor_factory(mut self, factory: Arc<dyn MovementPredictorFactory>) -> Self {
        self.predictor_factories = Some(PerClass::Default(factory));
        self
    }

    pub fn predictor_factories(mut self, factories: Vec<Arc<dyn MovementPredictorFactory>>) -> Self {
        self.predictor_factories = Some(PerClass::List(factories));
        self
    }

    pub fn predictor_factory_map(mut self, factories: HashMap<String, Arc<dyn MovementPredictorFactory>>) -> Self {
        self.predictor_factories = Some(PerClass::Map(factories));
        self
    }

    pub fn delete_after(mut self, frames: u64) -> Self {
        self.delete_after = PerClass::Default(frames);
        self
    }

    pub fn delete_after_map(mut self, frames: HashMap<String, u64>) -> Self {
        self.delete_after = PerClass::Map(frames);
        self
    }

    pub fn distance_algorithm(mut self, algorithm: Arc<dyn DistanceAlgorithm>) -> Self {
        self.distance_algorithm = Some(algorithm);
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    pub fn result_formatter(mut self, formatter: Box<dyn ResultFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn build(self) -> Result<Application, PipelineError> {
        let active_classes = match (self.tracked_class, self.tracked_classes) {
            (Some(class), None) => vec![class],
            (None, Some(classes)) => classes,
            _ => return Err(PipelineError::AmbiguousClassSpecifier),
        };

        let track_factories = self
            .track_factories
            .ok_or(PipelineError::IncompleteConfiguration("track_factory"))?
            .resolve(&active_classes)?;
        let predictor_factories = self
            .predictor_factories
            .ok_or(PipelineError::IncompleteConfiguration("predictor_factory"))?
            .resolve(&active_classes)?;
        let delete_afters = self.delete_after.resolve(&active_classes)?;

        let mut classes = HashMap::with_capacity(active_classes.len());
        for class in &active_classes {
            classes.insert(
                class.clone(),
                ClassTrackingConfig {
                    delete_after: delete_afters[class],
                    track_factory: track_factories[class].clone(),
                    predictor_factory: predictor_factories[class].clone(),
                },
            );
        }

        let tracking_config = Arc::new(TrackingUpdateConfig {
            active_classes,
            classes,
            distance_algorithm: self
                .distance_algorithm
                .ok_or(PipelineError::IncompleteConfiguration("distance_algorithm"))?,
            threshold: self.threshold.ok_or(PipelineError::IncompleteConfiguration("threshold"))?,
        });

        Ok(Application {
            tracking_config,
            pipeline: self.pipeline.ok_or(PipelineError::NoPipeline)?,
            formatter: self.formatter,
            registered_attributes: HashSet::new(),
            tracking_attributes: HashMap::new(),
            trackable_objects: TrackMap::new(),
            frame_number: 0,
        })
    }
}

/// Drives a [`Pipeline`] and the core tracking update across a stream of
/// frames, owning the persistent track map, tracking-attribute map, and
/// frame counter between calls to [`Application::process_frame`].
pub struct Application {
    tracking_config: Arc<TrackingUpdateConfig>,
    pipeline: Pipeline,
    formatter: Box<dyn ResultFormatter>,
    registered_attributes: HashSet<String>,
    tracking_attributes: HashMap<String, serde_json::Value>,
    trackable_objects: TrackMap,
    frame_number: u64,
}

impl Application {
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    pub fn register_tracking_attribute(
        &mut self,
        name: impl Into<String>,
        initial: serde_json::Value,
    ) -> Result<(), PipelineError> {
        let name = name.into();
        if !self.registered_attributes.insert(name.clone()) {
            return Err(PipelineError::AttributeAlreadyRegistered(name));
        }
        self.tracking_attributes.insert(name, initial);
        Ok(())
    }

    pub fn get_tracking_attribute(&self, name: &str) -> Result<&serde_json::Value, PipelineError> {
        if !self.registered_attributes.contains(name) {
            return Err(PipelineError::AttributeNotRegistered(name.to_string()));
        }
        Ok(self.tracking_attributes.get(name).expect("registered attributes are always present"))
    }

    pub fn set_tracking_attribute(&mut self, name: &str, value: serde_json::Value) -> Result<(), PipelineError> {
        if !self.registered_attributes.contains(name) {
            return Err(PipelineError::AttributeNotRegistered(name.to_string()));
        }
        self.tracking_attributes.insert(name.to_string(), value);
        Ok(())
    }

    /// Runs one frame through the pipeline and the tracking update.
    ///
    /// On a contract error, the persistent track map, tracking-attribute
    /// map, and frame counter are restored to their pre-call state before
    /// the error is returned — no partial frame is ever observable.
    pub fn process_frame(&mut self, frame_image: Image) -> Result<serde_json::Value, PipelineError> {
        let trackable_objects = mem::take(&mut self.trackable_objects);
        let tracking_attributes = mem::take(&mut self.tracking_attributes);

        let mut context = ApplicationContext::new(
            frame_image,
            self.frame_number,
            trackable_objects,
            tracking_attributes,
            self.tracking_config.clone(),
        );

        let outcome = self.pipeline.run(&mut context).and_then(|()| Ok(context.run_tracking_update()?));

        self.trackable_objects = context.trackable_objects;
        self.tracking_attributes = context.tracking_attributes;

        match outcome {
            Ok(()) => {
                let result = self.formatter.format(&context);
                self.frame_number += 1;
                info!(frame_number = context.frame_number, "frame processed");
                Ok(result)
            }
            Err(err) => {
                error!(frame_number = self.frame_number, %err, "frame aborted");
                Err(err)
            }
        }
    }
}
