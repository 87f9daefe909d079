use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("tracking attribute {0:?} does not exist")]
    UnknownTrackingAttribute(String),

    #[error("pipeline result {0:?} does not exist")]
    UnknownStepResult(String),

    #[error("no pipeline configured for this application")]
    NoPipeline,

    #[error("tracking attribute {0:?} is already registered")]
    AttributeAlreadyRegistered(String),

    #[error("tracking attribute {0:?} is not registered")]
    AttributeNotRegistered(String),

    #[error("exactly one of tracked_class or tracked_classes must be specified")]
    AmbiguousClassSpecifier,

    #[error("class {0:?} is missing from a per-class configuration map")]
    MissingClassInConfigMap(String),

    #[error("application builder is missing required configuration: {0}")]
    IncompleteConfiguration(&'static str),

    #[error(transparent)]
    Core(#[from] frametrack_core::CoreError),
}
