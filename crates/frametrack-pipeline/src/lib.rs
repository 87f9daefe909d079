//! The pipeline harness (declarative steps over named context slots) and the
//! application harness that drives it across a stream of frames.

mod application;
mod error;
mod formatter;
mod resolver;
mod step;

pub use application::{Application, ApplicationBuilder};
pub use error::PipelineError;
pub use formatter::{DefaultResultFormatter, ResultFormatter};
pub use resolver::{Resolver, ResolvedArgument};
pub use step::{Pipeline, PipelineStep};
