use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ObjectError {
    #[error("tracking attribute {0:?} is not registered on this track")]
    UnknownAttribute(String),
}
