use crate::parse::ParseError;
use crate::party::ActionError;
use crate::undo::LogError;

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Log(#[from] LogError),
    #[error("{0}")]
    Action(#[from] ActionError),
}
