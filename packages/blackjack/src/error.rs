use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("The shoe is empty, start a new shoe to keep playing")]
    EmptyShoe,
    #[error("Invalid table rules: {0}")]
    InvalidRules(String),
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
}
