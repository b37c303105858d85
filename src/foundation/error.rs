pub type StrataResult<T> = Result<T, StrataError>;

#[derive(thiserror::Error, Debug)]
pub enum StrataError {
    /// A pixel store or readback buffer could not be allocated.
    #[error("allocation failure: {0}")]
    AllocationFailure(String),

    /// The caller passed arguments that violate an operation's precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A target switch, blend switch or copy primitive rejected its input.
    #[error("render state failure: {0}")]
    RenderState(String),

    #[error("codec error: {0}")]
    Codec(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StrataError {
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::AllocationFailure(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn render_state(msg: impl Into<String>) -> Self {
        Self::RenderState(msg.into())
    }

    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
