use crate::physics::BodyHandle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Body capacity of {0} exceeded")]
    CapacityExceeded(usize),

    #[error("Body creation rejected: {0}")]
    Rejected(String),

    #[error("Cannot weld {child:?} to {parent:?}: {reason}")]
    InvalidWeld {
        child: BodyHandle,
        parent: BodyHandle,
        reason: String,
    },
}
