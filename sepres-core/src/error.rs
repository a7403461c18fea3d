use crate::kinematics::KinematicsError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("kinematics error: {0}")]
    Kinematics(#[from] KinematicsError),
    #[error("invalid {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error("non-finite {quantity} at turn angle {degrees} degrees")]
    NonFinite { quantity: &'static str, degrees: f64 },
    #[error("turn angle sweep has no turn-phase minimum")]
    EmptySweep,
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig { field, reason: reason.into() }
    }
}
