use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FacilityError {
    #[error("facility name must not be empty")]
    EmptyName,

    #[error("facility {name:?}: capacity must be >= 1 (got {capacity})")]
    InvalidCapacity { name: String, capacity: u32 },

    #[error("facility {name:?}: run_time must be > 0")]
    InvalidRunTime { name: String },
}

pub type FacilityResult<T> = Result<T, FacilityError>;
