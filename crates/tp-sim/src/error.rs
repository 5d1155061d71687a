use thiserror::Error;
use tp_core::{FacilityId, TpError};
use tp_facility::FacilityError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] TpError),

    #[error("invalid facility: {0}")]
    Facility(#[from] FacilityError),

    #[error("a facility named {0:?} already exists")]
    DuplicateFacility(String),

    #[error("no live facility {0}")]
    UnknownFacility(FacilityId),

    #[error("no live facility named {0:?}")]
    UnknownFacilityName(String),
}

pub type SimResult<T> = Result<T, SimError>;
