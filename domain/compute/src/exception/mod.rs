use thiserror::Error;

use crate::model::vo::{RejectReason, Resource};

pub type ComputeResult<T> = Result<T, ComputeException>;

#[derive(Error, Debug)]
pub enum ComputeException {
    #[error("There is no quota for role: {role}.")]
    UnknownRole { role: String },

    #[error("{reason}: requested {requested} {resource}, but only {remaining} {resource} remains.")]
    QuotaExceeded {
        reason: RejectReason,
        resource: Resource,
        requested: u64,
        remaining: u64,
    },

    #[error("There is no vm with id: {vm_id}.")]
    NotFound { vm_id: u64 },

    #[error("A vm with id: {vm_id} already exists in the ledger.")]
    DuplicateId { vm_id: u64 },

    #[error("Principal: {principal_id} doesn't own vm: {vm_id}.")]
    PermissionDenied { vm_id: u64, principal_id: String },

    #[error("Invalid vm creation request: {reason}.")]
    InvalidRequest { reason: String },

    #[error("Index {index} is out of range for {field} with length {len}.")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    #[error("No authenticated principal.")]
    Unauthenticated,

    #[error("Compute internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for ComputeException {
    fn from(e: anyhow::Error) -> Self {
        ComputeException::InternalError { source: e }
    }
}

impl ComputeException {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        ComputeException::InvalidRequest {
            reason: reason.into(),
        }
    }
}
