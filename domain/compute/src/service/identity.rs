use crate::{exception::ComputeResult, model::vo::Principal};

/// Source of the caller's identity. Authentication happens outside, the value is trusted.
pub trait IdentityProvider: Send + Sync {
    /// The signed in principal, `Unauthenticated` if nobody is.
    fn current_principal(&self) -> ComputeResult<Principal>;
}
