use std::future::Future;

use ark_types::VerifyResponse;

use crate::error::ClientError;

/// The one piece of real work in a verification run: ask the backend to
/// check an address.
pub trait VerificationBackend: Send + Sync {
    fn verify(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<VerifyResponse, ClientError>> + Send;
}

impl<T: VerificationBackend + ?Sized> VerificationBackend for std::sync::Arc<T> {
    fn verify(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<VerifyResponse, ClientError>> + Send {
        (**self).verify(address)
    }
}
