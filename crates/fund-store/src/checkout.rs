//! Checkout provider contract
//!
//! Payment processing lives entirely with the external provider; this side
//! only asks for a session and redirects the purchaser to the returned URL.
//! Credit fulfillment happens out of band once the provider confirms the
//! payment.

use crate::error::Result;
use async_trait::async_trait;
use url::Url;

/// A payment session ready to redirect the purchaser to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    /// Package being purchased
    pub package_id: String,
    /// Where to send the purchaser to complete payment
    pub url: Url,
}

/// External payment provider
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Create a checkout session for a credit package
    ///
    /// Fails with [`StoreError::UnknownPackage`](crate::StoreError::UnknownPackage)
    /// when the package id is not one of the offered bundles, and with
    /// [`StoreError::Unauthenticated`](crate::StoreError::Unauthenticated)
    /// when no user is signed in.
    async fn create_checkout_session(&self, package_id: &str) -> Result<CheckoutSession>;
}
