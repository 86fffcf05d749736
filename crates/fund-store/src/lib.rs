//! Collaborator contracts around the analysis client
//!
//! The analysis core is deliberately auth-free; everything user-scoped
//! lives behind the traits in this crate:
//!
//! - [`IdentityProvider`]: who is signed in, plus change notifications
//! - [`AnalysisStore`]: a user's saved analyses, ownership enforced on
//!   every operation
//! - [`CreditLedger`]: per-user credit balances with a subscription feed
//! - [`CheckoutProvider`]: payment sessions for credit packages
//!
//! Each trait ships with an in-memory implementation (or, for checkout, a
//! test stub) so the CLI and the test suite can run without any external
//! service.

pub mod auth;
pub mod checkout;
pub mod credits;
pub mod error;
pub mod record;
pub mod store;

// Re-export main types for convenience
pub use auth::{AuthState, IdentityProvider, StaticIdentity};
pub use checkout::{CheckoutProvider, CheckoutSession};
pub use credits::{
    CREDIT_PACKAGES, CreditLedger, CreditPackage, INITIAL_CREDITS, MemoryCreditLedger,
    UserCredits, find_package,
};
pub use error::{Result, StoreError};
pub use record::{AnalysisPatch, AnalysisRecord, AnalysisStatus, NewAnalysis};
pub use store::{AnalysisStore, MemoryAnalysisStore};
