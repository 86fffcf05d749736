//! Per-user credit ledger
//!
//! Running an analysis costs credits; buying a package refills them. The
//! ledger initializes every new user with a free allowance on first access
//! and publishes balance changes on a watch channel so a display component
//! can subscribe instead of being poked through a global refresh hook.

use crate::auth::IdentityProvider;
use crate::error::{Result, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tracing::debug;

/// Free allowance granted on first access
pub const INITIAL_CREDITS: i64 = 100;

/// A user's credit balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredits {
    pub user_id: String,
    pub credits: i64,
    pub last_updated: DateTime<Utc>,
}

/// A purchasable credit bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditPackage {
    pub id: &'static str,
    pub credits: i64,
    pub price_usd: u32,
    pub label: &'static str,
}

/// Packages offered on the refill page
pub const CREDIT_PACKAGES: [CreditPackage; 3] = [
    CreditPackage {
        id: "basic",
        credits: 100,
        price_usd: 10,
        label: "Basic",
    },
    CreditPackage {
        id: "pro",
        credits: 500,
        price_usd: 45,
        label: "Pro",
    },
    CreditPackage {
        id: "premium",
        credits: 1000,
        price_usd: 80,
        label: "Premium",
    },
];

/// Look up a package by id
pub fn find_package(id: &str) -> Option<&'static CreditPackage> {
    CREDIT_PACKAGES.iter().find(|package| package.id == id)
}

/// Balance bookkeeping for the current user
#[async_trait]
pub trait CreditLedger: Send + Sync {
    /// Current balance, initializing the free allowance on first access
    async fn balance(&self) -> Result<UserCredits>;

    /// Spend credits; fails without mutating when the balance is too low
    async fn deduct(&self, amount: i64) -> Result<UserCredits>;

    /// Grant credits (free allowance top-up or completed purchase)
    async fn add(&self, amount: i64) -> Result<UserCredits>;

    /// Balance change notifications for the current user
    fn subscribe(&self) -> watch::Receiver<Option<UserCredits>>;
}

/// In-memory ledger for tests and local runs
pub struct MemoryCreditLedger {
    identity: Arc<dyn IdentityProvider>,
    balances: RwLock<HashMap<String, UserCredits>>,
    feed: watch::Sender<Option<UserCredits>>,
}

impl MemoryCreditLedger {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        let (feed, _) = watch::channel(None);
        Self {
            identity,
            balances: RwLock::new(HashMap::new()),
            feed,
        }
    }

    fn require_user(&self) -> Result<String> {
        self.identity
            .current_user()
            .ok_or(StoreError::Unauthenticated)
    }

    /// Current entry for the user, created with the free allowance if absent
    fn entry<'a>(
        balances: &'a mut HashMap<String, UserCredits>,
        user_id: &str,
    ) -> &'a mut UserCredits {
        balances
            .entry(user_id.to_string())
            .or_insert_with(|| UserCredits {
                user_id: user_id.to_string(),
                credits: INITIAL_CREDITS,
                last_updated: Utc::now(),
            })
    }

    fn publish(&self, credits: &UserCredits) {
        self.feed.send_replace(Some(credits.clone()));
    }
}

#[async_trait]
impl CreditLedger for MemoryCreditLedger {
    async fn balance(&self) -> Result<UserCredits> {
        let user_id = self.require_user()?;
        let mut balances = self.balances.write().await;
        Ok(Self::entry(&mut balances, &user_id).clone())
    }

    async fn deduct(&self, amount: i64) -> Result<UserCredits> {
        let user_id = self.require_user()?;
        let mut balances = self.balances.write().await;
        let entry = Self::entry(&mut balances, &user_id);

        if entry.credits < amount {
            return Err(StoreError::InsufficientCredits {
                available: entry.credits,
                required: amount,
            });
        }

        entry.credits -= amount;
        entry.last_updated = Utc::now();
        debug!(%user_id, amount, remaining = entry.credits, "credits deducted");

        let updated = entry.clone();
        drop(balances);
        self.publish(&updated);
        Ok(updated)
    }

    async fn add(&self, amount: i64) -> Result<UserCredits> {
        let user_id = self.require_user()?;
        let mut balances = self.balances.write().await;
        let entry = Self::entry(&mut balances, &user_id);

        entry.credits += amount;
        entry.last_updated = Utc::now();
        debug!(%user_id, amount, balance = entry.credits, "credits added");

        let updated = entry.clone();
        drop(balances);
        self.publish(&updated);
        Ok(updated)
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserCredits>> {
        self.feed.subscribe()
    }
}
