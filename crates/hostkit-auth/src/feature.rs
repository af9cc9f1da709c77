//! Feature limitations on accounts.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Features an account has been barred from.
    ///
    /// Platform staff limit abusive or unverified accounts by switching off
    /// individual features. A set bit means the feature is *unavailable*.
    ///
    /// | Flag | Blocks |
    /// |------|--------|
    /// | [`USE_EXPENSES`](Self::USE_EXPENSES) | Submitting, editing and acting on expenses |
    /// | [`USE_PAYMENT_METHODS`](Self::USE_PAYMENT_METHODS) | Contributing with saved payment methods |
    /// | [`CONVERSATIONS`](Self::CONVERSATIONS) | Posting conversations |
    /// | [`COMMENTS`](Self::COMMENTS) | Commenting on expenses and updates |
    /// | [`VIRTUAL_CARDS`](Self::VIRTUAL_CARDS) | Requesting or using virtual cards |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct FeatureLimits: u16 {
        const USE_EXPENSES        = 0b0000_0001;
        const USE_PAYMENT_METHODS = 0b0000_0010;
        const CONVERSATIONS       = 0b0000_0100;
        const COMMENTS            = 0b0000_1000;
        const VIRTUAL_CARDS       = 0b0001_0000;
    }
}

impl FeatureLimits {
    /// Every feature blocked (a frozen account).
    pub const FROZEN: Self = Self::USE_EXPENSES
        .union(Self::USE_PAYMENT_METHODS)
        .union(Self::CONVERSATIONS)
        .union(Self::COMMENTS)
        .union(Self::VIRTUAL_CARDS);

    /// Returns `true` if `feature` is still available.
    ///
    /// # Example
    ///
    /// ```
    /// use hostkit_auth::FeatureLimits;
    ///
    /// let limits = FeatureLimits::USE_EXPENSES;
    /// assert!(!limits.allows(FeatureLimits::USE_EXPENSES));
    /// assert!(limits.allows(FeatureLimits::COMMENTS));
    /// assert!(!FeatureLimits::FROZEN.allows(FeatureLimits::COMMENTS));
    /// ```
    #[must_use]
    pub fn allows(self, feature: Self) -> bool {
        !self.intersects(feature)
    }
}
