//! Identifier types for hostkit records.
//!
//! All identifiers wrap the platform's integer primary keys.

use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Returns the raw primary key.
            #[must_use]
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }

        impl From<$name> for EntityId {
            fn from(id: $name) -> Self {
                EntityId(id.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a user account (the login identity, not its profile).
    UserId,
    "user"
);

record_id!(
    /// Identifier of a collective-like account.
    ///
    /// Users' profiles, organizations, hosts, funds, events and projects all
    /// share this id space.
    CollectiveId,
    "collective"
);

record_id!(
    /// Identifier of an expense.
    ExpenseId,
    "expense"
);

record_id!(
    /// Identifier of a ledger transaction.
    TransactionId,
    "transaction"
);

record_id!(
    /// Identifier of a payment method used by a contributor.
    PaymentMethodId,
    "payment-method"
);

record_id!(
    /// Identifier of a payout method declared by a payee.
    PayoutMethodId,
    "payout-method"
);

/// Untyped record key used where permissions apply across record families.
///
/// Context permission entries are keyed by `(PermissionType, EntityId)`;
/// the permission type already determines which family the id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes() {
        assert_eq!(UserId(1).to_string(), "user:1");
        assert_eq!(CollectiveId(2).to_string(), "collective:2");
        assert_eq!(ExpenseId(3).to_string(), "expense:3");
        assert_eq!(TransactionId(4).to_string(), "transaction:4");
        assert_eq!(PaymentMethodId(5).to_string(), "payment-method:5");
        assert_eq!(PayoutMethodId(6).to_string(), "payout-method:6");
        assert_eq!(EntityId(7).to_string(), "entity:7");
    }

    #[test]
    fn typed_ids_convert_to_entity() {
        assert_eq!(EntityId::from(ExpenseId(10)), EntityId(10));
        assert_eq!(EntityId::from(CollectiveId(10)), EntityId(10));
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&CollectiveId(99)).expect("serialize");
        assert_eq!(json, "99");
        let parsed: CollectiveId = serde_json::from_str("99").expect("deserialize");
        assert_eq!(parsed, CollectiveId(99));
    }
}
