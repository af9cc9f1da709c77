use hostkit_auth::Policies;
use hostkit_types::{CollectiveId, Currency};
use serde::{Deserialize, Serialize};

/// Account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectiveKind {
    User,
    Organization,
    Collective,
    Fund,
    Event,
    Project,
}

/// A collective-like account: a user profile, an organization, a host, a
/// fund, or a child event/project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collective {
    pub id: CollectiveId,
    #[serde(default)]
    pub name: String,
    pub kind: CollectiveKind,
    pub currency: Currency,
    /// Fiscal host. `None` for unhosted accounts.
    #[serde(default)]
    pub host_id: Option<CollectiveId>,
    /// Parent account of events and projects.
    #[serde(default)]
    pub parent_id: Option<CollectiveId>,
    #[serde(default = "default_admin_count")]
    pub admin_count: u32,
    #[serde(default)]
    pub policies: Policies,
}

fn default_admin_count() -> u32 {
    1
}

impl Collective {
    /// Creates an unhosted account with a single administrator.
    #[must_use]
    pub fn new(id: CollectiveId, kind: CollectiveKind, currency: Currency) -> Self {
        Self {
            id,
            name: String::new(),
            kind,
            currency,
            host_id: None,
            parent_id: None,
            admin_count: default_admin_count(),
            policies: Policies::default(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_host(mut self, host_id: CollectiveId) -> Self {
        self.host_id = Some(host_id);
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: CollectiveId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    #[must_use]
    pub fn with_admin_count(mut self, admin_count: u32) -> Self {
        self.admin_count = admin_count;
        self
    }

    #[must_use]
    pub fn with_policies(mut self, policies: Policies) -> Self {
        self.policies = policies;
        self
    }

    /// Returns `true` when the account is its own fiscal host.
    #[must_use]
    pub fn is_self_hosted(&self) -> bool {
        self.host_id == Some(self.id)
    }

    /// Returns `true` if `host`'s `COLLECTIVE_MINIMUM_ADMINS` policy asks to
    /// freeze this account because it has too few administrators.
    ///
    /// `host` must be this account's fiscal host; any other account yields
    /// `false`.
    #[must_use]
    pub fn is_frozen_by_minimum_admins(&self, host: &Collective) -> bool {
        if self.host_id != Some(host.id) || self.is_self_hosted() {
            return false;
        }
        host.policies
            .minimum_admins()
            .is_some_and(|policy| policy.freeze && !policy.is_satisfied_by(self.admin_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostkit_auth::{MinimumAdminsPolicy, MinimumAdminsScope, Policy};

    fn host_requiring_two_admins(freeze: bool) -> Collective {
        let mut policies = Policies::default();
        policies.set(Policy::CollectiveMinimumAdmins(MinimumAdminsPolicy {
            number_of_admins: 2,
            applies: MinimumAdminsScope::AllCollectives,
            freeze,
        }));
        Collective::new(CollectiveId(1), CollectiveKind::Organization, Currency::Usd)
            .with_host(CollectiveId(1))
            .with_policies(policies)
    }

    #[test]
    fn self_hosted_when_host_is_itself() {
        let host = Collective::new(CollectiveId(1), CollectiveKind::Organization, Currency::Usd)
            .with_host(CollectiveId(1));
        let hosted = Collective::new(CollectiveId(2), CollectiveKind::Collective, Currency::Usd)
            .with_host(CollectiveId(1));

        assert!(host.is_self_hosted());
        assert!(!hosted.is_self_hosted());
        assert!(!Collective::new(CollectiveId(3), CollectiveKind::User, Currency::Usd).is_self_hosted());
    }

    #[test]
    fn minimum_admins_freezes_single_admin_collective() {
        let host = host_requiring_two_admins(true);
        let single = Collective::new(CollectiveId(2), CollectiveKind::Collective, Currency::Usd)
            .with_host(CollectiveId(1));
        let pair = single.clone().with_admin_count(2);

        assert!(single.is_frozen_by_minimum_admins(&host));
        assert!(!pair.is_frozen_by_minimum_admins(&host));
        assert!(!host.is_frozen_by_minimum_admins(&host));
    }

    #[test]
    fn minimum_admins_without_freeze_never_freezes() {
        let host = host_requiring_two_admins(false);
        let single = Collective::new(CollectiveId(2), CollectiveKind::Collective, Currency::Usd)
            .with_host(CollectiveId(1));
        assert!(!single.is_frozen_by_minimum_admins(&host));
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{ "id": 5, "kind": "EVENT", "currency": "EUR", "hostId": 1, "parentId": 4 }"#;
        let collective: Collective = serde_json::from_str(json).expect("deserialize");

        assert_eq!(collective.parent_id, Some(CollectiveId(4)));
        assert_eq!(collective.admin_count, 1);
        assert!(collective.policies.author_cannot_approve().is_none());
    }
}
