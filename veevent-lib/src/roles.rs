use serde::{Serialize, Deserialize};

/// the roles that are known to the admin application
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Organizer,
    AuthService,
}

impl Role {
    /// case insensitive lookup of a role name
    pub fn from_str(v: &str) -> Option<Self> {
        match v.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "organizer" => Some(Role::Organizer),
            "authservice" => Some(Role::AuthService),
            _ => None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Organizer => "organizer",
            Role::AuthService => "authservice",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// roles and whether they may use the admin application at all
pub const ROLE_POLICY: [(Role, bool); 3] = [
    (Role::Admin, true),
    (Role::Organizer, true),
    (Role::AuthService, true),
];

#[derive(Debug, Clone)]
pub struct RolePolicy {
    allowed: Vec<(Role, bool)>,
}

impl RolePolicy {
    pub fn new<I>(allowed: I) -> Self
    where
        I: IntoIterator<Item = (Role, bool)>
    {
        RolePolicy {
            allowed: allowed.into_iter().collect()
        }
    }

    /// resolves the given role name against the allow-list. unknown names
    /// and roles mapped to false both resolve to None
    pub fn resolve(&self, role: &str) -> Option<Role> {
        let role = Role::from_str(role)?;

        self.allowed.iter()
            .find(|(known, _)| *known == role)
            .and_then(|(known, permitted)| permitted.then_some(*known))
    }

    pub fn is_permitted(&self, role: &str) -> bool {
        self.resolve(role).is_some()
    }
}

impl std::default::Default for RolePolicy {
    fn default() -> Self {
        RolePolicy::new(ROLE_POLICY)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn role_names_are_case_insensitive() {
        let valid = [
            ("admin", Role::Admin),
            ("ADMIN", Role::Admin),
            ("Organizer", Role::Organizer),
            ("AuthService", Role::AuthService),
            (" authservice ", Role::AuthService),
        ];

        for (given, expected) in valid {
            assert_eq!(Role::from_str(given), Some(expected), "failed parsing {:?}", given);
        }
    }

    #[test]
    fn default_policy_rejects_unknown_roles() {
        let policy = RolePolicy::default();

        for role in ["admin", "organizer", "authservice", "Admin"] {
            assert!(policy.is_permitted(role), "role should be permitted {:?}", role);
        }

        for role in ["user", "", "guest", "administrator", "auth service"] {
            assert!(!policy.is_permitted(role), "role should be rejected {:?}", role);
        }
    }

    #[test]
    fn disabled_role_is_not_permitted() {
        let policy = RolePolicy::new([
            (Role::Admin, true),
            (Role::Organizer, false),
        ]);

        assert_eq!(policy.resolve("admin"), Some(Role::Admin));
        assert_eq!(policy.resolve("organizer"), None);
        assert_eq!(policy.resolve("authservice"), None);
    }
}
