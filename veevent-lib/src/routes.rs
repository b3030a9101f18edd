use serde::{Serialize, Deserialize};

use crate::roles::Role;

/// how a path is matched when more than one prefix applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixMatch {
    /// the longest prefix wins regardless of table order
    #[default]
    Longest,
    /// the first prefix in table order wins
    First,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    pub prefix: String,
    pub roles: Vec<Role>,
}

impl RouteRule {
    pub fn new<P, R>(prefix: P, roles: R) -> Self
    where
        P: Into<String>,
        R: IntoIterator<Item = Role>,
    {
        RouteRule {
            prefix: prefix.into(),
            roles: roles.into_iter().collect()
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(self.prefix.as_str())
    }

    pub fn permits(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
    matching: PrefixMatch,
}

impl RouteTable {
    pub fn new(rules: Vec<RouteRule>, matching: PrefixMatch) -> Self {
        RouteTable { rules, matching }
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn matching(&self) -> PrefixMatch {
        self.matching
    }

    pub fn with_matching(mut self, matching: PrefixMatch) -> Self {
        self.matching = matching;
        self
    }

    /// finds the rule that governs the given path
    pub fn find(&self, path: &str) -> Option<&RouteRule> {
        let mut iter = self.rules.iter().filter(|rule| rule.matches(path));

        match self.matching {
            PrefixMatch::First => iter.next(),
            // max_by_key returns the last maximum, ties have to keep table
            // order so fold manually
            PrefixMatch::Longest => iter.fold(None, |found: Option<&RouteRule>, rule| match found {
                Some(current) if current.prefix.len() >= rule.prefix.len() => Some(current),
                _ => Some(rule),
            }),
        }
    }

    /// checks if the role may visit the path. paths without a rule are
    /// allowed for every role
    pub fn permits(&self, path: &str, role: &Role) -> bool {
        match self.find(path) {
            Some(rule) => rule.permits(role),
            None => true
        }
    }
}

impl std::default::Default for RouteTable {
    fn default() -> Self {
        use Role::*;

        RouteTable::new(vec![
            RouteRule::new("/users", [Admin, AuthService]),
            RouteRule::new("/reports", [Admin]),
            RouteRule::new("/categories", [Admin]),
            RouteRule::new("/cities", [Admin]),
            RouteRule::new("/places", [Admin, Organizer]),
            RouteRule::new("/events", [Admin, Organizer]),
            RouteRule::new("/invitations", [Admin, Organizer]),
            RouteRule::new("/tickets", [Admin, Organizer, AuthService]),
            RouteRule::new("/profile", [Admin, Organizer, AuthService]),
        ], PrefixMatch::default())
    }
}
