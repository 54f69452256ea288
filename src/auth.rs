//! Roles and credential lookup
//!
//! Credentials are compared in clear text against a fixed table. This is a
//! role selector for a single-user tool, not a security boundary.

use rustc_hash::FxHashMap;
use std::fmt;

/// Access level of the logged-in user, ordered by privilege
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Student,
    Professor,
    Admin,
}

impl Role {
    /// Numeric level (0 = student, 1 = professor, 2 = admin)
    pub fn level(self) -> u8 {
        match self {
            Role::Student => 0,
            Role::Professor => 1,
            Role::Admin => 2,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "Student"),
            Role::Professor => write!(f, "Professor"),
            Role::Admin => write!(f, "Admin"),
        }
    }
}

/// Resolves a login/secret pair to a role
pub trait Authenticator {
    fn authenticate(&self, login: &str, secret: &str) -> Option<Role>;
}

#[derive(Debug, Clone)]
struct Credential {
    secret: String,
    role: Role,
}

/// Authenticator over an in-memory credential table
#[derive(Debug, Clone, Default)]
pub struct FixedCredentials {
    users: FxHashMap<String, Credential>,
}

impl FixedCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user
    pub fn with_user(mut self, login: &str, secret: &str, role: Role) -> Self {
        self.users.insert(
            login.to_string(),
            Credential {
                secret: secret.to_string(),
                role,
            },
        );
        self
    }

    /// The built-in accounts: one per role
    pub fn builtin() -> Self {
        Self::new()
            .with_user("admin", "master", Role::Admin)
            .with_user("222", "senha222", Role::Professor)
            .with_user("111", "senha111", Role::Student)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Authenticator for FixedCredentials {
    fn authenticate(&self, login: &str, secret: &str) -> Option<Role> {
        let role = self
            .users
            .get(login)
            .filter(|cred| cred.secret == secret)
            .map(|cred| cred.role);
        match role {
            Some(role) => tracing::info!(login, %role, "login succeeded"),
            None => tracing::warn!(login, "login failed"),
        }
        role
    }
}
