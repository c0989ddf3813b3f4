//! Authenticated principal domain model

use serde::{Deserialize, Serialize};

/// Identity the gate lets through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub uid: String,
    pub email: Option<String>,
}

impl Principal {
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
        }
    }
}

/// Optional restriction to a single principal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    pub uid: Option<String>,
    pub email: Option<String>,
}

impl AllowList {
    pub fn is_open(&self) -> bool {
        self.uid.is_none() && self.email.is_none()
    }

    /// An open list admits everyone; otherwise uid or email must match
    pub fn admits(&self, principal: &Principal) -> bool {
        if self.is_open() {
            return true;
        }
        let uid_ok = self.uid.as_deref() == Some(principal.uid.as_str());
        let email_ok = match (&self.email, &principal.email) {
            (Some(allowed), Some(email)) => allowed.trim().eq_ignore_ascii_case(email.trim()),
            _ => false,
        };
        uid_ok || email_ok
    }
}
