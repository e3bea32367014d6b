//! Durable client-side session storage.
//!
//! The main app and the admin panel keep their tokens under distinct fixed
//! keys so both can be signed in from the same machine.

pub mod claims;
pub mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

use crate::models::user::User;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppKind {
    Main,
    Admin,
}

impl AppKind {
    pub fn token_key(&self) -> &'static str {
        match self {
            AppKind::Main => "token",
            AppKind::Admin => "adminToken",
        }
    }

    /// The admin panel only persists its token.
    pub fn user_key(&self) -> Option<&'static str> {
        match self {
            AppKind::Main => Some("user"),
            AppKind::Admin => None,
        }
    }

    pub fn storage_name(&self) -> &'static str {
        match self {
            AppKind::Main => "main",
            AppKind::Admin => "admin",
        }
    }
}

/// Current user and token as seen by this client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
