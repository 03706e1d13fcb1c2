//! Explicit login context handed to whatever talks to the backend.

use crate::workflow::Stage;

/// What a logged-in user is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Sees every stage
    Admin,
    /// Staff of one production stage
    Operator(Stage),
}

/// Authenticated session: bearer token plus role.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    role: Role,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether orders at `stage` belong on this user's pages.
    pub fn can_view(&self, stage: Stage) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Operator(own) => own == stage,
        }
    }
}
