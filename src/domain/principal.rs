//! Authenticated actors

/// The authenticated actor performing an action.
///
/// Opaque to the engine beyond equality on `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    /// Contact handle (usually an email) copied onto reservations.
    pub contact: String,
}

impl Principal {
    pub fn new(id: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            contact: contact.into(),
        }
    }

    pub fn owns(&self, principal_id: &str) -> bool {
        self.id == principal_id
    }
}

/// Source of the "current principal, or none" capability.
///
/// Engine entry points never call this themselves; callers resolve the
/// principal once and pass it explicitly.
pub trait IdentityProvider: Send + Sync {
    fn current_principal(&self) -> Option<Principal>;
}

/// Identity provider with a fixed answer, for CLI sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(Option<Principal>);

impl StaticIdentity {
    pub fn signed_in(principal: Principal) -> Self {
        Self(Some(principal))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_principal(&self) -> Option<Principal> {
        self.0.clone()
    }
}
