use crate::config::AdminConfig;

/// Shared-secret check guarding the admin endpoints.
///
/// A plaintext equality test against the configured code. No session is
/// created: every admin request carries the code and is checked on its own.
#[derive(Clone)]
pub struct AdminGate {
    code: String,
}

impl AdminGate {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.code.clone())
    }

    pub fn verify(&self, candidate: &str) -> bool {
        !candidate.is_empty() && candidate == self.code
    }
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate").finish_non_exhaustive()
    }
}
