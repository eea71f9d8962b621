//! Authenticated sessions as handed over by the session provider.

/// Proof of authentication for one request.
///
/// Wraps the signed access token (`header.payload.signature`) issued at
/// sign-in.
///
/// # Trust boundary
///
/// The token's signature is **not** verified here. The session provider
/// that produced the `Session` is responsible for that; this crate only
/// reads claims out of a token that has already been accepted upstream.
/// Never build a `Session` from a token that has not been through that
/// check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    access_token: String,
}

impl Session {
    /// Wrap an upstream-verified access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// The raw access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}
