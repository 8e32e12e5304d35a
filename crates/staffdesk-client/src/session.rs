//! Client auth state machine.
//!
//! `Loading → {Authenticated, Anonymous}` — loading only exists while a
//! stored token is being revalidated at boot. Login trusts the freshly
//! issued token and decodes it locally; logout is a pure local clear.

#![allow(async_fn_in_trait)]

use std::sync::Mutex;

use staffdesk_auth_types::token::{SessionClaims, decode_unverified};
use staffdesk_domain::role::Role;

/// Where the client keeps its session token between runs (the original
/// dashboard used browser local storage).
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Server-side verification of a stored token, used on boot. Returns
/// `Ok(true)` when the backend accepts the token.
pub trait VerifyPort: Send + Sync {
    async fn verify(&self, token: &str) -> Result<bool, anyhow::Error>;
}

/// Current auth state of the client.
#[derive(Debug, Clone)]
pub enum AuthState {
    /// A stored token is being revalidated; UI should hold rendering.
    Loading,
    /// Logged in with decoded claims.
    Authenticated { role: Role, claims: SessionClaims },
    /// No session.
    Anonymous,
}

/// Explicit auth state container.
///
/// Construction starts in [`AuthState::Loading`]; call [`AuthSession::restore`]
/// once at boot to settle into `Authenticated` or `Anonymous`.
pub struct AuthSession<S: TokenStore, V: VerifyPort> {
    store: S,
    verifier: V,
    state: AuthState,
}

impl<S: TokenStore, V: VerifyPort> AuthSession<S, V> {
    pub fn new(store: S, verifier: V) -> Self {
        Self {
            store,
            verifier,
            state: AuthState::Loading,
        }
    }

    /// Boot-time re-authentication from the stored token.
    ///
    /// No stored token → `Anonymous`. Otherwise the token is sent to the
    /// backend for a full signature/expiry check; only then are the claims
    /// decoded locally. Any failure — transport error, rejection, or a
    /// token that does not decode — discards the token and settles on
    /// `Anonymous`.
    pub async fn restore(&mut self) {
        let Some(token) = self.store.load() else {
            self.state = AuthState::Anonymous;
            return;
        };

        self.state = AuthState::Loading;

        let accepted = match self.verifier.verify(&token).await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "token verification request failed");
                false
            }
        };

        if !accepted {
            self.store.clear();
            self.state = AuthState::Anonymous;
            return;
        }

        match decode_unverified(&token) {
            Ok(claims) => {
                self.state = AuthState::Authenticated {
                    role: claims.role,
                    claims,
                };
            }
            Err(_) => {
                self.store.clear();
                self.state = AuthState::Anonymous;
            }
        }
    }

    /// Login with a token the backend just issued.
    ///
    /// The token is trusted without a verification round trip — it came
    /// straight from the issuer. A token that does not decode clears the
    /// session instead.
    pub fn login(&mut self, token: &str) {
        self.store.save(token);
        match decode_unverified(token) {
            Ok(claims) => {
                self.state = AuthState::Authenticated {
                    role: claims.role,
                    claims,
                };
            }
            Err(_) => {
                self.store.clear();
                self.state = AuthState::Anonymous;
            }
        }
    }

    /// Drop the session unconditionally. Purely local; no server call.
    pub fn logout(&mut self) {
        self.store.clear();
        self.state = AuthState::Anonymous;
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Role of the authenticated user, if any.
    pub fn role(&self) -> Option<Role> {
        match &self.state {
            AuthState::Authenticated { role, .. } => Some(*role),
            _ => None,
        }
    }

    /// Stored token for attaching `Authorization: Bearer` to requests.
    pub fn token(&self) -> Option<String> {
        self.store.load()
    }
}

/// In-memory token store. Suitable for tests and short-lived processes.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.token.lock().unwrap() = None;
    }
}
