//! Signed session cookies
//!
//! The cookie carries only the session id, signed with an ed25519 key
//! derived from the configured secret. The value has the form
//! `<uuid>.<hex signature>`.

use crate::error::SessionError;
use crate::SessionId;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "todo.session";

const SIGNATURE_CONTEXT: &[u8] = b"todo.session.v1:";

/// Signs and verifies session cookie values
#[derive(Debug, Clone)]
pub struct CookieSigner {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl CookieSigner {
    /// Derive the signing key from a secret
    ///
    /// The same secret always yields the same key, so cookies stay valid
    /// across restarts as long as the secret does.
    #[must_use]
    pub fn from_secret(secret: &[u8]) -> Self {
        let seed: [u8; 32] = Sha256::digest(secret).into();
        let signing_key = SigningKey::from_bytes(&seed);
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Signer with a random secret, valid for this process only
    #[must_use]
    pub fn ephemeral() -> Self {
        let secret: [u8; 32] = rand::random();
        Self::from_secret(&secret)
    }

    /// Cookie value for a session id
    #[must_use]
    pub fn sign(&self, id: SessionId) -> String {
        let signature = self.signing_key.sign(&message(id));
        format!("{}.{}", id.0.simple(), hex::encode(signature.to_bytes()))
    }

    /// Recover the session id from a cookie value
    ///
    /// # Errors
    /// - `SessionError::MalformedCookie` if the value cannot be parsed
    /// - `SessionError::BadSignature` if the signature does not verify
    pub fn verify(&self, value: &str) -> Result<SessionId, SessionError> {
        let (id, signature) = value.split_once('.').ok_or(SessionError::MalformedCookie)?;
        let id = Uuid::try_parse(id)
            .map(SessionId)
            .map_err(|_| SessionError::MalformedCookie)?;
        let bytes = hex::decode(signature).map_err(|_| SessionError::MalformedCookie)?;
        let signature = Signature::from_slice(&bytes).map_err(|_| SessionError::MalformedCookie)?;

        self.verifying_key
            .verify(&message(id), &signature)
            .map_err(|_| SessionError::BadSignature)?;
        Ok(id)
    }

    /// Full `Set-Cookie` header value for a session id
    #[must_use]
    pub fn set_cookie_header(&self, id: SessionId) -> String {
        format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.sign(id)
        )
    }
}

fn message(id: SessionId) -> Vec<u8> {
    let mut msg = Vec::with_capacity(SIGNATURE_CONTEXT.len() + 16);
    msg.extend_from_slice(SIGNATURE_CONTEXT);
    msg.extend_from_slice(id.0.as_bytes());
    msg
}
