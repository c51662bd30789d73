// API token service
// Issue and revoke tokens. The plaintext secret is returned exactly once, at
// creation; the store keeps only its display prefix and SHA-256 hash.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::backend::MockBackend;
use crate::entities::{ApiToken, TokenStatus};
use crate::error::ConsoleError;
use crate::forms::ApiTokenForm;

const SECRET_PREFIX: &str = "cd_";
const SECRET_BYTES: usize = 32;
/// Characters of the secret kept for display, including `cd_`.
const DISPLAY_PREFIX_LEN: usize = 11;

/// Result of creating a token: the stored record plus the one-time secret.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: ApiToken,
    pub secret: String,
}

/// 32 random bytes from the thread-local CSPRNG, base64url without padding.
fn generate_secret() -> String {
    let bytes: [u8; SECRET_BYTES] = rand::random();
    format!("{}{}", SECRET_PREFIX, URL_SAFE_NO_PAD.encode(bytes))
}

pub fn hash_secret(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

/// Whether `secret` is the plaintext of `token` and the token is still usable.
pub fn verify_secret(token: &ApiToken, secret: &str) -> bool {
    token.status == TokenStatus::Active
        && secret.starts_with(&token.prefix)
        && hash_secret(secret) == token.secret_hash
}

pub async fn create_api_token(
    backend: &MockBackend,
    form: &ApiTokenForm,
) -> Result<IssuedToken, ConsoleError> {
    form.validate().into_result()?;

    let secret = generate_secret();
    let token = ApiToken {
        id: crate::util::new_record_id("tok"),
        name: form.name.trim().to_string(),
        prefix: secret.chars().take(DISPLAY_PREFIX_LEN).collect(),
        secret_hash: hash_secret(&secret),
        scopes: form.scopes.clone(),
        status: TokenStatus::Active,
        created_at: crate::util::today(),
        last_used: None,
        expires_at: form.expires_at.clone(),
    };
    let token = backend.create(token).await?;
    log::info!("Issued API token {} ({})", token.id, token.prefix);
    Ok(IssuedToken { token, secret })
}

pub async fn revoke_api_token(backend: &MockBackend, id: &str) -> Result<ApiToken, ConsoleError> {
    let mut token: ApiToken = backend.get(id).await?;
    if token.status == TokenStatus::Revoked {
        return Ok(token);
    }
    token.status = TokenStatus::Revoked;
    let token = backend.update(token).await?;
    log::info!("Revoked API token {}", token.id);
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FailurePlan, Simulation};
    use crate::store::MockStore;

    fn backend() -> MockBackend {
        MockBackend::new(MockStore::seeded(), Simulation::instant())
    }

    fn form() -> ApiTokenForm {
        ApiTokenForm {
            name: "Warehouse sync".into(),
            scopes: vec!["companies:read".into()],
            expires_at: None,
        }
    }

    #[test]
    fn test_secret_carries_32_random_bytes() {
        let a = generate_secret();
        let b = generate_secret();
        assert_ne!(a, b);
        let decoded = URL_SAFE_NO_PAD
            .decode(a.strip_prefix(SECRET_PREFIX).unwrap())
            .unwrap();
        assert_eq!(decoded.len(), SECRET_BYTES);
    }

    #[tokio::test]
    async fn test_secret_shown_once_and_only_hash_stored() {
        let backend = backend();
        let issued = create_api_token(&backend, &form()).await.unwrap();
        assert!(issued.secret.starts_with("cd_"));
        assert_eq!(issued.token.prefix.len(), 11);
        assert!(issued.secret.starts_with(&issued.token.prefix));

        let stored = backend.snapshot().tokens.get(&issued.token.id).cloned().unwrap();
        assert_eq!(stored.secret_hash, hash_secret(&issued.secret));
        let json = serde_json::to_string(&stored).unwrap();
        assert!(!json.contains(&issued.secret));
        assert!(!json.contains("secretHash"));
        assert!(verify_secret(&stored, &issued.secret));
        assert!(!verify_secret(&stored, "cd_wrong"));
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_store() {
        let backend = backend();
        let before = backend.snapshot().tokens.len();
        let err = create_api_token(&backend, &ApiTokenForm::default()).await.unwrap_err();
        assert!(err.is_inline());
        assert_eq!(backend.snapshot().tokens.len(), before);
    }

    #[tokio::test]
    async fn test_revoke_disables_verification() {
        let backend = backend();
        let issued = create_api_token(&backend, &form()).await.unwrap();
        let revoked = revoke_api_token(&backend, &issued.token.id).await.unwrap();
        assert_eq!(revoked.status, TokenStatus::Revoked);
        assert!(!verify_secret(&revoked, &issued.secret));
        // Revoking twice is a no-op.
        let again = revoke_api_token(&backend, &issued.token.id).await.unwrap();
        assert_eq!(again, revoked);
    }

    #[tokio::test]
    async fn test_revoke_failure_leaves_token_active() {
        let backend = MockBackend::new(
            MockStore::seeded(),
            Simulation::instant().with_plan(FailurePlan::fail_ids(["tok-001"])),
        );
        assert!(revoke_api_token(&backend, "tok-001").await.is_err());
        let token = backend.snapshot().tokens.get("tok-001").cloned().unwrap();
        assert_eq!(token.status, TokenStatus::Active);
    }
}
