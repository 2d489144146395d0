//! Session bootstrap and shared application state.
//!
//! `AppState` owns the authenticated API client and the current profile.
//! Bootstrap is a two-state machine: no persisted token means the session
//! is unauthenticated and the command exits with a login hint; a 401 on
//! the profile probe
//! additionally clears the stored credentials. Any other probe failure is
//! non-fatal -- the session proceeds with whatever profile was cached.

use anyhow::bail;
use console::style;
use secrecy::SecretString;

use sebrae_client::credentials::CredentialStore;
use sebrae_client::{ApiClient, ApiError};
use sebrae_types::user::UserProfile;

/// Shared state for all authenticated commands.
pub struct AppState {
    pub client: ApiClient,
    pub store: CredentialStore,
    pub profile: Option<UserProfile>,
}

impl AppState {
    /// Load credentials, probe `/api/auth/me`, and build the state.
    pub async fn bootstrap(api_url: &str) -> anyhow::Result<Self> {
        let store = CredentialStore::default_location();

        let Some(credentials) = store.load().await else {
            bail!(
                "você não está autenticado. Execute {} primeiro.",
                style("sebrae login").cyan()
            );
        };

        let client =
            ApiClient::new(api_url).with_token(SecretString::from(credentials.token.clone()));

        let profile = match client.me().await {
            Ok(profile) => Some(profile),
            Err(ApiError::Unauthorized) => {
                store.clear().await?;
                bail!(
                    "sessão expirada. Execute {} novamente.",
                    style("sebrae login").cyan()
                );
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load user profile");
                eprintln!(
                    "  {} Não foi possível carregar o perfil do usuário: {err}",
                    style("!").yellow().bold()
                );
                // Fall back to the profile cached at login time.
                credentials.user
            }
        };

        Ok(Self {
            client,
            store,
            profile,
        })
    }

    /// Display name for the logged-in user, if known.
    pub fn user_name(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.nome.as_str())
    }
}
