//! Login and logout commands.
//!
//! Interactive login prompts for email and password (dialoguer) and
//! exchanges them for a bearer token at `/api/auth/login`. A pre-issued
//! token can be stored directly with `--token`; it is validated against
//! `/api/auth/me` before being persisted.

use anyhow::{Result, bail};
use console::style;
use dialoguer::{Input, Password};
use secrecy::SecretString;

use sebrae_client::credentials::{CredentialStore, Credentials};
use sebrae_client::{ApiClient, ApiError};

pub async fn login(api_url: &str, token: Option<String>, email: Option<String>) -> Result<()> {
    let store = CredentialStore::default_location();

    let credentials = match token {
        Some(token) => {
            // Validate the token before storing it.
            let client = ApiClient::new(api_url).with_token(SecretString::from(token.clone()));
            match client.me().await {
                Ok(user) => Credentials {
                    token,
                    user: Some(user),
                },
                Err(ApiError::Unauthorized) => bail!("token inválido ou expirado"),
                Err(err) => return Err(err.into()),
            }
        }
        None => {
            let email: String = match email {
                Some(email) => email,
                None => Input::new().with_prompt("Email").interact_text()?,
            };
            let password = Password::new().with_prompt("Senha").interact()?;

            let client = ApiClient::new(api_url);
            let resp = match client.login(&email, &password).await {
                Ok(resp) => resp,
                Err(ApiError::Unauthorized) => bail!("email ou senha incorretos"),
                Err(err) => return Err(err.into()),
            };
            Credentials {
                token: resp.access_token,
                user: Some(resp.user),
            }
        }
    };

    store.save(&credentials).await?;

    let name = credentials
        .user
        .as_ref()
        .map(|u| u.nome.as_str())
        .unwrap_or("usuário");
    println!();
    println!(
        "  {} Bem-vindo(a), {}! Sessão salva em {}",
        style("✓").green().bold(),
        style(name).cyan(),
        style(store.path().display()).dim()
    );
    println!();
    Ok(())
}

pub async fn logout() -> Result<()> {
    let store = CredentialStore::default_location();
    store.clear().await?;
    println!();
    println!("  {} Sessão encerrada.", style("✓").green().bold());
    println!();
    Ok(())
}
