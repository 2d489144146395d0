//! API client error taxonomy.

use thiserror::Error;

/// Errors from calls against the assistant API.
///
/// 401 and 403 get their own variants because call sites treat them
/// differently: 401 tears the session down, 403 is a privilege notice.
/// Everything else is fail-fast with the HTTP status text; no retry.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("não autenticado (401)")]
    Unauthorized,

    #[error("permissão negada (403): requer privilégio de administrador")]
    Forbidden,

    #[error("erro da API ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("falha de transporte: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Whether this error must terminate the session (clear credentials).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_status_text() {
        let err = ApiError::Api {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("Service Unavailable"));
    }

    #[test]
    fn unauthorized_is_terminal() {
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(!ApiError::Forbidden.is_unauthorized());
    }
}
