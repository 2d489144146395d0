//! User profile and authentication wire types.

use serde::{Deserialize, Serialize};

/// Profile returned by `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub nome: String,
    #[serde(default)]
    pub google_picture: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token envelope returned by `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserProfile,
}
