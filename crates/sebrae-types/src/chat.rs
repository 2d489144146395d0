//! Chat transcript and `/api/chat` wire types.
//!
//! The transcript is the ordered list of rendered turns shown to the user.
//! It is append-only during a session and cleared wholesale by the `/clear`
//! command, which re-seeds a single greeting entry. Entries always store the
//! raw markdown-lite content, never the formatted form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Role of a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(format!("invalid role: '{other}'")),
        }
    }
}

/// A single rendered chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    /// Raw markdown-lite content as received or typed, unformatted.
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    /// Capture an entry with the current time.
    pub fn now(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, append-only conversation history for one session.
///
/// Owned by the chat loop; never sent back to the server (only the single
/// newest user message travels per request).
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wipe the history and re-seed the given greeting as the only entry.
    pub fn reset_with_greeting(&mut self, greeting: impl Into<String>) {
        self.entries.clear();
        self.entries
            .push(TranscriptEntry::now(Role::Assistant, greeting));
    }
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub mensagem: String,
}

/// Response envelope from `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub resposta: String,
    #[serde(default)]
    pub consultores: Vec<Consultant>,
    #[serde(default)]
    pub documentos: Vec<String>,
    #[serde(default)]
    pub confianca: f64,
    #[serde(default)]
    pub fonte: String,
    #[serde(default)]
    pub usado_internet: bool,
}

/// A consultant contact attached to a chat answer.
///
/// Every field is optional; the server fills whatever its registry has.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Consultant {
    pub nome: Option<String>,
    pub razao_social: Option<String>,
    pub area_principal: Option<String>,
    pub subespecialidade: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert_eq!(Role::Assistant.to_string(), "assistant");
        assert!("system".parse::<Role>().is_err());
    }

    #[test]
    fn reset_with_greeting_leaves_exactly_one_assistant_entry() {
        let mut t = Transcript::new();
        t.push(TranscriptEntry::now(Role::User, "oi"));
        t.push(TranscriptEntry::now(Role::Assistant, "olá"));
        t.reset_with_greeting("bem-vindo");
        assert_eq!(t.len(), 1);
        assert_eq!(t.entries()[0].role, Role::Assistant);
        assert_eq!(t.entries()[0].content, "bem-vindo");
    }

    #[test]
    fn chat_response_tolerates_missing_optional_fields() {
        let json = r#"{"resposta": "ok", "fonte": "base_local", "usado_internet": false}"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.resposta, "ok");
        assert!(resp.consultores.is_empty());
        assert!(resp.documentos.is_empty());
        assert!(!resp.usado_internet);
    }

    #[test]
    fn consultant_deserializes_partial_record() {
        let json = r#"{"razao_social": "ACME Consultoria", "area_principal": "Marketing"}"#;
        let c: Consultant = serde_json::from_str(json).unwrap();
        assert!(c.nome.is_none());
        assert_eq!(c.razao_social.as_deref(), Some("ACME Consultoria"));
    }
}
