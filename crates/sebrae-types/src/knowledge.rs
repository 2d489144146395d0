//! System status, metrics, and knowledge-base administration wire types.

use serde::Deserialize;

/// `GET /api/status` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatus {
    pub status: String,
    #[serde(default)]
    pub documentos_carregados: u64,
    #[serde(default)]
    pub documentos_em_memoria: bool,
    #[serde(default)]
    pub consultores_disponiveis: u64,
    #[serde(default)]
    pub modelo: String,
}

impl SystemStatus {
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}

/// `GET /api/metricas` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Metrics {
    pub documentos_carregados: u64,
    pub consultores_disponiveis: u64,
    pub consultas_hoje: u64,
    #[serde(default)]
    pub sessoes_ativas: u64,
}

/// One processed file in the knowledge-base statistics.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessedFile {
    pub caminho: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub chunks: u64,
}

impl ProcessedFile {
    /// Final path component, for display.
    pub fn file_name(&self) -> &str {
        self.caminho.rsplit('/').next().unwrap_or(&self.caminho)
    }
}

/// `GET /api/base/estatisticas` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct BaseStats {
    #[serde(default)]
    pub total_chunks: u64,
    #[serde(default)]
    pub total_arquivos: u64,
    /// ISO timestamp, or "N/A" when the base was never updated.
    #[serde(default)]
    pub ultima_atualizacao: String,
    #[serde(default)]
    pub arquivos: Vec<ProcessedFile>,
}

/// A successfully processed item in a directory-processing report.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessedItem {
    pub arquivo: String,
    #[serde(default)]
    pub chunks: u64,
}

/// A failed item in a directory-processing report.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessFailure {
    pub arquivo: String,
    pub erro: String,
}

/// Per-file breakdown of a directory-processing run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessDetails {
    #[serde(default)]
    pub processados: Vec<ProcessedItem>,
    #[serde(default)]
    pub erros: Vec<ProcessFailure>,
}

/// `POST /api/base/processar-diretorio` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessReport {
    pub mensagem: String,
    #[serde(default)]
    pub novos_processados: u64,
    #[serde(default)]
    pub pulados: u64,
    #[serde(default)]
    pub erros: u64,
    #[serde(default)]
    pub detalhes: ProcessDetails,
}

/// `DELETE /api/base/limpar` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct WipeReport {
    #[serde(default)]
    pub mensagem: String,
}

/// `POST /api/upload` envelope.
///
/// The server answers in one of two shapes depending on its version: an
/// incremental summary with new/skipped counts, or a plain message.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UploadReport {
    Incremental {
        total_novos: u64,
        #[serde(default)]
        total_pulados: u64,
    },
    Message {
        mensagem: String,
    },
}
