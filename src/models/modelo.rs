// src/models/modelo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Modelo de proposta: arquivo enviado pelo admin e baixado pelos corretores
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModeloProposta {
    pub id: Uuid,

    #[schema(example = "Proposta padrão Amil PME")]
    pub nome: String,
    pub descricao: Option<String>,

    #[schema(example = "http://localhost:3000/api/arquivos/arquivos/...")]
    pub url: String,

    pub ativo: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
