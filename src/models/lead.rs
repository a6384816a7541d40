// src/models/lead.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Progresso livre: o admin pode mover o lead para qualquer status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "lead_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Novo,
    EmContato,
    Convertido,
    Perdido,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,

    #[schema(example = "Ana Souza")]
    pub nome: String,
    #[schema(example = "ana@email.com")]
    pub email: String,
    #[schema(example = "21977776666")]
    pub whatsapp: String,

    pub plano_id: Option<Uuid>,
    #[schema(example = "29-33")]
    pub faixa_etaria: Option<String>,
    #[schema(example = "RJ")]
    pub estado: Option<String>,

    pub status: LeadStatus,
    pub data_registro: DateTime<Utc>,
}
