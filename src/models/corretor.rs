// src/models/corretor.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "corretor_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CorretorStatus {
    Pendente,
    Aprovado,
    Rejeitado,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Corretor {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "Carlos Andrade")]
    pub nome: String,

    #[schema(example = "carlos@corretora.com.br")]
    pub email: String,

    #[schema(example = "11988887777")]
    pub whatsapp: String,

    #[schema(example = "SP")]
    pub estado: String,

    // Enquanto 'pendente', o corretor não acessa o painel
    pub status: CorretorStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
