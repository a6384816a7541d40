// src/models/comissao.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "comissao_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ComissaoStatus {
    Pendente,
    Pago,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comissao {
    pub id: Uuid,
    pub corretor_id: Uuid,

    // Presente quando gerada na aprovação de uma proposta
    pub proposta_id: Option<Uuid>,

    #[schema(example = "Comissão - Maria Silva (Amil 400)")]
    pub descricao: String,

    #[schema(example = "450.00")]
    pub valor: Decimal,

    #[schema(example = "3.50")]
    pub percentual: Option<Decimal>,

    // pendente -> pago, sem volta
    pub status: ComissaoStatus,

    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub data_prevista: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2024-06-05")]
    pub data_pagamento: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Agregado exibido nos painéis (admin e corretor)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoComissoes {
    #[schema(example = "1250.00")]
    pub total_pendente: Decimal,
    #[schema(example = "830.00")]
    pub total_pago: Decimal,
    // Chave "YYYY-MM" da data prevista; BTreeMap mantém a ordem cronológica
    pub por_mes: BTreeMap<String, Decimal>,
}
