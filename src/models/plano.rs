// src/models/plano.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Plano exibido no fluxo público de cotação
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plano {
    pub id: Uuid,

    #[schema(example = "Essencial Ambulatorial")]
    pub nome: String,
    #[schema(example = "Unimed")]
    pub operadora: String,
    #[schema(example = "Individual")]
    pub tipo: String,

    pub ativo: bool,
    pub created_at: DateTime<Utc>,
}

// Um preço por (plano, faixa etária) — a unicidade é garantida pelo banco
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrecoPlano {
    pub id: Uuid,
    pub plano_id: Uuid,

    #[schema(example = "29-33")]
    pub faixa_etaria: String,
    #[schema(example = "389.90")]
    pub preco: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanoComPrecos {
    #[serde(flatten)]
    pub plano: Plano,
    pub precos: Vec<PrecoPlano>,
}

// Tabela de preços de referência mantida pelo admin.
// As faixas ficam em JSONB: o formato vem pronto das operadoras.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TabelaPrecos {
    pub id: Uuid,

    #[schema(example = "Unimed PME 2025")]
    pub nome: String,
    #[schema(example = "Unimed")]
    pub operadora: String,
    #[schema(example = "PME")]
    pub tipo: String,

    #[schema(example = json!([{"faixaEtaria": "0-18", "preco": "210.00"}]))]
    pub faixas: Value,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Item de faixa usado nos payloads de tabela de preços
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaixaPreco {
    #[schema(example = "0-18")]
    pub faixa_etaria: String,
    #[schema(example = "210.00")]
    pub preco: Decimal,
}
