// src/models/produto.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Produto ofertado aos corretores (canal corretor)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: Uuid,

    #[schema(example = "Amil 400")]
    pub nome: String,

    #[schema(example = "Amil")]
    pub operadora: String,

    #[schema(example = "Coletivo por adesão")]
    pub tipo: String,

    // Percentual repassado ao corretor na venda
    #[schema(example = "3.50")]
    pub comissao: Decimal,

    // Controla a visibilidade do produto para os corretores
    #[schema(example = true)]
    pub disponivel: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
