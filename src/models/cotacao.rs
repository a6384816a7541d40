// src/models/cotacao.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Sessão de cotação do site público: substitui o hand-off por armazenamento
// local do dispositivo. O token referencia a seleção entre as páginas do fluxo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cotacao {
    pub id: Uuid,
    pub token: Uuid,

    pub plano_id: Uuid,
    #[schema(example = "29-33")]
    pub faixa_etaria: String,
    // Preço resolvido na criação da sessão, não recalculado depois
    #[schema(example = "389.90")]
    pub preco: Decimal,

    pub nome: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,

    pub expira_em: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Cotacao {
    pub fn expirada(&self, agora: DateTime<Utc>) -> bool {
        agora >= self.expira_em
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    // Helper local: constrói uma sessão com a expiração desejada
    fn cotacao_expirando_em(expira_em: DateTime<Utc>) -> Cotacao {
        Cotacao {
            id: Uuid::new_v4(),
            token: Uuid::new_v4(),
            plano_id: Uuid::new_v4(),
            faixa_etaria: "29-33".to_string(),
            preco: Decimal::new(38990, 2),
            nome: None,
            email: None,
            whatsapp: None,
            expira_em,
            created_at: expira_em - Duration::hours(24),
        }
    }

    #[test]
    fn sessao_dentro_do_prazo_nao_expira() {
        let agora = Utc::now();
        let cotacao = cotacao_expirando_em(agora + Duration::hours(1));
        assert!(!cotacao.expirada(agora));
    }

    #[test]
    fn sessao_vencida_expira() {
        let agora = Utc::now();
        let cotacao = cotacao_expirando_em(agora - Duration::seconds(1));
        assert!(cotacao.expirada(agora));
    }

    #[test]
    fn expiracao_no_instante_exato_conta_como_expirada() {
        let agora = Utc::now();
        let cotacao = cotacao_expirando_em(agora);
        assert!(cotacao.expirada(agora));
    }
}
