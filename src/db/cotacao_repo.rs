// src/db/cotacao_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::cotacao::Cotacao};

#[derive(Clone)]
pub struct CotacaoRepository {
    pool: PgPool,
}

impl CotacaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        plano_id: Uuid,
        faixa_etaria: &str,
        preco: Decimal,
        nome: Option<&str>,
        email: Option<&str>,
        whatsapp: Option<&str>,
        expira_em: DateTime<Utc>,
    ) -> Result<Cotacao, AppError> {
        let cotacao = sqlx::query_as::<_, Cotacao>(
            r#"
            INSERT INTO cotacoes (plano_id, faixa_etaria, preco, nome, email, whatsapp, expira_em)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(plano_id)
        .bind(faixa_etaria)
        .bind(preco)
        .bind(nome)
        .bind(email)
        .bind(whatsapp)
        .bind(expira_em)
        .fetch_one(&self.pool)
        .await?;

        Ok(cotacao)
    }

    pub async fn find_by_token(&self, token: Uuid) -> Result<Option<Cotacao>, AppError> {
        let cotacao = sqlx::query_as::<_, Cotacao>("SELECT * FROM cotacoes WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        Ok(cotacao)
    }
}
