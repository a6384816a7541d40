// src/db/comissao_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::comissao::{Comissao, ComissaoStatus},
};

#[derive(Clone)]
pub struct ComissaoRepository {
    pool: PgPool,
}

impl ComissaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Recebe o executor: na aprovação de proposta a comissão nasce dentro da
    // mesma transação que muda o status.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        corretor_id: Uuid,
        proposta_id: Option<Uuid>,
        descricao: &str,
        valor: Decimal,
        percentual: Option<Decimal>,
        data_prevista: NaiveDate,
    ) -> Result<Comissao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let comissao = sqlx::query_as::<_, Comissao>(
            r#"
            INSERT INTO comissoes (
                corretor_id, proposta_id, descricao, valor, percentual, data_prevista
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(corretor_id)
        .bind(proposta_id)
        .bind(descricao)
        .bind(valor)
        .bind(percentual)
        .bind(data_prevista)
        .fetch_one(executor)
        .await?;

        Ok(comissao)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Comissao>, AppError> {
        let comissao = sqlx::query_as::<_, Comissao>("SELECT * FROM comissoes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(comissao)
    }

    // Listagem geral (admin) ou recortada por corretor (painel do corretor)
    pub async fn list(
        &self,
        corretor_id: Option<Uuid>,
        status: Option<ComissaoStatus>,
        busca: Option<&str>,
    ) -> Result<Vec<Comissao>, AppError> {
        let termo = busca.map(|b| format!("%{}%", b));

        let comissoes = sqlx::query_as::<_, Comissao>(
            r#"
            SELECT * FROM comissoes
            WHERE ($1::uuid IS NULL OR corretor_id = $1)
              AND ($2::comissao_status IS NULL OR status = $2)
              AND ($3::text IS NULL OR descricao ILIKE $3)
            ORDER BY data_prevista DESC, created_at DESC
            "#,
        )
        .bind(corretor_id)
        .bind(status)
        .bind(termo)
        .fetch_all(&self.pool)
        .await?;

        Ok(comissoes)
    }

    // pendente -> pago, sem volta: UPDATE condicional, None se já estava paga
    pub async fn marcar_paga(
        &self,
        id: Uuid,
        data_pagamento: NaiveDate,
    ) -> Result<Option<Comissao>, AppError> {
        let comissao = sqlx::query_as::<_, Comissao>(
            r#"
            UPDATE comissoes
            SET status = 'pago', data_pagamento = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pendente'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data_pagamento)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comissao)
    }
}
