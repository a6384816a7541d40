// src/db/plano_repo.rs

use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::plano::{Plano, PlanoComPrecos, PrecoPlano, TabelaPrecos},
};

#[derive(Clone)]
pub struct PlanoRepository {
    pool: PgPool,
}

impl PlanoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PLANOS (fluxo público de cotação)
    // =========================================================================

    pub async fn create(
        &self,
        nome: &str,
        operadora: &str,
        tipo: &str,
    ) -> Result<Plano, AppError> {
        let plano = sqlx::query_as::<_, Plano>(
            "INSERT INTO planos (nome, operadora, tipo) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(nome)
        .bind(operadora)
        .bind(tipo)
        .fetch_one(&self.pool)
        .await?;

        Ok(plano)
    }

    pub async fn list(&self) -> Result<Vec<Plano>, AppError> {
        let planos = sqlx::query_as::<_, Plano>("SELECT * FROM planos ORDER BY nome ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(planos)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Plano>, AppError> {
        let plano = sqlx::query_as::<_, Plano>("SELECT * FROM planos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(plano)
    }

    // Vitrine pública: planos ativos com todas as faixas de preço
    pub async fn list_ativos_com_precos(&self) -> Result<Vec<PlanoComPrecos>, AppError> {
        let planos = sqlx::query_as::<_, Plano>(
            "SELECT * FROM planos WHERE ativo = TRUE ORDER BY nome ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut resultado = Vec::with_capacity(planos.len());
        for plano in planos {
            let precos = self.list_precos(plano.id).await?;
            resultado.push(PlanoComPrecos { plano, precos });
        }

        Ok(resultado)
    }

    pub async fn update(
        &self,
        id: Uuid,
        nome: Option<&str>,
        operadora: Option<&str>,
        tipo: Option<&str>,
    ) -> Result<Plano, AppError> {
        let plano = sqlx::query_as::<_, Plano>(
            r#"
            UPDATE planos
            SET nome = COALESCE($2, nome),
                operadora = COALESCE($3, operadora),
                tipo = COALESCE($4, tipo)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(operadora)
        .bind(tipo)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Plano não encontrado.".to_string()))?;

        Ok(plano)
    }

    pub async fn set_ativo(&self, id: Uuid, ativo: bool) -> Result<Plano, AppError> {
        let plano = sqlx::query_as::<_, Plano>(
            "UPDATE planos SET ativo = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(ativo)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Plano não encontrado.".to_string()))?;

        Ok(plano)
    }

    // As faixas de preço caem junto via ON DELETE CASCADE
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM planos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::RegistroEmUso(
                            "Plano referenciado por propostas não pode ser excluído.".to_string(),
                        );
                    }
                }
                AppError::DatabaseError(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Plano não encontrado.".to_string()));
        }

        Ok(())
    }

    // =========================================================================
    //  PREÇOS POR FAIXA ETÁRIA
    // =========================================================================

    pub async fn list_precos(&self, plano_id: Uuid) -> Result<Vec<PrecoPlano>, AppError> {
        let precos = sqlx::query_as::<_, PrecoPlano>(
            "SELECT * FROM precos_planos WHERE plano_id = $1 ORDER BY faixa_etaria ASC",
        )
        .bind(plano_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(precos)
    }

    pub async fn find_preco<'e, E>(
        &self,
        executor: E,
        plano_id: Uuid,
        faixa_etaria: &str,
    ) -> Result<Option<PrecoPlano>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let preco = sqlx::query_as::<_, PrecoPlano>(
            "SELECT * FROM precos_planos WHERE plano_id = $1 AND faixa_etaria = $2",
        )
        .bind(plano_id)
        .bind(faixa_etaria)
        .fetch_optional(executor)
        .await?;

        Ok(preco)
    }

    // Um preço por (plano, faixa): o UPSERT mantém o invariante sem
    // read-then-write
    pub async fn upsert_preco(
        &self,
        plano_id: Uuid,
        faixa_etaria: &str,
        preco: Decimal,
    ) -> Result<PrecoPlano, AppError> {
        let registro = sqlx::query_as::<_, PrecoPlano>(
            r#"
            INSERT INTO precos_planos (plano_id, faixa_etaria, preco)
            VALUES ($1, $2, $3)
            ON CONFLICT (plano_id, faixa_etaria) DO UPDATE SET preco = EXCLUDED.preco
            RETURNING *
            "#,
        )
        .bind(plano_id)
        .bind(faixa_etaria)
        .bind(preco)
        .fetch_one(&self.pool)
        .await?;

        Ok(registro)
    }

    pub async fn delete_preco(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM precos_planos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Faixa de preço não encontrada.".to_string()));
        }

        Ok(())
    }

    // =========================================================================
    //  TABELAS DE PREÇOS (referência administrativa)
    // =========================================================================

    pub async fn create_tabela(
        &self,
        nome: &str,
        operadora: &str,
        tipo: &str,
        faixas: &Value,
    ) -> Result<TabelaPrecos, AppError> {
        let tabela = sqlx::query_as::<_, TabelaPrecos>(
            r#"
            INSERT INTO tabelas_precos (nome, operadora, tipo, faixas)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(operadora)
        .bind(tipo)
        .bind(faixas)
        .fetch_one(&self.pool)
        .await?;

        Ok(tabela)
    }

    pub async fn list_tabelas(&self) -> Result<Vec<TabelaPrecos>, AppError> {
        let tabelas = sqlx::query_as::<_, TabelaPrecos>(
            "SELECT * FROM tabelas_precos ORDER BY operadora ASC, nome ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tabelas)
    }

    pub async fn update_tabela(
        &self,
        id: Uuid,
        nome: Option<&str>,
        operadora: Option<&str>,
        tipo: Option<&str>,
        faixas: Option<&Value>,
    ) -> Result<TabelaPrecos, AppError> {
        let tabela = sqlx::query_as::<_, TabelaPrecos>(
            r#"
            UPDATE tabelas_precos
            SET nome = COALESCE($2, nome),
                operadora = COALESCE($3, operadora),
                tipo = COALESCE($4, tipo),
                faixas = COALESCE($5, faixas),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(operadora)
        .bind(tipo)
        .bind(faixas)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Tabela de preços não encontrada.".to_string()))?;

        Ok(tabela)
    }

    pub async fn delete_tabela(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tabelas_precos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Tabela de preços não encontrada.".to_string()));
        }

        Ok(())
    }
}
