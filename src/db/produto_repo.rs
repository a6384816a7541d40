// src/db/produto_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::produto::Produto};

#[derive(Clone)]
pub struct ProdutoRepository {
    pool: PgPool,
}

impl ProdutoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        nome: &str,
        operadora: &str,
        tipo: &str,
        comissao: Decimal,
        disponivel: bool,
    ) -> Result<Produto, AppError> {
        let produto = sqlx::query_as::<_, Produto>(
            r#"
            INSERT INTO produtos_corretores (nome, operadora, tipo, comissao, disponivel)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(operadora)
        .bind(tipo)
        .bind(comissao)
        .bind(disponivel)
        .fetch_one(&self.pool)
        .await?;

        Ok(produto)
    }

    pub async fn list(&self) -> Result<Vec<Produto>, AppError> {
        let produtos =
            sqlx::query_as::<_, Produto>("SELECT * FROM produtos_corretores ORDER BY nome ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(produtos)
    }

    // Visão do corretor: apenas o que está liberado para venda
    pub async fn list_disponiveis(&self) -> Result<Vec<Produto>, AppError> {
        let produtos = sqlx::query_as::<_, Produto>(
            "SELECT * FROM produtos_corretores WHERE disponivel = TRUE ORDER BY nome ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(produtos)
    }

    // Usado dentro da transação de submissão de proposta
    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Produto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let produto =
            sqlx::query_as::<_, Produto>("SELECT * FROM produtos_corretores WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(produto)
    }

    pub async fn update(
        &self,
        id: Uuid,
        nome: Option<&str>,
        operadora: Option<&str>,
        tipo: Option<&str>,
        comissao: Option<Decimal>,
    ) -> Result<Produto, AppError> {
        let produto = sqlx::query_as::<_, Produto>(
            r#"
            UPDATE produtos_corretores
            SET nome = COALESCE($2, nome),
                operadora = COALESCE($3, operadora),
                tipo = COALESCE($4, tipo),
                comissao = COALESCE($5, comissao),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(operadora)
        .bind(tipo)
        .bind(comissao)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Produto não encontrado.".to_string()))?;

        Ok(produto)
    }

    pub async fn set_disponibilidade(
        &self,
        id: Uuid,
        disponivel: bool,
    ) -> Result<Produto, AppError> {
        let produto = sqlx::query_as::<_, Produto>(
            r#"
            UPDATE produtos_corretores
            SET disponivel = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(disponivel)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Produto não encontrado.".to_string()))?;

        Ok(produto)
    }

    // Produtos referenciados por propostas não podem sumir do histórico
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM produtos_corretores WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::RegistroEmUso(
                            "Produto referenciado por propostas não pode ser excluído."
                                .to_string(),
                        );
                    }
                }
                AppError::DatabaseError(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Produto não encontrado.".to_string()));
        }

        Ok(())
    }
}
