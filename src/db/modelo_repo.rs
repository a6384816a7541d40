// src/db/modelo_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::modelo::ModeloProposta};

#[derive(Clone)]
pub struct ModeloRepository {
    pool: PgPool,
}

impl ModeloRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        nome: &str,
        descricao: Option<&str>,
        url: &str,
    ) -> Result<ModeloProposta, AppError> {
        let modelo = sqlx::query_as::<_, ModeloProposta>(
            r#"
            INSERT INTO modelos_propostas (nome, descricao, url)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(descricao)
        .bind(url)
        .fetch_one(&self.pool)
        .await?;

        Ok(modelo)
    }

    pub async fn list(&self) -> Result<Vec<ModeloProposta>, AppError> {
        let modelos = sqlx::query_as::<_, ModeloProposta>(
            "SELECT * FROM modelos_propostas ORDER BY nome ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(modelos)
    }

    // Visão do corretor: apenas modelos ativos
    pub async fn list_ativos(&self) -> Result<Vec<ModeloProposta>, AppError> {
        let modelos = sqlx::query_as::<_, ModeloProposta>(
            "SELECT * FROM modelos_propostas WHERE ativo = TRUE ORDER BY nome ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(modelos)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ModeloProposta>, AppError> {
        let modelo =
            sqlx::query_as::<_, ModeloProposta>("SELECT * FROM modelos_propostas WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(modelo)
    }

    pub async fn update(
        &self,
        id: Uuid,
        nome: Option<&str>,
        descricao: Option<&str>,
        url: Option<&str>,
    ) -> Result<ModeloProposta, AppError> {
        let modelo = sqlx::query_as::<_, ModeloProposta>(
            r#"
            UPDATE modelos_propostas
            SET nome = COALESCE($2, nome),
                descricao = COALESCE($3, descricao),
                url = COALESCE($4, url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(descricao)
        .bind(url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Modelo de proposta não encontrado.".to_string()))?;

        Ok(modelo)
    }

    pub async fn set_ativo(&self, id: Uuid, ativo: bool) -> Result<ModeloProposta, AppError> {
        let modelo = sqlx::query_as::<_, ModeloProposta>(
            "UPDATE modelos_propostas SET ativo = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(ativo)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Modelo de proposta não encontrado.".to_string()))?;

        Ok(modelo)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM modelos_propostas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Modelo de proposta não encontrado.".to_string()));
        }

        Ok(())
    }
}
