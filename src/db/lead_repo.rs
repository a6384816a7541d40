// src/db/lead_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::lead::{Lead, LeadStatus},
};

#[derive(Clone)]
pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        nome: &str,
        email: &str,
        whatsapp: &str,
        plano_id: Option<Uuid>,
        faixa_etaria: Option<&str>,
        estado: Option<&str>,
    ) -> Result<Lead, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (nome, email, whatsapp, plano_id, faixa_etaria, estado)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(email)
        .bind(whatsapp)
        .bind(plano_id)
        .bind(faixa_etaria)
        .bind(estado)
        .fetch_one(&self.pool)
        .await?;

        Ok(lead)
    }

    // Filtro exato de status + busca textual, mais recentes primeiro
    pub async fn list(
        &self,
        status: Option<LeadStatus>,
        busca: Option<&str>,
    ) -> Result<Vec<Lead>, AppError> {
        let termo = busca.map(|b| format!("%{}%", b));

        let leads = sqlx::query_as::<_, Lead>(
            r#"
            SELECT * FROM leads
            WHERE ($1::lead_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR nome ILIKE $2 OR email ILIKE $2 OR whatsapp ILIKE $2)
            ORDER BY data_registro DESC
            "#,
        )
        .bind(status)
        .bind(termo)
        .fetch_all(&self.pool)
        .await?;

        Ok(leads)
    }

    // O progresso do lead é livre: qualquer status pode virar qualquer outro
    pub async fn set_status(&self, id: Uuid, status: LeadStatus) -> Result<Lead, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            "UPDATE leads SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Lead não encontrado.".to_string()))?;

        Ok(lead)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Lead não encontrado.".to_string()));
        }

        Ok(())
    }
}
