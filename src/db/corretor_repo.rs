// src/db/corretor_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::corretor::{Corretor, CorretorStatus},
};

#[derive(Clone)]
pub struct CorretorRepository {
    pool: PgPool,
}

impl CorretorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Cria a ficha do corretor dentro da transação de cadastro
    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        nome: &str,
        email: &str,
        whatsapp: &str,
        estado: &str,
    ) -> Result<Corretor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Corretor>(
            r#"
            INSERT INTO corretores (user_id, nome, email, whatsapp, estado)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(nome)
        .bind(email)
        .bind(whatsapp)
        .bind(estado)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Corretor>, AppError> {
        let corretor = sqlx::query_as::<_, Corretor>("SELECT * FROM corretores WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(corretor)
    }

    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Corretor>, AppError> {
        let corretor =
            sqlx::query_as::<_, Corretor>("SELECT * FROM corretores WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(corretor)
    }

    // Listagem administrativa: filtro exato de status + busca por nome/e-mail.
    // Status None (o literal "todos" do front) devolve todos os registros.
    pub async fn list(
        &self,
        status: Option<CorretorStatus>,
        busca: Option<&str>,
    ) -> Result<Vec<Corretor>, AppError> {
        let termo = busca.map(|b| format!("%{}%", b));

        let corretores = sqlx::query_as::<_, Corretor>(
            r#"
            SELECT * FROM corretores
            WHERE ($1::corretor_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR nome ILIKE $2 OR email ILIKE $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .bind(termo)
        .fetch_all(&self.pool)
        .await?;

        Ok(corretores)
    }

    // Atualização parcial dos dados cadastrais (COALESCE mantém o que vier nulo)
    pub async fn update(
        &self,
        id: Uuid,
        nome: Option<&str>,
        whatsapp: Option<&str>,
        estado: Option<&str>,
    ) -> Result<Corretor, AppError> {
        let corretor = sqlx::query_as::<_, Corretor>(
            r#"
            UPDATE corretores
            SET nome = COALESCE($2, nome),
                whatsapp = COALESCE($3, whatsapp),
                estado = COALESCE($4, estado),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(whatsapp)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Corretor não encontrado.".to_string()))?;

        Ok(corretor)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: CorretorStatus,
    ) -> Result<Corretor, AppError> {
        let corretor = sqlx::query_as::<_, Corretor>(
            "UPDATE corretores SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Corretor não encontrado.".to_string()))?;

        Ok(corretor)
    }

    // Exclusão com política explícita: recusa se o corretor ainda tem
    // propostas ou comissões (registros de dinheiro não ficam órfãos).
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let (em_uso,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (SELECT 1 FROM propostas_corretores WHERE corretor_id = $1)
                OR EXISTS (SELECT 1 FROM comissoes WHERE corretor_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if em_uso {
            return Err(AppError::RegistroEmUso(
                "Corretor possui propostas ou comissões e não pode ser excluído.".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM corretores WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Corretor não encontrado.".to_string()));
        }

        tx.commit().await?;
        Ok(())
    }
}
