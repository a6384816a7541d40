// src/db/proposta_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::proposta::{
        DocumentoProposta, DocumentoTipo, PropostaCorretor, PropostaCorretorComNome,
        PropostaDireta, PropostaStatus,
    },
};

#[derive(Clone)]
pub struct PropostaRepository {
    pool: PgPool,
}

impl PropostaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CANAL CORRETOR
    // =========================================================================

    // Cria a proposta dentro da transação de submissão (junto com os
    // documentos)
    pub async fn create<'e, E>(
        &self,
        executor: E,
        corretor_id: Uuid,
        cliente: &str,
        email_cliente: &str,
        whatsapp_cliente: &str,
        produto_id: Uuid,
        produto_nome: &str,
        valor: Decimal,
        comissao: Decimal,
    ) -> Result<PropostaCorretor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let proposta = sqlx::query_as::<_, PropostaCorretor>(
            r#"
            INSERT INTO propostas_corretores (
                corretor_id, cliente, email_cliente, whatsapp_cliente,
                produto_id, produto_nome, valor, comissao
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(corretor_id)
        .bind(cliente)
        .bind(email_cliente)
        .bind(whatsapp_cliente)
        .bind(produto_id)
        .bind(produto_nome)
        .bind(valor)
        .bind(comissao)
        .fetch_one(executor)
        .await?;

        Ok(proposta)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PropostaCorretor>, AppError> {
        let proposta =
            sqlx::query_as::<_, PropostaCorretor>("SELECT * FROM propostas_corretores WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(proposta)
    }

    // Painel do corretor: só as próprias propostas, mais recentes primeiro
    pub async fn list_by_corretor(
        &self,
        corretor_id: Uuid,
        status: Option<PropostaStatus>,
        busca: Option<&str>,
    ) -> Result<Vec<PropostaCorretor>, AppError> {
        let termo = busca.map(|b| format!("%{}%", b));

        let propostas = sqlx::query_as::<_, PropostaCorretor>(
            r#"
            SELECT * FROM propostas_corretores
            WHERE corretor_id = $1
              AND ($2::proposta_status IS NULL OR status = $2)
              AND ($3::text IS NULL OR cliente ILIKE $3 OR produto_nome ILIKE $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(corretor_id)
        .bind(status)
        .bind(termo)
        .fetch_all(&self.pool)
        .await?;

        Ok(propostas)
    }

    // Painel administrativo: todas as propostas com o nome do corretor.
    // A busca cobre cliente, produto e corretor (substring, sem case).
    pub async fn list_admin(
        &self,
        status: Option<PropostaStatus>,
        busca: Option<&str>,
    ) -> Result<Vec<PropostaCorretorComNome>, AppError> {
        let termo = busca.map(|b| format!("%{}%", b));

        let propostas = sqlx::query_as::<_, PropostaCorretorComNome>(
            r#"
            SELECT
                p.id, p.corretor_id, c.nome AS corretor_nome,
                p.cliente, p.email_cliente, p.whatsapp_cliente,
                p.produto_id, p.produto_nome, p.valor, p.comissao,
                p.status, p.motivo_rejeicao, p.created_at, p.updated_at
            FROM propostas_corretores p
            INNER JOIN corretores c ON c.id = p.corretor_id
            WHERE ($1::proposta_status IS NULL OR p.status = $1)
              AND (
                $2::text IS NULL
                OR p.cliente ILIKE $2
                OR p.produto_nome ILIKE $2
                OR c.nome ILIKE $2
              )
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(status)
        .bind(termo)
        .fetch_all(&self.pool)
        .await?;

        Ok(propostas)
    }

    // A transição é um UPDATE condicional: só sai de 'pendente'. Se outra
    // requisição chegou antes, nenhuma linha é afetada e retornamos None.
    pub async fn transicionar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        novo_status: PropostaStatus,
        motivo_rejeicao: Option<&str>,
    ) -> Result<Option<PropostaCorretor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let proposta = sqlx::query_as::<_, PropostaCorretor>(
            r#"
            UPDATE propostas_corretores
            SET status = $2, motivo_rejeicao = $3, updated_at = NOW()
            WHERE id = $1 AND status = 'pendente'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(novo_status)
        .bind(motivo_rejeicao)
        .fetch_optional(executor)
        .await?;

        Ok(proposta)
    }

    // =========================================================================
    //  DOCUMENTOS (write-once)
    // =========================================================================

    pub async fn insert_documento<'e, E>(
        &self,
        executor: E,
        proposta_id: Uuid,
        nome: &str,
        url: &str,
        tipo: DocumentoTipo,
    ) -> Result<DocumentoProposta, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let documento = sqlx::query_as::<_, DocumentoProposta>(
            r#"
            INSERT INTO documentos_propostas_corretores (proposta_id, nome, url, tipo)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(proposta_id)
        .bind(nome)
        .bind(url)
        .bind(tipo)
        .fetch_one(executor)
        .await?;

        Ok(documento)
    }

    pub async fn list_documentos(
        &self,
        proposta_id: Uuid,
    ) -> Result<Vec<DocumentoProposta>, AppError> {
        let documentos = sqlx::query_as::<_, DocumentoProposta>(
            r#"
            SELECT * FROM documentos_propostas_corretores
            WHERE proposta_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(proposta_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documentos)
    }

    pub async fn find_documento(
        &self,
        id: Uuid,
    ) -> Result<Option<DocumentoProposta>, AppError> {
        let documento = sqlx::query_as::<_, DocumentoProposta>(
            "SELECT * FROM documentos_propostas_corretores WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(documento)
    }

    // =========================================================================
    //  CANAL DIRETO (site público)
    // =========================================================================

    pub async fn create_direta(
        &self,
        nome_cliente: &str,
        email_cliente: Option<&str>,
        whatsapp_cliente: Option<&str>,
        plano_id: Uuid,
        valor: Decimal,
    ) -> Result<PropostaDireta, AppError> {
        let proposta = sqlx::query_as::<_, PropostaDireta>(
            r#"
            INSERT INTO propostas (nome_cliente, email_cliente, whatsapp_cliente, plano_id, valor)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(nome_cliente)
        .bind(email_cliente)
        .bind(whatsapp_cliente)
        .bind(plano_id)
        .bind(valor)
        .fetch_one(&self.pool)
        .await?;

        Ok(proposta)
    }

    pub async fn list_diretas(
        &self,
        status: Option<PropostaStatus>,
        busca: Option<&str>,
    ) -> Result<Vec<PropostaDireta>, AppError> {
        let termo = busca.map(|b| format!("%{}%", b));

        let propostas = sqlx::query_as::<_, PropostaDireta>(
            r#"
            SELECT * FROM propostas
            WHERE ($1::proposta_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR nome_cliente ILIKE $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .bind(termo)
        .fetch_all(&self.pool)
        .await?;

        Ok(propostas)
    }

    pub async fn find_direta_by_id(&self, id: Uuid) -> Result<Option<PropostaDireta>, AppError> {
        let proposta = sqlx::query_as::<_, PropostaDireta>("SELECT * FROM propostas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(proposta)
    }

    // Mesma regra de transição do canal corretor
    pub async fn transicionar_direta(
        &self,
        id: Uuid,
        novo_status: PropostaStatus,
        motivo_rejeicao: Option<&str>,
    ) -> Result<Option<PropostaDireta>, AppError> {
        let proposta = sqlx::query_as::<_, PropostaDireta>(
            r#"
            UPDATE propostas
            SET status = $2, motivo_rejeicao = $3, updated_at = NOW()
            WHERE id = $1 AND status = 'pendente'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(novo_status)
        .bind(motivo_rejeicao)
        .fetch_optional(&self.pool)
        .await?;

        Ok(proposta)
    }
}
