// src/models/proposta.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "proposta_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PropostaStatus {
    Pendente,
    Aprovada,
    Rejeitada,
}

impl PropostaStatus {
    // Aprovada/rejeitada são estados finais: nenhuma proposta volta a pendente
    pub fn eh_final(&self) -> bool {
        matches!(self, PropostaStatus::Aprovada | PropostaStatus::Rejeitada)
    }

    pub fn pode_virar(&self, novo: PropostaStatus) -> bool {
        *self == PropostaStatus::Pendente && novo.eh_final()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "documento_tipo", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentoTipo {
    RgFrente,
    RgVerso,
    ComprovanteResidencia,
    Proposta,
}

impl DocumentoTipo {
    // Os três slots exigidos antes de qualquer gravação no banco
    pub const OBRIGATORIOS: [DocumentoTipo; 3] = [
        DocumentoTipo::RgFrente,
        DocumentoTipo::RgVerso,
        DocumentoTipo::ComprovanteResidencia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentoTipo::RgFrente => "rg_frente",
            DocumentoTipo::RgVerso => "rg_verso",
            DocumentoTipo::ComprovanteResidencia => "comprovante_residencia",
            DocumentoTipo::Proposta => "proposta",
        }
    }

    pub fn from_field_name(name: &str) -> Option<DocumentoTipo> {
        match name {
            "rg_frente" => Some(DocumentoTipo::RgFrente),
            "rg_verso" => Some(DocumentoTipo::RgVerso),
            "comprovante_residencia" => Some(DocumentoTipo::ComprovanteResidencia),
            "proposta" => Some(DocumentoTipo::Proposta),
            _ => None,
        }
    }
}

// --- CANAL CORRETOR ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropostaCorretor {
    pub id: Uuid,
    pub corretor_id: Uuid,

    #[schema(example = "Maria Silva")]
    pub cliente: String,
    #[schema(example = "maria@email.com")]
    pub email_cliente: String,
    #[schema(example = "11999990000")]
    pub whatsapp_cliente: String,

    pub produto_id: Uuid,
    // Nome denormalizado para listagem e busca sem JOIN
    #[schema(example = "Amil 400")]
    pub produto_nome: String,

    #[schema(example = "389.90")]
    pub valor: Decimal,
    // Percentual congelado no momento da submissão
    #[schema(example = "3.50")]
    pub comissao: Decimal,

    pub status: PropostaStatus,
    pub motivo_rejeicao: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha da listagem administrativa (inclui o nome do corretor via JOIN)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropostaCorretorComNome {
    pub id: Uuid,
    pub corretor_id: Uuid,
    pub corretor_nome: String,
    pub cliente: String,
    pub email_cliente: String,
    pub whatsapp_cliente: String,
    pub produto_id: Uuid,
    pub produto_nome: String,
    pub valor: Decimal,
    pub comissao: Decimal,
    pub status: PropostaStatus,
    pub motivo_rejeicao: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Documento anexado: gravado uma única vez, nunca editado
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentoProposta {
    pub id: Uuid,
    pub proposta_id: Uuid,

    #[schema(example = "rg_frente.jpg")]
    pub nome: String,
    #[schema(example = "http://localhost:3000/api/arquivos/documentos_propostas/...")]
    pub url: String,

    pub tipo: DocumentoTipo,
    pub created_at: DateTime<Utc>,
}

// --- CANAL DIRETO (site público, sem corretor) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropostaDireta {
    pub id: Uuid,

    #[schema(example = "João Pereira")]
    pub nome_cliente: String,
    pub email_cliente: Option<String>,
    pub whatsapp_cliente: Option<String>,

    pub plano_id: Uuid,
    #[schema(example = "412.75")]
    pub valor: Decimal,

    pub status: PropostaStatus,
    pub motivo_rejeicao: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pendente_transiciona_para_estados_finais() {
        assert!(PropostaStatus::Pendente.pode_virar(PropostaStatus::Aprovada));
        assert!(PropostaStatus::Pendente.pode_virar(PropostaStatus::Rejeitada));
    }

    #[test]
    fn estados_finais_nunca_regridem() {
        assert!(!PropostaStatus::Aprovada.pode_virar(PropostaStatus::Pendente));
        assert!(!PropostaStatus::Aprovada.pode_virar(PropostaStatus::Rejeitada));
        assert!(!PropostaStatus::Rejeitada.pode_virar(PropostaStatus::Pendente));
        assert!(!PropostaStatus::Rejeitada.pode_virar(PropostaStatus::Aprovada));
    }

    #[test]
    fn pendente_nao_transiciona_para_pendente() {
        assert!(!PropostaStatus::Pendente.pode_virar(PropostaStatus::Pendente));
    }

    #[test]
    fn tipos_de_documento_mapeiam_campos_do_formulario() {
        assert_eq!(
            DocumentoTipo::from_field_name("rg_frente"),
            Some(DocumentoTipo::RgFrente)
        );
        assert_eq!(
            DocumentoTipo::from_field_name("comprovante_residencia"),
            Some(DocumentoTipo::ComprovanteResidencia)
        );
        assert_eq!(DocumentoTipo::from_field_name("selfie"), None);
        for tipo in DocumentoTipo::OBRIGATORIOS {
            assert_eq!(DocumentoTipo::from_field_name(tipo.as_str()), Some(tipo));
        }
    }
}
