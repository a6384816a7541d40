// src/services/proposta_service.rs

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ComissaoRepository, PropostaRepository, ProdutoRepository},
    models::proposta::{
        DocumentoProposta, DocumentoTipo, PropostaCorretor, PropostaDireta, PropostaStatus,
    },
    services::storage::{self, StorageService, BUCKET_DOCUMENTOS},
};

// Dias entre a aprovação e a previsão de pagamento da comissão
const PRAZO_COMISSAO_DIAS: i64 = 30;

// Arquivo recebido no formulário de submissão, já associado a um slot
pub struct DocumentoUpload {
    pub tipo: DocumentoTipo,
    pub nome_original: String,
    pub dados: Vec<u8>,
}

#[derive(Clone)]
pub struct PropostaService {
    repo: PropostaRepository,
    produto_repo: ProdutoRepository,
    comissao_repo: ComissaoRepository,
    storage: StorageService,
    pool: PgPool,
}

impl PropostaService {
    pub fn new(
        repo: PropostaRepository,
        produto_repo: ProdutoRepository,
        comissao_repo: ComissaoRepository,
        storage: StorageService,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            produto_repo,
            comissao_repo,
            storage,
            pool,
        }
    }

    // =========================================================================
    //  SUBMISSÃO (canal corretor)
    // =========================================================================

    // Submete a proposta com os documentos em uma única transação: ou tudo
    // entra (proposta + N documentos), ou nada entra. Um upload que falhe no
    // meio desfaz a proposta em vez de deixá-la incompleta.
    pub async fn submeter(
        &self,
        corretor_id: Uuid,
        cliente: &str,
        email_cliente: &str,
        whatsapp_cliente: &str,
        produto_id: Uuid,
        valor: Decimal,
        documentos: Vec<DocumentoUpload>,
    ) -> Result<(PropostaCorretor, Vec<DocumentoProposta>), AppError> {
        // O gate roda antes de qualquer gravação: sem os três slots
        // obrigatórios, nenhuma chamada de persistência acontece.
        validar_slots_obrigatorios(&documentos)?;

        if valor <= Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "O valor da proposta deve ser positivo.".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let produto = self
            .produto_repo
            .find_by_id(&mut *tx, produto_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Produto não encontrado.".to_string()))?;

        if !produto.disponivel {
            return Err(AppError::ProdutoIndisponivel);
        }

        let proposta = self
            .repo
            .create(
                &mut *tx,
                corretor_id,
                cliente,
                email_cliente,
                whatsapp_cliente,
                produto.id,
                &produto.nome,
                valor,
                produto.comissao,
            )
            .await?;

        // Upload + registro de cada documento, namespaced pelo id da proposta.
        // Se a gravação de um arquivo falhar, o `?` aborta e o rollback da
        // transação desfaz a proposta (arquivos órfãos no disco são tolerados).
        let mut registros = Vec::with_capacity(documentos.len());
        for doc in &documentos {
            let chave = format!(
                "{}/{}-{}",
                proposta.id,
                doc.tipo.as_str(),
                storage::nome_unico(&doc.nome_original)
            );

            let url = self
                .storage
                .save(BUCKET_DOCUMENTOS, &chave, &doc.dados)
                .await?;

            let registro = self
                .repo
                .insert_documento(&mut *tx, proposta.id, &doc.nome_original, &url, doc.tipo)
                .await?;

            registros.push(registro);
        }

        tx.commit().await?;

        tracing::info!(
            "📋 Proposta {} submetida pelo corretor {} com {} documentos",
            proposta.id,
            corretor_id,
            registros.len()
        );

        Ok((proposta, registros))
    }

    // =========================================================================
    //  TRANSIÇÕES (canal corretor)
    // =========================================================================

    // Aprova a proposta e gera a comissão do corretor na mesma transação.
    // O UPDATE condicional garante que só uma aprovação/rejeição vence.
    pub async fn aprovar(&self, proposta_id: Uuid) -> Result<PropostaCorretor, AppError> {
        let mut tx = self.pool.begin().await?;

        let proposta = match self
            .repo
            .transicionar(&mut *tx, proposta_id, PropostaStatus::Aprovada, None)
            .await?
        {
            Some(p) => p,
            None => return Err(self.erro_de_transicao(proposta_id).await?),
        };

        let valor_comissao = calcular_comissao(proposta.valor, proposta.comissao);
        let data_prevista = (Utc::now() + Duration::days(PRAZO_COMISSAO_DIAS)).date_naive();
        let descricao = format!(
            "Comissão - {} ({})",
            proposta.cliente, proposta.produto_nome
        );

        self.comissao_repo
            .create(
                &mut *tx,
                proposta.corretor_id,
                Some(proposta.id),
                &descricao,
                valor_comissao,
                Some(proposta.comissao),
                data_prevista,
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            "✅ Proposta {} aprovada; comissão de {} gerada",
            proposta.id,
            valor_comissao
        );

        Ok(proposta)
    }

    pub async fn rejeitar(
        &self,
        proposta_id: Uuid,
        motivo: &str,
    ) -> Result<PropostaCorretor, AppError> {
        let motivo = motivo.trim();
        if motivo.is_empty() {
            return Err(AppError::InvalidInput(
                "A rejeição exige um motivo não vazio.".to_string(),
            ));
        }

        let proposta = self
            .repo
            .transicionar(&self.pool, proposta_id, PropostaStatus::Rejeitada, Some(motivo))
            .await?;

        match proposta {
            Some(p) => Ok(p),
            None => Err(self.erro_de_transicao(proposta_id).await?),
        }
    }

    // Distingue "não existe" de "já saiu de pendente" depois que o UPDATE
    // condicional não afetou nenhuma linha
    async fn erro_de_transicao(&self, proposta_id: Uuid) -> Result<AppError, AppError> {
        match self.repo.find_by_id(proposta_id).await? {
            Some(p) => Ok(AppError::TransicaoInvalida(format!(
                "Proposta já está {:?} e não pode mudar de status.",
                p.status
            ))),
            None => Ok(AppError::NotFound("Proposta não encontrada.".to_string())),
        }
    }

    // =========================================================================
    //  CANAL DIRETO
    // =========================================================================

    // Sem corretor envolvido, aprovação não gera comissão
    pub async fn aprovar_direta(&self, proposta_id: Uuid) -> Result<PropostaDireta, AppError> {
        let proposta = self
            .repo
            .transicionar_direta(proposta_id, PropostaStatus::Aprovada, None)
            .await?;

        match proposta {
            Some(p) => Ok(p),
            None => Err(self.erro_de_transicao_direta(proposta_id).await?),
        }
    }

    pub async fn rejeitar_direta(
        &self,
        proposta_id: Uuid,
        motivo: &str,
    ) -> Result<PropostaDireta, AppError> {
        let motivo = motivo.trim();
        if motivo.is_empty() {
            return Err(AppError::InvalidInput(
                "A rejeição exige um motivo não vazio.".to_string(),
            ));
        }

        let proposta = self
            .repo
            .transicionar_direta(proposta_id, PropostaStatus::Rejeitada, Some(motivo))
            .await?;

        match proposta {
            Some(p) => Ok(p),
            None => Err(self.erro_de_transicao_direta(proposta_id).await?),
        }
    }

    async fn erro_de_transicao_direta(&self, proposta_id: Uuid) -> Result<AppError, AppError> {
        match self.repo.find_direta_by_id(proposta_id).await? {
            Some(p) => Ok(AppError::TransicaoInvalida(format!(
                "Proposta já está {:?} e não pode mudar de status.",
                p.status
            ))),
            None => Ok(AppError::NotFound("Proposta não encontrada.".to_string())),
        }
    }
}

// Gate dos documentos obrigatórios: cada um dos três slots precisa estar
// presente e não vazio. O slot 'proposta' é opcional.
pub fn validar_slots_obrigatorios(documentos: &[DocumentoUpload]) -> Result<(), AppError> {
    for obrigatorio in DocumentoTipo::OBRIGATORIOS {
        let presente = documentos
            .iter()
            .any(|d| d.tipo == obrigatorio && !d.dados.is_empty());

        if !presente {
            return Err(AppError::DocumentoObrigatorioAusente(
                obrigatorio.as_str().to_string(),
            ));
        }
    }

    Ok(())
}

// Valor da comissão: percentual sobre o valor da proposta, 2 casas
pub fn calcular_comissao(valor: Decimal, percentual: Decimal) -> Decimal {
    (valor * percentual / Decimal::ONE_HUNDRED).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(tipo: DocumentoTipo) -> DocumentoUpload {
        DocumentoUpload {
            tipo,
            nome_original: format!("{}.jpg", tipo.as_str()),
            dados: vec![0xFF, 0xD8],
        }
    }

    #[test]
    fn gate_aceita_os_tres_obrigatorios() {
        let docs = vec![
            doc(DocumentoTipo::RgFrente),
            doc(DocumentoTipo::RgVerso),
            doc(DocumentoTipo::ComprovanteResidencia),
        ];
        assert!(validar_slots_obrigatorios(&docs).is_ok());
    }

    #[test]
    fn gate_aceita_proposta_opcional_junto() {
        let docs = vec![
            doc(DocumentoTipo::RgFrente),
            doc(DocumentoTipo::RgVerso),
            doc(DocumentoTipo::ComprovanteResidencia),
            doc(DocumentoTipo::Proposta),
        ];
        assert!(validar_slots_obrigatorios(&docs).is_ok());
    }

    #[test]
    fn gate_recusa_cada_slot_ausente() {
        for ausente in DocumentoTipo::OBRIGATORIOS {
            let docs: Vec<_> = DocumentoTipo::OBRIGATORIOS
                .into_iter()
                .filter(|t| *t != ausente)
                .map(doc)
                .collect();

            let erro = validar_slots_obrigatorios(&docs).unwrap_err();
            match erro {
                AppError::DocumentoObrigatorioAusente(slot) => {
                    assert_eq!(slot, ausente.as_str());
                }
                outro => panic!("erro inesperado: {:?}", outro),
            }
        }
    }

    #[test]
    fn gate_recusa_arquivo_vazio_em_slot_obrigatorio() {
        let mut docs = vec![
            doc(DocumentoTipo::RgFrente),
            doc(DocumentoTipo::RgVerso),
            doc(DocumentoTipo::ComprovanteResidencia),
        ];
        docs[0].dados.clear();

        assert!(validar_slots_obrigatorios(&docs).is_err());
    }

    #[test]
    fn gate_sem_documento_nenhum() {
        assert!(validar_slots_obrigatorios(&[]).is_err());
    }

    #[test]
    fn comissao_de_percentual_sobre_valor() {
        // 3.5% de 389.90 = 13.6465 -> 13.65
        let valor = Decimal::new(38990, 2);
        let percentual = Decimal::new(350, 2);
        assert_eq!(calcular_comissao(valor, percentual), Decimal::new(1365, 2));
    }

    #[test]
    fn comissao_zero_quando_percentual_zero() {
        let valor = Decimal::new(45000, 2);
        assert_eq!(calcular_comissao(valor, Decimal::ZERO), Decimal::ZERO);
    }
}
