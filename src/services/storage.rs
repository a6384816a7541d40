// src/services/storage.rs

use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::common::error::AppError;

// Buckets lógicos dentro do diretório de armazenamento
pub const BUCKET_DOCUMENTOS: &str = "documentos_propostas";
pub const BUCKET_ARQUIVOS: &str = "arquivos";

const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024; // 10MB por arquivo

// Armazenamento de objetos local: grava os arquivos sob STORAGE_DIR e emite
// URLs públicas servidas pelo handler de download.
#[derive(Clone)]
pub struct StorageService {
    base_dir: PathBuf,
    public_url: String,
}

impl StorageService {
    pub fn new(base_dir: impl Into<PathBuf>, public_url: String) -> Self {
        Self {
            base_dir: base_dir.into(),
            public_url,
        }
    }

    // Grava um objeto e devolve a URL pública registrada no banco
    pub async fn save(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
    ) -> Result<String, AppError> {
        if data.is_empty() {
            return Err(AppError::UploadFailed("arquivo vazio".to_string()));
        }
        if data.len() > MAX_FILE_SIZE_BYTES {
            return Err(AppError::UploadFailed(format!(
                "arquivo excede o limite de {}MB",
                MAX_FILE_SIZE_BYTES / (1024 * 1024)
            )));
        }

        let path = self.caminho(bucket, key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                tracing::error!("Falha ao criar diretório de upload {:?}: {:?}", parent, e);
                AppError::UploadFailed(e.to_string())
            })?;
        }

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| AppError::UploadFailed(e.to_string()))?;
        file.write_all(data)
            .await
            .map_err(|e| AppError::UploadFailed(e.to_string()))?;
        file.sync_all()
            .await
            .map_err(|e| AppError::UploadFailed(e.to_string()))?;

        tracing::info!("📎 Objeto gravado: {}/{} ({} bytes)", bucket, key, data.len());

        Ok(format!("{}/api/arquivos/{}/{}", self.public_url, bucket, key))
    }

    pub async fn read(&self, bucket: &str, key: &str) -> Result<Vec<u8>, AppError> {
        let path = self.caminho(bucket, key)?;

        fs::read(&path)
            .await
            .map_err(|_| AppError::NotFound("Arquivo não encontrado.".to_string()))
    }

    // Monta o caminho físico, recusando chaves que escapam do diretório base
    fn caminho(&self, bucket: &str, key: &str) -> Result<PathBuf, AppError> {
        if bucket.contains("..") || key.contains("..") || key.starts_with('/') {
            return Err(AppError::NotFound("Arquivo não encontrado.".to_string()));
        }

        Ok(self.base_dir.join(bucket).join(key))
    }
}

// Extrai a extensão do nome original (sem o ponto), se for razoável
fn extensao(nome: &str) -> String {
    nome.rsplit('.')
        .next()
        .filter(|ext| ext.len() <= 10 && !ext.contains(' ') && !ext.is_empty() && *ext != nome)
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

// Gera um nome único preservando a extensão original e removendo qualquer
// caractere de path traversal
pub fn nome_unico(nome_original: &str) -> String {
    let uuid = Uuid::new_v4();
    let ext = extensao(nome_original);

    if ext.is_empty() {
        format!("{}", uuid)
    } else {
        format!("{}.{}", uuid, ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensao_reconhece_formatos_comuns() {
        assert_eq!(extensao("rg_frente.jpg"), "jpg");
        assert_eq!(extensao("comprovante.PDF"), "pdf");
        assert_eq!(extensao("foto.tar.gz"), "gz");
        assert_eq!(extensao("semextensao"), "");
        assert_eq!(extensao("arquivo.extensaomuitolonga"), "");
    }

    #[test]
    fn nome_unico_preserva_extensao() {
        let nome = nome_unico("rg frente.jpg");
        assert!(nome.ends_with(".jpg"));
        // UUID tem 36 caracteres
        assert!(nome.len() > 36);
    }

    #[test]
    fn nome_unico_remove_path_traversal() {
        let nome = nome_unico("../../../etc/passwd");
        assert!(!nome.contains('/'));
        assert!(!nome.contains(".."));
    }

    #[test]
    fn caminho_recusa_chaves_fora_do_diretorio() {
        let storage = StorageService::new("/tmp/storage", "http://localhost:3000".to_string());
        assert!(storage.caminho("arquivos", "../segredo.txt").is_err());
        assert!(storage.caminho("arquivos", "/etc/passwd").is_err());
        assert!(storage.caminho("..", "qualquer").is_err());
        assert!(storage.caminho("arquivos", "ok/documento.pdf").is_ok());
    }
}
