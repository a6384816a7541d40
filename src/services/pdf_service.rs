// src/services/pdf_service.rs

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;

use crate::{
    common::error::AppError,
    models::{
        corretor::Corretor,
        proposta::{DocumentoProposta, DocumentoTipo, PropostaCorretor, PropostaStatus},
    },
    services::proposta_service::calcular_comissao,
};

#[derive(Clone)]
pub struct PdfService {
    fonts_dir: String,
}

impl PdfService {
    pub fn new(fonts_dir: String) -> Self {
        Self { fonts_dir }
    }

    // Ficha da proposta para impressão/arquivo físico: dados do cliente,
    // produto, valores e o checklist de documentos, com um QR Code do id da
    // proposta para conferência.
    pub fn gerar_ficha_proposta(
        &self,
        proposta: &PropostaCorretor,
        corretor: &Corretor,
        documentos: &[DocumentoProposta],
    ) -> Result<Vec<u8>, AppError> {
        // Carrega a fonte da pasta de fontes
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, "Roboto", None)
            .map_err(|_| {
                AppError::FontNotFound(format!("Fonte não encontrada em {}", self.fonts_dir))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Proposta {}", proposta.id));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new("PLANVIDA CORRETORA")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Break::new(1.5));

        doc.push(
            elements::Paragraph::new("FICHA DA PROPOSTA")
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Paragraph::new(format!(
            "Data: {}",
            proposta.created_at.format("%d/%m/%Y")
        )));
        doc.push(elements::Paragraph::new(format!(
            "Situação: {}",
            rotulo_status(proposta.status)
        )));
        if let Some(motivo) = &proposta.motivo_rejeicao {
            doc.push(elements::Paragraph::new(format!("Motivo: {}", motivo)));
        }
        doc.push(elements::Break::new(2));

        // --- DADOS ---
        // Pesos das colunas: rótulo (2), valor (5)
        let mut table = elements::TableLayout::new(vec![2, 5]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        let linhas = [
            ("Cliente", proposta.cliente.clone()),
            ("E-mail", proposta.email_cliente.clone()),
            ("WhatsApp", proposta.whatsapp_cliente.clone()),
            ("Corretor", corretor.nome.clone()),
            ("Produto", proposta.produto_nome.clone()),
            ("Valor", format!("R$ {:.2}", proposta.valor)),
            (
                "Comissão",
                format!(
                    "{}% (R$ {:.2})",
                    proposta.comissao,
                    calcular_comissao(proposta.valor, proposta.comissao)
                ),
            ),
        ];

        for (rotulo, valor) in linhas {
            table
                .row()
                .element(elements::Paragraph::new(rotulo).styled(style_bold))
                .element(elements::Paragraph::new(valor))
                .push()
                .expect("Table error");
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- CHECKLIST DE DOCUMENTOS ---
        doc.push(
            elements::Paragraph::new("DOCUMENTOS ANEXADOS")
                .styled(style::Style::new().bold().with_font_size(12)),
        );

        for tipo in [
            DocumentoTipo::RgFrente,
            DocumentoTipo::RgVerso,
            DocumentoTipo::ComprovanteResidencia,
            DocumentoTipo::Proposta,
        ] {
            let presente = documentos.iter().any(|d| d.tipo == tipo);
            let marca = if presente { "[x]" } else { "[ ]" };
            doc.push(elements::Paragraph::new(format!(
                "{} {}",
                marca,
                rotulo_documento(tipo)
            )));
        }

        doc.push(elements::Break::new(2));

        // --- QR CODE DE CONFERÊNCIA ---
        let code = QrCode::new(proposta.id.to_string().as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(genpdf::Scale::new(0.5, 0.5));

        doc.push(pdf_image);
        doc.push(
            elements::Paragraph::new(format!("Protocolo: {}", proposta.id))
                .styled(style::Style::new().with_font_size(8)),
        );

        // Renderiza para buffer (memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}

fn rotulo_status(status: PropostaStatus) -> &'static str {
    match status {
        PropostaStatus::Pendente => "Pendente",
        PropostaStatus::Aprovada => "Aprovada",
        PropostaStatus::Rejeitada => "Reprovada",
    }
}

fn rotulo_documento(tipo: DocumentoTipo) -> &'static str {
    match tipo {
        DocumentoTipo::RgFrente => "RG (frente)",
        DocumentoTipo::RgVerso => "RG (verso)",
        DocumentoTipo::ComprovanteResidencia => "Comprovante de residência",
        DocumentoTipo::Proposta => "Proposta assinada",
    }
}
