use crate::extractor::ExtractionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("A chave da API do Google Gemini não está configurada. Use `delivery-sheet config --set-api-key SUA_CHAVE` ou defina GEMINI_API_KEY")]
    MissingApiKey,

    #[error("Arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("Pasta não encontrada: {0}")]
    FolderNotFound(String),

    #[error("Erro ao ler imagem: {0}")]
    ImageLoad(String),

    #[error("Nenhuma imagem encontrada: {0}")]
    NoImagesFound(String),

    #[error("Falha ao processar a imagem com a IA: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("A IA não conseguiu extrair dados válidos de nenhuma imagem.")]
    NoValidData,

    #[error("Data inválida: \"{0}\". Use o formato DD/MM/AAAA.")]
    InvalidDate(String),

    #[error("Campo obrigatório não preenchido: {0}")]
    MissingField(&'static str),

    #[error("Nada para alterar: informe ao menos um campo")]
    EmptyPatch,

    #[error("A planilha não tem entregas para exportar")]
    NothingToExport,

    #[error("Erro ao gerar PDF: {0}")]
    PdfGeneration(String),

    #[error("Erro ao gerar Excel: {0}")]
    ExcelGeneration(String),

    #[error("Erro de JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] delivery_sheet_common::Error),
}

pub type Result<T> = std::result::Result<T, SheetError>;
