use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "delivery-sheet")]
#[command(about = "Planilha de entregas e custos com extração de comprovantes por IA", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Exibe logs detalhados
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Arquivo de armazenamento (padrão: diretório de dados do usuário)
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Gerencia as entregas
    Delivery {
        #[command(subcommand)]
        action: DeliveryAction,
    },

    /// Gerencia os custos
    Cost {
        #[command(subcommand)]
        action: CostAction,
    },

    /// Extrai entregas de fotos de comprovantes com IA
    Extract {
        /// Imagens ou pastas de imagens
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Mostra totais, saldo e agrupamentos
    Summary,

    /// Exporta as entregas (csv/pdf/xlsx/all)
    Export {
        /// Formato de saída
        #[arg(short, long, default_value = "all")]
        format: ExportFormat,

        /// Pasta de saída (padrão: pasta atual)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Gera um link de compartilhamento (whatsapp/email)
    Share {
        target: ShareTarget,
    },

    /// Mostra ou altera o título da planilha
    Title {
        /// Novo título
        title: Option<String>,
    },

    /// Mostra/edita a configuração
    Config {
        /// Define a chave da API do Gemini
        #[arg(long)]
        set_api_key: Option<String>,

        /// Define o modelo do Gemini
        #[arg(long)]
        set_model: Option<String>,

        /// Mostra a configuração
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum DeliveryAction {
    /// Adiciona uma entrega manualmente
    Add {
        /// Data (AAAA-MM-DD ou DD/MM/AAAA; padrão: hoje)
        #[arg(short, long)]
        date: Option<String>,

        /// Endereço de coleta
        #[arg(short, long)]
        collection: String,

        /// Endereço de destino
        #[arg(short = 't', long)]
        destination: String,

        /// Valor (ex.: 25,50)
        #[arg(short = 'a', long)]
        total: Option<String>,

        /// Observação
        #[arg(short, long)]
        observation: Option<String>,
    },

    /// Lista as entregas
    List,

    /// Altera campos de uma entrega
    Update {
        id: i64,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        collection: Option<String>,

        #[arg(short = 't', long)]
        destination: Option<String>,

        #[arg(short = 'a', long)]
        total: Option<String>,

        #[arg(short, long)]
        observation: Option<String>,
    },

    /// Remove uma entrega
    Delete { id: i64 },

    /// Remove todas as entregas
    Clear {
        /// Não pede confirmação
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum CostAction {
    /// Adiciona um custo
    Add {
        /// Data (AAAA-MM-DD ou DD/MM/AAAA; padrão: hoje)
        #[arg(short, long)]
        date: Option<String>,

        /// Descrição (também usada como categoria)
        #[arg(short = 'n', long)]
        description: String,

        /// Valor (ex.: 40,00)
        #[arg(short = 'a', long)]
        total: Option<String>,

        /// Observação
        #[arg(short, long)]
        observation: Option<String>,
    },

    /// Lista os custos
    List,

    /// Altera campos de um custo
    Update {
        id: i64,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short = 'n', long)]
        description: Option<String>,

        #[arg(short = 'a', long)]
        total: Option<String>,

        #[arg(short, long)]
        observation: Option<String>,
    },

    /// Remove um custo
    Delete { id: i64 },

    /// Remove todos os custos
    Clear {
        /// Não pede confirmação
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ExportFormat {
    Csv,
    Pdf,
    Xlsx,
    #[default]
    All,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "all" => Ok(ExportFormat::All),
            _ => Err(format!("Formato desconhecido: {}. Use csv, pdf, xlsx ou all", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShareTarget {
    Whatsapp,
    Email,
}

impl std::str::FromStr for ShareTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whatsapp" | "wa" => Ok(ShareTarget::Whatsapp),
            "email" | "e-mail" => Ok(ShareTarget::Email),
            _ => Err(format!("Destino desconhecido: {}. Use whatsapp ou email", s)),
        }
    }
}
