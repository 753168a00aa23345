use clap::Parser;
use delivery_sheet::cli::{Cli, Commands, CostAction, DeliveryAction, ShareTarget};
use delivery_sheet::config::Config;
use delivery_sheet::error::{Result, SheetError};
use delivery_sheet::extractor::{self, GeminiExtractor};
use delivery_sheet::persistence::{load_sheet, save_sheet, FileStore};
use delivery_sheet::{entry, export, scanner};
use delivery_sheet_common::export::pdf_core::fit_text;
use delivery_sheet_common::share;
use delivery_sheet_common::{format_currency, total, CostPatch, DeliveryPatch, Sheet, Summary};
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Erro: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let storage_path = match cli.storage {
        Some(path) => path,
        None => config.storage_path()?,
    };
    let mut store = FileStore::open(&storage_path);
    let mut sheet = load_sheet(&store);

    match cli.command {
        Commands::Delivery { action } => {
            if run_delivery(&mut sheet, action)? {
                save_sheet(&sheet, &mut store)?;
            }
        }

        Commands::Cost { action } => {
            if run_cost(&mut sheet, action)? {
                save_sheet(&sheet, &mut store)?;
            }
        }

        Commands::Extract { paths } => {
            println!("📸 delivery-sheet - extração de comprovantes\n");

            println!("[1/3] Procurando imagens...");
            let images = scanner::collect_images(&paths)?;
            if images.is_empty() {
                return Err(SheetError::NoImagesFound(display_paths(&paths)));
            }
            println!("✔ {} imagens encontradas\n", images.len());

            let gemini = GeminiExtractor::from_config(&config)?;
            let receipts = images
                .iter()
                .map(|image| image.load())
                .collect::<Result<Vec<_>>>()?;

            println!("[2/3] Processando com IA ({})...", config.model);
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.enable_steady_tick(Duration::from_millis(120));
            let count = receipts.len();
            let report = extractor::import_receipts(&mut sheet, &gemini, &receipts, |index, image| {
                spinner.set_message(format!("{}/{} {}", index + 1, count, image.file_name));
            })
            .await;
            spinner.finish_and_clear();
            let report = report?;
            println!("✔ {} entregas extraídas\n", report.appended);

            for failure in &report.failures {
                println!("⚠ {}: {}", failure.file_name, failure.error);
            }

            println!("[3/3] Salvando...");
            save_sheet(&sheet, &mut store)?;
            println!("✔ Planilha salva em {}", storage_path.display());
        }

        Commands::Summary => print_summary(&sheet),

        Commands::Export { format, output } => {
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            for path in export::export_sheet(&sheet, &format, &output_dir)? {
                println!("✔ {}", path.display());
            }
        }

        Commands::Share { target } => {
            let link = match target {
                ShareTarget::Whatsapp => share::whatsapp_link(sheet.title(), sheet.deliveries()),
                ShareTarget::Email => share::email_link(sheet.title(), sheet.deliveries()),
            };
            println!("{}", link);
        }

        Commands::Title { title } => match title {
            Some(title) => {
                sheet.set_title(title);
                save_sheet(&sheet, &mut store)?;
                println!("✔ Título: {}", sheet.title());
            }
            None => println!("{}", sheet.title()),
        },

        Commands::Config { set_api_key, set_model, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ Chave da API salva");
            }

            if let Some(model) = set_model {
                config.set_model(model)?;
                println!("✔ Modelo: {}", config.model);
            }

            if show {
                println!("Configuração:");
                println!("  Modelo: {}", config.model);
                println!("  API: {}", config.api_base_url);
                println!("  Armazenamento: {}", storage_path.display());
                println!(
                    "  Chave da API: {}",
                    if config.get_api_key().is_ok() { "configurada" } else { "não configurada" }
                );
            }
        }
    }

    Ok(())
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(answer)
}

/// Returns whether the sheet changed.
fn run_delivery(sheet: &mut Sheet, action: DeliveryAction) -> Result<bool> {
    match action {
        DeliveryAction::Add { date, collection, destination, total, observation } => {
            let new = entry::delivery_entry(date, collection, destination, total, observation)?;
            let record = sheet.add_delivery(new);
            println!("✔ Entrega adicionada (id {})", record.id);
            Ok(true)
        }
        DeliveryAction::List => {
            print_deliveries(sheet);
            Ok(false)
        }
        DeliveryAction::Update { id, date, collection, destination, total, observation } => {
            let patch = entry::delivery_patch(DeliveryPatch {
                date,
                collection,
                destination,
                total,
                observation,
            })?;
            sheet.update_delivery(id, patch)?;
            println!("✔ Entrega {} atualizada", id);
            Ok(true)
        }
        DeliveryAction::Delete { id } => {
            sheet.delete_delivery(id)?;
            println!("✔ Entrega {} removida", id);
            Ok(true)
        }
        DeliveryAction::Clear { yes } => {
            if sheet.deliveries().is_empty() {
                println!("Nenhuma entrega para remover");
                return Ok(false);
            }
            if !confirm("Tem certeza que deseja limpar todas as entregas?", yes)? {
                return Ok(false);
            }
            let removed = sheet.clear_deliveries();
            println!("✔ {} entregas removidas", removed);
            Ok(true)
        }
    }
}

fn run_cost(sheet: &mut Sheet, action: CostAction) -> Result<bool> {
    match action {
        CostAction::Add { date, description, total, observation } => {
            let new = entry::cost_entry(date, description, total, observation)?;
            let record = sheet.add_cost(new);
            println!("✔ Custo adicionado (id {})", record.id);
            Ok(true)
        }
        CostAction::List => {
            print_costs(sheet);
            Ok(false)
        }
        CostAction::Update { id, date, description, total, observation } => {
            let patch = entry::cost_patch(CostPatch {
                date,
                description,
                total,
                observation,
            })?;
            sheet.update_cost(id, patch)?;
            println!("✔ Custo {} atualizado", id);
            Ok(true)
        }
        CostAction::Delete { id } => {
            sheet.delete_cost(id)?;
            println!("✔ Custo {} removido", id);
            Ok(true)
        }
        CostAction::Clear { yes } => {
            if sheet.costs().is_empty() {
                println!("Nenhum custo para remover");
                return Ok(false);
            }
            if !confirm("Tem certeza que deseja limpar todos os custos?", yes)? {
                return Ok(false);
            }
            let removed = sheet.clear_costs();
            println!("✔ {} custos removidos", removed);
            Ok(true)
        }
    }
}

fn print_deliveries(sheet: &Sheet) {
    println!("{}\n", sheet.title());
    if sheet.deliveries().is_empty() {
        println!("Nenhuma entrega registrada");
        return;
    }

    println!(
        "{:<14} {:<6} {:<28} {:<28} {:>14}  {}",
        "ID", "Data", "Coleta", "Destino", "Total", "Observação"
    );
    for row in sheet.deliveries() {
        println!(
            "{:<14} {:<6} {:<28} {:<28} {:>14}  {}",
            row.id,
            fit_text(&row.date, 6),
            fit_text(&row.collection, 28),
            fit_text(&row.destination, 28),
            format_currency(&row.total),
            row.observation
        );
    }
    println!("\nTotal Geral: {}", format_currency(total(sheet.deliveries())));
}

fn print_costs(sheet: &Sheet) {
    if sheet.costs().is_empty() {
        println!("Nenhum custo registrado");
        return;
    }

    println!("{:<14} {:<6} {:<32} {:>14}  {}", "ID", "Data", "Descrição", "Total", "Observação");
    for row in sheet.costs() {
        println!(
            "{:<14} {:<6} {:<32} {:>14}  {}",
            row.id,
            fit_text(&row.date, 6),
            fit_text(&row.description, 32),
            format_currency(&row.total),
            row.observation
        );
    }
    println!("\nTotal de Custos: {}", format_currency(total(sheet.costs())));
}

fn print_summary(sheet: &Sheet) {
    let summary = Summary::new(sheet.deliveries(), sheet.costs());

    println!("📊 {}\n", sheet.title());
    println!("Entregas: {} ({})", sheet.deliveries().len(), format_currency(summary.deliveries_total));
    println!("Custos:   {} ({})", sheet.costs().len(), format_currency(summary.costs_total));
    println!(
        "{}: {}",
        if summary.is_profit() { "Lucro" } else { "Prejuízo" },
        format_currency(summary.net())
    );

    if !summary.by_destination.is_empty() {
        println!("\nValor por destino:");
        for item in &summary.by_destination {
            println!("  {:<40} {:>14}", fit_text(&item.label, 40), format_currency(item.total));
        }
    }

    if !summary.by_category.is_empty() {
        println!("\nCustos por categoria:");
        for item in &summary.by_category {
            println!("  {:<40} {:>14}", fit_text(&item.label, 40), format_currency(item.total));
        }
    }
}
