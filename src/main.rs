// src/main.rs - Desktop dashboard and headless inventory commands

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde_json::json;

use kitchen_ops::config::{AppConfig, ConfigManager};
use kitchen_ops::error::Result;
use kitchen_ops::inventory::{aggregate, Pager};
use kitchen_ops::logging::{self, LoggingGuard};
use kitchen_ops::models::RecipeKind;
use kitchen_ops::ui::{self, Services};
use kitchen_ops::ApiClient;

#[derive(Parser)]
#[command(
    name = "kitchen-ops",
    version = kitchen_ops::VERSION,
    about = "Restaurant operations dashboard: stock, recipes, team and calendar",
    long_about = None
)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Backend root URL, overriding the configuration
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the desktop dashboard
    Run,
    /// Print one page of aggregated stock
    Stocks {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Print the audit log for one ingredient
    StockLog { ingredient: String },
    /// Print recipes grouped by kind
    Recipes,
    /// Validate configuration
    ValidateConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let _guard = setup_logging(&cli, &config)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_application(config),
        Commands::Stocks { page, page_size } => block_on(show_stocks(&config, page, page_size)),
        Commands::StockLog { ingredient } => block_on(show_stock_log(&config, &ingredient)),
        Commands::Recipes => block_on(show_recipes(&config)),
        Commands::ValidateConfig => validate_config(&config),
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let path = cli
        .config
        .clone()
        .or_else(|| ConfigManager::default_config_path().filter(|p| p.exists()));
    let mut manager = ConfigManager::with_config_file(path)?;
    if let Some(base_url) = &cli.base_url {
        manager.add_memory_layer("cli", json!({ "api": { "base_url": base_url } }), 30);
    }
    manager.load()
}

fn setup_logging(cli: &Cli, config: &AppConfig) -> Result<LoggingGuard> {
    let mut logging_config = config.logging.clone();
    if cli.debug {
        logging_config.level = "debug".to_string();
    } else if cli.verbose {
        logging_config.level = "info".to_string();
    }
    logging::init(&logging_config)
}

fn block_on<F: std::future::Future<Output = Result<()>>>(future: F) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

fn run_application(config: AppConfig) -> Result<()> {
    tracing::info!("Starting Kitchen Ops v{}", kitchen_ops::VERSION);
    report_problems(&config);

    let api = ApiClient::from_config(&config.api)?;
    ui::launch(&config.app.name, Services::new(api, config.ui));
    Ok(())
}

async fn show_stocks(config: &AppConfig, page: usize, page_size: Option<usize>) -> Result<()> {
    let api = ApiClient::from_config(&config.api)?;
    let rows = aggregate(&api.list_stocks().await?);

    let mut pager = Pager::new(page_size.unwrap_or(config.ui.default_page_size));
    pager.set_total(rows.len());
    pager.go_to(page);

    println!("{:<32} {:>12} {:<8} {:>5}", "Ingredient", "Total", "Unit", "Lots");
    for row in pager.slice(&rows) {
        let marker = if row.mixed_units { " (mixed units)" } else { "" };
        println!(
            "{:<32} {:>12} {:<8} {:>5}{}",
            row.ingredient_name,
            row.total_label(),
            row.unit,
            row.lot_count,
            marker
        );
    }
    println!(
        "Page {} of {} ({} ingredients)",
        pager.page(),
        pager.page_count().max(1),
        pager.total()
    );
    Ok(())
}

async fn show_stock_log(config: &AppConfig, ingredient: &str) -> Result<()> {
    let api = ApiClient::from_config(&config.api)?;
    let entries = api.stock_log(ingredient).await?;

    println!("Stock log: {}", ingredient);
    if entries.is_empty() {
        println!("  (no entries)");
    }
    for entry in &entries {
        println!(
            "  {:<20} {:<28} {:>12}  {}",
            entry.date_label(),
            entry.action.label(),
            entry.amount_label(),
            entry.detail_label()
        );
    }
    Ok(())
}

async fn show_recipes(config: &AppConfig) -> Result<()> {
    let api = ApiClient::from_config(&config.api)?;
    let recipes = api.list_recipes().await?;

    for kind in [RecipeKind::Processed, RecipeKind::FullRecipe] {
        println!("{}:", kind.label());
        let mut any = false;
        for recipe in recipes.iter().filter(|r| r.kind == kind) {
            any = true;
            match recipe.id {
                Some(id) => println!("  #{:<5} {}", id, recipe.name),
                None => println!("  {:<6} {}", "-", recipe.name),
            }
        }
        if !any {
            println!("  (none)");
        }
    }
    Ok(())
}

/// Logs configuration problems without stopping the UI.
fn report_problems(config: &AppConfig) {
    for problem in config.validate() {
        tracing::warn!(key = %problem.key, "{}", problem.message);
    }
}

fn validate_config(config: &AppConfig) -> Result<()> {
    println!("Validating configuration...");
    let problems = config.validate();

    if problems.is_empty() {
        println!("✅ Configuration is valid");
        println!("   Backend: {}", config.api.base_url);
        println!("   Version: {}", kitchen_ops::VERSION);
        return Ok(());
    }

    for problem in &problems {
        println!("❌ {}", problem);
    }
    process::exit(1);
}
