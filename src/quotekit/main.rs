use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use quotekit::api::QuoteApi;
use quotekit::commands::config::ConfigAction;
use quotekit::commands::{CmdMessage, CmdResult, MessageLevel};
use quotekit::config::{BackendKind, QuoteConfig};
use quotekit::dispatch::channels::default_channels;
use quotekit::dispatch::Dispatcher;
use quotekit::error::{QuoteError, Result};
use quotekit::model::{Product, RecordKind, Supplier};
use quotekit::store::gallery::GalleryBackend;
use quotekit::store::sqlite::SqliteBackend;
use quotekit::store::workbook::WorkbookBackend;
use quotekit::store::{Store, StoreBackend};
use std::path::{Path, PathBuf};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: QuoteApi<Box<dyn StoreBackend>>,
    config: QuoteConfig,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::Init => handle_init(&ctx),
        Commands::AddProduct {
            name,
            description,
            image,
        } => handle_add_product(&ctx, &name, &description, image),
        Commands::AddSupplier { name, email } => {
            print_result(&ctx.api.add_supplier(&name, &email)?);
            Ok(())
        }
        Commands::DeleteProduct { name } => {
            print_result(&ctx.api.delete(RecordKind::Product, &name)?);
            Ok(())
        }
        Commands::DeleteSupplier { name } => {
            print_result(&ctx.api.delete(RecordKind::Supplier, &name)?);
            Ok(())
        }
        Commands::List { kind, search } => handle_list(&ctx, &kind, search),
        Commands::Search { kind, term } => {
            print_result(&ctx.api.search(parse_kind(&kind)?, &term)?);
            Ok(())
        }
        Commands::Send {
            products,
            suppliers,
            cc,
        } => handle_send(&ctx, &products, &suppliers, cc),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config_dir = if cli.global {
        let proj_dirs = ProjectDirs::from("com", "quotekit", "quotekit")
            .ok_or_else(|| QuoteError::Store("Could not determine config dir".to_string()))?;
        proj_dirs.data_dir().to_path_buf()
    } else {
        cwd.join(".quotekit")
    };

    let mut config = QuoteConfig::load(&config_dir)?;
    if let Some(store) = &cli.store {
        config.store_path = store.clone();
    }
    if let Some(backend) = &cli.backend {
        config.backend = backend.parse().map_err(QuoteError::Validation)?;
    }

    let backend = open_backend(config.backend, &config.store_path)?;
    let dispatcher = Dispatcher::new(
        default_channels(),
        config.subject.clone(),
        Duration::from_millis(config.send_delay_ms),
        backend.backup_dir(),
    );
    let api = QuoteApi::new(
        Store::with_backend(backend),
        dispatcher,
        config.template_path.clone(),
        config_dir,
    );

    Ok(AppContext { api, config })
}

fn open_backend(kind: BackendKind, path: &Path) -> Result<Box<dyn StoreBackend>> {
    Ok(match kind {
        BackendKind::Workbook => Box::new(WorkbookBackend::new(path)),
        BackendKind::Gallery => Box::new(GalleryBackend::new(path)),
        BackendKind::Sqlite => Box::new(SqliteBackend::open(path)?),
    })
}

fn parse_kind(s: &str) -> Result<RecordKind> {
    s.parse().map_err(QuoteError::Validation)
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_result(&result);
    Ok(())
}

fn handle_add_product(
    ctx: &AppContext,
    name: &str,
    description: &str,
    image: Option<PathBuf>,
) -> Result<()> {
    let image = image.map(|p| p.display().to_string());
    let result = ctx.api.add_product(name, description, image.as_deref())?;
    print_result(&result);
    Ok(())
}

fn handle_list(ctx: &AppContext, kind: &str, search: Option<String>) -> Result<()> {
    let kind = parse_kind(kind)?;
    let result = if let Some(term) = search {
        ctx.api.search(kind, &term)?
    } else {
        ctx.api.list(kind)?
    };
    print_result(&result);
    Ok(())
}

fn handle_send(
    ctx: &AppContext,
    products: &[String],
    suppliers: &[String],
    cc: Option<String>,
) -> Result<()> {
    let cc = cc.or_else(|| ctx.config.cc.clone());
    let result = ctx.api.send_quotes(products, suppliers, cc.as_deref())?;
    print_result(&result);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        for key in QuoteConfig::keys() {
            println!("{} = {}", key, config.get(key).unwrap_or_default());
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_result(result: &CmdResult) {
    if !result.products.is_empty() {
        print_products(&result.products);
    }
    if !result.suppliers.is_empty() {
        print_suppliers(&result.suppliers);
    }
    print_messages(&result.messages);
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;

fn print_products(products: &[Product]) {
    let name_width = column_width(products.iter().map(|p| p.name.as_str()));
    for product in products {
        let name = pad_to_width(&product.name, name_width);
        let description =
            truncate_to_width(&product.description, LINE_WIDTH.saturating_sub(name_width + 4));
        match &product.image {
            Some(image) => println!(
                "  {}  {} {}",
                name.bold(),
                description,
                format!("[{}]", image).dimmed()
            ),
            None => println!("  {}  {}", name.bold(), description),
        }
    }
}

fn print_suppliers(suppliers: &[Supplier]) {
    let name_width = column_width(suppliers.iter().map(|s| s.name.as_str()));
    for supplier in suppliers {
        let name = pad_to_width(&supplier.name, name_width);
        println!("  {}  {}", name.bold(), supplier.email.dimmed());
    }
}

fn column_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.width()).max().unwrap_or(0)
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
