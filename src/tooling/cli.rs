//! CLI Tooling
//!
//! Command-line interface over the product store. Each command maps onto one
//! store operation; `demo` replays the full add/update/get/delete cycle.

use crate::config::{AppConfig, ConfigLoader};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::product::{Product, ProductFields};
use crate::store::{JsonFileProductStore, ProductStore};
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde_json::{Number, Value};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

/// product-store - JSON file backed product catalog
#[derive(Parser, Debug)]
#[command(name = "product-store")]
#[command(about = "Manage a product catalog stored as a JSON array file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Store file path (overrides store.data_file)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Load configuration from `--config` or the standard sources, then apply `--file`.
    pub fn load_config(&self) -> Result<AppConfig, ApiError> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => {
                let cwd = std::env::current_dir().map_err(|e| {
                    ApiError::ConfigError(format!("Failed to resolve working directory: {}", e))
                })?;
                ConfigLoader::load(&cwd)?
            }
        };
        if let Some(file) = &self.file {
            config.store.data_file = file.clone();
        }
        Ok(config)
    }

    /// Fold the `--log-*` flags over the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut logging = base.clone();
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
        logging
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all products
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one product
    Get {
        /// Product ID
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Add a product; the store assigns its id
    Add {
        #[command(flatten)]
        input: ProductInput,
    },
    /// Replace a product entirely (fields not given are dropped)
    Update {
        /// Product ID
        id: String,
        #[command(flatten)]
        input: ProductInput,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: String,
    },
    /// Run the add/update/get/delete demonstration against the store
    Demo,
    /// Print the effective configuration as TOML
    Config,
}

/// Product fields supplied on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct ProductInput {
    /// Full field set as a JSON object; individual flags are applied on top
    #[arg(long)]
    pub json: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, value_parser = parse_number)]
    pub price: Option<Number>,

    #[arg(long)]
    pub thumbnail: Option<String>,

    #[arg(long)]
    pub code: Option<String>,

    #[arg(long, value_parser = parse_number)]
    pub stock: Option<Number>,

    /// Extra field as key=value; value is parsed as JSON when possible
    #[arg(long = "field", value_parser = parse_key_value)]
    pub fields: Vec<(String, Value)>,
}

impl ProductInput {
    /// Build the field set: JSON object first, then named flags, then `--field` pairs.
    pub fn into_fields(self) -> Result<ProductFields, ApiError> {
        let mut fields = match self.json {
            Some(raw) => {
                let value: Value = serde_json::from_str(&raw)
                    .map_err(|e| ApiError::InvalidInput(format!("--json is not valid JSON: {}", e)))?;
                if !value.is_object() {
                    return Err(ApiError::InvalidInput(
                        "--json must be a JSON object".to_string(),
                    ));
                }
                serde_json::from_value(value)
                    .map_err(|e| ApiError::InvalidInput(format!("--json: {}", e)))?
            }
            None => ProductFields::default(),
        };

        if self.title.is_some() {
            fields.title = self.title;
        }
        if self.description.is_some() {
            fields.description = self.description;
        }
        if self.price.is_some() {
            fields.price = self.price;
        }
        if self.thumbnail.is_some() {
            fields.thumbnail = self.thumbnail;
        }
        if self.code.is_some() {
            fields.code = self.code;
        }
        if self.stock.is_some() {
            fields.stock = self.stock;
        }
        for (key, value) in self.fields {
            fields.set(&key, value).map_err(ApiError::InvalidInput)?;
        }
        Ok(fields)
    }
}

fn parse_number(s: &str) -> Result<Number, String> {
    serde_json::from_str::<Number>(s.trim()).map_err(|_| format!("'{}' is not a number", s))
}

fn parse_key_value(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// CLI context holding the configuration; the store is opened on first use
pub struct CliContext {
    store: OnceCell<Arc<dyn ProductStore>>,
    config: AppConfig,
}

impl CliContext {
    /// Create a context for `config` without touching the data file.
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: OnceCell::new(),
            config,
        }
    }

    /// Create a context around an existing store
    pub fn with_store(store: Arc<dyn ProductStore>, config: AppConfig) -> Self {
        Self {
            store: OnceCell::new_with(Some(store)),
            config,
        }
    }

    /// The configured store, opening (and creating) its file on first call.
    pub async fn store(&self) -> Result<&dyn ProductStore, ApiError> {
        let store = self
            .store
            .get_or_try_init(|| async {
                let store = JsonFileProductStore::open(
                    &self.config.store.data_file,
                    self.config.store.options(),
                )
                .await?;
                Ok::<Arc<dyn ProductStore>, ApiError>(Arc::new(store))
            })
            .await?;
        Ok(store.as_ref())
    }

    /// Execute a CLI command, returning the text to print
    pub async fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::List { format } => {
                let products = self.store().await?.list().await?;
                render_products(&products, format)
            }
            Commands::Get { id, format } => {
                let product = self.store().await?.get_by_id(id).await?;
                render_products(std::slice::from_ref(&product), format)
            }
            Commands::Add { input } => {
                let fields = input.clone().into_fields()?;
                let product = self.store().await?.add(fields).await?;
                to_pretty_json(&product)
            }
            Commands::Update { id, input } => {
                let fields = input.clone().into_fields()?;
                let product = self.store().await?.update(id, fields).await?;
                to_pretty_json(&product)
            }
            Commands::Delete { id } => {
                let product = self.store().await?.delete(id).await?;
                to_pretty_json(&product)
            }
            Commands::Demo => self.run_demo().await,
            Commands::Config => self.config.to_toml(),
        }
    }

    async fn run_demo(&self) -> Result<String, ApiError> {
        let store = self.store().await?;
        let mut out = String::new();

        let initial = store.list().await?;
        push_step(&mut out, "Initial products", &initial)?;

        let sample: ProductFields = serde_json::from_value(serde_json::json!({
            "title": "producto prueba",
            "description": "Este es un producto prueba",
            "price": 200,
            "thumbnail": "Sin imagen",
            "code": "abc123",
            "stock": 25
        }))
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
        let added = store.add(sample).await?;
        info!(id = %added.id, "demo product added");
        push_step(&mut out, "Product added", &added)?;

        let mut replacement = ProductFields::default();
        replacement.description = Some("Descripción actualizada".to_string());
        replacement.price = Some(Number::from(250));
        let updated = store.update(&added.id, replacement).await?;
        push_step(&mut out, "Product updated", &updated)?;

        let after_update = store.list().await?;
        push_step(&mut out, "Products after update", &after_update)?;

        let by_id = store.get_by_id(&added.id).await?;
        push_step(&mut out, "Product by id", &by_id)?;

        let deleted = store.delete(&added.id).await?;
        push_step(&mut out, "Product deleted", &deleted)?;

        let after_delete = store.list().await?;
        push_step(&mut out, "Products after delete", &after_delete)?;

        Ok(out.trim_end().to_string())
    }
}

fn push_step<T: serde::Serialize>(out: &mut String, label: &str, value: &T) -> Result<(), ApiError> {
    let body = to_pretty_json(value)?;
    writeln!(out, "{}: {}", label, body)
        .map_err(|e| ApiError::InvalidInput(format!("Failed to format output: {}", e)))
}

fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::InvalidInput(format!("Failed to serialize output: {}", e)))
}

fn render_products(products: &[Product], format: &str) -> Result<String, ApiError> {
    match format {
        "json" => to_pretty_json(products),
        "text" => Ok(products_table(products)),
        other => Err(ApiError::InvalidInput(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn products_table(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products.".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Title", "Code", "Price", "Stock", "Description"]);

    for product in products {
        let f = &product.fields;
        table.add_row(vec![
            product.id.clone(),
            f.title.clone().unwrap_or_default(),
            f.code.clone().unwrap_or_default(),
            f.price.as_ref().map(Number::to_string).unwrap_or_default(),
            f.stock.as_ref().map(Number::to_string).unwrap_or_default(),
            f.description.clone().unwrap_or_default(),
        ]);
    }
    format!("{}\n{} product(s)", table, products.len())
}
