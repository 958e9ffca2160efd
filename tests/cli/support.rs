use product_store::config::AppConfig;
use product_store::tooling::cli::CliContext;
use tempfile::TempDir;

/// CLI context over a store file inside `temp_dir`.
pub async fn context_in(temp_dir: &TempDir) -> CliContext {
    let mut config = AppConfig::default();
    config.store.data_file = temp_dir.path().join("products.json");
    CliContext::new(config)
}
