mod app;
mod config;
mod error;
mod ui;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    iniciar_tracing(&config)?;

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}

/// Logs go to a file: stdout belongs to the terminal UI.
fn iniciar_tracing(config: &config::AppConfig) -> Result<()> {
    let archivo = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "services={level},cuentas_tui={level}",
            level = config.log_level
        ))
        .with_writer(std::sync::Mutex::new(archivo))
        .with_ansi(false)
        .init();
    Ok(())
}
