use {color_eyre::eyre::eyre, telemetry::LogFormat};

mod analysis;
mod app;
mod error;
mod fairings;
mod models;
mod relay;
mod routes;
mod state;
mod telemetry;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[rocket::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();
    let _log_guard = telemetry::init(LogFormat::from_env());

    app::run()?
        .launch()
        .await
        .map_err(|e| eyre!("Rocket failed: {e}"))?;

    Ok(())
}
