use vitrine_api::{setup, telemetry, ServerConfig};

// Use mimalloc as the global allocator for lower fragmentation on musl-based images.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = ServerConfig::from_args();

    telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    let (_state, router) = setup::initialize_app(&config).map_err(|e| {
        tracing::error!(error = %format!("{:#}", e), "Startup failed");
        e
    })?;

    setup::server::start_server(&config, router).await?;

    Ok(())
}
