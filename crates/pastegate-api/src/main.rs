use pastegate_api::setup;
use pastegate_core::Config;

// Use mimalloc as the global allocator for lower fragmentation in long-running containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (storage, metadata, sessions, routes)
    let app = setup::initialize_app(config.clone()).await?;

    // Start the server
    setup::server::start_server(&config, app).await?;

    Ok(())
}
