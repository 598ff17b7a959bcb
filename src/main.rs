use dotenvy::dotenv;
use food_ninja_api::{
    api::{self, AppState},
    config::{
        database::Stores,
        seed::{load_seed, seed_catalog},
        settings::Settings,
    },
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Settings and seed data
    let settings = Settings::from_env()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    let seed = load_seed(&settings.seed_path)
        .inspect_err(|e| error!("Failed to load seed data: {}", e))?;
    let gazetteer = seed.gazetteer();
    info!("Gazetteer loaded with {} zip codes.", gazetteer.len());

    // 4. Connect both stores and create tables
    let stores = Stores::connect(&settings)
        .await
        .inspect(|_| info!("Stores initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize stores: {}", e))?;

    // 5. Seed the catalog on first run
    seed_catalog(&stores, &seed)
        .await
        .inspect_err(|e| error!("Failed to seed catalog: {}", e))?;

    // 6. Serve
    api::serve(AppState::new(stores, gazetteer, settings)).await
}
