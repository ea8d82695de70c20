use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use neuromatch_chat::{ChatBackend, DisabledBackend, GenerativeLanguageBackend};
use neuromatch_core::{
    CoreConfig, ReferenceTable, UserStore, DEFAULT_DATASET_PATH, DEFAULT_USER_DATA_DIR,
};

/// Main entry point for the neuromatch screening service.
///
/// Loads the reference dataset, wires the user store and the chat backend,
/// then serves the REST API. A dataset load failure is fatal: the process
/// must not answer screening requests without a loaded table.
///
/// # Environment Variables
/// - `NEUROMATCH_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `NEUROMATCH_DATASET`: Reference dataset CSV path (default: "data/rare_neuro_diseases_dataset.csv")
/// - `NEUROMATCH_USER_DATA_DIR`: Directory for stored user records (default: "user_data")
/// - `GOOGLE_API_KEY`: API key for the chat backend; chat is disabled when unset
/// - `NEUROMATCH_CHAT_MODEL`: Chat model name (default: "gemini-2.5-flash")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or the server itself fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("neuromatch=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("NEUROMATCH_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let dataset_path =
        std::env::var("NEUROMATCH_DATASET").unwrap_or_else(|_| DEFAULT_DATASET_PATH.into());
    let user_data_dir =
        std::env::var("NEUROMATCH_USER_DATA_DIR").unwrap_or_else(|_| DEFAULT_USER_DATA_DIR.into());

    let cfg = Arc::new(CoreConfig::new(
        PathBuf::from(dataset_path),
        PathBuf::from(user_data_dir),
    ));

    let table = Arc::new(ReferenceTable::load(cfg.dataset_path())?);
    tracing::info!(
        "Loaded reference dataset {} ({} rows)",
        cfg.dataset_path().display(),
        table.len()
    );

    let chat: Arc<dyn ChatBackend> = match std::env::var("GOOGLE_API_KEY") {
        Ok(key) if !key.trim().is_empty() => {
            let model = std::env::var("NEUROMATCH_CHAT_MODEL")
                .unwrap_or_else(|_| neuromatch_chat::DEFAULT_MODEL.into());
            tracing::info!("Chat backend configured with model {}", model);
            Arc::new(GenerativeLanguageBackend::new(key, model))
        }
        _ => {
            tracing::warn!("GOOGLE_API_KEY not set, chat endpoint disabled");
            Arc::new(DisabledBackend)
        }
    };

    let state = AppState {
        table,
        users: Arc::new(UserStore::new(cfg)),
        chat,
    };

    tracing::info!("++ Starting neuromatch REST on {}", addr);
    api_rest::serve(&addr, state).await
}
