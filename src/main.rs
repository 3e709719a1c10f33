use std::{path::PathBuf, sync::Arc};

use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use discofy::{
    config, info,
    llm::OpenAiClient,
    pipeline::{Pipeline, PipelineOptions},
    search::TavilyClient,
    server::{self, AppState},
    store::DocumentStore,
    success, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Address to bind the HTTP server to (overrides SERVER_ADDRESS)
    #[clap(long)]
    address: Option<String>,

    /// Directory for the document store (overrides DISCOFY_DATA_DIR)
    #[clap(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file: {}", e);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Both credentials are resolved here, before serving: a missing key
    // terminates the process instead of failing individual requests.
    let llm = Arc::new(OpenAiClient::from_env());
    let search = Arc::new(TavilyClient::from_env());
    success!("API credentials resolved");

    let options = PipelineOptions {
        require_both_links: config::require_both_links(),
        max_search_results: config::search_max_results(),
    };
    let pipeline = Pipeline::new(llm, search, options);

    let data_dir = cli.data_dir.unwrap_or_else(config::data_dir);
    let store = DocumentStore::new(data_dir);

    let state = AppState {
        store: Arc::new(store),
        pipeline: Arc::new(pipeline),
    };

    let addr = cli.address.unwrap_or_else(config::server_addr);
    info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    server::start_api_server(&addr, state).await;
}
