use graphtalk::{
    AppConfig, AppState, ArangoClient, ChatClient, CodeRunner, GraphQaChain, HttpServer,
    VizCodeChain,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("GraphTalk v{}", graphtalk::version());

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = match ArangoClient::connect(&config.arango).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    info!(
        url = %config.arango.url,
        database = %config.arango.database,
        "connected to ArangoDB"
    );

    let state = match build_state(&config, db) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let server = HttpServer::new(state, config.http_port);
    if let Err(e) = server.start().await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

fn build_state(config: &AppConfig, db: Arc<ArangoClient>) -> graphtalk::LlmResult<AppState> {
    let qa_llm = ChatClient::new(&config.qa_llm)?;
    let coder_llm = ChatClient::new(&config.coder_llm)?;

    let qa = GraphQaChain::new(db, qa_llm);
    let viz = VizCodeChain::new(qa.clone(), coder_llm);

    let work_dir = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let runner = CodeRunner::new(config.python_bin.clone(), work_dir);

    Ok(AppState { qa, viz, runner })
}
