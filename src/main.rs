//! QA Match Server - Binary Entry Point
//!
//! Serves the stdio tool server by default, or the REST API when
//! `QA_HTTP_ADDR` is set.

use std::sync::Arc;

use tracing::{error, info};

use qa_match::api::{self, AppState};
use qa_match::server::ToolServer;
use qa_match::tools::register_all_tools;
use qa_match::{logging, Config, KnowledgeBase, QaError, QaResult};

fn main() -> QaResult<()> {
    let config = Config::from_env()?;
    logging::init(&config.log_level)?;

    let kb = Arc::new(KnowledgeBase::open(&config)?);
    info!(
        version = qa_match::VERSION,
        storage = %kb.storage_location(),
        policy = %config.policy,
        threshold = config.threshold,
        "starting qa-match"
    );

    match config.http_addr.as_deref() {
        Some(addr) => run_http(addr, kb),
        None => run_stdio(kb),
    }
}

fn run_stdio(kb: Arc<KnowledgeBase>) -> QaResult<()> {
    let on_signal = Arc::clone(&kb);
    ctrlc::set_handler(move || {
        if let Err(e) = on_signal.flush_stats() {
            error!(error = %e, "failed to flush statistics on shutdown");
        }
        std::process::exit(0);
    })
    .map_err(|e| QaError::Config(format!("cannot install Ctrl+C handler: {}", e)))?;

    let mut server = ToolServer::stdio();
    register_all_tools(&mut server, Arc::clone(&kb));
    info!(tools = server.tool_count(), "tool server ready on stdio");

    server.run()?;
    kb.flush_stats()
}

fn run_http(addr: &str, kb: Arc<KnowledgeBase>) -> QaResult<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(api::serve(addr, Arc::new(AppState::new(kb))))
}
