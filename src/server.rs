//! HTTP server: JSON-RPC at `/rpc` and MCP (streamable HTTP) at `/mcp`.
//!
//! Both transports share one [`NotebookService`], and so one document lock.

use anyhow::Result;
use axum::routing::post;
use axum::Router;

use crate::config::NotebookConfig;
use crate::rpc::dispatch::handle_rpc;
use crate::service::NotebookService;
use crate::tools::NotebookTools;

/// Build the HTTP router for a service.
pub fn router(service: NotebookService) -> Router {
    let tools_service = service.clone();
    let mcp = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || Ok(NotebookTools::new(tools_service.clone())),
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    Router::new()
        .route("/rpc", post(handle_rpc))
        .with_state(service)
        .nest_service("/mcp", mcp)
}

/// Open the document, bind the configured address and serve until Ctrl-C.
pub async fn serve(config: NotebookConfig) -> Result<()> {
    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "starting notebook server");

    let service = NotebookService::from_config(&config)?;
    tracing::info!(path = %service.store().path().display(), "document store ready");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "listening at http://{bind_addr}/rpc (JSON-RPC) and /mcp (MCP)");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("server shutting down");
        })
        .await?;

    Ok(())
}
