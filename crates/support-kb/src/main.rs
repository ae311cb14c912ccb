mod catalog;
mod config;
mod crew;
mod error;
mod model;
mod search;
mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use model::Category;
use server::SupportKbServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting support-kb MCP server");

    let config = Config::from_env()?;
    info!(
        catalog_path = config.catalog_path.as_deref().unwrap_or("<builtin>"),
        tcp = config.tcp_listen_addr.is_some(),
        "configuration loaded"
    );

    let catalog = Arc::new(config.load_catalog()?);
    info!(
        faqs = catalog.documents(Category::Faq).len(),
        troubleshooting = catalog.documents(Category::Troubleshooting).len(),
        policies = catalog.documents(Category::Policy).len(),
        "catalog loaded"
    );
    if catalog.is_empty() {
        warn!("catalog has no documents, every search will return no matches");
    }

    let server = SupportKbServer::new(catalog);

    if let Some(addr) = &config.tcp_listen_addr {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
