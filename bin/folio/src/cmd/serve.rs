//! Serve command - development server over the loaded content

use std::{path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;
use folio_generator::{ContentLoader, HtmlGenerator};
use tokio::net::TcpListener;

use super::site_root;
use crate::server::{AppState, create_router};

/// Run the serve command.
///
/// Loads the content once and renders every page on request.
pub async fn run(config_path: &Path, port: u16) -> Result<()> {
    tracing::info!(?config_path, port, "Starting dev server");

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    let root = site_root(config_path);

    let site = ContentLoader::new(config.clone(), &root)
        .load()
        .wrap_err("Failed to load content")?;
    let static_dir = root.join(&config.content.static_dir);

    println!();
    println!("  Books:    {}", site.books.len());
    println!("  Courses:  {}", site.courses.len());

    let state = Arc::new(AppState::new(site, HtmlGenerator::new(config)));
    let app = create_router(state, &static_dir);
    let addr = format!("127.0.0.1:{port}");

    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Dev server running at http://{addr}");
    println!("  Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app).await.wrap_err("Server error")?;

    Ok(())
}
