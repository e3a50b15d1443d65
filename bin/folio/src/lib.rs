//! folio CLI Library
//!
//! Command implementations and the development server behind the `folio`
//! binary. The binary entry point only parses arguments and dispatches here.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, serve, check, new)
//! - [`server`] - Development server rendering pages from an in-memory snapshot
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use folio::cmd;
//!
//! // Build the static site into the configured output directory
//! cmd::build::run(Path::new("config.toml"), None, None).unwrap();
//! ```

pub mod cmd;
pub mod server;

pub use folio_core::{Config, ContentItem, ContentKind, SiteContent};
pub use folio_generator::{BuildStats, Builder, ContentLoader, HtmlGenerator};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// folio::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
