//! folio Generator Library
//!
//! Loads the bookshelf and course list and renders them as HTML.
//!
//! # Modules
//!
//! - [`markdown`] - Markdown to HTML rendering
//! - [`loader`] - Content loading into a [`folio_core::SiteContent`] snapshot
//! - [`template`] - HTML template system with variable interpolation
//! - [`html`] - List, detail, redirect and not-found pages
//! - [`build`] - Build orchestration

pub mod build;
pub mod html;
pub mod loader;
pub mod markdown;
pub mod template;

pub use build::{BuildError, BuildStats, Builder};
pub use html::{HtmlError, HtmlGenerator};
pub use loader::{ContentLoader, LoadError};
pub use markdown::MarkdownRenderer;
pub use template::{Template, TemplateContext, TemplateRegistry};
