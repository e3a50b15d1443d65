//! folio Core Library
//!
//! Content model, slug generation, lookup and related-content resolution for
//! the folio portfolio site. Everything here is synchronous and pure once the
//! content has been loaded.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod related;
pub mod repository;
pub mod site;
pub mod slug;

pub use config::Config;
pub use content::{BookRecord, ContentItem, ContentKind, CourseRecord, Metadata};
pub use error::{CoreError, Result};
pub use related::related_to;
pub use repository::ContentRepository;
pub use site::SiteContent;
pub use slug::generate_slug;
