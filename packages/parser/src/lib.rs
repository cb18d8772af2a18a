//! Glossary Parser - Extract a glossary document from semantically tagged markup.
//!
//! A glossary page encodes its entries as a definition list: each item is a
//! `div` holding `dt` terms and `dd` details, with conventional class names
//! marking tags, related terms and "needs updating" notes. This crate reads
//! such a page once and produces an immutable [`GlossaryDocument`] plus the
//! [`PageConfig`] feature flags stored in data attributes.
//!
//! # Example
//!
//! ```
//! use glossary_parser::markup::normalise_whitespace;
//!
//! assert_eq!(normalise_whitespace("  a \n b  "), "a b");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Element locators, theme and page configuration flags
//! - [`types`]: Document model (GlossaryDocument, GlossaryItem, Term, ...)
//! - [`error`]: Error types and Result alias
//! - [`ids`]: Identity generation for items without a persisted id
//! - [`markup`]: Tree navigation and text utilities
//! - [`parser`]: Document extraction
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod ids;
pub mod markup;
pub mod parser;
pub mod types;

// Re-export main functions
pub use parser::{parse_document, parse_html, parse_html_with, parse_item};

// Re-export commonly used items
pub use config::{CardWidth, PageConfig, Theme};
pub use error::{GlossaryError, Result};
pub use ids::{IdGenerator, SequentialGenerator, UuidGenerator};
pub use types::{AboutLink, GlossaryDocument, GlossaryItem, RelatedTerm, TagWithDescription, Term};
