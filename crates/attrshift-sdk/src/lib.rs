//! attrshift SDK
//!
//! High-level API for converting whole view documents from the legacy
//! `attrs` / `states` attributes to inline-expression attributes.

pub mod builder;
pub mod config;
pub mod converter;
pub mod error;
pub mod markup;
pub mod notify;
pub mod report;
pub mod sample;

// Re-export main types
pub use builder::DocumentConverterBuilder;
pub use config::ConverterConfig;
pub use converter::{ConversionOutcome, DocumentConverter, SkippedFragment};
pub use error::{Result, SdkError};
pub use markup::{cleanup_deprecated_widgets, format_markup, validate_markup};
pub use notify::{MemoryNotifier, Notifier, Severity, TracingNotifier};
pub use report::{ConversionReport, Statistics};
pub use sample::SAMPLE_VIEW;

// Re-export commonly used types from dependencies
pub use attrshift_core::{ConversionKind, ConversionRecord, ValidationError};
pub use attrshift_parser::{convert_condition, convert_states};
