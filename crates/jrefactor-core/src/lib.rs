//! jrefactor core
//!
//! Lossless syntax trees for Java source and a mutation engine that edits
//! them without disturbing formatting. Parsed files print back
//! byte-for-byte; edited files keep every untouched byte and format new
//! nodes after the indentation found around them.

pub mod config;
pub mod diff;
pub mod error;
pub mod lst;
pub mod mutation;
pub mod parser;
pub mod printer;
pub mod result;
pub mod round_trip;
pub mod style;
pub mod visitor;

pub use config::{
    ConfigLoader, IndentStyle, JrefactorConfig, StyleConfiguration, install_style_defaults,
    style_defaults,
};
pub use diff::TreeDiff;
pub use error::{ErrorKind, RefactorError};
pub use lst::{CompilationUnit, Formatting, NodeId, NodeKind, NodeRef, Tree};
pub use mutation::{
    Applied, EditDescriptor, FieldSpec, ImportSpec, InsertPosition, MutationEngine, ScopedEdit,
};
pub use parser::{ParseError, parse_compilation_unit, parse_expression, parse_statement};
pub use printer::{Printer, print_node, print_trimmed, render, render_with};
pub use result::Result;
pub use round_trip::{RoundTripValidator, ValidationResult};
pub use style::{IndentUnit, StyleInference};
pub use visitor::{NodePath, VisitFlow, Visitor, find_path, walk};

/// Initialize the tracing subscriber for logging
///
/// Honors `RUST_LOG`; defaults to `jrefactor=info`. Does nothing when a
/// global subscriber is already installed.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jrefactor=info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
