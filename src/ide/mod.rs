//! IDE features: High-level APIs for editor requests.
//!
//! This module provides the interface between the validated model (HIR)
//! and an editor protocol server. Each function corresponds to one request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No LSP types**: Uses our own types, converted at the protocol boundary
//! 3. **Composable**: Built on top of the document view and factory bindings
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use confit::ide::AnalysisHost;
//!
//! let host = AnalysisHost::new(catalog);
//! let analysis = host.analysis("file:///config.toml", text)?;
//! let hints = analysis.inlay_hints(range);
//! ```

mod analysis;
mod completion;
mod goto;
mod hover;
mod inlay_hints;

pub use analysis::{Analysis, AnalysisHost};
pub use completion::{CompletionItem, CompletionKind, completions};
pub use goto::{GotoResult, GotoTarget, goto_definition};
pub use hover::{HoverResult, hover};
pub use inlay_hints::{InlayHint, InlayHintKind, inlay_hints};
