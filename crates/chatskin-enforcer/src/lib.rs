//! Theme enforcement for a third-party chat page.
//!
//! Generates a stylesheet from a typed palette and a versioned selector
//! table, injects it into a [`Document`], and keeps it asserted while the
//! host page rewrites itself:
//! - [`stylesheet`]: pure CSS generation
//! - [`injector`]: single owned style node, create-or-replace
//! - [`pass`]: one reassertion pass
//! - [`reassert`]: the mutation/timer driven loop
//! - [`memory`]: an in-memory document with selector matching and a cascade
//! - [`userscript`]: the same behavior as a browser userscript

pub mod document;
pub mod injector;
pub mod memory;
pub mod pass;
pub mod reassert;
pub mod stylesheet;
pub mod userscript;

#[cfg(test)]
pub(crate) mod testing;

pub use document::{Anchor, Document, MutationRecord, MutationSink};
pub use injector::Injector;
pub use memory::{MemoryDocument, NodeId};
pub use pass::{Enforcer, PassReport};
pub use reassert::{spawn, EnforcerHandle, LoopState, LoopTiming, PassKind, PassStats, Trigger};
pub use stylesheet::{generate_stylesheet, GeneratorOptions};
pub use userscript::{render_userscript, UserscriptOptions};
