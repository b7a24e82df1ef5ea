//! Spar Script - behavior-script compilation for fighters
//!
//! A character definition names a `.rhai` behavior script in its `[files]`
//! section. "Compiling" a fighter produces a [`CompiledScript`] handle (a
//! wrapped Rhai AST); once every slot has compiled, a global link pass
//! validates the full set together. The rest of the engine treats the
//! handle as opaque; the scripting VM's instruction semantics live behind
//! this crate's boundary.

mod compiler;

pub use compiler::{CompiledScript, RhaiCompiler, ScriptBackend};
