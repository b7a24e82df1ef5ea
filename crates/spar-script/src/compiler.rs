//! Rhai engine setup, compiled-script handles, and the link pass

use rhai::{Engine, AST};
use spar_core::{Result, SparError};
use spar_def::{first_section, parse_sections};
use std::path::Path;

/// Compiled behavior code for one fighter slot.
///
/// Opaque to the loader; only this crate looks inside.
#[derive(Debug)]
pub struct CompiledScript {
    slot: usize,
    ast: AST,
}

impl CompiledScript {
    /// An empty script for the given slot (used by test fakes and cleared slots).
    pub fn empty(slot: usize) -> Self {
        Self {
            slot,
            ast: AST::empty(),
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Check whether the script defines a function with the given name.
    pub fn has_entry(&self, name: &str) -> bool {
        self.ast.iter_functions().any(|f| f.name == name)
    }
}

/// Script compiler contract consumed by the load session.
///
/// `compile` is invoked once per fighter slot with the slot index and the
/// resolved character definition path; `link` runs once per session over
/// every compiled script after all slots are done.
pub trait ScriptBackend: Send + Sync {
    fn compile(&self, slot: usize, def: &Path) -> Result<CompiledScript>;
    fn link(&self, scripts: &[&CompiledScript]) -> Result<()>;
}

/// The engine's real backend: compiles the `.rhai` script named by the
/// character definition's `[files]` section.
pub struct RhaiCompiler {
    engine: Engine,
}

impl Default for RhaiCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl RhaiCompiler {
    pub fn new() -> Self {
        Self {
            engine: Engine::new(),
        }
    }

    /// Compile behavior source directly (no file access).
    pub fn compile_source(&self, slot: usize, source: &str) -> Result<CompiledScript> {
        let ast = self
            .engine
            .compile(source)
            .map_err(|e| SparError::CompileError(e.to_string()))?;
        Ok(CompiledScript { slot, ast })
    }
}

impl ScriptBackend for RhaiCompiler {
    fn compile(&self, slot: usize, def: &Path) -> Result<CompiledScript> {
        let text = std::fs::read_to_string(def)?;
        let sections = parse_sections(&text);
        let script_name = first_section(&sections, "files")
            .and_then(|s| s.get("script"))
            .ok_or_else(|| {
                SparError::CompileError(format!(
                    "{}: no behavior script declared in [files]",
                    def.display()
                ))
            })?;

        let script_path = def
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(script_name);
        let source = std::fs::read_to_string(&script_path)?;
        log::debug!(
            "compiling behavior script {} for slot {}",
            script_path.display(),
            slot
        );
        self.compile_source(slot, &source)
    }

    fn link(&self, scripts: &[&CompiledScript]) -> Result<()> {
        for script in scripts {
            if !script.has_entry("on_tick") {
                return Err(SparError::LinkError(format!(
                    "slot {}: behavior script defines no on_tick entry",
                    script.slot
                )));
            }
        }
        log::debug!("linked {} behavior scripts", scripts.len());
        Ok(())
    }
}
