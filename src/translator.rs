//! The driver running a model through the registry, statement by statement.

use crate::context::ModelContext;
use crate::directives::DirectiveEmitter;
use crate::encodings::Registry;
use crate::error::EncodingResult;
use crate::model::FlatModel;
use log::{error, info};

/// A translation run factory: owns the registry and drives the statements of
/// a model through it, in source order.
///
/// Each call to [`translate`](Self::translate) is one run: it builds a fresh
/// [`ModelContext`] so identifier numbering restarts from scratch, which
/// makes the directive stream a deterministic function of the model.
pub struct Translator {
    registry: Registry,
}

impl Translator {
    /// Builds a translator over the default registry.
    pub fn new() -> Self {
        Self::with_registry(Registry::with_default_posters())
    }

    /// Builds a translator over a custom registry.
    pub fn with_registry(registry: Registry) -> Self {
        Translator { registry }
    }

    /// Returns the registry, letting callers add or override posters.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Translates a model, appending the directives of each statement to the
    /// emitter in the order the encoders produce them.
    ///
    /// The run stops at the first error; directives emitted before the
    /// failure are not retracted and the caller must discard the stream.
    pub fn translate(
        &self,
        model: &FlatModel,
        emitter: &mut dyn DirectiveEmitter,
    ) -> EncodingResult<()> {
        let mut context = ModelContext::new(model);
        for constraint in model.constraints() {
            if let Err(e) = self.registry.post(&mut context, emitter, constraint) {
                error!(r#"while translating constraint "{}": {}"#, constraint.name(), e);
                return Err(e);
            }
        }
        info!(
            "translated {} constraint(s) over {} integer and {} boolean variable(s)",
            model.constraints().len(),
            model.n_int_vars(),
            model.n_bool_vars()
        );
        Ok(())
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}
