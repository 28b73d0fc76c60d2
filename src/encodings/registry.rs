use crate::context::ModelContext;
use crate::directives::DirectiveEmitter;
use crate::error::{EncodingResult, TranslationError};
use crate::model::Constraint;
use std::collections::HashMap;

/// The type of the functions encoding one constraint family.
///
/// A poster resolves the identifiers it needs through the model context,
/// runs its family's encoding algorithm and appends its directives to the
/// emitter, in the order the algorithm produces them.
pub type Poster = Box<
    dyn Fn(&mut ModelContext<'_>, &mut dyn DirectiveEmitter, &Constraint) -> EncodingResult<()>,
>;

/// The mapping from statement names to their encoding routines.
///
/// The registry is a pure routing layer: it holds no knowledge about any
/// constraint family and performs no argument validation. It is an explicit
/// value owned by the translation run, never ambient state.
pub struct Registry {
    posters: HashMap<String, Poster>,
}

impl Registry {
    /// Builds an empty registry.
    pub fn new() -> Self {
        Registry {
            posters: HashMap::new(),
        }
    }

    /// Builds a registry holding the posters of every supported family.
    pub fn with_default_posters() -> Self {
        let mut registry = Registry::new();
        super::int_constraints::register(&mut registry);
        super::bool_constraints::register(&mut registry);
        super::global_constraints::register(&mut registry);
        super::unsupported::register(&mut registry);
        registry
    }

    /// Inserts the poster for a statement name.
    ///
    /// The last registration for a given name wins, which lets tests
    /// override a family.
    pub fn add<S: Into<String>>(&mut self, name: S, poster: Poster) {
        self.posters.insert(name.into(), poster);
    }

    /// Dispatches a statement to the poster registered for its name.
    ///
    /// A miss is a fatal
    /// [`UnknownConstraint`](TranslationError::UnknownConstraint); whatever
    /// the poster signals is propagated unchanged.
    pub fn post(
        &self,
        context: &mut ModelContext<'_>,
        emitter: &mut dyn DirectiveEmitter,
        constraint: &Constraint,
    ) -> EncodingResult<()> {
        match self.posters.get(constraint.name()) {
            Some(poster) => poster(context, emitter, constraint),
            None => Err(TranslationError::UnknownConstraint(
                constraint.name().to_string(),
            )),
        }
    }

    /// Returns the number of registered statement names.
    pub fn len(&self) -> usize {
        self.posters.len()
    }

    /// Returns `true` iff no poster is registered.
    pub fn is_empty(&self) -> bool {
        self.posters.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_default_posters()
    }
}
