//! Identifier spaces and the per-run model context.

mod ids;
pub(crate) use ids::clause;
pub use ids::BoolVarId;
pub use ids::ConstantId;
pub use ids::ElementId;
pub use ids::IntVarId;
pub use ids::Literal;
pub use ids::SymbolId;

mod model_context;
pub use model_context::IntOperand;
pub use model_context::ModelContext;
