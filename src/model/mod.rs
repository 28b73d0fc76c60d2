//! The parsed constraint model consumed by the translator.

mod domain;
pub use domain::Domain;

mod expr;
pub use expr::Annotation;
pub use expr::Expr;
pub use expr::SetLiteral;

mod flat_model;
pub use flat_model::Constraint;
pub use flat_model::FlatModel;
