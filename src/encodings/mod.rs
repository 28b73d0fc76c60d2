//! The constraint registry and the per-family encoding routines.

mod registry;
pub use registry::Poster;
pub use registry::Registry;

mod bool_constraints;
mod global_constraints;
mod int_constraints;
mod unsupported;

use crate::error::{EncodingResult, TranslationError};
use crate::model::{Constraint, Expr};

// Arity check shared by the encoders; shapes inside the arguments are
// validated by the resolvers.
pub(crate) fn expect_args(constraint: &Constraint, n: usize) -> EncodingResult<&[Expr]> {
    if constraint.args().len() == n {
        Ok(constraint.args())
    } else {
        Err(TranslationError::MalformedArgument(format!(
            r#""{}" expects {} argument(s), got {}"#,
            constraint.name(),
            n,
            constraint.args().len()
        )))
    }
}

pub(crate) fn expect_array<'a>(
    constraint: &Constraint,
    expr: &'a Expr,
) -> EncodingResult<&'a [Expr]> {
    expr.as_array().ok_or_else(|| {
        TranslationError::MalformedArgument(format!(
            r#"expected an array argument in "{}", got {}"#,
            constraint.name(),
            expr
        ))
    })
}
