use super::{Poster, Registry};
use crate::error::TranslationError;

// These families are rejected, never approximated: no partial output is
// emitted for them.
pub(crate) fn register(registry: &mut Registry) {
    registry.add(
        "int_times",
        reject("nonlinear constraints are not supported (multiplication)"),
    );
    registry.add(
        "int_div",
        reject("nonlinear constraints are not supported (division)"),
    );
    registry.add(
        "int_mod",
        reject("nonlinear constraints are not supported (modulo)"),
    );
    registry.add(
        "int_min",
        reject("nonlinear constraints are not supported (minimum)"),
    );
    registry.add(
        "int_max",
        reject("nonlinear constraints are not supported (maximum)"),
    );
    registry.add(
        "int_abs",
        reject("nonlinear constraints are not supported (absolute value)"),
    );
    registry.add(
        "int_negate",
        reject("nonlinear constraints are not supported (negation)"),
    );
    for name in [
        "array_int_element",
        "array_var_int_element",
        "array_bool_element",
        "array_var_bool_element",
    ] {
        registry.add(name, reject("element constraints are not supported"));
    }
    for name in [
        "set_eq",
        "set_ne",
        "set_union",
        "set_intersect",
        "set_diff",
        "set_symdiff",
        "set_subset",
        "set_superset",
        "set_card",
        "set_in",
        "set_eq_reif",
        "equal_reif",
        "set_ne_reif",
        "set_subset_reif",
        "set_superset_reif",
        "set_in_reif",
        "set_disjoint",
        "disjoint",
        "array_set_element",
        "array_var_set_element",
    ] {
        registry.add(name, reject("set constraints are not supported"));
    }
}

fn reject(reason: &'static str) -> Poster {
    Box::new(move |_, _, constraint| {
        Err(TranslationError::UnsupportedConstruct(format!(
            r#"{} ("{}")"#,
            reason,
            constraint.name()
        )))
    })
}
