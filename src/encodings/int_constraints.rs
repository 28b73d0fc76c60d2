use super::{expect_args, expect_array, Registry};
use crate::context::{IntOperand, ModelContext};
use crate::directives::{CmpOp, Directive, DirectiveEmitter, Term};
use crate::error::{EncodingResult, TranslationError};
use crate::model::Constraint;

pub(crate) fn register(registry: &mut Registry) {
    register_comparison(registry, "int_eq", CmpOp::Eq);
    register_comparison(registry, "int_ne", CmpOp::Ne);
    register_comparison(registry, "int_ge", CmpOp::Ge);
    register_comparison(registry, "int_gt", CmpOp::Gt);
    register_comparison(registry, "int_le", CmpOp::Le);
    register_comparison(registry, "int_lt", CmpOp::Lt);
    register_linear(registry, "int_lin_eq", CmpOp::Eq);
    register_linear(registry, "int_lin_ne", CmpOp::Ne);
    register_linear(registry, "int_lin_ge", CmpOp::Ge);
    register_linear(registry, "int_lin_gt", CmpOp::Gt);
    register_linear(registry, "int_lin_le", CmpOp::Le);
    register_linear(registry, "int_lin_lt", CmpOp::Lt);
    registry.add(
        "int_plus",
        Box::new(|context, emitter, constraint| {
            encode_ternary_sum(context, emitter, constraint, [1, 1, -1])
        }),
    );
    registry.add(
        "int_minus",
        Box::new(|context, emitter, constraint| {
            encode_ternary_sum(context, emitter, constraint, [1, -1, -1])
        }),
    );
}

fn register_comparison(registry: &mut Registry, name: &str, op: CmpOp) {
    registry.add(
        name,
        Box::new(move |context, emitter, constraint| {
            encode_comparison(context, emitter, constraint, op)
        }),
    );
    registry.add(
        format!("{}_reif", name),
        Box::new(move |context, emitter, constraint| {
            encode_comparison_reif(context, emitter, constraint, op)
        }),
    );
}

fn register_linear(registry: &mut Registry, name: &str, op: CmpOp) {
    registry.add(
        name,
        Box::new(move |context, emitter, constraint| {
            encode_linear(context, emitter, constraint, op)
        }),
    );
    registry.add(
        format!("{}_reif", name),
        Box::new(move |context, emitter, constraint| {
            encode_linear_reif(context, emitter, constraint, op)
        }),
    );
}

// Classifies a binary comparison into one of the three canonical shapes.
// The all-constant shape leaves nothing to constrain and aborts the run.
fn comparison_shape(
    constraint: &Constraint,
    lhs: IntOperand,
    rhs: IntOperand,
) -> EncodingResult<(Vec<Term>, i64)> {
    match (lhs, rhs) {
        (IntOperand::Variable(a), IntOperand::Variable(b)) => {
            Ok((vec![Term::Var(a), Term::NegVar(b)], 0))
        }
        (IntOperand::Constant { value, .. }, IntOperand::Variable(b)) => {
            Ok((vec![Term::NegVar(b)], -value))
        }
        (IntOperand::Variable(a), IntOperand::Constant { value, .. }) => {
            Ok((vec![Term::Var(a)], value))
        }
        (IntOperand::Constant { .. }, IntOperand::Constant { .. }) => {
            Err(TranslationError::UnsupportedConstruct(format!(
                r#"variable-free constraints are not supported ("{}")"#,
                constraint.name()
            )))
        }
    }
}

fn encode_comparison(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
    op: CmpOp,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 2)?;
    context.intern_symbol(&op.to_string());
    context.intern_symbol("sum");
    context.fresh_element_id();
    let lhs = context.resolve_int_operand(&args[0])?;
    let rhs = context.resolve_int_operand(&args[1])?;
    let (terms, rhs) = comparison_shape(constraint, lhs, rhs)?;
    emitter.emit(Directive::Constraint { terms, op, rhs });
    Ok(())
}

fn encode_comparison_reif(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
    op: CmpOp,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 3)?;
    context.intern_symbol(&op.to_string());
    context.intern_symbol("sum");
    context.fresh_element_id();
    let lhs = context.resolve_int_operand(&args[0])?;
    let rhs = context.resolve_int_operand(&args[1])?;
    let (terms, rhs) = comparison_shape(constraint, lhs, rhs)?;
    let target = context.resolve_reified_target(&args[2])?;
    emitter.emit(Directive::Reified {
        terms,
        op,
        rhs,
        target,
    });
    Ok(())
}

// Walks the coefficient/term arrays in source order, folding constant terms
// into the right-hand side and minting one element id per symbolic term.
fn fold_linear_terms(
    context: &mut ModelContext<'_>,
    constraint: &Constraint,
    op: CmpOp,
) -> EncodingResult<(Vec<Term>, i64)> {
    let args = constraint.args();
    let coeffs = expect_array(constraint, &args[0])?;
    let vars = expect_array(constraint, &args[1])?;
    if coeffs.len() != vars.len() {
        return Err(TranslationError::MalformedArgument(format!(
            r#"coefficient and term arrays of "{}" differ in length ({} vs {})"#,
            constraint.name(),
            coeffs.len(),
            vars.len()
        )));
    }
    context.intern_symbol("*");
    context.intern_symbol("sum");
    context.intern_symbol(&op.to_string());
    let mut rhs = args[2].as_int_const().ok_or_else(|| {
        TranslationError::MalformedArgument(format!(
            r#"the right-hand side of "{}" must be an integer constant, got {}"#,
            constraint.name(),
            args[2]
        ))
    })?;
    let mut terms = Vec::with_capacity(vars.len());
    for (coeff_expr, term_expr) in coeffs.iter().zip(vars.iter()) {
        let coeff = coeff_expr.as_int_const().ok_or_else(|| {
            TranslationError::MalformedArgument(format!(
                r#"coefficients of "{}" must be integer constants, got {}"#,
                constraint.name(),
                coeff_expr
            ))
        })?;
        match context.resolve_int_operand(term_expr)? {
            IntOperand::Constant { value, .. } => rhs -= coeff * value,
            IntOperand::Variable(v) => {
                context.intern_constant(coeff);
                context.fresh_element_id();
                terms.push(Term::Scaled(coeff, v));
            }
        }
    }
    context.intern_constant(rhs);
    if terms.is_empty() {
        return Err(TranslationError::UnsupportedConstruct(format!(
            r#"variable-free constraints are not supported ("{}")"#,
            constraint.name()
        )));
    }
    Ok((terms, rhs))
}

fn encode_linear(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
    op: CmpOp,
) -> EncodingResult<()> {
    expect_args(constraint, 3)?;
    let (terms, rhs) = fold_linear_terms(context, constraint, op)?;
    emitter.emit(Directive::Constraint { terms, op, rhs });
    Ok(())
}

fn encode_linear_reif(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
    op: CmpOp,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 4)?;
    let (terms, rhs) = fold_linear_terms(context, constraint, op)?;
    let target = context.resolve_reified_target(&args[3])?;
    emitter.emit(Directive::Reified {
        terms,
        op,
        rhs,
        target,
    });
    Ok(())
}

// int_plus and int_minus state `a + b = c` and `a - b = c`; both reduce to a
// fixed-sign sum equal to a folded right-hand side.
fn encode_ternary_sum(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
    signs: [i64; 3],
) -> EncodingResult<()> {
    let args = expect_args(constraint, 3)?;
    context.intern_symbol("=");
    context.intern_symbol("sum");
    let mut rhs = 0;
    let mut terms = Vec::with_capacity(3);
    for (expr, &sign) in args.iter().zip(signs.iter()) {
        match context.resolve_int_operand(expr)? {
            IntOperand::Constant { value, .. } => rhs -= sign * value,
            IntOperand::Variable(v) => {
                context.fresh_element_id();
                terms.push(if sign > 0 {
                    Term::Var(v)
                } else {
                    Term::NegVar(v)
                });
            }
        }
    }
    if terms.is_empty() {
        return Err(TranslationError::UnsupportedConstruct(format!(
            r#"variable-free constraints are not supported ("{}")"#,
            constraint.name()
        )));
    }
    emitter.emit(Directive::Constraint {
        terms,
        op: CmpOp::Eq,
        rhs,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directives::BufferedEmitter;
    use crate::model::{Domain, Expr, FlatModel};
    use paste::paste;

    fn model_with_vars(n_int: usize, n_bool: usize) -> FlatModel {
        let mut model = FlatModel::new();
        for i in 0..n_int {
            model.declare_int_var(format!("x{}", i), Domain::Interval(0, 9));
        }
        for i in 0..n_bool {
            model.declare_bool_var(format!("b{}", i));
        }
        model
    }

    fn post_one(model: &FlatModel, constraint: Constraint) -> EncodingResult<String> {
        let registry = Registry::with_default_posters();
        let mut context = ModelContext::new(model);
        let mut emitter = BufferedEmitter::new();
        registry.post(&mut context, &mut emitter, &constraint)?;
        Ok(emitter.into_output())
    }

    macro_rules! comparison_shape_tests {
        ($($name:ident => $sym:expr;)*) => {
            paste! { $(
                #[test]
                fn [<test_ $name _var_var>]() {
                    let model = model_with_vars(2, 0);
                    let c = Constraint::new(
                        stringify!($name),
                        vec![Expr::IntVar(0), Expr::IntVar(1)],
                    );
                    assert_eq!(
                        format!("[CONSTRAINT] x1 - x2 {} 0\n", $sym),
                        post_one(&model, c).unwrap()
                    );
                }

                #[test]
                fn [<test_ $name _const_var>]() {
                    let model = model_with_vars(1, 0);
                    let c = Constraint::new(
                        stringify!($name),
                        vec![Expr::IntConst(5), Expr::IntVar(0)],
                    );
                    assert_eq!(
                        format!("[CONSTRAINT] -x1 {} -5\n", $sym),
                        post_one(&model, c).unwrap()
                    );
                }

                #[test]
                fn [<test_ $name _var_const>]() {
                    let model = model_with_vars(1, 0);
                    let c = Constraint::new(
                        stringify!($name),
                        vec![Expr::IntVar(0), Expr::IntConst(5)],
                    );
                    assert_eq!(
                        format!("[CONSTRAINT] x1 {} 5\n", $sym),
                        post_one(&model, c).unwrap()
                    );
                }

                #[test]
                fn [<test_ $name _const_const_is_rejected>]() {
                    let model = model_with_vars(0, 0);
                    let c = Constraint::new(
                        stringify!($name),
                        vec![Expr::IntConst(1), Expr::IntConst(2)],
                    );
                    assert!(matches!(
                        post_one(&model, c),
                        Err(TranslationError::UnsupportedConstruct(_))
                    ));
                }
            )* }
        };
    }

    comparison_shape_tests! {
        int_eq => "=";
        int_ne => "!=";
        int_ge => ">=";
        int_gt => ">";
        int_le => "<=";
        int_lt => "<";
    }

    #[test]
    fn test_comparison_reif() {
        let model = model_with_vars(2, 1);
        let c = Constraint::new(
            "int_eq_reif",
            vec![Expr::IntVar(0), Expr::IntVar(1), Expr::BoolVar(0)],
        );
        assert_eq!(
            "[REIFIED] x1 - x2 = 0 <-> b1\n",
            post_one(&model, c).unwrap()
        );
    }

    #[test]
    fn test_comparison_reif_rejects_constant_target() {
        let model = model_with_vars(2, 0);
        let c = Constraint::new(
            "int_le_reif",
            vec![Expr::IntVar(0), Expr::IntVar(1), Expr::BoolConst(true)],
        );
        assert!(matches!(
            post_one(&model, c),
            Err(TranslationError::MalformedArgument(_))
        ));
    }

    #[test]
    fn test_comparison_wrong_arity() {
        let model = model_with_vars(1, 0);
        let c = Constraint::new("int_eq", vec![Expr::IntVar(0)]);
        assert!(matches!(
            post_one(&model, c),
            Err(TranslationError::MalformedArgument(_))
        ));
    }

    #[test]
    fn test_linear_all_variables() {
        let model = model_with_vars(2, 0);
        let c = Constraint::new(
            "int_lin_le",
            vec![
                Expr::Array(vec![Expr::IntConst(3), Expr::IntConst(-2)]),
                Expr::Array(vec![Expr::IntVar(0), Expr::IntVar(1)]),
                Expr::IntConst(7),
            ],
        );
        assert_eq!(
            "[CONSTRAINT] 3x1 + -2x2 <= 7\n",
            post_one(&model, c).unwrap()
        );
    }

    #[test]
    fn test_linear_folds_constant_terms() {
        // 2*x + 3*4 + 5*y = 20 folds to 2x + 5y = 8, with no printed term
        // for the folded position.
        let model = model_with_vars(2, 0);
        let c = Constraint::new(
            "int_lin_eq",
            vec![
                Expr::Array(vec![
                    Expr::IntConst(2),
                    Expr::IntConst(3),
                    Expr::IntConst(5),
                ]),
                Expr::Array(vec![Expr::IntVar(0), Expr::IntConst(4), Expr::IntVar(1)]),
                Expr::IntConst(20),
            ],
        );
        assert_eq!(
            "[CONSTRAINT] 2x1 + 5x2 = 8\n",
            post_one(&model, c).unwrap()
        );
    }

    #[test]
    fn test_linear_length_mismatch_is_fatal() {
        let model = model_with_vars(1, 0);
        let c = Constraint::new(
            "int_lin_eq",
            vec![
                Expr::Array(vec![Expr::IntConst(1), Expr::IntConst(2)]),
                Expr::Array(vec![Expr::IntVar(0)]),
                Expr::IntConst(0),
            ],
        );
        assert!(matches!(
            post_one(&model, c),
            Err(TranslationError::MalformedArgument(_))
        ));
    }

    #[test]
    fn test_linear_all_terms_folded_is_rejected() {
        let model = model_with_vars(0, 0);
        let c = Constraint::new(
            "int_lin_eq",
            vec![
                Expr::Array(vec![Expr::IntConst(1), Expr::IntConst(2)]),
                Expr::Array(vec![Expr::IntConst(3), Expr::IntConst(4)]),
                Expr::IntConst(11),
            ],
        );
        assert!(matches!(
            post_one(&model, c),
            Err(TranslationError::UnsupportedConstruct(_))
        ));
    }

    #[test]
    fn test_linear_reif() {
        let model = model_with_vars(2, 1);
        let c = Constraint::new(
            "int_lin_ge_reif",
            vec![
                Expr::Array(vec![Expr::IntConst(1), Expr::IntConst(1)]),
                Expr::Array(vec![Expr::IntVar(0), Expr::IntVar(1)]),
                Expr::IntConst(3),
                Expr::BoolVar(0),
            ],
        );
        assert_eq!(
            "[REIFIED] 1x1 + 1x2 >= 3 <-> b1\n",
            post_one(&model, c).unwrap()
        );
    }

    #[test]
    fn test_linear_reif_rejects_constant_target() {
        let model = model_with_vars(1, 0);
        let c = Constraint::new(
            "int_lin_eq_reif",
            vec![
                Expr::Array(vec![Expr::IntConst(1)]),
                Expr::Array(vec![Expr::IntVar(0)]),
                Expr::IntConst(0),
                Expr::BoolConst(false),
            ],
        );
        assert!(matches!(
            post_one(&model, c),
            Err(TranslationError::MalformedArgument(_))
        ));
    }

    #[test]
    fn test_linear_non_constant_coefficient_is_rejected() {
        let model = model_with_vars(2, 0);
        let c = Constraint::new(
            "int_lin_eq",
            vec![
                Expr::Array(vec![Expr::IntVar(0)]),
                Expr::Array(vec![Expr::IntVar(1)]),
                Expr::IntConst(0),
            ],
        );
        assert!(matches!(
            post_one(&model, c),
            Err(TranslationError::MalformedArgument(_))
        ));
    }

    #[test]
    fn test_int_plus_all_variables() {
        let model = model_with_vars(3, 0);
        let c = Constraint::new(
            "int_plus",
            vec![Expr::IntVar(0), Expr::IntVar(1), Expr::IntVar(2)],
        );
        assert_eq!(
            "[CONSTRAINT] x1 + x2 - x3 = 0\n",
            post_one(&model, c).unwrap()
        );
    }

    #[test]
    fn test_int_plus_folds_result_constant() {
        // x + y = 7 becomes x + y = 7 on the folded side.
        let model = model_with_vars(2, 0);
        let c = Constraint::new(
            "int_plus",
            vec![Expr::IntVar(0), Expr::IntVar(1), Expr::IntConst(7)],
        );
        assert_eq!(
            "[CONSTRAINT] x1 + x2 = 7\n",
            post_one(&model, c).unwrap()
        );
    }

    #[test]
    fn test_int_minus_folds_subtrahend() {
        // x - 3 = y becomes x - y = 3.
        let model = model_with_vars(2, 0);
        let c = Constraint::new(
            "int_minus",
            vec![Expr::IntVar(0), Expr::IntConst(3), Expr::IntVar(1)],
        );
        assert_eq!(
            "[CONSTRAINT] x1 - x2 = 3\n",
            post_one(&model, c).unwrap()
        );
    }

    #[test]
    fn test_int_plus_all_constants_is_rejected() {
        let model = model_with_vars(0, 0);
        let c = Constraint::new(
            "int_plus",
            vec![Expr::IntConst(1), Expr::IntConst(2), Expr::IntConst(3)],
        );
        assert!(matches!(
            post_one(&model, c),
            Err(TranslationError::UnsupportedConstruct(_))
        ));
    }
}
