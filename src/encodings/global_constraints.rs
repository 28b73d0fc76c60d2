use super::{expect_args, expect_array, Registry};
use crate::context::{IntOperand, ModelContext};
use crate::directives::{Directive, DirectiveEmitter, TermValue};
use crate::error::{EncodingResult, TranslationError};
use crate::model::{Constraint, Expr};
use log::debug;

pub(crate) fn register(registry: &mut Registry) {
    registry.add("all_different_int", Box::new(encode_all_different));
    registry.add("g12fd_int_all_different", Box::new(encode_all_different));
    registry.add(
        "all_different_int_reif",
        Box::new(encode_all_different_reif),
    );
    registry.add("bool2int", Box::new(encode_bool2int));
    registry.add("int_in", Box::new(encode_int_in));
}

fn resolve_term_value(
    context: &mut ModelContext<'_>,
    expr: &Expr,
) -> EncodingResult<TermValue> {
    Ok(match context.resolve_int_operand(expr)? {
        IntOperand::Variable(v) => TermValue::Var(v),
        IntOperand::Constant { value, .. } => TermValue::Const(value),
    })
}

/// One atom over the `distinct` relation, listing the resolved arguments.
fn encode_all_different(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 1)?;
    let elements = expect_array(constraint, &args[0])?;
    context.intern_symbol("distinct");
    let mut resolved = Vec::with_capacity(elements.len());
    for element in elements {
        context.fresh_element_id();
        resolved.push(resolve_term_value(context, element)?);
    }
    emitter.emit(Directive::AllDifferent(resolved));
    Ok(())
}

/// One element fact per argument, then the `distinct` atom over the elements
/// bound to the reified boolean.
fn encode_all_different_reif(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 2)?;
    let element_exprs = expect_array(constraint, &args[0])?;
    context.intern_symbol("distinct");
    let mut elements = Vec::with_capacity(element_exprs.len());
    for expr in element_exprs {
        let element = context.fresh_element_id();
        let value = resolve_term_value(context, expr)?;
        emitter.emit(Directive::Element { element, value });
        elements.push(element);
    }
    let target = context.resolve_bool_operand(&args[1])?;
    emitter.emit(Directive::ReifiedAllDifferent { elements, target });
    Ok(())
}

/// Links a boolean literal to an integer variable whose domain must be
/// exactly {0,1}.
fn encode_bool2int(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 2)?;
    let literal = context.resolve_bool_operand(&args[0])?;
    let handle = match &args[1] {
        Expr::IntVar(handle) => *handle,
        other => {
            return Err(TranslationError::MalformedArgument(format!(
                r#"the second argument of "{}" must be an integer variable, got {}"#,
                constraint.name(),
                other
            )))
        }
    };
    let domain = context.int_var_domain(handle);
    if !domain.is_zero_one() {
        return Err(TranslationError::DomainMismatch(format!(
            "int variable in bool2int must have the domain 0..1, got {}",
            domain
        )));
    }
    let int_var = context.resolve_int_var(handle);
    emitter.emit(Directive::Bool2Int { literal, int_var });
    Ok(())
}

/// The declared domain of the variable already carries the restriction, so
/// there is nothing to encode.
fn encode_int_in(
    _context: &mut ModelContext<'_>,
    _emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
) -> EncodingResult<()> {
    expect_args(constraint, 2)?;
    debug!(
        r#""{}" restates the declared domain of its variable; nothing to encode"#,
        constraint.name()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directives::BufferedEmitter;
    use crate::model::{Domain, FlatModel, SetLiteral};

    fn post_one(model: &FlatModel, constraint: Constraint) -> EncodingResult<String> {
        let registry = Registry::with_default_posters();
        let mut context = ModelContext::new(model);
        let mut emitter = BufferedEmitter::new();
        registry.post(&mut context, &mut emitter, &constraint)?;
        Ok(emitter.into_output())
    }

    #[test]
    fn test_all_different() {
        let mut model = FlatModel::new();
        for name in ["v1", "v2", "v3"] {
            model.declare_int_var(name, Domain::Interval(0, 9));
        }
        let c = Constraint::new(
            "all_different_int",
            vec![Expr::Array(vec![
                Expr::IntVar(0),
                Expr::IntVar(1),
                Expr::IntVar(2),
            ])],
        );
        assert_eq!(
            "[ALLDIFFERENT] x1 x2 x3\n",
            post_one(&model, c).unwrap()
        );
    }

    #[test]
    fn test_all_different_alias() {
        let mut model = FlatModel::new();
        model.declare_int_var("v", Domain::Interval(0, 9));
        let c = Constraint::new(
            "g12fd_int_all_different",
            vec![Expr::Array(vec![Expr::IntVar(0)])],
        );
        assert_eq!("[ALLDIFFERENT] x1\n", post_one(&model, c).unwrap());
    }

    #[test]
    fn test_all_different_with_constant() {
        let mut model = FlatModel::new();
        model.declare_int_var("v", Domain::Interval(0, 9));
        let c = Constraint::new(
            "all_different_int",
            vec![Expr::Array(vec![Expr::IntVar(0), Expr::IntConst(7)])],
        );
        assert_eq!("[ALLDIFFERENT] x1 7\n", post_one(&model, c).unwrap());
    }

    #[test]
    fn test_all_different_reif() {
        let mut model = FlatModel::new();
        model.declare_int_var("v1", Domain::Interval(0, 9));
        model.declare_int_var("v2", Domain::Interval(0, 9));
        model.declare_bool_var("r");
        let c = Constraint::new(
            "all_different_int_reif",
            vec![
                Expr::Array(vec![Expr::IntVar(0), Expr::IntConst(5), Expr::IntVar(1)]),
                Expr::BoolVar(0),
            ],
        );
        assert_eq!(
            "[ELEMENT] e1 x1\n[ELEMENT] e2 5\n[ELEMENT] e3 x2\n[ALLDIFFERENT] e1 e2 e3 <-> b1\n",
            post_one(&model, c).unwrap()
        );
    }

    #[test]
    fn test_all_different_reif_accepts_constant_target() {
        let mut model = FlatModel::new();
        model.declare_int_var("v", Domain::Interval(0, 9));
        let c = Constraint::new(
            "all_different_int_reif",
            vec![Expr::Array(vec![Expr::IntVar(0)]), Expr::BoolConst(true)],
        );
        assert_eq!(
            "[ELEMENT] e1 x1\n[ALLDIFFERENT] e1 <-> 1\n",
            post_one(&model, c).unwrap()
        );
    }

    #[test]
    fn test_bool2int_interval_domain() {
        let mut model = FlatModel::new();
        model.declare_int_var("x", Domain::Interval(0, 1));
        model.declare_bool_var("b");
        let c = Constraint::new("bool2int", vec![Expr::BoolVar(0), Expr::IntVar(0)]);
        assert_eq!("[BOOL2INT] b1 x1\n", post_one(&model, c).unwrap());
    }

    #[test]
    fn test_bool2int_set_domain() {
        let mut model = FlatModel::new();
        model.declare_int_var("x", Domain::values(vec![1, 0]));
        model.declare_bool_var("b");
        let c = Constraint::new("bool2int", vec![Expr::BoolVar(0), Expr::IntVar(0)]);
        assert_eq!("[BOOL2INT] b1 x1\n", post_one(&model, c).unwrap());
    }

    #[test]
    fn test_bool2int_constant_bool() {
        let mut model = FlatModel::new();
        model.declare_int_var("x", Domain::Interval(0, 1));
        let c = Constraint::new("bool2int", vec![Expr::BoolConst(true), Expr::IntVar(0)]);
        assert_eq!("[BOOL2INT] 1 x1\n", post_one(&model, c).unwrap());
    }

    #[test]
    fn test_bool2int_domain_mismatch() {
        let mut model = FlatModel::new();
        model.declare_int_var("x", Domain::Interval(0, 3));
        model.declare_bool_var("b");
        let c = Constraint::new("bool2int", vec![Expr::BoolVar(0), Expr::IntVar(0)]);
        match post_one(&model, c) {
            Err(TranslationError::DomainMismatch(msg)) => {
                assert!(msg.contains("0..3"), "unexpected message: {}", msg)
            }
            other => panic!("expected a domain mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_bool2int_rejects_constant_int() {
        let mut model = FlatModel::new();
        model.declare_bool_var("b");
        let c = Constraint::new("bool2int", vec![Expr::BoolVar(0), Expr::IntConst(1)]);
        assert!(matches!(
            post_one(&model, c),
            Err(TranslationError::MalformedArgument(_))
        ));
    }

    #[test]
    fn test_int_in_encodes_nothing() {
        let mut model = FlatModel::new();
        model.declare_int_var("x", Domain::Interval(1, 3));
        let c = Constraint::new(
            "int_in",
            vec![Expr::IntVar(0), Expr::SetLit(SetLiteral::Range(1, 3))],
        );
        assert_eq!("", post_one(&model, c).unwrap());
    }
}
