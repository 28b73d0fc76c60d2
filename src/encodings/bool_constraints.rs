use super::{expect_args, expect_array, Registry};
use crate::context::{clause, Literal, ModelContext};
use crate::directives::{ClauseStyle, Directive, DirectiveEmitter};
use crate::error::{EncodingResult, TranslationError};
use crate::model::Constraint;

pub(crate) fn register(registry: &mut Registry) {
    registry.add("bool_eq", Box::new(encode_eq));
    registry.add("bool_ne", Box::new(encode_ne));
    registry.add("bool_not", Box::new(encode_not));
    registry.add("bool_le", Box::new(encode_le));
    registry.add("bool_lt", Box::new(encode_lt));
    registry.add(
        "bool_ge",
        Box::new(|context, emitter, constraint| {
            encode_implication(context, emitter, constraint, true)
        }),
    );
    registry.add(
        "bool_gt",
        Box::new(|context, emitter, constraint| encode_strict(context, emitter, constraint, true)),
    );
    register_gate(registry, "bool_eq_reif", Connective::Eq, ClauseStyle::Disjunction);
    register_gate(registry, "bool_ne_reif", Connective::Xor, ClauseStyle::Numeric);
    register_gate(registry, "bool_xor", Connective::Xor, ClauseStyle::Numeric);
    register_gate(registry, "bool_and", Connective::And, ClauseStyle::Numeric);
    register_gate(registry, "bool_or", Connective::Or, ClauseStyle::Numeric);
    registry.add(
        "bool_le_reif",
        Box::new(|context, emitter, constraint| {
            encode_implication_reif(context, emitter, constraint, false)
        }),
    );
    registry.add(
        "bool_ge_reif",
        Box::new(|context, emitter, constraint| {
            encode_implication_reif(context, emitter, constraint, true)
        }),
    );
    registry.add(
        "bool_right_imp",
        Box::new(|context, emitter, constraint| {
            encode_implication_reif(context, emitter, constraint, false)
        }),
    );
    registry.add(
        "bool_left_imp",
        Box::new(|context, emitter, constraint| {
            encode_implication_reif(context, emitter, constraint, true)
        }),
    );
    registry.add(
        "bool_lt_reif",
        Box::new(|context, emitter, constraint| {
            encode_strict_reif(context, emitter, constraint, false)
        }),
    );
    registry.add(
        "bool_gt_reif",
        Box::new(|context, emitter, constraint| {
            encode_strict_reif(context, emitter, constraint, true)
        }),
    );
    registry.add("array_bool_and", Box::new(encode_array_and));
    registry.add("array_bool_or", Box::new(encode_array_or));
    registry.add("bool_clause", Box::new(encode_bool_clause));
}

fn register_gate(registry: &mut Registry, name: &str, connective: Connective, style: ClauseStyle) {
    registry.add(
        name,
        Box::new(move |context, emitter, constraint| {
            let args = expect_args(constraint, 3)?;
            let a = context.resolve_bool_operand(&args[0])?;
            let b = context.resolve_bool_operand(&args[1])?;
            let r = context.resolve_bool_operand(&args[2])?;
            emit_clauses(emitter, gate_clauses(connective, a, b, r), style);
            Ok(())
        }),
    );
}

/// The two-input gates a reification may bind, selected exhaustively by the
/// Tseitin templates below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    Eq,
    Xor,
    And,
    Or,
}

// The minimal clause set equivalent to `r <-> (a <gate> b)`. One clause per
// truth-table row that would falsify the biconditional, merged where two
// rows collapse into a binary clause.
fn gate_clauses(connective: Connective, a: Literal, b: Literal, r: Literal) -> Vec<Vec<Literal>> {
    match connective {
        Connective::Eq => vec![
            clause![a, -b, -r],
            clause![-a, b, -r],
            clause![-a, -b, r],
            clause![a, b, r],
        ],
        Connective::Xor => vec![
            clause![a, b, -r],
            clause![-a, -b, -r],
            clause![-a, b, r],
            clause![a, -b, r],
        ],
        Connective::And => vec![clause![a, -r], clause![b, -r], clause![-a, -b, r]],
        Connective::Or => vec![clause![-a, r], clause![-b, r], clause![a, b, -r]],
    }
}

fn emit_clauses(
    emitter: &mut dyn DirectiveEmitter,
    clauses: Vec<Vec<Literal>>,
    style: ClauseStyle,
) {
    for literals in clauses {
        emitter.emit(Directive::Clause { literals, style });
    }
}

/// a = b
fn encode_eq(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 2)?;
    let a = context.resolve_bool_operand(&args[0])?;
    let b = context.resolve_bool_operand(&args[1])?;
    emit_clauses(
        emitter,
        vec![clause![-a, b], clause![a, -b]],
        ClauseStyle::Disjunction,
    );
    Ok(())
}

/// a != b
fn encode_ne(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 2)?;
    let a = context.resolve_bool_operand(&args[0])?;
    let b = context.resolve_bool_operand(&args[1])?;
    emit_clauses(
        emitter,
        vec![clause![a, b], clause![-a, -b]],
        ClauseStyle::Numeric,
    );
    Ok(())
}

/// b = not a, as the mutual-negation clause pair.
fn encode_not(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 2)?;
    let a = context.resolve_bool_operand(&args[0])?;
    let b = context.resolve_bool_operand(&args[1])?;
    emit_clauses(
        emitter,
        vec![clause![-a, -b], clause![a, b]],
        ClauseStyle::Disjunction,
    );
    Ok(())
}

/// a <= b, i.e. a implies b.
fn encode_le(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
) -> EncodingResult<()> {
    encode_implication(context, emitter, constraint, false)
}

fn encode_implication(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
    swap: bool,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 2)?;
    let mut a = context.resolve_bool_operand(&args[0])?;
    let mut b = context.resolve_bool_operand(&args[1])?;
    if swap {
        std::mem::swap(&mut a, &mut b);
    }
    emit_clauses(emitter, vec![clause![-a, b]], ClauseStyle::Disjunction);
    Ok(())
}

// r <-> (a implies b), i.e. an or-gate over the negated antecedent.
fn encode_implication_reif(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
    swap: bool,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 3)?;
    let mut a = context.resolve_bool_operand(&args[0])?;
    let mut b = context.resolve_bool_operand(&args[1])?;
    if swap {
        std::mem::swap(&mut a, &mut b);
    }
    let r = context.resolve_bool_operand(&args[2])?;
    emit_clauses(
        emitter,
        gate_clauses(Connective::Or, -a, b, r),
        ClauseStyle::Disjunction,
    );
    Ok(())
}

/// a < b over booleans forces a to 0 and b to 1.
fn encode_lt(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
) -> EncodingResult<()> {
    encode_strict(context, emitter, constraint, false)
}

fn encode_strict(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
    swap: bool,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 2)?;
    let mut a = context.resolve_bool_operand(&args[0])?;
    let mut b = context.resolve_bool_operand(&args[1])?;
    if swap {
        std::mem::swap(&mut a, &mut b);
    }
    match a.constant_value() {
        Some(true) => {
            return Err(TranslationError::UnsupportedConstruct(format!(
                r#"trivially unsatisfiable "{}""#,
                constraint.name()
            )))
        }
        Some(false) => {}
        None => emitter.emit(Directive::Fact(-a)),
    }
    match b.constant_value() {
        Some(false) => {
            return Err(TranslationError::UnsupportedConstruct(format!(
                r#"trivially unsatisfiable "{}""#,
                constraint.name()
            )))
        }
        Some(true) => {}
        None => emitter.emit(Directive::Fact(b)),
    }
    Ok(())
}

// r <-> (not a and b), i.e. an and-gate over the negated first input.
fn encode_strict_reif(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
    swap: bool,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 3)?;
    let mut a = context.resolve_bool_operand(&args[0])?;
    let mut b = context.resolve_bool_operand(&args[1])?;
    if swap {
        std::mem::swap(&mut a, &mut b);
    }
    let r = context.resolve_bool_operand(&args[2])?;
    emit_clauses(
        emitter,
        gate_clauses(Connective::And, -a, b, r),
        ClauseStyle::Disjunction,
    );
    Ok(())
}

/// r <-> (l_1 and ... and l_n)
fn encode_array_and(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 2)?;
    let elements = expect_array(constraint, &args[0])?;
    let literals = elements
        .iter()
        .map(|e| context.resolve_bool_operand(e))
        .collect::<EncodingResult<Vec<Literal>>>()?;
    let r = context.resolve_bool_operand(&args[1])?;
    let mut full_cl: Vec<Literal> = literals.iter().map(|l| l.negate()).collect();
    full_cl.push(r);
    emitter.emit(Directive::Clause {
        literals: full_cl,
        style: ClauseStyle::Numeric,
    });
    for l in literals {
        emitter.emit(Directive::Clause {
            literals: clause![l, -r],
            style: ClauseStyle::Numeric,
        });
    }
    Ok(())
}

/// r <-> (l_1 or ... or l_n)
fn encode_array_or(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 2)?;
    let elements = expect_array(constraint, &args[0])?;
    let literals = elements
        .iter()
        .map(|e| context.resolve_bool_operand(e))
        .collect::<EncodingResult<Vec<Literal>>>()?;
    let r = context.resolve_bool_operand(&args[1])?;
    let mut full_cl = literals.clone();
    full_cl.push(-r);
    emitter.emit(Directive::Clause {
        literals: full_cl,
        style: ClauseStyle::Disjunction,
    });
    for l in literals {
        emitter.emit(Directive::Clause {
            literals: clause![-l, r],
            style: ClauseStyle::Disjunction,
        });
    }
    Ok(())
}

/// A clause over two literal arrays: the first one positive, the second one
/// negated. A constant satisfying the clause suppresses the directive; other
/// constants are dropped from it.
fn encode_bool_clause(
    context: &mut ModelContext<'_>,
    emitter: &mut dyn DirectiveEmitter,
    constraint: &Constraint,
) -> EncodingResult<()> {
    let args = expect_args(constraint, 2)?;
    let pos = expect_array(constraint, &args[0])?
        .iter()
        .map(|e| context.resolve_bool_operand(e))
        .collect::<EncodingResult<Vec<Literal>>>()?;
    let neg = expect_array(constraint, &args[1])?
        .iter()
        .map(|e| context.resolve_bool_operand(e))
        .collect::<EncodingResult<Vec<Literal>>>()?;
    if pos.iter().any(|l| l.constant_value() == Some(true))
        || neg.iter().any(|l| l.constant_value() == Some(false))
    {
        return Ok(());
    }
    let literals: Vec<Literal> = pos
        .into_iter()
        .chain(neg.into_iter().map(Literal::negate))
        .filter(|l| l.constant_value().is_none())
        .collect();
    emitter.emit(Directive::Clause {
        literals,
        style: ClauseStyle::Disjunction,
    });
    Ok(())
}
