use crate::context::{BoolVarId, ElementId, IntVarId, Literal};
use std::fmt::Display;
use strum_macros::{Display as StrumDisplay, EnumIter};

/// A comparison operator, rendered with its solver-side spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, EnumIter)]
pub enum CmpOp {
    /// Equality.
    #[strum(serialize = "=")]
    Eq,
    /// Disequality.
    #[strum(serialize = "!=")]
    Ne,
    /// Greater than or equal.
    #[strum(serialize = ">=")]
    Ge,
    /// Strictly greater than.
    #[strum(serialize = ">")]
    Gt,
    /// Less than or equal.
    #[strum(serialize = "<=")]
    Le,
    /// Strictly less than.
    #[strum(serialize = "<")]
    Lt,
}

/// A printed term of a scalar or linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// A variable with an implicit unit coefficient.
    Var(IntVarId),
    /// A variable with an implicit coefficient of minus one.
    NegVar(IntVarId),
    /// A variable scaled by an explicit coefficient.
    Scaled(i64, IntVarId),
}

/// The resolved value bound to an element or listed by a global atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermValue {
    /// An integer variable.
    Var(IntVarId),
    /// An integer constant.
    Const(i64),
}

/// The rendering of a clause directive.
///
/// Both forms carry the same literal convention; they differ only in the line
/// grammar the downstream solver expects for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseStyle {
    /// A `[DISJUNCTION]` line with named literal tokens.
    Disjunction,
    /// A raw numeric clause line with signed identifiers.
    Numeric,
}

/// A primitive directive, immutable once emitted.
///
/// The [`Display`] implementation renders the exact, newline-free line
/// grammar consumed by the downstream solver; emitters append the terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// A scalar or linear constraint over integer terms.
    Constraint {
        /// The printed symbolic terms, in source order.
        terms: Vec<Term>,
        /// The comparison operator.
        op: CmpOp,
        /// The (possibly folded) right-hand side.
        rhs: i64,
    },
    /// A constraint bound to a boolean variable by a biconditional.
    Reified {
        /// The printed symbolic terms, in source order.
        terms: Vec<Term>,
        /// The comparison operator.
        op: CmpOp,
        /// The (possibly folded) right-hand side.
        rhs: i64,
        /// The boolean the comparison is bound to.
        target: BoolVarId,
    },
    /// A disjunction of literals.
    Clause {
        /// The literals of the clause.
        literals: Vec<Literal>,
        /// The line grammar to render the clause with.
        style: ClauseStyle,
    },
    /// A single forced literal.
    Fact(Literal),
    /// An all-different atom over resolved terms.
    AllDifferent(Vec<TermValue>),
    /// An all-different atom over element identifiers, bound to a boolean.
    ReifiedAllDifferent {
        /// The elements the atom ranges over, in argument order.
        elements: Vec<ElementId>,
        /// The literal the atom is bound to.
        target: Literal,
    },
    /// An auxiliary fact binding an element identifier to its resolved value.
    Element {
        /// The element identifier.
        element: ElementId,
        /// The resolved value.
        value: TermValue,
    },
    /// A coercion fact linking a boolean literal to an integer variable.
    Bool2Int {
        /// The boolean side of the coercion.
        literal: Literal,
        /// The integer side of the coercion.
        int_var: IntVarId,
    },
}

fn fmt_terms(f: &mut std::fmt::Formatter<'_>, terms: &[Term]) -> std::fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        if i == 0 {
            match term {
                Term::Var(v) => write!(f, "x{}", v)?,
                Term::NegVar(v) => write!(f, "-x{}", v)?,
                Term::Scaled(c, v) => write!(f, "{}x{}", c, v)?,
            }
        } else {
            match term {
                Term::Var(v) => write!(f, " + x{}", v)?,
                Term::NegVar(v) => write!(f, " - x{}", v)?,
                Term::Scaled(c, v) => write!(f, " + {}x{}", c, v)?,
            }
        }
    }
    Ok(())
}

// The token form used by [DISJUNCTION] and [BOOL2INT] lines, where the
// reserved identifiers are rendered as the 1/0 constants they stand for.
fn fmt_literal_token(f: &mut std::fmt::Formatter<'_>, literal: &Literal) -> std::fmt::Result {
    match literal.constant_value() {
        Some(true) => write!(f, "1"),
        Some(false) => write!(f, "0"),
        None => {
            if literal.is_negated() {
                write!(f, "-b{}", literal.var())
            } else {
                write!(f, "b{}", literal.var())
            }
        }
    }
}

fn fmt_term_value(f: &mut std::fmt::Formatter<'_>, value: &TermValue) -> std::fmt::Result {
    match value {
        TermValue::Var(v) => write!(f, "x{}", v),
        TermValue::Const(n) => write!(f, "{}", n),
    }
}

impl Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Directive::Constraint { terms, op, rhs } => {
                write!(f, "[CONSTRAINT] ")?;
                fmt_terms(f, terms)?;
                write!(f, " {} {}", op, rhs)
            }
            Directive::Reified {
                terms,
                op,
                rhs,
                target,
            } => {
                write!(f, "[REIFIED] ")?;
                fmt_terms(f, terms)?;
                write!(f, " {} {} <-> b{}", op, rhs, target)
            }
            Directive::Clause { literals, style } => match style {
                ClauseStyle::Disjunction => {
                    write!(f, "[DISJUNCTION]")?;
                    for literal in literals {
                        write!(f, " ")?;
                        fmt_literal_token(f, literal)?;
                    }
                    Ok(())
                }
                ClauseStyle::Numeric => {
                    write!(f, "1 0 0 0 {}", literals.len())?;
                    for literal in literals {
                        write!(f, " {}", literal)?;
                    }
                    Ok(())
                }
            },
            Directive::Fact(literal) => write!(f, "[FACT] {}", literal),
            Directive::AllDifferent(args) => {
                write!(f, "[ALLDIFFERENT]")?;
                for arg in args {
                    write!(f, " ")?;
                    fmt_term_value(f, arg)?;
                }
                Ok(())
            }
            Directive::ReifiedAllDifferent { elements, target } => {
                write!(f, "[ALLDIFFERENT]")?;
                for element in elements {
                    write!(f, " e{}", element)?;
                }
                write!(f, " <-> ")?;
                fmt_literal_token(f, target)
            }
            Directive::Element { element, value } => {
                write!(f, "[ELEMENT] e{} ", element)?;
                fmt_term_value(f, value)
            }
            Directive::Bool2Int { literal, int_var } => {
                write!(f, "[BOOL2INT] ")?;
                fmt_literal_token(f, literal)?;
                write!(f, " x{}", int_var)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(id: usize) -> Literal {
        Literal::positive(BoolVarId::new(id))
    }

    #[test]
    fn test_cmp_op_display() {
        assert_eq!("=", CmpOp::Eq.to_string());
        assert_eq!("!=", CmpOp::Ne.to_string());
        assert_eq!(">=", CmpOp::Ge.to_string());
        assert_eq!(">", CmpOp::Gt.to_string());
        assert_eq!("<=", CmpOp::Le.to_string());
        assert_eq!("<", CmpOp::Lt.to_string());
    }

    #[test]
    fn test_cmp_op_renderings_are_distinct() {
        use strum::IntoEnumIterator;
        let renderings: std::collections::HashSet<String> =
            CmpOp::iter().map(|op| op.to_string()).collect();
        assert_eq!(CmpOp::iter().count(), renderings.len());
    }

    #[test]
    fn test_constraint_var_var() {
        let d = Directive::Constraint {
            terms: vec![Term::Var(IntVarId::new(1)), Term::NegVar(IntVarId::new(2))],
            op: CmpOp::Eq,
            rhs: 0,
        };
        assert_eq!("[CONSTRAINT] x1 - x2 = 0", d.to_string());
    }

    #[test]
    fn test_constraint_single_term() {
        let d = Directive::Constraint {
            terms: vec![Term::Var(IntVarId::new(3))],
            op: CmpOp::Eq,
            rhs: 5,
        };
        assert_eq!("[CONSTRAINT] x3 = 5", d.to_string());
    }

    #[test]
    fn test_constraint_scaled_terms() {
        let d = Directive::Constraint {
            terms: vec![
                Term::Scaled(3, IntVarId::new(1)),
                Term::Scaled(-2, IntVarId::new(2)),
            ],
            op: CmpOp::Le,
            rhs: 7,
        };
        assert_eq!("[CONSTRAINT] 3x1 + -2x2 <= 7", d.to_string());
    }

    #[test]
    fn test_reified() {
        let d = Directive::Reified {
            terms: vec![Term::Var(IntVarId::new(3)), Term::NegVar(IntVarId::new(4))],
            op: CmpOp::Eq,
            rhs: 0,
            target: BoolVarId::new(7),
        };
        assert_eq!("[REIFIED] x3 - x4 = 0 <-> b7", d.to_string());
    }

    #[test]
    fn test_clause_numeric() {
        let d = Directive::Clause {
            literals: vec![lit(1).negate(), lit(9)],
            style: ClauseStyle::Numeric,
        };
        assert_eq!("1 0 0 0 2 -1 9", d.to_string());
    }

    #[test]
    fn test_clause_disjunction() {
        let d = Directive::Clause {
            literals: vec![lit(3), lit(5).negate()],
            style: ClauseStyle::Disjunction,
        };
        assert_eq!("[DISJUNCTION] b3 -b5", d.to_string());
    }

    #[test]
    fn test_clause_disjunction_with_constants() {
        let t = Literal::reserved(BoolVarId::new(7), true);
        let d = Directive::Clause {
            literals: vec![t, t.negate(), lit(2)],
            style: ClauseStyle::Disjunction,
        };
        assert_eq!("[DISJUNCTION] 1 0 b2", d.to_string());
    }

    #[test]
    fn test_empty_disjunction() {
        let d = Directive::Clause {
            literals: vec![],
            style: ClauseStyle::Disjunction,
        };
        assert_eq!("[DISJUNCTION]", d.to_string());
    }

    #[test]
    fn test_fact() {
        assert_eq!("[FACT] -4", Directive::Fact(lit(4).negate()).to_string());
        assert_eq!("[FACT] 2", Directive::Fact(lit(2)).to_string());
    }

    #[test]
    fn test_all_different() {
        let d = Directive::AllDifferent(vec![
            TermValue::Var(IntVarId::new(10)),
            TermValue::Var(IntVarId::new(11)),
            TermValue::Var(IntVarId::new(12)),
        ]);
        assert_eq!("[ALLDIFFERENT] x10 x11 x12", d.to_string());
    }

    #[test]
    fn test_reified_all_different() {
        let d = Directive::ReifiedAllDifferent {
            elements: vec![ElementId::new(1), ElementId::new(2)],
            target: lit(7),
        };
        assert_eq!("[ALLDIFFERENT] e1 e2 <-> b7", d.to_string());
    }

    #[test]
    fn test_element() {
        let d = Directive::Element {
            element: ElementId::new(3),
            value: TermValue::Const(5),
        };
        assert_eq!("[ELEMENT] e3 5", d.to_string());
        let d = Directive::Element {
            element: ElementId::new(4),
            value: TermValue::Var(IntVarId::new(2)),
        };
        assert_eq!("[ELEMENT] e4 x2", d.to_string());
    }

    #[test]
    fn test_bool2int() {
        let d = Directive::Bool2Int {
            literal: lit(5),
            int_var: IntVarId::new(2),
        };
        assert_eq!("[BOOL2INT] b5 x2", d.to_string());
        let d = Directive::Bool2Int {
            literal: Literal::reserved(BoolVarId::new(1), true),
            int_var: IntVarId::new(2),
        };
        assert_eq!("[BOOL2INT] 1 x2", d.to_string());
    }
}
