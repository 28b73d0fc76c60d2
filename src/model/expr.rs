use std::fmt::Display;

/// An argument of a constraint statement.
///
/// Expressions form the read-only tree produced by the upstream parser.
/// Variable references carry the handle given to the variable at declaration
/// time by the [`FlatModel`](crate::model::FlatModel); the handle is resolved
/// into a solver identifier by the model context during the translation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// An integer literal.
    IntConst(i64),
    /// A boolean literal.
    BoolConst(bool),
    /// A reference to a declared integer variable.
    IntVar(usize),
    /// A reference to a declared boolean variable.
    BoolVar(usize),
    /// An ordered sequence of expressions.
    Array(Vec<Expr>),
    /// A set literal.
    SetLit(SetLiteral),
}

impl Expr {
    /// Returns the integer value if the expression is an integer literal.
    pub fn as_int_const(&self) -> Option<i64> {
        match self {
            Expr::IntConst(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean value if the expression is a boolean literal.
    pub fn as_bool_const(&self) -> Option<bool> {
        match self {
            Expr::BoolConst(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the element slice if the expression is an array.
    pub fn as_array(&self) -> Option<&[Expr]> {
        match self {
            Expr::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns `true` iff the expression is an integer or boolean literal.
    pub fn is_const(&self) -> bool {
        matches!(self, Expr::IntConst(_) | Expr::BoolConst(_))
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::IntConst(n) => write!(f, "{}", n),
            Expr::BoolConst(b) => write!(f, "{}", b),
            Expr::IntVar(handle) => write!(f, "iv#{}", handle),
            Expr::BoolVar(handle) => write!(f, "bv#{}", handle),
            Expr::Array(elements) => {
                write!(f, "[")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", e)?;
                }
                write!(f, "]")
            }
            Expr::SetLit(s) => write!(f, "{}", s),
        }
    }
}

/// A set literal, as written in the source model.
///
/// Set-typed constraint families are rejected by the translator, but set
/// literals still occur as arguments of accepted statements (e.g. the domain
/// restriction argument of a membership statement).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetLiteral {
    /// A contiguous range, both bounds included.
    Range(i64, i64),
    /// An explicit list of values, in source order.
    Values(Vec<i64>),
}

impl Display for SetLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetLiteral::Range(min, max) => write!(f, "{}..{}", min, max),
            SetLiteral::Values(values) => {
                write!(f, "{{")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// A solver annotation attached to a statement.
///
/// Annotations are carried through the model for the benefit of downstream
/// tools; the encoders themselves ignore them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation(String);

impl Annotation {
    /// Builds an annotation from its source text.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Annotation(text.into())
    }

    /// Returns the source text of the annotation.
    pub fn text(&self) -> &str {
        &self.0
    }
}
