use super::{BoolVarId, ConstantId, ElementId, IntVarId, Literal, SymbolId};
use crate::error::{EncodingResult, TranslationError};
use crate::model::{Domain, Expr, FlatModel};
use std::collections::HashMap;

/// The identifier tables of one translation run.
///
/// The context mints the solver identifiers referenced by the emitted
/// directives: variable identifiers (one per declared variable, minted at
/// first resolution), interned constants and symbols (one identifier per
/// distinct value or name) and element identifiers (fresh at every call).
/// Minting is order-dependent: encoders must resolve the arguments of a
/// statement left to right so two runs over the same model produce the same
/// numbering.
///
/// A context serves exactly one run; a context whose run aborted must not be
/// reused.
pub struct ModelContext<'a> {
    model: &'a FlatModel,
    int_var_ids: Vec<Option<IntVarId>>,
    next_int_var: usize,
    bool_var_ids: Vec<Option<BoolVarId>>,
    next_bool_var: usize,
    true_id: Option<BoolVarId>,
    false_id: Option<BoolVarId>,
    constants: HashMap<i64, ConstantId>,
    next_constant: usize,
    symbols: HashMap<String, SymbolId>,
    next_symbol: usize,
    next_element: usize,
}

impl<'a> ModelContext<'a> {
    /// Builds a fresh context over the declared variables of a model.
    pub fn new(model: &'a FlatModel) -> Self {
        ModelContext {
            model,
            int_var_ids: vec![None; model.n_int_vars()],
            next_int_var: 1,
            bool_var_ids: vec![None; model.n_bool_vars()],
            next_bool_var: 1,
            true_id: None,
            false_id: None,
            constants: HashMap::new(),
            next_constant: 1,
            symbols: HashMap::new(),
            next_symbol: 1,
            next_element: 1,
        }
    }

    /// Returns the identifier of an integer variable, minting it at the first
    /// resolution of the handle.
    ///
    /// # Panics
    ///
    /// Panics if no integer variable has this handle.
    pub fn resolve_int_var(&mut self, handle: usize) -> IntVarId {
        if let Some(id) = self.int_var_ids[handle] {
            return id;
        }
        let id = IntVarId::new(self.next_int_var);
        self.next_int_var += 1;
        self.int_var_ids[handle] = Some(id);
        id
    }

    /// Returns the identifier of a boolean variable, minting it at the first
    /// resolution of the handle.
    ///
    /// # Panics
    ///
    /// Panics if no boolean variable has this handle.
    pub fn resolve_bool_var(&mut self, handle: usize) -> BoolVarId {
        if let Some(id) = self.bool_var_ids[handle] {
            return id;
        }
        let id = self.mint_bool_id();
        self.bool_var_ids[handle] = Some(id);
        id
    }

    /// Returns the literal standing for the boolean constant `true`.
    ///
    /// Its backing identifier is reserved in the boolean space at the first
    /// call and kept for the whole run.
    pub fn true_literal(&mut self) -> Literal {
        if self.true_id.is_none() {
            self.true_id = Some(self.mint_bool_id());
        }
        Literal::reserved(self.true_id.unwrap(), true)
    }

    /// Returns the literal standing for the boolean constant `false`.
    ///
    /// Its backing identifier is reserved in the boolean space at the first
    /// call and kept for the whole run.
    pub fn false_literal(&mut self) -> Literal {
        if self.false_id.is_none() {
            self.false_id = Some(self.mint_bool_id());
        }
        Literal::reserved(self.false_id.unwrap(), false)
    }

    fn mint_bool_id(&mut self) -> BoolVarId {
        let id = BoolVarId::new(self.next_bool_var);
        self.next_bool_var += 1;
        id
    }

    /// Returns the identifier interned for an integer value.
    ///
    /// The first call for a value mints the identifier; subsequent calls
    /// return the same one.
    pub fn intern_constant(&mut self, value: i64) -> ConstantId {
        if let Some(&id) = self.constants.get(&value) {
            return id;
        }
        let id = ConstantId::new(self.next_constant);
        self.next_constant += 1;
        self.constants.insert(value, id);
        id
    }

    /// Returns the identifier interned for a symbol name.
    ///
    /// The first call for a name mints the identifier; subsequent calls
    /// return the same one.
    pub fn intern_symbol(&mut self, name: &str) -> SymbolId {
        if let Some(&id) = self.symbols.get(name) {
            return id;
        }
        let id = SymbolId::new(self.next_symbol);
        self.next_symbol += 1;
        self.symbols.insert(name.to_string(), id);
        id
    }

    /// Mints a fresh element identifier. Element identifiers are never
    /// reused.
    pub fn fresh_element_id(&mut self) -> ElementId {
        let id = ElementId::new(self.next_element);
        self.next_element += 1;
        id
    }

    /// Returns the declared domain of an integer variable.
    ///
    /// # Panics
    ///
    /// Panics if no integer variable has this handle.
    pub fn int_var_domain(&self, handle: usize) -> &Domain {
        self.model.int_var_domain(handle)
    }

    /// Resolves an integer operand: a variable reference or a constant.
    ///
    /// Constants are interned. Any other expression shape is a fatal
    /// [`MalformedArgument`](TranslationError::MalformedArgument).
    pub fn resolve_int_operand(&mut self, expr: &Expr) -> EncodingResult<IntOperand> {
        match expr {
            Expr::IntConst(value) => Ok(IntOperand::Constant {
                id: self.intern_constant(*value),
                value: *value,
            }),
            Expr::IntVar(handle) => Ok(IntOperand::Variable(self.resolve_int_var(*handle))),
            other => Err(TranslationError::MalformedArgument(format!(
                "expected an integer operand, got {}",
                other
            ))),
        }
    }

    /// Resolves a boolean operand into a literal.
    ///
    /// Boolean constants are substituted by the reserved literals here, once
    /// per operand, so no encoder special-cases them inside its clause
    /// templates. Any other expression shape is a fatal
    /// [`MalformedArgument`](TranslationError::MalformedArgument).
    pub fn resolve_bool_operand(&mut self, expr: &Expr) -> EncodingResult<Literal> {
        match expr {
            Expr::BoolConst(true) => Ok(self.true_literal()),
            Expr::BoolConst(false) => Ok(self.false_literal()),
            Expr::BoolVar(handle) => Ok(Literal::positive(self.resolve_bool_var(*handle))),
            other => Err(TranslationError::MalformedArgument(format!(
                "expected a boolean operand, got {}",
                other
            ))),
        }
    }

    /// Resolves the boolean bound by a reified comparison.
    ///
    /// Only a variable is accepted: a boolean constant in reified position is
    /// a fatal [`MalformedArgument`](TranslationError::MalformedArgument).
    pub fn resolve_reified_target(&mut self, expr: &Expr) -> EncodingResult<BoolVarId> {
        match expr {
            Expr::BoolVar(handle) => Ok(self.resolve_bool_var(*handle)),
            Expr::BoolConst(_) => Err(TranslationError::MalformedArgument(
                "static bool in reified constraint not supported".to_string(),
            )),
            other => Err(TranslationError::MalformedArgument(format!(
                "expected a boolean variable in reified position, got {}",
                other
            ))),
        }
    }
}

/// A resolved integer operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntOperand {
    /// A reference to an integer variable.
    Variable(IntVarId),
    /// An interned integer constant.
    Constant {
        /// The interned identifier of the value.
        id: ConstantId,
        /// The value itself.
        value: i64,
    },
}
