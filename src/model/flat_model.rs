use super::{Annotation, Domain, Expr};
use anyhow::{anyhow, Result};
use std::collections::HashMap;

/// A constraint statement: a name, its ordered arguments and its annotations.
///
/// Statements are produced by the upstream parser, are read-only for the
/// translator and are consumed exactly once, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    name: String,
    args: Vec<Expr>,
    annotations: Vec<Annotation>,
}

impl Constraint {
    /// Builds a new statement without annotations.
    pub fn new<S: Into<String>>(name: S, args: Vec<Expr>) -> Self {
        Self::with_annotations(name, args, Vec::new())
    }

    /// Builds a new statement with its annotations.
    pub fn with_annotations<S: Into<String>>(
        name: S,
        args: Vec<Expr>,
        annotations: Vec<Annotation>,
    ) -> Self {
        Constraint {
            name: name.into(),
            args,
            annotations,
        }
    }

    /// Returns the statement name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ordered arguments of the statement.
    pub fn args(&self) -> &[Expr] {
        &self.args
    }

    /// Returns the annotations of the statement.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// A flattened constraint model: declared variables and statements.
///
/// Variables are declared before the statements that reference them; each
/// declaration returns a handle (its index in declaration order) used by
/// [`Expr::IntVar`] and [`Expr::BoolVar`] references. Integer variables carry
/// their domain, queried during coercion validation.
#[derive(Debug, Default)]
pub struct FlatModel {
    int_domains: Vec<Domain>,
    int_names: Vec<String>,
    int_name_to_handle: HashMap<String, usize>,
    bool_names: Vec<String>,
    bool_name_to_handle: HashMap<String, usize>,
    constraints: Vec<Constraint>,
}

impl FlatModel {
    /// Builds a new, empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an integer variable and returns its handle.
    ///
    /// If a variable with the same name is already declared, no variable is
    /// added and the handle of the first declaration is returned.
    pub fn declare_int_var<S: Into<String>>(&mut self, name: S, domain: Domain) -> usize {
        let name = name.into();
        if let Some(&handle) = self.int_name_to_handle.get(&name) {
            return handle;
        }
        let handle = self.int_domains.len();
        self.int_domains.push(domain);
        self.int_name_to_handle.insert(name.clone(), handle);
        self.int_names.push(name);
        handle
    }

    /// Declares a boolean variable and returns its handle.
    ///
    /// If a variable with the same name is already declared, no variable is
    /// added and the handle of the first declaration is returned.
    pub fn declare_bool_var<S: Into<String>>(&mut self, name: S) -> usize {
        let name = name.into();
        if let Some(&handle) = self.bool_name_to_handle.get(&name) {
            return handle;
        }
        let handle = self.bool_names.len();
        self.bool_name_to_handle.insert(name.clone(), handle);
        self.bool_names.push(name);
        handle
    }

    /// Appends a statement to the model.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Returns the statements of the model, in source order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns the number of declared integer variables.
    pub fn n_int_vars(&self) -> usize {
        self.int_domains.len()
    }

    /// Returns the number of declared boolean variables.
    pub fn n_bool_vars(&self) -> usize {
        self.bool_names.len()
    }

    /// Returns the domain of an integer variable.
    ///
    /// # Panics
    ///
    /// Panics if no integer variable has this handle.
    pub fn int_var_domain(&self, handle: usize) -> &Domain {
        &self.int_domains[handle]
    }

    /// Returns the name of an integer variable.
    ///
    /// # Panics
    ///
    /// Panics if no integer variable has this handle.
    pub fn int_var_name(&self, handle: usize) -> &str {
        &self.int_names[handle]
    }

    /// Returns the handle of the integer variable with this name.
    ///
    /// If no such variable exists, an error is returned.
    pub fn int_var_handle(&self, name: &str) -> Result<usize> {
        self.int_name_to_handle
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("no such integer variable: {}", name))
    }

    /// Returns the handle of the boolean variable with this name.
    ///
    /// If no such variable exists, an error is returned.
    pub fn bool_var_handle(&self, name: &str) -> Result<usize> {
        self.bool_name_to_handle
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("no such boolean variable: {}", name))
    }
}
