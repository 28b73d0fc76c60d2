//! Zinco is a translator from flattened constraint models to the primitive
//! directive language of a boolean/arithmetic theory solver.
//!
//! The heart of the crate is a registry mapping constraint statement names to
//! encoding routines: clause construction for the boolean connectives,
//! constant folding for linear arithmetic, reification wiring, atoms for the
//! global constraints. A translation run drives the statements of a model
//! through the registry in source order and appends the resulting directives
//! to an ordered emitter.

#![warn(missing_docs)]

pub mod context;

pub mod directives;

pub mod encodings;

pub mod error;

pub mod io;

pub mod model;

pub mod translator;
