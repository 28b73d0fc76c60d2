//! The primitive directives emitted by the encoders and their ordered sink.

mod directive;
pub use directive::ClauseStyle;
pub use directive::CmpOp;
pub use directive::Directive;
pub use directive::Term;
pub use directive::TermValue;

mod emitter;
pub use emitter::BufferedEmitter;
pub use emitter::DirectiveEmitter;
