//! Objects used to read constraint models.

mod fzn_reader;
pub use fzn_reader::FznReader;

mod specs;
pub use specs::ModelReader;
pub use specs::WarningHandler;
