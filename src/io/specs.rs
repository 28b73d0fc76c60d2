use crate::model::FlatModel;
use anyhow::Result;
use std::io::Read;

/// The type of callback functions to call when warnings are raised while
/// parsing a model.
pub type WarningHandler = Box<dyn Fn(usize, String)>;

/// A trait implemented by objects able to read constraint models.
pub trait ModelReader {
    /// Reads a [`FlatModel`].
    ///
    /// In case warnings are raised, the callback functions registered by
    /// [add_warning_handler](Self::add_warning_handler) are triggered with
    /// the line number and the warning message.
    fn read(&self, reader: &mut dyn Read) -> Result<FlatModel>;

    /// Adds a callback function to call when warnings are raised while
    /// parsing a model.
    fn add_warning_handler(&mut self, h: WarningHandler);
}
