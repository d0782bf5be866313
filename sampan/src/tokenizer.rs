//! Dictionary-based streaming tokenizer.
pub(crate) mod arbitrator;
pub(crate) mod context;
pub mod worker;

use std::io::Read;

use crate::common::{BUFF_EXHAUST_CRITICAL, BUFF_SIZE};
use crate::dictionary::Dictionary;
use crate::errors::{Result, SampanError};
use crate::tokenizer::worker::Worker;

/// Tokenizer.
pub struct Tokenizer {
    dict: Dictionary,
    smart: bool,
    window_size: usize,
}

impl Tokenizer {
    /// Creates a new instance.
    ///
    /// # Arguments
    ///
    ///  - `dict`: Dictionary to be used.
    pub const fn new(dict: Dictionary) -> Self {
        Self {
            dict,
            smart: false,
            window_size: BUFF_SIZE,
        }
    }

    /// Enables the smart mode.
    ///
    /// In the smart mode, overlapping candidates are resolved into one segmentation,
    /// and numbers are compounded with the following classifiers.
    /// Otherwise, all the candidates are output.
    pub const fn smart(mut self, yes: bool) -> Self {
        self.smart = yes;
        self
    }

    /// Specifies the number of characters analyzed at once.
    /// By default, it is [`BUFF_SIZE`].
    ///
    /// A word is split when it crosses a boundary of the windows,
    /// which only occurs when the window grows full while a match is in progress.
    ///
    /// # Errors
    ///
    /// [`SampanError`] is returned when `window_size` is not greater than
    /// [`BUFF_EXHAUST_CRITICAL`].
    pub fn window_size(mut self, window_size: usize) -> Result<Self> {
        if window_size <= BUFF_EXHAUST_CRITICAL {
            return Err(SampanError::invalid_argument(
                "window_size",
                format!("window_size must be greater than {BUFF_EXHAUST_CRITICAL}, but got {window_size}."),
            ));
        }
        self.window_size = window_size;
        Ok(self)
    }

    /// Gets the reference to the dictionary.
    pub const fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    #[inline(always)]
    pub(crate) const fn is_smart(&self) -> bool {
        self.smart
    }

    #[inline(always)]
    pub(crate) const fn window_len(&self) -> usize {
        self.window_size
    }

    /// Creates a new worker tokenizing the input stream.
    pub fn new_worker<R>(&self, input: R) -> Worker<'_, R>
    where
        R: Read,
    {
        Worker::new(self, input)
    }
}
