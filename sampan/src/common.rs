//! Common settings in Sampan.

use bincode::config::{self, Fixint, LittleEndian};

/// The default number of characters held by the analysis window.
pub const BUFF_SIZE: usize = 4096;

/// Width of the trailing margin of a full window.
///
/// When the cursor enters this margin and no segmenter holds a lock,
/// the scan pauses so that the window can be shifted and refilled.
pub const BUFF_EXHAUST_CRITICAL: usize = 100;

pub(crate) fn bincode_config() -> config::Configuration<LittleEndian, Fixint> {
    config::standard()
        .with_little_endian()
        .with_fixed_int_encoding()
}
