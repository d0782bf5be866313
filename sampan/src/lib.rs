//! # Sampan
//!
//! Sampan is a streaming dictionary-based tokenizer for Chinese and mixed-script text.
//! It reads characters from any [`std::io::Read`] window by window, collects candidate
//! words, numerals, classifiers and Latin tokens, and resolves overlapping candidates
//! into one segmentation.
//!
//! ## Examples
//!
//! ```
//! use sampan::{Dictionary, LexemeType, Tokenizer};
//!
//! let main = "中华\n华人\n人民\n中华人民共和国\n共和国\n个\n年\n";
//! let quantifier = "个\n年\n";
//! let stop_word = "的\n";
//! let dict =
//!     Dictionary::from_readers(main.as_bytes(), quantifier.as_bytes(), stop_word.as_bytes())?;
//!
//! let tokenizer = Tokenizer::new(dict).smart(true);
//! let worker = tokenizer.new_worker("2005年的中华人民共和国".as_bytes());
//!
//! let tokens: Vec<_> = worker
//!     .map(|t| (t.surface().to_string(), t.lexeme_type()))
//!     .collect();
//! assert_eq!(
//!     tokens,
//!     vec![
//!         ("2005年".to_string(), LexemeType::NumeralClassifierCompound),
//!         ("中华人民共和国".to_string(), LexemeType::ChineseWord),
//!     ]
//! );
//! # Ok::<(), sampan::errors::SampanError>(())
//! ```
#![deny(missing_docs)]

#[cfg(target_pointer_width = "16")]
compile_error!("`target_pointer_width` must be larger than or equal to 32");

pub mod character;
pub mod common;
pub mod dictionary;
pub mod errors;
mod lexeme;
mod reader;
mod segmenter;
pub mod token;
pub mod tokenizer;


pub use dictionary::{Dictionary, LexiconKind};
pub use lexeme::LexemeType;
pub use tokenizer::Tokenizer;
