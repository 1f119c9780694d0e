//! # Hood
//!
//! A string-to-string dictionary built on open addressing with Robin Hood displacement
//! and backward-shift deletion, backed by a 64-bit murmur hash.
//!
//! Keys are placed by linear probing from their home slot (`hash % capacity`). An
//! incoming entry that is farther from home than the occupant of a slot takes that slot,
//! and the displaced entry probes again. Removal pulls the following displaced entries
//! one slot back, so no tombstones are ever left behind.
//!
//! ## Basic Usage
//!
//! ```rust
//! use hood::Dict;
//!
//! // Create a new dictionary (8 slots)
//! let mut dict = Dict::new();
//!
//! // Insert values; a key may also be stored without a value
//! dict.insert("apple", Some("red")).unwrap();
//! dict.insert("banana", None).unwrap();
//!
//! // Retrieve values, with a default for missing keys
//! assert_eq!(dict.get("apple", None), Some("red"));
//! assert_eq!(dict.get("cherry", Some("?")), Some("?"));
//!
//! // Update values
//! dict.insert("apple", Some("green")).unwrap();
//! assert_eq!(dict.get("apple", None), Some("green"));
//!
//! // Remove values
//! assert!(dict.remove("apple"));
//! assert_eq!(dict.get("apple", Some("?")), Some("?"));
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use hood::{Dict, DictConfig};
//!
//! let mut dict = Dict::with_config(DictConfig::default().with_initial_capacity(64));
//! for i in 0..100 {
//!     dict.insert(&format!("{i:08x}"), None).unwrap();
//! }
//! assert_eq!(dict.len(), 100);
//! assert!(3 * dict.len() <= 2 * dict.capacity());
//! ```

/// Tuning constants and creation-time configuration
mod config;
/// Text dump and probe statistics
mod dump;
/// Error type shared by all operations
mod error;
/// Module implementing the Robin Hood dictionary
mod hood_dict;
/// The 64-bit murmur digest
mod murmur;
/// Slot storage backing the dictionary
mod slot_table;
/// Utility functions and traits for the dictionary
mod utils;

pub use config::{DICT_BIG_SIZE, DICT_MIN_SIZE, DictConfig};
pub use error::DictError;
pub use hood_dict::{Dict, Iter};
pub use murmur::{murmur64, murmur64_bytes};
pub use utils::{DictExtensions, from_pairs};
