//! Common utilities for uetex.
//!
//! This crate provides the byte-level plumbing shared by the uetex crates:
//!
//! - [`BinaryReader`] - Zero-copy reading from byte slices
//! - [`BinaryWriter`] - Struct and byte writing into a growable buffer

mod error;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use writer::BinaryWriter;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
