//! # Workflows Module
//!
//! End-to-end entry points tying the codec, the container and the engine
//! together.
//!
//! - **Decoding** ([`decode`]) - bytes to a validated structure, for the
//!   default graph or any [`StructureBuilder`](crate::engine::builder::StructureBuilder),
//!   one payload at a time or a batch of files in parallel.
//! - **Encoding** ([`encode`]) - a structure back to plain or gzip-compressed bytes.

pub mod decode;
pub mod encode;
