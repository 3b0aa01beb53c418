//! # Core Module
//!
//! Stateless building blocks: the array codec, the decoded column set, the
//! default structure graph, and envelope I/O.
//!
//! - **Array codec** ([`codec`]) - Strategy-tagged packing of typed columns
//! - **Column set** ([`columns`]) - One structure payload with every column decoded
//! - **Structure graph** ([`models`]) - Models, chains, groups, atoms, bonds and metadata
//! - **I/O** ([`io`]) - MessagePack container, gzip, file traits and CSV export
//! - **Static tables** ([`utils`]) - DSSP symbol lookup

pub mod codec;
pub mod columns;
pub mod io;
pub mod models;
pub mod utils;
