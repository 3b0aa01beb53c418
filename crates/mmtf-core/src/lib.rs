//! # MMTF Core Library
//!
//! Decoding and encoding of the Macromolecular Transmission Format, a compact
//! binary representation of macromolecular structures, with a validated
//! reconstruction of the structure hierarchy.
//!
//! ## Architecture
//!
//! - **[`core`]: Data.** The typed-array codec, the decoded column set, the default
//!   structure graph and envelope I/O. Nothing here holds build state.
//!
//! - **[`engine`]: Assembly.** The builder contract, the assembler state machine
//!   that turns an ordered call stream into validated facts, and the encoder that
//!   walks a structure back into columns.
//!
//! - **[`workflows`]: Entry points.** Bytes to structure and back, for single
//!   payloads or batches of files.
//!
//! ## Example
//!
//! ```no_run
//! use mmtf::core::codec::EncodingConfig;
//! use mmtf::workflows::{decode, encode};
//!
//! # fn main() -> Result<(), mmtf::engine::error::EngineError> {
//! let bytes = std::fs::read("1crn.mmtf")?;
//! let structure = decode::decode_structure(&bytes)?;
//! println!("{} atoms", structure.atom_count());
//! let packed = encode::encode_structure_gz(&structure, &EncodingConfig::default())?;
//! # let _ = packed;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
