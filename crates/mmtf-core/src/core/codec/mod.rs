//! # Array Codec
//!
//! Stateless packing and unpacking of the typed columns that make up a structure
//! payload.
//!
//! Every column travels as a `(bytes, strategy, element count, parameter)` tuple.
//! The strategy selects the storage width of the payload and the chain of integer
//! transforms between the stored values and the decoded column:
//!
//! - **pass-through** of big-endian fixed-width values,
//! - **delta** encoding of slowly drifting values (serials, coordinates),
//! - **run-length** pairs of `(value, count)`,
//! - **recursive indexing**, spilling outliers over several narrow integers,
//! - **integer scaling** of floats by a per-column factor.
//!
//! Decoding is a pure function of its inputs and safe to run in parallel across
//! columns and structures. Malformed input is reported as a [`CodecError`].

pub mod array;
pub mod column;
pub mod config;
pub mod error;
pub mod strategy;
pub(crate) mod transforms;

pub use array::{EncodedArray, decode, decode_bytes, encode, encode_bytes};
pub use column::Column;
pub use config::{ColumnEncoding, ColumnField, ConfigError, EncodingConfig, EncodingConfigBuilder};
pub use error::CodecError;
pub use strategy::{ColumnKind, Strategy};
