//! # Engine Module
//!
//! The stateful half of the library: reconstructing a structure from an ordered
//! call stream and flattening it back into columns.
//!
//! - **Builder contract** ([`builder`]) - The capability set a structure
//!   representation implements, plus the records passed through it.
//! - **Assembler** ([`assembler`]) - A state machine that records the call stream
//!   into an arena and delivers it to a builder only once it validates.
//! - **Replay** ([`replay`]) - Drives an assembler from a decoded [`ColumnSet`](crate::core::columns::ColumnSet).
//! - **Encoder** ([`encoder`]) - The inverse walk, from a [`Structure`](crate::core::models::structure::Structure) to columns.
//! - **Progress** ([`progress`]) - Callback-based progress reporting for batch workflows.
//! - **Errors** ([`error`]) - Protocol, validation and umbrella engine errors.

pub mod assembler;
pub mod builder;
pub mod encoder;
pub mod error;
pub mod progress;
pub mod replay;
pub(crate) mod validator;
