//! The default in-memory structure graph and the builder that populates it.

pub mod atom;
pub mod bioassembly;
pub mod builder;
pub mod chain;
pub mod crystal;
pub mod entity;
pub mod group;
pub mod header;
pub mod ids;
pub mod structure;
pub mod topology;
