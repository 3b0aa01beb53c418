//! Envelope and file handling around the column set: the MessagePack container
//! model, gzip detection, structure file readers and writers, and CSV export.

pub mod container;
pub mod mmtf;
pub mod msgpack;
pub mod table;
pub mod traits;
