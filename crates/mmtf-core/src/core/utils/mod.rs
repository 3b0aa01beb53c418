pub mod dssp;
