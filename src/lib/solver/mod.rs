pub mod residue;
