pub mod constants;
pub mod container;
pub mod tree;
