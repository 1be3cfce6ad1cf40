pub mod file;
pub mod layers;
pub mod stdin;
