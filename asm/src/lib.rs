pub mod assembler;
pub mod error;
pub mod imm;
pub mod parser;
pub mod pseudo;
pub mod symtab;

pub use assembler::{assemble, Record};
pub use error::{Error, SourceError};
