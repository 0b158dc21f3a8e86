pub mod builder;
pub mod parser;
pub mod scanner;
