pub mod output;
pub mod parser;
