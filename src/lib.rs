pub mod ast_printer;
pub mod error;
pub mod expr;
pub mod generate_ast;
pub mod parser;
pub mod reporter;
pub mod scanner;
pub mod source_printer;
pub mod token;
pub mod value;
