// Integer expression evaluator library
//
// Turns an infix expression such as "2^3^2 - (8-3)*4" into an integer by
// lexing, parsing into a tree, reducing grouping placeholders and evaluating
// in postorder. The tree can also be rendered as a Graphviz graph.

// Public modules
pub mod ast;
pub mod dot;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod runner;

// Re-export commonly used items
pub use ast::{BinaryOp, Expr, UnaryOp};
pub use error::{ErrorKind, ExprError, Span};
pub use evaluator::{evaluate, Evaluator};
pub use lexer::{lex, Lexer, Token, TokenStream, TokenType};
pub use parser::{parse, Parser};

// Re-export main functions
pub use runner::{evaluate_source, run, Evaluation};
