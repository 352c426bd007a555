use crate::ast::Expr;
use crate::error::ExprError;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;

/// Outcome of a successful pipeline run: the reduced tree and its value.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub tree: Expr,
    pub value: i64,
}

/// Lex, parse, reduce and evaluate `source`. The first error from any stage
/// ends the run.
pub fn evaluate_source(source: &str) -> Result<Evaluation, ExprError> {
    let tokens = Lexer::new(source.to_string()).into_stream()?;
    let tree = Parser::new(tokens).parse()?;
    let value = Evaluator::new().evaluate_expression(&tree)?;

    log::debug!("{} = {}", tree, value);
    Ok(Evaluation { tree, value })
}

/// Run `source`, reporting any error against it on stderr.
pub fn run(source: &str, filename: Option<&str>) -> Option<Evaluation> {
    match evaluate_source(source) {
        Ok(evaluation) => Some(evaluation),
        Err(error) => {
            error.report(source, filename);
            None
        }
    }
}
