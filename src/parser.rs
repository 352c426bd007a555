use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{ExprError, Span};
use crate::lexer::{Token, TokenStream, TokenType};

/// Recursive-descent parser for the LL(1) grammar
///
/// ```text
/// expr        := addSub
/// addSub      := mulDiv addSubTail
/// addSubTail  := ('+' | '-') mulDiv addSubTail | ε
/// mulDiv      := pow mulDivTail
/// mulDivTail  := ('*' | '/') pow mulDivTail | ε
/// pow         := '-' atom | atom powTail
/// powTail     := '^' atom powTail | ε
/// atom        := '(' expr ')' | NUMBER
/// ```
///
/// One token of lookahead picks every production. `+ - * /` fold to the
/// left, `^` nests to the right.
///
/// Parentheses and `^` chains may nest at most [`MAX_NESTING`] levels and
/// the finished tree is at most [`MAX_HEIGHT`] nodes tall, so reducing and
/// evaluating it stays within the stack.
pub struct Parser {
    tokens: TokenStream,
    depth: usize,
}

pub const MAX_NESTING: usize = 256;
pub const MAX_HEIGHT: usize = 2048;

/// A parsed subtree together with its height.
struct Node {
    expr: Expr,
    height: usize,
}

impl Node {
    fn leaf(expr: Expr) -> Self {
        Self { expr, height: 1 }
    }

    fn wrap(self, build: impl FnOnce(Box<Expr>) -> Expr) -> Result<Self, ExprError> {
        let height = self.height + 1;
        let expr = build(Box::new(self.expr));
        check_height(&expr, height)?;
        Ok(Self { expr, height })
    }
}

impl Parser {
    pub fn new(tokens: TokenStream) -> Self {
        Self { tokens, depth: 0 }
    }

    /// Parse the whole stream and reduce the result.
    pub fn parse(&mut self) -> Result<Expr, ExprError> {
        let expr = self.parse_raw()?.reduce();
        log::debug!("parsed {}", expr);
        Ok(expr)
    }

    /// Parse the whole stream without the reduce pass, so parenthesised
    /// sub-expressions are still wrapped in `Grouping` placeholders.
    pub fn parse_raw(&mut self) -> Result<Expr, ExprError> {
        if self.tokens.is_empty() {
            return Err(ExprError::parse_error_with_help(
                self.tokens.end_span(),
                "Expected expression".to_string(),
                "Provide an arithmetic expression, for example '1+2*3'.".to_string(),
            ));
        }

        let expr = self.expression()?.expr;

        if !self.tokens.is_empty() {
            let stray = self.tokens.pop()?;
            return Err(self.trailing_token_error(&expr, stray));
        }

        Ok(expr)
    }

    fn expression(&mut self) -> Result<Node, ExprError> {
        self.add_sub()
    }

    fn add_sub(&mut self) -> Result<Node, ExprError> {
        let left = self.mul_div()?;
        self.add_sub_tail(left)
    }

    fn add_sub_tail(&mut self, mut node: Node) -> Result<Node, ExprError> {
        while self.check(TokenType::Plus) || self.check(TokenType::Minus) {
            let operator_token = self.tokens.pop()?;
            let operator = match operator_token.token_type {
                TokenType::Plus => BinaryOp::Add,
                TokenType::Minus => BinaryOp::Subtract,
                _ => unreachable!(),
            };

            let right = self.mul_div()?;
            node = binary(node, operator, right)?;
        }

        Ok(node)
    }

    fn mul_div(&mut self) -> Result<Node, ExprError> {
        let left = self.pow()?;
        self.mul_div_tail(left)
    }

    fn mul_div_tail(&mut self, mut node: Node) -> Result<Node, ExprError> {
        while self.check(TokenType::Star) || self.check(TokenType::Slash) {
            let operator_token = self.tokens.pop()?;
            let operator = match operator_token.token_type {
                TokenType::Star => BinaryOp::Multiply,
                TokenType::Slash => BinaryOp::Divide,
                _ => unreachable!(),
            };

            let right = self.pow()?;
            node = binary(node, operator, right)?;
        }

        Ok(node)
    }

    fn pow(&mut self) -> Result<Node, ExprError> {
        if self.check(TokenType::Minus) {
            let minus = self.tokens.pop()?;
            let operand = self.atom()?;
            let span = minus.span.to(operand.expr.span());

            return operand.wrap(|operand| Expr::Unary {
                operator: UnaryOp::Negate,
                operand,
                span,
            });
        }

        let base = self.atom()?;
        self.pow_tail(base)
    }

    /// Recursing before building the node makes `2^3^2` nest as `2^(3^2)`.
    fn pow_tail(&mut self, base: Node) -> Result<Node, ExprError> {
        if !self.check(TokenType::Caret) {
            return Ok(base);
        }
        let caret = self.tokens.pop()?;

        self.descend(&caret)?;
        let exponent = self.atom()?;
        let exponent = self.pow_tail(exponent)?;
        self.depth -= 1;

        binary(base, BinaryOp::Power, exponent)
    }

    fn atom(&mut self) -> Result<Node, ExprError> {
        let token = self.tokens.pop()?;

        match token.token_type {
            TokenType::LeftParen => {
                self.descend(&token)?;
                let inner = self.expression()?;
                let close = self.consume_close_paren(&token)?;
                self.depth -= 1;

                let span = token.span.to(&close.span);
                inner.wrap(|expr| Expr::Grouping { expr, span })
            }
            TokenType::Number => {
                let value = token.lexeme.parse::<i64>().map_err(|_| {
                    ExprError::parse_error(
                        token.span.clone(),
                        format!("Invalid integer: {}", token.lexeme),
                    )
                })?;

                Ok(Node::leaf(Expr::Literal {
                    value,
                    lexeme: token.lexeme,
                    span: token.span,
                }))
            }
            _ => Err(ExprError::parse_error_with_help(
                token.span.clone(),
                format!("Expected number or '(' but found '{}'", token.lexeme),
                "Operators need a number or a parenthesised expression on each side. \
                 Only one leading '-' is allowed per operand."
                    .to_string(),
            )),
        }
    }

    /// Enter one more level of '(' or '^' nesting.
    fn descend(&mut self, token: &Token) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(too_deep(token.span.clone()));
        }
        Ok(())
    }

    fn consume_close_paren(&mut self, open: &Token) -> Result<Token, ExprError> {
        let help = format!(
            "The '(' at position {} is never closed.",
            open.span.start
        );

        let next = self.tokens.peek().map(|t| (t.token_type, t.span.clone()));
        match next {
            Ok((TokenType::RightParen, _)) => self.tokens.pop(),
            Ok((_, span)) => Err(ExprError::parse_error_with_help(
                span,
                "Expected ')' after expression".to_string(),
                help,
            )),
            Err(_) => Err(ExprError::parse_error_with_help(
                self.tokens.end_span(),
                "Expected ')' after expression".to_string(),
                help,
            )),
        }
    }

    fn trailing_token_error(&self, expr: &Expr, stray: Token) -> ExprError {
        let message = format!("Unexpected token '{}'", stray.lexeme);

        match stray.token_type {
            TokenType::Caret if ends_in_negation(expr) => ExprError::parse_error_with_help(
                stray.span,
                message,
                "Negation applies only to the operand right after '-'. \
                 Write '(-2)^2' or '-(2^2)' to make the intent explicit."
                    .to_string(),
            ),
            TokenType::RightParen => ExprError::parse_error_with_help(
                stray.span,
                message,
                "This ')' has no matching '('.".to_string(),
            ),
            _ => ExprError::parse_error(stray.span, message),
        }
    }

    fn check(&self, token_type: TokenType) -> bool {
        matches!(self.tokens.peek(), Ok(token) if token.token_type == token_type)
    }
}

fn binary(left: Node, operator: BinaryOp, right: Node) -> Result<Node, ExprError> {
    let height = left.height.max(right.height) + 1;
    let span = left.expr.span().to(right.expr.span());
    let expr = Expr::Binary {
        left: Box::new(left.expr),
        operator,
        right: Box::new(right.expr),
        span,
    };
    check_height(&expr, height)?;
    Ok(Node { expr, height })
}

fn check_height(expr: &Expr, height: usize) -> Result<(), ExprError> {
    if height > MAX_HEIGHT {
        return Err(too_deep(expr.span().clone()));
    }
    Ok(())
}

fn too_deep(span: Span) -> ExprError {
    ExprError::parse_error_with_help(
        span,
        "Expression nested too deeply".to_string(),
        format!(
            "At most {} levels of '(' or '^' and {} operators along one path are supported.",
            MAX_NESTING, MAX_HEIGHT
        ),
    )
}

/// Whether the rightmost operand of `expr` is a negation, as in `1 + -2`.
fn ends_in_negation(expr: &Expr) -> bool {
    match expr {
        Expr::Unary { .. } => true,
        Expr::Binary { right, .. } => ends_in_negation(right),
        _ => false,
    }
}

/// Parse a token stream into a reduced expression tree.
pub fn parse(tokens: TokenStream) -> Result<Expr, ExprError> {
    Parser::new(tokens).parse()
}
