use crate::error::Span;
use std::fmt;

/// Expression tree. Every child is owned by exactly one parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal {
        value: i64,
        /// Digits as written, e.g. `007`.
        lexeme: String,
        span: Span,
    },
    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
    /// Placeholder the parser leaves around a parenthesised sub-expression.
    /// Removed by [`Expr::reduce`].
    Grouping {
        expr: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Literal { span, .. } => span,
            Expr::Unary { span, .. } => span,
            Expr::Binary { span, .. } => span,
            Expr::Grouping { span, .. } => span,
        }
    }

    /// Node label as shown in tree dumps: the operator symbol, the literal
    /// digits as written, or an empty string for a grouping placeholder.
    pub fn label(&self) -> String {
        match self {
            Expr::Literal { lexeme, .. } => lexeme.clone(),
            Expr::Unary { operator, .. } => operator.symbol().to_string(),
            Expr::Binary { operator, .. } => operator.symbol().to_string(),
            Expr::Grouping { .. } => String::new(),
        }
    }

    /// Children in left-to-right order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Literal { .. } => Vec::new(),
            Expr::Unary { operand, .. } => vec![operand.as_ref()],
            Expr::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Expr::Grouping { expr, .. } => vec![expr.as_ref()],
        }
    }

    /// Postorder normalization that splices every grouping placeholder out
    /// of the tree, leaving its inner expression in its place. The result
    /// contains no `Grouping` nodes, so reducing it again changes nothing.
    pub fn reduce(self) -> Expr {
        match self {
            Expr::Grouping { expr, .. } => expr.reduce(),
            Expr::Unary {
                operator,
                operand,
                span,
            } => Expr::Unary {
                operator,
                operand: Box::new(operand.reduce()),
                span,
            },
            Expr::Binary {
                left,
                operator,
                right,
                span,
            } => Expr::Binary {
                left: Box::new(left.reduce()),
                operator,
                right: Box::new(right.reduce()),
                span,
            },
            literal @ Expr::Literal { .. } => literal,
        }
    }

    pub fn is_reduced(&self) -> bool {
        !matches!(self, Expr::Grouping { .. }) && self.children().iter().all(|c| c.is_reduced())
    }
}

/// Fully parenthesised rendering, e.g. `(8 - 3) - 2` prints as `((8 - 3) - 2)`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal { value, .. } => write!(f, "{}", value),
            Expr::Unary {
                operator, operand, ..
            } => write!(f, "({}{})", operator.symbol(), operand),
            Expr::Binary {
                left,
                operator,
                right,
                ..
            } => write!(f, "({} {} {})", left, operator.symbol(), right),
            Expr::Grouping { expr, .. } => write!(f, "{}", expr),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Power => "^",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
        }
    }
}
