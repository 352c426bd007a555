use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{ExprError, Span};

/// Postorder evaluator over `i64` with overflow and division checks.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate_expression(&self, expr: &Expr) -> Result<i64, ExprError> {
        match expr {
            Expr::Literal { value, .. } => Ok(*value),
            Expr::Grouping { expr, .. } => self.evaluate_expression(expr),
            Expr::Unary {
                operator,
                operand,
                span,
            } => {
                let operand_val = self.evaluate_expression(operand)?;
                self.evaluate_unary_op(operator, operand_val, span)
            }
            Expr::Binary {
                left,
                operator,
                right,
                span,
            } => {
                let left_val = self.evaluate_expression(left)?;
                let right_val = self.evaluate_expression(right)?;
                self.evaluate_binary_op(operator, left_val, right_val, span)
            }
        }
    }

    fn evaluate_binary_op(
        &self,
        operator: &BinaryOp,
        left: i64,
        right: i64,
        span: &Span,
    ) -> Result<i64, ExprError> {
        let result = match operator {
            BinaryOp::Add => left.checked_add(right),
            BinaryOp::Subtract => left.checked_sub(right),
            BinaryOp::Multiply => left.checked_mul(right),
            BinaryOp::Divide => {
                if right == 0 {
                    return Err(ExprError::runtime_error_with_help(
                        span.clone(),
                        "Division by zero".to_string(),
                        "The right-hand side of '/' evaluated to 0.".to_string(),
                    ));
                }
                // Truncates toward zero
                left.checked_div(right)
            }
            BinaryOp::Power => return self.evaluate_power(left, right, span),
        };

        result.ok_or_else(|| overflow(operator.symbol(), span))
    }

    fn evaluate_unary_op(
        &self,
        operator: &UnaryOp,
        operand: i64,
        span: &Span,
    ) -> Result<i64, ExprError> {
        match operator {
            UnaryOp::Negate => operand
                .checked_neg()
                .ok_or_else(|| overflow(operator.symbol(), span)),
        }
    }

    /// Exact integer exponentiation. A negative exponent yields the
    /// truncated value of the real-valued power, which is 0 for every base
    /// except 1 and -1.
    fn evaluate_power(&self, base: i64, exponent: i64, span: &Span) -> Result<i64, ExprError> {
        if exponent < 0 {
            return match base {
                0 => Err(ExprError::runtime_error_with_help(
                    span.clone(),
                    "Zero raised to a negative power".to_string(),
                    "0^n is undefined for n < 0.".to_string(),
                )),
                1 => Ok(1),
                -1 => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
                _ => Ok(0),
            };
        }

        match u32::try_from(exponent) {
            Ok(exp) => base.checked_pow(exp).ok_or_else(|| overflow("^", span)),
            // Only bases with magnitude below 2 stay in range for huge exponents
            Err(_) => match base {
                0 | 1 => Ok(base),
                -1 => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
                _ => Err(overflow("^", span)),
            },
        }
    }
}

fn overflow(symbol: &str, span: &Span) -> ExprError {
    ExprError::runtime_error_with_help(
        span.clone(),
        format!("Integer overflow in '{}'", symbol),
        format!(
            "Results must fit in a signed 64-bit integer ({} to {}).",
            i64::MIN,
            i64::MAX
        ),
    )
}

/// Evaluate an expression tree to an integer.
pub fn evaluate(expr: &Expr) -> Result<i64, ExprError> {
    Evaluator::new().evaluate_expression(expr)
}
