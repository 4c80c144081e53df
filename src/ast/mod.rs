use crate::error::CalcError;
use crate::functions::exponential::checked_power;
use std::fmt;

mod evaluator;
mod parser;

pub use evaluator::{Context, Evaluator};
pub use parser::ExpressionParser as Parser;

/// Parsed expression. Each node owns its children; a tree is built per
/// evaluation and dropped afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Number(f64),
    Identifier(String),
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<ASTNode>,
    },
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
    FunctionCall {
        name: String,
        args: Vec<ASTNode>,
    },
}

impl ASTNode {
    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            ASTNode::Number(_) | ASTNode::Identifier(_) => 1,
            ASTNode::UnaryOperation { operand, .. } => 1 + operand.depth(),
            ASTNode::BinaryOperation { left, right, .. } => 1 + left.depth().max(right.depth()),
            ASTNode::FunctionCall { args, .. } => {
                1 + args.iter().map(ASTNode::depth).max().unwrap_or(0)
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    Identity,
}

impl UnaryOperator {
    pub fn apply(&self, operand: f64) -> f64 {
        match self {
            UnaryOperator::Negate => -operand,
            UnaryOperator::Identity => operand,
        }
    }
}

impl TryFrom<&str> for UnaryOperator {
    type Error = CalcError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "-" => Ok(UnaryOperator::Negate),
            "+" => Ok(UnaryOperator::Identity),
            _ => Err(CalcError::syntax(format!("Unsupported unary operator: {}", value))),
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Negate => f.write_str("-"),
            UnaryOperator::Identity => f.write_str("+"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

/// Modulo with the sign of the divisor: `-7 % 3 == 2`. An exact multiple
/// gives positive zero.
fn floored_rem(left: f64, right: f64) -> f64 {
    let rem = left % right;
    if rem != 0.0 && (rem < 0.0) != (right < 0.0) {
        rem + right
    } else {
        rem + 0.0
    }
}

impl Operator {
    pub fn apply(&self, left: f64, right: f64) -> Result<f64, CalcError> {
        let value = match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => {
                if right == 0.0 {
                    return Err(CalcError::zero_division("Division by zero"));
                }
                left / right
            }
            Operator::Modulo => {
                if right == 0.0 {
                    return Err(CalcError::zero_division("Modulo by zero"));
                }
                floored_rem(left, right)
            }
            Operator::Power => checked_power(left, right)
                .map_err(|e| CalcError::evaluation(e.to_string()))?,
        };

        if !value.is_finite() && left.is_finite() && right.is_finite() {
            return Err(CalcError::evaluation("Numeric overflow"));
        }
        Ok(value)
    }
}

impl TryFrom<&str> for Operator {
    type Error = CalcError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            "%" => Ok(Operator::Modulo),
            "**" => Ok(Operator::Power),
            _ => Err(CalcError::syntax(format!("Unsupported operator: {}", value))),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
            Operator::Power => "**",
        };
        f.write_str(symbol)
    }
}
