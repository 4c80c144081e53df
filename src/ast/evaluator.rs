use crate::ast::{ASTNode, Parser};
use crate::error::CalcError;
use crate::functions::FunctionRegistry;
use log::{debug, trace};
use std::collections::HashMap;
use std::f64::consts;
use std::sync::Arc;

/// Variable bindings for a single evaluation.
pub type Context = HashMap<String, f64>;

/// Built-in constants. They shadow context entries of the same name.
fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(consts::PI),
        "e" => Some(consts::E),
        _ => None,
    }
}

/// Walks an AST, resolving identifiers against constants and the caller's
/// context and dispatching calls through a shared [`FunctionRegistry`].
#[derive(Debug, Clone)]
pub struct Evaluator {
    registry: Arc<FunctionRegistry>,
}

impl Evaluator {
    pub fn new(registry: Arc<FunctionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Parse an expression string into an AST.
    pub fn parse_expression(&self, expression: &str) -> Result<ASTNode, CalcError> {
        Parser::parse_expression(expression)
    }

    /// Evaluates a given expression string against a provided context.
    ///
    /// # Arguments
    ///
    /// * `expression` - A string slice that holds the expression to be evaluated.
    /// * `context` - Variable values the expression may reference.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if parsing and evaluation succeed.
    /// * `Err(CalcError)` with a `Syntax` kind for malformed input or unknown
    ///   names, otherwise an `Evaluation` kind.
    pub fn evaluate_expression(
        &self,
        expression: &str,
        context: &Context,
    ) -> Result<f64, CalcError> {
        let ast = self.parse_expression(expression)?;
        self.evaluate(&ast, context)
            .map_err(|e| e.with_context("expression", expression.trim()))
    }

    /// Evaluates an `ASTNode` with a given context. Children are evaluated
    /// before their parent, arguments left to right.
    pub fn evaluate(&self, ast: &ASTNode, context: &Context) -> Result<f64, CalcError> {
        trace!("Evaluating node: {:?}", ast);
        match ast {
            ASTNode::Number(n) => Ok(*n),

            ASTNode::Identifier(name) => constant(name)
                .or_else(|| context.get(name).copied())
                .ok_or_else(|| {
                    CalcError::syntax(format!("Unknown variable: {}", name))
                        .with_context("variable", name)
                }),

            ASTNode::UnaryOperation { operator, operand } => {
                let value = self.evaluate(operand, context)?;
                Ok(operator.apply(value))
            }

            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left_value = self.evaluate(left, context)?;
                let right_value = self.evaluate(right, context)?;
                operator
                    .apply(left_value, right_value)
                    .map_err(|e| e.with_context("operator", operator))
            }

            ASTNode::FunctionCall { name, args } => {
                let spec = self.registry.get(name).ok_or_else(|| {
                    CalcError::syntax(format!("Unknown function: {}", name))
                        .with_context("function", name)
                })?;

                let values = args
                    .iter()
                    .map(|arg| self.evaluate(arg, context))
                    .collect::<Result<Vec<f64>, CalcError>>()?;

                debug!("Calling {} with {:?}", name, values);
                spec.call(&values).map_err(|e| {
                    CalcError::evaluation(e.to_string()).with_context("function", name)
                })
            }
        }
    }
}
