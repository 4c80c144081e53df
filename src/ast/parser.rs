use crate::ast::{ASTNode, Operator, UnaryOperator};
use crate::error::CalcError;
use log::{debug, trace};
use pest::error::{ErrorVariant, LineColLocation};
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "ast/expression.pest"]
pub struct ExpressionParser;

fn next_pair<'i>(
    pairs: &mut Pairs<'i, Rule>,
    expected: &str,
) -> Result<Pair<'i, Rule>, CalcError> {
    pairs
        .next()
        .ok_or_else(|| CalcError::syntax(format!("Expected {}", expected)))
}

fn describe_rule(rule: &Rule) -> &'static str {
    match rule {
        Rule::EOI => "end of input",
        Rule::expr | Rule::mul_expr | Rule::unary | Rule::power => "an operand",
        Rule::number => "a number",
        Rule::identifier => "a name",
        Rule::function_call => "a function call",
        Rule::args => "function arguments",
        Rule::group => "a parenthesised expression",
        Rule::PLUS | Rule::MINUS | Rule::POW | Rule::STAR | Rule::SLASH | Rule::MOD => {
            "an operator"
        }
        _ => "a valid token",
    }
}

fn syntax_error(input: &str, err: pest::error::Error<Rule>) -> CalcError {
    let column = match err.line_col {
        LineColLocation::Pos((_, col)) | LineColLocation::Span((_, col), _) => col,
    };
    let message = match &err.variant {
        ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
            let mut expected: Vec<&str> = positives.iter().map(describe_rule).collect();
            expected.dedup();
            format!("Invalid syntax: expected {}", expected.join(" or "))
        }
        ErrorVariant::ParsingError { .. } => "Invalid syntax".to_string(),
        ErrorVariant::CustomError { message } => format!("Invalid syntax: {}", message),
    };
    CalcError::syntax(message)
        .with_context("expression", input)
        .with_context("position", column)
}

impl ExpressionParser {
    /// Parses an arithmetic expression into an AST.
    ///
    /// Rejects empty input, unbalanced parentheses, dangling or doubled
    /// operators, bare-dot literals (`.5`, `5.`) and any character outside
    /// the grammar.
    pub fn parse_expression(input: &str) -> Result<ASTNode, CalcError> {
        debug!("Parsing expression: {}", input);
        if input.trim().is_empty() {
            return Err(CalcError::syntax("Empty expression"));
        }

        let mut pairs = ExpressionParser::parse(Rule::expression, input)
            .map_err(|e| syntax_error(input, e))?;
        let root = next_pair(&mut pairs, "an expression")?;
        let expr = next_pair(&mut root.into_inner(), "an expression")?;

        let ast = Self::build_expression(expr)?;
        trace!("Parsed AST: {:#?}", ast);
        Ok(ast)
    }

    fn build_expression(pair: Pair<Rule>) -> Result<ASTNode, CalcError> {
        let mut pairs = pair.into_inner();
        let mut node = Self::build_term(next_pair(&mut pairs, "an operand")?)?;

        while let Some(operator_pair) = pairs.next() {
            let operator = match operator_pair.as_rule() {
                Rule::PLUS => Operator::Add,
                Rule::MINUS => Operator::Subtract,
                _ => Operator::try_from(operator_pair.as_str())?,
            };
            let right = Self::build_term(next_pair(&mut pairs, "an operand")?)?;
            node = ASTNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn build_term(pair: Pair<Rule>) -> Result<ASTNode, CalcError> {
        let mut pairs = pair.into_inner();
        let mut node = Self::build_unary(next_pair(&mut pairs, "an operand")?)?;

        while let Some(operator_pair) = pairs.next() {
            let operator = match operator_pair.as_rule() {
                Rule::STAR => Operator::Multiply,
                Rule::SLASH => Operator::Divide,
                Rule::MOD => Operator::Modulo,
                _ => Operator::try_from(operator_pair.as_str())?,
            };
            let right = Self::build_unary(next_pair(&mut pairs, "an operand")?)?;
            node = ASTNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn build_unary(pair: Pair<Rule>) -> Result<ASTNode, CalcError> {
        let mut pairs = pair.into_inner();
        let first = next_pair(&mut pairs, "an operand")?;

        match first.as_rule() {
            Rule::PLUS | Rule::MINUS => {
                let operator = UnaryOperator::try_from(first.as_str())?;
                let operand = Self::build_unary(next_pair(&mut pairs, "an operand")?)?;
                Ok(ASTNode::UnaryOperation {
                    operator,
                    operand: Box::new(operand),
                })
            }
            Rule::power => Self::build_power(first),
            rule => Err(CalcError::syntax(format!(
                "Unexpected rule in unary expression: {:?}",
                rule
            ))),
        }
    }

    /// `atom ** unary`; the exponent recurses through `unary`, which makes
    /// chains right-associative.
    fn build_power(pair: Pair<Rule>) -> Result<ASTNode, CalcError> {
        let mut pairs = pair.into_inner();
        let base = Self::build_primary_expression(next_pair(&mut pairs, "an operand")?)?;

        match pairs.next() {
            Some(operator_pair) if operator_pair.as_rule() == Rule::POW => {
                let exponent = Self::build_unary(next_pair(&mut pairs, "an exponent")?)?;
                Ok(ASTNode::BinaryOperation {
                    left: Box::new(base),
                    operator: Operator::Power,
                    right: Box::new(exponent),
                })
            }
            Some(other) => Err(CalcError::syntax(format!(
                "Unexpected token after operand: {}",
                other.as_str()
            ))),
            None => Ok(base),
        }
    }

    fn build_primary_expression(pair: Pair<Rule>) -> Result<ASTNode, CalcError> {
        match pair.as_rule() {
            Rule::number => {
                let literal = pair.as_str();
                let value = literal.parse::<f64>().map_err(|_| {
                    CalcError::syntax("Invalid numeric literal").with_context("literal", literal)
                })?;
                if !value.is_finite() {
                    return Err(CalcError::syntax("Numeric literal out of range")
                        .with_context("literal", literal));
                }
                Ok(ASTNode::Number(value))
            }
            Rule::identifier => Ok(ASTNode::Identifier(pair.as_str().to_string())),
            Rule::group => {
                let inner = next_pair(&mut pair.into_inner(), "an expression")?;
                Self::build_expression(inner)
            }
            Rule::function_call => Self::build_function_call(pair),
            rule => {
                debug!("Unexpected rule in primary expression: {:?}", rule);
                Err(CalcError::syntax(format!(
                    "Unexpected rule in primary expression: {:?}",
                    rule
                )))
            }
        }
    }

    fn build_function_call(pair: Pair<Rule>) -> Result<ASTNode, CalcError> {
        let mut inner = pair.into_inner();
        let name = next_pair(&mut inner, "a function name")?.as_str().to_string();
        let args = match inner.next() {
            Some(args) => args
                .into_inner()
                .map(Self::build_expression)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        Ok(ASTNode::FunctionCall { name, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn num(value: f64) -> Box<ASTNode> {
        Box::new(ASTNode::Number(value))
    }

    fn binary(left: Box<ASTNode>, operator: Operator, right: Box<ASTNode>) -> Box<ASTNode> {
        Box::new(ASTNode::BinaryOperation {
            left,
            operator,
            right,
        })
    }

    fn neg(operand: Box<ASTNode>) -> Box<ASTNode> {
        Box::new(ASTNode::UnaryOperation {
            operator: UnaryOperator::Negate,
            operand,
        })
    }

    #[test]
    fn test_simple_binary_expression() {
        let ast = ExpressionParser::parse_expression("price + 100").unwrap();
        let expected = ASTNode::BinaryOperation {
            left: Box::new(ASTNode::Identifier("price".to_string())),
            operator: Operator::Add,
            right: num(100.0),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let ast = ExpressionParser::parse_expression("2 + 3 * 4").unwrap();
        let expected = binary(
            num(2.0),
            Operator::Add,
            binary(num(3.0), Operator::Multiply, num(4.0)),
        );
        assert_eq!(ast, *expected);
    }

    #[test]
    fn test_left_associative_subtraction() {
        let ast = ExpressionParser::parse_expression("10 - 5 - 2").unwrap();
        let expected = binary(
            binary(num(10.0), Operator::Subtract, num(5.0)),
            Operator::Subtract,
            num(2.0),
        );
        assert_eq!(ast, *expected);
    }

    #[test]
    fn test_right_associative_power() {
        let ast = ExpressionParser::parse_expression("2 ** 3 ** 2").unwrap();
        let expected = binary(
            num(2.0),
            Operator::Power,
            binary(num(3.0), Operator::Power, num(2.0)),
        );
        assert_eq!(ast, *expected);
    }

    #[test]
    fn test_unary_minus_applies_after_power() {
        let ast = ExpressionParser::parse_expression("-2 ** 2").unwrap();
        let expected = neg(binary(num(2.0), Operator::Power, num(2.0)));
        assert_eq!(ast, *expected);
    }

    #[test]
    fn test_negative_exponent() {
        let ast = ExpressionParser::parse_expression("2 ** -1").unwrap();
        let expected = binary(num(2.0), Operator::Power, neg(num(1.0)));
        assert_eq!(ast, *expected);
    }

    #[test]
    fn test_stacked_unary_operators() {
        let ast = ExpressionParser::parse_expression("--+5").unwrap();
        let expected = neg(neg(Box::new(ASTNode::UnaryOperation {
            operator: UnaryOperator::Identity,
            operand: num(5.0),
        })));
        assert_eq!(ast, *expected);
    }

    #[test]
    fn test_grouping_produces_no_extra_nodes() {
        let ast = ExpressionParser::parse_expression("(((2 + 3)))").unwrap();
        assert_eq!(ast, *binary(num(2.0), Operator::Add, num(3.0)));
    }

    #[test]
    fn test_function_call() {
        let ast = ExpressionParser::parse_expression("logn(8, 1 + 1)").unwrap();
        let expected = ASTNode::FunctionCall {
            name: "logn".to_string(),
            args: vec![ASTNode::Number(8.0), *binary(num(1.0), Operator::Add, num(1.0))],
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_function_call_no_args() {
        let ast = ExpressionParser::parse_expression("mean()").unwrap();
        assert_eq!(
            ast,
            ASTNode::FunctionCall {
                name: "mean".to_string(),
                args: vec![],
            }
        );
    }

    #[test]
    fn test_nested_function_calls() {
        let ast = ExpressionParser::parse_expression("sqrt(abs_value(x))").unwrap();
        let expected = ASTNode::FunctionCall {
            name: "sqrt".to_string(),
            args: vec![ASTNode::FunctionCall {
                name: "abs_value".to_string(),
                args: vec![ASTNode::Identifier("x".to_string())],
            }],
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(
            ExpressionParser::parse_expression("2e-3").unwrap(),
            ASTNode::Number(0.002)
        );
        assert_eq!(
            ExpressionParser::parse_expression("1.5E6").unwrap(),
            ASTNode::Number(1.5e6)
        );
    }

    #[test]
    fn test_excess_whitespace() {
        let ast = ExpressionParser::parse_expression("   (   2   +  10  )   *   3   ").unwrap();
        let expected = binary(
            binary(num(2.0), Operator::Add, num(10.0)),
            Operator::Multiply,
            num(3.0),
        );
        assert_eq!(ast, *expected);
    }

    #[test]
    fn test_empty_input() {
        for input in ["", "   ", "\t\n"] {
            let err = ExpressionParser::parse_expression(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Syntax);
            assert!(err.to_string().contains("Empty expression"));
        }
    }

    #[test]
    fn test_invalid_syntax() {
        let inputs = vec![
            "2 +",
            "2 * 3 +",
            "(2 + 3",
            "((2 + 3)",
            "2 + 3)",
            "(2 + 3 * (4 - 5)))",
            "(2 + 3]",
            "()",
            "2 * * 3",
            "2 // 3",
            "2 & 3",
            "2 | 3",
            "2 < 3",
            "2 == 2",
            "\"hello\"",
            "[1, 2]",
            "2 + ∞",
            "x$y + 5",
            "sin 5",
            "sin(5",
            "sin(1,)",
            "math.sin(5)",
            "f(1)(2)",
            "2 3",
        ];

        for input in inputs {
            let result = ExpressionParser::parse_expression(input);
            assert!(
                matches!(&result, Err(err) if err.kind() == ErrorKind::Syntax),
                "Input '{}' should fail with a syntax error, got {:?}",
                input,
                result
            );
        }
    }

    #[test]
    fn test_bare_dot_literals_rejected() {
        for input in [".5 + 2", "5. + 2", ".5", "5."] {
            assert!(
                ExpressionParser::parse_expression(input).is_err(),
                "Input '{}' should fail to parse",
                input
            );
        }
    }

    #[test]
    fn test_literal_out_of_range() {
        let err = ExpressionParser::parse_expression("1e999").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_error_reports_position() {
        let err = ExpressionParser::parse_expression("2 + * 3").unwrap_err();
        let context = err.context().unwrap();
        assert_eq!(context.get("expression"), Some("2 + * 3"));
        assert!(context.get("position").is_some());
    }

    #[test]
    fn test_very_large_expression() {
        let input = (0..100)
            .map(|i| format!("x{}", i))
            .collect::<Vec<_>>()
            .join(" + ");
        let ast = ExpressionParser::parse_expression(&input).unwrap();

        let mut expected = ASTNode::Identifier("x0".to_string());
        for i in 1..100 {
            expected = ASTNode::BinaryOperation {
                left: Box::new(expected),
                operator: Operator::Add,
                right: Box::new(ASTNode::Identifier(format!("x{}", i))),
            };
        }
        assert_eq!(ast, expected);
    }
}
