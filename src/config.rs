use crate::error::CalcError;

/// Limits and output settings applied by [`crate::Calculator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorConfig {
    /// Longest accepted expression, in characters.
    pub max_expression_length: usize,
    /// Deepest accepted nesting, see [`nesting_depth`].
    pub max_nesting_depth: usize,
    /// Decimal places kept in unit conversion output.
    pub conversion_precision: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_expression_length: 10_000,
            max_nesting_depth: 100,
            conversion_precision: 5,
        }
    }
}

impl CalculatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_expression_length(mut self, max: usize) -> Self {
        self.max_expression_length = max;
        self
    }

    pub fn with_max_nesting_depth(mut self, max: usize) -> Self {
        self.max_nesting_depth = max;
        self
    }

    pub fn with_conversion_precision(mut self, digits: u32) -> Self {
        self.conversion_precision = digits;
        self
    }

    /// Rejects input the parser would recurse too deeply on.
    pub fn check_expression(&self, expression: &str) -> Result<(), CalcError> {
        let length = expression.chars().count();
        if length > self.max_expression_length {
            return Err(CalcError::syntax(format!(
                "Expression too long: {} characters (limit {})",
                length, self.max_expression_length
            )));
        }

        let depth = nesting_depth(expression);
        if depth > self.max_nesting_depth {
            return Err(CalcError::syntax(format!(
                "Expression nested too deeply: depth {} (limit {})",
                depth, self.max_nesting_depth
            )));
        }
        Ok(())
    }

    /// Rounds a conversion result to `conversion_precision` decimals.
    pub fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.conversion_precision.min(15) as i32);
        let rounded = (value * scale).round() / scale;
        if rounded.is_finite() {
            // Drop the sign of negative zero.
            rounded + 0.0
        } else {
            value
        }
    }
}

/// Upper bound on parser recursion: open parentheses, plus runs of unary
/// signs, plus `**` chains within the current parenthesis level.
pub fn nesting_depth(expression: &str) -> usize {
    let mut powers_per_level: Vec<usize> = vec![0];
    let mut sign_run = 0;
    let mut max_depth = 0;
    let mut chars = expression.chars().filter(|c| !c.is_whitespace()).peekable();

    while let Some(c) = chars.next() {
        match c {
            '(' => {
                powers_per_level.push(0);
                sign_run = 0;
            }
            ')' => {
                if powers_per_level.len() > 1 {
                    powers_per_level.pop();
                }
                sign_run = 0;
            }
            '+' | '-' => sign_run += 1,
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if let Some(count) = powers_per_level.last_mut() {
                    *count += 1;
                }
                sign_run = 0;
            }
            _ => sign_run = 0,
        }

        let open = powers_per_level.len() - 1;
        let powers = powers_per_level.last().copied().unwrap_or(0);
        max_depth = max_depth.max(open + sign_run + powers);
    }
    max_depth
}
