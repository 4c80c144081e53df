//! Safe scientific expression evaluation and unit conversion.
//!
//! Expressions are parsed into an [`ASTNode`] tree over a small arithmetic
//! grammar and evaluated against a whitelist of functions; nothing in the
//! input is ever executed as code. The [`Calculator`] façade turns every
//! outcome into a `{result, error}` value, so no error or panic escapes.
//!
//! Trigonometric functions work in degrees while the constant `pi` is the
//! radian value, so `sin(pi / 2)` is the sine of about 1.57 degrees.

pub mod ast;
pub mod config;
pub mod error;
pub mod functions;
pub mod units;

pub use ast::{ASTNode, Context, Evaluator, Parser};
pub use config::CalculatorConfig;
pub use error::{CalcError, ErrorKind, FunctionError};
pub use functions::FunctionRegistry;

use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

/// Outcome of an evaluation or conversion. Exactly one field is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalcResult {
    pub result: Option<f64>,
    pub error: Option<String>,
}

impl CalcResult {
    pub fn ok(value: f64) -> Self {
        Self {
            result: Some(value),
            error: None,
        }
    }

    pub fn err(error: &CalcError) -> Self {
        Self {
            result: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_some()
    }
}

impl From<Result<f64, CalcError>> for CalcResult {
    fn from(outcome: Result<f64, CalcError>) -> Self {
        match outcome {
            Ok(value) => CalcResult::ok(value),
            Err(e) => CalcResult::err(&e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityResult {
    pub compatible: bool,
    pub error: Option<String>,
}

impl From<Result<bool, CalcError>> for CompatibilityResult {
    fn from(outcome: Result<bool, CalcError>) -> Self {
        match outcome {
            Ok(compatible) => Self {
                compatible,
                error: None,
            },
            Err(e) => Self {
                compatible: false,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorResult {
    pub factor: Option<f64>,
    pub error: Option<String>,
}

impl From<Result<f64, CalcError>> for FactorResult {
    fn from(outcome: Result<f64, CalcError>) -> Self {
        match outcome {
            Ok(factor) => Self {
                factor: Some(factor),
                error: None,
            },
            Err(e) => Self {
                factor: None,
                error: Some(e.to_string()),
            },
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "internal failure".to_string()
    }
}

/// Runs `operation`, turning a panic into an `Unexpected` error.
fn guarded<T>(
    name: &str,
    operation: impl FnOnce() -> Result<T, CalcError>,
) -> Result<T, CalcError> {
    match panic::catch_unwind(AssertUnwindSafe(operation)) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!("{} failed unexpectedly: {}", name, message);
            Err(CalcError::unexpected(message))
        }
    }
}

/// Evaluator and unit converter behind a result-returning interface.
///
/// A `Calculator` is immutable once built and can be shared between threads.
#[derive(Debug, Clone)]
pub struct Calculator {
    config: CalculatorConfig,
    evaluator: Evaluator,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

impl Calculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self::with_registry(config, Arc::new(FunctionRegistry::new()))
    }

    /// Shares an existing registry instead of building a new one.
    pub fn with_registry(config: CalculatorConfig, registry: Arc<FunctionRegistry>) -> Self {
        Self {
            config,
            evaluator: Evaluator::new(registry),
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &FunctionRegistry {
        self.evaluator.registry()
    }

    /// Parses and evaluates `expression`, returning the typed error on failure.
    pub fn try_evaluate(&self, expression: &str, context: &Context) -> Result<f64, CalcError> {
        if let Err(e) = self.config.check_expression(expression) {
            warn!("Rejected expression before parsing: {}", e);
            return Err(e);
        }
        guarded("evaluate", || {
            self.evaluator.evaluate_expression(expression, context)
        })
    }

    pub fn evaluate(&self, expression: &str) -> CalcResult {
        self.evaluate_with_context(expression, &Context::new())
    }

    pub fn evaluate_with_context(&self, expression: &str, context: &Context) -> CalcResult {
        let outcome = self.try_evaluate(expression, context);
        if let Err(e) = &outcome {
            debug!("Evaluation of '{}' failed: {}", expression, e);
        }
        outcome.into()
    }

    /// Evaluates independent expressions in parallel against one context.
    /// Results are in input order.
    pub fn evaluate_batch<S>(&self, expressions: &[S], context: &Context) -> Vec<CalcResult>
    where
        S: AsRef<str> + Sync,
    {
        debug!("Evaluating batch of {} expressions", expressions.len());
        expressions
            .par_iter()
            .map(|expression| self.evaluate_with_context(expression.as_ref(), context))
            .collect()
    }

    /// Calls a registry function with numeric arguments. Domain violations
    /// keep their `Domain` kind here.
    pub fn try_evaluate_function(&self, name: &str, args: &[f64]) -> Result<f64, CalcError> {
        let spec = self.registry().get(name).ok_or_else(|| {
            CalcError::syntax(format!("Unknown function: {}", name)).with_context("function", name)
        })?;
        guarded("evaluate_function", || spec.call(args).map_err(CalcError::from))
    }

    pub fn evaluate_function(&self, name: &str, args: &[f64]) -> CalcResult {
        self.try_evaluate_function(name, args).into()
    }

    /// Converts and rounds to the configured precision.
    pub fn try_convert_units(
        &self,
        value: f64,
        from_unit: &str,
        to_unit: &str,
    ) -> Result<f64, CalcError> {
        guarded("convert_units", || {
            units::convert(value, from_unit, to_unit).map(|v| self.config.round(v))
        })
    }

    pub fn convert_units(&self, value: f64, from_unit: &str, to_unit: &str) -> CalcResult {
        self.try_convert_units(value, from_unit, to_unit).into()
    }

    /// Function names by category.
    pub fn list_functions(&self) -> BTreeMap<&'static str, Vec<&'static str>> {
        self.registry()
            .list_by_category()
            .into_iter()
            .map(|(category, names)| (category.as_str(), names))
            .collect()
    }

    /// Function name to description, sorted by name.
    pub fn describe_functions(&self) -> BTreeMap<&'static str, &'static str> {
        self.registry().list_all()
    }

    pub fn list_units(&self) -> BTreeMap<&'static str, Vec<&'static str>> {
        units::list_units()
    }

    pub fn is_unit_compatible(&self, from_unit: &str, to_unit: &str) -> CompatibilityResult {
        guarded("is_unit_compatible", || units::is_compatible(from_unit, to_unit)).into()
    }

    /// Unrounded `convert(1.0, from, to)`. Not a multiplicative factor for
    /// temperature scales.
    pub fn get_conversion_factor(&self, from_unit: &str, to_unit: &str) -> FactorResult {
        guarded("get_conversion_factor", || {
            units::get_conversion_factor(from_unit, to_unit)
        })
        .into()
    }
}

static DEFAULT_CALCULATOR: OnceLock<Calculator> = OnceLock::new();

/// Process-wide calculator with the default configuration, built on first use.
pub fn default_calculator() -> &'static Calculator {
    DEFAULT_CALCULATOR.get_or_init(Calculator::default)
}

pub fn evaluate(expression: &str) -> CalcResult {
    default_calculator().evaluate(expression)
}

pub fn evaluate_with_context(expression: &str, context: &Context) -> CalcResult {
    default_calculator().evaluate_with_context(expression, context)
}

pub fn evaluate_batch<S: AsRef<str> + Sync>(
    expressions: &[S],
    context: &Context,
) -> Vec<CalcResult> {
    default_calculator().evaluate_batch(expressions, context)
}

pub fn evaluate_function(name: &str, args: &[f64]) -> CalcResult {
    default_calculator().evaluate_function(name, args)
}

pub fn convert_units(value: f64, from_unit: &str, to_unit: &str) -> CalcResult {
    default_calculator().convert_units(value, from_unit, to_unit)
}

pub fn list_functions() -> BTreeMap<&'static str, Vec<&'static str>> {
    default_calculator().list_functions()
}

pub fn describe_functions() -> BTreeMap<&'static str, &'static str> {
    default_calculator().describe_functions()
}

pub fn list_units() -> BTreeMap<&'static str, Vec<&'static str>> {
    units::list_units()
}

pub fn is_unit_compatible(from_unit: &str, to_unit: &str) -> CompatibilityResult {
    default_calculator().is_unit_compatible(from_unit, to_unit)
}

pub fn get_conversion_factor(from_unit: &str, to_unit: &str) -> FactorResult {
    default_calculator().get_conversion_factor(from_unit, to_unit)
}
