use super::{Arity, Category, FunctionRegistry};
use crate::error::FunctionError;
use scicalc_macros::calc_fn;

pub fn register(registry: &mut FunctionRegistry) {
    let logs = Category::Logarithmic;
    registry.register(
        "log",
        Arity::Range(1, 2),
        logs,
        "Base-10 logarithm, or log(x, base) for an arbitrary base",
        log,
    );
    registry.register(
        "log10",
        Arity::Exact(1),
        logs,
        "Base-10 logarithm (domain: x > 0)",
        log10,
    );
    registry.register(
        "ln",
        Arity::Exact(1),
        logs,
        "Natural logarithm (domain: x > 0)",
        ln,
    );
    registry.register(
        "logn",
        Arity::Exact(2),
        logs,
        "Logarithm of x in the given base (x > 0, base > 0, base != 1)",
        logn,
    );
}

fn check_positive(function: &str, x: f64) -> Result<(), FunctionError> {
    if x > 0.0 {
        Ok(())
    } else {
        Err(FunctionError::domain(
            function,
            format!("x must be > 0, got {x}"),
        ))
    }
}

fn log_base(function: &str, x: f64, base: f64) -> Result<f64, FunctionError> {
    check_positive(function, x)?;
    if base <= 0.0 || base == 1.0 {
        return Err(FunctionError::domain(
            function,
            format!("base must be > 0 and != 1, got {base}"),
        ));
    }
    Ok(x.ln() / base.ln())
}

/// `log(x)` is base 10; `log(x, base)` behaves like `logn`.
///
/// Any base in `(0, 1)` is accepted, so `log(100, 0.5)` is about `-6.64`
/// rather than a domain error.
pub fn log(args: &[f64]) -> Result<f64, FunctionError> {
    match *args {
        [x] => {
            check_positive("log", x)?;
            Ok(x.log10())
        }
        [x, base] => log_base("log", x, base),
        _ => Err(FunctionError::Arity {
            function: "log".to_string(),
            expected: Arity::Range(1, 2),
            given: args.len(),
        }),
    }
}

#[calc_fn]
fn log10(x: f64) -> Result<f64, FunctionError> {
    check_positive("log10", x)?;
    Ok(x.log10())
}

#[calc_fn]
fn ln(x: f64) -> Result<f64, FunctionError> {
    check_positive("ln", x)?;
    Ok(x.ln())
}

#[calc_fn]
fn logn(x: f64, base: f64) -> Result<f64, FunctionError> {
    log_base("logn", x, base)
}
