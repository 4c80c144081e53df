use super::{Arity, Category, FunctionRegistry};
use crate::error::FunctionError;
use scicalc_macros::calc_fn;

pub fn register(registry: &mut FunctionRegistry) {
    let exps = Category::Exponential;
    registry.register("exp", Arity::Exact(1), exps, "Exponential function (e^x)", exp);
    registry.register(
        "power",
        Arity::Exact(2),
        exps,
        "x raised to the power y (real results only)",
        power,
    );
    registry.register("pow", Arity::Exact(2), exps, "Alias of power(x, y)", power);
    registry.register(
        "sqrt",
        Arity::Exact(1),
        exps,
        "Square root (domain: x >= 0)",
        sqrt,
    );
    registry.register(
        "nthroot",
        Arity::Exact(2),
        exps,
        "n-th root of x (n > 0; odd n allows negative x)",
        nthroot,
    );
}

/// Real-valued `base ^ exponent`, shared by `power()` and the `**` operator.
pub(crate) fn checked_power(base: f64, exponent: f64) -> Result<f64, FunctionError> {
    if base == 0.0 && exponent == 0.0 {
        return Err(FunctionError::domain("power", "0 ** 0 is undefined"));
    }
    if base == 0.0 && exponent < 0.0 {
        return Err(FunctionError::domain(
            "power",
            format!("0 cannot be raised to a negative power ({exponent})"),
        ));
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(FunctionError::domain(
            "power",
            format!("negative base {base} with non-integer exponent {exponent} has no real result"),
        ));
    }
    Ok(base.powf(exponent))
}

#[calc_fn]
fn exp(x: f64) -> Result<f64, FunctionError> {
    Ok(x.exp())
}

#[calc_fn]
fn power(x: f64, y: f64) -> Result<f64, FunctionError> {
    checked_power(x, y)
}

#[calc_fn]
fn sqrt(x: f64) -> Result<f64, FunctionError> {
    if x < 0.0 {
        return Err(FunctionError::domain(
            "sqrt",
            format!("cannot take the square root of a negative number ({x})"),
        ));
    }
    Ok(x.sqrt())
}

#[calc_fn]
fn nthroot(x: f64, n: f64) -> Result<f64, FunctionError> {
    if n <= 0.0 {
        return Err(FunctionError::domain(
            "nthroot",
            format!("root degree must be > 0, got {n}"),
        ));
    }
    if x >= 0.0 {
        return Ok(x.powf(n.recip()));
    }

    let odd_integer = n.fract() == 0.0 && n % 2.0 == 1.0;
    if !odd_integer {
        return Err(FunctionError::domain(
            "nthroot",
            format!("root {n} of negative number {x} has no real result"),
        ));
    }
    Ok(-(-x).powf(n.recip()))
}
