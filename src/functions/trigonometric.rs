//! Trigonometry in degrees: `sin`, `cos` and `tan` take degrees, the inverse
//! functions return degrees.

use super::{Arity, Category, FunctionRegistry};
use crate::error::FunctionError;
use scicalc_macros::calc_fn;

pub fn register(registry: &mut FunctionRegistry) {
    let trig = Category::Trigonometric;
    registry.register("sin", Arity::Exact(1), trig, "Sine of an angle in degrees", sin);
    registry.register("cos", Arity::Exact(1), trig, "Cosine of an angle in degrees", cos);
    registry.register("tan", Arity::Exact(1), trig, "Tangent of an angle in degrees", tan);
    registry.register(
        "asin",
        Arity::Exact(1),
        trig,
        "Arcsine in degrees (domain: [-1, 1])",
        asin,
    );
    registry.register(
        "acos",
        Arity::Exact(1),
        trig,
        "Arccosine in degrees (domain: [-1, 1])",
        acos,
    );
    registry.register("atan", Arity::Exact(1), trig, "Arctangent in degrees", atan);
}

fn check_unit_interval(function: &str, x: f64) -> Result<(), FunctionError> {
    if (-1.0..=1.0).contains(&x) {
        Ok(())
    } else {
        Err(FunctionError::domain(
            function,
            format!("argument must be in [-1, 1], got {x}"),
        ))
    }
}

#[calc_fn]
fn sin(degrees: f64) -> Result<f64, FunctionError> {
    Ok(degrees.to_radians().sin())
}

#[calc_fn]
fn cos(degrees: f64) -> Result<f64, FunctionError> {
    Ok(degrees.to_radians().cos())
}

#[calc_fn]
fn tan(degrees: f64) -> Result<f64, FunctionError> {
    Ok(degrees.to_radians().tan())
}

#[calc_fn]
fn asin(x: f64) -> Result<f64, FunctionError> {
    check_unit_interval("asin", x)?;
    Ok(x.asin().to_degrees())
}

#[calc_fn]
fn acos(x: f64) -> Result<f64, FunctionError> {
    check_unit_interval("acos", x)?;
    Ok(x.acos().to_degrees())
}

#[calc_fn]
fn atan(x: f64) -> Result<f64, FunctionError> {
    Ok(x.atan().to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_forward_functions_take_degrees() {
        assert!(sin(&[0.0]).unwrap().abs() < EPS);
        assert!((sin(&[30.0]).unwrap() - 0.5).abs() < EPS);
        assert!((sin(&[90.0]).unwrap() - 1.0).abs() < EPS);
        assert!((cos(&[60.0]).unwrap() - 0.5).abs() < EPS);
        assert!((cos(&[180.0]).unwrap() + 1.0).abs() < EPS);
        assert!((tan(&[45.0]).unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_inverse_functions_return_degrees() {
        assert!((asin(&[0.5]).unwrap() - 30.0).abs() < EPS);
        assert!((acos(&[0.0]).unwrap() - 90.0).abs() < EPS);
        assert!((atan(&[1.0]).unwrap() - 45.0).abs() < EPS);
        assert!((asin(&[-1.0]).unwrap() + 90.0).abs() < EPS);
    }

    #[test]
    fn test_inverse_domain() {
        let err = asin(&[2.0]).unwrap_err();
        assert!(matches!(err, FunctionError::Domain { .. }));
        assert!(err.to_string().contains("got 2"));
        assert!(acos(&[1.5]).is_err());
        assert!(acos(&[-1.0001]).is_err());
    }

    #[test]
    fn test_arity_is_checked() {
        assert!(matches!(
            sin(&[1.0, 2.0]),
            Err(FunctionError::Arity { given: 2, .. })
        ));
    }
}
