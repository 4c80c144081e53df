//! Descriptive statistics over the full argument list.

use super::{Arity, Category, FunctionRegistry};
use crate::error::FunctionError;
use scicalc_macros::calc_fn;

pub fn register(registry: &mut FunctionRegistry) {
    let stats = Category::Statistical;
    registry.register("mean", Arity::AtLeast(1), stats, "Arithmetic mean of values", mean);
    registry.register("median", Arity::AtLeast(1), stats, "Median of values", median);
    registry.register(
        "mode",
        Arity::AtLeast(1),
        stats,
        "Most frequent value (first seen wins ties)",
        mode,
    );
    registry.register(
        "variance",
        Arity::AtLeast(1),
        stats,
        "Sample variance (requires at least two values)",
        variance,
    );
    registry.register(
        "stdev",
        Arity::AtLeast(1),
        stats,
        "Sample standard deviation (requires at least two values)",
        stdev,
    );
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_variance(function: &str, values: &[f64]) -> Result<f64, FunctionError> {
    if values.len() < 2 {
        return Err(FunctionError::domain(
            function,
            format!("requires at least two values, got {}", values.len()),
        ));
    }
    let m = average(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Ok(sum_sq / (values.len() - 1) as f64)
}

#[calc_fn]
fn mean(values: &[f64]) -> Result<f64, FunctionError> {
    Ok(average(values))
}

#[calc_fn]
fn median(values: &[f64]) -> Result<f64, FunctionError> {
    if values.is_empty() {
        return Ok(0.0);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

#[calc_fn]
fn mode(values: &[f64]) -> Result<f64, FunctionError> {
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for &value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    // Strictly greater keeps the first value seen among equal counts.
    let mut best: Option<(f64, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    Ok(best.map_or(0.0, |(value, _)| value))
}

#[calc_fn]
fn variance(values: &[f64]) -> Result<f64, FunctionError> {
    sample_variance("variance", values)
}

#[calc_fn]
fn stdev(values: &[f64]) -> Result<f64, FunctionError> {
    Ok(sample_variance("stdev", values)?.sqrt())
}
