use scicalc_rs::{Calculator, CalculatorConfig};
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let calculator = Calculator::new(CalculatorConfig::default().with_max_expression_length(256));
    let context = HashMap::from([("radius".to_string(), 2.5), ("angle".to_string(), 45.0)]);

    let expressions = vec![
        "pi * radius ** 2",
        "2 * pi * radius",
        "sin(angle) ** 2 + cos(angle) ** 2",
        "tan(angle)",
        "radius / (angle - 45)",
        "logn(radius, 0)",
    ];

    let results = calculator.evaluate_batch(&expressions, &context);
    for (expression, result) in expressions.iter().zip(results) {
        match (result.result, result.error) {
            (Some(value), _) => println!("{} = {}", expression, value),
            (None, Some(error)) => println!("{} failed: {}", expression, error),
            (None, None) => unreachable!("result without value or error"),
        }
    }
}
