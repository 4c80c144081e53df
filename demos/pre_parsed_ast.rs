use scicalc_rs::{Evaluator, FunctionRegistry};
use std::collections::HashMap;
use std::sync::Arc;

fn main() {
    pretty_env_logger::init();

    let evaluator = Evaluator::new(Arc::new(FunctionRegistry::new()));

    let expression = "sqrt(x ** 2 + y ** 2)";
    let ast = evaluator
        .parse_expression(expression)
        .expect("Failed to parse");
    println!("AST depth: {}", ast.depth());

    for (x, y) in [(3.0, 4.0), (5.0, 12.0), (8.0, 15.0)] {
        let context: HashMap<String, f64> = [("x".to_string(), x), ("y".to_string(), y)]
            .iter()
            .cloned()
            .collect();

        match evaluator.evaluate(&ast, &context) {
            Ok(result) => println!("{} with x={}, y={}: {}", expression, x, y, result),
            Err(err) => println!("Error: {}", err),
        }
    }
}
