use scicalc_rs::{
    convert_units, evaluate, evaluate_function, get_conversion_factor, is_unit_compatible,
    list_functions, list_units,
};

fn main() {
    pretty_env_logger::init();

    println!("Available units:");
    for (category, units) in list_units() {
        println!("  {:<12} {}", category, units.join(", "));
    }

    println!("\nUnit conversions:");
    let conversions = [
        (5.0, "kilometer", "mile"),
        (32.0, "fahrenheit", "celsius"),
        (220.0, "pounds", "kg"),
        (1.0, "liter", "gallons"),
        (100.0, "km/h", "mph"),
    ];
    for (value, from, to) in conversions {
        let outcome = convert_units(value, from, to);
        match outcome.result {
            Some(converted) => println!("  {} {} = {} {}", value, from, converted, to),
            None => println!("  {} {} -> {}: {:?}", value, from, to, outcome.error),
        }
    }

    println!("\nAvailable functions:");
    for (category, names) in list_functions() {
        println!("  {:<14} {}", category, names.join(", "));
    }

    println!("\nScientific functions:");
    let scientific = [
        "sin(30)",
        "cos(60)",
        "log10(1000)",
        "ln(e)",
        "sqrt(144)",
        "nthroot(-27, 3)",
    ];
    for expression in scientific {
        println!("  {} = {:?}", expression, evaluate(expression).result);
    }
    let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    println!(
        "  stdev(2, 4, 4, 4, 5, 5, 7, 9) = {:?}",
        evaluate_function("stdev", &samples).result
    );

    println!("\nCompound expressions:");
    let compound = [
        "2 + 3 * 4",
        "(2 + 3) * 4",
        "2 ** 3 ** 2",
        "sqrt(3 ** 2 + 4 ** 2)",
        "mean(1, 2, 3) * pi",
    ];
    for expression in compound {
        println!("  {} = {:?}", expression, evaluate(expression).result);
    }

    println!("\nCompatibility checks:");
    for (from, to) in [("kilometer", "mile"), ("kilometer", "kilogram"), ("meter", "furlong")] {
        let check = is_unit_compatible(from, to);
        println!("  {} / {}: {} {:?}", from, to, check.compatible, check.error);
    }
    let factor = get_conversion_factor("foot", "inch");
    println!("  factor foot -> inch: {:?}", factor.factor);

    println!("\nError handling:");
    for expression in ["1 / 0", "sqrt(-1)", "unknown_func(5)", "2 +", "x + 1"] {
        let outcome = evaluate(expression);
        println!("  {:<16} -> {}", expression, outcome.error.unwrap_or_default());
    }
    let outcome = convert_units(1.0, "kilogram", "second");
    println!("  kilogram -> second -> {}", outcome.error.unwrap_or_default());
}
