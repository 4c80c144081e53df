use super::{Dimension, Scale, TemperatureScale, UnitDef};

const POUND: f64 = 0.45359237;
const GALLON: f64 = 3.78541;
const QUART: f64 = GALLON / 4.0;
const CALORIE: f64 = 4.184;

const fn linear(
    name: &'static str,
    dimension: Dimension,
    to_base: f64,
    aliases: &'static [&'static str],
) -> UnitDef {
    UnitDef {
        name,
        dimension,
        scale: Scale::Linear(to_base),
        aliases,
    }
}

const fn temperature(
    name: &'static str,
    scale: TemperatureScale,
    aliases: &'static [&'static str],
) -> UnitDef {
    UnitDef {
        name,
        dimension: Dimension::Temperature,
        scale: Scale::Temperature(scale),
        aliases,
    }
}

/// Every known unit. Linear factors convert to the dimension's base unit:
/// meter, kilogram, liter, second, meter per second, newton, pascal, joule,
/// watt and weber.
pub(super) static UNITS: &[UnitDef] = &[
    // Distance
    linear("meter", Dimension::Distance, 1.0, &["m", "meters", "metre", "metres"]),
    linear(
        "kilometer",
        Dimension::Distance,
        1000.0,
        &["km", "kilometers", "kilometre", "kilometres"],
    ),
    linear("mile", Dimension::Distance, 1609.344, &["mi", "miles"]),
    linear("foot", Dimension::Distance, 0.3048, &["ft", "feet"]),
    linear("inch", Dimension::Distance, 0.0254, &["in", "inches"]),
    linear("yard", Dimension::Distance, 0.9144, &["yd", "yards"]),
    linear(
        "centimeter",
        Dimension::Distance,
        0.01,
        &["cm", "centimeters", "centimetre", "centimetres"],
    ),
    // Mass
    linear("kilogram", Dimension::Mass, 1.0, &["kg", "kgs", "kilograms"]),
    linear("pound", Dimension::Mass, POUND, &["lb", "lbs", "pounds"]),
    linear("ounce", Dimension::Mass, POUND / 16.0, &["oz", "ounces"]),
    linear("ton", Dimension::Mass, 1000.0, &["t", "tons", "tonne", "tonnes"]),
    linear("gram", Dimension::Mass, 0.001, &["g", "grams"]),
    // Temperature
    temperature("celsius", TemperatureScale::Celsius, &["c", "degc"]),
    temperature("fahrenheit", TemperatureScale::Fahrenheit, &["f", "degf"]),
    temperature("kelvin", TemperatureScale::Kelvin, &["k"]),
    // Volume
    linear("liter", Dimension::Volume, 1.0, &["l", "liters", "litre", "litres"]),
    linear(
        "milliliter",
        Dimension::Volume,
        0.001,
        &["ml", "milliliters", "millilitre", "millilitres"],
    ),
    linear("gallon", Dimension::Volume, GALLON, &["gal", "gallons"]),
    linear("quart", Dimension::Volume, QUART, &["qt", "quarts"]),
    linear("pint", Dimension::Volume, QUART / 2.0, &["pt", "pints"]),
    // Time
    linear("second", Dimension::Time, 1.0, &["s", "sec", "secs", "seconds"]),
    linear("minute", Dimension::Time, 60.0, &["min", "mins", "minutes"]),
    linear("hour", Dimension::Time, 3600.0, &["h", "hr", "hrs", "hours"]),
    linear("day", Dimension::Time, 86_400.0, &["d", "days"]),
    // Velocity
    linear(
        "meter_per_second",
        Dimension::Velocity,
        1.0,
        &["m/s", "mps", "meters_per_second", "metre_per_second"],
    ),
    linear(
        "kilometer_per_hour",
        Dimension::Velocity,
        1.0 / 3.6,
        &["km/h", "kph", "kmh", "kilometers_per_hour", "kilometre_per_hour"],
    ),
    linear(
        "mile_per_hour",
        Dimension::Velocity,
        0.44704,
        &["mph", "mi/h", "miles_per_hour"],
    ),
    linear(
        "foot_per_second",
        Dimension::Velocity,
        0.3048,
        &["ft/s", "fps", "feet_per_second"],
    ),
    linear(
        "knot",
        Dimension::Velocity,
        1852.0 / 3600.0,
        &["kn", "kt", "knots"],
    ),
    // Force
    linear("newton", Dimension::Force, 1.0, &["n", "newtons"]),
    linear("kilonewton", Dimension::Force, 1000.0, &["kilonewtons", "knewton"]),
    linear(
        "pound_force",
        Dimension::Force,
        POUND * 9.80665,
        &["lbf", "pounds_force", "pound_of_force"],
    ),
    linear("dyne", Dimension::Force, 1e-5, &["dyn", "dynes"]),
    // Pressure
    linear("pascal", Dimension::Pressure, 1.0, &["pa", "pascals"]),
    linear("kilopascal", Dimension::Pressure, 1000.0, &["kpa", "kilopascals"]),
    linear("bar", Dimension::Pressure, 100_000.0, &["bars"]),
    linear("atmosphere", Dimension::Pressure, 101_325.0, &["atm", "atmospheres"]),
    linear(
        "psi",
        Dimension::Pressure,
        POUND * 9.80665 / (0.0254 * 0.0254),
        &["lbf/in2", "pounds_per_square_inch"],
    ),
    linear(
        "mmhg",
        Dimension::Pressure,
        133.322387415,
        &["mm_hg", "millimeter_of_mercury", "millimetre_of_mercury"],
    ),
    // Energy
    linear("joule", Dimension::Energy, 1.0, &["j", "joules"]),
    linear("kilojoule", Dimension::Energy, 1000.0, &["kj", "kilojoules"]),
    linear("calorie", Dimension::Energy, CALORIE, &["cal", "calories"]),
    linear(
        "kilocalorie",
        Dimension::Energy,
        CALORIE * 1000.0,
        &["kcal", "kilocalories"],
    ),
    linear(
        "kilowatt_hour",
        Dimension::Energy,
        3.6e6,
        &["kwh", "kw_h", "kilowatt_hours"],
    ),
    linear(
        "btu",
        Dimension::Energy,
        1055.05585262,
        &["btus", "british_thermal_unit"],
    ),
    // Power
    linear("watt", Dimension::Power, 1.0, &["w", "watts"]),
    linear("kilowatt", Dimension::Power, 1000.0, &["kw", "kilowatts"]),
    linear("horsepower", Dimension::Power, 745.69987158227, &["hp"]),
    // Magnetic flux
    linear("weber", Dimension::MagneticFlux, 1.0, &["wb", "webers"]),
    linear("maxwell", Dimension::MagneticFlux, 1e-8, &["mx", "maxwells"]),
];
