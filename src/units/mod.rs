//! Unit conversion between named units of the same physical dimension.
//!
//! Linear units convert through their dimension's base unit; temperature
//! scales convert through Celsius with additive offsets.

mod table;

use crate::error::CalcError;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;
use table::UNITS;

/// Physical quantity family. Only units of the same dimension convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Distance,
    Mass,
    Temperature,
    Volume,
    Time,
    Velocity,
    Force,
    Pressure,
    Energy,
    Power,
    MagneticFlux,
}

impl Dimension {
    /// Listing category; everything past the four core dimensions is
    /// grouped as `derived`.
    pub fn category(&self) -> &'static str {
        match self {
            Dimension::Distance => "distance",
            Dimension::Mass => "mass",
            Dimension::Temperature => "temperature",
            Dimension::Volume => "volume",
            Dimension::Time
            | Dimension::Velocity
            | Dimension::Force
            | Dimension::Pressure
            | Dimension::Energy
            | Dimension::Power
            | Dimension::MagneticFlux => "derived",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Distance => "distance",
            Dimension::Mass => "mass",
            Dimension::Temperature => "temperature",
            Dimension::Volume => "volume",
            Dimension::Time => "time",
            Dimension::Velocity => "velocity",
            Dimension::Force => "force",
            Dimension::Pressure => "pressure",
            Dimension::Energy => "energy",
            Dimension::Power => "power",
            Dimension::MagneticFlux => "magnetic flux",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => value,
            TemperatureScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureScale::Kelvin => value - 273.15,
        }
    }

    fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => celsius,
            TemperatureScale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureScale::Kelvin => celsius + 273.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// Multiply by this factor to reach the base unit.
    Linear(f64),
    Temperature(TemperatureScale),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    pub name: &'static str,
    pub dimension: Dimension,
    pub scale: Scale,
    pub aliases: &'static [&'static str],
}

impl UnitDef {
    fn matches(&self, key: &str) -> bool {
        self.name == key || self.aliases.contains(&key)
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Resolves a unit name, alias or abbreviation, ignoring case and
/// surrounding whitespace.
pub fn lookup(name: &str) -> Result<&'static UnitDef, CalcError> {
    let key = normalize(name);
    if key.is_empty() {
        return Err(CalcError::unit("Unit name must not be empty"));
    }
    UNITS.iter().find(|unit| unit.matches(&key)).ok_or_else(|| {
        CalcError::unit(format!("Unknown unit: {}", name.trim())).with_context("unit", name.trim())
    })
}

fn incompatible(from: &UnitDef, to: &UnitDef) -> CalcError {
    CalcError::dimensionality(format!(
        "Cannot convert from {} to {}: incompatible dimensions ({} vs {})",
        from.name, to.name, from.dimension, to.dimension
    ))
    .with_context("from_unit", from.name)
    .with_context("to_unit", to.name)
}

fn convert_between(value: f64, from: &UnitDef, to: &UnitDef) -> Result<f64, CalcError> {
    if from.dimension != to.dimension {
        return Err(incompatible(from, to));
    }
    match (from.scale, to.scale) {
        (Scale::Linear(from_factor), Scale::Linear(to_factor)) => {
            Ok(value * from_factor / to_factor)
        }
        (Scale::Temperature(from_scale), Scale::Temperature(to_scale)) => {
            Ok(to_scale.from_celsius(from_scale.to_celsius(value)))
        }
        _ => Err(incompatible(from, to)),
    }
}

/// Converts `value` from one unit to another. The result is not rounded.
pub fn convert(value: f64, from_unit: &str, to_unit: &str) -> Result<f64, CalcError> {
    if !value.is_finite() {
        return Err(CalcError::evaluation("Value to convert must be a finite number")
            .with_context("value", value));
    }
    let from = lookup(from_unit)?;
    let to = lookup(to_unit)?;
    let converted = convert_between(value, from, to)?;
    debug!("Converted {} {} to {} {}", value, from.name, converted, to.name);
    Ok(converted)
}

/// Whether two known units share a dimension. Unknown names are an error,
/// not `false`.
pub fn is_compatible(from_unit: &str, to_unit: &str) -> Result<bool, CalcError> {
    let from = lookup(from_unit)?;
    let to = lookup(to_unit)?;
    Ok(from.dimension == to.dimension)
}

/// `convert(1.0, from, to)`.
///
/// For linear units this is the multiplicative factor. Temperature scales
/// have an offset, so the returned value only describes where `1.0` lands
/// and is not a factor.
pub fn get_conversion_factor(from_unit: &str, to_unit: &str) -> Result<f64, CalcError> {
    convert(1.0, from_unit, to_unit)
}

/// Canonical unit names by category, in table order. Every category is
/// present.
pub fn list_units() -> BTreeMap<&'static str, Vec<&'static str>> {
    let mut listing: BTreeMap<&'static str, Vec<&'static str>> =
        ["distance", "mass", "temperature", "volume", "derived"]
            .into_iter()
            .map(|category| (category, Vec::new()))
            .collect();
    for unit in UNITS {
        listing
            .entry(unit.dimension.category())
            .or_default()
            .push(unit.name);
    }
    listing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_distance() {
        assert_close(convert(5.0, "kilometer", "mile").unwrap(), 3.10686, 1e-4);
        assert_close(convert(100.0, "meter", "foot").unwrap(), 328.084, 1e-3);
        assert_close(convert(1.0, "inch", "centimeter").unwrap(), 2.54, 1e-9);
        assert_close(convert(1.0, "yard", "meter").unwrap(), 0.9144, 1e-12);
        assert_close(convert(200.0, "mile", "kilometer").unwrap(), 321.869, 1e-3);
    }

    #[test]
    fn test_mass() {
        assert_close(convert(1.0, "kilogram", "pound").unwrap(), 2.20462, 1e-4);
        assert_close(convert(100.0, "gram", "ounce").unwrap(), 3.52740, 1e-4);
        assert_close(convert(220.0, "pounds", "kg").unwrap(), 99.7903, 1e-3);
        assert_close(convert(1000.0, "kilogram", "ton").unwrap(), 1.0, 1e-12);
    }

    #[test]
    fn test_volume() {
        assert_close(convert(1.0, "liter", "gallon").unwrap(), 0.264172, 1e-5);
        assert_close(convert(1.0, "gallon", "quart").unwrap(), 4.0, 1e-12);
        assert_close(convert(1.0, "quart", "pint").unwrap(), 2.0, 1e-12);
        assert_close(convert(1000.0, "milliliter", "liter").unwrap(), 1.0, 1e-12);
    }

    #[test]
    fn test_temperature() {
        assert_close(convert(0.0, "celsius", "fahrenheit").unwrap(), 32.0, 1e-12);
        assert_close(convert(100.0, "c", "f").unwrap(), 212.0, 1e-12);
        assert_close(convert(32.0, "fahrenheit", "celsius").unwrap(), 0.0, 1e-12);
        assert_close(convert(0.0, "celsius", "kelvin").unwrap(), 273.15, 1e-12);
        assert_close(convert(-40.0, "F", "C").unwrap(), -40.0, 1e-12);
        assert_close(convert(0.0, "K", "fahrenheit").unwrap(), -459.67, 1e-9);
    }

    #[test]
    fn test_derived() {
        assert_close(convert(2.0, "hour", "minute").unwrap(), 120.0, 1e-12);
        assert_close(convert(1.0, "day", "seconds").unwrap(), 86_400.0, 1e-9);
        assert_close(convert(36.0, "km/h", "m/s").unwrap(), 10.0, 1e-12);
        assert_close(convert(60.0, "mph", "kilometer_per_hour").unwrap(), 96.56064, 1e-9);
        assert_close(convert(1.0, "knot", "kph").unwrap(), 1.852, 1e-12);

        assert_close(convert(1.0, "lbf", "newton").unwrap(), 4.448222, 1e-6);
        assert_close(convert(1.0, "kilonewton", "dyne").unwrap(), 1e8, 1e-3);
        assert_close(convert(1.0, "atm", "kpa").unwrap(), 101.325, 1e-9);
        assert_close(convert(1.0, "bar", "psi").unwrap(), 14.50377, 1e-5);
        assert_close(convert(760.0, "mmhg", "atmosphere").unwrap(), 1.0, 1e-6);
        assert_close(convert(1.0, "kilocalorie", "kilojoule").unwrap(), 4.184, 1e-12);
        assert_close(convert(1.0, "kwh", "joules").unwrap(), 3.6e6, 1e-6);
        assert_close(convert(1.0, "btu", "calorie").unwrap(), 252.1644, 1e-4);
        assert_close(convert(1.0, "horsepower", "watt").unwrap(), 745.69987, 1e-5);
        assert_close(convert(2.5, "kw", "w").unwrap(), 2500.0, 1e-12);
        assert_close(convert(1.0, "weber", "maxwell").unwrap(), 1e8, 1e-6);
    }

    #[test]
    fn test_aliases_case_and_whitespace() {
        assert_eq!(lookup("  KM ").unwrap().name, "kilometer");
        assert_eq!(lookup("Miles").unwrap().name, "mile");
        assert_eq!(lookup("LBS").unwrap().name, "pound");
        assert_eq!(lookup("Celsius").unwrap().name, "celsius");
        assert_eq!(lookup("meter per second").unwrap().name, "meter_per_second");
        assert_eq!(lookup("kilometer-per-hour").unwrap().name, "kilometer_per_hour");
        assert_eq!(lookup("Pound-Force").unwrap().name, "pound_force");
        assert_eq!(lookup("kilowatt hour").unwrap().name, "kilowatt_hour");
        assert_eq!(lookup("mmHg").unwrap().name, "mmhg");
    }

    #[test]
    fn test_unknown_unit() {
        let err = convert(1.0, "furlong", "meter").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unit);
        assert!(err.to_string().contains("Unknown unit: furlong"));

        let err = convert(1.0, "meter", "parsec").unwrap_err();
        assert!(err.to_string().contains("parsec"));

        let err = lookup("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unit);
    }

    #[test]
    fn test_incompatible_dimensions() {
        let err = convert(1.0, "kilometer", "kilogram").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimensionality);
        let message = err.to_string();
        assert!(message.contains("Cannot convert"));
        assert!(message.contains("incompatible"));
        assert!(message.contains("kilometer"));
        assert!(message.contains("kilogram"));

        let err = convert(1.0, "kilogram", "second").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimensionality);

        let err = convert(1.0, "celsius", "meter").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimensionality);

        let err = convert(1.0, "minute", "knot").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimensionality);

        let err = convert(1.0, "newton", "joule").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimensionality);
        assert!(err.to_string().contains("(force vs energy)"));

        let err = convert(1.0, "watt", "kilowatt_hour").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimensionality);

        let err = convert(1.0, "pascal", "weber").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimensionality);
    }

    #[test]
    fn test_non_finite_value() {
        assert!(convert(f64::NAN, "meter", "foot").is_err());
        assert!(convert(f64::INFINITY, "meter", "foot").is_err());
    }

    #[test]
    fn test_is_compatible() {
        assert!(is_compatible("kilometer", "mile").unwrap());
        assert!(is_compatible("c", "kelvin").unwrap());
        assert!(!is_compatible("kilometer", "kilogram").unwrap());
        assert!(!is_compatible("liter", "second").unwrap());
        assert_eq!(
            is_compatible("kilometer", "bogus").unwrap_err().kind(),
            ErrorKind::Unit
        );
    }

    #[test]
    fn test_conversion_factor() {
        assert_close(get_conversion_factor("kilometer", "meter").unwrap(), 1000.0, 1e-12);
        assert_close(get_conversion_factor("pound", "ounce").unwrap(), 16.0, 1e-12);
        // Offset scale: the value of 1 degree C in F, not a factor.
        assert_close(get_conversion_factor("celsius", "fahrenheit").unwrap(), 33.8, 1e-12);
        assert!(get_conversion_factor("meter", "liter").is_err());
    }

    #[test]
    fn test_list_units() {
        let listing = list_units();
        let categories: Vec<_> = listing.keys().copied().collect();
        assert_eq!(categories, vec!["derived", "distance", "mass", "temperature", "volume"]);
        assert_eq!(listing["temperature"], vec!["celsius", "fahrenheit", "kelvin"]);
        assert!(listing["distance"].contains(&"meter"));
        assert!(listing["mass"].contains(&"kilogram"));
        assert!(listing["volume"].contains(&"liter"));
        for name in ["knot", "newton", "pascal", "joule", "watt", "weber"] {
            assert!(listing["derived"].contains(&name), "{name} missing");
        }

        for units in listing.values() {
            for unit in units {
                assert!(lookup(unit).is_ok());
            }
        }
    }
}
