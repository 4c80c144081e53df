pub mod exponential;
pub mod logarithmic;
pub mod statistical;
pub mod trigonometric;

use crate::error::FunctionError;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

pub type Function = fn(&[f64]) -> Result<f64, FunctionError>;

/// Number of arguments a registry function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Range(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::Range(min, max) => (min..=max).contains(&count),
            Arity::AtLeast(min) => count >= min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "exactly {n}"),
            Arity::Range(min, max) => write!(f, "{min} to {max}"),
            Arity::AtLeast(min) => write!(f, "at least {min}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Trigonometric,
    Logarithmic,
    Exponential,
    Statistical,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Trigonometric,
        Category::Logarithmic,
        Category::Exponential,
        Category::Statistical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Trigonometric => "trigonometric",
            Category::Logarithmic => "logarithmic",
            Category::Exponential => "exponential",
            Category::Statistical => "statistical",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A whitelisted function together with its calling convention.
#[derive(Debug, Clone, Copy)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub arity: Arity,
    pub category: Category,
    pub description: &'static str,
    function: Function,
}

impl FunctionSpec {
    /// Checks the argument count, runs the function and rejects results that
    /// overflowed from finite inputs.
    pub fn call(&self, args: &[f64]) -> Result<f64, FunctionError> {
        if !self.arity.accepts(args.len()) {
            return Err(FunctionError::Arity {
                function: self.name.to_string(),
                expected: self.arity,
                given: args.len(),
            });
        }

        let value = (self.function)(args)?;
        if !value.is_finite() && args.iter().all(|a| a.is_finite()) {
            return Err(FunctionError::Overflow {
                function: self.name.to_string(),
            });
        }
        Ok(value)
    }
}

/// Immutable table of every function an expression may call.
///
/// Built once by [`FunctionRegistry::new`]; nothing is added or removed
/// afterwards, so a shared reference can be read from any thread.
#[derive(Debug)]
pub struct FunctionRegistry {
    functions: HashMap<&'static str, FunctionSpec>,
    order: Vec<&'static str>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
            order: Vec::new(),
        };
        trigonometric::register(&mut registry);
        logarithmic::register(&mut registry);
        exponential::register(&mut registry);
        statistical::register(&mut registry);
        log::debug!("Function registry built with {} entries", registry.len());
        registry
    }

    pub(crate) fn register(
        &mut self,
        name: &'static str,
        arity: Arity,
        category: Category,
        description: &'static str,
        function: Function,
    ) {
        let spec = FunctionSpec {
            name,
            arity,
            category,
            description,
            function,
        };
        if self.functions.insert(name, spec).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FunctionSpec> {
        self.order.iter().filter_map(|name| self.functions.get(name))
    }

    /// Function names grouped by category, every category present.
    pub fn list_by_category(&self) -> BTreeMap<Category, Vec<&'static str>> {
        let mut listing: BTreeMap<Category, Vec<&'static str>> =
            Category::ALL.iter().map(|c| (*c, Vec::new())).collect();
        for spec in self.iter() {
            listing.entry(spec.category).or_default().push(spec.name);
        }
        listing
    }

    /// Name to description, sorted by name.
    pub fn list_all(&self) -> BTreeMap<&'static str, &'static str> {
        self.iter().map(|s| (s.name, s.description)).collect()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let registry = FunctionRegistry::new();
        assert!(registry.is_registered("sin"));
        assert!(registry.is_registered("logn"));
        assert!(!registry.is_registered("nonexistent"));
        assert!(registry.get("nonexistent").is_none());

        let sqrt = registry.get("sqrt").unwrap();
        assert_eq!(sqrt.arity, Arity::Exact(1));
        assert_eq!(sqrt.category, Category::Exponential);
        assert!(!sqrt.description.is_empty());
    }

    #[test]
    fn test_listing_has_fixed_categories() {
        let registry = FunctionRegistry::new();
        let listing = registry.list_by_category();
        assert_eq!(listing.len(), 4);
        assert_eq!(
            listing[&Category::Trigonometric],
            vec!["sin", "cos", "tan", "asin", "acos", "atan"]
        );
        assert!(listing[&Category::Logarithmic].contains(&"log"));
        assert!(listing[&Category::Exponential].contains(&"nthroot"));
        assert!(listing[&Category::Statistical].contains(&"variance"));

        let total: usize = listing.values().map(Vec::len).sum();
        assert_eq!(total, registry.len());
    }

    #[test]
    fn test_call_checks_arity() {
        let registry = FunctionRegistry::new();
        let sin = registry.get("sin").unwrap();
        assert!(matches!(
            sin.call(&[]),
            Err(FunctionError::Arity { given: 0, .. })
        ));

        let mean = registry.get("mean").unwrap();
        assert!(mean.call(&[]).is_err());
        assert_eq!(mean.call(&[1.0, 2.0, 3.0]).unwrap(), 2.0);
    }

    #[test]
    fn test_call_reports_overflow() {
        let registry = FunctionRegistry::new();
        let exp = registry.get("exp").unwrap();
        assert!(matches!(
            exp.call(&[1000.0]),
            Err(FunctionError::Overflow { .. })
        ));
    }

    #[test]
    fn test_arity_display() {
        assert_eq!(Arity::Exact(2).to_string(), "exactly 2");
        assert_eq!(Arity::Range(1, 2).to_string(), "1 to 2");
        assert_eq!(Arity::AtLeast(1).to_string(), "at least 1");
        assert!(Arity::Range(1, 2).accepts(2));
        assert!(!Arity::Range(1, 2).accepts(3));
    }
}
