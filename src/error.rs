use crate::functions::Arity;
use std::fmt;
use thiserror::Error;

/// Key/value details attached to an error, rendered after the message as
/// `(key: value | key: value)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext(Vec<(&'static str, String)>);

impl ErrorContext {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, key: &'static str, value: impl ToString) {
        self.0.push((key, value.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        write!(f, " (")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, ")")
    }
}

/// The error families surfaced by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    Evaluation,
    Domain,
    Unit,
    Dimensionality,
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Evaluation => "EvaluationError",
            ErrorKind::Domain => "DomainError",
            ErrorKind::Unit => "UnitError",
            ErrorKind::Dimensionality => "DimensionalityError",
            ErrorKind::Unexpected => "UnexpectedError",
        };
        f.write_str(name)
    }
}

/// Every failure the parser, evaluator or unit converter can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Input that cannot be turned into a valid AST, or that names an
    /// unknown function or variable.
    #[error("{message}{context}")]
    Syntax {
        message: String,
        context: ErrorContext,
    },

    /// Runtime failure while walking a valid AST.
    #[error("{message}{context}")]
    Evaluation {
        message: String,
        context: ErrorContext,
    },

    /// Division or modulo by zero. Reported as an evaluation failure.
    #[error("{message}{context}")]
    ZeroDivision {
        message: String,
        context: ErrorContext,
    },

    /// A function argument outside its mathematical domain, when the function
    /// is called directly rather than from an expression.
    #[error("{message}{context}")]
    Domain {
        message: String,
        context: ErrorContext,
    },

    /// Unrecognised unit name.
    #[error("{message}{context}")]
    Unit {
        message: String,
        context: ErrorContext,
    },

    /// Two known units of different dimensions.
    #[error("{message}{context}")]
    Dimensionality {
        message: String,
        context: ErrorContext,
    },

    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

impl CalcError {
    pub fn syntax(message: impl Into<String>) -> Self {
        CalcError::Syntax {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn evaluation(message: impl Into<String>) -> Self {
        CalcError::Evaluation {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn zero_division(message: impl Into<String>) -> Self {
        CalcError::ZeroDivision {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn domain(message: impl Into<String>) -> Self {
        CalcError::Domain {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn unit(message: impl Into<String>) -> Self {
        CalcError::Unit {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn dimensionality(message: impl Into<String>) -> Self {
        CalcError::Dimensionality {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        CalcError::Unexpected {
            message: message.into(),
        }
    }

    /// Appends a context entry. `Unexpected` errors carry no context.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        if let Some(context) = self.context_mut() {
            context.push(key, value);
        }
        self
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::Syntax { .. } => ErrorKind::Syntax,
            CalcError::Evaluation { .. } | CalcError::ZeroDivision { .. } => {
                ErrorKind::Evaluation
            }
            CalcError::Domain { .. } => ErrorKind::Domain,
            CalcError::Unit { .. } => ErrorKind::Unit,
            CalcError::Dimensionality { .. } => ErrorKind::Dimensionality,
            CalcError::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    pub fn is_zero_division(&self) -> bool {
        matches!(self, CalcError::ZeroDivision { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            CalcError::Syntax { message, .. }
            | CalcError::Evaluation { message, .. }
            | CalcError::ZeroDivision { message, .. }
            | CalcError::Domain { message, .. }
            | CalcError::Unit { message, .. }
            | CalcError::Dimensionality { message, .. }
            | CalcError::Unexpected { message } => message,
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            CalcError::Syntax { context, .. }
            | CalcError::Evaluation { context, .. }
            | CalcError::ZeroDivision { context, .. }
            | CalcError::Domain { context, .. }
            | CalcError::Unit { context, .. }
            | CalcError::Dimensionality { context, .. } => Some(context),
            CalcError::Unexpected { .. } => None,
        }
    }

    fn context_mut(&mut self) -> Option<&mut ErrorContext> {
        match self {
            CalcError::Syntax { context, .. }
            | CalcError::Evaluation { context, .. }
            | CalcError::ZeroDivision { context, .. }
            | CalcError::Domain { context, .. }
            | CalcError::Unit { context, .. }
            | CalcError::Dimensionality { context, .. } => Some(context),
            CalcError::Unexpected { .. } => None,
        }
    }
}

/// Failure raised by a registry function.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FunctionError {
    #[error("Domain error in {function}(): {message}")]
    Domain { function: String, message: String },

    #[error("{function}() expects {expected} argument(s), got {given}")]
    Arity {
        function: String,
        expected: Arity,
        given: usize,
    },

    #[error("Numeric overflow in {function}()")]
    Overflow { function: String },
}

impl FunctionError {
    pub fn domain(function: &str, message: impl Into<String>) -> Self {
        FunctionError::Domain {
            function: function.to_string(),
            message: message.into(),
        }
    }

    pub fn function(&self) -> &str {
        match self {
            FunctionError::Domain { function, .. }
            | FunctionError::Arity { function, .. }
            | FunctionError::Overflow { function } => function,
        }
    }
}

/// Direct calls keep the domain kind; the evaluator wraps instead.
impl From<FunctionError> for CalcError {
    fn from(err: FunctionError) -> Self {
        let function = err.function().to_string();
        match err {
            FunctionError::Domain { .. } => {
                CalcError::domain(err.to_string()).with_context("function", function)
            }
            FunctionError::Arity { .. } | FunctionError::Overflow { .. } => {
                CalcError::evaluation(err.to_string()).with_context("function", function)
            }
        }
    }
}
