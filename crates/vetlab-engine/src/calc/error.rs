use std::fmt;

/// Why a calculation produced no result.
///
/// Everything except [`CalcError::Storage`] is detected before any formula runs.
#[derive(Debug)]
pub enum CalcError {
    /// Required inputs missing or not numeric. Lists every required field.
    Invalid { fields: Vec<&'static str> },
    /// None of a set of alternative inputs was supplied.
    NeedOneOf { fields: Vec<&'static str> },
    /// Inputs are numeric but outside the formula's domain.
    Domain(String),
    /// A unit or category that the converter does not know or that does not fit.
    Unsupported(String),
    /// The result was computed but could not be recorded.
    Storage(anyhow::Error),
}

impl CalcError {
    pub(crate) fn invalid(fields: &[&'static str]) -> Self {
        Self::Invalid {
            fields: fields.to_vec(),
        }
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    /// Whether the error comes from user input rather than storage.
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { fields } => {
                write!(f, "invalid input: enter numeric values for {}", fields.join(", "))
            }
            Self::NeedOneOf { fields } => write!(f, "invalid input: enter one of {}", fields.join(" or ")),
            Self::Domain(msg) => write!(f, "invalid input: {msg}"),
            Self::Unsupported(msg) => write!(f, "unsupported: {msg}"),
            Self::Storage(e) => write!(f, "could not save to history: {e:#}"),
        }
    }
}

impl std::error::Error for CalcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
