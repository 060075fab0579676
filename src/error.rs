//! Retry classification for failures.
//!
//! Every failure that crosses a retry boundary is tagged as either
//! [`ClassifiedError::Transient`] (worth another attempt) or
//! [`ClassifiedError::Fatal`] (retrying cannot help). Callers decide between
//! retry and abort by matching on the variant, never by inspecting messages.

use std::fmt;

/// A failure tagged with its retry class.
#[derive(Debug, thiserror::Error)]
pub enum ClassifiedError<E> {
    /// Temporary condition (network blip, bad status, garbled response).
    #[error("{0}")]
    Transient(E),

    /// Permanent condition (bad input, ambiguous result, encoding bug).
    #[error("{0}")]
    Fatal(E),
}

impl<E> ClassifiedError<E> {
    /// Wrap an optional failure.
    ///
    /// Returns `None` when there is no underlying failure, so a successful
    /// step never produces an error value.
    pub fn new(cause: Option<E>, retryable: bool) -> Option<Self> {
        cause.map(|e| {
            if retryable {
                Self::Transient(e)
            } else {
                Self::Fatal(e)
            }
        })
    }

    pub fn transient(cause: E) -> Self {
        Self::Transient(cause)
    }

    pub fn fatal(cause: E) -> Self {
        Self::Fatal(cause)
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    /// The underlying failure.
    pub fn cause(&self) -> &E {
        match self {
            Self::Transient(e) | Self::Fatal(e) => e,
        }
    }

    pub fn into_cause(self) -> E {
        match self {
            Self::Transient(e) | Self::Fatal(e) => e,
        }
    }

    /// Short label used in logs and metrics.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Transient(_) => ErrorClass::Transient,
            Self::Fatal(_) => ErrorClass::Fatal,
        }
    }
}

/// Fatality check that treats "no error" as non-fatal.
pub fn is_fatal<E>(error: Option<&ClassifiedError<E>>) -> bool {
    error.is_some_and(ClassifiedError::is_fatal)
}

/// Retry class without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    Transient,
    Fatal,
}

impl ErrorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::Transient => "transient",
            ErrorClass::Fatal => "fatal",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Boom(&'static str);

    impl fmt::Display for Boom {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    #[test]
    fn test_no_cause_yields_no_error() {
        assert!(ClassifiedError::<Boom>::new(None, true).is_none());
        assert!(ClassifiedError::<Boom>::new(None, false).is_none());
        assert!(!is_fatal::<Boom>(None));
    }

    #[test]
    fn test_retryable_flag_selects_variant() {
        let transient = ClassifiedError::new(Some(Boom("blip")), true).unwrap();
        assert!(!transient.is_fatal());
        assert!(!is_fatal(Some(&transient)));
        assert_eq!(transient.class(), ErrorClass::Transient);

        let fatal = ClassifiedError::new(Some(Boom("bug")), false).unwrap();
        assert!(fatal.is_fatal());
        assert!(is_fatal(Some(&fatal)));
        assert_eq!(fatal.into_cause(), Boom("bug"));
    }

    #[test]
    fn test_display_is_transparent() {
        let err = ClassifiedError::transient(Boom("connection reset"));
        assert_eq!(err.to_string(), "connection reset");
        assert_eq!(err.cause(), &Boom("connection reset"));
        assert_eq!(ErrorClass::Fatal.to_string(), "fatal");
    }
}
