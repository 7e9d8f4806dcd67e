use super::Location;
use super::printer::Report;

/// A syntax error. Parsing stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{location} {message}")]
pub struct ParseError {
    pub location: Location,
    pub message: String,
}

impl ParseError {
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }

    pub fn render(&self, source: &str, colored: bool) -> String {
        Report::new(&self.location, &self.message).render(source, colored)
    }
}

/// A structural violation found while resolving declarations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "{location} {message}{}",
    .first_declared.as_ref().map(|l| format!("\nFirst declared here: {l}")).unwrap_or_default()
)]
pub struct ResolveError {
    pub location: Location,
    pub message: String,
    /// Earlier declaration of the same name, for duplicate declarations.
    pub first_declared: Option<Location>,
}

impl ResolveError {
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
            first_declared: None,
        }
    }

    pub fn duplicate(name: &str, location: Location, first_declared: Location) -> Self {
        Self {
            location,
            message: format!("'{name}' already declared"),
            first_declared: Some(first_declared),
        }
    }

    pub fn render(&self, source: &str, colored: bool) -> String {
        let mut report = Report::new(&self.location, &self.message);
        if let Some(first) = &self.first_declared {
            report = report.related(first, "first declared here");
        }
        report.render(source, colored)
    }
}

/// A build-time self-check failure while generating permutations or tables.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "{}{message}",
    .location.as_ref().map(|l| format!("{l} ")).unwrap_or_default()
)]
pub struct GenerationError {
    /// Declaration of the overload being processed, if any.
    pub location: Option<Location>,
    pub message: String,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            location: None,
            message: message.into(),
        }
    }

    pub fn at(location: Location, message: impl Into<String>) -> Self {
        Self {
            location: Some(location),
            message: message.into(),
        }
    }

    pub fn render(&self, source: &str, colored: bool) -> String {
        match &self.location {
            Some(location) => Report::new(location, &self.message).render(source, colored),
            None => self.to_string(),
        }
    }
}
