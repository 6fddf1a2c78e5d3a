use std::fmt::{self, Display, Formatter};

use miette::{Diagnostic, Severity};
use thiserror::Error;


/// Upper bound on how many valid options are listed in an enum error.
const MAX_LISTED_OPTIONS: usize = 16;


/// What went wrong with a configured value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SerializerErrorKind {
    /// A required key is not explicitly defined.
    MissingKey,
    /// A value is present but has the wrong shape or type.
    TypeMismatch,
    /// A number is outside its inclusive bounds.
    OutOfRange,
    /// A number is negative where it must be positive.
    NegativeValue,
    /// A string does not resolve to exactly one enum constant.
    EnumMismatch,
    /// A list-of-tuples element has missing parts, extra parts or is blank.
    ListFormat,
    General,
}

impl SerializerErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            SerializerErrorKind::MissingKey => "weapon_mechanics::missing_key",
            SerializerErrorKind::TypeMismatch => "weapon_mechanics::type_mismatch",
            SerializerErrorKind::OutOfRange => "weapon_mechanics::out_of_range",
            SerializerErrorKind::NegativeValue => "weapon_mechanics::negative_value",
            SerializerErrorKind::EnumMismatch => "weapon_mechanics::enum_mismatch",
            SerializerErrorKind::ListFormat => "weapon_mechanics::list_format",
            SerializerErrorKind::General => "weapon_mechanics::general",
        }
    }
}

impl Display for SerializerErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}


/// A mistake in user-authored configuration.
///
/// Carries the name of the serializer that found the mistake, one or more
/// human-readable message lines and the location of the offending value.
/// The rendered message is the only thing meant to be shown to configuration authors.
#[derive(Error, Clone, PartialEq, Debug)]
#[error(
    "{serializer} found an error in your configuration:\n    {}\n    {location}",
    .messages.join("\n    ")
)]
pub struct SerializerError {
    kind: SerializerErrorKind,
    serializer: String,
    messages: Vec<String>,
    location: String,
}

impl SerializerError {
    pub fn new<S, I, M, L>(kind: SerializerErrorKind, serializer: S, messages: I, location: L) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = M>,
        M: Into<String>,
        L: Into<String>,
    {
        Self {
            kind,
            serializer: serializer.into(),
            messages: messages.into_iter().map(Into::into).collect(),
            location: location.into(),
        }
    }

    pub fn missing_key(serializer: &str, key: &str, location: String) -> Self {
        Self::new(
            SerializerErrorKind::MissingKey,
            serializer,
            [
                format!("You are missing the required key '{key}'."),
                "Make sure the key is spelled correctly and that it has a value.".to_string(),
            ],
            location,
        )
    }

    /// `actual` is `None` when the offending value did not have a type of its own
    /// (for example a part of a list element).
    pub fn type_mismatch<E, V>(
        serializer: &str,
        expected: E,
        actual: Option<E>,
        found: V,
        location: String,
    ) -> Self
    where
        E: Display,
        V: Display,
    {
        let first_message = match actual {
            Some(actual) => format!("Expected {expected}, but found {actual}."),
            None => format!("Expected {expected}."),
        };

        Self::new(
            SerializerErrorKind::TypeMismatch,
            serializer,
            [first_message, for_value(found)],
            location,
        )
    }

    pub fn out_of_range<N: Display>(serializer: &str, min: N, found: N, max: N, location: String) -> Self {
        Self::new(
            SerializerErrorKind::OutOfRange,
            serializer,
            [
                format!("Expected a number between {min} and {max} (inclusive)."),
                for_value(found),
            ],
            location,
        )
    }

    pub fn negative<N: Display>(serializer: &str, found: N, location: String) -> Self {
        Self::new(
            SerializerErrorKind::NegativeValue,
            serializer,
            [
                "Expected a positive number, but got a negative one.".to_string(),
                for_value(found),
            ],
            location,
        )
    }

    pub fn enum_mismatch(
        serializer: &str,
        enum_name: &str,
        input: &str,
        allow_wildcards: bool,
        options: &[&str],
        location: String,
    ) -> Self {
        let mut messages = vec![format!("Could not match '{input}' to any {enum_name}.")];

        if input.starts_with('$') && !allow_wildcards {
            messages.push(format!(
                "Wildcards ($) cannot be used here, '{input}' must name exactly one {enum_name}."
            ));
        }

        let mut listed = options
            .iter()
            .take(MAX_LISTED_OPTIONS)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        if options.len() > MAX_LISTED_OPTIONS {
            listed.push_str(", ...");
        }
        messages.push(format!("Valid options: {listed}"));

        Self::new(SerializerErrorKind::EnumMismatch, serializer, messages, location)
    }

    /// Appends another message line.
    #[must_use = "function returns the modified error"]
    pub fn with_message<M: Into<String>>(mut self, message: M) -> Self {
        self.messages.push(message.into());
        self
    }

    pub fn kind(&self) -> SerializerErrorKind {
        self.kind
    }

    pub fn serializer(&self) -> &str {
        &self.serializer
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Diagnostic for SerializerError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Error)
    }
}


/// The standard "Found value" message line.
pub fn for_value<V: Display>(value: V) -> String {
    format!("Found value: {value}")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_error_lists_messages_and_location() {
        let error = SerializerError::out_of_range(
            "Reload",
            1,
            0,
            64,
            "Located at file ak47.toml in AK47.Reload.Magazine_Size".to_string(),
        )
        .with_message("Magazines cannot be empty.");

        let rendered = error.to_string();
        assert!(rendered.starts_with("Reload found an error in your configuration:"));
        assert!(rendered.contains("between 1 and 64"));
        assert!(rendered.contains("Found value: 0"));
        assert!(rendered.contains("Magazines cannot be empty."));
        assert!(rendered.ends_with("in AK47.Reload.Magazine_Size"));
        assert_eq!(error.kind(), SerializerErrorKind::OutOfRange);
    }

    #[test]
    fn wildcard_hint_only_when_wildcards_are_disallowed() {
        let options = ["SPEED", "SLOWNESS"];

        let single = SerializerError::enum_mismatch("Potion", "PotionEffectType", "$S", false, &options, String::new());
        assert!(single.messages().iter().any(|message| message.contains("Wildcards")));

        let list = SerializerError::enum_mismatch("Potion", "PotionEffectType", "$S", true, &options, String::new());
        assert!(!list.messages().iter().any(|message| message.contains("Wildcards")));
        assert_eq!(list.messages().last().unwrap(), "Valid options: SPEED, SLOWNESS");
    }

    #[test]
    fn diagnostic_code_follows_kind() {
        let error = SerializerError::negative("Sound", -1, String::new());
        assert_eq!(
            error.code().map(|code| code.to_string()).as_deref(),
            Some("weapon_mechanics::negative_value")
        );
    }
}
