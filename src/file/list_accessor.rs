use std::fmt::{self, Debug, Display, Formatter};

use super::data::SerializeData;
use super::document::{value_to_string, Value, ValueKind};
use super::enums::{parse_enums, ConfigEnum};
use super::error::{for_value, SerializerError, SerializerErrorKind};
use super::path::ConfigPath;
use super::text::split;


fn matches_any<E: ConfigEnum>(input: &str) -> bool {
    !parse_enums::<E>(input).is_empty()
}

/// An enum accepted by one slot of a list element.
#[derive(Clone, Copy)]
pub struct EnumArgument {
    name: &'static str,
    matches: fn(&str) -> bool,
    options: fn() -> Vec<&'static str>,
}

impl Debug for EnumArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EnumArgument").field(&self.name).finish()
    }
}


/// The type of one slot of a list element.
#[derive(Clone, Copy, Debug)]
pub enum ArgumentType {
    Integer,
    Double,
    Boolean,
    String,
    Enum(EnumArgument),
}

impl ArgumentType {
    /// A slot holding a constant of `E`. Wildcards (`$`) are allowed in lists.
    pub fn enumeration<E: ConfigEnum>() -> Self {
        ArgumentType::Enum(EnumArgument {
            name: E::enum_name(),
            matches: matches_any::<E>,
            options: E::config_names,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ArgumentType::Integer => "Integer",
            ArgumentType::Double => "Double",
            ArgumentType::Boolean => "Boolean",
            ArgumentType::String => "String",
            ArgumentType::Enum(argument) => argument.name,
        }
    }
}

impl Display for ArgumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}


#[derive(Clone, Debug)]
struct ArgumentSpec {
    argument_type: ArgumentType,
    required: bool,
    skip_check: bool,
    positive: bool,
    range: Option<(f64, f64)>,
}


/// Validates a list whose elements are delimited tuples, like
/// `["SPEED~100~2", "JUMP_BOOST~40"]`.
///
/// Declare each slot of the tuple in order with [`add_argument`](Self::add_argument),
/// then run [`assert_list`](Self::assert_list). Required slots must come before
/// optional ones.
pub struct ConfigListAccessor<'a> {
    data: SerializeData<'a>,
    relative: ConfigPath,
    path: ConfigPath,
    arguments: Vec<ArgumentSpec>,
}

impl<'a> ConfigListAccessor<'a> {
    pub(crate) fn new(data: SerializeData<'a>, relative: ConfigPath) -> Self {
        let path = data.path_of(&relative);

        Self {
            data,
            relative,
            path,
            arguments: Vec::new(),
        }
    }

    fn push_argument(mut self, argument_type: ArgumentType, required: bool, skip_check: bool) -> Self {
        // true~true~false can be parsed, true~false~true cannot.
        if required && self.arguments.last().is_some_and(|last| !last.required) {
            panic!(
                "Required list arguments must be consecutive, but a required {} follows an optional argument.",
                argument_type
            );
        }

        self.arguments.push(ArgumentSpec {
            argument_type,
            required,
            skip_check,
            positive: false,
            range: None,
        });
        self
    }

    /// Declares the next slot of the tuple.
    ///
    /// # Panics
    /// Panics if a required slot is declared after an optional one.
    pub fn add_argument(self, argument_type: ArgumentType, required: bool) -> Self {
        self.push_argument(argument_type, required, false)
    }

    /// Declares the next slot of the tuple without validating its contents
    /// (for example sounds, which may come from resource packs).
    ///
    /// # Panics
    /// Panics if a required slot is declared after an optional one.
    pub fn add_unchecked_argument(self, argument_type: ArgumentType, required: bool) -> Self {
        self.push_argument(argument_type, required, true)
    }

    fn last_argument(&mut self) -> &mut ArgumentSpec {
        let Some(last) = self.arguments.last_mut() else {
            panic!("Declare a list argument before adding constraints to it.");
        };

        last
    }

    /// The most recently declared slot must not be negative.
    pub fn assert_argument_positive(mut self) -> Self {
        self.last_argument().positive = true;
        self
    }

    /// The most recently declared slot must be within `min..=max`.
    ///
    /// # Panics
    /// Panics if `min > max`.
    pub fn assert_argument_range(mut self, min: f64, max: f64) -> Self {
        if min > max {
            panic!("Invalid range assertion: min ({min}) > max ({max})");
        }

        self.last_argument().range = Some((min, max));
        self
    }

    /// Fails unless the configuration author explicitly defined this key.
    pub fn assert_exists(self) -> Result<Self, SerializerError> {
        if !self.data.document().contains(&self.path, true) {
            return Err(SerializerError::missing_key(
                self.data.serializer_name(),
                &self.relative.to_string(),
                self.location(),
            ));
        }

        Ok(self)
    }

    /// Asserts existence only when `exists` is set.
    pub fn assert_exists_if(self, exists: bool) -> Result<Self, SerializerError> {
        if exists {
            return self.assert_exists();
        }

        Ok(self)
    }

    pub fn location(&self) -> String {
        self.data.location_of(&self.relative)
    }

    fn element_location(&self, index: usize) -> String {
        self.data.list_location_of(&self.relative, index)
    }

    /// The expected element format shown to configuration authors, e.g. `<Integer*>-<Double>`.
    /// Required slots are marked with `*`.
    pub fn format(&self) -> String {
        self.arguments
            .iter()
            .map(|argument| {
                let marker = if argument.required { "*" } else { "" };
                format!("<{}{}>", argument.argument_type, marker)
            })
            .collect::<Vec<_>>()
            .join("-")
    }

    fn list_format_error<I, M>(&self, index: usize, messages: I) -> SerializerError
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        SerializerError::new(
            SerializerErrorKind::ListFormat,
            self.data.serializer_name(),
            messages,
            self.element_location(index),
        )
    }

    /// Validates every element of the list against the declared slots.
    ///
    /// A missing list passes (use [`assert_exists`](Self::assert_exists) for required
    /// lists), as does an empty one.
    ///
    /// # Panics
    /// Panics if no arguments were declared.
    pub fn assert_list(self) -> Result<ValidatedList<'a>, SerializerError> {
        if self.arguments.is_empty() {
            panic!("Declare the list arguments before validating {}.", self.path);
        }

        let elements = match self.data.document().get(&self.path) {
            None => &[][..],
            Some(Value::Array(elements)) => elements.as_slice(),
            Some(other) => {
                return Err(SerializerError::type_mismatch(
                    self.data.serializer_name(),
                    ValueKind::List,
                    Some(ValueKind::of(other)),
                    value_to_string(other),
                    self.location(),
                ));
            }
        };

        let format = self.format();
        let required = self
            .arguments
            .iter()
            .filter(|argument| argument.required)
            .count();

        for (index, element) in elements.iter().enumerate() {
            let element = value_to_string(element);

            // A blank element is probably a mistake, so it is not silently skipped.
            if element.trim().is_empty() {
                return Err(self.list_format_error(
                    index,
                    [
                        format!("{} does not allow empty elements in the list.", self.relative),
                        format!("Valid Format: {format}"),
                    ],
                ));
            }

            let parts = split(&element);

            if parts.len() < required {
                return Err(self.list_format_error(
                    index,
                    [
                        format!(
                            "{} requires the first {} arguments to be defined.",
                            self.relative, required
                        ),
                        for_value(&element),
                        format!("You are missing {} arguments.", required - parts.len()),
                        format!("Valid Format: {format}"),
                    ],
                ));
            }

            if parts.len() > self.arguments.len() {
                return Err(self.list_format_error(
                    index,
                    [
                        format!(
                            "Invalid list format, {} can only use {} arguments.",
                            self.relative,
                            self.arguments.len()
                        ),
                        for_value(&element),
                        format!("Valid Format: {format}"),
                    ],
                ));
            }

            for (part, argument) in parts.iter().zip(&self.arguments) {
                if argument.skip_check {
                    continue;
                }

                self.check_part(part, argument, index).map_err(|error| {
                    error
                        .with_message(format!("Full List Element: {element}"))
                        .with_message(format!("Valid List Format: {format}"))
                })?;
            }
        }

        Ok(ValidatedList {
            data: self.data,
            path: self.path,
        })
    }

    fn check_part(&self, part: &str, argument: &ArgumentSpec, index: usize) -> Result<(), SerializerError> {
        let serializer = self.data.serializer_name();
        let parse_error = || {
            SerializerError::type_mismatch(
                serializer,
                argument.argument_type,
                None,
                part,
                self.element_location(index),
            )
        };

        match argument.argument_type {
            ArgumentType::Integer => {
                let value = part.parse::<i64>().map_err(|_| parse_error())?;

                if let Some((min, max)) = argument.range {
                    let (min, max) = (min as i64, max as i64);
                    if value < min || value > max {
                        return Err(SerializerError::out_of_range(
                            serializer,
                            min,
                            value,
                            max,
                            self.element_location(index),
                        ));
                    }
                }

                if argument.positive && value < 0 {
                    return Err(SerializerError::negative(
                        serializer,
                        value,
                        self.element_location(index),
                    ));
                }
            }
            ArgumentType::Double => {
                let value = part
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(parse_error)?;

                if let Some((min, max)) = argument.range {
                    if !(min..=max).contains(&value) {
                        return Err(SerializerError::out_of_range(
                            serializer,
                            min,
                            value,
                            max,
                            self.element_location(index),
                        ));
                    }
                }

                if argument.positive && value < 0.0 {
                    return Err(SerializerError::negative(
                        serializer,
                        value,
                        self.element_location(index),
                    ));
                }
            }
            ArgumentType::Boolean => {
                if !part.eq_ignore_ascii_case("true") && !part.eq_ignore_ascii_case("false") {
                    return Err(parse_error());
                }
            }
            ArgumentType::String => {}
            ArgumentType::Enum(enum_argument) => {
                if !(enum_argument.matches)(part) {
                    return Err(SerializerError::enum_mismatch(
                        serializer,
                        enum_argument.name,
                        part,
                        true,
                        &(enum_argument.options)(),
                        self.element_location(index),
                    ));
                }
            }
        }

        Ok(())
    }
}


/// A list that passed [`ConfigListAccessor::assert_list`].
pub struct ValidatedList<'a> {
    data: SerializeData<'a>,
    path: ConfigPath,
}

impl ValidatedList<'_> {
    /// Returns the parts of every element, uncoerced. Missing lists are empty.
    pub fn get(&self) -> Vec<Vec<String>> {
        match self.data.document().get(&self.path) {
            Some(Value::Array(elements)) => elements
                .iter()
                .map(|element| split(&value_to_string(element)))
                .collect(),
            _ => Vec::new(),
        }
    }
}


#[cfg(test)]
mod tests {
    use strum::{EnumIter, IntoStaticStr};

    use super::*;
    use crate::file::document::TomlDocument;

    #[derive(EnumIter, IntoStaticStr, Clone, Copy, PartialEq, Eq, Debug)]
    #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
    enum Effect {
        Speed,
        JumpBoost,
        Slowness,
    }

    fn document(contents: &str) -> TomlDocument {
        TomlDocument::parse("list.toml", contents).unwrap()
    }

    fn two_integers<'a>(data: &SerializeData<'a>, key: &str) -> ConfigListAccessor<'a> {
        data.of_list(key)
            .add_argument(ArgumentType::Integer, true)
            .add_argument(ArgumentType::Integer, true)
    }

    #[test]
    fn empty_and_missing_lists_pass() {
        let document = document("empty = []");
        let data = SerializeData::new("Test", &document, "");

        assert!(two_integers(&data, "empty").assert_list().unwrap().get().is_empty());
        assert!(two_integers(&data, "missing").assert_list().unwrap().get().is_empty());
        assert!(two_integers(&data, "missing").assert_exists().is_err());
    }

    #[test]
    fn non_lists_are_type_errors() {
        let document = document("value = 5");
        let data = SerializeData::new("Test", &document, "");

        let error = two_integers(&data, "value").assert_list().err().unwrap();
        assert_eq!(error.kind(), SerializerErrorKind::TypeMismatch);
        assert!(error.messages()[0].contains("Expected List"));
    }

    #[test]
    fn unparsable_parts_report_element_and_format() {
        let document = document("pairs = [\"1~2\", \"5~notanumber\"]");
        let data = SerializeData::new("Test", &document, "");

        let error = two_integers(&data, "pairs").assert_list().err().unwrap();
        assert_eq!(error.kind(), SerializerErrorKind::TypeMismatch);
        assert!(error.messages().contains(&"Full List Element: 5~notanumber".to_string()));
        assert!(error.messages().contains(&"Valid List Format: <Integer*>-<Integer*>".to_string()));
        assert!(error.location().ends_with("pairs (2nd list element)"));
    }

    #[test]
    fn blank_elements_are_rejected() {
        let document = document("pairs = [\"1~2\", \"   \"]");
        let data = SerializeData::new("Test", &document, "");

        let error = two_integers(&data, "pairs").assert_list().err().unwrap();
        assert_eq!(error.kind(), SerializerErrorKind::ListFormat);
        assert!(error.messages()[0].contains("does not allow empty elements"));
    }

    #[test]
    fn missing_and_extra_parts() {
        let document = document("few = [\"1\"]\nmany = [\"1~2~3\"]");
        let data = SerializeData::new("Test", &document, "");

        let few = two_integers(&data, "few").assert_list().err().unwrap();
        assert_eq!(few.kind(), SerializerErrorKind::ListFormat);
        assert!(few.messages().contains(&"You are missing 1 arguments.".to_string()));

        let many = two_integers(&data, "many").assert_list().err().unwrap();
        assert_eq!(many.kind(), SerializerErrorKind::ListFormat);
        assert!(many.messages()[0].contains("can only use 2 arguments"));
    }

    #[test]
    fn numeric_constraints_apply_per_slot() {
        let document = document("effects = [\"SPEED~100~2\", \"jump_boost~-4\"]\nranged = [\"SPEED~100~9\"]");
        let data = SerializeData::new("Potion", &document, "");

        let accessor = |key: &str| {
            data.of_list(key)
                .add_argument(ArgumentType::enumeration::<Effect>(), true)
                .add_argument(ArgumentType::Integer, true)
                .assert_argument_positive()
                .add_argument(ArgumentType::Integer, false)
                .assert_argument_range(0.0, 5.0)
        };

        let negative = accessor("effects").assert_list().err().unwrap();
        assert_eq!(negative.kind(), SerializerErrorKind::NegativeValue);
        assert!(negative.location().ends_with("(2nd list element)"));

        let ranged = accessor("ranged").assert_list().err().unwrap();
        assert_eq!(ranged.kind(), SerializerErrorKind::OutOfRange);
        assert!(ranged.messages()[0].contains("between 0 and 5"));
    }

    #[test]
    fn enums_and_booleans_are_checked() {
        let document = document("a = [\"LEVITATION~true\"]\nb = [\"$SPEED~maybe\"]");
        let data = SerializeData::new("Potion", &document, "");

        let accessor = |key: &str| {
            data.of_list(key)
                .add_argument(ArgumentType::enumeration::<Effect>(), true)
                .add_argument(ArgumentType::Boolean, false)
        };

        let unknown = accessor("a").assert_list().err().unwrap();
        assert_eq!(unknown.kind(), SerializerErrorKind::EnumMismatch);
        assert!(unknown.messages()[0].contains("Effect"));

        let boolean = accessor("b").assert_list().err().unwrap();
        assert_eq!(boolean.kind(), SerializerErrorKind::TypeMismatch);
        assert!(boolean.messages()[0].contains("Expected Boolean"));
    }

    #[test]
    fn doubles_must_be_finite() {
        let document = document(
            "nan = [\"gun.shot~NaN~NaN\"]\ninfinite = [\"gun.shot~1~inf\"]\nspaced = [\"gun.shot - 1 - 1\"]",
        );
        let data = SerializeData::new("Sound", &document, "");

        let accessor = |key: &str| {
            data.of_list(key)
                .add_unchecked_argument(ArgumentType::String, true)
                .add_argument(ArgumentType::Double, false)
                .assert_argument_positive()
                .add_argument(ArgumentType::Double, false)
                .assert_argument_range(0.5, 2.0)
        };

        for key in ["nan", "infinite"] {
            let error = accessor(key).assert_list().err().unwrap();
            assert_eq!(error.kind(), SerializerErrorKind::TypeMismatch, "{key}");
            assert!(error.messages()[0].contains("Expected Double"));
        }

        let spaced = accessor("spaced").assert_list().unwrap();
        assert_eq!(spaced.get(), [["gun.shot", "1", "1"]]);
    }

    #[test]
    fn unchecked_slots_are_not_parsed() {
        let document = document("sounds = [\"custom.gun.shot~0.5\"]");
        let data = SerializeData::new("Sound", &document, "");

        let list = data
            .of_list("sounds")
            .add_unchecked_argument(ArgumentType::Integer, true)
            .add_argument(ArgumentType::Double, false)
            .assert_list()
            .unwrap();

        assert_eq!(list.get(), [["custom.gun.shot", "0.5"]]);
    }

    #[test]
    fn format_marks_required_slots() {
        let document = document("");
        let data = SerializeData::new("Potion", &document, "");

        let accessor = data
            .of_list("effects")
            .add_argument(ArgumentType::enumeration::<Effect>(), true)
            .add_argument(ArgumentType::Integer, true)
            .add_argument(ArgumentType::Boolean, false);

        assert_eq!(accessor.format(), "<Effect*>-<Integer*>-<Boolean>");
    }

    #[test]
    #[should_panic(expected = "must be consecutive")]
    fn required_after_optional_panics_on_declaration() {
        let document = document("");
        let data = SerializeData::new("Test", &document, "");

        let _ = data
            .of_list("list")
            .add_argument(ArgumentType::Integer, true)
            .add_argument(ArgumentType::Integer, false)
            .add_argument(ArgumentType::Integer, true);
    }

    #[test]
    #[should_panic(expected = "Declare the list arguments")]
    fn validating_without_arguments_panics() {
        let document = document("list = []");
        let data = SerializeData::new("Test", &document, "");
        let _ = data.of_list("list").assert_list();
    }

    #[test]
    fn of_list_self_rebinds() {
        let document = document("[Mechanics]\nSound = [\"gun.shot\"]");
        let data = SerializeData::new("Sound", &document, "Mechanics.Sound");

        let list = data
            .of_list_self()
            .add_unchecked_argument(ArgumentType::String, true)
            .assert_list()
            .unwrap();
        assert_eq!(list.get(), [["gun.shot"]]);
    }
}
