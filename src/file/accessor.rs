use std::fmt::{self, Display, Formatter};
use std::marker::PhantomData;

use tracing::trace;

use super::data::SerializeData;
use super::document::{value_to_string, Value, ValueKind};
use super::enums::{parse_enums, ConfigEnum};
use super::error::SerializerError;
use super::path::ConfigPath;
use super::serializer::Serializer;
use super::text::color_adventure;


/// Accessor state before [`ConfigAccessor::assert_exists`]: only getters with a default are available.
#[derive(Clone, Copy, Debug)]
pub struct Unchecked;

/// Accessor state after [`ConfigAccessor::assert_exists`]: getters without a default are available.
#[derive(Clone, Copy, Debug)]
pub struct Checked;


/// A configured number, as written by the configuration author.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Number {
    Integer(i64),
    Double(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(integer) => integer as f64,
            Number::Double(double) => double,
        }
    }

    /// Drops the fractional part, rounding toward zero.
    pub fn truncate(self) -> i64 {
        match self {
            Number::Integer(integer) => integer,
            Number::Double(double) => double.trunc() as i64,
        }
    }

    pub fn is_negative(self) -> bool {
        match self {
            Number::Integer(integer) => integer < 0,
            Number::Double(double) => double < 0.0,
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(integer) => write!(f, "{integer}"),
            Number::Double(double) => write!(f, "{double}"),
        }
    }
}


/// Validates and reads the value at one configuration path.
///
/// Every assertion consumes the accessor and hands it back on success, so checks
/// chain with `?`. Assertions on a missing value succeed; use
/// [`assert_exists`](ConfigAccessor::assert_exists) for required keys.
pub struct ConfigAccessor<'a, S = Unchecked> {
    data: SerializeData<'a>,
    relative: ConfigPath,
    path: ConfigPath,
    state: PhantomData<S>,
}

impl<'a> ConfigAccessor<'a, Unchecked> {
    pub(crate) fn new(data: SerializeData<'a>, relative: ConfigPath) -> Self {
        let path = data.path_of(&relative);

        Self {
            data,
            relative,
            path,
            state: PhantomData,
        }
    }

    /// Fails unless the configuration author explicitly defined this key
    /// (values that only come from defaults do not count).
    pub fn assert_exists(self) -> Result<ConfigAccessor<'a, Checked>, SerializerError> {
        if !self.data.document().contains(&self.path, true) {
            return Err(SerializerError::missing_key(
                self.data.serializer_name(),
                &self.relative.to_string(),
                self.location(),
            ));
        }

        Ok(ConfigAccessor {
            data: self.data,
            relative: self.relative,
            path: self.path,
            state: PhantomData,
        })
    }

    /// Asserts existence only when `exists` is set. Useful for keys that
    /// are required only when some other key is present.
    pub fn assert_exists_if(self, exists: bool) -> Result<Self, SerializerError> {
        if exists && !self.data.document().contains(&self.path, true) {
            return Err(SerializerError::missing_key(
                self.data.serializer_name(),
                &self.relative.to_string(),
                self.location(),
            ));
        }

        Ok(self)
    }
}

impl<'a, S> ConfigAccessor<'a, S> {
    /// The absolute path this accessor reads.
    pub fn path(&self) -> &ConfigPath {
        &self.path
    }

    pub fn location(&self) -> String {
        self.data.location_of(&self.relative)
    }

    fn value(&self) -> Option<&'a Value> {
        self.data.document().get(&self.path)
    }

    fn serializer_name(&self) -> &str {
        self.data.serializer_name()
    }

    fn type_error(&self, expected: ValueKind, value: &Value) -> SerializerError {
        SerializerError::type_mismatch(
            self.serializer_name(),
            expected,
            Some(ValueKind::of(value)),
            value_to_string(value),
            self.location(),
        )
    }

    /// Returns `true` if the value is present and of the given kind.
    pub fn is(&self, kind: ValueKind) -> bool {
        self.value()
            .is_some_and(|value| kind.accepts(ValueKind::of(value)))
    }

    /// Fails if the value is present but not of the given kind.
    pub fn assert_type(self, kind: ValueKind) -> Result<Self, SerializerError> {
        if let Some(value) = self.value() {
            if !kind.accepts(ValueKind::of(value)) {
                return Err(self.type_error(kind, value));
            }
        }

        Ok(self)
    }

    fn number(&self) -> Result<Option<Number>, SerializerError> {
        match self.value() {
            None => Ok(None),
            Some(Value::Integer(integer)) => Ok(Some(Number::Integer(*integer))),
            Some(Value::Float(double)) if double.is_nan() => Err(SerializerError::type_mismatch(
                self.serializer_name(),
                ValueKind::Number,
                None,
                double,
                self.location(),
            )),
            Some(Value::Float(double)) => Ok(Some(Number::Double(*double))),
            Some(other) => Err(self.type_error(ValueKind::Number, other)),
        }
    }

    /// Returns the number, or `default` if the value is missing.
    pub fn get_number_or(&self, default: Number) -> Result<Number, SerializerError> {
        Ok(self.number()?.unwrap_or(default))
    }

    fn integer_from(&self, number: Number) -> Result<i64, SerializerError> {
        match number {
            Number::Integer(integer) => Ok(integer),
            Number::Double(double) if double.is_finite() && double.fract() == 0.0 => Ok(double as i64),
            Number::Double(double) => Err(SerializerError::type_mismatch(
                self.serializer_name(),
                ValueKind::Integer,
                Some(ValueKind::Double),
                double,
                self.location(),
            )),
        }
    }

    /// Returns the integer, or `default` if the value is missing.
    /// `1.0` is read as `1`, but `1.1` is rejected.
    pub fn get_int_or(&self, default: i64) -> Result<i64, SerializerError> {
        match self.number()? {
            Some(number) => self.integer_from(number),
            None => Ok(default),
        }
    }

    pub fn get_double_or(&self, default: f64) -> Result<f64, SerializerError> {
        Ok(self.number()?.map_or(default, Number::as_f64))
    }

    fn boolean(&self) -> Result<Option<bool>, SerializerError> {
        let Some(value) = self.value() else {
            return Ok(None);
        };

        match value {
            Value::Boolean(boolean) => Ok(Some(*boolean)),
            Value::String(string) if string.trim().eq_ignore_ascii_case("true") => Ok(Some(true)),
            Value::String(string) if string.trim().eq_ignore_ascii_case("false") => Ok(Some(false)),
            other => Err(self.type_error(ValueKind::Boolean, other)),
        }
    }

    /// Returns the boolean, or `default` if the value is missing.
    /// The strings `"true"` and `"false"` are accepted in any case.
    pub fn get_bool_or(&self, default: bool) -> Result<bool, SerializerError> {
        Ok(self.boolean()?.unwrap_or(default))
    }

    /// Fails if the value is a negative number.
    pub fn assert_positive(self) -> Result<Self, SerializerError> {
        if let Some(number) = self.number()? {
            if number.is_negative() {
                return Err(SerializerError::negative(
                    self.serializer_name(),
                    number,
                    self.location(),
                ));
            }
        }

        Ok(self)
    }

    /// Fails if the value, with its fractional part dropped, is outside `min..=max`.
    ///
    /// # Panics
    /// Panics if `min > max`.
    pub fn assert_range(self, min: i64, max: i64) -> Result<Self, SerializerError> {
        if min > max {
            panic!("Invalid range assertion: min ({min}) > max ({max})");
        }

        if let Some(number) = self.number()? {
            if let Number::Double(double) = number {
                if !double.is_finite() {
                    return Err(SerializerError::out_of_range(
                        self.serializer_name(),
                        min as f64,
                        double,
                        max as f64,
                        self.location(),
                    ));
                }
            }

            let truncated = number.truncate();
            if truncated < min || truncated > max {
                return Err(SerializerError::out_of_range(
                    self.serializer_name(),
                    min,
                    truncated,
                    max,
                    self.location(),
                ));
            }
        }

        Ok(self)
    }

    /// Fails if the value is outside `min..=max`.
    ///
    /// # Panics
    /// Panics if `min > max`.
    pub fn assert_range_f64(self, min: f64, max: f64) -> Result<Self, SerializerError> {
        if min > max {
            panic!("Invalid range assertion: min ({min}) > max ({max})");
        }

        if let Some(number) = self.number()? {
            let value = number.as_f64();
            if !(min..=max).contains(&value) {
                return Err(SerializerError::out_of_range(
                    self.serializer_name(),
                    min,
                    value,
                    max,
                    self.location(),
                ));
            }
        }

        Ok(self)
    }

    fn enum_value<E: ConfigEnum>(&self) -> Result<Option<E>, SerializerError> {
        let input = self.value().map(value_to_string).unwrap_or_default();
        let input = input.trim();

        if input.is_empty() {
            return Ok(None);
        }

        // Wildcards would match several constants, so they only make sense in lists.
        let matches = if input.starts_with('$') {
            Vec::new()
        } else {
            parse_enums::<E>(input)
        };

        match matches.first() {
            Some(constant) => Ok(Some(*constant)),
            None => Err(SerializerError::enum_mismatch(
                self.serializer_name(),
                E::enum_name(),
                input,
                false,
                &E::config_names(),
                self.location(),
            )),
        }
    }

    /// Returns the enum constant, or `None` if the value is missing or empty.
    pub fn get_enum_optional<E: ConfigEnum>(&self) -> Result<Option<E>, SerializerError> {
        self.enum_value()
    }

    /// Returns the enum constant, or `default` if the value is missing or empty.
    pub fn get_enum_or<E: ConfigEnum>(&self, default: E) -> Result<E, SerializerError> {
        Ok(self.enum_value()?.unwrap_or(default))
    }

    /// Returns the raw value, or `default` if it is missing.
    pub fn get_or(&self, default: &'a Value) -> &'a Value {
        self.value().unwrap_or(default)
    }

    fn string(&self) -> Result<Option<String>, SerializerError> {
        match self.value() {
            None => Ok(None),
            Some(value @ (Value::Array(_) | Value::Table(_))) => {
                Err(self.type_error(ValueKind::String, value))
            }
            Some(value) => Ok(Some(value_to_string(value))),
        }
    }

    /// Returns the value as a string (numbers and booleans are formatted),
    /// or `default` if it is missing.
    pub fn get_string_or(&self, default: &str) -> Result<String, SerializerError> {
        Ok(self.string()?.unwrap_or_else(|| default.to_string()))
    }

    /// Returns the text with legacy `&` colour codes converted to tags,
    /// or `default` (unconverted) if it is missing.
    pub fn get_adventure_or(&self, default: &str) -> Result<String, SerializerError> {
        Ok(self
            .string()?
            .map(|text| color_adventure(&text))
            .unwrap_or_else(|| default.to_string()))
    }

    /// Serializes the nested object at this path with a fresh `T`.
    /// Returns `Ok(None)` if nothing is configured here.
    pub fn serialize<T>(&self) -> Result<Option<T::Output>, SerializerError>
    where
        T: Serializer + Default,
    {
        self.serialize_with(&T::default())
    }

    /// Serializes the nested object at this path with `serializer`.
    /// Returns `Ok(None)` if nothing is configured here. Defaults alone do not
    /// create nested objects, they only fill in keys of ones the author wrote.
    pub fn serialize_with<T>(&self, serializer: &T) -> Result<Option<T::Output>, SerializerError>
    where
        T: Serializer + ?Sized,
    {
        if !self.data.document().contains(&self.path, true) {
            return Ok(None);
        }

        let nested = self.data.child_for(serializer, self.path.clone());
        trace!(
            serializer = nested.serializer_name(),
            path = %nested.path(),
            "Serializing nested configuration."
        );

        serializer.serialize(&nested).map(Some)
    }

    /// Same as [`serialize_with`](Self::serialize_with), for serializers only known
    /// as trait objects (for example ones looked up in a registry).
    pub fn serialize_dyn<T>(
        &self,
        serializer: &dyn Serializer<Output = T>,
    ) -> Result<Option<T>, SerializerError> {
        self.serialize_with(serializer)
    }
}

impl<'a> ConfigAccessor<'a, Checked> {
    fn required_value(&self) -> Result<&'a Value, SerializerError> {
        self.value().ok_or_else(|| {
            SerializerError::missing_key(
                self.serializer_name(),
                &self.relative.to_string(),
                self.location(),
            )
        })
    }

    /// Returns the raw value.
    pub fn get(&self) -> Result<&'a Value, SerializerError> {
        self.required_value()
    }

    pub fn get_number(&self) -> Result<Number, SerializerError> {
        self.required_value()?;
        self.get_number_or(Number::Integer(0))
    }

    /// Returns the integer. `1.0` is read as `1`, but `1.1` is rejected.
    pub fn get_int(&self) -> Result<i64, SerializerError> {
        let number = self.get_number()?;
        self.integer_from(number)
    }

    pub fn get_double(&self) -> Result<f64, SerializerError> {
        Ok(self.get_number()?.as_f64())
    }

    pub fn get_bool(&self) -> Result<bool, SerializerError> {
        self.required_value()?;
        self.get_bool_or(false)
    }

    /// Returns the enum constant. An empty value is rejected.
    pub fn get_enum<E: ConfigEnum>(&self) -> Result<E, SerializerError> {
        let value = self.required_value()?;

        match self.enum_value()? {
            Some(constant) => Ok(constant),
            None => Err(SerializerError::enum_mismatch(
                self.serializer_name(),
                E::enum_name(),
                &value_to_string(value),
                false,
                &E::config_names(),
                self.location(),
            )),
        }
    }

    pub fn get_string(&self) -> Result<String, SerializerError> {
        self.required_value()?;
        self.get_string_or("")
    }

    /// Returns the text with legacy `&` colour codes converted to tags.
    pub fn get_adventure(&self) -> Result<String, SerializerError> {
        self.required_value()?;
        self.get_adventure_or("")
    }
}
