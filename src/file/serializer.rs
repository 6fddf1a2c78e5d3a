use std::fmt::{self, Debug, Formatter};

use super::data::SerializeData;
use super::enums::short_type_name;
use super::error::SerializerError;


/// Turns the configuration at one [`SerializeData`] location into a validated value.
///
/// Implementations read their keys through [`SerializeData::of`] and
/// [`SerializeData::of_list`] and propagate the first [`SerializerError`] with `?`.
pub trait Serializer {
    type Output;

    /// The name shown to configuration authors and used as the registry key.
    ///
    /// Defaults to the type's name with a trailing `Serializer` stripped,
    /// so `ReloadSerializer` is called `Reload`.
    fn name(&self) -> String {
        let type_name = short_type_name(std::any::type_name_of_val(self));

        match type_name.rfind("Serializer") {
            Some(index) if index > 0 => type_name[..index].to_string(),
            _ => type_name.to_string(),
        }
    }

    fn serialize(&self, data: &SerializeData<'_>) -> Result<Self::Output, SerializerError>;
}


/// Creates a fresh serializer.
pub type SerializerFactory<T> = fn() -> Box<dyn Serializer<Output = T>>;

fn default_factory<S, T>() -> Box<dyn Serializer<Output = T>>
where
    S: Serializer<Output = T> + Default + 'static,
{
    Box::new(S::default())
}


/// A table of serializers sharing an output type, looked up by name
/// (case-insensitive). Lookups create a fresh serializer every time.
pub struct SerializerRegistry<T> {
    entries: Vec<(String, SerializerFactory<T>)>,
}

impl<T> SerializerRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers `factory` under `name`, replacing any serializer with the same name.
    pub fn register<N: Into<String>>(&mut self, name: N, factory: SerializerFactory<T>) {
        let name = name.into();

        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => *entry = (name, factory),
            None => self.entries.push((name, factory)),
        }
    }

    /// Registers `S` under its [`Serializer::name`].
    pub fn register_default<S>(&mut self)
    where
        S: Serializer<Output = T> + Default + 'static,
    {
        self.register(S::default().name(), default_factory::<S, T>);
    }

    /// Builder-style [`register_default`](Self::register_default).
    #[must_use = "function returns the modified registry"]
    pub fn with<S>(mut self) -> Self
    where
        S: Serializer<Output = T> + Default + 'static,
    {
        self.register_default::<S>();
        self
    }

    pub fn get(&self, name: &str) -> Option<Box<dyn Serializer<Output = T>>> {
        let name = name.trim();

        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, factory)| factory())
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for SerializerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for SerializerRegistry<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerRegistry")
            .field("names", &self.names())
            .finish()
    }
}
