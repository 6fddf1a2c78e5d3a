use std::fmt::{self, Debug, Formatter};
use std::path::Path;

use super::accessor::{ConfigAccessor, Unchecked};
use super::document::ConfigurationDocument;
use super::error::{SerializerError, SerializerErrorKind};
use super::list_accessor::ConfigListAccessor;
use super::location::found_at;
use super::path::ConfigPath;
use super::serializer::Serializer;


/// A location inside a configuration document, plus the name of the serializer
/// currently reading it.
///
/// This is the entry point for every validation: to read a positive integer a
/// serializer writes `data.of("Magazine_Size").assert_exists()?.assert_positive()?.get_int()?`.
/// Contexts are cheap to derive ([`SerializeData::move_to`]) and never change once created.
#[derive(Clone)]
pub struct SerializeData<'a> {
    serializer: String,
    document: &'a dyn ConfigurationDocument,
    path: ConfigPath,
}

impl<'a> SerializeData<'a> {
    pub fn new<S, P>(serializer: S, document: &'a dyn ConfigurationDocument, path: P) -> Self
    where
        S: Into<String>,
        P: Into<ConfigPath>,
    {
        Self {
            serializer: serializer.into(),
            document,
            path: path.into(),
        }
    }

    /// Creates a context attributed to `serializer`.
    pub fn for_serializer<S, P>(serializer: &S, document: &'a dyn ConfigurationDocument, path: P) -> Self
    where
        S: Serializer + ?Sized,
        P: Into<ConfigPath>,
    {
        Self::new(serializer.name(), document, path)
    }

    pub fn serializer_name(&self) -> &str {
        &self.serializer
    }

    pub fn document(&self) -> &'a dyn ConfigurationDocument {
        self.document
    }

    pub fn source(&self) -> &'a Path {
        self.document.source()
    }

    pub fn path(&self) -> &ConfigPath {
        &self.path
    }

    /// The absolute path of `relative`.
    pub fn path_of<P: Into<ConfigPath>>(&self, relative: P) -> ConfigPath {
        self.path.join(&relative.into())
    }

    /// Moves into a nested location. `relative` should point at a section.
    #[must_use = "function returns the new context"]
    pub fn move_to<P: Into<ConfigPath>>(&self, relative: P) -> SerializeData<'a> {
        SerializeData {
            serializer: self.serializer.clone(),
            document: self.document,
            path: self.path_of(relative),
        }
    }

    /// A context for `serializer` at `path` (absolute), sharing this document.
    pub(crate) fn child_for<S>(&self, serializer: &S, path: ConfigPath) -> SerializeData<'a>
    where
        S: Serializer + ?Sized,
    {
        SerializeData::for_serializer(serializer, self.document, path)
    }

    /// Validates the value at `relative`.
    pub fn of<P: Into<ConfigPath>>(&self, relative: P) -> ConfigAccessor<'a, Unchecked> {
        ConfigAccessor::new(self.clone(), relative.into())
    }

    /// Validates the list-of-tuples value at `relative`.
    pub fn of_list<P: Into<ConfigPath>>(&self, relative: P) -> ConfigListAccessor<'a> {
        ConfigListAccessor::new(self.clone(), relative.into())
    }

    /// Validates the value this context itself points at.
    ///
    /// # Panics
    /// Panics if this context points at the document root.
    pub fn of_self(&self) -> ConfigAccessor<'a, Unchecked> {
        let (parent, last) = self.split_self();
        parent.of(last)
    }

    /// Validates the list this context itself points at.
    ///
    /// # Panics
    /// Panics if this context points at the document root.
    pub fn of_list_self(&self) -> ConfigListAccessor<'a> {
        let (parent, last) = self.split_self();
        parent.of_list(last)
    }

    fn split_self(&self) -> (SerializeData<'a>, ConfigPath) {
        let Some((parent_path, last)) = self.path.split_last() else {
            panic!("The document root has no parent section to validate it from.");
        };

        let parent = SerializeData {
            serializer: self.serializer.clone(),
            document: self.document,
            path: parent_path,
        };

        (parent, ConfigPath::segment(last))
    }

    /// Returns `true` if there is a value at `relative` (defaults included).
    /// Prefer [`ConfigAccessor::assert_exists`] for required keys.
    pub fn has<P: Into<ConfigPath>>(&self, relative: P) -> bool {
        self.document.contains(&self.path_of(relative), false)
    }

    /// The "found at" string for this context.
    pub fn location(&self) -> String {
        found_at(self.source(), &self.path, None)
    }

    /// The "found at" string for `relative`.
    pub fn location_of<P: Into<ConfigPath>>(&self, relative: P) -> String {
        found_at(self.source(), &self.path_of(relative), None)
    }

    /// The "found at" string for the element at `index` (0-based) of the list at `relative`.
    pub fn list_location_of<P: Into<ConfigPath>>(&self, relative: P, index: usize) -> String {
        found_at(self.source(), &self.path_of(relative), Some(index + 1))
    }

    /// Builds a general error for a mistake none of the accessors check for.
    /// An empty `relative` path points at this context.
    ///
    /// # Panics
    /// Panics if `messages` is empty.
    pub fn exception<P, I, M>(&self, relative: P, messages: I) -> SerializerError
    where
        P: Into<ConfigPath>,
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let messages = collect_messages(messages);
        SerializerError::new(
            SerializerErrorKind::General,
            self.serializer.as_str(),
            messages,
            self.location_of(relative),
        )
    }

    /// Builds a general error for the element at `index` (0-based) of the list at `relative`.
    ///
    /// # Panics
    /// Panics if `messages` is empty.
    pub fn list_exception<P, I, M>(&self, relative: P, index: usize, messages: I) -> SerializerError
    where
        P: Into<ConfigPath>,
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let messages = collect_messages(messages);
        SerializerError::new(
            SerializerErrorKind::General,
            self.serializer.as_str(),
            messages,
            self.list_location_of(relative, index),
        )
    }
}

fn collect_messages<I, M>(messages: I) -> Vec<String>
where
    I: IntoIterator<Item = M>,
    M: Into<String>,
{
    let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
    if messages.is_empty() {
        panic!("Configuration errors need at least one message explaining the mistake.");
    }

    messages
}

impl Debug for SerializeData<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializeData")
            .field("serializer", &self.serializer)
            .field("source", &self.document.source())
            .field("path", &self.path)
            .finish()
    }
}
