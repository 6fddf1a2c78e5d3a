use std::fmt::{self, Display, Formatter};


/// A path into a configuration document, stored as an ordered list of key segments.
///
/// Developer-written literals such as `"Reload.Magazine_Size"` are split on `.` once
/// (see the `From<&str>` implementation). Keys that come *from* a document must be
/// wrapped with [`ConfigPath::segment`] instead, since a quoted TOML key may itself
/// contain dots.
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct ConfigPath {
    segments: Vec<String>,
}

impl ConfigPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// A single-segment path, taken verbatim.
    pub fn segment<S: Into<String>>(key: S) -> Self {
        Self {
            segments: vec![key.into()],
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns a new path with `relative` appended. Neither path is modified.
    #[must_use = "function returns the joined path"]
    pub fn join(&self, relative: &ConfigPath) -> ConfigPath {
        let mut segments = Vec::with_capacity(self.segments.len() + relative.segments.len());
        segments.extend(self.segments.iter().cloned());
        segments.extend(relative.segments.iter().cloned());

        ConfigPath { segments }
    }

    /// Splits this path into its parent and its last segment.
    /// Returns `None` for the root path.
    pub fn split_last(&self) -> Option<(ConfigPath, &str)> {
        let (last, parent) = self.segments.split_last()?;

        Some((
            ConfigPath {
                segments: parent.to_vec(),
            },
            last.as_str(),
        ))
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl From<&str> for ConfigPath {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            return ConfigPath::root();
        }

        ConfigPath::from_segments(value.split('.'))
    }
}

impl From<&ConfigPath> for ConfigPath {
    fn from(value: &ConfigPath) -> Self {
        value.clone()
    }
}

impl Display for ConfigPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_paths_are_split_once() {
        let path = ConfigPath::from("Reload.Start_Mechanics.Sound");
        assert_eq!(path.segments(), ["Reload", "Start_Mechanics", "Sound"]);
        assert_eq!(path.to_string(), "Reload.Start_Mechanics.Sound");
    }

    #[test]
    fn document_keys_keep_their_dots() {
        let path = ConfigPath::from("Weapons").join(&ConfigPath::segment("minecraft.ak47"));
        assert_eq!(path.segments().len(), 2);
        assert_eq!(path.last(), Some("minecraft.ak47"));
    }

    #[test]
    fn split_last_returns_parent() {
        let path = ConfigPath::from("a.b.c");
        let (parent, last) = path.split_last().unwrap();
        assert_eq!(parent, ConfigPath::from("a.b"));
        assert_eq!(last, "c");

        assert!(ConfigPath::root().split_last().is_none());
        assert!(ConfigPath::from("").is_root());
    }
}
