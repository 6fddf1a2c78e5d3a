//! The configuration validation framework.
//!
//! Serializers ([`Serializer`]) read user-authored documents ([`ConfigurationDocument`])
//! through a [`SerializeData`] context. Every value is validated by an accessor
//! ([`ConfigAccessor`] for single values, [`ConfigListAccessor`] for lists of
//! delimited tuples) and every mistake becomes a [`SerializerError`] that names the
//! serializer, explains the problem and points at the offending key.
//!
//! ```toml
//! [AK47.Reload]
//! Magazine_Size = 30
//! ```
//!
//! ```ignore
//! let magazine_size = data
//!     .of("Magazine_Size")
//!     .assert_exists()?
//!     .assert_range(1, i64::MAX)?
//!     .get_int()?;
//! ```

mod accessor;
mod data;
mod document;
mod enums;
mod error;
mod list_accessor;
mod location;
mod path;
mod serializer;
mod text;

pub use accessor::{Checked, ConfigAccessor, Number, Unchecked};
pub use data::SerializeData;
pub use document::{value_to_string, ConfigurationDocument, Table, TomlDocument, Value, ValueKind};
pub use enums::{parse_enums, ConfigEnum};
pub use error::{for_value, SerializerError, SerializerErrorKind};
pub use list_accessor::{ArgumentType, ConfigListAccessor, EnumArgument, ValidatedList};
pub use location::{found_at, ordinal};
pub use path::ConfigPath;
pub use serializer::{Serializer, SerializerFactory, SerializerRegistry};
pub use text::{color_adventure, split, LIST_DELIMITERS};
