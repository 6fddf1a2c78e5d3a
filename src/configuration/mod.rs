//! Application settings read from `data/configuration.toml`: where the data
//! directory is, how to log, and where weapon files and their defaults live.
//! Weapon files themselves go through [`crate::file`], not through serde.
//!
//! Loading happens in two steps. The file is deserialized into `Unresolved*`
//! tables, which [`resolve`](traits::ResolvableConfigurationWithContext::resolve)
//! turns into the public types. That step fills in placeholders such as
//! `{BASE_DATA_DIRECTORY}` and rejects invalid log filters.
//!
//! Start with [`Configuration::load_from_default_path`].

#![allow(rustdoc::private_intra_doc_links)]

mod structure;
mod traits;
mod utilities;

pub use structure::*;
