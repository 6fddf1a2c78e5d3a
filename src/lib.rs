//! Weapon configuration loading and validation.
//!
//! Weapon files are validated by [`Serializer`](file::Serializer)s built on the
//! [`file`] framework. Mistakes are reported as
//! [`SerializerError`](file::SerializerError)s that tell configuration authors
//! what is wrong and where. Loading one weapon never stops the others from
//! loading, see [`WeaponLoader`](weapon::WeaponLoader).

pub mod configuration;
pub mod file;
pub mod logging;
pub mod mechanics;
pub mod weapon;
