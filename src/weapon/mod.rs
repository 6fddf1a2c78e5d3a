//! Weapons and the parts of them players interact with.
//!
//! Every top-level key of a weapon file is a weapon:
//!
//! ```toml
//! [AK47.Info]
//! Display_Name = "&6AK-47"
//!
//! [AK47.Reload]
//! Magazine_Size = 30
//! Reload_Duration = 40
//! Trigger = { Main_Hand = "DROP_ITEM" }
//! ```

use crate::file::{SerializeData, Serializer, SerializerError, ValueKind};

mod circumstance;
mod loader;
mod reload;
mod trigger;

pub use circumstance::{Circumstance, CircumstanceType, EntityWrapper};
pub use loader::{LoadReport, WeaponLoader};
pub use reload::{Reload, ReloadSerializer};
pub use trigger::{Trigger, TriggerType};


#[derive(Debug)]
pub struct Weapon {
    /// The top-level key the weapon was configured under. Unique across all weapon files.
    pub title: String,
    /// Tag-formatted display name.
    pub display_name: String,
    pub reload: Option<Reload>,
}


#[derive(Clone, Copy, Default, Debug)]
pub struct WeaponSerializer;

impl Serializer for WeaponSerializer {
    type Output = Weapon;

    fn serialize(&self, data: &SerializeData<'_>) -> Result<Weapon, SerializerError> {
        let Some(title) = data.path().last().map(str::to_string) else {
            panic!("Weapons are serialized from a top-level key, not from the document root.");
        };

        data.of_self().assert_type(ValueKind::Section)?;

        let display_name = data.of("Info.Display_Name").get_adventure_or(&title)?;
        let reload = data.of("Reload").serialize::<ReloadSerializer>()?;

        Ok(Weapon {
            title,
            display_name,
            reload,
        })
    }
}
