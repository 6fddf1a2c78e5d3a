//! Configurable effects (sounds, messages, potion effects) and the targeters
//! that decide who receives them.
//!
//! Weapons group mechanics by the phase of an action they run in:
//!
//! ```toml
//! [AK47.Reload.Start_Mechanics]
//! Sound = ["ITEM_ARMOR_EQUIP_CHAIN~1~1.2"]
//! Message = "&7Reloading..."
//!
//! [AK47.Reload.Start_Mechanics.Potion]
//! Effects = ["SLOWNESS~40~1"]
//! Targeter = "Self"
//! ```

use std::fmt::{self, Debug, Display, Formatter};

use strum::{EnumIter, IntoStaticStr};
use tracing::debug;

use crate::file::{
    ConfigPath,
    SerializeData,
    Serializer,
    SerializerError,
    SerializerRegistry,
    ValueKind,
};

mod caster;
mod message;
mod potion;
mod sound;
mod targeters;

pub use caster::{EntityId, Location, MechanicCaster, MechanicHost, Target};
pub use message::Message;
pub use potion::{Potion, PotionEffect, PotionEffectType};
pub use sound::{Sound, SoundEffect};
pub use targeters::{
    default_targeter_registry,
    NearbyTargeter,
    SelfTargeter,
    Targeter,
    TargeterRegistry,
    TargeterSerializer,
    DEFAULT_NEARBY_RADIUS,
};

#[cfg(test)]
pub(crate) use caster::testing;


/// A single effect, applied once per target.
pub trait Mechanic: Debug {
    fn apply(&self, target: &Target, host: &mut dyn MechanicHost);
}

pub type MechanicRegistry = SerializerRegistry<Box<dyn Mechanic>>;

/// The mechanics every weapon can use.
pub fn default_mechanic_registry() -> MechanicRegistry {
    SerializerRegistry::new()
        .with::<Sound>()
        .with::<Message>()
        .with::<Potion>()
}


/// A mechanic together with whoever it is applied to.
#[derive(Debug)]
pub struct MechanicUnit {
    pub mechanic: Box<dyn Mechanic>,
    pub targeter: Box<dyn Targeter>,
}


/// When, during an action, a group of mechanics runs.
#[derive(EnumIter, IntoStaticStr, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MechanicsPhase {
    #[strum(serialize = "Start_Mechanics")]
    Start,
    #[strum(serialize = "Finish_Mechanics")]
    Finish,
}

impl MechanicsPhase {
    /// The configuration key this phase is read from.
    pub fn keyword(self) -> &'static str {
        self.into()
    }
}

impl Display for MechanicsPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}


/// An ordered group of mechanics belonging to one phase.
#[derive(Debug)]
pub struct Mechanics {
    phase: MechanicsPhase,
    units: Vec<MechanicUnit>,
}

impl Mechanics {
    pub fn new(phase: MechanicsPhase, units: Vec<MechanicUnit>) -> Self {
        Self { phase, units }
    }

    pub fn phase(&self) -> MechanicsPhase {
        self.phase
    }

    /// The configuration key these mechanics were read from, e.g. `Start_Mechanics`.
    pub fn keyword(&self) -> &'static str {
        self.phase.keyword()
    }

    pub fn units(&self) -> &[MechanicUnit] {
        &self.units
    }

    /// Applies every mechanic, in configuration order, to each of its targets.
    pub fn use_for(&self, caster: &dyn MechanicCaster, host: &mut dyn MechanicHost) {
        for unit in &self.units {
            for target in unit.targeter.get_targets(caster) {
                unit.mechanic.apply(&target, host);
            }
        }
    }
}


/// Reads a section of mechanics. Every key names a registered mechanic;
/// mechanics configured as sections may add a `Targeter` (defaults to `Self`).
pub struct MechanicsSerializer {
    phase: MechanicsPhase,
    mechanics: MechanicRegistry,
    targeters: TargeterRegistry,
}

impl MechanicsSerializer {
    pub fn new(phase: MechanicsPhase) -> Self {
        Self::with_registries(phase, default_mechanic_registry(), default_targeter_registry())
    }

    pub fn with_registries(
        phase: MechanicsPhase,
        mechanics: MechanicRegistry,
        targeters: TargeterRegistry,
    ) -> Self {
        Self {
            phase,
            mechanics,
            targeters,
        }
    }
}

impl Serializer for MechanicsSerializer {
    type Output = Mechanics;

    fn name(&self) -> String {
        match self.phase {
            MechanicsPhase::Start => "StartMechanics".to_string(),
            MechanicsPhase::Finish => "FinishMechanics".to_string(),
        }
    }

    fn serialize(&self, data: &SerializeData<'_>) -> Result<Mechanics, SerializerError> {
        if !data.path().is_root() {
            data.of_self().assert_type(ValueKind::Section)?;
        }

        let targeter_serializer = TargeterSerializer::new(&self.targeters);
        let mut units = Vec::new();

        for key in data.document().get_keys(data.path()) {
            let key_path = ConfigPath::segment(key.as_str());

            let Some(serializer) = self.mechanics.get(&key) else {
                return Err(SerializerError::enum_mismatch(
                    data.serializer_name(),
                    "Mechanic",
                    &key,
                    false,
                    &self.mechanics.names(),
                    data.location_of(&key_path),
                ));
            };

            let mechanic = serializer.serialize(&data.child_for(serializer.as_ref(), data.path_of(&key_path)))?;

            let targeter = data
                .of(key_path.join(&ConfigPath::segment("Targeter")))
                .serialize_with(&targeter_serializer)?
                .unwrap_or_else(|| Box::new(SelfTargeter));

            debug!(
                phase = %self.phase,
                mechanic = %serializer.name(),
                path = %data.path_of(&key_path),
                "Serialized mechanic."
            );

            units.push(MechanicUnit { mechanic, targeter });
        }

        Ok(Mechanics::new(self.phase, units))
    }
}


/// Serializes [`MechanicsPhase::Start`] mechanics with the default registries.
#[derive(Clone, Copy, Default, Debug)]
pub struct StartMechanicsSerializer;

impl Serializer for StartMechanicsSerializer {
    type Output = Mechanics;

    fn serialize(&self, data: &SerializeData<'_>) -> Result<Mechanics, SerializerError> {
        MechanicsSerializer::new(MechanicsPhase::Start).serialize(data)
    }
}


/// Serializes [`MechanicsPhase::Finish`] mechanics with the default registries.
#[derive(Clone, Copy, Default, Debug)]
pub struct FinishMechanicsSerializer;

impl Serializer for FinishMechanicsSerializer {
    type Output = Mechanics;

    fn serialize(&self, data: &SerializeData<'_>) -> Result<Mechanics, SerializerError> {
        MechanicsSerializer::new(MechanicsPhase::Finish).serialize(data)
    }
}
