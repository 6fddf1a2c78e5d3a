//! Targeters decide who (or where) mechanics are applied to.

use std::fmt::Debug;

use crate::file::{
    SerializeData,
    Serializer,
    SerializerError,
    SerializerRegistry,
    ValueKind,
};

use super::{MechanicCaster, Target};


/// Nearby targeters without a configured radius look this far (in blocks).
pub const DEFAULT_NEARBY_RADIUS: f64 = 5.0;


pub trait Targeter: Debug {
    /// The targets for this cast. Computed anew on every call.
    fn get_targets(&self, caster: &dyn MechanicCaster) -> Vec<Target>;
}

pub type TargeterRegistry = SerializerRegistry<Box<dyn Targeter>>;

/// The targeters every weapon can use.
pub fn default_targeter_registry() -> TargeterRegistry {
    SerializerRegistry::new()
        .with::<SelfTargeter>()
        .with::<NearbyTargeter>()
}


/// Targets the caster, or where the caster is if it is not an entity.
#[derive(Clone, Copy, Default, Debug)]
pub struct SelfTargeter;

impl Targeter for SelfTargeter {
    fn get_targets(&self, caster: &dyn MechanicCaster) -> Vec<Target> {
        match caster.entity() {
            Some(entity) => vec![Target::Entity(entity)],
            None => vec![Target::Location(caster.location())],
        }
    }
}

impl Serializer for SelfTargeter {
    type Output = Box<dyn Targeter>;

    fn name(&self) -> String {
        "Self".to_string()
    }

    fn serialize(&self, _data: &SerializeData<'_>) -> Result<Self::Output, SerializerError> {
        Ok(Box::new(SelfTargeter))
    }
}


/// Targets every entity within `Radius` blocks of the caster.
#[derive(Clone, Copy, Debug)]
pub struct NearbyTargeter {
    radius: f64,
}

impl NearbyTargeter {
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Default for NearbyTargeter {
    fn default() -> Self {
        Self {
            radius: DEFAULT_NEARBY_RADIUS,
        }
    }
}

impl Targeter for NearbyTargeter {
    fn get_targets(&self, caster: &dyn MechanicCaster) -> Vec<Target> {
        caster
            .nearby_entities(self.radius)
            .into_iter()
            .filter(|entity| Some(*entity) != caster.entity())
            .map(Target::Entity)
            .collect()
    }
}

impl Serializer for NearbyTargeter {
    type Output = Box<dyn Targeter>;

    fn name(&self) -> String {
        "Nearby".to_string()
    }

    fn serialize(&self, data: &SerializeData<'_>) -> Result<Self::Output, SerializerError> {
        let radius = data
            .of("Radius")
            .assert_range_f64(0.0, 256.0)?
            .get_double_or(DEFAULT_NEARBY_RADIUS)?;

        Ok(Box::new(NearbyTargeter { radius }))
    }
}


/// Reads a `Targeter` key, which is either a targeter name or a section
/// with a `Type` and that targeter's own options.
///
/// ```toml
/// Targeter = "Self"
///
/// [Start_Mechanics.Potion.Targeter]
/// Type = "Nearby"
/// Radius = 8
/// ```
pub struct TargeterSerializer<'r> {
    registry: &'r TargeterRegistry,
}

impl<'r> TargeterSerializer<'r> {
    pub fn new(registry: &'r TargeterRegistry) -> Self {
        Self { registry }
    }
}

impl Serializer for TargeterSerializer<'_> {
    type Output = Box<dyn Targeter>;

    fn name(&self) -> String {
        "Targeter".to_string()
    }

    fn serialize(&self, data: &SerializeData<'_>) -> Result<Self::Output, SerializerError> {
        let (type_name, location) = if data.of_self().is(ValueKind::Section) {
            let accessor = data.of("Type").assert_exists()?;
            (accessor.get_string()?, accessor.location())
        } else {
            let accessor = data.of_self().assert_exists()?;
            (accessor.get_string()?, accessor.location())
        };

        let Some(targeter) = self.registry.get(&type_name) else {
            return Err(SerializerError::enum_mismatch(
                data.serializer_name(),
                "Targeter",
                &type_name,
                false,
                &self.registry.names(),
                location,
            ));
        };

        targeter.serialize(&SerializeData::for_serializer(
            targeter.as_ref(),
            data.document(),
            data.path().clone(),
        ))
    }
}
