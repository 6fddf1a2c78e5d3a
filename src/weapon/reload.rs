use crate::file::{SerializeData, Serializer, SerializerError, ValueKind};
use crate::mechanics::{
    FinishMechanicsSerializer,
    MechanicCaster,
    MechanicHost,
    Mechanics,
    MechanicsPhase,
    StartMechanicsSerializer,
};

use super::trigger::Trigger;


#[derive(Debug)]
pub struct Reload {
    pub magazine_size: u32,
    /// In ticks.
    pub reload_duration: u32,
    /// `None` refills the whole magazine at once.
    pub ammo_per_reload: Option<u32>,
    pub trigger: Option<Trigger>,
    pub start_mechanics: Option<Mechanics>,
    pub finish_mechanics: Option<Mechanics>,
}

impl Reload {
    /// Runs the mechanics of `phase`, if any are configured.
    pub fn use_mechanics(
        &self,
        phase: MechanicsPhase,
        caster: &dyn MechanicCaster,
        host: &mut dyn MechanicHost,
    ) {
        let mechanics = match phase {
            MechanicsPhase::Start => self.start_mechanics.as_ref(),
            MechanicsPhase::Finish => self.finish_mechanics.as_ref(),
        };

        if let Some(mechanics) = mechanics {
            mechanics.use_for(caster, host);
        }
    }
}


/// ```toml
/// [AK47.Reload]
/// Magazine_Size = 30
/// Reload_Duration = 40
/// ```
#[derive(Clone, Copy, Default, Debug)]
pub struct ReloadSerializer;

impl Serializer for ReloadSerializer {
    type Output = Reload;

    fn serialize(&self, data: &SerializeData<'_>) -> Result<Reload, SerializerError> {
        data.of_self().assert_type(ValueKind::Section)?;

        let magazine_size = data
            .of("Magazine_Size")
            .assert_exists()?
            .assert_range(1, u32::MAX as i64)?
            .get_int()? as u32;

        let reload_duration = data
            .of("Reload_Duration")
            .assert_exists()?
            .assert_range(0, u32::MAX as i64)?
            .get_int()? as u32;

        let ammo_per_reload = data
            .of("Ammo_Per_Reload")
            .assert_range(1, u32::MAX as i64)?
            .get_int_or(0)?;
        let ammo_per_reload = (ammo_per_reload > 0).then_some(ammo_per_reload as u32);

        if ammo_per_reload.is_some_and(|ammo| ammo > magazine_size) {
            return Err(data.exception(
                "Ammo_Per_Reload",
                [
                    "Ammo_Per_Reload cannot be larger than Magazine_Size.".to_string(),
                    format!("Magazine_Size is {magazine_size}."),
                ],
            ));
        }

        Ok(Reload {
            magazine_size,
            reload_duration,
            ammo_per_reload,
            trigger: data.of("Trigger").serialize::<Trigger>()?,
            start_mechanics: data
                .of(MechanicsPhase::Start.keyword())
                .serialize::<StartMechanicsSerializer>()?,
            finish_mechanics: data
                .of(MechanicsPhase::Finish.keyword())
                .serialize::<FinishMechanicsSerializer>()?,
        })
    }
}
