use strum::{EnumIter, IntoStaticStr};

use crate::file::{parse_enums, ArgumentType, ConfigListAccessor, SerializeData, Serializer, SerializerError, ValueKind};

use super::{Mechanic, MechanicHost, Target};


#[derive(EnumIter, IntoStaticStr, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PotionEffectType {
    Speed,
    Slowness,
    Haste,
    MiningFatigue,
    Strength,
    InstantHealth,
    InstantDamage,
    JumpBoost,
    Nausea,
    Regeneration,
    Resistance,
    FireResistance,
    WaterBreathing,
    Invisibility,
    Blindness,
    NightVision,
    Hunger,
    Weakness,
    Poison,
    Wither,
    HealthBoost,
    Absorption,
    Saturation,
    Glowing,
    Levitation,
    Luck,
    Unluck,
    SlowFalling,
}


#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PotionEffect {
    pub effect_type: PotionEffectType,
    pub duration_ticks: u32,
    /// 0 is level I.
    pub amplifier: u32,
    pub particles: bool,
}


/// Applies potion effects.
///
/// ```toml
/// Potion = ["SPEED~100~1", "$RESISTANCE~40~0~false"]
/// ```
///
/// Each element is `type~duration~amplifier~particles`. Wildcards apply every
/// matching type, so `$RESISTANCE` gives both `RESISTANCE` and `FIRE_RESISTANCE`.
#[derive(Clone, Default, Debug)]
pub struct Potion {
    effects: Vec<PotionEffect>,
}

impl Potion {
    pub fn effects(&self) -> &[PotionEffect] {
        &self.effects
    }
}

impl Mechanic for Potion {
    fn apply(&self, target: &Target, host: &mut dyn MechanicHost) {
        for effect in &self.effects {
            host.add_potion_effect(target, effect);
        }
    }
}

impl Serializer for Potion {
    type Output = Box<dyn Mechanic>;

    fn serialize(&self, data: &SerializeData<'_>) -> Result<Self::Output, SerializerError> {
        let accessor = if data.of_self().is(ValueKind::Section) {
            data.of_list("Effects").assert_exists()?
        } else {
            data.of_list_self()
        };

        let mut effects = Vec::new();
        for parts in potion_format(accessor).assert_list()?.get() {
            let duration_ticks = parts[1].parse().unwrap_or(0);
            let amplifier = parts.get(2).and_then(|part| part.parse().ok()).unwrap_or(0);
            let particles = parts
                .get(3)
                .map_or(true, |part| part.eq_ignore_ascii_case("true"));

            effects.extend(
                parse_enums::<PotionEffectType>(&parts[0])
                    .into_iter()
                    .map(|effect_type| PotionEffect {
                        effect_type,
                        duration_ticks,
                        amplifier,
                        particles,
                    }),
            );
        }

        Ok(Box::new(Potion { effects }))
    }
}

fn potion_format(accessor: ConfigListAccessor<'_>) -> ConfigListAccessor<'_> {
    accessor
        .add_argument(ArgumentType::enumeration::<PotionEffectType>(), true)
        .add_argument(ArgumentType::Integer, true)
        .assert_argument_range(0.0, u32::MAX as f64)
        .add_argument(ArgumentType::Integer, false)
        .assert_argument_range(0.0, 255.0)
        .add_argument(ArgumentType::Boolean, false)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::{SerializerErrorKind, TomlDocument};
    use crate::mechanics::caster::testing::{Played, RecordingHost};
    use crate::mechanics::EntityId;

    fn serialize(contents: &str) -> Result<Vec<PotionEffect>, SerializerError> {
        let document = TomlDocument::parse("potion.toml", contents).unwrap();
        let data = SerializeData::new("Potion", &document, "Mechanics.Potion");

        let mechanic = Potion::default().serialize(&data)?;
        let mut host = RecordingHost::default();
        mechanic.apply(&Target::Entity(EntityId(3)), &mut host);

        Ok(host
            .played
            .into_iter()
            .filter_map(|played| match played {
                Played::Potion(_, effect) => Some(effect),
                _ => None,
            })
            .collect())
    }

    #[test]
    fn elements_become_effects() {
        let effects = serialize("[Mechanics]\nPotion = [\"speed~100~1\", \"GLOWING~20~0~false\"]").unwrap();

        assert_eq!(
            effects,
            [
                PotionEffect {
                    effect_type: PotionEffectType::Speed,
                    duration_ticks: 100,
                    amplifier: 1,
                    particles: true,
                },
                PotionEffect {
                    effect_type: PotionEffectType::Glowing,
                    duration_ticks: 20,
                    amplifier: 0,
                    particles: false,
                },
            ]
        );
    }

    #[test]
    fn wildcards_expand() {
        let effects = serialize("[Mechanics.Potion]\nEffects = [\"$RESISTANCE~40\"]").unwrap();

        let types: Vec<_> = effects.iter().map(|effect| effect.effect_type).collect();
        assert_eq!(
            types,
            [PotionEffectType::Resistance, PotionEffectType::FireResistance]
        );
    }

    #[test]
    fn duration_is_required() {
        let error = serialize("[Mechanics]\nPotion = [\"SPEED\"]").unwrap_err();
        assert_eq!(error.kind(), SerializerErrorKind::ListFormat);
        assert!(error.messages().contains(&"Valid Format: <PotionEffectType*>-<Integer*>-<Integer>-<Boolean>".to_string()));
    }

    #[test]
    fn unknown_effects_list_options() {
        let error = serialize("[Mechanics]\nPotion = [\"FLYING~20\"]").unwrap_err();
        assert_eq!(error.kind(), SerializerErrorKind::EnumMismatch);
        assert!(error.messages()[0].contains("PotionEffectType"));
    }
}
