use crate::file::{ArgumentType, ConfigListAccessor, SerializeData, Serializer, SerializerError, ValueKind};

use super::{Mechanic, MechanicHost, Target};


#[derive(Clone, PartialEq, Debug)]
pub struct SoundEffect {
    /// Sound key. Not validated, resource packs can add their own sounds.
    pub sound: String,
    pub volume: f64,
    pub pitch: f64,
    pub delay_ticks: u32,
}


/// Plays one or more sounds.
///
/// ```toml
/// Sound = ["ENTITY_IRON_GOLEM_ATTACK~1~1.5", "BLOCK_LEVER_CLICK~0.5~2~4"]
/// ```
///
/// Each element is `sound~volume~pitch~delay`. The list can also be placed
/// under `Sounds` inside a section, next to a `Targeter`.
#[derive(Clone, Default, Debug)]
pub struct Sound {
    sounds: Vec<SoundEffect>,
}

impl Sound {
    pub fn sounds(&self) -> &[SoundEffect] {
        &self.sounds
    }
}

impl Mechanic for Sound {
    fn apply(&self, target: &Target, host: &mut dyn MechanicHost) {
        for sound in &self.sounds {
            host.play_sound(target, sound);
        }
    }
}

impl Serializer for Sound {
    type Output = Box<dyn Mechanic>;

    fn serialize(&self, data: &SerializeData<'_>) -> Result<Self::Output, SerializerError> {
        let accessor = if data.of_self().is(ValueKind::Section) {
            data.of_list("Sounds").assert_exists()?
        } else {
            data.of_list_self()
        };

        let sounds = sound_format(accessor)
            .assert_list()?
            .get()
            .into_iter()
            .map(|parts| SoundEffect {
                sound: parts[0].clone(),
                volume: parts.get(1).and_then(|part| part.parse().ok()).unwrap_or(1.0),
                pitch: parts.get(2).and_then(|part| part.parse().ok()).unwrap_or(1.0),
                delay_ticks: parts.get(3).and_then(|part| part.parse().ok()).unwrap_or(0),
            })
            .collect();

        Ok(Box::new(Sound { sounds }))
    }
}

fn sound_format(accessor: ConfigListAccessor<'_>) -> ConfigListAccessor<'_> {
    accessor
        .add_unchecked_argument(ArgumentType::String, true)
        .add_argument(ArgumentType::Double, false)
        .assert_argument_positive()
        .add_argument(ArgumentType::Double, false)
        .assert_argument_range(0.5, 2.0)
        .add_argument(ArgumentType::Integer, false)
        .assert_argument_range(0.0, u32::MAX as f64)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::{SerializerErrorKind, TomlDocument};
    use crate::mechanics::caster::testing::{Played, RecordingHost};
    use crate::mechanics::EntityId;

    fn serialize(contents: &str) -> Result<Vec<SoundEffect>, SerializerError> {
        let document = TomlDocument::parse("sounds.toml", contents).unwrap();
        let data = SerializeData::new("Sound", &document, "Mechanics.Sound");

        let sound = Sound::default().serialize(&data)?;
        let mut host = RecordingHost::default();
        sound.apply(&Target::Entity(EntityId(1)), &mut host);

        Ok(host
            .played
            .into_iter()
            .filter_map(|played| match played {
                Played::Sound(_, sound) => Some(sound),
                _ => None,
            })
            .collect())
    }

    #[test]
    fn missing_parts_use_defaults() {
        let sounds = serialize(
            "[Mechanics]\nSound = [\"ENTITY_IRON_GOLEM_ATTACK~1~1.5\", \"custom.click~0.5~2~4\"]",
        )
        .unwrap();

        assert_eq!(sounds.len(), 2);
        assert_eq!(sounds[0].sound, "ENTITY_IRON_GOLEM_ATTACK");
        assert_eq!(sounds[0].pitch, 1.5);
        assert_eq!(sounds[0].delay_ticks, 0);
        assert_eq!(sounds[1].volume, 0.5);
        assert_eq!(sounds[1].delay_ticks, 4);
    }

    #[test]
    fn section_form_reads_sounds() {
        let sounds = serialize("[Mechanics.Sound]\nSounds = [\"gun.shot\"]\nTargeter = \"Self\"").unwrap();
        assert_eq!(sounds[0].volume, 1.0);
    }

    #[test]
    fn pitch_is_bounded() {
        let error = serialize("[Mechanics]\nSound = [\"gun.shot~1~3\"]").unwrap_err();
        assert_eq!(error.kind(), SerializerErrorKind::OutOfRange);
        assert!(error.location().ends_with("Mechanics.Sound (1st list element)"));
    }
}
