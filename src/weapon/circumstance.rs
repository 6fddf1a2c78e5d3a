use strum::{EnumIter, IntoStaticStr};

use crate::file::{
    parse_enums,
    ConfigEnum,
    ConfigPath,
    SerializeData,
    Serializer,
    SerializerError,
    ValueKind,
};


/// The state of the entity holding a weapon.
pub trait EntityWrapper {
    fn is_reloading(&self) -> bool;
    fn is_zooming(&self) -> bool;
    fn is_sneaking(&self) -> bool;
    fn is_standing(&self) -> bool;
    fn is_walking(&self) -> bool;
    fn is_riding(&self) -> bool;
    fn is_sprinting(&self) -> bool;
    fn is_dual_wielding(&self) -> bool;
    fn is_swimming(&self) -> bool;
    fn is_in_midair(&self) -> bool;
    fn is_gliding(&self) -> bool;
}


#[derive(EnumIter, IntoStaticStr, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CircumstanceType {
    Reloading,
    Zooming,
    Sneaking,
    Standing,
    Walking,
    Riding,
    Sprinting,
    DualWielding,
    Swimming,
    InMidair,
    Gliding,
}

impl CircumstanceType {
    /// Observes this state on `entity`.
    pub fn observe(self, entity: &dyn EntityWrapper) -> bool {
        match self {
            CircumstanceType::Reloading => entity.is_reloading(),
            CircumstanceType::Zooming => entity.is_zooming(),
            CircumstanceType::Sneaking => entity.is_sneaking(),
            CircumstanceType::Standing => entity.is_standing(),
            CircumstanceType::Walking => entity.is_walking(),
            CircumstanceType::Riding => entity.is_riding(),
            CircumstanceType::Sprinting => entity.is_sprinting(),
            CircumstanceType::DualWielding => entity.is_dual_wielding(),
            CircumstanceType::Swimming => entity.is_swimming(),
            CircumstanceType::InMidair => entity.is_in_midair(),
            CircumstanceType::Gliding => entity.is_gliding(),
        }
    }
}


/// Conditions on the state of the entity, e.g. "only while sneaking".
///
/// ```toml
/// [Trigger.Circumstance]
/// Sneaking = "REQUIRED"
/// Swimming = "DENY"
/// ```
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Circumstance {
    conditions: Vec<(CircumstanceType, bool)>,
}

impl Circumstance {
    /// `required` is `true` for `REQUIRED` conditions and `false` for `DENY` ones.
    pub fn new(conditions: Vec<(CircumstanceType, bool)>) -> Self {
        Self { conditions }
    }

    pub fn conditions(&self) -> &[(CircumstanceType, bool)] {
        &self.conditions
    }

    /// Returns `true` if any condition does not hold for `entity`.
    pub fn deny(&self, entity: &dyn EntityWrapper) -> bool {
        self.conditions
            .iter()
            .any(|(circumstance_type, required)| circumstance_type.observe(entity) != *required)
    }
}

impl Serializer for Circumstance {
    type Output = Circumstance;

    fn serialize(&self, data: &SerializeData<'_>) -> Result<Circumstance, SerializerError> {
        if !data.path().is_root() && !data.of_self().is(ValueKind::Section) {
            return Err(data.exception(
                "",
                ["Could not find the configuration section of Circumstance."],
            ));
        }

        let mut conditions = Vec::new();

        for key in data.document().get_keys(data.path()) {
            let key_path = ConfigPath::segment(key.as_str());
            let value = data.of(&key_path).get_string_or("")?;

            let required = if value.trim().eq_ignore_ascii_case("REQUIRED") {
                true
            } else if value.trim().eq_ignore_ascii_case("DENY") {
                false
            } else {
                return Err(data.exception(
                    &key_path,
                    [format!("Only DENY and REQUIRED are allowed, but found '{value}'.")],
                ));
            };

            let circumstance_type = if key.starts_with('$') {
                None
            } else {
                parse_enums::<CircumstanceType>(&key).first().copied()
            };
            let Some(circumstance_type) = circumstance_type else {
                return Err(SerializerError::enum_mismatch(
                    data.serializer_name(),
                    CircumstanceType::enum_name(),
                    &key,
                    false,
                    &CircumstanceType::config_names(),
                    data.location_of(&key_path),
                ));
            };

            conditions.push((circumstance_type, required));
        }

        Ok(Circumstance { conditions })
    }
}


#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// An entity whose states are listed explicitly.
    #[derive(Default)]
    pub struct TestEntity {
        pub states: Vec<CircumstanceType>,
    }

    impl TestEntity {
        fn has(&self, state: CircumstanceType) -> bool {
            self.states.contains(&state)
        }
    }

    impl EntityWrapper for TestEntity {
        fn is_reloading(&self) -> bool {
            self.has(CircumstanceType::Reloading)
        }

        fn is_zooming(&self) -> bool {
            self.has(CircumstanceType::Zooming)
        }

        fn is_sneaking(&self) -> bool {
            self.has(CircumstanceType::Sneaking)
        }

        fn is_standing(&self) -> bool {
            self.has(CircumstanceType::Standing)
        }

        fn is_walking(&self) -> bool {
            self.has(CircumstanceType::Walking)
        }

        fn is_riding(&self) -> bool {
            self.has(CircumstanceType::Riding)
        }

        fn is_sprinting(&self) -> bool {
            self.has(CircumstanceType::Sprinting)
        }

        fn is_dual_wielding(&self) -> bool {
            self.has(CircumstanceType::DualWielding)
        }

        fn is_swimming(&self) -> bool {
            self.has(CircumstanceType::Swimming)
        }

        fn is_in_midair(&self) -> bool {
            self.has(CircumstanceType::InMidair)
        }

        fn is_gliding(&self) -> bool {
            self.has(CircumstanceType::Gliding)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::TestEntity;
    use super::*;
    use crate::file::{SerializerErrorKind, TomlDocument};

    fn circumstance(contents: &str) -> Result<Circumstance, SerializerError> {
        let document = TomlDocument::parse("trigger.toml", contents).unwrap();
        let data = SerializeData::new("Circumstance", &document, "Trigger.Circumstance");
        Circumstance::default().serialize(&data)
    }

    fn entity(states: &[CircumstanceType]) -> TestEntity {
        TestEntity {
            states: states.to_vec(),
        }
    }

    #[test]
    fn required_conditions_deny_when_absent() {
        let circumstance = circumstance("[Trigger.Circumstance]\nSneaking = \"REQUIRED\"").unwrap();

        assert!(circumstance.deny(&entity(&[])));
        assert!(!circumstance.deny(&entity(&[CircumstanceType::Sneaking])));
    }

    #[test]
    fn denied_conditions_deny_when_present() {
        let circumstance = circumstance("[Trigger.Circumstance]\nswimming = \"deny\"").unwrap();

        assert!(circumstance.deny(&entity(&[CircumstanceType::Swimming])));
        assert!(!circumstance.deny(&entity(&[CircumstanceType::Walking])));
    }

    #[test]
    fn any_failing_condition_denies() {
        let circumstance = circumstance(
            "[Trigger.Circumstance]\nDual_Wielding = \"REQUIRED\"\nIn_Midair = \"DENY\"",
        )
        .unwrap();

        assert_eq!(circumstance.conditions().len(), 2);
        assert!(!circumstance.deny(&entity(&[CircumstanceType::DualWielding])));
        assert!(circumstance.deny(&entity(&[
            CircumstanceType::DualWielding,
            CircumstanceType::InMidair,
        ])));
    }

    #[test]
    fn empty_circumstances_never_deny() {
        assert!(!Circumstance::default().deny(&entity(&[CircumstanceType::Riding])));
    }

    #[test]
    fn values_must_be_deny_or_required() {
        let error = circumstance("[Trigger.Circumstance]\nSneaking = \"MAYBE\"").unwrap_err();

        assert_eq!(error.kind(), SerializerErrorKind::General);
        assert!(error.messages()[0].contains("MAYBE"));
        assert!(error.location().ends_with("Trigger.Circumstance.Sneaking"));
    }

    #[test]
    fn unknown_types_are_enum_errors() {
        let error = circumstance("[Trigger.Circumstance]\nFlying = \"DENY\"").unwrap_err();

        assert_eq!(error.kind(), SerializerErrorKind::EnumMismatch);
        assert!(error.messages()[0].contains("CircumstanceType"));
        assert!(error.location().ends_with("Trigger.Circumstance.Flying"));
    }

    #[test]
    fn circumstances_must_be_sections() {
        let error = circumstance("[Trigger]\nCircumstance = \"Sneaking\"").unwrap_err();
        assert_eq!(error.kind(), SerializerErrorKind::General);
    }
}
