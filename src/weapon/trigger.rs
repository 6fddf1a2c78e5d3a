use strum::{EnumIter, IntoStaticStr};

use crate::file::{SerializeData, Serializer, SerializerError};

use super::circumstance::{Circumstance, EntityWrapper};


/// A player input that can start a weapon action.
#[derive(EnumIter, IntoStaticStr, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerType {
    RightClick,
    LeftClick,
    StartSneak,
    EndSneak,
    DoubleSneak,
    StartSprint,
    EndSprint,
    DropItem,
    SwapHands,
}


/// Which input, in which hand, starts an action.
///
/// ```toml
/// [AK47.Reload.Trigger]
/// Main_Hand = "DROP_ITEM"
/// Off_Hand = "DROP_ITEM"
/// Circumstance = { Swimming = "DENY" }
/// ```
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Trigger {
    main_hand: Option<TriggerType>,
    off_hand: Option<TriggerType>,
    circumstance: Option<Circumstance>,
}

impl Trigger {
    pub fn new(
        main_hand: Option<TriggerType>,
        off_hand: Option<TriggerType>,
        circumstance: Option<Circumstance>,
    ) -> Self {
        Self {
            main_hand,
            off_hand,
            circumstance,
        }
    }

    pub fn main_hand(&self) -> Option<TriggerType> {
        self.main_hand
    }

    pub fn off_hand(&self) -> Option<TriggerType> {
        self.off_hand
    }

    pub fn circumstance(&self) -> Option<&Circumstance> {
        self.circumstance.as_ref()
    }

    /// Returns `true` if `trigger_type`, used with the given hand, starts this action
    /// for `entity`.
    pub fn check(&self, trigger_type: TriggerType, main_hand: bool, entity: &dyn EntityWrapper) -> bool {
        let configured = if main_hand {
            self.main_hand
        } else {
            self.off_hand
        };

        if configured != Some(trigger_type) {
            return false;
        }

        !self
            .circumstance
            .as_ref()
            .is_some_and(|circumstance| circumstance.deny(entity))
    }
}

impl Serializer for Trigger {
    type Output = Trigger;

    fn serialize(&self, data: &SerializeData<'_>) -> Result<Trigger, SerializerError> {
        let main_hand = data.of("Main_Hand").get_enum_optional::<TriggerType>()?;
        let off_hand = data.of("Off_Hand").get_enum_optional::<TriggerType>()?;

        if main_hand.is_none() && off_hand.is_none() {
            return Err(data.exception(
                "",
                [
                    "A trigger needs at least one of Main_Hand or Off_Hand.",
                    "Remove the Trigger section if the action should not be started by players.",
                ],
            ));
        }

        let circumstance = data.of("Circumstance").serialize::<Circumstance>()?;

        Ok(Trigger {
            main_hand,
            off_hand,
            circumstance,
        })
    }
}
