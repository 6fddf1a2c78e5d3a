use crate::file::{SerializeData, Serializer, SerializerError, ValueKind};

use super::{Mechanic, MechanicHost, Target};


/// Sends a chat or action bar message.
///
/// ```toml
/// Message = "&aReloading..."
///
/// [Finish_Mechanics.Message]
/// Text = "&7Reloaded"
/// Action_Bar = true
/// ```
///
/// The text is stored with legacy colour codes converted to tags.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Message {
    pub text: String,
    pub action_bar: bool,
}

impl Mechanic for Message {
    fn apply(&self, target: &Target, host: &mut dyn MechanicHost) {
        host.send_message(target, self);
    }
}

impl Serializer for Message {
    type Output = Box<dyn Mechanic>;

    fn serialize(&self, data: &SerializeData<'_>) -> Result<Self::Output, SerializerError> {
        let message = if data.of_self().is(ValueKind::Section) {
            Message {
                text: data.of("Text").assert_exists()?.get_adventure()?,
                action_bar: data.of("Action_Bar").get_bool_or(false)?,
            }
        } else {
            Message {
                text: data.of_self().get_adventure_or("")?,
                action_bar: false,
            }
        };

        if message.text.trim().is_empty() {
            return Err(data.exception(
                "",
                ["Messages cannot be empty.", "Remove the Message mechanic if nothing should be sent."],
            ));
        }

        Ok(Box::new(message))
    }
}
