//! What mechanics need from the game: who cast them and how to affect the world.

use std::fmt::{self, Display, Formatter};

use super::message::Message;
use super::potion::PotionEffect;
use super::sound::SoundEffect;


/// A game entity, as identified by the host.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EntityId(pub u64);

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}


#[derive(Clone, PartialEq, Debug)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new<W: Into<String>>(world: W, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }

    /// Squared distance to `other`, or `None` if the locations are in different worlds.
    pub fn distance_squared(&self, other: &Location) -> Option<f64> {
        if self.world != other.world {
            return None;
        }

        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        Some(dx * dx + dy * dy + dz * dz)
    }
}


/// Something a mechanic is applied to.
#[derive(Clone, PartialEq, Debug)]
pub enum Target {
    Entity(EntityId),
    Location(Location),
}


/// Whoever (or whatever) triggered the mechanics.
pub trait MechanicCaster {
    fn location(&self) -> Location;

    /// The casting entity, if the mechanics were not cast by a block or a projectile.
    fn entity(&self) -> Option<EntityId>;

    /// Entities within `radius` blocks of the caster, excluding the caster itself.
    fn nearby_entities(&self, radius: f64) -> Vec<EntityId>;
}


/// The game server, as seen by mechanics.
pub trait MechanicHost {
    fn play_sound(&mut self, target: &Target, sound: &SoundEffect);

    fn send_message(&mut self, target: &Target, message: &Message);

    fn add_potion_effect(&mut self, target: &Target, effect: &PotionEffect);
}




#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances_only_within_one_world() {
        let origin = Location::new("world", 0.0, 0.0, 0.0);

        assert_eq!(
            origin.distance_squared(&Location::new("world", 1.0, 2.0, 2.0)),
            Some(9.0)
        );
        assert_eq!(
            origin.distance_squared(&Location::new("world_nether", 0.0, 0.0, 0.0)),
            None
        );
    }
}
