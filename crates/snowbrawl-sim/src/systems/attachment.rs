//! Attachment system: propagates parent poses to attached children.
//!
//! Attachments form a shallow chain (player, anchor, held projectile), so
//! two passes settle every child for the tick. Updates are collected under
//! shared borrows and applied afterwards.

use glam::{Quat, Vec3};
use hecs::{Entity, World};

use snowbrawl_core::components::Transform;

use crate::components::AttachedTo;

pub fn run(world: &mut World) {
    for _ in 0..2 {
        let mut updates: Vec<(Entity, Vec3, Quat)> = Vec::new();
        for (entity, attached) in world.query::<&AttachedTo>().iter() {
            if let Ok(parent) = world.get::<&Transform>(attached.parent) {
                let position = parent.position + parent.rotation * attached.local_offset;
                let rotation = (parent.rotation * attached.local_rotation).normalize();
                updates.push((entity, position, rotation));
            }
        }
        for (entity, position, rotation) in updates {
            if let Ok(mut transform) = world.get::<&mut Transform>(entity) {
                transform.position = position;
                transform.rotation = rotation;
            }
        }
    }
}
