//! Contract for the host's world-collision raycast.

use glam::Vec3;

/// Opaque handle of a host entity (vehicle, ped, object).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityHandle(pub i32);

/// Outcome of a single raycast.
///
/// When `hit` is false `hit_position` carries no meaning.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RaycastResult {
    /// Whether anything was struck.
    pub hit: bool,
    /// Whether the closest obstruction is a dynamic entity rather than
    /// static terrain.
    pub hit_entity: bool,
    /// World position of the hit.
    pub hit_position: Vec3,
}

impl RaycastResult {
    /// A result that struck nothing.
    pub fn miss() -> Self {
        Self::default()
    }

    /// A hit on static world geometry.
    pub fn terrain(position: Vec3) -> Self {
        Self {
            hit: true,
            hit_entity: false,
            hit_position: position,
        }
    }

    /// A hit on a dynamic entity.
    pub fn entity(position: Vec3) -> Self {
        Self {
            hit: true,
            hit_entity: true,
            hit_position: position,
        }
    }

    /// True for hits on static terrain, the only kind trusted for tracking.
    pub fn is_terrain_hit(&self) -> bool {
        self.hit && !self.hit_entity
    }
}

/// World-collision oracle provided by the host.
///
/// Implementations intersect both static geometry and dynamic entities and
/// return the closest hit within `max_distance` along `direction` (which
/// need not be normalized; implementations scale it). `ignore` is excluded
/// from the query, typically the vehicle carrying the camera.
pub trait RaycastQuery {
    /// Cast a ray and report the first intersection.
    fn cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        ignore: EntityHandle,
    ) -> RaycastResult;
}
