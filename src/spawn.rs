//! Spawn placement and fall safety built on the floor raycast

use glam::{Vec2, Vec3};

use crate::constants::physics::DEFAULT_ENTITY_RADIUS;
use crate::constants::spawn::{
    EYE_HEIGHT, FALLBACK_HEIGHT, GROUND_TOLERANCE, KILL_HEIGHT, MAX_DROP, PROBE_HEIGHT,
};
use crate::physics::{QueryFilter, SpatialQuery};

/// Tunables for spawn probing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnSettings {
    /// Height the downward probe starts from
    pub probe_height: f32,
    pub max_drop: f32,
    /// Clearance checked above the floor
    pub eye_height: f32,
    pub radius: f32,
    pub fallback_height: f32,
    /// Below this the entity is considered fallen out of the level
    pub kill_height: f32,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            probe_height: PROBE_HEIGHT,
            max_drop: MAX_DROP,
            eye_height: EYE_HEIGHT,
            radius: DEFAULT_ENTITY_RADIUS,
            fallback_height: FALLBACK_HEIGHT,
            kill_height: KILL_HEIGHT,
        }
    }
}

/// Where to put an entity's feet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: Vec3,
    /// `false` for the elevated fallback when no candidate had a floor
    pub grounded: bool,
    /// Index of the candidate that was used
    pub candidate: Option<usize>,
}

/// Utility for finding safe spawn positions in a level
pub struct SpawnFinder;

impl SpawnFinder {
    /// First candidate with a floor below it and nothing solid at eye height.
    ///
    /// Falls back to an elevated, ungrounded spawn above the first candidate
    /// (or the origin) so the caller can let the entity drop in.
    pub fn find_spawn(query: &SpatialQuery<'_>, candidates: &[Vec2], settings: &SpawnSettings) -> SpawnPoint {
        let solid = QueryFilter::solid();

        for (i, candidate) in candidates.iter().enumerate() {
            let origin = Vec3::new(candidate.x, settings.probe_height, candidate.y);
            let Some(floor) = query.find_floor_below(origin, settings.max_drop) else {
                log::debug!("[SpawnFinder] No floor below candidate {} at ({}, {})", i, candidate.x, candidate.y);
                continue;
            };

            let eye = floor.point + Vec3::Y * settings.eye_height;
            if query.check_collision_filtered(eye, settings.radius, &solid).collides {
                log::debug!("[SpawnFinder] Candidate {} blocked at eye height", i);
                continue;
            }

            log::info!("[SpawnFinder] Selected spawn position at {:?}", floor.point);
            return SpawnPoint {
                position: floor.point,
                grounded: true,
                candidate: Some(i),
            };
        }

        let base = candidates.first().copied().unwrap_or(Vec2::ZERO);
        let position = Vec3::new(base.x, settings.fallback_height, base.y);
        log::warn!(
            "[SpawnFinder] No safe spawn among {} candidates, falling back to {:?}",
            candidates.len(),
            position
        );
        SpawnPoint {
            position,
            grounded: false,
            candidate: None,
        }
    }

    /// Is there a floor within `tolerance` of the feet?
    pub fn is_grounded(query: &SpatialQuery<'_>, feet: Vec3, tolerance: f32) -> bool {
        let tolerance = tolerance.max(0.0);
        query
            .find_floor_below(feet + Vec3::Y * tolerance, tolerance * 2.0)
            .is_some()
    }

    pub fn is_grounded_default(query: &SpatialQuery<'_>, feet: Vec3) -> bool {
        Self::is_grounded(query, feet, GROUND_TOLERANCE)
    }

    /// Respawn an entity that fell below the kill height; `None` while it is
    /// still above it
    pub fn recover_fall(
        query: &SpatialQuery<'_>,
        feet: Vec3,
        candidates: &[Vec2],
        settings: &SpawnSettings,
    ) -> Option<SpawnPoint> {
        if feet.y >= settings.kill_height {
            return None;
        }
        log::warn!("[SpawnFinder] Entity fell to y={:.2}, respawning", feet.y);
        Some(Self::find_spawn(query, candidates, settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::aabb::create_aabb;
    use crate::physics::{ColliderRegistry, CollisionPrimitive, SurfaceKind};

    fn registry_with_floor() -> ColliderRegistry {
        let mut registry = ColliderRegistry::new();
        registry.add(CollisionPrimitive::static_surface(
            create_aabb(Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 0.0, 10.0)),
            SurfaceKind::Floor,
        ));
        registry
    }

    #[test]
    fn test_spawn_skips_candidates_without_floor() {
        let registry = registry_with_floor();
        let query = SpatialQuery::new(&registry);

        let candidates = [Vec2::new(50.0, 50.0), Vec2::new(5.0, 5.0)];
        let spawn = SpawnFinder::find_spawn(&query, &candidates, &SpawnSettings::default());
        assert!(spawn.grounded);
        assert_eq!(spawn.candidate, Some(1));
        assert_eq!(spawn.position, Vec3::new(5.0, 0.0, 5.0));
    }

    #[test]
    fn test_spawn_skips_blocked_candidate() {
        let mut registry = registry_with_floor();
        registry.add(CollisionPrimitive::static_surface(
            create_aabb(Vec3::new(1.0, 0.0, 1.0), Vec3::new(3.0, 4.0, 3.0)),
            SurfaceKind::Wall,
        ));
        let query = SpatialQuery::new(&registry);

        let candidates = [Vec2::new(2.0, 2.0), Vec2::new(8.0, 8.0)];
        let spawn = SpawnFinder::find_spawn(&query, &candidates, &SpawnSettings::default());
        assert_eq!(spawn.candidate, Some(1));
    }

    #[test]
    fn test_fallback_is_elevated() {
        let registry = ColliderRegistry::new();
        let query = SpatialQuery::new(&registry);
        let settings = SpawnSettings::default();

        let spawn = SpawnFinder::find_spawn(&query, &[Vec2::new(3.0, 4.0)], &settings);
        assert!(!spawn.grounded);
        assert_eq!(spawn.position, Vec3::new(3.0, settings.fallback_height, 4.0));

        let nowhere = SpawnFinder::find_spawn(&query, &[], &settings);
        assert_eq!(nowhere.position, Vec3::new(0.0, settings.fallback_height, 0.0));
    }

    #[test]
    fn test_grounded_within_tolerance() {
        let registry = registry_with_floor();
        let query = SpatialQuery::new(&registry);

        assert!(SpawnFinder::is_grounded(&query, Vec3::new(5.0, 0.0, 5.0), 0.1));
        assert!(SpawnFinder::is_grounded(&query, Vec3::new(5.0, 0.05, 5.0), 0.1));
        assert!(SpawnFinder::is_grounded_default(&query, Vec3::new(5.0, -0.05, 5.0)));
        assert!(!SpawnFinder::is_grounded(&query, Vec3::new(5.0, 1.0, 5.0), 0.1));
        assert!(!SpawnFinder::is_grounded(&query, Vec3::new(15.0, 0.0, 5.0), 0.1));
    }

    #[test]
    fn test_recover_fall_only_below_kill_height() {
        let registry = registry_with_floor();
        let query = SpatialQuery::new(&registry);
        let settings = SpawnSettings::default();
        let candidates = [Vec2::new(5.0, 5.0)];

        assert!(SpawnFinder::recover_fall(&query, Vec3::new(5.0, -2.0, 5.0), &candidates, &settings).is_none());

        let respawn = SpawnFinder::recover_fall(&query, Vec3::new(5.0, -30.0, 5.0), &candidates, &settings).unwrap();
        assert!(respawn.grounded);
        assert_eq!(respawn.position.y, 0.0);
    }
}
