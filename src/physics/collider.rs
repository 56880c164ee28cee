//! Collision primitives stored in the registry

use glam::Vec3;

use super::aabb::{self, AABB};

/// Gameplay tag on a dynamic collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Enemy,
    /// Pickup carrying an amount (health, ammo...)
    Pickup(u32),
    Door,
    Key,
}

impl Tag {
    /// Triggers are reported by overlap queries but never block movement
    pub fn is_trigger(self) -> bool {
        matches!(self, Tag::Pickup(_) | Tag::Key)
    }
}

/// Small set of tags; colliders rarely carry more than one or two
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<Tag>);

impl TagSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with(mut self, tag: Tag) -> Self {
        self.insert(tag);
        self
    }

    pub fn insert(&mut self, tag: Tag) {
        if !self.0.contains(&tag) {
            self.0.push(tag);
        }
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.0.contains(&tag)
    }

    pub fn has_enemy(&self) -> bool {
        self.contains(Tag::Enemy)
    }

    pub fn has_trigger(&self) -> bool {
        self.0.iter().any(|t| t.is_trigger())
    }

    /// Amount of the first pickup tag, if any
    pub fn pickup_amount(&self) -> Option<u32> {
        self.0.iter().find_map(|t| match t {
            Tag::Pickup(amount) => Some(*amount),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }
}

/// Role of a static level surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Floor,
    Wall,
    Ceiling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Aabb(AABB),
    /// Vertical cylinder, `center` at mid-height
    Cylinder { center: Vec3, radius: f32, height: f32 },
}

impl ColliderShape {
    /// Bottom and top of the shape
    pub fn vertical_range(&self) -> (f32, f32) {
        match self {
            ColliderShape::Aabb(b) => (b.min.y, b.max.y),
            ColliderShape::Cylinder { center, height, .. } => {
                (center.y - height * 0.5, center.y + height * 0.5)
            }
        }
    }

    pub fn spans_height(&self, y: f32) -> bool {
        let (bottom, top) = self.vertical_range();
        y >= bottom && y <= top
    }

    /// Enclosing box
    pub fn bounds(&self) -> AABB {
        match self {
            ColliderShape::Aabb(b) => *b,
            ColliderShape::Cylinder { center, radius, height } => aabb::aabb_from_center_half_extents(
                *center,
                Vec3::new(*radius, height * 0.5, *radius),
            ),
        }
    }
}

/// One collider: shape plus either gameplay tags or a surface kind
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionPrimitive {
    pub shape: ColliderShape,
    pub tags: TagSet,
    pub surface: Option<SurfaceKind>,
}

impl CollisionPrimitive {
    /// Static level surface
    pub fn static_surface(bounds: AABB, kind: SurfaceKind) -> Self {
        Self {
            shape: ColliderShape::Aabb(bounds),
            tags: TagSet::new(),
            surface: Some(kind),
        }
    }

    /// Tagged vertical cylinder, e.g. an enemy or a pickup
    pub fn cylinder(center: Vec3, radius: f32, height: f32, tags: TagSet) -> Self {
        Self {
            shape: ColliderShape::Cylinder { center, radius, height },
            tags,
            surface: None,
        }
    }

    pub fn is_trigger(&self) -> bool {
        self.tags.has_trigger()
    }

    pub fn is_floor(&self) -> bool {
        self.surface == Some(SurfaceKind::Floor)
    }

    pub fn bounds(&self) -> AABB {
        self.shape.bounds()
    }
}
