//! Physics categories and the mask table per entity kind

use crate::components::EntityKind;
use bitflags::bitflags;

bitflags! {
    /// Physics category of a body
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Category: u32 {
        /// The player's ship
        const SHIP = 1 << 0;
        /// Falling debris
        const DEBRIS = 1 << 1;
        /// Screen boundary
        const EDGE = 1 << 2;
    }
}

/// Category, collision and contact masks of one kind of body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Masks {
    /// Groups the body belongs to
    pub category: Category,
    /// Categories that push the body
    pub collision: Category,
    /// Categories that produce contact events
    pub contact: Category,
}

impl Masks {
    /// Masks for an entity kind; decorative effects have no body
    pub fn for_kind(kind: EntityKind) -> Option<Self> {
        match kind {
            EntityKind::Ship => Some(Self {
                category: Category::SHIP,
                collision: Category::DEBRIS | Category::EDGE,
                contact: Category::DEBRIS,
            }),
            EntityKind::Debris => Some(Self {
                category: Category::DEBRIS,
                collision: Category::SHIP | Category::DEBRIS,
                contact: Category::SHIP | Category::DEBRIS,
            }),
            EntityKind::Edge => Some(Self {
                category: Category::EDGE,
                collision: Category::SHIP,
                contact: Category::empty(),
            }),
            EntityKind::Effect => None,
        }
    }
}
