// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pointer input types shared by the viewer and the renderer.

use std::ops::BitOr;

/// Kind of pointer event reported by a display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEvent {
    /// Pointer moved.
    Move,
    /// Primary (left) button pressed.
    PrimaryDown,
    /// Primary (left) button released.
    PrimaryUp,
    /// Middle button pressed.
    MiddleDown,
    /// Middle button released.
    MiddleUp,
    /// Secondary (right) button pressed.
    SecondaryDown,
    /// Secondary (right) button released.
    SecondaryUp,
}

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Modifiers(pub u32);

impl Modifiers {
    /// No modifier held.
    pub const NONE: Self = Self(0);
    /// Shift held.
    pub const SHIFT: Self = Self(1);
    /// Control held.
    pub const CTRL: Self = Self(1 << 1);
    /// Alt held.
    pub const ALT: Self = Self(1 << 2);

    /// Check whether every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A pointer event at a position in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerInput {
    /// What happened.
    pub event: PointerEvent,
    /// Horizontal image coordinate.
    pub x: i32,
    /// Vertical image coordinate.
    pub y: i32,
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
}

/// Why the application is being told about a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectKind {
    /// Person picked for recognition (primary click).
    Recognition,
    /// Person picked for tracking (middle click).
    Tracking,
}

impl SelectKind {
    /// Selection triggered by `event`, if it triggers one at all.
    #[must_use]
    pub const fn from_event(event: PointerEvent) -> Option<Self> {
        match event {
            PointerEvent::PrimaryDown => Some(Self::Recognition),
            PointerEvent::MiddleDown => Some(Self::Tracking),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_flags() {
        let mods = Modifiers::SHIFT | Modifiers::ALT;
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(mods.contains(Modifiers::ALT));
        assert!(!mods.contains(Modifiers::CTRL));
        assert!(Modifiers::default().is_empty());
    }

    #[test]
    fn test_select_kind_from_event() {
        assert_eq!(
            SelectKind::from_event(PointerEvent::PrimaryDown),
            Some(SelectKind::Recognition)
        );
        assert_eq!(
            SelectKind::from_event(PointerEvent::MiddleDown),
            Some(SelectKind::Tracking)
        );
        assert_eq!(SelectKind::from_event(PointerEvent::SecondaryDown), None);
        assert_eq!(SelectKind::from_event(PointerEvent::PrimaryUp), None);
        assert_eq!(SelectKind::from_event(PointerEvent::Move), None);
    }
}
