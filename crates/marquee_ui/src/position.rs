//! Menu positioning
//!
//! Pure geometry for floating menu surfaces. Given the anchor's on-screen
//! bounds, the menu's natural size, and the viewport, [`position_menu`]
//! decides whether the menu drops below the anchor or flips above it, where
//! its top-left corner lands, and how tall it may grow before it must
//! scroll internally.
//!
//! The decision is deliberately simple and recomputed from scratch on every
//! open: downward placement wins whenever the space below the anchor can
//! hold a usable menu, or is at least as large as the space above.

use marquee_core::geometry::{Rect, Size};

/// Space below the anchor that always qualifies as "usable" for a
/// downward menu, regardless of how much room there is above.
pub const MIN_USABLE_MENU_HEIGHT: f32 = 200.0;

/// Breathing room kept between the menu edge and the viewport edge when
/// capping menu height.
pub const MENU_VIEWPORT_MARGIN: f32 = 10.0;

/// Vertical gap between the anchor and the menu surface.
pub const MENU_ANCHOR_GAP: f32 = 4.0;

/// Horizontal alignment of the menu relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuAlign {
    /// Left edges line up.
    #[default]
    Left,
    /// Centers line up.
    Center,
}

/// Where a menu goes, and how tall it may be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPlacement {
    /// Left edge of the menu, viewport coordinates.
    pub x: f32,
    /// Top edge of the menu, viewport coordinates.
    pub y: f32,
    /// True when the menu opens below the anchor, false when it flips above.
    pub is_downward: bool,
    /// Height cap when the caller asked for one; the menu scrolls
    /// internally past this. `None` means the natural height stands.
    pub max_height: Option<f32>,
}

impl Default for MenuPlacement {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            is_downward: true,
            max_height: None,
        }
    }
}

/// Computes menu placement relative to an anchor.
///
/// `menu` is the natural (unconstrained) size the menu wants. When
/// `set_max_height` is true the placement caps the menu to the chosen
/// side's available space, less the anchor gap and viewport margin; the
/// cap never exceeds the natural height and never goes below zero. The
/// upward y-coordinate accounts for the capped height so the menu's
/// bottom edge stays against the anchor.
pub fn position_menu(
    anchor: Rect,
    menu: Size,
    viewport: Size,
    align: MenuAlign,
    set_max_height: bool,
) -> MenuPlacement {
    let space_below = anchor.space_below(viewport);
    let space_above = anchor.space_above();

    // Ties go downward.
    let is_downward = space_below >= MIN_USABLE_MENU_HEIGHT || space_below >= space_above;

    let available = if is_downward { space_below } else { space_above };
    let capped_height = menu
        .height
        .min((available - MENU_ANCHOR_GAP - MENU_VIEWPORT_MARGIN).max(0.0));

    let effective_height = if set_max_height {
        capped_height
    } else {
        menu.height
    };

    let x = match align {
        MenuAlign::Left => anchor.x(),
        MenuAlign::Center => anchor.x() + (anchor.width() - menu.width) / 2.0,
    };

    let y = if is_downward {
        anchor.bottom() + MENU_ANCHOR_GAP
    } else {
        anchor.y() - MENU_ANCHOR_GAP - effective_height
    };

    MenuPlacement {
        x,
        y,
        is_downward,
        max_height: set_max_height.then_some(capped_height),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn test_downward_with_ample_space() {
        let anchor = Rect::new(100.0, 50.0, 120.0, 32.0);
        let menu = Size::new(200.0, 150.0);

        let placement = position_menu(anchor, menu, VIEWPORT, MenuAlign::Left, true);
        assert!(placement.is_downward);
        assert_eq!(placement.x, 100.0);
        assert_eq!(placement.y, 86.0); // 50 + 32 + 4
        // 518 below, far more than the menu wants.
        assert_eq!(placement.max_height, Some(150.0));
    }

    #[test]
    fn test_flips_upward_when_below_is_cramped() {
        // bottom = 540 leaves 60 below; 500 above wins.
        let anchor = Rect::new(100.0, 500.0, 120.0, 40.0);
        let menu = Size::new(200.0, 300.0);

        let placement = position_menu(anchor, menu, VIEWPORT, MenuAlign::Left, false);
        assert!(!placement.is_downward);
        assert_eq!(placement.y, 196.0); // 500 - 4 - 300
        assert_eq!(placement.max_height, None);
    }

    #[test]
    fn test_upward_cap_pulls_top_edge_down() {
        // 160 below, 400 above: flips up, and a 500-tall menu gets capped.
        let anchor = Rect::new(100.0, 400.0, 120.0, 40.0);
        let menu = Size::new(200.0, 500.0);

        let placement = position_menu(anchor, menu, VIEWPORT, MenuAlign::Left, true);
        assert!(!placement.is_downward);
        assert_eq!(placement.max_height, Some(386.0)); // 400 - 4 - 10
        assert_eq!(placement.y, 10.0); // 400 - 4 - 386
    }

    #[test]
    fn test_tie_goes_downward() {
        // 184 above, 184 below, both under the usable minimum.
        let viewport = Size::new(800.0, 400.0);
        let anchor = Rect::new(0.0, 184.0, 100.0, 32.0);
        let menu = Size::new(100.0, 400.0);

        let placement = position_menu(anchor, menu, viewport, MenuAlign::Left, false);
        assert!(placement.is_downward);
    }

    #[test]
    fn test_usable_space_below_beats_larger_space_above() {
        // 250 below is enough for a usable menu even though 330 above is larger.
        let anchor = Rect::new(0.0, 330.0, 100.0, 20.0);
        let menu = Size::new(100.0, 400.0);

        let placement = position_menu(anchor, menu, VIEWPORT, MenuAlign::Left, false);
        assert!(placement.is_downward);
    }

    #[test]
    fn test_center_alignment() {
        let anchor = Rect::new(100.0, 50.0, 120.0, 32.0);

        let wide = position_menu(
            anchor,
            Size::new(200.0, 100.0),
            VIEWPORT,
            MenuAlign::Center,
            false,
        );
        assert_eq!(wide.x, 60.0); // 100 + (120 - 200) / 2

        let narrow = position_menu(
            anchor,
            Size::new(80.0, 100.0),
            VIEWPORT,
            MenuAlign::Center,
            false,
        );
        assert_eq!(narrow.x, 120.0); // 100 + (120 - 80) / 2
    }

    #[test]
    fn test_cap_never_exceeds_natural_height() {
        let anchor = Rect::new(100.0, 50.0, 120.0, 32.0);
        let menu = Size::new(200.0, 90.0);

        let placement = position_menu(anchor, menu, VIEWPORT, MenuAlign::Left, true);
        assert_eq!(placement.max_height, Some(90.0));
    }

    #[test]
    fn test_cap_floors_at_zero_in_a_tiny_viewport() {
        let viewport = Size::new(100.0, 10.0);
        // Anchor pokes past the viewport bottom: negative space below.
        let anchor = Rect::new(0.0, 5.0, 50.0, 10.0);
        let menu = Size::new(80.0, 100.0);

        let placement = position_menu(anchor, menu, viewport, MenuAlign::Left, true);
        assert!(!placement.is_downward); // -5 below vs 5 above
        assert_eq!(placement.max_height, Some(0.0));
    }
}
