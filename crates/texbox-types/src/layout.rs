//! Alignment and insets shared by boxes and renders.

use serde::{Deserialize, Serialize};

/// Padding around a rendered formula, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insets {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Insets {
    /// Zero padding on all sides.
    pub const ZERO: Self = Self::uniform(0);

    /// Create uniform padding on all sides.
    pub const fn uniform(p: i32) -> Self {
        Self {
            top: p,
            bottom: p,
            left: p,
            right: p,
        }
    }

    /// Create insets with individual side values.
    pub const fn new(top: i32, bottom: i32, left: i32, right: i32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Grow every side by `p`.
    pub const fn grown(self, p: i32) -> Self {
        Self {
            top: self.top + p,
            bottom: self.bottom + p,
            left: self.left + p,
            right: self.right + p,
        }
    }

    /// Total horizontal padding (left + right).
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical padding (top + bottom).
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Offset of a child of extent `child` inside `container` for `align`.
///
/// Unlike pixel layout, a child larger than its container is allowed to
/// hang over, so the result may be negative.
pub fn align_offset(container: f32, child: f32, align: HAlign) -> f32 {
    match align {
        HAlign::Left => 0.0,
        HAlign::Center => (container - child) / 2.0,
        HAlign::Right => container - child,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn insets_totals() {
        let i = Insets::new(1, 2, 3, 4);
        assert_eq!(i.horizontal(), 7);
        assert_eq!(i.vertical(), 3);
    }

    #[test]
    fn insets_grown() {
        assert_eq!(Insets::ZERO.grown(3), Insets::uniform(3));
    }

    #[test]
    fn align_offsets() {
        assert_eq!(align_offset(100.0, 20.0, HAlign::Left), 0.0);
        assert_eq!(align_offset(100.0, 20.0, HAlign::Center), 40.0);
        assert_eq!(align_offset(100.0, 20.0, HAlign::Right), 80.0);
        assert_eq!(align_offset(10.0, 20.0, HAlign::Center), -5.0);
    }

    #[test]
    fn align_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            align: HAlign,
        }
        let w: Wrapper = toml::from_str("align = \"right\"").unwrap();
        assert_eq!(w.align, HAlign::Right);
    }

    proptest! {
        #[test]
        fn offset_keeps_child_inside(container in 0.0f32..500.0, frac in 0.0f32..=1.0) {
            let child = container * frac;
            for align in [HAlign::Left, HAlign::Center, HAlign::Right] {
                let x = align_offset(container, child, align);
                prop_assert!(x >= 0.0, "{align:?} at {x}");
                prop_assert!(x + child <= container + 1e-3, "{align:?} at {x}");
            }
        }
    }
}
