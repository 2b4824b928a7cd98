//! Horizontal and vertical groups.

use super::{Geometry, StrutBox, TexBox};
use crate::error::Result;
use crate::graphics::Graphics;
use crate::layout::{HAlign, VAlign, align_offset};

/// Children laid out left to right on a shared baseline.
#[derive(Debug, Clone, Default)]
pub struct HBox {
    pub(super) geometry: Geometry,
    pub(super) children: Vec<TexBox>,
}

impl HBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(child: TexBox) -> Self {
        let mut hbox = Self::new();
        hbox.add(child);
        hbox
    }

    pub fn from_children(children: impl IntoIterator<Item = TexBox>) -> Self {
        let mut hbox = Self::new();
        for child in children {
            hbox.add(child);
        }
        hbox
    }

    /// `b` padded with struts to `width` at `align`.
    ///
    /// A box already at least `width` wide, or an infinite `width`, gives a
    /// group holding just `b`.
    pub fn aligned(b: TexBox, width: f32, align: HAlign) -> Self {
        let rest = width - b.width();
        if !width.is_finite() || rest <= 0.0 {
            return Self::with(b);
        }
        let left = align_offset(width, b.width(), align);
        let pad = |w: f32| (w > 0.0).then(|| TexBox::from(StrutBox::new(w, 0.0, 0.0, 0.0)));
        Self::from_children(pad(left).into_iter().chain([b]).chain(pad(rest - left)))
    }

    /// Append `child`, folding it into the group geometry.
    pub fn add(&mut self, child: TexBox) {
        let g = &mut self.geometry;
        g.width += child.width();
        g.height = g.height.max(child.height() - child.shift());
        g.depth = g.depth.max(child.depth() + child.shift());
        self.children.push(child);
    }

    /// Report `height` above the baseline whatever the content.
    pub(crate) fn set_height(&mut self, height: f32) {
        self.geometry.height = height;
    }

    pub(crate) fn set_depth(&mut self, depth: f32) {
        self.geometry.depth = depth;
    }

    pub fn children(&self) -> &[TexBox] {
        &self.children
    }

    pub fn into_children(self) -> Vec<TexBox> {
        self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.geometry.width
    }

    pub(super) fn draw(&self, g: &mut dyn Graphics, x: f32, y: f32) -> Result<()> {
        let mut pos = x;
        for child in &self.children {
            child.draw(g, pos, y + child.shift())?;
            pos += child.width();
        }
        Ok(())
    }
}

/// Children stacked top to bottom.
///
/// The first child fixes the baseline. Inside a `VBox` a child's shift
/// moves it horizontally.
#[derive(Debug, Clone)]
pub struct VBox {
    pub(super) geometry: Geometry,
    pub(super) children: Vec<TexBox>,
    left_most: f32,
    right_most: f32,
}

impl Default for VBox {
    fn default() -> Self {
        Self {
            geometry: Geometry::ZERO,
            children: Vec::new(),
            left_most: f32::INFINITY,
            right_most: f32::NEG_INFINITY,
        }
    }
}

impl VBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_children(children: impl IntoIterator<Item = TexBox>) -> Self {
        let mut vbox = Self::new();
        for child in children {
            vbox.add(child);
        }
        vbox
    }

    /// `b` padded with struts so its total height grows by `rest`.
    pub fn aligned(b: TexBox, rest: f32, align: VAlign) -> Self {
        let mut vbox = Self::with_first(b);
        if rest <= 0.0 {
            return vbox;
        }
        let pad = |h: f32| TexBox::from(StrutBox::new(0.0, h, 0.0, 0.0));
        match align {
            VAlign::Top => vbox.add(pad(rest)),
            VAlign::Center => {
                vbox.children.insert(0, pad(rest / 2.0));
                vbox.geometry.height += rest / 2.0;
                vbox.add(pad(rest / 2.0));
            },
            VAlign::Bottom => {
                vbox.children.insert(0, pad(rest));
                vbox.geometry.height += rest;
            },
        }
        vbox
    }

    fn with_first(b: TexBox) -> Self {
        let mut vbox = Self::new();
        vbox.add(b);
        vbox
    }

    /// Append `child` below the current content.
    pub fn add(&mut self, child: TexBox) {
        let g = &mut self.geometry;
        if self.children.is_empty() {
            g.height = child.height();
            g.depth = child.depth();
        } else {
            g.depth += child.height() + child.depth();
        }
        self.left_most = self.left_most.min(child.shift());
        self.right_most = self
            .right_most
            .max(child.shift() + child.width().max(0.0));
        g.width = self.right_most - self.left_most;
        self.children.push(child);
    }

    /// Move the baseline: keep the total extent, report `height` above it.
    pub(crate) fn set_height(&mut self, height: f32) {
        let total = self.geometry.height + self.geometry.depth;
        self.geometry.height = height;
        self.geometry.depth = total - height;
    }

    /// Move the baseline so that `depth` remains below it.
    pub(crate) fn set_depth(&mut self, depth: f32) {
        let total = self.geometry.height + self.geometry.depth;
        self.geometry.height = total - depth;
        self.geometry.depth = depth;
    }

    pub fn children(&self) -> &[TexBox] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(super) fn draw(&self, g: &mut dyn Graphics, x: f32, y: f32) -> Result<()> {
        let left = if self.left_most.is_finite() {
            self.left_most
        } else {
            0.0
        };
        let mut pos = y - self.geometry.height;
        for child in &self.children {
            pos += child.height();
            child.draw(g, x + child.shift() - left, pos)?;
            pos += child.depth();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::Recorder;
    use crate::test_utils::{block, glyph};
    use proptest::prelude::*;

    #[test]
    fn hbox_folds_children() {
        let mut lowered = block(2.0, 3.0, 1.0);
        lowered.set_shift(1.0);
        let hbox = HBox::from_children([block(4.0, 5.0, 0.0), lowered]);
        assert_eq!(hbox.geometry.width, 6.0);
        assert_eq!(hbox.geometry.height, 5.0);
        assert_eq!(hbox.geometry.depth, 2.0);
    }

    #[test]
    fn empty_hbox_is_zero() {
        let hbox = HBox::new();
        assert_eq!(hbox.geometry, Geometry::ZERO);
        assert!(hbox.is_empty());
    }

    #[test]
    fn aligned_pads_only_when_narrower() {
        let centered = HBox::aligned(block(4.0, 1.0, 0.0), 10.0, HAlign::Center);
        assert_eq!(centered.len(), 3);
        assert_eq!(centered.width(), 10.0);
        assert_eq!(centered.children()[0].width(), 3.0);

        let right = HBox::aligned(block(4.0, 1.0, 0.0), 10.0, HAlign::Right);
        assert_eq!(right.children()[0].width(), 6.0);

        let wide = HBox::aligned(block(12.0, 1.0, 0.0), 10.0, HAlign::Left);
        assert_eq!(wide.len(), 1);
        assert_eq!(wide.width(), 12.0);

        let unbounded = HBox::aligned(block(4.0, 1.0, 0.0), f32::INFINITY, HAlign::Left);
        assert_eq!(unbounded.width(), 4.0);
    }

    #[test]
    fn vbox_first_child_sets_baseline() {
        let vbox = VBox::from_children([block(3.0, 2.0, 1.0), block(5.0, 4.0, 0.5)]);
        assert_eq!(vbox.geometry.height, 2.0);
        assert_eq!(vbox.geometry.depth, 5.5);
        assert_eq!(vbox.geometry.width, 5.0);
    }

    #[test]
    fn vbox_shift_is_horizontal() {
        let mut moved = block(3.0, 1.0, 0.0);
        moved.set_shift(-2.0);
        let vbox = VBox::from_children([block(3.0, 1.0, 0.0), moved]);
        assert_eq!(vbox.geometry.width, 5.0);
        assert_eq!(vbox.geometry.height, 1.0);
        assert_eq!(vbox.geometry.depth, 1.0);
    }

    #[test]
    fn vbox_aligned_keeps_content_baseline() {
        let top = VBox::aligned(block(2.0, 3.0, 1.0), 4.0, VAlign::Top);
        assert_eq!((top.geometry.height, top.geometry.depth), (3.0, 5.0));
        let bottom = VBox::aligned(block(2.0, 3.0, 1.0), 4.0, VAlign::Bottom);
        assert_eq!((bottom.geometry.height, bottom.geometry.depth), (7.0, 1.0));
        let center = VBox::aligned(block(2.0, 3.0, 1.0), 4.0, VAlign::Center);
        assert_eq!((center.geometry.height, center.geometry.depth), (5.0, 3.0));
    }

    #[test]
    fn set_height_moves_baseline() {
        let mut vbox = VBox::from_children([block(1.0, 2.0, 0.0), block(1.0, 3.0, 1.0)]);
        vbox.set_height(5.0);
        assert_eq!(vbox.geometry.height, 5.0);
        assert_eq!(vbox.geometry.depth, 1.0);
        vbox.set_depth(3.0);
        assert_eq!(vbox.geometry.height, 3.0);
    }

    #[test]
    fn hbox_draws_children_left_to_right() {
        let mut lowered = glyph('b');
        lowered.set_shift(2.0);
        let a = glyph('a');
        let a_width = a.width();
        let hbox = HBox::from_children([a, lowered]);
        let mut g = Recorder::new();
        hbox.draw(&mut g, 10.0, 20.0).unwrap();
        let positions: Vec<(f32, f32)> = g
            .commands
            .iter()
            .filter_map(|c| match c {
                crate::graphics::DrawCommand::Glyph { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(positions, vec![(10.0, 20.0), (10.0 + a_width, 22.0)]);
    }

    #[test]
    fn vbox_draws_rows_downward() {
        let first = glyph('x');
        let (h1, d1) = (first.height(), first.depth());
        let second = glyph('y');
        let h2 = second.height();
        let vbox = VBox::from_children([first, second]);
        let mut g = Recorder::new();
        vbox.draw(&mut g, 0.0, 50.0).unwrap();
        let ys: Vec<f32> = g
            .commands
            .iter()
            .filter_map(|c| match c {
                crate::graphics::DrawCommand::Glyph { y, .. } => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(ys.len(), 2);
        assert!((ys[0] - 50.0).abs() < 1e-4);
        assert!((ys[1] - (50.0 + d1 + h2)).abs() < 1e-4);
        assert!(h1 > 0.0);
    }

    proptest! {
        #[test]
        fn hbox_width_is_sum(widths in prop::collection::vec(0.0f32..50.0, 0..20)) {
            let hbox = HBox::from_children(widths.iter().map(|&w| block(w, 1.0, 0.5)));
            let sum: f32 = widths.iter().sum();
            prop_assert!((hbox.width() - sum).abs() < 1e-2);
            prop_assert!(hbox.geometry.height >= 0.0);
            prop_assert!(hbox.geometry.depth >= 0.0);
        }

        #[test]
        fn vbox_total_is_sum(
            rows in prop::collection::vec((0.0f32..20.0, 0.0f32..20.0), 1..12),
        ) {
            let vbox = VBox::from_children(rows.iter().map(|&(h, d)| block(1.0, h, d)));
            let total: f32 = rows.iter().map(|(h, d)| h + d).sum();
            prop_assert!((vbox.geometry.height + vbox.geometry.depth - total).abs() < 1e-2);
            prop_assert_eq!(vbox.geometry.height, rows[0].0);
        }
    }
}
