//! Atoms that move, resize or overlay their base.

use super::operators::center_on_axis;
use super::{AtomRef, create_opt};
use crate::boxes::{HBox, RuleBox, ScaleBox, StrutBox, TexBox};
use crate::env::Env;
use crate::units::Dimen;

/// Base scaled by `(sx, sy)`.
#[derive(Debug, Clone)]
pub struct ScaleAtom {
    pub base: Option<AtomRef>,
    pub sx: f32,
    pub sy: f32,
}

impl ScaleAtom {
    pub fn new(base: Option<AtomRef>, sx: f32, sy: f32) -> Self {
        Self { base, sx, sy }
    }

    pub fn uniform(base: Option<AtomRef>, factor: f32) -> Self {
        Self::new(base, factor, factor)
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        let b = create_opt(self.base.as_deref(), env);
        ScaleBox::new(b, self.sx, self.sy).into()
    }
}

/// Base mirrored left to right.
#[derive(Debug, Clone, Default)]
pub struct ReflectAtom {
    pub base: Option<AtomRef>,
}

impl ReflectAtom {
    pub fn new(base: Option<AtomRef>) -> Self {
        Self { base }
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        ScaleBox::new(create_opt(self.base.as_deref(), env), -1.0, 1.0).into()
    }
}

/// Base scaled to a target width and/or height.
#[derive(Debug, Clone)]
pub struct ResizeAtom {
    pub base: Option<AtomRef>,
    pub width: Option<Dimen>,
    pub height: Option<Dimen>,
    pub keep_aspect_ratio: bool,
}

impl ResizeAtom {
    pub fn new(
        base: Option<AtomRef>,
        width: Option<Dimen>,
        height: Option<Dimen>,
        keep_aspect_ratio: bool,
    ) -> Self {
        Self {
            base,
            width,
            height,
            keep_aspect_ratio,
        }
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        let b = create_opt(self.base.as_deref(), env);
        let ratio = |target: Dimen, actual: f32| {
            if actual == 0.0 {
                None
            } else {
                Some(target.to_units(env) / actual)
            }
        };
        let sx = self.width.and_then(|w| ratio(w, b.width()));
        let sy = self.height.and_then(|h| ratio(h, b.height()));
        let (sx, sy) = match (sx, sy) {
            (Some(sx), Some(sy)) if self.keep_aspect_ratio => (sx.min(sy), sx.min(sy)),
            (Some(sx), Some(sy)) => (sx, sy),
            (Some(s), None) | (None, Some(s)) => (s, s),
            (None, None) => return b,
        };
        ScaleBox::new(b, sx, sy).into()
    }
}

/// Base raised by `raise`, optionally reporting a different height/depth.
#[derive(Debug, Clone)]
pub struct RaiseAtom {
    pub base: Option<AtomRef>,
    pub raise: Dimen,
    pub height: Option<Dimen>,
    pub depth: Option<Dimen>,
}

impl RaiseAtom {
    pub fn new(
        base: Option<AtomRef>,
        raise: Dimen,
        height: Option<Dimen>,
        depth: Option<Dimen>,
    ) -> Self {
        Self {
            base,
            raise,
            height,
            depth,
        }
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        let mut b = create_opt(self.base.as_deref(), env);
        b.set_shift(-self.raise.to_units(env));
        let mut hbox = HBox::with(b);
        if let Some(h) = self.height {
            hbox.set_height(h.to_units(env));
        }
        if let Some(d) = self.depth {
            hbox.set_depth(d.to_units(env));
        }
        hbox.into()
    }
}

/// Which way a lapped box hangs out of its zero-width slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lap {
    /// `\llap`: content extends to the left.
    Left,
    /// `\rlap`: content extends to the right.
    #[default]
    Right,
    /// `\clap`: content centered on the slot.
    Center,
}

/// Base in a zero-width box.
#[derive(Debug, Clone)]
pub struct LapedAtom {
    pub base: Option<AtomRef>,
    pub lap: Lap,
}

impl LapedAtom {
    pub fn new(base: Option<AtomRef>, lap: Lap) -> Self {
        Self { base, lap }
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        let b = create_opt(self.base.as_deref(), env);
        let w = b.width();
        let kern = |width: f32| TexBox::from(StrutBox::new(width, 0.0, 0.0, 0.0));
        let hbox = match self.lap {
            Lap::Left => HBox::from_children([kern(-w), b]),
            Lap::Right => HBox::from_children([b, kern(-w)]),
            Lap::Center => HBox::from_children([kern(-w / 2.0), b, kern(-w / 2.0)]),
        };
        hbox.into()
    }
}

/// Base vertically centered on the math axis.
#[derive(Debug, Clone, Default)]
pub struct VCenteredAtom {
    pub base: Option<AtomRef>,
}

impl VCenteredAtom {
    pub fn new(base: Option<AtomRef>) -> Self {
        Self { base }
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        let b = create_opt(self.base.as_deref(), env);
        center_on_axis(b, env)
    }
}

/// Base with a rule drawn across it at the math axis.
#[derive(Debug, Clone, Default)]
pub struct StrikeThroughAtom {
    pub base: Option<AtomRef>,
}

impl StrikeThroughAtom {
    pub fn new(base: Option<AtomRef>) -> Self {
        Self { base }
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        let b = create_opt(self.base.as_deref(), env);
        let w = b.width();
        let thickness = env.rule_thickness();
        let rule = RuleBox::new(thickness, w, -env.axis_height() + thickness / 2.0, None);
        HBox::from_children([b, StrutBox::new(-w, 0.0, 0.0, 0.0).into(), rule.into()]).into()
    }
}
