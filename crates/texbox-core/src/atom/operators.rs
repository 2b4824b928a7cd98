//! Big operators and over/under delimiters.

use super::basic::glyph_box;
use super::scripts::attach_scripts;
use super::{Atom, AtomRef, AtomType, create_opt};
use crate::boxes::{HBox, PREC, ScaleBox, StrutBox, TexBox, VBox};
use crate::env::{Env, MathStyle};
use crate::layout::HAlign;
use crate::units::Dimen;

/// Widen `b` to `max_width`, centered, unless it is already that wide.
pub fn change_width(b: TexBox, max_width: f32) -> TexBox {
    if (max_width - b.width()).abs() > PREC {
        HBox::aligned(b, max_width, HAlign::Center).into()
    } else {
        b
    }
}

/// Shift `b` so its vertical center sits on the math axis.
pub(crate) fn center_on_axis(mut b: TexBox, env: &Env) -> TexBox {
    let shift = (b.height() - b.depth()) / 2.0 - env.axis_height();
    b.set_shift(shift);
    HBox::with(b).into()
}

fn strut_height(h: f32) -> TexBox {
    StrutBox::new(0.0, h, 0.0, 0.0).into()
}

fn widest<'a>(boxes: impl IntoIterator<Item = &'a TexBox>) -> f32 {
    boxes.into_iter().map(TexBox::width).fold(0.0, f32::max)
}

// ---------------------------------------------------------------------------
// BigOperatorAtom
// ---------------------------------------------------------------------------

/// `\sum`, `\int` and friends with optional limits.
#[derive(Debug, Clone)]
pub struct BigOperatorAtom {
    pub base: Option<AtomRef>,
    pub under: Option<AtomRef>,
    pub over: Option<AtomRef>,
    limits: bool,
    limits_set: bool,
}

impl BigOperatorAtom {
    /// Limits placement follows the style: stacked in display style,
    /// attached as scripts otherwise.
    pub fn new(base: Option<AtomRef>, under: Option<AtomRef>, over: Option<AtomRef>) -> Self {
        Self {
            base,
            under,
            over,
            limits: false,
            limits_set: false,
        }
    }

    /// Explicit `\limits` (`true`) or `\nolimits` (`false`).
    pub fn with_limits(
        base: Option<AtomRef>,
        under: Option<AtomRef>,
        over: Option<AtomRef>,
        limits: bool,
    ) -> Self {
        Self {
            base,
            under,
            over,
            limits,
            limits_set: true,
        }
    }

    pub fn uses_limits(&self, style: MathStyle) -> bool {
        if self.limits_set {
            self.limits
        } else {
            style.is_display()
        }
    }

    fn operator_box(&self, env: &mut Env) -> TexBox {
        match self.base.as_deref() {
            Some(Atom::Char(c)) if c.atom_type() == AtomType::BigOperator => {
                let b = glyph_box(c.ch, env, env.style().is_display());
                center_on_axis(b, env)
            },
            other => create_opt(other, env),
        }
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        let style = env.style();
        let op = self.operator_box(env);
        if !self.uses_limits(style) || (self.under.is_none() && self.over.is_none()) {
            let symbol = matches!(self.base.as_deref(), Some(Atom::Char(_)));
            return attach_scripts(
                op,
                symbol,
                self.under.as_deref(),
                self.over.as_deref(),
                HAlign::Left,
                env,
            )
            .tagged(AtomType::BigOperator);
        }

        let over = self
            .over
            .as_deref()
            .map(|a| env.with_style(style.sup_style(), |e| a.create_box(e)));
        let under = self
            .under
            .as_deref()
            .map(|a| env.with_style(style.sub_style(), |e| a.create_box(e)));
        let max_width = widest([Some(&op), over.as_ref(), under.as_ref()].into_iter().flatten());

        let spacing5 = env.constant(|c| c.big_op_spacing5);
        let mut vbox = VBox::new();
        let mut height = 0.0;
        if let Some(over) = over {
            let over = change_width(over, max_width);
            let kern = env
                .constant(|c| c.big_op_spacing1)
                .max(env.constant(|c| c.big_op_spacing3) - over.depth());
            height += spacing5 + over.height() + over.depth() + kern;
            vbox.add(strut_height(spacing5));
            vbox.add(over);
            vbox.add(strut_height(kern));
        }
        let op = change_width(op, max_width);
        height += op.height();
        vbox.add(op);
        if let Some(under) = under {
            let under = change_width(under, max_width);
            let kern = env
                .constant(|c| c.big_op_spacing2)
                .max(env.constant(|c| c.big_op_spacing4) - under.height());
            vbox.add(strut_height(kern));
            vbox.add(under);
            vbox.add(strut_height(spacing5));
        }
        vbox.set_height(height);
        TexBox::from(vbox).tagged(AtomType::BigOperator)
    }
}

// ---------------------------------------------------------------------------
// OverUnderDelimiter
// ---------------------------------------------------------------------------

/// Over-brace.
pub const OVER_BRACE: char = '\u{23de}';
/// Under-brace.
pub const UNDER_BRACE: char = '\u{23df}';

/// A base with a horizontally stretched delimiter above or below it and an
/// optional script beyond the delimiter.
#[derive(Debug, Clone)]
pub struct OverUnderDelimiter {
    pub base: Option<AtomRef>,
    pub script: Option<AtomRef>,
    pub delimiter: char,
    /// Space between the delimiter and the script.
    pub kern: Dimen,
    pub over: bool,
}

impl OverUnderDelimiter {
    pub fn new(
        base: Option<AtomRef>,
        script: Option<AtomRef>,
        delimiter: char,
        kern: Dimen,
        over: bool,
    ) -> Self {
        Self {
            base,
            script,
            delimiter,
            kern,
            over,
        }
    }

    /// `\overbrace{base}^{script}`
    pub fn over_brace(base: Option<AtomRef>, script: Option<AtomRef>) -> Self {
        Self::new(base, script, OVER_BRACE, Dimen::ZERO, true)
    }

    /// `\underbrace{base}_{script}`
    pub fn under_brace(base: Option<AtomRef>, script: Option<AtomRef>) -> Self {
        Self::new(base, script, UNDER_BRACE, Dimen::ZERO, false)
    }

    /// Governing width of the three parts.
    pub fn max_width(base: &TexBox, delimiter: &TexBox, script: Option<&TexBox>) -> f32 {
        widest([Some(base), Some(delimiter), script].into_iter().flatten())
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        let style = env.style();
        let base = create_opt(self.base.as_deref(), env);
        let script_style = if self.over {
            style.sup_style()
        } else {
            style.sub_style()
        };
        let script = self
            .script
            .as_deref()
            .map(|a| env.with_style(script_style, |e| a.create_box(e)));
        let kern = self.kern.to_units(env);
        let gap = env.rule_thickness();
        let delimiter = stretch_glyph(self.delimiter, base.width(), env);

        let max = Self::max_width(&base, &delimiter, script.as_ref());
        let base = change_width(base, max);
        let delimiter = change_width(delimiter, max);
        let script = script.map(|s| change_width(s, max));

        let mut vbox = VBox::new();
        if self.over {
            let base_depth = base.depth();
            if let Some(script) = script {
                vbox.add(script);
                vbox.add(strut_height(kern));
            }
            vbox.add(delimiter);
            vbox.add(strut_height(gap));
            vbox.add(base);
            vbox.set_depth(base_depth);
        } else {
            vbox.add(base);
            vbox.add(strut_height(gap));
            vbox.add(delimiter);
            if let Some(script) = script {
                vbox.add(strut_height(kern));
                vbox.add(script);
            }
        }
        vbox.into()
    }
}

/// A glyph scaled horizontally to `width`.
fn stretch_glyph(ch: char, width: f32, env: &Env) -> TexBox {
    let glyph = glyph_box(ch, env, false);
    if glyph.width() <= 0.0 || width <= 0.0 {
        return glyph;
    }
    let sx = width / glyph.width();
    ScaleBox::new(glyph, sx, 1.0).into()
}
