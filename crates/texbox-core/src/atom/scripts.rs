//! Sub- and superscripts.

use std::rc::Rc;

use super::basic::{PhantomAtom, PlaceholderAtom, RowAtom};
use super::{Atom, AtomRef, create_opt};
use crate::boxes::{HBox, StrutBox, TexBox, VBox};
use crate::env::Env;
use crate::layout::HAlign;

/// Attach scripts to an already built base box.
///
/// `symbol` marks a single-glyph base, whose scripts are positioned from
/// the font parameters alone rather than from the base's extent.
pub(crate) fn attach_scripts(
    base: TexBox,
    symbol: bool,
    sub: Option<&Atom>,
    sup: Option<&Atom>,
    align: HAlign,
    env: &mut Env,
) -> TexBox {
    if sub.is_none() && sup.is_none() {
        return base;
    }
    let style = env.style();
    let (sup_style, sub_style) = (style.sup_style(), style.sub_style());
    let (mut shift_up, mut shift_down) = if symbol {
        (0.0, 0.0)
    } else {
        (
            base.height() - env.constant_in(sup_style, |c| c.sup_drop),
            base.depth() + env.constant_in(sub_style, |c| c.sub_drop),
        )
    };
    let x_height = env.x_height();
    let gap = 4.0 * env.rule_thickness();
    let script_space = env.constant(|c| c.script_space);
    let sup_min = if style.is_display() && !style.is_cramped() {
        env.constant(|c| c.sup1)
    } else if style.is_cramped() {
        env.constant(|c| c.sup3)
    } else {
        env.constant(|c| c.sup2)
    };

    let sup = sup.map(|a| env.with_style(sup_style, |e| a.create_box(e)));
    let sub = sub.map(|a| env.with_style(sub_style, |e| a.create_box(e)));
    let width = sup
        .iter()
        .chain(sub.iter())
        .map(TexBox::width)
        .fold(0.0, f32::max);
    let pad = |b: TexBox| -> TexBox {
        let b = match align {
            HAlign::Right => HBox::aligned(b, width, HAlign::Right).into(),
            HAlign::Left | HAlign::Center => b,
        };
        HBox::from_children([b, StrutBox::new(script_space, 0.0, 0.0, 0.0).into()]).into()
    };

    let mut hbox = HBox::with(base);
    match (sup, sub) {
        (None, Some(sub)) => {
            shift_down = shift_down
                .max(env.constant(|c| c.sub1))
                .max(sub.height() - 0.8 * x_height);
            let mut sub = pad(sub);
            sub.set_shift(shift_down);
            hbox.add(sub);
        },
        (Some(sup), None) => {
            shift_up = shift_up.max(sup_min).max(sup.depth() + 0.25 * x_height);
            let mut sup = pad(sup);
            sup.set_shift(-shift_up);
            hbox.add(sup);
        },
        (Some(sup), Some(sub)) => {
            shift_up = shift_up.max(sup_min).max(sup.depth() + 0.25 * x_height);
            shift_down = shift_down.max(env.constant(|c| c.sub2));
            let clearance = (shift_up - sup.depth()) - (sub.height() - shift_down);
            if clearance < gap {
                shift_down += gap - clearance;
                let psi = 0.8 * x_height - (shift_up - sup.depth());
                if psi > 0.0 {
                    shift_up += psi;
                    shift_down -= psi;
                }
            }
            let kern = (shift_up - sup.depth()) - (sub.height() - shift_down);
            let sup_height = sup.height();
            let mut vbox = VBox::from_children([
                pad(sup),
                StrutBox::new(0.0, kern, 0.0, 0.0).into(),
                pad(sub),
            ]);
            vbox.set_height(shift_up + sup_height);
            hbox.add(vbox.into());
        },
        (None, None) => {},
    }
    hbox.into()
}

// ---------------------------------------------------------------------------
// ScriptsAtom
// ---------------------------------------------------------------------------

/// A base with an optional subscript and superscript.
#[derive(Debug, Clone, Default)]
pub struct ScriptsAtom {
    pub base: Option<AtomRef>,
    pub sub: Option<AtomRef>,
    pub sup: Option<AtomRef>,
    /// Alignment of the scripts against each other.
    pub align: HAlign,
}

impl ScriptsAtom {
    pub fn new(base: Option<AtomRef>, sub: Option<AtomRef>, sup: Option<AtomRef>) -> Self {
        Self {
            base,
            sub,
            sup,
            align: HAlign::Left,
        }
    }

    pub fn with_align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        let symbol = matches!(self.base.as_deref(), None | Some(Atom::Char(_)));
        let base = create_opt(self.base.as_deref(), env);
        attach_scripts(
            base,
            symbol,
            self.sub.as_deref(),
            self.sup.as_deref(),
            self.align,
            env,
        )
    }
}

// ---------------------------------------------------------------------------
// CumulativeScriptsAtom
// ---------------------------------------------------------------------------

/// Scripts accumulated over repeated attachments, as in `x_a^b_c^d`.
#[derive(Debug, Clone, Default)]
pub struct CumulativeScriptsAtom {
    base: Option<AtomRef>,
    sub: RowAtom,
    sup: RowAtom,
}

impl CumulativeScriptsAtom {
    /// Attach `sub` / `sup` to `base`.
    ///
    /// A base that already carries scripts is merged into rather than
    /// nested: its own base becomes the result's base and its scripts start
    /// the rows.
    pub fn attach(base: Option<AtomRef>, sub: Option<AtomRef>, sup: Option<AtomRef>) -> Self {
        let mergeable = matches!(
            base.as_deref(),
            Some(Atom::CumulativeScripts(_) | Atom::Scripts(_))
        );
        let mut acc = match base {
            Some(base) if mergeable => match Rc::unwrap_or_clone(base) {
                Atom::CumulativeScripts(acc) => acc,
                Atom::Scripts(s) => Self {
                    base: s.base,
                    sub: RowAtom::from_opt(s.sub),
                    sup: RowAtom::from_opt(s.sup),
                },
                other => Self {
                    base: Some(Rc::new(other)),
                    ..Self::default()
                },
            },
            base => Self {
                base,
                ..Self::default()
            },
        };
        acc.add_subscript(sub);
        acc.add_superscript(sup);
        acc
    }

    pub fn add_subscript(&mut self, sub: Option<AtomRef>) {
        if let Some(sub) = sub {
            self.sub.push(sub);
        }
    }

    pub fn add_superscript(&mut self, sup: Option<AtomRef>) {
        if let Some(sup) = sup {
            self.sup.push(sup);
        }
    }

    pub fn base(&self) -> Option<&Atom> {
        self.base.as_deref()
    }

    pub fn base_ref(&self) -> Option<&AtomRef> {
        self.base.as_ref()
    }

    pub fn subscripts(&self) -> &RowAtom {
        &self.sub
    }

    pub fn superscripts(&self) -> &RowAtom {
        &self.sup
    }

    /// The equivalent plain scripts atom over the accumulated rows.
    pub fn scripts_atom(&self) -> ScriptsAtom {
        let row = |r: &RowAtom| (!r.is_empty()).then(|| Rc::new(Atom::Row(r.clone())));
        ScriptsAtom::new(self.base.clone(), row(&self.sub), row(&self.sup))
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        self.scripts_atom().create_box(env)
    }
}

// ---------------------------------------------------------------------------
// SideSetsAtom
// ---------------------------------------------------------------------------

/// Scripts on both sides of a base, as in `\sideset{_a^b}{_c^d}\sum`.
#[derive(Debug, Clone, Default)]
pub struct SideSetsAtom {
    pub base: Option<AtomRef>,
    pub left: Option<AtomRef>,
    pub right: Option<AtomRef>,
}

impl SideSetsAtom {
    pub fn new(base: Option<AtomRef>, left: Option<AtomRef>, right: Option<AtomRef>) -> Self {
        Self { base, left, right }
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        let base = self.base.clone().unwrap_or_else(|| {
            let m = Rc::new(Atom::char('M'));
            Rc::new(PhantomAtom::new(Some(m), false, true, true).into())
        });
        let base_box = base.create_box(env);
        let placeholder: AtomRef = Rc::new(
            PlaceholderAtom::new(0.0, base_box.height(), base_box.depth(), base_box.shift()).into(),
        );

        let mut hbox = HBox::new();
        if let Some(left) = &self.left {
            hbox.add(side(left, &placeholder, Some(HAlign::Right), env));
        }
        hbox.add(base_box);
        if let Some(right) = &self.right {
            hbox.add(side(right, &placeholder, None, env));
        }
        hbox.into()
    }
}

/// A side of a side-set; base-less scripts hang on `placeholder`.
fn side(atom: &AtomRef, placeholder: &AtomRef, align: Option<HAlign>, env: &mut Env) -> TexBox {
    match atom.as_ref() {
        Atom::Scripts(s) if s.base.is_none() => {
            let mut scripts = s.clone();
            scripts.base = Some(Rc::clone(placeholder));
            if let Some(align) = align {
                scripts.align = align;
            }
            scripts.create_box(env)
        },
        other => other.create_box(env),
    }
}
