//! Glyphs, spacing, rows and the simple box-producing atoms.

use std::rc::Rc;

use super::{Atom, AtomRef, AtomType};
use crate::boxes::{CharBox, ColorBox, GlueBox, HBox, RuleBox, StrutBox, TexBox, VBox};
use crate::color::Color;
use crate::env::{Env, MathStyle, font::is_big_operator};
use crate::formula::ColorRegistry;
use crate::units::Dimen;

// ---------------------------------------------------------------------------
// CharAtom
// ---------------------------------------------------------------------------

/// A single glyph from the current math font.
#[derive(Debug, Clone, PartialEq)]
pub struct CharAtom {
    pub ch: char,
    atom_type: AtomType,
}

impl CharAtom {
    /// Spacing class inferred from the glyph.
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            atom_type: classify(ch),
        }
    }

    pub fn with_type(ch: char, atom_type: AtomType) -> Self {
        Self { ch, atom_type }
    }

    pub fn atom_type(&self) -> AtomType {
        self.atom_type
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        glyph_box(self.ch, env, false).tagged(self.atom_type)
    }
}

/// A glyph box in the current style; `big` picks the display-size variant.
pub(crate) fn glyph_box(ch: char, env: &Env, big: bool) -> TexBox {
    let metrics = if big { env.big_glyph(ch) } else { env.glyph(ch) };
    let size = if big { env.size() * 1.4 } else { env.size() };
    CharBox::new(ch, metrics, size, env.is_italic(ch)).into()
}

fn classify(ch: char) -> AtomType {
    match ch {
        '+' | '-' | '\u{2212}' | '\u{00d7}' | '\u{00b1}' | '\u{22c5}' | '*' => {
            AtomType::BinaryOperator
        },
        '=' | '<' | '>' | '\u{2264}' | '\u{2265}' | '\u{2260}' | '\u{2192}' | '\u{2208}' => {
            AtomType::Relation
        },
        '(' | '[' | '{' => AtomType::Opening,
        ')' | ']' | '}' => AtomType::Closing,
        ',' | ';' => AtomType::Punctuation,
        c if is_big_operator(c) => AtomType::BigOperator,
        _ => AtomType::Ordinary,
    }
}

// ---------------------------------------------------------------------------
// SpaceAtom
// ---------------------------------------------------------------------------

/// Horizontal glue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceAtom {
    pub width: Dimen,
    /// Lines may be broken here.
    pub breakable: bool,
}

impl SpaceAtom {
    pub fn new(width: Dimen, breakable: bool) -> Self {
        Self { width, breakable }
    }

    /// `\,`
    pub fn thin() -> Self {
        Self::new(Dimen::mu(3.0), false)
    }

    /// `\:`
    pub fn medium() -> Self {
        Self::new(Dimen::mu(4.0), false)
    }

    /// `\;`
    pub fn thick() -> Self {
        Self::new(Dimen::mu(5.0), false)
    }

    /// `\quad`, which is a break opportunity.
    pub fn quad() -> Self {
        Self::new(Dimen::em(1.0), true)
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        GlueBox::new(self.width.to_units(env), self.breakable).into()
    }
}

// ---------------------------------------------------------------------------
// RowAtom
// ---------------------------------------------------------------------------

/// Atoms set side by side with TeX inter-atom spacing.
#[derive(Debug, Clone, Default)]
pub struct RowAtom {
    pub elements: Vec<AtomRef>,
}

impl RowAtom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_atoms(atoms: impl IntoIterator<Item = Atom>) -> Self {
        Self {
            elements: atoms.into_iter().map(Rc::new).collect(),
        }
    }

    /// A row holding `atom` if present, empty otherwise.
    pub fn from_opt(atom: Option<AtomRef>) -> Self {
        Self {
            elements: atom.into_iter().collect(),
        }
    }

    pub fn push(&mut self, atom: AtomRef) {
        self.elements.push(atom);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Spacing classes after TeX's binary-operator demotion rules.
    fn spacing_types(&self) -> Vec<AtomType> {
        let mut types: Vec<AtomType> = self.elements.iter().map(|e| e.atom_type()).collect();
        let mut prev: Option<usize> = None;
        for i in 0..types.len() {
            if types[i] == AtomType::None {
                continue;
            }
            let before = prev.map(|p| types[p]);
            if types[i] == AtomType::BinaryOperator
                && matches!(
                    before,
                    None | Some(
                        AtomType::BinaryOperator
                            | AtomType::BigOperator
                            | AtomType::Relation
                            | AtomType::Opening
                            | AtomType::Punctuation
                    )
                )
            {
                types[i] = AtomType::Ordinary;
            }
            if let Some(p) = prev
                && types[p] == AtomType::BinaryOperator
                && matches!(
                    types[i],
                    AtomType::Relation | AtomType::Closing | AtomType::Punctuation
                )
            {
                types[p] = AtomType::Ordinary;
            }
            prev = Some(i);
        }
        if let Some(p) = prev
            && types[p] == AtomType::BinaryOperator
        {
            types[p] = AtomType::Ordinary;
        }
        types
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        let types = self.spacing_types();
        let mut hbox = HBox::new();
        let mut prev: Option<AtomType> = None;
        for (element, &ty) in self.elements.iter().zip(&types) {
            if ty != AtomType::None {
                if let Some(left) = prev
                    && let Some(space) = inter_atom_space(left, ty, env.style())
                {
                    let breakable =
                        matches!(left, AtomType::BinaryOperator | AtomType::Relation);
                    hbox.add(GlueBox::new(space.to_units(env), breakable).into());
                }
                prev = Some(ty);
            }
            hbox.add(element.create_box(env));
        }
        hbox.into()
    }
}

// Columns and rows: Ord, Op, Bin, Rel, Open, Close, Punct, Inner.
// 1 thin, 2 medium, 3 thick; negative entries vanish in script styles.
const SPACING: [[i8; 8]; 8] = [
    [0, 1, -2, -3, 0, 0, 0, -1],
    [1, 1, 0, -3, 0, 0, 0, -1],
    [-2, -2, 0, 0, -2, 0, 0, -2],
    [-3, -3, 0, 0, -3, 0, 0, -3],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, -2, -3, 0, 0, 0, -1],
    [-1, -1, 0, -1, -1, -1, -1, -1],
    [-1, 1, -2, -3, -1, 0, -1, -1],
];

fn spacing_index(t: AtomType) -> usize {
    match t {
        AtomType::BigOperator => 1,
        AtomType::BinaryOperator => 2,
        AtomType::Relation => 3,
        AtomType::Opening => 4,
        AtomType::Closing => 5,
        AtomType::Punctuation => 6,
        AtomType::Inner => 7,
        AtomType::Ordinary | AtomType::Accent | AtomType::Hline | AtomType::None => 0,
    }
}

/// Glue TeX puts between adjacent atoms of classes `left` and `right`.
pub(crate) fn inter_atom_space(left: AtomType, right: AtomType, style: MathStyle) -> Option<Dimen> {
    let code = SPACING[spacing_index(left)][spacing_index(right)];
    if code == 0 || (code < 0 && style.is_script()) {
        return None;
    }
    match code.abs() {
        1 => Some(SpaceAtom::thin().width),
        2 => Some(SpaceAtom::medium().width),
        _ => Some(SpaceAtom::thick().width),
    }
}

// ---------------------------------------------------------------------------
// Fixed-size atoms
// ---------------------------------------------------------------------------

/// An invisible box of given geometry, in box units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderAtom {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub shift: f32,
}

impl PlaceholderAtom {
    pub fn new(width: f32, height: f32, depth: f32, shift: f32) -> Self {
        Self {
            width,
            height,
            depth,
            shift,
        }
    }

    pub(crate) fn create_box(&self) -> TexBox {
        StrutBox::new(self.width, self.height, self.depth, self.shift).into()
    }
}

/// Invisible content keeping some of its dimensions.
#[derive(Debug, Clone)]
pub struct PhantomAtom {
    pub elements: RowAtom,
    pub width: bool,
    pub height: bool,
    pub depth: bool,
}

impl PhantomAtom {
    pub fn new(atom: Option<AtomRef>, width: bool, height: bool, depth: bool) -> Self {
        Self {
            elements: RowAtom::from_opt(atom),
            width,
            height,
            depth,
        }
    }

    /// Keep every dimension.
    pub fn full(atom: Option<AtomRef>) -> Self {
        Self::new(atom, true, true, true)
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        let b = self.elements.create_box(env);
        let keep = |on: bool, v: f32| if on { v } else { 0.0 };
        StrutBox::new(
            keep(self.width, b.width()),
            keep(self.height, b.height()),
            keep(self.depth, b.depth()),
            b.shift(),
        )
        .into()
    }
}

/// Content drawn in a foreground and/or over a background color.
#[derive(Debug, Clone)]
pub struct ColorAtom {
    pub elements: RowAtom,
    pub background: Option<Color>,
    pub foreground: Option<Color>,
}

impl ColorAtom {
    pub fn new(atom: Option<AtomRef>, background: Option<Color>, foreground: Option<Color>) -> Self {
        Self {
            elements: RowAtom::from_opt(atom),
            background,
            foreground,
        }
    }

    /// Colors given by name or `#RRGGBB[AA]`, resolved through `colors`.
    ///
    /// Unknown names leave that color unset.
    pub fn named(
        atom: Option<AtomRef>,
        colors: &ColorRegistry,
        background: Option<&str>,
        foreground: Option<&str>,
    ) -> Self {
        let resolve = |name: Option<&str>| {
            let name = name?;
            let color = colors.resolve(name);
            if color.is_none() {
                log::warn!("unknown color `{name}`");
            }
            color
        };
        Self::new(atom, resolve(background), resolve(foreground))
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        let content = self.elements.create_box(env);
        ColorBox::new(content, self.foreground, self.background).into()
    }
}

/// A filled rule, `\rule[raise]{width}{height}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleAtom {
    pub width: Dimen,
    pub height: Dimen,
    pub raise: Dimen,
}

impl RuleAtom {
    pub fn new(width: Dimen, height: Dimen, raise: Dimen) -> Self {
        Self {
            width,
            height,
            raise,
        }
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        RuleBox::new(
            self.height.to_units(env),
            self.width.to_units(env),
            -self.raise.to_units(env),
            None,
        )
        .into()
    }
}

/// A horizontal line of the current rule thickness, as used by `\hline`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HlineAtom {
    /// Width in box units.
    pub width: f32,
    pub shift: f32,
    pub color: Option<Color>,
}

impl HlineAtom {
    pub fn new(width: f32, shift: f32, color: Option<Color>) -> Self {
        Self {
            width,
            shift,
            color,
        }
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        let rule = TexBox::from(RuleBox::new(
            env.rule_thickness(),
            self.width,
            self.shift,
            self.color,
        ))
        .tagged(AtomType::Hline);
        TexBox::from(VBox::from_children([rule])).tagged(AtomType::Hline)
    }
}
