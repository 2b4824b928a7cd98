//! Atoms: the semantic formula tree.
//!
//! Every [`Atom`] converts itself to a box subtree with
//! [`Atom::create_box`] under a mutable [`Env`]. Conversion never mutates
//! the atom and never fails: absent children become empty boxes. Any
//! change an atom makes to the environment for its children is undone
//! before `create_box` returns.
//!
//! Children are shared, immutable [`AtomRef`] handles, so the same
//! sub-atom may appear in several places of a tree (cumulative scripts
//! reuse their base this way).

mod basic;
mod operators;
mod scripts;
mod style;
mod transform;

use std::rc::Rc;

pub use basic::{
    CharAtom, ColorAtom, HlineAtom, PhantomAtom, PlaceholderAtom, RowAtom, RuleAtom, SpaceAtom,
};
pub use operators::{BigOperatorAtom, OverUnderDelimiter, change_width};
pub use scripts::{CumulativeScriptsAtom, ScriptsAtom, SideSetsAtom};
pub use style::{MathAtom, MathFontAtom, RomanAtom};
pub use transform::{
    Lap, LapedAtom, RaiseAtom, ReflectAtom, ResizeAtom, ScaleAtom, StrikeThroughAtom,
    VCenteredAtom,
};

use crate::boxes::TexBox;
use crate::env::Env;

/// Shared handle to an immutable atom.
pub type AtomRef = Rc<Atom>;

/// Spacing class of an atom, and the type tag carried by boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AtomType {
    Ordinary,
    BigOperator,
    BinaryOperator,
    Relation,
    Opening,
    Closing,
    Punctuation,
    Inner,
    Accent,
    /// A horizontal rule line.
    Hline,
    /// No spacing class; transparent to inter-atom spacing.
    #[default]
    None,
}

/// A node of the formula tree.
#[derive(Debug, Clone, Default)]
pub enum Atom {
    #[default]
    Empty,
    Char(CharAtom),
    Space(SpaceAtom),
    Row(RowAtom),
    Scripts(ScriptsAtom),
    CumulativeScripts(CumulativeScriptsAtom),
    Math(MathAtom),
    MathFont(MathFontAtom),
    Roman(RomanAtom),
    Scale(ScaleAtom),
    Hline(HlineAtom),
    Rule(RuleAtom),
    Color(ColorAtom),
    Phantom(PhantomAtom),
    Placeholder(PlaceholderAtom),
    BigOperator(BigOperatorAtom),
    SideSets(SideSetsAtom),
    OverUnder(OverUnderDelimiter),
    Raise(RaiseAtom),
    Lap(LapedAtom),
    Reflect(ReflectAtom),
    Resize(ResizeAtom),
    VCentered(VCenteredAtom),
    StrikeThrough(StrikeThroughAtom),
}

impl Atom {
    /// A character atom with its spacing class inferred from the glyph.
    pub fn char(ch: char) -> Self {
        Self::Char(CharAtom::new(ch))
    }

    /// A row of atoms.
    pub fn row(elements: impl IntoIterator<Item = Atom>) -> Self {
        Self::Row(RowAtom::from_atoms(elements))
    }

    /// Wrap in a shared handle.
    pub fn into_ref(self) -> AtomRef {
        Rc::new(self)
    }

    pub fn create_box(&self, env: &mut Env) -> TexBox {
        match self {
            Self::Empty => TexBox::empty(),
            Self::Char(a) => a.create_box(env),
            Self::Space(a) => a.create_box(env),
            Self::Row(a) => a.create_box(env),
            Self::Scripts(a) => a.create_box(env),
            Self::CumulativeScripts(a) => a.create_box(env),
            Self::Math(a) => a.create_box(env),
            Self::MathFont(a) => a.create_box(env),
            Self::Roman(a) => a.create_box(env),
            Self::Scale(a) => a.create_box(env),
            Self::Hline(a) => a.create_box(env),
            Self::Rule(a) => a.create_box(env),
            Self::Color(a) => a.create_box(env),
            Self::Phantom(a) => a.create_box(env),
            Self::Placeholder(a) => a.create_box(),
            Self::BigOperator(a) => a.create_box(env),
            Self::SideSets(a) => a.create_box(env),
            Self::OverUnder(a) => a.create_box(env),
            Self::Raise(a) => a.create_box(env),
            Self::Lap(a) => a.create_box(env),
            Self::Reflect(a) => a.create_box(env),
            Self::Resize(a) => a.create_box(env),
            Self::VCentered(a) => a.create_box(env),
            Self::StrikeThrough(a) => a.create_box(env),
        }
    }

    /// Spacing class used by rows.
    pub fn atom_type(&self) -> AtomType {
        match self {
            Self::Empty | Self::Space(_) | Self::MathFont(_) => AtomType::None,
            Self::Char(a) => a.atom_type(),
            Self::Scripts(a) => base_type(a.base.as_deref()),
            Self::CumulativeScripts(a) => base_type(a.base()),
            Self::Math(a) => base_type(a.base.as_deref()),
            Self::Roman(a) => base_type(a.base.as_deref()),
            Self::BigOperator(_) => AtomType::BigOperator,
            Self::Hline(_) => AtomType::Hline,
            _ => AtomType::Ordinary,
        }
    }
}

fn base_type(base: Option<&Atom>) -> AtomType {
    match base.map(Atom::atom_type) {
        None | Some(AtomType::None) => AtomType::Ordinary,
        Some(t) => t,
    }
}

/// Convert an optional child; an absent one gives an empty box.
pub fn create_opt(atom: Option<&Atom>, env: &mut Env) -> TexBox {
    match atom {
        Some(a) => a.create_box(env),
        None => TexBox::empty(),
    }
}

macro_rules! impl_from_atom {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Atom {
                fn from(a: $ty) -> Self {
                    Self::$variant(a)
                }
            }
        )*
    };
}

impl_from_atom!(
    Char(CharAtom),
    Space(SpaceAtom),
    Row(RowAtom),
    Scripts(ScriptsAtom),
    CumulativeScripts(CumulativeScriptsAtom),
    Math(MathAtom),
    MathFont(MathFontAtom),
    Roman(RomanAtom),
    Scale(ScaleAtom),
    Hline(HlineAtom),
    Rule(RuleAtom),
    Color(ColorAtom),
    Phantom(PhantomAtom),
    Placeholder(PlaceholderAtom),
    BigOperator(BigOperatorAtom),
    SideSets(SideSetsAtom),
    OverUnder(OverUnderDelimiter),
    Raise(RaiseAtom),
    Lap(LapedAtom),
    Reflect(ReflectAtom),
    Resize(ResizeAtom),
    VCentered(VCenteredAtom),
    StrikeThrough(StrikeThroughAtom),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FontStyle, MathStyle};
    use crate::test_utils::{assert_same_geometry, every_variant, sample_env};
    use proptest::prelude::*;

    #[test]
    fn empty_and_absent_are_zero() {
        let mut env = sample_env();
        assert_eq!(Atom::Empty.create_box(&mut env).width(), 0.0);
        assert_eq!(create_opt(None, &mut env).height(), 0.0);
    }

    #[test]
    fn every_variant_restores_env() {
        for atom in every_variant() {
            let mut env = sample_env();
            env.set_style(MathStyle::Text);
            env.set_font_style(FontStyle::BF | FontStyle::RM);
            let _ = atom.create_box(&mut env);
            assert_eq!(env.style(), MathStyle::Text, "{atom:?}");
            assert_eq!(env.font_style(), FontStyle::BF | FontStyle::RM, "{atom:?}");
        }
    }

    #[test]
    fn every_variant_is_idempotent() {
        for atom in every_variant() {
            let first = atom.create_box(&mut sample_env());
            let second = atom.create_box(&mut sample_env());
            assert_same_geometry(&first, &second);
        }
    }

    #[test]
    fn spacing_class_sees_through_wrappers() {
        let plus = Atom::char('+');
        assert_eq!(plus.atom_type(), AtomType::BinaryOperator);
        let scripted = Atom::from(ScriptsAtom::new(
            Some(Atom::char('=').into_ref()),
            None,
            Some(Atom::char('2').into_ref()),
        ));
        assert_eq!(scripted.atom_type(), AtomType::Relation);
        assert_eq!(Atom::Empty.atom_type(), AtomType::None);
        assert_eq!(Atom::row([]).atom_type(), AtomType::Ordinary);
    }

    fn style_strategy() -> impl Strategy<Value = MathStyle> {
        prop_oneof![
            Just(MathStyle::Display),
            Just(MathStyle::TextCramped),
            Just(MathStyle::Script),
            Just(MathStyle::ScriptScriptCramped),
        ]
    }

    proptest! {
        #[test]
        fn conversion_restores_any_starting_style(
            style in style_strategy(),
            bits in 0u16..256,
            pick in 0usize..64,
        ) {
            let atoms = every_variant();
            let atom = &atoms[pick % atoms.len()];
            let flags = FontStyle::from_bits_truncate(bits);
            let mut env = sample_env();
            env.set_style(style);
            env.set_font_style(flags);
            let _ = atom.create_box(&mut env);
            prop_assert_eq!(env.style(), style);
            prop_assert_eq!(env.font_style(), flags);
        }
    }
}
