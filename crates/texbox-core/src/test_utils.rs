//! Fixtures shared by the unit tests.

use std::rc::Rc;

use crate::atom::*;
use crate::boxes::{StrutBox, TexBox};
use crate::color::Color;
use crate::env::{Env, FixedMetricsFont, FontContext, LetterStyle, MathStyle};
use crate::units::Dimen;

/// An invisible box of the given extent.
pub fn block(width: f32, height: f32, depth: f32) -> TexBox {
    StrutBox::new(width, height, depth, 0.0).into()
}

/// A glyph box in the default environment.
pub fn glyph(ch: char) -> TexBox {
    Atom::char(ch).create_box(&mut Env::default())
}

/// Display style with the default fonts plus a `sans` math version.
pub fn sample_env() -> Env {
    let mut fonts = FontContext::with_defaults();
    fonts.register(Rc::new(FixedMetricsFont::new("sans")));
    Env::new(MathStyle::Display, fonts)
}

pub fn placeholder(width: f32, height: f32, depth: f32) -> AtomRef {
    Rc::new(PlaceholderAtom::new(width, height, depth, 0.0).into())
}

pub fn x_ref() -> AtomRef {
    Rc::new(Atom::char('x'))
}

pub fn sum_ref() -> AtomRef {
    Rc::new(Atom::char('\u{2211}'))
}

/// One sample of every atom kind, with and without children.
pub fn every_variant() -> Vec<Atom> {
    let p = || Some(placeholder(4.0, 3.0, 1.0));
    vec![
        Atom::Empty,
        Atom::char('a'),
        Atom::char('+'),
        SpaceAtom::thick().into(),
        SpaceAtom::quad().into(),
        Atom::row([Atom::char('a'), Atom::char('='), Atom::char('b')]),
        Atom::row([]),
        ScriptsAtom::new(Some(x_ref()), Some(x_ref()), Some(x_ref())).into(),
        ScriptsAtom::new(None, None, Some(x_ref())).into(),
        CumulativeScriptsAtom::attach(Some(x_ref()), Some(x_ref()), None).into(),
        MathAtom::new(Some(x_ref()), MathStyle::Script).into(),
        MathAtom::new(None, MathStyle::Display).into(),
        MathFontAtom::new("sans", LetterStyle::Iso).into(),
        RomanAtom::new(Some(x_ref())).into(),
        RomanAtom::new(None).into(),
        ScaleAtom::uniform(p(), 1.5).into(),
        HlineAtom::new(10.0, 0.0, Some(Color::BLUE)).into(),
        RuleAtom::new(Dimen::em(1.0), Dimen::pt(0.4), Dimen::ZERO).into(),
        ColorAtom::new(Some(x_ref()), Some(Color::YELLOW), Some(Color::RED)).into(),
        PhantomAtom::full(Some(x_ref())).into(),
        PlaceholderAtom::new(2.0, 2.0, 0.0, 0.0).into(),
        BigOperatorAtom::new(Some(sum_ref()), Some(x_ref()), Some(x_ref())).into(),
        BigOperatorAtom::with_limits(Some(sum_ref()), None, Some(x_ref()), false).into(),
        BigOperatorAtom::new(None, None, None).into(),
        SideSetsAtom::new(
            Some(sum_ref()),
            Some(Atom::from(ScriptsAtom::new(None, Some(x_ref()), None)).into_ref()),
            None,
        )
        .into(),
        SideSetsAtom::default().into(),
        OverUnderDelimiter::over_brace(p(), Some(x_ref())).into(),
        OverUnderDelimiter::under_brace(None, None).into(),
        RaiseAtom::new(p(), Dimen::pt(1.0), None, None).into(),
        LapedAtom::new(p(), Lap::Center).into(),
        ReflectAtom::new(Some(x_ref())).into(),
        ResizeAtom::new(p(), Some(Dimen::pt(8.0)), None, true).into(),
        VCenteredAtom::new(p()).into(),
        StrikeThroughAtom::new(Some(x_ref())).into(),
        StrikeThroughAtom::new(None).into(),
    ]
}

/// Assert two box trees have the same shape and geometry.
pub fn assert_same_geometry(a: &TexBox, b: &TexBox) {
    assert_eq!(a.geometry(), b.geometry(), "{a:?} vs {b:?}");
    let (ca, cb) = (a.descendants(), b.descendants());
    assert_eq!(ca.len(), cb.len());
    for (x, y) in ca.iter().zip(cb) {
        assert_same_geometry(x, y);
    }
    match (a.base(), b.base()) {
        (Some(x), Some(y)) => assert_same_geometry(x, y),
        (None, None) => {},
        _ => panic!("decorator mismatch: {a:?} vs {b:?}"),
    }
}
