//! The sample formula shown by the demo.

use texbox_core::atom::{
    Atom, BigOperatorAtom, ColorAtom, CumulativeScriptsAtom, OverUnderDelimiter, PhantomAtom,
    RuleAtom, ScriptsAtom, SideSetsAtom, SpaceAtom,
};
use texbox_core::color::Color;
use texbox_core::formula::Formula;
use texbox_core::units::Dimen;

fn chars(text: &str) -> Atom {
    Atom::row(text.chars().map(Atom::char))
}

/// `\sum_{i=1}^{n} x_i^2 = {\color{brand} \overbrace{a+b}^{k}} \sideset{_1^2}{'}\prod y \quad \rule{1em}{0.4pt}`
pub fn sample_formula() -> Formula {
    let mut formula = Formula::new();
    formula.define_color("brand", Color::rgb(0x33, 0x66, 0x99));

    formula.add(BigOperatorAtom::new(
        Some(Atom::char('\u{2211}').into_ref()),
        Some(chars("i=1").into_ref()),
        Some(Atom::char('n').into_ref()),
    ));
    let x_i = ScriptsAtom::new(
        Some(Atom::char('x').into_ref()),
        Some(Atom::char('i').into_ref()),
        None,
    );
    formula.add(CumulativeScriptsAtom::attach(
        Some(Atom::from(x_i).into_ref()),
        None,
        Some(Atom::char('2').into_ref()),
    ));
    formula.add(Atom::char('='));

    let brace = OverUnderDelimiter::over_brace(
        Some(chars("a+b").into_ref()),
        Some(Atom::char('k').into_ref()),
    );
    let colored = ColorAtom::named(
        Some(Atom::from(brace).into_ref()),
        formula.colors(),
        None,
        Some("brand"),
    );
    formula.add(colored);

    let left = ScriptsAtom::new(
        None,
        Some(Atom::char('1').into_ref()),
        Some(Atom::char('2').into_ref()),
    );
    let right = ScriptsAtom::new(None, None, Some(Atom::char('\u{2032}').into_ref()));
    formula.add(SideSetsAtom::new(
        Some(Atom::char('\u{220f}').into_ref()),
        Some(Atom::from(left).into_ref()),
        Some(Atom::from(right).into_ref()),
    ));
    formula.add(Atom::char('y'));
    formula.add(PhantomAtom::new(Some(Atom::char('g').into_ref()), false, false, true));
    formula.add(SpaceAtom::quad());
    formula.add(RuleAtom::new(Dimen::em(1.0), Dimen::pt(0.4), Dimen::ZERO));
    formula
}
