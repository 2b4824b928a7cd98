//! A formula: a root atom plus the named colors it was parsed against.

use std::collections::HashMap;
use std::rc::Rc;

use crate::atom::{Atom, AtomRef, RowAtom, create_opt};
use crate::boxes::TexBox;
use crate::color::{Color, parse_hex_color};
use crate::env::Env;

/// Named colors usable by `\color{name}` style atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRegistry {
    colors: HashMap<String, Color>,
}

impl ColorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            colors: HashMap::new(),
        }
    }

    /// A registry with the basic named colors.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (name, color) in [
            ("black", Color::BLACK),
            ("white", Color::WHITE),
            ("red", Color::RED),
            ("green", Color::GREEN),
            ("blue", Color::BLUE),
            ("cyan", Color::CYAN),
            ("magenta", Color::MAGENTA),
            ("yellow", Color::YELLOW),
            ("gray", Color::rgb(128, 128, 128)),
        ] {
            registry.define(name, color);
        }
        registry
    }

    /// Define or replace `name`.
    pub fn define(&mut self, name: impl Into<String>, color: Color) {
        self.colors.insert(name.into(), color);
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    /// A `#RRGGBB[AA]` literal or a defined name.
    pub fn resolve(&self, value: &str) -> Option<Color> {
        let value = value.trim();
        if value.starts_with('#') {
            parse_hex_color(value)
        } else {
            self.get(value)
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ColorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// A parsed formula ready to be laid out.
#[derive(Debug, Clone, Default)]
pub struct Formula {
    root: Option<AtomRef>,
    colors: ColorRegistry,
}

impl Formula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<Atom>) -> Self {
        Self {
            root: Some(Rc::new(root.into())),
            ..Self::default()
        }
    }

    /// Append `atom` after the current content.
    pub fn add(&mut self, atom: impl Into<Atom>) -> &mut Self {
        let atom = Rc::new(atom.into());
        self.root = Some(match self.root.take() {
            None => atom,
            Some(root) => {
                let mut row = match Rc::unwrap_or_clone(root) {
                    Atom::Row(row) => row,
                    other => RowAtom::from_opt(Some(Rc::new(other))),
                };
                row.push(atom);
                Rc::new(row.into())
            },
        });
        self
    }

    pub fn define_color(&mut self, name: impl Into<String>, color: Color) -> &mut Self {
        self.colors.define(name, color);
        self
    }

    /// Resolve a color name or hex literal against this formula's colors.
    pub fn color(&self, spec: &str) -> Option<Color> {
        self.colors.resolve(spec)
    }

    pub fn colors(&self) -> &ColorRegistry {
        &self.colors
    }

    pub fn root(&self) -> Option<&Atom> {
        self.root.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn create_box(&self, env: &mut Env) -> TexBox {
        create_opt(self.root(), env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::ColorAtom;
    use crate::test_utils::sample_env;

    #[test]
    fn registry_resolves_names_and_hex() {
        let reg = ColorRegistry::with_defaults();
        assert_eq!(reg.resolve("red"), Some(Color::RED));
        assert_eq!(reg.resolve(" #336699 "), Some(Color::rgb(0x33, 0x66, 0x99)));
        assert_eq!(reg.resolve("#zz0000"), None);
        assert_eq!(reg.resolve("mauve"), None);
        assert!(ColorRegistry::new().is_empty());
    }

    #[test]
    fn define_replaces() {
        let mut reg = ColorRegistry::default();
        let before = reg.len();
        reg.define("red", Color::rgb(200, 0, 0));
        assert_eq!(reg.len(), before);
        assert_eq!(reg.get("red"), Some(Color::rgb(200, 0, 0)));
    }

    #[test]
    fn add_builds_a_row() {
        let mut f = Formula::new();
        assert!(f.is_empty());
        f.add(Atom::char('a'));
        assert!(matches!(f.root(), Some(Atom::Char(_))));
        f.add(Atom::char('+')).add(Atom::char('b'));
        match f.root() {
            Some(Atom::Row(row)) => assert_eq!(row.len(), 3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_formula_is_empty_box() {
        let b = Formula::new().create_box(&mut sample_env());
        assert_eq!((b.width(), b.height(), b.depth()), (0.0, 0.0, 0.0));
    }

    #[test]
    fn formula_colors_feed_color_atoms() {
        let mut f = Formula::new();
        f.define_color("brand", Color::rgb(1, 2, 3));
        let atom = ColorAtom::named(Some(Atom::char('x').into_ref()), f.colors(), None, Some("brand"));
        assert_eq!(atom.foreground, Some(Color::rgb(1, 2, 3)));
        assert_eq!(f.color("blue"), Some(Color::BLUE));
    }

    #[test]
    fn create_box_matches_root() {
        let f = Formula::with_root(Atom::row([Atom::char('a'), Atom::char('b')]));
        let mut env = sample_env();
        let direct = f.root().map(|r| r.create_box(&mut sample_env()));
        assert_eq!(f.create_box(&mut env).width(), direct.map_or(0.0, |b| b.width()));
    }
}
