//! The box model.
//!
//! A [`TexBox`] is a measured, drawable node: `width`, `height` above the
//! baseline, `depth` below it, and a `shift` that the composing parent
//! applies (downward inside an [`HBox`], rightward inside a [`VBox`]).
//! Groups own their children and fold the aggregate geometry at insertion
//! time, so every metric query is O(1). Decorators wrap exactly one base.
//!
//! Drawing takes the origin `(x, y)` of the box's baseline-left point in
//! user space.

mod decor;
mod group;
mod leaf;

pub use decor::{ColorBox, DEBUG_COLOR, DebugBox, ScaleBox};
pub use group::{HBox, VBox};
pub use leaf::{CharBox, GlueBox, RuleBox, StrutBox};

use crate::atom::AtomType;
use crate::error::Result;
use crate::graphics::Graphics;

/// Tolerance, in box units, under which two widths are considered equal.
pub const PREC: f32 = 1e-4;

/// Geometry and type tag shared by every box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub shift: f32,
    pub atom_type: AtomType,
}

impl Geometry {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(width: f32, height: f32, depth: f32, shift: f32) -> Self {
        Self {
            width,
            height,
            depth,
            shift,
            atom_type: AtomType::None,
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A node of the box tree.
#[derive(Debug, Clone)]
pub enum TexBox {
    Char(CharBox),
    Strut(StrutBox),
    Glue(GlueBox),
    Rule(RuleBox),
    HBox(HBox),
    VBox(VBox),
    Scale(ScaleBox),
    Color(ColorBox),
    Debug(DebugBox),
}

impl TexBox {
    /// A zero-size invisible box.
    pub fn empty() -> Self {
        Self::Strut(StrutBox::empty())
    }

    pub fn geometry(&self) -> &Geometry {
        match self {
            Self::Char(b) => &b.geometry,
            Self::Strut(b) => &b.geometry,
            Self::Glue(b) => &b.geometry,
            Self::Rule(b) => &b.geometry,
            Self::HBox(b) => &b.geometry,
            Self::VBox(b) => &b.geometry,
            Self::Scale(b) => &b.geometry,
            Self::Color(b) => &b.geometry,
            Self::Debug(b) => &b.geometry,
        }
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        match self {
            Self::Char(b) => &mut b.geometry,
            Self::Strut(b) => &mut b.geometry,
            Self::Glue(b) => &mut b.geometry,
            Self::Rule(b) => &mut b.geometry,
            Self::HBox(b) => &mut b.geometry,
            Self::VBox(b) => &mut b.geometry,
            Self::Scale(b) => &mut b.geometry,
            Self::Color(b) => &mut b.geometry,
            Self::Debug(b) => &mut b.geometry,
        }
    }

    pub fn width(&self) -> f32 {
        self.geometry().width
    }

    pub fn height(&self) -> f32 {
        self.geometry().height
    }

    pub fn depth(&self) -> f32 {
        self.geometry().depth
    }

    pub fn shift(&self) -> f32 {
        self.geometry().shift
    }

    /// Set the offset the parent applies when composing this box.
    pub fn set_shift(&mut self, shift: f32) {
        self.geometry_mut().shift = shift;
    }

    pub fn atom_type(&self) -> AtomType {
        self.geometry().atom_type
    }

    pub fn set_atom_type(&mut self, atom_type: AtomType) {
        self.geometry_mut().atom_type = atom_type;
    }

    /// Builder form of [`set_atom_type`](Self::set_atom_type).
    pub fn tagged(mut self, atom_type: AtomType) -> Self {
        self.set_atom_type(atom_type);
        self
    }

    /// Pure spacing.
    pub fn is_space(&self) -> bool {
        matches!(self, Self::Glue(_))
    }

    /// Glue the splitter may break at.
    pub fn is_breakable(&self) -> bool {
        matches!(self, Self::Glue(g) if g.is_breakable())
    }

    pub fn is_char(&self) -> bool {
        matches!(self, Self::Char(_))
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::HBox(_) | Self::VBox(_))
    }

    /// Children of a group; empty for every other box.
    pub fn descendants(&self) -> &[TexBox] {
        match self {
            Self::HBox(b) => b.children(),
            Self::VBox(b) => b.children(),
            _ => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<TexBox>> {
        match self {
            Self::HBox(b) => Some(&mut b.children),
            Self::VBox(b) => Some(&mut b.children),
            _ => None,
        }
    }

    /// Append to a group without touching its geometry.
    ///
    /// Returns the child back when `self` is not a group.
    pub fn add_only(&mut self, child: TexBox) -> std::result::Result<(), TexBox> {
        match self.children_mut() {
            Some(children) => {
                children.push(child);
                Ok(())
            },
            None => Err(child),
        }
    }

    /// The wrapped box of a decorator.
    pub fn base(&self) -> Option<&TexBox> {
        match self {
            Self::Scale(b) => Some(&*b.base),
            Self::Color(b) => Some(&*b.base),
            Self::Debug(b) => Some(&*b.base),
            _ => None,
        }
    }

    pub(crate) fn base_mut(&mut self) -> Option<&mut TexBox> {
        match self {
            Self::Scale(b) => Some(&mut *b.base),
            Self::Color(b) => Some(&mut *b.base),
            Self::Debug(b) => Some(&mut *b.base),
            _ => None,
        }
    }

    /// Children of a horizontal run: an `HBox`, or a `ColorBox` over one.
    pub fn horizontal_run(&self) -> Option<&[TexBox]> {
        match self {
            Self::HBox(b) => Some(b.children()),
            Self::Color(c) => match c.base() {
                Self::HBox(b) => Some(b.children()),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn draw(&self, g: &mut dyn Graphics, x: f32, y: f32) -> Result<()> {
        match self {
            Self::Char(b) => b.draw(g, x, y),
            Self::Strut(_) | Self::Glue(_) => Ok(()),
            Self::Rule(b) => b.draw(g, x, y),
            Self::HBox(b) => b.draw(g, x, y),
            Self::VBox(b) => b.draw(g, x, y),
            Self::Scale(b) => b.draw(g, x, y),
            Self::Color(b) => b.draw(g, x, y),
            Self::Debug(b) => b.draw(g, x, y),
        }
    }
}

macro_rules! impl_from_box {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for TexBox {
                fn from(b: $ty) -> Self {
                    Self::$variant(b)
                }
            }
        )*
    };
}

impl_from_box!(
    Char(CharBox),
    Strut(StrutBox),
    Glue(GlueBox),
    Rule(RuleBox),
    HBox(HBox),
    VBox(VBox),
    Scale(ScaleBox),
    Color(ColorBox),
    Debug(DebugBox),
);
