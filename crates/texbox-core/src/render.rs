//! The host-facing render handle and its builder.
//!
//! [`RenderBuilder`] validates the configuration, lays the formula out in a
//! fresh [`Env`], optionally splits it into lines and hands back a
//! [`Render`]: the finished box tree plus the pixel scale and padding a
//! host needs to measure and draw it.

use crate::atom::{Atom, create_opt};
use crate::boxes::{DebugBox, HBox, StrutBox, TexBox, VBox};
use crate::color::Color;
use crate::config::RenderConfig;
use crate::env::{Env, FIXED_TEXT_SIZE, FontContext, MathStyle};
use crate::error::{Result, TexError};
use crate::formula::{ColorRegistry, Formula};
use crate::graphics::Graphics;
use crate::layout::{HAlign, Insets, VAlign};
use crate::split::split;
use crate::units::{Dimen, UnitType};

/// Color used when a render has no foreground of its own.
pub const DEFAULT_COLOR: Color = Color::BLACK;

/// Default padding, as a fraction of the text size.
const PADDING_FACTOR: f32 = 0.18;

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

/// A laid-out formula at a given text size.
#[derive(Debug, Clone)]
pub struct Render {
    root: TexBox,
    text_size: f32,
    fixed_scale: f32,
    insets: Insets,
    foreground: Option<Color>,
}

impl Render {
    /// Wrap `root` for drawing at `text_size` pixels, with default padding.
    pub fn new(root: TexBox, text_size: f32) -> Self {
        Self::with_padding(root, text_size, false)
    }

    /// Wrap `root`; without `has_padding` every side gets the default
    /// padding.
    pub fn with_padding(root: TexBox, text_size: f32, has_padding: bool) -> Self {
        let mut render = Self {
            root,
            text_size,
            fixed_scale: text_size / FIXED_TEXT_SIZE,
            insets: Insets::ZERO,
            foreground: None,
        };
        render.set_insets(Insets::ZERO, has_padding);
        render
    }

    pub fn root(&self) -> &TexBox {
        &self.root
    }

    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    pub fn set_text_size(&mut self, text_size: f32) {
        self.text_size = text_size;
        self.fixed_scale = text_size / FIXED_TEXT_SIZE;
    }

    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    /// A transparent color clears the foreground.
    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = (!color.is_transparent()).then_some(color);
    }

    pub fn insets(&self) -> Insets {
        self.insets
    }

    /// Replace the padding; without `has_padding` the default padding is
    /// added on top of `insets`.
    pub fn set_insets(&mut self, insets: Insets, has_padding: bool) {
        self.insets = if has_padding {
            insets
        } else {
            insets.grown((PADDING_FACTOR * self.text_size) as i32)
        };
    }

    fn scaled(&self, v: f32) -> f32 {
        v * self.fixed_scale
    }

    fn exact_height(&self) -> f32 {
        self.scaled(self.root.height() + self.root.depth()) + self.insets.vertical() as f32
    }

    pub fn width(&self) -> i32 {
        (self.scaled(self.root.width()) + self.insets.horizontal() as f32) as i32
    }

    /// Height plus depth plus vertical padding.
    pub fn height(&self) -> i32 {
        self.exact_height() as i32
    }

    pub fn depth(&self) -> i32 {
        (self.scaled(self.root.depth()) + self.insets.bottom as f32) as i32
    }

    /// Fraction of the total height that lies above the baseline.
    pub fn baseline(&self) -> f32 {
        let total = self.exact_height();
        if total <= 0.0 {
            return 0.0;
        }
        (self.scaled(self.root.height()) + self.insets.top as f32) / total
    }

    /// Widen to `width` pixels at `align`; a narrower request is ignored.
    pub fn set_width(&mut self, width: i32, align: HAlign) {
        if width <= self.width() {
            return;
        }
        let target = (width as f32 + 0.5 - self.insets.horizontal() as f32) / self.fixed_scale;
        let root = std::mem::replace(&mut self.root, TexBox::empty());
        self.root = HBox::aligned(root, target, align).into();
    }

    /// Heighten to `height` pixels at `align`; a lower request is ignored.
    pub fn set_height(&mut self, height: i32, align: VAlign) {
        if height <= self.height() {
            return;
        }
        let rest = (height as f32 + 0.5 - self.exact_height()) / self.fixed_scale;
        let root = std::mem::replace(&mut self.root, TexBox::empty());
        self.root = VBox::aligned(root, rest, align).into();
    }

    /// Draw with the top-left corner of the padded area at `(x, y)`.
    ///
    /// The surface transform and color are restored even when drawing
    /// fails.
    pub fn draw(&self, g: &mut dyn Graphics, x: i32, y: i32) -> Result<()> {
        let prev = g.color();
        g.save();
        g.scale(self.fixed_scale, self.fixed_scale);
        g.set_color(
            self.foreground
                .filter(|c| !c.is_transparent())
                .unwrap_or(DEFAULT_COLOR),
        );
        let s = self.fixed_scale;
        let result = self.root.draw(
            g,
            (x + self.insets.left) as f32 / s,
            (y + self.insets.top) as f32 / s + self.root.height(),
        );
        g.restore();
        g.set_color(prev);
        result
    }

    /// Outline every box matching `filter` when drawn.
    ///
    /// Each group keeps its geometry: a corrective kern rewinds to the
    /// group origin and the outlines are drawn over the original content.
    pub fn with_debug(mut self, filter: impl Fn(&TexBox) -> bool) -> Self {
        let root = std::mem::replace(&mut self.root, TexBox::empty());
        self.root = HBox::with(root).into();

        let mut stack: Vec<&mut TexBox> = vec![&mut self.root];
        while let Some(b) = stack.pop() {
            if b.base().is_some() {
                if let Some(base) = b.base_mut() {
                    if !base.is_group() {
                        wrap_in_group(base);
                    }
                    stack.push(base);
                }
                continue;
            }
            let g = *b.geometry();
            let Some(children) = b.children_mut() else {
                continue;
            };
            let count = children.len();
            let overlays: Vec<TexBox> = children
                .iter()
                .map(|child| {
                    if child.is_space() {
                        child.clone()
                    } else if filter(child) {
                        DebugBox::new(child.clone()).into()
                    } else {
                        StrutBox::footprint(child).into()
                    }
                })
                .collect();
            children.push(StrutBox::new(-g.width, -g.height, -g.depth, -g.shift).into());
            children.extend(overlays);
            stack.extend(children[..count].iter_mut());
        }
        self
    }
}

/// Replace `slot` by a group holding it, moving its shift onto the group.
fn wrap_in_group(slot: &mut TexBox) {
    let mut inner = std::mem::replace(slot, TexBox::empty());
    let shift = inner.shift();
    inner.set_shift(0.0);
    let mut group = TexBox::from(HBox::with(inner));
    group.set_shift(shift);
    *slot = group;
}

// ---------------------------------------------------------------------------
// RenderBuilder
// ---------------------------------------------------------------------------

/// Options for turning a formula into a [`Render`].
#[derive(Debug, Clone)]
pub struct RenderBuilder {
    text_size: Option<f32>,
    math_version: Option<String>,
    style: MathStyle,
    width: Dimen,
    line_space: Dimen,
    is_max_width: bool,
    align: HAlign,
    foreground: Color,
    debug: bool,
    fonts: FontContext,
    insets: Option<Insets>,
}

impl Default for RenderBuilder {
    fn default() -> Self {
        Self {
            text_size: None,
            math_version: None,
            style: MathStyle::Display,
            width: Dimen::ZERO,
            line_space: Dimen::ZERO,
            is_max_width: false,
            align: HAlign::default(),
            foreground: Color::TRANSPARENT,
            debug: false,
            fonts: FontContext::default(),
            insets: None,
        }
    }
}

impl RenderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder from a parsed config, resolving colors against `colors`.
    pub fn from_config(config: &RenderConfig, colors: &ColorRegistry) -> Result<Self> {
        let mut builder = Self::new()
            .with_style(config.style.parse()?)
            .with_max_width(config.max_width)
            .with_align(config.align)
            .with_debug(config.debug);
        builder.text_size = config.text_size;
        builder.math_version = config.math_version.clone();
        builder.insets = config.insets;
        if let Some(width) = &config.width {
            builder.width = Dimen::parse(width)?;
        }
        if let Some(space) = &config.line_space {
            builder.line_space = Dimen::parse(space)?;
        }
        if let Some(fg) = &config.foreground {
            let color = colors
                .resolve(fg)
                .ok_or_else(|| TexError::Config(format!("unknown color `{fg}`")))?;
            builder.foreground = color;
        }
        Ok(builder)
    }

    pub fn with_text_size(mut self, size: f32) -> Self {
        self.text_size = Some(size);
        self
    }

    pub fn with_math_version(mut self, version: impl Into<String>) -> Self {
        self.math_version = Some(version.into());
        self
    }

    pub fn with_style(mut self, style: MathStyle) -> Self {
        self.style = style;
        self
    }

    /// Limit lines to `width`; a zero or unitless width leaves them unbounded.
    pub fn with_width(mut self, width: Dimen) -> Self {
        self.width = width;
        self
    }

    pub fn with_line_space(mut self, line_space: Dimen) -> Self {
        self.line_space = line_space;
        self
    }

    /// Shrink to the widest line instead of the full target width.
    pub fn with_max_width(mut self, is_max_width: bool) -> Self {
        self.is_max_width = is_max_width;
        self
    }

    pub fn with_align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_fonts(mut self, fonts: FontContext) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = Some(insets);
        self
    }

    fn is_limited(&self) -> bool {
        self.width.unit != UnitType::None && !self.width.is_zero()
    }

    pub fn build(&self, formula: &Formula) -> Result<Render> {
        self.build_atom(formula.root())
    }

    pub fn build_atom(&self, atom: Option<&Atom>) -> Result<Render> {
        let size = self
            .text_size
            .ok_or_else(|| TexError::InvalidState("a text size is required".into()))?;
        if !(size.is_finite() && size > 0.0) {
            return Err(TexError::Config(format!("text size must be positive, got {size}")));
        }
        let version = self
            .math_version
            .as_deref()
            .ok_or_else(|| TexError::InvalidState("a math version is required".into()))?;

        let mut fonts = self.fonts.clone();
        fonts.select(version)?;
        let mut env = Env::new(self.style, fonts);
        let limited = self.is_limited();
        if limited {
            env.set_text_width(self.width.unit, self.width.value);
            if !self.line_space.is_zero() {
                env.set_line_space(self.line_space.unit, self.line_space.value);
            }
        }
        log::debug!(
            "building render: size {size}, version `{version}`, style {}, width {}",
            self.style,
            self.width
        );

        let mut b = create_opt(atom, &mut env);
        if limited {
            if env.line_space() != 0.0 {
                b = split(b, env.text_width(), env.line_space());
            }
            let target = if self.is_max_width {
                b.width()
            } else {
                env.text_width()
            };
            b = HBox::aligned(b, target, self.align).into();
        }

        let mut render = Render::new(b, size);
        if let Some(insets) = self.insets {
            render.set_insets(insets, true);
        }
        if self.debug {
            render = render.with_debug(TexBox::is_char);
        }
        if !self.foreground.is_transparent() {
            render.set_foreground(self.foreground);
        }
        Ok(render)
    }
}
