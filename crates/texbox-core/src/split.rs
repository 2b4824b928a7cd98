//! Line splitting.
//!
//! [`split`] re-partitions a finished horizontal box into lines no wider
//! than a target width and stacks them in a [`VBox`]. Each line is found by
//! [`search`], a depth-first scan over the horizontal run and any nested
//! runs that straddle the overflow point. The scan keeps its own frame
//! stack, so the nesting it went through and every break candidate it saw
//! can be inspected on the returned [`BreakSearch`].
//!
//! Breaks happen at breakable glue, which is dropped from the output. The
//! last candidate that still fits wins. With no candidate the line is
//! forced before the overflowing element, or after it when that element
//! starts the line on its own.

use crate::boxes::{HBox, PREC, StrutBox, TexBox, VBox};

/// A place in the box tree: `path` indexes nested runs from the root,
/// `index` is the child inside the innermost one.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub path: Vec<usize>,
    pub index: usize,
    /// Accumulated line width before the child.
    pub width: f32,
}

/// Where to cut a run into a finished line and the remainder.
///
/// Inside the run at `path`, children before `first_end` end the line and
/// children from `rest_start` on start the remainder. Anything between the
/// two is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Cut {
    pub path: Vec<usize>,
    pub first_end: usize,
    pub rest_start: usize,
}

/// Outcome of scanning one line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreakSearch {
    /// Breakable glue that fits, in scan order.
    pub candidates: Vec<Position>,
    /// The first child that did not fit, if any.
    pub overflow: Option<Position>,
    /// Deepest nesting the scan entered.
    pub depth: usize,
    pub cut: Option<Cut>,
}

struct Frame<'a> {
    path: Vec<usize>,
    children: &'a [TexBox],
    next: usize,
}

impl Frame<'_> {
    fn has_more(&self) -> bool {
        self.next < self.children.len()
    }
}

/// Scan `b` for the end of its first line at `width`.
///
/// Only horizontal runs are scanned; any other box gives an empty search.
pub fn search(b: &TexBox, width: f32) -> BreakSearch {
    let mut out = BreakSearch::default();
    let Some(children) = b.horizontal_run() else {
        return out;
    };
    let mut stack = vec![Frame {
        path: Vec::new(),
        children,
        next: 0,
    }];
    let mut acc = 0.0f32;
    let mut forced_after = None;

    while let Some(frame) = stack.last_mut() {
        let children = frame.children;
        let Some(child) = children.get(frame.next) else {
            stack.pop();
            continue;
        };
        let index = frame.next;
        frame.next += 1;

        if child.is_breakable() && acc > PREC && acc <= width + PREC {
            out.candidates.push(Position {
                path: frame.path.clone(),
                index,
                width: acc,
            });
        }
        let end = acc + child.width();
        if end <= width + PREC {
            acc = end;
            continue;
        }

        if let Some(inner) = child.horizontal_run()
            && !inner.is_empty()
        {
            let mut path = frame.path.clone();
            path.push(index);
            stack.push(Frame {
                path,
                children: inner,
                next: 0,
            });
            out.depth = out.depth.max(stack.len() - 1);
            continue;
        }

        let path = frame.path.clone();
        let follows = stack.iter().any(Frame::has_more);
        if acc <= PREC && follows {
            forced_after = Some(Cut {
                path: path.clone(),
                first_end: index + 1,
                rest_start: index + 1,
            });
        }
        out.overflow = Some(Position { path, index, width: acc });
        break;
    }

    out.cut = match (out.candidates.last(), &out.overflow) {
        (Some(c), _) => Some(Cut {
            path: c.path.clone(),
            first_end: c.index,
            rest_start: c.index + 1,
        }),
        (None, Some(o)) if o.width > PREC => Some(Cut {
            path: o.path.clone(),
            first_end: o.index,
            rest_start: o.index,
        }),
        _ => forced_after,
    };
    out
}

impl Cut {
    /// Split `b` into the finished line and the remainder.
    pub fn apply(&self, b: TexBox) -> (TexBox, TexBox) {
        cut_run(b, &self.path, self.first_end, self.rest_start)
    }
}

fn cut_run(mut b: TexBox, path: &[usize], first_end: usize, rest_start: usize) -> (TexBox, TexBox) {
    if let TexBox::Color(_) = b {
        let base = b
            .base_mut()
            .map(|slot| std::mem::replace(slot, TexBox::empty()))
            .unwrap_or_else(TexBox::empty);
        let (first, rest) = cut_run(base, path, first_end, rest_start);
        return match &b {
            TexBox::Color(c) => (c.rewrap(first).into(), c.rewrap(rest).into()),
            _ => (first, rest),
        };
    }
    let (shift, tag) = (b.shift(), b.atom_type());
    let mut children = match b {
        TexBox::HBox(hbox) => hbox.into_children(),
        other => return (other, HBox::new().into()),
    };
    let run = |children: Vec<TexBox>| {
        let mut b = TexBox::from(HBox::from_children(children)).tagged(tag);
        b.set_shift(shift);
        b
    };
    match path.split_first() {
        None => {
            let rest = children.split_off(rest_start.min(children.len()));
            children.truncate(first_end);
            (run(children), run(rest))
        },
        Some((&at, inner)) => {
            let mut tail = children.split_off(at.min(children.len()));
            if tail.is_empty() {
                return (run(children), run(Vec::new()));
            }
            let nested = tail.remove(0);
            let (first, rest) = cut_run(nested, inner, first_end, rest_start);
            children.push(first);
            tail.insert(0, rest);
            (run(children), run(tail))
        },
    }
}

/// Break `b` into lines at most `width` wide, `line_space` apart.
///
/// Anything but an `HBox` is returned as is, as is a box that yields a
/// single line. An element wider than `width` gets a line of its own.
pub fn split(b: TexBox, width: f32, line_space: f32) -> TexBox {
    if !matches!(b, TexBox::HBox(_)) || !width.is_finite() {
        return b;
    }
    let mut lines = Vec::new();
    let mut rest = b;
    while rest.width() > width + PREC {
        let Some(cut) = search(&rest, width).cut else {
            break;
        };
        log::trace!("line break at {:?}", cut);
        let (line, tail) = cut.apply(rest);
        lines.push(line);
        rest = tail;
    }
    if lines.is_empty() {
        return rest;
    }
    if !rest.descendants().is_empty() {
        lines.push(rest);
    }
    if lines.len() == 1 {
        return lines.pop().unwrap_or_else(TexBox::empty);
    }
    log::debug!("split into {} lines at width {width}", lines.len());

    let mut vbox = VBox::new();
    let count = lines.len();
    for (i, mut line) in lines.into_iter().enumerate() {
        line.set_shift(0.0);
        vbox.add(line);
        if i + 1 < count {
            vbox.add(StrutBox::new(0.0, line_space, 0.0, 0.0).into());
        }
    }
    vbox.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::{ColorBox, GlueBox};
    use crate::color::Color;
    use crate::test_utils::block;
    use proptest::prelude::*;

    fn glue() -> TexBox {
        GlueBox::new(1.0, true).into()
    }

    fn run(children: impl IntoIterator<Item = TexBox>) -> TexBox {
        HBox::from_children(children).into()
    }

    fn lines(b: &TexBox) -> Vec<&TexBox> {
        match b {
            TexBox::VBox(v) => v.children().iter().step_by(2).collect(),
            other => vec![other],
        }
    }

    #[test]
    fn last_fitting_glue_wins() {
        let b = run([
            block(5.0, 1.0, 0.0),
            glue(),
            block(5.0, 1.0, 0.0),
            glue(),
            block(5.0, 1.0, 0.0),
            glue(),
            block(5.0, 1.0, 0.0),
        ]);
        let s = search(&b, 12.0);
        assert_eq!(s.candidates.len(), 2);
        assert_eq!(s.overflow.as_ref().map(|o| o.index), Some(4));

        let out = split(b, 12.0, 0.0);
        let lines = lines(&out);
        assert_eq!(lines.len(), 2);
        for line in lines {
            assert!((line.width() - 11.0).abs() < PREC);
            assert!(!line.descendants().first().is_some_and(TexBox::is_space));
        }
    }

    #[test]
    fn oversized_element_stays_alone() {
        let b = run([block(20.0, 1.0, 0.0)]);
        let out = split(b, 10.0, 0.0);
        assert!(matches!(out, TexBox::HBox(_)));
        assert_eq!(out.descendants().len(), 1);
        assert_eq!(out.width(), 20.0);
    }

    #[test]
    fn forced_break_before_overflowing_element() {
        let b = run([block(5.0, 1.0, 0.0), block(5.0, 1.0, 0.0), block(20.0, 1.0, 0.0)]);
        let out = split(b, 12.0, 0.0);
        let widths: Vec<f32> = lines(&out).iter().map(|l| l.width()).collect();
        assert_eq!(widths, vec![10.0, 20.0]);
    }

    #[test]
    fn forced_break_after_leading_element() {
        let b = run([block(20.0, 1.0, 0.0), block(5.0, 1.0, 0.0)]);
        let cut = search(&b, 10.0).cut;
        assert_eq!(
            cut,
            Some(Cut {
                path: vec![],
                first_end: 1,
                rest_start: 1,
            })
        );
        let widths: Vec<f32> = lines(&split(b, 10.0, 0.0)).iter().map(|l| l.width()).collect();
        assert_eq!(widths, vec![20.0, 5.0]);
    }

    #[test]
    fn breaks_inside_nested_run() {
        let nested = run([
            block(3.0, 1.0, 0.0),
            glue(),
            block(3.0, 1.0, 0.0),
            glue(),
            block(3.0, 1.0, 0.0),
        ]);
        let b = run([block(5.0, 1.0, 0.0), glue(), nested, block(5.0, 1.0, 0.0)]);
        let s = search(&b, 12.0);
        assert_eq!(s.depth, 1);
        assert_eq!(s.candidates.len(), 2);
        assert_eq!(s.candidates[1].path, vec![2]);
        assert_eq!(s.candidates[1].index, 1);

        let out = split(b, 12.0, 0.0);
        let widths: Vec<f32> = lines(&out).iter().map(|l| l.width()).collect();
        assert_eq!(widths, vec![9.0, 12.0]);
    }

    #[test]
    fn colored_run_is_split_into_two_colored_halves() {
        let colored: TexBox = ColorBox::new(
            run([block(4.0, 1.0, 0.0), glue(), block(4.0, 1.0, 0.0)]),
            Some(Color::RED),
            None,
        )
        .into();
        let b = run([block(6.0, 1.0, 0.0), colored]);
        let out = split(b, 12.0, 0.0);
        let lines = lines(&out);
        assert_eq!(lines.len(), 2);
        for line in lines {
            match line.descendants().last() {
                Some(TexBox::Color(c)) => assert_eq!(c.foreground(), Some(Color::RED)),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn nested_halves_keep_shift_and_tag() {
        let mut nested = run([block(4.0, 1.0, 0.0), glue(), block(4.0, 1.0, 0.0)])
            .tagged(crate::atom::AtomType::Inner);
        nested.set_shift(-1.5);
        let b = run([block(6.0, 1.0, 0.0), nested]);
        let out = split(b, 12.0, 0.0);
        for line in lines(&out) {
            let half = line.descendants().last().unwrap();
            assert_eq!(half.shift(), -1.5);
            assert_eq!(half.atom_type(), crate::atom::AtomType::Inner);
        }
    }

    #[test]
    fn line_space_separates_lines() {
        let b = run([block(5.0, 2.0, 1.0), glue(), block(5.0, 2.0, 1.0)]);
        let out = split(b, 6.0, 3.0);
        let TexBox::VBox(v) = &out else {
            panic!("expected lines, got {out:?}");
        };
        assert_eq!(v.len(), 3);
        assert_eq!(v.children()[1].height(), 3.0);
        assert!((out.height() + out.depth() - (3.0 + 3.0 + 3.0)).abs() < PREC);
    }

    #[test]
    fn non_horizontal_box_is_untouched() {
        let b: TexBox = VBox::from_children([block(30.0, 1.0, 0.0)]).into();
        let out = split(b, 10.0, 1.0);
        assert!(matches!(out, TexBox::VBox(_)));
        assert_eq!(out.width(), 30.0);
        assert!(search(&block(30.0, 1.0, 0.0), 10.0).cut.is_none());
    }

    #[test]
    fn fitting_box_is_untouched() {
        let b = run([block(5.0, 1.0, 0.0), glue(), block(5.0, 1.0, 0.0)]);
        let out = split(b, 20.0, 1.0);
        assert_eq!(out.descendants().len(), 3);
    }

    proptest! {
        #[test]
        fn lines_fit_and_keep_content(
            items in prop::collection::vec((1.0f32..8.0, any::<bool>()), 1..40),
        ) {
            let mut children = Vec::new();
            for &(w, glue_after) in &items {
                children.push(block(w, 1.0, 0.0));
                if glue_after {
                    children.push(glue());
                }
            }
            let total: f32 = items.iter().map(|(w, _)| w).sum();
            let out = split(run(children), 12.0, 0.5);
            let mut kept = 0.0;
            for line in lines(&out) {
                prop_assert!(line.width() <= 12.0 + PREC, "line of width {}", line.width());
                kept += line
                    .descendants()
                    .iter()
                    .filter(|c| !c.is_space())
                    .map(TexBox::width)
                    .sum::<f32>();
            }
            prop_assert!((kept - total).abs() < 1e-2);
        }
    }
}
