//! Coordinate assignment for drawing the forest
//!
//! Pure recursive placement: each tree is laid out independently, roots
//! spaced left-to-right, children fanned out symmetrically below their
//! parent with spacing that tightens per level. All spacing state is
//! threaded through the recursion explicitly, so identical forests always
//! produce identical coordinates.

use std::collections::HashMap;

use crate::forest::Forest;
use crate::model::{Layout, LayoutEdge, Point};

/// Tunable spacing for the layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Horizontal offset between consecutive root nodes.
    pub root_spacing: f64,
    /// Horizontal spacing unit between siblings at the first level.
    pub level_dx: f64,
    /// Per-level divisor applied to the spacing unit. Must be > 1 so wide,
    /// deep trees stay bounded in width.
    pub shrink: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        LayoutParams {
            root_spacing: 5.0,
            level_dx: 1.5,
            shrink: 1.8,
        }
    }
}

/// Assign a coordinate to every node and resolve every link to a drawable
/// segment. Never fails on a well-formed forest; an empty forest yields an
/// empty layout and the caller renders its "nothing yet" state.
pub fn layout(forest: &Forest<'_>, params: &LayoutParams) -> Layout {
    let mut positions = HashMap::with_capacity(forest.page_count());
    for (i, root) in forest.roots().iter().enumerate() {
        place(
            forest,
            root,
            i as f64 * params.root_spacing,
            0.0,
            params.level_dx,
            params.shrink,
            &mut positions,
        );
    }

    let mut edges = Vec::new();
    for record in forest.pages() {
        for child in &record.children {
            // Both endpoints placed, or the relation is skipped: a missing
            // position signals an upstream invariant fault, not a render
            // failure.
            let (Some(&from), Some(&to)) =
                (positions.get(&record.title), positions.get(child))
            else {
                continue;
            };
            edges.push(LayoutEdge {
                parent: record.title.clone(),
                child: child.clone(),
                from,
                to,
            });
        }
    }

    Layout { positions, edges }
}

/// Place one node at `(x, y)` and fan its children out one level below,
/// centered on the parent, with spacing `dx / shrink` for the next level.
fn place(
    forest: &Forest<'_>,
    title: &str,
    x: f64,
    y: f64,
    dx: f64,
    shrink: f64,
    positions: &mut HashMap<String, Point>,
) {
    positions.insert(title.to_string(), Point { x, y });
    let children = forest.children(title);
    let n = children.len() as f64;
    for (i, child) in children.iter().enumerate() {
        let offset = (i as f64 - (n - 1.0) / 2.0) * dx;
        place(forest, child, x + offset, y - 1.0, dx / shrink, shrink, positions);
    }
}
