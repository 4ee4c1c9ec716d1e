//! Stacking contexts.
//!
//! [§ 9.9.1 Specifying the stack level: the 'z-index' property](https://www.w3.org/TR/CSS2/visuren.html#z-index)
//!
//! "Each box belongs to one stacking context. Each positioned box in a
//! given stacking context has an integer stack level, which is its position
//! on the z-axis relative other stack levels within the same stacking
//! context."
//!
//! Every positioned box (relative, absolute or fixed) opens a context of
//! its own; `z-index: auto` counts as level 0. The viewport is the root.

use crate::style::Position;

use super::box_tree::{BoxId, BoxKind, BoxTree};

/// A stacking context and the contexts nested in it.
#[derive(Debug, Clone, PartialEq)]
pub struct StackingContext {
    /// The box establishing the context.
    pub owner: BoxId,
    /// Stack level of the context within its parent.
    pub z_index: i32,
    /// Nested contexts by ascending stack level, tree order within a level.
    pub children: Vec<StackingContext>,
}

impl StackingContext {
    /// An empty context.
    #[must_use]
    pub const fn new(owner: BoxId, z_index: i32) -> Self {
        StackingContext {
            owner,
            z_index,
            children: Vec::new(),
        }
    }

    /// "the child stacking contexts with negative stack levels (most
    /// negative first)"
    pub fn negative(&self) -> impl Iterator<Item = &StackingContext> {
        self.children.iter().filter(|c| c.z_index < 0)
    }

    /// "the child stacking contexts with stack level 0 and the positioned
    /// descendants with stack level 0"
    pub fn zero(&self) -> impl Iterator<Item = &StackingContext> {
        self.children.iter().filter(|c| c.z_index == 0)
    }

    /// "the child stacking contexts with positive stack levels (least
    /// positive first)"
    pub fn positive(&self) -> impl Iterator<Item = &StackingContext> {
        self.children.iter().filter(|c| c.z_index > 0)
    }

    /// The context established by `owner`, searched depth first.
    #[must_use]
    pub fn find(&self, owner: BoxId) -> Option<&StackingContext> {
        if self.owner == owner {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(owner))
    }

    /// Owners of the nested contexts in painting order, depth first.
    #[must_use]
    pub fn paint_order(&self) -> Vec<BoxId> {
        let mut ret = vec![self.owner];
        for c in self.negative().chain(self.zero()).chain(self.positive()) {
            ret.extend(c.paint_order());
        }
        ret
    }

    fn sort(&mut self) {
        // stable: equal levels keep tree order
        self.children.sort_by_key(|c| c.z_index);
        for c in &mut self.children {
            c.sort();
        }
    }
}

/// The box opens a stacking context.
#[must_use]
pub fn forms_stacking_context(tree: &BoxTree, id: BoxId) -> bool {
    let b = &tree[id];
    b.kind == BoxKind::Viewport || (b.kind.is_element() && b.style.position != Position::Static)
}

/// Stack level of a box, `auto` being 0.
#[must_use]
pub fn z_index(tree: &BoxTree, id: BoxId) -> i32 {
    tree[id].style.z_index.unwrap_or(0)
}

/// Assemble the stacking contexts of a laid out tree and record the
/// stacking parent of every box.
pub fn build(tree: &mut BoxTree) -> Option<StackingContext> {
    let root = tree.root()?;
    let mut context = StackingContext::new(root, 0);
    collect(tree, root, &mut context);
    context.sort();
    Some(context)
}

fn collect(tree: &mut BoxTree, id: BoxId, context: &mut StackingContext) {
    let children = tree[id].active_children().to_vec();
    for c in children {
        tree[c].stacking_parent = Some(context.owner);
        if !tree[c].displayed {
            continue;
        }
        if forms_stacking_context(tree, c) {
            let mut nested = StackingContext::new(c, z_index(tree, c));
            collect(tree, c, &mut nested);
            context.children.push(nested);
        } else {
            collect(tree, c, context);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(owner: usize, z: i32, children: Vec<StackingContext>) -> StackingContext {
        StackingContext {
            owner: BoxId(owner),
            z_index: z,
            children,
        }
    }

    #[test]
    fn test_sort_is_stable_by_level() {
        let mut root = context(
            0,
            0,
            vec![context(1, 2, vec![]), context(2, 0, vec![]), context(3, -1, vec![]), context(4, 0, vec![])],
        );
        root.sort();
        let owners: Vec<usize> = root.children.iter().map(|c| c.owner.0).collect();
        assert_eq!(owners, vec![3, 2, 4, 1]);
    }

    #[test]
    fn test_paint_order_nests() {
        let mut root = context(
            0,
            0,
            vec![context(1, 1, vec![context(5, -3, vec![])]), context(2, -1, vec![])],
        );
        root.sort();
        assert_eq!(
            root.paint_order(),
            vec![BoxId(0), BoxId(2), BoxId(1), BoxId(5)]
        );
        assert_eq!(root.find(BoxId(5)).map(|c| c.z_index), Some(-3));
        assert!(root.find(BoxId(9)).is_none());
    }
}
