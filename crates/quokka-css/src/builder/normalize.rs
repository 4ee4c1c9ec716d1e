//! Anonymous boxes.
//!
//! [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
//!
//! "if a block container box (such as that generated for the DIV above)
//! has a block-level box inside it (such as the P above), then we force it
//! to have only block-level boxes inside it."
//!
//! [§ 17.2.1 Anonymous table objects](https://www.w3.org/TR/CSS2/tables.html#anonymous-boxes)
//!
//! "Document languages other than HTML may not contain all the elements in
//! the CSS 2.1 table model. In these cases, the "missing" elements must be
//! assumed in order for the table model to work."

use std::rc::Rc;

use crate::layout::box_tree::{BoxId, BoxKind, BoxTree};
use crate::layout::element::{is_block_in_flow, is_in_flow, is_whitespace};
use crate::layout::inline::collapses_spaces;
use crate::layout::text;
use crate::style::{ComputedStyle, Display};

use super::{BoxTreeBuilder, box_kind, may_contain_blocks};

/// Parents of the anonymous boxes created around misplaced table parts, in
/// the order the passes run: `(child display, accepted parents, display of
/// the anonymous parent)`.
const TABLE_PASSES: [(Display, &[Display], Display); 7] = [
    (Display::TableCell, &[Display::TableRow], Display::TableRow),
    (
        Display::TableRow,
        &[Display::TableRowGroup, Display::TableHeaderGroup, Display::TableFooterGroup],
        Display::TableRowGroup,
    ),
    (
        Display::TableColumn,
        &[Display::Table, Display::InlineTable, Display::TableColumnGroup],
        Display::Table,
    ),
    (Display::TableRowGroup, &[Display::Table, Display::InlineTable], Display::Table),
    (Display::TableHeaderGroup, &[Display::Table, Display::InlineTable], Display::Table),
    (Display::TableFooterGroup, &[Display::Table, Display::InlineTable], Display::Table),
    (Display::TableCaption, &[Display::Table, Display::InlineTable], Display::Table),
];

/// Inline content made of collapsible white space only.
pub(super) fn is_whitespace_box(tree: &BoxTree, id: BoxId) -> bool {
    match tree[id].kind {
        BoxKind::Text => is_whitespace(tree, id),
        BoxKind::Inline => {
            let children = &tree[id].children;
            !children.is_empty() && children.iter().all(|&c| is_whitespace_box(tree, c))
        }
        _ => false,
    }
}

impl BoxTreeBuilder<'_> {
    /// Create the anonymous boxes a finished box needs.
    pub(super) fn normalize_box(&mut self, id: BoxId) {
        let kind = self.tree[id].kind;
        let children = self.tree[id].children.clone();

        // STEP 1: Block containers hold blocks or inlines, never both.
        if matches!(kind, BoxKind::Flex | BoxKind::Grid) {
            if children.iter().any(|&c| !self.tree[c].is_block) {
                self.create_anonymous_blocks(id);
            }
        } else if may_contain_blocks(kind) && children.iter().any(|&c| is_block_in_flow(&self.tree, c)) {
            self.create_anonymous_blocks(id);
        } else if kind.is_element() && has_mixed_content(&self.tree, &children) {
            self.create_anonymous_inlines(id);
        }

        // STEP 2: Table parts get their missing parents.
        match self.tree[id].style.display {
            Display::Table | Display::InlineTable if kind == BoxKind::Table => {
                self.create_anonymous_wrappers(id, Display::TableRow, |d| d.is_proper_table_child());
            }
            d if d.is_row_group() => {
                self.create_anonymous_wrappers(id, Display::TableRow, |d| d == Display::TableRow);
            }
            Display::TableRow => {
                self.create_anonymous_wrappers(id, Display::TableCell, |d| d == Display::TableCell);
            }
            _ => {}
        }
        for (child, parents, anonymous) in TABLE_PASSES {
            self.create_anonymous_parents(id, child, parents, anonymous);
        }

        self.update_flow_flags(id);
    }

    /// Recompute what kind of content a block container holds.
    pub(super) fn update_flow_flags(&mut self, id: BoxId) {
        if !self.tree[id].kind.is_block_like() || self.tree[id].kind == BoxKind::Viewport {
            return;
        }
        let children = &self.tree[id].children;
        let contblock = children.iter().any(|&c| is_block_in_flow(&self.tree, c));
        let anyinflow = children.iter().any(|&c| is_in_flow(&self.tree, c));
        let b = &mut self.tree[id].block;
        b.contblock = contblock;
        b.anyinflow = anyinflow;
    }

    /// [§ 16.6.1 The 'white-space' processing model](https://www.w3.org/TR/CSS2/text.html#white-space-model)
    ///
    /// "If a space (U+0020) at the end of a line has 'white-space' set to
    /// 'normal', 'nowrap', or 'pre-line', it is also removed."
    ///
    /// Drop the collapsible white space at the end of a block's inline
    /// content.
    pub(super) fn remove_trailing_whitespace(&mut self, id: BoxId) {
        if !collapses_spaces(&self.tree, id) {
            return;
        }
        let mut index = self.tree[id].children.len();
        while index > 0 {
            index -= 1;
            let sub = self.tree[id].children[index];
            if !is_in_flow(&self.tree, sub) {
                continue;
            }
            if self.tree[sub].is_block || !collapses_spaces(&self.tree, sub) {
                break;
            }
            match self.tree[sub].kind {
                BoxKind::Text | BoxKind::Inline if is_whitespace_box(&self.tree, sub) => {
                    let _ = self.tree[id].remove_child(index);
                    self.tree[sub].parent = None;
                }
                BoxKind::Inline => {
                    self.remove_trailing_whitespace(sub);
                    break;
                }
                BoxKind::Text => {
                    text::remove_trailing_whitespace(&mut self.tree, sub);
                    break;
                }
                _ => break,
            }
        }
    }

    /// Anonymous box of `parent` with the given display. Tables get their
    /// wrapper; the returned pair is the principal box and the box
    /// receiving the children.
    fn create_anonymous(&mut self, parent: BoxId, display: Display, first: BoxId) -> (BoxId, BoxId) {
        let mut style = ComputedStyle::inherit_from(&self.tree[parent].style);
        style.display = display;
        let kind = box_kind(display, self.tree[parent].kind, false, false);
        let id = if kind == BoxKind::TableWrapper {
            self.create_table(style, None)
        } else {
            self.new_box(kind, Rc::new(style), None)
        };
        let target = self.content_box(id);
        let (cb, clip) = (self.tree[first].containing_block, self.tree[first].clip_block);
        for b in [id, target] {
            let b = &mut self.tree[b];
            b.anonymous = true;
            b.is_block = display.is_block_level();
            b.containing_block = cb;
            b.clip_block = clip;
        }
        if target != id {
            self.tree[target].containing_block = Some(id);
        }
        (id, target)
    }

    /// Wrap every run of inline-level children in an anonymous block.
    /// White space starting a run is dropped.
    fn create_anonymous_blocks(&mut self, id: BoxId) {
        let children = self.tree[id].children.clone();
        let mut nest = Vec::with_capacity(children.len());
        let mut adiv: Option<BoxId> = None;
        for sub in children {
            if self.tree[sub].is_block {
                if let Some(a) = adiv.take() {
                    self.finish_anonymous_block(a);
                }
                nest.push(sub);
            } else if adiv.is_some() || !is_whitespace_box(&self.tree, sub) {
                let a = match adiv {
                    Some(a) => a,
                    None => {
                        let (a, _) = self.create_anonymous(id, Display::Block, sub);
                        nest.push(a);
                        adiv = Some(a);
                        a
                    }
                };
                self.attach(a, sub);
            } else {
                self.tree[sub].parent = None;
            }
        }
        if let Some(a) = adiv {
            self.finish_anonymous_block(a);
        }
        self.set_children(id, nest);
    }

    fn finish_anonymous_block(&mut self, id: BoxId) {
        if !self.tree[id].empty {
            self.normalize_box(id);
            self.remove_trailing_whitespace(id);
        }
        self.update_flow_flags(id);
    }

    /// [§ 9.2.2.1 Anonymous inline boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous)
    ///
    /// "Any text that is directly contained inside a block container
    /// element (not inside an inline element) must be treated as an
    /// anonymous inline element."
    fn create_anonymous_inlines(&mut self, id: BoxId) {
        let children = self.tree[id].children.clone();
        let mut nest = Vec::with_capacity(children.len());
        for sub in children {
            if self.tree[sub].kind == BoxKind::Text {
                let (a, _) = self.create_anonymous(id, Display::Inline, sub);
                self.attach(a, sub);
                nest.push(a);
            } else {
                nest.push(sub);
            }
        }
        self.set_children(id, nest);
    }

    /// [§ 17.2.1 Anonymous table objects](https://www.w3.org/TR/CSS2/tables.html#anonymous-boxes)
    ///
    /// "If a child C of a 'table' or 'inline-table' box is not a proper
    /// table child, then generate an anonymous 'table-row' box around C and
    /// all consecutive siblings of C that are not proper table children."
    fn create_anonymous_wrappers(&mut self, id: BoxId, display: Display, allowed: impl Fn(Display) -> bool) {
        let children = self.tree[id].children.clone();
        let mut nest = Vec::with_capacity(children.len());
        let mut adiv: Option<BoxId> = None;
        for sub in children {
            if self.tree[sub].is_block && allowed(self.tree[sub].style.display) {
                if let Some(a) = adiv.take() {
                    self.finish_anonymous_wrapper(a);
                }
                nest.push(sub);
            } else if adiv.is_some() || !is_whitespace_box(&self.tree, sub) {
                let a = match adiv {
                    Some(a) => a,
                    None => {
                        let (a, _) = self.create_anonymous(id, display, sub);
                        nest.push(a);
                        adiv = Some(a);
                        a
                    }
                };
                self.attach(a, sub);
                self.tree[sub].containing_block = Some(a);
            } else {
                self.tree[sub].parent = None;
            }
        }
        if let Some(a) = adiv {
            self.finish_anonymous_wrapper(a);
        }
        self.set_children(id, nest);
    }

    fn finish_anonymous_wrapper(&mut self, id: BoxId) {
        self.normalize_box(id);
        if !self.tree[id].empty {
            self.remove_trailing_whitespace(id);
        }
    }

    /// "If a child C of a 'table-row' parent is not a 'table-cell', then
    /// generate an anonymous 'table-cell' box around C" and the other
    /// missing parents: consecutive children of one table display get a
    /// common anonymous parent unless `id` already is an accepted parent.
    ///
    /// Positioned children are skipped; text means the box holds inline
    /// content and nothing is done.
    fn create_anonymous_parents(&mut self, id: BoxId, child: Display, parents: &[Display], anonymous: Display) {
        if parents.contains(&self.tree[id].style.display) {
            return;
        }
        let children = self.tree[id].children.clone();
        if children.iter().any(|&c| self.tree[c].kind == BoxKind::Text)
            || !children.iter().any(|&c| self.is_table_part(c, child))
        {
            return;
        }
        let mut nest = Vec::with_capacity(children.len());
        let mut adiv: Option<(BoxId, BoxId)> = None;
        let mut created = Vec::new();
        for sub in children {
            if self.tree[sub].is_block && self.tree[sub].style.is_out_of_flow_positioned() {
                nest.push(sub);
            } else if !self.is_table_part(sub, child) {
                adiv = None;
                nest.push(sub);
            } else {
                let (principal, target) = match adiv {
                    Some(pair) => pair,
                    None => {
                        let pair = self.create_anonymous(id, anonymous, sub);
                        nest.push(pair.0);
                        created.push(pair.0);
                        adiv = Some(pair);
                        pair
                    }
                };
                self.attach(target, sub);
                self.tree[sub].containing_block = Some(principal);
            }
        }
        self.set_children(id, nest);
        for a in created {
            if self.tree[a].kind == BoxKind::TableWrapper {
                self.finish_table(a);
            } else {
                self.update_flow_flags(a);
            }
        }
    }

    fn is_table_part(&self, id: BoxId, display: Display) -> bool {
        let b = &self.tree[id];
        b.kind != BoxKind::Text && b.style.display == display
    }

    /// Replace the children of `id`, making it their parent.
    fn set_children(&mut self, id: BoxId, children: Vec<BoxId>) {
        for &c in &children {
            self.tree[c].parent = Some(id);
        }
        let empty = !children.iter().any(|&c| self.tree[c].displayed && !self.tree[c].empty);
        let b = &mut self.tree[id];
        b.set_children(children);
        if b.kind.is_element() && !b.kind.is_replaced() && b.kind != BoxKind::Viewport {
            b.empty = empty;
        }
    }
}

fn has_mixed_content(tree: &BoxTree, children: &[BoxId]) -> bool {
    children.iter().any(|&c| tree[c].kind == BoxKind::Text) && children.iter().any(|&c| tree[c].kind != BoxKind::Text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_passes_cover_every_part() {
        let children: Vec<Display> = TABLE_PASSES.iter().map(|(c, _, _)| *c).collect();
        assert_eq!(children.len(), 7);
        assert!(children.contains(&Display::TableCaption));
        assert!(TABLE_PASSES.iter().all(|(c, parents, _)| !parents.contains(c)));
    }
}
