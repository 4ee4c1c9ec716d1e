//! Box tree construction.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! "The following sections describe the types of boxes that may be
//! generated in CSS 2.1. A box's type affects, in part, its behavior in the
//! visual formatting model."
//!
//! The builder walks the DOM depth first. Every element gets its principal
//! box from its used `display`, its children are built and added to it one
//! by one, and the finished box is normalized so
//! that block containers hold either only block-level or only inline-level
//! children and table parts sit inside complete tables.
//!
//! # Module Structure
//!
//! - [`counters`] - Counter scopes for generated content
//! - [`pseudo`] - Text of `::before` and `::after`
//! - [`html`] - Replaced elements and table attributes
//! - `normalize` - Anonymous boxes

pub mod counters;
pub mod html;
mod normalize;
pub mod pseudo;

use std::collections::VecDeque;
use std::rc::Rc;

use log::debug;
use quokka_common::warning::warn_once;
use quokka_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::layout::box_tree::{BoxId, BoxKind, BoxTree, LayoutBox};
use crate::layout::inline::{collapses_spaces, ends_with_whitespace, set_ignore_initial_ws};
use crate::layout::list_item::marker_text;
use crate::layout::replaced::{NoContent, ReplacedContentSource};
use crate::layout::text::collapse_whitespace;
use crate::layout::visual_context::VisualContext;
use crate::style::{
    ComputedStyle, Display, Float, Length, LengthOrAuto, ListStylePosition, ListStyleType, Overflow,
    Position, PseudoElement, Sides, StyleResolver,
};

pub use counters::Counters;
pub use pseudo::generated_text;

static NO_CONTENT: NoContent = NoContent;

/// State shared by the whole build, threaded through the recursion.
#[derive(Debug)]
pub struct BuilderContext {
    /// Counters of the elements on the current path.
    pub counters: Counters,
    /// Document order given to the next box.
    pub next_order: usize,
    /// The viewport box.
    pub viewport: BoxId,
    /// `overflow` of the root or the body has been moved to the viewport.
    pub overflow_propagated: bool,
}

/// The boxes the children of an element are placed against.
///
/// One value per tree level; a child level starts as a copy of its parent
/// level.
#[derive(Debug, Clone, Copy)]
pub struct BuildLevel {
    /// Box receiving the children.
    pub parent: BoxId,
    /// Nearest block container, the containing block of in-flow content.
    pub contbox: BoxId,
    /// Nearest positioned block, the containing block of absolute boxes.
    pub absbox: BoxId,
    /// Nearest box clipping its content.
    pub clipbox: BoxId,
    /// Last in-flow box added at this level.
    pub last_inflow: Option<BoxId>,
}

impl BuildLevel {
    const fn new(viewport: BoxId) -> Self {
        BuildLevel {
            parent: viewport,
            contbox: viewport,
            absbox: viewport,
            clipbox: viewport,
            last_inflow: None,
        }
    }
}

/// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
///
/// "When an inline box contains an in-flow block-level box, the inline box
/// (and its inline ancestors within the same line box) are broken around
/// the block-level box"
///
/// Progress of one element whose content is being added.
#[derive(Debug)]
struct SplitWork {
    /// The piece of the element currently receiving content.
    twin: BoxId,
    /// Finished pieces and the blocks between them, in order.
    pending: Vec<BoxId>,
}

impl SplitWork {
    const fn new(twin: BoxId) -> Self {
        SplitWork {
            twin,
            pending: Vec::new(),
        }
    }
}

/// Builds a [`BoxTree`] from a DOM tree and computed styles.
pub struct BoxTreeBuilder<'a> {
    dom: &'a DomTree,
    styles: &'a dyn StyleResolver,
    visual: &'a dyn VisualContext,
    config: &'a LayoutConfig,
    content: &'a dyn ReplacedContentSource,
    tree: BoxTree,
    ctx: BuilderContext,
}

impl<'a> BoxTreeBuilder<'a> {
    /// A builder without replaced content: images keep the size given by
    /// their attributes and styles.
    #[must_use]
    pub fn new(
        dom: &'a DomTree,
        styles: &'a dyn StyleResolver,
        visual: &'a dyn VisualContext,
        config: &'a LayoutConfig,
    ) -> Self {
        BoxTreeBuilder {
            dom,
            styles,
            visual,
            config,
            content: &NO_CONTENT,
            tree: BoxTree::new(),
            ctx: BuilderContext {
                counters: Counters::new(),
                next_order: 0,
                viewport: BoxId(0),
                overflow_propagated: false,
            },
        }
    }

    /// Use `content` to find the intrinsic size of images and objects.
    #[must_use]
    pub fn with_content_source(mut self, content: &'a dyn ReplacedContentSource) -> Self {
        self.content = content;
        self
    }

    /// Build the tree of the document element.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::MissingDocumentElement`] when the document has
    /// no element.
    pub fn build(self) -> Result<BoxTree> {
        let root = self.dom.document_element().ok_or(LayoutError::MissingDocumentElement)?;
        self.build_from(root)
    }

    /// Build the tree of any element, which becomes the root element.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownNode`] when `root` is not an element of
    /// the document.
    pub fn build_from(mut self, root: NodeId) -> Result<BoxTree> {
        if self.dom.as_element(root).is_none() {
            return Err(LayoutError::UnknownNode(root));
        }

        // STEP 1: The viewport is the initial containing block.
        let viewport = self.create_viewport();
        let mut level = BuildLevel::new(viewport);
        let mut split = SplitWork::new(viewport);

        // STEP 2: Build the root element and everything below.
        let mut work: VecDeque<BoxId> = self.create_subtree(root, root, &mut level)?.into();
        while let Some(piece) = work.pop_front() {
            self.add_to_tree(piece, &mut level, &mut split);
        }

        // STEP 3: Normalize the top level.
        self.normalize_box(viewport);
        self.remove_trailing_whitespace(viewport);

        self.tree.viewport.root_box = self.tree.box_for_node(root);
        self.tree.root_font_size = self
            .tree
            .viewport
            .root_box
            .map_or(self.config.default_font_size, |r| self.tree[r].style.font_size);
        self.tree.seal();

        debug!(
            target: "quokka::builder",
            "built {} boxes for {:?}",
            self.tree.len(),
            self.dom.tag_name(root)
        );
        Ok(self.tree)
    }

    /// [§ 9.1.1 The viewport](https://www.w3.org/TR/CSS2/visuren.html#viewport)
    fn create_viewport(&mut self) -> BoxId {
        let mut style = ComputedStyle::initial(&self.config.default_font_family, self.config.default_font_size);
        style.display = Display::Block;
        if self.config.clip_viewport {
            style.overflow = Overflow::Hidden;
        }
        let id = self.new_box(BoxKind::Viewport, Rc::new(style), None);
        let b = &mut self.tree[id];
        b.is_block = true;
        b.empty = false;
        b.block.contblock = true;
        self.tree.set_root(id);
        self.ctx.viewport = id;
        id
    }

    fn new_box(&mut self, kind: BoxKind, style: Rc<ComputedStyle>, node: Option<NodeId>) -> BoxId {
        let mut b = LayoutBox::new(kind, style, self.visual, self.config);
        b.node = node;
        b.order = self.ctx.next_order;
        self.ctx.next_order += 1;
        self.tree.alloc(b)
    }

    /// Build the boxes of a DOM node.
    ///
    /// Returns the pieces to add to the parent level in order: usually the
    /// principal box alone, several when an inline element was split around
    /// blocks, none for `display: none`, comments and collapsed text.
    fn create_subtree(&mut self, node: NodeId, root: NodeId, level: &mut BuildLevel) -> Result<Vec<BoxId>> {
        let dom = self.dom;
        let Some(n) = dom.get(node) else {
            return Err(LayoutError::UnknownNode(node));
        };
        match &n.node_type {
            NodeType::Text(text) => Ok(self.create_text_box(Some(node), text, level).into_iter().collect()),
            NodeType::Element(element) => self.create_element_subtree(node, element, root, level),
            NodeType::Document | NodeType::Comment(_) => Ok(Vec::new()),
        }
    }

    fn create_element_subtree(
        &mut self,
        node: NodeId,
        element: &ElementData,
        root: NodeId,
        level: &mut BuildLevel,
    ) -> Result<Vec<BoxId>> {
        let Some(style) = self.styles.element_style(self.dom, node) else {
            return Ok(Vec::new());
        };
        // STEP 1: Counters of the element are visible to its following
        // siblings, so they are applied in the parent scope.
        self.ctx.counters.apply_style(&style);
        if style.display == Display::None {
            return Ok(Vec::new());
        }

        // STEP 2: The principal box.
        let id = self.create_element_box(node, Some(element), style, None, node == root, level);
        if self.tree[id].kind.is_replaced() {
            return Ok(vec![id]);
        }

        // STEP 3: The content.
        let mut child_level = self.child_level(id, level);
        let mut split = SplitWork::new(child_level.parent);
        self.ctx.counters.push_scope();

        self.add_inside_marker(id, level, &mut child_level);
        self.create_pseudo(node, element, PseudoElement::Before, &mut child_level, &mut split)?;
        if self.config.use_html
            && let Some(alt) = html::alt_text(element)
            && self.tree[id].kind == BoxKind::Inline
        {
            let alt = alt.to_string();
            self.add_text(None, &alt, &mut child_level, &mut split);
        }
        let dom = self.dom;
        for &child in dom.children(node) {
            let mut work: VecDeque<BoxId> = self.create_subtree(child, root, &mut child_level)?.into();
            while let Some(piece) = work.pop_front() {
                self.add_to_tree(piece, &mut child_level, &mut split);
            }
        }
        self.create_pseudo(node, element, PseudoElement::After, &mut child_level, &mut split)?;

        self.ctx.counters.pop_scope();

        // STEP 4: Normalize and hand the pieces to the parent level.
        Ok(self.finish_element(id, split))
    }

    /// [§ 12.1 The :before and :after pseudo-elements](https://www.w3.org/TR/CSS2/generate.html#before-after-content)
    ///
    /// "The :before and :after pseudo-elements interact with other boxes as
    /// if they were real elements inserted just inside their associated
    /// element."
    fn create_pseudo(
        &mut self,
        node: NodeId,
        element: &ElementData,
        pseudo: PseudoElement,
        level: &mut BuildLevel,
        split: &mut SplitWork,
    ) -> Result<()> {
        let Some(style) = self.styles.pseudo_style(self.dom, node, pseudo) else {
            return Ok(());
        };
        self.ctx.counters.apply_style(&style);
        let Some(content) = style.content.clone() else {
            return Ok(());
        };
        if content.is_empty() || style.display == Display::None {
            return Ok(());
        }
        let text = generated_text(&content, Some(element), &self.ctx.counters);

        let id = self.create_element_box(node, None, style, Some(pseudo), false, level);
        if self.tree[id].kind.is_replaced() {
            return Ok(());
        }
        let mut child_level = self.child_level(id, level);
        let mut child_split = SplitWork::new(child_level.parent);
        self.add_text(None, &text, &mut child_level, &mut child_split);

        for piece in self.finish_element(id, child_split) {
            self.add_to_tree(piece, level, split);
        }
        Ok(())
    }

    /// [§ 12.5 Lists](https://www.w3.org/TR/CSS2/generate.html#lists)
    ///
    /// "The marker box is placed as the first inline box in the principal
    /// block box, before the element's content and before any :before
    /// pseudo-elements."
    fn add_inside_marker(&mut self, id: BoxId, level: &BuildLevel, child_level: &mut BuildLevel) {
        let style = Rc::clone(&self.tree[id].style);
        if self.tree[id].kind != BoxKind::ListItem
            || !self.config.generate_markers
            || style.list_style_position != ListStylePosition::Inside
            || style.list_style_type == ListStyleType::None
        {
            return;
        }
        let text = match style.list_style_type {
            ListStyleType::Disc => "\u{2022} ".to_string(),
            ListStyleType::Circle => "\u{25e6} ".to_string(),
            ListStyleType::Square => "\u{25aa} ".to_string(),
            other => {
                let number = self.tree[level.parent]
                    .children
                    .iter()
                    .filter(|&&c| self.tree[c].kind == BoxKind::ListItem)
                    .count();
                let number = i32::try_from(number).unwrap_or(i32::MAX - 1) + 1;
                marker_text(number, other).unwrap_or_default()
            }
        };
        // appended directly: a marker never collapses
        if let Some(marker) = self.create_text_box(None, &text, child_level) {
            self.append(child_level.parent, marker);
            child_level.last_inflow = Some(marker);
            self.tree[id].list_item.inside_marker = Some(marker);
        }
    }

    fn add_text(&mut self, node: Option<NodeId>, text: &str, level: &mut BuildLevel, split: &mut SplitWork) {
        if let Some(id) = self.create_text_box(node, text, level) {
            self.add_to_tree(id, level, split);
        }
    }

    /// [§ 9.2.2.1 Anonymous inline boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous)
    ///
    /// A text box inherits the style of the box it is placed in. Its white
    /// space is collapsed once here.
    fn create_text_box(&mut self, node: Option<NodeId>, text: &str, level: &BuildLevel) -> Option<BoxId> {
        if text.is_empty() {
            return None;
        }
        let mut style = ComputedStyle::inherit_from(&self.tree[level.parent].style);
        style.display = Display::Inline;
        let collapsed = collapse_whitespace(text, style.white_space);
        if collapsed.is_empty() {
            return None;
        }
        let id = self.new_box(BoxKind::Text, Rc::new(style), node);
        let b = &mut self.tree[id];
        b.empty = collapsed.trim().is_empty();
        b.text.end = collapsed.len();
        b.text.text = collapsed;
        b.containing_block = Some(level.contbox);
        b.clip_block = Some(level.clipbox);
        Some(id)
    }

    /// Create the principal box of an element or pseudo-element. Its
    /// content is not built yet.
    fn create_element_box(
        &mut self,
        node: NodeId,
        element: Option<&ElementData>,
        mut style: ComputedStyle,
        pseudo: Option<PseudoElement>,
        is_root: bool,
        level: &BuildLevel,
    ) -> BoxId {
        let parent_kind = self.tree[level.parent].kind;

        // STEP 1: Used display.
        let replaced = match element {
            Some(e) if self.config.use_html => html::replaced_kind(e, self.config),
            _ => None,
        };
        if style.is_out_of_flow_positioned() {
            style.float = Float::None;
        }
        style.display = used_display(&style, parent_kind, is_root);

        // STEP 2: Overflow of the root element or the body moves to the
        // viewport.
        if pseudo.is_none() {
            self.propagate_overflow(node, &mut style, is_root);
        }

        // STEP 3: The box.
        let kind = box_kind(style.display, parent_kind, replaced.is_some(), style.is_out_of_flow_positioned());
        let is_block = style.display.is_block_level();
        let id = if kind == BoxKind::TableWrapper {
            self.create_table(style, Some(node))
        } else {
            self.new_box(kind, Rc::new(style), Some(node))
        };
        {
            let viewport = self.ctx.viewport;
            let b = &mut self.tree[id];
            b.pseudo = pseudo;
            b.tag = element.map(|e| e.tag_name.clone());
            b.is_block = is_block;
            b.root = is_root;
            b.clip_block = Some(level.clipbox);
            b.containing_block = Some(if !b.kind.is_block_like() {
                level.contbox
            } else {
                match b.style.position {
                    Position::Absolute => level.absbox,
                    Position::Fixed => viewport,
                    Position::Static | Position::Relative => level.contbox,
                }
            });
        }

        // STEP 4: HTML attributes.
        if let Some(element) = element
            && self.config.use_html
        {
            if let Some(replaced) = replaced {
                html::init_replaced(&mut self.tree, id, replaced, element, self.content, self.config);
            }
            html::apply_table_attributes(&mut self.tree, id, element);
        }
        id
    }

    /// [§ 11.1.1 Overflow](https://www.w3.org/TR/CSS2/visufx.html#overflow)
    ///
    /// "UAs must apply the 'overflow' property set on the root element to
    /// the viewport. When the root element is an HTML "html" element whose
    /// 'overflow' value is 'visible', and that element has a "body" element
    /// as a child, user agents must instead apply the 'overflow' property
    /// from the first such child element to the viewport."
    fn propagate_overflow(&mut self, node: NodeId, style: &mut ComputedStyle, is_root: bool) {
        if self.ctx.overflow_propagated {
            return;
        }
        let is_body = self.config.use_html && self.dom.body() == Some(node);
        if !(is_root || is_body) {
            return;
        }
        if is_root && style.overflow == Overflow::Visible {
            return;
        }
        self.ctx.overflow_propagated = true;
        if style.overflow == Overflow::Visible {
            return;
        }
        if !self.config.clip_viewport {
            let viewport = self.ctx.viewport;
            let mut vstyle = (*self.tree[viewport].style).clone();
            vstyle.overflow = style.overflow;
            self.tree[viewport].style = Rc::new(vstyle);
        }
        style.overflow = Overflow::Visible;
    }

    /// [§ 17.4 Tables in the visual formatting model](https://www.w3.org/TR/CSS2/tables.html#model)
    ///
    /// "The computed values of properties 'position', 'float',
    /// 'margin-*', 'top', 'right', 'bottom', and 'left' on the table
    /// element are used on the table wrapper box and not the table box;
    /// all other values of non-inheritable properties are used on the
    /// table box and not the table wrapper box."
    ///
    /// Returns the wrapper; the table box is its first child.
    fn create_table(&mut self, style: ComputedStyle, node: Option<NodeId>) -> BoxId {
        let mut wrapper_style = ComputedStyle::inherit_from(&style);
        wrapper_style.display = if style.display == Display::InlineTable {
            Display::InlineBlock
        } else {
            Display::Block
        };
        wrapper_style.position = style.position;
        wrapper_style.float = style.float;
        wrapper_style.clear = style.clear;
        wrapper_style.inset = style.inset;
        wrapper_style.margin = style.margin;
        wrapper_style.z_index = style.z_index;
        wrapper_style.vertical_align = style.vertical_align;

        let mut table_style = style;
        table_style.display = Display::Table;
        table_style.position = Position::Static;
        table_style.float = Float::None;
        table_style.inset = Sides::all(LengthOrAuto::Auto);
        table_style.margin = Sides::all(LengthOrAuto::Length(Length::ZERO));
        table_style.z_index = None;

        let wrapper = self.new_box(BoxKind::TableWrapper, Rc::new(wrapper_style), node);
        let table = self.new_box(BoxKind::Table, Rc::new(table_style), node);
        self.tree[table].is_block = true;
        self.tree[table].containing_block = Some(wrapper);
        self.attach(wrapper, table);
        wrapper
    }

    /// The level the content of a new box is built in.
    fn child_level(&mut self, id: BoxId, level: &BuildLevel) -> BuildLevel {
        let mut child = *level;
        child.parent = self.content_box(id);
        if !may_contain_blocks(self.tree[id].kind) {
            return child;
        }
        child.last_inflow = None;
        child.contbox = child.parent;

        let b = &self.tree[id];
        let clips = b.style.overflow != Overflow::Visible;
        if b.style.position == Position::Static {
            if clips {
                child.clipbox = id;
            }
        } else {
            // a positioned box is clipped by its containing block, not by
            // the box it appears in
            let cb = b.containing_block.unwrap_or(self.ctx.viewport);
            let cbox = &self.tree[cb];
            let clip = match cbox.clip_block {
                Some(clip) if cbox.style.overflow == Overflow::Visible => clip,
                _ => cb,
            };
            self.tree[id].clip_block = Some(clip);
            child.absbox = id;
            child.clipbox = if clips { id } else { clip };
        }
        child
    }

    /// The box receiving the content of `id`: the table box of a wrapper,
    /// the box itself otherwise.
    fn content_box(&self, id: BoxId) -> BoxId {
        if self.tree[id].kind == BoxKind::TableWrapper {
            self.tree[id].children.first().copied().unwrap_or(id)
        } else {
            id
        }
    }

    /// Append `child` to `parent` and keep the white space and emptiness of
    /// `parent` consistent.
    fn append(&mut self, parent: BoxId, child: BoxId) {
        let last_inline = self.tree[parent]
            .children
            .iter()
            .rev()
            .copied()
            .find(|&c| matches!(self.tree[c].kind, BoxKind::Text | BoxKind::Inline));
        self.attach(parent, child);
        if let Some(last) = last_inline
            && collapses_spaces(&self.tree, last)
            && ends_with_whitespace(&self.tree, last)
        {
            set_ignore_initial_ws(&mut self.tree, child, true);
        }
    }

    /// Make `child` the last child of `parent`.
    fn attach(&mut self, parent: BoxId, child: BoxId) {
        self.tree[parent].push_child(child);
        self.tree[child].parent = Some(parent);
        if self.tree[child].displayed && !self.tree[child].empty {
            self.tree[parent].empty = false;
        }
    }

    /// Add a finished box to the level.
    ///
    /// - Absolutely positioned and fixed blocks go to their containing block.
    /// - Other blocks go to the parent when it may contain blocks; inside
    ///   an inline the inline is split around them.
    /// - Inline content is dropped when it is collapsible white space
    ///   following white space or a block.
    fn add_to_tree(&mut self, id: BoxId, level: &mut BuildLevel, split: &mut SplitWork) {
        let b = &self.tree[id];
        if b.is_block {
            if b.kind.is_block_like() && b.style.is_out_of_flow_positioned() {
                let cb = b.containing_block.unwrap_or(self.ctx.viewport);
                let bs = &mut self.tree[id].block;
                bs.dom_parent = Some(level.parent);
                bs.abs_reference = level.last_inflow;
                self.attach(cb, id);
            } else if may_contain_blocks(self.tree[level.parent].kind) {
                self.attach(level.parent, id);
                level.last_inflow = Some(id);
            } else {
                self.split_inline(id, level, split);
            }
            return;
        }

        let lastwhite = match level.last_inflow {
            None => true,
            Some(last) => {
                self.tree[last].is_block
                    || (collapses_spaces(&self.tree, last) && ends_with_whitespace(&self.tree, last))
            }
        };
        let collapsed = lastwhite
            && self.tree[id].kind != BoxKind::InlineBlock
            && collapses_spaces(&self.tree, id)
            && normalize::is_whitespace_box(&self.tree, id);
        if !collapsed {
            self.append(level.parent, id);
            level.last_inflow = Some(id);
        }
    }

    /// Close the current piece of an inline and continue the content in a
    /// new piece after `block`.
    fn split_inline(&mut self, block: BoxId, level: &mut BuildLevel, split: &mut SplitWork) {
        let finished = split.twin;
        if finished == self.ctx.viewport {
            warn_once("builder", "block content without a block container");
            self.attach(finished, block);
            return;
        }
        self.normalize_box(finished);

        let twin = self.tree.copy_box(finished);
        {
            let max_split = self
                .tree
                .ids()
                .filter(|&i| self.tree[i].order == self.tree[finished].order)
                .map(|i| self.tree[i].split_id)
                .max()
                .unwrap_or(0);
            let b = &mut self.tree[twin];
            b.set_children(Vec::new());
            b.split_id = max_split + 1;
            b.parent = None;
            b.empty = true;
        }
        split.pending.push(finished);
        split.pending.push(block);
        split.twin = twin;
        level.parent = twin;
        level.last_inflow = None;
    }

    /// Normalize the last piece of an element and return every piece.
    fn finish_element(&mut self, id: BoxId, split: SplitWork) -> Vec<BoxId> {
        let last = split.twin;
        if self.tree[id].kind == BoxKind::TableWrapper {
            let table = self.content_box(id);
            self.normalize_box(table);
            self.finish_table(id);
            return vec![id];
        }
        self.normalize_box(last);
        if may_contain_blocks(self.tree[last].kind) {
            self.remove_trailing_whitespace(last);
        }

        let mut pieces = split.pending;
        if pieces.is_empty() || !self.tree[last].children.is_empty() {
            pieces.push(last);
        }
        pieces
    }

    /// Move the captions of a table to its wrapper, on the side they belong.
    fn finish_table(&mut self, wrapper: BoxId) {
        let table = self.content_box(wrapper);
        if table == wrapper {
            return;
        }
        let children = self.tree[table].children.clone();
        let (captions, rest): (Vec<BoxId>, Vec<BoxId>) = children
            .into_iter()
            .partition(|&c| self.tree[c].kind == BoxKind::TableCaption);
        self.tree[table].set_children(rest);
        self.tree[wrapper].set_children(vec![table]);
        for caption in captions {
            self.tree[caption].containing_block = Some(wrapper);
            self.attach(wrapper, caption);
        }
        self.update_flow_flags(table);
        self.update_flow_flags(wrapper);
        if !self.tree[table].empty {
            self.tree[wrapper].empty = false;
        }
    }
}

/// Block-level and inline-level boxes may be placed in the box: it is a
/// block container.
const fn may_contain_blocks(kind: BoxKind) -> bool {
    kind.is_block_like() && !kind.is_replaced()
}

/// [§ 9.7 Relationships between 'display', 'position', and 'float'](https://www.w3.org/TR/CSS2/visuren.html#dis-pos-flo)
///
/// "Otherwise, if 'float' has a value other than 'none', the box is
/// floated and 'display' is set according to the table below."
///
/// Floats, absolutely positioned boxes, the root element and the children
/// of flex and grid containers are blockified.
fn used_display(style: &ComputedStyle, parent_kind: BoxKind, is_root: bool) -> Display {
    let blockify = is_root
        || style.float != Float::None
        || style.is_out_of_flow_positioned()
        || matches!(parent_kind, BoxKind::Flex | BoxKind::Grid);
    if !blockify {
        return style.display;
    }
    match style.display {
        Display::InlineTable => Display::Table,
        Display::InlineFlex => Display::Flex,
        Display::InlineGrid => Display::Grid,
        Display::Inline
        | Display::InlineBlock
        | Display::TableRowGroup
        | Display::TableHeaderGroup
        | Display::TableFooterGroup
        | Display::TableRow
        | Display::TableColumnGroup
        | Display::TableColumn
        | Display::TableCell
        | Display::TableCaption => Display::Block,
        other => other,
    }
}

/// The box kind generated for a used display.
fn box_kind(display: Display, parent_kind: BoxKind, replaced: bool, positioned: bool) -> BoxKind {
    if replaced {
        return if display.is_block_level() {
            BoxKind::BlockReplaced
        } else {
            BoxKind::InlineReplaced
        };
    }
    let item = match parent_kind {
        BoxKind::Flex if !positioned => Some(BoxKind::FlexItem),
        BoxKind::Grid if !positioned => Some(BoxKind::GridItem),
        _ => None,
    };
    if let Some(item) = item
        && matches!(display, Display::Block | Display::ListItem | Display::InlineBlock)
    {
        return item;
    }
    match display {
        Display::Block => BoxKind::Block,
        Display::ListItem => BoxKind::ListItem,
        Display::InlineBlock => BoxKind::InlineBlock,
        Display::Inline | Display::None => BoxKind::Inline,
        Display::Table | Display::InlineTable => BoxKind::TableWrapper,
        Display::TableRowGroup | Display::TableHeaderGroup | Display::TableFooterGroup => BoxKind::TableBody,
        Display::TableRow => BoxKind::TableRow,
        Display::TableCell => BoxKind::TableCell,
        Display::TableCaption => BoxKind::TableCaption,
        Display::TableColumn => BoxKind::TableColumn,
        Display::TableColumnGroup => BoxKind::TableColumnGroup,
        Display::Flex | Display::InlineFlex => BoxKind::Flex,
        Display::Grid | Display::InlineGrid => BoxKind::Grid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blockify_floats_and_items() {
        let mut style = ComputedStyle::default();
        style.display = Display::Inline;
        assert_eq!(used_display(&style, BoxKind::Block, false), Display::Inline);
        assert_eq!(used_display(&style, BoxKind::Flex, false), Display::Block);
        assert_eq!(used_display(&style, BoxKind::Block, true), Display::Block);

        style.float = Float::Left;
        style.display = Display::InlineTable;
        assert_eq!(used_display(&style, BoxKind::Block, false), Display::Table);
    }

    #[test]
    fn test_box_kinds() {
        assert_eq!(box_kind(Display::Block, BoxKind::Flex, false, false), BoxKind::FlexItem);
        assert_eq!(box_kind(Display::Block, BoxKind::Flex, false, true), BoxKind::Block);
        assert_eq!(box_kind(Display::Block, BoxKind::Grid, false, false), BoxKind::GridItem);
        assert_eq!(box_kind(Display::Inline, BoxKind::Block, true, false), BoxKind::InlineReplaced);
        assert_eq!(box_kind(Display::TableHeaderGroup, BoxKind::Table, false, false), BoxKind::TableBody);
        assert_eq!(box_kind(Display::InlineTable, BoxKind::Block, false, false), BoxKind::TableWrapper);
    }
}
