//! The box tree arena.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! "The following sections describe the types of boxes that may be
//! generated in CSS 2.1. A box's type affects, in part, its behavior in the
//! visual formatting model."
//!
//! Every box lives in one `Vec<LayoutBox>` and refers to its relatives by
//! [`BoxId`]. A box carries one shared set of geometry fields plus a state
//! struct per box family; only the states matching its [`BoxKind`] are used.

use std::ops::{Index, IndexMut};
use std::rc::Rc;

use quokka_dom::NodeId;
use serde::Serialize;

use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::style::{ComputedStyle, PseudoElement, Sides};

use super::float_list::{FloatEntry, FloatList};
use super::geometry::{Dimension, LengthSet, Rect};
use super::line::LineBox;
use super::stacking::StackingContext;
use super::visual_context::{FontMetrics, FontSpec, VisualContext};

/// Index of a box in the [`BoxTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BoxId(pub usize);

/// Index of a float list in the [`BoxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FloatListId(pub usize);

/// The closed set of box types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BoxKind {
    /// [§ 9.1.1 The viewport](https://www.w3.org/TR/CSS2/visuren.html#viewport)
    Viewport,
    /// A block container box.
    Block,
    /// An inline-level block container.
    InlineBlock,
    /// A non-replaced inline box.
    Inline,
    /// A run of text.
    Text,
    /// The principal box of a `display: list-item` element.
    ListItem,
    /// A block-level replaced element.
    BlockReplaced,
    /// An inline-level replaced element.
    InlineReplaced,
    /// [§ 17.4 Tables in the visual formatting model](https://www.w3.org/TR/CSS2/tables.html#model)
    ///
    /// "the table generates a principal block container box called the
    /// table wrapper box that contains the table box itself and any caption
    /// boxes"
    TableWrapper,
    /// The table box inside a wrapper.
    Table,
    /// A caption inside a table wrapper.
    TableCaption,
    /// A row group.
    TableBody,
    /// A table row.
    TableRow,
    /// A table cell.
    TableCell,
    /// A column. Never laid out, only aggregates widths.
    TableColumn,
    /// A column group.
    TableColumnGroup,
    /// A flex container.
    Flex,
    /// A block-like child of a flex container.
    FlexItem,
    /// A grid container.
    Grid,
    /// A block-like child of a grid container.
    GridItem,
}

/// The layout algorithm a box kind dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStrategy {
    /// The root of the tree.
    Viewport,
    /// Block container layout.
    Block,
    /// Inline box layout.
    Inline,
    /// Text splitting.
    Text,
    /// Replaced content with a fixed size.
    Replaced,
    /// Table wrapper with captions.
    TableWrapper,
    /// Column width distribution.
    Table,
    /// Row group with the cell matrix.
    TableBody,
    /// Table row.
    TableRow,
    /// Nothing to lay out.
    Column,
    /// Flexbox.
    Flex,
    /// Grid.
    Grid,
}

impl BoxKind {
    /// The algorithm laying out boxes of this kind.
    #[must_use]
    pub const fn strategy(self) -> LayoutStrategy {
        match self {
            BoxKind::Viewport => LayoutStrategy::Viewport,
            BoxKind::Block
            | BoxKind::InlineBlock
            | BoxKind::ListItem
            | BoxKind::TableCaption
            | BoxKind::TableCell
            | BoxKind::FlexItem
            | BoxKind::GridItem => LayoutStrategy::Block,
            BoxKind::Inline => LayoutStrategy::Inline,
            BoxKind::Text => LayoutStrategy::Text,
            BoxKind::BlockReplaced | BoxKind::InlineReplaced => LayoutStrategy::Replaced,
            BoxKind::TableWrapper => LayoutStrategy::TableWrapper,
            BoxKind::Table => LayoutStrategy::Table,
            BoxKind::TableBody => LayoutStrategy::TableBody,
            BoxKind::TableRow => LayoutStrategy::TableRow,
            BoxKind::TableColumn | BoxKind::TableColumnGroup => LayoutStrategy::Column,
            BoxKind::Flex => LayoutStrategy::Flex,
            BoxKind::Grid => LayoutStrategy::Grid,
        }
    }

    /// Kinds that hold a `BlockState`: every block container and the boxes
    /// that reuse its sizing.
    #[must_use]
    pub const fn is_block_like(self) -> bool {
        !matches!(
            self,
            BoxKind::Inline
                | BoxKind::Text
                | BoxKind::TableColumn
                | BoxKind::TableColumnGroup
        )
    }

    /// Kinds that are element boxes with children.
    #[must_use]
    pub const fn is_element(self) -> bool {
        !matches!(self, BoxKind::Text)
    }

    /// Replaced element kinds.
    #[must_use]
    pub const fn is_replaced(self) -> bool {
        matches!(self, BoxKind::BlockReplaced | BoxKind::InlineReplaced)
    }
}

/// Equality key of a box: two boxes are the same if they come from the same
/// place in the document and the same split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoxIdentity {
    /// Document traversal index.
    pub order: usize,
    /// 0 for the original box, incremented for every split continuation.
    pub split_id: usize,
}

/// State of block containers.
#[derive(Debug, Clone, Default)]
pub struct BlockState {
    /// Left float list of the formatting context this box lays out in.
    pub fleft: Option<FloatListId>,
    /// Right float list.
    pub fright: Option<FloatListId>,
    /// The list a floating box was placed in.
    pub fown: Option<FloatListId>,
    /// Left content edge distance from the float list owner's left content edge.
    pub float_xl: f32,
    /// Right content edge distance from the float list owner's right content edge.
    pub float_xr: f32,
    /// Content top distance from the float list owner's content top.
    pub float_y: f32,
    /// Used `min-width`, `None` when unset.
    pub min_width: Option<f32>,
    /// Used `min-height`, `None` when unset.
    pub min_height: Option<f32>,
    /// Used `max-width`, `None` for `none`.
    pub max_width: Option<f32>,
    /// Used `max-height`, `None` for `none`.
    pub max_height: Option<f32>,
    /// Contains block-level children only.
    pub contblock: bool,
    /// Contains at least one in-flow child.
    pub anyinflow: bool,
    /// The width is not `auto`.
    pub wset: bool,
    /// The height is not `auto`.
    pub hset: bool,
    /// The width is a percentage.
    pub wrelative: bool,
    /// The width has been computed by a layout.
    pub width_computed: bool,
    /// Width change requested by the parent when avoiding floats.
    pub width_adjust: f32,
    /// The top offset is the static position.
    pub topstatic: bool,
    /// The left offset is the static position.
    pub leftstatic: bool,
    /// Last in-flow box preceding an absolutely positioned box.
    pub abs_reference: Option<BoxId>,
    /// Parent box in the document tree of an absolutely positioned box.
    pub dom_parent: Option<BoxId>,
    /// `text-indent` in pixels.
    pub indent: f32,
    /// Available width and force flag of the last inline-block layout.
    pub last_layout: Option<(f32, bool)>,
    /// Metrics the first line starts from, seeded by list markers.
    pub first_line: Option<LineBox>,
}

/// Reference to the line box an inline-level box was placed on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineRef {
    /// The block owning the line.
    pub owner: Option<BoxId>,
    /// Top of the line in the owner's content coordinates.
    pub y: f32,
    /// Height of the line box.
    pub total_height: f32,
}

/// State of inline boxes and the inline interface of atomic inlines.
#[derive(Debug, Clone, Default)]
pub struct InlineState {
    /// The line box built over the children of this box.
    pub line: Option<LineBox>,
    /// Half of the leading.
    pub halflead: f32,
    /// The box was collapsed completely by whitespace processing.
    pub collapsed_completely: bool,
    /// The layout stopped at a forced line break.
    pub line_break_stop: bool,
    /// The line box the box has been placed on, for `top`/`bottom` alignment.
    pub linebox: LineRef,
}

/// State of text boxes.
#[derive(Debug, Clone, Default)]
pub struct TextState {
    /// Text after whitespace processing. Preserved line breaks are `'\r'`.
    pub text: String,
    /// Byte offset of the first character of this box.
    pub start: usize,
    /// Byte offset past the last character laid out in this box.
    pub end: usize,
    /// The layout stopped at a preserved line break.
    pub line_break_stop: bool,
    /// Skip leading whitespace because the previous box ended with one.
    pub ignore_initial_ws: bool,
    /// Extra width added by justification.
    pub expansion: f32,
}

/// What a replaced element shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ReplacedKind {
    /// `<img>`.
    #[default]
    Image,
    /// `<object>`.
    Object,
}

/// State of replaced boxes.
#[derive(Debug, Clone, Default)]
pub struct ReplacedState {
    /// Element type.
    pub kind: ReplacedKind,
    /// `src` or `data` attribute.
    pub source: Option<String>,
    /// Intrinsic size reported by the content source.
    pub intrinsic: Option<Dimension>,
    /// HTML `width` and `height` attributes in pixels.
    pub attr_size: (Option<f32>, Option<f32>),
}

/// State of list items.
#[derive(Debug, Clone, Default)]
pub struct ListItemState {
    /// Position among the list item siblings, 1-based.
    pub item_number: i32,
    /// Marker text for text markers such as `"3. "`.
    pub marker_text: Option<String>,
    /// An inside marker was inserted as the first child.
    pub inside_marker: Option<BoxId>,
}

/// A column of a table after span expansion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnInfo {
    /// Minimal content width of the cells in the column.
    pub min_width: f32,
    /// Maximal content width of the cells in the column.
    pub max_width: f32,
    /// Declared width in pixels.
    pub abswidth: f32,
    /// Declared percentage width.
    pub percent: f32,
    /// A width is declared.
    pub wset: bool,
    /// The declared width is a percentage.
    pub wrelative: bool,
    /// Used width.
    pub width: f32,
}

/// State of table, body and row boxes.
#[derive(Debug, Clone, Default)]
pub struct TableState {
    /// Columns of a table.
    pub columns: Vec<ColumnInfo>,
    /// `border-spacing` in pixels.
    pub spacing: f32,
    /// Row groups of a table in display order.
    pub bodies: Vec<BoxId>,
    /// Cells of a body by `[column][row]`. Spanned slots repeat the cell.
    pub cells: Vec<Vec<Option<BoxId>>>,
    /// Number of rows of a body.
    pub row_count: usize,
    /// Row heights of a body.
    pub row_heights: Vec<f32>,
    /// The table of a wrapper.
    pub table: Option<BoxId>,
}

/// State of table cells.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellState {
    /// `colspan` attribute, at least 1.
    pub colspan: usize,
    /// `rowspan` attribute, at least 1.
    pub rowspan: usize,
    /// First column of the cell.
    pub column: usize,
    /// First row of the cell within its body.
    pub row: usize,
}

/// State of table columns.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnState {
    /// `span` attribute, at least 1.
    pub span: usize,
    /// HTML `width` attribute.
    pub attr_width: Option<f32>,
}

/// State of flex and grid items.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemState {
    /// Grid area as 0-based `(column start, column end, row start, row end)`.
    pub grid_area: Option<(usize, usize, usize, usize)>,
    /// Line index of a flex item.
    pub flex_line: usize,
    /// Resolved main size of a flex item.
    pub main_size: f32,
}

/// Canvas bookkeeping of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportState {
    /// Initial width of the viewport.
    pub width: f32,
    /// Initial height of the viewport.
    pub height: f32,
    /// The visible area.
    pub visible_rect: Rect,
    /// The box of the root element.
    pub root_box: Option<BoxId>,
    /// Right-most edge of the visible content.
    pub maxx: f32,
    /// Bottom-most edge of the visible content.
    pub maxy: f32,
    /// Another positioning pass is required.
    pub recompute: bool,
}

/// One box of the tree.
#[derive(Debug, Clone)]
pub struct LayoutBox {
    /// Box type.
    pub kind: BoxKind,
    /// Generating DOM node. `None` for anonymous boxes and the viewport.
    pub node: Option<NodeId>,
    /// Lowercase tag name of the generating element.
    pub tag: Option<String>,
    /// The pseudo-element this box was generated for.
    pub pseudo: Option<PseudoElement>,
    /// Document traversal index.
    pub order: usize,
    /// Split counter, see [`BoxIdentity`].
    pub split_id: usize,
    /// Computed style.
    pub style: Rc<ComputedStyle>,
    /// Font used by the box.
    pub font: FontSpec,
    /// Metrics of [`Self::font`].
    pub metrics: FontMetrics,
    /// Used `line-height`.
    pub line_height: f32,

    /// Parent box.
    pub parent: Option<BoxId>,
    /// Containing block.
    pub containing_block: Option<BoxId>,
    /// The nearest block clipping this box.
    pub clip_block: Option<BoxId>,
    /// The element establishing the stacking context this box paints in.
    pub stacking_parent: Option<BoxId>,
    /// Child boxes.
    pub children: Vec<BoxId>,
    start_child: usize,
    end_child: usize,

    /// The box takes part in the layout.
    pub displayed: bool,
    /// `visibility: visible`.
    pub visible: bool,
    /// Contains no visible content.
    pub empty: bool,
    /// Block-level box.
    pub is_block: bool,
    /// The box of the root element.
    pub root: bool,
    /// Generated without a corresponding element.
    pub anonymous: bool,
    /// A continuation created by splitting.
    pub splitted: bool,

    /// Margin box relative to the containing block content origin.
    pub bounds: Rect,
    /// Margin box in page coordinates.
    pub abs_bounds: Rect,
    /// Content size.
    pub content: Dimension,
    /// Width available to the box in its last layout.
    pub avail_width: f32,
    /// Used margins.
    pub margin: LengthSet,
    /// Effective margins after collapsing.
    pub emargin: LengthSet,
    /// Margins as declared, before the constraint equation.
    pub decl_margin: LengthSet,
    /// Used border widths.
    pub border: LengthSet,
    /// Used padding.
    pub padding: LengthSet,
    /// `top`/`right`/`bottom`/`left` offsets.
    pub coords: LengthSet,
    /// Which of [`Self::coords`] are not `auto`.
    pub coords_set: Sides<bool>,
    /// Continuation created by the last layout, if the box was split.
    pub rest: Option<BoxId>,

    /// Block container state.
    pub block: BlockState,
    /// Inline state.
    pub inline: InlineState,
    /// Text state.
    pub text: TextState,
    /// Replaced element state.
    pub replaced: ReplacedState,
    /// List item state.
    pub list_item: ListItemState,
    /// Table, body and row state.
    pub table: TableState,
    /// Cell state.
    pub cell: CellState,
    /// Column state.
    pub column: ColumnState,
    /// Flex and grid item state.
    pub item: ItemState,
}

impl LayoutBox {
    /// A box of the given kind with the given style and no geometry.
    #[must_use]
    pub fn new(kind: BoxKind, style: Rc<ComputedStyle>, visual: &dyn VisualContext, config: &LayoutConfig) -> Self {
        let font = FontSpec::from_style(&style);
        let metrics = visual.font_metrics(&font);
        let line_height = used_line_height(&style, &metrics, config);
        LayoutBox {
            kind,
            node: None,
            tag: None,
            pseudo: None,
            order: 0,
            split_id: 0,
            style,
            font,
            metrics,
            line_height,
            parent: None,
            containing_block: None,
            clip_block: None,
            stacking_parent: None,
            children: Vec::new(),
            start_child: 0,
            end_child: 0,
            displayed: true,
            visible: true,
            empty: true,
            is_block: false,
            root: false,
            anonymous: false,
            splitted: false,
            bounds: Rect::default(),
            abs_bounds: Rect::default(),
            content: Dimension::default(),
            avail_width: 0.0,
            margin: LengthSet::ZERO,
            emargin: LengthSet::ZERO,
            decl_margin: LengthSet::ZERO,
            border: LengthSet::ZERO,
            padding: LengthSet::ZERO,
            coords: LengthSet::ZERO,
            coords_set: Sides::all(false),
            rest: None,
            block: BlockState::default(),
            inline: InlineState::default(),
            text: TextState::default(),
            replaced: ReplacedState::default(),
            list_item: ListItemState::default(),
            table: TableState::default(),
            cell: CellState::default(),
            column: ColumnState::default(),
            item: ItemState::default(),
        }
    }

    /// The equality key of the box.
    #[must_use]
    pub const fn identity(&self) -> BoxIdentity {
        BoxIdentity {
            order: self.order,
            split_id: self.split_id,
        }
    }

    /// First child of the active range.
    #[must_use]
    pub const fn start_child(&self) -> usize {
        self.start_child
    }

    /// End of the active range (exclusive).
    #[must_use]
    pub const fn end_child(&self) -> usize {
        self.end_child
    }

    /// Set the first active child, clamped to the end of the range.
    pub fn set_start_child(&mut self, index: usize) {
        self.start_child = index.min(self.end_child);
    }

    /// Set the end of the active range, clamped to `start..=children.len()`.
    pub fn set_end_child(&mut self, index: usize) {
        self.end_child = index.clamp(self.start_child, self.children.len());
    }

    /// The children in the active range.
    #[must_use]
    pub fn active_children(&self) -> &[BoxId] {
        &self.children[self.start_child..self.end_child]
    }

    /// Append a child and extend the active range over it.
    pub fn push_child(&mut self, child: BoxId) {
        self.children.push(child);
        self.end_child = self.children.len();
    }

    /// Insert a child and keep the active range covering the same boxes
    /// plus the new one when it lands inside the range.
    pub fn insert_child(&mut self, index: usize, child: BoxId) {
        let index = index.min(self.children.len());
        self.children.insert(index, child);
        if index <= self.end_child {
            self.end_child += 1;
        }
        if index < self.start_child {
            self.start_child += 1;
        }
    }

    /// Remove the child at `index`, keeping the active range consistent.
    pub fn remove_child(&mut self, index: usize) -> Option<BoxId> {
        if index >= self.children.len() {
            return None;
        }
        let removed = self.children.remove(index);
        if index < self.end_child {
            self.end_child -= 1;
        }
        if index < self.start_child {
            self.start_child -= 1;
        }
        Some(removed)
    }

    /// Replace all children and activate all of them.
    pub fn set_children(&mut self, children: Vec<BoxId>) {
        self.children = children;
        self.start_child = 0;
        self.end_child = self.children.len();
    }

    /// Whether the box is floated.
    #[must_use]
    pub fn is_floating(&self) -> bool {
        self.kind.is_block_like() && self.style.float != crate::style::Float::None
    }

    /// Width of the border box.
    #[must_use]
    pub fn border_width(&self) -> f32 {
        self.content.width + self.padding.horizontal() + self.border.horizontal()
    }

    /// Height of the border box.
    #[must_use]
    pub fn border_height(&self) -> f32 {
        self.content.height + self.padding.vertical() + self.border.vertical()
    }

    /// Distance from the left margin edge to the content edge.
    #[must_use]
    pub fn content_offset_x(&self) -> f32 {
        self.emargin.left + self.border.left + self.padding.left
    }

    /// Distance from the top margin edge to the content edge.
    #[must_use]
    pub fn content_offset_y(&self) -> f32 {
        self.emargin.top + self.border.top + self.padding.top
    }

    /// Content box in page coordinates.
    #[must_use]
    pub fn abs_content_bounds(&self) -> Rect {
        Rect::new(
            self.abs_bounds.x + self.content_offset_x(),
            self.abs_bounds.y + self.content_offset_y(),
            self.content.width,
            self.content.height,
        )
    }

    /// Padding box in page coordinates.
    #[must_use]
    pub fn abs_padding_bounds(&self) -> Rect {
        Rect::new(
            self.abs_bounds.x + self.emargin.left + self.border.left,
            self.abs_bounds.y + self.emargin.top + self.border.top,
            self.content.width + self.padding.horizontal(),
            self.content.height + self.padding.vertical(),
        )
    }

    /// Border box in page coordinates.
    #[must_use]
    pub fn abs_border_bounds(&self) -> Rect {
        Rect::new(
            self.abs_bounds.x + self.emargin.left,
            self.abs_bounds.y + self.emargin.top,
            self.border_width(),
            self.border_height(),
        )
    }
}

/// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
///
/// Used `line-height` of a box.
#[must_use]
pub fn used_line_height(style: &ComputedStyle, metrics: &FontMetrics, config: &LayoutConfig) -> f32 {
    use crate::style::{Length, LineHeight};
    match style.line_height {
        // "We recommend a used value for 'normal' between 1.0 to 1.2."
        LineHeight::Normal => config.line_height_factor * metrics.height,
        LineHeight::Number(n) => n * metrics.height,
        LineHeight::Length(Length::Percent(p)) => p * metrics.size / 100.0,
        LineHeight::Length(len) => {
            let dec = super::decoder::CssDecoder::new(metrics, config.default_font_size, Dimension::default());
            dec.px(len, metrics.size)
        }
    }
}

/// The arena of boxes produced by the builder and updated by layout.
#[derive(Debug, Clone, Default)]
pub struct BoxTree {
    boxes: Vec<LayoutBox>,
    pristine: Option<Vec<LayoutBox>>,
    float_lists: Vec<FloatList>,
    root: Option<BoxId>,
    /// Canvas bookkeeping.
    pub viewport: ViewportState,
    /// Font size of the root element, used by `rem`.
    pub root_font_size: f32,
    /// The root stacking context after layout.
    pub stacking: Option<StackingContext>,
}

impl BoxTree {
    /// An empty tree.
    #[must_use]
    pub fn new() -> Self {
        BoxTree::default()
    }

    /// Add a box and return its id.
    pub fn alloc(&mut self, layout_box: LayoutBox) -> BoxId {
        let id = BoxId(self.boxes.len());
        self.boxes.push(layout_box);
        id
    }

    /// Clone a box into a new arena slot. Used for split continuations.
    pub fn copy_box(&mut self, id: BoxId) -> BoxId {
        let copy = self.boxes[id.0].clone();
        self.alloc(copy)
    }

    /// The viewport box.
    #[must_use]
    pub const fn root(&self) -> Option<BoxId> {
        self.root
    }

    /// Set the viewport box.
    pub const fn set_root(&mut self, id: BoxId) {
        self.root = Some(id);
    }

    /// Number of boxes, including continuations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// True if the tree holds no box.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Look up a box.
    #[must_use]
    pub fn get(&self, id: BoxId) -> Option<&LayoutBox> {
        self.boxes.get(id.0)
    }

    /// Look up a box, failing for ids that do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownBox`] for an id outside the arena.
    pub fn try_get(&self, id: BoxId) -> Result<&LayoutBox> {
        self.boxes.get(id.0).ok_or(LayoutError::UnknownBox(id))
    }

    /// Mutable lookup, failing for ids that do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownBox`] for an id outside the arena.
    pub fn try_get_mut(&mut self, id: BoxId) -> Result<&mut LayoutBox> {
        self.boxes.get_mut(id.0).ok_or(LayoutError::UnknownBox(id))
    }

    /// All box ids in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = BoxId> + '_ {
        (0..self.boxes.len()).map(BoxId)
    }

    /// Find the first box generated for a DOM node, not counting continuations.
    #[must_use]
    pub fn box_for_node(&self, node: NodeId) -> Option<BoxId> {
        self.boxes
            .iter()
            .position(|b| b.node == Some(node) && b.split_id == 0 && b.pseudo.is_none())
            .map(BoxId)
    }

    /// Find every box generated for a DOM node, continuations included.
    #[must_use]
    pub fn boxes_for_node(&self, node: NodeId) -> Vec<BoxId> {
        self.boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.node == Some(node) && b.pseudo.is_none())
            .map(|(i, _)| BoxId(i))
            .collect()
    }

    /// Record the current state as the post-build snapshot restored before
    /// every layout.
    pub fn seal(&mut self) {
        self.pristine = Some(self.boxes.clone());
    }

    /// Drop continuations, float lists and geometry from a previous layout.
    pub fn restore(&mut self) {
        if let Some(pristine) = &self.pristine {
            self.boxes.clone_from(pristine);
        }
        self.float_lists.clear();
        self.stacking = None;
    }

    /// Create a fresh float list owned by `owner`.
    pub fn new_float_list(&mut self, owner: BoxId) -> FloatListId {
        let id = FloatListId(self.float_lists.len());
        self.float_lists.push(FloatList::new(owner));
        id
    }

    /// Look up a float list.
    #[must_use]
    pub fn float_list(&self, id: FloatListId) -> &FloatList {
        &self.float_lists[id.0]
    }

    /// Place a floating box in a list.
    pub fn add_float(&mut self, list: FloatListId, entry: FloatEntry) {
        self.boxes[entry.id.0].block.fown = Some(list);
        self.float_lists[list.0].add(entry);
    }

    /// Iterate over the ancestors of a box, nearest first.
    pub fn ancestors(&self, id: BoxId) -> impl Iterator<Item = BoxId> + '_ {
        std::iter::successors(self[id].parent, move |p| self[*p].parent)
    }
}

impl Index<BoxId> for BoxTree {
    type Output = LayoutBox;

    fn index(&self, id: BoxId) -> &LayoutBox {
        &self.boxes[id.0]
    }
}

impl IndexMut<BoxId> for BoxTree {
    fn index_mut(&mut self, id: BoxId) -> &mut LayoutBox {
        &mut self.boxes[id.0]
    }
}

/// Everything a layout function needs besides the tree.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    /// Font measurement.
    pub visual: &'a dyn VisualContext,
    /// Engine switches.
    pub config: &'a LayoutConfig,
}

impl<'a> LayoutContext<'a> {
    /// Bundle a visual context with a configuration.
    #[must_use]
    pub const fn new(visual: &'a dyn VisualContext, config: &'a LayoutConfig) -> Self {
        LayoutContext { visual, config }
    }
}

impl std::fmt::Debug for LayoutContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutContext")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::visual_context::ApproximateVisualContext;

    fn make_box(tree: &mut BoxTree) -> BoxId {
        let vc = ApproximateVisualContext::default();
        let config = LayoutConfig::default();
        tree.alloc(LayoutBox::new(
            BoxKind::Block,
            Rc::new(ComputedStyle::default()),
            &vc,
            &config,
        ))
    }

    #[test]
    fn test_active_range_setters_clamp() {
        let mut tree = BoxTree::new();
        let parent = make_box(&mut tree);
        let a = make_box(&mut tree);
        let b = make_box(&mut tree);
        tree[parent].push_child(a);
        tree[parent].push_child(b);
        tree[parent].set_end_child(10);
        assert_eq!(tree[parent].end_child(), 2);
        tree[parent].set_start_child(5);
        assert_eq!(tree[parent].start_child(), 2);
        assert!(tree[parent].active_children().is_empty());
    }

    #[test]
    fn test_insert_and_remove_keep_range() {
        let mut tree = BoxTree::new();
        let parent = make_box(&mut tree);
        let a = make_box(&mut tree);
        let b = make_box(&mut tree);
        tree[parent].push_child(a);
        tree[parent].insert_child(0, b);
        assert_eq!(tree[parent].active_children(), &[b, a]);
        assert_eq!(tree[parent].remove_child(0), Some(b));
        assert_eq!(tree[parent].active_children(), &[a]);
    }

    #[test]
    fn test_restore_drops_continuations() {
        let mut tree = BoxTree::new();
        let a = make_box(&mut tree);
        tree.seal();
        let copy = tree.copy_box(a);
        tree[a].content.width = 50.0;
        assert_eq!(tree.len(), 2);
        tree.restore();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[a].content.width, 0.0);
        assert!(tree.get(copy).is_none());
        assert!(matches!(tree.try_get(copy), Err(LayoutError::UnknownBox(_))));
    }

    #[test]
    fn test_identity_includes_split() {
        let mut tree = BoxTree::new();
        let a = make_box(&mut tree);
        let b = tree.copy_box(a);
        assert_eq!(tree[a].identity(), tree[b].identity());
        tree[b].split_id += 1;
        assert_ne!(tree[a].identity(), tree[b].identity());
    }
}
