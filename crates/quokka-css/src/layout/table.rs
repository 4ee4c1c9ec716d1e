//! Tables.
//!
//! [§ 17 Tables](https://www.w3.org/TR/CSS2/tables.html)
//!
//! "In CSS 2.1, tables may be used as part of a larger layout. A table
//! wrapper box establishes a block formatting context, and contains the
//! table box and the caption boxes."
//!
//! The table box distributes its width over the columns and stacks its row
//! groups. Every row group keeps its own `cells[column][row]` matrix built
//! from the spans of its cells.

use log::trace;

use crate::style::{CaptionSide, Display, Length, LengthOrAuto};

use super::block::{
    available_content_width, layout_block_positioned, maximal_content_width, minimal_content_width, new_float_context,
};
use super::box_tree::{BoxId, BoxKind, BoxTree, ColumnInfo, LayoutContext};
use super::element::{containing_block_size, is_block_in_flow, is_positioned, set_position, set_size_to_total};
use super::geometry::{Dimension, LengthSet};
use super::sizes::{decoder_for, load_sizes, update_child_sizes};

/// The table box inside a wrapper.
#[must_use]
pub fn table_of(tree: &BoxTree, wrapper: BoxId) -> Option<BoxId> {
    tree[wrapper]
        .children
        .iter()
        .copied()
        .find(|&c| tree[c].kind == BoxKind::Table)
}

fn captions(tree: &BoxTree, wrapper: BoxId, side: CaptionSide) -> Vec<BoxId> {
    tree[wrapper]
        .children
        .iter()
        .copied()
        .filter(|&c| tree[c].kind == BoxKind::TableCaption && tree[c].style.caption_side == side)
        .collect()
}

/// [§ 17.6.1 The separated borders model](https://www.w3.org/TR/CSS2/tables.html#separated-borders)
///
/// "The lengths specify the distance that separates adjoining cell borders."
fn border_spacing(tree: &BoxTree, table: BoxId) -> f32 {
    decoder_for(tree, table).px(tree[table].style.border_spacing, 0.0).max(0.0)
}

/// Row groups in rendering order: the header, the bodies, the footer.
fn ordered_bodies(tree: &BoxTree, table: BoxId) -> Vec<BoxId> {
    let groups: Vec<BoxId> = tree[table]
        .children
        .iter()
        .copied()
        .filter(|&c| tree[c].kind == BoxKind::TableBody && tree[c].displayed)
        .collect();
    let header = groups
        .iter()
        .copied()
        .find(|&c| tree[c].style.display == Display::TableHeaderGroup);
    let footer = groups
        .iter()
        .copied()
        .find(|&c| tree[c].style.display == Display::TableFooterGroup);
    let mut ret: Vec<BoxId> = header.into_iter().collect();
    ret.extend(groups.iter().copied().filter(|&c| Some(c) != header && Some(c) != footer));
    ret.extend(footer);
    ret
}

/// [§ 17.5 Visual layout of table contents](https://www.w3.org/TR/CSS2/tables.html#table-layout)
///
/// "Cells are placed in the first free slot of their row that is not
/// covered by a cell spanning from an earlier row."
///
/// Builds the cell matrix of a row group. A row span reaching past the
/// last row is cut at the last row.
pub fn organize_body(tree: &mut BoxTree, body: BoxId) {
    let rows: Vec<BoxId> = tree[body]
        .children
        .iter()
        .copied()
        .filter(|&c| tree[c].kind == BoxKind::TableRow)
        .collect();
    let nrows = rows.len();
    let mut occupied: Vec<Vec<Option<BoxId>>> = vec![Vec::new(); nrows];
    for (r, &row) in rows.iter().enumerate() {
        let cells: Vec<BoxId> = tree[row]
            .children
            .iter()
            .copied()
            .filter(|&c| tree[c].kind == BoxKind::TableCell)
            .collect();
        let mut c = 0;
        for cell in cells {
            while occupied[r].get(c).is_some_and(Option::is_some) {
                c += 1;
            }
            let colspan = tree[cell].cell.colspan.max(1);
            let rowspan = tree[cell].cell.rowspan.max(1).min(nrows - r);
            {
                let state = &mut tree[cell].cell;
                state.column = c;
                state.row = r;
                state.colspan = colspan;
                state.rowspan = rowspan;
            }
            for line in occupied.iter_mut().skip(r).take(rowspan) {
                if line.len() < c + colspan {
                    line.resize(c + colspan, None);
                }
                for slot in &mut line[c..c + colspan] {
                    *slot = Some(cell);
                }
            }
            c += colspan;
        }
    }
    let ncols = occupied.iter().map(Vec::len).max().unwrap_or(0);
    let mut cells = vec![vec![None; nrows]; ncols];
    for (r, line) in occupied.iter().enumerate() {
        for (c, slot) in line.iter().enumerate() {
            cells[c][r] = *slot;
        }
    }
    let state = &mut tree[body].table;
    state.cells = cells;
    state.row_count = nrows;
}

fn column_count(tree: &BoxTree, body: BoxId) -> usize {
    tree[body].table.cells.len()
}

/// Cells of column `c` of a body, each listed once.
fn column_cells(tree: &BoxTree, body: BoxId, c: usize) -> Vec<BoxId> {
    let state = &tree[body].table;
    let mut ret = Vec::new();
    let mut r = 0;
    while r < state.row_count {
        match state.cells[c][r] {
            Some(cell) => {
                ret.push(cell);
                r += tree[cell].cell.rowspan.max(1);
            }
            None => r += 1,
        }
    }
    ret
}

fn cell_decoration(tree: &BoxTree, cell: BoxId) -> f32 {
    let b = &tree[cell];
    b.padding.horizontal() + b.border.horizontal()
}

/// Narrowest border box of a cell.
fn cell_minimal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, cell: BoxId) -> f32 {
    minimal_content_width(tree, ctx, cell) + cell_decoration(tree, cell)
}

/// Preferred border box width of a cell.
fn cell_maximal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, cell: BoxId) -> f32 {
    maximal_content_width(tree, ctx, cell) + cell_decoration(tree, cell)
}

/// The declared width of a column or a cell: `(absolute, percent)`.
fn declared_width(tree: &BoxTree, id: BoxId, reference: f32) -> Option<(f32, Option<f32>)> {
    match tree[id].style.width {
        LengthOrAuto::Length(Length::Percent(p)) if p > 0.0 => Some((p * reference / 100.0, Some(p))),
        LengthOrAuto::Length(l) => Some((decoder_for(tree, id).px(l, reference).max(0.0), None)),
        LengthOrAuto::Auto => None,
    }
}

fn column_info(tree: &BoxTree, col: BoxId, reference: f32) -> ColumnInfo {
    let mut info = ColumnInfo::default();
    let declared = tree[col]
        .column
        .attr_width
        .map(|w| (w, None))
        .or_else(|| declared_width(tree, col, reference));
    if let Some((abs, percent)) = declared {
        info.wset = true;
        info.abswidth = abs;
        info.width = abs;
        if let Some(p) = percent {
            info.wrelative = true;
            info.percent = p;
        }
    }
    info
}

/// Columns declared by `<col>` and `<colgroup>`, expanded by their spans.
fn declared_columns(tree: &BoxTree, table: BoxId, reference: f32) -> Vec<ColumnInfo> {
    let mut ret = Vec::new();
    for &child in &tree[table].children {
        match tree[child].kind {
            BoxKind::TableColumn => {
                let info = column_info(tree, child, reference);
                ret.extend(std::iter::repeat_n(info, tree[child].column.span.max(1)));
            }
            BoxKind::TableColumnGroup => {
                let group = column_info(tree, child, reference);
                let cols: Vec<BoxId> = tree[child]
                    .children
                    .iter()
                    .copied()
                    .filter(|&c| tree[c].kind == BoxKind::TableColumn)
                    .collect();
                if cols.is_empty() {
                    ret.extend(std::iter::repeat_n(group, tree[child].column.span.max(1)));
                }
                for col in cols {
                    let mut info = column_info(tree, col, reference);
                    if !info.wset {
                        info = group;
                    }
                    ret.extend(std::iter::repeat_n(info, tree[col].column.span.max(1)));
                }
            }
            _ => {}
        }
    }
    ret
}

/// Merge the needs of the cells of a body into the columns.
fn update_columns(
    tree: &BoxTree,
    ctx: &LayoutContext<'_>,
    body: BoxId,
    columns: &mut [ColumnInfo],
    reference: f32,
) {
    for (c, col) in columns.iter_mut().enumerate().take(column_count(tree, body)) {
        for cell in column_cells(tree, body, c) {
            let span = tree[cell].cell.colspan.max(1) as f32;
            col.min_width = col.min_width.max(cell_minimal_width(tree, ctx, cell) / span);
            col.max_width = col.max_width.max(cell_maximal_width(tree, ctx, cell) / span);
            if let Some((abs, percent)) = declared_width(tree, cell, reference) {
                col.wset = true;
                if let Some(p) = percent {
                    col.wrelative = true;
                    col.percent = col.percent.max(p);
                } else {
                    col.abswidth = col.abswidth.max(abs + cell_decoration(tree, cell));
                }
            }
            if col.width < col.min_width {
                col.width = col.min_width;
            }
        }
    }
}

/// Minimal and maximal column widths of a body as `(min, max)` sums with
/// the spacing.
fn body_widths(tree: &BoxTree, ctx: &LayoutContext<'_>, body: BoxId, spacing: f32) -> (f32, f32) {
    let mut min = spacing;
    let mut max = spacing;
    for c in 0..column_count(tree, body) {
        let (mut cmin, mut cmax): (f32, f32) = (0.0, 0.0);
        for cell in column_cells(tree, body, c) {
            let span = tree[cell].cell.colspan.max(1) as f32;
            cmin = cmin.max(cell_minimal_width(tree, ctx, cell) / span);
            cmax = cmax.max(cell_maximal_width(tree, ctx, cell) / span);
        }
        min += cmin + spacing;
        max += cmax + spacing;
    }
    (min, max)
}

fn table_decoration(tree: &BoxTree, table: BoxId) -> f32 {
    let b = &tree[table];
    b.margin.horizontal() + b.padding.horizontal() + b.border.horizontal()
}

fn content_widths(tree: &BoxTree, ctx: &LayoutContext<'_>, table: BoxId) -> (f32, f32) {
    let spacing = border_spacing(tree, table);
    ordered_bodies(tree, table)
        .into_iter()
        .map(|body| body_widths(tree, ctx, body, spacing))
        .fold((0.0, 0.0), |(a, b), (min, max)| (f32::max(a, min), f32::max(b, max)))
}

/// Narrowest margin box of a table.
#[must_use]
pub fn minimal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, table: BoxId) -> f32 {
    let b = &tree[table];
    let (min, _) = content_widths(tree, ctx, table);
    let w = if b.block.wset && !b.block.wrelative { min.max(b.content.width) } else { min };
    w + table_decoration(tree, table)
}

/// Preferred margin box width of a table.
#[must_use]
pub fn maximal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, table: BoxId) -> f32 {
    let b = &tree[table];
    let (min, max) = content_widths(tree, ctx, table);
    let w = if b.block.wset && !b.block.wrelative { min.max(b.content.width) } else { max };
    w + table_decoration(tree, table)
}

/// The width declared for the table content box.
fn declared_table_width(tree: &BoxTree, table: BoxId) -> Option<f32> {
    let cb = containing_block_size(tree, table);
    let b = &tree[table];
    let l = b.style.width.length()?;
    let w = decoder_for(tree, table).px(l, cb.width);
    Some(if b.style.box_sizing == crate::style::BoxSizing::BorderBox {
        (w - b.padding.horizontal() - b.border.horizontal()).max(0.0)
    } else {
        w.max(0.0)
    })
}

/// Give every column its width from the space available to the table.
///
/// [§ 17.5.2.2 Automatic table layout](https://www.w3.org/TR/CSS2/tables.html#auto-table-layout)
///
/// Percentage columns are served first, then columns with an absolute
/// width, then the auto columns in proportion to their maximal widths.
/// No column gets less than its minimal width.
fn calculate_columns(
    tree: &BoxTree,
    ctx: &LayoutContext<'_>,
    table: BoxId,
    bodies: &[BoxId],
    wlimit: f32,
    spacing: f32,
) -> Vec<ColumnInfo> {
    // STEP 1: Columns declared by the table, extended to the cell grid.
    let mut columns = declared_columns(tree, table, wlimit);
    let count = bodies.iter().map(|&b| column_count(tree, b)).max().unwrap_or(0);
    if columns.len() < count {
        columns.resize(count, ColumnInfo::default());
    }
    for &body in bodies {
        update_columns(tree, ctx, body, &mut columns, wlimit);
    }

    // STEP 2: Sum up the needs.
    let mut sumabs = 0.0;
    let mut sumperc = 0.0;
    let mut mintotalw = 0.0;
    let mut sumnonemin = 0.0;
    let mut sumnonemax = 0.0;
    let mut totalwperc: f32 = 0.0;
    for col in &columns {
        mintotalw += col.min_width;
        if col.wrelative {
            sumperc += col.percent;
            totalwperc = totalwperc.max(col.max_width * 100.0 / col.percent);
        } else if col.wset {
            sumabs += col.abswidth;
        } else {
            sumnonemin += col.min_width;
            sumnonemax += col.max_width;
        }
    }
    let gaps = (columns.len() + 1) as f32 * spacing;
    let collimit = (wlimit - gaps).max(0.0);
    totalwperc = totalwperc.min(collimit);
    let mut totalwabs = 0.0;
    if sumabs + sumnonemax > 0.0 {
        let abspart = 100.0 - sumperc;
        totalwabs = if abspart <= 0.0 { collimit } else { (sumabs + sumnonemax) * 100.0 / abspart };
    }

    // STEP 3: The width for all columns together.
    let mut totalw = match (tree[table].block.wset, declared_table_width(tree, table)) {
        (true, Some(w)) => w - gaps,
        _ => totalwperc.max(totalwabs).min(collimit),
    };
    totalw = totalw.max(mintotalw);

    // STEP 4: Distribute.
    let mut remain = totalw;
    let mut remainmin = mintotalw;
    let assign = |col: &mut ColumnInfo, wanted: f32, remain: &mut f32, remainmin: &mut f32| {
        *remainmin -= col.min_width;
        let w = wanted.min(*remain).min(*remain - *remainmin).max(col.min_width);
        col.width = w;
        *remain -= w;
    };
    if sumperc > 0.0 {
        for col in columns.iter_mut().filter(|c| c.wrelative) {
            let wanted = col.percent * totalw / 100.0;
            assign(col, wanted, &mut remain, &mut remainmin);
        }
    }
    if sumabs > 0.0 {
        let factor = if sumnonemin == 0.0 { remain / sumabs } else { 1.0 };
        for col in columns.iter_mut().filter(|c| c.wset && !c.wrelative) {
            let wanted = col.abswidth * factor;
            assign(col, wanted, &mut remain, &mut remainmin);
        }
    }
    if sumnonemax > 0.0 {
        let factor = remain / sumnonemax;
        for col in columns.iter_mut().filter(|c| !c.wset) {
            let wanted = col.max_width * factor;
            assign(col, wanted, &mut remain, &mut remainmin);
        }
    } else if sumnonemin == 0.0 {
        // Columns without any content share nothing.
        for col in columns.iter_mut().filter(|c| !c.wset) {
            col.width = col.min_width;
        }
    }
    trace!(
        target: "quokka::layout",
        "table {table:?} columns: {:?}",
        columns.iter().map(|c| c.width).collect::<Vec<_>>()
    );
    columns
}

/// Set the border box width of a cell assigned by its columns.
fn set_cell_width(tree: &mut BoxTree, ctx: &LayoutContext<'_>, cell: BoxId, width: f32) {
    load_sizes(tree, ctx, cell, false);
    {
        let b = &mut tree[cell];
        b.margin = LengthSet::ZERO;
        b.emargin = LengthSet::ZERO;
        b.decl_margin = LengthSet::ZERO;
        b.content.width = (width - b.padding.horizontal() - b.border.horizontal()).max(0.0);
        b.bounds.width = width;
        b.block.wset = true;
        b.block.width_adjust = 0.0;
    }
    update_child_sizes(tree, ctx, cell);
}

/// Stretch a cell to the height of the rows it spans.
fn set_cell_height(tree: &mut BoxTree, cell: BoxId, height: f32) {
    let b = &mut tree[cell];
    b.content.height = (height - b.padding.vertical() - b.border.vertical()).max(0.0);
    b.bounds.height = height;
    b.block.hset = true;
}

fn zero_box_edges(tree: &mut BoxTree, id: BoxId) {
    let b = &mut tree[id];
    b.margin = LengthSet::ZERO;
    b.emargin = LengthSet::ZERO;
    b.decl_margin = LengthSet::ZERO;
}

/// [§ 17.5.3 Table height algorithms](https://www.w3.org/TR/CSS2/tables.html#height-layout)
///
/// Lay out the cells of a row group in the column widths and compute the
/// row heights. A cell spanning several rows makes its last row tall
/// enough for the rest of its content.
fn layout_body(
    tree: &mut BoxTree,
    ctx: &LayoutContext<'_>,
    body: BoxId,
    wlimit: f32,
    columns: &[ColumnInfo],
    spacing: f32,
) {
    zero_box_edges(tree, body);
    tree[body].avail_width = wlimit;
    let rows: Vec<BoxId> = tree[body]
        .children
        .iter()
        .copied()
        .filter(|&c| tree[c].kind == BoxKind::TableRow)
        .collect();
    let cells = tree[body].table.cells.clone();
    let ncols = cells.len();
    let col_width = |c: usize| columns.get(c).map_or(0.0, |col| col.width);

    let mut y = spacing;
    let mut maxw: f32 = 0.0;
    let mut row_y = vec![0.0; rows.len()];
    let mut row_heights = Vec::with_capacity(rows.len());
    for (r, &row) in rows.iter().enumerate() {
        let mut x = spacing;
        let mut maxh: f32 = 0.0;

        // STEP 1: Lay out the cells starting on this row.
        let mut c = 0;
        while c < ncols {
            let Some(cell) = cells[c][r] else {
                x += col_width(c) + spacing;
                c += 1;
                continue;
            };
            let (first, rowspan, colspan) = {
                let s = &tree[cell].cell;
                (s.row, s.rowspan.max(1), s.colspan.max(1))
            };
            let last = first + rowspan - 1;
            let mut cw = col_width(c);
            for i in 1..colspan {
                cw += spacing + col_width(c + i);
            }
            if r == first && c == tree[cell].cell.column {
                set_cell_width(tree, ctx, cell, cw);
                new_float_context(tree, cell);
                let _ = super::do_layout(tree, ctx, cell, wlimit, true, true);
                set_position(tree, cell, x, 0.0);
                tree[cell].bounds.width = cw;
                if rowspan == 1 {
                    maxh = maxh.max(tree[cell].bounds.height);
                }
            }
            if r == last && rowspan > 1 {
                let remain = tree[cell].bounds.height - (y - row_y[first]);
                maxh = maxh.max(remain);
            }
            x += cw + spacing;
            c += colspan;
        }

        // STEP 2: Cells ending on this row get their final height.
        let mut c = 0;
        while c < ncols {
            let Some(cell) = cells[c][r] else {
                c += 1;
                continue;
            };
            let (first, rowspan, colspan) = {
                let s = &tree[cell].cell;
                (s.row, s.rowspan.max(1), s.colspan.max(1))
            };
            if first + rowspan - 1 == r && c == tree[cell].cell.column {
                let start_y = if rowspan > 1 { row_y[first] } else { y };
                set_cell_height(tree, cell, y + maxh - start_y);
            }
            c += colspan;
        }

        row_y[r] = y;
        zero_box_edges(tree, row);
        set_position(tree, row, 0.0, y);
        tree[row].content = Dimension::new(x, maxh);
        set_size_to_total(tree, row);
        row_heights.push(maxh);
        maxw = maxw.max(x);
        y += maxh + spacing;
    }
    if rows.is_empty() {
        maxw = spacing;
    }
    tree[body].table.row_heights = row_heights;
    tree[body].content = Dimension::new(maxw, y);
    set_size_to_total(tree, body);
}

/// Lay out the table box in `availw` pixels.
pub fn layout_table(tree: &mut BoxTree, ctx: &LayoutContext<'_>, table: BoxId, availw: f32) -> bool {
    if !tree[table].displayed {
        let b = &mut tree[table];
        b.content = Dimension::default();
        b.bounds.set_size(0.0, 0.0);
        return true;
    }
    tree[table].avail_width = availw;
    let bodies = ordered_bodies(tree, table);
    for &body in &bodies {
        organize_body(tree, body);
        tree[body].table.table = Some(table);
    }
    let spacing = border_spacing(tree, table);
    let wlimit = available_content_width(tree, table);
    let columns = calculate_columns(tree, ctx, table, &bodies, wlimit, spacing);

    let mut y = 0.0;
    let mut maxw: f32 = 0.0;
    for &body in &bodies {
        layout_body(tree, ctx, body, wlimit, &columns, spacing);
        set_position(tree, body, 0.0, y);
        maxw = maxw.max(tree[body].bounds.width);
        y += tree[body].bounds.height;
    }
    let b = &mut tree[table];
    b.table.columns = columns;
    b.table.spacing = spacing;
    b.table.bodies = bodies;
    b.content.width = maxw;
    b.content.height = if b.block.hset { b.content.height.max(y) } else { y };
    set_size_to_total(tree, table);
    true
}

/// [§ 17.4 Tables in the visual formatting model](https://www.w3.org/TR/CSS2/tables.html#model)
///
/// "The table wrapper box is a 'block' box if the table is block-level,
/// and an 'inline-block' box if the table is inline-level."
///
/// The wrapper takes the width of the table and stacks the captions above
/// or below it.
pub fn layout_wrapper(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId, availw: f32, force: bool) -> bool {
    if !tree[id].displayed {
        let b = &mut tree[id];
        b.content = Dimension::default();
        b.bounds.set_size(0.0, 0.0);
        return true;
    }
    tree[id].avail_width = availw;
    let wlimit = {
        let b = &tree[id];
        availw - b.margin.horizontal() - b.border.horizontal() - b.padding.horizontal()
    };

    // STEP 1: The table decides the width.
    let table = table_of(tree, id);
    let width = match table {
        Some(t) => {
            let _ = layout_table(tree, ctx, t, wlimit);
            tree[t].bounds.width
        }
        None => wlimit.max(0.0),
    };
    tree[id].content.width = width;
    tree[id].block.width_computed = true;
    update_child_sizes(tree, ctx, id);

    // STEP 2: Captions on both sides.
    let mut y = 0.0;
    for cap in captions(tree, id, CaptionSide::Top) {
        new_float_context(tree, cap);
        let _ = super::do_layout(tree, ctx, cap, width, true, true);
        set_position(tree, cap, 0.0, y);
        y += tree[cap].bounds.height;
    }
    if let Some(t) = table {
        set_position(tree, t, 0.0, y);
        y += tree[t].bounds.height;
    }
    for cap in captions(tree, id, CaptionSide::Bottom) {
        new_float_context(tree, cap);
        let _ = super::do_layout(tree, ctx, cap, width, true, true);
        set_position(tree, cap, 0.0, y);
        y += tree[cap].bounds.height;
    }
    tree[id].content.height = y;

    // STEP 3: Absolutely positioned boxes contained by the table.
    let positioned: Vec<BoxId> = tree[id]
        .children
        .iter()
        .copied()
        .filter(|&c| is_positioned(tree, c))
        .collect();
    for sub in positioned {
        layout_block_positioned(tree, ctx, sub);
    }

    // STEP 4: Auto margins center a block-level table.
    if is_block_in_flow(tree, id) {
        let cw = containing_block_size(tree, id).width;
        let b = &mut tree[id];
        if b.style.margin.left.is_auto() && b.style.margin.right.is_auto() {
            let rest = (cw - width - b.border.horizontal() - b.padding.horizontal()).max(0.0);
            b.margin.left = rest / 2.0;
            b.margin.right = rest / 2.0;
            b.emargin.left = b.margin.left;
            b.emargin.right = b.margin.right;
        }
    }
    set_size_to_total(tree, id);
    trace!(target: "quokka::layout", "table wrapper {id:?}: {:?}", tree[id].bounds);
    tree[id].is_block || force || tree[id].bounds.width <= availw
}

fn wrapper_widths(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId, max: bool) -> f32 {
    let mut w: f32 = 0.0;
    for &c in &tree[id].children {
        let cw = match (tree[c].kind, max) {
            (BoxKind::Table, false) => minimal_width(tree, ctx, c),
            (BoxKind::Table, true) => maximal_width(tree, ctx, c),
            (BoxKind::TableCaption, _) => super::minimal_width(tree, ctx, c),
            _ => 0.0,
        };
        w = w.max(cw);
    }
    let b = &tree[id];
    w + b.decl_margin.horizontal() + b.border.horizontal() + b.padding.horizontal()
}

/// Narrowest margin box of a table wrapper.
#[must_use]
pub fn wrapper_minimal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    wrapper_widths(tree, ctx, id, false)
}

/// Preferred margin box width of a table wrapper.
#[must_use]
pub fn wrapper_maximal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    wrapper_widths(tree, ctx, id, true)
}
