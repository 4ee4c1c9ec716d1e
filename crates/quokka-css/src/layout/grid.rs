//! Grid layout.
//!
//! [§ 12 Grid Sizing](https://www.w3.org/TR/css-grid-1/#layout-algorithm)
//!
//! Supported: `grid-template-columns` / `grid-template-rows` with lengths,
//! percentages, `fr`, `auto` and `repeat(n, ...)`; implicit tracks from
//! `grid-auto-columns` / `grid-auto-rows`; line and span placement; and
//! row- or column-major auto-placement.

use log::trace;

use crate::style::{AlignItems, GridAutoFlow, GridLine, Length, TrackListEntry, TrackSize};

use super::block::layout_block_positioned;
use super::box_tree::{BoxId, BoxTree, LayoutContext};
use super::element::{has_fixed_width, is_positioned, set_position, set_size_to_total, total_width};
use super::flex::{item_width, outer_width};
use super::geometry::Dimension;
use super::sizes::{
    compute_widths, decoder_for, load_sizes, set_content_height, set_content_width, update_child_sizes,
};

/// 0-based area of an item: `[col_start, col_end)` x `[row_start, row_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GridArea {
    pub(crate) col_start: usize,
    pub(crate) col_end: usize,
    pub(crate) row_start: usize,
    pub(crate) row_end: usize,
}

/// Placement request of an item along one axis: a definite start track
/// or none, and the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AxisPlacement {
    pub(crate) start: Option<usize>,
    pub(crate) span: usize,
}

/// [§ 7.2.3 Repeating Rows and Columns](https://www.w3.org/TR/css-grid-1/#repeat-notation)
///
/// "The repeat() notation represents a repeated fragment of the track
/// list, allowing a large number of columns or rows that exhibit a
/// recurring pattern to be written in a more compact form."
#[must_use]
pub fn expand_tracks(list: &[TrackListEntry]) -> Vec<TrackSize> {
    let mut ret = Vec::new();
    for entry in list {
        match entry {
            TrackListEntry::Track(t) => ret.push(*t),
            TrackListEntry::Repeat(n, tracks) => {
                for _ in 0..*n {
                    ret.extend(tracks.iter().copied());
                }
            }
        }
    }
    ret
}

/// [§ 8.3 Line-based Placement](https://www.w3.org/TR/css-grid-1/#line-placement)
///
/// "If a negative integer is given, it instead counts in reverse, starting
/// from the end edge of the explicit grid."
fn line_index(n: i32, explicit: usize) -> usize {
    if n > 0 {
        (n - 1) as usize
    } else {
        (explicit as i32 + 1 + n).max(0) as usize
    }
}

/// Resolve `start` / `end` of one axis.
pub(crate) fn axis_placement(start: GridLine, end: GridLine, explicit: usize) -> AxisPlacement {
    let span_of = |line: GridLine| match line {
        GridLine::Span(n) => (n as usize).max(1),
        _ => 1,
    };
    match (start, end) {
        (GridLine::Line(s), GridLine::Line(e)) => {
            let (s, e) = (line_index(s, explicit), line_index(e, explicit));
            let (s, e) = if e < s { (e, s) } else { (s, e) };
            AxisPlacement {
                start: Some(s),
                span: (e - s).max(1),
            }
        }
        (GridLine::Line(s), other) => AxisPlacement {
            start: Some(line_index(s, explicit)),
            span: span_of(other),
        },
        (other, GridLine::Line(e)) => {
            let e = line_index(e, explicit);
            let span = span_of(other);
            AxisPlacement {
                start: Some(e.saturating_sub(span)),
                span,
            }
        }
        (s, e) => AxisPlacement {
            start: None,
            span: span_of(s).max(span_of(e)),
        },
    }
}

/// Which cells of the grid are taken. Grows on demand.
#[derive(Debug, Clone, Default)]
struct Occupancy {
    cols: usize,
    rows: Vec<Vec<bool>>,
}

impl Occupancy {
    fn new(cols: usize, rows: usize) -> Self {
        Occupancy {
            cols,
            rows: vec![vec![false; cols]; rows],
        }
    }

    fn ensure(&mut self, cols: usize, rows: usize) {
        if cols > self.cols {
            self.cols = cols;
            for row in &mut self.rows {
                row.resize(cols, false);
            }
        }
        while self.rows.len() < rows {
            self.rows.push(vec![false; self.cols]);
        }
    }

    fn is_free(&self, area: GridArea) -> bool {
        (area.row_start..area.row_end).all(|r| {
            self.rows
                .get(r)
                .is_none_or(|row| (area.col_start..area.col_end).all(|c| !row.get(c).copied().unwrap_or(false)))
        })
    }

    fn mark(&mut self, area: GridArea) {
        self.ensure(area.col_end, area.row_end);
        for row in &mut self.rows[area.row_start..area.row_end] {
            for cell in &mut row[area.col_start..area.col_end] {
                *cell = true;
            }
        }
    }
}

fn area(col: usize, col_span: usize, row: usize, row_span: usize) -> GridArea {
    GridArea {
        col_start: col,
        col_end: col + col_span,
        row_start: row,
        row_end: row + row_span,
    }
}

/// [§ 8.5 Grid Item Placement Algorithm](https://www.w3.org/TR/css-grid-1/#auto-placement-algo)
///
/// Places the items given by their `(column, row)` requests. Returns the
/// areas in the order of the requests.
pub(crate) fn place_items(
    requests: &[(AxisPlacement, AxisPlacement)],
    explicit_cols: usize,
    explicit_rows: usize,
    flow: GridAutoFlow,
) -> Vec<GridArea> {
    let mut cols = explicit_cols.max(1);
    for (c, _) in requests {
        cols = cols.max(c.start.map_or(c.span, |s| s + c.span));
    }
    let mut occupancy = Occupancy::new(cols, explicit_rows.max(1));
    let mut placed: Vec<Option<GridArea>> = vec![None; requests.len()];

    // STEP 1: "Position anything that's not auto-positioned."
    for (n, (c, r)) in requests.iter().enumerate() {
        if let (Some(cs), Some(rs)) = (c.start, r.start) {
            let a = area(cs, c.span, rs, r.span);
            occupancy.mark(a);
            placed[n] = Some(a);
        }
    }

    // STEP 2: "Process the items locked to a given row" (or column for
    // column flow).
    for (n, (c, r)) in requests.iter().enumerate() {
        if placed[n].is_some() {
            continue;
        }
        let locked = match flow {
            GridAutoFlow::Row => r.start.map(|rs| {
                let mut col = 0;
                loop {
                    let a = area(col, c.span, rs, r.span);
                    if col + c.span > occupancy.cols.max(c.span) || occupancy.is_free(a) {
                        break a;
                    }
                    col += 1;
                }
            }),
            GridAutoFlow::Column => c.start.map(|cs| {
                let mut row = 0;
                loop {
                    let a = area(cs, c.span, row, r.span);
                    if occupancy.is_free(a) {
                        break a;
                    }
                    row += 1;
                }
            }),
        };
        if let Some(a) = locked {
            occupancy.mark(a);
            placed[n] = Some(a);
        }
    }

    // STEP 3: The rest in the auto-placement cursor order.
    let mut cursor = (0usize, 0usize);
    for (n, (c, r)) in requests.iter().enumerate() {
        if placed[n].is_some() {
            continue;
        }
        let a = match flow {
            GridAutoFlow::Row => {
                // A definite column keeps its column and searches rows.
                if let Some(cs) = c.start {
                    let mut row = 0;
                    loop {
                        let a = area(cs, c.span, row, r.span);
                        if occupancy.is_free(a) {
                            break a;
                        }
                        row += 1;
                    }
                } else {
                    let (mut row, mut col) = cursor;
                    let width = occupancy.cols.max(c.span);
                    loop {
                        if col + c.span > width {
                            col = 0;
                            row += 1;
                        }
                        let a = area(col, c.span, row, r.span);
                        if occupancy.is_free(a) {
                            cursor = (row, col + c.span);
                            break a;
                        }
                        col += 1;
                    }
                }
            }
            GridAutoFlow::Column => {
                let height = occupancy.rows.len().max(r.span);
                if let Some(rs) = r.start {
                    let mut col = 0;
                    loop {
                        let a = area(col, c.span, rs, r.span);
                        if occupancy.is_free(a) {
                            break a;
                        }
                        col += 1;
                    }
                } else {
                    let (mut row, mut col) = cursor;
                    loop {
                        if row + r.span > height {
                            row = 0;
                            col += 1;
                        }
                        let a = area(col, c.span, row, r.span);
                        if occupancy.is_free(a) {
                            cursor = (row + r.span, col);
                            break a;
                        }
                        row += 1;
                    }
                }
            }
        };
        occupancy.mark(a);
        placed[n] = Some(a);
    }
    placed.into_iter().flatten().collect()
}

/// The size of track `i` as declared: from the template, or the implicit
/// track size past its end.
fn track_at(template: &[TrackSize], auto: TrackSize, i: usize) -> TrackSize {
    template.get(i).copied().unwrap_or(auto)
}

/// [§ 12.3 Track Sizing Algorithm](https://www.w3.org/TR/css-grid-1/#algo-track-sizing)
///
/// `needs[i]` is `(min, max)` of the single-track items of track `i`.
/// `available` is `None` for an indefinite size, where `fr` tracks act
/// like `auto` ones.
pub(crate) fn size_tracks(
    tracks: &[TrackSize],
    needs: &[(f32, f32)],
    available: Option<f32>,
    gap: f32,
    resolve: impl Fn(Length, f32) -> f32,
) -> Vec<f32> {
    let count = tracks.len();
    let gaps = gap * count.saturating_sub(1) as f32;
    let reference = available.unwrap_or(0.0);
    let mut sizes = vec![0.0_f32; count];
    let mut fixed = 0.0;
    let mut fr_sum = 0.0;
    let (mut auto_min, mut auto_max) = (0.0, 0.0);

    // STEP 1: Fixed tracks, and the needs of the auto ones.
    for (i, track) in tracks.iter().enumerate() {
        let (min, max) = needs.get(i).copied().unwrap_or((0.0, 0.0));
        match (track, available) {
            (TrackSize::Length(Length::Percent(_)), None) | (TrackSize::Auto | TrackSize::Fr(_), None) => {
                sizes[i] = max;
                fixed += max;
            }
            (TrackSize::Length(l), _) => {
                sizes[i] = resolve(*l, reference).max(0.0);
                fixed += sizes[i];
            }
            (TrackSize::Auto, Some(_)) => {
                auto_min += min;
                auto_max += max;
            }
            (TrackSize::Fr(f), Some(_)) => fr_sum += f.max(0.0),
        }
    }
    let Some(available) = available else {
        return sizes;
    };

    // STEP 2: Auto tracks get their maximum need when it fits and shrink
    // towards their minimum otherwise.
    let room = available - fixed - gaps;
    let ratio = if auto_max <= auto_min {
        1.0
    } else {
        ((room - auto_min) / (auto_max - auto_min)).clamp(0.0, 1.0)
    };
    let mut auto_total = 0.0;
    for (i, track) in tracks.iter().enumerate() {
        if *track == TrackSize::Auto {
            let (min, max) = needs.get(i).copied().unwrap_or((0.0, 0.0));
            sizes[i] = min + (max - min) * ratio;
            auto_total += sizes[i];
        }
    }

    // STEP 3: Fractions of the free space, never below the content.
    //
    // [§ 12.7.1 Find the Size of an fr](https://www.w3.org/TR/css-grid-1/#algo-find-fr-size)
    if fr_sum > 0.0 {
        let per_fr = (available - fixed - auto_total - gaps).max(0.0) / fr_sum;
        for (i, track) in tracks.iter().enumerate() {
            if let TrackSize::Fr(f) = track {
                let min = needs.get(i).map_or(0.0, |n| n.0);
                sizes[i] = (per_fr * f.max(0.0)).max(min);
            }
        }
    }
    sizes
}

/// Grow the tracks under items spanning several tracks until they fit.
/// The deficit goes to the last growable track of the span.
fn grow_for_spans(sizes: &mut [f32], growable: &[bool], spans: &[(usize, usize, f32)], gap: f32) {
    for &(start, end, need) in spans {
        if end <= start + 1 || end > sizes.len() {
            continue;
        }
        let have = span_size(sizes, start, end, gap);
        if need <= have {
            continue;
        }
        let target = (start..end).rev().find(|&i| growable[i]).unwrap_or(end - 1);
        sizes[target] += need - have;
    }
}

/// Offsets of the tracks from `start`.
fn track_offsets(sizes: &[f32], gap: f32) -> Vec<f32> {
    let mut offsets = Vec::with_capacity(sizes.len() + 1);
    let mut pos = 0.0;
    for &size in sizes {
        offsets.push(pos);
        pos += size + gap;
    }
    offsets
}

/// Size of the tracks `start..end` with the gaps between them.
fn span_size(sizes: &[f32], start: usize, end: usize, gap: f32) -> f32 {
    let end = end.min(sizes.len());
    if start >= end {
        return 0.0;
    }
    sizes[start..end].iter().sum::<f32>() + gap * (end - start - 1) as f32
}

/// In-flow items in `order`, and the positioned children.
fn collect_items(tree: &BoxTree, id: BoxId) -> (Vec<BoxId>, Vec<BoxId>) {
    let mut items = Vec::new();
    let mut positioned = Vec::new();
    for &c in &tree[id].children {
        if !tree[c].displayed {
            continue;
        }
        if is_positioned(tree, c) {
            positioned.push(c);
        } else {
            items.push(c);
        }
    }
    items.sort_by_key(|&c| tree[c].style.order);
    (items, positioned)
}

/// Explicit tracks and the placement of the items.
fn grid_structure(tree: &BoxTree, id: BoxId, items: &[BoxId]) -> (Vec<TrackSize>, Vec<TrackSize>, Vec<GridArea>) {
    let style = &tree[id].style;
    let mut cols = expand_tracks(&style.grid_template_columns);
    let mut rows = expand_tracks(&style.grid_template_rows);
    let requests: Vec<(AxisPlacement, AxisPlacement)> = items
        .iter()
        .map(|&c| {
            let s = &tree[c].style;
            (
                axis_placement(s.grid_column_start, s.grid_column_end, cols.len()),
                axis_placement(s.grid_row_start, s.grid_row_end, rows.len()),
            )
        })
        .collect();
    let areas = place_items(&requests, cols.len(), rows.len(), style.grid_auto_flow);
    let ncols = areas.iter().map(|a| a.col_end).max().unwrap_or(0).max(cols.len()).max(1);
    let nrows = areas.iter().map(|a| a.row_end).max().unwrap_or(0).max(rows.len());
    cols = (0..ncols).map(|i| track_at(&cols, style.grid_auto_columns, i)).collect();
    rows = (0..nrows).map(|i| track_at(&rows, style.grid_auto_rows, i)).collect();
    (cols, rows, areas)
}

fn column_needs(tree: &BoxTree, ctx: &LayoutContext<'_>, items: &[BoxId], areas: &[GridArea], count: usize) -> Vec<(f32, f32)> {
    let mut needs = vec![(0.0_f32, 0.0_f32); count];
    for (&item, a) in items.iter().zip(areas) {
        if a.col_end == a.col_start + 1 {
            let need = &mut needs[a.col_start];
            need.0 = need.0.max(item_width(tree, ctx, item, false));
            need.1 = need.1.max(item_width(tree, ctx, item, true));
        }
    }
    needs
}

fn gaps(tree: &BoxTree, id: BoxId) -> (f32, f32) {
    let dec = decoder_for(tree, id);
    let b = &tree[id];
    (
        dec.px(b.style.column_gap, b.content.width).max(0.0),
        dec.px(b.style.row_gap, b.content.height).max(0.0),
    )
}

/// Lay out an item in a grid area `width` pixels wide.
///
/// The area is the containing block of the item. Auto margins become 0 and
/// the declared margins are kept, the free space of the area stays unused.
fn layout_item(tree: &mut BoxTree, ctx: &LayoutContext<'_>, item: BoxId, width: f32) {
    load_sizes(tree, ctx, item, false);
    let declared = tree[item].style.width;
    compute_widths(tree, item, declared, true, width, false);
    {
        let b = &mut tree[item];
        b.margin = b.decl_margin;
        b.emargin = b.margin;
        // [§ 11.3 Grid Item Sizing](https://www.w3.org/TR/css-grid-1/#grid-item-sizing)
        // "stretch: use the inline size of the grid area"
        let mut w = if declared.is_auto() {
            let deco = b.margin.horizontal() + b.border.horizontal() + b.padding.horizontal();
            (width - deco).max(0.0)
        } else {
            b.content.width
        };
        if let Some(max) = b.block.max_width {
            w = w.min(max);
        }
        if let Some(min) = b.block.min_width {
            w = w.max(min);
        }
        b.content.width = w;
        b.block.wset = true;
        b.block.width_computed = true;
    }
    update_child_sizes(tree, ctx, item);
    super::block::new_float_context(tree, item);
    let availw = total_width(tree, item);
    let _ = super::do_layout(tree, ctx, item, availw, true, true);
}

/// Lay out a grid container in `availw` pixels.
pub fn do_layout(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId, availw: f32, force: bool) -> bool {
    if !tree[id].displayed {
        let b = &mut tree[id];
        b.content = Dimension::default();
        b.bounds.set_size(0.0, 0.0);
        return true;
    }

    // STEP 1: The container width.
    if !has_fixed_width(tree, id) {
        let b = &tree[id];
        let availcont = availw - b.emargin.horizontal() - b.border.horizontal() - b.padding.horizontal();
        let pref = content_minimal_width(tree, ctx, id)
            .max(availcont)
            .min(content_maximal_width(tree, ctx, id));
        set_content_width(tree, id, pref);
        update_child_sizes(tree, ctx, id);
    }
    tree[id].block.width_computed = true;
    tree[id].avail_width = availw;
    if !tree[id].is_block && !force && availw < total_width(tree, id) {
        return false;
    }

    // STEP 2: Place the items.
    let (items, positioned) = collect_items(tree, id);
    let (col_tracks, row_tracks, areas) = grid_structure(tree, id, &items);
    let (col_gap, row_gap) = gaps(tree, id);

    // STEP 3: Columns.
    let needs = column_needs(tree, ctx, &items, &areas, col_tracks.len());
    let width = tree[id].content.width;
    let mut columns = {
        let dec = decoder_for(tree, id);
        size_tracks(&col_tracks, &needs, Some(width), col_gap, |l, r| dec.px(l, r))
    };
    let growable: Vec<bool> = col_tracks.iter().map(|t| !matches!(t, TrackSize::Length(_))).collect();
    let spans: Vec<(usize, usize, f32)> = items
        .iter()
        .zip(&areas)
        .map(|(&c, a)| (a.col_start, a.col_end, item_width(tree, ctx, c, false)))
        .collect();
    grow_for_spans(&mut columns, &growable, &spans, col_gap);

    // STEP 4: Lay the items out in their columns to learn their heights.
    for (&item, a) in items.iter().zip(&areas) {
        let w = span_size(&columns, a.col_start, a.col_end, col_gap);
        layout_item(tree, ctx, item, w);
        tree[item].item.grid_area = Some((a.col_start, a.col_end, a.row_start, a.row_end));
    }

    // STEP 5: Rows.
    let definite_height = tree[id].block.hset.then_some(tree[id].content.height);
    let mut row_needs = vec![(0.0_f32, 0.0_f32); row_tracks.len()];
    let mut row_spans = Vec::new();
    for (&item, a) in items.iter().zip(&areas) {
        let h = tree[item].bounds.height;
        if a.row_end == a.row_start + 1 {
            let need = &mut row_needs[a.row_start];
            *need = (need.0.max(h), need.1.max(h));
        } else {
            row_spans.push((a.row_start, a.row_end, h));
        }
    }
    let mut rows = {
        let dec = decoder_for(tree, id);
        size_tracks(&row_tracks, &row_needs, definite_height, row_gap, |l, r| dec.px(l, r))
    };
    let growable: Vec<bool> = row_tracks.iter().map(|t| !matches!(t, TrackSize::Length(_))).collect();
    grow_for_spans(&mut rows, &growable, &row_spans, row_gap);

    // STEP 6: Position and align the items in their areas.
    let col_offsets = track_offsets(&columns, col_gap);
    let row_offsets = track_offsets(&rows, row_gap);
    let align_items = tree[id].style.align_items;
    for (&item, a) in items.iter().zip(&areas) {
        let area_h = span_size(&rows, a.row_start, a.row_end, row_gap);
        let align = tree[item].style.align_self.unwrap_or(align_items);
        let auto_height = tree[item].style.height.is_auto();
        let dy = match align {
            AlignItems::Stretch if auto_height => {
                let deco = {
                    let b = &tree[item];
                    b.margin.vertical() + b.border.vertical() + b.padding.vertical()
                };
                set_content_height(tree, item, area_h - deco);
                tree[item].block.hset = true;
                update_child_sizes(tree, ctx, item);
                set_size_to_total(tree, item);
                0.0
            }
            AlignItems::FlexEnd => area_h - tree[item].bounds.height,
            AlignItems::Center => (area_h - tree[item].bounds.height) / 2.0,
            _ => 0.0,
        };
        set_position(tree, item, col_offsets[a.col_start], row_offsets[a.row_start] + dy);
    }

    // STEP 7: Container height.
    //
    // [§ 12.1 Grid Sizing Algorithm](https://www.w3.org/TR/css-grid-1/#algo-overview)
    if definite_height.is_none() {
        set_content_height(tree, id, span_size(&rows, 0, rows.len(), row_gap));
    }
    update_child_sizes(tree, ctx, id);
    for c in positioned {
        layout_block_positioned(tree, ctx, c);
    }
    set_size_to_total(tree, id);
    trace!(
        target: "quokka::layout",
        "grid {id:?}: {}x{} tracks, columns {columns:?}, rows {rows:?}",
        columns.len(),
        rows.len()
    );
    true
}

fn content_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId, max: bool) -> f32 {
    let (items, _) = collect_items(tree, id);
    let (col_tracks, _, areas) = grid_structure(tree, id, &items);
    let (col_gap, _) = gaps(tree, id);
    let needs = column_needs(tree, ctx, &items, &areas, col_tracks.len());
    let dec = decoder_for(tree, id);
    let mut sizes: Vec<f32> = col_tracks
        .iter()
        .zip(&needs)
        .map(|(t, n)| match t {
            TrackSize::Length(l) if !l.is_percent() => dec.px(*l, 0.0).max(0.0),
            _ if max => n.1,
            _ => n.0,
        })
        .collect();
    let growable: Vec<bool> = col_tracks.iter().map(|t| !matches!(t, TrackSize::Length(_))).collect();
    let spans: Vec<(usize, usize, f32)> = items
        .iter()
        .zip(&areas)
        .map(|(&c, a)| (a.col_start, a.col_end, item_width(tree, ctx, c, max)))
        .collect();
    grow_for_spans(&mut sizes, &growable, &spans, col_gap);
    span_size(&sizes, 0, sizes.len(), col_gap)
}

/// Narrowest content width of a grid container.
#[must_use]
pub fn content_minimal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    content_width(tree, ctx, id, false)
}

/// Preferred content width of a grid container.
#[must_use]
pub fn content_maximal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    content_width(tree, ctx, id, true)
}

/// Narrowest margin box of a grid container.
#[must_use]
pub fn minimal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    outer_width(tree, id, content_minimal_width(tree, ctx, id))
}

/// Preferred margin box width of a grid container.
#[must_use]
pub fn maximal_width(tree: &BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    outer_width(tree, id, content_maximal_width(tree, ctx, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto() -> AxisPlacement {
        AxisPlacement { start: None, span: 1 }
    }

    #[test]
    fn test_repeat_expands() {
        let list = vec![
            TrackListEntry::Track(TrackSize::Length(Length::Px(50.0))),
            TrackListEntry::Repeat(2, vec![TrackSize::Fr(1.0), TrackSize::Auto]),
        ];
        assert_eq!(
            expand_tracks(&list),
            vec![
                TrackSize::Length(Length::Px(50.0)),
                TrackSize::Fr(1.0),
                TrackSize::Auto,
                TrackSize::Fr(1.0),
                TrackSize::Auto,
            ]
        );
    }

    #[test]
    fn test_axis_placement_lines_and_spans() {
        assert_eq!(
            axis_placement(GridLine::Line(2), GridLine::Line(4), 3),
            AxisPlacement { start: Some(1), span: 2 }
        );
        assert_eq!(
            axis_placement(GridLine::Line(1), GridLine::Line(-1), 3),
            AxisPlacement { start: Some(0), span: 3 }
        );
        assert_eq!(
            axis_placement(GridLine::Auto, GridLine::Span(2), 3),
            AxisPlacement { start: None, span: 2 }
        );
        assert_eq!(
            axis_placement(GridLine::Span(2), GridLine::Line(3), 3),
            AxisPlacement { start: Some(0), span: 2 }
        );
    }

    #[test]
    fn test_auto_placement_row_major() {
        let requests = vec![(auto(), auto()); 5];
        let areas = place_items(&requests, 2, 0, GridAutoFlow::Row);
        let cells: Vec<(usize, usize)> = areas.iter().map(|a| (a.col_start, a.row_start)).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    }

    #[test]
    fn test_auto_placement_skips_explicit_items() {
        let explicit = (
            AxisPlacement { start: Some(0), span: 1 },
            AxisPlacement { start: Some(0), span: 1 },
        );
        let requests = vec![(auto(), auto()), explicit, (auto(), auto())];
        let areas = place_items(&requests, 2, 0, GridAutoFlow::Row);
        assert_eq!((areas[1].col_start, areas[1].row_start), (0, 0));
        assert_eq!((areas[0].col_start, areas[0].row_start), (1, 0));
        assert_eq!((areas[2].col_start, areas[2].row_start), (0, 1));
    }

    #[test]
    fn test_auto_placement_column_major() {
        let requests = vec![(auto(), auto()); 3];
        let areas = place_items(&requests, 2, 2, GridAutoFlow::Column);
        let cells: Vec<(usize, usize)> = areas.iter().map(|a| (a.col_start, a.row_start)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_fr_tracks_share_free_space() {
        let tracks = vec![TrackSize::Length(Length::Px(100.0)), TrackSize::Fr(1.0), TrackSize::Fr(2.0)];
        let sizes = size_tracks(&tracks, &[], Some(420.0), 10.0, |l, r| match l {
            Length::Px(v) => v,
            Length::Percent(p) => p * r / 100.0,
            _ => 0.0,
        });
        assert_eq!(sizes, vec![100.0, 100.0, 200.0]);
    }

    #[test]
    fn test_fr_track_floored_at_content() {
        let tracks = vec![TrackSize::Fr(1.0), TrackSize::Fr(1.0)];
        let needs = vec![(150.0, 150.0), (0.0, 0.0)];
        let sizes = size_tracks(&tracks, &needs, Some(200.0), 0.0, |_, _| 0.0);
        assert_eq!(sizes, vec![150.0, 100.0]);
    }

    #[test]
    fn test_spanning_item_grows_last_track() {
        let mut sizes = vec![10.0, 10.0];
        grow_for_spans(&mut sizes, &[true, true], &[(0, 2, 50.0)], 0.0);
        assert_eq!(sizes, vec![10.0, 40.0]);
    }
}
