//! Float bookkeeping for one block formatting context.
//!
//! [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
//!
//! "A float is a box that is shifted to the left or right on the current line.
//! The most interesting characteristic of a float is that content may flow along
//! its side (or be prohibited from doing so by the 'clear' property)."
//!
//! Every block formatting context keeps two lists, one per side. The boxes of
//! one context share the lists of the box that established it; a block that
//! establishes a new context gets fresh ones. Entries are stored in the
//! coordinate system of the list owner's content box, with `x` measured from
//! the side the list belongs to (from the left edge for the left list, from
//! the right edge for the right list).

use super::box_tree::BoxId;
use super::geometry::Rect;

/// A float that has been placed in the list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatEntry {
    /// The floating box.
    pub id: BoxId,
    /// Margin box of the float in owner coordinates.
    pub bounds: Rect,
    /// Containing block of the floating box.
    pub containing_block: Option<BoxId>,
}

/// [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
///
/// "Since a float is not in the flow, non-positioned block boxes created
/// before and after the float box flow vertically as if the float did not
/// exist. However, the current and subsequent line boxes created next to
/// the float are shortened as necessary to make room for the margin box
/// of the float."
#[derive(Debug, Clone)]
pub struct FloatList {
    owner: BoxId,
    entries: Vec<FloatEntry>,
    /// Index of the float reaching lowest.
    bottom: Option<usize>,
    /// Index of the float placed lowest at its top edge.
    last: Option<usize>,
}

impl FloatList {
    /// An empty list owned by the box establishing the formatting context.
    #[must_use]
    pub const fn new(owner: BoxId) -> Self {
        FloatList {
            owner,
            entries: Vec::new(),
            bottom: None,
            last: None,
        }
    }

    /// The box whose content box defines the list coordinates.
    #[must_use]
    pub const fn owner(&self) -> BoxId {
        self.owner
    }

    /// Number of floats in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no float has been placed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The placed floats in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[FloatEntry] {
        &self.entries
    }

    /// Record a placed float.
    pub fn add(&mut self, entry: FloatEntry) {
        let index = self.entries.len();
        if entry.bounds.bottom() > self.max_y() {
            self.bottom = Some(index);
        }
        if entry.bounds.y > self.last_y() {
            self.last = Some(index);
        }
        self.entries.push(entry);
    }

    /// The lowest bottom edge of all floats, 0 when empty.
    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.bottom
            .and_then(|i| self.entries.get(i))
            .map_or(0.0, |e| e.bounds.bottom())
    }

    /// [§ 9.5.1 Rule 5](https://www.w3.org/TR/CSS2/visuren.html#float-position)
    ///
    /// "The outer top of a floating box may not be higher than the outer top
    /// of any block or floated box generated by an element earlier in the
    /// source document."
    ///
    /// Top edge of the float placed lowest so far, 0 when empty.
    #[must_use]
    pub fn last_y(&self) -> f32 {
        self.last
            .and_then(|i| self.entries.get(i))
            .map_or(0.0, |e| e.bounds.y)
    }

    /// Total width taken by the floats covering the line at `y`.
    #[must_use]
    pub fn width_at(&self, y: f32) -> f32 {
        self.entries
            .iter()
            .filter(|e| e.bounds.y <= y && e.bounds.bottom() > y)
            .map(|e| e.bounds.right())
            .fold(0.0, f32::max)
    }

    /// The bottom edge of the widest float covering `y`: the next `y` at
    /// which the available width may change. `None` if no float covers `y`.
    #[must_use]
    pub fn next_y_change(&self, y: f32) -> Option<f32> {
        let mut widest = 0.0;
        let mut next = None;
        for e in &self.entries {
            if e.bounds.y <= y && e.bounds.bottom() > y && e.bounds.right() > widest {
                widest = e.bounds.right();
                next = Some(e.bounds.bottom());
            }
        }
        next
    }

    /// The earliest width change in either of two lists.
    #[must_use]
    pub fn next_y_change_both(left: &FloatList, right: &FloatList, y: f32) -> Option<f32> {
        match (left.next_y_change(y), right.next_y_change(y)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// The lowest bottom edge of the floats whose containing block is `owner`.
    #[must_use]
    pub fn max_y_for_owner(&self, owner: BoxId) -> f32 {
        self.entries
            .iter()
            .filter(|e| e.containing_block == Some(owner))
            .map(|e| e.bounds.bottom())
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn entry(id: usize, x: f32, y: f32, w: f32, h: f32) -> FloatEntry {
        FloatEntry {
            id: BoxId(id),
            bounds: Rect::new(x, y, w, h),
            containing_block: Some(BoxId(0)),
        }
    }

    #[test]
    fn test_width_and_next_y() {
        let mut list = FloatList::new(BoxId(0));
        assert_eq!(list.width_at(0.0), 0.0);
        assert_eq!(list.next_y_change(0.0), None);

        list.add(entry(1, 0.0, 0.0, 100.0, 50.0));
        list.add(entry(2, 100.0, 0.0, 30.0, 20.0));
        assert_eq!(list.width_at(10.0), 130.0);
        assert_eq!(list.next_y_change(10.0), Some(20.0));
        assert_eq!(list.width_at(20.0), 100.0);
        assert_eq!(list.next_y_change(20.0), Some(50.0));
        assert_eq!(list.width_at(50.0), 0.0);
        assert_eq!(list.max_y(), 50.0);
    }

    #[test]
    fn test_last_y_tracks_lowest_top() {
        let mut list = FloatList::new(BoxId(0));
        list.add(entry(1, 0.0, 40.0, 10.0, 10.0));
        list.add(entry(2, 0.0, 10.0, 10.0, 10.0));
        assert_eq!(list.last_y(), 40.0);
        assert_eq!(list.max_y_for_owner(BoxId(0)), 50.0);
        assert_eq!(list.max_y_for_owner(BoxId(9)), 0.0);
    }

    #[test]
    fn test_next_y_change_both_takes_earliest() {
        let mut left = FloatList::new(BoxId(0));
        let mut right = FloatList::new(BoxId(0));
        left.add(entry(1, 0.0, 0.0, 10.0, 30.0));
        right.add(entry(2, 0.0, 0.0, 10.0, 15.0));
        assert_eq!(FloatList::next_y_change_both(&left, &right, 0.0), Some(15.0));
        assert_eq!(FloatList::next_y_change_both(&left, &right, 20.0), Some(30.0));
        assert_eq!(FloatList::next_y_change_both(&left, &right, 40.0), None);
    }

    #[quickcheck]
    fn prop_width_at_never_shrinks(floats: Vec<(u8, u8, u8, u8)>, at: u8) -> bool {
        let mut list = FloatList::new(BoxId(0));
        let y = f32::from(at);
        let mut before = list.width_at(y);
        for (n, &(x, top, w, h)) in floats.iter().enumerate() {
            list.add(entry(n + 1, f32::from(x), f32::from(top), f32::from(w), f32::from(h)));
            let after = list.width_at(y);
            if after < before {
                return false;
            }
            before = after;
        }
        true
    }

    #[quickcheck]
    fn prop_max_y_is_lowest_bottom(floats: Vec<(u8, u8)>) -> bool {
        let mut list = FloatList::new(BoxId(0));
        for (n, &(top, h)) in floats.iter().enumerate() {
            list.add(entry(n + 1, 0.0, f32::from(top), 10.0, f32::from(h)));
        }
        let lowest = floats
            .iter()
            .map(|&(top, h)| f32::from(top) + f32::from(h))
            .fold(0.0, f32::max);
        list.max_y() == lowest
    }
}
