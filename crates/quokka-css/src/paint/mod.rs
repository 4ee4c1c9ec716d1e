//! CSS Painting
//!
//! [CSS 2.1 Appendix E - Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! The layout engine does not draw. After layout the tree is replayed to a
//! [`BoxRenderer`] in painting order; [`DisplayList`] is a renderer that
//! records the calls as [`PaintCommand`]s for any backend to execute.
//!
//! ```text
//! Build → Layout → Paint → Render
//!                    ↓
//!              DisplayList
//! ```

mod display_list;
mod painter;

pub use display_list::{DisplayList, PaintCommand};
pub use painter::{BoxRenderer, canvas_background, draw_stacking_context, paint, used_background};
