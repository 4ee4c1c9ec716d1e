//! The `display` property and the HTML default display table.
//!
//! [§ 9.2.4 The 'display' property](https://www.w3.org/TR/CSS2/visuren.html#display-prop)

use serde::Serialize;
use strum_macros::{Display as StrumDisplay, EnumString};

/// [§ 9.2.4 The 'display' property](https://www.w3.org/TR/CSS2/visuren.html#display-prop)
///
/// "Value: inline | block | list-item | inline-block | table | inline-table |
/// table-row-group | table-header-group | table-footer-group | table-row |
/// table-column-group | table-column | table-cell | table-caption | none"
///
/// Plus the flex and grid values from css-flexbox-1 and css-grid-1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, StrumDisplay, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Display {
    /// "This value causes an element to generate one or more inline boxes."
    #[default]
    Inline,
    /// "This value causes an element to generate a block box."
    Block,
    /// "This value causes an element (e.g., LI in HTML) to generate a principal
    /// block box and a marker box."
    ListItem,
    /// "This value causes an element to generate an inline-level block container."
    InlineBlock,
    /// "Specifies that an element defines a block-level table."
    Table,
    /// "Specifies that an element defines an inline-level table."
    InlineTable,
    /// "Specifies that an element groups one or more rows."
    TableRowGroup,
    /// "Like 'table-row-group', but for visual formatting, the row group is
    /// always displayed before all other rows and row groups."
    TableHeaderGroup,
    /// "Like 'table-row-group', but for visual formatting, the row group is
    /// always displayed after all other rows and row groups."
    TableFooterGroup,
    /// "Specifies that an element is a row of cells."
    TableRow,
    /// "Specifies that an element groups one or more columns."
    TableColumnGroup,
    /// "Specifies that an element describes a column of cells."
    TableColumn,
    /// "Specifies that an element represents a table cell."
    TableCell,
    /// "Specifies a caption for the table."
    TableCaption,
    /// [§ 3 Flex Containers](https://www.w3.org/TR/css-flexbox-1/#flex-containers)
    Flex,
    /// Inline-level flex container.
    InlineFlex,
    /// [§ 5 Grid Containers](https://www.w3.org/TR/css-grid-1/#grid-containers)
    Grid,
    /// Inline-level grid container.
    InlineGrid,
    /// "This value causes an element to not appear in the formatting structure."
    None,
}

impl Display {
    /// Block-level boxes participate in a block formatting context.
    #[must_use]
    pub const fn is_block_level(self) -> bool {
        matches!(
            self,
            Display::Block
                | Display::ListItem
                | Display::Table
                | Display::Flex
                | Display::Grid
                | Display::TableCaption
                | Display::TableCell
                | Display::TableRow
                | Display::TableRowGroup
                | Display::TableHeaderGroup
                | Display::TableFooterGroup
                | Display::TableColumn
                | Display::TableColumnGroup
        )
    }

    /// Atomic inline-level boxes: laid out as a block inside, placed on a line
    /// as a single unit.
    #[must_use]
    pub const fn is_inline_block_like(self) -> bool {
        matches!(
            self,
            Display::InlineBlock | Display::InlineTable | Display::InlineFlex | Display::InlineGrid
        )
    }

    /// Row-group, header-group or footer-group.
    #[must_use]
    pub const fn is_row_group(self) -> bool {
        matches!(
            self,
            Display::TableRowGroup | Display::TableHeaderGroup | Display::TableFooterGroup
        )
    }

    /// Table and inline-table.
    #[must_use]
    pub const fn is_table(self) -> bool {
        matches!(self, Display::Table | Display::InlineTable)
    }

    /// "Proper table child": anything that may appear directly inside a table
    /// box.
    #[must_use]
    pub const fn is_proper_table_child(self) -> bool {
        matches!(
            self,
            Display::TableRowGroup
                | Display::TableHeaderGroup
                | Display::TableFooterGroup
                | Display::TableRow
                | Display::TableCaption
                | Display::TableColumn
                | Display::TableColumnGroup
        )
    }
}

// [HTML Living Standard § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
// defines the default CSS styles for HTML elements.

/// Returns the default display value for an HTML element.
///
/// [§ 15.3.1 Hidden elements](https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements)
/// [§ 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3)
/// [§ 15.3.8 Tables](https://html.spec.whatwg.org/multipage/rendering.html#tables-2)
#[must_use]
pub fn default_display_for_element(tag_name: &str) -> Display {
    match tag_name {
        // "The following elements must have their display set to none"
        "area" | "base" | "basefont" | "datalist" | "head" | "link" | "meta" | "noembed"
        | "noframes" | "param" | "rp" | "script" | "style" | "template" | "title" => Display::None,

        "address" | "article" | "aside" | "blockquote" | "body" | "center" | "dd" | "details"
        | "dialog" | "dir" | "div" | "dl" | "dt" | "fieldset" | "figcaption" | "figure"
        | "footer" | "form" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "header" | "hgroup"
        | "hr" | "html" | "legend" | "listing" | "main" | "menu" | "nav" | "ol" | "p"
        | "plaintext" | "pre" | "section" | "summary" | "ul" | "xmp" => Display::Block,

        "li" => Display::ListItem,

        "table" => Display::Table,
        "caption" => Display::TableCaption,
        "colgroup" => Display::TableColumnGroup,
        "col" => Display::TableColumn,
        "thead" => Display::TableHeaderGroup,
        "tbody" => Display::TableRowGroup,
        "tfoot" => Display::TableFooterGroup,
        "tr" => Display::TableRow,
        "td" | "th" => Display::TableCell,

        "input" | "button" | "textarea" | "select" => Display::InlineBlock,

        _ => Display::Inline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keywords_round_trip_through_strum() {
        assert_eq!("table-row-group".parse::<Display>(), Ok(Display::TableRowGroup));
        assert_eq!("INLINE-BLOCK".parse::<Display>(), Ok(Display::InlineBlock));
        assert_eq!(Display::ListItem.to_string(), "list-item");
        assert!("inline-sideways".parse::<Display>().is_err());
    }

    #[test]
    fn test_html_defaults() {
        assert_eq!(default_display_for_element("p"), Display::Block);
        assert_eq!(default_display_for_element("td"), Display::TableCell);
        assert_eq!(default_display_for_element("head"), Display::None);
        assert_eq!(default_display_for_element("span"), Display::Inline);
    }
}
