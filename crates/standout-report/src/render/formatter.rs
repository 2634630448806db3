//! Mapping cells to styled containers.
//!
//! [`CellFormatter::container`] describes how a cell is wrapped: tag, id,
//! CSS classes, tooltip, attributes and an optional hyperlink. Classes are
//! accumulated with a [`ClassList`] in a fixed order:
//!
//! 1. the cell's own `css_class` override,
//! 2. `err` for failed or error-flagged cells,
//! 3. `align-<dir>` when the column alignment differs from its default,
//! 4. `null` for null cells,
//! 5. `num` when the effective number style is not `None`,
//! 6. `num-pct` for percentage styles,
//! 7. `num-neg` for negative values.
//!
//! Each class is added at most once, compared case-insensitively.

use std::collections::BTreeMap;
use std::fmt;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::cell::Cell;
use crate::column::{ColumnInfo, NumberStyle};
use crate::config::RenderConfig;

/// Ordered, de-duplicated CSS class accumulator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one or more whitespace-separated classes, lowercased. Classes
    /// already present are skipped.
    pub fn add(&mut self, classes: &str) -> &mut Self {
        for class in classes.split_whitespace() {
            if !self.contains(class) {
                self.classes.push(class.to_lowercase());
            }
        }
        self
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c.eq_ignore_ascii_case(class))
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn build(self) -> Vec<String> {
        self.classes
    }
}

/// Hyperlink wrapped around a cell's content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hyperlink {
    pub url: String,
    pub class: Option<String>,
}

/// Final description of a cell's container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellContainer {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub tooltip: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub link: Option<Hyperlink>,
}

impl CellContainer {
    /// Space-joined classes, or `None` when there are none.
    pub fn class_attr(&self) -> Option<String> {
        if self.classes.is_empty() {
            None
        } else {
            Some(self.classes.join(" "))
        }
    }

    /// Writes the opening tag.
    pub fn write_open(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        if let Some(id) = &self.id {
            write_attr(out, "id", id)?;
        }
        if let Some(class) = self.class_attr() {
            write_attr(out, "class", &class)?;
        }
        if let Some(tooltip) = &self.tooltip {
            write_attr(out, "title", tooltip)?;
        }
        for (name, value) in &self.attributes {
            write_attr(out, name, value)?;
        }
        out.write_char('>')
    }

    /// Writes escaped content, wrapped in the hyperlink if there is one.
    pub fn write_body(&self, out: &mut dyn fmt::Write, text: &str) -> fmt::Result {
        match &self.link {
            Some(link) => {
                out.write_str("<a")?;
                write_attr(out, "href", &link.url)?;
                if let Some(class) = &link.class {
                    write_attr(out, "class", class)?;
                }
                write!(out, ">{}</a>", encode_text(text))
            }
            None => out.write_str(&encode_text(text)),
        }
    }

    pub fn write_close(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "</{}>", self.tag)
    }
}

fn write_attr(out: &mut dyn fmt::Write, name: &str, value: &str) -> fmt::Result {
    write!(out, " {}=\"{}\"", name, encode_double_quoted_attribute(value))
}

/// Maps a cell and its column to a styled container.
pub trait CellFormatter {
    /// Describes the container for `cell`.
    fn container(&self, column: &ColumnInfo, cell: &Cell) -> CellContainer;

    /// Writes the complete container, including its body.
    fn write_cell(&self, out: &mut dyn fmt::Write, column: &ColumnInfo, cell: &Cell) -> fmt::Result;
}

/// The standard HTML cell formatter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlCellFormatter {
    null_token: String,
    error_token: String,
    tag: String,
}

impl Default for HtmlCellFormatter {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl HtmlCellFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        HtmlCellFormatter {
            null_token: config.null_token.clone(),
            error_token: config.error_token.clone(),
            tag: config.cell_tag.clone(),
        }
    }

    /// Text written for null cells (default `~`).
    pub fn null_token(mut self, token: impl Into<String>) -> Self {
        self.null_token = token.into();
        self
    }

    /// Text written for failed cells (default `#ERR#`).
    pub fn error_token(mut self, token: impl Into<String>) -> Self {
        self.error_token = token.into();
        self
    }

    /// Container tag name (default `td`).
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// The body text of a cell, before escaping.
    pub fn body<'a>(&'a self, cell: &'a Cell) -> &'a str {
        if shows_error_token(cell) {
            &self.error_token
        } else if cell.is_null() {
            &self.null_token
        } else {
            cell.display().unwrap_or("")
        }
    }
}

/// Failed cells, and error-flagged cells with nothing to show.
pub(crate) fn shows_error_token(cell: &Cell) -> bool {
    cell.error().is_some() || (cell.is_error() && cell.display().is_none())
}

impl CellFormatter for HtmlCellFormatter {
    fn container(&self, column: &ColumnInfo, cell: &Cell) -> CellContainer {
        let info = cell.info();
        let mut classes = ClassList::new();

        if let Some(class) = info.and_then(|i| i.css_class.as_deref()) {
            classes.add(class);
        }
        if cell.is_error() {
            classes.add("err");
        }
        if let Some(dir) = column.align().as_css() {
            if !column.has_default_align() {
                classes.add(&format!("align-{}", dir));
            }
        }
        if cell.is_null() {
            classes.add("null");
        }
        let style = info
            .and_then(|i| i.number_style)
            .unwrap_or(column.number_style());
        if style != NumberStyle::None {
            classes.add("num");
        }
        if style.is_percentage() {
            classes.add("num-pct");
        }
        if cell.is_negative() {
            classes.add("num-neg");
        }

        let mut attributes = column.attributes().clone();
        if let Some(info) = info {
            attributes.extend(info.attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        CellContainer {
            tag: self.tag.clone(),
            id: info.and_then(|i| i.id.clone()),
            classes: classes.build(),
            tooltip: info
                .and_then(|i| i.tooltip.clone())
                .or_else(|| cell.error().map(str::to_string)),
            attributes,
            link: info.and_then(|i| {
                i.url.as_ref().map(|url| Hyperlink {
                    url: url.clone(),
                    class: i.url_class.clone(),
                })
            }),
        }
    }

    fn write_cell(&self, out: &mut dyn fmt::Write, column: &ColumnInfo, cell: &Cell) -> fmt::Result {
        let container = self.container(column, cell);
        container.write_open(out)?;
        let body = self.body(cell);
        if cell.is_null() || shows_error_token(cell) {
            // Tokens are never linked.
            out.write_str(&encode_text(body))?;
        } else {
            container.write_body(out, body)?;
        }
        container.write_close(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellInfo;
    use crate::column::TextAlign;
    use crate::resolve::{CellResolver, DefaultResolver};
    use crate::value::ValueKind;

    fn column(kind: ValueKind) -> ColumnInfo {
        let mut col = ColumnInfo::new("c", "Rec", "t", kind);
        DefaultResolver.prepare_column(&mut col);
        col
    }

    fn render(col: &ColumnInfo, cell: &Cell) -> String {
        let mut out = String::new();
        HtmlCellFormatter::default().write_cell(&mut out, col, cell).unwrap();
        out
    }

    #[test]
    fn class_list_dedupes_case_insensitively() {
        let mut list = ClassList::new();
        list.add("Num").add("num").add("num-pct hot").add("HOT");
        assert_eq!(list.build(), vec!["num", "num-pct", "hot"]);
    }

    #[test]
    fn class_list_does_not_treat_prefix_as_duplicate() {
        let mut list = ClassList::new();
        list.add("num-pct").add("num");
        assert_eq!(list.build(), vec!["num-pct", "num"]);
    }

    #[test]
    fn plain_text_cell_has_no_class() {
        let col = column(ValueKind::Text);
        assert_eq!(render(&col, &Cell::text("A")), "<td>A</td>");
    }

    #[test]
    fn class_order() {
        let mut col = column(ValueKind::Float);
        col.set_align(TextAlign::Center).as_percentage();

        let mut cell = Cell::failed("bad");
        cell.info_mut().css_class = Some("Custom".into());
        cell.info_mut().is_negative = true;

        let container = HtmlCellFormatter::default().container(&col, &cell);
        assert_eq!(
            container.classes,
            vec!["custom", "err", "align-center", "null", "num", "num-pct", "num-neg"]
        );
    }

    #[test]
    fn default_numeric_alignment_is_not_a_class() {
        let col = column(ValueKind::Int);
        let container = HtmlCellFormatter::default().container(&col, &Cell::text("1"));
        assert_eq!(container.classes, vec!["num"]);
    }

    #[test]
    fn cell_number_style_overrides_column() {
        let col = column(ValueKind::Text);
        let cell = Cell::text("5").with_info(CellInfo {
            number_style: Some(NumberStyle::Percentage),
            ..Default::default()
        });
        let container = HtmlCellFormatter::default().container(&col, &cell);
        assert_eq!(container.classes, vec!["num", "num-pct"]);
    }

    #[test]
    fn tokens_and_tooltips() {
        let col = column(ValueKind::Text);
        assert_eq!(render(&col, &Cell::null()), "<td class=\"null\">~</td>");
        assert_eq!(
            render(&col, &Cell::failed("no value")),
            "<td class=\"err null\" title=\"no value\">#ERR#</td>"
        );

        let custom = HtmlCellFormatter::default().null_token("n/a").error_token("!");
        let mut out = String::new();
        custom.write_cell(&mut out, &col, &Cell::null()).unwrap();
        assert_eq!(out, "<td class=\"null\">n/a</td>");
    }

    #[test]
    fn link_id_and_attributes() {
        let mut col = column(ValueKind::Text);
        col.set_attribute("data-col", "name");
        let mut cell = Cell::text("Ann & Bob");
        {
            let info = cell.info_mut();
            info.id = Some("c1".into());
            info.url = Some("/u?a=1&b=2".into());
            info.url_class = Some("ext".into());
            info.tooltip = Some("say \"hi\"".into());
            info.attributes.insert("data-col".into(), "override".into());
        }
        assert_eq!(
            render(&col, &cell),
            "<td id=\"c1\" title=\"say &quot;hi&quot;\" data-col=\"override\">\
             <a href=\"/u?a=1&amp;b=2\" class=\"ext\">Ann &amp; Bob</a></td>"
        );
    }

    #[test]
    fn flagged_error_keeps_value() {
        let col = column(ValueKind::Text);
        let mut cell = Cell::text("late");
        cell.flag_error();
        assert_eq!(render(&col, &cell), "<td class=\"err\">late</td>");
    }
}
