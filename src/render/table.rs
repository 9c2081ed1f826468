use crate::links::owner_href;
use crate::markup::Element;
use crate::types::{ColumnKey, ColumnSpec, TableOptions, TicketRecord};

pub const TABLE_CLASS: &str = "listing subtickets";
pub const INDENT_CLASS: &str = "indent";
pub const INDENT_LEVEL_CLASS: &str = "indent-level";

/// Renders a depth-annotated ticket listing as an indented table.
///
/// Rows follow the input order exactly. Depth only adds indentation markers
/// to the id cell; it never moves or regroups rows.
pub struct TreeTableRenderer<'a> {
    columns: &'a ColumnSpec,
    link_builder: &'a dyn Fn(u64) -> String,
    options: TableOptions,
}

impl<'a> TreeTableRenderer<'a> {
    pub fn new(columns: &'a ColumnSpec, link_builder: &'a dyn Fn(u64) -> String) -> Self {
        Self {
            columns,
            link_builder,
            options: TableOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the table, or `None` when there is nothing to list.
    pub fn render(&self, sequence: &[TicketRecord]) -> Option<Element> {
        let rows: Vec<Element> = sequence
            .iter()
            .filter(|record| self.is_listed(record))
            .map(|record| self.body_row(record))
            .collect();

        if rows.is_empty() {
            return None;
        }

        Some(
            Element::new("table")
                .class(TABLE_CLASS)
                .child(Element::new("thead").child(self.header_row()))
                .child(Element::new("tbody").children(rows)),
        )
    }

    fn is_listed(&self, record: &TicketRecord) -> bool {
        self.options
            .max_depth
            .is_none_or(|max_depth| record.depth <= max_depth)
    }

    fn header_row(&self) -> Element {
        Element::new("tr").children(
            self.columns
                .iter()
                .map(|column| Element::new("th").text(column.label.as_str())),
        )
    }

    fn body_row(&self, record: &TicketRecord) -> Element {
        Element::new("tr")
            .class(&status_class(&record.status))
            .children(self.columns.keys().map(|key| self.cell(record, key)))
    }

    fn cell(&self, record: &TicketRecord, key: ColumnKey) -> Element {
        match key {
            ColumnKey::Id => self.id_cell(record),
            ColumnKey::Owner => self.owner_cell(record),
            _ => Element::new("td").text(record.field_text(key)),
        }
    }

    fn id_cell(&self, record: &TicketRecord) -> Element {
        let mut cell = Element::new("td");
        if record.depth > 0 {
            cell.push(indentation(record.depth));
        }
        cell.child(
            Element::new("a")
                .attr("href", (self.link_builder)(record.id))
                .text(record.field_text(ColumnKey::Id)),
        )
    }

    fn owner_cell(&self, record: &TicketRecord) -> Element {
        let cell = Element::new("td");
        match (&self.options.owner_url, record.owner.as_deref()) {
            (Some(template), Some(owner)) if !owner.is_empty() => cell.child(
                Element::new("a")
                    .attr("href", owner_href(template, owner))
                    .text(owner),
            ),
            _ => cell.text(record.field_text(ColumnKey::Owner)),
        }
    }
}

/// Render `sequence` with default options.
pub fn render_table(
    sequence: &[TicketRecord],
    columns: &ColumnSpec,
    link_builder: &dyn Fn(u64) -> String,
) -> Option<Element> {
    TreeTableRenderer::new(columns, link_builder).render(sequence)
}

/// One marker per level of depth.
fn indentation(depth: usize) -> Element {
    Element::new("span")
        .class(INDENT_CLASS)
        .children((0..depth).map(|_| Element::new("span").class(INDENT_LEVEL_CLASS)))
}

/// CSS hook for a row's status, reduced to characters safe in a class name.
fn status_class(status: &str) -> String {
    let cleaned: String = status
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("status-{cleaned}")
}
