//! HTML rendering of the results container.
//!
//! Produces the `<table>` a documentation page swaps in for its results element:
//!
//! ```html
//! <table id="results" style="display: block">
//! <tr><td><a id="link0" href="png.html#read_png">imageformats.png.read_png</a></td></tr>
//! </table>
//! ```

use crate::container::{ResultContainer, Visibility};
use crate::presenter::{Presenter, ResultRow};

/// Escape for HTML attribute values. Escapes `& < > " '`
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape for element text. Quotes are safe here, only `& < >` are touched
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Presenter that renders its state as an HTML table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlTable {
    container: ResultContainer,
}

impl HtmlTable {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container: ResultContainer::new(container_id),
        }
    }

    pub fn container(&self) -> &ResultContainer {
        &self.container
    }

    /// Current state as markup
    pub fn render(&self) -> String {
        let display = match self.container.visibility() {
            Visibility::Hidden => "none",
            Visibility::Shown => "block",
        };

        let mut html = format!(
            "<table id=\"{}\" style=\"display: {display}\">\n",
            escape_attr(self.container.id())
        );
        for row in self.container.rows() {
            html.push_str(&render_row(row));
            html.push('\n');
        }
        html.push_str("</table>");
        html
    }
}

fn render_row(row: &ResultRow) -> String {
    match row {
        ResultRow::Link(link) => format!(
            "<tr><td><a id=\"{}\" href=\"{}\">{}</a></td></tr>",
            escape_attr(&link.id),
            escape_attr(&link.href),
            escape_text(&link.text)
        ),
        ResultRow::Placeholder { text } => format!("<tr><td>{}</td></tr>", escape_text(text)),
    }
}

impl Presenter for HtmlTable {
    fn clear(&mut self) {
        self.container.clear();
    }

    fn show(&mut self, rows: Vec<ResultRow>) {
        self.container.show(rows);
    }

    fn hide(&mut self) {
        self.container.hide();
    }
}
