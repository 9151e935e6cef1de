//! Deterministic HTML rendering for the report surfaces. No I/O here: the
//! binary decides where the markup goes.

use crate::format::formatted_rows;
use crate::RecordTable;

/// Escapes text for inclusion in HTML element content or attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a header and formatted rows as an HTML table.
pub fn render_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::with_capacity(64 * (rows.len() + 1));
    out.push_str("<table><thead><tr>");
    for name in header {
        out.push_str("<th>");
        out.push_str(&escape(name));
        out.push_str("</th>");
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            out.push_str(&escape(cell));
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

/// Formats and renders a whole table.
pub fn render_record_table(table: &RecordTable) -> String {
    let header = table.column_names();
    let rows = formatted_rows(table);
    render_table(&header, &rows)
}

/// The fixed per-user report document: a minimal template parameterized only
/// by the user value and the rendered table markup.
pub fn render_user_report(user: &str, table_html: &str) -> String {
    format!(
        "<html><head><meta charset=\"utf-8\"><title>Informe {user}</title></head>\n\
         <body><h1>Informe individual: {user}</h1>{table}</body></html>",
        user = escape(user),
        table = table_html,
    )
}
