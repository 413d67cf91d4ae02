//! HTML preview rendering
//!
//! Renders merged rows as a plain HTML table for the browser preview.
//! Headers come from the fixed canonical column order; blank values render
//! as empty cells.

use crate::models::{CanonicalRow, CANONICAL_COLUMNS};

/// Render rows as a bare `<table>` fragment.
pub fn render_table(rows: &[CanonicalRow]) -> String {
    if rows.is_empty() {
        return "<p class=\"empty\">No merged rows to preview.</p>".to_string();
    }

    let mut html = String::from("<table class=\"preview\">\n<thead>\n<tr>");
    for column in CANONICAL_COLUMNS {
        html.push_str("<th>");
        push_escaped(&mut html, column);
        html.push_str("</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in rows {
        html.push_str("<tr>");
        for value in row.values() {
            html.push_str("<td>");
            push_escaped(&mut html, value);
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

/// Render rows as a standalone HTML page around [`render_table`].
pub fn render_page(rows: &[CanonicalRow]) -> String {
    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Merged rows</title>\n<style>\n\
         table.preview {{ border-collapse: collapse; width: 100%; }}\n\
         table.preview th, table.preview td {{ border: 1px solid #000; padding: 8px; }}\n\
         </style>\n</head>\n<body>\n{}</body>\n</html>\n",
        render_table(rows)
    )
}

fn push_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
