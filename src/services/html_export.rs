use std::io::{self, Write};

use thiserror::Error;

use crate::services::forecast_table::ForecastTable;

#[derive(Error, Debug)]
pub enum HtmlExportError {
    #[error("failed to write html table: {0}")]
    Write(#[from] io::Error),
}

pub fn write_html_table<W: Write>(writer: &mut W, table: &ForecastTable) -> Result<(), HtmlExportError> {
    writer.write_all(render_html_table(table).as_bytes())?;
    Ok(())
}

/// Renders one `<table>` with a header row and one row per table row.
pub fn render_html_table(table: &ForecastTable) -> String {
    let mut html = String::from("<table>\n  <thead>\n    <tr>");
    for header in &table.headers {
        html.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    html.push_str("</tr>\n  </thead>\n  <tbody>\n");
    for cells in &table.rows {
        html.push_str("    <tr>");
        for cell in cells {
            html.push_str(&format!("<td>{}</td>", escape_html(&cell.display())));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("  </tbody>\n</table>\n");
    html
}

fn escape_html(text: &str) -> String {
    v_htmlescape::escape(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::forecast_table::Cell;

    fn table() -> ForecastTable {
        ForecastTable {
            headers: vec!["Scenario".to_string(), "Revenue".to_string()],
            rows: vec![
                vec![
                    Cell::Text("Base".to_string()),
                    Cell::Number {
                        value: 10_000_000.0,
                        decimals: 0,
                    },
                ],
                vec![
                    Cell::Text("<R&D>".to_string()),
                    Cell::Number {
                        value: 9_500_000.0,
                        decimals: 0,
                    },
                ],
            ],
        }
    }

    #[test]
    fn render_html_table_has_header_and_one_row_per_data_row() {
        let html = render_html_table(&table());

        assert_eq!(html.matches("<table>").count(), 1);
        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains("<tr><th>Scenario</th><th>Revenue</th></tr>"));
        assert!(html.contains("<tr><td>Base</td><td>10000000</td></tr>"));
        assert!(!html.contains("style="));
    }

    #[test]
    fn render_html_table_escapes_text() {
        let html = render_html_table(&table());
        assert!(html.contains("<td>&lt;R&amp;D&gt;</td>"));
    }

    #[test]
    fn render_html_table_escapes_quotes_in_headers() {
        let table = ForecastTable {
            headers: vec!["\"Net\" revenue".to_string()],
            rows: Vec::new(),
        };

        let html = render_html_table(&table);

        assert!(html.contains("<th>&quot;Net&quot; revenue</th>"));
        assert!(!html.contains("\"Net\""));
    }

    #[test]
    fn write_html_table_writes_rendered_table() {
        let mut buffer = Vec::new();
        write_html_table(&mut buffer, &table()).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), render_html_table(&table()));
    }
}
