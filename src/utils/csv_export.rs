//! CSV export of bulk-import results.

use csv::{QuoteStyle, WriterBuilder};

/// One successfully created link, as exported.
#[derive(Debug, Clone)]
pub struct CsvRow {
    pub caption: String,
    pub original_url: String,
    pub alias: String,
    pub short_url: String,
}

/// Serializes rows as CSV with the header
/// `Caption,Original URL,Alias,Shortened URL`, every field double-quoted.
pub fn export_links_csv(rows: &[CsvRow]) -> Result<String, csv::Error> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(["Caption", "Original URL", "Alias", "Shortened URL"])?;

    for row in rows {
        writer.write_record([
            row.caption.as_str(),
            row.original_url.as_str(),
            row.alias.as_str(),
            row.short_url.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())?;

    // csv output over strings is always valid UTF-8
    Ok(String::from_utf8(bytes).expect("csv output is UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> CsvRow {
        CsvRow {
            caption: "My Post".to_string(),
            original_url: "https://example.com/a".to_string(),
            alias: "my-post".to_string(),
            short_url: "https://atomzr.link/my-post".to_string(),
        }
    }

    #[test]
    fn test_header_row() {
        let csv = export_links_csv(&[]).unwrap();
        assert_eq!(
            csv.lines().next().unwrap(),
            "\"Caption\",\"Original URL\",\"Alias\",\"Shortened URL\""
        );
    }

    #[test]
    fn test_fields_are_quoted() {
        let csv = export_links_csv(&[sample_row()]).unwrap();
        let data_line = csv.lines().nth(1).unwrap();

        assert_eq!(
            data_line,
            "\"My Post\",\"https://example.com/a\",\"my-post\",\"https://atomzr.link/my-post\""
        );
    }

    #[test]
    fn test_embedded_quote_is_escaped() {
        let mut row = sample_row();
        row.caption = "The \"Best\" Post".to_string();

        let csv = export_links_csv(&[row]).unwrap();
        assert!(csv.contains("\"The \"\"Best\"\" Post\""));
    }

    #[test]
    fn test_one_line_per_row() {
        let csv = export_links_csv(&[sample_row(), sample_row()]).unwrap();
        assert_eq!(csv.lines().count(), 3);
    }
}
