//! CSV rendering for the export endpoints.
//!
//! The export format is fixed: every field double-quoted, embedded double
//! quotes escaped with a backslash, rows terminated with CRLF, header row
//! first. Consumers of the old exports depend on the backslash escaping,
//! so this deliberately does not follow RFC 4180 quote doubling.

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Quote a single field.
pub fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

/// Render one row with the CRLF terminator.
pub fn csv_row<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let quoted: Vec<String> = fields.into_iter().map(|f| csv_field(f.as_ref())).collect();
    format!("{}\r\n", quoted.join(","))
}

/// Render a full document: header row followed by data rows.
pub fn csv_document<S: AsRef<str>>(header: &[S], rows: &[Vec<String>]) -> String {
    let mut out = csv_row(header.iter().map(|h| h.as_ref()));
    for row in rows {
        out.push_str(&csv_row(row.iter().map(String::as_str)));
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_every_field() {
        assert_eq!(csv_field("plain"), "\"plain\"");
        assert_eq!(csv_field(""), "\"\"");
    }

    #[test]
    fn escapes_embedded_quotes_with_backslash() {
        assert_eq!(csv_field("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn rows_join_with_commas_and_end_with_crlf() {
        assert_eq!(csv_row(["a", "b", "c"]), "\"a\",\"b\",\"c\"\r\n");
    }

    #[test]
    fn commas_inside_fields_stay_quoted() {
        assert_eq!(csv_row(["one, two"]), "\"one, two\"\r\n");
    }

    #[test]
    fn document_puts_header_first() {
        let doc = csv_document(
            &["song", "artist"],
            &[
                vec!["Dancing Queen".to_string(), "Abba".to_string()],
                vec!["Yesterday".to_string(), "The Beatles".to_string()],
            ],
        );
        assert_eq!(
            doc,
            "\"song\",\"artist\"\r\n\"Dancing Queen\",\"Abba\"\r\n\"Yesterday\",\"The Beatles\"\r\n"
        );
    }

    #[test]
    fn header_only_document_is_one_row() {
        let doc = csv_document(&["id"], &[]);
        assert_eq!(doc, "\"id\"\r\n");
    }
}
