//! Output format constants and file naming

use chrono::NaiveDateTime;

/// MIME type of a WordprocessingML package
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// File extension of a WordprocessingML package
pub const DOCX_EXTENSION: &str = "docx";

/// `<template name>_<timestamp>.docx`, with a filesystem-safe ISO-like
/// timestamp (colons replaced by dashes)
pub fn suggested_filename(template_name: &str, at: NaiveDateTime) -> String {
    format!(
        "{}_{}.{}",
        template_name,
        at.format("%Y-%m-%dT%H-%M-%S"),
        DOCX_EXTENSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_suggested_filename() {
        let at = NaiveDate::from_ymd_opt(2025, 4, 18)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap();
        assert_eq!(
            suggested_filename("监理通知单", at),
            "监理通知单_2025-04-18T09-05-07.docx"
        );
    }

    #[test]
    fn test_mime_type_is_wordprocessing() {
        assert!(DOCX_MIME_TYPE.ends_with("wordprocessingml.document"));
    }
}
