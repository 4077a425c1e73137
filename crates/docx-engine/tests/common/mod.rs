//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::io::{Cursor, Read};

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use docx_engine::{DocumentData, Issue};
use regex::Regex;

/// 2025-04-18 10:30:00 +08:00
pub fn fixed_now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(8 * 3600)
        .unwrap()
        .with_ymd_and_hms(2025, 4, 18, 10, 30, 0)
        .unwrap()
}

pub fn notice_data() -> DocumentData {
    DocumentData {
        project_name: "东方明珠二期工程".to_string(),
        recipient_name: Some("中建三局".to_string()),
        subject: Some("安全隐患整改".to_string()),
        notice_content: Some("请立即整改".to_string()),
        supervisor_name: Some("张工".to_string()),
        notice_date: NaiveDate::from_ymd_opt(2025, 4, 18),
        issues: vec![Issue::new("钢筋间距超标")],
        ..DocumentData::default()
    }
}

pub fn patrol_data() -> DocumentData {
    DocumentData {
        project_name: "东方明珠二期工程".to_string(),
        inspection_location: Some("5号楼主体结构".to_string()),
        inspection_start_date: NaiveDate::from_ymd_opt(2025, 4, 14),
        inspection_end_date: NaiveDate::from_ymd_opt(2025, 4, 18),
        inspector_name: Some("李工".to_string()),
        findings: Some("督促施工单位限期整改".to_string()),
        issues: vec![
            Issue::new("临边防护缺失"),
            Issue::new("模板支撑立杆间距过大"),
        ],
        ..DocumentData::default()
    }
}

/// Raw content of one part of a package
pub fn read_part(bytes: &[u8], path: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(path).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

/// Text of every paragraph in `word/document.xml`, runs joined
pub fn paragraph_texts(bytes: &[u8]) -> Vec<String> {
    let xml = read_part(bytes, "word/document.xml");
    let text = Regex::new(r#"<w:t xml:space="preserve">(.*?)</w:t>"#).unwrap();
    xml.split("</w:p>")
        .map(|paragraph| {
            text.captures_iter(paragraph)
                .map(|caps| caps[1].to_string())
                .collect::<String>()
        })
        .filter(|line| !line.is_empty())
        .collect()
}
