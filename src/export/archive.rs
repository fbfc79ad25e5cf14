// src/export/archive.rs
// =============================================================================
// Packs exported files into an in-memory ZIP archive.
//
// Entries are written in the order given, so the archive's listing matches
// the repository listing order of the selected files.
// =============================================================================

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::batch::ExportFile;

pub fn pack(files: &[ExportFile], compression_level: i64) -> zip::result::ZipResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(compression_level));

    for file in files {
        writer.start_file(file.path.as_str(), options)?;
        writer.write_all(file.content.as_bytes())?;
    }

    Ok(writer.finish()?.into_inner())
}

// "12.3 KB"-style sizes for the summary line
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::batch::FileContent;
    use std::io::Read;

    fn file(path: &str, content: FileContent) -> ExportFile {
        ExportFile {
            path: path.to_string(),
            content,
        }
    }

    #[test]
    fn test_pack_preserves_order_and_content() {
        let files = vec![
            file("index.html", FileContent::Text("<h1>hi</h1>".to_string())),
            file("img/x.png", FileContent::Binary(vec![0x89, 0x50, 0x4e, 0x47])),
            file("css/a.css", FileContent::Text("body {}".to_string())),
        ];

        let bytes = pack(&files, 6).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["index.html", "img/x.png", "css/a.css"]);

        let mut png = Vec::new();
        archive
            .by_name("img/x.png")
            .unwrap()
            .read_to_end(&mut png)
            .unwrap();
        assert_eq!(png, vec![0x89, 0x50, 0x4e, 0x47]);

        let mut html = String::new();
        archive
            .by_name("index.html")
            .unwrap()
            .read_to_string(&mut html)
            .unwrap();
        assert_eq!(html, "<h1>hi</h1>");
    }

    #[test]
    fn test_pack_empty_is_valid_zip() {
        let bytes = pack(&[], 6).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }
}
