use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Result, ScrapeError};
use crate::page::ScrapedPage;

/// Write pages as a pretty-printed JSON array, creating parent directories.
/// Non-ASCII text is written as-is.
pub fn write_pages(path: &Path, pages: &[ScrapedPage]) -> Result<()> {
    let io_err = |source| ScrapeError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut bytes = serde_json::to_vec_pretty(pages)?;
    bytes.push(b'\n');
    fs::write(path, &bytes).map_err(io_err)?;

    info!("Wrote {} pages to {}", pages.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn page(url: &str, text: &str, code: &[&str]) -> ScrapedPage {
        ScrapedPage {
            url: url.to_string(),
            text: text.to_string(),
            code_blocks: code.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn creates_parent_dirs_and_keeps_unicode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/docs.json");
        let pages = vec![
            page(
                "https://angular.io/guide/i18n",
                "Traduction en français — 日本語",
                &["const s = 'ü';\nconsole.log(s);"],
            ),
            page("https://angular.io/tutorial", "", &[]),
        ];

        write_pages(&path, &pages).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Traduction en français — 日本語"));
        assert!(!raw.contains("\\u"));
        assert!(raw.contains("\n  {\n    \"url\""));

        let parsed: Vec<ScrapedPage> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, pages);
    }

    #[test]
    fn keys_in_record_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        write_pages(&path, &[page("u", "t", &["c"])]).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let obj = value[0].as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["code_blocks"], serde_json::json!(["c"]));
    }

    #[test]
    fn empty_list_is_an_empty_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        write_pages(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "[]");
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let err = write_pages(&blocker.join("out.json"), &[]).unwrap_err();
        assert!(matches!(err, ScrapeError::Io { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn disk_full_is_io_error_with_path() {
        let big = "x".repeat(64 * 1024);
        let pages = vec![page("https://angular.io/guide/big", &big, &[])];
        let path = Path::new("/dev/full");

        match write_pages(path, &pages).unwrap_err() {
            ScrapeError::Io { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
