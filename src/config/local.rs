use crate::core::Storage;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// 絕對路徑會直接取代 base_path
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    async fn read_lines(&self, path: &str) -> std::io::Result<Vec<String>> {
        let full_path = self.resolve(path);
        // 檔案於此區塊結束時關閉，包含讀取失敗的情況
        let reader = BufReader::new(File::open(&full_path)?);
        reader.lines().collect()
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> std::io::Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_lines_relative_to_base() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("cloud.log"), "one\r\ntwo\nthree").unwrap();

        let storage = LocalStorage::new(dir.path());
        let lines = storage.read_lines("cloud.log").await.unwrap();

        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_read_lines_missing_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        let err = storage.read_lines("missing.log").await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_write_file_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage
            .write_file("reports/2024/out.csv", b"a,b,c")
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("reports/2024/out.csv")).unwrap();
        assert_eq!(written, b"a,b,c");
    }

    #[tokio::test]
    async fn test_absolute_path_ignores_base() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("abs.log");
        std::fs::write(&file, "x").unwrap();

        let storage = LocalStorage::new("/nonexistent-base");
        let lines = storage.read_lines(file.to_str().unwrap()).await.unwrap();

        assert_eq!(lines, vec!["x"]);
    }
}
