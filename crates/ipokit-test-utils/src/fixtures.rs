//! Test fixtures for reproducible test environments.
//!
//! Provides a fixed reference instant, sample FAQ data and temporary project
//! directories for configuration tests.

use chrono::{DateTime, TimeZone, Utc};
use ipokit_widgets::FaqItem;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fixed reference instant used by time-driven tests.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Eight FAQ entries across four categories.
///
/// Entries `faq-3` and `faq-6` mention "バリュエーション"; `faq-6` only in its answer.
pub fn sample_faqs() -> Vec<FaqItem> {
    vec![
        FaqItem::new(
            "faq-1",
            "上場準備",
            "IPOの準備期間はどのくらいですか？",
            "一般的に直前々期から数えて3年程度が目安です。",
        ),
        FaqItem::new(
            "faq-2",
            "上場準備",
            "主幹事証券会社はいつ選定すべきですか？",
            "直前々期の早い段階での選定をおすすめしています。",
        ),
        FaqItem::new(
            "faq-3",
            "資本政策",
            "バリュエーションはどのように算定されますか？",
            "類似会社比較法やDCF法を組み合わせて算定します。",
        ),
        FaqItem::new(
            "faq-4",
            "資本政策",
            "ストックオプションの設計も支援いただけますか？",
            "はい、発行時期と行使条件を含めてご提案します。",
        ),
        FaqItem::new(
            "faq-5",
            "費用",
            "コンサルティング費用の目安を教えてください。",
            "支援範囲により異なります。まずは無料相談をご利用ください。",
        ),
        FaqItem::new(
            "faq-6",
            "費用",
            "成功報酬型の契約は可能ですか？",
            "上場時のバリュエーションに連動した報酬体系もご用意しています。",
        ),
        FaqItem::new(
            "faq-7",
            "内部管理体制",
            "内部統制の整備はどこから始めればよいですか？",
            "まずは業務フローの可視化と職務分掌の整理から着手します。",
        ),
        FaqItem::new(
            "faq-8",
            "内部管理体制",
            "IT全般統制(ITGC)への対応は必要ですか？",
            "J-SOXの評価範囲に応じて対応が必要になります。",
        ),
    ]
}

/// [`sample_faqs`] serialized as a JSON array.
pub fn sample_faq_json() -> String {
    serde_json::to_string_pretty(&sample_faqs()).unwrap_or_default()
}

/// A temporary project directory with configurable files.
///
/// The directory is removed when the built project is dropped.
///
/// # Example
///
/// ```rust
/// use ipokit_test_utils::fixtures::TestProject;
///
/// let project = TestProject::new()
///     .with_config(r#"{ "theme": "light" }"#)
///     .build();
///
/// assert!(project.path().join("ipokit.json").exists());
/// ```
pub struct TestProject {
    temp_dir: TempDir,
    files: Vec<(PathBuf, String)>,
}

impl TestProject {
    /// Create a new test project builder.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            files: Vec::new(),
        }
    }

    /// Add a file. Parent directories are created automatically.
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        self.files
            .push((path.as_ref().to_path_buf(), contents.into()));
        self
    }

    /// Add an `ipokit.json` configuration file.
    pub fn with_config(self, config: &str) -> Self {
        self.with_file("ipokit.json", config)
    }

    /// Add an `ipokit.jsonc` configuration file.
    pub fn with_jsonc_config(self, config: &str) -> Self {
        self.with_file("ipokit.jsonc", config)
    }

    /// Add `faq.json` holding [`sample_faqs`].
    pub fn with_sample_faqs(self) -> Self {
        self.with_file("faq.json", sample_faq_json())
    }

    /// Write every file to disk.
    pub fn build(self) -> BuiltTestProject {
        let root = self.temp_dir.path();
        for (path, contents) in &self.files {
            let full_path = root.join(path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent).unwrap_or_else(|e| {
                    panic!(
                        "Failed to create parent directory for {}: {}",
                        full_path.display(),
                        e
                    )
                });
            }
            fs::write(&full_path, contents)
                .unwrap_or_else(|e| panic!("Failed to write file {}: {}", full_path.display(), e));
        }

        BuiltTestProject {
            temp_dir: self.temp_dir,
        }
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// A test project with its files on disk.
pub struct BuiltTestProject {
    temp_dir: TempDir,
}

impl BuiltTestProject {
    /// Root directory of the project.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a file inside the project.
    pub fn file(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.temp_dir.path().join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipokit_widgets::categories;

    #[test]
    fn test_sample_faqs_shape() {
        let faqs = sample_faqs();
        assert_eq!(faqs.len(), 8);
        assert_eq!(categories(&faqs).len(), 4);
    }

    #[test]
    fn test_sample_faq_json_round_trips() {
        let parsed: Vec<FaqItem> = serde_json::from_str(&sample_faq_json()).unwrap();
        assert_eq!(parsed, sample_faqs());
    }

    #[test]
    fn test_project_writes_files() {
        let project = TestProject::new()
            .with_jsonc_config("// comment\n{}")
            .with_file("nested/dir/data.txt", "x")
            .build();
        assert!(project.file("ipokit.jsonc").exists());
        assert_eq!(fs::read_to_string(project.file("nested/dir/data.txt")).unwrap(), "x");
    }
}
