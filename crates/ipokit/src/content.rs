//! Built-in showcase content: FAQ entries and generated case studies.

use anyhow::Context;
use ipokit_widgets::FaqItem;
use serde::Serialize;
use std::path::Path;

/// Built-in FAQ shown when no FAQ file is configured.
pub fn builtin_faqs() -> Vec<FaqItem> {
    [
        (
            "ipo-timeline",
            "上場準備",
            "IPOまでにどのくらいの期間が必要ですか？",
            "一般的には直前々期から3年程度の準備期間を想定しています。",
        ),
        (
            "lead-underwriter",
            "上場準備",
            "主幹事証券会社はいつ決めるべきですか？",
            "直前々期の早い段階で選定し、引受審査に向けた準備を始めます。",
        ),
        (
            "valuation",
            "資本政策",
            "バリュエーションはどのように決まりますか？",
            "類似会社比較法やDCF法を用い、市場環境を踏まえて算定します。",
        ),
        (
            "stock-options",
            "資本政策",
            "ストックオプションの設計も相談できますか？",
            "はい。付与対象・行使条件・発行時期を資本政策全体の中で設計します。",
        ),
        (
            "fees",
            "費用",
            "コンサルティング費用はどのくらいですか？",
            "支援範囲によって異なります。初回のご相談は無料です。",
        ),
        (
            "success-fee",
            "費用",
            "成功報酬型の契約はありますか？",
            "上場時のバリュエーションに連動するプランもご用意しています。",
        ),
        (
            "internal-control",
            "内部管理体制",
            "内部統制の整備はどこから始めればよいですか？",
            "業務フローの可視化と職務分掌の整理から着手するのが一般的です。",
        ),
        (
            "itgc",
            "内部管理体制",
            "IT全般統制(ITGC)への対応は必要ですか？",
            "J-SOXの評価範囲に含まれるシステムについて対応が必要です。",
        ),
    ]
    .into_iter()
    .map(|(id, category, question, answer)| FaqItem::new(id, category, question, answer))
    .collect()
}

/// Read FAQ entries from a JSON array file.
pub async fn load_faqs(path: &Path) -> anyhow::Result<Vec<FaqItem>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read FAQ file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse FAQ file {}", path.display()))
}

/// FAQ entries from `path`, or the built-in set.
pub async fn faqs_from(path: Option<&Path>) -> anyhow::Result<Vec<FaqItem>> {
    match path {
        Some(path) => load_faqs(path).await,
        None => Ok(builtin_faqs()),
    }
}

/// A client success story in the case-study list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStudy {
    pub index: usize,
    pub company: String,
    pub industry: &'static str,
    pub market: &'static str,
    /// Funds raised at listing, in 億円.
    pub raised: u32,
    /// Client satisfaction out of 5.
    pub rating: f32,
}

const INDUSTRIES: &[&str] = &["SaaS", "FinTech", "HealthTech", "製造", "小売", "物流", "バイオ"];
const MARKETS: &[&str] = &["グロース", "スタンダード", "プライム"];
const PREFIXES: &[&str] = &["Aster", "Nova", "Kizuna", "Hikari", "Sora", "Mirai", "Tsubasa"];

/// Deterministic case study for position `index`.
pub fn case_study(index: usize) -> CaseStudy {
    CaseStudy {
        index,
        company: format!("{} Holdings {:04}", PREFIXES[index % PREFIXES.len()], index + 1),
        industry: INDUSTRIES[(index / 3) % INDUSTRIES.len()],
        market: MARKETS[index % MARKETS.len()],
        raised: 5 + ((index * 37) % 120) as u32,
        rating: 3.0 + ((index * 7) % 5) as f32 * 0.5,
    }
}

/// Case studies `start..start + count`.
pub fn case_studies(start: usize, count: usize) -> Vec<CaseStudy> {
    (start..start + count).map(case_study).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipokit_widgets::{categories, filter_faqs};

    #[test]
    fn test_builtin_faqs() {
        let faqs = builtin_faqs();
        assert_eq!(faqs.len(), 8);
        assert_eq!(categories(&faqs).len(), 4);
        assert_eq!(filter_faqs(&faqs, "バリュエーション", None).len(), 2);
    }

    #[test]
    fn test_case_studies_are_deterministic() {
        assert_eq!(case_study(42), case_study(42));
        let page = case_studies(10, 5);
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].index, 10);
        assert!(page.iter().all(|c| (3.0..=5.0).contains(&c.rating)));
    }

    #[tokio::test]
    async fn test_load_faqs_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faq.json");
        std::fs::write(&path, serde_json::to_string(&builtin_faqs()).unwrap()).unwrap();
        assert_eq!(load_faqs(&path).await.unwrap(), builtin_faqs());
    }

    #[tokio::test]
    async fn test_load_faqs_reports_path() {
        let err = load_faqs(Path::new("/nonexistent/faq.json")).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/faq.json"));
    }
}
