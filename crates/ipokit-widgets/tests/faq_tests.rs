//! End-to-end FAQ filtering over the sample data set.

use ipokit_test_utils::{
    assert_some, assertions::assert_buffer_not_contains, assert_buffer_contains, epoch,
    fixtures::sample_faq_json, render_to_string, sample_faqs,
};
use ipokit_tui_core::Theme;
use ipokit_widgets::{categories, filter_faqs, FaqAccordion, FaqItem};

#[test]
fn test_sample_has_eight_items_in_four_categories() {
    let faqs = sample_faqs();
    assert_eq!(faqs.len(), 8);
    assert_eq!(
        categories(&faqs),
        vec!["上場準備", "資本政策", "費用", "内部管理体制"]
    );
}

#[test]
fn test_valuation_query_matches_question_or_answer() {
    let faqs = sample_faqs();
    let ids: Vec<&str> = filter_faqs(&faqs, "バリュエーション", None)
        .iter()
        .map(|item| item.id.as_str())
        .collect();
    assert_eq!(ids, vec!["faq-3", "faq-6"]);
}

#[test]
fn test_query_is_case_insensitive() {
    let faqs = sample_faqs();
    let upper: Vec<_> = filter_faqs(&faqs, "IPO", None);
    let lower: Vec<_> = filter_faqs(&faqs, "ipo", None);
    assert_eq!(upper, lower);
    assert_eq!(upper.len(), 1);
    assert_eq!(filter_faqs(&faqs, "itgc", None).len(), 1);
}

#[test]
fn test_query_and_category_combine() {
    let faqs = sample_faqs();
    let found = filter_faqs(&faqs, "バリュエーション", Some("費用"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "faq-6");
}

#[test]
fn test_accordion_renders_matches_and_no_results() {
    let theme = Theme::default();
    let mut faq = FaqAccordion::new(sample_faqs());
    faq.set_query("バリュエーション");

    let text = render_to_string(80, 12, |frame| {
        let area = frame.area();
        faq.render(frame, area, &theme)
    });
    assert_buffer_contains(&text, "バリュエーションはどのように算定されますか？");
    assert_buffer_contains(&text, "成功報酬型の契約は可能ですか？");
    assert_buffer_not_contains(&text, "IPOの準備期間");

    faq.set_query("存在しないキーワード");
    assert!(faq.is_empty_result());
    let text = render_to_string(80, 12, |frame| {
        let area = frame.area();
        faq.render(frame, area, &theme)
    });
    assert_buffer_contains(&text, "No matching questions found");
}

#[test]
fn test_expanded_answer_is_rendered() {
    let theme = Theme::default();
    let mut faq = FaqAccordion::new(sample_faqs());
    faq.toggle("faq-1");

    let text = render_to_string(100, 14, |frame| {
        let area = frame.area();
        faq.render(frame, area, &theme)
    });
    assert_buffer_contains(&text, "▾ IPOの準備期間はどのくらいですか？");
    assert_buffer_contains(&text, "3年程度が目安です");
    assert_buffer_contains(&text, "▸ 主幹事証券会社");
}

#[test]
fn test_typed_search_applies_after_pause() {
    let mut faq = FaqAccordion::new(sample_faqs());
    let start = epoch();
    for (i, c) in "費用".chars().enumerate() {
        faq.type_char(c, start + chrono::Duration::milliseconds(i as i64 * 50));
    }
    assert_eq!(faq.visible().len(), 8);

    assert!(faq.tick(start + chrono::Duration::seconds(1)));
    let ids: Vec<&str> = faq.visible().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["faq-5"]);
}

#[test]
fn test_source_list_is_untouched_by_filtering() {
    let mut faq = FaqAccordion::new(sample_faqs());
    faq.set_query("バリュエーション");
    faq.cycle_category();
    assert_eq!(faq.items(), sample_faqs().as_slice());
}

#[test]
fn test_faqs_loaded_from_json_filter_the_same() {
    let faqs: Vec<FaqItem> = serde_json::from_str(&sample_faq_json()).unwrap();
    assert_eq!(faqs, sample_faqs());

    let mut faq = FaqAccordion::new(faqs);
    faq.set_query("バリュエーション");
    let first = assert_some!(faq.selected_item(), "a match should be selected");
    assert_eq!(first.id, "faq-3");

    assert_eq!(faq.toggle_selected(), Some(true));
    assert!(faq.is_expanded("faq-3"));
}
