//! FAQ accordion with text and category filtering.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::debug;

use ipokit_tui_core::Theme;
use ipokit_util::Debouncer;

/// Quiet period before typed search input is applied.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// A question and its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub id: String,
    pub category: String,
    pub question: String,
    pub answer: String,
}

impl FaqItem {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Case-insensitive substring match on question or answer.
/// A blank query matches everything.
pub fn matches_query(item: &FaqItem, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    item.question.to_lowercase().contains(&needle) || item.answer.to_lowercase().contains(&needle)
}

/// Items matching `query` and, when given, `category`. The source is not touched.
pub fn filter_faqs<'a>(items: &'a [FaqItem], query: &str, category: Option<&str>) -> Vec<&'a FaqItem> {
    items
        .iter()
        .filter(|item| category.map_or(true, |c| item.category == c))
        .filter(|item| matches_query(item, query))
        .collect()
}

/// Distinct categories in first-seen order.
pub fn categories(items: &[FaqItem]) -> Vec<&str> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(&item.category.as_str()) {
            seen.push(item.category.as_str());
        }
    }
    seen
}

/// Interactive FAQ list.
#[derive(Debug, Clone)]
pub struct FaqAccordion {
    items: Vec<FaqItem>,
    /// Applied query.
    query: String,
    /// What the user has typed so far.
    input: String,
    debouncer: Debouncer,
    category: Option<String>,
    expanded: BTreeSet<String>,
    single_open: bool,
    selected: usize,
}

impl FaqAccordion {
    pub fn new(items: Vec<FaqItem>) -> Self {
        Self {
            items,
            query: String::new(),
            input: String::new(),
            debouncer: Debouncer::new(DEFAULT_SEARCH_DEBOUNCE),
            category: None,
            expanded: BTreeSet::new(),
            single_open: false,
            selected: 0,
        }
    }

    /// Allow at most one expanded entry at a time.
    pub fn with_single_open(mut self, single_open: bool) -> Self {
        self.single_open = single_open;
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debouncer = Debouncer::new(delay);
        self
    }

    pub fn items(&self) -> &[FaqItem] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Apply a query immediately, bypassing the debounce.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.input = query.into();
        self.debouncer.cancel();
        self.apply_input();
    }

    /// Append typed input; applied once typing pauses.
    pub fn type_char(&mut self, c: char, now: DateTime<Utc>) {
        self.input.push(c);
        self.debouncer.call(now);
    }

    pub fn backspace(&mut self, now: DateTime<Utc>) {
        if self.input.pop().is_some() {
            self.debouncer.call(now);
        }
    }

    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    /// Apply pending input if the quiet period has passed. Returns `true` if the
    /// filter changed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        self.debouncer.ready(now) && self.apply_input()
    }

    /// Whether typed input is waiting to be applied.
    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn apply_input(&mut self) -> bool {
        if self.query == self.input {
            return false;
        }
        self.query = self.input.clone();
        self.selected = 0;
        debug!(query = %self.query, matches = self.visible().len(), "FAQ filter applied");
        true
    }

    /// Restrict to one category, or `None` for all.
    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category;
        self.selected = 0;
    }

    /// Step through all, then each category in order, then back to all.
    pub fn cycle_category(&mut self) {
        let next = {
            let all = categories(&self.items);
            match self.category.as_deref() {
                None => all.first().map(|c| c.to_string()),
                Some(current) => all
                    .iter()
                    .position(|c| *c == current)
                    .and_then(|i| all.get(i + 1))
                    .map(|c| c.to_string()),
            }
        };
        self.set_category(next);
    }

    pub fn categories(&self) -> Vec<&str> {
        categories(&self.items)
    }

    /// Items passing the current filters.
    pub fn visible(&self) -> Vec<&FaqItem> {
        filter_faqs(&self.items, &self.query, self.category.as_deref())
    }

    /// Whether the filters exclude every item.
    pub fn is_empty_result(&self) -> bool {
        self.visible().is_empty()
    }

    /// Toggle an entry. Returns whether it is now expanded.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            return false;
        }
        if self.single_open {
            self.expanded.clear();
        }
        self.expanded.insert(id.to_string());
        true
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_item(&self) -> Option<&FaqItem> {
        self.visible().get(self.selected).copied()
    }

    /// Toggle the selected entry.
    pub fn toggle_selected(&mut self) -> Option<bool> {
        let id = self.selected_item()?.id.clone();
        Some(self.toggle(&id))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if area.height < 3 {
            return;
        }

        let filter = self.category.as_deref().unwrap_or("All");
        let mut search = vec![
            Span::styled(" / ", theme.accent_style().add_modifier(Modifier::BOLD)),
            Span::styled(self.input.as_str(), theme.text_style()),
            Span::styled("▏", theme.muted_style()),
        ];
        search.push(Span::styled(format!("  [{filter}]"), theme.secondary_style()));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(Line::from(search));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let visible = self.visible();
        if visible.is_empty() {
            let empty = vec![
                Line::from(Span::styled("No matching questions found", theme.warning_style())),
                Line::from(Span::styled(
                    "Try a different keyword or category",
                    theme.muted_style(),
                )),
            ];
            frame.render_widget(Paragraph::new(empty), inner);
            return;
        }

        let mut lines = Vec::new();
        for (i, item) in visible.iter().enumerate() {
            let expanded = self.is_expanded(&item.id);
            let icon = if expanded { "▾ " } else { "▸ " };
            let question_style = if i == self.selected {
                theme.highlight_style()
            } else {
                theme.text_style()
            };
            lines.push(Line::from(vec![
                Span::styled(icon, theme.primary_style()),
                Span::styled(item.question.as_str(), question_style),
            ]));
            if expanded {
                lines.push(Line::from(Span::styled(
                    format!("  {}", item.answer),
                    theme.muted_style(),
                )));
            }
        }

        // Keep the selection on screen
        let selected_line = visible
            .iter()
            .take(self.selected)
            .map(|item| if self.is_expanded(&item.id) { 2 } else { 1 })
            .sum::<usize>();
        let scroll = selected_line.saturating_sub(inner.height.saturating_sub(1) as usize);

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((scroll.min(u16::MAX as usize) as u16, 0)),
            inner,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn items() -> Vec<FaqItem> {
        vec![
            FaqItem::new("1", "上場準備", "What is an IPO?", "Listing shares publicly."),
            FaqItem::new("2", "費用", "How much does it cost?", "It depends on the VALUATION."),
            FaqItem::new("3", "上場準備", "How long does it take?", "Usually three years."),
            FaqItem::new("4", "評価", "How is valuation done?", "Several methods are used."),
        ]
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap()
    }

    fn ids(items: &[&FaqItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_matches_all() {
        let source = items();
        assert_eq!(filter_faqs(&source, "", None).len(), 4);
        assert_eq!(filter_faqs(&source, "   ", None).len(), 4);
    }

    #[test]
    fn test_case_insensitive_question_or_answer() {
        let source = items();
        assert_eq!(ids(&filter_faqs(&source, "Valuation", None)), vec!["2", "4"]);
        assert_eq!(ids(&filter_faqs(&source, "ipo", None)), vec!["1"]);
    }

    #[test]
    fn test_category_filter() {
        let source = items();
        assert_eq!(ids(&filter_faqs(&source, "", Some("上場準備"))), vec!["1", "3"]);
        assert_eq!(ids(&filter_faqs(&source, "long", Some("上場準備"))), vec!["3"]);
        assert!(filter_faqs(&source, "", Some("missing")).is_empty());
    }

    #[test]
    fn test_filter_does_not_mutate_source() {
        let source = items();
        let before = source.clone();
        let _ = filter_faqs(&source, "valuation", Some("費用"));
        assert_eq!(source, before);
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(categories(&items()), vec!["上場準備", "費用", "評価"]);
    }

    #[test]
    fn test_typed_query_is_debounced() {
        let mut faq = FaqAccordion::new(items());
        faq.type_char('i', t0());
        faq.type_char('p', t0() + chrono::Duration::milliseconds(100));
        faq.type_char('o', t0() + chrono::Duration::milliseconds(200));

        assert!(!faq.tick(t0() + chrono::Duration::milliseconds(400)));
        assert_eq!(faq.visible().len(), 4);

        assert!(faq.tick(t0() + chrono::Duration::milliseconds(500)));
        assert_eq!(faq.query(), "ipo");
        assert_eq!(faq.visible().len(), 1);
        assert!(!faq.is_search_pending());
    }

    #[test]
    fn test_set_query_applies_immediately() {
        let mut faq = FaqAccordion::new(items());
        faq.set_query("nothing like this");
        assert!(faq.is_empty_result());
        faq.clear_query();
        assert!(!faq.is_empty_result());
    }

    #[test]
    fn test_toggle_multi_open() {
        let mut faq = FaqAccordion::new(items());
        assert!(faq.toggle("1"));
        assert!(faq.toggle("2"));
        assert!(faq.is_expanded("1") && faq.is_expanded("2"));
        assert!(!faq.toggle("1"));
        assert!(!faq.is_expanded("1"));
    }

    #[test]
    fn test_toggle_single_open() {
        let mut faq = FaqAccordion::new(items()).with_single_open(true);
        faq.toggle("1");
        faq.toggle("2");
        assert!(!faq.is_expanded("1"));
        assert!(faq.is_expanded("2"));
    }

    #[test]
    fn test_cycle_category() {
        let mut faq = FaqAccordion::new(items());
        faq.cycle_category();
        assert_eq!(faq.category(), Some("上場準備"));
        faq.cycle_category();
        assert_eq!(faq.category(), Some("費用"));
        faq.cycle_category();
        faq.cycle_category();
        assert_eq!(faq.category(), None);
    }

    #[test]
    fn test_selection_follows_filter() {
        let mut faq = FaqAccordion::new(items());
        faq.select_next();
        faq.select_next();
        assert_eq!(faq.selected_item().unwrap().id, "3");

        faq.set_query("valuation");
        assert_eq!(faq.selected_item().unwrap().id, "2");
        faq.select_next();
        faq.select_next();
        assert_eq!(faq.selected_item().unwrap().id, "4");

        assert_eq!(faq.toggle_selected(), Some(true));
        assert!(faq.is_expanded("4"));
    }
}
