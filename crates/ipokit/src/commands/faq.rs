//! `ipokit faq`: filter the FAQ from the command line.

use ipokit_widgets::{categories, filter_faqs, FaqItem};

/// Print entries matching `query` and `category`.
pub fn run_faq(
    faqs: &[FaqItem],
    query: Option<&str>,
    category: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let matches = filter_faqs(faqs, query.unwrap_or_default(), category);
    tracing::debug!(
        query = query.unwrap_or_default(),
        category = category.unwrap_or("all"),
        matches = matches.len(),
        "FAQ filtered"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No matching questions found.");
        return Ok(());
    }

    for item in &matches {
        println!("[{}] {}", item.category, item.question);
        println!("    {}", item.answer);
    }
    println!();
    println!("{} of {} questions", matches.len(), faqs.len());
    Ok(())
}

/// Print every category in first-seen order.
pub fn list_categories(faqs: &[FaqItem]) {
    for category in categories(faqs) {
        println!("{category}");
    }
}
