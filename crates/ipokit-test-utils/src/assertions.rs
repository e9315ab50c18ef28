//! Assertion helpers for rendered output and text.
//!
//! Widgets are rendered into a ratatui `TestBackend`, and the resulting buffer
//! is flattened to plain text so tests can search it or diff it.

use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};
use unicode_width::UnicodeWidthStr;

/// Flatten a buffer to text, one line per row with trailing spaces trimmed.
///
/// Cells covered by a wide character are skipped so "上場" reads back as
/// written.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        let mut skip = 0usize;
        for x in area.left()..area.right() {
            if skip > 0 {
                skip -= 1;
                continue;
            }
            let symbol = buffer[(x, y)].symbol();
            skip = symbol.width().saturating_sub(1);
            line.push_str(symbol);
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Draw once into a `width` x `height` test terminal and return the text.
///
/// # Example
///
/// ```rust
/// use ipokit_test_utils::assertions::render_to_string;
/// use ratatui::widgets::Paragraph;
///
/// let text = render_to_string(20, 1, |frame| {
///     frame.render_widget(Paragraph::new("hello"), frame.area());
/// });
/// assert_eq!(text, "hello");
/// ```
pub fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("Failed to create test terminal");
    terminal.draw(draw).expect("Failed to draw frame");
    buffer_to_string(terminal.backend().buffer())
}

/// Assert that rendered text contains `expected`.
pub fn assert_buffer_contains(rendered: &str, expected: &str) {
    assert!(
        rendered.contains(expected),
        "Rendered output does not contain expected text.\nExpected to find: {}\nRendered:\n{}",
        expected,
        rendered
    );
}

/// Assert that rendered text does not contain `unexpected`.
pub fn assert_buffer_not_contains(rendered: &str, unexpected: &str) {
    assert!(
        !rendered.contains(unexpected),
        "Rendered output unexpectedly contains: {}\nRendered:\n{}",
        unexpected,
        rendered
    );
}

/// Assert that two strings are equal, with a nice diff on failure.
pub fn assert_strings_equal(actual: &str, expected: &str) {
    if actual != expected {
        let diff = similar::TextDiff::from_lines(expected, actual);
        let mut output = String::new();

        for change in diff.iter_all_changes() {
            let sign = match change.tag() {
                similar::ChangeTag::Delete => "-",
                similar::ChangeTag::Insert => "+",
                similar::ChangeTag::Equal => " ",
            };
            output.push_str(&format!("{}{}", sign, change));
            if change.missing_newline() {
                output.push('\n');
            }
        }

        panic!("Strings are not equal.\nDiff:\n{}", output);
    }
}

/// Assert that an option is Some and extract the value.
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(value) => value,
            None => panic!("Expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(value) => value,
            None => panic!("{}", $msg),
        }
    };
}
