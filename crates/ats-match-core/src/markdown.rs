//! Plain-text extraction for job descriptions written in Markdown.
//!
//! Uses pulldown-cmark for proper CommonMark parsing rather than regex-based
//! stripping. Job titles, requirement bullets and technology names live in
//! headings, list items, tables and inline code, so all of those are kept.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Convert Markdown to searchable plain text.
///
/// Keeps:
/// - Heading, paragraph, list item and blockquote text
/// - Table cell text
/// - Emphasis/strong text (without markers)
/// - Inline code text
/// - Link text (the visible part)
///
/// Drops:
/// - YAML frontmatter
/// - Code blocks (fenced and indented)
/// - HTML
/// - Link and image targets, and image alt text
///
/// Block boundaries become newlines so that words from adjacent blocks never
/// run together.
///
/// ```
/// use ats_match_core::markdown::to_plain_text;
///
/// let text = to_plain_text("## Requirements\n\n- **Rust** and `tokio`\n- [Kubernetes](https://k8s.io)");
/// assert!(text.contains("Requirements"));
/// assert!(text.contains("Rust and tokio"));
/// assert!(!text.contains("k8s.io"));
/// ```
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn to_plain_text(text: &str) -> String {
    let text = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(text, options);

    let mut result = String::with_capacity(text.len());
    let mut skip_depth: usize = 0;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Image { .. } | Tag::HtmlBlock) => {
                skip_depth += 1;
            }
            Event::End(TagEnd::CodeBlock | TagEnd::Image | TagEnd::HtmlBlock) => {
                skip_depth = skip_depth.saturating_sub(1);
            }

            Event::Text(t) | Event::Code(t) if skip_depth == 0 => {
                result.push_str(&t);
            }
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 => {
                result.push(' ');
            }
            Event::End(TagEnd::TableCell) if skip_depth == 0 => {
                result.push(' ');
            }
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::TableHead
                | TagEnd::TableRow
                | TagEnd::BlockQuote(_),
            ) if skip_depth == 0 => {
                if !result.ends_with('\n') {
                    result.push('\n');
                }
            }

            _ => {}
        }
    }

    result.trim_end().to_string()
}

/// Strip YAML frontmatter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close_pos) = after_opening.find("\n---") else {
        return text;
    };

    let remainder = &after_opening[close_pos + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_headings_and_list_items() {
        let input = "# Senior Rust Engineer\n\n## You bring\n\n- Tokio\n- PostgreSQL\n";
        let result = to_plain_text(input);
        assert!(result.contains("Senior Rust Engineer"));
        assert!(result.contains("You bring"));
        assert!(result.contains("Tokio\nPostgreSQL"));
    }

    #[test]
    fn removes_code_blocks() {
        let input = "Some text.\n\n```python\nimport django\n```\n\nMore text.";
        let result = to_plain_text(input);
        assert!(!result.contains("django"));
        assert!(result.contains("Some text."));
        assert!(result.contains("More text."));
    }

    #[test]
    fn keeps_inline_code() {
        let result = to_plain_text("Experience with `kubectl` and `helm`.");
        assert_eq!(result, "Experience with kubectl and helm.");
    }

    #[test]
    fn removes_frontmatter() {
        let input = "---\ncompany: Acme\nlevel: senior\n---\n\nWe use Go.";
        let result = to_plain_text(input);
        assert!(!result.contains("company"));
        assert_eq!(result, "We use Go.");
    }

    #[test]
    fn keeps_link_text_only() {
        let result = to_plain_text("Check [our stack](https://example.com/stack) for details.");
        assert!(result.contains("our stack"));
        assert!(!result.contains("example.com"));
    }

    #[test]
    fn drops_images_and_html() {
        let input = "![team photo](team.png)\n\n<div class=\"perk\">Free snacks</div>\n\nWe ship daily.";
        let result = to_plain_text(input);
        assert!(!result.contains("team photo"));
        assert!(!result.contains("team.png"));
        assert!(!result.contains("snacks"));
        assert!(result.contains("We ship daily."));
    }

    #[test]
    fn keeps_table_cells_apart() {
        let input = "| Skill | Level |\n|---|---|\n| Rust | Expert |\n| SQL | Good |\n";
        let result = to_plain_text(input);
        assert!(result.contains("Rust"));
        assert!(result.contains("Expert"));
        assert!(!result.contains("RustExpert"));
        assert!(!result.contains("|"));
    }

    #[test]
    fn strips_emphasis_markers() {
        let result = to_plain_text("Must know **Kafka** and *Redis*.");
        assert_eq!(result, "Must know Kafka and Redis.");
    }

    #[test]
    fn adjacent_blocks_do_not_merge() {
        let result = to_plain_text("# Java\nScala");
        assert!(!result.contains("JavaScala"));
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(to_plain_text("").is_empty());
    }
}
