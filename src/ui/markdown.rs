//! Markdown to ratatui lines for assistant replies.
//!
//! Only the constructs Gemini commonly emits are styled: headings, emphasis,
//! inline and fenced code, lists, block quotes, links and rules. Anything
//! else falls through as plain text.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::ui::theme::Theme;

#[derive(Clone, Copy)]
enum ListKind {
    Unordered,
    Ordered(u64),
}

fn detab(s: &str) -> String {
    s.replace('\t', "    ")
}

fn flush_line(lines: &mut Vec<Line<'static>>, spans: &mut Vec<Span<'static>>) {
    if !spans.is_empty() {
        lines.push(Line::from(std::mem::take(spans)));
    }
}

fn push_blank(lines: &mut Vec<Line<'static>>) {
    if lines.last().is_some_and(|l| l.width() > 0) {
        lines.push(Line::default());
    }
}

fn quote_prefix(depth: usize, theme: &Theme) -> Option<Span<'static>> {
    (depth > 0).then(|| Span::styled("│ ".repeat(depth), theme.footer_style))
}

pub fn render_markdown(content: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    let parser = Parser::new_ext(content, options);

    let base = theme.assistant_text_style;
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut style_stack: Vec<Style> = vec![base];
    let mut list_stack: Vec<ListKind> = Vec::new();
    let mut quote_depth = 0usize;
    let mut in_code_block = false;
    let mut link: Option<(String, String)> = None;

    macro_rules! start_span {
        () => {
            if spans.is_empty() {
                if let Some(prefix) = quote_prefix(quote_depth, theme) {
                    spans.push(prefix);
                }
            }
        };
    }

    for event in parser {
        match event {
            Event::Start(tag) => match tag {
                Tag::Paragraph => {}
                Tag::Heading { .. } => {
                    flush_line(&mut lines, &mut spans);
                    style_stack.push(theme.heading_style);
                }
                Tag::BlockQuote(_) => {
                    flush_line(&mut lines, &mut spans);
                    quote_depth += 1;
                }
                Tag::List(start) => {
                    flush_line(&mut lines, &mut spans);
                    list_stack.push(match start {
                        Some(n) => ListKind::Ordered(n),
                        None => ListKind::Unordered,
                    });
                }
                Tag::Item => {
                    flush_line(&mut lines, &mut spans);
                    let indent = "  ".repeat(list_stack.len().saturating_sub(1));
                    let marker = match list_stack.last_mut() {
                        Some(ListKind::Ordered(n)) => {
                            let current = *n;
                            *n += 1;
                            format!("{indent}{current}. ")
                        }
                        _ => format!("{indent}• "),
                    };
                    start_span!();
                    spans.push(Span::styled(marker, theme.heading_style));
                }
                Tag::CodeBlock(kind) => {
                    flush_line(&mut lines, &mut spans);
                    in_code_block = true;
                    if let CodeBlockKind::Fenced(lang) = kind {
                        if !lang.is_empty() {
                            lines.push(Line::from(Span::styled(
                                format!("  [{lang}]"),
                                theme.footer_style,
                            )));
                        }
                    }
                }
                Tag::Emphasis => {
                    let top = style_stack.last().copied().unwrap_or(base);
                    style_stack.push(top.add_modifier(Modifier::ITALIC));
                }
                Tag::Strong => {
                    let top = style_stack.last().copied().unwrap_or(base);
                    style_stack.push(top.add_modifier(Modifier::BOLD));
                }
                Tag::Strikethrough => {
                    let top = style_stack.last().copied().unwrap_or(base);
                    style_stack.push(top.add_modifier(Modifier::CROSSED_OUT));
                }
                Tag::Link { dest_url, .. } => {
                    style_stack.push(theme.link_style);
                    link = Some((dest_url.to_string(), String::new()));
                }
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Paragraph => {
                    flush_line(&mut lines, &mut spans);
                    if list_stack.is_empty() {
                        push_blank(&mut lines);
                    }
                }
                TagEnd::Heading(_) => {
                    style_stack.pop();
                    flush_line(&mut lines, &mut spans);
                    push_blank(&mut lines);
                }
                TagEnd::BlockQuote(_) => {
                    flush_line(&mut lines, &mut spans);
                    quote_depth = quote_depth.saturating_sub(1);
                }
                TagEnd::List(_) => {
                    flush_line(&mut lines, &mut spans);
                    list_stack.pop();
                    if list_stack.is_empty() {
                        push_blank(&mut lines);
                    }
                }
                TagEnd::Item => flush_line(&mut lines, &mut spans),
                TagEnd::CodeBlock => {
                    in_code_block = false;
                    push_blank(&mut lines);
                }
                TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                    style_stack.pop();
                }
                TagEnd::Link => {
                    style_stack.pop();
                    if let Some((url, text)) = link.take() {
                        if !url.is_empty() && url != text {
                            spans.push(Span::styled(format!(" ({url})"), theme.footer_style));
                        }
                    }
                }
                _ => {}
            },
            Event::Text(text) => {
                if in_code_block {
                    for l in text.lines() {
                        lines.push(Line::from(Span::styled(
                            format!("  {}", detab(l)),
                            theme.code_style,
                        )));
                    }
                } else {
                    if let Some((_, link_text)) = link.as_mut() {
                        link_text.push_str(&text);
                    }
                    start_span!();
                    let style = style_stack.last().copied().unwrap_or(base);
                    spans.push(Span::styled(detab(&text), style));
                }
            }
            Event::Code(code) => {
                start_span!();
                spans.push(Span::styled(detab(&code), theme.code_style));
            }
            Event::SoftBreak | Event::HardBreak => flush_line(&mut lines, &mut spans),
            Event::Rule => {
                flush_line(&mut lines, &mut spans);
                lines.push(Line::from(Span::styled("─".repeat(24), theme.footer_style)));
                push_blank(&mut lines);
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                spans.push(Span::styled(marker, theme.heading_style));
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                start_span!();
                spans.push(Span::styled(html.trim_end().to_string(), base));
            }
            _ => {}
        }
    }

    flush_line(&mut lines, &mut spans);
    while lines.last().is_some_and(|l| l.width() == 0) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn paragraphs_are_separated_by_blank_lines() {
        let lines = render_markdown(
            "First paragraph.\n\nSecond paragraph.",
            &Theme::dark_default(),
        );
        assert_eq!(plain(&lines), vec!["First paragraph.", "", "Second paragraph."]);
    }

    #[test]
    fn strong_text_is_bold() {
        let theme = Theme::dark_default();
        let lines = render_markdown("a **b** c", &theme);
        assert_eq!(lines.len(), 1);
        let bold = lines[0]
            .spans
            .iter()
            .find(|s| s.content == "b")
            .expect("bold span");
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn lists_get_markers_and_numbers() {
        let lines = render_markdown("- one\n- two\n\n3. three\n4. four", &Theme::dark_default());
        assert_eq!(
            plain(&lines),
            vec!["• one", "• two", "", "3. three", "4. four"]
        );
    }

    #[test]
    fn nested_list_is_indented() {
        let lines = render_markdown("- outer\n  - inner", &Theme::dark_default());
        assert_eq!(plain(&lines), vec!["• outer", "  • inner"]);
    }

    #[test]
    fn fenced_code_keeps_lines_and_language() {
        let theme = Theme::dark_default();
        let lines = render_markdown("```rust\nfn main() {\n\tprintln!();\n}\n```", &theme);
        assert_eq!(
            plain(&lines),
            vec!["  [rust]", "  fn main() {", "      println!();", "  }"]
        );
        assert_eq!(lines[1].spans[0].style, theme.code_style);
    }

    #[test]
    fn links_show_destination() {
        let lines = render_markdown(
            "See [Google AI Studio](https://aistudio.google.com).",
            &Theme::dark_default(),
        );
        assert_eq!(
            plain(&lines),
            vec!["See Google AI Studio (https://aistudio.google.com)."]
        );
    }

    #[test]
    fn block_quotes_are_prefixed() {
        let lines = render_markdown("> quoted\n> text", &Theme::dark_default());
        assert_eq!(plain(&lines), vec!["│ quoted", "│ text"]);
    }

    #[test]
    fn heading_is_styled_without_hashes() {
        let theme = Theme::dark_default();
        let lines = render_markdown("## Title\nBody", &theme);
        assert_eq!(plain(&lines), vec!["Title", "", "Body"]);
        assert_eq!(lines[0].spans[0].style, theme.heading_style);
    }
}
