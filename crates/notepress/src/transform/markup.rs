//! Rewrites note-app rich text conventions into markdown.
//!
//! Every line goes through two stages, each with mutually exclusive rules:
//!
//! 1. **Line prefix** (first match wins, indentation is preserved):
//!
//!    | Input        | Output    |
//!    |--------------|-----------|
//!    | `• item`     | `* item`  |
//!    | `◦ item`     | `* item`  |
//!    | `12. item`   | `1. item` |
//!    | `☐ item`     | `- [ ] item` |
//!    | `☑ item`     | `- [x] item` |
//!    | `☒ item`     | `- [x] item` |
//!
//!    Ordered lists are not renumbered; markdown renderers number `1.` items
//!    themselves.
//!
//! 2. **Emphasis**, a single left-to-right scan over the rest of the line:
//!    `_text_` becomes `*text*` (italic) and `*text*` becomes `**text**`
//!    (bold). Output of one rule is never fed to the other, so an italic span
//!    stays italic. A delimiter only opens a span when it is not glued to a
//!    preceding letter or digit and is followed by non-space text; it only
//!    closes one when it follows non-space text and is not glued to a
//!    following letter or digit. `snake_case_name`, `2 * 3` and existing
//!    `**bold**` are left alone.

const BULLET_GLYPHS: &[char] = &['•', '◦'];
const OPEN_CHECKBOX: char = '☐';
const CLOSED_CHECKBOXES: &[char] = &['☑', '☒'];

/// Applies the line prefix and emphasis rules to every line of `text`.
pub fn to_markdown(text: &str) -> String {
    text.replace("\r\n", "\n")
        .split('\n')
        .map(rewrite_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn rewrite_line(line: &str) -> String {
    let content = line.trim_start();
    let indent = &line[..line.len() - content.len()];

    let (prefix, rest) = split_line_prefix(content);
    format!("{}{}{}", indent, prefix, rewrite_emphasis(rest))
}

/// Returns the markdown prefix for `content` and the text that follows it.
fn split_line_prefix(content: &str) -> (&'static str, &str) {
    let mut chars = content.chars();
    match chars.next() {
        Some(c) if BULLET_GLYPHS.contains(&c) => ("* ", chars.as_str().trim_start()),
        Some(OPEN_CHECKBOX) => ("- [ ] ", chars.as_str().trim_start()),
        Some(c) if CLOSED_CHECKBOXES.contains(&c) => ("- [x] ", chars.as_str().trim_start()),
        Some(c) if c.is_ascii_digit() => match strip_ordinal(content) {
            Some(rest) => ("1. ", rest),
            None => ("", content),
        },
        _ => ("", content),
    }
}

/// Strips a leading `<digits>. ` marker.
fn strip_ordinal(content: &str) -> Option<&str> {
    let digits = content.chars().take_while(char::is_ascii_digit).count();
    content[digits..].strip_prefix(". ")
}

fn rewrite_emphasis(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c != '_' && c != '*' {
            out.push(c);
            i += 1;
            continue;
        }

        // Runs of two or more delimiters (already-strong text, `__init__`)
        // are copied through untouched.
        let run = chars[i..].iter().take_while(|&&d| d == c).count();
        if run > 1 {
            out.extend(&chars[i..i + run]);
            i += run;
            continue;
        }

        match find_closing(&chars, i) {
            Some(close) => {
                let wrap = if c == '_' { "*" } else { "**" };
                out.push_str(wrap);
                out.extend(&chars[i + 1..close]);
                out.push_str(wrap);
                i = close + 1;
            }
            None => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

fn find_closing(chars: &[char], open: usize) -> Option<usize> {
    let delim = chars[open];

    if open > 0 && chars[open - 1].is_alphanumeric() {
        return None;
    }
    let first = *chars.get(open + 1)?;
    if first.is_whitespace() || first == delim {
        return None;
    }

    (open + 2..chars.len()).find(|&j| {
        chars[j] == delim
            && !chars[j - 1].is_whitespace()
            && chars
                .get(j + 1)
                .map_or(true, |&after| !after.is_alphanumeric() && after != delim)
    })
}
