//! Block-tag whitespace control.
//!
//! Tera only offers explicit `{%-`/`-%}` markers. The natvis template is
//! written in the Jinja style where block and comment tags on their own line
//! vanish entirely, so the source goes through [`apply_block_whitespace`]
//! before Tera parses it:
//!
//! - **lstrip**: spaces/tabs between the start of a line and a `{%` or `{#`
//!   tag are dropped when nothing else precedes the tag on that line.
//! - **trim**: the first newline right after `%}` or `#}` is dropped.
//!
//! `{%+`/`+%}` opt a tag out of lstrip/trim and the `+` is removed. Tags
//! using Tera's own `-` markers are left to Tera. `{{ }}` expressions,
//! quoted strings inside tags and `{% raw %}` bodies are copied verbatim.
//! No newline is trimmed after `{% raw %}` itself.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Expression,
    Block,
    Comment,
}

/// Apply lstrip + trim block conventions to a template source.
pub fn apply_block_whitespace(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    // First source byte not yet copied to `out`.
    let mut cursor = 0;
    // Where the next tag search starts.
    let mut pos = 0;

    while let Some((rel, kind)) = find_tag_open(&source[pos..]) {
        let start = pos + rel;
        let Some(end) = find_tag_close(source, start, kind) else {
            // Unterminated tag: leave it for Tera to report.
            break;
        };
        if kind == TagKind::Expression {
            pos = end;
            continue;
        }

        let tag = &source[start..end];
        let open_marker = tag.as_bytes().get(2).copied();
        let close_marker = if tag.len() >= 6 {
            tag.as_bytes().get(tag.len() - 3).copied()
        } else {
            None
        };

        let mut text_end = start;
        if !matches!(open_marker, Some(b'+') | Some(b'-')) {
            let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
            if line_start >= cursor
                && source[line_start..start]
                    .bytes()
                    .all(|b| b == b' ' || b == b'\t')
            {
                text_end = line_start;
            }
        }
        out.push_str(&source[cursor..text_end]);
        out.push_str(&strip_plus_markers(tag, open_marker, close_marker));
        cursor = end;

        if kind == TagKind::Block && tag_body(tag) == "raw" {
            // The body is copied as text; `{% endraw %}` is handled as a
            // regular block tag on the next iteration.
            match find_endraw(source, end) {
                Some(endraw) => {
                    pos = endraw;
                    continue;
                }
                None => break,
            }
        }

        if !matches!(close_marker, Some(b'+') | Some(b'-')) {
            let rest = &source[cursor..];
            if rest.starts_with("\r\n") {
                cursor += 2;
            } else if rest.starts_with('\n') {
                cursor += 1;
            }
        }
        pos = cursor;
    }

    out.push_str(&source[cursor..]);
    out
}

/// Earliest `{{`, `{%` or `{#` in `s`.
fn find_tag_open(s: &str) -> Option<(usize, TagKind)> {
    [
        ("{{", TagKind::Expression),
        ("{%", TagKind::Block),
        ("{#", TagKind::Comment),
    ]
    .into_iter()
    .filter_map(|(open, kind)| s.find(open).map(|i| (i, kind)))
    .min_by_key(|(i, _)| *i)
}

/// Byte offset just past the delimiter closing the tag opened at `start`.
///
/// Quoted strings inside expressions and blocks are skipped; comments end at
/// the first `#}`.
fn find_tag_close(source: &str, start: usize, kind: TagKind) -> Option<usize> {
    let body = start + 2;
    let closer: &[u8] = match kind {
        TagKind::Comment => return source[body..].find("#}").map(|i| body + i + 2),
        TagKind::Expression => b"}}",
        TagKind::Block => b"%}",
    };

    let bytes = source.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = body;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(_) if b == b'\\' => i += 1,
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if matches!(b, b'"' | b'\'' | b'`') => quote = Some(b),
            None if bytes[i..].starts_with(closer) => return Some(i + 2),
            None => {}
        }
        i += 1;
    }
    None
}

/// Start of the first `{% endraw %}` at or after `from`.
fn find_endraw(source: &str, from: usize) -> Option<usize> {
    source[from..]
        .match_indices("{%")
        .map(|(i, _)| from + i)
        .find(|&start| {
            find_tag_close(source, start, TagKind::Block)
                .is_some_and(|end| tag_body(&source[start..end]) == "endraw")
        })
}

/// Tag contents without delimiters, whitespace-control markers or padding.
fn tag_body(tag: &str) -> &str {
    tag[2..tag.len() - 2]
        .trim_matches(|c| c == '+' || c == '-')
        .trim()
}

fn strip_plus_markers(tag: &str, open: Option<u8>, close: Option<u8>) -> String {
    let inner_start = if open == Some(b'+') { 3 } else { 2 };
    let inner_end = if close == Some(b'+') { tag.len() - 3 } else { tag.len() - 2 };
    if inner_start == 2 && inner_end == tag.len() - 2 {
        return tag.to_string();
    }
    format!(
        "{}{}{}",
        &tag[..2],
        &tag[inner_start..inner_end],
        &tag[tag.len() - 2..]
    )
}
