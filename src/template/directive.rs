//! Scanning `{% anchor %}` and `{% autosort %}` out of template source
//!
//! Tera has no custom tags, so sorting directives are lifted out of the
//! source before it is handed to Tera. Anchors are replaced by a lookup into
//! the `sorting_anchors` list filled in at render time; autosorts are removed
//! and run against the context before rendering.

use crate::core::{Result, SortingError};
use crate::sorting::{AutoSort, SortAnchor};

/// Context variable holding the rendered anchors of one render pass
pub const ANCHORS_VAR: &str = "sorting_anchors";

/// Sorting directives found in one template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    pub anchors: Vec<SortAnchor>,
    pub autosorts: Vec<AutoSort>,
}

/// Split tag contents on whitespace, keeping quoted runs together and
/// stripping their quotes
pub fn split_contents(contents: &str) -> Vec<String> {
    let mut bits = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;

    for c in contents.chars() {
        match quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    quote = None;
                }
            }
            None if c.is_whitespace() => {
                if in_token {
                    bits.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        bits.push(current);
    }

    bits.into_iter()
        .map(|b| b.trim_matches(|c| c == '"' || c == '\'').to_string())
        .collect()
}

/// Rewrite `source`, returning Tera-ready text and the directives it held
///
/// Comments and `{% raw %}` blocks are copied through untouched. Directive
/// syntax errors are reported here, before Tera ever sees the template.
pub fn extract(source: &str) -> Result<(String, Directives)> {
    let mut output = String::with_capacity(source.len());
    let mut directives = Directives::default();
    let mut rest = source;

    while let Some(start) = next_open(rest) {
        output.push_str(&rest[..start]);
        let tail = &rest[start..];

        if tail.starts_with("{#") {
            let end = tail.find("#}").map_or(tail.len(), |i| i + 2);
            output.push_str(&tail[..end]);
            rest = &tail[end..];
            continue;
        }

        let Some(len) = tag_len(tail) else {
            rest = tail;
            break;
        };
        let tag = &tail[..len];
        let (body, trim_left, trim_right) = tag_body(tag);

        let bits = split_contents(body);
        let replacement = match bits.first().map(String::as_str) {
            Some("raw") => {
                let end = len + raw_block_len(&tail[len..]);
                output.push_str(&tail[..end]);
                rest = &tail[end..];
                continue;
            }
            Some("anchor") => {
                let anchor = SortAnchor::from_directive_args(&bits[1..])?;
                let index = directives.anchors.len();
                directives.anchors.push(anchor);
                Some(format!(
                    "{{{{{} {}.{} | safe {}}}}}",
                    if trim_left { "-" } else { "" },
                    ANCHORS_VAR,
                    index,
                    if trim_right { "-" } else { "" },
                ))
            }
            Some("autosort") => {
                directives.autosorts.push(AutoSort::from_directive_args(&bits[1..])?);
                Some(String::new())
            }
            _ => None,
        };

        match replacement {
            Some(text) => output.push_str(&text),
            None => output.push_str(tag),
        }
        rest = &tail[len..];
    }
    output.push_str(rest);

    Ok((output, directives))
}

/// Offset of the next `{%` or `{#`
fn next_open(s: &str) -> Option<usize> {
    s.match_indices('{')
        .map(|(i, _)| i)
        .find(|&i| matches!(s.as_bytes().get(i + 1), Some(b'%') | Some(b'#')))
}

/// Length of the `{% ... %}` tag at the start of `tail`, ignoring `%}`
/// inside quoted strings
fn tag_len(tail: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut prev = '\0';
    for (i, c) in tail.char_indices().skip(2) {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '}' && prev == '%' => return Some(i + 1),
            None => {}
        }
        prev = c;
    }
    None
}

/// Tag contents without delimiters, plus its whitespace-control markers
fn tag_body(tag: &str) -> (&str, bool, bool) {
    let inner = &tag[2..tag.len() - 2];
    let trim_left = inner.starts_with('-');
    let trim_right = inner.ends_with('-') && inner.len() > 1;
    (
        inner.trim_start_matches('-').trim_end_matches('-'),
        trim_left,
        trim_right,
    )
}

/// Length of a raw block's contents up to and including its `endraw` tag
fn raw_block_len(after: &str) -> usize {
    let mut offset = 0;
    while let Some(start) = after[offset..].find("{%").map(|i| offset + i) {
        let Some(len) = tag_len(&after[start..]) else {
            break;
        };
        let (body, _, _) = tag_body(&after[start..start + len]);
        if body.split_whitespace().next() == Some("endraw") {
            return start + len;
        }
        offset = start + len;
    }
    after.len()
}

/// Same as [`extract`] but names the template in syntax errors
pub fn extract_named(name: &str, source: &str) -> Result<(String, Directives)> {
    extract(source).map_err(|e| match e {
        SortingError::Syntax { directive, message } => SortingError::Syntax {
            directive,
            message: format!("{} (in template '{}')", message, name),
        },
        other => other,
    })
}
