//! Indentation-driven Verse declaration scanner.
//!
//! Produces the same shape an editor outline provider would: nested
//! declarations with a kind, a detail string and a body range. It is a line
//! heuristic, not a parser.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{OutlineKind, OutlineNode};
use crate::{
    ide::navigation::{IdePosition, IdeRange},
    text_pos::{utf16_column_of_byte_offset, utf16_len},
};

const IDENT: &str = r"[A-Za-z_][A-Za-z0-9_]*";
const SPECIFIERS: &str = r"(?:<[A-Za-z_][A-Za-z0-9_]*>)*";

static TYPE_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?P<name>{IDENT}){SPECIFIERS}\s*:=\s*(?P<detail>(?P<kind>class|interface|struct|enum|module)\b.*?)\s*:?\s*$"
    ))
    .expect("type declaration pattern compiles")
});

static FUNCTION_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^(?P<name>{IDENT}){SPECIFIERS}(?P<detail>\(.*\).*:.*?)\s*=?\s*$"))
        .expect("function declaration pattern compiles")
});

static DATA_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^(?:var\s+)?(?P<name>{IDENT}){SPECIFIERS}\s*:\s*(?P<detail>[^=\s][^=]*?)\s*(?:=.*)?$"))
        .expect("data declaration pattern compiles")
});

static CONSTANT_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^(?P<name>{IDENT}){SPECIFIERS}\s*:=\s*(?P<detail>.*?)\s*$"))
        .expect("constant declaration pattern compiles")
});

static ENUM_MEMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^(?P<name>{IDENT})\s*,?\s*$")).expect("enum member pattern compiles"));

/// Scan Verse source into an outline tree.
pub fn scan_outline(text: &str) -> Vec<OutlineNode> {
    let lines = code_lines(text);
    let mut arena: Vec<Entry> = Vec::new();
    let mut roots: Vec<usize> = Vec::new();
    // Open blocks: (indent, arena index of the declaration, if it was recorded).
    let mut open: Vec<(usize, Option<usize>)> = Vec::new();

    for (line_idx, line) in lines.iter().enumerate() {
        let Some(code) = line else {
            continue;
        };
        let indent = code.len() - code.trim_start().len();
        let trimmed = code.trim();
        if trimmed.starts_with('@') || trimmed.starts_with("using") && !trimmed.contains(':') {
            continue;
        }

        while open.last().is_some_and(|(open_indent, _)| *open_indent >= indent) {
            open.pop();
        }
        let parent = open.last().map(|(_, idx)| *idx);
        let parent_kind = match parent {
            // Inside a body we don't outline (function, data or skipped block).
            Some(None) => {
                open.push((indent, None));
                continue;
            },
            Some(Some(idx)) => Some(arena[idx].kind),
            None => None,
        };
        if parent_kind.is_some_and(|kind| !is_container(kind)) {
            open.push((indent, None));
            continue;
        }

        let Some((name, kind, detail)) = classify_line(trimmed, parent_kind) else {
            open.push((indent, None));
            continue;
        };

        let end_line = block_end(&lines, line_idx, indent);
        let end_text = lines[end_line].as_deref().unwrap_or("");
        let range = IdeRange::new(
            IdePosition::new(line_idx as u32, utf16_column_of_byte_offset(code, indent)),
            IdePosition::new(end_line as u32, utf16_len(end_text)),
        );

        let idx = arena.len();
        arena.push(Entry {
            node: OutlineNode::new(name, kind, detail, range),
            kind,
            children: Vec::new(),
        });
        match parent {
            Some(Some(parent_idx)) => arena[parent_idx].children.push(idx),
            _ => roots.push(idx),
        }
        open.push((indent, Some(idx)));
    }

    roots.into_iter().map(|idx| materialize(&arena, idx)).collect()
}

struct Entry {
    node: OutlineNode,
    kind: OutlineKind,
    children: Vec<usize>,
}

fn materialize(
    arena: &[Entry],
    idx: usize,
) -> OutlineNode {
    let entry = &arena[idx];
    let children = entry.children.iter().map(|&child| materialize(arena, child)).collect();
    entry.node.clone().with_children(children)
}

fn is_container(kind: OutlineKind) -> bool {
    matches!(
        kind,
        OutlineKind::Module | OutlineKind::Class | OutlineKind::Interface | OutlineKind::Struct | OutlineKind::Enum
    )
}

fn classify_line(
    line: &str,
    parent: Option<OutlineKind>,
) -> Option<(String, OutlineKind, String)> {
    let in_type = parent.is_some_and(|kind| kind != OutlineKind::Module);

    if parent == Some(OutlineKind::Enum) {
        let caps = ENUM_MEMBER.captures(line)?;
        return Some((caps["name"].to_string(), OutlineKind::EnumMember, String::new()));
    }

    if let Some(caps) = TYPE_DECL.captures(line) {
        let kind = match &caps["kind"] {
            "class" => OutlineKind::Class,
            "interface" => OutlineKind::Interface,
            "struct" => OutlineKind::Struct,
            "enum" => OutlineKind::Enum,
            _ => OutlineKind::Module,
        };
        return Some((caps["name"].to_string(), kind, caps["detail"].to_string()));
    }

    if let Some(caps) = FUNCTION_DECL.captures(line) {
        let kind = if in_type {
            OutlineKind::Method
        } else {
            OutlineKind::Function
        };
        return Some((caps["name"].to_string(), kind, caps["detail"].trim().to_string()));
    }

    if let Some(caps) = DATA_DECL.captures(line) {
        let kind = if in_type {
            OutlineKind::Property
        } else {
            OutlineKind::Variable
        };
        return Some((caps["name"].to_string(), kind, caps["detail"].to_string()));
    }

    let caps = CONSTANT_DECL.captures(line)?;
    Some((caps["name"].to_string(), OutlineKind::Constant, caps["detail"].to_string()))
}

/// Last line of the block opened at `start`: every following line that is
/// blank or more indented belongs to it. Trailing blank lines are excluded.
fn block_end(
    lines: &[Option<String>],
    start: usize,
    indent: usize,
) -> usize {
    let mut end = start;
    for (idx, line) in lines.iter().enumerate().skip(start + 1) {
        let Some(code) = line else {
            continue;
        };
        let line_indent = code.len() - code.trim_start().len();
        if line_indent <= indent {
            break;
        }
        end = idx;
    }
    end
}

/// Source lines with comments removed; `None` for lines without code.
fn code_lines(text: &str) -> Vec<Option<String>> {
    let mut in_block_comment = false;
    text.lines()
        .map(|line| {
            let code = strip_comments(line, &mut in_block_comment);
            if code.trim().is_empty() {
                None
            } else {
                Some(code)
            }
        })
        .collect()
}

fn strip_comments(
    line: &str,
    in_block_comment: &mut bool,
) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        // Block comments are blanked rather than removed so columns stay put.
        if *in_block_comment {
            if ch == '#' && chars.peek() == Some(&'>') {
                chars.next();
                out.push_str("  ");
                *in_block_comment = false;
            } else {
                out.push(' ');
            }
            continue;
        }
        match ch {
            '<' if chars.peek() == Some(&'#') => {
                chars.next();
                out.push_str("  ");
                *in_block_comment = true;
            },
            '#' => break,
            _ => out.push(ch),
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
#[path = "../../tests/src/intel/verse_outline_tests.rs"]
mod tests;
