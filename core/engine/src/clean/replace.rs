//! FILENAME: core/engine/src/clean/replace.rs
//! PURPOSE: Case-insensitive pattern substitution over text cells.
//! CONTEXT: `find` is compiled as a regular expression, not a literal, so
//! metacharacters in user input act as regex syntax. Patterns that fail to
//! compile (and empty patterns) are skipped with a warning; the rest still run.
//! `replace` uses the upload form's substitution tokens: `$$`, `$&`, `` $` ``,
//! `$'`, `$1`..`$99` for groups the pattern has, and `$<name>` when the pattern
//! names its groups. Any other `$` is literal text, so "$0.00" stays "$0.00".

use crate::cell::CellValue;
use crate::clean::options::Replacement;
use crate::grid::Grid;
use regex::{Captures, Regex, RegexBuilder, Replacer};

/// Returns one count per (cell, pattern) pair where the pattern matched at
/// least once, regardless of how many occurrences were replaced. `columns`
/// restricts the pass to those header names (header cells included); empty
/// means every column.
pub fn find_and_replace(grid: &mut Grid, replacements: &[Replacement], columns: &[String]) -> usize {
    let compiled = compile(replacements);
    if compiled.is_empty() {
        return 0;
    }
    let allowed = grid.column_mask(columns);

    let mut replaced = 0;
    for row in grid.rows.iter_mut() {
        for (col, cell) in row.iter_mut().enumerate() {
            if let Some(flags) = &allowed {
                if !flags.get(col).copied().unwrap_or(false) {
                    continue;
                }
            }
            let CellValue::Text(text) = cell else {
                continue;
            };
            for (pattern, replacement) in &compiled {
                if !pattern.is_match(text) {
                    continue;
                }
                let expansion = Expansion::new(pattern, replacement, text.as_str());
                let updated = pattern.replace_all(text.as_str(), expansion).into_owned();
                *text = updated;
                replaced += 1;
            }
        }
    }
    replaced
}

fn compile(replacements: &[Replacement]) -> Vec<(Regex, &str)> {
    replacements
        .iter()
        .filter_map(|r| {
            if r.find.is_empty() {
                log::warn!(target: "CLEAN", "skipping replacement with empty pattern");
                return None;
            }
            match RegexBuilder::new(&r.find).case_insensitive(true).build() {
                Ok(pattern) => Some((pattern, r.replace.as_str())),
                Err(e) => {
                    log::warn!(target: "CLEAN", "skipping invalid pattern {:?}: {}", r.find, e);
                    None
                }
            }
        })
        .collect()
}

// ============================================================================
// SUBSTITUTION TOKENS
// ============================================================================

/// Expands one replacement template per match.
struct Expansion<'a> {
    template: &'a str,
    haystack: &'a str,
    groups: usize,
    named: bool,
}

impl<'a> Expansion<'a> {
    fn new(pattern: &Regex, template: &'a str, haystack: &'a str) -> Self {
        Expansion {
            template,
            haystack,
            groups: pattern.captures_len() - 1,
            named: pattern.capture_names().flatten().next().is_some(),
        }
    }

    /// Expands the token at the start of `token` (which begins with `$`) and
    /// returns how many bytes it used.
    fn expand_token(&self, token: &str, caps: &Captures<'_>, dst: &mut String) -> usize {
        let (start, end) = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));
        match token[1..].chars().next() {
            Some('$') => {
                dst.push('$');
                2
            }
            Some('&') => {
                dst.push_str(&self.haystack[start..end]);
                2
            }
            Some('`') => {
                dst.push_str(&self.haystack[..start]);
                2
            }
            Some('\'') => {
                dst.push_str(&self.haystack[end..]);
                2
            }
            Some(c) if c.is_ascii_digit() => {
                let digits: Vec<usize> = token[1..]
                    .bytes()
                    .take(2)
                    .take_while(|b| b.is_ascii_digit())
                    .map(|b| usize::from(b - b'0'))
                    .collect();
                if digits.len() == 2 {
                    let group = digits[0] * 10 + digits[1];
                    if (1..=self.groups).contains(&group) {
                        push_group(caps, group, dst);
                        return 3;
                    }
                }
                if (1..=self.groups).contains(&digits[0]) {
                    push_group(caps, digits[0], dst);
                    return 2;
                }
                dst.push('$');
                1
            }
            Some('<') if self.named => match token[2..].find('>') {
                Some(close) => {
                    let name = &token[2..2 + close];
                    dst.push_str(caps.name(name).map_or("", |m| m.as_str()));
                    close + 3
                }
                None => {
                    dst.push('$');
                    1
                }
            },
            _ => {
                dst.push('$');
                1
            }
        }
    }
}

fn push_group(caps: &Captures<'_>, group: usize, dst: &mut String) {
    // A group that did not take part in the match expands to nothing.
    dst.push_str(caps.get(group).map_or("", |m| m.as_str()));
}

impl Replacer for Expansion<'_> {
    fn replace_append(&mut self, caps: &Captures<'_>, dst: &mut String) {
        let mut rest = self.template;
        while let Some(pos) = rest.find('$') {
            dst.push_str(&rest[..pos]);
            let used = self.expand_token(&rest[pos..], caps, dst);
            rest = &rest[pos + used..];
        }
        dst.push_str(rest);
    }
}
