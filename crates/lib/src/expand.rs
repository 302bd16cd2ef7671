//! Brace-group path pattern expansion.
//!
//! Patterns may contain `{a,b,c}` groups anywhere; each group multiplies the
//! candidate set by its options. Results are deduplicated and sorted so a
//! pattern always enumerates its paths in the same order across runs.

use std::collections::BTreeSet;

/// Expand every brace group in `pattern` into the full set of concrete paths.
///
/// Groups resolve innermost-first, so nested groups multiply out:
/// `a{b{c,d}e,f}g` yields `abceg`, `abdeg`, `afg`. A group needs at least one
/// interior character, so `{}` and unbalanced braces pass through as
/// literals. Options may be empty: `a{b,}c` yields `abc` and `ac`.
pub fn expand(pattern: &str) -> Vec<String> {
  let mut pending = vec![pattern.to_string()];
  let mut expanded = BTreeSet::new();

  // Each substitution removes one brace pair, so the worklist always drains.
  while let Some(candidate) = pending.pop() {
    let Some((start, end)) = find_group(&candidate) else {
      expanded.insert(candidate);
      continue;
    };

    let prefix = &candidate[..start];
    let options = &candidate[start + 1..end];
    let suffix = &candidate[end + 1..];
    for option in options.split(',') {
      pending.push(format!("{prefix}{option}{suffix}"));
    }
  }

  expanded.into_iter().collect()
}

/// Locate the leftmost brace group whose interior is non-empty and brace-free,
/// returning the byte offsets of its `{` and `}` delimiters.
fn find_group(s: &str) -> Option<(usize, usize)> {
  let mut open = None;

  // Braces are ASCII, so byte offsets are always char boundaries.
  for (i, b) in s.bytes().enumerate() {
    match b {
      b'{' => open = Some(i),
      b'}' => {
        if let Some(start) = open {
          if i > start + 1 {
            return Some((start, i));
          }
          // `{}` is not a group; keep scanning past it
          open = None;
        }
      }
      _ => {}
    }
  }

  None
}
