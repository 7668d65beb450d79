//! Line-based substitution in text files.

use std::path::Path;

use tracing::{debug, warn};

use crate::CoreResult;
use crate::files::{read_text, write_text};

/// Lines whose trimmed content starts with this marker are never replaced.
pub const COMMENT_MARKER: &str = "#";

/// Replaces whole lines of the file at `path`.
///
/// Each `(substring, replacement)` pair replaces every non-comment line
/// containing `substring` with `replacement` followed by `line_ending`.
/// Untouched lines keep their original bytes, including their endings.
/// Returns the number of lines replaced.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn replace_lines<F, R>(path: &Path, changes: &[(F, R)], line_ending: &str) -> CoreResult<usize>
where
    F: AsRef<str>,
    R: AsRef<str>,
{
    let text = read_text(path)?;
    let (patched, replaced) = replace_lines_in(&text, changes, line_ending);
    write_text(path, &patched)?;

    debug!(path = %path.display(), replaced, "patched lines");
    Ok(replaced)
}

/// Applies [`replace_lines`] semantics to an in-memory text.
///
/// Every pair is tested against the original line. When several pairs
/// match the same line the last one wins.
pub fn replace_lines_in<F, R>(text: &str, changes: &[(F, R)], line_ending: &str) -> (String, usize)
where
    F: AsRef<str>,
    R: AsRef<str>,
{
    let mut output = String::with_capacity(text.len());
    let mut replaced = 0;

    for line in text.split_inclusive('\n') {
        let is_comment = line.trim().starts_with(COMMENT_MARKER);
        let mut matching = changes
            .iter()
            .filter(|(substring, _)| !is_comment && line.contains(AsRef::<str>::as_ref(substring)));

        let Some(first) = matching.next() else {
            output.push_str(line);
            continue;
        };

        let mut winner = first;
        let mut overlaps = 0;
        for pair in matching {
            winner = pair;
            overlaps += 1;
        }
        if overlaps > 0 {
            warn!(
                line = line.trim_end(),
                matches = overlaps + 1,
                "several substitutions match one line, keeping the last"
            );
        }

        output.push_str(winner.1.as_ref());
        output.push_str(line_ending);
        replaced += 1;
    }

    (output, replaced)
}
