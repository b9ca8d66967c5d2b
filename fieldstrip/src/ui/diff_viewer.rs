// fieldstrip/src/ui/diff_viewer.rs
//! Unified diff output for `strip --diff`.

use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Writes a unified diff between `original` and `stripped`.
///
/// Writes `No changes.` when the texts are identical.
pub fn print_diff<W: Write>(
    original: &str,
    stripped: &str,
    label: &str,
    writer: &mut W,
    colored: bool,
) -> io::Result<()> {
    if original == stripped {
        return writeln!(writer, "No changes.");
    }

    let patch = create_patch(original, stripped);
    let header_old = format!("--- a/{}", label);
    let header_new = format!("+++ b/{}", label);
    if colored {
        writeln!(writer, "{}", header_old.bold())?;
        writeln!(writer, "{}", header_new.bold())?;
    } else {
        writeln!(writer, "{}", header_old)?;
        writeln!(writer, "{}", header_new)?;
    }

    for hunk in patch.hunks() {
        let old = hunk.old_range();
        let new = hunk.new_range();
        let range = format!("@@ -{},{} +{},{} @@", old.start(), old.len(), new.start(), new.len());
        if colored {
            writeln!(writer, "{}", range.cyan())?;
        } else {
            writeln!(writer, "{}", range)?;
        }

        for line in hunk.lines() {
            let (prefix, text) = match line {
                DiffLine::Delete(s) => ('-', *s),
                DiffLine::Insert(s) => ('+', *s),
                DiffLine::Context(s) => (' ', *s),
            };
            let body = text.strip_suffix('\n').unwrap_or(text);
            match (colored, prefix) {
                (true, '-') => writeln!(writer, "{}", format!("-{}", body).red())?,
                (true, '+') => writeln!(writer, "{}", format!("+{}", body).green())?,
                _ => writeln!(writer, "{}{}", prefix, body)?,
            }
        }
    }
    Ok(())
}
