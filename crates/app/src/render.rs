//! Plain-text rendering shared by the menu and one-shot commands.

use std::io::{self, Write};

use prep_core::model::{Stats, TrackedQuestion};

pub const RULE: &str = "==================================================";
pub const THIN_RULE: &str = "--------------------------------------------------";

pub fn status_mark(answered: bool) -> &'static str {
    if answered { "[✓]" } else { "[○]" }
}

/// `[✓] ID: 3 | Category: DP` followed by the indented question text.
pub fn write_question_line(out: &mut impl Write, entry: &TrackedQuestion) -> io::Result<()> {
    let question = &entry.question;
    writeln!(
        out,
        "{} ID: {} | Category: {}",
        status_mark(entry.answered),
        question.id(),
        question.category()
    )?;
    writeln!(out, "    Q: {}", question.question())
}

pub fn write_question_detail(out: &mut impl Write, entry: &TrackedQuestion) -> io::Result<()> {
    let question = &entry.question;
    writeln!(out, "Category: {}", question.category())?;
    writeln!(out)?;
    writeln!(out, "Question: {}", question.question())?;
    if !question.hint().is_empty() {
        writeln!(out)?;
        writeln!(out, "Hint: {}", question.hint())?;
    }
    Ok(())
}

pub fn write_stats(out: &mut impl Write, stats: &Stats) -> io::Result<()> {
    writeln!(out, "Total Questions: {}", stats.total)?;
    writeln!(out, "Answered: {}", stats.answered)?;
    writeln!(out, "Unanswered: {}", stats.unanswered)?;
    if stats.total > 0 {
        writeln!(out, "Progress: {:.1}%", stats.percentage)?;
    }

    if !stats.categories.is_empty() {
        writeln!(out)?;
        writeln!(out, "By Category:")?;
        for (name, counts) in &stats.categories {
            writeln!(out, "  {name}: {}/{}", counts.answered, counts.total)?;
        }
    }
    Ok(())
}
