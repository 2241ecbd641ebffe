use std::io::{BufRead, Write};

use prep_core::model::QuestionFilter;
use services::{AppServices, PracticeAction, PracticeError, PracticeOrder, PracticeSelection};

use crate::render::{self, RULE, THIN_RULE};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Interactive numbered menu driven by line input.
pub struct Menu<R, W> {
    services: AppServices,
    input: R,
    output: W,
    order: PracticeOrder,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(services: AppServices, input: R, output: W) -> Self {
        Self {
            services,
            input,
            output,
            order: PracticeOrder::AsStored,
            clear_screen: false,
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: PracticeOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    /// Loop until the user exits or input ends.
    ///
    /// Failures inside a menu action are shown and the menu continues.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.clear()?;
            self.write_main_menu()?;
            let Some(choice) = self.prompt("Choice: ")? else {
                writeln!(self.output)?;
                return Ok(());
            };

            let outcome = match choice.as_str() {
                "1" => self.practice(PracticeSelection::All).await,
                "2" => self.practice_category().await,
                "3" => self.practice(PracticeSelection::Unanswered).await,
                "4" => self.view_all().await,
                "5" => self.reset().await,
                "6" => self.statistics().await,
                "7" => {
                    writeln!(self.output, "\nGoodbye! Keep practicing!")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Invalid choice!")?;
                    self.pause()
                }
            };

            if let Err(err) = outcome {
                writeln!(self.output, "\nError: {err:#}")?;
                self.pause()?;
            }
        }
    }

    fn write_main_menu(&mut self) -> std::io::Result<()> {
        let out = &mut self.output;
        writeln!(out, "{RULE}")?;
        writeln!(out, "Interview Questions Practice App")?;
        writeln!(out, "{RULE}")?;
        writeln!(out)?;
        writeln!(out, "1. Practice all questions")?;
        writeln!(out, "2. Practice by category")?;
        writeln!(out, "3. Practice unanswered questions")?;
        writeln!(out, "4. View all questions")?;
        writeln!(out, "5. Reset progress")?;
        writeln!(out, "6. View statistics")?;
        writeln!(out, "7. Exit")?;
        writeln!(out)
    }

    async fn practice(&mut self, selection: PracticeSelection) -> anyhow::Result<()> {
        let practice = self.services.practice();
        let mut session = match practice.start_session(&selection, self.order).await {
            Ok(session) => session,
            Err(PracticeError::Empty) => {
                writeln!(self.output, "No questions available!")?;
                return self.pause();
            }
            Err(err) => return Err(err.into()),
        };

        while let (Some((index, total)), Some(current)) =
            (session.position(), session.current().cloned())
        {
            self.clear()?;
            writeln!(self.output, "Question {index} of {total}")?;
            writeln!(self.output, "{RULE}")?;
            writeln!(self.output)?;
            render::write_question_detail(&mut self.output, &current)?;
            writeln!(self.output)?;
            writeln!(self.output, "{THIN_RULE}")?;
            writeln!(self.output, "\nOptions:")?;
            writeln!(self.output, "  [Enter] - Next question")?;
            writeln!(self.output, "  [m]     - Mark as answered")?;
            writeln!(self.output, "  [s]     - Skip")?;
            writeln!(self.output, "  [q]     - Quit to main menu")?;
            writeln!(self.output)?;

            let input = self.prompt("Your choice: ")?;
            let action = input
                .as_deref()
                .map_or(PracticeAction::Quit, PracticeAction::from_input);
            practice.answer_current(&mut session, action).await?;
            if action == PracticeAction::MarkAnswered {
                writeln!(self.output, "\nMarked as answered!")?;
            }
        }

        let summary = session.summary();
        if summary.quit_early {
            return Ok(());
        }
        writeln!(self.output, "\nPractice session completed!")?;
        writeln!(
            self.output,
            "Seen {}, marked {}, skipped {}.",
            summary.seen, summary.marked, summary.skipped
        )?;
        self.pause()
    }

    async fn practice_category(&mut self) -> anyhow::Result<()> {
        let stats = self.services.query().stats().await?;
        if stats.categories.is_empty() {
            writeln!(self.output, "No categories found!")?;
            return self.pause();
        }

        self.clear()?;
        writeln!(self.output, "Select a category:")?;
        writeln!(self.output)?;
        let names: Vec<&String> = stats.categories.keys().collect();
        for (number, (name, counts)) in stats.categories.iter().enumerate() {
            writeln!(self.output, "{}. {name} ({} questions)", number + 1, counts.total)?;
        }
        writeln!(self.output)?;

        let Some(choice) = self.prompt("Choice: ")? else {
            return Ok(());
        };
        let picked = choice
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| names.get(index));
        match picked {
            Some(name) => {
                let category = (*name).clone();
                self.practice(PracticeSelection::Category(category)).await
            }
            None => {
                writeln!(self.output, "Invalid choice!")?;
                self.pause()
            }
        }
    }

    async fn view_all(&mut self) -> anyhow::Result<()> {
        let questions = self
            .services
            .query()
            .list(&QuestionFilter::all())
            .await?;

        self.clear()?;
        if questions.is_empty() {
            writeln!(self.output, "No questions found!")?;
            return self.pause();
        }

        writeln!(self.output, "All Questions")?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output)?;
        for entry in &questions {
            render::write_question_line(&mut self.output, entry)?;
            writeln!(self.output)?;
        }
        self.pause()
    }

    async fn reset(&mut self) -> anyhow::Result<()> {
        let answer = self.prompt("Are you sure you want to reset all progress? (yes/no): ")?;
        if answer.is_some_and(|a| a.eq_ignore_ascii_case("yes")) {
            self.services.progress().reset_all().await?;
            writeln!(self.output, "Progress reset successfully!")?;
        } else {
            writeln!(self.output, "Reset cancelled.")?;
        }
        self.pause()
    }

    async fn statistics(&mut self) -> anyhow::Result<()> {
        let stats = self.services.query().stats().await?;
        self.clear()?;
        writeln!(self.output, "Statistics")?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output)?;
        render::write_stats(&mut self.output, &stats)?;
        self.pause()
    }

    /// Print `label` and read one trimmed line; `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn pause(&mut self) -> anyhow::Result<()> {
        self.prompt("\nPress Enter to continue...")?;
        Ok(())
    }

    fn clear(&mut self) -> std::io::Result<()> {
        if self.clear_screen {
            write!(self.output, "{CLEAR_SCREEN}")?;
        }
        Ok(())
    }
}
