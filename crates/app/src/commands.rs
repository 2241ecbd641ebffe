use std::io::Write;

use prep_core::model::{QuestionDraft, QuestionFilter, QuestionId, QuestionPatch, TrackedQuestion};
use serde_json::json;
use services::{AppServices, QuestionServiceError};

use crate::cli::StoreCommand;
use crate::render;

pub const SUCCESS: u8 = 0;
pub const NOT_FOUND: u8 = 1;
pub const DECLINED: u8 = 1;

/// Run a one-shot store command, writing its result to `out`.
///
/// A missing question is reported and mapped to `NOT_FOUND`; storage
/// failures are returned as errors for the caller to report.
///
/// # Errors
///
/// Returns an error if a store cannot be read or written, or `out` fails.
pub async fn run(
    command: StoreCommand,
    services: &AppServices,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<u8> {
    match command {
        StoreCommand::List {
            category,
            unanswered,
        } => {
            let filter = QuestionFilter::new(category.as_deref(), unanswered);
            let questions = services.query().list(&filter).await?;
            if json {
                print_json(out, &questions)?;
            } else if questions.is_empty() {
                writeln!(out, "No questions found!")?;
            } else {
                for entry in &questions {
                    render::write_question_line(out, entry)?;
                }
            }
        }
        StoreCommand::Categories => {
            let categories = services.query().categories().await?;
            if json {
                print_json(out, &categories)?;
            } else {
                for category in &categories {
                    writeln!(out, "{category}")?;
                }
            }
        }
        StoreCommand::Stats => {
            let stats = services.query().stats().await?;
            if json {
                print_json(out, &stats)?;
            } else {
                render::write_stats(out, &stats)?;
            }
        }
        StoreCommand::Show { id } => {
            let Some(entry) = tracked(services, id).await? else {
                return Ok(not_found(id));
            };
            if json {
                print_json(out, &entry)?;
            } else {
                writeln!(out, "{} Question {}", render::status_mark(entry.answered), id)?;
                render::write_question_detail(out, &entry)?;
            }
        }
        StoreCommand::Add {
            question,
            category,
            hint,
        } => {
            let draft = QuestionDraft {
                category,
                question: Some(question),
                hint,
            };
            let added = services.questions().add(draft).await?;
            let answered = services.progress().get(added.id()).await?;
            let entry = TrackedQuestion::new(added, answered);
            if json {
                print_json(out, &entry)?;
            } else {
                writeln!(out, "Added question {}", entry.question.id())?;
            }
        }
        StoreCommand::Update {
            id,
            category,
            question,
            hint,
        } => {
            let patch = QuestionPatch {
                category,
                question,
                hint,
            };
            let updated = match services.questions().update(id, patch).await {
                Ok(updated) => updated,
                Err(QuestionServiceError::NotFound(_)) => return Ok(not_found(id)),
                Err(err) => return Err(err.into()),
            };
            let answered = services.progress().get(id).await?;
            let entry = TrackedQuestion::new(updated, answered);
            if json {
                print_json(out, &entry)?;
            } else {
                writeln!(out, "Updated question {id}")?;
            }
        }
        StoreCommand::Delete { id } => {
            let removed = services.questions().delete(id).await?;
            if json {
                print_json(out, &json!({ "success": true, "deleted": removed }))?;
            } else if removed {
                writeln!(out, "Deleted question {id}")?;
            } else {
                writeln!(out, "Question {id} not found; nothing deleted")?;
            }
        }
        StoreCommand::Toggle { id } => {
            let answered = services.progress().toggle(id).await?;
            if json {
                print_json(out, &json!({ "success": true, "answered": answered }))?;
            } else {
                let state = if answered { "answered" } else { "unanswered" };
                writeln!(out, "Question {id} is now {state}")?;
            }
        }
        StoreCommand::Reset { yes } => {
            if !yes {
                eprintln!("refusing to reset progress without --yes");
                return Ok(DECLINED);
            }
            services.progress().reset_all().await?;
            if json {
                print_json(out, &json!({ "success": true }))?;
            } else {
                writeln!(out, "Progress reset successfully!")?;
            }
        }
    }
    Ok(SUCCESS)
}

async fn tracked(
    services: &AppServices,
    id: QuestionId,
) -> anyhow::Result<Option<TrackedQuestion>> {
    match services.questions().get(id).await {
        Ok(question) => {
            let answered = services.progress().get(id).await?;
            Ok(Some(TrackedQuestion::new(question, answered)))
        }
        Err(QuestionServiceError::NotFound(_)) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn not_found(id: QuestionId) -> u8 {
    eprintln!("Question {id} not found");
    NOT_FOUND
}

fn print_json(out: &mut impl Write, value: &impl serde::Serialize) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
