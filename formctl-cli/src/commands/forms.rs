//! Forms command - work with stored forms without running the server
//!
//! Reads and writes go through the same `UnitOfWork` and validator as the
//! HTTP API, and `--json` output uses the API's wire shapes.

use std::fmt::Write as _;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use formctl_core::{Form, FormId};
use formctl_server::db::{self, UnitOfWork};
use formctl_server::http::routes::forms::{FormResponse, FormSummaryResponse, CREATED_MESSAGE};
use formctl_server::models::FormSubmission;

use super::{load_config, resolve_database_url};

#[derive(Parser, Debug)]
pub struct FormsArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: FormsCommand,
}

#[derive(Subcommand, Debug)]
pub enum FormsCommand {
    /// List forms, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Preview a form and its fields
    Show {
        /// Form ID
        id: FormId,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a form from a JSON definition
    ///
    /// The document has the same shape as the POST /api/formapi/create body:
    ///   {"title": "Survey", "fields": [{"label": "Country", "options": "US,CA",
    ///    "selectedOption": "US", "isRequired": true}]}
    Create {
        /// Path to the JSON definition ("-" reads stdin)
        #[arg(long, short = 'f', value_name = "PATH")]
        file: PathBuf,
    },
}

pub async fn run_forms(args: FormsArgs) -> Result<()> {
    let config = load_config()?;
    let database_url = resolve_database_url(args.database_url, &config);

    let pool = db::open(&database_url)
        .await
        .with_context(|| format!("Failed to open database {database_url}"))?;
    let mut uow = UnitOfWork::new(pool);

    match args.command {
        FormsCommand::List { json } => {
            let forms = uow.forms().get_all_forms().await.context("Failed to load forms")?;
            if json {
                let out: Vec<FormSummaryResponse> = forms.into_iter().map(Into::into).collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else if forms.is_empty() {
                println!("No forms yet.");
            } else {
                for form in &forms {
                    println!(
                        "{:>6}  {}  {}",
                        form.id.unwrap_or_default(),
                        form.created_at.format("%Y-%m-%d %H:%M"),
                        form.title
                    );
                }
            }
        }
        FormsCommand::Show { id, json } => {
            let Some(form) = uow.forms().get_form_by_id(id).await.context("Failed to load form")?
            else {
                bail!("form {id} not found");
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&FormResponse::from(form))?);
            } else {
                print!("{}", render_preview(&form));
            }
        }
        FormsCommand::Create { file } => {
            let raw = read_source(&file)?;
            let submission: FormSubmission =
                serde_json::from_str(&raw).context("Form definition is not valid JSON")?;
            let form = submission.into_form(Utc::now())?;

            let form_id = uow
                .create_form_atomic(&form)
                .await
                .context("Failed to create form")?;
            println!("{CREATED_MESSAGE} (id {form_id})");
        }
    }

    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read form definition from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Text preview: one block per field, required fields starred, selected option
/// marked with `(x)`.
fn render_preview(form: &Form) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", form.title, form.id.unwrap_or_default());

    if form.fields.is_empty() {
        let _ = writeln!(out, "  (no fields)");
        return out;
    }

    for field in &form.fields {
        let required = if field.is_required { " *" } else { "" };
        let _ = writeln!(out, "  {}{}", field.label, required);
        for option in &field.options {
            let mark = if *option == field.selected_option { "x" } else { " " };
            let _ = writeln!(out, "    ({mark}) {option}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use formctl_core::{Field, OptionSet};

    #[test]
    fn preview_marks_required_and_selected() {
        let mut form = Form::with_id(4, "Survey", Utc::now());
        form.add_field(Field::new("Country", OptionSet::parse("US,CA"), "CA", true));
        form.add_field(Field::new("Pet", OptionSet::parse("Cat"), "", false));

        assert_eq!(
            render_preview(&form),
            "Survey (#4)\n  Country *\n    ( ) US\n    (x) CA\n  Pet\n    ( ) Cat\n"
        );
    }

    #[test]
    fn preview_of_form_without_fields() {
        let form = Form::with_id(1, "Empty", Utc::now());
        assert_eq!(render_preview(&form), "Empty (#1)\n  (no fields)\n");
    }
}
