use crate::infra::parse_date;
use chrono::{Local, NaiveDate};
use clap::Args;
use cpa_intake::error::AppError;
use cpa_intake::wizard::view::review_lines;
use cpa_intake::wizard::{
    Complexity, ContactPreference, DetailsForm, GeneralAnswers, Situation, Timeline,
    WizardSession,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct SummaryArgs {
    /// Situation key, e.g. personal_taxes or business_taxes
    #[arg(long)]
    pub(crate) situation: Situation,
    /// Timeline key, e.g. immediately or gathering_information
    #[arg(long)]
    pub(crate) timeline: Timeline,
    /// Perceived complexity from 1 (simple) to 5 (very complex)
    #[arg(long, value_parser = parse_complexity)]
    pub(crate) complexity: Complexity,
    /// Preferred contact method key, e.g. email or video_call
    #[arg(long)]
    pub(crate) contact: ContactPreference,
    /// Main concern or question, free text
    #[arg(long)]
    pub(crate) main_concern: Option<String>,
    #[arg(long)]
    pub(crate) email: Option<String>,
    #[arg(long)]
    pub(crate) phone: Option<String>,
    /// Summary date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Directory the PDF is written into
    #[arg(long, default_value = ".")]
    pub(crate) output_dir: PathBuf,
}

fn parse_complexity(raw: &str) -> Result<Complexity, String> {
    let level = raw
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("'{raw}' is not a whole number"))?;
    Complexity::new(level).map_err(|err| err.to_string())
}

pub(crate) fn run_summary(args: SummaryArgs) -> Result<(), AppError> {
    let path = write_summary(args)?;
    println!("Summary written to {}", path.display());
    Ok(())
}

/// Drives a fresh wizard session through all three screens and writes the PDF.
fn write_summary(args: SummaryArgs) -> Result<PathBuf, AppError> {
    let SummaryArgs {
        situation,
        timeline,
        complexity,
        contact,
        main_concern,
        email,
        phone,
        date,
        output_dir,
    } = args;

    let mut session = WizardSession::new();
    session.submit_general(GeneralAnswers {
        situation,
        timeline,
        complexity,
    })?;
    session.submit_details(DetailsForm {
        main_concern: main_concern.unwrap_or_default(),
        contact_pref: contact,
        email: email.unwrap_or_default(),
        phone: phone.unwrap_or_default(),
        interest_confirm: true,
    })?;

    if let Some(record) = session.record() {
        for line in review_lines(&record) {
            println!("{}: {}", line.label, line.value);
        }
    }

    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let summary = session.generate(date)?;
    let path = output_path(&output_dir, &summary.file_name);
    fs::create_dir_all(&output_dir)?;
    fs::write(&path, &summary.bytes)?;

    info!(path = %path.display(), bytes = summary.bytes.len(), "interest summary written");
    Ok(path)
}

fn output_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(file_name)
}
