use std::path::Path;
use std::sync::Arc;

use eyre::Result;
use ovaware_assessment::{
    ResultSink, ResultsView, StepFormController, SubmissionCoordinator, SubmitStatus,
    ValidationScope,
};
use ovaware_cli::answers::load_answers;
use ovaware_cli::config::{self, OvawareConfig};
use ovaware_cli::report;
use ovaware_core::QuestionnaireRecord;
use ovaware_history::HistoryStore;

fn history_store(config: &OvawareConfig) -> Result<HistoryStore> {
    match &config.history_dir {
        Some(dir) => Ok(HistoryStore::in_dir(dir)),
        None => Ok(HistoryStore::open_default()?),
    }
}

/// Walk the form with the answers file, submit, and print the result.
pub async fn assess(
    config: &OvawareConfig,
    answers_path: &Path,
    scope: Option<ValidationScope>,
) -> Result<()> {
    let answers = load_answers(answers_path)?;
    let collaborator = config.scorer.build()?;
    let sink = Arc::new(ResultSink::new());
    let coordinator = SubmissionCoordinator::new(collaborator, sink.clone());
    let mut wizard =
        StepFormController::for_coordinator(QuestionnaireRecord::default(), &coordinator)
            .with_scope(scope.unwrap_or(config.validation_scope));

    tracing::info!(
        answers = answers.len(),
        scorer = %config::describe_scorer(&config.scorer),
        scope = ?wizard.scope(),
        "starting assessment"
    );

    loop {
        let progress = wizard.progress();
        println!(
            "Step {} of {}: {} ({:.0}%)",
            progress.step, progress.total, progress.title, progress.percent
        );

        for (path, value) in answers.for_step(wizard.current_step()) {
            wizard.set_field(path, value.clone())?;
        }

        if wizard.is_last_step() {
            break;
        }
        if !wizard.advance() {
            eprintln!("Cannot continue past {}:", progress.title);
            eprint!("{}", report::render_field_errors(wizard.errors()));
            return Err(eyre::eyre!("answers failed validation"));
        }
    }

    println!("Submitting...");
    match wizard.submit(&coordinator).await {
        SubmitStatus::Completed(_) => {}
        SubmitStatus::Failed(failure) => {
            eprintln!("{}", failure.message);
            eprint!("{}", report::render_field_errors(&failure.field_errors));
            return Err(eyre::eyre!("assessment failed ({})", failure.kind));
        }
        SubmitStatus::Rejected => {
            eprint!("{}", report::render_field_errors(wizard.errors()));
            return Err(eyre::eyre!("assessment was not submitted"));
        }
    }

    let ResultsView::Ready(assessment) = ResultsView::resolve(&sink) else {
        return Err(eyre::eyre!("no assessment result available"));
    };
    println!();
    print!("{}", report::render_assessment(&assessment));

    let saved = history_store(config).and_then(|store| {
        store
            .record(wizard.values(), &assessment)
            .map_err(eyre::Report::from)
    });
    match saved {
        Ok(entry) => tracing::debug!(id = %entry.id, "saved to history"),
        Err(e) => tracing::warn!(error = %e, "could not save assessment to history"),
    }

    Ok(())
}

pub fn history(config: &OvawareConfig, limit: usize, clear: bool) -> Result<()> {
    let store = history_store(config)?;

    if clear {
        store.clear()?;
        println!("History cleared.");
        return Ok(());
    }

    let entries = store.load()?;
    if entries.is_empty() {
        println!("No assessments yet.");
        return Ok(());
    }
    for entry in entries.iter().take(limit) {
        println!("{}", report::render_history_line(entry));
    }
    if entries.len() > limit {
        println!("... {} older", entries.len() - limit);
    }
    Ok(())
}

pub fn config_show(path: &Path) -> Result<()> {
    let config = config::load_config(path)?;
    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

pub fn config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(eyre::eyre!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        ));
    }
    config::save_config(path, &OvawareConfig::default())?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
