use std::io::{self, Write};

use anyhow::Result;
use issuechat_core::{
    parse_repository, Config, Improver, IssueDraft, IssueType, Publisher, Session, Turn,
};
use tokio::runtime::Runtime;

// ---------------------------------------------------------------------------
// REPL
// ---------------------------------------------------------------------------

/// Run the interactive chat loop. One input is processed to completion
/// (including every sub-prompt) before the next is read; a failed turn
/// reports and returns to the prompt.
pub fn run(config: Config) -> Result<()> {
    let rt = Runtime::new()?;

    let mut session = Session::new(config.completions_client(), config.generation_params());
    let improver = Improver::new(config.completions_client(), config.generation_params());
    let publisher = Publisher::new(config.issues_client());

    println!("issuechat — type 'help' for commands, 'exit' to leave.");

    loop {
        let Some(line) = read_line("\nyou> ")? else {
            break; // EOF
        };
        if line.trim().is_empty() {
            continue;
        }

        match rt.block_on(session.handle(&line)) {
            Turn::Exit => break,
            Turn::Reply(text) => println!("{text}"),
            Turn::Review(draft) => {
                review_and_publish(&rt, &mut session, &improver, &publisher, draft)?;
            }
            Turn::ManualDraft => match collect_manual_draft()? {
                Some(draft) => {
                    review_and_publish(&rt, &mut session, &improver, &publisher, draft)?;
                }
                None => println!("Cancelled."),
            },
        }
    }

    println!("Bye!");
    Ok(())
}

// ---------------------------------------------------------------------------
// Review flow
// ---------------------------------------------------------------------------

/// Shared review path for analyzer drafts and manual drafts: per-field edit
/// prompts (empty keeps the suggestion), an opt-in improvement round, a final
/// summary, and an explicit yes/no gate before anything is published.
fn review_and_publish(
    rt: &Runtime,
    session: &mut Session,
    improver: &Improver,
    publisher: &Publisher,
    mut draft: IssueDraft,
) -> Result<()> {
    println!("\nThat sounds issue-worthy ({}). Suggested draft:", draft.issue_type);
    if !draft.reasoning.is_empty() {
        println!("  ({})", draft.reasoning);
    }
    println!("Press Enter to keep a suggestion, or type a replacement.");

    if let Some(title) = prompt_override("Title", &draft.title)? {
        draft.title = title;
    }
    if let Some(description) = prompt_override("Description", &draft.description)? {
        draft.description = description;
    }
    if let Some(labels) = prompt_override("Labels", &draft.labels.join(", "))? {
        draft.labels = split_labels(&labels);
    }

    if confirm("Ask the model to improve this draft?")? {
        match rt.block_on(improver.improve_lenient(&draft)) {
            Some(improvement) => {
                println!("\nSuggested improvements ({}):", improvement.changes_summary);
                println!("  Title: {}", improvement.improved_title);
                println!("  Labels: {}", improvement.suggested_labels.join(", "));
                println!("  Description:\n{}", indent(&improvement.improved_description));
                if confirm("Apply these improvements?")? {
                    draft.apply_improvement(&improvement);
                }
            }
            None => println!("Improvement unavailable right now; keeping your draft."),
        }
    }

    let Some(repository) = resolve_repository(session)? else {
        println!("Cancelled.");
        session.note("Issue draft discarded.");
        return Ok(());
    };

    println!("\nAbout to create in {repository}:");
    println!("  Type: {}", draft.issue_type);
    println!("  Title: {}", draft.title);
    println!("  Labels: {}", draft.labels.join(", "));
    println!("  Description:\n{}", indent(&draft.description));

    if !confirm("Create this issue?")? {
        println!("Cancelled.");
        session.note("Issue draft discarded.");
        return Ok(());
    }

    let result = rt.block_on(publisher.publish_draft(&repository, &draft));
    if result.success {
        let number = result.issue_number.unwrap_or_default();
        let url = result.issue_url.unwrap_or_default();
        println!("Created issue #{number} — {url}");
        session.note(format!("Created issue #{number} in {repository}: {url}"));
    } else {
        let error = result.error.unwrap_or_else(|| "unknown error".to_string());
        println!("Failed to create issue: {error}");
        session.note(format!("Issue creation in {repository} failed: {error}"));
    }

    Ok(())
}

/// The default repository if one is set, otherwise prompt for one. Empty
/// input cancels. Re-prompts until the input parses as `owner/repo`.
fn resolve_repository(session: &Session) -> Result<Option<String>> {
    if let Some(repository) = session.default_repository() {
        return Ok(Some(repository.to_string()));
    }

    loop {
        let Some(input) = read_line("Repository (owner/repo, empty to cancel): ")? else {
            return Ok(None);
        };
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        match parse_repository(input) {
            Ok((owner, repo)) => return Ok(Some(format!("{owner}/{repo}"))),
            Err(e) => println!("{e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Manual collection
// ---------------------------------------------------------------------------

/// Sequentially prompt for the fields of a manual issue draft.
/// Returns `None` if the user aborts (EOF or an empty required field).
fn collect_manual_draft() -> Result<Option<IssueDraft>> {
    println!("\nLet's file an issue. Empty title or description cancels.");

    let type_names: Vec<&str> = IssueType::all().iter().map(|t| t.as_str()).collect();
    let Some(type_input) = read_line(&format!("Type ({}): ", type_names.join("/")))? else {
        return Ok(None);
    };
    let issue_type: IssueType = type_input.parse().unwrap_or(IssueType::General);

    let Some(title) = read_line("Title: ")? else {
        return Ok(None);
    };
    let title = title.trim().to_string();
    if title.is_empty() {
        return Ok(None);
    }

    let Some(description) = read_line("Description: ")? else {
        return Ok(None);
    };
    let description = description.trim().to_string();
    if description.is_empty() {
        return Ok(None);
    }

    let Some(labels) = read_line("Labels (comma-separated, optional): ")? else {
        return Ok(None);
    };

    Ok(Some(IssueDraft {
        issue_type,
        title,
        description,
        labels: split_labels(&labels),
        reasoning: String::new(),
    }))
}

// ---------------------------------------------------------------------------
// Prompt helpers
// ---------------------------------------------------------------------------

/// Read one line after printing `prompt`. `None` means EOF.
fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end().to_string()))
}

/// Show the current value and read a replacement; empty input (or EOF) keeps
/// the current value.
fn prompt_override(label: &str, current: &str) -> Result<Option<String>> {
    println!("\n{label}: {current}");
    let Some(input) = read_line(&format!("{label} override: "))? else {
        return Ok(None);
    };
    let input = input.trim();
    if input.is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.to_string()))
    }
}

/// Explicit yes/no gate. Only `y`/`yes` count as yes; EOF counts as no.
fn confirm(question: &str) -> Result<bool> {
    let Some(answer) = read_line(&format!("{question} [y/N]: "))? else {
        return Ok(false);
    };
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn split_labels(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
