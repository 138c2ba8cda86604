use anyhow::Result;
use issuechat_core::{Analyzer, Config};
use tokio::runtime::Runtime;

use crate::output::print_json;

/// One-shot analysis for scripting: print the verdict and exit.
pub fn run(config: Config, message: &str, json: bool) -> Result<()> {
    let rt = Runtime::new()?;
    let analyzer = Analyzer::new(config.completions_client(), config.generation_params());
    let analysis = rt.block_on(analyzer.analyze(message))?;

    if json {
        return print_json(&analysis);
    }

    if analysis.should_create_issue {
        println!("Issue-worthy: yes ({})", analysis.issue_type);
        println!("Title: {}", analysis.title);
        println!("Labels: {}", analysis.labels.join(", "));
        println!("Reasoning: {}", analysis.reasoning);
    } else {
        println!("Issue-worthy: no");
        if !analysis.reasoning.is_empty() {
            println!("Reasoning: {}", analysis.reasoning);
        }
    }
    Ok(())
}
