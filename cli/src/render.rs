use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use mdig::AuthorityOutcome;
use mdig::LevelResult;

/// Ways of printing a finished trace.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// One indented block per level
    #[default]
    Tree,
    /// The raw results as JSON
    Json,
}

impl OutputFormat {
    pub fn render(self, domain: &str, results: &[LevelResult], out: &mut impl Write) -> Result<()> {
        match self {
            OutputFormat::Tree => render_tree(domain, results, out),
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, results)?;
                writeln!(out)?;
                Ok(())
            }
        }
    }
}

fn render_tree(domain: &str, results: &[LevelResult], out: &mut impl Write) -> Result<()> {
    writeln!(out, "Tracing DNS for domain: {domain}")?;
    for result in results {
        render_level(result, out)?;
    }
    Ok(())
}

fn render_level(result: &LevelResult, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Level {}: {}", result.level, result.domain)?;
    if let Some(error) = &result.error {
        writeln!(out, "  ! Error: {error}")?;
    }

    // Outcomes arrive in completion order.
    let mut authorities: Vec<&AuthorityOutcome> = result.authorities.iter().collect();
    authorities.sort_by(|a, b| (&a.hostname, a.address).cmp(&(&b.hostname, b.address)));

    for auth in authorities {
        writeln!(out, "  ├─ NS: {}", auth.hostname)?;
        match auth.address {
            Some(address) => writeln!(out, "  │   ├─ NS IP: {address}")?,
            None => writeln!(out, "  │   ├─ NS IP: <none>")?,
        }

        writeln!(out, "  │   ├─ Responses:")?;
        if auth.responses.is_empty() {
            writeln!(out, "  │   │   ├─ No responses found")?;
        }
        for response in &auth.responses {
            writeln!(out, "  │   │   ├─ {response}")?;
        }

        if let Some(error) = &auth.error {
            writeln!(out, "  │       ├─ {error}")?;
        }
    }
    writeln!(out, "───")?;
    Ok(())
}
