use console::Style;
use crate::score::{Finding, ScoreResult};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStyle {
    /// Label-aligned block, for logs.
    Plain,
    /// Table with a bold pass row, for the check body.
    Markdown,
}

pub fn render_summary(result: &ScoreResult, style: SummaryStyle) -> String {
    match style {
        SummaryStyle::Markdown => format!(
            "## Mutations summary\n\
             | Measure       | Value |\n\
             | :---          |  ---: |\n\
             | Total         | {} |\n\
             | Killed        | {} |\n\
             | Survived      | {} |\n\
             | No coverage   | {} |\n\
             | Test strength | {}% |\n\
             | Threshold     | {}% |\n\
             | **Pass**      | **{}** |",
            result.count,
            result.killed,
            result.survived,
            result.no_coverage,
            result.test_strength,
            result.threshold,
            result.pass,
        ),
        SummaryStyle::Plain => format!(
            "Mutations summary:\n\
             \x20 Total:          {}\n\
             \x20 Killed:         {}\n\
             \x20 Survived:       {}\n\
             \x20 No coverage:    {}\n\
             \x20 Test strength:  {}%\n\
             \x20 Threshold:      {}%\n\
             \x20 Pass:           {}",
            result.count,
            result.killed,
            result.survived,
            result.no_coverage,
            result.test_strength,
            result.threshold,
            result.pass,
        ),
    }
}

pub fn print_error(msg: &str) {
    let style = Style::new().red().bold();
    eprintln!("{} {}", style.apply_to("✗"), msg);
}

/// Local, human-readable rendering of a score, listing at most `max_findings` findings.
pub fn print_score_result(result: &ScoreResult, report: &Path, max_findings: usize) {
    let covered = result.count - result.no_coverage;

    if result.pass {
        let style = Style::new().green().bold();
        println!(
            "{} {}: test strength {}% over {} covered mutants (threshold {}%)",
            style.apply_to("✓"),
            report.display(),
            result.test_strength,
            covered,
            result.threshold,
        );
    } else {
        let style = Style::new().red().bold();
        println!(
            "{} {}: test strength {}% over {} covered mutants is below the {}% threshold",
            style.apply_to("✗"),
            report.display(),
            result.test_strength,
            covered,
            result.threshold,
        );
    }

    let dim = Style::new().dim();
    println!(
        "  {} {} total, {} killed, {} survived, {} without coverage",
        dim.apply_to("·"),
        result.count,
        result.killed,
        result.survived,
        result.no_coverage,
    );

    if result.findings.is_empty() {
        return;
    }

    println!();
    for finding in result.findings.iter().take(max_findings) {
        print_finding(finding);
    }
    let hidden = result.findings.len().saturating_sub(max_findings);
    if hidden > 0 {
        println!();
        println!("  {} {} more undetected mutants not shown", dim.apply_to("·"), hidden);
    }
}

fn print_finding(finding: &Finding) {
    let status_style = Style::new().yellow().bold();
    let loc_style = Style::new().cyan();
    let dim = Style::new().dim();

    println!(
        "  {} {}:{} {} {}",
        status_style.apply_to(finding.status.as_str()),
        loc_style.apply_to(&finding.file),
        finding.line,
        dim.apply_to(format!("[{}::{}]", finding.class, finding.method)),
        finding.info,
    );
}
