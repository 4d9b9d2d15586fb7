//! The audit report written after a lottery: the draft order with odds, followed by the particulars
//! of the run needed to reproduce or scrutinise it.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use chrono::{DateTime, Local};
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;

use crate::lottery::Lottery;
use crate::print::{tabulate_draft, tabulate_odds};
use crate::scheme::SchemeKind;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the modules that build the pool, draw from it and derive the odds. Appended to every
/// report.
pub const ENGINE_SOURCES: [(&str, &str); 3] = [
    ("pool.rs", include_str!("pool.rs")),
    ("draw.rs", include_str!("draw.rs")),
    ("odds.rs", include_str!("odds.rs")),
];

#[derive(Debug, Clone, PartialEq)]
pub struct AuditInfo {
    pub league_name: String,
    pub num_teams: usize,
    pub scheme: SchemeKind,
    pub total_balls: u64,
    pub seed: u64,
    pub generated_at: DateTime<Local>,
    pub saved_at: DateTime<Local>,
    pub runtime: Duration,
    pub generated_by: String,
}

impl Display for AuditInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "League Name: {}", self.league_name)?;
        writeln!(f, "Number of Teams: {}", self.num_teams)?;
        writeln!(f, "Distribution Type: {}", self.scheme)?;
        writeln!(f, "Total Balls in Generation: {}", self.total_balls)?;
        writeln!(f, "Random Seed: {}", self.seed)?;
        writeln!(f, "Time of Generation: {}", self.generated_at.format(TIMESTAMP_FORMAT))?;
        writeln!(f, "Time of File Save: {}", self.saved_at.format(TIMESTAMP_FORMAT))?;
        writeln!(f, "Runtime Duration: {:.2} seconds", self.runtime.as_secs_f64())?;
        writeln!(f, "Generated by: {}", self.generated_by)
    }
}

/// The user running the lottery, as far as the environment reveals it.
pub fn current_user() -> String {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|user| !user.is_empty()))
        .unwrap_or_else(|| "unknown".into())
}

/// Renders the complete report as plain text.
pub fn render(lottery: &Lottery, info: &AuditInfo) -> String {
    let console = Console::default();
    let draft = console.render(&tabulate_draft(lottery));
    let odds = console.render(&tabulate_odds(
        lottery.participants(),
        lottery.weights(),
        &lottery.odds().exact,
    ));

    let mut report = String::new();
    report.push_str(&format!("{draft}\n\n"));
    report.push_str("Additional Information:\n");
    report.push_str(&info.to_string());
    report.push_str("\nOdds of every manager landing every pick:\n");
    report.push_str(&format!("{odds}\n"));
    if !lottery.diagnostics().is_empty() {
        report.push_str("\nOdds diagnostics:\n");
        for breach in lottery.diagnostics() {
            report.push_str(&format!("  {breach}\n"));
        }
    }
    report.push_str(
        "\nThis draft order was generated fairly: balls were drawn uniformly at random, and every \
         ball belonging to a drafted manager was removed before the next pick. \"Odds of 1st \
         Overall\" is each manager's share of the balls. \"Odds of This Pick\" is the exact \
         probability of the manager landing the pick they received. Rerunning with the same \
         league and random seed reproduces this order.\n",
    );
    report.push_str("\nSource code of the lottery engine:\n");
    for (file, source) in ENGINE_SOURCES {
        report.push_str(&format!("\n===== {file} =====\n{source}"));
    }
    report
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tinyrand::{Seeded, Wyrand};

    use super::*;
    use crate::lottery::run;
    use crate::participant::participants;
    use crate::scheme::{resolve, DistributionScheme};

    fn info(total_balls: u64) -> AuditInfo {
        let generated_at = Local.with_ymd_and_hms(2024, 8, 1, 19, 30, 0).unwrap();
        AuditInfo {
            league_name: "Dynasty".into(),
            num_teams: 4,
            scheme: SchemeKind::Weighted,
            total_balls,
            seed: 1234,
            generated_at,
            saved_at: generated_at + chrono::Duration::seconds(9),
            runtime: Duration::from_millis(8_250),
            generated_by: "commish".into(),
        }
    }

    #[test]
    fn audit_info_lines() {
        let text = info(10).to_string();
        assert_eq!(
            "League Name: Dynasty\n\
             Number of Teams: 4\n\
             Distribution Type: weighted\n\
             Total Balls in Generation: 10\n\
             Random Seed: 1234\n\
             Time of Generation: 2024-08-01 19:30:00\n\
             Time of File Save: 2024-08-01 19:30:09\n\
             Runtime Duration: 8.25 seconds\n\
             Generated by: commish\n",
            text
        );
    }

    #[test]
    fn render_contains_all_sections() {
        let league = participants(&["Ann", "Ben", "Cat", "Dan"]);
        let resolved = resolve(&DistributionScheme::Weighted, &league).unwrap();
        let lottery = run(&resolved, &mut Wyrand::seed(1234)).unwrap();
        let report = render(&lottery, &info(lottery.total_weight()));
        assert!(report.contains("Odds of 1st Overall"));
        assert!(report.contains("Additional Information:"));
        assert!(report.contains("Total Balls in Generation: 10"));
        assert!(report.contains("Pick 4"));
        assert!(report.contains("generated fairly"));
        assert!(!report.contains("Odds diagnostics"));
        assert!(report.contains("===== pool.rs ====="));
        assert!(report.contains("pub fn exact(weights: &[Weight]) -> Matrix<f64>"));
        assert!(report.contains("pub fn draw_into("));
    }

    #[test]
    fn current_user_never_blank() {
        assert!(!current_user().is_empty());
    }
}
