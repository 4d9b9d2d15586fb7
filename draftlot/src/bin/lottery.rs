use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use chrono::Local;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tinyrand::{Rand, Seeded, Wyrand};
use tinyrand_std::clock_seed::ClockSeed;
use tracing::{debug, info, warn};

use draftlot::enumerate::{exact_by_enumeration, MAX_ENUMERATED};
use draftlot::league::LeagueFile;
use draftlot::lottery::{run, Lottery};
use draftlot::mc::simulate;
use draftlot::print::{percent, tabulate_draft, tabulate_odds};
use draftlot::probs::SliceExt;
use draftlot::report::{current_user, render, AuditInfo};
use draftlot::scheme::{resolve, SchemeKind};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the league(s) from
    #[clap(short = 'f', long)]
    file: PathBuf,

    /// name of the league to draw for (defaults to the first)
    #[clap(short = 'l', long)]
    league: Option<String>,

    /// override the league's ball distribution
    #[clap(short = 's', long)]
    scheme: Option<SchemeKind>,

    /// fixed random seed
    #[clap(long)]
    seed: Option<u64>,

    /// audit the odds with a Monte Carlo simulation of this many trials
    #[clap(long)]
    simulate: Option<u64>,

    /// audit the odds by enumerating every draft order
    #[clap(long)]
    verify: bool,

    /// reveal the draft order one pick at a time, last pick first, pausing between picks
    #[clap(long)]
    reveal_delay: Option<f64>,

    /// file to write the report to
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if let Some(trials) = self.simulate {
            if trials == 0 {
                bail!("the number of simulated trials must be positive");
            }
        }
        if let Some(delay) = self.reveal_delay {
            if !delay.is_finite() || delay < 0.0 {
                bail!("the reveal delay must be a non-negative number of seconds");
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let start_time = Instant::now();
    let league = LeagueFile::load(&args.file)?.select(args.league.as_deref())?;
    let kind = args.scheme.unwrap_or(league.distribution);
    let resolved = resolve(&league.scheme_as(kind), &league.managers)
        .with_context(|| format!("cannot resolve the {kind} distribution for '{}'", league.name))?;
    info!(
        "league: {}, teams: {}, distribution: {kind}, total balls: {}",
        league.name,
        resolved.len(),
        resolved.total_weight()
    );

    let seed = args.seed.unwrap_or_else(|| ClockSeed::default().next_u64());
    info!("random seed: {seed}");
    let mut rand = Wyrand::seed(seed);
    let lottery = run(&resolved, &mut rand)?;
    let generated_at = Local::now();
    for breach in lottery.diagnostics() {
        warn!("{breach}");
    }
    debug!("exact odds:\n{}", lottery.odds().exact.verbose());

    if args.verify {
        verify(&lottery)?;
    }
    if let Some(trials) = args.simulate {
        let frequencies = simulate(&resolved, trials, &mut rand)?;
        let table = tabulate_odds(lottery.participants(), lottery.weights(), &frequencies);
        info!("simulated odds over {trials} trials:\n{}", Console::default().render(&table));
        let max_diff = lottery
            .odds()
            .exact
            .flatten()
            .max_abs_diff(frequencies.flatten());
        info!("largest deviation from exact odds: {}", percent(max_diff));
    }

    let lottery = Arc::new(lottery);
    if let Some(delay) = args.reveal_delay {
        let reveal = tokio::spawn(reveal(lottery.clone(), Duration::from_secs_f64(delay)));
        reveal.await?;
    }

    let table = tabulate_draft(&lottery);
    info!("draft order:\n{}", Console::default().render(&table));

    if let Some(output) = &args.output {
        let info = AuditInfo {
            league_name: league.name.clone(),
            num_teams: lottery.participants().len(),
            scheme: kind,
            total_balls: lottery.total_weight(),
            seed,
            generated_at,
            saved_at: Local::now(),
            runtime: start_time.elapsed(),
            generated_by: current_user(),
        };
        std::fs::write(output, render(&lottery, &info))
            .with_context(|| format!("cannot write report to {}", output.display()))?;
        info!("report saved to {}", output.display());
    }
    let elapsed = start_time.elapsed();
    debug!("took {:.3}s", elapsed.as_millis() as f64 / 1_000.);
    Ok(())
}

fn verify(lottery: &Lottery) -> anyhow::Result<()> {
    let participants = lottery.participants().len();
    if participants > MAX_ENUMERATED {
        bail!("cannot enumerate {participants} participants; at most {MAX_ENUMERATED} are supported");
    }
    let enumerated = exact_by_enumeration(lottery.weights());
    let max_diff = lottery.odds().exact.flatten().max_abs_diff(enumerated.flatten());
    info!("largest deviation from enumerated odds: {}", percent(max_diff));
    if max_diff > 0.001 {
        bail!("exact odds deviate from enumerated odds by {}", percent(max_diff));
    }
    Ok(())
}

async fn reveal(lottery: Arc<Lottery>, delay: Duration) {
    let entries = lottery.entries();
    for entry in entries.iter().rev() {
        tokio::time::sleep(delay).await;
        info!(
            "pick {}: {} ({} balls, {} odds of this pick)",
            entry.pick + 1,
            entry.participant,
            entry.weight,
            percent(entry.this_pick_odds)
        );
    }
}
