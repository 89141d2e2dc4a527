//! Tournament command implementation.

use super::output::{JsonTournamentResult, format_tournament_csv, format_tournament_text};
use super::{CliError, TournamentFormat, seed_or_clock};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use terrachess::Mode;
use terrachess::tournament::{MatchConfig, run_tournament_with};

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if the progress bar template or JSON output fails.
pub(crate) fn execute(
    mode: Mode,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    max_turns: Option<u32>,
    format: TournamentFormat,
    progress: bool,
) -> Result<(), CliError> {
    if let Some(num_threads) = threads
        && let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(num_threads).build_global()
    {
        log::warn!("keeping the existing rayon pool: {e}");
    }

    let base_seed = seed_or_clock(seed);

    let mut config = MatchConfig {
        mode,
        ..MatchConfig::default()
    };
    if let Some(t) = max_turns {
        config.max_turns = t;
    }

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let summary = run_tournament_with(base_seed, games, &config, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let secs = start.elapsed().as_secs_f64();
    #[allow(clippy::cast_precision_loss)]
    let rate = if secs > 0.0 { summary.games_played as f64 / secs } else { 0.0 };

    match format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&summary, mode));
            println!();
            println!("Duration: {secs:.2}s ({rate:.1} matches/sec)");
        }
        TournamentFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonTournamentResult::from_summary(&summary, mode))
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        TournamentFormat::Csv => {
            print!("{}", format_tournament_csv(&summary, mode));
        }
    }

    Ok(())
}
