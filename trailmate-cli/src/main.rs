use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use trailmate_core::{
    CategoryRatings, QuestionnaireForm, RiskTier, TrekLog, TrekMode, assess, evaluate_badges, kit,
    leaderboard,
};
use trailmate_ingest::{parse_leaderboard_csv, parse_trek_csv};

mod config;
mod interview;
mod report;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "trailmate",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TRAILMATE_BUILD_SHA"), ")"),
    about = "TrailMate trek readiness scoring and trail recommendations"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Solo,
    Group,
}

impl From<ModeArg> for TrekMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Solo => TrekMode::Solo,
            ModeArg::Group => TrekMode::Group,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill in the questionnaire interactively, then score it
    Questionnaire {
        #[arg(long, value_enum, default_value_t = ModeArg::Solo)]
        mode: ModeArg,

        /// Also write the raw answers as JSON
        #[arg(long)]
        save_answers: Option<PathBuf>,
    },

    /// Score a saved answers file (JSON object of question key -> answer)
    Score {
        answers: PathBuf,

        #[arg(long, value_enum, default_value_t = ModeArg::Solo)]
        mode: ModeArg,

        /// Print the submission as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Category self-assessment, each rating 0-10
    Assess {
        #[arg(long, default_value_t = 0)]
        fitness: u32,
        #[arg(long, default_value_t = 0)]
        experience: u32,
        #[arg(long, default_value_t = 0)]
        gear: u32,
        #[arg(long, default_value_t = 0)]
        health: u32,
        #[arg(long, default_value_t = 0)]
        weather: u32,
    },

    /// Recommend trails for a readiness score or a risk tier
    Trails {
        #[arg(long, conflicts_with = "tier")]
        score: Option<u32>,

        /// low | moderate | high
        #[arg(long)]
        tier: Option<String>,

        /// Trail catalog TOML (overrides config)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Ten-essentials packing check
    Kit {
        /// Items packed, comma separated
        #[arg(long, value_delimiter = ',')]
        checked: Vec<String>,
    },

    /// Badge progress from a trek log, plus an optional leaderboard
    Badges {
        /// Trek log CSV
        #[arg(long)]
        log: Option<PathBuf>,

        /// Leaderboard CSV (name,treks)
        #[arg(long)]
        leaderboard: Option<PathBuf>,

        /// Emergency contact details are on file
        #[arg(long)]
        emergency_info: bool,
    },

    /// Manage ~/.trailmate/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("trailmate=info".parse().context("log directive")?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Questionnaire { mode, save_answers } => {
            let form = interview::run_interview(mode.into())?;
            if let Some(p) = save_answers {
                state::write_answers(&p, form.answers())?;
                println!("Saved answers to {}", p.display());
            }
            submit_form(&form, false)?;
        }

        Command::Score { answers, mode, json } => {
            let raw = state::read_answers(&answers)?;
            let mut form = QuestionnaireForm::new(mode.into());
            for (k, v) in raw.iter() {
                form.answer(k, v.clone());
            }
            submit_form(&form, json)?;
        }

        Command::Assess {
            fitness,
            experience,
            gear,
            health,
            weather,
        } => {
            let ratings = CategoryRatings::new(fitness, experience, gear, health, weather);
            report::print_assessment(&assess(&ratings));
        }

        Command::Trails {
            score,
            tier,
            catalog,
        } => {
            let cfg = config::load_config()?;
            let catalog = match catalog {
                Some(p) => trailmate_core::TrailCatalog::load(&p)?,
                None => cfg.catalog()?,
            };
            match (score, tier) {
                (Some(s), _) => {
                    let trails = catalog.recommend_by_score(s);
                    report::print_trails(&format!("Trails for score {}:", s), &trails);
                }
                (None, Some(t)) => {
                    let Some(tier) = RiskTier::parse(&t) else {
                        bail!("unknown tier {:?} (expected low, moderate or high)", t);
                    };
                    let trails = catalog.recommend_for_tier(tier);
                    report::print_trails(&format!("Trails for {}:", tier), &trails);
                }
                (None, None) => bail!("pass --score <0-100> or --tier <low|moderate|high>"),
            }
        }

        Command::Kit { checked } => {
            let checked: BTreeSet<String> = checked
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            println!("Packed {}/{} essentials", kit::coverage(&checked), kit::ESSENTIALS.len());
            for m in kit::missing(&checked) {
                println!("  missing: {}", m);
            }
            if kit::is_under_packed(&checked) {
                println!("\nUnder-packed: pack at least half of the essentials before you go.");
            }
        }

        Command::Badges {
            log,
            leaderboard: board,
            emergency_info,
        } => {
            let log = match log {
                Some(p) => {
                    let imported = parse_trek_csv(&p)?;
                    if !imported.skipped.is_empty() {
                        println!("Skipped {} row(s) in {}", imported.skipped.len(), p.display());
                    }
                    imported.into_log()
                }
                None => TrekLog::default(),
            };
            println!("Treks logged: {}\n", log.count());
            report::print_badges(&evaluate_badges(&log, emergency_info));

            if let Some(p) = board {
                let imported = parse_leaderboard_csv(&p)?;
                println!("\nLeaderboard");
                report::print_leaderboard(&leaderboard(imported.records));
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn submit_form(form: &QuestionnaireForm, json: bool) -> Result<()> {
    let cfg = config::load_config()?;
    let validator = cfg.validator()?;
    let scorer = cfg.scorer();

    let submission = match form.submit(&validator, &scorer) {
        Ok(s) => s,
        Err(e) if e.is_incomplete_form() => {
            println!("Incomplete form: {}", e);
            return Ok(());
        }
        Err(e) => bail!(e),
    };

    match state::write_submission(&submission, chrono::Utc::now()) {
        Ok(p) => debug!(path = %p.display(), "submission saved"),
        Err(e) => warn!("could not save submission locally: {e:#}"),
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&submission)?);
        return Ok(());
    }

    report::print_risk(&submission.result);
    let catalog = cfg.catalog()?;
    println!();
    report::print_trails("Recommended trails:", &catalog.recommend_by_score(submission.result.overall_score));
    Ok(())
}
