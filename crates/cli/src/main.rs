//! Momentum CLI - personal challenge tracking.
//!
//! The store is session-scoped: every invocation starts from the seed
//! fixture, applies the requested mutation, and prints the resulting
//! record so the derived progress is visible.

use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Parser, Subcommand};
use momentum_core::{Challenge, ChallengeFilter, GoalKind, ProgressSource, Time};
use momentum_store::MemoryStore;
use momentum_tracker::{ChallengeDraft, ChallengeTracker, MilestoneDraft};
use tracing::Level;

#[derive(Parser)]
#[command(name = "momentum")]
#[command(about = "Personal challenge tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List challenges
    List {
        /// Filter: all, active or completed
        #[arg(long, default_value = "all")]
        filter: String,
    },
    /// Show challenge details
    Show {
        /// Challenge ID
        id: String,
    },
    /// Create a new challenge
    Create {
        /// Challenge title
        #[arg(long)]
        title: String,
        /// Detailed description
        #[arg(long)]
        description: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// Fixed completion target; day-counted when omitted
        #[arg(long)]
        target: Option<u32>,
        /// Milestone as "Title:threshold", repeatable
        #[arg(long = "milestone")]
        milestones: Vec<String>,
    },
    /// Edit a challenge (check-in history is preserved)
    Edit {
        /// Challenge ID
        id: String,
        /// Challenge title
        #[arg(long)]
        title: String,
        /// Detailed description
        #[arg(long)]
        description: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// Fixed completion target; day-counted when omitted
        #[arg(long)]
        target: Option<u32>,
        /// Milestone as "Title:threshold", repeatable
        #[arg(long = "milestone")]
        milestones: Vec<String>,
    },
    /// Record a check-in against a challenge
    CheckIn {
        /// Challenge ID
        id: String,
        /// Notes about today's progress
        #[arg(long)]
        notes: String,
        /// Whether the entry counts toward the goal
        #[arg(long)]
        completed: bool,
    },
    /// Manually override progress
    SetProgress {
        /// Challenge ID
        id: String,
        /// Progress percentage (0-100)
        progress: u8,
    },
    /// Delete a challenge
    Delete {
        /// Challenge ID
        id: String,
    },
    /// Show check-in totals for a challenge
    Summary {
        /// Challenge ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .init();

    let cli = Cli::parse();

    let store = MemoryStore::seeded()?;
    let mut tracker = ChallengeTracker::new(store);

    match cli.command {
        Commands::List { filter } => {
            let filter = parse_filter(&filter)?;
            let challenges = tracker.list(filter).await?;

            println!("Challenges ({})", challenges.len());
            for challenge in challenges {
                println!(
                    "  {} | {:>3}% | {} completed check-ins | {}",
                    challenge.id,
                    challenge.progress,
                    challenge.completed_check_ins(),
                    challenge.title,
                );
            }
        }
        Commands::Show { id } => {
            let challenge = tracker.get(parse_id(&id)?).await?;
            print_challenge(&challenge);
        }
        Commands::Create {
            title,
            description,
            start,
            end,
            target,
            milestones,
        } => {
            let draft = build_draft(title, description, &start, &end, target, &milestones)?;
            let challenge = tracker.create(draft).await?;
            println!("Created challenge: {}", challenge.id);
            print_challenge(&challenge);
        }
        Commands::Edit {
            id,
            title,
            description,
            start,
            end,
            target,
            milestones,
        } => {
            let draft = build_draft(title, description, &start, &end, target, &milestones)?;
            let challenge = tracker.edit(parse_id(&id)?, draft).await?;
            println!("Updated challenge: {}", challenge.id);
            print_challenge(&challenge);
        }
        Commands::CheckIn {
            id,
            notes,
            completed,
        } => {
            let challenge = tracker.add_check_in(parse_id(&id)?, notes, completed).await?;
            if completed {
                println!("Check-in recorded; it counts toward your goal.");
            } else {
                println!("Check-in recorded.");
            }
            print_challenge(&challenge);
        }
        Commands::SetProgress { id, progress } => {
            let challenge = tracker.set_progress(parse_id(&id)?, progress).await?;
            println!(
                "Progress for \"{}\" has been updated to {}%",
                challenge.title, challenge.progress
            );
            print_challenge(&challenge);
        }
        Commands::Delete { id } => {
            let id = parse_id(&id)?;
            let challenge = tracker.get(id).await?;
            tracker.delete(id).await?;
            println!("\"{}\" has been removed", challenge.title);
        }
        Commands::Summary { id } => {
            let challenge = tracker.get(parse_id(&id)?).await?;
            let summary = momentum_engine::summary(&challenge);
            println!("{}", challenge.title);
            println!(
                "  You have completed {} out of {} goals; {} remaining.",
                summary.completed, summary.total, summary.remaining
            );
        }
    }

    Ok(())
}

fn parse_id(s: &str) -> Result<momentum_core::ChallengeId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid challenge ID"))
}

fn parse_filter(s: &str) -> Result<ChallengeFilter> {
    match s.to_lowercase().as_str() {
        "all" => Ok(ChallengeFilter::All),
        "active" => Ok(ChallengeFilter::Active),
        "completed" => Ok(ChallengeFilter::Completed),
        other => anyhow::bail!("Unknown filter: {}", other),
    }
}

/// Midnight UTC at the start of the given day.
fn day_start(s: &str) -> Result<Time> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Last millisecond of the given day, so the span covers it fully.
fn day_end(s: &str) -> Result<Time> {
    Ok(day_start(s)? + Duration::days(1) - Duration::milliseconds(1))
}

fn build_draft(
    title: String,
    description: String,
    start: &str,
    end: &str,
    target: Option<u32>,
    milestones: &[String],
) -> Result<ChallengeDraft> {
    let milestones = if milestones.is_empty() {
        default_milestones()
    } else {
        milestones
            .iter()
            .map(|spec| parse_milestone(spec))
            .collect::<Result<Vec<_>>>()?
    };

    Ok(ChallengeDraft {
        title,
        description,
        start_date: day_start(start)?,
        end_date: day_end(end)?,
        kind: match target {
            Some(target) => GoalKind::Count { target },
            None => GoalKind::TimeSpan,
        },
        milestones,
    })
}

fn parse_milestone(spec: &str) -> Result<MilestoneDraft> {
    let Some((title, threshold)) = spec.rsplit_once(':') else {
        anyhow::bail!("Milestone must be \"Title:threshold\", got: {}", spec);
    };
    Ok(MilestoneDraft {
        title: title.to_string(),
        threshold: threshold.trim().parse()?,
    })
}

fn default_milestones() -> Vec<MilestoneDraft> {
    [25, 50, 75, 100]
        .into_iter()
        .map(|threshold| MilestoneDraft {
            title: format!("{}% Complete", threshold),
            threshold,
        })
        .collect()
}

fn print_challenge(challenge: &Challenge) {
    println!("Challenge: {}", challenge.id);
    println!("  Title: {}", challenge.title);
    println!("  Description: {}", challenge.description);
    println!(
        "  Dates: {} - {}",
        challenge.start_date.format("%Y-%m-%d"),
        challenge.end_date.format("%Y-%m-%d")
    );
    match challenge.kind {
        GoalKind::Count { target } => println!("  Goal: {} completed check-ins", target),
        GoalKind::TimeSpan => println!("  Goal: one check-in per day"),
    }
    println!(
        "  Progress: {}%{}",
        challenge.progress,
        match challenge.progress_source {
            ProgressSource::Derived => "",
            ProgressSource::Manual => " (manual override)",
        }
    );
    println!(
        "  Check-ins: {} ({} completed)",
        challenge.check_ins.len(),
        challenge.completed_check_ins()
    );
    println!("  Milestones:");
    for milestone in &challenge.milestones {
        println!(
            "    [{}] {} ({}%)",
            if milestone.achieved { "x" } else { " " },
            milestone.title,
            milestone.threshold
        );
    }
}
