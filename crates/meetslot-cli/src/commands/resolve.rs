use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, Local};
use clap::Args;
use meetslot_core::meeting::authority_weight_from_email;
use meetslot_core::{
    CandidateSlot, DirectiveSource, EngineConfig, Participant, ProposalStore, ResolveOutcome,
    Role, SlotResolutionEngine, StaticCalendarProvider, StructuredDirective, TimeRange,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Args)]
pub struct ResolveArgs {
    /// Request file (JSON): participants, window and meeting directive
    #[arg(long)]
    pub request: PathBuf,
    /// Calendar file (JSON): email -> list of busy intervals
    #[arg(long)]
    pub calendar: Option<PathBuf>,
    /// Confirm the ranked slot at this index
    #[arg(long)]
    pub confirm: Option<usize>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Deserialize)]
struct ParticipantSpec {
    email: String,
    #[serde(default = "default_role")]
    role: Role,
    #[serde(default)]
    priority_weight: Option<u32>,
    #[serde(default)]
    timezone: Option<String>,
}

fn default_role() -> Role {
    Role::Attendee
}

#[derive(Debug, Default, Deserialize)]
struct WindowSpec {
    start: Option<DateTime<FixedOffset>>,
    end: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Deserialize)]
struct ResolveRequest {
    participants: Vec<ParticipantSpec>,
    #[serde(default)]
    window: WindowSpec,
    /// Derive missing weights from title keywords in the email
    #[serde(default)]
    infer_authority: bool,
    #[serde(default)]
    directive: StructuredDirective,
}

#[derive(Serialize)]
struct ResolveReport<'a> {
    #[serde(flatten)]
    outcome: &'a ResolveOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    confirmed: Option<&'a CandidateSlot>,
}

impl ResolveRequest {
    fn participants(&self) -> Vec<Participant> {
        self.participants
            .iter()
            .map(|spec| {
                let weight = spec.priority_weight.unwrap_or_else(|| {
                    if self.infer_authority {
                        authority_weight_from_email(&spec.email)
                    } else {
                        spec.role.default_weight()
                    }
                });
                let participant = Participant::new(spec.email.clone(), spec.role);
                let participant = Participant {
                    priority_weight: weight,
                    ..participant
                };
                match &spec.timezone {
                    Some(tz) => participant.with_timezone(tz.clone()),
                    None => participant,
                }
            })
            .collect()
    }

    fn window(&self, lookahead_days: i64) -> Result<TimeRange, meetslot_core::ValidationError> {
        let start = self.window.start.unwrap_or_else(|| {
            let now = Local::now();
            now.with_timezone(now.offset())
        });
        let end = self
            .window
            .end
            .unwrap_or_else(|| start + Duration::days(lookahead_days));
        TimeRange::new(start, end)
    }
}

pub fn run(args: ResolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::load()?;

    let request: ResolveRequest = serde_json::from_str(&std::fs::read_to_string(&args.request)?)?;
    let provider = match &args.calendar {
        Some(path) => StaticCalendarProvider::from_json(&std::fs::read_to_string(path)?)?,
        None => StaticCalendarProvider::new(),
    };

    let participants = request.participants();
    let requirement = request.directive.requirement()?;
    let window = request.window(config.scheduling.lookahead_days)?;

    let engine = SlotResolutionEngine::new(
        Arc::new(provider),
        Arc::new(ProposalStore::new()),
        config,
    );

    info!(
        target: "meetslot::cli",
        request = %args.request.display(),
        participants = participants.len(),
        start = %window.start,
        end = %window.end,
        "resolving request"
    );
    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(engine.resolve(&participants, &requirement, window))?;

    let confirmed = match args.confirm {
        Some(index) => {
            info!(
                target: "meetslot::cli",
                proposal_id = %outcome.proposal_id,
                slot_index = index,
                "confirming slot"
            );
            Some(engine.confirm(&outcome.proposal_id, index)?)
        }
        None => None,
    };

    if args.json {
        let report = ResolveReport {
            outcome: &outcome,
            confirmed: confirmed.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Proposal: {}", outcome.proposal_id);
    println!("Strategy: {}", outcome.resolution.strategy);
    println!();
    println!("Ranked slots:");
    for (i, slot) in outcome.ranked_slots.iter().enumerate() {
        println!(
            "  [{i}] {} - {}  score {:.0}  conflicts {}",
            slot.start.format("%a %Y-%m-%d %H:%M %:z"),
            slot.end.format("%H:%M"),
            slot.score,
            slot.conflicts.len()
        );
    }

    if !outcome.alternatives.is_empty() {
        println!();
        println!("Alternatives:");
        for alt in &outcome.alternatives {
            println!(
                "  {}  score {:.0}  ({})",
                alt.slot.start.format("%a %Y-%m-%d %H:%M"),
                alt.slot.score,
                alt.reason
            );
        }
    }

    println!();
    println!("Reasoning:");
    for line in &outcome.reasoning {
        println!("  {line}");
    }

    println!();
    println!("Next steps:");
    for action in &outcome.resolution.recommended_actions {
        println!("  - {action}");
    }
    println!("Energy: {}", outcome.resolution.energy_note);
    println!(
        "Preparation: {} min",
        outcome.resolution.preparation_minutes
    );

    for warning in &outcome.warnings {
        eprintln!(
            "warning: calendar unavailable for {}: {}",
            warning.participant_email, warning.reason
        );
    }

    if let Some(slot) = confirmed {
        println!();
        println!("Confirmed: {}", slot.start.format("%a %Y-%m-%d %H:%M %:z"));
    }
    Ok(())
}
