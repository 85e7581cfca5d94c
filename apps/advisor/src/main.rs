mod commands;
mod render;

use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, AdvisorSession, HttpAdvisorApi, ProgramContext, SessionChange, Verdict,
    ViewPhase,
};
use commands::{parse_command, PickTarget, ReplCommand, HELP};
use shared::{
    catalog,
    domain::{CreditsTarget, ProgramId, Track},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "advisor", about = "Terminal course advisor")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
    /// Base URL of the advisory service.
    #[arg(long)]
    api_url: Option<String>,
    /// Settings file; defaults to ./advisor.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, conflicts_with_all = ["university", "major"])]
    program_id: Option<String>,
    #[arg(long, requires = "major")]
    university: Option<String>,
    #[arg(long, requires = "university")]
    major: Option<String>,
    #[arg(long)]
    track: Option<Track>,
    #[arg(long)]
    credits: Option<CreditsTarget>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the known university programs.
    Programs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    if matches!(args.command, Some(Command::Programs)) {
        render::print_programs();
        return Ok(());
    }

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(api_url) = &args.api_url {
        settings.api_base_url = api_url.clone();
        settings = settings.validate()?;
    }
    info!(api_base_url = %settings.api_base_url, "advisor: settings loaded");

    let program = resolve_program(&args)?;
    let api = Arc::new(HttpAdvisorApi::new(&settings)?);
    let mut session = AdvisorSession::new(program, api, &settings);
    session.set_track(args.track);
    if let Some(credits) = args.credits {
        session.set_credits_target(credits);
    }

    render::print_header(&session);
    println!("{HELP}");
    run_repl(&mut session).await
}

fn resolve_program(args: &Args) -> Result<ProgramContext> {
    if let Some(program_id) = &args.program_id {
        return Ok(match catalog::by_id(program_id) {
            Some(entry) => ProgramContext {
                university: entry.university.to_string(),
                program_id: entry.id(),
                major: Some(entry.major.to_string()),
            },
            None => {
                warn!(%program_id, "advisor: program id not in local catalog");
                ProgramContext {
                    university: String::new(),
                    program_id: ProgramId::from(program_id.as_str()),
                    major: None,
                }
            }
        });
    }

    let (Some(university), Some(major)) = (&args.university, &args.major) else {
        bail!(
            "choose a program with --program-id or --university and --major \
             (see `advisor programs`)"
        );
    };
    match catalog::find(university, major) {
        Some(entry) => Ok(ProgramContext {
            university: entry.university.to_string(),
            program_id: entry.id(),
            major: Some(entry.major.to_string()),
        }),
        None => {
            let majors = catalog::majors_for(university);
            if majors.is_empty() {
                bail!(
                    "unknown university '{university}'; known: {}",
                    catalog::universities().join(", ")
                );
            }
            bail!(
                "unknown major '{major}' at {university}; known: {}",
                majors.join(", ")
            );
        }
    }
}

async fn run_repl(session: &mut AdvisorSession) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(ReplCommand::Quit) => break,
                    Ok(command) => apply_command(session, command),
                    Err(message) if message.is_empty() => {}
                    Err(message) => println!("{message}"),
                }
            }
            Some(event) = session.next_event() => {
                let change = session.handle_event(event);
                render_change(session, change);
            }
        }
    }

    info!(session_id = %session.session_id(), "advisor: session closed");
    Ok(())
}

fn apply_command(session: &mut AdvisorSession, command: ReplCommand) {
    match command {
        ReplCommand::Type(text) => session.on_input(&text),
        ReplCommand::Pick(target) => {
            let code = match target {
                PickTarget::Code(code) => code,
                PickTarget::Index(index) => match session.current_suggestions().get(index - 1) {
                    Some(suggestion) => suggestion.code.clone(),
                    None => {
                        println!("no suggestion at position {index}");
                        return;
                    }
                },
            };
            if !session.accept_suggestion(code.clone()) {
                println!("{code} is already in your completed courses");
            }
            let view = session.view();
            render::print_form(session, &view);
        }
        ReplCommand::Remove(code) => {
            if !session.remove_selection(&code) {
                println!("{code} is not in your completed courses");
            }
            let view = session.view();
            render::print_form(session, &view);
        }
        ReplCommand::Track(track) => {
            session.set_track(track);
            let view = session.view();
            render::print_form(session, &view);
        }
        ReplCommand::Credits(credits) => {
            session.set_credits_target(credits);
            let view = session.view();
            render::print_form(session, &view);
        }
        ReplCommand::Submit => {
            if !session.view().submit_enabled {
                println!("a request is already in flight; its answer may be replaced by this one");
            }
            session.submit();
            render::print_result(&session.view());
        }
        ReplCommand::Show => {
            let view = session.view();
            render::print_form(session, &view);
            render::print_result(&view);
        }
        ReplCommand::Feedback { helpful, comment } => {
            if session.view().phase != ViewPhase::Populated {
                println!("no recommendations to rate yet");
                return;
            }
            let verdict = if helpful {
                Verdict::Helpful
            } else {
                Verdict::NotHelpful
            };
            let feedback = session.feedback_mut();
            feedback.record(verdict);
            match comment {
                Some(comment) if feedback.comment_open() => {
                    feedback.submit_comment(&comment);
                    println!("Thanks for your feedback!");
                }
                _ if feedback.comment_open() => {
                    println!("What could be improved? (comment <text>)")
                }
                _ => println!("Thanks for your feedback!"),
            }
        }
        ReplCommand::Comment(text) => {
            if session.feedback_mut().submit_comment(&text) {
                println!("Thanks for your feedback!");
            } else {
                println!("nothing to comment on; use 'feedback down' first");
            }
        }
        ReplCommand::Help => println!("{HELP}"),
        ReplCommand::Quit => {}
    }
}

fn render_change(session: &AdvisorSession, change: SessionChange) {
    match change {
        SessionChange::SuggestionsUpdated { count: 0 } => println!("  (no matching courses)"),
        SessionChange::SuggestionsUpdated { .. } => render::print_suggestions(&session.view()),
        SessionChange::RequestSettled { .. } => render::print_result(&session.view()),
        SessionChange::SearchIssued { .. }
        | SessionChange::SuggestionsCleared
        | SessionChange::SuggestionsDegraded
        | SessionChange::Ignored => {}
    }
}
