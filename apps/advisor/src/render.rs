//! Plain-text rendering of the session view.

use client_core::{AdvisorSession, SessionView, ViewPhase};
use shared::{catalog, protocol::Recommendation};

pub const DISCLAIMER: &str = "Unofficial advisor. Always confirm with your department.";

pub fn print_programs() {
    for university in catalog::universities() {
        println!("{university}");
        for major in catalog::majors_for(university) {
            if let Some(entry) = catalog::find(university, major) {
                println!("  {major:<26} {}", entry.program_id);
            }
        }
    }
}

pub fn print_header(session: &AdvisorSession) {
    let program = session.program();
    match &program.major {
        Some(major) => println!("Academic Advisor: {} - {major}", program.university),
        None => println!("Academic Advisor: {} ({})", program.university, program.program_id),
    }
    println!("{DISCLAIMER}");
}

pub fn print_suggestions(view: &SessionView) {
    if view.suggestions.is_empty() {
        return;
    }
    for (i, suggestion) in view.suggestions.iter().enumerate() {
        println!("  {}. {:<10} {}", i + 1, suggestion.code, suggestion.title);
    }
}

pub fn print_form(session: &AdvisorSession, view: &SessionView) {
    let track = session
        .track()
        .map(|track| track.label())
        .unwrap_or_else(|| "None".to_string());
    let completed: Vec<&str> = view.selection.iter().map(|code| code.as_str()).collect();
    println!("Completed: [{}]", completed.join(", "));
    println!("  {} courses completed", view.completed_count);
    println!("Career track: {track}");
    println!("Target credit load: {} credits", session.credits_target().get());
}

pub fn print_result(view: &SessionView) {
    match &view.phase {
        ViewPhase::Idle => {
            println!("Fill in your information and type 'submit' to get recommendations.")
        }
        ViewPhase::Loading => println!("Generating recommendations..."),
        ViewPhase::Error(message) => println!("Error: {message}"),
        ViewPhase::Populated => {
            if let Some(warnings) = &view.banners.warnings {
                print_block("Warnings", warnings);
            }
            println!("Recommended courses:");
            for recommendation in &view.recommendations {
                print_recommendation(recommendation);
            }
            if let Some(notes) = &view.banners.notes {
                print_block("Notes", notes);
            }
            if let Some(assumptions) = &view.banners.assumptions {
                print_block("Assumptions", assumptions);
            }
            println!("Were these recommendations helpful? (feedback up|down)");
        }
    }
}

fn print_block(title: &str, lines: &[String]) {
    println!("{title}:");
    for line in lines {
        println!("  - {line}");
    }
}

fn print_recommendation(recommendation: &Recommendation) {
    let prereqs = if recommendation.prereq_ok {
        "prereqs ok"
    } else {
        "missing prereqs"
    };
    println!(
        "  {} {} [{prereqs}]",
        recommendation.code, recommendation.title
    );
    println!("    {}", recommendation.reason);
    if !recommendation.fulfills.is_empty() {
        println!("    fulfills: {}", recommendation.fulfills.join(", "));
    }
    for (i, url) in recommendation.citations.iter().enumerate() {
        println!("    source {}: {url}", i + 1);
    }
}
