//! Console front end: prints session events to stdout and turns stdin
//! lines into commands.

use std::io::BufRead;

use farmnav_core::chapter::ChapterPhase;
use farmnav_core::session::{ActionResponse, CommandReply, SessionCommand, SimulationService};
use farmnav_core::story::ChapterDefinition;
use farmnav_core::{ActionOutcome, OperatorState, PlayerAction, Quiz, SessionCallback, TickSummary};
use farmnav_types::{SoilType, WeatherSample};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::commands::{self, ConsoleInput};

/// Prints tick summaries and command replies for the player.
pub struct ConsoleCallback;

fn print_forecast(samples: &[WeatherSample], first_day: u32) {
    println!("Forecast:");
    for (day, sample) in (first_day..).zip(samples) {
        println!(
            "  Day {day}: {} {:.0}C, {:.0}mm rain",
            sample.condition, sample.temperature, sample.precipitation
        );
    }
}

fn intro_line(chapter: &ChapterDefinition, credits: u64) -> String {
    format!(
        "You have {credits} credits. Recommended crop: {}. Type 'start' to begin.",
        chapter.recommended_crop
    )
}

fn print_quiz(quiz: &Quiz) {
    println!("Quiz for {} Bharat Points: {}", quiz.bharat_points, quiz.question);
    for (n, option) in (1..).zip(&quiz.options) {
        println!("  {n}) {option}");
    }
    println!("Answer with: quiz {} <option>", quiz.chapter);
}

fn print_phase(phase: ChapterPhase, service: &SimulationService) {
    let Some(chapter) = service.progression().current() else {
        return;
    };
    match phase {
        ChapterPhase::Intro => {
            println!("Chapter {}: {} ({})", chapter.id, chapter.title, chapter.region);
            println!("{}", chapter.description);
            println!("{}", intro_line(chapter, service.state().credits));
        }
        ChapterPhase::SoilSelection => {
            let soils: Vec<&str> = SoilType::ALL.iter().map(|s| s.as_str()).collect();
            println!("Choose a soil for {}: soil <{}>", chapter.region, soils.join("|"));
        }
        ChapterPhase::Active => {
            println!("Chapter {} is under way. Objectives:", chapter.id);
            for objective in service.progression().objectives() {
                println!("  - {}", objective.description);
            }
        }
        ChapterPhase::Complete => {
            println!("Chapter {} complete. Type 'next' to continue or 'restart' to replay.", chapter.id);
            if let Some(quiz) = service.open_quiz() {
                print_quiz(quiz);
            }
        }
    }
}

fn print_action(action: &PlayerAction, response: &ActionResponse, service: &SimulationService) {
    match &response.outcome {
        ActionOutcome::Applied(report) => {
            println!("{}", report.message);
            if report.points_earned > 0 {
                println!("  +{} Bharat Points", report.points_earned);
            }
            if let PlayerAction::BuyLivestock { species, .. } = action {
                if let Some(unit) = service.state().livestock.iter().rev().find(|u| u.species == *species) {
                    println!("  New {} id: {}", unit.species, unit.id);
                }
            }
        }
        ActionOutcome::Rejected(reason) => println!("Cannot do that: {reason}"),
    }
    if let Some(completion) = &response.completion {
        println!(
            "*** Chapter {} complete! Badge earned: {} (+{} points) ***",
            completion.chapter_id, completion.badge, completion.reward_points
        );
        match completion.next_chapter_id {
            Some(next) => println!("Chapter {next} unlocked. Type 'next' to continue."),
            None => println!("You have finished the story. Well farmed!"),
        }
        if let Some(quiz) = service.open_quiz() {
            print_quiz(quiz);
        }
    }
}

fn print_livestock(service: &SimulationService) {
    for unit in &service.state().livestock {
        println!(
            "  {} {} health {:.0} hunger {:.0} age {}",
            unit.species, unit.id, unit.health, unit.hunger, unit.age
        );
    }
}

impl SessionCallback for ConsoleCallback {
    fn on_tick(&mut self, summary: &TickSummary, service: &SimulationService) {
        let state = service.state();
        println!(
            "Day {}: {} {:.0}C | credits {} | points {} | {} crops ready",
            summary.day,
            summary.weather.condition,
            summary.weather.temperature,
            state.credits,
            state.bharat_points,
            state.harvestable_count()
        );
        if summary.newly_harvestable > 0 {
            println!("  {} crop(s) just became ready to harvest", summary.newly_harvestable);
        }
    }

    fn on_reply(&mut self, command: &SessionCommand, reply: &CommandReply, service: &SimulationService) {
        match reply {
            CommandReply::Action(response) => {
                if let SessionCommand::Act(action) = command {
                    print_action(action, response, service);
                }
            }
            CommandReply::Phase(phase) => print_phase(*phase, service),
            CommandReply::SoilSelected(compatibility) => {
                println!("{} (score {})", compatibility.message, compatibility.score);
                for tip in &compatibility.recommendations {
                    println!("  * {tip}");
                }
                print_phase(service.progression().phase(), service);
            }
            CommandReply::Refused(error) => println!("Not now: {error}"),
            CommandReply::Forecast(samples) => print_forecast(samples, service.state().day().saturating_add(1)),
            CommandReply::Status(status) => {
                print!("{status}");
                print_livestock(service);
            }
            CommandReply::QuizAnswered(outcome) => {
                if outcome.correct {
                    println!("Correct! +{} Bharat Points", outcome.points_earned);
                } else {
                    println!("Not quite. The answer was option {}.", outcome.answer.saturating_add(1));
                }
                println!("{}", outcome.explanation);
            }
            CommandReply::QuizRefused(error) => println!("Quiz not accepted: {error}"),
        }
    }
}

/// Print the opening screen for a new session.
pub fn print_welcome(service: &SimulationService) {
    println!("Farm Navigator: type 'help' for commands.");
    if service.config().session.mode.is_story() {
        print_phase(service.progression().phase(), service);
    } else {
        println!(
            "Sandbox farm in {} on {} soil.",
            service.state().location,
            service.state().soil_type()
        );
    }
}

/// Read commands from stdin until EOF or `quit`.
///
/// Blocks on stdin; run it on a dedicated thread.
/// Operator controls act on `operator` directly; everything else is sent
/// to the session. The caller drops `sender` on return, which ends the
/// session when input runs out.
pub fn read_console(sender: &mpsc::Sender<SessionCommand>, operator: &OperatorState) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Failed to read console input");
                return;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match commands::parse_line(&line) {
            Ok(ConsoleInput::Session(command)) => {
                if sender.blocking_send(command).is_err() {
                    return;
                }
            }
            Ok(ConsoleInput::Pause) => {
                operator.pause();
                println!("Paused.");
            }
            Ok(ConsoleInput::Resume) => {
                operator.resume();
                println!("Resumed.");
            }
            Ok(ConsoleInput::Speed(speed)) => {
                let previous = operator.set_speed(speed);
                println!("Speed {previous} -> {speed}.");
            }
            Ok(ConsoleInput::Help) => print!("{}", commands::help_text()),
            Ok(ConsoleInput::Quit) => {
                info!("Quit requested from console");
                operator.request_stop();
                return;
            }
            Err(e) => println!("{e}"),
        }
    }
    debug!("Console input closed");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmnav_core::config::GameConfig;
    use farmnav_types::GameMode;

    use super::*;

    #[test]
    fn intro_quotes_the_real_balance() {
        let mut config = GameConfig::default();
        config.session.mode = GameMode::Story;
        config.session.starting_credits = 1750;
        config.storage.enabled = false;
        let service = SimulationService::from_config(config).unwrap();
        let chapter = service.progression().current().unwrap();

        let line = intro_line(chapter, service.state().credits);
        assert!(line.starts_with("You have 1750 credits."));
        assert!(line.contains(chapter.recommended_crop.as_str()));
    }
}
