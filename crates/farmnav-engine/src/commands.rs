//! Console command parsing.
//!
//! One command per line, words separated by whitespace, names and enum
//! values case-insensitive. Coordinates are zero-based `x y`.

use std::num::ParseIntError;

use farmnav_core::session::SessionCommand;
use farmnav_core::{PlayerAction, SimulationSpeed};
use farmnav_types::{LivestockId, ParseEnumError, Position};

/// Command names with their argument synopsis, in help order.
const USAGE: &[(&str, &str)] = &[
    ("plant", "plant <x> <y> <crop>"),
    ("water", "water <x> <y>"),
    ("fertilize", "fertilize <x> <y>"),
    ("harvest", "harvest <x> <y>"),
    ("irrigate-all", "irrigate-all"),
    ("fertilize-all", "fertilize-all"),
    ("harvest-all", "harvest-all"),
    ("amend", "amend <x> <y> <lime|manure|fertilizer|mulch>"),
    ("treat", "treat <x> <y>"),
    ("care", "care <x> <y>"),
    ("buy", "buy <cow|buffalo|goat|chicken> [<x> <y>]"),
    ("feed", "feed <livestock-id>"),
    ("give-water", "give-water <livestock-id>"),
    ("collect", "collect <livestock-id>"),
    ("start", "start"),
    ("soil", "soil <kind>"),
    ("next", "next"),
    ("restart", "restart"),
    ("quiz", "quiz <chapter> <option>"),
    ("forecast", "forecast [days]"),
    ("status", "status"),
    ("pause", "pause"),
    ("resume", "resume"),
    ("speed", "speed <1|2|4>"),
    ("help", "help"),
    ("quit", "quit"),
];

/// Days shown by a bare `forecast`.
const DEFAULT_FORECAST_DAYS: u32 = 7;

/// A console line that could not be understood.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The line had no words.
    #[error("empty command")]
    Empty,

    /// The first word is not a command.
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    /// Wrong number of arguments.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// A coordinate or count is not a number.
    #[error("'{input}' is not a number: {source}")]
    Number {
        /// The rejected word.
        input: String,
        /// The underlying parse error.
        source: ParseIntError,
    },

    /// A crop, soil, species or amendment name is unknown.
    #[error(transparent)]
    Name(#[from] ParseEnumError),

    /// A livestock id is not a UUID.
    #[error("'{input}' is not a livestock id: {source}")]
    LivestockId {
        /// The rejected word.
        input: String,
        /// The underlying parse error.
        source: uuid::Error,
    },

    /// Unsupported speed multiplier.
    #[error("speed must be 1, 2 or 4, not {0}")]
    Speed(u32),
}

/// What a console line asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Forward to the session.
    Session(SessionCommand),
    /// Stop ticking.
    Pause,
    /// Start ticking again.
    Resume,
    /// Change the tick speed.
    Speed(SimulationSpeed),
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

fn number(word: &str) -> Result<u32, CommandError> {
    word.parse().map_err(|source| CommandError::Number {
        input: word.to_owned(),
        source,
    })
}

fn index(word: &str) -> Result<usize, CommandError> {
    word.parse().map_err(|source| CommandError::Number {
        input: word.to_owned(),
        source,
    })
}

fn position(x: &str, y: &str) -> Result<Position, CommandError> {
    Ok(Position::new(number(x)?, number(y)?))
}

fn livestock_id(word: &str) -> Result<LivestockId, CommandError> {
    word.parse().map_err(|source| CommandError::LivestockId {
        input: word.to_owned(),
        source,
    })
}

const fn act(action: PlayerAction) -> ConsoleInput {
    ConsoleInput::Session(SessionCommand::Act(action))
}

const fn session(command: SessionCommand) -> ConsoleInput {
    ConsoleInput::Session(command)
}

/// Parse one console line.
pub fn parse_line(line: &str) -> Result<ConsoleInput, CommandError> {
    let mut words = line.split_whitespace();
    let command = words.next().ok_or(CommandError::Empty)?.to_lowercase();
    let args: Vec<&str> = words.collect();

    let input = match (command.as_str(), args.as_slice()) {
        ("plant", [x, y, crop]) => act(PlayerAction::Plant {
            position: position(x, y)?,
            crop: crop.parse()?,
        }),
        ("water", [x, y]) => act(PlayerAction::Water {
            position: position(x, y)?,
        }),
        ("fertilize", [x, y]) => act(PlayerAction::Fertilize {
            position: position(x, y)?,
        }),
        ("harvest", [x, y]) => act(PlayerAction::Harvest {
            position: position(x, y)?,
        }),
        ("irrigate-all", []) => act(PlayerAction::IrrigateAll),
        ("fertilize-all", []) => act(PlayerAction::FertilizeAll),
        ("harvest-all", []) => act(PlayerAction::HarvestAll),
        ("amend", [x, y, kind]) => act(PlayerAction::Amend {
            position: position(x, y)?,
            amendment: kind.parse()?,
        }),
        ("treat", [x, y]) => act(PlayerAction::TreatPest {
            position: position(x, y)?,
        }),
        ("care", [x, y]) => act(PlayerAction::EmergencyCare {
            position: position(x, y)?,
        }),
        ("buy", [species]) => act(PlayerAction::BuyLivestock {
            species: species.parse()?,
            position: None,
        }),
        ("buy", [species, x, y]) => act(PlayerAction::BuyLivestock {
            species: species.parse()?,
            position: Some(position(x, y)?),
        }),
        ("feed", [id]) => act(PlayerAction::FeedLivestock { id: livestock_id(id)? }),
        ("give-water", [id]) => act(PlayerAction::WaterLivestock { id: livestock_id(id)? }),
        ("collect", [id]) => act(PlayerAction::CollectProduce { id: livestock_id(id)? }),
        ("start", []) => session(SessionCommand::StartChapter),
        ("soil", [kind]) => session(SessionCommand::SelectSoil(kind.parse()?)),
        ("next", []) => session(SessionCommand::NextChapter),
        ("restart", []) => session(SessionCommand::RestartChapter),
        ("quiz", [chapter, option]) => {
            // Options are numbered from 1 on screen.
            let choice = index(option)?
                .checked_sub(1)
                .ok_or(CommandError::Usage("quiz <chapter> <option>"))?;
            session(SessionCommand::AnswerQuiz {
                chapter: number(chapter)?,
                choice,
            })
        }
        ("forecast", []) => session(SessionCommand::Forecast(DEFAULT_FORECAST_DAYS)),
        ("forecast", [days]) => session(SessionCommand::Forecast(number(days)?)),
        ("status", []) => session(SessionCommand::Status),
        ("pause", []) => ConsoleInput::Pause,
        ("resume", []) => ConsoleInput::Resume,
        ("speed", [n]) => {
            let multiplier = number(n)?;
            ConsoleInput::Speed(SimulationSpeed::from_multiplier(multiplier).ok_or(CommandError::Speed(multiplier))?)
        }
        ("help", []) => ConsoleInput::Help,
        ("quit" | "exit", []) => ConsoleInput::Quit,
        (name, _) => {
            return Err(USAGE
                .iter()
                .find(|(known, _)| *known == name)
                .map_or_else(|| CommandError::Unknown(name.to_owned()), |(_, usage)| CommandError::Usage(*usage)));
        }
    };
    Ok(input)
}

/// The command list.
pub fn help_text() -> String {
    let mut text = String::from("Commands:\n");
    for (_, usage) in USAGE {
        text.push_str("  ");
        text.push_str(usage);
        text.push('\n');
    }
    text
}
