//! Best-effort persistence of chapter progress and badges.
//!
//! Two independent records are kept:
//!
//! - **Chapter progress**: chapter id to completion, unlock state,
//!   cumulative reward points and badge.
//! - **Badge collection**: every badge with its earned flag and date.
//!
//! The [`ProgressStore`] trait abstracts where they live. [`JsonFileStore`]
//! writes two JSON files; [`MemoryStore`] keeps them in memory. Callers go
//! through [`record_completion`], which never fails: storage errors are
//! logged and the game continues on in-memory state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chapter::ChapterCompletion;

/// Errors reading or writing a record.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// File could not be read or written.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Record content is not valid JSON for its type.
    #[error("storage JSON error: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Stored state of one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    /// Every objective was met at least once.
    pub completed: bool,
    /// The chapter may be played.
    pub unlocked: bool,
    /// Reward points earned from this chapter, summed over completions.
    pub bharat_points: u64,
    /// Badge awarded.
    #[serde(default)]
    pub badge: Option<String>,
    /// Last completion time.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ChapterRecord {
    const fn locked() -> Self {
        Self {
            completed: false,
            unlocked: false,
            bharat_points: 0,
            badge: None,
            completed_at: None,
        }
    }
}

/// The chapter progress record, keyed by chapter id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterProgress(pub BTreeMap<u32, ChapterRecord>);

impl ChapterProgress {
    /// Record for a chapter, if any.
    pub fn get(&self, chapter_id: u32) -> Option<&ChapterRecord> {
        self.0.get(&chapter_id)
    }

    /// Whether a chapter may be played. Chapter 1 always may.
    pub fn is_unlocked(&self, chapter_id: u32) -> bool {
        chapter_id == 1 || self.0.get(&chapter_id).is_some_and(|r| r.unlocked)
    }

    /// Apply a completion: mark the chapter done, add its reward and
    /// unlock the next chapter.
    pub fn apply(&mut self, completion: &ChapterCompletion, now: DateTime<Utc>) {
        let record = self.0.entry(completion.chapter_id).or_insert_with(|| ChapterRecord {
            unlocked: true,
            ..ChapterRecord::locked()
        });
        record.completed = true;
        record.unlocked = true;
        record.bharat_points = record.bharat_points.saturating_add(completion.reward_points);
        record.badge = Some(completion.badge.clone());
        record.completed_at = Some(now);

        if let Some(next) = completion.next_chapter_id {
            self.0.entry(next).or_insert_with(ChapterRecord::locked).unlocked = true;
        }
    }
}

/// Badge grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    /// Awarded for finishing a chapter.
    Chapter,
    /// Awarded for sustained good play.
    Achievement,
    /// Awarded for mastery across the game.
    Mastery,
}

/// One badge in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Stable identifier.
    pub id: String,
    /// Display name. Chapters award badges by name.
    pub name: String,
    /// What it is awarded for.
    pub description: String,
    /// Icon glyph.
    pub icon: String,
    /// Grouping.
    pub category: BadgeCategory,
    /// Whether the player holds it.
    pub earned: bool,
    /// When it was earned.
    #[serde(default)]
    pub earned_date: Option<DateTime<Utc>>,
}

impl Badge {
    fn unearned(id: &str, name: &str, description: &str, icon: &str, category: BadgeCategory) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
            icon: icon.to_owned(),
            category,
            earned: false,
            earned_date: None,
        }
    }
}

/// The initial badge collection.
pub fn default_badges() -> Vec<Badge> {
    use BadgeCategory::{Achievement, Chapter, Mastery};
    vec![
        Badge::unearned("millet-master", "Millet Master", "Completed Chapter 1: Rajasthan Millet Challenge", "🌾", Chapter),
        Badge::unearned("rice-master", "Rice Master", "Completed Chapter 2: Punjab Rice Challenge", "🍚", Chapter),
        Badge::unearned("wheat-warrior", "Wheat Warrior", "Completed Chapter 3: Bihar Wheat Challenge", "🌾", Chapter),
        Badge::unearned(
            "coffee-connoisseur",
            "Coffee Connoisseur",
            "Completed Chapter 4: Karnataka Coffee Challenge",
            "☕",
            Chapter,
        ),
        Badge::unearned("master-farmer", "Master Farmer of Bharat", "Completed all 5 chapters across India", "🏆", Chapter),
        Badge::unearned("water-wise", "Water Wise", "Maintained 80%+ water efficiency for 30 days", "💧", Achievement),
        Badge::unearned("soil-scientist", "Soil Scientist", "Achieved perfect soil health (100%) on all tiles", "🔬", Achievement),
        Badge::unearned("pest-controller", "Pest Controller", "Prevented pest outbreaks for 50 days", "🐛", Achievement),
        Badge::unearned("livestock-expert", "Livestock Expert", "Maintained 5+ healthy animals for 30 days", "🐄", Achievement),
        Badge::unearned("harvest-hero", "Harvest Hero", "Achieved 90%+ crop quality on 20+ harvests", "🌟", Achievement),
        Badge::unearned("quiz-champion", "Quiz Champion", "Answered all educational quizzes correctly", "📚", Mastery),
        Badge::unearned("sustainable-farmer", "Sustainable Farmer", "Used only organic methods for an entire chapter", "🌱", Mastery),
        Badge::unearned("weather-watcher", "Weather Watcher", "Successfully adapted to 10+ weather events", "🌦️", Mastery),
    ]
}

/// Mark the badge called `name` as earned.
///
/// A chapter badge missing from the collection is added to it.
pub fn award_badge(badges: &mut Vec<Badge>, name: &str, chapter_id: u32, now: DateTime<Utc>) {
    if let Some(badge) = badges.iter_mut().find(|b| b.name == name) {
        badge.earned = true;
        badge.earned_date = Some(now);
        return;
    }
    let id = name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-");
    badges.push(Badge {
        earned: true,
        earned_date: Some(now),
        ..Badge::unearned(&id, name, &format!("Completed Chapter {chapter_id}"), "🏅", BadgeCategory::Chapter)
    });
}

/// Where progress records live.
pub trait ProgressStore: Send {
    /// Read the chapter progress record. Absent means empty.
    fn load_progress(&self) -> Result<ChapterProgress, StoreError>;

    /// Replace the chapter progress record.
    fn save_progress(&mut self, progress: &ChapterProgress) -> Result<(), StoreError>;

    /// Read the badge collection. Absent means `None`.
    fn load_badges(&self) -> Result<Option<Vec<Badge>>, StoreError>;

    /// Replace the badge collection.
    fn save_badges(&mut self, badges: &[Badge]) -> Result<(), StoreError>;
}

/// Records kept as two JSON files.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    progress_path: PathBuf,
    badges_path: PathBuf,
}

impl JsonFileStore {
    /// Store writing to the given files.
    pub fn new(progress_path: impl Into<PathBuf>, badges_path: impl Into<PathBuf>) -> Self {
        Self {
            progress_path: progress_path.into(),
            badges_path: badges_path.into(),
        }
    }

    fn read(path: &Path) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                path: path.to_owned(),
                source,
            }),
        }
    }

    fn write(path: &Path, contents: &str) -> Result<(), StoreError> {
        std::fs::write(path, contents).map_err(|source| StoreError::Io {
            path: path.to_owned(),
            source,
        })
    }
}

impl ProgressStore for JsonFileStore {
    fn load_progress(&self) -> Result<ChapterProgress, StoreError> {
        match Self::read(&self.progress_path)? {
            Some(contents) => Ok(serde_json::from_str(&contents)?),
            None => Ok(ChapterProgress::default()),
        }
    }

    fn save_progress(&mut self, progress: &ChapterProgress) -> Result<(), StoreError> {
        Self::write(&self.progress_path, &serde_json::to_string_pretty(progress)?)
    }

    fn load_badges(&self) -> Result<Option<Vec<Badge>>, StoreError> {
        Self::read(&self.badges_path)?
            .map(|contents| serde_json::from_str(&contents))
            .transpose()
            .map_err(StoreError::from)
    }

    fn save_badges(&mut self, badges: &[Badge]) -> Result<(), StoreError> {
        Self::write(&self.badges_path, &serde_json::to_string_pretty(badges)?)
    }
}

/// Records kept in memory for the life of the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    progress: ChapterProgress,
    badges: Option<Vec<Badge>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn load_progress(&self) -> Result<ChapterProgress, StoreError> {
        Ok(self.progress.clone())
    }

    fn save_progress(&mut self, progress: &ChapterProgress) -> Result<(), StoreError> {
        self.progress = progress.clone();
        Ok(())
    }

    fn load_badges(&self) -> Result<Option<Vec<Badge>>, StoreError> {
        Ok(self.badges.clone())
    }

    fn save_badges(&mut self, badges: &[Badge]) -> Result<(), StoreError> {
        self.badges = Some(badges.to_vec());
        Ok(())
    }
}

fn try_record(store: &mut dyn ProgressStore, completion: &ChapterCompletion, now: DateTime<Utc>) -> Result<(), StoreError> {
    let mut progress = store.load_progress()?;
    progress.apply(completion, now);
    store.save_progress(&progress)?;

    let mut badges = store.load_badges()?.unwrap_or_else(default_badges);
    award_badge(&mut badges, &completion.badge, completion.chapter_id, now);
    store.save_badges(&badges)
}

/// Persist a chapter completion. Failures are logged and swallowed.
pub fn record_completion(store: &mut dyn ProgressStore, completion: &ChapterCompletion, now: DateTime<Utc>) {
    match try_record(store, completion, now) {
        Ok(()) => tracing::debug!(chapter = completion.chapter_id, "Chapter progress saved"),
        Err(error) => tracing::warn!(
            chapter = completion.chapter_id,
            error = %error,
            "Failed to save chapter progress, continuing in memory"
        ),
    }
}
