//! Wordwise CLI - English vocabulary progress tracker.

use std::path::PathBuf;
use anyhow::{bail, Result};
use chrono::Duration;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wordwise_core::{AppSettings, StudySession, UserProgress};
use wordwise_progress::{ProgressService, ACHIEVEMENTS};
use wordwise_storage::{JsonStorage, PathPicker};

#[derive(Parser)]
#[command(name = "wordwise")]
#[command(about = "English vocabulary progress tracker", long_about = None)]
struct Cli {
    /// Directory holding progress.json and settings.json
    #[arg(long, env = "WORDWISE_DATA_DIR", default_value = ".wordwise", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show progress summary
    Status,
    /// Mark a word as mastered
    Master {
        /// Word ID
        word: String,
    },
    /// Flag a word for review
    Weak {
        /// Word ID
        word: String,
    },
    /// Record a finished study session
    Session {
        /// Lesson ID (omit for freeform practice)
        #[arg(long, default_value = "")]
        lesson: String,
        /// Comma-separated word IDs studied
        #[arg(long, value_delimiter = ',')]
        words: Vec<String>,
        /// Exercises completed
        #[arg(long, default_value = "0")]
        exercises: u32,
        /// Correct answers
        #[arg(long, default_value = "0")]
        correct: u32,
        /// Total answers
        #[arg(long, default_value = "0")]
        total: u32,
        /// Points earned
        #[arg(long, default_value = "0")]
        points: u64,
        /// Session length in minutes, ending now
        #[arg(long, default_value = "0")]
        minutes: u32,
    },
    /// List achievements
    Achievements,
    /// Export progress to a JSON file
    Export {
        /// Target file (defaults to wordwise-progress.json)
        path: Option<PathBuf>,
    },
    /// Import progress from a JSON file
    Import {
        /// Source file
        path: PathBuf,
    },
    /// Write a backup of progress and settings
    Backup {
        /// Target file (defaults to a dated name)
        path: Option<PathBuf>,
    },
    /// Restore a backup or progress export
    Restore {
        /// Source file
        path: PathBuf,
    },
    /// Reset all progress
    Clear,
    /// View or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Pronounce a word
    Speak {
        /// Word to pronounce
        word: String,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show current settings
    Show,
    /// Change one setting
    Set {
        /// Setting key, e.g. theme or reminderTime
        key: String,
        /// New value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let storage = JsonStorage::new(&cli.data_dir).await?;
    let mut service = ProgressService::new(storage);
    let progress = service.load_progress().await?;

    match cli.command {
        Commands::Status => print_status(&service, &progress),
        Commands::Master { word } => {
            let updated = service.master_word(&progress, &word).await?;
            if updated.total_points == progress.total_points {
                println!("'{}' was already mastered", word);
            } else {
                println!("Mastered '{}' (+{} points, total {})", word,
                    updated.total_points - progress.total_points, updated.total_points);
            }
        }
        Commands::Weak { word } => {
            service.mark_weak(&progress, &word).await?;
            println!("Flagged '{}' for review", word);
        }
        Commands::Session { lesson, words, exercises, correct, total, points, minutes } => {
            if correct > total {
                bail!("correct answers ({}) exceed total answers ({})", correct, total);
            }
            let end = service.tracker().now();
            let mut session = StudySession::new(lesson, end - Duration::minutes(minutes as i64));
            session.end_time = Some(end);
            session.words_studied = words.into_iter().filter(|w| !w.is_empty()).collect();
            session.exercises_completed = exercises;
            session.correct_answers = correct;
            session.total_answers = total;
            session.points_earned = points;

            let updated = service.record_session(&progress, &session).await?;
            for achievement in &updated.achievements[progress.achievements.len()..] {
                println!("{} Achievement unlocked: {} (+{})", achievement.icon, achievement.title, achievement.points);
            }
            println!("Session recorded: {} points, {}-day streak, level {}",
                updated.total_points, updated.streak_days, updated.current_level);
        }
        Commands::Achievements => {
            for def in ACHIEVEMENTS.iter() {
                let mark = if progress.has_achievement(def.id) { "x" } else { " " };
                println!("[{}] {} {:<18} {:>4} pts  {}", mark, def.icon, def.title, def.points, def.description);
            }
        }
        Commands::Export { path } => {
            let picker = PathPicker::new(path);
            if let Some(path) = service.export_with_picker(&progress, &picker).await? {
                println!("Exported progress to {}", path.display());
            }
        }
        Commands::Import { path } => {
            let imported = service.import_from(&path).await?;
            println!("Imported progress for {} ({} points)", imported.user_id, imported.total_points);
        }
        Commands::Backup { path } => {
            let settings = service.load_settings().await?;
            let path = path.unwrap_or_else(|| PathBuf::from(service.backup_file_name()));
            service.backup_to(&progress, &settings, &path).await?;
            println!("Backup written to {}", path.display());
        }
        Commands::Restore { path } => {
            let restored = service.restore_from(&path).await?;
            let what = if restored.settings.is_some() { "progress and settings" } else { "progress" };
            println!("Restored {} from {}", what, path.display());
        }
        Commands::Clear => {
            let fresh = service.clear().await?;
            println!("Progress cleared (new user {})", fresh.user_id);
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show => print_settings(&service.load_settings().await?),
            SettingsAction::Set { key, value } => {
                let mut settings = service.load_settings().await?;
                settings.set(&key, &value)?;
                service.save_settings(&settings).await?;
                println!("{} = {}", key, value);
            }
        },
        Commands::Speak { word } => {
            // No audio backend; the request is only logged.
            info!(word = %word, "pronounce");
            println!("🔊 {}", word);
        }
    }

    Ok(())
}

fn print_status(service: &ProgressService<JsonStorage>, progress: &UserProgress) {
    let stats = service.tracker().study_statistics(progress);
    println!("Wordwise Status ({})", progress.user_id);
    println!("  Level: {}", stats.current_level);
    println!("  Points: {}", stats.total_points);
    println!("  Streak: {} days", stats.current_streak);
    println!("  Mastered words: {}", stats.total_words);
    println!("  Weak words: {}", stats.weak_words);
    println!("  Time studied: {} min", stats.total_time);
    println!("  Daily goal: {:.0}% of {} min", stats.daily_goal_progress, progress.daily_goal);
    println!("  Achievements: {}/{}", stats.achievements_count, ACHIEVEMENTS.len());

    let week = &progress.weekly_stats;
    println!("  Week of {}: {} lessons, {} words, {} min, {:.1}% accuracy",
        week.week, week.lessons_completed, week.words_learned, week.time_spent, week.accuracy);
}

fn print_settings(settings: &AppSettings) {
    println!("Settings");
    println!("  theme: {}", settings.theme);
    println!("  language: {}", settings.language);
    println!("  autoPlay: {}", settings.auto_play);
    println!("  showTranslations: {}", settings.show_translations);
    println!("  dailyReminder: {}", settings.daily_reminder);
    println!("  reminderTime: {}", settings.reminder_time);
    println!("  soundEnabled: {}", settings.sound_enabled);
    println!("  animationsEnabled: {}", settings.animations_enabled);
}
