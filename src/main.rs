// src/main.rs

use log::{debug, error, info};
use quiz_trainer_lib::config::Config;
use quiz_trainer_lib::models::AppState;
use quiz_trainer_lib::player::{self, Avatar, Player, SqlitePreferences};
use quiz_trainer_lib::{Answer, ProgressStore};
use rusqlite::Connection;
use std::process::ExitCode;
use std::sync::MutexGuard;

const USAGE: &str = "usage: quiz-trainer <command>

commands:
  categories                         list categories with progress
  show <category-id>                 show the quizzes of a category
  answer <category-id> <position> <answer>
                                     answer a quiz (lists and sets as JSON)
  score                              total score over all categories
  reset                              restore the bundled content
  sign-in <first-name> <initial> <AVATAR>
  whoami
  sign-out";

fn lock(state: &AppState) -> Result<MutexGuard<'_, ProgressStore>, String> {
    state.store.lock().map_err(|e| e.to_string())
}

fn list_categories(state: &AppState) -> Result<(), String> {
    let mut store = lock(state)?;
    let categories = store.get_categories(false).map_err(|e| e.to_string())?;
    if categories.is_empty() {
        println!("No categories available.");
    }
    for c in categories {
        println!(
            "{:<14} {:<14} [{}] {}/{} answered, score {}{}",
            c.id(),
            c.name(),
            c.theme(),
            c.first_unsolved_quiz_position(),
            c.quizzes().len(),
            c.score(),
            if c.is_solved() { " (solved)" } else { "" }
        );
    }
    Ok(())
}

fn show_category(state: &AppState, category_id: &str) -> Result<(), String> {
    let store = lock(state)?;
    let category = store.get_category(category_id).map_err(|e| e.to_string())?;
    println!("{} ({})", category.name(), category.theme());
    for (i, quiz) in category.quizzes().iter().enumerate() {
        let marker = match (quiz.is_solved(), category.is_solved_correctly(quiz)) {
            (false, _) => " ",
            (true, true) => "+",
            (true, false) => "-",
        };
        println!("{} #{} {}", marker, i, quiz);
        if quiz.is_solved() {
            let answer = quiz.string_answer().map_err(|e| e.to_string())?;
            println!("     answer: {}", answer.replace('\n', " / "));
        }
    }
    Ok(())
}

fn submit_answer(
    state: &AppState,
    category_id: &str,
    position: &str,
    raw: Option<&str>,
) -> Result<(), String> {
    let position: usize = position
        .parse()
        .map_err(|_| format!("'{}' is not a quiz position", position))?;
    let mut store = lock(state)?;
    let category = store.get_category(category_id).map_err(|e| e.to_string())?;
    let quiz = category
        .quiz(position)
        .ok_or_else(|| format!("Category '{}' has no quiz #{}", category_id, position))?;

    // Unreadable input is scored as a wrong answer, the play flow goes on.
    let candidate = raw.and_then(|r| match Answer::parse(quiz.quiz_type().answer_shape(), r) {
        Ok(answer) => Some(answer),
        Err(e) => {
            debug!("Treating unreadable answer as incorrect: {}", e);
            None
        }
    });

    let outcome = store
        .submit_answer(category_id, position, candidate)
        .map_err(|e| e.to_string())?;
    println!("{}", if outcome.correct { "Correct!" } else { "Wrong." });
    if outcome.category_solved {
        println!(
            "Category solved with a score of {}.",
            outcome.category_score
        );
    } else {
        println!("Next quiz: #{}", outcome.next_position);
    }
    Ok(())
}

fn print_score(state: &AppState) -> Result<(), String> {
    let score = lock(state)?.get_score().map_err(|e| e.to_string())?;
    println!("Total score: {}", score);
    Ok(())
}

fn reset(state: &AppState) -> Result<(), String> {
    lock(state)?.reset().map_err(|e| e.to_string())?;
    println!("Progress reset.");
    Ok(())
}

fn run_player_command(config: &Config, args: &[String]) -> Result<(), String> {
    let conn = Connection::open(&config.db_path).map_err(|e| e.to_string())?;
    let mut prefs = SqlitePreferences::open(conn).map_err(|e| e.to_string())?;

    match args {
        [cmd, first, initial, avatar] if cmd == "sign-in" => {
            let avatar = avatar.parse::<Avatar>().map_err(|e| e.to_string())?;
            let player = Player::new(first, initial, avatar).map_err(|e| e.to_string())?;
            player::write_player(&mut prefs, &player).map_err(|e| e.to_string())?;
            println!("Welcome, {} {}.", player.first_name, player.last_initial);
        }
        [cmd] if cmd == "whoami" => match player::read_player(&prefs).map_err(|e| e.to_string())? {
            Some(p) => println!("{} {}. ({})", p.first_name, p.last_initial, p.avatar),
            None => println!("Not signed in."),
        },
        [cmd] if cmd == "sign-out" => {
            player::sign_out(&mut prefs).map_err(|e| e.to_string())?;
            println!("Signed out.");
        }
        _ => return Err(USAGE.to_string()),
    }
    Ok(())
}

fn open_state(config: &Config) -> Result<AppState, String> {
    let content = config.load_content().map_err(|e| e.to_string())?;
    info!("Database path: {:?}", config.db_path);
    let conn = Connection::open(&config.db_path).map_err(|e| e.to_string())?;
    let store = ProgressStore::open(conn, content).map_err(|e| e.to_string())?;
    Ok(AppState::new(store))
}

fn run(config: &Config, args: &[String]) -> Result<(), String> {
    let Some(command) = args.first() else {
        return Err(USAGE.to_string());
    };
    if matches!(command.as_str(), "sign-in" | "whoami" | "sign-out") {
        return run_player_command(config, args);
    }

    let state = open_state(config)?;
    match args {
        [cmd] if cmd == "categories" => list_categories(&state),
        [cmd, id] if cmd == "show" => show_category(&state, id),
        [cmd, id, position] if cmd == "answer" => submit_answer(&state, id, position, None),
        [cmd, id, position, raw] if cmd == "answer" => {
            submit_answer(&state, id, position, Some(raw))
        }
        [cmd] if cmd == "score" => print_score(&state),
        [cmd] if cmd == "reset" => reset(&state),
        _ => Err(USAGE.to_string()),
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    debug!("Starting quiz trainer with {:?}", config);
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&config, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
