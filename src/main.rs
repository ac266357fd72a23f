mod app;
mod config;
mod engine;
mod generator;
mod session;
mod store;

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use app::App;
use engine::difficulty::AssessmentTier;
use generator::question::{Operation, Question};
use session::practice::PracticeKind;
use session::record::SessionRecord;

#[derive(Parser)]
#[command(name = "mathdr", version, about = "Mental arithmetic trainer with adaptive difficulty")]
struct Cli {
    #[arg(short, long, help = "Game length in seconds")]
    duration: Option<u32>,

    #[arg(short, long, help = "Answer with multiple-choice buttons instead of typing")]
    choice: bool,

    #[arg(long, help = "Seed the question generator (for reproducible runs)")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app = App::new(cli.seed);
    if let Some(duration) = cli.duration {
        app.config.game_duration_secs = duration;
        app.config.normalize();
    }
    if cli.choice {
        app.config.answer_mode = "choice".to_string();
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    if !app.profile.assessment_done {
        ask_assessment(&mut app, &mut lines)?;
    }

    loop {
        let p = &app.profile.progression;
        println!();
        println!(
            "mathdr — level {} ({}/{} XP)",
            p.level, p.xp, p.xp_to_next
        );
        println!("  [1] timed game   [2] practice an operation");
        println!("  [3] redo wrong answers ({})", app.profile.tracker.wrong_queue.len());
        println!("  [4] redo slow answers ({})", app.profile.tracker.slow_queue.len());
        println!("  [5] stats   [6] operations   [q] quit");

        match read_line(&mut lines, "> ")? {
            None => break,
            Some(input) => match input.trim() {
                "1" => run_game(&mut app, &mut lines)?,
                "2" => {
                    if let Some(op) = choose_operation(&mut app, &mut lines)? {
                        app.start_targeted_practice(op);
                        run_practice(&mut app, &mut lines)?;
                    }
                }
                "3" => {
                    if app.start_review_practice(PracticeKind::WrongOnes) {
                        run_practice(&mut app, &mut lines)?;
                    } else {
                        println!("Nothing in the wrong-answer list. Good.");
                    }
                }
                "4" => {
                    if app.start_review_practice(PracticeKind::SlowOnes) {
                        run_practice(&mut app, &mut lines)?;
                    } else {
                        println!("Nothing in the slow-answer list.");
                    }
                }
                "5" => print_stats(&app),
                "6" => toggle_operations(&mut app, &mut lines)?,
                "q" | "quit" | "exit" => break,
                _ => {}
            },
        }
    }

    Ok(())
}

fn read_line(
    lines: &mut io::Lines<io::StdinLock<'_>>,
    prompt: &str,
) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}

fn ask_assessment(app: &mut App, lines: &mut io::Lines<io::StdinLock<'_>>) -> Result<()> {
    println!("How good is your mental arithmetic?");
    println!("  [1] bad   [2] good   [3] nice   [4] perfect");
    let tier = match read_line(lines, "> ")?.as_deref().map(str::trim) {
        Some("1") => AssessmentTier::Bad,
        Some("3") => AssessmentTier::Nice,
        Some("4") => AssessmentTier::Perfect,
        _ => AssessmentTier::Good,
    };
    app.set_assessment(tier);
    Ok(())
}

/// One question round: print, collect, score. Returns None on EOF, or the
/// parsed answer. In choice mode the user picks a letter from four options.
fn ask_question(
    app: &mut App,
    lines: &mut io::Lines<io::StdinLock<'_>>,
    question: &Question,
    show_hint: bool,
) -> Result<Option<(f64, f64)>> {
    println!();
    println!("  {}", question.text);
    if show_hint && app.config.practice_hints {
        let hint = app.hint(question);
        if !hint.is_empty() {
            for line in hint.lines() {
                println!("  {line}");
            }
        }
    }

    let choices = if app.config.multiple_choice() {
        let options = app.choices_for(question);
        for (i, value) in options.iter().enumerate() {
            println!("  [{}] {}", (b'a' + i as u8) as char, format_number(*value));
        }
        Some(options)
    } else {
        None
    };

    let started = Instant::now();
    loop {
        let Some(input) = read_line(lines, "  = ")? else {
            return Ok(None);
        };
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        let parsed = match &choices {
            Some(options) => {
                let idx = match input {
                    "a" | "A" => 0,
                    "b" | "B" => 1,
                    "c" | "C" => 2,
                    "d" | "D" => 3,
                    _ => {
                        println!("  pick a, b, c or d");
                        continue;
                    }
                };
                options[idx]
            }
            None => match input.parse::<f64>() {
                Ok(value) => value,
                Err(_) => {
                    println!("  not a number");
                    continue;
                }
            },
        };
        return Ok(Some((parsed, started.elapsed().as_secs_f64())));
    }
}

fn run_game(app: &mut App, lines: &mut io::Lines<io::StdinLock<'_>>) -> Result<()> {
    let duration = app.config.game_duration_secs;
    println!();
    println!("Timed game: {duration} seconds. Enter answers; the clock runs between questions.");

    app.start_game();
    let session_start = Instant::now();

    while session_start.elapsed().as_secs() < duration as u64 {
        let question = app.next_game_question();
        if question.is_error() {
            println!("No operations enabled. Turn some on in the operations menu.");
            break;
        }
        let Some((answer, elapsed)) = ask_question(app, lines, &question, false)? else {
            break;
        };
        let outcome = app.submit_game_answer(&question, answer, elapsed);
        if outcome.correct {
            println!("  correct (+{} XP)", outcome.xp_awarded);
        } else {
            println!("  wrong — {} = {}", question.text.trim_end_matches(" = ?"), format_number(outcome.correct_answer));
        }
        for _ in 0..outcome.levels_gained {
            println!("  *** level up! now level {} ***", app.profile.progression.level);
        }
    }

    let elapsed = session_start.elapsed().as_secs() as u32;
    match app.finish_game(elapsed.min(duration)) {
        Some(record) => print_session_summary("Game over", &record),
        None => println!("No questions answered."),
    }
    Ok(())
}

fn run_practice(app: &mut App, lines: &mut io::Lines<io::StdinLock<'_>>) -> Result<()> {
    println!();
    println!("Practice: answer each question; correct answers clear it from the list.");
    let session_start = Instant::now();

    while let Some(question) = app.next_practice_question() {
        if question.is_error() {
            println!("No operations enabled. Turn some on in the operations menu.");
            break;
        }
        if let Some(session) = &app.practice {
            if let Some(entry) = session.current_entry() {
                if let (Some(time), Some(avg)) = (entry.original_time, entry.avg_at_detection) {
                    println!("  (took {time}s last time; your average was {avg}s)");
                }
            }
        }
        let Some((answer, elapsed)) = ask_question(app, lines, &question, true)? else {
            break;
        };
        let outcome = app.submit_practice_answer(&question, answer, elapsed);
        if outcome.correct {
            println!("  correct");
        } else {
            println!("  wrong — the answer is {}", format_number(outcome.correct_answer));
        }
    }

    let elapsed = session_start.elapsed().as_secs() as u32;
    match app.finish_practice(elapsed) {
        Some(record) => print_session_summary("Practice done", &record),
        None => println!("Nothing practiced."),
    }
    Ok(())
}

fn choose_operation(
    app: &mut App,
    lines: &mut io::Lines<io::StdinLock<'_>>,
) -> Result<Option<Operation>> {
    let active = app.profile.active_operations();
    if active.is_empty() {
        println!("No operations enabled.");
        return Ok(None);
    }
    println!("Practice which operation? (weakest listed first)");
    let ranked = app.weaknesses();
    let ordered: Vec<Operation> = ranked
        .iter()
        .map(|(op, _)| *op)
        .chain(active.iter().copied().filter(|op| !ranked.iter().any(|(r, _)| r == op)))
        .collect();
    for (i, op) in ordered.iter().enumerate() {
        let stat = app.profile.tracker.stat(*op);
        if stat.total_answered() > 0 {
            println!(
                "  [{}] {} — {:.0}% correct, {:.1}s avg",
                i + 1,
                op.label(),
                stat.accuracy(),
                stat.avg_time
            );
        } else {
            println!("  [{}] {}", i + 1, op.label());
        }
    }
    let Some(input) = read_line(lines, "> ")? else {
        return Ok(None);
    };
    let index = input.trim().parse::<usize>().unwrap_or(0);
    Ok(index.checked_sub(1).and_then(|i| ordered.get(i)).copied())
}

fn toggle_operations(app: &mut App, lines: &mut io::Lines<io::StdinLock<'_>>) -> Result<()> {
    loop {
        println!("Toggle operations (locked ones need a higher level):");
        for (i, op) in Operation::ALL.iter().enumerate() {
            let enabled = app.profile.operations.get(op).copied().unwrap_or(false);
            let locked = app.profile.progression.level < op.unlock_level();
            let mark = if enabled { "x" } else { " " };
            if locked {
                println!(
                    "  [{}] [{mark}] {} (unlocks at level {})",
                    i + 1,
                    op.label(),
                    op.unlock_level()
                );
            } else {
                println!("  [{}] [{mark}] {}", i + 1, op.label());
            }
        }
        println!("  [q] back");
        let Some(input) = read_line(lines, "> ")? else {
            return Ok(());
        };
        let input = input.trim();
        if input == "q" {
            return Ok(());
        }
        if let Some(op) = input
            .parse::<usize>()
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| Operation::ALL.get(i))
        {
            let enabled = app.profile.operations.get(op).copied().unwrap_or(false);
            app.toggle_operation(*op, !enabled);
        }
    }
}

fn print_stats(app: &App) {
    println!();
    println!("Lifetime stats:");
    for op in app.profile.active_operations() {
        let stat = app.profile.tracker.stat(op);
        if stat.total_answered() == 0 {
            continue;
        }
        println!(
            "  {:<14} {:>4} answered, {:>5.1}% correct, {:.1}s avg",
            op.label(),
            stat.total_answered(),
            stat.accuracy(),
            stat.avg_time
        );
    }
    let history = &app.profile.session_history;
    if history.is_empty() {
        println!("  no sessions yet");
        return;
    }
    println!("Recent sessions:");
    for record in history.iter().rev().take(10) {
        println!(
            "  {}  {:>3} questions, {:>5.1}% correct, {:.1}s avg, +{} XP",
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.total,
            record.accuracy,
            record.avg_time,
            record.xp_gained
        );
    }
}

fn print_session_summary(title: &str, record: &SessionRecord) {
    println!();
    println!(
        "{title}: {}/{} correct ({:.1}%), {:.1}s average, +{} XP",
        record.correct, record.total, record.accuracy, record.avg_time, record.xp_gained
    );
    let mut ops: Vec<_> = record.operations.iter().collect();
    ops.sort_by_key(|(op, _)| **op);
    for (op, breakdown) in ops {
        println!(
            "  {:<14} {}/{} correct, {:.1}s avg",
            op.label(),
            breakdown.correct,
            breakdown.total,
            breakdown.avg_time
        );
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
