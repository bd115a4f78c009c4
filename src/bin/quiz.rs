use anyhow::Result;
use colored::Colorize;
use env_logger::Env;
use inquire::error::InquireError;
use inquire::{Select, Text};
use std::time::Instant;

use quizmaster::client::QuizClient;
use quizmaster::config;
use quizmaster::models::Difficulty;
use quizmaster::quiz::results::format_duration;
use quizmaster::quiz::{
    option_letter, Advance, FeedbackMode, OptionState, QuizApp, QuizSession, Screen, QUESTION_COUNTS,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    let client = QuizClient::new(&config::endpoint_url());
    log::info!("Using generation endpoint {}", client.endpoint());

    let mut app = QuizApp::new();
    loop {
        let keep_going = match app.screen() {
            Screen::Setup => run_setup(&mut app, &client).await?,
            Screen::Quiz => run_question(&mut app)?,
            Screen::Results => show_results(&mut app)?,
        };
        if !keep_going {
            break;
        }
    }
    println!("{}", "Bye!".dimmed());
    Ok(())
}

/// Esc and Ctrl-C end the program instead of erroring.
fn cancelled<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn print_banner() {
    println!();
    println!("    {}{}", "Quiz".bold().white(), "Master".bold().magenta());
    println!(
        "    {}",
        "AI-powered quizzes on any topic. Test your knowledge and learn something new.".dimmed()
    );
    println!();
}

async fn run_setup(app: &mut QuizApp, client: &QuizClient) -> Result<bool> {
    print_banner();
    if let Some(message) = app.notification() {
        println!("{} {}", "Error:".red().bold(), message);
        println!();
    }

    let Some(topic) = cancelled(
        Text::new("What would you like to learn about?")
            .with_placeholder("e.g., World History, Machine Learning, Space Exploration...")
            .prompt(),
    )?
    else {
        return Ok(false);
    };
    app.setup_mut().set_topic(topic);

    let counts: Vec<String> = QUESTION_COUNTS.iter().map(|c| c.to_string()).collect();
    let default_count = QUESTION_COUNTS
        .iter()
        .position(|c| *c == app.setup().count())
        .unwrap_or_default();
    let Some(count) = cancelled(
        Select::new("Number of questions", counts)
            .with_starting_cursor(default_count)
            .raw_prompt(),
    )?
    else {
        return Ok(false);
    };
    app.setup_mut().select_count(QUESTION_COUNTS[count.index])?;

    let difficulties: Vec<String> = Difficulty::ALL
        .iter()
        .map(|d| format!("{:<7} {}", d.as_str(), d.description().dimmed()))
        .collect();
    let default_difficulty = Difficulty::ALL
        .iter()
        .position(|d| *d == app.setup().difficulty())
        .unwrap_or_default();
    let Some(difficulty) = cancelled(
        Select::new("Difficulty", difficulties)
            .with_starting_cursor(default_difficulty)
            .raw_prompt(),
    )?
    else {
        return Ok(false);
    };
    app.setup_mut().select_difficulty(Difficulty::ALL[difficulty.index]);

    let modes: Vec<&str> = FeedbackMode::ALL.iter().map(|m| m.label()).collect();
    let Some(mode) = cancelled(Select::new("Quiz style", modes).raw_prompt())? else {
        return Ok(false);
    };
    app.setup_mut().select_mode(FeedbackMode::ALL[mode.index]);

    let config = match app.submit() {
        Ok(config) => config,
        Err(e) => {
            println!("{} {}", "Error:".red().bold(), e);
            return Ok(true);
        }
    };

    println!("{}", "Generating quiz...".dimmed());
    let outcome = client.generate(&config).await;
    app.on_generated(outcome, Instant::now());
    Ok(true)
}

fn print_question(session: &QuizSession, now: Instant) {
    let question = session.current_question();
    println!();
    let mut header = format!(
        "Question {} of {}  ·  {}% Complete",
        session.question_number(),
        session.len(),
        session.progress_percent()
    );
    if session.mode() == FeedbackMode::Deferred {
        header.push_str(&format!("  ·  ⏱ {}s", session.elapsed_secs(now)));
    }
    println!("{}", header.dimmed());
    println!("{}", question.question.bold());
    println!();
}

fn option_line(session: &QuizSession, index: usize) -> String {
    let text = &session.current_question().options[index];
    let line = format!("{}. {}", option_letter(index), text);
    match session.option_state(index) {
        OptionState::Correct => format!("✓ {}", line).green().to_string(),
        OptionState::Incorrect => format!("✗ {}", line).red().to_string(),
        OptionState::Selected => format!("● {}", line).cyan().to_string(),
        OptionState::Default => format!("  {}", line),
    }
}

fn run_question(app: &mut QuizApp) -> Result<bool> {
    let Some(session) = app.session() else {
        return Ok(true);
    };
    match session.mode() {
        FeedbackMode::Immediate => run_immediate(app),
        FeedbackMode::Deferred => run_deferred(app),
    }
}

fn run_immediate(app: &mut QuizApp) -> Result<bool> {
    let Some(session) = app.session() else {
        return Ok(true);
    };
    print_question(session, Instant::now());
    let options: Vec<String> = (0..session.current_question().options.len())
        .map(|i| option_line(session, i))
        .collect();

    let Some(choice) = cancelled(Select::new("Your answer", options).raw_prompt())? else {
        return Ok(false);
    };
    app.select(choice.index)?;

    let Some(session) = app.session() else {
        return Ok(true);
    };
    println!();
    for i in 0..session.current_question().options.len() {
        println!("  {}", option_line(session, i));
    }
    if let Some(feedback) = session.feedback() {
        println!();
        let headline = if feedback.is_correct {
            feedback.headline().green().bold()
        } else {
            feedback.headline().yellow().bold()
        };
        println!("  💡 {}", headline);
        println!("     {}", feedback.explanation.dimmed());
    }
    println!();

    let label = session.advance_label();
    if cancelled(Select::new("", vec![format!("{} →", label)]).prompt())?.is_none() {
        return Ok(false);
    }
    app.advance(Instant::now())?;
    Ok(true)
}

fn run_deferred(app: &mut QuizApp) -> Result<bool> {
    loop {
        let Some(session) = app.session() else {
            return Ok(true);
        };
        let now = Instant::now();
        print_question(session, now);

        let option_count = session.current_question().options.len();
        let mut choices: Vec<String> = (0..option_count).map(|i| option_line(session, i)).collect();
        choices.push(format!("{} →", session.advance_label()).bold().to_string());
        choices.push("Skip".dimmed().to_string());

        let Some(choice) = cancelled(
            Select::new("Select an answer, then continue", choices)
                .with_starting_cursor(session.selected().unwrap_or_default())
                .raw_prompt(),
        )?
        else {
            return Ok(false);
        };

        let advanced = match choice.index {
            i if i < option_count => {
                app.select(i)?;
                None
            }
            i if i == option_count => Some(app.advance(Instant::now())?),
            _ => Some(app.skip(Instant::now())?),
        };
        if let Some(advance) = advanced {
            if advance == Advance::Finished {
                println!("{}", "All done! Tallying your results...".dimmed());
            }
            return Ok(true);
        }
    }
}

fn show_results(app: &mut QuizApp) -> Result<bool> {
    let Some(results) = app.results() else {
        app.restart();
        return Ok(true);
    };
    let topic = app.config().map(|c| c.topic.clone()).unwrap_or_default();

    println!();
    println!("    🏆 {}", results.grade.label().bold().magenta());
    println!("    Quiz completed on {}", topic.bold());
    println!();
    println!("    Your Score: {}", format!("{}%", results.percentage).bold());
    let mut counts = format!(
        "    {}   {}",
        format!("✓ {} Correct", results.correct).green(),
        format!("✗ {} Incorrect", results.incorrect).red()
    );
    if results.skipped > 0 || results.total_time.is_some() {
        counts.push_str(&format!("   {}", format!("↷ {} Skipped", results.skipped).yellow()));
    }
    println!("{}", counts);
    if let Some(total) = results.total_time {
        println!("    ⏱ Total time: {}", format_duration(total));
    }

    println!();
    println!("{}", "Question Breakdown".bold());
    for (i, item) in results.breakdown.iter().enumerate() {
        let mark = if item.is_correct { "✓".green() } else { "✗".red() };
        let mut line = format!("{} {}. {}", mark, i + 1, item.question);
        if let Some(secs) = item.time_taken {
            line.push_str(&format!(" {}", format!("({}s)", secs).dimmed()));
        }
        println!("{}", line);
        match &item.your_answer {
            Some(answer) if !item.is_correct => {
                println!("     {}", format!("Your answer: {}", answer).red())
            }
            None => println!("     {}", "Skipped".yellow()),
            _ => {}
        }
        println!("     {}", format!("Correct: {}", item.correct_answer).green());
        println!("     {}", item.explanation.dimmed());
    }
    println!();

    let choices = vec!["Start New Quiz", "Quit"];
    let Some(choice) = cancelled(Select::new("", choices).raw_prompt())? else {
        return Ok(false);
    };
    if choice.index == 0 {
        app.restart();
        Ok(true)
    } else {
        Ok(false)
    }
}
