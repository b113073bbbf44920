use std::io::Write;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::io::Lines;
use tokio::io::Stdin;
use yansi::Paint;

use crate::domain::models::Author;
use crate::domain::models::BackendBox;
use crate::domain::models::Message;
use crate::domain::models::ReflectionVerdict;
use crate::domain::models::SessionConfig;
use crate::domain::models::SessionState;
use crate::domain::services::SessionController;

pub fn session_help_text() -> String {
    let text = r#"
COMMANDS:
- /hint (/h) - Ask the writing partner for a hint on your draft so far.
- /show (/s) - Print the prompt, the draft, and the word count.
- /done (/d) - Submit the draft and move to the reflection screen.
- /reset - Discard the session and return to configuration.
- /help - Provides this help menu.
- /quit (/q) - Exit Penpal.

Any other line is appended to the draft. An empty line leaves the draft as it is.
        "#;

    return text.trim().to_string();
}

fn word_count(draft: &str) -> usize {
    return draft.split_whitespace().count();
}

fn print_message(message: &Message) {
    let author = message.author.to_string();
    if message.author == Author::Assistant {
        println!("{} {}", Paint::cyan(format!("{author}:")).bold(), message.text);
    } else {
        println!("{} {}", Paint::green(format!("{author}:")).bold(), message.text);
    }
}

fn print_prompt_card(config: &SessionConfig) {
    println!("{}", Paint::new("DAILY PROMPT").underline().bold());
    println!("{}", config.constraint);
    println!(
        "{} {}  {} {}",
        Paint::new("Topic:").dimmed(),
        config.topic,
        Paint::new("Vocab:").dimmed(),
        config.vocabulary
    );
    println!();
}

fn print_verdict(verdict: &ReflectionVerdict) {
    println!("{}", Paint::new("REFLECTION").underline().bold());
    println!("Sentences written: {}", verdict.sentence_count);
    println!("One strength: {}", verdict.strength);
    println!("One thing to try next: {}", verdict.improvement);
    println!();
}

async fn read_line(
    lines: &mut Lines<BufReader<Stdin>>,
    prompt: &str,
) -> Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let Some(line) = lines.next_line().await? else {
        return Ok(None);
    };

    return Ok(Some(line.trim().to_string()));
}

async fn read_config(lines: &mut Lines<BufReader<Stdin>>) -> Result<Option<SessionConfig>> {
    println!("{}", Paint::new("SESSION SETUP").underline().bold());

    let Some(topic) = read_line(lines, "Topic: ").await? else {
        return Ok(None);
    };
    let Some(vocabulary) = read_line(lines, "Vocabulary (comma separated): ").await? else {
        return Ok(None);
    };
    let Some(constraint) = read_line(lines, "Task: ").await? else {
        return Ok(None);
    };

    return Ok(Some(SessionConfig {
        topic,
        vocabulary,
        constraint,
    }));
}

async fn handle_writing_line(
    controller: &mut SessionController,
    backend: &BackendBox,
    line: &str,
) -> Result<bool> {
    match line {
        "" => {}
        "/hint" | "/h" => {
            println!("{}", Paint::new("Thinking...").dimmed());
            controller.request_hint(backend).await?;
            if let Some(message) = controller.messages().last() {
                print_message(message);
            }
        }
        "/show" | "/s" => {
            if let Some(config) = controller.config() {
                print_prompt_card(config);
            }
            println!("{}", controller.draft());
            println!("{}", Paint::new(format!("{} words", word_count(controller.draft()))).dimmed());
        }
        "/done" | "/d" => {
            controller.finish()?;
        }
        "/reset" => {
            controller.reset();
        }
        "/help" => {
            println!("{}", session_help_text());
        }
        "/quit" | "/q" => {
            return Ok(false);
        }
        _ => {
            let draft = controller.draft();
            let updated = if draft.is_empty() {
                line.to_string()
            } else {
                format!("{draft}\n{line}")
            };
            controller.update_draft(&updated)?;
            println!("{}", Paint::new(format!("{} words", word_count(controller.draft()))).dimmed());
        }
    }

    return Ok(true);
}

async fn show_reflection(
    controller: &SessionController,
    backend: &BackendBox,
) -> Result<()> {
    println!();
    println!("{}", Paint::new("SESSION COMPLETE").underline().bold());

    // The result is always set in Reflecting.
    if let Some(result) = controller.result() {
        println!("{}", result.text);
        println!(
            "{}",
            Paint::new(format!(
                "{} words, {} messages exchanged",
                word_count(&result.text),
                result.messages.len()
            ))
            .dimmed()
        );
        println!();
    }

    let verdict = controller.reflect(backend).await?;
    print_verdict(&verdict);

    return Ok(());
}

pub async fn start(backend: BackendBox) -> Result<()> {
    let mut controller = SessionController::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!(
        "{}",
        Paint::new("Penpal, your classroom writing partner. Type /help for commands.").bold()
    );
    println!();

    loop {
        match controller.state() {
            SessionState::Configuring => {
                let Some(config) = read_config(&mut lines).await? else {
                    return Ok(());
                };

                controller.start(config)?;
                println!();
                if let Some(config) = controller.config() {
                    print_prompt_card(config);
                }
                for message in controller.messages() {
                    print_message(message);
                }
            }
            SessionState::Writing => {
                let Some(line) = read_line(&mut lines, "> ").await? else {
                    return Ok(());
                };

                if !handle_writing_line(&mut controller, &backend, &line).await? {
                    return Ok(());
                }
            }
            SessionState::Reflecting => {
                show_reflection(&controller, &backend).await?;

                let Some(line) =
                    read_line(&mut lines, "Press Enter for a new session, or /quit to exit: ")
                        .await?
                else {
                    return Ok(());
                };

                if line == "/quit" || line == "/q" {
                    return Ok(());
                }
                controller.reset();
            }
        }
    }
}
