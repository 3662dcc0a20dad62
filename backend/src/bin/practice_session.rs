//! Terminal driver for a practice session
//!
//! Usage: `practice_session [persona] [industry]`. Type your lines as the
//! salesperson; `/finish` asks for the debrief, EOF quits.

use solve_coach_backend::bridge::ConversationBridge;
use solve_coach_backend::config::Config;
use solve_coach_backend::session::catalog;
use solve_coach_backend::session::{
    finish_session, start_session, submit_user_turn, Conversation, RubricStage, Speaker,
};
use tokio::io::{AsyncBufReadExt, BufReader};

fn print_turn(speaker: Speaker, text: &str) {
    let label = match speaker {
        Speaker::Coach => "Coach",
        Speaker::Prospect => "Prospect",
        Speaker::User => "You",
    };
    println!("{}: {}\n", label, text);
}

fn print_rubric(conversation: &Conversation) {
    let marks: Vec<String> = RubricStage::ALL
        .iter()
        .map(|stage| {
            let mark = if conversation.rubric.get(*stage) { "x" } else { " " };
            format!("[{}] {}", mark, stage.label())
        })
        .collect();
    println!("   {}\n", marks.join("  "));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let persona = args
        .next()
        .unwrap_or_else(|| catalog::personas()[0].id.to_string());
    let industry = args
        .next()
        .unwrap_or_else(|| catalog::industries()[0].id.to_string());

    let config = Config::from_env();
    let bridge = ConversationBridge::new(config.bridge)?;

    let mut conversation = start_session(&persona, &industry)?;
    for turn in &conversation.turns {
        print_turn(turn.speaker, &turn.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line == "/finish" {
            match finish_session(&bridge, &mut conversation).await {
                Ok(()) => {
                    if let Some(turn) = conversation.last_turn() {
                        print_turn(turn.speaker, &turn.text);
                    }
                    print_rubric(&conversation);
                    break;
                }
                Err(e) => {
                    eprintln!("   ! {}\n", e);
                    continue;
                }
            }
        }

        match submit_user_turn(&bridge, &mut conversation, line).await {
            Ok(()) => {
                if let Some(turn) = conversation.last_turn() {
                    print_turn(turn.speaker, &turn.text);
                }
                print_rubric(&conversation);
            }
            Err(e) => eprintln!("   ! {} (your message was kept; try again or /finish)\n", e),
        }
    }

    Ok(())
}
