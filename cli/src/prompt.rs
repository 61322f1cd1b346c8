//! Collects user responses on the console, off the dispatcher thread.

use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use dialoguer::{Confirm, Input as TextInput, Select};
use stk::command::{Input, Menu, TextMessage};
use stk::presenter::MenuLevel;
use stk::{Handle, UserOutcome};
use tracing::debug;

use crate::Result;

const END_SESSION: &str = "<End session>";
const BACK: &str = "<Back>";

/// Something the user has to answer.
#[derive(Debug)]
pub enum Prompt {
    Menu(Menu, MenuLevel),
    Input(Input),
    Text(TextMessage),
    Confirm(TextMessage),
    Tone(TextMessage),
}

/// Spawns the prompt thread. It stops when the user leaves the main menu or every sender is gone.
pub fn spawn(prompts: Receiver<Prompt>, handle: Handle) -> JoinHandle<Result<()>> {
    thread::spawn(move || run(prompts, handle))
}

fn run(prompts: Receiver<Prompt>, handle: Handle) -> Result<()> {
    while let Ok(prompt) = prompts.recv() {
        debug!("Prompting: {:?}", prompt);

        match ask(prompt)? {
            Some(outcome) => handle.user_response(outcome)?,
            None => {
                handle.shutdown()?;
                break;
            }
        }
    }

    Ok(())
}

/// Asks the user. Returns `None` when the user leaves the toolkit.
fn ask(prompt: Prompt) -> Result<Option<UserOutcome>> {
    Ok(Some(match prompt {
        Prompt::Menu(menu, level) => {
            let items: Vec<_> = menu.items.iter().flatten().collect();
            let mut labels: Vec<&str> = items.iter().map(|item| item.text.as_str()).collect();
            if level == MenuLevel::Secondary {
                labels.push(BACK);
                labels.push(END_SESSION);
            }

            let selection = Select::new()
                .with_prompt(menu.title.as_deref().unwrap_or_default())
                .items(&labels)
                .default(0)
                .interact_opt()?;

            match selection {
                Some(i) if i < items.len() => UserOutcome::MenuSelection {
                    item: items[i].id,
                    help: false,
                },
                Some(i) if labels[i] == BACK => UserOutcome::Backward,
                Some(_) => UserOutcome::EndSession,
                None if level == MenuLevel::Main => return Ok(None),
                None => UserOutcome::Backward,
            }
        }
        Prompt::Input(input) if input.yes_no => UserOutcome::YesNo(
            Confirm::new()
                .with_prompt(input.text.unwrap_or_default())
                .interact()?,
        ),
        Prompt::Input(input) => UserOutcome::Input {
            text: TextInput::<String>::new()
                .with_prompt(input.text.unwrap_or_default())
                .with_initial_text(input.default_text.unwrap_or_default())
                .allow_empty(input.min_len == 0)
                .interact_text()?,
            help: false,
        },
        Prompt::Text(text) => {
            println!("{}", title_and_text(&text));
            UserOutcome::Confirm(Confirm::new().with_prompt("OK?").default(true).interact()?)
        }
        Prompt::Confirm(text) => {
            UserOutcome::Confirm(Confirm::new().with_prompt(title_and_text(&text)).interact()?)
        }
        Prompt::Tone(text) => {
            println!("\u{7}{}", text.text.unwrap_or_default());
            UserOutcome::Done
        }
    }))
}

fn title_and_text(text: &TextMessage) -> String {
    match (&text.title, &text.text) {
        (Some(title), Some(body)) if !title.is_empty() => format!("[{}] {}", title, body),
        (_, Some(body)) => body.clone(),
        _ => String::new(),
    }
}
