// UI layer: an interactive form built from `dialoguer` prompts.
// Picking an operation asks only for the fields it needs, runs it, and
// shows the result in a panel that stays up until Enter is pressed.

use crate::api::ApiClient;
use crate::form::{self, FormInput, Outcome};
use crate::query::Operation;
use anyhow::Result;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const EXIT: &str = "Exit";

/// Main interactive menu. Loops over the operation selector until the
/// user picks "Exit". Request errors are shown in the result panel and
/// do not end the loop; only terminal IO errors propagate.
pub fn main_menu(api: &ApiClient) -> Result<()> {
    let mut items: Vec<&str> = Operation::ALL.iter().map(|op| op.label()).collect();
    items.push(EXIT);

    loop {
        let selection = Select::new()
            .with_prompt("Select function")
            .items(&items)
            .default(0)
            .interact()?;
        let label = items[selection];
        if label == EXIT {
            break;
        }

        let input = read_fields(label)?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        spinner.set_message(format!("{}...", label));
        spinner.enable_steady_tick(Duration::from_millis(100));
        let outcome = form::run(api, label, &input);
        spinner.finish_and_clear();

        match outcome {
            Ok(outcome) => show_result(&outcome)?,
            Err(e) => show_error(&e)?,
        }
    }
    Ok(())
}

/// Prompt for the fields the selected operation shows, in form order.
fn read_fields(label: &str) -> Result<FormInput> {
    let mut input = FormInput::default();
    let operation = Operation::from_label(label);
    for field in form::fields_visible_for(label) {
        let prompt = match operation {
            Some(op) => field.label_for(op),
            None => field.label(),
        };
        let value: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        input.set(field, value);
    }
    Ok(input)
}

fn show_result(outcome: &Outcome) -> Result<()> {
    println!("{}", panel("Result", &outcome.render()));
    wait_for_dismiss()
}

fn show_error(err: &crate::error::QueryError) -> Result<()> {
    println!("{}", panel("Error", &err.to_string()));
    wait_for_dismiss()
}

/// Blocks like a modal dialog: nothing else happens until Enter.
fn wait_for_dismiss() -> Result<()> {
    let _: String = Input::new()
        .with_prompt("Press Enter to continue")
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}

/// Titled block around `body`, sized to its widest line.
pub fn panel(title: &str, body: &str) -> String {
    let width = body
        .lines()
        .map(|l| l.chars().count())
        .chain(std::iter::once(title.chars().count() + 2))
        .max()
        .unwrap_or(0);
    let rule = "-".repeat(width);
    format!("[ {} ]\n{}\n{}\n{}", title, rule, body, rule)
}
