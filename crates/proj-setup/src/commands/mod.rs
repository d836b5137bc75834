//! Command handlers
//!
//! Each command has two front ends that build the same request: flags, or
//! dialoguer prompts when the command's selecting argument is missing.

pub mod cli_config;
pub mod git_setup;
pub mod layout;
pub mod project_init;
pub mod venv_setup;

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use std::fmt::Display;
use std::str::FromStr;

/// Parse an optional choice flag with the domain's error message
fn parse_choice<T>(value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr<Err = proj_setup_core::Error>,
{
    Ok(value.map(str::parse).transpose()?)
}

/// Pick one of `choices`, starting on `default`
fn select<T: Copy + Display + PartialEq>(prompt: &str, choices: &[T], default: T) -> Result<T> {
    let labels: Vec<String> = choices.iter().map(ToString::to_string).collect();
    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(choices.iter().position(|c| *c == default).unwrap_or(0))
        .interact()?;
    Ok(choices[selection])
}

/// Ask for a non-empty line of text
fn input(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|v: &String| {
            if v.trim().is_empty() {
                Err("a value is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Ask for a line of text that may be left empty
fn input_optional(prompt: &str, default: &str) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .allow_empty(true)
        .interact_text()?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
