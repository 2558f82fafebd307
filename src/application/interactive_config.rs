//! Interactive run configuration
//!
//! Asks for every run parameter in turn. Blank or unparseable answers take
//! the configured default.

use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::{RunConfig, RunDefaults, TokenMetadataInput, Timing, TradeParams, WalletRef};
use crate::ports::{Prompt, PromptError};

/// Gather a [`RunConfig`] for `wallet` from the operator
pub fn gather_run_config(
    prompt: &dyn Prompt,
    wallet: WalletRef,
    defaults: &RunDefaults,
) -> Result<RunConfig, PromptError> {
    let name = text_or(prompt, "Enter token name: ", &defaults.token_name)?;
    let symbol = text_or(prompt, "Enter token symbol: ", &defaults.token_symbol)?;
    let description = text_or(
        prompt,
        "Enter token description (optional): ",
        &defaults.token_description,
    )?;
    let twitter = text_or(prompt, "Enter Twitter URL (optional): ", &defaults.twitter_url)?;
    let telegram = text_or(prompt, "Enter Telegram URL (optional): ", &defaults.telegram_url)?;
    let website = text_or(prompt, "Enter website URL (optional): ", &defaults.website_url)?;
    let logo_path = text_or(
        prompt,
        &format!("Enter path to logo image (default: {}): ", defaults.logo_path),
        &defaults.logo_path,
    )?;

    let initial_amount_sol = parsed_or(
        prompt,
        &format!("Enter initial amount in SOL (default: {}): ", defaults.initial_amount_sol),
        defaults.initial_amount_sol,
    )?;
    let slippage_pct = integer_or(
        prompt,
        &format!("Enter slippage percentage (default: {}): ", defaults.slippage_pct),
        defaults.slippage_pct,
    )?;
    let priority_fee_sol = parsed_or(
        prompt,
        &format!("Enter priority fee (default: {}): ", defaults.priority_fee_sol),
        defaults.priority_fee_sol,
    )?;
    let wait_time_ms = integer_or(
        prompt,
        &format!("Enter wait time in milliseconds (default: {}): ", defaults.wait_time_ms),
        defaults.wait_time_ms,
    )?;
    let cycles = integer_or(
        prompt,
        &format!("Enter number of cycles (default: {}): ", defaults.cycles),
        defaults.cycles,
    )?;

    let config = RunConfig {
        wallet,
        token: TokenMetadataInput {
            name,
            symbol,
            description,
            twitter,
            telegram,
            website,
            logo_path: PathBuf::from(logo_path),
        },
        trade: TradeParams {
            initial_amount_sol,
            slippage_pct,
            priority_fee_sol,
        },
        timing: Timing { wait_time_ms, cycles },
    };

    Ok(config.sanitize(defaults))
}

fn text_or(prompt: &dyn Prompt, question: &str, default: &str) -> Result<String, PromptError> {
    let answer = prompt.ask(question)?;
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer)
    }
}

fn parsed_or<T: FromStr>(prompt: &dyn Prompt, question: &str, default: T) -> Result<T, PromptError> {
    let answer = prompt.ask(question)?;
    Ok(answer.parse().unwrap_or(default))
}

/// Integer answers keep their leading digits, so "15.5" reads as 15
fn integer_or<T: FromStr>(prompt: &dyn Prompt, question: &str, default: T) -> Result<T, PromptError> {
    let answer = prompt.ask(question)?;
    Ok(leading_integer(&answer).parse().unwrap_or(default))
}

fn leading_integer(answer: &str) -> &str {
    let digits_from = usize::from(answer.starts_with(['+', '-']));
    let end = answer[digits_from..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(answer.len(), |i| i + digits_from);
    &answer[..end]
}
