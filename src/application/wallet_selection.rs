//! Wallet Selection
//!
//! Interactive choice of the signing wallet from the wallet store. An empty
//! store generates a wallet straight away; otherwise the operator picks a
//! stored wallet, creates a new one, or deletes one and chooses again.
//! Invalid answers are tolerated up to a fixed number of attempts.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::{WalletRecord, WalletStore, WalletStoreError};
use crate::ports::{Prompt, PromptError};

/// Default number of invalid answers tolerated
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Wallet store error: {0}")]
    Store(#[from] WalletStoreError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error("Gave up after {0} invalid answers")]
    TooManyInvalidAttempts(u32),
}

/// Menu entry chosen by the operator
#[derive(Debug, Clone, PartialEq, Eq)]
enum MenuChoice {
    Existing(String),
    CreateNew,
    Delete,
    Invalid,
}

fn parse_choice(answer: &str, names: &[String]) -> MenuChoice {
    let Ok(choice) = answer.trim().parse::<usize>() else {
        return MenuChoice::Invalid;
    };
    let count = names.len();
    match choice {
        c if (1..=count).contains(&c) => MenuChoice::Existing(names[c - 1].clone()),
        c if c == count + 1 => MenuChoice::CreateNew,
        c if c == count + 2 => MenuChoice::Delete,
        _ => MenuChoice::Invalid,
    }
}

pub struct WalletSelector {
    store: WalletStore,
    prompt: Arc<dyn Prompt>,
    max_attempts: u32,
}

impl WalletSelector {
    pub fn new(store: WalletStore, prompt: Arc<dyn Prompt>) -> Self {
        Self {
            store,
            prompt,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Run the selection menu until a wallet is chosen or created
    pub fn select(&self) -> Result<WalletRecord, SelectionError> {
        let mut invalid = 0;

        loop {
            let names = self.store.names();
            if names.is_empty() {
                self.prompt.say("No stored wallets found. Creating a new one.");
                return self.create_new();
            }

            self.prompt.say("Stored wallets:");
            for (index, name) in names.iter().enumerate() {
                self.prompt.say(&format!("{}. {}", index + 1, name));
            }
            self.prompt.say(&format!("{}. Create a new wallet", names.len() + 1));
            self.prompt.say(&format!("{}. Delete a wallet", names.len() + 2));

            let answer = self.prompt.ask("Select an option: ")?;
            match parse_choice(&answer, &names) {
                MenuChoice::Existing(name) => {
                    if let Some(record) = self.store.get(&name) {
                        return Ok(record);
                    }
                    // Removed behind our back; show the menu again
                }
                MenuChoice::CreateNew => return self.create_new(),
                MenuChoice::Delete => self.delete_interactive()?,
                MenuChoice::Invalid => {
                    invalid += 1;
                    if invalid >= self.max_attempts {
                        return Err(SelectionError::TooManyInvalidAttempts(invalid));
                    }
                    self.prompt.say("Invalid choice. Please try again.");
                }
            }
        }
    }

    /// Generate a wallet under an operator-supplied name
    pub fn create_new(&self) -> Result<WalletRecord, SelectionError> {
        let mut attempts = 0;
        let name = loop {
            let name = self.prompt.ask("Enter a name for this wallet: ")?;
            if !name.is_empty() {
                break name;
            }
            attempts += 1;
            if attempts >= self.max_attempts {
                return Err(SelectionError::TooManyInvalidAttempts(attempts));
            }
            self.prompt.say("Wallet name cannot be empty.");
        };

        let record = self.store.generate(&name)?;
        self.prompt.say("New wallet generated:");
        self.prompt.say(&format!("Public Key: {}", record.public_key));
        self.prompt.say(&format!("Private Key: {}", record.private_key));
        self.prompt.say(&format!("Wallet \"{}\" has been stored.", record.name));
        Ok(record)
    }

    /// Pick a stored wallet by number and delete it (0 cancels)
    pub fn delete_interactive(&self) -> Result<(), SelectionError> {
        let names = self.store.names();
        if names.is_empty() {
            self.prompt.say("No stored wallets to delete.");
            return Ok(());
        }

        self.prompt.say("Select a wallet to delete:");
        for (index, name) in names.iter().enumerate() {
            self.prompt.say(&format!("{}. {}", index + 1, name));
        }

        let answer = self
            .prompt
            .ask("Enter the number of the wallet to delete (or 0 to cancel): ")?;
        match answer.trim().parse::<usize>() {
            Ok(0) => {}
            Ok(choice) if choice <= names.len() => {
                let name = &names[choice - 1];
                self.store.delete(name)?;
                self.prompt.say(&format!("Wallet \"{}\" has been deleted.", name));
            }
            _ => self.prompt.say("Invalid choice. No wallet deleted."),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::ScriptedPrompt;
    use tempfile::TempDir;

    fn setup(answers: &[&str], existing: &[&str]) -> (TempDir, WalletStore, Arc<ScriptedPrompt>) {
        let dir = TempDir::new().unwrap();
        let store = WalletStore::new(dir.path().join("wallets.json"));
        for name in existing {
            store.generate(name).unwrap();
        }
        (dir, store, Arc::new(ScriptedPrompt::new(answers)))
    }

    #[test]
    fn test_parse_choice() {
        let names = vec!["a".to_string(), "b".to_string()];
        assert_eq!(parse_choice("1", &names), MenuChoice::Existing("a".to_string()));
        assert_eq!(parse_choice(" 2 ", &names), MenuChoice::Existing("b".to_string()));
        assert_eq!(parse_choice("3", &names), MenuChoice::CreateNew);
        assert_eq!(parse_choice("4", &names), MenuChoice::Delete);
        assert_eq!(parse_choice("0", &names), MenuChoice::Invalid);
        assert_eq!(parse_choice("5", &names), MenuChoice::Invalid);
        assert_eq!(parse_choice("x", &names), MenuChoice::Invalid);
    }

    #[test]
    fn test_empty_store_generates_immediately() {
        let (_dir, store, prompt) = setup(&["first"], &[]);
        let record = WalletSelector::new(store.clone(), prompt.clone()).select().unwrap();

        assert_eq!(record.name, "first");
        assert_eq!(store.names(), vec!["first".to_string()]);
        assert_eq!(prompt.get_questions(), vec!["Enter a name for this wallet: ".to_string()]);
    }

    #[test]
    fn test_select_existing() {
        let (_dir, store, prompt) = setup(&["2"], &["alpha", "beta"]);
        let expected = store.get("beta").unwrap();

        let record = WalletSelector::new(store, prompt).select().unwrap();
        assert_eq!(record, expected);
    }

    #[test]
    fn test_create_from_menu() {
        let (_dir, store, prompt) = setup(&["2", "second"], &["alpha"]);
        let record = WalletSelector::new(store.clone(), prompt).select().unwrap();

        assert_eq!(record.name, "second");
        assert_eq!(store.names().len(), 2);
    }

    #[test]
    fn test_delete_then_select() {
        // menu: 1 alpha, 2 beta, 3 create, 4 delete -> delete 1 -> menu: 1 beta
        let (_dir, store, prompt) = setup(&["4", "1", "1"], &["alpha", "beta"]);
        let record = WalletSelector::new(store.clone(), prompt).select().unwrap();

        assert_eq!(record.name, "beta");
        assert_eq!(store.names(), vec!["beta".to_string()]);
    }

    #[test]
    fn test_delete_cancel() {
        let (_dir, store, prompt) = setup(&["3", "0", "1"], &["alpha"]);
        let record = WalletSelector::new(store.clone(), prompt).select().unwrap();

        assert_eq!(record.name, "alpha");
        assert_eq!(store.names().len(), 1);
    }

    #[test]
    fn test_delete_last_wallet_falls_through_to_generate() {
        let (_dir, store, prompt) = setup(&["3", "1", "fresh"], &["alpha"]);
        let record = WalletSelector::new(store.clone(), prompt).select().unwrap();

        assert_eq!(record.name, "fresh");
        assert_eq!(store.names(), vec!["fresh".to_string()]);
    }

    #[test]
    fn test_invalid_choice_retries() {
        let (_dir, store, prompt) = setup(&["9", "abc", "1"], &["alpha"]);
        let record = WalletSelector::new(store, prompt.clone()).select().unwrap();

        assert_eq!(record.name, "alpha");
        let invalid_messages = prompt
            .get_output()
            .iter()
            .filter(|line| line.starts_with("Invalid choice"))
            .count();
        assert_eq!(invalid_messages, 2);
    }

    #[test]
    fn test_invalid_attempts_are_bounded() {
        let (_dir, store, prompt) = setup(&["x", "x", "x", "1"], &["alpha"]);
        let result = WalletSelector::new(store, prompt.clone())
            .with_max_attempts(3)
            .select();

        assert!(matches!(result, Err(SelectionError::TooManyInvalidAttempts(3))));
        assert_eq!(prompt.remaining_answers(), 1);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let (_dir, store, prompt) = setup(&["", "named"], &[]);
        let record = WalletSelector::new(store, prompt).select().unwrap();
        assert_eq!(record.name, "named");
    }

    #[test]
    fn test_closed_input() {
        let (_dir, store, prompt) = setup(&[], &["alpha"]);
        let result = WalletSelector::new(store, prompt).select();
        assert!(matches!(result, Err(SelectionError::Prompt(PromptError::Closed))));
    }
}
