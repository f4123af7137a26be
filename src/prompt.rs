//! Interactive prompt abstraction
//!
//! The engine asks questions through [`Prompter`] so that menu rendering
//! stays outside of it. [`DialoguerPrompter`] renders on the terminal;
//! [`AssumeAnswer`] answers every confirmation the same way and cancels
//! every menu, which is what non-interactive runs need.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

pub trait Prompter: Send + Sync {
    /// Pick one item; `None` means back/cancel
    fn select(&self, prompt: &str, items: &[String]) -> Option<usize>;

    /// Pick any number of items (0-based positions); `None` means cancel
    fn multi_select(&self, prompt: &str, items: &[String]) -> Option<Vec<usize>>;

    /// Free text; `None` means cancel
    fn input(&self, prompt: &str) -> Option<String>;

    /// Yes/no question; anything other than an explicit yes is a no
    fn confirm(&self, prompt: &str) -> bool;
}

/// Terminal prompts rendered with dialoguer
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, items: &[String]) -> Option<usize> {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .ok()
            .flatten()
    }

    fn multi_select(&self, prompt: &str, items: &[String]) -> Option<Vec<usize>> {
        MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(items)
            .interact_opt()
            .ok()
            .flatten()
    }

    fn input(&self, prompt: &str) -> Option<String> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .ok()
    }

    fn confirm(&self, prompt: &str) -> bool {
        matches!(
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .default(false)
                .interact_opt(),
            Ok(Some(true))
        )
    }
}

/// Fixed answer for every confirmation; menus and inputs are cancelled
#[derive(Debug, Clone, Copy)]
pub struct AssumeAnswer(pub bool);

impl Prompter for AssumeAnswer {
    fn select(&self, _prompt: &str, _items: &[String]) -> Option<usize> {
        None
    }

    fn multi_select(&self, _prompt: &str, _items: &[String]) -> Option<Vec<usize>> {
        None
    }

    fn input(&self, _prompt: &str) -> Option<String> {
        None
    }

    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assume_answer() {
        let items = vec!["a".to_string()];
        assert!(AssumeAnswer(true).confirm("go?"));
        assert!(!AssumeAnswer(false).confirm("go?"));
        assert_eq!(AssumeAnswer(true).select("pick", &items), None);
        assert_eq!(AssumeAnswer(true).multi_select("pick", &items), None);
        assert_eq!(AssumeAnswer(true).input("keyword"), None);
    }
}
