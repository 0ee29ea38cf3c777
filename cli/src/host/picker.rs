//! Terminal picker built on dialoguer
//!
//! The list is a fuzzy select; choosing a row opens a small action menu
//! ("Open" plus one entry per item button). Escape on the list dismisses the
//! picker, escape on the action menu goes back to the list.
//!
//! Rows always show the description so same-named entries stay apart.
//! `FuzzySelect` matches against the whole row, so descriptions are searched
//! even when the options ask for label-only matching.

use crate::output::{format_item, format_item_plain};
use async_trait::async_trait;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{FuzzySelect, Select};
use faves_core::host::{PickerEvent, PickerOptions, QuickPick};
use faves_core::search::PickerItem;
use tracing::{debug, warn};

/// What the user picked in one round of prompts
#[derive(Debug)]
enum Interaction {
    Dismiss,
    Open(usize),
    Button { item: usize, button: usize },
}

/// Picker session on an interactive terminal
pub struct TerminalQuickPick {
    options: PickerOptions,
}

impl TerminalQuickPick {
    pub fn new(options: PickerOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl QuickPick for TerminalQuickPick {
    async fn next_event(&mut self, items: &[PickerItem]) -> PickerEvent {
        let rows = picker_rows(items);
        let buttons: Vec<Vec<String>> = items
            .iter()
            .map(|item| item.buttons.iter().map(|b| b.tooltip.to_string()).collect())
            .collect();
        let prompt = self.options.placeholder.clone();

        let interaction =
            tokio::task::spawn_blocking(move || prompt_interaction(&prompt, &rows, &buttons)).await;

        match interaction {
            Ok(Interaction::Dismiss) => PickerEvent::Dismissed,
            Ok(Interaction::Open(index)) => PickerEvent::Accepted {
                selected: vec![index],
            },
            Ok(Interaction::Button { item, button }) => PickerEvent::ButtonPressed {
                item,
                button: items[item].buttons[button].id.to_string(),
            },
            Err(e) => {
                warn!("Picker prompt failed: {}", e);
                PickerEvent::Dismissed
            }
        }
    }

    async fn close(&mut self) {
        debug!("Closing picker");
    }
}

/// Rows shown in the fuzzy list, one per item
fn picker_rows(items: &[PickerItem]) -> Vec<String> {
    items.iter().map(format_item).collect()
}

fn prompt_interaction(prompt: &str, rows: &[String], buttons: &[Vec<String>]) -> Interaction {
    let theme = ColorfulTheme::default();
    let mut default = 0;

    loop {
        let chosen = FuzzySelect::with_theme(&theme)
            .with_prompt(prompt)
            .items(rows)
            .default(default)
            .interact_opt();
        let index = match chosen {
            Ok(Some(index)) => index,
            Ok(None) => return Interaction::Dismiss,
            Err(e) => {
                debug!("Picker list closed: {}", e);
                return Interaction::Dismiss;
            }
        };

        let mut actions = vec!["Open".to_string()];
        actions.extend(buttons[index].iter().cloned());
        let action = Select::with_theme(&theme)
            .with_prompt(&rows[index])
            .items(&actions)
            .default(0)
            .interact_opt();

        match action {
            Ok(Some(0)) => return Interaction::Open(index),
            Ok(Some(action)) => {
                return Interaction::Button {
                    item: index,
                    button: action - 1,
                }
            }
            // Back to the list with the same row highlighted
            Ok(None) | Err(_) => default = index,
        }
    }
}

/// Picker used when nobody is at the terminal: prints the rows and dismisses
pub struct ListingQuickPick;

#[async_trait]
impl QuickPick for ListingQuickPick {
    async fn next_event(&mut self, items: &[PickerItem]) -> PickerEvent {
        for item in items {
            println!("{}", format_item_plain(item));
        }
        PickerEvent::Dismissed
    }

    async fn close(&mut self) {}
}
