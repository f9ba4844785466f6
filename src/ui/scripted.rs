use std::cell::RefCell;
use std::collections::VecDeque;

use super::Prompter;
use crate::error::{GitWorkflowError, Result};

/// A canned answer for [ScriptedPrompter]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Pick the item at this index
    Select(usize),
    /// Pick the first item whose label (without styling) equals this text
    Choose(String),
    Confirm(bool),
    Input(String),
}

impl Answer {
    pub fn choose(label: impl Into<String>) -> Self {
        Answer::Choose(label.into())
    }

    pub fn input(text: impl Into<String>) -> Self {
        Answer::Input(text.into())
    }
}

/// Prompter replaying answers in order. Asking with no matching answer
/// queued is a prompt error, which ends scripted sessions deterministically.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    asked: RefCell<Vec<String>>,
    menus: RefCell<Vec<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        ScriptedPrompter {
            answers: RefCell::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Messages of every question asked, without styling
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    /// Items of every select shown, without styling
    pub fn menus(&self) -> Vec<Vec<String>> {
        self.menus.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, message: &str) -> Result<Answer> {
        self.asked
            .borrow_mut()
            .push(console::strip_ansi_codes(message).into_owned());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| GitWorkflowError::prompt(format!("no scripted answer for '{}'", message)))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, message: &str, items: &[String]) -> Result<usize> {
        let plain: Vec<String> = items
            .iter()
            .map(|item| console::strip_ansi_codes(item).into_owned())
            .collect();
        self.menus.borrow_mut().push(plain.clone());

        match self.next(message)? {
            Answer::Select(index) if index < items.len() => Ok(index),
            Answer::Choose(label) => plain
                .iter()
                .position(|item| item == &label)
                .ok_or_else(|| GitWorkflowError::prompt(format!("no menu item '{}'", label))),
            other => Err(GitWorkflowError::prompt(format!(
                "expected a selection, scripted {:?}",
                other
            ))),
        }
    }

    fn confirm(&self, message: &str, _default: bool) -> Result<bool> {
        match self.next(message)? {
            Answer::Confirm(answer) => Ok(answer),
            other => Err(GitWorkflowError::prompt(format!(
                "expected a confirmation, scripted {:?}",
                other
            ))),
        }
    }

    fn input(&self, message: &str) -> Result<String> {
        match self.next(message)? {
            Answer::Input(text) => Ok(text),
            other => Err(GitWorkflowError::prompt(format!(
                "expected text input, scripted {:?}",
                other
            ))),
        }
    }
}
