//! # Confirmation Gate
//!
//! Stands between a [`RetentionDecision`] and the first delete call. The mode is
//! picked once per invocation; a gate is consumed by [`ConfirmationGate::decide`],
//! so every cleanup pass gets a fresh one and is asked exactly once.
//!
//! The gate owns no terminal. Interactive mode talks through a [`Prompter`], which
//! the CLI backs with stdin/stdout and tests back with a script.

use crate::retention::RetentionDecision;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmMode {
    /// Report what would be deleted, delete nothing.
    DryRun,
    /// Approve without asking.
    AutoConfirm,
    /// List the files and ask.
    Interactive,
}

impl ConfirmMode {
    /// Maps the `--dry-run` / `--auto-cleanup` flags. Dry-run wins if both are given.
    pub fn from_flags(dry_run: bool, auto_confirm: bool) -> Self {
        if dry_run {
            ConfirmMode::DryRun
        } else if auto_confirm {
            ConfirmMode::AutoConfirm
        } else {
            ConfirmMode::Interactive
        }
    }
}

/// What the user typed, or that they interrupted the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Interrupted,
}

pub trait Prompter {
    /// Show one line of context before the question.
    fn show(&mut self, line: &str);

    /// Ask and block until an answer or an interrupt arrives.
    fn ask(&mut self, question: &str) -> Answer;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Approved(Vec<String>),
    Rejected,
    DryRunReport(Vec<String>),
}

/// `Some(true)` for yes, `Some(false)` for no (empty input included), `None` otherwise.
pub fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" | "" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub struct ConfirmationGate {
    mode: ConfirmMode,
}

impl ConfirmationGate {
    pub fn new(mode: ConfirmMode) -> Self {
        Self { mode }
    }

    /// Resolves the gate.
    ///
    /// `subject` names the files in the prompt ("local files", "cloud files") and
    /// `listing` holds one pre-rendered line per candidate.
    pub fn decide<P: Prompter + ?Sized>(
        self,
        subject: &str,
        decision: &RetentionDecision,
        listing: &[String],
        prompter: &mut P,
    ) -> GateOutcome {
        let names = decision.names();
        match self.mode {
            ConfirmMode::DryRun => GateOutcome::DryRunReport(names),
            ConfirmMode::AutoConfirm => GateOutcome::Approved(names),
            ConfirmMode::Interactive => {
                prompter.show(&format!("Found {} old {} to remove:", names.len(), subject));
                for line in listing {
                    prompter.show(&format!("  • {}", line));
                }
                let question = format!("Delete these {} {}? (y/N): ", names.len(), subject);
                loop {
                    match prompter.ask(&question) {
                        Answer::Interrupted => return GateOutcome::Rejected,
                        Answer::Text(text) => match parse_answer(&text) {
                            Some(true) => return GateOutcome::Approved(names),
                            Some(false) => return GateOutcome::Rejected,
                            None => prompter.show("Please enter 'y' for yes or 'n' for no"),
                        },
                    }
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{Answer, Prompter};
    use std::collections::VecDeque;

    /// Replays canned answers; runs out as an interrupt.
    #[derive(Debug, Default)]
    pub struct ScriptedPrompter {
        answers: VecDeque<Answer>,
        pub shown: Vec<String>,
        pub asked: usize,
    }

    impl ScriptedPrompter {
        pub fn new<I, S>(answers: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                answers: answers.into_iter().map(|a| Answer::Text(a.into())).collect(),
                ..Default::default()
            }
        }

        pub fn interrupted() -> Self {
            Self {
                answers: VecDeque::from([Answer::Interrupted]),
                ..Default::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn show(&mut self, line: &str) {
            self.shown.push(line.to_string());
        }

        fn ask(&mut self, _question: &str) -> Answer {
            self.asked += 1;
            self.answers.pop_front().unwrap_or(Answer::Interrupted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedPrompter;
    use super::*;
    use crate::retention::{Candidate, Reasons};

    fn decision(names: &[&str]) -> RetentionDecision {
        RetentionDecision {
            candidates: names
                .iter()
                .map(|n| Candidate {
                    name: n.to_string(),
                    age_days: 40,
                    reasons: Reasons {
                        age_exceeded: true,
                        count_excess: false,
                    },
                })
                .collect(),
        }
    }

    fn interactive(answers: &[&str]) -> (GateOutcome, ScriptedPrompter) {
        let mut prompter = ScriptedPrompter::new(answers.iter().copied());
        let outcome = ConfirmationGate::new(ConfirmMode::Interactive).decide(
            "local files",
            &decision(&["a", "b"]),
            &["a (40 days old)".to_string(), "b (40 days old)".to_string()],
            &mut prompter,
        );
        (outcome, prompter)
    }

    #[test]
    fn parses_answers() {
        assert_eq!(parse_answer("y"), Some(true));
        assert_eq!(parse_answer(" YES \n"), Some(true));
        assert_eq!(parse_answer("N"), Some(false));
        assert_eq!(parse_answer("no"), Some(false));
        assert_eq!(parse_answer(""), Some(false));
        assert_eq!(parse_answer("maybe"), None);
    }

    #[test]
    fn flags_map_to_modes() {
        assert_eq!(ConfirmMode::from_flags(false, false), ConfirmMode::Interactive);
        assert_eq!(ConfirmMode::from_flags(false, true), ConfirmMode::AutoConfirm);
        assert_eq!(ConfirmMode::from_flags(true, true), ConfirmMode::DryRun);
    }

    #[test]
    fn dry_run_never_asks() {
        let mut prompter = ScriptedPrompter::default();
        let outcome = ConfirmationGate::new(ConfirmMode::DryRun).decide(
            "cloud files",
            &decision(&["a", "b"]),
            &[],
            &mut prompter,
        );
        assert_eq!(outcome, GateOutcome::DryRunReport(vec!["a".into(), "b".into()]));
        assert_eq!(prompter.asked, 0);
    }

    #[test]
    fn auto_confirm_never_asks() {
        let mut prompter = ScriptedPrompter::default();
        let outcome = ConfirmationGate::new(ConfirmMode::AutoConfirm).decide(
            "cloud files",
            &decision(&["a"]),
            &[],
            &mut prompter,
        );
        assert_eq!(outcome, GateOutcome::Approved(vec!["a".into()]));
        assert_eq!(prompter.asked, 0);
    }

    #[test]
    fn interactive_yes_approves() {
        let (outcome, prompter) = interactive(&["Y"]);
        assert_eq!(outcome, GateOutcome::Approved(vec!["a".into(), "b".into()]));
        assert_eq!(prompter.shown[0], "Found 2 old local files to remove:");
        assert_eq!(prompter.shown[1], "  • a (40 days old)");
    }

    #[test]
    fn interactive_no_rejects() {
        let (outcome, _) = interactive(&["n"]);
        assert_eq!(outcome, GateOutcome::Rejected);
    }

    #[test]
    fn interactive_empty_rejects() {
        let (outcome, _) = interactive(&[""]);
        assert_eq!(outcome, GateOutcome::Rejected);
    }

    #[test]
    fn interactive_reprompts_on_garbage() {
        let (outcome, prompter) = interactive(&["what", "sure", "yes"]);
        assert_eq!(outcome, GateOutcome::Approved(vec!["a".into(), "b".into()]));
        assert_eq!(prompter.asked, 3);
        assert_eq!(
            prompter
                .shown
                .iter()
                .filter(|l| l.starts_with("Please enter"))
                .count(),
            2
        );
    }

    #[test]
    fn interrupt_rejects() {
        let mut prompter = ScriptedPrompter::interrupted();
        let outcome = ConfirmationGate::new(ConfirmMode::Interactive).decide(
            "local files",
            &decision(&["a"]),
            &[],
            &mut prompter,
        );
        assert_eq!(outcome, GateOutcome::Rejected);
    }
}
