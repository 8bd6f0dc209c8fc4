//! Terminal side of the confirmation gate.
//!
//! Ctrl-C is routed through one handler for the whole process. While a question is
//! open it becomes an [`Answer::Interrupted`] (the gate treats that as "no" and the
//! run carries on). Anywhere else it ends the process with exit code 1.
//!
//! Stdin is read on a helper thread so the answer and the interrupt can race on one
//! channel.

use crossword_sync::confirm::{Answer, Prompter};
use crossword_sync::error::{Result, SyncError};
use std::io::{self, BufRead, Write};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

static PROMPTING: AtomicBool = AtomicBool::new(false);

enum Event {
    Line(String),
    Eof,
    Interrupt,
}

pub struct TerminalPrompter {
    tx: Sender<Event>,
    rx: Receiver<Event>,
    reader_started: bool,
    stdin_closed: bool,
}

impl TerminalPrompter {
    /// Installs the process-wide Ctrl-C handler. Call once.
    pub fn install() -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let interrupt_tx = tx.clone();
        ctrlc::set_handler(move || {
            if PROMPTING.load(Ordering::SeqCst) {
                let _ = interrupt_tx.send(Event::Interrupt);
            } else {
                println!("\nOperation cancelled by user");
                process::exit(1);
            }
        })
        .map_err(|e| SyncError::Io(io::Error::other(e)))?;

        Ok(Self {
            tx,
            rx,
            reader_started: false,
            stdin_closed: false,
        })
    }

    fn start_reader(&mut self) {
        if self.reader_started {
            return;
        }
        self.reader_started = true;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(Event::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(_) => break,
                }
            }
            let _ = tx.send(Event::Eof);
        });
    }
}

impl Prompter for TerminalPrompter {
    fn show(&mut self, line: &str) {
        println!("{}", line);
    }

    fn ask(&mut self, question: &str) -> Answer {
        self.start_reader();
        print!("{}", question);
        let _ = io::stdout().flush();
        if self.stdin_closed {
            println!();
            return Answer::Interrupted;
        }

        PROMPTING.store(true, Ordering::SeqCst);
        let event = self.rx.recv();
        PROMPTING.store(false, Ordering::SeqCst);

        match event {
            Ok(Event::Line(text)) => Answer::Text(text),
            Ok(Event::Eof) | Err(_) => {
                self.stdin_closed = true;
                println!();
                Answer::Interrupted
            }
            Ok(Event::Interrupt) => {
                println!();
                Answer::Interrupted
            }
        }
    }
}
