use colored::Colorize;
use crossword_sync::commands::{CmdMessage, MessageLevel};

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", styled(message));
    }
}

fn styled(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => message.content.dimmed().to_string(),
        MessageLevel::Success => message.content.green().to_string(),
        MessageLevel::Warning => message.content.yellow().to_string(),
        MessageLevel::Error => message.content.red().to_string(),
    }
}

pub(super) fn print_heading(text: &str) {
    println!("{}", text.bold());
}

pub(super) fn print_error(text: &str) {
    println!("{}", text.red());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styled_keeps_content() {
        colored::control::set_override(false);
        assert_eq!(styled(&CmdMessage::error("boom")), "boom");
        assert_eq!(styled(&CmdMessage::info("  • a.pdf")), "  • a.pdf");
    }
}
