use colored::Colorize;
use notepress::commands::{CmdMessage, CmdResult, MessageLevel, PostPreview};
use notepress::vcs::CommitOutcome;

pub fn print_result(result: &CmdResult) {
    for message in &result.messages {
        println!("{}", format_message(message));
    }
    if let Some(CommitOutcome::Committed { message, .. }) = &result.commit {
        println!("{}", format!("  {}", message).dimmed());
    }
}

pub fn print_previews(previews: &[PostPreview]) {
    for preview in previews {
        println!("{}", format!("==> {} <==", preview.filename).bold());
        print!("{}", preview.content);
        println!();
    }
}

fn format_message(message: &CmdMessage) -> String {
    let content = message.content.as_str();
    match message.level {
        MessageLevel::Info => content.normal().to_string(),
        MessageLevel::Success => content.green().to_string(),
        MessageLevel::Warning => content.yellow().to_string(),
        MessageLevel::Error => content.red().bold().to_string(),
    }
}
