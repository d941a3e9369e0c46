//! Console output formatter for chat messages and listings

use colored::Colorize;
use tutor_domain::{
    Attachment, AttachmentKind, ConversationSummary, Message, Model, ModelCatalog, Role,
};

/// Formats chat content for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a single message: role prefix, content, attachment lines.
    pub fn format_message(message: &Message) -> String {
        let prefix = match message.role {
            Role::User => "You".green().bold(),
            Role::Assistant => "Assistant".cyan().bold(),
            Role::Error => "Error".red().bold(),
        };

        // Show the id on messages carrying attachments; /remove needs it
        let mut output = if message.attachments.is_empty() {
            format!("{}: {}", prefix, message.content)
        } else {
            format!("{} ({}): {}", prefix, message.id.dimmed(), message.content)
        };
        for attachment in &message.attachments {
            output.push('\n');
            output.push_str(&Self::format_attachment_line(attachment));
        }
        output
    }

    /// Format a whole conversation, one message per block.
    pub fn format_conversation(messages: &[Message]) -> String {
        messages
            .iter()
            .map(Self::format_message)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Format the conversation list shown by `/list`.
    pub fn format_summaries(summaries: &[ConversationSummary]) -> String {
        if summaries.is_empty() {
            return "No saved conversations.".to_string();
        }
        summaries
            .iter()
            .map(|s| {
                format!(
                    "  {}  {} ({} messages)",
                    s.id.yellow(),
                    s.title,
                    s.message_count
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the model catalog shown by `/models`, marking the active one.
    pub fn format_models(catalog: &ModelCatalog, active: &Model) -> String {
        catalog
            .entries()
            .iter()
            .map(|info| {
                let marker = if &info.id == active { "*" } else { " " };
                let line = format!(
                    "{} {} - {}",
                    marker,
                    info.display_name.bold(),
                    info.id.as_str().yellow()
                );
                if info.description.is_empty() {
                    line
                } else {
                    format!("{}\n    {}", line, info.description)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Pending-attachment listing: index, name, size.
    pub fn format_pending(attachments: &[Attachment]) -> String {
        if attachments.is_empty() {
            return "No pending attachments.".to_string();
        }
        attachments
            .iter()
            .enumerate()
            .map(|(i, a)| format!("  {} {}", i, Self::format_attachment_line(a).trim_start()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_attachment_line(attachment: &Attachment) -> String {
        let kb = (attachment.byte_size as f64 / 1024.0).round() as u64;
        format!(
            "  {} {} ({} KB)",
            Self::kind_tag(attachment.kind()),
            attachment.name,
            kb
        )
    }

    fn kind_tag(kind: AttachmentKind) -> &'static str {
        match kind {
            AttachmentKind::Image => "[image]",
            AttachmentKind::Document => "[doc]",
            AttachmentKind::Other => "[file]",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_with_attachment_lists_it() {
        colored::control::set_override(false);
        let message = Message::user(
            "m1",
            "grade this",
            vec![Attachment::new("essay.txt", "text/plain", vec![0u8; 2048])],
        );
        let text = ConsoleFormatter::format_message(&message);
        assert!(text.contains("You (m1): grade this"));
        assert!(text.contains("[doc] essay.txt (2 KB)"));
    }

    #[test]
    fn error_messages_use_error_prefix() {
        colored::control::set_override(false);
        let message = Message::error("m2", "Failed to send message. Please try again.");
        let text = ConsoleFormatter::format_message(&message);
        assert!(text.starts_with("Error:"));
    }

    #[test]
    fn empty_summary_list_has_placeholder() {
        assert_eq!(
            ConsoleFormatter::format_summaries(&[]),
            "No saved conversations."
        );
    }

    #[test]
    fn active_model_is_marked() {
        colored::control::set_override(false);
        let catalog = ModelCatalog::built_in();
        let text = ConsoleFormatter::format_models(&catalog, &Model::Llama3);
        let marked: Vec<_> = text.lines().filter(|l| l.starts_with('*')).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("Llama 3"));
    }
}
