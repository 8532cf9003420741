//! Prompt text for the interaction-mode dialog.

use crate::interaction::DialogMessage;

/// Compose the dialog message. Empty extra lines are dropped.
pub fn dialog_message<I>(header: &str, extra_lines: I, point_count: usize) -> DialogMessage
where
    I: IntoIterator<Item = String>,
{
    let word = if point_count > 0 { "another" } else { "a" };
    DialogMessage {
        header: header.to_string(),
        body: extra_lines.into_iter().filter(|l| !l.is_empty()).collect(),
        instruction: format!("Click to add {} point", word),
    }
}

/// "Done" once there is something worth keeping, "Cancel" before that
pub fn button_label(point_count: usize) -> &'static str {
    if point_count >= 2 { "Done" } else { "Cancel" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_for_empty_set() {
        let message = dialog_message("Draw on Map", Vec::new(), 0);
        assert_eq!(message.instruction, "Click to add a point");
        assert_eq!(message.header, "Draw on Map");
        assert!(message.body.is_empty());
    }

    #[test]
    fn test_instruction_for_non_empty_set() {
        let message = dialog_message("Draw on Map", Vec::new(), 1);
        assert_eq!(message.instruction, "Click to add another point");
    }

    #[test]
    fn test_empty_extra_line_omitted() {
        let message = dialog_message("Header", vec![String::new(), "12.00 m".to_string()], 3);
        assert_eq!(message.body, vec!["12.00 m".to_string()]);
    }

    #[test]
    fn test_button_label_thresholds() {
        assert_eq!(button_label(0), "Cancel");
        assert_eq!(button_label(1), "Cancel");
        assert_eq!(button_label(2), "Done");
        assert_eq!(button_label(10), "Done");
    }
}
