/// One of the five menu actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Record,
    GenerateFromText,
    GenerateFromAudio,
    SummarizePdf,
    Exit,
}

impl MenuChoice {
    /// Parse a trimmed input line; anything outside "1".."5" is invalid.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Record),
            "2" => Some(Self::GenerateFromText),
            "3" => Some(Self::GenerateFromAudio),
            "4" => Some(Self::SummarizePdf),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Control-loop state: prompt, mid-dispatch, or terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    MenuPrompt,
    Dispatching,
    Exited,
}

pub const MENU: &str = "\n--- Voicesketch Menu ---\n\
    1. Record and play audio\n\
    2. Generate image from text\n\
    3. Generate image from recorded audio\n\
    4. Summarize PDF document\n\
    5. Exit";

pub const CHOICE_PROMPT: &str = "Please enter your choice (1-5): ";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_valid_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Record));
        assert_eq!(MenuChoice::parse("2"), Some(MenuChoice::GenerateFromText));
        assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::GenerateFromAudio));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::SummarizePdf));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::Exit));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(MenuChoice::parse(" 3 \n"), Some(MenuChoice::GenerateFromAudio));
    }

    #[test]
    fn rejects_everything_else() {
        for input in ["0", "6", "12", "abc", "", "  ", "1.0", "-1"] {
            assert_eq!(MenuChoice::parse(input), None, "input {:?}", input);
        }
    }
}
