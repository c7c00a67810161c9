//! Command-line parsing of update text.

/// Marker that starts a command.
pub const COMMAND_MARKER: char = '/';

/// Command name and arguments taken from a message such as `/add@MyBot 1 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Parses `text` as a command addressed to `bot_username`.
///
/// Returns `None` when the text does not start with `/`, the name is empty, or the command
/// carries an `@suffix` naming another bot. Our own suffix is matched case-insensitively and
/// dropped.
pub fn parse_command(text: &str, bot_username: &str) -> Option<ParsedCommand> {
    let mut tokens = text.split_whitespace();
    let head = tokens.next()?.strip_prefix(COMMAND_MARKER)?;
    let (name, suffix) = match head.split_once('@') {
        Some((name, suffix)) => (name, Some(suffix)),
        None => (head, None),
    };
    if name.is_empty() {
        return None;
    }
    if let Some(suffix) = suffix {
        let own = bot_username.trim_start_matches('@');
        if !suffix.eq_ignore_ascii_case(own) {
            return None;
        }
    }
    Some(ParsedCommand {
        name: name.to_string(),
        args: tokens.map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT: &str = "MyWorkshopBot";

    #[test]
    fn test_parse_plain_command() {
        let parsed = parse_command("/hello", BOT).unwrap();
        assert_eq!(parsed.name, "hello");
        assert!(parsed.args.is_empty());
    }

    #[test]
    fn test_parse_arguments() {
        let parsed = parse_command("/add  1   2", BOT).unwrap();
        assert_eq!(parsed.name, "add");
        assert_eq!(parsed.args, vec!["1", "2"]);
    }

    #[test]
    fn test_strips_bot_username_suffix() {
        assert_eq!(parse_command("/hi@MyWorkshopBot", BOT).unwrap().name, "hi");
        assert_eq!(parse_command("/hi@myworkshopbot", BOT).unwrap().name, "hi");
        assert_eq!(parse_command("/add@MyWorkshopBot 3 4", BOT).unwrap().args, vec!["3", "4"]);
    }

    /// **Test: A command addressed to another bot is not ours.**
    #[test]
    fn test_foreign_bot_suffix_is_rejected() {
        assert!(parse_command("/count@SomeOtherBot", BOT).is_none());
        assert!(parse_command("/hi@MyWorkshopBot2", BOT).is_none());
        assert!(parse_command("/hi@", BOT).is_none());
    }

    #[test]
    fn test_not_a_command() {
        assert!(parse_command("hello /hi", BOT).is_none());
        assert!(parse_command("", BOT).is_none());
        assert!(parse_command("/", BOT).is_none());
        assert!(parse_command("/@MyWorkshopBot", BOT).is_none());
    }

    #[test]
    fn test_case_is_kept() {
        assert_eq!(parse_command("/Hello", BOT).unwrap().name, "Hello");
    }
}
