//! Command-line argument parsing for the chatkit binary.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Send the prompt and wait for the whole reply
    Send(String),
    /// Send the prompt and print the reply as it streams
    Stream(String),
    /// Generate an image from the prompt
    Image(String),
    /// No prompt given
    Usage,
}

/// Parse command-line arguments into a [`CliCommand`].
///
/// Flags may appear anywhere; every other argument is joined into the prompt.
///
/// # Examples
///
/// ```
/// use chatkit::cli::{parse_args, CliCommand};
///
/// let args = vec!["chatkit".to_string(), "--stream".to_string(), "hi".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Stream("hi".to_string()));
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut stream = false;
    let mut image = false;
    let mut words = Vec::new();

    // Skip the program name
    for arg in args.skip(1) {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--stream" | "-s" => stream = true,
            "--image" | "-i" => image = true,
            _ => words.push(arg),
        }
    }

    let prompt = words.join(" ");
    if prompt.trim().is_empty() {
        return CliCommand::Usage;
    }

    if image {
        CliCommand::Image(prompt)
    } else if stream {
        CliCommand::Stream(prompt)
    } else {
        CliCommand::Send(prompt)
    }
}

/// Usage text printed for [`CliCommand::Usage`].
pub fn usage() -> String {
    format!(
        "chatkit {}\n\nUsage: chatkit [--stream | --image] <prompt...>\n       chatkit --version",
        VERSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["chatkit", "--version"]), CliCommand::Version);
        assert_eq!(parse(&["chatkit", "hello", "-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_prompt_words_joined() {
        assert_eq!(
            parse(&["chatkit", "tell", "me", "a", "joke"]),
            CliCommand::Send("tell me a joke".to_string())
        );
    }

    #[test]
    fn test_parse_stream_flag_anywhere() {
        assert_eq!(
            parse(&["chatkit", "hi", "--stream"]),
            CliCommand::Stream("hi".to_string())
        );
    }

    #[test]
    fn test_image_wins_over_stream() {
        assert_eq!(
            parse(&["chatkit", "-s", "-i", "a", "cat"]),
            CliCommand::Image("a cat".to_string())
        );
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&["chatkit"]), CliCommand::Usage);
        assert_eq!(parse(&["chatkit", "--stream"]), CliCommand::Usage);
    }

    #[test]
    fn test_usage_mentions_version() {
        assert!(usage().contains(VERSION));
    }
}
