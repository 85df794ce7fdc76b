//! Command parsing for the chat REPL

use crate::error::{ChatError, Result};

/// Parsed user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Natural language query (not a command)
    Query { text: String },
    /// Show or change the portfolio ID
    Portfolio { id: Option<String> },
    /// Redraw the whole conversation
    History,
    /// Clear conversation history
    Clear,
    /// Show example questions
    Examples,
    /// Show help
    Help,
    /// Exit the chat
    Exit,
}

impl Command {
    /// Parse a command from user input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ChatError::Command("Empty input".to_string()));
        }

        // A doubled slash sends the rest as a query starting with `/`.
        if let Some(text) = input.strip_prefix('/').filter(|t| t.starts_with('/')) {
            return Ok(Command::Query {
                text: text.to_string(),
            });
        }

        let Some(rest) = input.strip_prefix('/') else {
            return Ok(Command::Query {
                text: input.to_string(),
            });
        };

        let mut parts = rest.split_whitespace();
        let Some(cmd) = parts.next() else {
            return Err(ChatError::Command("Empty command".to_string()));
        };
        let args: Vec<&str> = parts.collect();

        match cmd.to_lowercase().as_str() {
            "portfolio" | "p" | "account" => match args.as_slice() {
                [] => Ok(Command::Portfolio { id: None }),
                [id] => Ok(Command::Portfolio {
                    id: Some((*id).to_string()),
                }),
                _ => Err(ChatError::Command(
                    "Portfolio ID must be a single word".to_string(),
                )),
            },
            "history" | "hist" => Ok(Command::History),
            "clear" | "cls" => Ok(Command::Clear),
            "examples" | "ex" => Ok(Command::Examples),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            other => Err(ChatError::Command(format!(
                "Unknown command: /{other} (try /help)"
            ))),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"
Trade Chat
==========

Type a question about your portfolio and press Enter.
End a line with \ to continue the message on the next line.
Start with // to send a question that begins with /.

Commands:
  /portfolio [id]   Show the portfolio ID, or change it
  /history          Redraw the conversation so far
  /clear            Clear the conversation history
  /examples         Example questions
  /help             Show this help
  /exit             Quit
"
    }

    /// Example questions to get started
    pub fn examples_text() -> &'static str {
        r"
Example questions:
  - What is the current price of SBER?
  - Show my portfolio
  - What is in the order book for GAZP?
  - Show YNDX candles for the last few days
  - Which of my orders are active?
  - How did my portfolio value change this year?
"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        let cmd = Command::parse("  what is my balance?  ").unwrap();
        assert_eq!(
            cmd,
            Command::Query {
                text: "what is my balance?".to_string()
            }
        );
    }

    #[test]
    fn test_parse_escaped_slash() {
        assert_eq!(
            Command::parse("//etc/hosts is that a ticker?").unwrap(),
            Command::Query {
                text: "/etc/hosts is that a ticker?".to_string()
            }
        );
        assert!(Command::help_text().contains("//"));
    }

    #[test]
    fn test_parse_portfolio() {
        assert_eq!(
            Command::parse("/portfolio").unwrap(),
            Command::Portfolio { id: None }
        );
        assert_eq!(
            Command::parse("/P acc-1").unwrap(),
            Command::Portfolio {
                id: Some("acc-1".to_string())
            }
        );
        assert!(Command::parse("/portfolio a b").is_err());
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Command::parse("/cls").unwrap(), Command::Clear);
        assert_eq!(Command::parse("/hist").unwrap(), Command::History);
        assert_eq!(Command::parse("/EX").unwrap(), Command::Examples);
        assert_eq!(Command::parse("/?").unwrap(), Command::Help);
        assert_eq!(Command::parse("/quit").unwrap(), Command::Exit);
        assert_eq!(Command::parse("/q").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("/").is_err());
        assert!(matches!(
            Command::parse("/frobnicate"),
            Err(ChatError::Command(msg)) if msg.contains("frobnicate")
        ));
    }

    #[test]
    fn test_help_mentions_commands() {
        let help = Command::help_text();
        for cmd in ["/portfolio", "/history", "/clear", "/examples", "/help", "/exit"] {
            assert!(help.contains(cmd), "help text missing {cmd}");
        }
    }
}
