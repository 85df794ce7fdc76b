//! Interactive read-eval-print loop

use crate::output;
use dialoguer::{Input, theme::ColorfulTheme};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};
use trade_chat_core::{
    AnalysisService, ChatSession, Command, InputComposer, PortfolioId, Renderer,
};

const PROMPT: &str = "> ";
const CONTINUATION_PROMPT: &str = "… ";

/// What the loop should do after an input was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Repl<S> {
    session: ChatSession<S>,
    renderer: Renderer,
    color: bool,
}

impl<S: AnalysisService> Repl<S> {
    pub fn new(session: ChatSession<S>, renderer: Renderer, color: bool) -> Self {
        Self {
            session,
            renderer,
            color,
        }
    }

    pub fn session(&self) -> &ChatSession<S> {
        &self.session
    }

    /// Handle one complete input; returns what to print and whether to go on.
    pub async fn handle(&mut self, input: &str) -> (Flow, String) {
        let command = match Command::parse(input) {
            Ok(command) => command,
            Err(e) => return (Flow::Continue, output::error(&e.to_string(), self.color)),
        };
        debug!(?command, "Handling input");

        let text = match command {
            Command::Query { text } => self.query(&text).await,
            Command::Portfolio { id: None } => match self.session.portfolio_id() {
                Ok(Some(id)) => format!("Portfolio ID: {id}"),
                Ok(None) => "No portfolio ID set. Use /portfolio <id>.".to_string(),
                Err(e) => output::error(&e.to_string(), self.color),
            },
            Command::Portfolio { id: Some(raw) } => match self.session.set_portfolio_id(&raw) {
                Ok(id) => output::notice(&format!("Portfolio ID set to {id}"), self.color),
                Err(e) => output::error(&e.to_string(), self.color),
            },
            Command::History => self.renderer.render_conversation(self.session.conversation()),
            Command::Clear => {
                self.session.clear();
                output::notice("Conversation history cleared.", self.color)
            }
            Command::Examples => Command::examples_text().trim().to_string(),
            Command::Help => Command::help_text().trim().to_string(),
            Command::Exit => return (Flow::Exit, "Goodbye!".to_string()),
        };

        (Flow::Continue, text)
    }

    async fn query(&mut self, text: &str) -> String {
        let mark = self.session.conversation().len();

        let spinner = output::spinner();
        let appended = self.session.send(text).await;
        spinner.finish_and_clear();

        if appended == 0 {
            return String::new();
        }

        // The user already sees what they typed; show only the replies.
        self.renderer
            .render_messages(self.session.conversation().since(mark + 1))
    }

    /// Read stdin until EOF or `/exit`.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut composer = InputComposer::new();

        println!(
            "{}",
            self.renderer.render_conversation(self.session.conversation())
        );

        loop {
            let prompt = if composer.is_continuing() {
                CONTINUATION_PROMPT
            } else {
                PROMPT
            };
            print!("{prompt}");
            stdout.flush()?;

            let mut line = String::new();
            let read = match stdin.lock().read_line(&mut line) {
                Ok(n) => n,
                Err(e) => {
                    let message = format!("Error reading input: {e}");
                    eprintln!("{}", output::error(&message, self.color));
                    continue;
                }
            };

            let message = if read == 0 {
                composer.finish()
            } else {
                composer.push_line(&line)
            };

            if let Some(message) = message.filter(|m| !m.trim().is_empty()) {
                let (flow, text) = self.handle(&message).await;
                if !text.is_empty() {
                    println!("{text}\n");
                }
                if flow == Flow::Exit {
                    break;
                }
            }

            if read == 0 {
                println!("\nGoodbye!");
                break;
            }
        }

        info!(messages = self.session.conversation().len(), "Chat ended");
        Ok(())
    }
}

/// Ask for a portfolio ID until a non-blank one is entered
pub fn prompt_portfolio_id() -> anyhow::Result<PortfolioId> {
    let raw: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter portfolio ID")
        .validate_with(|input: &String| -> Result<(), String> {
            PortfolioId::parse(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;

    Ok(PortfolioId::parse(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use trade_chat_core::{DemoAnalysisService, PortfolioStore, RenderOptions};

    fn repl() -> Repl<DemoAnalysisService> {
        let session = ChatSession::new(
            DemoAnalysisService::new(Duration::ZERO),
            PortfolioStore::ephemeral(),
        );
        Repl::new(session, Renderer::new(RenderOptions::default()), false)
    }

    #[tokio::test]
    async fn test_query_renders_replies_only() {
        let mut repl = repl();
        let (flow, out) = repl.handle("how are my shares doing?").await;

        assert_eq!(flow, Flow::Continue);
        assert!(out.starts_with("bot\n"));
        assert!(out.contains("Share price for 2010 - 2025"));
        assert!(!out.contains("how are my shares doing?"));
        assert_eq!(repl.session().conversation().len(), 3);
    }

    #[tokio::test]
    async fn test_portfolio_commands() {
        let mut repl = repl();

        let (_, out) = repl.handle("/portfolio").await;
        assert!(out.contains("No portfolio ID set"));

        let (_, out) = repl.handle("/portfolio ACC-3").await;
        assert_eq!(out, "✓ Portfolio ID set to ACC-3");

        let (_, out) = repl.handle("/p").await;
        assert_eq!(out, "Portfolio ID: ACC-3");
    }

    #[tokio::test]
    async fn test_clear_and_history() {
        let mut repl = repl();
        repl.handle("question").await;

        let (_, out) = repl.handle("/history").await;
        assert!(out.contains("question"));

        repl.handle("/clear").await;
        assert!(repl.session().conversation().is_empty());

        let (_, out) = repl.handle("/history").await;
        assert!(out.contains(trade_chat_core::render::EMPTY_HINT));
    }

    #[tokio::test]
    async fn test_unknown_command_and_exit() {
        let mut repl = repl();

        let (flow, out) = repl.handle("/nope").await;
        assert_eq!(flow, Flow::Continue);
        assert!(out.starts_with("× "));

        let (flow, _) = repl.handle("/exit").await;
        assert_eq!(flow, Flow::Exit);
    }
}
