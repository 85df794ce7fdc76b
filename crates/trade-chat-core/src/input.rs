//! Multi-line input composition
//!
//! A line ending in `\` continues the message on the next line.

/// Accumulates raw lines into one message
#[derive(Debug, Default)]
pub struct InputComposer {
    buffer: String,
    continuing: bool,
}

impl InputComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw line (without its newline).
    ///
    /// Returns the complete message once a line does not end in `\`.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim_end_matches(['\r', '\n']);

        if self.continuing {
            self.buffer.push('\n');
        }

        match line.strip_suffix('\\') {
            Some(head) => {
                self.buffer.push_str(head);
                self.continuing = true;
                None
            }
            None => {
                self.buffer.push_str(line);
                self.continuing = false;
                Some(std::mem::take(&mut self.buffer))
            }
        }
    }

    /// Whether the previous line asked for continuation
    pub fn is_continuing(&self) -> bool {
        self.continuing
    }

    /// Flush whatever is buffered (e.g. at end of input)
    pub fn finish(&mut self) -> Option<String> {
        self.continuing = false;
        let rest = std::mem::take(&mut self.buffer);
        (!rest.trim().is_empty()).then_some(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let mut composer = InputComposer::new();
        assert_eq!(composer.push_line("hello\n").as_deref(), Some("hello"));
        assert!(!composer.is_continuing());
    }

    #[test]
    fn test_continuation() {
        let mut composer = InputComposer::new();
        assert_eq!(composer.push_line("first\\"), None);
        assert!(composer.is_continuing());
        assert_eq!(composer.push_line("second\\"), None);
        assert_eq!(
            composer.push_line("third").as_deref(),
            Some("first\nsecond\nthird")
        );
        assert_eq!(composer.push_line("next").as_deref(), Some("next"));
    }

    #[test]
    fn test_finish_flushes_pending() {
        let mut composer = InputComposer::new();
        composer.push_line("dangling\\");
        assert_eq!(composer.finish().as_deref(), Some("dangling"));
        assert_eq!(composer.finish(), None);
    }
}
