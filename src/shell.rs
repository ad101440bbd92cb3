/// Interactive search-select-act loop over the catalog
use crate::llm::QuestionAnswerer;
use crate::output::{TranscriptWriter, RULE};
use crate::site::{Catalog, DetailLoader, MovieDetail, SearchResult};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::num::IntErrorKind;
use tracing::{debug, warn};

/// Outcome of reading a result number from the user
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// `0`: back to the query prompt
    Cancel,
    /// Zero-based index into the result list
    Pick(usize),
    /// A number outside `1..=len`
    OutOfRange,
    /// Not a number at all
    Invalid(String),
}

/// Interpret a selection typed against a result list of `len` items
pub fn parse_selection(input: &str, len: usize) -> Selection {
    match input.trim().parse::<i64>() {
        Ok(0) => Selection::Cancel,
        Ok(n) if n >= 1 && (n as u64) <= len as u64 => Selection::Pick(n as usize - 1),
        Ok(_) => Selection::OutOfRange,
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Selection::OutOfRange
        }
        Err(e) => Selection::Invalid(e.to_string()),
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Interactive shell driving search, detail display, saving and questions.
///
/// Reads from any `BufRead` and writes to any `Write`, so sessions can be
/// scripted. End of input ends the session like `exit`.
pub struct Shell<'a, R, W> {
    catalog: &'a Catalog,
    loader: &'a DetailLoader,
    writer: &'a TranscriptWriter,
    answerer: Option<&'a QuestionAnswerer>,
    preview_chars: usize,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(
        catalog: &'a Catalog,
        loader: &'a DetailLoader,
        writer: &'a TranscriptWriter,
        input: R,
        output: W,
    ) -> Self {
        Self {
            catalog,
            loader,
            writer,
            answerer: None,
            preview_chars: 500,
            input,
            output,
        }
    }

    /// Enable questions about the selected movie
    pub fn with_answerer(mut self, answerer: Option<&'a QuestionAnswerer>) -> Self {
        self.answerer = answerer;
        self
    }

    /// Characters of transcript shown in the detail view
    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    /// Run until the user types `exit` or input ends
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let query = match self.prompt("\nEnter a movie title to search (or 'exit' to quit): ")? {
                Some(query) => query,
                None => break,
            };

            if query.eq_ignore_ascii_case("exit") {
                break;
            }

            if let Flow::Exit = self.handle_query(&query).await? {
                break;
            }
        }

        debug!("Interactive session ended");
        Ok(())
    }

    async fn handle_query(&mut self, query: &str) -> Result<Flow> {
        let results = self.catalog.search(query);

        if results.is_empty() {
            self.say("No movies found matching your query.")?;
            return Ok(Flow::Continue);
        }

        self.say(&format!("\nFound {} results:", results.len()))?;
        for result in &results {
            self.say(&format!("{}. {}", result.ordinal, result.title))?;
        }

        let answer = match self.prompt("\nEnter the number of the movie for details (0 to cancel): ")? {
            Some(answer) => answer,
            None => return Ok(Flow::Exit),
        };

        match parse_selection(&answer, results.len()) {
            Selection::Cancel => Ok(Flow::Continue),
            Selection::OutOfRange => {
                self.say(&format!("Please enter a number between 1 and {}", results.len()))?;
                Ok(Flow::Continue)
            }
            Selection::Invalid(reason) => {
                self.say(&format!("Invalid selection: {}. Please try again.", reason))?;
                Ok(Flow::Continue)
            }
            Selection::Pick(index) => self.show_movie(&results[index]).await,
        }
    }

    async fn show_movie(&mut self, selected: &SearchResult) -> Result<Flow> {
        self.say("\nFetching movie details...")?;
        let detail = self.loader.load_or_placeholder(&selected.link).await;

        self.say(&format!("\n{}", RULE))?;
        self.say(&format!("Title: {}", detail.title))?;
        self.say(RULE)?;
        self.say(&format!("Plot: {}", detail.plot))?;
        self.say(RULE)?;
        self.say(&format!("Transcript Preview (first {} chars):", self.preview_chars))?;
        let preview: String = detail.transcript.chars().take(self.preview_chars).collect();
        self.say(&format!("{}...\n", preview))?;

        match self.confirm("Would you like to save the full transcript? (y/n): ")? {
            None => return Ok(Flow::Exit),
            Some(true) => match self.writer.save_transcript(&detail).await {
                Ok(path) => self.say(&format!("Transcript saved to {}", path.display()))?,
                Err(e) => {
                    warn!("Saving transcript failed: {}", e);
                    self.say(&format!("Could not save transcript: {}", e))?;
                }
            },
            Some(false) => {}
        }

        let wants_ai = match self.confirm(
            "\nOPENAI: Do you want to learn more about this movie based on the transcript? (y/n): ",
        )? {
            Some(wants_ai) => wants_ai,
            None => return Ok(Flow::Exit),
        };

        if !wants_ai {
            return Ok(Flow::Continue);
        }

        match self.answerer {
            Some(answerer) => self.question_loop(answerer, &detail).await,
            None => {
                self.say("OpenAI API key not configured. Please add your API key to a .env file.")?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn question_loop(&mut self, answerer: &QuestionAnswerer, detail: &MovieDetail) -> Result<Flow> {
        loop {
            let question = match self
                .prompt("\nWhat would you like to know about this movie? (or type 'back' to return): ")?
            {
                Some(question) => question,
                None => return Ok(Flow::Exit),
            };

            if question.eq_ignore_ascii_case("back") {
                return Ok(Flow::Continue);
            }

            self.say("Thinking...")?;
            let response = answerer.answer_question(detail, &question).await;

            self.say(&format!("\n{}", RULE))?;
            self.say("AI ANALYSIS:")?;
            self.say(RULE)?;
            self.say(&response)?;
            self.say(RULE)?;

            match self.confirm("Would you like to save this analysis? (y/n): ")? {
                None => return Ok(Flow::Exit),
                Some(true) => match self.writer.append_analysis(&detail.title, &question, &response).await {
                    Ok(path) => self.say(&format!("Analysis saved to {}", path.display()))?,
                    Err(e) => {
                        warn!("Saving analysis failed: {}", e);
                        self.say(&format!("Could not save analysis: {}", e))?;
                    }
                },
                Some(false) => {}
            }
        }
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line; `None` at end of input.
    ///
    /// Bytes that are not UTF-8 are replaced rather than rejected.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    /// Yes/no prompt; only `y` (any case) counts as yes
    fn confirm(&mut self, message: &str) -> Result<Option<bool>> {
        Ok(self.prompt(message)?.map(|answer| answer.eq_ignore_ascii_case("y")))
    }
}
