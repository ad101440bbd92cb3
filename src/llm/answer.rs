//! Question answering over a single movie's transcript

use super::{create_llm, ChatMessage, LLMConfig, LLM};
use crate::site::MovieDetail;
use anyhow::Result;
use tracing::{debug, info, warn};

/// Appended to a transcript cut down to the character budget
pub const TRUNCATION_MARKER: &str = "...[truncated]";

/// Returned when the model cannot be reached or its reply is unusable
pub const APOLOGY: &str = "Sorry, I encountered an error when trying to analyze this transcript.";

/// The answer the model is told to give when the material does not cover the question
pub const REFUSAL: &str = "Sorry, I don't have enough information to answer your question.";

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that analyzes movie transcripts and provides insightful answers based on the content.";

/// Answers free-form questions about a movie using an LLM.
///
/// Every call is independent: no conversation history is carried between
/// questions.
pub struct QuestionAnswerer {
    llm: Box<dyn LLM>,
    max_transcript_chars: usize,
}

impl QuestionAnswerer {
    /// Create an answerer backed by the configured provider
    pub fn new(config: &LLMConfig) -> Result<Self> {
        let llm = create_llm(config)?;
        info!("✅ Question answering enabled with {:?} provider", config.provider);
        Ok(Self::with_llm(llm, config.max_transcript_chars))
    }

    /// Create an answerer around an existing LLM implementation
    pub fn with_llm(llm: Box<dyn LLM>, max_transcript_chars: usize) -> Self {
        Self {
            llm,
            max_transcript_chars,
        }
    }

    /// Ask a question, falling back to a fixed apology on any failure
    pub async fn answer_question(&self, detail: &MovieDetail, question: &str) -> String {
        match self.ask(detail, question).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("LLM request failed: {}", e);
                APOLOGY.to_string()
            }
        }
    }

    /// Ask a question, surfacing provider errors
    pub async fn ask(&self, detail: &MovieDetail, question: &str) -> Result<String> {
        let messages = self.build_messages(detail, question);
        let response = self.llm.chat(messages).await?;

        debug!("LLM answered (tokens: {:?})", response.tokens_used);
        Ok(response.content)
    }

    /// System and user messages for one question
    pub fn build_messages(&self, detail: &MovieDetail, question: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(self.build_prompt(detail, question)),
        ]
    }

    /// User prompt embedding the movie material and the question
    pub fn build_prompt(&self, detail: &MovieDetail, question: &str) -> String {
        let transcript = truncate_transcript(&detail.transcript, self.max_transcript_chars);

        format!(
            "\nMovie: {title}\nPlot: {plot}\n\nTRANSCRIPT:\n{transcript}\n\nQuestion: {question}\n\n\
            Please analyze the provided movie transcript and answer the question based ONLY on information \
            contained in the given title, plot, and transcript. If the question is not related to the movie \
            or data is taken elsewhere, please respond with \"{REFUSAL}\"\n",
            title = detail.title,
            plot = detail.plot,
        )
    }
}

/// Cut a transcript to `max_chars` characters, marking the cut
pub fn truncate_transcript(transcript: &str, max_chars: usize) -> String {
    match transcript.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &transcript[..byte_idx], TRUNCATION_MARKER),
        None => transcript.to_string(),
    }
}
