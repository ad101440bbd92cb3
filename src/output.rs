/// Saving transcripts and analyses as text files
use crate::site::MovieDetail;
use anyhow::{anyhow, Result};
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Separator written after each saved analysis
pub const RULE: &str = "==================================================";

/// Filename stem for a movie title: spaces become underscores, path
/// separators and colons are dropped
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !matches!(c, ':' | '/' | '\\'))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// Writes saved material into a single output directory
#[derive(Debug, Clone)]
pub struct TranscriptWriter {
    output_dir: PathBuf,
}

impl TranscriptWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// `<SanitizedTitle>.txt`
    pub fn transcript_path(&self, title: &str) -> PathBuf {
        self.output_dir.join(format!("{}.txt", sanitize_title(title)))
    }

    /// `Analysis_<SanitizedTitle>.txt`
    pub fn analysis_path(&self, title: &str) -> PathBuf {
        self.output_dir.join(format!("Analysis_{}.txt", sanitize_title(title)))
    }

    /// Write the full transcript, replacing any earlier save
    pub async fn save_transcript(&self, detail: &MovieDetail) -> Result<PathBuf> {
        let path = self.transcript_path(&detail.title);
        let content = format!(
            "Title: {}\n\nPlot: {}\n\nTranscript:\n{}",
            detail.title, detail.plot, detail.transcript
        );

        self.ensure_dir().await?;
        fs::write(&path, content)
            .await
            .map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;

        info!("📝 Saved transcript to: {}", path.display());
        Ok(path)
    }

    /// Append one question and answer to the movie's analysis log
    pub async fn append_analysis(&self, title: &str, question: &str, answer: &str) -> Result<PathBuf> {
        let path = self.analysis_path(title);
        let entry = format!("Question: {}\n\nAnalysis:\n{}\n\n{}\n\n", question, answer, RULE);

        self.ensure_dir().await?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| anyhow!("Failed to open {}: {}", path.display(), e))?;
        file.write_all(entry.as_bytes()).await?;
        file.flush().await?;

        info!("📝 Appended analysis to: {}", path.display());
        Ok(path)
    }

    async fn ensure_dir(&self) -> Result<()> {
        if !self.output_dir.as_os_str().is_empty() && !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir).await?;
            info!("📁 Created directory: {}", self.output_dir.display());
        }
        Ok(())
    }
}
