use std::borrow::Cow;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::gemini::{Embedder, Generator};
use crate::pipeline::{Answer, Pipeline};
use crate::routing::QueryClassifier;
use crate::status::StatusLookup;
use crate::translate::Translator;

pub const PROMPT: &str = "\nAsk something (type 'exit' to quit): ";
const EXIT: &str = "exit";

/// Anything that turns one line of user input into one answer.
pub trait Responder {
    async fn respond(&self, query: &str) -> Answer;
}

impl<C, E, G, T, S> Responder for Pipeline<'_, C, E, G, T, S>
where
    C: QueryClassifier,
    E: Embedder,
    G: Generator,
    T: Translator,
    S: StatusLookup,
{
    async fn respond(&self, query: &str) -> Answer {
        Pipeline::respond(self, query).await
    }
}

/// Prompt, read a line, answer it; until `exit` (any case) or end of input.
/// Invalid UTF-8 in a line is replaced rather than ending the session.
pub async fn run<R, W>(
    responder: &impl Responder,
    mut reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;

        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            debug!("end of input");
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if matches!(line, Cow::Owned(_)) {
            warn!("input line is not valid UTF-8, replacing invalid bytes");
        }
        let query = line.trim();
        if query.eq_ignore_ascii_case(EXIT) {
            break;
        }
        if query.is_empty() {
            continue;
        }

        let answer = responder.respond(query).await;
        debug!(language = answer.language.code(), "writing answer");
        writer.write_all(answer.text.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FAILURE_ANSWER;
    use crate::pipeline::tests::{
        IdentityTranslator, StubEmbedder, campus_kb, pipeline_with,
    };
    use tokio::io::BufReader;

    async fn session(responder: &impl Responder, input: &str) -> String {
        let mut out = Vec::new();
        run(responder, BufReader::new(input.as_bytes()), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn answers(transcript: &str) -> Vec<&str> {
        transcript
            .split(PROMPT)
            .map(str::trim_end)
            .filter(|s| !s.is_empty())
            .collect()
    }

    #[tokio::test]
    async fn answers_each_line_until_exit() {
        let kb = campus_kb();
        let pipeline = pipeline_with(
            &kb,
            StubEmbedder(Ok(vec![1.0, 0.0])),
            IdentityTranslator::default(),
        );

        let transcript = session(
            &pipeline,
            "Is Maitrik Shah available?\nIs Chirag thakar busy?\nEXIT\nIs Hetal Pandya on leave?\n",
        )
        .await;

        assert_eq!(
            answers(&transcript),
            vec![
                "Maitrik Shah is currently Available.",
                "Chirag thakar is currently Busy."
            ]
        );
    }

    #[tokio::test]
    async fn exit_is_case_insensitive_and_trimmed() {
        let kb = campus_kb();
        let pipeline = pipeline_with(
            &kb,
            StubEmbedder(Ok(vec![1.0, 0.0])),
            IdentityTranslator::default(),
        );
        for sentinel in ["exit", "Exit", "  eXiT  "] {
            let transcript = session(
                &pipeline,
                &format!("{sentinel}\nIs Maitrik Shah available?\n"),
            )
            .await;
            assert!(answers(&transcript).is_empty(), "sentinel {sentinel:?}");
        }
    }

    #[tokio::test]
    async fn end_of_input_stops_the_loop() {
        let kb = campus_kb();
        let pipeline = pipeline_with(
            &kb,
            StubEmbedder(Ok(vec![1.0, 0.0])),
            IdentityTranslator::default(),
        );
        let transcript = session(&pipeline, "Is Hetal Pandya on leave?").await;
        assert_eq!(
            answers(&transcript),
            vec!["Hetal Pandya is currently On Leave."]
        );
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let kb = campus_kb();
        let pipeline = pipeline_with(
            &kb,
            StubEmbedder(Ok(vec![1.0, 0.0])),
            IdentityTranslator::default(),
        );
        let transcript = session(&pipeline, "\n   \nIs Maitrik Shah available?\nexit\n").await;
        assert_eq!(
            answers(&transcript),
            vec!["Maitrik Shah is currently Available."]
        );
    }

    #[tokio::test]
    async fn invalid_utf8_line_does_not_end_session() {
        let kb = campus_kb();
        let pipeline = pipeline_with(
            &kb,
            StubEmbedder(Ok(vec![1.0, 0.0])),
            IdentityTranslator::default(),
        );

        let mut input = b"caf\xe9 timing?\n".to_vec();
        input.extend_from_slice(b"Is Maitrik Shah available?\nexit\n");
        let mut out = Vec::new();
        run(&pipeline, BufReader::new(input.as_slice()), &mut out)
            .await
            .unwrap();
        let transcript = String::from_utf8(out).unwrap();

        let answers = answers(&transcript);
        assert_eq!(answers.len(), 2, "transcript: {transcript:?}");
        assert_eq!(answers[1], "Maitrik Shah is currently Available.");
        let prompts = pipeline.generator_prompts();
        assert!(prompts[0].contains("caf\u{FFFD} timing?"));
    }

    #[tokio::test]
    async fn windows_line_endings_are_trimmed() {
        let kb = campus_kb();
        let pipeline = pipeline_with(
            &kb,
            StubEmbedder(Ok(vec![1.0, 0.0])),
            IdentityTranslator::default(),
        );
        let transcript = session(&pipeline, "Is Maitrik Shah available?\r\nexit\r\n").await;
        assert_eq!(
            answers(&transcript),
            vec!["Maitrik Shah is currently Available."]
        );
    }

    #[tokio::test]
    async fn failed_query_does_not_end_session() {
        let kb = campus_kb();
        let pipeline = pipeline_with(&kb, StubEmbedder(Err(())), IdentityTranslator::default());

        let transcript = session(
            &pipeline,
            "What is the library timing?\nIs Maitrik Shah available?\nexit\n",
        )
        .await;

        assert_eq!(
            answers(&transcript),
            vec![FAILURE_ANSWER, "Maitrik Shah is currently Available."]
        );
    }
}
