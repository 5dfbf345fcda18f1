use tracing::info;

use crate::{
    error::AppError,
    inference::{
        dto::{AnswerResponse, QuizResponse, SummaryResponse},
        gateway::ModelSlot,
        model::InferenceParams,
    },
};

/// The summarizer's input window, in characters.
pub const SUMMARY_INPUT_CHARS: usize = 1024;

pub fn quiz_prompt(topic: &str, difficulty: &str) -> String {
    format!("Create a 5-question {difficulty} quiz about {topic}:\n")
}

pub fn answer_prompt(question: &str, context: &str) -> String {
    format!("Question: {question}\nContext: {context}\nAnswer:")
}

/// Keeps the first `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub async fn generate_quiz(
    generator: &ModelSlot,
    topic: String,
    difficulty: String,
) -> Result<QuizResponse, AppError> {
    let model = generator.get()?;
    let params = InferenceParams {
        max_length: 200,
        num_return_sequences: Some(1),
        ..Default::default()
    };
    let quiz_content = model.infer(&quiz_prompt(&topic, &difficulty), &params).await?;
    info!(%topic, %difficulty, "quiz generated");
    Ok(QuizResponse {
        topic,
        difficulty,
        quiz_content,
    })
}

pub async fn summarize(summarizer: &ModelSlot, text: &str) -> Result<SummaryResponse, AppError> {
    let model = summarizer.get()?;
    let params = InferenceParams {
        max_length: 130,
        min_length: Some(30),
        do_sample: Some(false),
        ..Default::default()
    };
    let summary = model
        .infer(truncate_chars(text, SUMMARY_INPUT_CHARS), &params)
        .await?;
    Ok(SummaryResponse { summary })
}

pub async fn answer_question(
    generator: &ModelSlot,
    question: &str,
    context: &str,
) -> Result<AnswerResponse, AppError> {
    let model = generator.get()?;
    let params = InferenceParams {
        max_length: 100,
        num_return_sequences: Some(1),
        ..Default::default()
    };
    let answer = model.infer(&answer_prompt(question, context), &params).await?;
    Ok(AnswerResponse { answer })
}
