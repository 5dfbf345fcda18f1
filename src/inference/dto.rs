use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub topic: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}
fn default_difficulty() -> String {
    "medium".into()
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub topic: String,
    pub difficulty: String,
    pub quiz_content: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}
