use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SelectSubjectRequest {
    pub username: String,
    pub grade: String,
    pub subject: String,
}

#[derive(Debug, Serialize)]
pub struct SelectSubjectResponse {
    pub message: &'static str,
    pub tutor_name: String,
}

#[derive(Debug, Serialize)]
pub struct TutorResponse {
    pub message: String,
    pub tutor_name: String,
    pub grade: Option<String>,
    pub subject: Option<String>,
}
