use tracing::{info, warn};

use crate::{
    error::AppError,
    profile::{
        dto::{SelectSubjectResponse, TutorResponse},
        tutors::pick_tutor,
    },
    users::{ProfileUpdate, UserStore},
};

pub async fn select_subject(
    store: &dyn UserStore,
    username: &str,
    grade: &str,
    subject: &str,
) -> Result<SelectSubjectResponse, AppError> {
    let tutor_name = pick_tutor(&mut rand::thread_rng());
    let update = ProfileUpdate {
        grade,
        subject,
        tutor_name,
    };

    let Some(user) = store.update_profile(username, update).await? else {
        warn!(%username, "select_subject unknown user");
        return Err(AppError::NotFound);
    };

    info!(user_id = user.id, %grade, %subject, tutor = %tutor_name, "tutor assigned");
    Ok(SelectSubjectResponse {
        message: "Subject and grade updated successfully",
        tutor_name: user.tutor_name.unwrap_or_else(|| tutor_name.to_string()),
    })
}

pub async fn get_tutor_response(
    store: &dyn UserStore,
    username: &str,
) -> Result<TutorResponse, AppError> {
    let Some(user) = store.find_by_username(username).await? else {
        return Err(AppError::NotFound);
    };

    let Some(tutor_name) = user.tutor_name else {
        return Err(AppError::NotAssigned);
    };

    Ok(TutorResponse {
        message: format!("Your tutor is {tutor_name}"),
        tutor_name,
        grade: user.grade,
        subject: user.subject,
    })
}
