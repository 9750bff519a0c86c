use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, ReturnDocument},
};
use rocket::{http::Status, response::status::Created, serde::json::Json, Route, State};

use crate::error::{Error, Result};
use crate::model::{
    api::question::{QuestionDescription, QuestionSubmission, VoteRequest, VoteResult},
    common::author_or,
    db::{
        panel::Panel,
        question::{NewQuestion, Question},
    },
    mongodb::{Coll, Id},
};
use crate::Config;

pub fn routes() -> Vec<Route> {
    routes![submit_question, vote]
}

#[post("/panels/<panel_id>/questions", data = "<submission>", format = "json")]
async fn submit_question(
    panel_id: &str,
    submission: Json<QuestionSubmission>,
    config: &State<Config>,
    panels: Coll<Panel>,
    new_questions: Coll<NewQuestion>,
) -> Result<Created<Json<QuestionDescription>>> {
    let panel_id = Id::parse_param(panel_id)?;
    let submission = submission.into_inner();

    let text = submission.text.trim();
    if text.is_empty() {
        return Err(Error::bad_request("Question text must not be empty".to_string()));
    }
    if text.chars().count() > config.max_question_len() {
        return Err(Error::bad_request(format!(
            "Question text must be at most {} characters",
            config.max_question_len()
        )));
    }
    panels
        .find_one(panel_id.as_doc(), None)
        .await?
        .ok_or_else(|| Error::not_found(format!("Panel '{panel_id}'")))?;

    let author = author_or(submission.author.as_deref(), config.anonymous_author());
    let question = NewQuestion::new(panel_id, text.to_string(), author.to_string());
    let id: Id = new_questions
        .insert_one(&question, None)
        .await?
        .inserted_id
        .as_object_id()
        .ok_or_else(|| {
            Error::Status(
                Status::InternalServerError,
                "Database returned a non-ObjectId ID".to_string(),
            )
        })?
        .into();
    debug!("Question {id} submitted to panel {panel_id}");

    let description: QuestionDescription = Question { id, question }.into();
    Ok(Created::new(format!("/questions/{id}")).body(Json(description)))
}

#[post("/questions/<question_id>/vote", data = "<vote>", format = "json")]
async fn vote(
    question_id: &str,
    vote: Json<VoteRequest>,
    questions: Coll<Question>,
) -> Result<Json<VoteResult>> {
    let question_id = Id::parse_param(question_id)?;
    let update = doc! {
        "$inc": { "score": vote.delta() }
    };
    let options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();
    let question = questions
        .find_one_and_update(question_id.as_doc(), update, options)
        .await?
        .ok_or_else(|| Error::not_found(format!("Question '{question_id}'")))?;

    Ok(Json(VoteResult {
        score: question.score,
    }))
}
