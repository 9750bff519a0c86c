use mongodb::{bson::doc, options::FindOptions};
use rocket::{
    futures::TryStreamExt, http::Status, response::status::Created, serde::json::Json, Route,
};

use crate::error::{Error, Result};
use crate::model::{
    api::panel::{PanelDescription, PanelSpec},
    db::{
        panel::{NewPanel, Panel},
        question::Question,
    },
    mongodb::{Coll, Id},
};

pub fn routes() -> Vec<Route> {
    routes![create_panel, get_panel]
}

#[post("/panels", data = "<spec>", format = "json")]
async fn create_panel(
    spec: Json<PanelSpec>,
    new_panels: Coll<NewPanel>,
) -> Result<Created<Json<PanelDescription>>> {
    let spec = spec.into_inner();
    if spec.title.trim().is_empty() {
        return Err(Error::bad_request("Panel title must not be empty".to_string()));
    }
    if matches!(spec.ends_at, Some(ends_at) if ends_at <= spec.starts_at) {
        return Err(Error::bad_request(
            "Panel must end after it starts".to_string(),
        ));
    }

    let panel: NewPanel = spec.into();
    let id: Id = new_panels
        .insert_one(&panel, None)
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
    info!("Created panel {id} '{}'", panel.title);

    let description = PanelDescription::new(Panel { id, panel }, Vec::new());
    Ok(Created::new(format!("/panels/{id}")).body(Json(description)))
}

#[get("/panels/<panel_id>")]
async fn get_panel(
    panel_id: &str,
    panels: Coll<Panel>,
    questions: Coll<Question>,
) -> Result<Json<PanelDescription>> {
    let panel_id = Id::parse_param(panel_id)?;
    let panel = panels
        .find_one(panel_id.as_doc(), None)
        .await?
        .ok_or_else(|| Error::not_found(format!("Panel '{panel_id}'")))?;

    let newest_first = FindOptions::builder()
        .sort(doc! {"created_at": -1, "_id": -1})
        .build();
    let questions = questions
        .find(doc! {"panel_id": panel_id}, newest_first)
        .await?
        .try_collect::<Vec<_>>()
        .await?;

    Ok(Json(PanelDescription::new(panel, questions)))
}
