use rocket::Route;

mod panels;
mod questions;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(panels::routes());
    routes.extend(questions::routes());
    routes
}
