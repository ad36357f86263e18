//! Student CRUD routes under `/student`.
//! Static segments (`/add`, `/getAll`, `/name/..`) take priority over `/:id`.

use crate::handlers::student::{add, delete as delete_handler, get, get_all, get_by_name, update};
use crate::state::AppState;
use axum::{routing::get as get_route, routing::post, Router};

pub fn student_routes(state: AppState) -> Router {
    let routes = Router::new()
        .route("/add", post(add))
        .route("/getAll", get_route(get_all))
        .route("/name/:name", get_route(get_by_name))
        .route("/:id", get_route(get).put(update).delete(delete_handler));
    Router::new().nest("/student", routes).with_state(state)
}
