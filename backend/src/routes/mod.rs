//! Route definitions for the Dropzone Operations Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/aircraft", aircraft_routes())
        .nest("/instructors", instructor_routes())
        .nest("/loads", load_routes())
        .nest("/jumps", jump_routes())
        .nest("/weather", weather_routes())
        .nest("/analytics", analytics_routes())
}

/// Aircraft fleet routes
fn aircraft_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_aircraft).post(handlers::create_aircraft))
        .route(
            "/:aircraft_id",
            get(handlers::get_aircraft)
                .put(handlers::update_aircraft)
                .delete(handlers::delete_aircraft),
        )
}

/// Instructor roster routes
fn instructor_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_instructors).post(handlers::create_instructor))
        .route("/tandem-certified/", get(handlers::list_tandem_instructors))
        .route("/aff-certified/", get(handlers::list_aff_instructors))
        .route(
            "/:instructor_id",
            get(handlers::get_instructor)
                .put(handlers::update_instructor)
                .delete(handlers::delete_instructor),
        )
}

/// Load scheduling routes
fn load_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_loads).post(handlers::create_load))
        .route("/today/", get(handlers::list_todays_loads))
        .route("/by-status/:status", get(handlers::list_loads_by_status))
        .route(
            "/:load_id",
            get(handlers::get_load)
                .put(handlers::update_load)
                .delete(handlers::delete_load),
        )
        .route("/:load_id/capacity", get(handlers::get_load_capacity))
        .route("/:load_id/add-jumper", post(handlers::add_jumper))
        .route(
            "/:load_id/remove-jumper/:jump_id",
            axum::routing::delete(handlers::remove_jumper),
        )
}

/// Jump manifest routes
fn jump_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_jumps).post(handlers::create_jump))
        .route("/tandems/", get(handlers::list_tandem_jumps))
        .route("/aff/", get(handlers::list_aff_jumps))
        .route("/by-type/:jump_type", get(handlers::list_jumps_by_type))
        .route("/by-load/:load_id", get(handlers::list_jumps_by_load))
        .route(
            "/by-instructor/:instructor_id",
            get(handlers::list_jumps_by_instructor),
        )
        .route(
            "/:jump_id",
            get(handlers::get_jump)
                .put(handlers::update_jump)
                .delete(handlers::delete_jump),
        )
        .route("/:jump_id/assign-instructor", post(handlers::assign_instructor))
}

/// Weather report routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_reports).post(handlers::create_report))
        .route("/current/", get(handlers::get_current))
        .route("/today/", get(handlers::list_todays_reports))
        .route("/suitable-for-jumping/", get(handlers::list_suitable_for_jumping))
        .route("/tandem-suitable/", get(handlers::list_tandem_suitable))
        .route("/student-suitable/", get(handlers::list_student_suitable))
        .route(
            "/:report_id",
            get(handlers::get_report)
                .put(handlers::update_report)
                .delete(handlers::delete_report),
        )
}

/// Analytics and reporting routes
fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/loads/:load_id/statistics", get(handlers::get_load_statistics))
        .route("/instructor-workload", get(handlers::get_instructor_workload))
        .route("/daily-capacity/:date", get(handlers::get_daily_capacity))
        .route(
            "/jump-type-distribution",
            get(handlers::get_jump_type_distribution),
        )
        .route("/weather-impact", get(handlers::get_weather_impact))
}
