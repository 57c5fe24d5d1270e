use crate::errors::AppError;
use crate::grid;
use crate::models::{
    CheckinRequest, DayEntry, ThemeRequest, TitleRequest, Tracker, TrackerListResponse,
    TrackerSummary, WindowResponse,
};
use crate::state::AppState;
use crate::storage::{StoreData, persist_store};
use crate::theme::Theme;
use crate::ui::render_index;
use crate::window::{self, MAX_VALUE};
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate};

// Display-only daily goal shown in the check-in modal.
const DAILY_GOAL: u8 = MAX_VALUE;

pub async fn index() -> Html<String> {
    Html(render_index(&today().to_string()))
}

pub async fn list_trackers(State(state): State<AppState>) -> Json<TrackerListResponse> {
    let store = state.store.lock().await;
    Json(list_response(&store))
}

pub async fn add_tracker(
    State(state): State<AppState>,
    Json(payload): Json<TitleRequest>,
) -> Json<TrackerListResponse> {
    let mut store = state.store.lock().await;
    let mut trackers = store.trackers();
    // Blank titles are ignored; the unchanged list is still returned.
    if trackers.add(&payload.title) {
        store.set_trackers(&trackers);
        persist_store(&state.data_path, &store).await;
    }
    Json(list_response(&store))
}

pub async fn rename_tracker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<TitleRequest>,
) -> Json<TrackerListResponse> {
    let mut store = state.store.lock().await;
    let mut trackers = store.trackers();
    if trackers.rename(&id, &payload.title) {
        store.set_trackers(&trackers);
        persist_store(&state.data_path, &store).await;
    }
    Json(list_response(&store))
}

pub async fn delete_tracker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<TrackerListResponse> {
    let mut store = state.store.lock().await;
    let mut trackers = store.trackers();
    if trackers.remove(&id) {
        store.set_trackers(&trackers);
        store.remove_tracker_records(&id);
        persist_store(&state.data_path, &store).await;
    }
    Json(list_response(&store))
}

/// Read a tracker's window, advancing it to today first. The page calls this
/// on load and on every focus regain; when the window already ends today the
/// reconcile is a no-op and nothing is written.
pub async fn get_window(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WindowResponse>, AppError> {
    let today = today();
    let mut store = state.store.lock().await;
    let tracker = find_tracker(&store, &id)?;

    let persisted = store.window(&id);
    let window = window::reconcile(&persisted, today);
    if window != persisted {
        store.set_window(&id, &window);
        persist_store(&state.data_path, &store).await;
    }

    Ok(Json(window_response(&store, tracker, window, today)))
}

pub async fn checkin(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CheckinRequest>,
) -> Result<Json<WindowResponse>, AppError> {
    let action = payload.action.trim();
    let today = today();
    let mut store = state.store.lock().await;
    let tracker = find_tracker(&store, &id)?;

    let mut window = window::reconcile(&store.window(&id), today);
    let current = i64::from(window::today_value(&window, today));
    let requested = match action {
        "increment" => current + 1,
        "decrement" => current - 1,
        "set" => payload
            .value
            .ok_or_else(|| AppError::bad_request("value is required for 'set'"))?,
        _ => {
            return Err(AppError::bad_request(
                "action must be 'increment', 'decrement' or 'set'",
            ));
        }
    };

    // Out-of-range requests clamp rather than error.
    window::set_today(&mut window, today, requested);
    store.set_window(&id, &window);
    persist_store(&state.data_path, &store).await;

    Ok(Json(window_response(&store, tracker, window, today)))
}

pub async fn set_theme(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ThemeRequest>,
) -> Result<Json<WindowResponse>, AppError> {
    let today = today();
    let mut store = state.store.lock().await;
    let tracker = find_tracker(&store, &id)?;

    // Unknown keys land on the default palette instead of failing.
    let theme = Theme::from_key(payload.theme.trim());
    store.set_theme(&id, theme);

    let persisted = store.window(&id);
    let window = window::reconcile(&persisted, today);
    if window != persisted {
        store.set_window(&id, &window);
    }
    persist_store(&state.data_path, &store).await;

    Ok(Json(window_response(&store, tracker, window, today)))
}

fn find_tracker(store: &StoreData, id: &str) -> Result<Tracker, AppError> {
    store
        .trackers()
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("no tracker with id {id}")))
}

fn list_response(store: &StoreData) -> TrackerListResponse {
    TrackerListResponse {
        trackers: store
            .trackers()
            .iter()
            .map(|tracker| TrackerSummary {
                id: tracker.id.clone(),
                title: tracker.title.clone(),
                theme: store.theme(&tracker.id).key(),
            })
            .collect(),
    }
}

fn window_response(
    store: &StoreData,
    tracker: Tracker,
    window: Vec<DayEntry>,
    today: NaiveDate,
) -> WindowResponse {
    let theme = store.theme(&tracker.id);
    WindowResponse {
        today_value: window::today_value(&window, today),
        streak: window::current_streak(&window, today),
        goal: DAILY_GOAL,
        colors: theme.colors(),
        cells: grid::layout(&window, theme, today),
        id: tracker.id,
        title: tracker.title,
        theme: theme.key(),
        today,
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
