use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct TrackerSummary {
    id: String,
    title: String,
    theme: String,
}

#[derive(Debug, Deserialize)]
struct TrackerListResponse {
    trackers: Vec<TrackerSummary>,
}

#[derive(Debug, Deserialize)]
struct GridCell {
    date: String,
    value: u8,
    color: String,
    column: usize,
    row: usize,
    today: bool,
}

#[derive(Debug, Deserialize)]
struct WindowResponse {
    id: String,
    theme: String,
    today: String,
    today_value: u8,
    streak: u32,
    colors: Vec<String>,
    cells: Vec<GridCell>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("heatmaps_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/trackers")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_heatmaps"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn fetch_trackers(client: &Client, base_url: &str) -> TrackerListResponse {
    client
        .get(format!("{base_url}/api/trackers"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn fetch_window(client: &Client, base_url: &str, id: &str) -> WindowResponse {
    client
        .get(format!("{base_url}/api/trackers/{id}/window"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_seeded_tracker_is_present() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let list = fetch_trackers(&client, &server.base_url).await;
    assert!(!list.trackers.is_empty());
    let seeded = list.trackers.iter().find(|t| t.id == "1").expect("seed");
    assert!(!seeded.title.is_empty());
    assert_eq!(seeded.theme, "github");
}

#[tokio::test]
async fn http_add_trims_title_and_ignores_blanks() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_trackers(&client, &server.base_url).await;

    let after: TrackerListResponse = client
        .post(format!("{}/api/trackers", server.base_url))
        .json(&serde_json::json!({ "title": "  Reading  " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after.trackers.len(), before.trackers.len() + 1);
    let added = after.trackers.last().expect("added");
    assert_eq!(added.title, "Reading");

    let unchanged: TrackerListResponse = client
        .post(format!("{}/api/trackers", server.base_url))
        .json(&serde_json::json!({ "title": "   " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(unchanged.trackers.len(), after.trackers.len());
}

#[tokio::test]
async fn http_window_has_154_cells_ending_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let window = fetch_window(&client, &server.base_url, "1").await;
    assert_eq!(window.id, "1");
    assert_eq!(window.cells.len(), 154);
    assert_eq!(window.colors.len(), 5);

    let last = window.cells.last().expect("non-empty");
    assert_eq!(last.date, window.today);
    assert!(last.today);
    assert_eq!(last.column, 21);
    assert_eq!(last.row, 6);
    assert_eq!(window.cells.iter().filter(|cell| cell.today).count(), 1);
    assert!(window.cells[0].date < window.today);
}

#[tokio::test]
async fn http_checkin_clamps_and_persists_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let set = |value: i64| {
        let client = client.clone();
        let base = server.base_url.clone();
        async move {
            let resp: WindowResponse = client
                .post(format!("{base}/api/trackers/1/checkin"))
                .json(&serde_json::json!({ "action": "set", "value": value }))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            resp
        }
    };

    assert_eq!(set(99).await.today_value, 4);
    assert_eq!(set(-5).await.today_value, 0);
    assert_eq!(set(2).await.today_value, 2);

    let incremented: WindowResponse = client
        .post(format!("{}/api/trackers/1/checkin", server.base_url))
        .json(&serde_json::json!({ "action": "increment" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(incremented.today_value, 3);
    assert!(incremented.streak >= 1);

    let window = fetch_window(&client, &server.base_url, "1").await;
    assert_eq!(window.today_value, 3);
    let today_cell = window.cells.last().expect("non-empty");
    assert_eq!(today_cell.value, 3);
    assert_eq!(today_cell.color, window.colors[3]);

    let bad = client
        .post(format!("{}/api/trackers/1/checkin", server.base_url))
        .json(&serde_json::json!({ "action": "reset" }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_theme_selection_falls_back_to_default() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let ocean: WindowResponse = client
        .post(format!("{}/api/trackers/1/theme", server.base_url))
        .json(&serde_json::json!({ "theme": "ocean" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ocean.theme, "ocean");
    assert_eq!(ocean.colors[0], "#0d1b2a");

    let fallback: WindowResponse = client
        .post(format!("{}/api/trackers/1/theme", server.base_url))
        .json(&serde_json::json!({ "theme": "neon" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fallback.theme, "github");
    assert_eq!(fallback.colors[4], "#39d353");
}

#[tokio::test]
async fn http_delete_removes_tracker_and_ignores_unknown_ids() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let list: TrackerListResponse = client
        .post(format!("{}/api/trackers", server.base_url))
        .json(&serde_json::json!({ "title": "Short-lived" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = list.trackers.last().expect("added").id.clone();

    let after: TrackerListResponse = client
        .delete(format!("{}/api/trackers/{id}", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after.trackers.len(), list.trackers.len() - 1);
    assert!(after.trackers.iter().all(|tracker| tracker.id != id));

    let missing = fetch_trackers(&client, &server.base_url).await;
    let unchanged: TrackerListResponse = client
        .delete(format!("{}/api/trackers/does-not-exist", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(unchanged.trackers.len(), missing.trackers.len());

    let not_found = client
        .get(format!("{}/api/trackers/{id}/window", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(not_found.status(), reqwest::StatusCode::NOT_FOUND);
}
