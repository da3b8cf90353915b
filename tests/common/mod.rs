#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use parking_lot::Mutex;
use serde_json::{Value, json};

use sfclone::config::Settings;
use sfclone::error::CloneError;
use sfclone::remote::{Connect, OrgApi, RestClient};

pub const API: &str = "/services/data/v35.0";

pub enum InsertBehavior {
    Created(String),
    Rejected(u16, String),
    MissingId,
}

pub struct OrgFixture {
    pub session_id: String,
    pub listing: Value,
    /// Row path -> record body.
    pub records: HashMap<String, Value>,
    /// Object name -> describe body.
    pub describes: HashMap<String, Value>,
    pub query_rows: Vec<Value>,
    pub insert: InsertBehavior,
    pub delay: Option<Duration>,
}

impl OrgFixture {
    pub fn new(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            listing: json!({ "encoding": "UTF-8", "sobjects": [] }),
            records: HashMap::new(),
            describes: HashMap::new(),
            query_rows: Vec::new(),
            insert: InsertBehavior::Created("001000000000NEWAAA".to_string()),
            delay: None,
        }
    }

    /// Listing and describe for `Account` plus a `Region__c` custom setting.
    pub fn with_accounts(session_id: &str) -> Self {
        let mut fixture = Self::new(session_id);
        fixture.listing = json!({
            "encoding": "UTF-8",
            "maxBatchSize": 200,
            "sobjects": [
                {
                    "name": "Account",
                    "keyPrefix": "001",
                    "customSetting": false,
                    "urls": { "rowTemplate": format!("{}/sobjects/Account/{{ID}}", API) }
                },
                {
                    "name": "Region__c",
                    "keyPrefix": "a0R",
                    "customSetting": true,
                    "urls": { "rowTemplate": format!("{}/sobjects/Region__c/{{ID}}", API) }
                },
                {
                    "name": "AccountHistory",
                    "keyPrefix": null,
                    "customSetting": false,
                    "urls": { "rowTemplate": format!("{}/sobjects/AccountHistory/{{ID}}", API) }
                }
            ]
        });
        fixture.describes.insert(
            "Account".to_string(),
            json!({
                "name": "Account",
                "fields": [
                    { "name": "Id", "creatable": false, "updateable": false },
                    { "name": "Name", "creatable": true, "updateable": true },
                    { "name": "Industry", "creatable": true, "updateable": true },
                    { "name": "RecordTypeId", "creatable": true, "updateable": true },
                    { "name": "OwnerId", "creatable": true, "updateable": true },
                    { "name": "LastModifiedDate", "creatable": false, "updateable": false },
                    { "name": "AccountNumber", "creatable": true, "updateable": false }
                ]
            }),
        );
        fixture.describes.insert(
            "Region__c".to_string(),
            json!({
                "name": "Region__c",
                "fields": [
                    { "name": "Name", "creatable": true, "updateable": true },
                    { "name": "Code__c", "creatable": true, "updateable": true },
                    { "name": "SetupOwnerId", "creatable": true, "updateable": false }
                ]
            }),
        );
        fixture
    }

    pub fn with_record(mut self, path: &str, record: Value) -> Self {
        self.records.insert(path.to_string(), record);
        self
    }
}

pub struct OrgState {
    fixture: OrgFixture,
    pub inserted: Mutex<Vec<(String, Value)>>,
    pub queries: Mutex<Vec<String>>,
    pub auth_headers: Mutex<Vec<String>>,
}

pub struct OrgGuard {
    pub base_url: String,
    pub state: Arc<OrgState>,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
}

impl Drop for OrgGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub fn spawn_org(fixture: OrgFixture) -> Result<OrgGuard> {
    let state = Arc::new(OrgState {
        fixture,
        inserted: Mutex::new(Vec::new()),
        queries: Mutex::new(Vec::new()),
        auth_headers: Mutex::new(Vec::new()),
    });
    let (addr_tx, addr_rx) = mpsc::channel::<SocketAddr>();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let app_state = state.clone();
    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("build fake org runtime");
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind fake org");
            addr_tx
                .send(listener.local_addr().expect("fake org addr"))
                .expect("report fake org addr");
            let app = Router::new().fallback(handle).with_state(app_state);
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("serve fake org");
        });
    });

    let addr = addr_rx
        .recv_timeout(Duration::from_secs(5))
        .context("fake org did not start")?;
    Ok(OrgGuard {
        base_url: format!("http://{}", addr),
        state,
        shutdown: Some(shutdown_tx),
    })
}

fn json_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn not_found() -> Response {
    json_response(
        StatusCode::NOT_FOUND,
        json!([{ "errorCode": "NOT_FOUND", "message": "The requested resource does not exist" }])
            .to_string(),
    )
}

async fn handle(
    State(state): State<Arc<OrgState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let fixture = &state.fixture;
    if let Some(delay) = fixture.delay {
        tokio::time::sleep(delay).await;
    }

    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.auth_headers.lock().push(auth.clone());
    if auth != format!("OAuth {}", fixture.session_id) {
        return json_response(
            StatusCode::UNAUTHORIZED,
            json!([{ "errorCode": "INVALID_SESSION_ID", "message": "Session expired or invalid" }])
                .to_string(),
        );
    }

    let path = uri.path();
    let sobjects = format!("{}/sobjects", API);

    if method == Method::GET && path == sobjects {
        return json_response(StatusCode::OK, fixture.listing.to_string());
    }

    if method == Method::GET && path == format!("{}/query", API) {
        let q = uri
            .query()
            .and_then(|raw| {
                url::form_urlencoded::parse(raw.as_bytes())
                    .find(|(k, _)| k == "q")
                    .map(|(_, v)| v.into_owned())
            })
            .unwrap_or_default();
        state.queries.lock().push(q);
        let body = json!({
            "totalSize": fixture.query_rows.len(),
            "done": true,
            "records": fixture.query_rows,
        });
        return json_response(StatusCode::OK, body.to_string());
    }

    if let Some(rest) = path.strip_prefix(&format!("{}/", sobjects)) {
        if method == Method::GET
            && let Some(object) = rest.strip_suffix("/describe")
        {
            return match fixture.describes.get(object) {
                Some(d) => json_response(StatusCode::OK, d.to_string()),
                None => not_found(),
            };
        }

        if method == Method::POST && !rest.contains('/') {
            let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
            state.inserted.lock().push((rest.to_string(), payload));
            return match &fixture.insert {
                InsertBehavior::Created(id) => json_response(
                    StatusCode::CREATED,
                    json!({ "id": id, "success": true, "errors": [] }).to_string(),
                ),
                InsertBehavior::Rejected(status, body) => json_response(
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST),
                    body.clone(),
                ),
                InsertBehavior::MissingId => json_response(
                    StatusCode::CREATED,
                    json!({ "success": true, "errors": [] }).to_string(),
                ),
            };
        }
    }

    if method == Method::GET
        && let Some(record) = fixture.records.get(path)
    {
        return json_response(StatusCode::OK, record.to_string());
    }

    not_found()
}

pub fn settings() -> Settings {
    Settings {
        timeout_secs: 5,
        ..Settings::default()
    }
}

/// Connects tab-derived instance URLs to local fake orgs.
pub struct RoutedConnector {
    pub routes: HashMap<String, String>,
    pub settings: Settings,
}

impl RoutedConnector {
    pub fn new(routes: &[(&str, &OrgGuard)]) -> Self {
        Self {
            routes: routes
                .iter()
                .map(|(instance, guard)| (instance.to_string(), guard.base_url.clone()))
                .collect(),
            settings: settings(),
        }
    }
}

impl Connect for RoutedConnector {
    fn connect(&self, instance_url: &str, session_id: &str) -> sfclone::Result<Box<dyn OrgApi>> {
        let base = self.routes.get(instance_url).ok_or_else(|| {
            CloneError::InvalidUrl(format!("no fake org routed for {}", instance_url))
        })?;
        Ok(Box::new(RestClient::new(base, session_id, &self.settings)?))
    }
}
