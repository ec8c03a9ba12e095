//! Test utilities and a mock `CkanApi` implementation.

use std::collections::VecDeque;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, Mutex};

use ckan_import_core::{ActionResponse, AppError, CkanApi, NewPackage, NewResource};
use serde_json::json;

/// Scripted answer for one mock call.
#[derive(Clone, Debug)]
pub enum MockReply {
    /// `{"success": true, ...}`
    Accept,
    /// `{"success": false, "error": <value>}` with the given HTTP status.
    Reject(u16, serde_json::Value),
    /// Transport-level failure.
    Transport(String),
}

#[derive(Default)]
struct MockState {
    create_replies: VecDeque<MockReply>,
    upload_replies: VecDeque<MockReply>,
    packages: Vec<NewPackage>,
    resources: Vec<NewResource>,
    uploaded_bytes: Vec<Vec<u8>>,
    open_handles: usize,
}

/// Mock CKAN API with scripted replies.
///
/// Calls without a scripted reply are accepted. `resource_create` really
/// opens the resource file and tracks how many handles are open.
#[derive(Clone, Default)]
pub struct MockCkanApi {
    state: Arc<Mutex<MockState>>,
}

#[allow(dead_code)]
impl MockCkanApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_create(self, reply: MockReply) -> Self {
        self.state.lock().unwrap().create_replies.push_back(reply);
        self
    }

    pub fn on_upload(self, reply: MockReply) -> Self {
        self.state.lock().unwrap().upload_replies.push_back(reply);
        self
    }

    pub fn packages(&self) -> Vec<NewPackage> {
        self.state.lock().unwrap().packages.clone()
    }

    pub fn resources(&self) -> Vec<NewResource> {
        self.state.lock().unwrap().resources.clone()
    }

    pub fn uploaded_bytes(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().uploaded_bytes.clone()
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().packages.len()
    }

    pub fn upload_calls(&self) -> usize {
        self.state.lock().unwrap().resources.len()
    }

    pub fn open_handles(&self) -> usize {
        self.state.lock().unwrap().open_handles
    }
}

/// Decrements the open-handle count when dropped.
struct HandleGuard {
    state: Arc<Mutex<MockState>>,
    file: std::fs::File,
}

impl HandleGuard {
    fn open(state: &Arc<Mutex<MockState>>, path: &Path) -> Result<Self, AppError> {
        let file = std::fs::File::open(path)?;
        state.lock().unwrap().open_handles += 1;
        Ok(Self {
            state: Arc::clone(state),
            file,
        })
    }
}

impl Drop for HandleGuard {
    fn drop(&mut self) {
        self.state.lock().unwrap().open_handles -= 1;
    }
}

fn respond(reply: MockReply, result: serde_json::Value) -> Result<ActionResponse, AppError> {
    match reply {
        MockReply::Accept => {
            let body = json!({"success": true, "result": result});
            Ok(ActionResponse::from_http(200, body.to_string().as_bytes()))
        }
        MockReply::Reject(status, error) => {
            let body = json!({"success": false, "error": error});
            Ok(ActionResponse::from_http(status, body.to_string().as_bytes()))
        }
        MockReply::Transport(msg) => Err(AppError::NetworkError(msg)),
    }
}

impl CkanApi for MockCkanApi {
    async fn package_create(&self, package: &NewPackage) -> Result<ActionResponse, AppError> {
        let reply = {
            let mut state = self.state.lock().unwrap();
            state.packages.push(package.clone());
            state.create_replies.pop_front().unwrap_or(MockReply::Accept)
        };
        respond(reply, json!({"name": package.name, "title": package.title}))
    }

    async fn resource_create(&self, resource: &NewResource) -> Result<ActionResponse, AppError> {
        let reply = {
            let mut state = self.state.lock().unwrap();
            state.resources.push(resource.clone());
            state.upload_replies.pop_front().unwrap_or(MockReply::Accept)
        };

        let mut handle = HandleGuard::open(&self.state, resource.path())?;
        let mut bytes = Vec::new();
        handle.file.read_to_end(&mut bytes)?;
        self.state.lock().unwrap().uploaded_bytes.push(bytes);

        let response = respond(
            reply,
            json!({"package_id": resource.package_id, "name": resource.name}),
        );
        drop(handle);
        response
    }
}

/// Writes `contents` to `dir/name` and returns the path.
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
