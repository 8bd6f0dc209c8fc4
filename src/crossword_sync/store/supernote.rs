//! Supernote cloud over its web API.
//!
//! Every endpoint is a JSON `POST` answering with a `success` flag and an
//! `errorMsg`. Authentication is a challenge: fetch a random code for the account,
//! then send `sha256(md5(password) + code)`. The returned token rides along as
//! `x-access-token` on every later call.
//!
//! Directories are addressed by id, so path-based calls walk folder names from the
//! root (id `0`). Uploads are three steps: apply (returns a signed storage URL),
//! `PUT` the bytes, finish.

use super::cloud::{split_remote, CloudDrive, RemoteEntry};
use crate::error::{Result, SyncError};
use md5::Md5;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use std::time::Duration;

const PAGE_SIZE: u64 = 100;
const TOKEN_HEADER: &str = "x-access-token";

/// The HTTP exchanges [`SupernoteDrive`] needs.
pub trait ApiTransport {
    /// POSTs `payload` as JSON and returns the decoded JSON body.
    fn post_json(&self, url: &str, token: Option<&str>, payload: &Value) -> Result<Value>;

    /// PUTs raw bytes to a signed storage URL.
    fn put_object(&self, url: &str, headers: &[(&str, &str)], body: Vec<u8>) -> Result<()>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SyncError::Http)?;
        Ok(Self { client })
    }
}

impl ApiTransport for HttpTransport {
    fn post_json(&self, url: &str, token: Option<&str>, payload: &Value) -> Result<Value> {
        let mut request = self.client.post(url).json(payload);
        if let Some(token) = token {
            request = request.header(TOKEN_HEADER, token);
        }
        Ok(request.send()?.error_for_status()?.json()?)
    }

    fn put_object(&self, url: &str, headers: &[(&str, &str)], body: Vec<u8>) -> Result<()> {
        let mut request = self.client.put(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        request.body(body).send()?.error_for_status()?;
        Ok(())
    }
}

pub struct SupernoteDrive<T: ApiTransport = HttpTransport> {
    transport: T,
    api_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RandomCode {
    random_code: String,
    timestamp: Value,
}

#[derive(Debug, Deserialize)]
struct LoginToken {
    token: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    total: u64,
    #[serde(rename = "userFileVOList", default)]
    user_file_vo_list: Vec<FileVo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileVo {
    id: Value,
    file_name: String,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    is_folder: String,
}

impl FileVo {
    fn is_folder(&self) -> bool {
        self.is_folder.eq_ignore_ascii_case("y")
    }
}

impl From<FileVo> for RemoteEntry {
    fn from(vo: FileVo) -> Self {
        RemoteEntry {
            is_folder: vo.is_folder(),
            size: vo.size,
            name: vo.file_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadGrant {
    url: String,
    s3_authorization: String,
    xamz_date: String,
}

fn hex_digest<D: Digest>(input: &[u8]) -> String {
    hex::encode(D::digest(input))
}

/// The value sent as `password` at login.
pub fn login_hash(password: &str, random_code: &str) -> String {
    let inner = hex_digest::<Md5>(password.as_bytes());
    hex_digest::<Sha256>(format!("{}{}", inner, random_code).as_bytes())
}

/// Unwraps the `success` envelope every endpoint answers with.
fn check_envelope(endpoint: &str, body: &Value) -> Result<()> {
    if body.get("success").and_then(Value::as_bool).unwrap_or(false) {
        return Ok(());
    }
    let message = body
        .get("errorMsg")
        .and_then(Value::as_str)
        .unwrap_or("request rejected");
    Err(SyncError::Cloud(format!("{}: {}", endpoint, message)))
}

/// Last path segment of the signed storage URL, which the finish step needs.
fn inner_name(upload_url: &str) -> Result<String> {
    Url::parse(upload_url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .ok_or_else(|| SyncError::Cloud(format!("Bad upload URL: {}", upload_url)))
}

impl SupernoteDrive<HttpTransport> {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self::with_transport(api_url, HttpTransport::new(timeout)?))
    }
}

impl<T: ApiTransport> SupernoteDrive<T> {
    pub fn with_transport(api_url: &str, transport: T) -> Self {
        let api_url = if api_url.ends_with('/') {
            api_url.to_string()
        } else {
            format!("{}/", api_url)
        };
        Self {
            transport,
            api_url,
            token: None,
        }
    }

    fn call<R: DeserializeOwned>(&self, endpoint: &str, payload: Value) -> Result<R> {
        tracing::debug!(endpoint, "supernote call");
        let url = format!("{}{}", self.api_url, endpoint);
        let body = self
            .transport
            .post_json(&url, self.token.as_deref(), &payload)?;
        check_envelope(endpoint, &body)?;
        Ok(serde_json::from_value(body)?)
    }

    fn require_token(&self) -> Result<()> {
        if self.token.is_none() {
            return Err(SyncError::Auth("not logged in".to_string()));
        }
        Ok(())
    }

    fn list_by_id(&self, directory_id: &Value) -> Result<Vec<FileVo>> {
        let mut files = Vec::new();
        let mut page = 1;
        loop {
            let listing: FileList = self.call(
                "file/list/query",
                json!({
                    "directoryId": directory_id,
                    "pageNo": page,
                    "pageSize": PAGE_SIZE,
                    "order": "time",
                    "sequence": "desc",
                }),
            )?;
            let fetched = listing.user_file_vo_list.len();
            files.extend(listing.user_file_vo_list);
            if fetched == 0 || files.len() as u64 >= listing.total {
                return Ok(files);
            }
            page += 1;
        }
    }

    fn resolve_dir(&self, dir: &str) -> Result<Value> {
        let mut current = json!(0);
        for component in dir.split('/').filter(|c| !c.is_empty()) {
            let entries = self.list_by_id(&current)?;
            current = entries
                .into_iter()
                .find(|e| e.is_folder() && e.file_name == component)
                .map(|e| e.id)
                .ok_or_else(|| SyncError::Cloud(format!("No such directory: {}", dir)))?;
        }
        Ok(current)
    }
}

impl<T: ApiTransport> CloudDrive for SupernoteDrive<T> {
    fn login(&mut self, email: &str, password: &str) -> Result<()> {
        self.token = None;
        let challenge: RandomCode = self
            .call(
                "official/user/query/random/code",
                json!({ "countryCode": 1, "account": email }),
            )
            .map_err(|e| SyncError::Auth(e.to_string()))?;

        let login: LoginToken = self
            .call(
                "official/user/account/login/new",
                json!({
                    "countryCode": 1,
                    "account": email,
                    "password": login_hash(password, &challenge.random_code),
                    "browser": "Chrome107",
                    "equipment": "1",
                    "loginMethod": "1",
                    "timestamp": challenge.timestamp,
                    "language": "en",
                }),
            )
            .map_err(|e| SyncError::Auth(e.to_string()))?;

        self.token = Some(login.token);
        // A listing proves the token works.
        if let Err(e) = self.list_by_id(&json!(0)) {
            self.token = None;
            return Err(SyncError::Auth(e.to_string()));
        }
        tracing::info!("logged in to Supernote cloud");
        Ok(())
    }

    fn list(&self, dir: &str) -> Result<Vec<RemoteEntry>> {
        self.require_token()?;
        let id = self.resolve_dir(dir)?;
        Ok(self
            .list_by_id(&id)?
            .into_iter()
            .map(RemoteEntry::from)
            .collect())
    }

    fn delete(&self, path: &str) -> Result<()> {
        self.require_token()?;
        let (parent, name) = split_remote(path);
        let parent_id = self.resolve_dir(parent)?;
        let file = self
            .list_by_id(&parent_id)?
            .into_iter()
            .find(|e| !e.is_folder() && e.file_name == name)
            .ok_or_else(|| SyncError::Cloud(format!("No such file: {}", path)))?;

        let _: Value = self.call(
            "file/delete",
            json!({ "idList": [file.id], "directoryId": parent_id }),
        )?;
        Ok(())
    }

    fn put(&self, local: &Path, parent: &str) -> Result<()> {
        self.require_token()?;
        let file_name = local
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| SyncError::Cloud(format!("Bad local path: {}", local.display())))?;
        let data = fs::read(local).map_err(SyncError::Io)?;
        let md5 = hex_digest::<Md5>(&data);
        let size = data.len();
        let directory_id = self.resolve_dir(parent)?;

        let grant: UploadGrant = self.call(
            "file/upload/apply",
            json!({
                "directoryId": directory_id,
                "fileName": file_name,
                "md5": md5,
                "size": size,
            }),
        )?;
        let inner_name = inner_name(&grant.url)?;

        self.transport.put_object(
            &grant.url,
            &[
                ("Authorization", grant.s3_authorization.as_str()),
                ("x-amz-date", grant.xamz_date.as_str()),
                ("x-amz-content-sha256", "UNSIGNED-PAYLOAD"),
            ],
            data,
        )?;

        let _: Value = self.call(
            "file/upload/finish",
            json!({
                "directoryId": directory_id,
                "fileName": file_name,
                "fileSize": size,
                "innerName": inner_name,
                "md5": md5,
            }),
        )?;
        tracing::info!(file = file_name, parent, "uploaded");
        Ok(())
    }
}
