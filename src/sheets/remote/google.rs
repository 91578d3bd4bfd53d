// src/sheets/remote/google.rs
//! Google Sheets adapter over the Drive v3 and Sheets v4 REST endpoints.
//!
//! Blocking on purpose: each user action waits for the store before the next
//! one is accepted.

use std::time::Duration;

use bevy::log::{debug, info, warn};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{RawRows, RemoteStore};
use crate::sheets::definitions::StoreHandle;
use crate::sheets::error::{SheetError, SheetResult};

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";
const SPREADSHEET_FIELDS: &str = "spreadsheetId,spreadsheetUrl,properties.title,sheets.properties.title";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GoogleSheetsStore {
    client: Client,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Spreadsheet {
    spreadsheet_id: String,
    #[serde(default)]
    spreadsheet_url: String,
    properties: TitledProperties,
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: TitledProperties,
}

#[derive(Debug, Deserialize)]
struct TitledProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

impl GoogleSheetsStore {
    pub fn new(access_token: String) -> SheetResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("sheetbridge/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, access_token })
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.access_token)
    }

    fn send(&self, request: RequestBuilder, what: &str) -> SheetResult<String> {
        let response = self.authed(request).send()?;
        read_body(response, what)
    }

    fn send_json(&self, request: RequestBuilder, body: &Value, what: &str) -> SheetResult<String> {
        let request = request
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(body)?);
        self.send(request, what)
    }

    fn values_url(&self, key: &str, range: &str, suffix: &str) -> SheetResult<Url> {
        let mut url = api_url(SHEETS_API_URL)?;
        url.path_segments_mut()
            .map_err(|_| SheetError::Config("Sheets API URL cannot take path segments".to_string()))?
            .push(key)
            .push("values")
            .push(&format!("{}{}", range, suffix));
        Ok(url)
    }

    fn fetch_spreadsheet(&self, key: &str) -> SheetResult<Spreadsheet> {
        let mut url = api_url(SHEETS_API_URL)?;
        url.path_segments_mut()
            .map_err(|_| SheetError::Config("Sheets API URL cannot take path segments".to_string()))?
            .push(key);
        let body = self.send(
            self.client.get(url).query(&[("fields", SPREADSHEET_FIELDS)]),
            "open spreadsheet",
        )?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn api_url(base: &str) -> SheetResult<Url> {
    Url::parse(base).map_err(|e| SheetError::Config(format!("bad API URL '{}': {}", base, e)))
}

fn read_body(response: Response, what: &str) -> SheetResult<String> {
    let status = response.status();
    let body = response.text()?;
    if status.is_success() {
        return Ok(body);
    }
    Err(status_error(status, what, &body))
}

fn status_error(status: StatusCode, what: &str, body: &str) -> SheetError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.to_string());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SheetError::Access(format!("{} rejected: {}", what, detail))
        }
        StatusCode::NOT_FOUND => SheetError::NotFound(format!("{}: {}", what, detail)),
        _ => SheetError::Remote(format!("{} failed ({}): {}", what, status.as_u16(), detail)),
    }
}

/// Quotes a worksheet title for A1 notation (`Bob's` -> `'Bob''s'`).
fn quote_worksheet(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn top_left(worksheet: &str) -> String {
    format!("{}!A1", quote_worksheet(worksheet))
}

/// Drive search expression matching spreadsheets titled exactly `name`.
fn drive_title_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        escaped, SPREADSHEET_MIME
    )
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn parse_value_range(body: &str) -> SheetResult<RawRows> {
    let range: ValueRange = serde_json::from_str(body)?;
    Ok(range
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect())
}

fn handle_from(sheet: Spreadsheet) -> StoreHandle {
    let worksheet = sheet
        .sheets
        .into_iter()
        .next()
        .map(|s| s.properties.title)
        .unwrap_or_else(|| "Sheet1".to_string());
    let url = if sheet.spreadsheet_url.is_empty() {
        format!("https://docs.google.com/spreadsheets/d/{}", sheet.spreadsheet_id)
    } else {
        sheet.spreadsheet_url
    };
    StoreHandle {
        key: sheet.spreadsheet_id,
        title: sheet.properties.title,
        url,
        worksheet,
    }
}

impl RemoteStore for GoogleSheetsStore {
    fn backend_name(&self) -> &'static str {
        "google"
    }

    fn find_by_name(&self, name: &str) -> SheetResult<Option<StoreHandle>> {
        let query = drive_title_query(name);
        let body = self.send(
            self.client.get(DRIVE_FILES_URL).query(&[
                ("q", query.as_str()),
                ("fields", "files(id)"),
                ("orderBy", "createdTime"),
                ("pageSize", "10"),
            ]),
            "search spreadsheets",
        )?;
        let list: DriveFileList = serde_json::from_str(&body)?;
        if list.files.len() > 1 {
            warn!(
                "{} spreadsheets are titled '{}'; using the oldest one.",
                list.files.len(),
                name
            );
        }
        match list.files.into_iter().next() {
            Some(file) => self.open_by_key(&file.id),
            None => Ok(None),
        }
    }

    fn open_by_key(&self, key: &str) -> SheetResult<Option<StoreHandle>> {
        match self.fetch_spreadsheet(key) {
            Ok(sheet) => Ok(Some(handle_from(sheet))),
            Err(SheetError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn create(&self, name: &str) -> SheetResult<StoreHandle> {
        let body = self.send_json(
            self.client
                .post(SHEETS_API_URL)
                .query(&[("fields", SPREADSHEET_FIELDS)]),
            &json!({ "properties": { "title": name } }),
            "create spreadsheet",
        )?;
        let handle = handle_from(serde_json::from_str(&body)?);
        info!("Created spreadsheet '{}' at {}", handle.title, handle.url);
        Ok(handle)
    }

    fn append_row(&self, handle: &StoreHandle, row: &[String]) -> SheetResult<()> {
        let url = self.values_url(&handle.key, &top_left(&handle.worksheet), ":append")?;
        self.send_json(
            self.client.post(url).query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ]),
            &json!({ "majorDimension": "ROWS", "values": [row] }),
            "append row",
        )?;
        Ok(())
    }

    fn read_all(&self, handle: &StoreHandle) -> SheetResult<RawRows> {
        let url = self.values_url(&handle.key, &quote_worksheet(&handle.worksheet), "")?;
        let body = self.send(
            self.client.get(url).query(&[
                ("majorDimension", "ROWS"),
                ("valueRenderOption", "FORMATTED_VALUE"),
            ]),
            "read values",
        )?;
        let rows = parse_value_range(&body)?;
        debug!("Read {} raw rows from '{}'", rows.len(), handle.title);
        Ok(rows)
    }

    fn replace_all(&self, handle: &StoreHandle, rows: &[Vec<String>]) -> SheetResult<()> {
        let whole = quote_worksheet(&handle.worksheet);
        let clear_url = self.values_url(&handle.key, &whole, ":clear")?;
        self.send_json(self.client.post(clear_url), &json!({}), "clear values")?;

        if rows.is_empty() {
            return Ok(());
        }
        let range = top_left(&handle.worksheet);
        let update_url = self.values_url(&handle.key, &range, "")?;
        self.send_json(
            self.client
                .put(update_url)
                .query(&[("valueInputOption", "RAW")]),
            &json!({ "range": range, "majorDimension": "ROWS", "values": rows }),
            "write values",
        )?;
        debug!("Wrote {} rows to '{}'", rows.len(), handle.title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_worksheet() {
        assert_eq!(quote_worksheet("Sheet1"), "'Sheet1'");
        assert_eq!(quote_worksheet("Bob's list"), "'Bob''s list'");
        assert_eq!(top_left("Sheet1"), "'Sheet1'!A1");
    }

    #[test]
    fn test_drive_title_query_escapes() {
        assert_eq!(
            drive_title_query("Q3 'final'"),
            "name = 'Q3 \\'final\\'' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false"
        );
    }

    #[test]
    fn test_parse_value_range() {
        let body = r#"{"range":"Sheet1!A1:C3","majorDimension":"ROWS",
            "values":[["Name","Age","City"],["Alice","30"],["Bob",25,null]]}"#;
        let rows = parse_value_range(body).unwrap();
        assert_eq!(rows[1], vec!["Alice".to_string(), "30".to_string()]);
        assert_eq!(rows[2], vec!["Bob".to_string(), "25".to_string(), String::new()]);
    }

    #[test]
    fn test_parse_empty_value_range() {
        let rows = parse_value_range(r#"{"range":"Sheet1!A1:Z1000","majorDimension":"ROWS"}"#).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_status_mapping() {
        let body = r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#;
        match status_error(StatusCode::FORBIDDEN, "read values", body) {
            SheetError::Access(msg) => assert!(msg.contains("does not have permission")),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "open spreadsheet", ""),
            SheetError::NotFound(_)
        ));
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR, "write values", "oops"),
            SheetError::Remote(_)
        ));
    }

    #[test]
    fn test_handle_from_spreadsheet() {
        let sheet: Spreadsheet = serde_json::from_str(
            r#"{"spreadsheetId":"abc","spreadsheetUrl":"https://docs.google.com/spreadsheets/d/abc/edit",
                "properties":{"title":"Crew"},"sheets":[{"properties":{"title":"Roster"}}]}"#,
        )
        .unwrap();
        let handle = handle_from(sheet);
        assert_eq!(handle.key, "abc");
        assert_eq!(handle.title, "Crew");
        assert_eq!(handle.worksheet, "Roster");
        assert!(handle.url.ends_with("/edit"));
    }
}
