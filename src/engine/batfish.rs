//! Blocking HTTP gateway for a Batfish-compatible analysis service.
//!
//! Bind validates the structural invariant locally before registering the
//! snapshot; queries go through the service's question endpoint and come
//! back as column-metadata-plus-rows answers.

use log::debug;
use serde_json::{json, Value};

use crate::core::errors::{Error, Result};
use crate::core::ResultTable;
use crate::snapshot::Snapshot;

use super::{is_valid_snapshot_dir, Query, QueryGateway, RECOGNIZED_INPUT_DIRS};

/// HTTP session with an analysis engine. Holds the name of the snapshot
/// the engine is currently bound to; no timeout or retry policy is
/// applied — a hung call blocks the orchestration.
pub struct BatfishGateway {
    base_url: String,
    network: String,
    bound: Option<String>,
    agent: ureq::Agent,
}

impl BatfishGateway {
    pub fn new(base_url: impl Into<String>, network: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            network: network.into(),
            bound: None,
            agent: ureq::agent(),
        }
    }

    /// Name of the snapshot the session is currently bound to, if any.
    pub fn bound_snapshot(&self) -> Option<&str> {
        self.bound.as_deref()
    }

    fn post(&self, path: &str, payload: Value) -> std::result::Result<Value, String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.agent.post(&url).send_json(payload).map_err(|e| match e {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                format!("engine returned status {code}: {body}")
            }
            ureq::Error::Transport(transport) => format!("engine unreachable: {transport}"),
        })?;
        response
            .into_json::<Value>()
            .map_err(|e| format!("malformed engine response: {e}"))
    }
}

impl QueryGateway for BatfishGateway {
    fn bind_snapshot(&mut self, snapshot: &Snapshot, overwrite: bool) -> Result<()> {
        if !overwrite && self.bound.as_deref() == Some(snapshot.name.as_str()) {
            return Ok(());
        }
        if !is_valid_snapshot_dir(&snapshot.path) {
            return Err(Error::bind(
                &snapshot.name,
                format!(
                    "no non-empty input directory ({}) under {}",
                    RECOGNIZED_INPUT_DIRS.join(", "),
                    snapshot.path.display()
                ),
            ));
        }

        let payload = json!({
            "network": self.network,
            "snapshotName": snapshot.name,
            "snapshotPath": snapshot.path,
            "overwrite": overwrite,
        });
        self.post("/v2/snapshots", payload)
            .map_err(|cause| Error::bind(&snapshot.name, cause))?;
        self.bound = Some(snapshot.name.clone());
        debug!("bound snapshot '{}'", snapshot.name);
        Ok(())
    }

    fn run_query(&mut self, query: Query) -> Result<ResultTable> {
        let name = query.name();
        let snapshot = self
            .bound
            .as_ref()
            .ok_or_else(|| Error::query(name, "no snapshot bound to the session"))?;

        let payload = json!({
            "snapshotName": snapshot,
            "question": name,
            "parameters": query.parameters(),
        });
        let answer = self
            .post("/v2/questions", payload)
            .map_err(|cause| Error::query(name, cause))?;
        debug!("query '{name}' answered");
        parse_answer(name, &answer)
    }
}

/// Decode an engine answer into a ResultTable. Answer shape:
/// `answerElements[0].metadata.columnMetadata[].name` gives the columns,
/// `answerElements[0].rows[]` holds one object per row keyed by column.
fn parse_answer(name: &str, answer: &Value) -> Result<ResultTable> {
    if let Some(status) = answer.get("status").and_then(Value::as_str) {
        if status.eq_ignore_ascii_case("failure") {
            return Err(Error::query(name, format!("engine reported {status}")));
        }
    }

    let element = answer
        .get("answerElements")
        .and_then(Value::as_array)
        .and_then(|elements| elements.first())
        .ok_or_else(|| Error::query(name, "answer has no answerElements"))?;

    let columns: Vec<String> = element
        .pointer("/metadata/columnMetadata")
        .and_then(Value::as_array)
        .map(|cols| {
            cols.iter()
                .filter_map(|col| col.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let mut table = ResultTable::new(columns);
    if let Some(rows) = element.get("rows").and_then(Value::as_array) {
        for row in rows {
            let cells = table
                .columns
                .iter()
                .map(|col| render_cell(row.get(col.as_str())))
                .collect();
            table.push_row(cells);
        }
    }
    Ok(table)
}

fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
