//! Common test utilities: a scripted backend for workflow tests
//!
//! `ScriptedApi` implements the remote contract against in-memory
//! plans. Fetches and creates pop pre-planned results; every call is
//! recorded in order so tests can assert on the exact remote traffic.

use arbor::charts::{ChartKind, ChartRow};
use arbor::detail::{DetailQuery, DetailRow};
use arbor::{BusinessApi, Level, Node, NodeId, RemoteError, RemoteResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One recorded remote call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create {
        level: u8,
        name: String,
        parent: Option<String>,
        uuid: Option<String>,
    },
    FetchTree,
    FetchChart {
        lx: u8,
    },
    FetchDetails {
        params: Vec<(&'static str, String)>,
    },
}

/// Scripted backend for end-to-end workflow tests.
#[derive(Default)]
pub struct ScriptedApi {
    calls: Mutex<Vec<Call>>,
    fetch_plan: Mutex<VecDeque<RemoteResult<Vec<Node>>>>,
    default_snapshot: Mutex<Vec<Node>>,
    create_plan: Mutex<VecDeque<RemoteResult<()>>>,
    chart_rows: Mutex<Vec<ChartRow>>,
    detail_rows: Mutex<Vec<DetailRow>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot returned by any fetch without a planned result.
    pub fn set_snapshot(&self, snapshot: Vec<Node>) {
        *self.default_snapshot.lock().unwrap() = snapshot;
    }

    /// Queue the result of the next unplanned-for fetch.
    pub fn plan_fetch(&self, result: RemoteResult<Vec<Node>>) {
        self.fetch_plan.lock().unwrap().push_back(result);
    }

    /// Queue the result of the next create call.
    pub fn plan_create(&self, result: RemoteResult<()>) {
        self.create_plan.lock().unwrap().push_back(result);
    }

    pub fn set_chart_rows(&self, rows: Vec<ChartRow>) {
        *self.chart_rows.lock().unwrap() = rows;
    }

    pub fn set_detail_rows(&self, rows: Vec<DetailRow>) {
        *self.detail_rows.lock().unwrap() = rows;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create { .. }))
            .collect()
    }
}

/// Shorthand for a server rejection.
pub fn rejected(message: &str) -> RemoteError {
    RemoteError::Rejected {
        message: message.to_string(),
    }
}

#[async_trait]
impl BusinessApi for ScriptedApi {
    async fn fetch_tree(&self) -> RemoteResult<Vec<Node>> {
        self.calls.lock().unwrap().push(Call::FetchTree);
        match self.fetch_plan.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(self.default_snapshot.lock().unwrap().clone()),
        }
    }

    async fn create_node(
        &self,
        level: Level,
        name: &str,
        parent_id: Option<&NodeId>,
        uuid: Option<&str>,
    ) -> RemoteResult<()> {
        self.calls.lock().unwrap().push(Call::Create {
            level: level.wire(),
            name: name.to_string(),
            parent: parent_id.map(|p| p.as_str().to_string()),
            uuid: uuid.map(|u| u.to_string()),
        });
        match self.create_plan.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(()),
        }
    }

    async fn fetch_chart(&self, kind: ChartKind) -> RemoteResult<Vec<ChartRow>> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::FetchChart { lx: kind.wire() });
        Ok(self.chart_rows.lock().unwrap().clone())
    }

    async fn fetch_project_details(&self, query: &DetailQuery) -> RemoteResult<Vec<DetailRow>> {
        self.calls.lock().unwrap().push(Call::FetchDetails {
            params: query.to_params(),
        });
        Ok(self.detail_rows.lock().unwrap().clone())
    }
}
