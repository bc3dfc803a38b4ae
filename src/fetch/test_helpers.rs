//! Shared test doubles for the fetch module tests.
//!
//! Scripted collaborators let the resolver be exercised without any network.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error_handling::HopFetchError;
use crate::fetch::fallback::FallbackResolver;
use crate::fetch::fetcher::{HopFetcher, HopResponse};
use crate::fetch::hop::HopHeaders;

/// Scripted outcome of one hop request.
#[derive(Clone)]
pub enum Scripted {
    /// Respond with a status and optional `Location`.
    Respond(u16, Option<&'static str>),
    /// Fail with a transport message.
    Fail(&'static str),
}

impl Scripted {
    fn to_result(&self) -> Result<HopResponse, HopFetchError> {
        match self {
            Scripted::Respond(status, location) => {
                let mut headers = HopHeaders::new();
                if let Some(loc) = location {
                    headers.insert("location".to_string(), loc.to_string());
                }
                Ok(HopResponse::new(*status, headers))
            }
            Scripted::Fail(message) => Err(HopFetchError::Other(message.to_string())),
        }
    }
}

/// Answers hop requests from a URL-keyed table and records every call.
///
/// Unknown URLs fail with a transport error.
#[derive(Default)]
pub struct TableFetcher {
    table: HashMap<String, Scripted>,
    calls: Mutex<Vec<String>>,
}

impl TableFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, outcome: Scripted) -> Self {
        self.table.insert(url.to_string(), outcome);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HopFetcher for TableFetcher {
    async fn fetch_hop(&self, url: &str) -> Result<HopResponse, HopFetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.table.get(url) {
            Some(outcome) => outcome.to_result(),
            None => Err(HopFetchError::Other(format!("no route for {}", url))),
        }
    }
}

/// Answers hop requests in order from a queue, regardless of URL.
pub struct QueueFetcher {
    queue: Mutex<VecDeque<Scripted>>,
}

impl QueueFetcher {
    pub fn new(outcomes: Vec<Scripted>) -> Self {
        Self {
            queue: Mutex::new(outcomes.into()),
        }
    }
}

#[async_trait]
impl HopFetcher for QueueFetcher {
    async fn fetch_hop(&self, _url: &str) -> Result<HopResponse, HopFetchError> {
        let next = self.queue.lock().unwrap().pop_front();
        match next {
            Some(outcome) => outcome.to_result(),
            None => Err(HopFetchError::Other("queue exhausted".to_string())),
        }
    }
}

/// Fallback returning a fixed answer and counting how often it was asked.
pub struct FixedFallback {
    answer: Option<&'static str>,
    calls: Mutex<Vec<String>>,
}

impl FixedFallback {
    pub fn new(answer: Option<&'static str>) -> Self {
        Self {
            answer,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FallbackResolver for FixedFallback {
    async fn attempt_final_url(&self, url: &str) -> Option<String> {
        self.calls.lock().unwrap().push(url.to_string());
        self.answer.map(str::to_string)
    }
}
