//! In-memory port implementations shared by the use case tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::significant_drop_tightening)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;
use workbench_domain::{
    Environment, HttpMethod, RequestDraft, RequestTemplate, ResolvedRequest, ResponseData,
    ResponseSnapshot,
};

use crate::ports::{
    Clock, EnvironmentError, EnvironmentRepository, HttpClient, HttpClientError, HttpFuture,
    TemplateError, TemplateRepository,
};

/// Clock pinned to a fixed number of seconds after the epoch.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn at(seconds: i64) -> Self {
        Self(Utc.timestamp_opt(seconds, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Records every request and replies with a canned result.
pub struct MockHttpClient {
    response: Result<ResponseSnapshot, HttpClientError>,
    sent: Mutex<Vec<ResolvedRequest>>,
}

impl MockHttpClient {
    pub fn ok(status: u16, body: &str) -> Self {
        Self {
            response: Ok(ResponseSnapshot::new(
                status,
                "OK",
                BTreeMap::new(),
                ResponseData::from_body(body.to_string()),
            )),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: HttpClientError) -> Self {
        Self {
            response: Err(error),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<ResolvedRequest> {
        self.sent.lock().expect("Lock poisoned").clone()
    }
}

impl HttpClient for MockHttpClient {
    fn execute<'a>(&'a self, request: &'a ResolvedRequest) -> HttpFuture<'a> {
        self.sent
            .lock()
            .expect("Lock poisoned")
            .push(request.clone());
        let result = self.response.clone();
        Box::pin(async move { result })
    }
}

#[derive(Default)]
pub struct InMemoryEnvironments {
    environments: Mutex<Vec<Environment>>,
}

impl InMemoryEnvironments {
    pub fn insert(&self, environment: Environment) {
        self.environments.lock().unwrap().push(environment);
    }

    pub fn stored(&self, id: Uuid) -> Option<Environment> {
        self.environments
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }
}

#[async_trait]
impl EnvironmentRepository for InMemoryEnvironments {
    async fn list(&self, owner_id: &str) -> Result<Vec<Environment>, EnvironmentError> {
        let mut owned: Vec<_> = self
            .environments
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.is_owned_by(owner_id))
            .cloned()
            .collect();
        owned.sort_by_key(|e| e.id);
        Ok(owned)
    }

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<Environment, EnvironmentError> {
        self.stored(id)
            .filter(|e| e.is_owned_by(owner_id))
            .ok_or(EnvironmentError::NotFound(id))
    }

    async fn save(&self, environment: &Environment) -> Result<(), EnvironmentError> {
        let mut environments = self.environments.lock().unwrap();
        environments.retain(|e| e.id != environment.id);
        environments.push(environment.clone());
        Ok(())
    }

    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<(), EnvironmentError> {
        let mut environments = self.environments.lock().unwrap();
        let before = environments.len();
        environments.retain(|e| !(e.id == id && e.is_owned_by(owner_id)));
        if environments.len() == before {
            return Err(EnvironmentError::NotFound(id));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTemplates {
    templates: Mutex<HashMap<Uuid, RequestTemplate>>,
}

impl InMemoryTemplates {
    pub fn insert(&self, template: RequestTemplate) {
        self.templates.lock().unwrap().insert(template.id, template);
    }

    pub fn stored(&self, id: Uuid) -> Option<RequestTemplate> {
        self.templates.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl TemplateRepository for InMemoryTemplates {
    async fn list(&self, owner_id: &str) -> Result<Vec<RequestTemplate>, TemplateError> {
        let mut owned: Vec<_> = self
            .templates
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.is_owned_by(owner_id))
            .cloned()
            .collect();
        owned.sort_by_key(|t| t.id);
        Ok(owned)
    }

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<RequestTemplate, TemplateError> {
        self.stored(id)
            .filter(|t| t.is_owned_by(owner_id))
            .ok_or(TemplateError::NotFound(id))
    }

    async fn save(&self, template: &RequestTemplate) -> Result<(), TemplateError> {
        self.insert(template.clone());
        Ok(())
    }

    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<(), TemplateError> {
        let mut templates = self.templates.lock().unwrap();
        match templates.get(&id) {
            Some(t) if t.is_owned_by(owner_id) => {
                templates.remove(&id);
                Ok(())
            }
            _ => Err(TemplateError::NotFound(id)),
        }
    }
}

pub fn sample_template(owner_id: &str) -> RequestTemplate {
    RequestTemplate::new(
        owner_id,
        "List users",
        RequestDraft::new(HttpMethod::Get, "https://example.com/users"),
        FixedClock::at(0).now(),
    )
}

/// Yields to the runtime until `condition` holds, giving up after a while.
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::task::yield_now().await;
    }
    condition()
}
