//! Scripted realm and connection doubles with call counters

use crate::realm::{ContextFactory, Connector, DirectoryConnection, SecurityRealm};
use async_trait::async_trait;
use dirscope_core::types::{ConnectionEnvironment, DirectoryRecord, SearchRequest};
use dirscope_core::{Error, Result};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct Calls {
    system_contexts: AtomicUsize,
    system_closes: AtomicUsize,
    connects: AtomicUsize,
    searches: AtomicUsize,
    closes: AtomicUsize,
    requests: Mutex<Vec<SearchRequest>>,
}

impl Calls {
    pub fn system_contexts(&self) -> usize {
        self.system_contexts.load(Ordering::SeqCst)
    }

    pub fn system_closes(&self) -> usize {
        self.system_closes.load(Ordering::SeqCst)
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Every interaction that would touch the directory
    pub fn total(&self) -> usize {
        self.system_contexts() + self.connects() + self.searches() + self.closes()
    }
}

/// One scripted step of a search enumeration
#[derive(Debug, Clone)]
pub enum Step {
    Entry(DirectoryRecord),
    Fail(String),
}

pub fn entry(uid: &str) -> Step {
    Step::Entry(
        DirectoryRecord::new(format!("uid={},ou=users,dc=example,dc=com", uid))
            .with_attribute("uid", [uid])
            .with_attribute("mail", [format!("{}@example.com", uid)]),
    )
}

#[derive(Clone)]
pub struct StubRealm {
    env: ConnectionEnvironment,
    provides_context: bool,
    pub calls: Arc<Calls>,
}

impl StubRealm {
    pub fn new() -> Self {
        Self {
            env: ConnectionEnvironment::new("ldap://directory.test:389")
                .with_credentials("cn=system,dc=example,dc=com", "system"),
            provides_context: true,
            calls: Arc::new(Calls::default()),
        }
    }

    pub fn without_system_context() -> Self {
        Self {
            provides_context: false,
            ..Self::new()
        }
    }

    pub fn environment(&self) -> ConnectionEnvironment {
        self.env.clone()
    }
}

impl SecurityRealm for StubRealm {
    fn context_factory(&self) -> Arc<dyn ContextFactory> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl ContextFactory for StubRealm {
    async fn system_context(&self) -> Result<Option<Box<dyn DirectoryConnection>>> {
        self.calls.system_contexts.fetch_add(1, Ordering::SeqCst);

        if !self.provides_context {
            return Ok(None);
        }

        Ok(Some(Box::new(StubConnection {
            env: self.env.clone(),
            search_error: None,
            close_error: None,
            steps: VecDeque::new(),
            system: true,
            calls: self.calls.clone(),
        })))
    }
}

#[derive(Clone)]
pub struct StubConnector {
    steps: Vec<Step>,
    search_error: Option<String>,
    close_error: Option<String>,
    refuse: Option<String>,
    pub calls: Arc<Calls>,
}

impl StubConnector {
    /// Connections that yield `steps` in order
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            search_error: None,
            close_error: None,
            refuse: None,
            calls: Arc::new(Calls::default()),
        }
    }

    /// Connections whose search is rejected up front
    pub fn failing_search(message: &str) -> Self {
        Self {
            search_error: Some(message.to_string()),
            ..Self::new(vec![])
        }
    }

    /// Connections whose release fails after running `steps`
    pub fn failing_close(steps: Vec<Step>, message: &str) -> Self {
        Self {
            close_error: Some(message.to_string()),
            ..Self::new(steps)
        }
    }

    pub fn refusing(message: &str) -> Self {
        Self {
            refuse: Some(message.to_string()),
            ..Self::new(vec![])
        }
    }
}

#[async_trait]
impl Connector for StubConnector {
    async fn connect(&self, env: &ConnectionEnvironment) -> Result<Box<dyn DirectoryConnection>> {
        self.calls.connects.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.refuse {
            return Err(Error::ProtocolFailure(message.clone()));
        }

        Ok(Box::new(StubConnection {
            env: env.clone(),
            search_error: self.search_error.clone(),
            close_error: self.close_error.clone(),
            steps: self.steps.iter().cloned().collect(),
            system: false,
            calls: self.calls.clone(),
        }))
    }
}

pub struct StubConnection {
    env: ConnectionEnvironment,
    search_error: Option<String>,
    close_error: Option<String>,
    steps: VecDeque<Step>,
    system: bool,
    calls: Arc<Calls>,
}

#[async_trait]
impl DirectoryConnection for StubConnection {
    fn environment(&self) -> &ConnectionEnvironment {
        &self.env
    }

    async fn search(&mut self, request: &SearchRequest) -> Result<()> {
        self.calls.searches.fetch_add(1, Ordering::SeqCst);
        self.calls.requests.lock().unwrap().push(request.clone());

        match &self.search_error {
            Some(message) => Err(Error::ProtocolFailure(message.clone())),
            None => Ok(()),
        }
    }

    async fn next_entry(&mut self) -> Result<Option<DirectoryRecord>> {
        match self.steps.pop_front() {
            Some(Step::Entry(record)) => Ok(Some(record)),
            // Raw communication error, not yet classified
            Some(Step::Fail(message)) => Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                message,
            ))),
            None => Ok(None),
        }
    }

    async fn close(&mut self) -> Result<()> {
        let counter = if self.system {
            &self.calls.system_closes
        } else {
            &self.calls.closes
        };
        counter.fetch_add(1, Ordering::SeqCst);

        match &self.close_error {
            Some(message) => Err(Error::ProtocolFailure(message.clone())),
            None => Ok(()),
        }
    }
}
