//! In-memory session used by unit tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use kolmail_protocol::GameRequest;

use crate::error::Result;
use crate::session::Session;

type Responder = Box<dyn Fn(&GameRequest) -> String + Send + Sync>;

/// Records every request and answers from a responder function.
pub struct ScriptedSession {
    responder: Responder,
    requests: Mutex<Vec<GameRequest>>,
}

impl ScriptedSession {
    pub fn new(responder: impl Fn(&GameRequest) -> String + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers every request with the same page.
    pub fn fixed(body: &'static str) -> Self {
        Self::new(move |_| body.to_string())
    }

    /// Answers requests in order, then with empty pages.
    pub fn queued(bodies: impl IntoIterator<Item = &'static str>) -> Self {
        let queue: Mutex<VecDeque<&'static str>> = Mutex::new(bodies.into_iter().collect());
        Self::new(move |_| {
            queue
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_default()
                .to_string()
        })
    }

    pub fn requests(&self) -> Vec<GameRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of `whichitem<N>` fields in a request.
    pub fn item_count(request: &GameRequest) -> usize {
        request
            .fields()
            .iter()
            .filter(|(name, _)| name.starts_with("whichitem"))
            .count()
    }
}

impl Session for ScriptedSession {
    fn request(&self, request: &GameRequest) -> impl Future<Output = Result<String>> + Send {
        self.requests.lock().unwrap().push(request.clone());
        let body = (self.responder)(request);
        std::future::ready(Ok(body))
    }
}
