//! In-memory fakes for exercising the request pipeline natively.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::net::gateway::{Dispatch, GatewayError, Navigator, OutboundRequest, RawResponse};

/// Transport fake replaying scripted responses and recording what was sent.
#[derive(Clone, Default)]
pub struct MockDispatch {
    script: Rc<RefCell<VecDeque<Result<RawResponse, GatewayError>>>>,
    sent: Rc<RefCell<Vec<OutboundRequest>>>,
}

impl MockDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn reply(&self, status: u16, body: &str) {
        self.script
            .borrow_mut()
            .push_back(Ok(RawResponse { status, body: body.to_owned() }));
    }

    /// Queue a transport-level failure.
    pub fn fail(&self, error: GatewayError) {
        self.script.borrow_mut().push_back(Err(error));
    }

    /// Requests dispatched so far, in order.
    pub fn sent(&self) -> Vec<OutboundRequest> {
        self.sent.borrow().clone()
    }
}

impl Dispatch for MockDispatch {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, GatewayError> {
        self.sent.borrow_mut().push(request);
        self.script.borrow_mut().pop_front().expect("scripted response")
    }
}

/// Navigator fake recording forced redirects. The reported path is fixed
/// at construction, so redirect-once behavior is attributable to the
/// gateway guard rather than a simulated location change.
#[derive(Clone)]
pub struct RecordingNavigator {
    path: String,
    replaced: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        Self { path: path.to_owned(), replaced: Rc::new(RefCell::new(Vec::new())) }
    }

    pub fn replacements(&self) -> Vec<String> {
        self.replaced.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn replace(&self, path: &str) {
        self.replaced.borrow_mut().push(path.to_owned());
    }
}
