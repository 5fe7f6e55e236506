//! Request lifecycle shared by the conversion and swap widgets.
//!
//! A widget moves `Idle -> Loading -> Success | Failed` and starts over on
//! the next user action. While a request is in flight further submissions
//! are ignored: [`Widget::begin`] answers [`WidgetError::Busy`] and the
//! pending request is left untouched.

use std::future::Future;
use tracing::{debug, error};

use super::client::WidgetError;

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState<T> {
    Idle,
    Loading,
    Success(T),
    Failed(WidgetError),
}

#[derive(Debug)]
pub struct Widget<Req, Res> {
    name: &'static str,
    state: WidgetState<Res>,
    request: Option<Req>,
}

impl<Req: Clone + std::fmt::Debug, Res> Widget<Req, Res> {
    pub fn new(name: &'static str) -> Self {
        Widget {
            name,
            state: WidgetState::Idle,
            request: None,
        }
    }

    pub fn state(&self) -> &WidgetState<Res> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, WidgetState::Loading)
    }

    /// Snapshot of the request most recently accepted by [`Widget::begin`].
    pub fn request(&self) -> Option<&Req> {
        self.request.as_ref()
    }

    pub fn result(&self) -> Option<&Res> {
        match &self.state {
            WidgetState::Success(res) => Some(res),
            _ => None,
        }
    }

    pub fn begin(&mut self, request: Req) -> Result<(), WidgetError> {
        if self.is_loading() {
            debug!(widget = self.name, "Ignoring submit while loading");
            return Err(WidgetError::Busy);
        }
        debug!(widget = self.name, request = ?request, "Loading");
        self.request = Some(request);
        self.state = WidgetState::Loading;
        Ok(())
    }

    pub fn complete(&mut self, outcome: Result<Res, WidgetError>) {
        if !self.is_loading() {
            debug!(widget = self.name, "Dropping outcome without a pending request");
            return;
        }
        self.state = match outcome {
            Ok(res) => WidgetState::Success(res),
            Err(e) => {
                error!(widget = self.name, error = %e, "Error fetching rate");
                WidgetState::Failed(e)
            }
        };
    }

    pub fn reset(&mut self) {
        self.state = WidgetState::Idle;
    }

    /// Runs one full cycle: snapshot `request`, await `call`, store the result.
    pub async fn submit<F, Fut>(&mut self, request: Req, call: F) -> Result<(), WidgetError>
    where
        F: FnOnce(Req) -> Fut,
        Fut: Future<Output = Result<Res, WidgetError>>,
    {
        self.begin(request.clone())?;
        let outcome = call(request).await;
        self.complete(outcome);
        Ok(())
    }
}
