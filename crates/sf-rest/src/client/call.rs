use sflite_client::{CallResult, RawRequest, RequestMethod, RetryPolicy, Transport};
use tracing::{debug, instrument, warn};

use crate::error::{Error, ErrorKind, Result};

/// Progress of one logical call.
#[derive(Debug)]
enum CallState {
    /// No token held; the password grant runs next.
    Unauthenticated,
    /// A token is held; the request is sent next.
    Authenticated,
    /// The request was answered 401; the token is dropped and re-acquired.
    Retrying,
    Done(CallResult),
    Failed(Error),
}

impl<T: Transport> super::SalesforceRestClient<T> {
    /// Perform one logical API call.
    ///
    /// Acquires a token if none is held, sends the request and returns the
    /// final response. A 401 answer drops the token, re-authenticates and
    /// replays the request, at most `max_reauth_attempts` times per call
    /// (once by default). Connect and authentication failures end the call
    /// immediately.
    ///
    /// Any response status other than 401 is returned as `Ok`; interpreting
    /// it is left to the caller.
    #[instrument(skip(self, content_type, body), fields(method = %method, path = %path))]
    pub async fn call(
        &mut self,
        method: RequestMethod,
        path: &str,
        content_type: &str,
        body: &str,
    ) -> Result<CallResult> {
        let mut policy = RetryPolicy::new(self.http.config().retry.clone());
        let mut state = if self.session.is_authenticated() {
            CallState::Authenticated
        } else {
            CallState::Unauthenticated
        };

        loop {
            state = match state {
                CallState::Unauthenticated => self.acquire_token().await,
                CallState::Authenticated => {
                    self.attempt(method, path, content_type, body, &mut policy)
                        .await
                }
                CallState::Retrying => {
                    self.session.invalidate();
                    self.acquire_token().await
                }
                CallState::Done(result) => return Ok(result),
                CallState::Failed(err) => return Err(err),
            };
        }
    }

    async fn acquire_token(&mut self) -> CallState {
        match self.session.ensure_token(&mut self.http).await {
            Ok(()) => CallState::Authenticated,
            Err(err) => {
                if let Some(status) = err.status() {
                    self.last_status = status;
                }
                CallState::Failed(err.into())
            }
        }
    }

    async fn attempt(
        &mut self,
        method: RequestMethod,
        path: &str,
        content_type: &str,
        body: &str,
        policy: &mut RetryPolicy,
    ) -> CallState {
        let Some(token) = self.session.current_token() else {
            return CallState::Unauthenticated;
        };
        let request = RawRequest::new(method, self.session.resolved_host(), path)
            .content_type(content_type)
            .body(body)
            .bearer_auth(token);

        let result = match self.http.send(&request).await {
            Ok(result) => result,
            Err(err) => return CallState::Failed(err.into()),
        };
        self.last_status = result.status;

        if result.status != 401 {
            debug!(status = result.status, "Call completed");
            return CallState::Done(result);
        }

        if policy.next_attempt() {
            warn!(attempt = policy.attempt(), "Session rejected with 401, re-authenticating");
            CallState::Retrying
        } else {
            warn!(attempts = policy.attempt(), "Session rejected with 401, no re-authentication left");
            CallState::Failed(Error::new(ErrorKind::UnauthorizedRetryExhausted {
                attempts: policy.attempt(),
                body: result.body,
            }))
        }
    }
}
