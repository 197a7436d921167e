use std::collections::VecDeque;

use crate::error::TransportError;

/// Carries CGI requests to the camera and returns the raw answer body.
///
/// The HTTP client is supplied by the application. Implementations must not retry.
pub trait CgiTransport {
    /// Issue a GET request.
    fn get(&mut self, url: &str) -> Result<String, TransportError>;
}

impl<T: CgiTransport + ?Sized> CgiTransport for &mut T {
    fn get(&mut self, url: &str) -> Result<String, TransportError> {
        (**self).get(url)
    }
}

const DEFAULT_HISTORY: usize = 256;

/// A transport that logs every request and acknowledges it without a camera.
///
/// Only the most recent requests are kept, 256 unless set with
/// [`DryRunTransport::with_history`].
#[derive(Debug, Clone)]
pub struct DryRunTransport {
    requests: VecDeque<String>,
    history: usize,
}

impl Default for DryRunTransport {
    fn default() -> Self {
        Self::with_history(DEFAULT_HISTORY)
    }
}

impl DryRunTransport {
    /// Create a new dry run transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dry run transport that remembers the last `history` requests.
    pub fn with_history(history: usize) -> Self {
        Self {
            requests: VecDeque::with_capacity(history),
            history,
        }
    }

    /// The remembered requests, oldest first.
    pub fn requests(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.requests.iter().map(String::as_str)
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<&str> {
        self.requests.back().map(String::as_str)
    }
}

impl CgiTransport for DryRunTransport {
    fn get(&mut self, url: &str) -> Result<String, TransportError> {
        log::info!("dry run GET {url}");
        if self.history > 0 {
            if self.requests.len() == self.history {
                self.requests.pop_front();
            }
            self.requests.push_back(url.to_string());
        }
        Ok("OK\r\n".to_string())
    }
}
