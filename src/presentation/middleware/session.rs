//! Cookie Session Middleware
//!
//! Signed-cookie sessions keyed by the resolved secret key. The session
//! payload is a JSON object carried in a `session` cookie as
//! `base64(payload).base64(hmac-sha256(secret, payload))`; a missing,
//! malformed, or tampered cookie yields a fresh empty session.
//!
//! Handlers receive the [`Session`] through request extensions and the
//! middleware writes the cookie back only when a handler modified it.

use std::sync::Arc;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, Response},
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use sha2::Sha256;
use tower::{Layer, Service};

type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying the session payload
pub const SESSION_COOKIE: &str = "session";

/// Mutable per-request session state.
///
/// Cloning shares the same underlying state; the middleware keeps one clone
/// to serialize the cookie after the handler ran.
#[derive(Clone, Debug, Default)]
pub struct Session {
    inner: Arc<Mutex<SessionInner>>,
}

#[derive(Debug, Default)]
struct SessionInner {
    data: Map<String, Value>,
    modified: bool,
}

impl Session {
    fn from_data(data: Map<String, Value>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                data,
                modified: false,
            })),
        }
    }

    /// Read a value from the session.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.lock().data.get(key).cloned()
    }

    /// Write a value into the session; the cookie is re-issued in the
    /// response.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        let mut inner = self.inner.lock();
        inner.data.insert(key.into(), value);
        inner.modified = true;
    }

    /// Drop every value from the session.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.data.clear();
        inner.modified = true;
    }

    fn is_modified(&self) -> bool {
        self.inner.lock().modified
    }

    fn snapshot(&self) -> Map<String, Value> {
        self.inner.lock().data.clone()
    }
}

/// Layer that loads and stores the signed session cookie
#[derive(Clone)]
pub struct SessionLayer {
    secret: Arc<Vec<u8>>,
}

impl SessionLayer {
    /// Create a session layer keyed by the application secret.
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Arc::new(secret.as_bytes().to_vec()),
        }
    }
}

impl<S> Layer<S> for SessionLayer {
    type Service = SessionMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionMiddleware {
            inner,
            secret: self.secret.clone(),
        }
    }
}

/// Middleware service handling session load/store
#[derive(Clone)]
pub struct SessionMiddleware<S> {
    inner: S,
    secret: Arc<Vec<u8>>,
}

impl<S> Service<Request<Body>> for SessionMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let secret = self.secret.clone();

        let session = load_session(&request, &secret);
        request.extensions_mut().insert(session.clone());

        Box::pin(async move {
            let mut response = inner.call(request).await?;

            if session.is_modified() {
                let token = encode_session(&secret, &session.snapshot());
                let cookie =
                    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
                if let Ok(value) = HeaderValue::from_str(&cookie) {
                    response.headers_mut().append(header::SET_COOKIE, value);
                }
            }

            Ok(response)
        })
    }
}

/// Extract and verify the session cookie, falling back to an empty session.
fn load_session(request: &Request<Body>, secret: &[u8]) -> Session {
    let prefix = format!("{SESSION_COOKIE}=");
    let data = request
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix(prefix.as_str()))
        .find_map(|token| decode_session(secret, token))
        .unwrap_or_default();

    Session::from_data(data)
}

fn sign(secret: &[u8], payload: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(payload.as_bytes());
    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}

fn encode_session(secret: &[u8], data: &Map<String, Value>) -> String {
    let json = serde_json::to_vec(data).unwrap_or_default();
    let payload = URL_SAFE_NO_PAD.encode(json);
    let signature = sign(secret, &payload);
    format!("{payload}.{signature}")
}

fn decode_session(secret: &[u8], token: &str) -> Option<Map<String, Value>> {
    let (payload, signature) = token.rsplit_once('.')?;

    let expected = URL_SAFE_NO_PAD.decode(signature).ok()?;
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(payload.as_bytes());
    mac.verify_slice(&expected).ok()?;

    let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&json).ok()
}
