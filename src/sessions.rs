use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Instant;

use crate::presenter::Session;

pub const COOKIE_NAME: &str = "aqi_session";

struct Entry {
    session: Session,
    last_seen: Instant,
}

/// Sessions keyed by cookie id. Each visitor only ever touches its own entry.
pub struct SessionStore {
    inner: Mutex<HashMap<String, Entry>>,
    capacity: usize,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn new_id() -> String {
        format!("{:016x}", rand::random::<u64>())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Runs `f` against the session for `id`, creating it if needed.
    pub fn with_session<R>(&self, id: &str, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut map = self.inner.lock();
        if !map.contains_key(id) && map.len() >= self.capacity {
            let oldest = map
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(k, _)| k.clone());
            if let Some(k) = oldest {
                tracing::debug!("evicting session {k}");
                map.remove(&k);
            }
        }
        let entry = map.entry(id.to_string()).or_insert_with(|| Entry {
            session: Session::new(),
            last_seen: Instant::now(),
        });
        entry.last_seen = Instant::now();
        f(&mut entry.session)
    }
}

/// Pulls our session id out of a `Cookie` header value.
pub fn session_id_from_cookie(header: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == COOKIE_NAME)
        .map(|(_, v)| v.to_string())
        .filter(|v| !v.is_empty() && v.len() <= 64 && v.chars().all(|c| c.is_ascii_hexdigit()))
}

pub fn set_cookie_value(id: &str) -> String {
    format!("{COOKIE_NAME}={id}; Path=/; HttpOnly; SameSite=Lax")
}
