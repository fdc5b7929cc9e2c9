//! Display surfaces: named mount points widgets render markup into.
//!
//! The embedding layout registers surfaces as it builds the page; widgets
//! look them up by well-known name. A widget may start before the layout
//! has registered its surfaces, so discovery is a poll-until-found future
//! rather than a failure path.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Well-known surface names
pub const TODAY: &str = "today";
pub const UPCOMING: &str = "upcoming";
pub const WASTE: &str = "waste";
pub const TOPBAR: &str = "topbar";

/// Visual state of a surface. States are mutually exclusive and
/// transitioned only by the widget that owns the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceState {
    Loading,
    Populated(String),
    Error(String),
}

/// Handle to one named mount point
#[derive(Debug, Clone)]
pub struct Surface {
    name: Arc<str>,
    state: Arc<RwLock<SurfaceState>>,
}

impl Surface {
    fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            state: Arc::new(RwLock::new(SurfaceState::Populated(String::new()))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn set_loading(&self) {
        *self.state.write().await = SurfaceState::Loading;
    }

    pub async fn set_content(&self, markup: String) {
        *self.state.write().await = SurfaceState::Populated(markup);
    }

    pub async fn set_error(&self, message: String) {
        *self.state.write().await = SurfaceState::Error(message);
    }

    /// Prepend a fragment to the current content, replacing any
    /// loading or error state.
    pub async fn prepend(&self, fragment: &str) {
        let mut state = self.state.write().await;
        let rest = match &*state {
            SurfaceState::Populated(existing) => existing.clone(),
            _ => String::new(),
        };
        *state = SurfaceState::Populated(format!("{}{}", fragment, rest));
    }

    pub async fn state(&self) -> SurfaceState {
        self.state.read().await.clone()
    }

    /// Current markup of the surface as the page would show it
    pub async fn html(&self) -> String {
        match &*self.state.read().await {
            SurfaceState::Loading => String::from(
                "<div class=\"calendar-loader\"><div class=\"loader-spinner\"></div></div>",
            ),
            SurfaceState::Populated(markup) => markup.clone(),
            SurfaceState::Error(message) => format!("<p>{}</p>", message),
        }
    }
}

/// Shared map of surface name to handle
#[derive(Debug, Clone, Default)]
pub struct SurfaceRegistry {
    inner: Arc<RwLock<HashMap<String, Surface>>>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface under a well-known name, returning its handle.
    /// Registering an existing name returns the existing handle.
    pub async fn register(&self, name: &str) -> Surface {
        let mut inner = self.inner.write().await;
        inner
            .entry(name.to_string())
            .or_insert_with(|| Surface::new(name))
            .clone()
    }

    pub async fn get(&self, name: &str) -> Option<Surface> {
        self.inner.read().await.get(name).cloned()
    }
}

/// Wait until every required surface exists, polling at a fixed interval.
/// Unbounded: missing surfaces are a startup race against page build, not
/// a failure condition.
pub async fn resolve(registry: &SurfaceRegistry, names: &[&str], retry: Duration) -> Vec<Surface> {
    loop {
        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            match registry.get(name).await {
                Some(surface) => resolved.push(surface),
                None => break,
            }
        }
        if resolved.len() == names.len() {
            return resolved;
        }
        debug!("Surfaces not ready yet, retrying in {:?}", retry);
        tokio::time::sleep(retry).await;
    }
}
