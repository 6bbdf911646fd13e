//! Lookup session tying search, weather fetches and the display unit together.
//!
//! Only one suggestion search and one weather fetch are ever in flight:
//! starting a new one aborts the previous task, and a result that arrives
//! for a superseded request is dropped instead of published.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::data::snapshot::{GeoLocation, WeatherSnapshot};
use crate::data::units::TemperatureUnit;
use crate::error::Result;
use crate::search::SuggestionList;

/// Default delay between the last keystroke and the suggestion search.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default number of suggestions requested per search.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

/// Message recorded when a suggestion search fails.
pub const SEARCH_FAILED_MESSAGE: &str =
    "Unable to load city suggestions. Check your connection and try again.";

/// Source of geocoding results and current conditions.
///
/// Implementations usually talk to the weather provider through a proxy
/// that holds the API key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource {
    /// Find up to `limit` locations matching a free-text query.
    async fn search_locations(&self, query: &str, limit: usize) -> Result<Vec<GeoLocation>>;

    /// Fetch current conditions for a location.
    async fn current_weather(&self, location: &GeoLocation) -> Result<WeatherSnapshot>;
}

/// Session settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Quiet period before a query is searched.
    pub debounce: Duration,
    /// Maximum number of suggestions per search.
    pub suggestion_limit: usize,
    /// Unit selected when the session starts.
    pub default_unit: TemperatureUnit,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            default_unit: TemperatureUnit::Celsius,
        }
    }
}

impl SessionConfig {
    /// Set the debounce interval.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the suggestion limit.
    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    /// Set the starting unit.
    pub fn with_default_unit(mut self, unit: TemperatureUnit) -> Self {
        self.default_unit = unit;
        self
    }
}

/// Weather state of the selected location.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WeatherState {
    /// No location selected.
    #[default]
    Idle,
    /// A fetch for the location is in flight.
    Loading {
        /// The selected location.
        location: GeoLocation,
    },
    /// Current conditions are available.
    Ready {
        /// The selected location.
        location: GeoLocation,
        /// Latest snapshot.
        snapshot: Arc<WeatherSnapshot>,
    },
    /// The last fetch failed; no snapshot is shown.
    Failed {
        /// The selected location.
        location: GeoLocation,
        /// Why the fetch failed.
        message: String,
    },
}

impl WeatherState {
    /// The snapshot, when ready.
    pub fn snapshot(&self) -> Option<&Arc<WeatherSnapshot>> {
        match self {
            Self::Ready { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    /// Check if a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// Change notification emitted by a session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Suggestions for the current query changed.
    SuggestionsChanged(SuggestionList),
    /// The weather state changed.
    WeatherChanged(WeatherState),
    /// The display unit changed.
    UnitChanged(TemperatureUnit),
}

/// Handle for unregistering an event callback.
///
/// Dropping the handle unregisters the callback as well.
pub struct CallbackHandle {
    id: u64,
    task: Option<JoinHandle<()>>,
}

impl CallbackHandle {
    /// Unregister this callback.
    pub fn unregister(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Get the callback ID.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for CallbackHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Mutable session state.
#[derive(Debug, Default)]
struct SessionState {
    query: String,
    suggestions: SuggestionList,
    search_error: Option<String>,
    searching: bool,
    weather: WeatherState,
    unit: TemperatureUnit,
}

/// A weather lookup session.
///
/// Must be used from within a tokio runtime; searches and fetches run on
/// spawned tasks.
pub struct WeatherSession<S: WeatherSource> {
    /// Geocoding and weather provider.
    source: Arc<S>,
    /// Settings.
    config: SessionConfig,
    /// Shared state.
    state: Arc<RwLock<SessionState>>,
    /// Event channel.
    events_tx: broadcast::Sender<SessionEvent>,
    /// Incremented for every new search; stale results are dropped.
    search_generation: Arc<AtomicU64>,
    /// Incremented for every new selection; stale results are dropped.
    fetch_generation: Arc<AtomicU64>,
    /// Callback ID counter.
    callback_counter: AtomicU64,
    /// Pending search task.
    search_task: Mutex<Option<JoinHandle<()>>>,
    /// In-flight fetch task.
    fetch_task: Mutex<Option<JoinHandle<()>>>,
}

impl<S> WeatherSession<S>
where
    S: WeatherSource + Send + Sync + 'static,
{
    /// Create a session over a weather source.
    pub fn new(source: Arc<S>, config: SessionConfig) -> Self {
        let (events_tx, _) = broadcast::channel(32);
        let state = SessionState {
            unit: config.default_unit,
            ..Default::default()
        };

        Self {
            source,
            config,
            state: Arc::new(RwLock::new(state)),
            events_tx,
            search_generation: Arc::new(AtomicU64::new(0)),
            fetch_generation: Arc::new(AtomicU64::new(0)),
            callback_counter: AtomicU64::new(0),
            search_task: Mutex::new(None),
            fetch_task: Mutex::new(None),
        }
    }

    /// Session settings.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current query text.
    pub fn query(&self) -> String {
        self.state.read().query.clone()
    }

    /// Suggestions for the current query.
    pub fn suggestions(&self) -> SuggestionList {
        self.state.read().suggestions.clone()
    }

    /// Message from the last failed search, if any.
    pub fn search_error(&self) -> Option<String> {
        self.state.read().search_error.clone()
    }

    /// Check if a suggestion search is pending or running.
    pub fn is_searching(&self) -> bool {
        self.state.read().searching
    }

    /// Weather state of the selected location.
    pub fn weather(&self) -> WeatherState {
        self.state.read().weather.clone()
    }

    /// Latest snapshot, if one is ready.
    pub fn snapshot(&self) -> Option<Arc<WeatherSnapshot>> {
        self.state.read().weather.snapshot().cloned()
    }

    /// Selected display unit.
    pub fn unit(&self) -> TemperatureUnit {
        self.state.read().unit
    }

    /// Select the display unit.
    pub fn set_unit(&self, unit: TemperatureUnit) {
        {
            let mut state = self.state.write();
            if state.unit == unit {
                return;
            }
            state.unit = unit;
        }
        debug!("Display unit changed to {}", unit);
        let _ = self.events_tx.send(SessionEvent::UnitChanged(unit));
    }

    /// Switch to the other display unit.
    pub fn toggle_unit(&self) -> TemperatureUnit {
        let unit = {
            let mut state = self.state.write();
            state.unit = state.unit.toggle();
            state.unit
        };
        debug!("Display unit changed to {}", unit);
        let _ = self.events_tx.send(SessionEvent::UnitChanged(unit));
        unit
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }

    /// Register a callback for session events.
    pub fn on_event<F>(&self, callback: F) -> CallbackHandle
    where
        F: Fn(SessionEvent) + Send + Sync + 'static,
    {
        let id = self.callback_counter.fetch_add(1, Ordering::SeqCst);
        let mut rx = self.events_tx.subscribe();

        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => callback(event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Event callback {} skipped {} events", id, skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        CallbackHandle {
            id,
            task: Some(task),
        }
    }

    /// Update the query text.
    ///
    /// A blank query clears the suggestions immediately. Otherwise the
    /// search runs once the debounce interval passes without another call.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.write().query = query.clone();
        self.start_search(query, self.config.debounce);
    }

    /// Search the current query again without waiting.
    pub fn retry_search(&self) {
        let query = self.query();
        if query.trim().is_empty() {
            return;
        }
        self.start_search(query, Duration::ZERO);
    }

    /// Move the suggestion highlight down.
    pub fn select_next_suggestion(&self) {
        self.update_suggestions(SuggestionList::select_next);
    }

    /// Move the suggestion highlight up.
    pub fn select_previous_suggestion(&self) {
        self.update_suggestions(SuggestionList::select_previous);
    }

    /// Hide the suggestions but keep the query.
    pub fn dismiss_suggestions(&self) {
        self.cancel_search();
        self.update_suggestions(SuggestionList::clear);
    }

    /// Select the highlighted suggestion and reset the search box.
    ///
    /// # Returns
    ///
    /// The selected location, or `None` if nothing was highlighted.
    pub fn select_active_suggestion(&self) -> Option<GeoLocation> {
        let location = self.state.read().suggestions.active().cloned()?;
        self.reset_search();
        self.select_location(Some(location.clone()));
        Some(location)
    }

    /// Clear the query, the suggestions and the selected location.
    pub fn clear(&self) {
        self.reset_search();
        self.select_location(None);
    }

    /// Select a location, or clear the selection with `None`.
    ///
    /// Any fetch still in flight for a previous selection is cancelled.
    pub fn select_location(&self, location: Option<GeoLocation>) {
        if let Some(task) = self.fetch_task.lock().take() {
            task.abort();
        }

        let weather = match &location {
            Some(location) => WeatherState::Loading {
                location: location.clone(),
            },
            None => WeatherState::Idle,
        };

        let generation = {
            let mut state = self.state.write();
            state.weather = weather.clone();
            self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        let _ = self.events_tx.send(SessionEvent::WeatherChanged(weather));

        let location = match location {
            Some(location) => location,
            None => {
                debug!("Location cleared");
                return;
            }
        };

        info!("Fetching weather for {}", location.display_name());

        let source = self.source.clone();
        let state = self.state.clone();
        let current = self.fetch_generation.clone();
        let events_tx = self.events_tx.clone();

        let task = tokio::spawn(async move {
            let result = source.current_weather(&location).await;

            let weather = {
                let mut state = state.write();
                if current.load(Ordering::SeqCst) != generation {
                    debug!("Dropping stale weather for {}", location.display_name());
                    return;
                }
                state.weather = match result {
                    Ok(snapshot) => WeatherState::Ready {
                        location,
                        snapshot: Arc::new(snapshot),
                    },
                    Err(e) => {
                        warn!("Weather fetch for {} failed: {}", location.display_name(), e);
                        WeatherState::Failed {
                            location,
                            message: e.to_string(),
                        }
                    }
                };
                state.weather.clone()
            };

            let _ = events_tx.send(SessionEvent::WeatherChanged(weather));
        });

        *self.fetch_task.lock() = Some(task);
    }

    /// Cancel pending work.
    pub fn shutdown(&self) {
        info!("Shutting down weather session");
        self.cancel_search();
        if let Some(task) = self.fetch_task.lock().take() {
            task.abort();
        }
        self.fetch_generation.fetch_add(1, Ordering::SeqCst);
    }

    fn cancel_search(&self) {
        if let Some(task) = self.search_task.lock().take() {
            task.abort();
        }
        let mut state = self.state.write();
        state.searching = false;
        self.search_generation.fetch_add(1, Ordering::SeqCst);
    }

    fn reset_search(&self) {
        self.cancel_search();
        {
            let mut state = self.state.write();
            state.query.clear();
            state.search_error = None;
        }
        self.update_suggestions(SuggestionList::clear);
    }

    fn update_suggestions(&self, update: impl FnOnce(&mut SuggestionList)) {
        let suggestions = {
            let mut state = self.state.write();
            update(&mut state.suggestions);
            state.suggestions.clone()
        };
        let _ = self
            .events_tx
            .send(SessionEvent::SuggestionsChanged(suggestions));
    }

    fn start_search(&self, query: String, delay: Duration) {
        if let Some(task) = self.search_task.lock().take() {
            task.abort();
        }

        let blank = query.trim().is_empty();
        let generation = {
            let mut state = self.state.write();
            state.searching = !blank;
            state.search_error = None;
            self.search_generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        if blank {
            self.update_suggestions(SuggestionList::clear);
            return;
        }

        let source = self.source.clone();
        let state = self.state.clone();
        let current = self.search_generation.clone();
        let events_tx = self.events_tx.clone();
        let limit = self.config.suggestion_limit;

        let task = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            debug!("Searching locations for {:?}", query);
            let result = source.search_locations(&query, limit).await;

            let suggestions = {
                let mut state = state.write();
                if current.load(Ordering::SeqCst) != generation {
                    return;
                }
                state.searching = false;
                match result {
                    Ok(hits) => {
                        debug!("{} suggestions for {:?}", hits.len(), query);
                        state.suggestions = SuggestionList::new(hits);
                    }
                    Err(e) => {
                        warn!("Location search for {:?} failed: {}", query, e);
                        state.suggestions.clear();
                        state.search_error = Some(SEARCH_FAILED_MESSAGE.to_string());
                    }
                }
                state.suggestions.clone()
            };

            let _ = events_tx.send(SessionEvent::SuggestionsChanged(suggestions));
        });

        *self.search_task.lock() = Some(task);
    }
}

impl<S: WeatherSource> Drop for WeatherSession<S> {
    fn drop(&mut self) {
        if let Some(task) = self.search_task.get_mut().take() {
            task.abort();
        }
        if let Some(task) = self.fetch_task.get_mut().take() {
            task.abort();
        }
    }
}
