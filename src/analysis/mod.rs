//! Free-text analysis through an external AI service, cached by exact input.
//!
//! This sits outside the text engine: nothing in `core` depends on it.

pub mod cache;
pub mod gemini;

use crate::config::Settings;
use crate::error::Error;
use cache::{AnalysisCache, JsonFileCache};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use gemini::{Analyzer, GeminiAnalyzer};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Pass-through to an [`Analyzer`] with a response cache in front of it.
///
/// Cloning is cheap and clones share the analyzer and the cache.
#[derive(Clone)]
pub struct AnalysisService {
    analyzer: Option<Arc<dyn Analyzer>>,
    cache: Arc<Mutex<Box<dyn AnalysisCache>>>,
}

impl AnalysisService {
    pub fn new(analyzer: Option<Arc<dyn Analyzer>>, cache: Box<dyn AnalysisCache>) -> Self {
        Self {
            analyzer,
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Wires up Gemini and the JSON file cache from settings. Without an API
    /// key the service still answers cached requests.
    pub fn from_settings(settings: &Settings) -> Result<Self, Error> {
        let cache = JsonFileCache::open(&settings.analysis.cache_path)?;
        let analyzer: Option<Arc<dyn Analyzer>> = match settings.api_key() {
            Some(key) => {
                info!("Gemini model initialized with '{}'.", settings.analysis.model);
                Some(Arc::new(GeminiAnalyzer::new(key, &settings.analysis)?))
            }
            None => {
                warn!(
                    "{} environment variable not found. AI features will be disabled.",
                    settings.analysis.api_key_env
                );
                None
            }
        };
        Ok(Self::new(analyzer, Box::new(cache)))
    }

    pub fn is_ready(&self) -> bool {
        self.analyzer.is_some()
    }

    /// Explains `text`. Cached answers are returned without calling the
    /// analyzer; fresh answers are cached and flushed before returning.
    pub fn analyze(&self, text: &str) -> Result<String, Error> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        if let Some(hit) = self.cache.lock().get(text) {
            debug!("Cache hit for analysis of {:?}", text);
            return Ok(hit);
        }

        let analyzer = self.analyzer.as_ref().ok_or_else(|| {
            Error::AnalysisUnavailable("set the GEMINI_API_KEY environment variable".into())
        })?;

        info!("Cache miss. Fetching analysis for {:?}", text);
        // The lock is not held across the network call.
        let response = analyzer.analyze(text)?.trim().to_string();
        if response.is_empty() {
            return Err(Error::EmptyResponse);
        }

        let mut cache = self.cache.lock();
        cache.insert(text.to_string(), response.clone());
        if let Err(e) = cache.flush() {
            warn!("Could not save analysis cache: {}", e);
        }
        Ok(response)
    }

    /// Runs [`analyze`](Self::analyze) on a worker thread. The receiver
    /// yields exactly one result.
    pub fn analyze_in_background(&self, text: &str) -> Receiver<Result<String, Error>> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let service = self.clone();
        let text = text.to_string();
        thread::spawn(move || {
            // The caller may have stopped waiting; nothing to do then.
            let _ = tx.send(service.analyze(&text));
        });
        rx
    }

    /// Runs [`AnalysisService::analyze_in_background`] and waits for it,
    /// calling `on_wait` every `tick` while the worker is still busy.
    pub fn analyze_with_progress<F>(
        &self,
        text: &str,
        tick: Duration,
        mut on_wait: F,
    ) -> Result<String, Error>
    where
        F: FnMut(),
    {
        let rx = self.analyze_in_background(text);
        loop {
            match rx.recv_timeout(tick) {
                Ok(result) => return result,
                Err(RecvTimeoutError::Timeout) => on_wait(),
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(Error::AnalysisUnavailable("analysis worker stopped".into()))
                }
            }
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.lock().len()
    }
}
