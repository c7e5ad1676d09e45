//! Best-score persistence
//!
//! A single number in LocalStorage. The host records the final score from the
//! game-over event; the stored value only ever moves upward.

use serde::{Deserialize, Serialize};

/// Best score across runs on this browser/profile
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u64,
}

impl BestScore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "mail_dash_best_score";

    /// Record a finished run. Returns true and persists when `score` beats
    /// the stored best.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.score {
            self.score = score;
            self.save();
            log::info!("New best score: {}", score);
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = serde_json::from_str(&json) {
                    return best;
                }
            }
        }
        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_maximum() {
        let mut best = BestScore::default();
        assert!(best.record(100));
        assert!(!best.record(50));
        assert_eq!(best.score, 100);
        assert!(best.record(250));
        assert_eq!(best.score, 250);
    }

    #[test]
    fn test_equal_score_is_not_a_new_best() {
        let mut best = BestScore { score: 100 };
        assert!(!best.record(100));
    }
}
