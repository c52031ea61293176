/// Cursor over the backend's cumulative answer text.
///
/// The backend re-sends the whole answer on every update; the tracker hands out only
/// the part that has not been emitted yet. Lengths are counted in characters so a
/// delta never splits a code point.
#[derive(Debug, Default)]
pub struct DeltaTracker {
    emitted_len: usize,
    // Byte length of the emitted prefix within `last_text`, valid while `last_text` still holds it
    emitted_bytes: usize,
    last_text: String,
}

impl DeltaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from text that was already delivered elsewhere
    #[allow(dead_code)]
    pub fn with_baseline(text: impl Into<String>) -> Self {
        let last_text = text.into();
        Self {
            emitted_len: last_text.chars().count(),
            emitted_bytes: last_text.len(),
            last_text,
        }
    }

    /// Byte offset in `cumulative` where the not-yet-emitted text starts, if any remains
    fn unemitted_start(&self, cumulative: &str) -> Option<usize> {
        let prefix = self.last_text.as_bytes().get(..self.emitted_bytes);
        if prefix.is_some() && cumulative.as_bytes().get(..self.emitted_bytes) == prefix {
            // Same emitted prefix: only the new suffix needs decoding
            return (cumulative.len() > self.emitted_bytes).then_some(self.emitted_bytes);
        }
        cumulative.char_indices().nth(self.emitted_len).map(|(idx, _)| idx)
    }

    /// Return the newly appended suffix and whether the cursor advanced.
    /// Unchanged or shorter (revised) text yields `("", false)` but is still recorded.
    pub fn compute_delta(&mut self, cumulative: &str) -> (String, bool) {
        let result = match self.unemitted_start(cumulative) {
            Some(start) => {
                let delta = &cumulative[start..];
                self.emitted_len += delta.chars().count();
                self.emitted_bytes = cumulative.len();
                (delta.to_string(), true)
            }
            None => {
                if cumulative.len() < self.emitted_bytes {
                    log::debug!(
                        "↩️  Backend revised answer ({} < {} chars), no delta",
                        cumulative.chars().count(),
                        self.emitted_len
                    );
                }
                (String::new(), false)
            }
        };
        self.last_text.clear();
        self.last_text.push_str(cumulative);
        result
    }

    pub fn emitted_len(&self) -> usize {
        self.emitted_len
    }

    pub fn last_text(&self) -> &str {
        &self.last_text
    }
}
