use {
    bevy::platform::collections::HashMap,
    std::{fmt::Debug, hash::Hash},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The factory ran and its panel is now registered.
    Created,
    /// A panel was already open for the key. The factory did not run.
    Focused,
}

/// Open panels keyed by the entity they describe. At most one panel per key.
#[derive(Debug)]
pub struct WindowRegistry<K, P> {
    open: HashMap<K, P>,
}

impl<K, P> Default for WindowRegistry<K, P> {
    fn default() -> Self {
        Self {
            open: HashMap::default(),
        }
    }
}

impl<K, P> WindowRegistry<K, P>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Runs `factory` only when no panel is registered for `key`. A failing factory
    /// leaves the registry untouched and hands its error back.
    pub fn open_or_focus<E>(
        &mut self,
        key: K,
        factory: impl FnOnce() -> Result<P, E>,
    ) -> Result<OpenOutcome, E> {
        if self.open.contains_key(&key) {
            return Ok(OpenOutcome::Focused);
        }

        let panel = factory()?;
        self.open.insert(key, panel);
        Ok(OpenOutcome::Created)
    }

    /// Removes the panel so the caller can release it. `None` when nothing was open.
    pub fn close(&mut self, key: &K) -> Option<P> {
        self.open.remove(key)
    }

    pub fn close_all(&mut self) -> Vec<(K, P)> {
        self.open.drain().collect()
    }

    pub fn get(&self, key: &K) -> Option<&P> {
        self.open.get(key)
    }

    pub fn is_open(&self, key: &K) -> bool {
        self.open.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}
