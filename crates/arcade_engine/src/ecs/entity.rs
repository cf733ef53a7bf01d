//! Entity implementation

slotmap::new_key_type! {
    /// Generational entity handle
    ///
    /// Reusing a slot bumps its generation, so a stale handle never
    /// aliases a newer entity.
    pub struct Entity;
}

impl Entity {
    /// Get the slot index and generation packed into one value (for logging)
    pub fn id(&self) -> u64 {
        slotmap::Key::data(self).as_ffi()
    }
}
