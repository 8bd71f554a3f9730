use crate::draw::model::{validate_strokes, Stroke, StrokeStore};
use crate::draw::session::StoreObserver;
use crate::draw::storage::SlotStorage;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const SCRIBBLES_SLOT: &str = "scribbles";
const CORRUPT_SUFFIX: &str = "-corrupt";

/// What to do when the persisted slot cannot be decoded at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CorruptSlotPolicy {
    /// Keep a copy of the payload, log a warning and start with an empty canvas.
    #[default]
    Reset,
    /// Abort startup with the decode error.
    Fail,
}

pub fn encode_strokes(strokes: &[Stroke]) -> Result<String> {
    serde_json::to_string(strokes).context("serialize strokes")
}

/// Decodes a slot payload. A JSON `null` counts as an empty drawing.
pub fn decode_strokes(payload: &str) -> Result<Vec<Stroke>> {
    let strokes: Option<Vec<Stroke>> =
        serde_json::from_str(payload).context("deserialize strokes payload")?;
    let strokes = strokes.unwrap_or_default();
    validate_strokes(&strokes).context("validate strokes payload")?;
    Ok(strokes)
}

/// Writes the stroke sequence to a single storage slot after every change.
pub struct PersistenceBridge<S> {
    storage: S,
    key: String,
}

impl<S: SlotStorage> PersistenceBridge<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, SCRIBBLES_SLOT)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Slot that receives a payload which could not be decoded.
    pub fn corrupt_key(&self) -> String {
        format!("{}{CORRUPT_SUFFIX}", self.key)
    }

    /// Reads the slot into a store. An absent slot yields an empty store.
    pub fn load(&mut self, policy: CorruptSlotPolicy) -> Result<StrokeStore> {
        let Some(payload) = self
            .storage
            .read(&self.key)
            .with_context(|| format!("read storage slot {:?}", self.key))?
        else {
            tracing::info!(slot = %self.key, "no saved drawing, starting empty");
            return Ok(StrokeStore::new());
        };

        match decode_strokes(&payload).and_then(StrokeStore::from_strokes) {
            Ok(store) => {
                tracing::info!(slot = %self.key, strokes = store.len(), "restored drawing");
                Ok(store)
            }
            Err(e) => match policy {
                CorruptSlotPolicy::Reset => {
                    let backup = self.corrupt_key();
                    self.storage
                        .write(&backup, &payload)
                        .with_context(|| format!("back up unreadable slot to {backup:?}"))?;
                    tracing::warn!(
                        slot = %self.key,
                        backup = %backup,
                        "unreadable drawing moved aside, starting empty: {e:#}"
                    );
                    Ok(StrokeStore::new())
                }
                CorruptSlotPolicy::Fail => {
                    Err(e).with_context(|| format!("load drawing from slot {:?}", self.key))
                }
            },
        }
    }

    pub fn save(&mut self, strokes: &[Stroke]) -> Result<()> {
        let payload = encode_strokes(strokes)?;
        self.storage
            .write(&self.key, &payload)
            .with_context(|| format!("write storage slot {:?}", self.key))
    }
}

impl<S: SlotStorage> StoreObserver for PersistenceBridge<S> {
    fn store_changed(&mut self, strokes: &[Stroke]) {
        if let Err(e) = self.save(strokes) {
            tracing::warn!("failed to persist drawing: {e:#}");
        }
    }
}
