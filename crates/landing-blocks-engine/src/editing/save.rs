use crate::editing::Document;
use crate::io::{PageStore, StoreError};
use crate::models::{PageId, PageRecord};

/// Snapshot of a document taken when a save starts
///
/// The payload is fixed at capture time; edits made while the store is busy
/// are not part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveTicket {
    record: PageRecord,
    version: u64,
}

impl SaveTicket {
    pub fn record(&self) -> &PageRecord {
        &self.record
    }

    /// Document version the payload was captured at
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl Document {
    /// Capture the current `{title, blocks}` for a save
    pub fn begin_save(&self) -> SaveTicket {
        SaveTicket {
            record: self.to_record(),
            version: self.version,
        }
    }

    /// Record the outcome of a save started with `begin_save`
    ///
    /// On success the document is clean exactly when the ticket's snapshot is
    /// still current; the most recently completed save decides. On failure
    /// nothing changes and the error is handed back.
    pub fn finish_save(
        &mut self,
        ticket: &SaveTicket,
        result: Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        match result {
            Ok(()) => {
                self.dirty = ticket.version != self.version;
                if self.dirty {
                    log::info!(
                        "page {}: saved version {}, but document is now at {}",
                        self.id,
                        ticket.version,
                        self.version
                    );
                } else {
                    log::info!("page {}: saved version {}", self.id, ticket.version);
                }
                Ok(())
            }
            Err(e) => {
                log::warn!("page {}: save failed: {e}", self.id);
                Err(e)
            }
        }
    }

    /// Send the page to `store`, clearing the dirty flag on success
    pub async fn save<S>(&mut self, store: &S) -> Result<(), StoreError>
    where
        S: PageStore + ?Sized,
    {
        let ticket = self.begin_save();
        let result = store.save_page(ticket.record()).await;
        self.finish_save(&ticket, result)
    }

    /// Open page `id` from `store` as a clean document
    pub async fn load<S>(store: &S, id: &PageId) -> Result<Self, StoreError>
    where
        S: PageStore + ?Sized,
    {
        let record = store.load_page(id).await?;
        log::debug!("page {id}: loaded {} blocks", record.blocks.len());
        Ok(Self::from_record(record))
    }
}
