use std::fmt::{Display, self};

use log::{debug, warn};

use crate::Database;

// One entry of the in-memory transaction log
pub enum TransactionEntry
{
    // Entity existed before the transaction: table id, entity id, serialized pre-image
    Existing(u64, usize, Vec<u8>),
    // Entity was inserted by the transaction: table id, entity id
    NotExisting(u64, usize)
}

impl Display for TransactionEntry
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionEntry::Existing(table_id, id, _) => { write!(f, "Existing ({}/{})", table_id, id) },
            TransactionEntry::NotExisting(table_id, id) => { write!(f, "Not Existing ({}/{})", table_id, id) }
        }
    }
}

pub struct TransactionManager
{
    transaction_id: usize,
    entries: Vec<TransactionEntry>,
    transaction_running: bool
}

impl Default for TransactionManager
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl TransactionManager
{
    pub fn new() -> Self
    {
        Self { transaction_id: 0, entries: Vec::new(), transaction_running: false }
    }

    pub fn is_transaction_running(&self) -> bool
    {
        self.transaction_running
    }

    pub fn begin_transaction(&mut self)
    {
        self.transaction_running = true;
        self.transaction_id += 1;

        debug!("Begin Transaction ({})", self.transaction_id);
    }

    pub fn commit_transaction(&mut self)
    {
        debug!("Commit Transaction ({})", self.transaction_id);

        self.transaction_running = false;
        self.entries.clear();
    }

    // Undo every logged change, newest first, so that an entity touched twice ends at its oldest image
    pub fn rollback_transaction<D>(&mut self, db: &mut D) where D: Database + ?Sized
    {
        debug!("Rollback Transaction ({}, {} entries)", self.transaction_id, self.entries.len());

        for transaction_entry in self.entries.iter().rev()
        {
            match transaction_entry
            {
                TransactionEntry::Existing(table_id, id, state) =>
                {
                    match db.get_table_mut(*table_id)
                    {
                        Some(table) => table.rollback_to_existing(*id, state),
                        None => warn!("Skipping rollback of {}: unknown table", transaction_entry)
                    }
                },
                TransactionEntry::NotExisting(table_id, id) =>
                {
                    match db.get_table_mut(*table_id)
                    {
                        Some(table) => table.rollback_to_not_existing(*id),
                        None => warn!("Skipping rollback of {}: unknown table", transaction_entry)
                    }
                }
            }
        }

        self.transaction_running = false;
        self.entries.clear();
    }

    pub fn add_entry(&mut self, entry: TransactionEntry)
    {
        self.entries.push(entry);
    }

    pub fn get_transaction_id(&self) -> usize
    {
        self.transaction_id
    }
}
