use std::sync::{Arc, Mutex, PoisonError};
use std::ops::{Deref, DerefMut};
use log::debug;
use serde::{Serialize, de::DeserializeOwned};
use crate::transaction::{TransactionManager, TransactionEntry};

// Entity is a smart pointer to a record stored in a table
pub struct Entity<T> where T : Serialize + DeserializeOwned
{
    // Unique identifier of the entity inside its table
    id: usize,
    // Unique identifier of the table the entity is stored in
    table_id: u64,
    // The record itself
    val: T,
    // Transaction manager keeping the in-memory transaction log
    transaction_manager: Arc<Mutex<TransactionManager>>,
    // Identifier of the last transaction the entity was modified in
    last_modified_transaction_id: usize
}

impl<T> Entity<T> where T : Serialize + DeserializeOwned
{
    pub fn new(id: usize, table_id: u64, val: T, transaction_manager: Arc<Mutex<TransactionManager>>) -> Self
    {
        Entity { id, table_id, val, transaction_manager, last_modified_transaction_id: 0 }
    }

    pub fn get_id(&self) -> usize
    {
        self.id
    }
}

impl<T> Deref for Entity<T> where T : Serialize + DeserializeOwned
{
    type Target = T;

    fn deref(&self) -> &Self::Target
    {
        &self.val
    }
}

impl<T> DerefMut for Entity<T> where T : Serialize + DeserializeOwned
{
    // Mutable access stores the pre-image of the record in the transaction log once per transaction
    fn deref_mut(&mut self) -> &mut Self::Target
    {
        let mut locked_transaction_manager = self.transaction_manager.lock().unwrap_or_else(PoisonError::into_inner);

        if locked_transaction_manager.is_transaction_running()
            && locked_transaction_manager.get_transaction_id() > self.last_modified_transaction_id
        {
            debug!("Add transaction entry for an existing entity (Table Id: {}, Entity Id: {})", self.table_id, self.id);

            // Records are plain derived structs, bincode cannot fail on them
            let state = bincode::serialize(&self.val).expect("entity state is serializable");
            locked_transaction_manager.add_entry(TransactionEntry::Existing(self.table_id, self.id, state));

            // No further entry is needed for this entity in the same transaction
            self.last_modified_transaction_id = locked_transaction_manager.get_transaction_id();
        }

        &mut self.val
    }
}
