use serde::{Serialize, de::DeserializeOwned};
use std::collections::{BTreeMap, btree_map::Values};
use std::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;
use std::sync::{Arc, Mutex, PoisonError};
use log::debug;
use crate::entity::Entity;
use crate::transaction::{TransactionManager, TransactionEntry};

// Rollback related functions of tables (used by the transaction manager)
pub trait TableBase
{
    // Revert an entity to the state it had before the transaction
    fn rollback_to_existing(&mut self, id: usize, state: &[u8]);

    // Remove an entity what did not exist before the transaction
    fn rollback_to_not_existing(&mut self, id: usize);
}

// A table storing one type of records, keyed by identifiers assigned on insert
pub struct Table<T> where T : Serialize + DeserializeOwned
{
    // Unique identifier of table
    id: u64,
    // Name of the table, used in log messages
    name: &'static str,
    // Entities by identifier. Identifiers grow monotonically, so key order is insertion order
    rows: BTreeMap<usize, Entity<T>>,
    // Next identifier to assign. Never decreases, not even on rollback
    first_free_id: usize,
    transaction_manager: Arc<Mutex<TransactionManager>>
}

impl<T> Table<T> where T : Serialize + DeserializeOwned
{
    pub fn new(name: &'static str, transaction_manager: Arc<Mutex<TransactionManager>>) -> Self
    {
        // Unique identifier of table is a hash generated from its name
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        let id = hasher.finish();

        Self { id, name, rows: BTreeMap::new(), first_free_id: 1, transaction_manager }
    }

    pub fn get_id(&self) -> u64
    {
        self.id
    }

    pub fn get_name(&self) -> &'static str
    {
        self.name
    }

    pub fn get(&self, id: usize) -> Option<&Entity<T>>
    {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut Entity<T>>
    {
        self.rows.get_mut(&id)
    }

    pub fn contains(&self, id: usize) -> bool
    {
        self.rows.contains_key(&id)
    }

    // Add a record to the table as a new entity and return its identifier
    pub fn add(&mut self, item: T) -> usize
    {
        let id = self.first_free_id;
        self.first_free_id += 1;

        let entity = Entity::new(id, self.id, item, Arc::clone(&self.transaction_manager));
        self.rows.insert(id, entity);

        let mut locked_transaction_manager = self.transaction_manager.lock().unwrap_or_else(PoisonError::into_inner);
        if locked_transaction_manager.is_transaction_running()
        {
            locked_transaction_manager.add_entry(TransactionEntry::NotExisting(self.id, id));
        }

        id
    }

    // Remove an entity from the table, returns false if it did not exist
    pub fn remove(&mut self, id: usize) -> bool
    {
        let Some(entity) = self.rows.remove(&id) else { return false; };

        let mut locked_transaction_manager = self.transaction_manager.lock().unwrap_or_else(PoisonError::into_inner);
        if locked_transaction_manager.is_transaction_running()
        {
            debug!("Add transaction entry for a removed entity (Table: {}, Entity Id: {})", self.get_name(), id);
            let state = bincode::serialize(&*entity).expect("entity state is serializable");
            locked_transaction_manager.add_entry(TransactionEntry::Existing(self.id, id, state));
        }

        true
    }

    pub fn len(&self) -> usize
    {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.rows.is_empty()
    }

    // Entities in identifier order
    pub fn iter(&self) -> Values<'_, usize, Entity<T>>
    {
        self.rows.values()
    }
}

impl<T> TableBase for Table<T> where T: Serialize + DeserializeOwned
{
    fn rollback_to_existing(&mut self, id: usize, state: &[u8])
    {
        // State was produced by bincode from the same type
        let item = bincode::deserialize::<T>(state).expect("transaction entry holds a valid entity state");
        let entity = Entity::<T>::new(id, self.id, item, Arc::clone(&self.transaction_manager));
        self.rows.insert(id, entity);
    }

    fn rollback_to_not_existing(&mut self, id: usize)
    {
        self.rows.remove(&id);
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
    struct Note
    {
        text: String
    }

    fn create_table() -> Table<Note>
    {
        Table::new("notes", Arc::new(Mutex::new(TransactionManager::new())))
    }

    #[test]
    fn identifiers_are_never_reused()
    {
        let mut table = create_table();
        let first = table.add(Note { text: String::from("a") });
        let second = table.add(Note { text: String::from("b") });
        assert!(table.remove(second));
        let third = table.add(Note { text: String::from("c") });

        assert_eq!(1, first);
        assert_eq!(2, second);
        assert_eq!(3, third);
        assert!(!table.contains(second));
    }

    #[test]
    fn iteration_follows_insertion_order()
    {
        let mut table = create_table();
        for text in ["x", "y", "z"]
        {
            table.add(Note { text: String::from(text) });
        }
        table.remove(2);

        let texts: Vec<&str> = table.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(vec!["x", "z"], texts);
        assert_eq!(2, table.len());
    }

    #[test]
    fn removing_a_missing_entity_reports_false()
    {
        let mut table = create_table();
        assert!(!table.remove(42));
        assert!(table.is_empty());
    }
}
