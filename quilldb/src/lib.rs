pub mod entity;
pub mod table;
pub mod command;
pub mod transaction;

// Lets derived code refer to `quilldb::...` from inside this crate's own tests
extern crate self as quilldb;

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard};
use log::debug;
use command::CommandBase;
use transaction::TransactionManager;
use table::TableBase;

pub trait DatabaseFactory
{
    fn create_database(transaction_manager_ref: Arc<Mutex<TransactionManager>>) -> Self;
}

pub trait Database
{
    // Table with the given identifier, used when rolling back transactions
    fn get_table_mut(&mut self, table_id: u64) -> Option<&mut dyn TableBase>;
}

// Read side of the database. Any number of queries may hold the read lock at the same time
pub struct QueryEngine<D> where D: Database
{
    db_lock_arc: Arc<RwLock<D>>
}

impl<D> QueryEngine<D> where D: Database
{
    pub fn get_db(&self) -> RwLockReadGuard<'_, D>
    {
        // Every write runs in a transaction, so the data behind a poisoned lock is still consistent
        self.db_lock_arc.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum TransactionStatus { Completed, Failed, NotExecuted }

// Write side of the database. Commands run one after the other, each in its own transaction
pub struct CommandEngine<D, C> where D: Database
{
    db_lock_arc: Arc<RwLock<D>>,
    command_definitions: Arc<C>,
    last_processed_transaction_id: usize,
    transaction_manager_ref: Arc<Mutex<TransactionManager>>,
    failed_transaction_ids: BTreeSet<usize>
}

impl<D, C> CommandEngine<D, C> where D: Database
{
    pub fn new(db_lock_arc: Arc<RwLock<D>>, command_definitions: C, transaction_manager_ref: Arc<Mutex<TransactionManager>>) -> Self
    {
        Self {
            db_lock_arc,
            command_definitions: Arc::new(command_definitions),
            last_processed_transaction_id: 0,
            transaction_manager_ref,
            failed_transaction_ids: BTreeSet::new()
        }
    }

    // Run a command in a new transaction. An error rolls back every change the command made
    pub fn push_command<Cmd>(&mut self, cmd: &Cmd) -> Result<Cmd::Output, Cmd::Error> where Cmd: CommandBase<D>
    {
        let mut db = self.db_lock_arc.write().unwrap_or_else(PoisonError::into_inner);

        self.lock_transaction_manager().begin_transaction();
        self.last_processed_transaction_id += 1;
        debug!("Run command {} (Transaction {})", cmd.get_name(), self.last_processed_transaction_id);

        let transaction_result = cmd.run(&mut db);
        match &transaction_result
        {
            Ok(_) => {
                self.lock_transaction_manager().commit_transaction();
            }
            Err(error) => {
                // Failures such as a missing record are ordinary results for the caller
                debug!("Command {} failed, rolling back: {}", cmd.get_name(), error);
                self.lock_transaction_manager().rollback_transaction(&mut *db);
                self.failed_transaction_ids.insert(self.last_processed_transaction_id);
            }
        }

        transaction_result
    }

    pub fn get_command_definitions(&self) -> Arc<C>
    {
        Arc::clone(&self.command_definitions)
    }

    pub fn get_last_transaction_id(&self) -> usize
    {
        self.last_processed_transaction_id
    }

    pub fn get_transaction_status(&self, transaction_id: usize) -> TransactionStatus
    {
        if transaction_id == 0 || transaction_id > self.last_processed_transaction_id
            { TransactionStatus::NotExecuted }
        else if self.failed_transaction_ids.contains(&transaction_id)
            { TransactionStatus::Failed }
        else
            { TransactionStatus::Completed }
    }

    fn lock_transaction_manager(&self) -> std::sync::MutexGuard<'_, TransactionManager>
    {
        self.transaction_manager_ref.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct Engine
{
}

impl Engine
{
    // Create a database, fill it with `init` (outside of any transaction) and return its query and command engines
    pub fn new<D, C, F>(command_definitions: C, init: F) -> (QueryEngine<D>, CommandEngine<D, C>)
        where D: Database + DatabaseFactory, F: FnOnce(&mut D)
    {
        let transaction_manager_ref = Arc::new(Mutex::new(TransactionManager::new()));
        let mut db = D::create_database(Arc::clone(&transaction_manager_ref));
        init(&mut db);
        let db_lock_arc = Arc::new(RwLock::new(db));
        let query_engine = QueryEngine { db_lock_arc: Arc::clone(&db_lock_arc) };
        let command_engine = CommandEngine::new(db_lock_arc, command_definitions, transaction_manager_ref);
        (query_engine, command_engine)
    }
}

pub mod prelude
{
    pub use crate::{Database, DatabaseFactory, Engine, QueryEngine, CommandEngine, TransactionStatus};
    pub use crate::command::{CommandBase, CommandDefinition, CommandDirectoryFactory};
    pub use crate::table::Table;
    pub use crate::entity::Entity;
}

#[cfg(test)]
mod tests
{
    use crate::prelude::*;
    use quilldb_derive::{Database, DatabaseFactory, CommandDirectoryFactory};
    use serde::{Serialize, Deserialize};

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
    struct Account
    {
        owner: String,
        balance: i64
    }

    #[derive(Database, DatabaseFactory)]
    struct Bank
    {
        accounts: Table<Account>
    }

    struct Transfer
    {
        from: usize,
        to: usize,
        amount: i64
    }

    #[derive(CommandDirectoryFactory)]
    struct BankCommands
    {
        open_account: CommandDefinition<Bank, Account, usize, String>,
        transfer: CommandDefinition<Bank, Transfer, (), String>
    }

    impl BankCommands
    {
        fn open_account(db: &mut Bank, account: &Account) -> Result<usize, String>
        {
            Ok(db.accounts.add(account.clone()))
        }

        // Debits first, so a missing target forces a rollback of the debit
        fn transfer(db: &mut Bank, transfer: &Transfer) -> Result<(), String>
        {
            let from = db.accounts.get_mut(transfer.from).ok_or("Unknown source account")?;
            from.balance -= transfer.amount;
            let to = db.accounts.get_mut(transfer.to).ok_or("Unknown target account")?;
            to.balance += transfer.amount;
            Ok(())
        }
    }

    fn create_engine() -> (QueryEngine<Bank>, CommandEngine<Bank, BankCommands>)
    {
        Engine::new(BankCommands::new(), |db: &mut Bank|
        {
            db.accounts.add(Account { owner: String::from("alice"), balance: 100 });
        })
    }

    #[test]
    fn committed_commands_are_visible_to_queries()
    {
        let (query_engine, mut command_engine) = create_engine();
        let commands = command_engine.get_command_definitions();

        let id = command_engine.push_command(&commands.open_account.create(Account { owner: String::from("bob"), balance: 5 })).unwrap();

        assert_eq!(2, id);
        assert_eq!(TransactionStatus::Completed, command_engine.get_transaction_status(command_engine.get_last_transaction_id()));
        assert_eq!("bob", query_engine.get_db().accounts.get(id).unwrap().owner);
    }

    #[test]
    fn failed_command_rolls_back_modifications()
    {
        let (query_engine, mut command_engine) = create_engine();
        let commands = command_engine.get_command_definitions();

        let result = command_engine.push_command(&commands.transfer.create(Transfer { from: 1, to: 99, amount: 40 }));

        assert_eq!(Err(String::from("Unknown target account")), result);
        assert_eq!(TransactionStatus::Failed, command_engine.get_transaction_status(1));
        assert_eq!(100, query_engine.get_db().accounts.get(1).unwrap().balance);
    }

    #[test]
    fn rollback_removes_inserted_entities_without_reusing_ids()
    {
        #[derive(CommandDirectoryFactory)]
        struct FlakyCommands
        {
            open_then_fail: CommandDefinition<Bank, Account, usize, String>
        }

        impl FlakyCommands
        {
            fn open_then_fail(db: &mut Bank, account: &Account) -> Result<usize, String>
            {
                db.accounts.add(account.clone());
                Err(String::from("rejected"))
            }
        }

        let (query_engine, mut command_engine) = Engine::new(FlakyCommands::new(), |_: &mut Bank| {});
        let commands = command_engine.get_command_definitions();
        let account = Account { owner: String::from("eve"), balance: 0 };

        assert!(command_engine.push_command(&commands.open_then_fail.create(account.clone())).is_err());
        assert!(query_engine.get_db().accounts.is_empty());

        // The identifier consumed by the rolled back insert stays consumed
        let mut db = query_engine.db_lock_arc.write().unwrap();
        assert_eq!(2, db.accounts.add(account));
    }

    #[test]
    fn rollback_restores_removed_entities()
    {
        #[derive(CommandDirectoryFactory)]
        struct CloseCommands
        {
            close_and_fail: CommandDefinition<Bank, usize, (), String>
        }

        impl CloseCommands
        {
            fn close_and_fail(db: &mut Bank, id: &usize) -> Result<(), String>
            {
                db.accounts.get_mut(*id).ok_or("Unknown account")?.balance = 0;
                db.accounts.remove(*id);
                Err(String::from("rejected"))
            }
        }

        let (query_engine, mut command_engine) = Engine::new(CloseCommands::new(), |db: &mut Bank|
        {
            db.accounts.add(Account { owner: String::from("carol"), balance: 7 });
        });
        let commands = command_engine.get_command_definitions();

        assert!(command_engine.push_command(&commands.close_and_fail.create(1)).is_err());

        let db = query_engine.get_db();
        assert_eq!(Some(&Account { owner: String::from("carol"), balance: 7 }), db.accounts.get(1).map(|a| &**a));
    }

    #[test]
    fn unknown_transactions_are_not_executed()
    {
        let (_, command_engine) = create_engine();
        assert_eq!(TransactionStatus::NotExecuted, command_engine.get_transaction_status(0));
        assert_eq!(TransactionStatus::NotExecuted, command_engine.get_transaction_status(3));
    }
}
