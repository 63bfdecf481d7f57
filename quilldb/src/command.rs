use std::fmt::Display;

// ***************************** Command Definition ***************************** //

// A named mutation of the database. P is the parameter record, R the value returned on success
pub struct CommandDefinition<D, P, R, E>
{
  name: &'static str,
  cmd: fn (&mut D, &P) -> Result<R, E>
}

impl<D, P, R, E> Clone for CommandDefinition<D, P, R, E>
{
  fn clone(&self) -> Self
  {
    Self { name: self.name, cmd: self.cmd }
  }
}

impl<D, P, R, E> CommandDefinition<D, P, R, E>
{
  pub fn new(name: &'static str, cmd: fn (&mut D, &P) -> Result<R, E>) -> Self
  {
    Self { name, cmd }
  }

  pub fn create(&self, parameters: P) -> Command<D, P, R, E>
  {
    Command { definition: self.clone(), parameters }
  }

  fn run(&self, db: &mut D, parameters: &P) -> Result<R, E>
  {
    (self.cmd)(db, parameters)
  }

  pub fn get_name(&self) -> &'static str
  {
    self.name
  }
}

// ********************************** Command *********************************** //

pub trait CommandBase<D>
{
  type Output;
  type Error: Display;

  fn run(&self, db: &mut D) -> Result<Self::Output, Self::Error>;

  fn get_name(&self) -> &'static str;
}

// A command definition bound to its parameters, ready to be pushed to the command engine
pub struct Command<D, P, R, E>
{
  definition: CommandDefinition<D, P, R, E>,
  parameters: P
}

impl<D, P, R, E> CommandBase<D> for Command<D, P, R, E> where E: Display
{
  type Output = R;
  type Error = E;

  fn run(&self, db: &mut D) -> Result<R, E>
  {
    self.definition.run(db, &self.parameters)
  }

  fn get_name(&self) -> &'static str
  {
    self.definition.name
  }
}

// ***************************** Command Directory ***************************** //

// A struct holding all command definitions of a database, usually derived
pub trait CommandDirectoryFactory
{
  fn new() -> Self;
}
