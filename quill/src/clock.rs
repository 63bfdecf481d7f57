use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

// Source of the timestamps written into created and updated records
pub trait Clock: Send + Sync
{
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock
{
    fn now(&self) -> DateTime<Utc>
    {
        Utc::now()
    }
}

// A clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock
{
    current: Mutex<DateTime<Utc>>
}

impl ManualClock
{
    pub fn new(start: DateTime<Utc>) -> Self
    {
        Self { current: Mutex::new(start) }
    }

    pub fn set(&self, instant: DateTime<Utc>)
    {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    pub fn advance(&self, step: Duration)
    {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current += step;
    }
}

impl Clock for ManualClock
{
    fn now(&self) -> DateTime<Utc>
    {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
