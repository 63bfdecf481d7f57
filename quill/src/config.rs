use log::warn;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config
{
    // env_logger filter directives
    pub log_filter: String,
    // Whether the demo binary fills the database with sample data
    pub seed_demo: bool
}

impl Default for Config
{
    fn default() -> Self
    {
        Self { log_filter: String::from("info"), seed_demo: true }
    }
}

impl Config
{
    pub fn from_env() -> Self
    {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separate from the process environment so it can be tested
    pub fn from_lookup<F>(lookup: F) -> Self where F: Fn(&str) -> Option<String>
    {
        let defaults = Self::default();

        let seed_demo = match lookup("QUILL_SEED_DEMO")
        {
            None => defaults.seed_demo,
            Some(value) => parse_flag(&value).unwrap_or_else(||
            {
                warn!("Ignoring invalid QUILL_SEED_DEMO value {:?}", value);
                defaults.seed_demo
            })
        };

        Self {
            log_filter: lookup("QUILL_LOG").unwrap_or(defaults.log_filter),
            seed_demo
        }
    }
}

fn parse_flag(value: &str) -> Option<bool>
{
    match value.trim().to_ascii_lowercase().as_str()
    {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None
    }
}
