// Library for tests to access modules

pub mod collect;
pub mod config;
pub mod models;
pub mod output;
pub mod parse;
pub mod probes;
pub mod report;
pub mod resolver;
pub mod rules;
pub mod scanner;
pub mod upload;
pub mod version;
