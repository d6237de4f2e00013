//! Registration records and their persistent storage.

mod file;
mod memory;
mod store;
mod timestamp;

pub use file::{CorruptPolicy, FileStore};
pub use memory::MemoryStore;
pub use store::Store;

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Internship programs that can be applied for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Program {
    Python,
    Java,
    MachineLearning,
    DeepLearning,
    GenerativeAi,
    AgenticAi,
    FullStack,
}

impl Program {
    /// Every accepted program, in display order.
    pub const ALL: [Program; 7] = [
        Program::Python,
        Program::Java,
        Program::MachineLearning,
        Program::DeepLearning,
        Program::GenerativeAi,
        Program::AgenticAi,
        Program::FullStack,
    ];

    /// Identifier used on the wire and in the stored document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Program::Python => "python",
            Program::Java => "java",
            Program::MachineLearning => "machine-learning",
            Program::DeepLearning => "deep-learning",
            Program::GenerativeAi => "generative-ai",
            Program::AgenticAi => "agentic-ai",
            Program::FullStack => "full-stack",
        }
    }
}

impl FromStr for Program {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Program::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown internship program: {}", s))
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the internship is attended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Online,
    Offline,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Online => "online",
            Mode::Offline => "offline",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Mode::Online),
            "offline" => Ok(Mode::Offline),
            other => Err(format!("unknown internship mode: {}", other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submission that passed validation but has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub internship: Program,
    pub mode: Mode,
    /// Stored verbatim; any truthy JSON value is accepted.
    pub discount_applied: Value,
}

impl Registration {
    /// Stamp the registration with the current local time.
    pub fn accept(self) -> RegistrationRecord {
        self.accept_at(Local::now().naive_local())
    }

    /// Stamp the registration with an explicit timestamp.
    pub fn accept_at(self, created_at: NaiveDateTime) -> RegistrationRecord {
        RegistrationRecord {
            name: self.name,
            email: self.email,
            phone: self.phone,
            college: self.college,
            internship: self.internship,
            mode: self.mode,
            discount_applied: self.discount_applied,
            created_at: created_at.trunc_subsecs(6),
        }
    }
}

/// A persisted registration.
///
/// Field order matches the stored document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrationRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub internship: Program,
    pub mode: Mode,
    pub discount_applied: Value,
    /// Local wall-clock time of acceptance, without offset.
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}
