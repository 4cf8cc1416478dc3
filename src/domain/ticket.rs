use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unique identifier for a support ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(u32);

impl TicketId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl FromStr for TicketId {
    type Err = crate::error::HelpdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map(Self)
            .map_err(|_| crate::error::HelpdeskError::InvalidTicketId(s.to_string()))
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a support ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    New,
    InProgress,
    Closed,
}

impl TicketStatus {
    /// All statuses in workflow order, for filter controls
    pub const ALL: [TicketStatus; 3] = [Self::New, Self::InProgress, Self::Closed];

    /// Wire/storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }

    /// Translation catalog key for the status label
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::New => "ticket.status.new",
            Self::InProgress => "ticket.status.in_progress",
            Self::Closed => "ticket.status.closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = crate::error::HelpdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            _ => Err(crate::error::HelpdeskError::InvalidStatus(s.to_string())),
        }
    }
}

/// Priority of a support ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// All priorities from least to most urgent
    pub const ALL: [Priority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Translation catalog key for the priority label
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::Low => "ticket.priority.low",
            Self::Medium => "ticket.priority.medium",
            Self::High => "ticket.priority.high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = crate::error::HelpdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(crate::error::HelpdeskError::InvalidPriority(s.to_string())),
        }
    }
}

/// A support request record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub customer_name: String,
    pub subject: String,
    pub description: String,
    pub priority: Priority,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    /// Creates a new ticket in the initial status
    pub fn new(
        id: TicketId,
        customer_name: impl Into<String>,
        subject: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_name: customer_name.into(),
            subject: subject.into(),
            description: description.into(),
            priority,
            status: TicketStatus::New,
            created_at,
        }
    }

    /// Replaces the status field; no other field is touched
    pub fn set_status(&mut self, status: TicketStatus) {
        self.status = status;
    }
}
