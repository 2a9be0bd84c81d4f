// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the normalized ticket model and report aggregates shared by aggregation and rendering
// role: model/types
// outputs: Serializable structs with camelCase field names matching the tracker's vocabulary
// invariants:
// - labels and activities are never null (empty Vec instead)
// - Ticket values are immutable snapshots produced once per run
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TicketState {
  pub name: String,
  #[serde(rename = "type")]
  pub kind: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TicketAssignee {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub email: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TicketCreator {
  pub id: String,
  pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TicketLabel {
  pub id: String,
  pub name: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
  Assigned,
  Updated,
  Commented,
}

impl ActivityKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ActivityKind::Assigned => "assigned",
      ActivityKind::Updated => "updated",
      ActivityKind::Commented => "commented",
    }
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TicketActivity {
  #[serde(rename = "type")]
  pub kind: ActivityKind,
  pub date: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
  pub id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub identifier: Option<String>,
  pub title: String,
  #[serde(default)]
  pub description: Option<String>,
  pub state: TicketState,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub assignee: Option<TicketAssignee>,
  pub creator: TicketCreator,
  #[serde(default)]
  pub labels: Vec<TicketLabel>,
  pub created_at: String,
  pub updated_at: String,
  #[serde(default)]
  pub completed_at: Option<String>,
  #[serde(default)]
  pub activities: Vec<TicketActivity>,
}

impl Ticket {
  /// Identifier shown to humans (`ENG-42`), falling back to the opaque id.
  pub fn display_id(&self) -> &str {
    self.identifier.as_deref().unwrap_or(&self.id)
  }

  /// `updatedAt` as epoch milliseconds; unparseable timestamps sort as the epoch.
  pub fn updated_at_millis(&self) -> i64 {
    DateTime::parse_from_rfc3339(&self.updated_at)
      .map(|dt| dt.with_timezone(&Utc).timestamp_millis())
      .unwrap_or(0)
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
  pub total_tickets: usize,
  pub by_status: BTreeMap<String, usize>,
  pub by_activity_type: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReportData {
  /// Display label, e.g. "01. January".
  pub month: String,
  pub year: i32,
  pub tickets: Vec<Ticket>,
  pub summary: ReportSummary,
}
