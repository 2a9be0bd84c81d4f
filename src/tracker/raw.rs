// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: External record schema for tracker issues/comments/viewer and the adapter into the Ticket model
// role: tracker/adapter
// inputs: GraphQL node JSON (camelCase) deserialized with serde
// outputs: RawIssue/RawComment/RawViewer; Ticket via RawIssue::to_ticket
// invariants:
// - Every relation and every relation field is optional; gaps degrade to defaults, never to errors
// - Synthesized activities: `assigned` (when the mapped user is the assignee) then always `updated`
// - Timestamps are parsed here; unparseable values count as absent
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ActivityKind, Ticket, TicketActivity, TicketAssignee, TicketCreator, TicketLabel, TicketState};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawState {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default, rename = "type")]
  pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLabel {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLabelConnection {
  #[serde(default)]
  pub nodes: Vec<RawLabel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIssue {
  pub id: String,
  #[serde(default)]
  pub identifier: Option<String>,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub created_at: String,
  #[serde(default)]
  pub updated_at: String,
  #[serde(default)]
  pub started_at: Option<String>,
  #[serde(default)]
  pub completed_at: Option<String>,
  #[serde(default)]
  pub assignee: Option<RawUser>,
  #[serde(default)]
  pub creator: Option<RawUser>,
  #[serde(default)]
  pub state: Option<RawState>,
  #[serde(default)]
  pub labels: Option<RawLabelConnection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIssueRef {
  pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComment {
  #[serde(default)]
  pub issue: Option<RawIssueRef>,
  #[serde(default)]
  pub user: Option<RawUser>,
  #[serde(default)]
  pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawViewer {
  pub id: String,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub email: Option<String>,
}

pub(crate) fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.with_timezone(&Utc))
}

impl RawIssue {
  pub fn assignee_id(&self) -> Option<&str> {
    self.assignee.as_ref().map(|a| a.id.as_str()).filter(|id| !id.is_empty())
  }

  pub fn creator_id(&self) -> Option<&str> {
    self.creator.as_ref().map(|c| c.id.as_str()).filter(|id| !id.is_empty())
  }

  pub fn assignee_email(&self) -> Option<&str> {
    self.assignee.as_ref().and_then(|a| a.email.as_deref())
  }

  pub fn started_at(&self) -> Option<DateTime<Utc>> {
    self.started_at.as_deref().and_then(parse_instant)
  }

  pub fn updated_at(&self) -> Option<DateTime<Utc>> {
    parse_instant(&self.updated_at)
  }

  /// Project onto the Ticket shape; `mapped_user` decides whether an `assigned` activity is synthesized.
  pub fn to_ticket(&self, mapped_user: Option<&str>) -> Ticket {
    let mut activities = Vec::with_capacity(2);
    let is_assigned = matches!((self.assignee_id(), mapped_user), (Some(a), Some(u)) if a == u);

    if is_assigned {
      activities.push(TicketActivity { kind: ActivityKind::Assigned, date: self.updated_at.clone() });
    }
    activities.push(TicketActivity { kind: ActivityKind::Updated, date: self.updated_at.clone() });

    let state = self.state.as_ref();
    let state = TicketState {
      name: state.and_then(|s| s.name.clone()).unwrap_or_else(|| "Unknown".into()),
      kind: state.and_then(|s| s.kind.clone()).unwrap_or_else(|| "unknown".into()),
    };

    let creator = TicketCreator {
      id: self.creator_id().unwrap_or_default().to_string(),
      name: self
        .creator
        .as_ref()
        .and_then(|c| c.name.clone())
        .unwrap_or_else(|| "Unknown".into()),
    };

    let assignee = self.assignee.as_ref().map(|a| TicketAssignee {
      id: a.id.clone(),
      name: a.name.clone().unwrap_or_default(),
      email: a.email.clone().unwrap_or_default(),
    });

    let labels = self
      .labels
      .as_ref()
      .map(|conn| {
        conn
          .nodes
          .iter()
          .map(|l| TicketLabel { id: l.id.clone(), name: l.name.clone() })
          .collect()
      })
      .unwrap_or_default();

    Ticket {
      id: self.id.clone(),
      identifier: self.identifier.clone(),
      title: self.title.clone(),
      description: self.description.clone(),
      state,
      assignee,
      creator,
      labels,
      created_at: self.created_at.clone(),
      updated_at: self.updated_at.clone(),
      completed_at: self.completed_at.clone(),
      activities,
    }
  }
}

impl RawComment {
  pub fn created_at(&self) -> Option<DateTime<Utc>> {
    self.created_at.as_deref().and_then(parse_instant)
  }

  pub fn author_email(&self) -> Option<&str> {
    self.user.as_ref().and_then(|u| u.email.as_deref())
  }
}
