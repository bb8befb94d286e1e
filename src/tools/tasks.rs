//! Task database tools.
//!
//! Helpers for a task-tracking database whose pages carry `Title`,
//! `Status`, `Owner`, `Team`, `System`, `Last update`, `Created at`,
//! `Tags` and `Description` properties.

use crate::error::{NotionApiError, NotionApiResult};
use crate::models::property;
use crate::models::FormattedBlock;
use crate::repositories::PageRepository;
use crate::tools::content::PageContentTools;
use crate::tools::databases::{DatabaseTools, QueryDatabaseParams};
use crate::tools::filters::{self, FilterOperator};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

const TITLE: &str = "Title";
const LAST_UPDATE: &str = "Last update";
const CREATED_AT: &str = "Created at";
const TAGS: &str = "Tags";
const DESCRIPTION: &str = "Description";

/// Depth used when loading a task's content.
const TASK_CONTENT_DEPTH: u32 = 2;
const TASK_CONTENT_BLOCKS: u32 = 100;

/// Compact view of a task page.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct TaskSummary {
    pub id: String,
    pub title: String,
    pub status: String,
    pub owner: Vec<String>,
    pub team: Vec<String>,
    pub system: String,
    pub last_update: String,
}

impl TaskSummary {
    /// Build a summary from a raw page record.
    pub fn from_page(page: &Value) -> Self {
        let props = &page["properties"];
        Self {
            id: page["id"].as_str().unwrap_or_default().to_string(),
            title: property::title(&props[TITLE]),
            status: property::status(&props[filters::STATUS_PROPERTY]),
            owner: property::people(&props[filters::OWNER_PROPERTY]),
            team: property::people(&props[filters::TEAM_PROPERTY]),
            system: property::select(&props[filters::SYSTEM_PROPERTY]),
            last_update: property::timestamp(&props[LAST_UPDATE], "last_edited_time"),
        }
    }
}

/// Full view of a task page with its content.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaskDetails {
    #[serde(flatten)]
    pub summary: TaskSummary,
    pub created_at: String,
    pub tags: Vec<String>,
    pub description: String,
    pub content: Vec<FormattedBlock>,
}

/// Result of [`TaskTools::get_task_details`].
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum TaskDetailsResponse {
    Details(Box<TaskDetails>),
    /// The page loaded but its content did not
    ContentUnavailable { page: Value, content_error: String },
}

/// Result of [`TaskTools::get_filtered_tasks`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilteredTasksResponse {
    pub tasks: Vec<TaskSummary>,
    pub count: usize,
    pub has_more: bool,
}

/// Which people property a person lookup matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonRole {
    Owner,
    Team,
    #[default]
    Any,
}

impl fmt::Display for PersonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonRole::Owner => write!(f, "owner"),
            PersonRole::Team => write!(f, "team"),
            PersonRole::Any => write!(f, "any"),
        }
    }
}

impl FromStr for PersonRole {
    type Err = NotionApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "owner" => Ok(PersonRole::Owner),
            "team" => Ok(PersonRole::Team),
            "any" => Ok(PersonRole::Any),
            other => Err(NotionApiError::InvalidRequest(format!(
                "role must be \"owner\", \"team\" or \"any\", got \"{}\"",
                other
            ))),
        }
    }
}

/// A task matched by [`TaskTools::find_tasks_by_person`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PersonTask {
    pub id: String,
    pub title: String,
    pub status: String,
    pub system: String,
    pub last_update: String,
    pub is_owner: bool,
    pub is_team_member: bool,
    pub owners: Vec<String>,
    pub team: Vec<String>,
}

/// Echo of the lookup parameters.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PersonFilterUsed {
    pub person_name: String,
    pub role: PersonRole,
}

/// Result of [`TaskTools::find_tasks_by_person`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PersonTasksResponse {
    pub tasks: Vec<PersonTask>,
    pub count: usize,
    pub has_more: bool,
    pub filter_used: PersonFilterUsed,
}

/// A person seen in the database and the roles they appear in.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PersonEntry {
    pub name: String,
    pub roles: Vec<String>,
}

/// Result of [`TaskTools::list_people_in_database`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeopleResponse {
    pub people: Vec<PersonEntry>,
    pub count: usize,
    pub pages_checked: usize,
}

/// Tools built on top of a task database.
pub struct TaskTools {
    page_repo: Arc<dyn PageRepository>,
    content_tools: Arc<PageContentTools>,
    database_tools: Arc<DatabaseTools>,
}

impl TaskTools {
    /// Create new task tools.
    ///
    /// # Arguments
    /// * `page_repo` - PageRepository for page lookups
    /// * `content_tools` - content walker used for task bodies
    /// * `database_tools` - query tools bound to the task database
    pub fn new(
        page_repo: Arc<dyn PageRepository>,
        content_tools: Arc<PageContentTools>,
        database_tools: Arc<DatabaseTools>,
    ) -> Self {
        Self {
            page_repo,
            content_tools,
            database_tools,
        }
    }

    /// Load a task page together with two levels of its content.
    ///
    /// A failure loading the page is returned as is; a failure loading the
    /// content yields the raw page plus `content_error`.
    pub async fn get_task_details(&self, task_id: &str) -> NotionApiResult<TaskDetailsResponse> {
        let page = self.page_repo.get(task_id).await?;

        let content = match self
            .content_tools
            .get_page_content_optimized(task_id, TASK_CONTENT_DEPTH, TASK_CONTENT_BLOCKS)
            .await
        {
            Ok(tree) => tree.blocks,
            Err(e) => {
                tracing::warn!("Content of task {} unavailable: {}", task_id, e);
                return Ok(TaskDetailsResponse::ContentUnavailable {
                    page,
                    content_error: e.to_string(),
                });
            }
        };

        let props = &page["properties"];
        Ok(TaskDetailsResponse::Details(Box::new(TaskDetails {
            summary: TaskSummary::from_page(&page),
            created_at: property::timestamp(&props[CREATED_AT], "created_time"),
            tags: property::multi_select(&props[TAGS]),
            description: property::rich_text(&props[DESCRIPTION]),
            content,
        })))
    }

    /// Most recently updated tasks matching every given criterion.
    pub async fn get_filtered_tasks(
        &self,
        status: Option<&str>,
        owner_email: Option<&str>,
        system: Option<&str>,
        limit: u32,
    ) -> NotionApiResult<FilteredTasksResponse> {
        let mut conditions = Vec::new();
        if let Some(status) = status.filter(|s| !s.is_empty()) {
            conditions.push(filters::status_filter(status));
        }
        if let Some(owner) = owner_email.filter(|s| !s.is_empty()) {
            conditions.push(filters::owner_filter_by_name(owner));
        }
        if let Some(system) = system.filter(|s| !s.is_empty()) {
            conditions.push(filters::select_filter(filters::SYSTEM_PROPERTY, system));
        }

        let filter = (!conditions.is_empty())
            .then(|| filters::combined_filter(conditions, FilterOperator::And));

        let result = self.query_recent(filter, limit).await?;
        let tasks: Vec<TaskSummary> = results(&result).iter().map(TaskSummary::from_page).collect();

        Ok(FilteredTasksResponse {
            count: tasks.len(),
            has_more: has_more(&result),
            tasks,
        })
    }

    /// Tasks where a person is owner, team member, or either.
    pub async fn find_tasks_by_person(
        &self,
        person_name: &str,
        role: PersonRole,
        limit: u32,
    ) -> NotionApiResult<PersonTasksResponse> {
        let filter = match role {
            PersonRole::Owner => filters::combined_filter(
                vec![filters::owner_filter_by_name(person_name)],
                FilterOperator::And,
            ),
            PersonRole::Team => filters::combined_filter(
                vec![filters::team_member_filter(person_name)],
                FilterOperator::And,
            ),
            PersonRole::Any => filters::combined_filter(
                vec![
                    filters::owner_filter_by_name(person_name),
                    filters::team_member_filter(person_name),
                ],
                FilterOperator::Or,
            ),
        };

        let result = self.query_recent(Some(filter), limit).await?;
        let needle = person_name.to_lowercase();
        let mentions = |names: &[String]| names.iter().any(|n| n.to_lowercase().contains(&needle));

        let tasks: Vec<PersonTask> = results(&result)
            .iter()
            .map(|page| {
                let summary = TaskSummary::from_page(page);
                PersonTask {
                    is_owner: mentions(&summary.owner),
                    is_team_member: mentions(&summary.team),
                    id: summary.id,
                    title: summary.title,
                    status: summary.status,
                    system: summary.system,
                    last_update: summary.last_update,
                    owners: summary.owner,
                    team: summary.team,
                }
            })
            .collect();

        Ok(PersonTasksResponse {
            count: tasks.len(),
            has_more: has_more(&result),
            tasks,
            filter_used: PersonFilterUsed {
                person_name: person_name.to_string(),
                role,
            },
        })
    }

    /// Everyone appearing as owner or team member in the latest `limit` tasks.
    pub async fn list_people_in_database(&self, limit: u32) -> NotionApiResult<PeopleResponse> {
        let result = self.query_recent(None, limit).await?;
        let pages = results(&result);

        let mut people: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for page in pages {
            let props = &page["properties"];
            let owners = property::people(&props[filters::OWNER_PROPERTY]);
            let team = property::people(&props[filters::TEAM_PROPERTY]);

            for (names, role) in [(owners, "owner"), (team, "team")] {
                for name in names.into_iter().filter(|n| !n.is_empty()) {
                    let roles = people.entry(name).or_default();
                    if !roles.iter().any(|r| r == role) {
                        roles.push(role.to_string());
                    }
                }
            }
        }

        let people: Vec<PersonEntry> = people
            .into_iter()
            .map(|(name, roles)| PersonEntry { name, roles })
            .collect();

        Ok(PeopleResponse {
            count: people.len(),
            pages_checked: pages.len().min(limit as usize),
            people,
        })
    }

    async fn query_recent(&self, filter: Option<Value>, limit: u32) -> NotionApiResult<Value> {
        self.database_tools
            .query_database(QueryDatabaseParams {
                filter,
                sorts: Some(vec![json!({"property": LAST_UPDATE, "direction": "descending"})]),
                page_size: limit,
                ..Default::default()
            })
            .await
    }
}

fn results(response: &Value) -> &[Value] {
    response["results"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn has_more(response: &Value) -> bool {
    response["has_more"].as_bool().unwrap_or(false)
}
