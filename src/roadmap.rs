//! Roadmap data.
//!
//! The roadmap page shows one board per product with three columns:
//! Planned, In Progress and Completed. Boards come from a [`RoadmapSource`]:
//!
//! - [`StaticRoadmap`]: the built-in boards shipped with the site
//! - [`FileRoadmap`]: a `roadmap.json` in the content root, either a bare
//!   products array or a `{ "data": [...], "error": ... }` envelope
//! - [`IssueSnapshotRoadmap`]: an exported issue-tracker snapshot
//!   (`linear.json`) whose issues are sorted into columns by workflow state
//!
//! [`load_roadmap`] picks the source from config and falls back to the
//! built-in boards when the configured one fails or is empty.

use crate::config::RoadmapConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const ROADMAP_FILE: &str = "roadmap.json";
pub const ISSUE_SNAPSHOT_FILE: &str = "linear.json";

pub const PLANNED: &str = "Planned";
pub const IN_PROGRESS: &str = "In Progress";
pub const COMPLETED: &str = "Completed";

/// Label that marks an issue as publicly visible.
pub const PUBLIC_LABEL: &str = "Public";

#[derive(Error, Debug)]
pub enum RoadmapError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid roadmap data in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("roadmap source reported an error: {0}")]
    Source(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Bug,
    Feature,
    Improvement,
    Documentation,
    Performance,
    Security,
}

impl TaskType {
    /// Badge text.
    pub fn label(self) -> &'static str {
        match self {
            TaskType::Bug => "Bug",
            TaskType::Feature => "Feature",
            TaskType::Improvement => "Improvement",
            TaskType::Documentation => "Docs",
            TaskType::Performance => "Performance",
            TaskType::Security => "Security",
        }
    }

    /// Badge palette color.
    pub fn color(self) -> &'static str {
        match self {
            TaskType::Bug => "red",
            TaskType::Feature => "green",
            TaskType::Improvement => "blue",
            TaskType::Documentation => "magenta",
            TaskType::Performance => "orange",
            TaskType::Security => "indigo",
        }
    }

    /// Task type implied by an issue label, if any.
    ///
    /// Matches case-insensitive substrings, so `"Bugfix"` and
    /// `"perf-regression"` both count.
    pub fn from_label(label: &str) -> Option<TaskType> {
        let lower = label.to_lowercase();
        if lower.contains("bug") {
            Some(TaskType::Bug)
        } else if lower.contains("feature") {
            Some(TaskType::Feature)
        } else if lower.contains("doc") {
            Some(TaskType::Documentation)
        } else if lower.contains("perf") {
            Some(TaskType::Performance)
        } else if lower.contains("security") {
            Some(TaskType::Security)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUser {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<TaskUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(rename = "type")]
    pub kind: TaskType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product: String,
    /// Palette color of the board header.
    pub brand: String,
    pub columns: Vec<Column>,
}

impl Product {
    /// A board with the three standard columns, all empty.
    pub fn empty(product: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            brand: brand.into(),
            columns: [PLANNED, IN_PROGRESS, COMPLETED]
                .into_iter()
                .map(|title| Column {
                    title: title.to_string(),
                    tasks: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    fn column_mut(&mut self, title: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.title == title)
    }
}

/// Anything that can produce roadmap boards.
pub trait RoadmapSource {
    /// Human-readable name for log lines.
    fn name(&self) -> String;

    fn fetch_roadmap(&self) -> Result<Vec<Product>, RoadmapError>;
}

// ============================================================================
// Built-in boards
// ============================================================================

/// The boards shipped with the site.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRoadmap;

impl RoadmapSource for StaticRoadmap {
    fn name(&self) -> String {
        "built-in roadmap".to_string()
    }

    fn fetch_roadmap(&self) -> Result<Vec<Product>, RoadmapError> {
        Ok(static_roadmap())
    }
}

fn task(title: &str, description: &str, kind: TaskType) -> Task {
    Task {
        title: title.to_string(),
        description: Some(description.to_string()),
        user: None,
        href: None,
        kind,
    }
}

fn assigned(mut task: Task, name: &str, avatar: Option<&str>) -> Task {
    task.user = Some(TaskUser {
        name: name.to_string(),
        avatar: avatar.map(str::to_string),
    });
    task
}

fn linked(mut task: Task, href: &str) -> Task {
    task.href = Some(href.to_string());
    task
}

fn board(product: &str, brand: &str, planned: Vec<Task>, progress: Vec<Task>, done: Vec<Task>) -> Product {
    let mut board = Product::empty(product, brand);
    for (column, tasks) in board.columns.iter_mut().zip([planned, progress, done]) {
        column.tasks = tasks;
    }
    board
}

/// Built-in boards used when no other source is configured or available.
pub fn static_roadmap() -> Vec<Product> {
    use TaskType::*;
    vec![
        board(
            "Magic Docs Core",
            "indigo",
            vec![
                assigned(
                    task(
                        "Improve search functionality",
                        "Enhance the search algorithm to provide more relevant results",
                        Improvement,
                    ),
                    "Alex Johnson",
                    Some("https://i.pravatar.cc/150?img=1"),
                ),
                assigned(
                    task(
                        "Add dark mode support",
                        "Implement a comprehensive dark mode theme across the application",
                        Feature,
                    ),
                    "Sam Taylor",
                    None,
                ),
                linked(
                    task(
                        "Mobile responsiveness",
                        "Ensure all components work well on mobile devices",
                        Improvement,
                    ),
                    "/tasks/mobile-responsiveness",
                ),
            ],
            vec![
                linked(
                    assigned(
                        task(
                            "API documentation",
                            "Create comprehensive documentation for all API endpoints",
                            Documentation,
                        ),
                        "Jamie Smith",
                        Some("https://i.pravatar.cc/150?img=2"),
                    ),
                    "/tasks/api-docs",
                ),
                assigned(
                    task(
                        "Performance optimization",
                        "Improve loading times and reduce bundle size",
                        Performance,
                    ),
                    "Riley Chen",
                    None,
                ),
            ],
            vec![
                assigned(
                    task(
                        "User authentication",
                        "Implement secure login and registration system",
                        Security,
                    ),
                    "Jordan Lee",
                    Some("https://i.pravatar.cc/150?img=3"),
                ),
                assigned(
                    task(
                        "Component library",
                        "Create reusable UI components for faster development",
                        Feature,
                    ),
                    "Casey Wilson",
                    None,
                ),
                assigned(
                    task(
                        "Automated testing",
                        "Set up CI/CD pipeline with automated tests",
                        Improvement,
                    ),
                    "Taylor Morgan",
                    Some("https://i.pravatar.cc/150?img=4"),
                ),
            ],
        ),
        board(
            "Magic Docs Extensions",
            "cyan",
            vec![
                assigned(
                    task(
                        "Analytics Integration",
                        "Add support for popular analytics platforms",
                        Feature,
                    ),
                    "Morgan Smith",
                    Some("https://i.pravatar.cc/150?img=5"),
                ),
                assigned(
                    task(
                        "Localization Support",
                        "Add multi-language support for documentation",
                        Feature,
                    ),
                    "Robin Patel",
                    None,
                ),
            ],
            vec![assigned(
                task(
                    "Custom Themes",
                    "Allow users to create and apply custom themes",
                    Improvement,
                ),
                "Quinn Jones",
                Some("https://i.pravatar.cc/150?img=6"),
            )],
            vec![
                assigned(
                    task(
                        "Code Syntax Highlighting",
                        "Support for syntax highlighting in code blocks",
                        Feature,
                    ),
                    "Avery Williams",
                    Some("https://i.pravatar.cc/150?img=7"),
                ),
                assigned(
                    task(
                        "Image Optimization",
                        "Automatic optimization of images in documentation",
                        Performance,
                    ),
                    "Jordan Rivera",
                    None,
                ),
            ],
        ),
    ]
}

// ============================================================================
// roadmap.json
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RoadmapFileContents {
    Products(Vec<Product>),
    Envelope {
        #[serde(default)]
        data: Option<Vec<Product>>,
        #[serde(default)]
        error: Option<String>,
    },
}

/// Boards read from a JSON file.
#[derive(Debug, Clone)]
pub struct FileRoadmap {
    pub path: PathBuf,
}

impl FileRoadmap {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RoadmapSource for FileRoadmap {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_roadmap(&self) -> Result<Vec<Product>, RoadmapError> {
        let contents: RoadmapFileContents = read_json(&self.path)?;
        match contents {
            RoadmapFileContents::Products(products) => Ok(products),
            RoadmapFileContents::Envelope {
                error: Some(error), ..
            } => Err(RoadmapError::Source(error)),
            RoadmapFileContents::Envelope {
                data: Some(products),
                ..
            } => Ok(products),
            RoadmapFileContents::Envelope { .. } => {
                Err(RoadmapError::Source("no data returned".to_string()))
            }
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, RoadmapError> {
    let content = fs::read_to_string(path).map_err(|source| RoadmapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| RoadmapError::Json {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// Issue-tracker snapshot
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueSnapshot {
    #[serde(default)]
    pub teams: Vec<IssueTeam>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueTeam {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: Option<IssueState>,
    #[serde(default)]
    pub assignee: Option<Assignee>,
    #[serde(default)]
    pub labels: Option<LabelConnection>,
}

impl Issue {
    fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .flat_map(|l| l.nodes.iter())
            .filter_map(|l| l.name.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueState {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelConnection {
    #[serde(default)]
    pub nodes: Vec<Label>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub name: Option<String>,
}

/// Column for a workflow state name.
///
/// `None` means the issue is dropped (cancelled work). Unknown states land
/// in Planned.
pub fn column_for_state(state: &str) -> Option<&'static str> {
    match state {
        "Backlog" | "Todo" | "To Do" | "Planning" => Some(PLANNED),
        "In Progress" | "In Review" | "Ready for Review" | "Testing" => Some(IN_PROGRESS),
        "Done" | "Completed" | "Finished" => Some(COMPLETED),
        "Canceled" | "Cancelled" => None,
        _ => Some(PLANNED),
    }
}

/// Sort one team's issues into a board.
///
/// Returns `None` when no issue survives the filters, so empty teams never
/// produce a board.
pub fn map_team_issues(team: &IssueTeam, public_only: bool) -> Option<Product> {
    let mut board = Product::empty(
        team.name.clone().unwrap_or_else(|| "Unnamed Team".to_string()),
        team.key.as_deref().unwrap_or("team").to_lowercase(),
    );

    for issue in &team.issues {
        if public_only && !issue.label_names().any(|l| l == PUBLIC_LABEL) {
            continue;
        }
        let Some(title) = issue.title.as_deref().filter(|t| !t.is_empty()) else {
            continue;
        };
        let Some(state) = issue
            .state
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .filter(|s| !s.is_empty())
        else {
            continue;
        };
        let Some(column) = column_for_state(state) else {
            continue;
        };

        // Last matching label wins.
        let kind = issue
            .label_names()
            .filter_map(TaskType::from_label)
            .last()
            .unwrap_or(TaskType::Improvement);

        let user = issue.assignee.as_ref().and_then(|a| {
            let name = a.name.clone().or_else(|| a.email.clone())?;
            Some(TaskUser {
                name,
                avatar: a.avatar_url.clone(),
            })
        });

        if let Some(target) = board.column_mut(column) {
            target.tasks.push(Task {
                title: title.to_string(),
                description: issue.description.clone().filter(|d| !d.is_empty()),
                user,
                href: None,
                kind,
            });
        }
    }

    (board.task_count() > 0).then_some(board)
}

/// Whether `team` is selected by any of `filters`.
///
/// Names and keys compare case-insensitively, ids exactly. An empty filter
/// list selects every team.
pub fn team_matches(team: &IssueTeam, filters: &[String]) -> bool {
    if filters.is_empty() {
        return true;
    }
    filters.iter().any(|f| {
        let wanted = f.to_lowercase();
        team.name.as_deref().map(str::to_lowercase).as_deref() == Some(wanted.as_str())
            || team.key.as_deref().map(str::to_lowercase).as_deref() == Some(wanted.as_str())
            || team.id == *f
    })
}

/// Boards mapped from an exported issue-tracker snapshot.
#[derive(Debug, Clone)]
pub struct IssueSnapshotRoadmap {
    pub path: PathBuf,
    pub public_only: bool,
    pub teams: Vec<String>,
}

impl IssueSnapshotRoadmap {
    pub fn new(path: impl Into<PathBuf>, config: &RoadmapConfig) -> Self {
        Self {
            path: path.into(),
            public_only: config.public_labels_only,
            teams: config.teams.clone(),
        }
    }
}

impl RoadmapSource for IssueSnapshotRoadmap {
    fn name(&self) -> String {
        format!("issue snapshot {}", self.path.display())
    }

    fn fetch_roadmap(&self) -> Result<Vec<Product>, RoadmapError> {
        let snapshot: IssueSnapshot = read_json(&self.path)?;
        Ok(snapshot
            .teams
            .iter()
            .filter(|team| team_matches(team, &self.teams))
            .filter_map(|team| map_team_issues(team, self.public_only))
            .collect())
    }
}

// ============================================================================
// Source selection
// ============================================================================

/// Fetch from `primary`, falling back when it errors or returns no boards.
pub fn fetch_with_fallback(
    primary: &dyn RoadmapSource,
    fallback: &dyn RoadmapSource,
) -> Result<Vec<Product>, RoadmapError> {
    match primary.fetch_roadmap() {
        Ok(products) if !products.is_empty() => {
            info!(source = %primary.name(), boards = products.len(), "roadmap loaded");
            return Ok(products);
        }
        Ok(_) => warn!(source = %primary.name(), "roadmap source returned no boards"),
        Err(e) => warn!(source = %primary.name(), error = %e, "roadmap source failed"),
    }
    info!(source = %fallback.name(), "using fallback roadmap");
    fallback.fetch_roadmap()
}

/// The source configured for a content root.
///
/// `use_linear` selects the issue snapshot; otherwise a `roadmap.json` in
/// the root wins over the built-in boards.
pub fn configured_source(root: &Path, config: &RoadmapConfig) -> Box<dyn RoadmapSource> {
    if config.use_linear {
        return Box::new(IssueSnapshotRoadmap::new(
            root.join(ISSUE_SNAPSHOT_FILE),
            config,
        ));
    }
    let file = root.join(ROADMAP_FILE);
    if file.exists() {
        Box::new(FileRoadmap::new(file))
    } else {
        Box::new(StaticRoadmap)
    }
}

/// Roadmap boards for a content root, with the built-in boards as fallback.
pub fn load_roadmap(root: &Path, config: &RoadmapConfig) -> Result<Vec<Product>, RoadmapError> {
    let primary = configured_source(root, config);
    fetch_with_fallback(primary.as_ref(), &StaticRoadmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn issue(title: &str, state: &str, labels: &[&str]) -> Issue {
        Issue {
            title: Some(title.to_string()),
            description: None,
            state: Some(IssueState {
                name: Some(state.to_string()),
            }),
            assignee: None,
            labels: Some(LabelConnection {
                nodes: labels
                    .iter()
                    .map(|l| Label {
                        name: Some(l.to_string()),
                    })
                    .collect(),
            }),
        }
    }

    fn team(name: &str, key: &str, issues: Vec<Issue>) -> IssueTeam {
        IssueTeam {
            id: format!("id-{key}"),
            name: Some(name.to_string()),
            key: Some(key.to_string()),
            issues,
        }
    }

    fn column_titles<'a>(product: &'a Product, column: &str) -> Vec<&'a str> {
        product
            .columns
            .iter()
            .find(|c| c.title == column)
            .map(|c| c.tasks.iter().map(|t| t.title.as_str()).collect())
            .unwrap_or_default()
    }

    struct Failing;
    impl RoadmapSource for Failing {
        fn name(&self) -> String {
            "failing".into()
        }
        fn fetch_roadmap(&self) -> Result<Vec<Product>, RoadmapError> {
            Err(RoadmapError::Source("down".into()))
        }
    }

    struct Empty;
    impl RoadmapSource for Empty {
        fn name(&self) -> String {
            "empty".into()
        }
        fn fetch_roadmap(&self) -> Result<Vec<Product>, RoadmapError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn task_type_labels_and_colors() {
        assert_eq!(TaskType::Documentation.label(), "Docs");
        assert_eq!(TaskType::Documentation.color(), "magenta");
        assert_eq!(TaskType::Security.color(), "indigo");
        assert_eq!(TaskType::Bug.color(), "red");
    }

    #[test]
    fn static_roadmap_has_three_columns_per_board() {
        let boards = static_roadmap();
        assert_eq!(boards.len(), 2);
        for board in &boards {
            let titles: Vec<&str> = board.columns.iter().map(|c| c.title.as_str()).collect();
            assert_eq!(titles, vec![PLANNED, IN_PROGRESS, COMPLETED]);
        }
        assert_eq!(boards[0].task_count(), 8);
        assert_eq!(boards[1].task_count(), 5);
    }

    #[test]
    fn states_map_to_columns() {
        let t = team(
            "Core",
            "CORE",
            vec![
                issue("a", "Backlog", &[]),
                issue("b", "In Review", &[]),
                issue("c", "Finished", &[]),
                issue("d", "Cancelled", &[]),
                issue("e", "Triage", &[]),
            ],
        );
        let board = map_team_issues(&t, false).unwrap();
        assert_eq!(column_titles(&board, PLANNED), vec!["a", "e"]);
        assert_eq!(column_titles(&board, IN_PROGRESS), vec!["b"]);
        assert_eq!(column_titles(&board, COMPLETED), vec!["c"]);
        assert_eq!(board.product, "Core");
        assert_eq!(board.brand, "core");
    }

    #[test]
    fn issues_without_title_or_state_are_skipped() {
        let mut no_state = issue("no state", "Todo", &[]);
        no_state.state = None;
        let mut no_title = issue("", "Todo", &[]);
        no_title.title = None;
        let t = team("Core", "CORE", vec![no_state, no_title, issue("kept", "Todo", &[])]);
        let board = map_team_issues(&t, false).unwrap();
        assert_eq!(board.task_count(), 1);
    }

    #[test]
    fn label_mapping_last_match_wins() {
        let t = team(
            "Core",
            "CORE",
            vec![
                issue("a", "Todo", &["Bugfix", "Perf regression"]),
                issue("b", "Todo", &["Documentation", "ui"]),
                issue("c", "Todo", &["ui"]),
            ],
        );
        let board = map_team_issues(&t, false).unwrap();
        let kinds: Vec<TaskType> = board.columns[0].tasks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TaskType::Performance,
                TaskType::Documentation,
                TaskType::Improvement
            ]
        );
    }

    #[test]
    fn public_only_filters_unlabelled_issues() {
        let t = team(
            "Core",
            "CORE",
            vec![
                issue("shown", "Todo", &["Public", "feature"]),
                issue("hidden", "Todo", &["public"]),
            ],
        );
        let board = map_team_issues(&t, true).unwrap();
        assert_eq!(column_titles(&board, PLANNED), vec!["shown"]);
    }

    #[test]
    fn team_without_surviving_tasks_is_dropped() {
        let t = team("Core", "CORE", vec![issue("x", "Canceled", &[])]);
        assert!(map_team_issues(&t, false).is_none());
        assert!(map_team_issues(&team("Empty", "E", vec![]), false).is_none());
    }

    #[test]
    fn unnamed_team_defaults() {
        let t = IssueTeam {
            id: "1".into(),
            name: None,
            key: None,
            issues: vec![issue("x", "Todo", &[])],
        };
        let board = map_team_issues(&t, false).unwrap();
        assert_eq!(board.product, "Unnamed Team");
        assert_eq!(board.brand, "team");
    }

    #[test]
    fn assignee_becomes_user() {
        let mut i = issue("x", "Todo", &[]);
        i.assignee = Some(Assignee {
            name: None,
            email: Some("dev@example.com".into()),
            avatar_url: Some("https://example.com/a.png".into()),
        });
        let board = map_team_issues(&team("Core", "CORE", vec![i]), false).unwrap();
        let user = board.columns[0].tasks[0].user.clone().unwrap();
        assert_eq!(user.name, "dev@example.com");
        assert_eq!(user.avatar.as_deref(), Some("https://example.com/a.png"));
    }

    #[test]
    fn team_filter_by_name_key_or_id() {
        let t = team("Design System", "DS", vec![]);
        assert!(team_matches(&t, &[]));
        assert!(team_matches(&t, &["design system".into()]));
        assert!(team_matches(&t, &["ds".into()]));
        assert!(team_matches(&t, &["id-DS".into()]));
        assert!(!team_matches(&t, &["ID-ds".into()]));
        assert!(!team_matches(&t, &["web".into()]));
    }

    #[test]
    fn fallback_on_error_and_empty() {
        let boards = fetch_with_fallback(&Failing, &StaticRoadmap).unwrap();
        assert_eq!(boards, static_roadmap());
        let boards = fetch_with_fallback(&Empty, &StaticRoadmap).unwrap();
        assert_eq!(boards, static_roadmap());
    }

    #[test]
    fn file_roadmap_reads_array_and_envelope() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(ROADMAP_FILE);

        fs::write(
            &path,
            r#"[{"product": "CLI", "brand": "green", "columns": [
                {"title": "Planned", "tasks": [{"title": "Shell completions", "type": "feature"}]}
            ]}]"#,
        )
        .unwrap();
        let boards = FileRoadmap::new(&path).fetch_roadmap().unwrap();
        assert_eq!(boards[0].product, "CLI");
        assert_eq!(boards[0].columns[0].tasks[0].kind, TaskType::Feature);

        fs::write(&path, r#"{"data": [], "source": "linear"}"#).unwrap();
        assert!(FileRoadmap::new(&path).fetch_roadmap().unwrap().is_empty());

        fs::write(&path, r#"{"data": null, "error": "API key not configured"}"#).unwrap();
        assert!(matches!(
            FileRoadmap::new(&path).fetch_roadmap(),
            Err(RoadmapError::Source(_))
        ));
    }

    #[test]
    fn file_roadmap_rejects_unknown_task_type() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(ROADMAP_FILE);
        fs::write(
            &path,
            r#"[{"product": "CLI", "brand": "green", "columns": [
                {"title": "Planned", "tasks": [{"title": "x", "type": "chore"}]}
            ]}]"#,
        )
        .unwrap();
        assert!(matches!(
            FileRoadmap::new(&path).fetch_roadmap(),
            Err(RoadmapError::Json { .. })
        ));
    }

    #[test]
    fn snapshot_source_filters_teams() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(ISSUE_SNAPSHOT_FILE),
            r#"{"teams": [
                {"id": "t1", "name": "Core", "key": "CORE", "issues": [
                    {"title": "Fix crash", "state": {"name": "In Progress"},
                     "labels": {"nodes": [{"name": "Bug"}]},
                     "assignee": {"name": "Ada", "avatarUrl": "https://example.com/ada.png"}}
                ]},
                {"id": "t2", "name": "Web", "key": "WEB", "issues": [
                    {"title": "Landing page", "state": {"name": "Todo"}}
                ]}
            ]}"#,
        )
        .unwrap();

        let config = RoadmapConfig {
            use_linear: true,
            public_labels_only: false,
            teams: vec!["core".into()],
        };
        let boards = load_roadmap(tmp.path(), &config).unwrap();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].product, "Core");
        let task = &boards[0].columns[1].tasks[0];
        assert_eq!(task.kind, TaskType::Bug);
        assert_eq!(task.user.as_ref().unwrap().name, "Ada");
    }

    #[test]
    fn missing_snapshot_falls_back_to_static() {
        let tmp = TempDir::new().unwrap();
        let config = RoadmapConfig {
            use_linear: true,
            ..Default::default()
        };
        assert_eq!(load_roadmap(tmp.path(), &config).unwrap(), static_roadmap());
    }

    #[test]
    fn default_config_without_file_is_static() {
        let tmp = TempDir::new().unwrap();
        let boards = load_roadmap(tmp.path(), &RoadmapConfig::default()).unwrap();
        assert_eq!(boards, static_roadmap());
    }
}
