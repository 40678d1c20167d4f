use serde::{Deserialize, Serialize};

/// Result envelope produced by a scan adapter.
///
/// Shaped after axe-core's `results` object so that reports exported by axe can be read as-is.
/// Reading is tolerant:
/// - Unknown fields are ignored.
/// - Every category may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResults {
    #[serde(default)]
    pub violations: Vec<Finding>,

    #[serde(default)]
    pub passes: Vec<Finding>,

    #[serde(default)]
    pub incomplete: Vec<Finding>,

    #[serde(default)]
    pub inapplicable: Vec<Finding>,

    /// Name of the engine that produced the results, e.g. "axe-core".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_engine: Option<TestEngine>,
}

impl ScanResults {
    pub fn violation_ids(&self) -> Vec<&str> {
        self.violations.iter().map(|f| f.id.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestEngine {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A reported defect: one rule id and the nodes it failed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: String,

    /// `null` for passes and inapplicable rules in axe output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help_url: String,

    #[serde(default)]
    pub nodes: Vec<NodeMatch>,
}

impl Finding {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            impact: None,
            description: String::new(),
            help: String::new(),
            help_url: String::new(),
            nodes: Vec::new(),
        }
    }

    pub fn with_impact(mut self, impact: Impact) -> Self {
        self.impact = Some(impact);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_help_url(mut self, url: impl Into<String>) -> Self {
        self.help_url = url.into();
        self
    }

    /// Append a node match with a single CSS target.
    pub fn with_target(mut self, selector: impl Into<String>) -> Self {
        self.nodes.push(NodeMatch::css(selector));
        self
    }

    pub fn with_node(mut self, node: NodeMatch) -> Self {
        self.nodes.push(node);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Minor,
    Moderate,
    Serious,
    Critical,
}

impl Impact {
    pub fn as_str(self) -> &'static str {
        match self {
            Impact::Minor => "minor",
            Impact::Moderate => "moderate",
            Impact::Serious => "serious",
            Impact::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failing node of a finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMatch {
    #[serde(rename = "target", default)]
    pub targets: Vec<Selector>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_summary: Option<String>,

    /// Markup snippet of the node at scan time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
}

impl NodeMatch {
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            targets: vec![Selector::Css(selector.into())],
            failure_summary: None,
            html: None,
            impact: None,
        }
    }
}

/// A node target.
///
/// axe emits a plain CSS selector for nodes in the top-level document and an array of selectors
/// for nodes reached through frames or shadow roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selector {
    Css(String),
    Path(Vec<String>),
}

impl Selector {
    /// The selector to run against a single document, if there is one.
    pub fn as_css(&self) -> Option<&str> {
        match self {
            Selector::Css(s) => Some(s.as_str()),
            Selector::Path(parts) if parts.len() == 1 => Some(parts[0].as_str()),
            Selector::Path(_) => None,
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Css(s) => f.write_str(s),
            Selector::Path(parts) => f.write_str(&parts.join(" >>> ")),
        }
    }
}
