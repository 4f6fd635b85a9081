//! The legacy nested assurance-case schema.
//!
//! ```json
//! { "goals": [ { "context": [...],
//!                "strategies": [ { "property_claims": [ { "evidence": [...] } ] } ] } ] }
//! ```
//!
//! Ownership is fixed by the schema: a goal owns contexts and strategies, a
//! strategy owns property claims, and a property claim owns evidence.

use serde::Deserialize;

use crate::element::{ElementInfo, null_as_default};

/// A whole assurance case in the legacy schema.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyCase {
    #[serde(flatten)]
    info: ElementInfo,

    #[serde(default, deserialize_with = "null_as_default")]
    goals: Vec<Goal>,
}

impl LegacyCase {
    /// Creates a case from its goals.
    pub fn new(info: ElementInfo, goals: Vec<Goal>) -> Self {
        Self { info, goals }
    }

    pub fn info(&self) -> &ElementInfo {
        &self.info
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Returns the root goal, the first goal of the case.
    pub fn root_goal(&self) -> Option<&Goal> {
        self.goals.first()
    }
}

/// A top-level claim of the case.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Goal {
    #[serde(flatten)]
    info: ElementInfo,

    #[serde(default, deserialize_with = "null_as_default")]
    context: Vec<Context>,

    #[serde(default, deserialize_with = "null_as_default")]
    strategies: Vec<Strategy>,
}

impl Goal {
    pub fn new(info: ElementInfo) -> Self {
        Self {
            info,
            context: Vec::new(),
            strategies: Vec::new(),
        }
    }

    /// Appends a context entry (builder style).
    pub fn with_context(mut self, context: Context) -> Self {
        self.context.push(context);
        self
    }

    /// Appends a strategy (builder style).
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn info(&self) -> &ElementInfo {
        &self.info
    }

    pub fn context(&self) -> &[Context] {
        &self.context
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }
}

/// Background information attached to a goal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Context {
    #[serde(flatten)]
    info: ElementInfo,
}

impl Context {
    pub fn new(info: ElementInfo) -> Self {
        Self { info }
    }

    pub fn info(&self) -> &ElementInfo {
        &self.info
    }
}

/// A decomposition of a goal into property claims.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Strategy {
    #[serde(flatten)]
    info: ElementInfo,

    #[serde(default, deserialize_with = "null_as_default")]
    property_claims: Vec<PropertyClaim>,
}

impl Strategy {
    pub fn new(info: ElementInfo) -> Self {
        Self {
            info,
            property_claims: Vec::new(),
        }
    }

    /// Appends a property claim (builder style).
    pub fn with_claim(mut self, claim: PropertyClaim) -> Self {
        self.property_claims.push(claim);
        self
    }

    pub fn info(&self) -> &ElementInfo {
        &self.info
    }

    pub fn property_claims(&self) -> &[PropertyClaim] {
        &self.property_claims
    }
}

/// A claim about a property of the system, supported by evidence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyClaim {
    #[serde(flatten)]
    info: ElementInfo,

    #[serde(default, deserialize_with = "null_as_default")]
    evidence: Vec<Evidence>,
}

impl PropertyClaim {
    pub fn new(info: ElementInfo) -> Self {
        Self {
            info,
            evidence: Vec::new(),
        }
    }

    /// Appends an evidence item (builder style).
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence.push(evidence);
        self
    }

    pub fn info(&self) -> &ElementInfo {
        &self.info
    }

    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }
}

/// An artefact backing a property claim.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Evidence {
    #[serde(flatten)]
    info: ElementInfo,

    #[serde(default, alias = "URL")]
    url: Option<String>,
}

impl Evidence {
    pub fn new(info: ElementInfo) -> Self {
        Self { info, url: None }
    }

    pub fn info(&self) -> &ElementInfo {
        &self.info
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
