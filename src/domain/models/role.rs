//! Crew roles and the fixed routing table between them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four fixed crew members.
///
/// The set is closed: roles are not registered at runtime, and every role
/// shares the same invocation contract. They differ only in prompt text and
/// tool set, which live in the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleName {
    /// Writes slogans, taglines and campaign copy
    ContentWriter,
    /// Proposes visual themes, color schemes and layouts
    GraphicDesigner,
    /// Brings market data, demographics and metrics (has web search)
    DataAnalyst,
    /// Aligns everything with the brand and finalizes the message
    BrandManager,
}

impl RoleName {
    /// Every role, in routing order starting from the initial role.
    pub const ALL: [Self; 4] = [
        Self::ContentWriter,
        Self::GraphicDesigner,
        Self::DataAnalyst,
        Self::BrandManager,
    ];

    /// Role that opens every run.
    pub const INITIAL: Self = Self::ContentWriter;

    /// Routing table: the role that speaks next when no final answer was given.
    ///
    /// ContentWriter -> GraphicDesigner -> DataAnalyst -> BrandManager -> ContentWriter.
    pub const fn successor(self) -> Self {
        match self {
            Self::ContentWriter => Self::GraphicDesigner,
            Self::GraphicDesigner => Self::DataAnalyst,
            Self::DataAnalyst => Self::BrandManager,
            Self::BrandManager => Self::ContentWriter,
        }
    }

    /// Name used to label this role's messages in the transcript.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ContentWriter => "ContentWriter",
            Self::GraphicDesigner => "GraphicDesigner",
            Self::DataAnalyst => "DataAnalyst",
            Self::BrandManager => "BrandManager",
        }
    }

    /// Kebab-case identifier used in config, logs and the HTTP API.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContentWriter => "content-writer",
            Self::GraphicDesigner => "graphic-designer",
            Self::DataAnalyst => "data-analyst",
            Self::BrandManager => "brand-manager",
        }
    }

    /// Parse either the kebab-case identifier or the display name.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "contentwriter" => Some(Self::ContentWriter),
            "graphicdesigner" => Some(Self::GraphicDesigner),
            "dataanalyst" => Some(Self::DataAnalyst),
            "brandmanager" => Some(Self::BrandManager),
            _ => None,
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
