//! `roles`: show the crew, its routing table and tools.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::table::TableFormatter;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::RoleName;
use crate::services::prompt_builder::system_prompt_for;
use crate::services::role_agent::DATA_SEARCH_TOOL;

#[derive(Args, Debug)]
pub struct RolesArgs {
    /// Include each role's full system prompt
    #[arg(short, long)]
    pub prompts: bool,
}

/// One role as presented to the user
#[derive(Debug, Clone, Serialize)]
pub struct RoleInfo {
    pub name: String,
    pub id: String,
    pub successor: String,
    pub tools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

/// Every role in routing order, without prompts.
pub fn role_infos() -> Vec<RoleInfo> {
    RoleName::ALL
        .iter()
        .map(|role| RoleInfo {
            name: role.display_name().to_string(),
            id: role.as_str().to_string(),
            successor: role.successor().display_name().to_string(),
            tools: if *role == RoleName::DataAnalyst {
                vec![DATA_SEARCH_TOOL.to_string()]
            } else {
                Vec::new()
            },
            system_prompt: None,
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct RolesOutput {
    pub initial: String,
    pub roles: Vec<RoleInfo>,
}

impl CommandOutput for RolesOutput {
    fn to_human(&self) -> String {
        let mut out = TableFormatter::new().format_roles(&self.roles);
        out.push_str(&format!(
            "\n\nRuns start with {} and end when a message contains FINAL ANSWER.",
            self.initial
        ));

        for role in &self.roles {
            if let Some(prompt) = &role.system_prompt {
                out.push_str(&format!("\n\n{}\n{prompt}", console::style(&role.name).bold()));
            }
        }

        out
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: RolesArgs, json_mode: bool) -> Result<()> {
    let mut roles = role_infos();
    if args.prompts {
        for (info, role) in roles.iter_mut().zip(RoleName::ALL) {
            info.system_prompt = Some(system_prompt_for(role));
        }
    }

    output(
        &RolesOutput {
            initial: RoleName::INITIAL.display_name().to_string(),
            roles,
        },
        json_mode,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_infos_follow_cycle() {
        let roles = role_infos();
        assert_eq!(roles.len(), 4);
        assert_eq!(roles[0].name, "ContentWriter");
        assert_eq!(roles[3].successor, "ContentWriter");
        assert_eq!(roles[2].tools, vec!["DataSearch".to_string()]);
        assert!(roles[0].tools.is_empty());
    }

    #[test]
    fn test_json_omits_prompts_by_default() {
        let out = RolesOutput {
            initial: "ContentWriter".into(),
            roles: role_infos(),
        };
        let json = out.to_json();
        assert_eq!(json["roles"][1]["id"], "graphic-designer");
        assert!(json["roles"][1].get("system_prompt").is_none());
    }
}
