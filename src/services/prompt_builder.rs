//! System prompts for the crew.
//!
//! Every role shares one preamble that explains the collaboration and the
//! `FINAL ANSWER` convention, followed by that role's instructions.

use crate::domain::models::RoleName;
use crate::services::turn_router::TERMINATION_MARKER;

const PREAMBLE: &str = "You are a helpful AI assistant collaborating with other assistants. \
Use your expertise to advance the campaign design. \
If you or any colleague have the final campaign proposal, prefix your response with ";

/// Fixed instructions for each role.
pub const fn role_description(role: RoleName) -> &'static str {
    match role {
        RoleName::ContentWriter => {
            "You are the Content Writer. Generate creative campaign slogans, taglines, and copy \
for a new product launch."
        }
        RoleName::GraphicDesigner => {
            "You are the Graphic Designer. Propose visual themes, color schemes, and layout ideas \
for the campaign. If you disagree with a proposal (e.g., you prefer a minimalist look), state \
your reasoning."
        }
        RoleName::DataAnalyst => {
            "You are the Data Analyst. Provide market insights, target demographics, and \
performance metrics that can support campaign ideas. Offer data to validate or challenge \
creative proposals. You can use the DataSearch tool to find relevant data."
        }
        RoleName::BrandManager => {
            "You are the Brand Manager. Evaluate all inputs to ensure they align with the brand \
identity. If conflicts arise (e.g., neon versus minimalist aesthetics), resolve them and \
finalize the campaign message."
        }
    }
}

/// Shared preamble followed by `"\nRole instructions: "` and the description verbatim.
pub fn build_system_prompt(role_description: &str) -> String {
    format!("{PREAMBLE}{TERMINATION_MARKER} so the team stops.\nRole instructions: {role_description}")
}

/// System prompt for one of the built-in roles.
pub fn system_prompt_for(role: RoleName) -> String {
    build_system_prompt(role_description(role))
}
