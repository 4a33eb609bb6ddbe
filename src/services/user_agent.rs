//! User agent parsing for visit records.

use crate::models::AgentSummary;
use woothee::parser::Parser;

// Placeholder woothee uses for fields it cannot determine
const WOOTHEE_UNKNOWN: &str = "UNKNOWN";

/// Parse a raw user agent into browser and platform details.
///
/// Returns `None` when the parser recognises nothing useful.
pub fn summarize(user_agent: &str) -> Option<AgentSummary> {
    let user_agent = user_agent.trim();
    if user_agent.is_empty() {
        return None;
    }

    let result = Parser::new().parse(user_agent)?;
    if result.name == WOOTHEE_UNKNOWN {
        return None;
    }

    let known = |value: &str| {
        if value == WOOTHEE_UNKNOWN {
            String::new()
        } else {
            value.to_string()
        }
    };

    Some(AgentSummary {
        browser: result.name.to_string(),
        browser_version: known(result.version),
        os: result.os.to_string(),
        category: result.category.to_string(),
    })
}
