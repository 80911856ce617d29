//! The agent-command wire type consumed from the external decision server.
//!
//! One command is returned per `GetInstruction` request. Field names follow
//! the wire contract exactly; unused fields default so the server can omit
//! them (`Move` only needs `TargetName`, `Wait` only `ParamID`, and so on).

use serde::{Deserialize, Serialize};

/// The verb of an agent command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CommandType {
    /// Walk to the named facility's interaction point.
    Move,
    /// Transfer items from the current place into the carried inventory.
    Take,
    /// Transfer items from the carried inventory into the current place.
    Put,
    /// Interact with the current place (work, eat, or sleep by kind).
    Use,
    /// Do nothing for a number of simulated minutes.
    Wait,
}

/// A single instruction for one character, as decided by the external
/// decision server.
///
/// Transient value: dispatched once and never persisted. `param_id` is
/// overloaded by verb -- the item id for `Take`/`Put`, the recipe id for
/// `Use` at a production facility, and the minute count for `Wait`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCommand {
    /// The character this command is addressed to.
    #[serde(rename = "CharacterName")]
    pub character_name: String,
    /// The verb.
    #[serde(rename = "CommandType")]
    pub command_type: CommandType,
    /// Target facility name (used by `Move`).
    #[serde(rename = "TargetName", default)]
    pub target_name: String,
    /// Verb-dependent numeric parameter.
    #[serde(rename = "ParamID", default)]
    pub param_id: u32,
    /// Item count (used by `Take`/`Put`).
    #[serde(rename = "Count", default)]
    pub count: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn full_command_round_trips() {
        let cmd = AgentCommand {
            character_name: String::from("Chef"),
            command_type: CommandType::Take,
            target_name: String::new(),
            param_id: 1002,
            count: 2,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: AgentCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn omitted_fields_default() {
        let cmd: AgentCommand = serde_json::from_str(
            r#"{"CharacterName": "Farmer", "CommandType": "Move",
                "TargetName": "CultivateChamber_1"}"#,
        )
        .unwrap();
        assert_eq!(cmd.command_type, CommandType::Move);
        assert_eq!(cmd.target_name, "CultivateChamber_1");
        assert_eq!(cmd.param_id, 0);
        assert_eq!(cmd.count, 0);
    }

    #[test]
    fn unknown_verb_is_a_parse_error() {
        let result: Result<AgentCommand, _> = serde_json::from_str(
            r#"{"CharacterName": "X", "CommandType": "Dance"}"#,
        );
        assert!(result.is_err());
    }
}
