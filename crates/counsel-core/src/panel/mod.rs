//! The advisory panel: fixed role labels, prompt composition, and positional
//! attribution of a single completion to the panel roles.

pub mod prompts;

pub use prompts::{compose_messages, PANEL_SYSTEM_PROMPT};

use serde::{Deserialize, Serialize};

/// The fixed advisory panel, in presentation order. Never mutated at runtime.
pub const TEAM_MEMBERS: [&str; 5] = ["판사", "검사", "변호사 1", "변호사 2 (시니어)", "법학 교수"];

/// Delimiter separating per-role sections in the model output.
pub const SECTION_DELIMITER: &str = "\n\n";

/// One slice of the final response positionally attributed to one panel role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSection {
    pub role: String,
    pub text: String,
}

/// Splits a finished response into per-role sections.
///
/// Candidate sections come from splitting on the blank-line delimiter and are
/// paired positionally with [`TEAM_MEMBERS`]; the result is truncated to the
/// shorter of the two sequences. Consecutive delimiters produce empty
/// sections, which keep their role slot. This is a best-effort heuristic:
/// nothing validates that the model actually wrote one section per role.
pub fn partition(full_text: &str) -> Vec<RoleSection> {
    TEAM_MEMBERS
        .iter()
        .zip(full_text.split(SECTION_DELIMITER))
        .map(|(role, text)| RoleSection {
            role: role.to_string(),
            text: text.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_is_fixed() {
        assert_eq!(TEAM_MEMBERS.len(), 5);
        assert_eq!(TEAM_MEMBERS[0], "판사");
        assert_eq!(TEAM_MEMBERS[4], "법학 교수");
    }

    #[test]
    fn test_partition_pairs_positionally() {
        let sections = partition("A\n\nB\n\nC");
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].role, TEAM_MEMBERS[0]);
        assert_eq!(sections[0].text, "A");
        assert_eq!(sections[1].text, "B");
        assert_eq!(sections[2].text, "C");
    }

    #[test]
    fn test_partition_empty_text_yields_one_empty_section() {
        // Splitting empty text yields one empty segment, not zero.
        let sections = partition("");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].role, "판사");
        assert_eq!(sections[0].text, "");
    }

    #[test]
    fn test_partition_truncates_excess_sections() {
        let sections = partition("a\n\nb\n\nc\n\nd\n\ne\n\nf\n\ng");
        assert_eq!(sections.len(), 5);
        assert_eq!(sections[4].role, "법학 교수");
        assert_eq!(sections[4].text, "e");
    }

    #[test]
    fn test_partition_keeps_empty_sections() {
        let sections = partition("a\n\n\n\nb");
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[1].text, "");
        assert_eq!(sections[2].text, "b");
    }
}
