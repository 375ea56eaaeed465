//! Project entries from the Projects section.

use super::scan::{scan_entries, EntryRules};
use super::skills::SkillMatcher;
use super::{is_bullet_line, strip_bullet, ExtractionInput, FieldExtractor};
use crate::model::{ProjectEntry, SectionKind};

const MAX_TITLE_LINE: usize = 80;

/// Short, non-bullet lines open a project; everything else is description.
#[derive(Debug, Clone)]
pub struct ProjectExtractor {
    skills: SkillMatcher,
}

impl ProjectExtractor {
    pub fn new(skills: SkillMatcher) -> Self {
        Self { skills }
    }

    fn add_technologies(&self, entry: &mut ProjectEntry, text: &str) {
        for skill in self.skills.find(text) {
            if !entry.technologies.contains(&skill) {
                entry.technologies.push(skill);
            }
        }
    }
}

fn is_title_line(line: &str) -> bool {
    !line.is_empty()
        && !is_bullet_line(line)
        && line.chars().count() <= MAX_TITLE_LINE
        && !line.ends_with('.')
}

/// `"Name | stack"`, `"Name - stack"` or `"Name: stack"`.
fn split_title(line: &str) -> (&str, &str) {
    [" | ", " - ", ":"]
        .iter()
        .filter_map(|sep| line.find(sep).map(|pos| (pos, sep.len())))
        .min()
        .map(|(pos, len)| (line[..pos].trim(), line[pos + len..].trim()))
        .unwrap_or((line, ""))
}

fn append_line(description: &mut String, line: &str) {
    if !description.is_empty() {
        description.push('\n');
    }
    description.push_str(line);
}

impl EntryRules for ProjectExtractor {
    type Entry = ProjectEntry;

    fn start(&self, line: &str) -> Option<ProjectEntry> {
        let line = line.trim();
        if !is_title_line(line) {
            return None;
        }
        let (name, rest) = split_title(line);
        if name.is_empty() {
            return None;
        }
        let mut entry = ProjectEntry {
            name: name.to_string(),
            description: rest.to_string(),
            technologies: Vec::new(),
        };
        self.add_technologies(&mut entry, line);
        Some(entry)
    }

    fn absorb(&self, entry: &mut ProjectEntry, line: &str) {
        let line = strip_bullet(line);
        if line.is_empty() {
            return;
        }
        append_line(&mut entry.description, line);
        self.add_technologies(entry, line);
    }
}

impl FieldExtractor for ProjectExtractor {
    type Output = Vec<ProjectEntry>;

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<Vec<ProjectEntry>> {
        let entries = scan_entries(self, SectionKind::Projects, input.segmentation, false);
        (!entries.is_empty()).then_some(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Dictionaries;
    use crate::model::StructuredText;
    use crate::parser::SectionSegmenter;

    fn projects_of(text: &str) -> Option<Vec<ProjectEntry>> {
        let dicts = Dictionaries::default();
        let text = StructuredText::from_plain(text);
        let seg = SectionSegmenter::new(&dicts).segment(&text);
        ProjectExtractor::new(SkillMatcher::new(&dicts)).extract(&ExtractionInput::new(&seg, &[]))
    }

    #[test]
    fn test_entries_with_technologies() {
        let projects = projects_of(
            "Projects\nResume Parser | Rust, regex heuristics\n• Parses PDF and DOCX resumes with Rust.\nChat App - React, Node.js\nReal-time messaging with Redis pub/sub.\nSkills\nDocker",
        )
        .unwrap();
        assert_eq!(projects.len(), 2);

        assert_eq!(projects[0].name, "Resume Parser");
        assert_eq!(
            projects[0].description,
            "Rust, regex heuristics\nParses PDF and DOCX resumes with Rust."
        );
        assert_eq!(projects[0].technologies, vec!["Rust"]);

        assert_eq!(projects[1].name, "Chat App");
        assert_eq!(projects[1].technologies, vec!["React", "Node.js", "Redis"]);
    }

    #[test]
    fn test_plain_title() {
        let projects =
            projects_of("Projects\nInventory Tracker\nTracks stock levels across warehouses.").unwrap();
        assert_eq!(
            projects,
            vec![ProjectEntry {
                name: "Inventory Tracker".into(),
                description: "Tracks stock levels across warehouses.".into(),
                technologies: vec![],
            }]
        );
    }

    #[test]
    fn test_requires_projects_section() {
        assert_eq!(projects_of("Jane Doe\nInventory Tracker"), None);
    }

    #[test]
    fn test_split_title() {
        assert_eq!(split_title("Site: Astro - blog"), ("Site", "Astro - blog"));
        assert_eq!(split_title("Plain"), ("Plain", ""));
    }
}
