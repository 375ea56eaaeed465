//! Section segmentation through the public API.

use cvparse::{parse_text, ParsedResume, SectionKind};

const RESUME: &str = "Jane Doe\n\
                      jane.doe@example.com | +91 98765 43210\n\
                      \n\
                      Professional Experience\n\
                      Software Engineer at Acme Corp\n\
                      Jan 2019 - Present\n\
                      Education\n\
                      B.Tech in Computer Science, IIT Bombay, 2018\n\
                      Technical Skills\n\
                      Rust, Python, Docker\n\
                      Projects\n\
                      Resume Parser | Rust, Regex\n\
                      Certifications\n\
                      AWS Certified Solutions Architect";

fn assert_tiled(parsed: &ParsedResume) {
    for pair in parsed.sections.windows(2) {
        assert!(pair[0].start_offset < pair[1].start_offset);
        assert_eq!(pair[0].end_offset, pair[1].start_offset);
    }
    for section in &parsed.sections {
        assert!(section.start_offset <= section.content_start);
        assert!(section.content_start <= section.end_offset);
    }
    if let Some(last) = parsed.sections.last() {
        assert_eq!(last.end_offset, parsed.text.len());
    }
}

#[test]
fn test_sections_in_document_order() {
    let parsed = parse_text(RESUME);
    let kinds: Vec<SectionKind> = parsed.sections.iter().map(|s| s.name).collect();
    assert_eq!(
        kinds,
        vec![
            SectionKind::Experience,
            SectionKind::Education,
            SectionKind::Skills,
            SectionKind::Projects,
            SectionKind::Certifications,
        ]
    );
    assert_tiled(&parsed);
}

#[test]
fn test_section_content_excludes_header() {
    let parsed = parse_text(RESUME);
    let skills = parsed
        .sections
        .iter()
        .find(|s| s.name == SectionKind::Skills)
        .unwrap();
    assert_eq!(skills.header, "Technical Skills");
    assert_eq!(parsed.section_text(skills).trim(), "Rust, Python, Docker");
}

#[test]
fn test_header_lookalikes_are_ignored() {
    // Too long, ends with a period, or too many words.
    let parsed = parse_text(
        "Jane Doe\n\
         I have broad experience in distributed systems and teams\n\
         Experience.\n\
         My education and my skills\n",
    );
    assert!(parsed.sections.is_empty());
}

#[test]
fn test_no_headers_falls_back_to_whole_text() {
    let parsed = parse_text(
        "Jane Doe\njane.doe@example.com\nMBA from IIM Ahmedabad, 2015\nKnows Python and SQL",
    );
    assert!(parsed.sections.is_empty());
    assert_eq!(parsed.profile.skills, vec!["Python", "SQL"]);
    assert_eq!(parsed.profile.education.len(), 1);
    assert_eq!(parsed.profile.education[0].graduation_year, Some(2015));
}

#[test]
fn test_full_profile_from_sections() {
    let profile = parse_text(RESUME).profile;

    assert_eq!(profile.contact.phone.as_deref(), Some("+91 98765 43210"));
    assert_eq!(profile.skills, vec!["Rust", "Python", "Docker"]);

    assert_eq!(profile.education.len(), 1);
    assert_eq!(profile.education[0].graduation_year, Some(2018));

    assert_eq!(profile.work_experience.len(), 1);
    assert_eq!(profile.work_experience[0].position, "Software Engineer");
    assert_eq!(profile.work_experience[0].company, "Acme Corp");
    assert!(profile.work_experience[0].is_current);

    assert_eq!(profile.projects.len(), 1);
    assert_eq!(profile.projects[0].name, "Resume Parser");
    assert_eq!(profile.certifications, vec!["AWS Certified Solutions Architect"]);
}

#[test]
fn test_prose_location_words_are_not_labels() {
    let parsed = parse_text(
        "Jane Doe\njane@x.com\n\nExperience\nDeveloper at Acme\n\
         Worked to address performance bottlenecks daily\n\
         Rebuilt the location service for the mobile app",
    );
    assert_eq!(parsed.sections.len(), 1);
    assert_eq!(parsed.profile.contact.location, None);

    let parsed = parse_text("Jane Doe\nAddress: Kothrud, Pune\n\nExperience\nDeveloper at Acme");
    assert_eq!(parsed.profile.contact.location.as_deref(), Some("Kothrud, Pune"));
}
