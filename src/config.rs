//! Keyword dictionaries driving the heuristics.
//!
//! Every list the segmenter, extractors and validator match against lives
//! here, so a deployment can tune them (or a test can shrink them) without
//! touching the matching code. The `Default` impl carries the built-in lists.
//!
//! ```
//! use cvparse::config::Dictionaries;
//!
//! let dicts = Dictionaries::from_json_str(r#"{ "cities": ["Lisbon"] }"#).unwrap();
//! assert_eq!(dicts.cities, vec!["Lisbon".to_string()]);
//! // Lists that were not given keep their defaults.
//! assert!(!dicts.skills.is_empty());
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{ExperienceLevel, SectionKind};

/// A degree regex and the canonical label it produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreePattern {
    pub label: String,
    pub pattern: String,
}

/// A named group of skills; the spelling here is the canonical output form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<String>,
}

/// Position keywords implying a seniority level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelKeywords {
    pub level: ExperienceLevel,
    pub keywords: Vec<String>,
}

/// Injectable configuration data for the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dictionaries {
    /// Header keywords per section family.
    pub section_keywords: BTreeMap<SectionKind, Vec<String>>,
    /// Degree patterns, highest priority first.
    pub degrees: Vec<DegreePattern>,
    pub skills: Vec<SkillCategory>,
    /// Known-city gazetteer for the last-resort location match.
    pub cities: Vec<String>,
    /// Field labels that introduce a location when followed by `:` or `-`.
    pub location_labels: Vec<String>,
    /// Phrases that introduce a location directly ("based in").
    pub location_phrases: Vec<String>,
    /// Words that disqualify a line from being the candidate's name.
    pub name_boilerplate: Vec<String>,
    /// Honorifics that disqualify a line from being the candidate's name.
    pub name_title_prefixes: Vec<String>,
    pub institution_keywords: Vec<String>,
    pub certification_keywords: Vec<String>,
    /// Words whose absence costs confidence.
    pub contact_keywords: Vec<String>,
    /// Seniority keywords, highest priority first.
    pub experience_levels: Vec<LevelKeywords>,
}

impl Dictionaries {
    /// Parse from JSON; missing keys fall back to the built-in lists.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(format!("dictionaries: {}", e)))
    }

    /// Load from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        Self::from_json_str(&json)
    }

    /// Header keywords for one section family.
    pub fn keywords_for(&self, kind: SectionKind) -> &[String] {
        self.section_keywords
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every canonical skill name, in dictionary order.
    pub fn all_skills(&self) -> impl Iterator<Item = &str> {
        self.skills
            .iter()
            .flat_map(|c| c.skills.iter())
            .map(String::as_str)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Dictionaries {
    fn default() -> Self {
        let mut section_keywords = BTreeMap::new();
        section_keywords.insert(
            SectionKind::Education,
            strings(&["education", "academic", "qualification"]),
        );
        section_keywords.insert(
            SectionKind::Experience,
            strings(&["experience", "work", "employment", "career", "professional"]),
        );
        section_keywords.insert(
            SectionKind::Skills,
            strings(&["skill", "technologies", "competencies", "expertise", "proficiencies"]),
        );
        section_keywords.insert(SectionKind::Projects, strings(&["project", "portfolio"]));
        section_keywords.insert(
            SectionKind::Certifications,
            strings(&["certification", "certificate", "license", "accreditation"]),
        );

        let degrees = [
            ("Bachelor's", r"(?i)\bbachelor(?:'s|s)?\b"),
            ("Master's", r"(?i)\bmaster(?:'s|s)?\b"),
            ("B.Tech", r"(?i)\bb\.?\s?tech\b"),
            ("M.Tech", r"(?i)\bm\.?\s?tech\b"),
            ("B.Sc", r"(?i)\bb\.?\s?sc\b"),
            ("M.Sc", r"(?i)\bm\.?\s?sc\b"),
            ("MBA", r"(?i)\bm\.?\s?b\.?\s?a\b"),
            ("PhD", r"(?i)\bph\.?\s?d\b"),
            ("Diploma", r"(?i)\bdiploma\b"),
        ]
        .iter()
        .map(|(label, pattern)| DegreePattern {
            label: label.to_string(),
            pattern: pattern.to_string(),
        })
        .collect();

        let skills = [
            (
                "languages",
                &[
                    "JavaScript", "TypeScript", "Python", "Java", "C++", "C#", "Golang", "Rust",
                    "Ruby", "PHP", "Swift", "Kotlin", "Scala", "SQL", "HTML", "CSS", "Dart",
                    "Perl", "MATLAB", "Bash",
                ][..],
            ),
            (
                "frameworks",
                &[
                    "React", "Angular", "Vue.js", "Next.js", "Node.js", "Express.js", "Django",
                    "Flask", "FastAPI", "Spring Boot", "Ruby on Rails", "Laravel", "ASP.NET",
                    ".NET", "jQuery", "Bootstrap", "Tailwind CSS", "Redux", "GraphQL",
                ][..],
            ),
            (
                "databases",
                &[
                    "MySQL", "PostgreSQL", "MongoDB", "Redis", "SQLite", "Oracle", "Cassandra",
                    "DynamoDB", "Elasticsearch", "Firebase", "SQL Server",
                ][..],
            ),
            (
                "cloud",
                &[
                    "AWS", "Azure", "Google Cloud", "GCP", "Docker", "Kubernetes", "Jenkins",
                    "Terraform", "Ansible", "Git", "GitHub Actions", "CI/CD", "Linux", "Nginx",
                ][..],
            ),
            (
                "mobile",
                &["Android", "iOS", "React Native", "Flutter", "Xamarin"][..],
            ),
            (
                "data",
                &[
                    "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch", "Pandas",
                    "NumPy", "Scikit-learn", "Tableau", "Power BI", "Microsoft Excel",
                    "Data Analysis", "Apache Spark", "Hadoop",
                ][..],
            ),
            (
                "design",
                &["Figma", "Adobe XD", "Photoshop", "Illustrator", "Sketch", "UI/UX"][..],
            ),
            (
                "soft",
                &[
                    "Communication", "Leadership", "Teamwork", "Problem Solving",
                    "Time Management", "Project Management", "Agile", "Scrum",
                ][..],
            ),
        ]
        .iter()
        .map(|(category, skills)| SkillCategory {
            category: category.to_string(),
            skills: strings(skills),
        })
        .collect();

        let cities = strings(&[
            "Bangalore", "Bengaluru", "Mumbai", "New Delhi", "Delhi", "Hyderabad", "Chennai",
            "Pune", "Kolkata", "Ahmedabad", "Noida", "Gurgaon", "Gurugram", "Jaipur", "Kochi",
            "Chandigarh", "Indore", "New York", "San Francisco", "Seattle", "Austin", "Boston",
            "Chicago", "Los Angeles", "London", "Berlin", "Toronto", "Vancouver", "Sydney",
            "Melbourne", "Singapore", "Dubai", "Paris", "Amsterdam", "Dublin",
        ]);

        let experience_levels = vec![
            LevelKeywords {
                level: ExperienceLevel::Executive,
                keywords: strings(&[
                    "chief", "director", "vp", "vice president", "head of", "cto", "ceo", "cfo",
                ]),
            },
            LevelKeywords {
                level: ExperienceLevel::Lead,
                keywords: strings(&["lead", "principal", "staff", "architect", "manager"]),
            },
            LevelKeywords {
                level: ExperienceLevel::Senior,
                keywords: strings(&["senior", "sr"]),
            },
            LevelKeywords {
                level: ExperienceLevel::Junior,
                keywords: strings(&["junior", "jr", "associate"]),
            },
            LevelKeywords {
                level: ExperienceLevel::Entry,
                keywords: strings(&["intern", "internship", "trainee", "apprentice"]),
            },
        ];

        Self {
            section_keywords,
            degrees,
            skills,
            cities,
            location_labels: strings(&["current location", "location", "address", "city"]),
            location_phrases: strings(&["based in", "residing in", "lives in"]),
            name_boilerplate: strings(&[
                "resume", "curriculum", "vitae", "cv", "profile", "objective", "summary",
                "contact", "address", "phone", "email", "mobile", "experience", "education",
                "skills",
            ]),
            name_title_prefixes: strings(&["mr", "mrs", "ms", "miss", "dr", "prof"]),
            institution_keywords: strings(&["university", "college", "institute", "school", "academy"]),
            certification_keywords: strings(&["certified", "certification", "certificate"]),
            contact_keywords: strings(&["email", "phone", "contact"]),
            experience_levels,
        }
    }
}
