//! Section parser for labelled model output.
//!
//! Grammar: a label (`SUBJECT`, `BODY`, `SOCIAL`, `CTA`, `BENEFITS`) at the start
//! of a line, optionally preceded by whitespace, markdown markers or list
//! numbering, followed by `:`. A section's value runs from its colon to the next
//! recognised label or end of text. Labels match case-insensitively; the first
//! occurrence of a label wins.

use regex::Regex;

use crate::generation::content::GeneratedContent;

const MAX_BENEFITS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Subject,
    Body,
    Social,
    Cta,
    Benefits,
}

impl Section {
    fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "SUBJECT" => Some(Section::Subject),
            "BODY" => Some(Section::Body),
            "SOCIAL" => Some(Section::Social),
            "CTA" => Some(Section::Cta),
            "BENEFITS" => Some(Section::Benefits),
            _ => None,
        }
    }
}

/// Raw section values; `None` means the label was absent or empty.
#[derive(Debug, Default, PartialEq)]
pub struct Sections {
    pub subject: Option<String>,
    pub body: Option<String>,
    pub social: Option<String>,
    pub cta: Option<String>,
    pub benefits: Option<Vec<String>>,
}

pub struct SectionParser {
    label: Regex,
}

impl SectionParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            label: Regex::new(
                r"(?mi)^[ \t]*(?:(?:[#*>\-]+|\d+[.)])[ \t]*)?\**(SUBJECT|BODY|SOCIAL|CTA|BENEFITS)\**[ \t]*:\**[ \t]*",
            )?,
        })
    }

    pub fn sections(&self, text: &str) -> Sections {
        let marks: Vec<(Section, usize, usize)> = self
            .label
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let section = Section::from_label(caps.get(1)?.as_str())?;
                Some((section, whole.start(), whole.end()))
            })
            .collect();

        let mut sections = Sections::default();
        for (i, (section, _, value_start)) in marks.iter().enumerate() {
            let value_end = marks.get(i + 1).map(|(_, start, _)| *start).unwrap_or(text.len());
            let value = text[*value_start..value_end].trim();
            if value.is_empty() {
                continue;
            }
            let slot = match section {
                Section::Subject => &mut sections.subject,
                Section::Body => &mut sections.body,
                Section::Social => &mut sections.social,
                Section::Cta => &mut sections.cta,
                Section::Benefits => {
                    if sections.benefits.is_none() {
                        sections.benefits = Some(split_benefits(value));
                    }
                    continue;
                }
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
        sections
    }

    /// Parses model output into content, substituting a default for each
    /// missing section. Length limits are not applied here.
    pub fn parse(&self, text: &str, course: &str, city: &str, brand: &str) -> GeneratedContent {
        let s = self.sections(text);
        GeneratedContent::new(
            s.subject.unwrap_or_else(|| {
                format!("{city} {course} Opportunity - Transform Your Career!")
            }),
            s.body.unwrap_or_else(|| {
                format!("Exciting {course} opportunities in {city}. Join {brand} today!")
            }),
            s.social.unwrap_or_else(|| {
                format!("🚀 {course} opportunities in {city}! #{}", brand.replace(' ', ""))
            }),
            s.cta.unwrap_or_else(|| "Enroll Now - Limited Seats!".to_string()),
            s.benefits.unwrap_or_else(|| {
                ["Career advancement", "Salary increase", "Industry recognition"]
                    .iter()
                    .map(|b| b.to_string())
                    .collect()
            }),
        )
    }
}

/// Splits on `|`, dropping blank items, keeping at most three. Short lists stay short.
fn split_benefits(value: &str) -> Vec<String> {
    value
        .split('|')
        .map(|b| b.trim().trim_start_matches(['-', '•', '*']).trim())
        .filter(|b| !b.is_empty())
        .take(MAX_BENEFITS)
        .map(str::to_string)
        .collect()
}
