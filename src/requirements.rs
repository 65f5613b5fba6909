//! Line-oriented classifier for the free-text `requirements` block of a
//! quest details template.
//!
//! Each line becomes a prerequisite quest, a skill level, a quest point
//! threshold or a miscellaneous note. Two flags carry state between lines:
//! whether we are inside a `**` bullet list under a "Quests:" heading, and
//! whether a "Recommended:" heading has been seen. The second never resets.

use crate::markup::{self, Template};
use crate::model::{QuestRequirements, SkillRequirement};
use crate::normalize::{clean_quest_name, get_skill_requirement};
use crate::text::clean_display_string;
use log::debug;
use std::collections::HashSet;

/// Template names that mark a skill level requirement.
const SKILL_TEMPLATES: &[&str] = &["skill clickpic", "skillreq"];

/// Phrases that introduce a single linked prerequisite quest.
const COMPLETION_PHRASES: &[&str] = &["Completion of", "Completed"];

/// Titles of every page that is a quest, used to recognise quest lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownTitles(HashSet<String>);

impl KnownTitles {
    pub fn contains(&self, title: &str) -> bool {
        self.0.contains(title)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KnownTitles {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        KnownTitles(iter.into_iter().map(Into::into).collect())
    }
}

/// Everything pulled out of one requirements block, in line order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRequirements {
    pub quest_points: Option<u32>,
    pub required_quests: Vec<String>,
    pub recommended_quests: Vec<String>,
    pub required_skills: Vec<SkillRequirement>,
    pub recommended_skills: Vec<SkillRequirement>,
    pub misc: Vec<String>,
}

impl ParsedRequirements {
    /// Split into `(requirements, recommended_requirements)`. Either side is
    /// `None` when it would be empty; the recommended side only exists when
    /// a recommended quest or skill was found.
    pub fn into_requirements(self) -> (Option<QuestRequirements>, Option<QuestRequirements>) {
        let recommended = if self.recommended_quests.is_empty() && self.recommended_skills.is_empty() {
            None
        } else {
            Some(QuestRequirements {
                skills: self.recommended_skills,
                quests: self.recommended_quests,
                ..Default::default()
            })
        };

        let required = QuestRequirements {
            quest_points: self.quest_points,
            skills: self.required_skills,
            items: Vec::new(),
            quests: self.required_quests,
            misc: self.misc,
        };
        let required = (!required.is_empty()).then_some(required);

        (required, recommended)
    }
}

/// Classify every line of `block`.
pub fn parse_requirements(block: &str, known_titles: &KnownTitles) -> ParsedRequirements {
    let mut parser = RequirementsParser {
        known_titles,
        tracking_quest_sublist: false,
        in_recommended_section: false,
        parsed: ParsedRequirements::default(),
    };
    for line in block.lines() {
        parser.process_line(line);
    }
    parser.parsed
}

struct RequirementsParser<'a> {
    known_titles: &'a KnownTitles,
    tracking_quest_sublist: bool,
    in_recommended_section: bool,
    parsed: ParsedRequirements,
}

impl RequirementsParser<'_> {
    fn push_quest(&mut self, name: String) {
        if self.in_recommended_section {
            self.parsed.recommended_quests.push(name);
        } else {
            self.parsed.required_quests.push(name);
        }
    }

    fn push_skill(&mut self, skill: SkillRequirement) {
        if self.in_recommended_section {
            self.parsed.recommended_skills.push(skill);
        } else {
            self.parsed.required_skills.push(skill);
        }
    }

    fn process_line(&mut self, raw: &str) {
        let line = raw.trim();
        let lower = line.to_lowercase();
        let cleaned = clean_display_string(line);

        if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("none") {
            return;
        }

        let line_templates = markup::templates(line);

        if lower.contains("quest points") {
            match line_templates.first() {
                None => {
                    match parse_quest_points(&cleaned) {
                        Some(points) => self.parsed.quest_points = Some(points),
                        None => self.parsed.misc.push(cleaned),
                    }
                    return;
                }
                Some(template) => {
                    if let Some(req) = get_skill_requirement(template, line) {
                        self.parsed.quest_points = Some(req.level);
                        return;
                    }
                }
            }
        }

        if lower.contains("quests:") {
            self.tracking_quest_sublist = true;
            return;
        }

        let quest_name = clean_quest_name(line);
        if self.known_titles.contains(&quest_name) {
            self.push_quest(quest_name);
            return;
        }

        if COMPLETION_PHRASES.iter().any(|p| line.contains(p)) {
            if let Some(link) = first_link(line) {
                self.push_quest(clean_quest_name(link));
                return;
            }
        }

        if lower.contains("recommended:") {
            self.tracking_quest_sublist = false;
            self.in_recommended_section = true;
            return;
        }

        let is_sublist_bullet = self.tracking_quest_sublist && line.contains("**");
        if !is_sublist_bullet {
            if let Some(template) = line_templates.first().filter(|t| is_skill_template(t)) {
                self.tracking_quest_sublist = false;
                match get_skill_requirement(template, line) {
                    Some(skill) => self.push_skill(skill),
                    None => debug!("skipping skill line without a usable level: {line}"),
                }
                return;
            }
        }

        if self.tracking_quest_sublist {
            if !line.contains("**") {
                self.tracking_quest_sublist = false;
            } else if !lower.contains("kudos") {
                if !line_templates.is_empty() {
                    debug!("template in quest sublist bullet taken as a quest name: {line}");
                }
                self.push_quest(clean_quest_name(line));
                return;
            }
        }

        // notes such as "No boosts allowed:"
        if line.contains(':') {
            return;
        }

        debug!("unclassified requirement line: {line}");
        self.parsed.misc.push(cleaned);
    }
}

fn is_skill_template(template: &Template) -> bool {
    SKILL_TEMPLATES.iter().any(|name| template.name_contains(name))
}

/// The first `[[...]]` link in `line`, brackets included.
fn first_link(line: &str) -> Option<&str> {
    let open = line.find("[[")?;
    let close = line[open..].find("]]")? + open + 2;
    Some(&line[open..close])
}

/// Threshold from lines like "Quest points: 32" or "32 Quest points".
fn parse_quest_points(cleaned: &str) -> Option<u32> {
    let rest = cleaned.to_lowercase().replace("quest points", "");
    let rest = rest.trim_matches(|c: char| c.is_whitespace() || c == ':');
    if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}
