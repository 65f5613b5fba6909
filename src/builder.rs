//! Assemble a [`QuestRecord`] from one wiki page.

use crate::markup::{self, Template, extract_template_value};
use crate::model::{QuestRecord, QuestRequirements, QuestType};
use crate::normalize::{
    extract_sanitized_value, get_difficulty, get_image, get_length, get_members, get_series,
};
use crate::requirements::{KnownTitles, parse_requirements};
use crate::text::{parse_release_date, url_slug, wiki_url};
use chrono::NaiveDate;
use log::{debug, warn};

/// Properties gathered while scanning a page. Every field stays `None` until
/// some template sets it; later templates overwrite earlier ones.
#[derive(Debug, Clone, Default)]
pub struct QuestProperties {
    pub members: Option<bool>,
    pub quest_type: Option<QuestType>,
    pub difficulty: Option<String>,
    pub length: Option<String>,
    pub series: Option<Vec<String>>,
    pub description: Option<String>,
    pub start_point: Option<String>,
    pub image: Option<String>,
    pub quick_guide_url: Option<String>,
    pub developer: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub requirements: Option<QuestRequirements>,
    pub recommended_requirements: Option<QuestRequirements>,
}

impl QuestProperties {
    fn parse_infobox(&mut self, template: &Template) {
        if let Some(members) = get_members(template) {
            self.members = Some(members);
        }
        if let Some(series) = get_series(template) {
            self.series = Some(series);
        }
        self.image = get_image(template);
        self.developer = extract_sanitized_value(template, "developer");
        self.release_date =
            parse_release_date(extract_sanitized_value(template, "release").as_deref());
    }

    fn parse_details(&mut self, template: &Template, known_titles: &KnownTitles) {
        self.difficulty = Some(get_difficulty(template));
        self.length = Some(get_length(template));
        self.description = extract_sanitized_value(template, "description");
        self.start_point = extract_sanitized_value(template, "start");

        let block = match extract_template_value(template, "requirements") {
            Some(b) if !b.is_empty() => b,
            _ => return,
        };
        let (required, recommended) = parse_requirements(&block, known_titles).into_requirements();
        self.requirements = required;
        self.recommended_requirements = recommended;
    }

    /// Freeze into a record, applying defaults for anything never set.
    pub fn into_record(self, id: String, name: String) -> QuestRecord {
        QuestRecord {
            wiki_url: wiki_url(&id),
            id,
            name,
            members: self.members.unwrap_or(true),
            quest_type: self.quest_type,
            difficulty: self.difficulty,
            length: self.length,
            series: self.series,
            description: self.description,
            start_point: self.start_point,
            image: self.image,
            quick_guide_url: self.quick_guide_url,
            developer: self.developer,
            release_date: self.release_date,
            requirements: self.requirements,
            recommended_requirements: self.recommended_requirements,
            rewards: None,
        }
    }
}

/// Record id for a page title: subpage slashes become dashes, then slugged.
pub fn quest_id(title: &str) -> String {
    url_slug(&title.replace('/', "-"))
}

/// Build the record for `title` from its raw wiki `text`.
///
/// Never fails: fields missing from the page fall back to the record
/// defaults, so a page without any templates still yields `id`, `name` and
/// `wiki_url`.
pub fn build(title: &str, text: &str, known_titles: &KnownTitles) -> QuestRecord {
    debug!("building quest: {title}");

    let id = quest_id(title);
    let mut props = QuestProperties::default();

    let templates = markup::templates(text);
    if templates.is_empty() {
        warn!("no templates found on page {title}");
    }

    for template in &templates {
        if template.name_contains("infobox quest") {
            debug!("parsing infobox for {title}");
            props.parse_infobox(template);
        }
        if template.name_contains("quest details") {
            debug!("parsing quest details for {title}");
            props.parse_details(template, known_titles);
        }
        if template.name_contains("quick guide") {
            props.quick_guide_url = Some(wiki_url(&format!("{id}/Quick_guide")));
        }
        if template.name_contains("miniquests") {
            props.quest_type = Some(QuestType::Miniquest);
        }
        if template.name_contains("minigames") {
            props.quest_type = Some(QuestType::Minigame);
        }
    }

    props.into_record(id, title.to_string())
}
