//! Quest-specific field extractors built on top of the markup primitives.

use crate::markup::{Template, extract_template_value};
use crate::model::SkillRequirement;
use crate::text::{clean_display_string, url_slug, wiki_url};
use regex::Regex;
use std::sync::LazyLock;

pub const UNKNOWN_DIFFICULTY: &str = "Unknown Difficulty";
pub const UNKNOWN_LENGTH: &str = "Unknown Length";

/// Sub-quests of Recipe for Disaster, which the wiki links under many
/// shortened names.
pub const RFD_SUBQUESTS: &[&str] = &[
    "Freeing the Mountain Dwarf",
    "Freeing the Goblin generals",
    "Freeing Pirate Pete",
    "Freeing the Lumbridge Guide",
    "Freeing Evil Dave",
    "Freeing King Awowogei",
    "Freeing Sir Amik Varze",
    "Freeing Skrach Uglogwee",
    "Defeating the Culinaromancer",
];

static SERIES_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*|\s+and\s+").expect("valid regex"));

fn difficulty_label(code: &str) -> Option<&'static str> {
    match code {
        "1" => Some("Novice"),
        "2" => Some("Intermediate"),
        "3" => Some("Experienced"),
        _ => None,
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Template value with display markup removed; empty values count as missing.
pub fn extract_sanitized_value(template: &Template, key: &str) -> Option<String> {
    extract_template_value(template, key)
        .map(|v| clean_display_string(&v))
        .filter(|v| !v.is_empty())
}

pub fn get_difficulty(template: &Template) -> String {
    let difficulty = match extract_template_value(template, "difficulty") {
        Some(d) if !d.is_empty() => d,
        _ => return UNKNOWN_DIFFICULTY.to_string(),
    };

    if is_digits(&difficulty) {
        return match difficulty_label(&difficulty) {
            Some(label) => label.to_string(),
            None => format!("Unable to convert difficulty {difficulty}"),
        };
    }

    difficulty
}

pub fn get_length(template: &Template) -> String {
    let length = match extract_template_value(template, "length") {
        Some(l) if !l.is_empty() => l,
        _ => return UNKNOWN_LENGTH.to_string(),
    };

    // "Short - Medium" -> "Short"
    let length = match length.split_once('-') {
        Some((first, _)) => first.trim(),
        None => length.as_str(),
    };

    clean_display_string(length)
}

pub fn get_image(template: &Template) -> Option<String> {
    let image = extract_template_value(template, "image").filter(|i| !i.is_empty())?;
    let slug = url_slug(&image);
    let file = slug.split('|').next().unwrap_or_default();
    Some(wiki_url(file))
}

/// Only an explicit "no" or "false" marks a quest as free-to-play.
pub fn get_members(template: &Template) -> Option<bool> {
    let members = extract_template_value(template, "members")?;
    match members.to_lowercase().as_str() {
        "false" | "no" => Some(false),
        _ => None,
    }
}

/// Series names from e.g. `[[Quest series#Gnome|Gnome]], [[Elf (series)|Elf]]`.
pub fn get_series(template: &Template) -> Option<Vec<String>> {
    let series = extract_template_value(template, "series").filter(|s| !s.is_empty())?;
    if series.contains("None") {
        return None;
    }

    let cleaned = clean_display_string(&series);
    let names = SERIES_SEPARATOR
        .split(&cleaned)
        .map(|link| match link.split_once('|') {
            Some((_, alias)) => alias.trim(),
            None => link.trim(),
        })
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    Some(names)
}

/// Canonical quest name for a requirement line or link.
pub fn clean_quest_name(raw: &str) -> String {
    let mut name = raw;
    if !raw.contains("level") {
        if let Some(open) = raw.find("[[") {
            let close = raw[open..].find("]]").map_or(raw.len(), |i| open + i);
            name = &raw[open..close];
        }
    }

    let mut name = clean_display_string(name);

    if let Some((_, anchor)) = name.split_once('#') {
        name = anchor.split('#').next().unwrap_or_default().to_string();
    }

    let name = name.split('|').next().unwrap_or_default().trim().to_string();

    if name.is_empty() {
        return name;
    }

    let lower = name.to_lowercase();
    for subquest in RFD_SUBQUESTS {
        if subquest.to_lowercase().contains(&lower) {
            return format!("Recipe for Disaster/{subquest}");
        }
    }

    name
}

/// Skill name and level from a `{{SkillReq|...}}` style template.
///
/// Handles `{{SkillReq|Mining|30}}`, `{{SkillReq|Mining|30+}}` and the
/// level-outside-the-template forms `30 {{SkillReq|Mining}}` and
/// `Level 30 {{SkillReq|Mining}}`. Returns `None` when no plain integer level
/// can be recovered.
pub fn get_skill_requirement(template: &Template, raw_line: &str) -> Option<SkillRequirement> {
    let name = template.positional(0)?.trim().to_string();

    let level = match template.positional(1) {
        Some(level) => level.replace('+', "").trim().to_string(),
        None => {
            let line = raw_line.replace('*', "");
            let line = line.strip_prefix("Level ").unwrap_or(&line);
            let before = &line[..line.find('{')?];
            before.trim().to_string()
        }
    };

    if !is_digits(&level) {
        return None;
    }

    Some(SkillRequirement {
        name,
        level: level.parse().ok()?,
    })
}
