//! Batch side of the builder: load the title → wiki text dump, drop pages
//! that are not quests, build every record and write them out.

use crate::builder::build;
use crate::error::{BuildError, Result};
use crate::model::QuestRecord;
use crate::requirements::KnownTitles;
use log::{debug, info};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Title fragments of pages that share the quest category but are not quests.
pub const NON_QUEST_PATTERNS: &[&str] = &[
    "Quests/",
    "Miniquests",
    "/Quick guide",
    "Category:",
    "User:",
    "Quest series",
];

/// Raw wiki text keyed by page title, in title order.
pub type WikiPages = BTreeMap<String, String>;

pub fn load_wiki_text_from_reader<R: Read>(r: R) -> Result<WikiPages> {
    let v: Value = serde_json::from_reader(r)?;
    let obj = v
        .as_object()
        .ok_or_else(|| BuildError::InvalidFormat("root not an object".into()))?;

    let mut pages = WikiPages::new();
    for (title, text) in obj {
        let text = text.as_str().ok_or_else(|| {
            BuildError::InvalidFormat(format!("wiki text for {title} is not a string"))
        })?;
        pages.insert(title.clone(), text.to_string());
    }
    Ok(pages)
}

pub fn load_wiki_text(path: &Path) -> Result<WikiPages> {
    let f = File::open(path)?;
    load_wiki_text_from_reader(BufReader::new(f))
}

pub fn is_quest_title(title: &str) -> bool {
    let lower = title.to_lowercase();
    !NON_QUEST_PATTERNS
        .iter()
        .any(|p| lower.contains(&p.to_lowercase()))
}

pub fn quest_titles(pages: &WikiPages) -> KnownTitles {
    pages
        .keys()
        .filter(|title| is_quest_title(title))
        .map(String::as_str)
        .collect()
}

/// One record per quest page, in title order.
pub fn build_all(pages: &WikiPages) -> Vec<QuestRecord> {
    let known_titles = quest_titles(pages);
    info!(
        "building {} quests from {} pages",
        known_titles.len(),
        pages.len()
    );

    pages
        .iter()
        .filter(|(title, _)| {
            let keep = is_quest_title(title);
            if !keep {
                debug!("skipping non-quest page {title}");
            }
            keep
        })
        .map(|(title, text)| build(title, text, &known_titles))
        .collect()
}

/// Write each record to `<dir>/<id>.json`, creating `dir` if needed.
pub fn export_all(records: &[QuestRecord], dir: &Path, pretty: bool) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(records.len());
    for record in records {
        written.push(record.export_json(dir, pretty)?);
    }
    info!("wrote {} quest files to {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn excludes_non_quest_titles() {
        assert!(is_quest_title("Cook's Assistant"));
        assert!(is_quest_title("Recipe for Disaster/Freeing Evil Dave"));
        assert!(!is_quest_title("Quests/List"));
        assert!(!is_quest_title("Dragon Slayer II/Quick guide"));
        assert!(!is_quest_title("category:Quests"));
        assert!(!is_quest_title("User:Someone/Sandbox"));
        assert!(!is_quest_title("Elf quest series"));
        assert!(!is_quest_title("Miniquests"));
    }

    #[test]
    fn load_rejects_non_string_text() {
        let err = load_wiki_text_from_reader(Cursor::new(r#"{"A": 1}"#)).unwrap_err();
        assert!(matches!(err, BuildError::InvalidFormat(_)));

        let err = load_wiki_text_from_reader(Cursor::new("[]")).unwrap_err();
        assert!(matches!(err, BuildError::InvalidFormat(_)));

        let err = load_wiki_text_from_reader(Cursor::new("{")).unwrap_err();
        assert!(matches!(err, BuildError::Json(_)));
    }

    #[test]
    fn builds_only_quest_pages() {
        let pages = load_wiki_text_from_reader(Cursor::new(
            r#"{
                "Cook's Assistant": "{{Quest details|requirements=None}}",
                "Demon Slayer": "{{Quest details|requirements=*[[Cook's Assistant]]}}",
                "Quests/List": "",
                "Cook's Assistant/Quick guide": ""
            }"#,
        ))
        .expect("load");

        let known = quest_titles(&pages);
        assert_eq!(known.len(), 2);
        assert!(known.contains("Cook's Assistant"));

        let records = build_all(&pages);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Cook's Assistant", "Demon Slayer"]);

        let demon = &records[1];
        let reqs = demon.requirements.as_ref().expect("requirements");
        assert_eq!(reqs.quests, vec!["Cook's Assistant"]);
    }
}
