use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// One quest, miniquest or minigame extracted from its wiki page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestRecord {
    pub id: String,
    pub name: String,
    #[serde(default = "default_members")]
    pub members: bool,
    #[serde(rename = "type")]
    pub quest_type: Option<QuestType>,
    pub difficulty: Option<String>,
    pub length: Option<String>,
    pub series: Option<Vec<String>>,
    pub description: Option<String>,
    pub start_point: Option<String>,
    pub image: Option<String>,
    pub wiki_url: String,
    pub quick_guide_url: Option<String>,
    pub developer: Option<String>,
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<QuestRequirements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_requirements: Option<QuestRequirements>,
    pub rewards: Option<String>,
}

fn default_members() -> bool {
    true
}

/// Normal quests carry no type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestType {
    Miniquest,
    Minigame,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestRequirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quest_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<SkillRequirement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemRequirement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quests: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub misc: Vec<String>,
}

impl QuestRequirements {
    pub fn is_empty(&self) -> bool {
        self.quest_points.is_none()
            && self.skills.is_empty()
            && self.items.is_empty()
            && self.quests.is_empty()
            && self.misc.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub name: String,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequirement {
    pub name: String,
    pub quantity: String,
}

impl QuestRecord {
    /// Plain mapping form of the record.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_value(v: Value) -> Result<Self> {
        Ok(serde_json::from_value(v)?)
    }

    /// Serialize to `w`, indented by four spaces when `pretty` is set.
    pub fn write_json<W: Write>(&self, mut w: W, pretty: bool) -> Result<()> {
        if pretty {
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut w, formatter);
            self.serialize(&mut ser)?;
        } else {
            serde_json::to_writer(&mut w, self)?;
        }
        w.flush()?;
        Ok(())
    }

    /// Write the record to `<dir>/<id>.json` and return that path.
    pub fn export_json(&self, dir: &Path, pretty: bool) -> Result<PathBuf> {
        let path = dir.join(format!("{}.json", self.id));
        let f = File::create(&path)?;
        self.write_json(BufWriter::new(f), pretty)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> QuestRecord {
        QuestRecord {
            id: "Cook%27s_Assistant".into(),
            name: "Cook's Assistant".into(),
            members: false,
            quest_type: None,
            difficulty: Some("Novice".into()),
            length: Some("Very Short".into()),
            series: None,
            description: None,
            start_point: None,
            image: None,
            wiki_url: "https://oldschool.runescape.wiki/w/Cook%27s_Assistant".into(),
            quick_guide_url: None,
            developer: None,
            release_date: NaiveDate::from_ymd_opt(2001, 1, 4),
            requirements: None,
            recommended_requirements: None,
            rewards: None,
        }
    }

    #[test]
    fn mapping_form_omits_missing_requirements() {
        let v = sample().to_value().expect("to value");
        let obj = v.as_object().expect("object");
        assert!(!obj.contains_key("requirements"));
        assert!(!obj.contains_key("recommended_requirements"));
        assert_eq!(obj["release_date"], json!("2001-01-04"));
        assert_eq!(obj["type"], Value::Null);
    }

    #[test]
    fn mapping_round_trip_with_requirements() {
        let mut record = sample();
        record.quest_type = Some(QuestType::Miniquest);
        record.requirements = Some(QuestRequirements {
            quest_points: Some(12),
            skills: vec![SkillRequirement {
                name: "Cooking".into(),
                level: 10,
            }],
            ..Default::default()
        });

        let v = record.to_value().expect("to value");
        assert_eq!(v["type"], json!("Miniquest"));
        assert!(v["requirements"].get("quests").is_none());
        assert_eq!(QuestRecord::from_value(v).expect("from value"), record);
    }

    #[test]
    fn members_defaults_to_true() {
        let v = json!({
            "id": "X",
            "name": "X",
            "wiki_url": "https://oldschool.runescape.wiki/w/X"
        });
        let record = QuestRecord::from_value(v).expect("from value");
        assert!(record.members);
        assert_eq!(record.requirements, None);
    }

    #[test]
    fn pretty_output_uses_four_spaces() {
        let mut buf = Vec::new();
        sample().write_json(&mut buf, true).expect("write");
        let s = String::from_utf8(buf).expect("utf8");
        assert!(s.starts_with("{\n    \"id\": \"Cook%27s_Assistant\""));

        let mut compact = Vec::new();
        sample().write_json(&mut compact, false).expect("write");
        assert!(!compact.contains(&b'\n'));
    }
}
