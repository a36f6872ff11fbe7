//! Inquisitor entity - The protagonist's character sheet

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::types::Gender;
use crate::value_objects::Percentage;

/// The protagonist.
///
/// Titles and inventory are positional lists: duplicates are allowed and
/// deletion is by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquisitor {
    #[serde(rename = "圣裁官姓名")]
    pub name: String,
    #[serde(rename = "性别")]
    pub gender: Gender,
    #[serde(rename = "等级")]
    pub level: u32,
    #[serde(rename = "经验值")]
    pub experience: Percentage,
    /// Currency earned by purifying villains
    #[serde(rename = "善升点")]
    pub merit_points: u64,
    #[serde(rename = "身份")]
    pub identity: String,
    #[serde(rename = "称号")]
    pub titles: Vec<String>,
    #[serde(rename = "永久状态")]
    pub permanent_statuses: Vec<String>,
    #[serde(rename = "临时状态")]
    pub temporary_statuses: Vec<String>,
    #[serde(rename = "外貌")]
    pub appearance: String,
    #[serde(rename = "堕落值")]
    pub corruption: Percentage,
    #[serde(rename = "物品栏")]
    pub inventory: Vec<String>,
}

impl Inquisitor {
    /// Title at `index`, if any
    pub fn title(&self, index: usize) -> Option<&str> {
        self.titles.get(index).map(String::as_str)
    }

    /// Inventory item at `index`, if any
    pub fn item(&self, index: usize) -> Option<&str> {
        self.inventory.get(index).map(String::as_str)
    }

    /// Copy of the titles with `index` removed.
    pub fn titles_without(&self, index: usize) -> Result<Vec<String>, DomainError> {
        remove_at(&self.titles, index, "title")
    }

    /// Copy of the inventory with `index` removed.
    pub fn inventory_without(&self, index: usize) -> Result<Vec<String>, DomainError> {
        remove_at(&self.inventory, index, "inventory item")
    }
}

impl Default for Inquisitor {
    fn default() -> Self {
        crate::defaults::seed_inquisitor()
    }
}

fn remove_at(list: &[String], index: usize, what: &str) -> Result<Vec<String>, DomainError> {
    if index >= list.len() {
        return Err(DomainError::validation(format!(
            "{} index {} out of range (len {})",
            what,
            index,
            list.len()
        )));
    }
    let mut next = list.to_vec();
    next.remove(index);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_titles(titles: &[&str]) -> Inquisitor {
        Inquisitor {
            titles: titles.iter().map(|t| t.to_string()).collect(),
            ..Inquisitor::default()
        }
    }

    #[test]
    fn test_titles_without_keeps_order_and_duplicates() {
        let inquisitor = with_titles(&["A", "B", "A", "C"]);
        assert_eq!(
            inquisitor.titles_without(1).unwrap(),
            vec!["A".to_string(), "A".to_string(), "C".to_string()]
        );
        // source untouched
        assert_eq!(inquisitor.titles.len(), 4);
    }

    #[test]
    fn test_titles_without_rejects_out_of_range() {
        let inquisitor = with_titles(&["A"]);
        assert!(matches!(
            inquisitor.titles_without(1),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_inventory_without() {
        let inquisitor = Inquisitor {
            inventory: vec!["x".into(), "y".into()],
            ..Inquisitor::default()
        };
        assert_eq!(inquisitor.inventory_without(0).unwrap(), vec!["y".to_string()]);
        assert_eq!(inquisitor.item(1), Some("y"));
        assert_eq!(inquisitor.item(2), None);
    }

    #[test]
    fn test_serializes_with_host_keys() {
        let json = serde_json::to_value(Inquisitor::default()).unwrap();
        assert!(json.get("圣裁官姓名").is_some());
        assert!(json.get("物品栏").unwrap().is_array());
        assert_eq!(json.get("性别").unwrap(), "男");
    }
}
