use crate::error::{Result, SowPlanError};
use crate::models::Plant;
use std::path::Path;

/// Read plant records from a JSON or YAML file, chosen by extension.
pub fn load_plants(path: &Path) -> Result<Vec<Plant>> {
    if !path.exists() {
        return Err(SowPlanError::NotFound(format!(
            "plant dataset {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let plants = match extension.as_deref() {
        Some("yaml") | Some("yml") => parse_yaml(&content)?,
        Some("json") | None => parse_json(&content)?,
        Some(other) => {
            return Err(SowPlanError::InvalidData(format!(
                "unsupported plant dataset format '.{}'",
                other
            )))
        }
    };

    tracing::debug!("Loaded {} plants from {}", plants.len(), path.display());
    Ok(plants)
}

pub fn parse_json(content: &str) -> Result<Vec<Plant>> {
    Ok(serde_json::from_str(content)?)
}

pub fn parse_yaml(content: &str) -> Result<Vec<Plant>> {
    Ok(serde_yaml::from_str(content)?)
}

/// Keep only the requested ids, in dataset order. An empty filter keeps all.
pub fn select_plants(plants: Vec<Plant>, ids: &[i64]) -> Result<Vec<Plant>> {
    if ids.is_empty() {
        return Ok(plants);
    }
    if let Some(missing) = ids.iter().find(|id| !plants.iter().any(|p| p.id == **id)) {
        return Err(SowPlanError::NotFound(format!("plant with id {}", missing)));
    }
    Ok(plants.into_iter().filter(|p| ids.contains(&p.id)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlantingMethod;

    const YAML: &str = r#"
- id: 1
  name: Cherry tomato
  subcategory: Tomat
  plantingMethod: indoor
  plantingWindows:
    indoors: { start: mars, end: april }
    outdoors: { start: "", end: "" }
  harvestTime: { start: juli, end: sept }
  daysIndoorGrowth: 49
  hardeningDays: 7
- id: 2
  name: Carrot
  subcategory: Gulrot
  plantingMethod: outdoor
  plantingWindows:
    outdoors: { start: mai, end: juni }
  harvestTime: { start: august, end: oktober }
"#;

    #[test]
    fn parses_yaml_dataset() {
        let plants = parse_yaml(YAML).unwrap();
        assert_eq!(plants.len(), 2);
        assert_eq!(plants[0].days_indoor_growth, Some(49));
        assert_eq!(plants[1].planting_method, Some(PlantingMethod::Outdoor));
        assert!(plants[0].planting_windows.outdoors.as_ref().unwrap().is_blank());
    }

    #[test]
    fn parses_json_with_missing_optionals() {
        let plants = parse_json(r#"[{ "id": 9, "subcategory": "Salat" }]"#).unwrap();
        assert_eq!(plants[0].id, 9);
        assert!(plants[0].harvest_time.is_none());
        assert!(plants[0].planting_method.is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            parse_json("[{ \"id\": }]"),
            Err(SowPlanError::Json(_))
        ));
    }

    #[test]
    fn select_plants_by_id() {
        let plants = parse_yaml(YAML).unwrap();
        let selected = select_plants(plants.clone(), &[2]).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, 2);
        assert_eq!(select_plants(plants.clone(), &[]).unwrap().len(), 2);
        assert!(matches!(
            select_plants(plants, &[3]),
            Err(SowPlanError::NotFound(_))
        ));
    }

    #[test]
    fn missing_file_is_not_found() {
        assert!(matches!(
            load_plants(Path::new("/nonexistent/plants.json")),
            Err(SowPlanError::NotFound(_))
        ));
    }
}
