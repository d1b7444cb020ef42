use crate::models::{MonthRange, PlantingMethod, PlantingWindows};

/// Pick the planting window that applies to a planting method.
///
/// Outdoor plants use the outdoor window only. Indoor (or unspecified)
/// plants prefer the indoor window and fall back to the outdoor one. A window
/// with a blank bound counts as missing.
pub fn select_planting_window(
    windows: &PlantingWindows,
    method: Option<PlantingMethod>,
) -> Option<&MonthRange> {
    fn present(w: &Option<MonthRange>) -> Option<&MonthRange> {
        w.as_ref().filter(|r| !r.is_blank())
    }

    match method {
        Some(PlantingMethod::Outdoor) => present(&windows.outdoors),
        Some(PlantingMethod::Indoor) | None => {
            present(&windows.indoors).or_else(|| present(&windows.outdoors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows(indoors: Option<(&str, &str)>, outdoors: Option<(&str, &str)>) -> PlantingWindows {
        PlantingWindows {
            indoors: indoors.map(|(s, e)| MonthRange::new(s, e)),
            outdoors: outdoors.map(|(s, e)| MonthRange::new(s, e)),
        }
    }

    #[test]
    fn outdoor_method_uses_outdoor_window() {
        let w = windows(Some(("mars", "april")), Some(("mai", "juni")));
        assert_eq!(
            select_planting_window(&w, Some(PlantingMethod::Outdoor)),
            Some(&MonthRange::new("mai", "juni"))
        );
    }

    #[test]
    fn outdoor_method_never_falls_back() {
        let w = windows(Some(("mars", "april")), None);
        assert_eq!(select_planting_window(&w, Some(PlantingMethod::Outdoor)), None);

        let w = windows(Some(("mars", "april")), Some(("", "juni")));
        assert_eq!(select_planting_window(&w, Some(PlantingMethod::Outdoor)), None);
    }

    #[test]
    fn indoor_method_prefers_indoor_window() {
        let w = windows(Some(("mars", "april")), Some(("mai", "juni")));
        assert_eq!(
            select_planting_window(&w, Some(PlantingMethod::Indoor)),
            Some(&MonthRange::new("mars", "april"))
        );
    }

    #[test]
    fn blank_indoor_window_falls_back_to_outdoor() {
        let w = windows(Some(("", "")), Some(("mai", "juni")));
        assert_eq!(
            select_planting_window(&w, Some(PlantingMethod::Outdoor)),
            Some(&MonthRange::new("mai", "juni"))
        );
        assert_eq!(
            select_planting_window(&w, Some(PlantingMethod::Indoor)),
            Some(&MonthRange::new("mai", "juni"))
        );
    }

    #[test]
    fn unspecified_method_behaves_like_indoor() {
        let w = windows(None, Some(("mai", "juni")));
        assert_eq!(
            select_planting_window(&w, None),
            Some(&MonthRange::new("mai", "juni"))
        );
        let w = windows(Some(("mars", "april")), Some(("mai", "juni")));
        assert_eq!(
            select_planting_window(&w, None),
            Some(&MonthRange::new("mars", "april"))
        );
    }

    #[test]
    fn no_usable_window() {
        let w = windows(Some(("mars", "")), Some(("", "juni")));
        assert_eq!(select_planting_window(&w, None), None);
        assert_eq!(select_planting_window(&PlantingWindows::default(), None), None);
    }
}
