use eframe::egui::Color32;

use crate::data::model::Sex;

// ---------------------------------------------------------------------------
// Colour per sex
// ---------------------------------------------------------------------------

const SEX_COLORS: [(Sex, Color32); 3] = [
    (Sex::BothSexes, Color32::from_rgb(0, 128, 0)),
    (Sex::Female, Color32::from_rgb(220, 20, 20)),
    (Sex::Male, Color32::from_rgb(30, 60, 220)),
];

/// Fixed plot colour for a sex, identical in line and bar views.
pub fn sex_color(sex: Sex) -> Color32 {
    SEX_COLORS
        .iter()
        .find(|(s, _)| *s == sex)
        .map(|(_, c)| *c)
        .unwrap_or(Color32::GRAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sex_has_its_own_colour() {
        let colors: Vec<Color32> = Sex::ALL.iter().map(|&s| sex_color(s)).collect();
        assert!(colors.iter().all(|c| *c != Color32::GRAY));
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
