use crate::domain::entities::{FilterChip, FilterState};
use eframe::egui;

pub enum ChipAction {
    Remove(FilterChip),
    ClearAll,
}

/// Removable tokens for every applied filter value, rebuilt from the state
/// on each frame.
pub struct ActiveFilterChipView;

impl ActiveFilterChipView {
    pub fn entries(state: &FilterState) -> Vec<(FilterChip, String)> {
        state
            .chips()
            .into_iter()
            .map(|chip| {
                let label = chip.label(state);
                (chip, label)
            })
            .collect()
    }

    pub fn show(ui: &mut egui::Ui, state: &FilterState) -> Option<ChipAction> {
        let entries = Self::entries(state);
        if entries.is_empty() {
            return None;
        }

        let mut action = None;
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("Active filters:").strong());
            for (chip, label) in entries {
                let button = egui::Button::new(format!("{}  ✕", label))
                    .rounding(12.0)
                    .small();
                if ui
                    .add(button)
                    .on_hover_text("Remove this filter")
                    .clicked()
                {
                    action = Some(ChipAction::Remove(chip));
                }
            }
            if ui.link("Clear all").clicked() {
                action = Some(ChipAction::ClearAll);
            }
        });
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FilterKey, LocationLevel, LocationScope, QuickRange};

    #[test]
    fn entries_follow_chip_order_with_labels() {
        let mut state = FilterState::new();
        state.set_quick_range(Some(QuickRange::Last7Days));
        state.set_values(FilterKey::Sex, vec!["Male".into()]);
        state.set_location(
            LocationScope::Applicant,
            LocationLevel::Province,
            Some("Batangas".into()),
        );

        let entries = ActiveFilterChipView::entries(&state);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, FilterChip::Time);
        assert!(entries[1].1.ends_with(": Male"));
        assert!(entries[2].1.ends_with("Batangas"));
    }

    #[test]
    fn empty_state_has_no_chips() {
        assert!(ActiveFilterChipView::entries(&FilterState::new()).is_empty());
    }
}
