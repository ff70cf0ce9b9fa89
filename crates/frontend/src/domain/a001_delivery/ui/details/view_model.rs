use chrono::Utc;
use contracts::domain::a001_delivery::{
    Building, Delivery, DeliveryDraft, DeliveryId, DeliveryPatch, NewDeliveryDto, ValidatedDraft,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_delivery::api;
use crate::domain::a001_delivery::ui::list::view_model::EditorMode;
use crate::shared::config::config;
use crate::shared::notify::NotificationService;

/// What a successful save produced
#[derive(Clone, Debug)]
pub enum SaveOutcome {
    Created(Delivery),
    Updated,
}

/// ViewModel for the add/edit delivery form
#[derive(Clone, Copy)]
pub struct DeliveryDetailsViewModel {
    pub form: RwSignal<DeliveryDraft>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    editing: StoredValue<Option<DeliveryId>>,
    notifications: NotificationService,
}

impl DeliveryDetailsViewModel {
    pub fn new(mode: &EditorMode, notifications: NotificationService) -> Self {
        let (draft, editing) = match mode {
            EditorMode::Create => (DeliveryDraft::default(), None),
            EditorMode::Edit(d) => (DeliveryDraft::from_delivery(d), Some(d.id.clone())),
        };
        Self {
            form: RwSignal::new(draft),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            editing: StoredValue::new(editing),
            notifications,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing.with_value(Option::is_some)
    }

    pub fn select_building(&self, building: Option<Building>) {
        self.form.update(|f| f.select_building(building));
    }

    pub fn set_flat(&self, flat: String) {
        self.form.update(|f| f.flat_number = flat);
    }

    pub fn set_amount(&self, amount: String) {
        self.form.update(|f| f.amount = amount);
    }

    /// Flats offered for the currently selected building
    pub fn flat_options(&self) -> Vec<String> {
        self.form
            .with(|f| f.building)
            .map(|b| config().catalog.flats_for(b).to_vec())
            .unwrap_or_default()
    }

    /// Check the form against the flat catalog; the message is also kept in `error`
    fn validate_form(&self) -> Result<ValidatedDraft, String> {
        match self.form.with_untracked(|f| f.validate(&config().catalog)) {
            Ok(validated) => {
                self.error.set(None);
                Ok(validated)
            }
            Err(e) => {
                let message = e.to_string();
                self.error.set(Some(message.clone()));
                Err(message)
            }
        }
    }

    /// Validate, then create or update. Invalid input never reaches the network.
    pub fn save_command(&self, on_saved: Callback<SaveOutcome>) {
        if self.saving.get_untracked() {
            return;
        }

        let validated = match self.validate_form() {
            Ok(v) => v,
            Err(message) => {
                self.notifications.error(message);
                return;
            }
        };
        self.saving.set(true);

        let editing = self.editing.get_value();
        let vm = *self;
        spawn_local(async move {
            let result = match editing {
                Some(id) => api::update_delivery(&id, &DeliveryPatch::details(validated))
                    .await
                    .map(|()| SaveOutcome::Updated),
                None => api::create_delivery(&NewDeliveryDto::from_draft(validated, Utc::now()))
                    .await
                    .map(SaveOutcome::Created),
            };
            // The form may have been closed while the request was in flight.
            let _ = vm.saving.try_set(false);

            match result {
                Ok(outcome) => {
                    let message = match &outcome {
                        SaveOutcome::Created(d) => {
                            log::info!("Delivery {} created", d.id);
                            "Delivery added successfully"
                        }
                        SaveOutcome::Updated => "Delivery updated successfully",
                    };
                    vm.notifications.success(message);
                    on_saved.run(outcome);
                }
                Err(e) => {
                    log::error!("Error saving delivery: {}", e);
                    vm.notifications.error("Error saving delivery");
                    let _ = vm.error.try_set(Some(e.to_string()));
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_vm() -> (Owner, DeliveryDetailsViewModel) {
        let owner = Owner::new();
        owner.set();
        let vm = DeliveryDetailsViewModel::new(&EditorMode::Create, NotificationService::new());
        (owner, vm)
    }

    #[test]
    fn test_empty_form_is_rejected_before_saving() {
        let (_owner, vm) = create_vm();

        let result = vm.validate_form();
        assert_eq!(result.unwrap_err(), "Please select a flat number");
        assert_eq!(
            vm.error.get_untracked().as_deref(),
            Some("Please select a flat number")
        );
        assert!(!vm.saving.get_untracked());
    }

    #[test]
    fn test_missing_building_is_rejected() {
        let (_owner, vm) = create_vm();
        vm.select_building(None);

        assert_eq!(vm.validate_form().unwrap_err(), "Please select a building");
    }

    #[test]
    fn test_valid_form_clears_previous_error() {
        let (_owner, vm) = create_vm();
        assert!(vm.validate_form().is_err());

        vm.select_building(Some(Building::Hydra));
        vm.set_flat("202".into());
        vm.set_amount("75".into());

        let validated = vm.validate_form().unwrap();
        assert_eq!(validated.building, Building::Hydra);
        assert_eq!(validated.amount, 75.0);
        assert_eq!(vm.error.get_untracked(), None);
    }

    #[test]
    fn test_building_change_clears_flat() {
        let (_owner, vm) = create_vm();
        vm.select_building(Some(Building::Hydra));
        vm.set_flat("201".into());
        assert_eq!(vm.flat_options(), vec!["201", "202", "203"]);

        vm.select_building(Some(Building::Firenze));
        assert_eq!(vm.form.get_untracked().flat_number, "");
        assert_eq!(vm.validate_form().unwrap_err(), "Please select a flat number");
    }
}
