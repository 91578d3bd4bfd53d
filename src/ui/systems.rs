// src/ui/systems.rs
use bevy::prelude::*;

use crate::sheets::events::SheetOperationFeedback;
use crate::ui::UiFeedbackState;

/// Shows the last message of the frame, except that an error is never
/// hidden behind a later success.
pub fn handle_ui_feedback(
    mut feedback_events: EventReader<SheetOperationFeedback>,
    mut ui_feedback_state: ResMut<UiFeedbackState>,
) {
    let mut shown: Option<&SheetOperationFeedback> = None;
    for event in feedback_events.read() {
        match shown {
            Some(prev) if prev.is_error && !event.is_error => {}
            _ => shown = Some(event),
        }
    }
    if let Some(event) = shown {
        ui_feedback_state.last_message = event.message.clone();
        ui_feedback_state.is_error = event.is_error;
        trace!("UI feedback updated (error: {}).", event.is_error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(events: Vec<SheetOperationFeedback>) -> UiFeedbackState {
        let mut app = App::new();
        app.add_event::<SheetOperationFeedback>()
            .init_resource::<UiFeedbackState>()
            .add_systems(Update, handle_ui_feedback);
        for event in events {
            app.world_mut().send_event(event);
        }
        app.update();
        app.world().resource::<UiFeedbackState>().clone()
    }

    #[test]
    fn test_last_message_wins() {
        let state = run(vec![
            SheetOperationFeedback::ok("first"),
            SheetOperationFeedback::ok("second"),
        ]);
        assert_eq!(state.last_message, "second");
        assert!(!state.is_error);
    }

    #[test]
    fn test_error_not_hidden_by_success() {
        let state = run(vec![
            SheetOperationFeedback::error("save failed"),
            SheetOperationFeedback::ok("reloaded"),
        ]);
        assert_eq!(state.last_message, "save failed");
        assert!(state.is_error);
    }
}
