// src/ui/elements/editor/state.rs
use bevy::prelude::Resource;

/// Form contents of the editor window. Survives re-renders; reset only by
/// the forms themselves.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct EditorWindowState {
    /// One entry per column, in column order.
    pub new_row_values: Vec<String>,
    pub edit_row_index: usize,
    pub edit_column: Option<String>,
    pub edit_value: String,
}

impl EditorWindowState {
    /// Keeps the forms consistent with the columns currently shown.
    pub fn sync_with_columns(&mut self, columns: &[String]) {
        if self.new_row_values.len() != columns.len() {
            self.new_row_values.resize(columns.len(), String::new());
        }
        if self
            .edit_column
            .as_ref()
            .is_some_and(|selected| !columns.contains(selected))
        {
            self.edit_column = None;
        }
        if self.edit_column.is_none() {
            self.edit_column = columns.first().cloned();
        }
    }

    /// Clamps the edit index to the last row. Returns `None` when there is no row.
    pub fn clamp_edit_row(&mut self, row_count: usize) -> Option<usize> {
        let last = row_count.checked_sub(1)?;
        self.edit_row_index = self.edit_row_index.min(last);
        Some(last)
    }

    /// Hands out the typed row and clears the inputs for the next one.
    pub fn take_new_row(&mut self) -> Vec<String> {
        let width = self.new_row_values.len();
        std::mem::replace(&mut self.new_row_values, vec![String::new(); width])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_sync_sizes_inputs_and_picks_column() {
        let mut state = EditorWindowState::default();
        state.sync_with_columns(&cols(&["Name", "Age", "City"]));
        assert_eq!(state.new_row_values.len(), 3);
        assert_eq!(state.edit_column.as_deref(), Some("Name"));

        state.edit_column = Some("City".to_string());
        state.sync_with_columns(&cols(&["Name", "Age", "City"]));
        assert_eq!(state.edit_column.as_deref(), Some("City"));

        state.sync_with_columns(&cols(&["Title", "Year"]));
        assert_eq!(state.new_row_values.len(), 2);
        assert_eq!(state.edit_column.as_deref(), Some("Title"));
    }

    #[test]
    fn test_clamp_edit_row() {
        let mut state = EditorWindowState {
            edit_row_index: 9,
            ..Default::default()
        };
        assert_eq!(state.clamp_edit_row(0), None);
        assert_eq!(state.clamp_edit_row(3), Some(2));
        assert_eq!(state.edit_row_index, 2);
    }

    #[test]
    fn test_take_new_row_resets_inputs() {
        let mut state = EditorWindowState {
            new_row_values: cols(&["Carol", "40", "SF"]),
            ..Default::default()
        };
        assert_eq!(state.take_new_row(), cols(&["Carol", "40", "SF"]));
        assert_eq!(state.new_row_values, cols(&["", "", ""]));
    }
}
