// Query form state for the viewer
use crate::domain::query::{TurbineQuery, ValidationError, WIRE_TIME_FORMAT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusField {
    TurbineId,
    Start,
    End,
}

/// The three editable query fields plus the inline validation message.
/// Fields mutate independently; nothing is cross-checked until the
/// operator triggers a fetch.
#[derive(Debug)]
pub struct QueryForm {
    pub turbine_id: String,
    pub start: String,
    pub end: String,
    pub focus: FocusField,
    pub field_error: Option<String>,
}

impl QueryForm {
    pub fn new() -> Self {
        Self {
            turbine_id: String::new(),
            start: String::new(),
            end: String::new(),
            focus: FocusField::TurbineId,
            field_error: None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FocusField::TurbineId => FocusField::Start,
            FocusField::Start => FocusField::End,
            FocusField::End => FocusField::TurbineId,
        };
    }

    pub fn focus_previous(&mut self) {
        self.focus = match self.focus {
            FocusField::TurbineId => FocusField::End,
            FocusField::Start => FocusField::TurbineId,
            FocusField::End => FocusField::Start,
        };
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_value_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_value_mut().pop();
    }

    fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            FocusField::TurbineId => &mut self.turbine_id,
            FocusField::Start => &mut self.start,
            FocusField::End => &mut self.end,
        }
    }

    /// Validate the current field contents into a query. Called when the
    /// operator triggers a fetch; the inline error is refreshed either way.
    pub fn submit(&mut self) -> Option<TurbineQuery> {
        match TurbineQuery::parse(&self.turbine_id, &self.start, &self.end) {
            Ok(query) => {
                self.field_error = None;
                Some(query)
            }
            Err(err @ ValidationError::MissingField) => {
                self.field_error = Some(err.to_string());
                None
            }
        }
    }

    pub fn time_format_hint() -> String {
        // Render the strftime pattern the way the operator should type it
        WIRE_TIME_FORMAT
            .replace("%d", "dd")
            .replace("%m", "MM")
            .replace("%Y", "yyyy")
            .replace("%H", "HH")
            .replace("%M", "mm")
    }
}

impl Default for QueryForm {
    fn default() -> Self {
        Self::new()
    }
}
