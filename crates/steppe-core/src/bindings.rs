//! Element identifiers the scanner binds to.

use std::fmt;

/// Role an element plays in the scanner widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindingRole {
    Input,
    Viewport,
    StartControl,
    StopControl,
    ImageInput,
    Status,
}

impl BindingRole {
    pub const ALL: [BindingRole; 6] = [
        BindingRole::Input,
        BindingRole::Viewport,
        BindingRole::StartControl,
        BindingRole::StopControl,
        BindingRole::ImageInput,
        BindingRole::Status,
    ];

    /// Option key used by the host page when passing bindings from JS.
    pub fn option_key(self) -> &'static str {
        match self {
            BindingRole::Input => "inputId",
            BindingRole::Viewport => "readerId",
            BindingRole::StartControl => "startButtonId",
            BindingRole::StopControl => "stopButtonId",
            BindingRole::ImageInput => "imageInputId",
            BindingRole::Status => "statusId",
        }
    }
}

impl fmt::Display for BindingRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BindingRole::Input => "input field",
            BindingRole::Viewport => "camera viewport",
            BindingRole::StartControl => "start control",
            BindingRole::StopControl => "stop control",
            BindingRole::ImageInput => "image-file control",
            BindingRole::Status => "status display",
        };
        f.write_str(name)
    }
}

/// Immutable set of element ids supplied by the host page.
///
/// Ids are resolved exactly once, when the scanner is mounted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScannerBindings {
    pub input_id: String,
    pub viewport_id: String,
    pub start_id: String,
    pub stop_id: String,
    pub image_input_id: String,
    pub status_id: String,
}

impl ScannerBindings {
    pub fn id(&self, role: BindingRole) -> &str {
        match role {
            BindingRole::Input => &self.input_id,
            BindingRole::Viewport => &self.viewport_id,
            BindingRole::StartControl => &self.start_id,
            BindingRole::StopControl => &self.stop_id,
            BindingRole::ImageInput => &self.image_input_id,
            BindingRole::Status => &self.status_id,
        }
    }

    pub fn set_id(&mut self, role: BindingRole, id: impl Into<String>) {
        let id = id.into();
        match role {
            BindingRole::Input => self.input_id = id,
            BindingRole::Viewport => self.viewport_id = id,
            BindingRole::StartControl => self.start_id = id,
            BindingRole::StopControl => self.stop_id = id,
            BindingRole::ImageInput => self.image_input_id = id,
            BindingRole::Status => self.status_id = id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    Missing { role: BindingRole, id: String },
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::Missing { role, id } => {
                write!(f, "no element with id '{id}' for the {role}")
            }
        }
    }
}

impl std::error::Error for BindingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_id_round_trips_through_role() {
        let mut bindings = ScannerBindings::default();
        for (index, role) in BindingRole::ALL.into_iter().enumerate() {
            bindings.set_id(role, format!("el-{index}"));
        }
        assert_eq!(bindings.id(BindingRole::Input), "el-0");
        assert_eq!(bindings.id(BindingRole::Status), "el-5");
    }

    #[test]
    fn test_missing_binding_message_names_role() {
        let err = BindingError::Missing {
            role: BindingRole::StopControl,
            id: "qr-stop".into(),
        };
        assert_eq!(err.to_string(), "no element with id 'qr-stop' for the stop control");
    }
}
